//! Error types for the storefront cart

use thiserror::Error;

/// Main error type for storage and codec operations.
///
/// Cart operations themselves never return this: the store logs and degrades
/// instead. It surfaces from the storage backends and the persisted-record
/// codec, and from anything that talks to them directly.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend-specific storage failure (quota, disabled storage, injected fault)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Error during serialization/deserialization of the persisted record
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Persisted value decoded but is not a sequence of line items
    #[error("Malformed cart record: {0}")]
    MalformedRecord(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be used
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using StoreError
pub type StoreResult<T> = Result<T, StoreError>;
