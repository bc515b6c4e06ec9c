//! Storefront Cart Core Library
//!
//! Persisted shopping cart for a small storefront: title-keyed line items,
//! saved after every change and restored at startup.
//!
//! ## Overview
//!
//! Several entry points add to the same cart (catalog cards, the product
//! detail modal) while rows are edited from a rendered cart panel. The
//! [`CartStore`] is the single owner of that collection: it normalizes every
//! input, keeps titles unique, writes the record back to a key/value store
//! after each mutation, and hands the result to a renderer.
//!
//! ## Core Principles
//!
//! - **Lenient input**: malformed prices and quantities degrade to safe defaults
//! - **Title is identity**: two products with the same title are the same row
//! - **Memory mirrors storage**: every mutation is persisted before it returns
//!
//! ## Quick Start
//!
//! ```
//! use storefront_core::{CartStore, MemoryStore, ProductCandidate};
//!
//! let mut cart = CartStore::new(MemoryStore::new());
//!
//! cart.add_item(ProductCandidate::new("Mug").with_price(15000.0));
//! cart.add_item(ProductCandidate::from_card(Some("Mug"), Some("$15.000"), None));
//!
//! assert_eq!(cart.items()[0].quantity, 2);
//! assert_eq!(cart.totals().total_price, 30000.0);
//! ```

pub mod action;
pub mod cart;
pub mod checkout;
pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod normalize;
pub mod product;
pub mod render;
pub mod storage;
pub mod types;

// Re-exports
pub use action::CartAction;
pub use cart::{CartStore, CartStoreBuilder};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use events::{CartEvent, Notification, NotificationLevel, Notifier, SilentNotifier};
pub use product::ProductCandidate;
pub use render::{HtmlFragment, NullRenderer, Renderer, TextRenderer};
pub use storage::{KeyValueStore, MemoryStore, RedbStore};
pub use types::{LineItem, Totals};
