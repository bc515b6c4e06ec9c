//! Persisted cart record codec.
//!
//! The record is a JSON array of objects:
//!
//! ```text
//! [
//!   { "title": "Mug", "imgSrc": "img/mug.png", "price": 15000, "quantity": 2 },
//!   ...
//! ]
//! ```
//!
//! Encoding is plain `serde_json`. Decoding is lenient per entry: each object
//! is re-normalized with the same coercions `add_item` uses, so a corrupted
//! field heals to its default instead of poisoning the cart. Only a value that
//! is not JSON at all, or not an array, is rejected.

use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::normalize::{image_from_value, price_from_value, quantity_from_value, title_from_value};
use crate::types::LineItem;

/// Encode line items into the persisted record.
pub fn encode(items: &[LineItem]) -> StoreResult<Vec<u8>> {
    serde_json::to_vec(items).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Decode a persisted record into normalized line items.
///
/// Entries that are not objects decode to an all-default item, mirroring how
/// missing fields are treated.
pub fn decode(bytes: &[u8]) -> StoreResult<Vec<LineItem>> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;

    match value {
        Value::Array(entries) => Ok(entries.iter().map(line_item_from_value).collect()),
        other => Err(StoreError::MalformedRecord(format!(
            "expected an array, found {}",
            kind(&other)
        ))),
    }
}

/// Normalize one persisted entry.
pub fn line_item_from_value(entry: &Value) -> LineItem {
    LineItem {
        title: title_from_value(field(entry, "title")),
        image_source: image_from_value(field(entry, "imgSrc")),
        unit_price: price_from_value(field(entry, "price")),
        quantity: quantity_from_value(field(entry, "quantity")),
    }
}

static MISSING: Value = Value::Null;

fn field<'a>(entry: &'a Value, name: &str) -> &'a Value {
    entry.get(name).unwrap_or(&MISSING)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
