//! Core types for the storefront cart

use serde::{Deserialize, Serialize};

/// One row in the cart.
///
/// The title is the natural key: two line items are the same product iff
/// their titles are equal. Field names on the wire follow the storefront's
/// persisted record (`imgSrc`, `price`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display title, also the identity of the row
    pub title: String,
    /// Image URL or path, display only
    #[serde(rename = "imgSrc")]
    pub image_source: String,
    /// Non-negative unit price
    #[serde(rename = "price")]
    pub unit_price: f64,
    /// Always at least 1
    pub quantity: u32,
}

impl LineItem {
    /// `unit_price × quantity` for this row.
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Derived cart totals. Recomputed on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// Sum of quantities
    pub total_items: u64,
    /// Sum of `unit_price × quantity`
    pub total_price: f64,
}

impl Totals {
    /// Fold the totals over a slice of line items.
    pub fn of(items: &[LineItem]) -> Self {
        items.iter().fold(Self::default(), |acc, item| Self {
            total_items: acc.total_items + u64::from(item.quantity),
            total_price: acc.total_price + item.subtotal(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, price: f64, quantity: u32) -> LineItem {
        LineItem {
            title: title.to_string(),
            image_source: String::new(),
            unit_price: price,
            quantity,
        }
    }

    #[test]
    fn test_totals_of_empty() {
        assert_eq!(Totals::of(&[]), Totals::default());
    }

    #[test]
    fn test_totals_fold() {
        let items = vec![item("Mug", 15000.0, 2), item("Cup", 3000.0, 1)];
        let totals = Totals::of(&items);
        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.total_price, 33000.0);
    }

    #[test]
    fn test_line_item_wire_names() {
        let json = serde_json::to_value(item("Mug", 15000.0, 2)).unwrap();
        assert_eq!(json["title"], "Mug");
        assert_eq!(json["imgSrc"], "");
        assert_eq!(json["price"], 15000.0);
        assert_eq!(json["quantity"], 2);
    }
}
