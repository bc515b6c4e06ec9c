//! Product source input for the cart.
//!
//! A [`ProductCandidate`] is what a catalog card or the detail modal hands to
//! [`CartStore::add_item`](crate::CartStore::add_item). Numeric fields are kept
//! raw until the store normalizes them, so every entry point shares one set of
//! coercion rules.

use serde_json::Value;

use crate::normalize::{
    price_from_display, price_from_value, quantity_from_display, quantity_from_value,
    title_from_display,
};
use crate::types::LineItem;

/// Candidate line item supplied by a product source.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCandidate {
    /// Display title; the cart's natural key
    pub title: String,
    /// Raw price, `Null` when the source had none
    pub price: Value,
    /// Image URL or path
    pub image_source: Option<String>,
    /// Raw quantity, `Null` when the source had none (treated as 1)
    pub quantity: Value,
}

impl ProductCandidate {
    /// Candidate with only a title; price 0 and quantity 1 once normalized.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: Value::Null,
            image_source: None,
            quantity: Value::Null,
        }
    }

    /// Catalog card "add" button: title, price text as displayed, image.
    ///
    /// The card path never carries a quantity.
    pub fn from_card(title: Option<&str>, price_text: Option<&str>, image: Option<&str>) -> Self {
        let price = price_text.map(price_from_display).unwrap_or(0.0);
        Self::new(title_from_display(title))
            .with_price(price)
            .with_image(image.unwrap_or_default())
    }

    /// Detail modal "add to cart": like a card, plus the modal's quantity input.
    pub fn from_modal(
        title: Option<&str>,
        price_text: Option<&str>,
        image: Option<&str>,
        quantity_text: &str,
    ) -> Self {
        Self::from_card(title, price_text, image)
            .with_quantity(i64::from(quantity_from_display(quantity_text)))
    }

    pub fn with_price(mut self, price: f64) -> Self {
        // Non-finite floats have no JSON form and become Null, i.e. price 0.
        self.price = Value::from(price);
        self
    }

    /// Set the price from an untyped value (e.g. a stored field or a form value).
    pub fn with_price_value(mut self, price: Value) -> Self {
        self.price = price;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image_source = Some(image.into());
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Value::from(quantity);
        self
    }

    /// Set the quantity from an untyped value.
    pub fn with_quantity_value(mut self, quantity: Value) -> Self {
        self.quantity = quantity;
        self
    }

    /// Normalized quantity this candidate contributes (always ≥ 1).
    pub fn normalized_quantity(&self) -> u32 {
        quantity_from_value(&self.quantity)
    }

    /// Apply the parse-with-default rules and produce a valid line item.
    pub fn into_line_item(self) -> LineItem {
        let quantity = self.normalized_quantity();
        LineItem {
            unit_price: price_from_value(&self.price),
            image_source: self.image_source.unwrap_or_default(),
            title: self.title,
            quantity,
        }
    }
}
