//! Checkout hand-off: the order summary sent to the shop over WhatsApp.
//!
//! There is no payment flow. Checkout builds a plain-text order message from
//! the cart and a `wa.me` deep link carrying it.

use crate::render::format_currency;
use crate::types::{LineItem, Totals};

const GREETING: &str = "Hola, quiero finalizar mi compra.\n";

/// Build the order message for the given items.
pub fn order_message(items: &[LineItem]) -> String {
    let totals = Totals::of(items);
    let lines: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "• {}  x{}  —  {}",
                item.title,
                item.quantity,
                format_currency(item.subtotal())
            )
        })
        .collect();

    let detail = if lines.is_empty() {
        String::new()
    } else {
        format!("\nDetalle del pedido:\n{}\n", lines.join("\n"))
    };
    let total = format!("\nTotal actual: {}", format_currency(totals.total_price));

    format!("{}{}{}", GREETING, detail, total).trim().to_string()
}

/// Deep link that opens a WhatsApp chat with `phone` prefilled with the order.
///
/// `phone` is in international format without `+`, e.g. `573001234567`.
pub fn whatsapp_url(phone: &str, items: &[LineItem]) -> String {
    format!(
        "https://wa.me/{}?text={}",
        phone,
        urlencoding::encode(&order_message(items))
    )
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
    fn test_order_message_empty_cart() {
        assert_eq!(
            order_message(&[]),
            "Hola, quiero finalizar mi compra.\n\nTotal actual: $0"
        );
    }

    #[test]
    fn test_order_message_lists_items_with_quantities() {
        let items = vec![item("Mug", 15000.0, 2), item("Cup", 3000.0, 1)];
        assert_eq!(
            order_message(&items),
            "Hola, quiero finalizar mi compra.\n\
             \nDetalle del pedido:\n\
             • Mug  x2  —  $30.000\n\
             • Cup  x1  —  $3.000\n\
             \nTotal actual: $33.000"
        );
    }

    #[test]
    fn test_whatsapp_url_is_percent_encoded() {
        let url = whatsapp_url("573001234567", &[item("Mug", 1000.0, 1)]);
        assert!(url.starts_with("https://wa.me/573001234567?text=Hola%2C%20quiero"));
        assert!(!url.contains(' '));
        assert!(!url.contains('\n'));
        assert!(url.contains("%0A"));
    }
}
