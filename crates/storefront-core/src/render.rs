//! Renderers: turning cart state into something visible.
//!
//! The store calls its [`Renderer`] after every mutation with the current
//! items and freshly computed totals. Two presentations are provided: plain
//! text for terminals and the storefront's cart panel HTML, whose row buttons
//! carry the trigger classes and `data-title` that [`CartAction`](crate::CartAction) parses.

use std::io::Write;

use crate::action::{DECREMENT_TRIGGER, INCREMENT_TRIGGER, REMOVE_TRIGGER};
use crate::types::{LineItem, Totals};

/// Message shown in place of rows when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Tu carrito está vacío";

/// Receiver of cart state after every mutation.
///
/// Any `FnMut(&[LineItem], Totals)` closure is a renderer.
pub trait Renderer {
    fn render(&mut self, items: &[LineItem], totals: Totals);
}

impl<F: FnMut(&[LineItem], Totals)> Renderer for F {
    fn render(&mut self, items: &[LineItem], totals: Totals) {
        self(items, totals)
    }
}

/// Renderer for headless use; paints nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _items: &[LineItem], _totals: Totals) {}
}

/// Writes [`render_text`] output to any `io::Write`.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, items: &[LineItem], totals: Totals) {
        let text = render_text(items, totals);
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::debug!(error = ?e, "Failed to write cart render");
        }
    }
}

/// Format an amount the way the storefront displays prices: `$`, `.` as
/// thousands separator, and `,` plus up to two decimals when fractional.
///
/// `30000.0` is `"$30.000"`, `1234.5` is `"$1.234,5"`.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round();
    let whole = format!("{:.0}", (cents / 100.0).trunc());
    let fraction = (cents % 100.0) as u32;

    let mut out = String::new();
    if amount < 0.0 && cents > 0.0 {
        out.push('-');
    }
    out.push('$');
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(digit);
    }
    if fraction != 0 {
        let decimals = format!("{:02}", fraction);
        out.push(',');
        out.push_str(decimals.trim_end_matches('0'));
    }
    out
}

/// Escape text for HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted attribute value.
///
/// `&` is escaped too, so a title read back from `data-title` is exactly the
/// title that was written.
pub fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;").replace('"', "&quot;")
}

/// Plain-text view: one line per row, then the totals.
pub fn render_text(items: &[LineItem], totals: Totals) -> String {
    let mut lines = Vec::with_capacity(items.len() + 2);
    if items.is_empty() {
        lines.push(EMPTY_CART_MESSAGE.to_string());
    }
    for item in items {
        lines.push(format!(
            "{}  {} x {}",
            item.title,
            format_currency(item.unit_price),
            item.quantity
        ));
    }
    lines.push(format!("Total: {}", format_currency(totals.total_price)));
    lines.push(format!("Artículos: {}", totals.total_items));
    lines.join("\n")
}

/// The three pieces of the cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlFragment {
    /// Content of the rows container
    pub items_html: String,
    /// Text of the total label, e.g. `"Total: $30.000"`
    pub total_text: String,
    /// Text of the counter badge (total item count)
    pub counter_text: String,
}

/// Render the cart panel markup.
pub fn render_html(items: &[LineItem], totals: Totals) -> HtmlFragment {
    let items_html = if items.is_empty() {
        format!("<p class=\"empty\">{}</p>", EMPTY_CART_MESSAGE)
    } else {
        items.iter().map(render_row).collect::<Vec<_>>().join("\n")
    };

    HtmlFragment {
        items_html,
        total_text: format!("Total: {}", format_currency(totals.total_price)),
        counter_text: totals.total_items.to_string(),
    }
}

fn render_row(item: &LineItem) -> String {
    let title = escape_html(&item.title);
    let data_title = escape_attr(&item.title);
    let buttons = [
        (DECREMENT_TRIGGER, "-"),
        (INCREMENT_TRIGGER, "+"),
        (REMOVE_TRIGGER, "×"),
    ]
    .iter()
    .map(|(class, label)| {
        format!(
            "<button class=\"{}\" data-title=\"{}\">{}</button>",
            class, data_title, label
        )
    })
    .collect::<String>();

    format!(
        "<div class=\"cart-item\">\
         <img src=\"{}\" alt=\"{}\" class=\"cart-img\">\
         <div class=\"cart-info\"><h4>{}</h4><p>{} x {}</p></div>\
         <div class=\"cart-actions\">{}</div>\
         </div>",
        escape_attr(&item.image_source),
        title,
        title,
        format_currency(item.unit_price),
        item.quantity,
        buttons
    )
}
