//! The cart store.
//!
//! [`CartStore`] owns the ordered, title-keyed line items and is the only
//! writer of the persisted cart record. Every mutation runs to completion
//! before returning:
//!
//! ```text
//! mutate items ──► encode ──► storage.put ──► renderer ──► events ──► notifier
//! ```
//!
//! Cart operations never fail. Malformed input is coerced, unknown titles are
//! no-ops, and a storage write failure leaves the in-memory cart
//! authoritative for the rest of the session (see [`CartStore::persistence_degraded`]).

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::action::CartAction;
use crate::checkout;
use crate::codec;
use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::events::{CartEvent, EventBus, Notification, Notifier, SilentNotifier};
use crate::normalize::sanitize_quantity;
use crate::product::ProductCandidate;
use crate::render::{NullRenderer, Renderer};
use crate::storage::KeyValueStore;
use crate::types::{LineItem, Totals};

/// Builder for [`CartStore`]. Obtained from [`CartStore::builder`].
pub struct CartStoreBuilder<S> {
    storage: S,
    config: StoreConfig,
    renderer: Box<dyn Renderer>,
    notifier: Box<dyn Notifier>,
}

impl<S: KeyValueStore> CartStoreBuilder<S> {
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Load the cart from storage and paint it once.
    pub fn build(self) -> CartStore<S> {
        let mut store = CartStore {
            storage: self.storage,
            config: self.config,
            items: Vec::new(),
            renderer: self.renderer,
            notifier: self.notifier,
            events: EventBus::new(),
            degraded: false,
        };
        store.load_from_storage();
        store.render();
        store
    }
}

/// Persisted shopping cart.
pub struct CartStore<S> {
    storage: S,
    config: StoreConfig,
    items: Vec<LineItem>,
    renderer: Box<dyn Renderer>,
    notifier: Box<dyn Notifier>,
    events: EventBus,
    degraded: bool,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn builder(storage: S) -> CartStoreBuilder<S> {
        CartStoreBuilder {
            storage,
            config: StoreConfig::default(),
            renderer: Box::new(NullRenderer),
            notifier: Box::new(SilentNotifier),
        }
    }

    /// Headless store with the default config, loaded from `storage`.
    pub fn new(storage: S) -> Self {
        Self::builder(storage).build()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Mutations
    // ═══════════════════════════════════════════════════════════════════════

    /// Add a product to the cart.
    ///
    /// An existing row with the same title has its quantity increased by the
    /// candidate's quantity (1 when absent); otherwise the normalized candidate
    /// is appended. Returns the row's quantity after the add.
    pub fn add_item(&mut self, candidate: ProductCandidate) -> u32 {
        let added = candidate.normalized_quantity();
        let title = candidate.title.clone();

        let quantity = match self.position(&title) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(added);
                item.quantity
            }
            None => {
                self.items.push(candidate.into_line_item());
                added
            }
        };
        debug!(%title, added, quantity, "Added item to cart");

        self.persist();
        self.render();
        self.events.publish(CartEvent::ItemAdded {
            title: title.clone(),
            added,
            quantity,
        });
        if self.config.notify {
            self.notifier.notify(&Notification::item_added(&title, added));
        }
        quantity
    }

    /// Remove the row with this title. Returns `false` (and does nothing) if
    /// there is no such row.
    pub fn remove_item(&mut self, title: &str) -> bool {
        let Some(index) = self.position(title) else {
            debug!(%title, "Remove ignored: title not in cart");
            return false;
        };
        self.items.remove(index);
        debug!(%title, "Removed item from cart");

        self.persist();
        self.render();
        self.events.publish(CartEvent::ItemRemoved {
            title: title.to_string(),
        });
        true
    }

    /// Shift a row's quantity by `delta`, never below 1.
    ///
    /// Persists and re-renders even when the floor leaves the quantity
    /// unchanged. Returns the new quantity, or `None` if the title is unknown.
    pub fn change_quantity(&mut self, title: &str, delta: i64) -> Option<u32> {
        let index = self.position(title)?;
        let item = &mut self.items[index];
        item.quantity = sanitize_quantity(i64::from(item.quantity).saturating_add(delta));
        let quantity = item.quantity;
        debug!(%title, delta, quantity, "Changed item quantity");

        self.persist();
        self.render();
        self.events.publish(CartEvent::QuantityChanged {
            title: title.to_string(),
            quantity,
        });
        Some(quantity)
    }

    /// Route a delegated row action to its operation.
    pub fn dispatch(&mut self, action: CartAction) {
        match action {
            CartAction::Remove(title) => {
                self.remove_item(&title);
            }
            CartAction::Increment(title) => {
                self.change_quantity(&title, 1);
            }
            CartAction::Decrement(title) => {
                self.change_quantity(&title, -1);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Loading
    // ═══════════════════════════════════════════════════════════════════════

    /// Replace the in-memory cart with the persisted record.
    ///
    /// An absent key, an unreadable backend, or an undecodable record all
    /// yield an empty cart. Decoded entries are re-normalized, and rows that
    /// repeat an earlier title are folded into it so titles stay unique.
    /// Does not write back and does not render.
    pub fn load_from_storage(&mut self) {
        let key = self.config.storage_key.as_str();
        self.items = match self.storage.get(key) {
            Ok(Some(bytes)) => match codec::decode(&bytes) {
                Ok(items) => merge_duplicate_titles(items),
                Err(e) => {
                    warn!(key, error = %e, "Discarding undecodable cart record");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "Failed to read cart record; starting empty");
                Vec::new()
            }
        };
        info!(key, items = self.items.len(), "Loaded cart from storage");
        self.events.publish(CartEvent::Reloaded {
            items: self.items.len(),
        });
    }

    /// Pick up a record written by another context (last writer wins) and
    /// repaint.
    pub fn reload(&mut self) {
        self.load_from_storage();
        self.render();
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Reads
    // ═══════════════════════════════════════════════════════════════════════

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, title: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.title == title)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item count and price total, folded fresh on every call.
    pub fn totals(&self) -> Totals {
        Totals::of(&self.items)
    }

    /// Encoded form of the current cart, as it would be persisted.
    pub fn snapshot(&self) -> StoreResult<Vec<u8>> {
        codec::encode(&self.items)
    }

    /// True while the last storage write failed.
    pub fn persistence_degraded(&self) -> bool {
        self.degraded
    }

    /// Subscribe to mutation events.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// WhatsApp checkout link for the current cart.
    pub fn checkout_url(&self) -> String {
        checkout::whatsapp_url(&self.config.checkout_phone, &self.items)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Internals
    // ═══════════════════════════════════════════════════════════════════════

    fn position(&self, title: &str) -> Option<usize> {
        self.items.iter().position(|item| item.title == title)
    }

    fn render(&mut self) {
        let totals = self.totals();
        self.renderer.render(&self.items, totals);
    }

    /// Write the cart back. Failures are logged and flag the store degraded;
    /// the user is warned once per transition into that state.
    fn persist(&mut self) {
        let result = codec::encode(&self.items)
            .and_then(|bytes| self.storage.put(&self.config.storage_key, &bytes));

        match result {
            Ok(()) => {
                if self.degraded {
                    info!("Cart persistence recovered");
                    self.degraded = false;
                }
            }
            Err(e) => {
                warn!(key = %self.config.storage_key, error = %e, "Failed to persist cart; keeping in-memory state");
                self.events.publish(CartEvent::PersistFailed {
                    error: e.to_string(),
                });
                if !self.degraded {
                    self.degraded = true;
                    self.notifier.notify(&Notification::persistence_lost());
                }
            }
        }
    }
}

/// Fold rows sharing a title into the first occurrence, summing quantities.
fn merge_duplicate_titles(items: Vec<LineItem>) -> Vec<LineItem> {
    let mut merged: Vec<LineItem> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter_mut().find(|m| m.title == item.title) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => merged.push(item),
        }
    }
    merged
}
