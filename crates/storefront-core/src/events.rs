//! Cart mutation events and user notifications.
//!
//! Two outbound channels leave the store after a mutation:
//! - a [`Notifier`] sink for toast-style messages (fire-and-forget)
//! - a broadcast of [`CartEvent`]s for any collaborator that subscribed

use tokio::sync::broadcast;

/// Buffer size for the event broadcast channel.
pub(crate) const EVENT_CHANNEL_SIZE: usize = 64;

/// A mutation that the cart has applied.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// An item was appended or its quantity increased
    ItemAdded {
        title: String,
        /// Quantity contributed by this add
        added: u32,
        /// Quantity of the row after the add
        quantity: u32,
    },
    /// A row was removed
    ItemRemoved { title: String },
    /// A row's quantity was set (possibly to the same value)
    QuantityChanged { title: String, quantity: u32 },
    /// The cart was (re)loaded from storage
    Reloaded { items: usize },
    /// Writing the cart to storage failed; memory stays authoritative
    PersistFailed { error: String },
}

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
}

/// Toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub text: String,
}

impl Notification {
    /// Confirmation shown after an item lands in the cart.
    pub fn item_added(title: &str, quantity: u32) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: "¡Producto agregado!".to_string(),
            text: format!("{} × {} agregado(s) al carrito", quantity, title),
        }
    }

    /// Warning shown once when the cart stops being saved.
    pub fn persistence_lost() -> Self {
        Self {
            level: NotificationLevel::Warning,
            title: "Carrito no guardado".to_string(),
            text: "No se pudo guardar el carrito; los cambios se conservan solo en esta sesión."
                .to_string(),
        }
    }
}

/// Receiver of user notifications.
///
/// Any `FnMut(&Notification)` closure is a notifier.
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);
}

impl<F: FnMut(&Notification)> Notifier for F {
    fn notify(&mut self, notification: &Notification) {
        self(notification)
    }
}

/// Notifier that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&mut self, _notification: &Notification) {}
}

/// Broadcast side of the event channel, owned by the store.
pub(crate) struct EventBus {
    tx: broadcast::Sender<CartEvent>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Having no subscribers is not an error.
    pub(crate) fn publish(&self, event: CartEvent) {
        let _ = self.tx.send(event);
    }
}
