//! Delegated row actions.
//!
//! Cart rows are rebuilt on every render, so row buttons are not bound one by
//! one. Each button carries a trigger class and a `data-title`; one dispatcher
//! on the container turns that pair into a [`CartAction`] and hands it to
//! [`CartStore::dispatch`](crate::CartStore::dispatch).

/// Trigger class of the "remove row" button.
pub const REMOVE_TRIGGER: &str = "remove-btn";
/// Trigger class of the "+1" button.
pub const INCREMENT_TRIGGER: &str = "qty-plus";
/// Trigger class of the "-1" button.
pub const DECREMENT_TRIGGER: &str = "qty-minus";

/// An action on one cart row, identified by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Remove(String),
    Increment(String),
    Decrement(String),
}

impl CartAction {
    /// Map a trigger class and the row's `data-title` to an action.
    ///
    /// Unknown classes yield `None`; the click is ignored.
    pub fn from_trigger(class: &str, title: &str) -> Option<Self> {
        let title = title.to_string();
        match class {
            REMOVE_TRIGGER => Some(Self::Remove(title)),
            INCREMENT_TRIGGER => Some(Self::Increment(title)),
            DECREMENT_TRIGGER => Some(Self::Decrement(title)),
            _ => None,
        }
    }

    pub fn trigger_class(&self) -> &'static str {
        match self {
            Self::Remove(_) => REMOVE_TRIGGER,
            Self::Increment(_) => INCREMENT_TRIGGER,
            Self::Decrement(_) => DECREMENT_TRIGGER,
        }
    }

    /// Title of the row this action targets.
    pub fn title(&self) -> &str {
        match self {
            Self::Remove(t) | Self::Increment(t) | Self::Decrement(t) => t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_trigger() {
        assert_eq!(
            CartAction::from_trigger("remove-btn", "Mug"),
            Some(CartAction::Remove("Mug".to_string()))
        );
        assert_eq!(
            CartAction::from_trigger("qty-plus", "Mug"),
            Some(CartAction::Increment("Mug".to_string()))
        );
        assert_eq!(
            CartAction::from_trigger("qty-minus", "Mug"),
            Some(CartAction::Decrement("Mug".to_string()))
        );
        assert_eq!(CartAction::from_trigger("cart-img", "Mug"), None);
    }

    #[test]
    fn test_trigger_class_matches_parse() {
        for class in [REMOVE_TRIGGER, INCREMENT_TRIGGER, DECREMENT_TRIGGER] {
            let action = CartAction::from_trigger(class, "Cup").unwrap();
            assert_eq!(action.trigger_class(), class);
            assert_eq!(action.title(), "Cup");
        }
    }
}
