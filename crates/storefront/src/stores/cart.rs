//! The cart store: operations, persistence, notifications.
//!
//! Owns the authoritative record of what a shopper intends to buy. Every
//! operation dispatches exactly one action through the core reducer and
//! then persists the full item list, so `total`/`item_count` are always
//! consistent with `items` and the cookie never lags the state.

use cubed_core::cart::{CartAction, CartItem, CartState, NewCartItem, reduce};
use cubed_core::types::ItemId;

use super::{CART_COOKIE, Notifier, StoragePort};

/// Serialize an item list to the persisted cookie format.
///
/// # Errors
///
/// Returns a `serde_json` error if serialization fails (it cannot for
/// these types; the `Result` keeps the contract honest).
pub fn encode_items(items: &[CartItem]) -> serde_json::Result<String> {
    serde_json::to_string(items)
}

/// Parse an item list from the persisted cookie format.
///
/// # Errors
///
/// Returns a `serde_json` error for malformed input; callers treat that
/// as "no cart".
pub fn decode_items(raw: &str) -> serde_json::Result<Vec<CartItem>> {
    serde_json::from_str(raw)
}

/// The cart store.
pub struct CartStore<S, N> {
    state: CartState,
    storage: S,
    notifier: N,
}

impl<S: StoragePort, N: Notifier> CartStore<S, N> {
    /// Restore the cart from persisted storage.
    ///
    /// A missing or unparsable payload means "no cart": the store starts
    /// empty and the corruption is logged for diagnostics only. Restoring
    /// never writes back; only mutations persist.
    pub fn restore(storage: S, notifier: N) -> Self {
        let state = match storage.load(CART_COOKIE) {
            Some(raw) => match decode_items(&raw) {
                Ok(items) => CartState::from_items(items),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unparsable cart payload");
                    CartState::default()
                }
            },
            None => CartState::default(),
        };

        Self {
            state,
            storage,
            notifier,
        }
    }

    /// The current cart state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Notifications emitted so far.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Add a single unit of an item.
    ///
    /// An item already in the cart gains one unit; a new item enters with
    /// quantity 1.
    pub fn add_to_cart(&mut self, item: NewCartItem) {
        let name = item.name.clone();
        self.apply(CartAction::Add {
            item: item.with_quantity(1),
        });
        self.notifier.success(format!("{name} added to cart!"));
    }

    /// Remove a line entirely.
    ///
    /// Removing an absent id is a no-op; the notification only fires when
    /// something was actually removed.
    pub fn remove_from_cart(&mut self, id: &ItemId) {
        let removed = self.state.find(id).map(|item| item.name.clone());
        self.apply(CartAction::Remove { id: id.clone() });
        if let Some(name) = removed {
            self.notifier.success(format!("{name} removed from cart!"));
        }
    }

    /// Set a line's quantity to an absolute value.
    ///
    /// Zero or negative means remove - that policy lives in the reducer,
    /// not here.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64) {
        self.apply(CartAction::SetQuantity {
            id: id.clone(),
            quantity,
        });
    }

    /// Reset to the empty cart.
    pub fn clear_cart(&mut self) {
        self.apply(CartAction::Clear);
        self.notifier.success("Cart cleared!");
    }

    /// Replace the whole item list.
    pub fn load_items(&mut self, items: Vec<CartItem>) {
        self.apply(CartAction::Load { items });
    }

    /// Dispatch one action and persist the result.
    fn apply(&mut self, action: CartAction) {
        self.state = reduce(&self.state, action);
        self.persist();
    }

    fn persist(&mut self) {
        match encode_items(self.state.items()) {
            Ok(json) => self.storage.save(CART_COOKIE, &json),
            Err(err) => tracing::error!(error = %err, "failed to serialize cart"),
        }
    }

    /// Tear down into state, storage, and notifier - the response builder
    /// needs all three.
    pub fn into_parts(self) -> (CartState, S, N) {
        (self.state, self.storage, self.notifier)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::{BufferedNotifier, MemoryStorage, NotificationKind};
    use super::*;
    use cubed_core::types::ServiceCategory;
    use rust_decimal::Decimal;

    fn new_item(id: &str, price: i64) -> NewCartItem {
        NewCartItem {
            id: ItemId::new(id),
            name: format!("Widget {id}"),
            price: Decimal::new(price, 0),
            image: None,
            category: ServiceCategory::ReadyPrint,
            description: None,
            specifications: None,
        }
    }

    fn empty_store() -> CartStore<MemoryStorage, BufferedNotifier> {
        CartStore::restore(MemoryStorage::new(), BufferedNotifier::new())
    }

    fn persisted_items(store: &CartStore<MemoryStorage, BufferedNotifier>) -> Vec<CartItem> {
        let raw = store.storage.load(CART_COOKIE).expect("cart persisted");
        decode_items(&raw).expect("persisted cart parses")
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut store = empty_store();

        store.add_to_cart(new_item("1", 10));
        assert_eq!(persisted_items(&store).len(), 1);

        store.update_quantity(&ItemId::new("1"), 4);
        let quantity = persisted_items(&store).first().unwrap().quantity;
        assert_eq!(quantity, 4);

        store.remove_from_cart(&ItemId::new("1"));
        assert!(persisted_items(&store).is_empty());

        store.add_to_cart(new_item("2", 5));
        store.clear_cart();
        assert!(persisted_items(&store).is_empty());
    }

    #[test]
    fn test_restore_round_trip_preserves_order_and_totals() {
        let mut store = empty_store();
        store.add_to_cart(new_item("3", 7));
        store.add_to_cart(new_item("1", 10));
        store.add_to_cart(new_item("1", 10));

        let expected_total = store.state().total();
        let expected_count = store.state().item_count();
        let (state, storage, _) = store.into_parts();

        let restored = CartStore::restore(storage, BufferedNotifier::new());
        assert_eq!(restored.state().items(), state.items());
        assert_eq!(restored.state().total(), expected_total);
        assert_eq!(restored.state().item_count(), expected_count);
    }

    #[test]
    fn test_restore_malformed_payload_falls_back_to_empty() {
        let storage = MemoryStorage::new().with(CART_COOKIE, "{not valid json");
        let store = CartStore::restore(storage, BufferedNotifier::new());
        assert!(store.state().is_empty());
        // Silent: corruption is a diagnostics concern, not a user-facing one.
        assert!(store.notifier().notifications().is_empty());
    }

    #[test]
    fn test_restore_missing_cookie_is_empty() {
        let store = empty_store();
        assert!(store.state().is_empty());
        assert!(store.storage.load(CART_COOKIE).is_none(), "restore must not write");
    }

    #[test]
    fn test_add_notifies_with_item_name() {
        let mut store = empty_store();
        store.add_to_cart(new_item("1", 10));

        let notifications = store.notifier().notifications();
        assert_eq!(notifications.len(), 1);
        let first = notifications.first().unwrap();
        assert_eq!(first.kind, NotificationKind::Success);
        assert!(first.message.contains("Widget 1"));
    }

    #[test]
    fn test_remove_absent_id_is_silent_no_op() {
        let mut store = empty_store();
        store.remove_from_cart(&ItemId::new("ghost"));

        assert!(store.state().is_empty());
        assert!(store.notifier().notifications().is_empty());
    }

    #[test]
    fn test_update_quantity_zero_removes_without_notification() {
        let mut store = empty_store();
        store.add_to_cart(new_item("1", 10));
        let before = store.notifier().notifications().len();

        store.update_quantity(&ItemId::new("1"), 0);
        assert!(store.state().is_empty());
        assert_eq!(store.notifier().notifications().len(), before);
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let mut store = empty_store();
        store.add_to_cart(new_item("1", 10));
        store.update_quantity(&ItemId::new("1"), -5);
        assert!(store.state().is_empty());
        assert_eq!(store.state().total(), Decimal::ZERO);
    }

    #[test]
    fn test_clear_notifies_once() {
        let mut store = empty_store();
        store.add_to_cart(new_item("1", 10));
        store.clear_cart();

        let messages: Vec<_> = store
            .notifier()
            .notifications()
            .iter()
            .filter(|n| n.message == "Cart cleared!")
            .collect();
        assert_eq!(messages.len(), 1);
    }
}
