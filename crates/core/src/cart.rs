//! Cart items, cart state, and the cart reducer.
//!
//! All cart mutations flow through [`reduce`], the single transition
//! function. `CartState` keeps its fields private so the derived `total`
//! and `item_count` can only ever be produced by [`CartState::from_items`],
//! which recomputes both from the item list in one place.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ItemId, ServiceCategory};

/// Optional print specifications attached to a cart line.
///
/// Informational only - nothing validates these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specifications {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Weight in grams; feeds the checkout shipping estimate.
    #[serde(rename = "weight", skip_serializing_if = "Option::is_none")]
    pub weight_grams: Option<u32>,
}

/// A line in the cart: one purchasable unit and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ItemId,
    pub name: String,
    /// Unit price at the time the item was added.
    pub price: Decimal,
    /// Always positive; a line that would drop to zero is removed instead.
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: ServiceCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Specifications>,
}

impl CartItem {
    /// Price of the whole line (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An item about to enter the cart - everything but a quantity.
///
/// The public add operation always adds a single unit per call, so
/// callers never pick a quantity here.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCartItem {
    pub id: ItemId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    pub category: ServiceCategory,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specifications: Option<Specifications>,
}

impl NewCartItem {
    /// Attach a quantity, producing a full cart line.
    #[must_use]
    pub fn with_quantity(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            name: self.name,
            price: self.price,
            quantity,
            image: self.image,
            category: self.category,
            description: self.description,
            specifications: self.specifications,
        }
    }
}

/// The cart: an ordered list of lines plus derived totals.
///
/// `total` and `item_count` are pure functions of `items`. They are
/// recomputed together on every transition and cannot be mutated
/// independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    items: Vec<CartItem>,
    total: Decimal,
    item_count: u32,
}

impl CartState {
    /// Build a state from an item list, recomputing both derived fields.
    ///
    /// This is the only constructor that produces a non-empty state.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let total = items.iter().map(CartItem::line_total).sum();
        let item_count = items.iter().map(|item| item.quantity).sum();
        Self {
            items,
            total,
            item_count,
        }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of `price x quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub const fn item_count(&self) -> u32 {
        self.item_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a line by id.
    #[must_use]
    pub fn find(&self, id: &ItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

/// A cart state transition.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add a line; an existing line with the same id has its quantity
    /// incremented by the payload's quantity instead.
    Add { item: CartItem },
    /// Remove a line. Removing an absent id is a no-op.
    Remove { id: ItemId },
    /// Set a line's quantity to an absolute value. Zero or negative
    /// means remove.
    SetQuantity { id: ItemId, quantity: i64 },
    /// Reset to the empty cart.
    Clear,
    /// Replace the whole item list (startup restore).
    Load { items: Vec<CartItem> },
}

/// Apply one action, returning the next state.
///
/// Every arm goes through [`CartState::from_items`], so the derived
/// fields can never drift from the item list.
#[must_use]
pub fn reduce(state: &CartState, action: CartAction) -> CartState {
    match action {
        CartAction::Add { item } => {
            let mut items = state.items.clone();
            if let Some(existing) = items.iter_mut().find(|line| line.id == item.id) {
                existing.quantity += item.quantity;
            } else {
                items.push(item);
            }
            CartState::from_items(items)
        }

        CartAction::Remove { id } => {
            let items = state
                .items
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect();
            CartState::from_items(items)
        }

        CartAction::SetQuantity { id, quantity } => {
            if quantity <= 0 {
                return reduce(state, CartAction::Remove { id });
            }
            // quantity is in 1..=i64::MAX here; anything beyond u32 is clamped
            let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            let items = state
                .items
                .iter()
                .map(|item| {
                    if item.id == id {
                        let mut updated = item.clone();
                        updated.quantity = quantity;
                        updated
                    } else {
                        item.clone()
                    }
                })
                .collect();
            CartState::from_items(items)
        }

        CartAction::Clear => CartState::default(),

        CartAction::Load { items } => CartState::from_items(items),
    }
}
