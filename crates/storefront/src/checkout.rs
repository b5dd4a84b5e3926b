//! Checkout: totals, shipping, and simulated order placement.
//!
//! There is no payment gateway. Validation and the money math are real;
//! "processing" produces an order confirmation and nothing else.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cubed_core::cart::{CartItem, CartState};
use cubed_core::types::OrderId;

/// Flat shipping base, in reais.
fn base_shipping() -> Decimal {
    Decimal::new(1590, 2)
}

/// Surcharge applied once the cart crosses the weight threshold.
fn heavy_surcharge() -> Decimal {
    Decimal::new(500, 2)
}

/// Cart weight above which the surcharge applies, in grams.
const HEAVY_CART_THRESHOLD_GRAMS: u32 = 500;

/// Assumed weight for a line without specifications, in grams.
const DEFAULT_LINE_WEIGHT_GRAMS: u32 = 50;

/// PIX discount rate (5% off subtotal + shipping).
fn pix_discount_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Instant transfer; gets a 5% discount.
    Pix,
    /// Credit card, 1-12 installments.
    Credit,
    Debit,
    /// Bank slip, paid upfront.
    Boleto,
}

/// Total cart weight for shipping purposes.
///
/// Weight is charged per line, not per unit.
#[must_use]
pub fn cart_weight_grams(state: &CartState) -> u32 {
    state
        .items()
        .iter()
        .map(|item| {
            item.specifications
                .as_ref()
                .and_then(|specs| specs.weight_grams)
                .unwrap_or(DEFAULT_LINE_WEIGHT_GRAMS)
        })
        .sum()
}

/// Shipping cost for the cart: flat base plus a surcharge for heavy carts.
#[must_use]
pub fn shipping_cost(state: &CartState) -> Decimal {
    if cart_weight_grams(state) > HEAVY_CART_THRESHOLD_GRAMS {
        base_shipping() + heavy_surcharge()
    } else {
        base_shipping()
    }
}

/// Priced summary of the current cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    /// PIX discount; zero for every other payment method.
    pub discount: Decimal,
    pub total: Decimal,
}

/// Price a cart for a payment method.
#[must_use]
pub fn quote(state: &CartState, payment_method: Option<PaymentMethod>) -> CheckoutQuote {
    let subtotal = state.total();
    let shipping = shipping_cost(state);
    let discount = if payment_method == Some(PaymentMethod::Pix) {
        ((subtotal + shipping) * pix_discount_rate()).round_dp(2)
    } else {
        Decimal::ZERO
    };

    CheckoutQuote {
        subtotal,
        shipping,
        discount,
        total: subtotal + shipping - discount,
    }
}

/// Checkout form payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cep: String,
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub card_name: Option<String>,
    #[serde(default)]
    pub card_expiry: Option<String>,
    #[serde(default)]
    pub card_cvv: Option<String>,
    #[serde(default = "default_installments")]
    pub installments: u8,
}

const fn default_installments() -> u8 {
    1
}

/// Why a checkout was rejected.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("{0} are required")]
    MissingFields(String),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("card details are required for card payments")]
    MissingCardDetails,

    #[error("installments must be between 1 and 12")]
    InvalidInstallments,
}

/// Validate a checkout form against the cart.
///
/// # Errors
///
/// Returns the first applicable `CheckoutError`; nothing is processed on
/// failure.
pub fn validate(state: &CartState, form: &CheckoutForm) -> Result<(), CheckoutError> {
    if state.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let required = [
        ("name", &form.name),
        ("email", &form.email),
        ("phone", &form.phone),
        ("cep", &form.cep),
        ("street", &form.street),
        ("number", &form.number),
        ("neighborhood", &form.neighborhood),
        ("city", &form.city),
        ("state", &form.state),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return Err(CheckoutError::MissingFields(missing.join(", ")));
    }

    if cubed_core::Email::parse(&form.email).is_err() {
        return Err(CheckoutError::InvalidEmail);
    }

    if matches!(form.payment_method, PaymentMethod::Credit | PaymentMethod::Debit) {
        let card_complete = [&form.card_number, &form.card_name, &form.card_expiry, &form.card_cvv]
            .iter()
            .all(|field| field.as_deref().is_some_and(|value| !value.trim().is_empty()));
        if !card_complete {
            return Err(CheckoutError::MissingCardDetails);
        }
    }

    let max_installments = if form.payment_method == PaymentMethod::Credit { 12 } else { 1 };
    if form.installments < 1 || form.installments > max_installments {
        return Err(CheckoutError::InvalidInstallments);
    }

    Ok(())
}

/// A placed order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub installments: u8,
    pub placed_at: DateTime<Utc>,
}

/// Validate and "process" an order.
///
/// # Errors
///
/// Returns a `CheckoutError` when validation fails; the cart is left
/// untouched in that case.
pub fn place_order(
    state: &CartState,
    form: &CheckoutForm,
) -> Result<OrderConfirmation, CheckoutError> {
    validate(state, form)?;

    let priced = quote(state, Some(form.payment_method));
    Ok(OrderConfirmation {
        order_id: generate_order_id(),
        items: state.items().to_vec(),
        subtotal: priced.subtotal,
        shipping: priced.shipping,
        discount: priced.discount,
        total: priced.total,
        payment_method: form.payment_method,
        installments: form.installments,
        placed_at: Utc::now(),
    })
}

/// Generate an order number like `CB-4K7KQ2ZN`.
fn generate_order_id() -> OrderId {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(8)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();
    OrderId::new(format!("CB-{suffix}"))
}
