//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are decimals in the currency's standard unit (reais, not
/// centavos). Money never goes through floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    ///
    /// Negative amounts are a caller bug: prices in the catalog and cart
    /// are non-negative by construction.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        debug_assert!(!amount.is_sign_negative(), "price amounts are non-negative");
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a BRL price, the store's default currency.
    #[must_use]
    pub fn brl(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::BRL)
    }

    /// Format for display, e.g. `R$ 25,90`.
    ///
    /// BRL uses a comma as the decimal separator; other currencies keep
    /// the dot.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.amount.round_dp(2);
        let digits = format!("{rounded:.2}");
        match self.currency_code {
            CurrencyCode::BRL => format!("R$ {}", digits.replace('.', ",")),
            CurrencyCode::USD => format!("$ {digits}"),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
}
