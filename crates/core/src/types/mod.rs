//! Shared newtype wrappers and enumerations.

mod email;
mod id;
mod price;
mod status;

pub use email::{Email, EmailError};
pub use price::{CurrencyCode, Price};
pub use status::{OrderStatus, Role, ServiceCategory};

pub use id::*;
