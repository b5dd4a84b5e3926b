//! User storage behind an injected repository seam.
//!
//! There is no database: persistence is the client's cookies plus the
//! in-memory stores here. The trait exists so the auth service is
//! testable against stubs and so a real backend can be swapped in later
//! without touching store logic.

pub mod users;

use thiserror::Error;

pub use users::{InMemoryUserRepository, UserStore};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Stored data is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}
