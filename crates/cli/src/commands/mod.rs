//! CLI subcommands.

pub mod catalog;
pub mod token;

use thiserror::Error;

/// Errors surfaced to the CLI user.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("AUTH_TOKEN_SECRET is not set")]
    MissingSecret,

    #[error("invalid value: {0}")]
    InvalidInput(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
