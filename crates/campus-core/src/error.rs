//! Core error type.
//!
//! Sub-crates define their own error enums; this one covers configuration
//! loading and tick-to-calendar conversion.

use thiserror::Error;

use crate::Tick;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0} is beyond the representable calendar")]
    TickOutOfRange(Tick),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `campus-core`.
pub type CoreResult<T> = Result<T, CoreError>;
