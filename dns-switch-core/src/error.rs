//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use dns_switch_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Invalid or missing configuration (credentials, settings, catalog shape)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The same record id appears more than once in the catalog
    #[error("Duplicate record id in catalog: {0}")]
    DuplicateRecord(String),

    /// A catalog entry is unusable (empty name or id)
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Toggle action other than `start` / `stop`
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (bad input, rejected by the provider),
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidAction(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Configuration(_) | Self::DuplicateRecord(_) | Self::InvalidRecord(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
