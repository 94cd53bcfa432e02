//! Error types for controller construction.

use thiserror::Error;

/// Rejected construction-time configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Item size is zero, negative, NaN or infinite
    #[error("invalid item size: {0} (must be a finite number greater than zero)")]
    InvalidItemSize(f64),
}
