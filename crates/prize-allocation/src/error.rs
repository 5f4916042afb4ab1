//! Error types for the prize-allocation crate.

use thiserror::Error;

/// Raised when a policy name does not match any supported policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown allocation policy '{value}'; expected linear-decay or lottery")]
pub struct PolicyParseError {
    /// The rejected input.
    pub value: String,
}
