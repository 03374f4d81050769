//! Error types for configuration validation.

use thiserror::Error;

/// Names of user-facing configuration fields, shared between validation
/// errors and the code that reports them.
pub mod field {
    /// The feed script path.
    pub const FEED: &str = "feed";
    /// The long-poll wait limit.
    pub const MAX_WAIT: &str = "max-wait";
    /// The per-poll update group limit.
    pub const MAX_UPDATES: &str = "max-updates";
}

/// Error type for configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required field.
    #[error("Missing required option --{field}. {hint}")]
    MissingRequired {
        /// Name of the missing field.
        field: &'static str,
        /// Hint for how to provide the value.
        hint: &'static str,
    },

    /// A field was provided but its value is unusable.
    #[error("Invalid value for --{field}: {reason}")]
    InvalidValue {
        /// Name of the field.
        field: &'static str,
        /// Reason the value was rejected.
        reason: String,
    },
}
