//! Configuration layer for vmnet-watch.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`])
//! - Validated runtime configuration ([`ValidatedConfig`])
//! - Validation errors ([`ConfigError`], [`field`])
//!
//! The configuration surface is deliberately small and CLI-only: feed
//! source, monitoring duration, whether the deduplication cache sits in
//! front of the terminal observer, and the long-poll wait limits.

mod cli;
mod error;
mod validated;

pub use cli::Cli;
pub use error::{ConfigError, field};
pub use validated::ValidatedConfig;
