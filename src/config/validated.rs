//! Validated runtime configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::inventory::WaitOptions;

use super::cli::Cli;
use super::error::{ConfigError, field};

/// Fully validated configuration, ready to run.
///
/// Produced from [`Cli`] by [`ValidatedConfig::load`]; construction is the
/// only place validation happens, so the rest of the program never
/// re-checks option values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Feed script to replay.
    pub feed: PathBuf,
    /// Monitoring duration; zero runs until interrupted.
    pub duration: Duration,
    /// Deliver raw feed events without the deduplication cache.
    pub raw: bool,
    /// Long-poll wait limits.
    pub wait: WaitOptions,
    /// Verbose logging.
    pub verbose: bool,
}

impl ValidatedConfig {
    /// Validates CLI arguments into a runnable configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the feed script is missing, the wait
    /// limit is zero (a zero wait would spin the poll loop), or the update
    /// group limit is zero.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let feed = cli
            .feed
            .clone()
            .ok_or(ConfigError::MissingRequired {
                field: field::FEED,
                hint: "Provide a JSON feed script to replay.",
            })?;

        let defaults = WaitOptions::default();
        let max_wait = cli.max_wait.unwrap_or(defaults.max_wait_seconds);
        if max_wait == 0 {
            return Err(ConfigError::InvalidValue {
                field: field::MAX_WAIT,
                reason: "must be at least 1 second".to_string(),
            });
        }
        let max_updates = cli.max_updates.unwrap_or(defaults.max_object_updates);
        if max_updates == 0 {
            return Err(ConfigError::InvalidValue {
                field: field::MAX_UPDATES,
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            feed,
            duration: Duration::from_secs(cli.duration.unwrap_or(0)),
            raw: cli.raw,
            wait: WaitOptions::new(max_wait, max_updates),
            verbose: cli.verbose,
        })
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let duration = if self.duration.is_zero() {
            "until interrupted".to_string()
        } else {
            format!("{}s", self.duration.as_secs())
        };
        let delivery = if self.raw { "raw" } else { "deduplicated" };
        write!(
            f,
            "Replaying '{}' for {duration}, {delivery} delivery, \
             wait {}s / {} updates per poll",
            self.feed.display(),
            self.wait.max_wait_seconds,
            self.wait.max_object_updates,
        )
    }
}
