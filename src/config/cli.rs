//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::Parser;

/// vmnet-watch: inventory network-address change monitor
///
/// Watches a virtualization inventory change feed and reports genuine
/// MAC and guest address transitions, suppressing spurious duplicates.
#[derive(Debug, Parser)]
#[command(name = "vmnet-watch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON feed script to replay (required)
    #[arg(long, short)]
    pub feed: Option<PathBuf>,

    /// Monitoring duration in seconds; 0 runs until interrupted
    #[arg(long, short)]
    pub duration: Option<u64>,

    /// Deliver raw feed events directly, without the deduplication cache
    #[arg(long)]
    pub raw: bool,

    /// Maximum seconds a poll call may block waiting for changes
    #[arg(long = "max-wait")]
    pub max_wait: Option<u32>,

    /// Maximum per-entity update groups per poll result
    #[arg(long = "max-updates")]
    pub max_updates: Option<u32>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_feed_and_duration() {
        let cli = Cli::parse_from_iter(["vmnet-watch", "--feed", "feed.json", "--duration", "60"]);

        assert_eq!(cli.feed, Some(PathBuf::from("feed.json")));
        assert_eq!(cli.duration, Some(60));
        assert!(!cli.raw);
    }

    #[test]
    fn raw_and_verbose_default_off() {
        let cli = Cli::parse_from_iter(["vmnet-watch"]);

        assert!(!cli.raw);
        assert!(!cli.verbose);
        assert!(cli.max_wait.is_none());
        assert!(cli.max_updates.is_none());
    }

    #[test]
    fn parses_wait_limits() {
        let cli = Cli::parse_from_iter(["vmnet-watch", "--max-wait", "5", "--max-updates", "50"]);

        assert_eq!(cli.max_wait, Some(5));
        assert_eq!(cli.max_updates, Some(50));
    }

    #[test]
    fn parses_raw_flag() {
        let cli = Cli::parse_from_iter(["vmnet-watch", "--raw"]);

        assert!(cli.raw);
    }
}
