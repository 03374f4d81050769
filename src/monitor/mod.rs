//! Monitor layer for detecting genuine entity address changes.
//!
//! This module provides:
//! - Decoded change records ([`ChangeRecord`], [`decode_update`])
//! - The observer contract ([`EntityObserver`], [`LogObserver`])
//! - Deduplication of spurious feed events ([`DedupCache`], [`EntityRecord`])
//! - The change-feed poller ([`ChangeDetector`])
//! - Error handling ([`MonitorError`])

mod cache;
mod change;
mod detector;
mod error;
mod observer;

pub use cache::{DedupCache, EntityRecord};
pub use change::{ChangeRecord, decode_update};
pub use detector::ChangeDetector;
pub use error::MonitorError;
pub use observer::{EntityObserver, LogObserver};
