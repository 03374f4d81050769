//! Scripted inventory source replaying a recorded change feed.
//!
//! A [`ScriptedInventory`] implements [`InventoryClient`] from a JSON script
//! of feed steps, driving the monitor through the exact code path a live
//! service would. Used by the binary for replay runs and by tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    InventoryClient, InventoryError, PropertySelection, SubscriptionHandle, UpdateSet,
    VersionToken, WaitOptions,
};

/// Error type for loading a feed script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Failed to read the script file.
    #[error("Failed to read feed script '{}': {source}", path.display())]
    Read {
        /// Path to the script file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The script file is not valid JSON for a list of feed steps.
    #[error("Failed to parse feed script '{}': {source}", path.display())]
    Parse {
        /// Path to the script file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// One scripted feed step.
///
/// A script is a JSON array of steps, e.g.:
///
/// ```json
/// [
///   {"updates": {"version": "v1", "updates": [
///     {"entity": "vm-1", "kind": "enter", "changes": [
///       {"path": "name", "op": "assign", "value": {"name": "web01"}}
///     ]}
///   ]}},
///   {"timeout": {"delay_ms": 500}}
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedStep {
    /// A wait timeout: the poll call blocks for `delay_ms` and reports no
    /// changes, exercising the monitor's re-poll path.
    Timeout {
        /// Simulated server-side wait before the timeout, in milliseconds.
        #[serde(default)]
        delay_ms: u64,
    },
    /// A batch of changes delivered to the poll call.
    Updates(UpdateSet),
}

/// Replays a scripted change feed through the [`InventoryClient`] contract.
///
/// Subscription handles are validated the way a real service validates
/// them: polling with a released or foreign handle fails with
/// [`InventoryError::UnknownSubscription`]. Once the script is exhausted,
/// every poll blocks for the caller's wait limit and reports a timeout.
pub struct ScriptedInventory {
    steps: Mutex<VecDeque<FeedStep>>,
    active: Mutex<Option<SubscriptionHandle>>,
    next_handle: AtomicU64,
}

impl ScriptedInventory {
    /// Creates a source replaying the given steps in order.
    #[must_use]
    pub fn new(steps: Vec<FeedStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            active: Mutex::new(None),
            next_handle: AtomicU64::new(1),
        }
    }

    /// Loads a script from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] when the file cannot be read or does not
    /// parse as a list of [`FeedStep`]s.
    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let steps: Vec<FeedStep> =
            serde_json::from_str(&contents).map_err(|source| ScriptError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(steps))
    }

    /// Returns the number of steps not yet delivered.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.steps.lock().expect("script lock poisoned").len()
    }

    fn check_handle(&self, handle: &SubscriptionHandle) -> Result<(), InventoryError> {
        let active = self.active.lock().expect("handle lock poisoned");
        if active.as_ref() == Some(handle) {
            Ok(())
        } else {
            Err(InventoryError::UnknownSubscription {
                handle: handle.clone(),
            })
        }
    }
}

impl InventoryClient for ScriptedInventory {
    async fn subscribe(
        &self,
        selection: &PropertySelection,
    ) -> Result<SubscriptionHandle, InventoryError> {
        let id = self.next_handle.fetch_add(1, Ordering::SeqCst);
        let handle = SubscriptionHandle::new(format!("session-{id}"));
        tracing::debug!(
            "Subscribed to {} on {:?} as {handle}",
            selection.entity_type,
            selection.paths(),
        );
        *self.active.lock().expect("handle lock poisoned") = Some(handle.clone());
        Ok(handle)
    }

    async fn wait_for_updates(
        &self,
        handle: &SubscriptionHandle,
        _version: &VersionToken,
        options: &WaitOptions,
    ) -> Result<Option<UpdateSet>, InventoryError> {
        self.check_handle(handle)?;

        // Guard must drop before the await below.
        let step = self.steps.lock().expect("script lock poisoned").pop_front();

        match step {
            Some(FeedStep::Timeout { delay_ms }) => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(None)
            }
            Some(FeedStep::Updates(set)) => Ok(Some(set)),
            None => {
                // Script exhausted: behave like a quiet feed. Block for the
                // full wait (at least one second, so a zero wait limit
                // cannot spin the caller's loop).
                let wait = Duration::from_secs(u64::from(options.max_wait_seconds.max(1)));
                tokio::time::sleep(wait).await;
                Ok(None)
            }
        }
    }

    async fn unsubscribe(&self, handle: SubscriptionHandle) -> Result<(), InventoryError> {
        let mut active = self.active.lock().expect("handle lock poisoned");
        if active.as_ref() == Some(&handle) {
            *active = None;
            Ok(())
        } else {
            Err(InventoryError::UnknownSubscription { handle })
        }
    }
}
