//! Change-feed poller driving updates from the inventory service to an
//! observer.

use std::mem;
use std::time::Duration;

use tokio::time::Instant;

use crate::inventory::{
    InventoryClient, ObjectUpdate, PropertySelection, SubscriptionHandle, VersionToken,
    WaitOptions,
};

use super::change::decode_update;
use super::{EntityObserver, MonitorError};

/// Subscription lifecycle of a detector.
#[derive(Debug)]
enum DetectorState {
    /// No subscription yet; the first `monitor` call creates one.
    Uninitialized,
    /// Live subscription against the service.
    Subscribed(SubscriptionHandle),
    /// Subscription released; the detector is finished.
    Closed,
}

/// Long-poll monitor for one entity type's address properties.
///
/// Owns a subscription against the inventory service, threads the feed's
/// version token through successive poll calls, decodes raw update batches
/// into [`ChangeRecord`](super::ChangeRecord)s, and pushes them to an
/// observer in feed order.
///
/// One detector per monitored entity type; each owns its subscription,
/// version token, and observer chain exclusively. Run each on its own task.
///
/// # Failure semantics
///
/// Wait timeouts are retried indefinitely and never surfaced. Fatal service
/// errors propagate out of [`monitor`](Self::monitor); the detector does
/// not reconnect on its own. A rebuilt detector starts from the initial
/// version token and re-baselines with a full enter sweep.
///
/// # Example
///
/// ```ignore
/// use vmnet_watch::monitor::{ChangeDetector, DedupCache, LogObserver};
/// use std::time::Duration;
///
/// let observer = DedupCache::new(LogObserver::new());
/// let mut detector = ChangeDetector::new(client, observer);
/// detector.monitor(Duration::from_secs(600)).await?;
/// detector.close().await?;
/// ```
pub struct ChangeDetector<C, O> {
    client: C,
    observer: O,
    selection: PropertySelection,
    wait: WaitOptions,
    state: DetectorState,
    version: VersionToken,
}

impl<C, O> ChangeDetector<C, O>
where
    C: InventoryClient,
    O: EntityObserver,
{
    /// Creates a detector with the default property selection and wait
    /// options.
    ///
    /// The subscription is created lazily on the first
    /// [`monitor`](Self::monitor) call.
    #[must_use]
    pub fn new(client: C, observer: O) -> Self {
        Self {
            client,
            observer,
            selection: PropertySelection::default(),
            wait: WaitOptions::default(),
            state: DetectorState::Uninitialized,
            version: VersionToken::initial(),
        }
    }

    /// Scopes the subscription to a custom entity type and property paths.
    #[must_use]
    pub fn with_selection(mut self, selection: PropertySelection) -> Self {
        self.selection = selection;
        self
    }

    /// Configures the long-poll wait limits.
    #[must_use]
    pub const fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Returns the version token the next poll call will use.
    #[must_use]
    pub const fn version(&self) -> &VersionToken {
        &self.version
    }

    /// Returns a reference to the observer chain.
    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// Consumes the detector and returns the observer chain.
    ///
    /// The subscription, if still live, is abandoned; call
    /// [`close`](Self::close) first for a clean release.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Runs the monitoring loop for `duration` of wall-clock time.
    ///
    /// A zero duration means run until the subscription dies or the task is
    /// cancelled. The loop blocks only on the poll call (bounded by the
    /// wait options); cancellation takes effect at loop-iteration
    /// boundaries.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Closed`] if [`close`](Self::close) was
    /// already called, or [`MonitorError::Inventory`] when the service
    /// fails fatally. The caller owns recovery in both cases.
    pub async fn monitor(&mut self, duration: Duration) -> Result<(), MonitorError> {
        self.initialize().await?;
        let deadline = (!duration.is_zero()).then(|| Instant::now() + duration);

        loop {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Ok(());
            }
            let DetectorState::Subscribed(handle) = &self.state else {
                return Err(MonitorError::Closed);
            };

            let result = self
                .client
                .wait_for_updates(handle, &self.version, &self.wait)
                .await?;
            let Some(set) = result else {
                // Wait timeout with no changes: re-poll with the same token.
                continue;
            };

            // Advance the token before dispatching so a resume after a
            // crash mid-batch re-delivers rather than skips.
            self.version = set.version.clone();
            tracing::debug!(
                "Processing {} update group(s) at version '{}'",
                set.updates.len(),
                self.version,
            );

            for update in &set.updates {
                self.dispatch(update);
            }
        }
    }

    /// Releases the subscription and marks the detector finished.
    ///
    /// Idempotent: closing an unsubscribed or already-closed detector is a
    /// no-op. Subsequent [`monitor`](Self::monitor) calls fail with
    /// [`MonitorError::Closed`].
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Inventory`] when the service rejects the
    /// release; the detector still transitions to closed.
    pub async fn close(&mut self) -> Result<(), MonitorError> {
        let state = mem::replace(&mut self.state, DetectorState::Closed);
        if let DetectorState::Subscribed(handle) = state {
            tracing::info!("Releasing subscription {handle}");
            self.client.unsubscribe(handle).await?;
        }
        Ok(())
    }

    /// Creates the subscription if the detector has none yet.
    ///
    /// Idempotent; [`monitor`](Self::monitor) calls this lazily, so
    /// calling it explicitly is only useful to surface subscription
    /// failures early.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Closed`] after [`close`](Self::close), or
    /// [`MonitorError::Inventory`] when the service rejects the
    /// subscription.
    pub async fn initialize(&mut self) -> Result<(), MonitorError> {
        match self.state {
            DetectorState::Subscribed(_) => Ok(()),
            DetectorState::Closed => Err(MonitorError::Closed),
            DetectorState::Uninitialized => {
                let handle = self.client.subscribe(&self.selection).await?;
                tracing::info!(
                    "Monitoring {} for changes on {:?} via {handle}",
                    self.selection.entity_type,
                    self.selection.paths(),
                );
                self.state = DetectorState::Subscribed(handle);
                self.version = VersionToken::initial();
                Ok(())
            }
        }
    }

    /// Forwards one decoded update group to the observer.
    fn dispatch(&mut self, update: &ObjectUpdate) {
        if update.kind.is_leave() {
            tracing::debug!("{} left the subscription", update.entity);
            self.observer.remove(&update.entity);
            return;
        }

        let record = decode_update(update, &self.selection);
        self.observer.update(
            &record.entity,
            record.name.as_deref(),
            record.devices.as_ref(),
            record.guest_addresses.as_ref(),
        );
    }
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod tests;
