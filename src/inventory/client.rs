//! Inventory service client trait and error types.

use thiserror::Error;

use super::{PropertySelection, SubscriptionHandle, UpdateSet, VersionToken, WaitOptions};

/// Error type for inventory service operations.
///
/// Every variant is fatal for the subscription that hit it: the detector
/// propagates these to its caller and performs no retry or reconnection of
/// its own. Wait timeouts are not errors; they surface as an empty poll
/// result instead.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The session backing the connection is no longer valid.
    #[error("Session error: {message}")]
    Session {
        /// Description of the session failure (auth expiry, logout, ...).
        message: String,
    },

    /// The service does not recognize the subscription handle.
    ///
    /// Raised when polling after the subscription was released, possibly
    /// from another task.
    #[error("Unknown subscription: {handle}")]
    UnknownSubscription {
        /// The rejected handle.
        handle: SubscriptionHandle,
    },

    /// Transport-level failure talking to the service.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
}

/// Trait for the subscribe/poll/unsubscribe contract of the remote
/// inventory service.
///
/// # Design
///
/// The service itself is an external collaborator; this trait models only
/// the interface the monitor consumes, enabling:
/// - Dependency injection for testing with mock services
/// - Replaying recorded feeds through the same code path as a live service
///
/// # Example
///
/// ```ignore
/// use vmnet_watch::inventory::{InventoryClient, InventoryError, UpdateSet};
///
/// struct NullService;
///
/// impl InventoryClient for NullService {
///     async fn wait_for_updates(
///         &self,
///         _handle: &SubscriptionHandle,
///         _version: &VersionToken,
///         _options: &WaitOptions,
///     ) -> Result<Option<UpdateSet>, InventoryError> {
///         Ok(None) // permanent wait timeout
///     }
///     // ...
/// }
/// ```
pub trait InventoryClient: Send {
    /// Creates a subscription scoped to the selection's entity type and
    /// property paths.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] when the service rejects the subscription
    /// or the session is invalid.
    fn subscribe(
        &self,
        selection: &PropertySelection,
    ) -> impl Future<Output = Result<SubscriptionHandle, InventoryError>> + Send;

    /// Issues one incremental long-poll call.
    ///
    /// Blocks server-side up to `options.max_wait_seconds`. Returns
    /// `Ok(None)` on a wait timeout with no changes; the caller re-polls
    /// with the same version token.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] on session or transport failure, or when
    /// `handle` no longer names a live subscription.
    fn wait_for_updates(
        &self,
        handle: &SubscriptionHandle,
        version: &VersionToken,
        options: &WaitOptions,
    ) -> impl Future<Output = Result<Option<UpdateSet>, InventoryError>> + Send;

    /// Releases the subscription and its server-side resources.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] when the service rejects the release;
    /// callers treat this as non-fatal during teardown.
    fn unsubscribe(
        &self,
        handle: SubscriptionHandle,
    ) -> impl Future<Output = Result<(), InventoryError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_error_displays_message() {
        let error = InventoryError::Session {
            message: "login expired".to_string(),
        };
        assert!(error.to_string().contains("login expired"));
    }

    #[test]
    fn unknown_subscription_displays_handle() {
        let error = InventoryError::UnknownSubscription {
            handle: SubscriptionHandle::new("session-3"),
        };
        assert!(error.to_string().contains("session-3"));
    }

    #[test]
    fn transport_error_displays_message() {
        let error = InventoryError::Transport {
            message: "connection reset".to_string(),
        };
        assert!(error.to_string().contains("connection reset"));
    }
}
