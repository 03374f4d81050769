//! Observer contract for decoded entity changes.

use crate::extract::{DeviceAddressMap, GuestAddressMap};
use crate::inventory::EntityId;

/// Terminal or intermediate consumer of entity change notifications.
///
/// Implementations are chainable by nesting: the deduplication cache
/// implements this trait and forwards to another observer it wraps, so a
/// chain like cache → printer is plain composition.
///
/// # Delivery contract
///
/// Calls arrive from a single detector task in feed order; implementations
/// are not required to tolerate concurrent calls. When several detectors
/// fan into one observer, the caller must serialize access.
pub trait EntityObserver: Send {
    /// Delivers a create-or-update notification.
    ///
    /// Absent fields were not part of this notification and carry no
    /// information about the entity's current state.
    fn update(
        &mut self,
        entity: &EntityId,
        name: Option<&str>,
        devices: Option<&DeviceAddressMap>,
        guest_addresses: Option<&GuestAddressMap>,
    );

    /// Delivers a removal notification.
    fn remove(&mut self, entity: &EntityId);
}

/// Terminal observer that prints change notifications through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl LogObserver {
    /// Creates a printing observer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EntityObserver for LogObserver {
    fn update(
        &mut self,
        entity: &EntityId,
        name: Option<&str>,
        devices: Option<&DeviceAddressMap>,
        guest_addresses: Option<&GuestAddressMap>,
    ) {
        tracing::info!(
            "{entity} updated: name={name:?} devices={devices:?} guest={guest_addresses:?}"
        );
    }

    fn remove(&mut self, entity: &EntityId) {
        tracing::info!("{entity} removed");
    }
}
