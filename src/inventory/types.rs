//! Core wire types for the inventory change feed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque stable identifier for a monitored inventory entity.
///
/// Wraps the managed-object reference string the service uses to name an
/// entity. Used as the cache and notification key; never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Creates an entity identifier from a reference string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying reference string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Opaque feed version token.
///
/// Returned by the service after each poll and threaded verbatim into the
/// next call. The initial (empty) token asks the service to report current
/// full state as a baseline enter sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(String);

impl VersionToken {
    /// Creates a token from the string the service returned.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the start-of-feed token.
    #[must_use]
    pub fn initial() -> Self {
        Self::default()
    }

    /// Returns true if this is the start-of-feed token.
    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle for an active change-feed subscription ("filter").
///
/// Exclusively owned by one detector; released via unsubscribe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionHandle(String);

impl SubscriptionHandle {
    /// Creates a handle from the service-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wait options for an incremental poll call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Maximum seconds the service may block before reporting a timeout.
    pub max_wait_seconds: u32,
    /// Maximum number of per-entity update groups returned per call.
    pub max_object_updates: u32,
}

impl WaitOptions {
    /// Creates wait options with explicit limits.
    #[must_use]
    pub const fn new(max_wait_seconds: u32, max_object_updates: u32) -> Self {
        Self {
            max_wait_seconds,
            max_object_updates,
        }
    }
}

impl Default for WaitOptions {
    /// Default limits: 10 second long-poll, 100 update groups per batch.
    fn default() -> Self {
        Self::new(10, 100)
    }
}

/// Entity type and property paths a subscription is scoped to.
///
/// Passed to the detector's constructor so that multiple independently
/// configured detectors can coexist in one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySelection {
    /// Inventory type of the monitored entities.
    pub entity_type: String,
    /// Path of the display-name property.
    pub name_path: String,
    /// Path of the virtual hardware device-list property.
    pub device_path: String,
    /// Path of the guest-reported network interface list property.
    pub guest_net_path: String,
}

impl PropertySelection {
    /// Default entity type: virtual machines.
    pub const VIRTUAL_MACHINE: &'static str = "VirtualMachine";
    /// Default display-name property path.
    pub const NAME_PATH: &'static str = "name";
    /// Default device-list property path.
    pub const DEVICE_PATH: &'static str = "config.hardware.device";
    /// Default guest network-list property path.
    pub const GUEST_NET_PATH: &'static str = "guest.net";

    /// Returns the watched property paths in subscription order.
    #[must_use]
    pub fn paths(&self) -> [&str; 3] {
        [&self.name_path, &self.device_path, &self.guest_net_path]
    }
}

impl Default for PropertySelection {
    fn default() -> Self {
        Self {
            entity_type: Self::VIRTUAL_MACHINE.to_string(),
            name_path: Self::NAME_PATH.to_string(),
            device_path: Self::DEVICE_PATH.to_string(),
            guest_net_path: Self::GUEST_NET_PATH.to_string(),
        }
    }
}

/// A virtual hardware device as reported in the device-list property.
///
/// The device kind is decided once at decode time; downstream code asks
/// [`VirtualDevice::is_network_device`] instead of probing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VirtualDevice {
    /// A virtual ethernet card. The hardware address may be absent while
    /// the device is being configured.
    Ethernet {
        /// Device-slot key, unique within the entity. Zero means unassigned.
        key: i32,
        /// Assigned hardware address, if any.
        #[serde(default)]
        mac_address: Option<String>,
    },
    /// Any other device on the entity (disk, controller, ...).
    Other {
        /// Device-slot key.
        key: i32,
    },
}

impl VirtualDevice {
    /// Returns the device-slot key.
    #[must_use]
    pub const fn key(&self) -> i32 {
        match self {
            Self::Ethernet { key, .. } | Self::Other { key } => *key,
        }
    }

    /// Returns true if this is a network interface device.
    #[must_use]
    pub const fn is_network_device(&self) -> bool {
        matches!(self, Self::Ethernet { .. })
    }
}

/// A guest-reported network interface from the guest network-list property.
///
/// This is the self-reported, possibly stale, guest-level view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestNic {
    /// Hardware address of the interface, if the guest reported one.
    #[serde(default)]
    pub mac_address: Option<String>,
    /// Protocol addresses on the interface; empty when the guest reports
    /// no IP configuration (e.g. link down).
    #[serde(default)]
    pub ip_addresses: Vec<String>,
}

impl GuestNic {
    /// Creates a guest interface report.
    #[must_use]
    pub fn new(mac_address: impl Into<String>, ip_addresses: Vec<String>) -> Self {
        Self {
            mac_address: Some(mac_address.into()),
            ip_addresses,
        }
    }
}

/// Change operation the service applied to a reported property.
///
/// Watched scalar properties are expected to arrive as `Assign`; the other
/// operations exist in the feed schema for collection-valued properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyOperation {
    /// The property was set to the reported value.
    Assign,
    /// An element was added to a collection property.
    Add,
    /// An element was removed from a collection property.
    Remove,
    /// The property vanished because an ancestor was removed.
    IndirectRemove,
}

/// Decoded value of a watched property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    /// The entity's display name.
    Name(String),
    /// The virtual hardware device list.
    Devices(Vec<VirtualDevice>),
    /// The guest-reported network interface list.
    GuestNet(Vec<GuestNic>),
}

/// One per-property delta within an update group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyChange {
    /// Property path the delta applies to.
    pub path: String,
    /// Operation the service applied.
    pub op: PropertyOperation,
    /// Reported value; absent for removal operations.
    #[serde(default)]
    pub value: Option<PropertyValue>,
}

impl PropertyChange {
    /// Creates an `Assign` delta, the common case for watched properties.
    #[must_use]
    pub fn assign(path: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            path: path.into(),
            op: PropertyOperation::Assign,
            value: Some(value),
        }
    }
}

/// How an entity relates to the subscription in one update group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectUpdateKind {
    /// The entity newly matches the subscription (or is part of the
    /// initial baseline sweep).
    Enter,
    /// Watched properties of a known entity changed.
    Modify,
    /// The entity no longer matches the subscription.
    Leave,
}

impl ObjectUpdateKind {
    /// Returns true if this update removes the entity from the feed.
    #[must_use]
    pub const fn is_leave(self) -> bool {
        matches!(self, Self::Leave)
    }
}

/// All deltas reported for one entity within a poll batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectUpdate {
    /// The entity the deltas apply to.
    pub entity: EntityId,
    /// How the entity relates to the subscription.
    pub kind: ObjectUpdateKind,
    /// Per-property deltas, in feed order. Empty for `Leave`.
    #[serde(default)]
    pub changes: Vec<PropertyChange>,
}

/// Result of one successful incremental poll call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSet {
    /// Token to thread into the next poll call.
    pub version: VersionToken,
    /// Per-entity update groups, in feed order.
    #[serde(default)]
    pub updates: Vec<ObjectUpdate>,
}
