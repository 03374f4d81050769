//! Decoding raw feed updates into typed change records.

use crate::extract::{
    DeviceAddressMap, GuestAddressMap, extract_device_addresses, extract_guest_addresses,
};
use crate::inventory::{
    EntityId, ObjectUpdate, ObjectUpdateKind, PropertyChange, PropertyOperation,
    PropertySelection, PropertyValue,
};

/// A decoded change for one entity, produced from one update group.
///
/// Address fields are optional because a single poll update may report only
/// a subset of the watched properties. An absent field means "not reported
/// in this update", never "became empty".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// The entity the change applies to.
    pub entity: EntityId,
    /// How the entity relates to the subscription.
    pub kind: ObjectUpdateKind,
    /// New display name, if reported.
    pub name: Option<String>,
    /// New hardware-level address map, if the device list was reported.
    pub devices: Option<DeviceAddressMap>,
    /// New guest-level address map, if the guest interface list was reported.
    pub guest_addresses: Option<GuestAddressMap>,
}

impl ChangeRecord {
    /// Creates an empty record for an entity and update kind.
    #[must_use]
    pub const fn new(entity: EntityId, kind: ObjectUpdateKind) -> Self {
        Self {
            entity,
            kind,
            name: None,
            devices: None,
            guest_addresses: None,
        }
    }

    /// Returns true if this record removes the entity.
    #[must_use]
    pub const fn is_leave(&self) -> bool {
        self.kind.is_leave()
    }
}

/// Decodes one per-entity update group into a [`ChangeRecord`].
///
/// A `Leave` update decodes to a bare removal record; its change list is
/// ignored. For `Enter`/`Modify`, each reported delta on a watched path is
/// decoded through the address extractors.
///
/// # Schema tolerance
///
/// The feed promises plain `assign` operations for the watched properties.
/// A delta that breaks that promise (unexpected operation, missing value,
/// or a value of the wrong shape for its path) is logged as a warning and
/// skipped; the remaining deltas in the group are still decoded. Deltas on
/// paths the subscription never asked for are skipped silently.
#[must_use]
pub fn decode_update(update: &ObjectUpdate, selection: &PropertySelection) -> ChangeRecord {
    let mut record = ChangeRecord::new(update.entity.clone(), update.kind);
    if update.kind.is_leave() {
        return record;
    }

    for change in &update.changes {
        decode_change(&mut record, change, selection);
    }
    record
}

/// Applies one property delta to the record being built.
fn decode_change(record: &mut ChangeRecord, change: &PropertyChange, selection: &PropertySelection) {
    if !selection.paths().contains(&change.path.as_str()) {
        tracing::debug!(
            "Ignoring unwatched property '{}' on {}",
            change.path,
            record.entity,
        );
        return;
    }

    if change.op != PropertyOperation::Assign {
        tracing::warn!(
            "Unexpected operation {:?} for '{}' on {}, skipping field",
            change.op,
            change.path,
            record.entity,
        );
        return;
    }

    match &change.value {
        Some(PropertyValue::Name(name)) if change.path == selection.name_path => {
            record.name = Some(name.clone());
        }
        Some(PropertyValue::Devices(devices)) if change.path == selection.device_path => {
            record.devices = Some(extract_device_addresses(devices));
        }
        Some(PropertyValue::GuestNet(nics)) if change.path == selection.guest_net_path => {
            record.guest_addresses = Some(extract_guest_addresses(nics));
        }
        Some(_) => {
            tracing::warn!(
                "Value of unexpected shape for '{}' on {}, skipping field",
                change.path,
                record.entity,
            );
        }
        None => {
            tracing::warn!(
                "Assign without a value for '{}' on {}, skipping field",
                change.path,
                record.entity,
            );
        }
    }
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
