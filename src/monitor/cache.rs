//! Deduplicating cache between the change detector and its observer.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::extract::{DeviceAddressMap, GuestAddressMap};
use crate::inventory::EntityId;

use super::EntityObserver;

/// Last-known state for one cached entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRecord {
    /// Last-known display name.
    pub name: Option<String>,
    /// Last-known hardware-level address map.
    pub devices: DeviceAddressMap,
    /// Last-known guest-level address map.
    pub guest_addresses: GuestAddressMap,
}

/// Suppresses spurious change notifications by diffing against last-known
/// state per entity.
///
/// Sits between a detector and a terminal observer (decorator). On each
/// incoming update it compares the supplied fields against the cached
/// record by value and forwards a notification only when at least one field
/// genuinely changed; the forwarded notification carries the post-update
/// merged record, not the delta alone. Removals always forward and evict.
///
/// The bulk of guest network updates carry no real address change (DHCP
/// lease renewals re-reporting the same addresses); this is the layer that
/// stops them.
///
/// Not internally synchronized: one cache per detector task. Wrap in
/// external serialization if several detectors must share one.
#[derive(Debug)]
pub struct DedupCache<O> {
    inner: O,
    entries: HashMap<EntityId, EntityRecord>,
}

impl<O: EntityObserver> DedupCache<O> {
    /// Creates an empty cache forwarding to `inner`.
    #[must_use]
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            entries: HashMap::new(),
        }
    }

    /// Returns the number of currently cached entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entities are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached record for an entity, if any.
    #[must_use]
    pub fn get(&self, entity: &EntityId) -> Option<&EntityRecord> {
        self.entries.get(entity)
    }

    /// Consumes the cache and returns the wrapped observer.
    pub fn into_inner(self) -> O {
        self.inner
    }

    fn forward(inner: &mut O, entity: &EntityId, record: &EntityRecord) {
        inner.update(
            entity,
            record.name.as_deref(),
            Some(&record.devices),
            Some(&record.guest_addresses),
        );
    }
}

impl<O: EntityObserver> EntityObserver for DedupCache<O> {
    fn update(
        &mut self,
        entity: &EntityId,
        name: Option<&str>,
        devices: Option<&DeviceAddressMap>,
        guest_addresses: Option<&GuestAddressMap>,
    ) {
        match self.entries.entry(entity.clone()) {
            Entry::Vacant(slot) => {
                // First sighting: either a true enter, or the first modify
                // for an entity the cache was not warmed with. Missing
                // fields default to empty.
                let record = slot.insert(EntityRecord {
                    name: name.map(str::to_string),
                    devices: devices.cloned().unwrap_or_default(),
                    guest_addresses: guest_addresses.cloned().unwrap_or_default(),
                });
                Self::forward(&mut self.inner, entity, record);
            }
            Entry::Occupied(mut slot) => {
                let record = slot.get_mut();
                let mut changed = false;

                // Only supplied fields participate in the diff; an absent
                // field says nothing about current state. A supplied empty
                // map compares equal to a cached empty map, so a spurious
                // "cleared" report does not forward.
                if let Some(name) = name {
                    if record.name.as_deref() != Some(name) {
                        record.name = Some(name.to_string());
                        changed = true;
                    }
                }
                if let Some(devices) = devices {
                    if record.devices != *devices {
                        record.devices = devices.clone();
                        changed = true;
                    }
                }
                if let Some(guest_addresses) = guest_addresses {
                    if record.guest_addresses != *guest_addresses {
                        record.guest_addresses = guest_addresses.clone();
                        changed = true;
                    }
                }

                if changed {
                    Self::forward(&mut self.inner, entity, slot.get());
                } else {
                    tracing::debug!("{entity}: no effective change, suppressed");
                }
            }
        }
    }

    fn remove(&mut self, entity: &EntityId) {
        if self.entries.remove(entity).is_some() {
            self.inner.remove(entity);
        } else {
            // A leave for an entity never seen is possible when monitoring
            // started mid-feed.
            tracing::debug!("{entity}: removal for uncached entity, ignored");
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
