//! Pure address extraction from raw feed property values.
//!
//! These functions turn the two list-valued properties the feed reports
//! into the typed maps the rest of the monitor works with. They hold no
//! state, perform no I/O, and are safe to call concurrently on independent
//! inputs.

use std::collections::BTreeMap;

use crate::inventory::{GuestNic, VirtualDevice};

/// Hardware-level view of an entity's network interfaces:
/// device-slot key → hardware address.
pub type DeviceAddressMap = BTreeMap<i32, String>;

/// Guest-level view of an entity's addresses:
/// hardware address → protocol addresses reported on that interface.
pub type GuestAddressMap = BTreeMap<String, Vec<String>>;

/// Builds the device-address map from a raw device list.
///
/// Keeps only network interface devices that carry a hardware address and
/// a nonzero device key; everything else (disks, controllers, unconfigured
/// NICs) is skipped. An input with no matching devices yields an empty map.
#[must_use]
pub fn extract_device_addresses(devices: &[VirtualDevice]) -> DeviceAddressMap {
    devices
        .iter()
        .filter_map(|device| match device {
            VirtualDevice::Ethernet {
                key,
                mac_address: Some(mac),
            } if *key != 0 => Some((*key, mac.clone())),
            _ => None,
        })
        .collect()
}

/// Builds the guest-address map from a guest-reported interface list.
///
/// Keeps only interfaces that carry a hardware address; each maps to the
/// list of protocol addresses the guest reported for it, which is empty
/// when the interface has no IP configuration (e.g. link down).
///
/// If a guest reports the same hardware address twice, the later entry
/// overwrites the earlier one. This last-write-wins behavior is a default,
/// not a contract; real guests do not normally produce duplicates.
#[must_use]
pub fn extract_guest_addresses(nics: &[GuestNic]) -> GuestAddressMap {
    nics.iter()
        .filter_map(|nic| {
            nic.mac_address
                .as_ref()
                .map(|mac| (mac.clone(), nic.ip_addresses.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ethernet(key: i32, mac: &str) -> VirtualDevice {
        VirtualDevice::Ethernet {
            key,
            mac_address: Some(mac.to_string()),
        }
    }

    mod device_addresses {
        use super::*;

        #[test]
        fn maps_key_to_hardware_address() {
            let devices = vec![ethernet(4000, "00:11:22:33:44:55")];

            let map = extract_device_addresses(&devices);

            assert_eq!(map.len(), 1);
            assert_eq!(map[&4000], "00:11:22:33:44:55");
        }

        #[test]
        fn skips_non_network_devices() {
            let devices = vec![
                VirtualDevice::Other { key: 2000 },
                ethernet(4000, "aa:bb:cc:dd:ee:ff"),
                VirtualDevice::Other { key: 1000 },
            ];

            let map = extract_device_addresses(&devices);

            assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![4000]);
        }

        #[test]
        fn skips_interfaces_without_hardware_address() {
            let devices = vec![VirtualDevice::Ethernet {
                key: 4000,
                mac_address: None,
            }];

            assert!(extract_device_addresses(&devices).is_empty());
        }

        #[test]
        fn skips_zero_device_key() {
            let devices = vec![ethernet(0, "aa:bb:cc:dd:ee:ff")];

            assert!(extract_device_addresses(&devices).is_empty());
        }

        #[test]
        fn empty_input_yields_empty_map() {
            assert!(extract_device_addresses(&[]).is_empty());
        }

        #[test]
        fn idempotent_for_same_input() {
            let devices = vec![
                ethernet(4000, "00:11:22:33:44:55"),
                ethernet(4001, "00:11:22:33:44:56"),
                VirtualDevice::Other { key: 100 },
            ];

            assert_eq!(
                extract_device_addresses(&devices),
                extract_device_addresses(&devices)
            );
        }
    }

    mod guest_addresses {
        use super::*;

        #[test]
        fn maps_hardware_address_to_protocol_addresses() {
            let nics = vec![GuestNic::new(
                "00:11:22:33:44:55",
                vec!["10.0.0.5".to_string(), "fe80::1".to_string()],
            )];

            let map = extract_guest_addresses(&nics);

            assert_eq!(
                map["00:11:22:33:44:55"],
                vec!["10.0.0.5".to_string(), "fe80::1".to_string()]
            );
        }

        #[test]
        fn interface_without_ip_configuration_keeps_empty_list() {
            let nics = vec![GuestNic::new("00:11:22:33:44:55", vec![])];

            let map = extract_guest_addresses(&nics);

            assert!(map["00:11:22:33:44:55"].is_empty());
        }

        #[test]
        fn skips_interfaces_without_hardware_address() {
            let nics = vec![GuestNic {
                mac_address: None,
                ip_addresses: vec!["10.0.0.5".to_string()],
            }];

            assert!(extract_guest_addresses(&nics).is_empty());
        }

        #[test]
        fn duplicate_hardware_address_last_write_wins() {
            let nics = vec![
                GuestNic::new("aa:bb", vec!["10.0.0.1".to_string()]),
                GuestNic::new("aa:bb", vec!["10.0.0.2".to_string()]),
            ];

            let map = extract_guest_addresses(&nics);

            assert_eq!(map["aa:bb"], vec!["10.0.0.2".to_string()]);
        }

        #[test]
        fn idempotent_for_same_input() {
            let nics = vec![
                GuestNic::new("aa:bb", vec!["10.0.0.1".to_string()]),
                GuestNic::new("cc:dd", vec![]),
            ];

            assert_eq!(extract_guest_addresses(&nics), extract_guest_addresses(&nics));
        }
    }
}
