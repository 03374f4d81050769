//! Tests for update decoding.

use super::*;
use crate::inventory::{GuestNic, VirtualDevice};

fn selection() -> PropertySelection {
    PropertySelection::default()
}

fn ethernet(key: i32, mac: &str) -> VirtualDevice {
    VirtualDevice::Ethernet {
        key,
        mac_address: Some(mac.to_string()),
    }
}

fn enter(entity: &str, changes: Vec<PropertyChange>) -> ObjectUpdate {
    ObjectUpdate {
        entity: EntityId::new(entity),
        kind: ObjectUpdateKind::Enter,
        changes,
    }
}

mod leave {
    use super::*;

    #[test]
    fn decodes_to_bare_removal_record() {
        let update = ObjectUpdate {
            entity: EntityId::new("vm-1"),
            kind: ObjectUpdateKind::Leave,
            changes: vec![],
        };

        let record = decode_update(&update, &selection());

        assert!(record.is_leave());
        assert!(record.name.is_none());
        assert!(record.devices.is_none());
        assert!(record.guest_addresses.is_none());
    }

    #[test]
    fn ignores_any_reported_changes() {
        let update = ObjectUpdate {
            entity: EntityId::new("vm-1"),
            kind: ObjectUpdateKind::Leave,
            changes: vec![PropertyChange::assign(
                "name",
                PropertyValue::Name("stale".to_string()),
            )],
        };

        let record = decode_update(&update, &selection());

        assert!(record.name.is_none());
    }
}

mod enter_and_modify {
    use super::*;

    #[test]
    fn decodes_all_three_watched_properties() {
        let update = enter(
            "vm-1",
            vec![
                PropertyChange::assign("name", PropertyValue::Name("web01".to_string())),
                PropertyChange::assign(
                    "config.hardware.device",
                    PropertyValue::Devices(vec![ethernet(4000, "00:11:22:33:44:55")]),
                ),
                PropertyChange::assign(
                    "guest.net",
                    PropertyValue::GuestNet(vec![GuestNic::new(
                        "00:11:22:33:44:55",
                        vec!["10.0.0.5".to_string()],
                    )]),
                ),
            ],
        );

        let record = decode_update(&update, &selection());

        assert_eq!(record.name.as_deref(), Some("web01"));
        assert_eq!(record.devices.unwrap()[&4000], "00:11:22:33:44:55");
        assert_eq!(
            record.guest_addresses.unwrap()["00:11:22:33:44:55"],
            vec!["10.0.0.5".to_string()]
        );
    }

    #[test]
    fn unreported_fields_stay_absent() {
        let update = enter(
            "vm-1",
            vec![PropertyChange::assign(
                "name",
                PropertyValue::Name("web01".to_string()),
            )],
        );

        let record = decode_update(&update, &selection());

        assert_eq!(record.name.as_deref(), Some("web01"));
        assert!(record.devices.is_none());
        assert!(record.guest_addresses.is_none());
    }

    #[test]
    fn reported_empty_device_list_decodes_to_empty_map() {
        let update = enter(
            "vm-1",
            vec![PropertyChange::assign(
                "config.hardware.device",
                PropertyValue::Devices(vec![]),
            )],
        );

        let record = decode_update(&update, &selection());

        assert_eq!(record.devices, Some(DeviceAddressMap::new()));
    }
}

mod schema_tolerance {
    use super::*;

    #[test]
    fn unexpected_operation_skips_only_that_field() {
        let update = enter(
            "vm-1",
            vec![
                PropertyChange {
                    path: "guest.net".to_string(),
                    op: PropertyOperation::IndirectRemove,
                    value: None,
                },
                PropertyChange::assign("name", PropertyValue::Name("web01".to_string())),
            ],
        );

        let record = decode_update(&update, &selection());

        assert!(record.guest_addresses.is_none());
        assert_eq!(record.name.as_deref(), Some("web01"));
    }

    #[test]
    fn assign_without_value_is_skipped() {
        let update = enter(
            "vm-1",
            vec![PropertyChange {
                path: "name".to_string(),
                op: PropertyOperation::Assign,
                value: None,
            }],
        );

        let record = decode_update(&update, &selection());

        assert!(record.name.is_none());
    }

    #[test]
    fn value_of_wrong_shape_for_path_is_skipped() {
        let update = enter(
            "vm-1",
            vec![PropertyChange::assign(
                "name",
                PropertyValue::Devices(vec![ethernet(4000, "aa:bb")]),
            )],
        );

        let record = decode_update(&update, &selection());

        assert!(record.name.is_none());
        assert!(record.devices.is_none());
    }

    #[test]
    fn unwatched_path_is_ignored() {
        let update = enter(
            "vm-1",
            vec![PropertyChange::assign(
                "runtime.powerState",
                PropertyValue::Name("poweredOn".to_string()),
            )],
        );

        let record = decode_update(&update, &selection());

        assert!(record.name.is_none());
    }
}

mod custom_selection {
    use super::*;

    #[test]
    fn decodes_against_configured_paths() {
        let selection = PropertySelection {
            entity_type: "HostSystem".to_string(),
            name_path: "summary.config.name".to_string(),
            device_path: "hardware.device".to_string(),
            guest_net_path: "net".to_string(),
        };
        let update = enter(
            "host-7",
            vec![PropertyChange::assign(
                "summary.config.name",
                PropertyValue::Name("esx01".to_string()),
            )],
        );

        let record = decode_update(&update, &selection);

        assert_eq!(record.name.as_deref(), Some("esx01"));
    }
}
