//! Property-based tests using proptest
//!
//! Presentation -> wire -> presentation must give back the original object,
//! absent collections must stay absent, and parameter-set resolution must
//! never depend on anything but the bound names.

use azrm::arm::resource_id::resource_group_of;
use azrm::arm::ResourceId;
use azrm::batch::mapping::{job_specification_from_sdk, job_specification_to_sdk};
use azrm::batch::models::{JobSpecification, MetadataItem, PoolInformation};
use azrm::network::mapping::{security_rule_from_sdk, security_rule_to_sdk};
use azrm::network::models::SecurityRule;
use azrm::resource::sync::synced_list;
use azrm::resource::{resolve, BoundParameters, ParameterSet};
use azrm::traffic_manager::mapping::{endpoint_from_sdk, endpoint_to_sdk};
use azrm::traffic_manager::TrafficManagerEndpoint;
use proptest::prelude::*;

fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_.-]{0,30}"
}

fn arb_endpoint() -> impl Strategy<Value = TrafficManagerEndpoint> {
    (
        arb_name(),
        prop_oneof!["AzureEndpoints", "ExternalEndpoints", "NestedEndpoints"],
        proptest::option::of("[a-z0-9.-]{1,40}"),
        proptest::option::of(prop_oneof!["Enabled", "Disabled"]),
        proptest::option::of(1u32..1000),
        proptest::option::of(1u32..1000),
        proptest::option::of(prop_oneof!["West US", "North Europe"]),
    )
        .prop_map(|(name, endpoint_type, target, status, priority, weight, location)| {
            TrafficManagerEndpoint {
                name,
                resource_group_name: "rg".to_string(),
                profile_name: "profile".to_string(),
                endpoint_type: endpoint_type.to_string(),
                target,
                endpoint_status: status.as_deref().map(str::to_string),
                priority,
                weight,
                location: location.as_deref().map(str::to_string),
                ..Default::default()
            }
        })
}

fn arb_security_rule() -> impl Strategy<Value = SecurityRule> {
    (
        arb_name(),
        proptest::option::of(prop_oneof!["Tcp", "Udp", "Icmp", "\\*"]),
        proptest::option::of(prop_oneof!["Allow", "Deny"]),
        proptest::option::of(prop_oneof!["Inbound", "Outbound"]),
        proptest::option::of(100u32..4096),
        proptest::option::of("[0-9]{1,5}|\\*"),
    )
        .prop_map(|(name, protocol, access, direction, priority, port)| SecurityRule {
            name,
            protocol: protocol.as_deref().map(str::to_string),
            access: access.as_deref().map(str::to_string),
            direction: direction.as_deref().map(str::to_string),
            priority,
            destination_port_range: port,
            ..Default::default()
        })
}

fn arb_job_specification() -> impl Strategy<Value = JobSpecification> {
    (
        proptest::option::of(arb_name()),
        proptest::option::of(-1000i32..1000),
        proptest::option::of(proptest::collection::vec((arb_name(), "[a-z0-9 ]{0,20}"), 0..4)),
        proptest::option::of(arb_name()),
    )
        .prop_map(|(display_name, priority, metadata, pool_id)| JobSpecification {
            display_name,
            priority,
            metadata: metadata.map(|items| {
                items
                    .into_iter()
                    .map(|(name, value)| MetadataItem { name, value })
                    .collect()
            }),
            pool_information: pool_id.map(|id| PoolInformation {
                pool_id: Some(id),
                auto_pool_specification: None,
            }),
            ..Default::default()
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    AB,
    AC,
    A,
}

const SETS: &[ParameterSet<Shape>] = &[
    ParameterSet {
        kind: Shape::AB,
        name: "AB",
        required: &["A", "B"],
        optional: &["D"],
    },
    ParameterSet {
        kind: Shape::AC,
        name: "AC",
        required: &["A", "C"],
        optional: &["D"],
    },
    ParameterSet {
        kind: Shape::A,
        name: "A",
        required: &["A"],
        optional: &[],
    },
];

proptest! {
    #[test]
    fn endpoint_round_trips(endpoint in arb_endpoint()) {
        let wire = endpoint_to_sdk(&endpoint).unwrap();
        let back = endpoint_from_sdk("rg", "profile", &wire).unwrap();
        prop_assert_eq!(back, endpoint);
    }

    #[test]
    fn security_rule_round_trips(rule in arb_security_rule()) {
        let back = security_rule_from_sdk(&security_rule_to_sdk(&rule).unwrap());
        prop_assert_eq!(back, rule);
    }

    #[test]
    fn job_specification_round_trips(spec in arb_job_specification()) {
        let back = job_specification_from_sdk(&job_specification_to_sdk(&spec).unwrap());
        prop_assert_eq!(back, spec);
    }

    #[test]
    fn absent_and_empty_collections_stay_distinct(items in proptest::option::of(proptest::collection::vec(any::<u32>(), 0..8))) {
        let mapped = synced_list(items.as_deref(), |x| u64::from(*x));
        prop_assert_eq!(mapped.is_none(), items.is_none());
        prop_assert_eq!(mapped.map(|m| m.len()), items.map(|i| i.len()));
    }

    #[test]
    fn resource_group_extracted_from_any_id(rg in arb_name(), name in arb_name()) {
        let id = ResourceId::new(
            "00000000-0000-0000-0000-000000000000",
            &rg,
            "Microsoft.Network",
            "loadBalancers",
            &name,
        );
        prop_assert_eq!(resource_group_of(&id.to_string()).unwrap(), rg);
    }

    #[test]
    fn resolution_is_deterministic(a in any::<bool>(), b in any::<bool>(), c in any::<bool>(), d in any::<bool>()) {
        let bound = BoundParameters::new()
            .bind_if("A", a)
            .bind_if("B", b)
            .bind_if("C", c)
            .bind_if("D", d);
        let first = resolve(SETS, &bound).map(|s| s.name).ok();
        let second = resolve(SETS, &bound).map(|s| s.name).ok();
        prop_assert_eq!(first, second);

        // {A, B, C} is claimed by two equally specific sets and must fail
        if a && b && c {
            prop_assert!(first.is_none());
        }
        if let Some(name) = first {
            let set = SETS.iter().find(|s| s.name == name).unwrap();
            prop_assert!(set.required.iter().all(|r| bound.contains(r)));
        }
    }
}
