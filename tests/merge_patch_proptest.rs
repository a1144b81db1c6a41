//! Property tests for merge patch construction and application.

use ibmcloud_vpc_client::common::merge_patch::{AsPatch, Nullable, apply};
use ibmcloud_vpc_client::vpc::load_balancers::LoadBalancerListenerPatch;
use ibmcloud_vpc_client::vpc::references::Identity;
use ibmcloud_vpc_client::vpc::volumes::VolumePatch;
use proptest::prelude::*;
use serde_json::{Value, json};

fn volume() -> Value {
    json!({
        "id": "r006-vol",
        "name": "my-volume",
        "capacity": 100,
        "iops": 3000,
        "profile": {"name": "general-purpose", "href": "https://us-south.iaas.cloud.ibm.com/v1/volume/profiles/general-purpose"},
        "user_tags": ["env:test"],
        "status": "available"
    })
}

fn volume_patch() -> impl Strategy<Value = VolumePatch> {
    (
        proptest::option::of(10i64..16_000),
        proptest::option::of(100i64..48_000),
        proptest::option::of("[a-z][a-z0-9-]{0,20}"),
        proptest::option::of(proptest::collection::vec("[a-z]{1,8}:[a-z]{1,8}", 0..4)),
    )
        .prop_map(|(capacity, iops, name, user_tags)| VolumePatch {
            capacity,
            iops,
            name,
            profile: None,
            user_tags,
        })
}

proptest! {
    #[test]
    fn applying_a_patch_changes_only_the_fields_it_sets(patch in volume_patch()) {
        let original = volume();
        let body = patch.as_patch().unwrap();
        let mut patched = original.clone();
        apply(&mut patched, &Value::Object(body.clone()));

        let original = original.as_object().unwrap();
        let patched = patched.as_object().unwrap();
        for (key, value) in original {
            match body.get(key) {
                Some(new_value) => prop_assert_eq!(&patched[key], new_value),
                None => prop_assert_eq!(&patched[key], value),
            }
        }
        prop_assert_eq!(patched.len(), original.len());
    }

    #[test]
    fn zero_and_empty_values_are_sent(capacity in 0i64..2, name in "[a-z]{0,1}") {
        let patch = VolumePatch {
            capacity: Some(capacity),
            name: Some(name.clone()),
            user_tags: Some(Vec::new()),
            ..Default::default()
        };
        let body = patch.as_patch().unwrap();

        prop_assert_eq!(&body["capacity"], &json!(capacity));
        prop_assert_eq!(&body["name"], &json!(name));
        prop_assert_eq!(&body["user_tags"], &json!([]));
        prop_assert!(!body.contains_key("iops"));
    }

    #[test]
    fn explicit_null_removes_the_field(port in 1i64..65_535) {
        let mut listener = json!({
            "id": "r006-listener",
            "port": 443,
            "default_pool": {"id": "r006-pool", "href": "https://us-south.iaas.cloud.ibm.com/v1/load_balancers/r006-lb/pools/r006-pool"}
        });
        let patch = LoadBalancerListenerPatch {
            port: Some(port),
            default_pool: Some(Nullable::Null),
            ..Default::default()
        };
        apply(&mut listener, &Value::Object(patch.as_patch().unwrap()));

        prop_assert_eq!(&listener["port"], &json!(port));
        prop_assert!(listener.get("default_pool").is_none());
    }
}

#[test]
fn nested_identity_is_merged_key_by_key() {
    let mut original = volume();
    let patch = VolumePatch {
        profile: Some(Identity::name("10iops-tier")),
        ..Default::default()
    };
    apply(&mut original, &Value::Object(patch.as_patch().unwrap()));

    assert_eq!(original["profile"]["name"], "10iops-tier");
    // Merge patches merge objects key by key; the old href survives.
    assert!(original["profile"].get("href").is_some());
}
