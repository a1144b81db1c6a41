//! Live smoke tests against a real VPC endpoint.
//!
//! Credentials come from `ibm-credentials.env` or `VPC_*` environment
//! variables. Every test passes without doing anything when neither is set.

use ibmcloud_vpc_client::config::load_service_properties;
use ibmcloud_vpc_client::vpc::images::ListImagesOptions;
use ibmcloud_vpc_client::vpc::instances::ListInstanceProfilesOptions;
use ibmcloud_vpc_client::vpc::regions::{ListRegionZonesOptions, ListRegionsOptions};
use ibmcloud_vpc_client::vpc::vpcs::{GetVpcOptions, ListVpcsOptions};
use ibmcloud_vpc_client::{VpcService, VpcServiceOptions};

struct Fixture {
    service: VpcService,
}

impl Fixture {
    /// `None` when no external configuration is present.
    fn load() -> Option<Self> {
        let properties = load_service_properties("vpc").ok()?;
        if properties.is_empty() {
            eprintln!("no VPC configuration found, skipping");
            return None;
        }

        let service = VpcService::from_external_config(VpcServiceOptions::default())
            .expect("external configuration should build a service");
        Some(Self { service })
    }
}

#[tokio::test]
async fn regions_and_zones() {
    let Some(fixture) = Fixture::load() else {
        return;
    };

    let regions = fixture
        .service
        .list_regions(&ListRegionsOptions::new())
        .await
        .unwrap()
        .into_result()
        .regions;
    assert!(!regions.is_empty(), "expected at least one region");

    let available = regions
        .iter()
        .find(|region| region.status == "available")
        .expect("expected an available region");
    let zones = fixture
        .service
        .list_region_zones(&ListRegionZonesOptions::new(available.name.as_str()))
        .await
        .unwrap()
        .into_result()
        .zones;
    assert!(!zones.is_empty());
}

#[tokio::test]
async fn vpc_pages_have_no_duplicates() {
    let Some(fixture) = Fixture::load() else {
        return;
    };

    let vpcs = fixture
        .service
        .pager(ListVpcsOptions::new().with_limit(1))
        .get_all()
        .await
        .unwrap();

    let mut ids: Vec<&str> = vpcs.iter().map(|vpc| vpc.id.as_str()).collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);

    if let Some(first) = vpcs.first() {
        let response = fixture
            .service
            .get_vpc(&GetVpcOptions::new(first.id.as_str()))
            .await
            .unwrap();
        assert_eq!(response.result.id, first.id);
    }
}

#[tokio::test]
async fn missing_vpc_is_not_found() {
    let Some(fixture) = Fixture::load() else {
        return;
    };

    let error = fixture
        .service
        .get_vpc(&GetVpcOptions::new("r006-00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap_err();
    assert!(error.is_not_found(), "unexpected error: {error}");
    assert!(error.request_id().is_some());
}

#[tokio::test]
async fn catalog_listings() {
    let Some(fixture) = Fixture::load() else {
        return;
    };

    let profiles = fixture
        .service
        .list_instance_profiles(&ListInstanceProfilesOptions::new())
        .await
        .unwrap()
        .into_result()
        .profiles;
    assert!(!profiles.is_empty());

    let images = fixture
        .service
        .list_images(&ListImagesOptions::new().with_limit(5))
        .await
        .unwrap()
        .into_result();
    assert!(images.images.len() <= 5);
    println!("{}", serde_json::to_string_pretty(&images.images.first()).unwrap());
}
