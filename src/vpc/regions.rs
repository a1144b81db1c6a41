use serde::{Deserialize, Serialize};

use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::references::NameReference;
use crate::vpc::serviceclient::VpcService;

/// A geographic region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Endpoint for this region's API.
    pub endpoint: String,
    pub href: String,
    pub name: String,
    /// `available` or `unavailable`.
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionCollection {
    pub regions: Vec<Region>,
}

/// A zone within a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub href: String,
    pub name: String,
    pub region: NameReference,
    /// `available`, `impaired` or `unavailable`.
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCollection {
    pub zones: Vec<Zone>,
}

#[derive(Debug, Clone, Default)]
pub struct ListRegionsOptions {}

impl ListRegionsOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct GetRegionOptions {
    pub name: String,
}

impl GetRegionOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone)]
pub struct ListRegionZonesOptions {
    pub region_name: String,
}

impl ListRegionZonesOptions {
    pub fn new(region_name: impl Into<String>) -> Self {
        Self {
            region_name: region_name.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetRegionZoneOptions {
    pub region_name: String,
    pub name: String,
}

impl GetRegionZoneOptions {
    pub fn new(region_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            region_name: region_name.into(),
            name: name.into(),
        }
    }
}

impl VpcService {
    /// List all regions.
    pub async fn list_regions(
        &self,
        _options: &ListRegionsOptions,
    ) -> Result<DetailedResponse<RegionCollection>> {
        self.send(ApiRequest::get("list_regions", "/regions")).await
    }

    pub async fn get_region(&self, options: &GetRegionOptions) -> Result<DetailedResponse<Region>> {
        let request =
            ApiRequest::get("get_region", "/regions/{name}").path_param("name", &options.name)?;
        self.send(request).await
    }

    /// List the zones of a region.
    pub async fn list_region_zones(
        &self,
        options: &ListRegionZonesOptions,
    ) -> Result<DetailedResponse<ZoneCollection>> {
        let request = ApiRequest::get("list_region_zones", "/regions/{region_name}/zones")
            .path_param("region_name", &options.region_name)?;
        self.send(request).await
    }

    pub async fn get_region_zone(
        &self,
        options: &GetRegionZoneOptions,
    ) -> Result<DetailedResponse<Zone>> {
        let request = ApiRequest::get("get_region_zone", "/regions/{region_name}/zones/{name}")
            .path_param("region_name", &options.region_name)?
            .path_param("name", &options.name)?;
        self.send(request).await
    }
}
