use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::pager::collection;
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::pager::pageable;
use crate::vpc::references::{Identity, ResourceGroupReference, ResourceReference, ZoneReference};
use crate::vpc::serviceclient::VpcService;

/// Outbound internet access for the subnets of one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicGateway {
    pub id: String,
    pub href: String,
    pub name: String,
    pub vpc: ResourceReference,
    pub zone: ZoneReference,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub floating_ip: Option<PublicGatewayFloatingIp>,
    pub resource_group: Option<ResourceGroupReference>,
    pub resource_type: Option<String>,
    /// `available`, `deleting`, `failed` or `pending`.
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicGatewayFloatingIp {
    pub address: String,
    pub crn: Option<String>,
    pub href: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
}

collection!(PublicGatewayCollection, public_gateways: PublicGateway);

#[derive(Debug, Clone, Serialize)]
pub struct PublicGatewayPrototype {
    pub vpc: Identity,
    pub zone: Identity,
    /// An existing floating IP to use; a new one is reserved otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_ip: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl PublicGatewayPrototype {
    pub fn new(vpc: Identity, zone: Identity) -> Self {
        Self {
            vpc,
            zone,
            floating_ip: None,
            name: None,
            resource_group: None,
        }
    }

    pub fn with_floating_ip(mut self, floating_ip: Identity) -> Self {
        self.floating_ip = Some(floating_ip);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_resource_group(mut self, resource_group: Identity) -> Self {
        self.resource_group = Some(resource_group);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PublicGatewayPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for PublicGatewayPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListPublicGatewaysOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
}

impl ListPublicGatewaysOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_resource_group_id(mut self, resource_group_id: impl Into<String>) -> Self {
        self.resource_group_id = Some(resource_group_id.into());
        self
    }
}

pageable!(
    ListPublicGatewaysOptions,
    PublicGatewayCollection,
    list_public_gateways
);

#[derive(Debug, Clone)]
pub struct CreatePublicGatewayOptions {
    pub prototype: PublicGatewayPrototype,
}

impl CreatePublicGatewayOptions {
    pub fn new(prototype: PublicGatewayPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct PublicGatewayIdOptions {
    pub id: String,
}

impl PublicGatewayIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetPublicGatewayOptions = PublicGatewayIdOptions;
pub type DeletePublicGatewayOptions = PublicGatewayIdOptions;

#[derive(Debug, Clone)]
pub struct UpdatePublicGatewayOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdatePublicGatewayOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

impl VpcService {
    pub async fn list_public_gateways(
        &self,
        options: &ListPublicGatewaysOptions,
    ) -> Result<DetailedResponse<PublicGatewayCollection>> {
        let request = ApiRequest::get("list_public_gateways", "/public_gateways")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("resource_group.id", options.resource_group_id.as_deref());
        self.send(request).await
    }

    pub async fn create_public_gateway(
        &self,
        options: &CreatePublicGatewayOptions,
    ) -> Result<DetailedResponse<PublicGateway>> {
        let request =
            ApiRequest::post("create_public_gateway", "/public_gateways").json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_public_gateway(
        &self,
        options: &GetPublicGatewayOptions,
    ) -> Result<DetailedResponse<PublicGateway>> {
        let request = ApiRequest::get("get_public_gateway", "/public_gateways/{id}")
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_public_gateway(
        &self,
        options: &UpdatePublicGatewayOptions,
    ) -> Result<DetailedResponse<PublicGateway>> {
        let request = ApiRequest::patch("update_public_gateway", "/public_gateways/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Delete a public gateway. It must be detached from every subnet first.
    pub async fn delete_public_gateway(
        &self,
        options: &DeletePublicGatewayOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_public_gateway", "/public_gateways/{id}")
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }
}
