use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::merge_patch::{AsPatch, MergePatch, Nullable};
use crate::common::pager::collection;
use crate::common::polymorphic::{self, DecodeError, Polymorphic, unknown_variant, variant};
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::pager::pageable;
use crate::vpc::references::{
    Identity, ReservedIpReference, ResourceGroupReference, ResourceReference, ZoneReference,
};
use crate::vpc::serviceclient::VpcService;

/// A public IP address that can be bound to an interface or gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIp {
    pub id: String,
    pub address: String,
    pub href: String,
    pub name: String,
    pub zone: ZoneReference,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub resource_group: Option<ResourceGroupReference>,
    /// `available`, `deleting`, `failed` or `pending`.
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_target")]
    pub target: Option<FloatingIpTarget>,
}

/// The resource a floating IP is bound to, selected by `resource_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FloatingIpTarget {
    NetworkInterface(FloatingIpTargetInterface),
    BareMetalServerNetworkInterface(FloatingIpTargetInterface),
    PublicGateway(ResourceReference),
}

/// An instance or bare metal server network interface holding a floating IP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIpTargetInterface {
    pub href: String,
    pub id: String,
    pub name: String,
    pub resource_type: String,
    pub primary_ip: Option<ReservedIpReference>,
}

impl Polymorphic for FloatingIpTarget {
    const TYPE_NAME: &'static str = "FloatingIpTarget";
    const DISCRIMINATOR: &'static str = "resource_type";

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "network_interface" => variant(value).map(FloatingIpTarget::NetworkInterface),
            "bare_metal_server_network_interface" => {
                variant(value).map(FloatingIpTarget::BareMetalServerNetworkInterface)
            }
            "public_gateway" => variant(value).map(FloatingIpTarget::PublicGateway),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

fn deserialize_target<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<FloatingIpTarget>, D::Error> {
    polymorphic::deserialize(deserializer).map(Some)
}

collection!(FloatingIpCollection, floating_ips: FloatingIp);

/// Request body for reserving a floating IP, either in a zone or bound to a target.
#[derive(Debug, Clone, Serialize)]
pub struct FloatingIpPrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl FloatingIpPrototype {
    /// An unbound floating IP in `zone`.
    pub fn by_zone(zone: Identity) -> Self {
        Self {
            zone: Some(zone),
            target: None,
            name: None,
            resource_group: None,
        }
    }

    /// A floating IP bound to a network interface; the zone follows the target.
    pub fn by_target(target: Identity) -> Self {
        Self {
            zone: None,
            target: Some(target),
            name: None,
            resource_group: None,
        }
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
pub struct FloatingIpPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(Nullable::Null)` unbinds the floating IP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Nullable<Identity>>,
}

impl AsPatch for FloatingIpPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListFloatingIpsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub sort: Option<String>,
}

impl ListFloatingIpsOptions {
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

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

pageable!(ListFloatingIpsOptions, FloatingIpCollection, list_floating_ips);

#[derive(Debug, Clone)]
pub struct CreateFloatingIpOptions {
    pub prototype: FloatingIpPrototype,
}

impl CreateFloatingIpOptions {
    pub fn new(prototype: FloatingIpPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct FloatingIpIdOptions {
    pub id: String,
}

impl FloatingIpIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetFloatingIpOptions = FloatingIpIdOptions;
pub type DeleteFloatingIpOptions = FloatingIpIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateFloatingIpOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateFloatingIpOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

impl VpcService {
    pub async fn list_floating_ips(
        &self,
        options: &ListFloatingIpsOptions,
    ) -> Result<DetailedResponse<FloatingIpCollection>> {
        let request = ApiRequest::get("list_floating_ips", "/floating_ips")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("resource_group.id", options.resource_group_id.as_deref())
            .query_opt("sort", options.sort.as_deref());
        self.send(request).await
    }

    /// Reserve a floating IP.
    pub async fn create_floating_ip(
        &self,
        options: &CreateFloatingIpOptions,
    ) -> Result<DetailedResponse<FloatingIp>> {
        let request = ApiRequest::post(
            "create_floating_ip",
            "/floating_ips",
        )
        .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_floating_ip(
        &self,
        options: &GetFloatingIpOptions,
    ) -> Result<DetailedResponse<FloatingIp>> {
        let request =
            ApiRequest::get("get_floating_ip", "/floating_ips/{id}").path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_floating_ip(
        &self,
        options: &UpdateFloatingIpOptions,
    ) -> Result<DetailedResponse<FloatingIp>> {
        let request = ApiRequest::patch("update_floating_ip", "/floating_ips/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Release a floating IP. A bound floating IP is unbound first.
    pub async fn delete_floating_ip(
        &self,
        options: &DeleteFloatingIpOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_floating_ip", "/floating_ips/{id}")
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn floating_ip(target: Value) -> Value {
        json!({
            "id": "r006-fip",
            "address": "203.0.113.1",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/floating_ips/r006-fip",
            "name": "my-floating-ip",
            "zone": {"name": "us-south-1", "href": "https://us-south.iaas.cloud.ibm.com/v1/regions/us-south/zones/us-south-1"},
            "target": target
        })
    }

    #[test]
    fn target_is_selected_by_resource_type() {
        let decoded: FloatingIp = serde_json::from_value(floating_ip(json!({
            "href": "https://us-south.iaas.cloud.ibm.com/v1/public_gateways/r006-pgw",
            "id": "r006-pgw",
            "name": "my-gateway",
            "resource_type": "public_gateway"
        })))
        .unwrap();

        assert!(matches!(decoded.target, Some(FloatingIpTarget::PublicGateway(_))));
    }

    #[test]
    fn unknown_target_type_is_rejected() {
        let result = serde_json::from_value::<FloatingIp>(floating_ip(json!({
            "href": "https://us-south.iaas.cloud.ibm.com/v1/things/x",
            "id": "x",
            "resource_type": "virtual_network_interface"
        })));

        let message = result.unwrap_err().to_string();
        assert!(message.contains("virtual_network_interface"));
    }

    #[test]
    fn unbound_floating_ip_has_no_target() {
        let mut value = floating_ip(Value::Null);
        value.as_object_mut().unwrap().remove("target");
        let decoded: FloatingIp = serde_json::from_value(value).unwrap();
        assert_eq!(decoded.target, None);
    }

    #[test]
    fn prototype_by_target_omits_zone() {
        let body = serde_json::to_value(
            FloatingIpPrototype::by_target(Identity::id("0717-nic")),
        )
        .unwrap();
        assert_eq!(body, json!({"target": {"id": "0717-nic"}}));
    }
}
