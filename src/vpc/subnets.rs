use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::merge_patch::{AsPatch, MergePatch, Nullable};
use crate::common::pager::collection;
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::network_acls::NetworkAcl;
use crate::vpc::pager::pageable;
use crate::vpc::public_gateways::PublicGateway;
use crate::vpc::references::{Identity, ResourceGroupReference, ResourceReference, ZoneReference};
use crate::vpc::routing_tables::RoutingTable;
use crate::vpc::serviceclient::VpcService;

/// A subnet within a VPC zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subnet {
    pub id: String,
    pub href: String,
    pub name: String,
    pub ipv4_cidr_block: String,
    pub vpc: ResourceReference,
    pub zone: ZoneReference,
    pub available_ipv4_address_count: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub ip_version: Option<String>,
    pub network_acl: Option<ResourceReference>,
    pub public_gateway: Option<ResourceReference>,
    pub resource_group: Option<ResourceGroupReference>,
    pub resource_type: Option<String>,
    pub routing_table: Option<ResourceReference>,
    pub status: Option<String>,
    pub total_ipv4_address_count: Option<i64>,
}

collection!(SubnetCollection, subnets: Subnet);

/// Request body for creating a subnet, sized either by CIDR block or by address count.
#[derive(Debug, Clone, Serialize)]
pub struct SubnetPrototype {
    pub vpc: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_cidr_block: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_ipv4_address_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_acl: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_gateway: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_table: Option<Identity>,
}

impl SubnetPrototype {
    /// A subnet with an explicit CIDR block; the zone is inferred from the address prefix.
    pub fn by_cidr(vpc: Identity, ipv4_cidr_block: impl Into<String>) -> Self {
        Self::empty(vpc).with_ipv4_cidr_block(ipv4_cidr_block)
    }

    /// A subnet carved from the VPC's address prefix in `zone`.
    pub fn by_total_count(vpc: Identity, total_ipv4_address_count: i64, zone: Identity) -> Self {
        let mut prototype = Self::empty(vpc);
        prototype.total_ipv4_address_count = Some(total_ipv4_address_count);
        prototype.zone = Some(zone);
        prototype
    }

    fn empty(vpc: Identity) -> Self {
        Self {
            vpc,
            ipv4_cidr_block: None,
            total_ipv4_address_count: None,
            zone: None,
            ip_version: None,
            name: None,
            network_acl: None,
            public_gateway: None,
            resource_group: None,
            routing_table: None,
        }
    }

    fn with_ipv4_cidr_block(mut self, ipv4_cidr_block: impl Into<String>) -> Self {
        self.ipv4_cidr_block = Some(ipv4_cidr_block.into());
        self
    }

    pub fn with_zone(mut self, zone: Identity) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_network_acl(mut self, network_acl: Identity) -> Self {
        self.network_acl = Some(network_acl);
        self
    }

    pub fn with_public_gateway(mut self, public_gateway: Identity) -> Self {
        self.public_gateway = Some(public_gateway);
        self
    }

    pub fn with_routing_table(mut self, routing_table: Identity) -> Self {
        self.routing_table = Some(routing_table);
        self
    }

    pub fn with_resource_group(mut self, resource_group: Identity) -> Self {
        self.resource_group = Some(resource_group);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SubnetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_acl: Option<Identity>,
    /// `Some(Nullable::Null)` detaches the public gateway.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_gateway: Option<Nullable<Identity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_table: Option<Identity>,
}

impl AsPatch for SubnetPatch {}

/// An IP address reserved in a subnet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedIp {
    pub id: String,
    pub href: String,
    pub name: String,
    pub address: String,
    pub auto_delete: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub lifecycle_state: Option<String>,
    /// `provider` or `user`.
    pub owner: Option<String>,
    pub resource_type: Option<String>,
    pub target: Option<ResourceReference>,
}

collection!(ReservedIpCollection, reserved_ips: ReservedIp);

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReservedIpPrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Identity>,
}

impl ReservedIpPrototype {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_auto_delete(mut self, auto_delete: bool) -> Self {
        self.auto_delete = Some(auto_delete);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_target(mut self, target: Identity) -> Self {
        self.target = Some(target);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReservedIpPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for ReservedIpPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListSubnetsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub routing_table_id: Option<String>,
    pub routing_table_name: Option<String>,
}

impl ListSubnetsOptions {
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

    pub fn with_routing_table_id(mut self, routing_table_id: impl Into<String>) -> Self {
        self.routing_table_id = Some(routing_table_id.into());
        self
    }

    pub fn with_routing_table_name(mut self, routing_table_name: impl Into<String>) -> Self {
        self.routing_table_name = Some(routing_table_name.into());
        self
    }
}

pageable!(ListSubnetsOptions, SubnetCollection, list_subnets);

#[derive(Debug, Clone)]
pub struct CreateSubnetOptions {
    pub prototype: SubnetPrototype,
}

impl CreateSubnetOptions {
    pub fn new(prototype: SubnetPrototype) -> Self {
        Self { prototype }
    }
}

/// Options naming a single subnet.
#[derive(Debug, Clone)]
pub struct SubnetIdOptions {
    pub id: String,
}

impl SubnetIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetSubnetOptions = SubnetIdOptions;
pub type DeleteSubnetOptions = SubnetIdOptions;
pub type GetSubnetNetworkAclOptions = SubnetIdOptions;
pub type GetSubnetPublicGatewayOptions = SubnetIdOptions;
pub type UnsetSubnetPublicGatewayOptions = SubnetIdOptions;
pub type GetSubnetRoutingTableOptions = SubnetIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateSubnetOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateSubnetOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

/// Options that attach another resource to a subnet by identity.
#[derive(Debug, Clone)]
pub struct SubnetAttachmentOptions {
    pub id: String,
    pub identity: Identity,
}

impl SubnetAttachmentOptions {
    pub fn new(id: impl Into<String>, identity: Identity) -> Self {
        Self {
            id: id.into(),
            identity,
        }
    }
}

pub type ReplaceSubnetNetworkAclOptions = SubnetAttachmentOptions;
pub type SetSubnetPublicGatewayOptions = SubnetAttachmentOptions;
pub type ReplaceSubnetRoutingTableOptions = SubnetAttachmentOptions;

#[derive(Debug, Clone)]
pub struct ListSubnetReservedIpsOptions {
    pub subnet_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    /// `name`, `address` or `created_at`; prefix with `-` for descending order.
    pub sort: Option<String>,
}

impl ListSubnetReservedIpsOptions {
    pub fn new(subnet_id: impl Into<String>) -> Self {
        Self {
            subnet_id: subnet_id.into(),
            start: None,
            limit: None,
            sort: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

pageable!(
    ListSubnetReservedIpsOptions,
    ReservedIpCollection,
    list_subnet_reserved_ips
);

#[derive(Debug, Clone)]
pub struct CreateSubnetReservedIpOptions {
    pub subnet_id: String,
    pub prototype: ReservedIpPrototype,
}

impl CreateSubnetReservedIpOptions {
    pub fn new(subnet_id: impl Into<String>, prototype: ReservedIpPrototype) -> Self {
        Self {
            subnet_id: subnet_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubnetReservedIpOptions {
    pub subnet_id: String,
    pub id: String,
}

impl SubnetReservedIpOptions {
    pub fn new(subnet_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            subnet_id: subnet_id.into(),
            id: id.into(),
        }
    }
}

pub type GetSubnetReservedIpOptions = SubnetReservedIpOptions;
pub type DeleteSubnetReservedIpOptions = SubnetReservedIpOptions;

#[derive(Debug, Clone)]
pub struct UpdateSubnetReservedIpOptions {
    pub subnet_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateSubnetReservedIpOptions {
    pub fn new(subnet_id: impl Into<String>, id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            subnet_id: subnet_id.into(),
            id: id.into(),
            patch,
        }
    }
}

const RESERVED_IP_PATH: &str = "/subnets/{subnet_id}/reserved_ips/{id}";

impl VpcService {
    pub async fn list_subnets(
        &self,
        options: &ListSubnetsOptions,
    ) -> Result<DetailedResponse<SubnetCollection>> {
        let request = ApiRequest::get("list_subnets", "/subnets")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("resource_group.id", options.resource_group_id.as_deref())
            .query_opt("routing_table.id", options.routing_table_id.as_deref())
            .query_opt("routing_table.name", options.routing_table_name.as_deref());
        self.send(request).await
    }

    pub async fn create_subnet(
        &self,
        options: &CreateSubnetOptions,
    ) -> Result<DetailedResponse<Subnet>> {
        let request = ApiRequest::post("create_subnet", "/subnets").json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_subnet(&self, options: &GetSubnetOptions) -> Result<DetailedResponse<Subnet>> {
        let request = ApiRequest::get("get_subnet", "/subnets/{id}").path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_subnet(
        &self,
        options: &UpdateSubnetOptions,
    ) -> Result<DetailedResponse<Subnet>> {
        let request = ApiRequest::patch("update_subnet", "/subnets/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Delete a subnet. Fails while instances or reserved IPs still use it.
    pub async fn delete_subnet(
        &self,
        options: &DeleteSubnetOptions,
    ) -> Result<DetailedResponse<()>> {
        let request =
            ApiRequest::delete("delete_subnet", "/subnets/{id}").path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn get_subnet_network_acl(
        &self,
        options: &GetSubnetNetworkAclOptions,
    ) -> Result<DetailedResponse<NetworkAcl>> {
        let request = ApiRequest::get("get_subnet_network_acl", "/subnets/{id}/network_acl")
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    /// Attach a different network ACL to the subnet.
    pub async fn replace_subnet_network_acl(
        &self,
        options: &ReplaceSubnetNetworkAclOptions,
    ) -> Result<DetailedResponse<NetworkAcl>> {
        let request = ApiRequest::put("replace_subnet_network_acl", "/subnets/{id}/network_acl")
            .path_param("id", &options.id)?
            .json(&options.identity)?;
        self.send(request).await
    }

    pub async fn get_subnet_public_gateway(
        &self,
        options: &GetSubnetPublicGatewayOptions,
    ) -> Result<DetailedResponse<PublicGateway>> {
        let request = ApiRequest::get("get_subnet_public_gateway", "/subnets/{id}/public_gateway")
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn set_subnet_public_gateway(
        &self,
        options: &SetSubnetPublicGatewayOptions,
    ) -> Result<DetailedResponse<PublicGateway>> {
        let request = ApiRequest::put("set_subnet_public_gateway", "/subnets/{id}/public_gateway")
            .path_param("id", &options.id)?
            .json(&options.identity)?;
        self.send(request).await
    }

    pub async fn unset_subnet_public_gateway(
        &self,
        options: &UnsetSubnetPublicGatewayOptions,
    ) -> Result<DetailedResponse<()>> {
        let request =
            ApiRequest::delete("unset_subnet_public_gateway", "/subnets/{id}/public_gateway")
                .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn get_subnet_routing_table(
        &self,
        options: &GetSubnetRoutingTableOptions,
    ) -> Result<DetailedResponse<RoutingTable>> {
        let request = ApiRequest::get("get_subnet_routing_table", "/subnets/{id}/routing_table")
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn replace_subnet_routing_table(
        &self,
        options: &ReplaceSubnetRoutingTableOptions,
    ) -> Result<DetailedResponse<RoutingTable>> {
        let request =
            ApiRequest::put("replace_subnet_routing_table", "/subnets/{id}/routing_table")
                .path_param("id", &options.id)?
                .json(&options.identity)?;
        self.send(request).await
    }

    pub async fn list_subnet_reserved_ips(
        &self,
        options: &ListSubnetReservedIpsOptions,
    ) -> Result<DetailedResponse<ReservedIpCollection>> {
        let request = ApiRequest::get(
            "list_subnet_reserved_ips",
            "/subnets/{subnet_id}/reserved_ips",
        )
        .path_param("subnet_id", &options.subnet_id)?
        .query_opt("start", options.start.as_deref())
        .query_opt("limit", options.limit)
        .query_opt("sort", options.sort.as_deref());
        self.send(request).await
    }

    pub async fn create_subnet_reserved_ip(
        &self,
        options: &CreateSubnetReservedIpOptions,
    ) -> Result<DetailedResponse<ReservedIp>> {
        let request =
            ApiRequest::post("create_subnet_reserved_ip", "/subnets/{subnet_id}/reserved_ips")
                .path_param("subnet_id", &options.subnet_id)?
                .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_subnet_reserved_ip(
        &self,
        options: &GetSubnetReservedIpOptions,
    ) -> Result<DetailedResponse<ReservedIp>> {
        let request = ApiRequest::get("get_subnet_reserved_ip", RESERVED_IP_PATH)
            .path_param("subnet_id", &options.subnet_id)?
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_subnet_reserved_ip(
        &self,
        options: &UpdateSubnetReservedIpOptions,
    ) -> Result<DetailedResponse<ReservedIp>> {
        let request = ApiRequest::patch("update_subnet_reserved_ip", RESERVED_IP_PATH)
            .path_param("subnet_id", &options.subnet_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_subnet_reserved_ip(
        &self,
        options: &DeleteSubnetReservedIpOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_subnet_reserved_ip", RESERVED_IP_PATH)
            .path_param("subnet_id", &options.subnet_id)?
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn patch_can_detach_public_gateway() {
        let patch = SubnetPatch {
            public_gateway: Some(Nullable::Null),
            ..Default::default()
        }
        .as_patch()
        .unwrap();

        assert_eq!(serde_json::Value::Object(patch), json!({"public_gateway": null}));
    }

    #[test]
    fn total_count_prototype_carries_zone() {
        let prototype = SubnetPrototype::by_total_count(
            Identity::id("r006-vpc"),
            256,
            Identity::name("us-south-1"),
        );
        assert_eq!(
            serde_json::to_value(prototype).unwrap(),
            json!({
                "vpc": {"id": "r006-vpc"},
                "total_ipv4_address_count": 256,
                "zone": {"name": "us-south-1"}
            })
        );
    }
}
