use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::pager::collection;
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::network_acls::NetworkAcl;
use crate::vpc::pager::pageable;
use crate::vpc::references::{Identity, ResourceGroupReference, ResourceReference, ZoneReference};
use crate::vpc::routing_tables::RoutingTable;
use crate::vpc::security_groups::SecurityGroup;
use crate::vpc::serviceclient::VpcService;

/// A virtual private cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vpc {
    pub id: String,
    pub name: String,
    /// `available`, `deleting`, `failed` or `pending`.
    pub status: String,
    pub classic_access: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    #[serde(default)]
    pub cse_source_ips: Vec<VpcCseSourceIp>,
    pub default_network_acl: Option<ResourceReference>,
    pub default_routing_table: Option<ResourceReference>,
    pub default_security_group: Option<ResourceReference>,
    pub href: Option<String>,
    pub resource_group: Option<ResourceGroupReference>,
    pub resource_type: Option<String>,
}

/// Cloud service endpoint source IP for a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpcCseSourceIp {
    pub ip: IpAddress,
    pub zone: ZoneReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddress {
    pub address: String,
}

collection!(VpcCollection, vpcs: Vpc);

#[derive(Debug, Clone, Default, Serialize)]
pub struct VpcPrototype {
    /// `auto` (default) or `manual`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_prefix_management: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classic_access: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl VpcPrototype {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_address_prefix_management(mut self, management: impl Into<String>) -> Self {
        self.address_prefix_management = Some(management.into());
        self
    }

    pub fn with_classic_access(mut self, classic_access: bool) -> Self {
        self.classic_access = Some(classic_access);
        self
    }

    pub fn with_resource_group(mut self, resource_group: Identity) -> Self {
        self.resource_group = Some(resource_group);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VpcPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for VpcPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressPrefix {
    pub id: String,
    pub cidr: String,
    pub href: String,
    pub name: String,
    pub zone: ZoneReference,
    pub created_at: Option<DateTime<Utc>>,
    pub has_subnets: Option<bool>,
    pub is_default: Option<bool>,
}

collection!(AddressPrefixCollection, address_prefixes: AddressPrefix);

#[derive(Debug, Clone, Serialize)]
pub struct AddressPrefixPrototype {
    pub cidr: String,
    pub zone: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AddressPrefixPrototype {
    pub fn new(cidr: impl Into<String>, zone: Identity) -> Self {
        Self {
            cidr: cidr.into(),
            zone,
            is_default: None,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_is_default(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AddressPrefixPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for AddressPrefixPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListVpcsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub classic_access: Option<bool>,
}

impl ListVpcsOptions {
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

    pub fn with_classic_access(mut self, classic_access: bool) -> Self {
        self.classic_access = Some(classic_access);
        self
    }
}

pageable!(ListVpcsOptions, VpcCollection, list_vpcs);

#[derive(Debug, Clone)]
pub struct CreateVpcOptions {
    pub prototype: VpcPrototype,
}

impl CreateVpcOptions {
    pub fn new(prototype: VpcPrototype) -> Self {
        Self { prototype }
    }
}

/// Options naming a single VPC; shared by get, delete and the default-resource getters.
#[derive(Debug, Clone)]
pub struct VpcIdOptions {
    pub id: String,
}

impl VpcIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetVpcOptions = VpcIdOptions;
pub type DeleteVpcOptions = VpcIdOptions;
pub type GetVpcDefaultNetworkAclOptions = VpcIdOptions;
pub type GetVpcDefaultSecurityGroupOptions = VpcIdOptions;
pub type GetVpcDefaultRoutingTableOptions = VpcIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateVpcOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateVpcOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListVpcAddressPrefixesOptions {
    pub vpc_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListVpcAddressPrefixesOptions {
    pub fn new(vpc_id: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            start: None,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pageable!(
    ListVpcAddressPrefixesOptions,
    AddressPrefixCollection,
    list_vpc_address_prefixes
);

#[derive(Debug, Clone)]
pub struct CreateVpcAddressPrefixOptions {
    pub vpc_id: String,
    pub prototype: AddressPrefixPrototype,
}

impl CreateVpcAddressPrefixOptions {
    pub fn new(vpc_id: impl Into<String>, prototype: AddressPrefixPrototype) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VpcAddressPrefixOptions {
    pub vpc_id: String,
    pub id: String,
}

impl VpcAddressPrefixOptions {
    pub fn new(vpc_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            id: id.into(),
        }
    }
}

pub type GetVpcAddressPrefixOptions = VpcAddressPrefixOptions;
pub type DeleteVpcAddressPrefixOptions = VpcAddressPrefixOptions;

#[derive(Debug, Clone)]
pub struct UpdateVpcAddressPrefixOptions {
    pub vpc_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateVpcAddressPrefixOptions {
    pub fn new(vpc_id: impl Into<String>, id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            id: id.into(),
            patch,
        }
    }
}

impl VpcService {
    /// List VPCs in the region, one page at a time.
    pub async fn list_vpcs(
        &self,
        options: &ListVpcsOptions,
    ) -> Result<DetailedResponse<VpcCollection>> {
        let request = ApiRequest::get("list_vpcs", "/vpcs")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("resource_group.id", options.resource_group_id.as_deref())
            .query_opt("classic_access", options.classic_access);
        self.send(request).await
    }

    /// Create a VPC. Returns 201 with the new VPC.
    pub async fn create_vpc(&self, options: &CreateVpcOptions) -> Result<DetailedResponse<Vpc>> {
        let request = ApiRequest::post("create_vpc", "/vpcs").json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_vpc(&self, options: &GetVpcOptions) -> Result<DetailedResponse<Vpc>> {
        let request = ApiRequest::get("get_vpc", "/vpcs/{id}").path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_vpc(&self, options: &UpdateVpcOptions) -> Result<DetailedResponse<Vpc>> {
        let request = ApiRequest::patch("update_vpc", "/vpcs/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Delete a VPC. It must not contain any subnets or gateways.
    pub async fn delete_vpc(&self, options: &DeleteVpcOptions) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_vpc", "/vpcs/{id}").path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn get_vpc_default_network_acl(
        &self,
        options: &GetVpcDefaultNetworkAclOptions,
    ) -> Result<DetailedResponse<NetworkAcl>> {
        let request = ApiRequest::get(
            "get_vpc_default_network_acl",
            "/vpcs/{id}/default_network_acl",
        )
        .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn get_vpc_default_security_group(
        &self,
        options: &GetVpcDefaultSecurityGroupOptions,
    ) -> Result<DetailedResponse<SecurityGroup>> {
        let request = ApiRequest::get(
            "get_vpc_default_security_group",
            "/vpcs/{id}/default_security_group",
        )
        .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn get_vpc_default_routing_table(
        &self,
        options: &GetVpcDefaultRoutingTableOptions,
    ) -> Result<DetailedResponse<RoutingTable>> {
        let request = ApiRequest::get(
            "get_vpc_default_routing_table",
            "/vpcs/{id}/default_routing_table",
        )
        .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn list_vpc_address_prefixes(
        &self,
        options: &ListVpcAddressPrefixesOptions,
    ) -> Result<DetailedResponse<AddressPrefixCollection>> {
        let request = ApiRequest::get(
            "list_vpc_address_prefixes",
            "/vpcs/{vpc_id}/address_prefixes",
        )
        .path_param("vpc_id", &options.vpc_id)?
        .query_opt("start", options.start.as_deref())
        .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn create_vpc_address_prefix(
        &self,
        options: &CreateVpcAddressPrefixOptions,
    ) -> Result<DetailedResponse<AddressPrefix>> {
        let request = ApiRequest::post(
            "create_vpc_address_prefix",
            "/vpcs/{vpc_id}/address_prefixes",
        )
        .path_param("vpc_id", &options.vpc_id)?
        .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_vpc_address_prefix(
        &self,
        options: &GetVpcAddressPrefixOptions,
    ) -> Result<DetailedResponse<AddressPrefix>> {
        let request = ApiRequest::get(
            "get_vpc_address_prefix",
            "/vpcs/{vpc_id}/address_prefixes/{id}",
        )
        .path_param("vpc_id", &options.vpc_id)?
        .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_vpc_address_prefix(
        &self,
        options: &UpdateVpcAddressPrefixOptions,
    ) -> Result<DetailedResponse<AddressPrefix>> {
        let request = ApiRequest::patch(
            "update_vpc_address_prefix",
            "/vpcs/{vpc_id}/address_prefixes/{id}",
        )
        .path_param("vpc_id", &options.vpc_id)?
        .path_param("id", &options.id)?
        .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_vpc_address_prefix(
        &self,
        options: &DeleteVpcAddressPrefixOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete(
            "delete_vpc_address_prefix",
            "/vpcs/{vpc_id}/address_prefixes/{id}",
        )
        .path_param("vpc_id", &options.vpc_id)?
        .path_param("id", &options.id)?;
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prototype_sends_only_set_fields() {
        let body = serde_json::to_value(VpcPrototype::new().with_name("my-vpc")).unwrap();
        assert_eq!(body, json!({"name": "my-vpc"}));
    }

    #[test]
    fn address_prefix_prototype_names_zone() {
        let prototype = AddressPrefixPrototype::new("10.0.0.0/24", Identity::name("us-south-1"));
        assert_eq!(
            serde_json::to_value(prototype).unwrap(),
            json!({"cidr": "10.0.0.0/24", "zone": {"name": "us-south-1"}})
        );
    }

    #[test]
    fn empty_patch_is_empty_object() {
        assert!(VpcPatch::default().as_patch().unwrap().is_empty());
    }
}
