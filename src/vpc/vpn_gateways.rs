//! Site-to-site VPN gateways, their connections, and IKE/IPsec policies.
//!
//! Gateways and connections come in a route-based and a policy-based flavor,
//! selected by the `mode` field of each response.

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
    Identity, ReservedIpReference, ResourceGroupReference, ResourceReference,
};
use crate::vpc::serviceclient::VpcService;
use crate::vpc::vpcs::IpAddress;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGatewayMember {
    pub public_ip: IpAddress,
    /// `active` or `standby`.
    pub role: String,
    pub status: String,
    pub private_ip: Option<ReservedIpReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGatewayCommon {
    pub id: String,
    pub href: String,
    pub name: String,
    pub mode: String,
    /// `available`, `deleting`, `failed` or `pending`.
    pub status: String,
    pub subnet: ResourceReference,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub resource_group: Option<ResourceGroupReference>,
    pub vpc: Option<ResourceReference>,
    #[serde(default)]
    pub connections: Vec<ResourceReference>,
    #[serde(default)]
    pub members: Vec<VpnGatewayMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGatewayRouteMode {
    #[serde(flatten)]
    pub common: VpnGatewayCommon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGatewayPolicyMode {
    #[serde(flatten)]
    pub common: VpnGatewayCommon,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VpnGateway {
    RouteMode(VpnGatewayRouteMode),
    PolicyMode(VpnGatewayPolicyMode),
}

impl VpnGateway {
    pub fn common(&self) -> &VpnGatewayCommon {
        match self {
            VpnGateway::RouteMode(gateway) => &gateway.common,
            VpnGateway::PolicyMode(gateway) => &gateway.common,
        }
    }
}

impl Polymorphic for VpnGateway {
    const TYPE_NAME: &'static str = "VpnGateway";
    const DISCRIMINATOR: &'static str = "mode";

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "route" => variant(value).map(VpnGateway::RouteMode),
            "policy" => variant(value).map(VpnGateway::PolicyMode),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

impl<'de> Deserialize<'de> for VpnGateway {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        polymorphic::deserialize(deserializer)
    }
}

collection!(VpnGatewayCollection, vpn_gateways: VpnGateway);

#[derive(Debug, Clone, Serialize)]
pub struct VpnGatewayPrototype {
    pub subnet: Identity,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl VpnGatewayPrototype {
    pub fn route_mode(subnet: Identity) -> Self {
        Self::with_mode(subnet, "route")
    }

    pub fn policy_mode(subnet: Identity) -> Self {
        Self::with_mode(subnet, "policy")
    }

    fn with_mode(subnet: Identity, mode: &str) -> Self {
        Self {
            subnet,
            mode: mode.to_string(),
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
pub struct VpnGatewayPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for VpnGatewayPatch {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadPeerDetection {
    /// `clear`, `hold`, `none` or `restart`.
    pub action: String,
    /// Seconds between keepalives.
    pub interval: i64,
    pub timeout: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGatewayConnectionTunnel {
    pub public_ip: IpAddress,
    /// `down` or `up`.
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGatewayConnectionCommon {
    pub id: String,
    pub href: String,
    pub name: String,
    pub mode: String,
    pub peer_address: String,
    /// `down` or `up`.
    pub status: String,
    pub admin_state_up: Option<bool>,
    pub authentication_mode: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub dead_peer_detection: Option<DeadPeerDetection>,
    pub ike_policy: Option<ResourceReference>,
    pub ipsec_policy: Option<ResourceReference>,
    pub psk: Option<String>,
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGatewayConnectionRouteMode {
    #[serde(flatten)]
    pub common: VpnGatewayConnectionCommon,
    pub routing_protocol: Option<String>,
    #[serde(default)]
    pub tunnels: Vec<VpnGatewayConnectionTunnel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGatewayConnectionPolicyMode {
    #[serde(flatten)]
    pub common: VpnGatewayConnectionCommon,
    #[serde(default)]
    pub local_cidrs: Vec<String>,
    #[serde(default)]
    pub peer_cidrs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VpnGatewayConnection {
    RouteMode(VpnGatewayConnectionRouteMode),
    PolicyMode(VpnGatewayConnectionPolicyMode),
}

impl VpnGatewayConnection {
    pub fn common(&self) -> &VpnGatewayConnectionCommon {
        match self {
            VpnGatewayConnection::RouteMode(connection) => &connection.common,
            VpnGatewayConnection::PolicyMode(connection) => &connection.common,
        }
    }
}

impl Polymorphic for VpnGatewayConnection {
    const TYPE_NAME: &'static str = "VpnGatewayConnection";
    const DISCRIMINATOR: &'static str = "mode";

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "route" => variant(value).map(VpnGatewayConnection::RouteMode),
            "policy" => variant(value).map(VpnGatewayConnection::PolicyMode),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

impl<'de> Deserialize<'de> for VpnGatewayConnection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        polymorphic::deserialize(deserializer)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnGatewayConnectionCollection {
    pub connections: Vec<VpnGatewayConnection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnGatewayConnectionLocalCidrs {
    #[serde(default)]
    pub local_cidrs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnGatewayConnectionPeerCidrs {
    #[serde(default)]
    pub peer_cidrs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VpnGatewayConnectionPrototype {
    pub peer_address: String,
    pub psk: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dead_peer_detection: Option<DeadPeerDetection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ike_policy: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipsec_policy: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_cidrs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_cidrs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_protocol: Option<String>,
}

impl VpnGatewayConnectionPrototype {
    /// A connection on a route-based gateway.
    pub fn route_mode(peer_address: impl Into<String>, psk: impl Into<String>) -> Self {
        Self {
            peer_address: peer_address.into(),
            psk: psk.into(),
            name: None,
            admin_state_up: None,
            dead_peer_detection: None,
            ike_policy: None,
            ipsec_policy: None,
            local_cidrs: None,
            peer_cidrs: None,
            routing_protocol: None,
        }
    }

    /// A connection on a policy-based gateway, which must name the CIDRs on both sides.
    pub fn policy_mode(
        peer_address: impl Into<String>,
        psk: impl Into<String>,
        local_cidrs: Vec<String>,
        peer_cidrs: Vec<String>,
    ) -> Self {
        Self {
            local_cidrs: Some(local_cidrs),
            peer_cidrs: Some(peer_cidrs),
            ..Self::route_mode(peer_address, psk)
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_ike_policy(mut self, ike_policy: Identity) -> Self {
        self.ike_policy = Some(ike_policy);
        self
    }

    pub fn with_ipsec_policy(mut self, ipsec_policy: Identity) -> Self {
        self.ipsec_policy = Some(ipsec_policy);
        self
    }

    pub fn with_dead_peer_detection(mut self, dead_peer_detection: DeadPeerDetection) -> Self {
        self.dead_peer_detection = Some(dead_peer_detection);
        self
    }

    pub fn with_admin_state_up(mut self, admin_state_up: bool) -> Self {
        self.admin_state_up = Some(admin_state_up);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeadPeerDetectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VpnGatewayConnectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dead_peer_detection: Option<DeadPeerDetectionPatch>,
    /// `Some(Nullable::Null)` reverts to auto-negotiation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ike_policy: Option<Nullable<Identity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipsec_policy: Option<Nullable<Identity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_protocol: Option<String>,
}

impl AsPatch for VpnGatewayConnectionPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IkePolicy {
    pub id: String,
    pub href: String,
    pub name: String,
    pub authentication_algorithm: String,
    pub dh_group: i64,
    pub encryption_algorithm: String,
    pub ike_version: i64,
    /// Seconds.
    pub key_lifetime: i64,
    pub negotiation_mode: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub resource_group: Option<ResourceGroupReference>,
    pub resource_type: Option<String>,
    #[serde(default)]
    pub connections: Vec<ResourceReference>,
}

collection!(IkePolicyCollection, ike_policies: IkePolicy);

#[derive(Debug, Clone, Serialize)]
pub struct IkePolicyPrototype {
    pub authentication_algorithm: String,
    pub dh_group: i64,
    pub encryption_algorithm: String,
    pub ike_version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_lifetime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl IkePolicyPrototype {
    pub fn new(
        authentication_algorithm: impl Into<String>,
        dh_group: i64,
        encryption_algorithm: impl Into<String>,
        ike_version: i64,
    ) -> Self {
        Self {
            authentication_algorithm: authentication_algorithm.into(),
            dh_group,
            encryption_algorithm: encryption_algorithm.into(),
            ike_version,
            key_lifetime: None,
            name: None,
            resource_group: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_key_lifetime(mut self, key_lifetime: i64) -> Self {
        self.key_lifetime = Some(key_lifetime);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IkePolicyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dh_group: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ike_version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_lifetime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for IkePolicyPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpsecPolicy {
    pub id: String,
    pub href: String,
    pub name: String,
    pub authentication_algorithm: String,
    pub encryption_algorithm: String,
    /// Perfect forward secrecy group, or `disabled`.
    pub pfs: String,
    pub key_lifetime: i64,
    pub encapsulation_mode: Option<String>,
    pub transform_protocol: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub resource_group: Option<ResourceGroupReference>,
    pub resource_type: Option<String>,
    #[serde(default)]
    pub connections: Vec<ResourceReference>,
}

collection!(IpsecPolicyCollection, ipsec_policies: IpsecPolicy);

#[derive(Debug, Clone, Serialize)]
pub struct IpsecPolicyPrototype {
    pub authentication_algorithm: String,
    pub encryption_algorithm: String,
    pub pfs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_lifetime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl IpsecPolicyPrototype {
    pub fn new(
        authentication_algorithm: impl Into<String>,
        encryption_algorithm: impl Into<String>,
        pfs: impl Into<String>,
    ) -> Self {
        Self {
            authentication_algorithm: authentication_algorithm.into(),
            encryption_algorithm: encryption_algorithm.into(),
            pfs: pfs.into(),
            key_lifetime: None,
            name: None,
            resource_group: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_key_lifetime(mut self, key_lifetime: i64) -> Self {
        self.key_lifetime = Some(key_lifetime);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IpsecPolicyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_lifetime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pfs: Option<String>,
}

impl AsPatch for IpsecPolicyPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListVpnGatewaysOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub mode: Option<String>,
}

impl ListVpnGatewaysOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_resource_group_id(mut self, resource_group_id: impl Into<String>) -> Self {
        self.resource_group_id = Some(resource_group_id.into());
        self
    }
}

pageable!(ListVpnGatewaysOptions, VpnGatewayCollection, list_vpn_gateways);

#[derive(Debug, Clone)]
pub struct CreateVpnGatewayOptions {
    pub prototype: VpnGatewayPrototype,
}

impl CreateVpnGatewayOptions {
    pub fn new(prototype: VpnGatewayPrototype) -> Self {
        Self { prototype }
    }
}

/// Addresses a single gateway, IKE policy or IPsec policy.
#[derive(Debug, Clone)]
pub struct VpnIdOptions {
    pub id: String,
}

impl VpnIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetVpnGatewayOptions = VpnIdOptions;
pub type DeleteVpnGatewayOptions = VpnIdOptions;
pub type GetIkePolicyOptions = VpnIdOptions;
pub type DeleteIkePolicyOptions = VpnIdOptions;
pub type ListIkePolicyConnectionsOptions = VpnIdOptions;
pub type GetIpsecPolicyOptions = VpnIdOptions;
pub type DeleteIpsecPolicyOptions = VpnIdOptions;
pub type ListIpsecPolicyConnectionsOptions = VpnIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateVpnIdOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateVpnIdOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

pub type UpdateVpnGatewayOptions = UpdateVpnIdOptions;
pub type UpdateIkePolicyOptions = UpdateVpnIdOptions;
pub type UpdateIpsecPolicyOptions = UpdateVpnIdOptions;

#[derive(Debug, Clone)]
pub struct ListVpnGatewayConnectionsOptions {
    pub vpn_gateway_id: String,
    pub status: Option<String>,
}

impl ListVpnGatewayConnectionsOptions {
    pub fn new(vpn_gateway_id: impl Into<String>) -> Self {
        Self {
            vpn_gateway_id: vpn_gateway_id.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct CreateVpnGatewayConnectionOptions {
    pub vpn_gateway_id: String,
    pub prototype: VpnGatewayConnectionPrototype,
}

impl CreateVpnGatewayConnectionOptions {
    pub fn new(
        vpn_gateway_id: impl Into<String>,
        prototype: VpnGatewayConnectionPrototype,
    ) -> Self {
        Self {
            vpn_gateway_id: vpn_gateway_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VpnGatewayConnectionOptions {
    pub vpn_gateway_id: String,
    pub id: String,
}

impl VpnGatewayConnectionOptions {
    pub fn new(vpn_gateway_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            vpn_gateway_id: vpn_gateway_id.into(),
            id: id.into(),
        }
    }
}

pub type GetVpnGatewayConnectionOptions = VpnGatewayConnectionOptions;
pub type DeleteVpnGatewayConnectionOptions = VpnGatewayConnectionOptions;
pub type ListVpnGatewayConnectionLocalCidrsOptions = VpnGatewayConnectionOptions;
pub type ListVpnGatewayConnectionPeerCidrsOptions = VpnGatewayConnectionOptions;

#[derive(Debug, Clone)]
pub struct UpdateVpnGatewayConnectionOptions {
    pub vpn_gateway_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateVpnGatewayConnectionOptions {
    pub fn new(
        vpn_gateway_id: impl Into<String>,
        id: impl Into<String>,
        patch: MergePatch,
    ) -> Self {
        Self {
            vpn_gateway_id: vpn_gateway_id.into(),
            id: id.into(),
            patch,
        }
    }
}

/// One CIDR of a policy-mode connection, split into prefix and length.
#[derive(Debug, Clone)]
pub struct VpnGatewayConnectionCidrOptions {
    pub vpn_gateway_id: String,
    pub id: String,
    pub cidr_prefix: String,
    pub prefix_length: String,
}

impl VpnGatewayConnectionCidrOptions {
    pub fn new(
        vpn_gateway_id: impl Into<String>,
        id: impl Into<String>,
        cidr_prefix: impl Into<String>,
        prefix_length: impl Into<String>,
    ) -> Self {
        Self {
            vpn_gateway_id: vpn_gateway_id.into(),
            id: id.into(),
            cidr_prefix: cidr_prefix.into(),
            prefix_length: prefix_length.into(),
        }
    }
}

pub type AddVpnGatewayConnectionLocalCidrOptions = VpnGatewayConnectionCidrOptions;
pub type CheckVpnGatewayConnectionLocalCidrOptions = VpnGatewayConnectionCidrOptions;
pub type RemoveVpnGatewayConnectionLocalCidrOptions = VpnGatewayConnectionCidrOptions;
pub type AddVpnGatewayConnectionPeerCidrOptions = VpnGatewayConnectionCidrOptions;
pub type CheckVpnGatewayConnectionPeerCidrOptions = VpnGatewayConnectionCidrOptions;
pub type RemoveVpnGatewayConnectionPeerCidrOptions = VpnGatewayConnectionCidrOptions;

#[derive(Debug, Clone, Default)]
pub struct ListIkePoliciesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListIkePoliciesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pageable!(ListIkePoliciesOptions, IkePolicyCollection, list_ike_policies);

#[derive(Debug, Clone)]
pub struct CreateIkePolicyOptions {
    pub prototype: IkePolicyPrototype,
}

impl CreateIkePolicyOptions {
    pub fn new(prototype: IkePolicyPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListIpsecPoliciesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListIpsecPoliciesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pageable!(ListIpsecPoliciesOptions, IpsecPolicyCollection, list_ipsec_policies);

#[derive(Debug, Clone)]
pub struct CreateIpsecPolicyOptions {
    pub prototype: IpsecPolicyPrototype,
}

impl CreateIpsecPolicyOptions {
    pub fn new(prototype: IpsecPolicyPrototype) -> Self {
        Self { prototype }
    }
}

const CONNECTIONS_PATH: &str = "/vpn_gateways/{vpn_gateway_id}/connections";
const CONNECTION_PATH: &str = "/vpn_gateways/{vpn_gateway_id}/connections/{id}";
const LOCAL_CIDRS_PATH: &str = "/vpn_gateways/{vpn_gateway_id}/connections/{id}/local_cidrs";
const LOCAL_CIDR_PATH: &str =
    "/vpn_gateways/{vpn_gateway_id}/connections/{id}/local_cidrs/{cidr_prefix}/{prefix_length}";
const PEER_CIDRS_PATH: &str = "/vpn_gateways/{vpn_gateway_id}/connections/{id}/peer_cidrs";
const PEER_CIDR_PATH: &str =
    "/vpn_gateways/{vpn_gateway_id}/connections/{id}/peer_cidrs/{cidr_prefix}/{prefix_length}";

fn connection_request(
    request: ApiRequest,
    options: &VpnGatewayConnectionOptions,
) -> Result<ApiRequest> {
    request
        .path_param("vpn_gateway_id", &options.vpn_gateway_id)?
        .path_param("id", &options.id)
}

fn cidr_request(
    request: ApiRequest,
    options: &VpnGatewayConnectionCidrOptions,
) -> Result<ApiRequest> {
    request
        .path_param("vpn_gateway_id", &options.vpn_gateway_id)?
        .path_param("id", &options.id)?
        .path_param("cidr_prefix", &options.cidr_prefix)?
        .path_param("prefix_length", &options.prefix_length)
}

impl VpcService {
    pub async fn list_vpn_gateways(
        &self,
        options: &ListVpnGatewaysOptions,
    ) -> Result<DetailedResponse<VpnGatewayCollection>> {
        let request = ApiRequest::get("list_vpn_gateways", "/vpn_gateways")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("resource_group.id", options.resource_group_id.as_deref())
            .query_opt("mode", options.mode.as_deref());
        self.send(request).await
    }

    pub async fn create_vpn_gateway(
        &self,
        options: &CreateVpnGatewayOptions,
    ) -> Result<DetailedResponse<VpnGateway>> {
        let request = ApiRequest::post(
            "create_vpn_gateway",
            "/vpn_gateways",
        )
        .json(&options.prototype)?;
        self.send_polymorphic(request).await
    }

    pub async fn get_vpn_gateway(
        &self,
        options: &GetVpnGatewayOptions,
    ) -> Result<DetailedResponse<VpnGateway>> {
        let request =
            ApiRequest::get("get_vpn_gateway", "/vpn_gateways/{id}").path_param("id", &options.id)?;
        self.send_polymorphic(request).await
    }

    pub async fn update_vpn_gateway(
        &self,
        options: &UpdateVpnGatewayOptions,
    ) -> Result<DetailedResponse<VpnGateway>> {
        let request = ApiRequest::patch("update_vpn_gateway", "/vpn_gateways/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send_polymorphic(request).await
    }

    /// Deletion is asynchronous; the service answers `202 Accepted`.
    pub async fn delete_vpn_gateway(
        &self,
        options: &DeleteVpnGatewayOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_vpn_gateway", "/vpn_gateways/{id}")
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_vpn_gateway_connections(
        &self,
        options: &ListVpnGatewayConnectionsOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnectionCollection>> {
        let request = ApiRequest::get("list_vpn_gateway_connections", CONNECTIONS_PATH)
            .path_param("vpn_gateway_id", &options.vpn_gateway_id)?
            .query_opt("status", options.status.as_deref());
        self.send(request).await
    }

    pub async fn create_vpn_gateway_connection(
        &self,
        options: &CreateVpnGatewayConnectionOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnection>> {
        let request = ApiRequest::post("create_vpn_gateway_connection", CONNECTIONS_PATH)
            .path_param("vpn_gateway_id", &options.vpn_gateway_id)?
            .json(&options.prototype)?;
        self.send_polymorphic(request).await
    }

    pub async fn get_vpn_gateway_connection(
        &self,
        options: &GetVpnGatewayConnectionOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnection>> {
        let request = connection_request(
            ApiRequest::get("get_vpn_gateway_connection", CONNECTION_PATH),
            options,
        )?;
        self.send_polymorphic(request).await
    }

    pub async fn update_vpn_gateway_connection(
        &self,
        options: &UpdateVpnGatewayConnectionOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnection>> {
        let request = ApiRequest::patch("update_vpn_gateway_connection", CONNECTION_PATH)
            .path_param("vpn_gateway_id", &options.vpn_gateway_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send_polymorphic(request).await
    }

    pub async fn delete_vpn_gateway_connection(
        &self,
        options: &DeleteVpnGatewayConnectionOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = connection_request(
            ApiRequest::delete("delete_vpn_gateway_connection", CONNECTION_PATH),
            options,
        )?;
        self.send_empty(request).await
    }

    pub async fn list_vpn_gateway_connection_local_cidrs(
        &self,
        options: &ListVpnGatewayConnectionLocalCidrsOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnectionLocalCidrs>> {
        let request = connection_request(
            ApiRequest::get("list_vpn_gateway_connection_local_cidrs", LOCAL_CIDRS_PATH),
            options,
        )?;
        self.send(request).await
    }

    pub async fn add_vpn_gateway_connection_local_cidr(
        &self,
        options: &AddVpnGatewayConnectionLocalCidrOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = cidr_request(
            ApiRequest::put("add_vpn_gateway_connection_local_cidr", LOCAL_CIDR_PATH),
            options,
        )?;
        self.send_empty(request).await
    }

    /// Succeeds with `204` when the CIDR is present; a `404` error means it is not.
    pub async fn check_vpn_gateway_connection_local_cidr(
        &self,
        options: &CheckVpnGatewayConnectionLocalCidrOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = cidr_request(
            ApiRequest::get("check_vpn_gateway_connection_local_cidr", LOCAL_CIDR_PATH),
            options,
        )?;
        self.send_empty(request).await
    }

    pub async fn remove_vpn_gateway_connection_local_cidr(
        &self,
        options: &RemoveVpnGatewayConnectionLocalCidrOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = cidr_request(
            ApiRequest::delete("remove_vpn_gateway_connection_local_cidr", LOCAL_CIDR_PATH),
            options,
        )?;
        self.send_empty(request).await
    }

    pub async fn list_vpn_gateway_connection_peer_cidrs(
        &self,
        options: &ListVpnGatewayConnectionPeerCidrsOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnectionPeerCidrs>> {
        let request = connection_request(
            ApiRequest::get("list_vpn_gateway_connection_peer_cidrs", PEER_CIDRS_PATH),
            options,
        )?;
        self.send(request).await
    }

    pub async fn add_vpn_gateway_connection_peer_cidr(
        &self,
        options: &AddVpnGatewayConnectionPeerCidrOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = cidr_request(
            ApiRequest::put("add_vpn_gateway_connection_peer_cidr", PEER_CIDR_PATH),
            options,
        )?;
        self.send_empty(request).await
    }

    /// Succeeds with `204` when the CIDR is present; a `404` error means it is not.
    pub async fn check_vpn_gateway_connection_peer_cidr(
        &self,
        options: &CheckVpnGatewayConnectionPeerCidrOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = cidr_request(
            ApiRequest::get("check_vpn_gateway_connection_peer_cidr", PEER_CIDR_PATH),
            options,
        )?;
        self.send_empty(request).await
    }

    pub async fn remove_vpn_gateway_connection_peer_cidr(
        &self,
        options: &RemoveVpnGatewayConnectionPeerCidrOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = cidr_request(
            ApiRequest::delete("remove_vpn_gateway_connection_peer_cidr", PEER_CIDR_PATH),
            options,
        )?;
        self.send_empty(request).await
    }

    pub async fn list_ike_policies(
        &self,
        options: &ListIkePoliciesOptions,
    ) -> Result<DetailedResponse<IkePolicyCollection>> {
        let request = ApiRequest::get("list_ike_policies", "/ike_policies")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn create_ike_policy(
        &self,
        options: &CreateIkePolicyOptions,
    ) -> Result<DetailedResponse<IkePolicy>> {
        let request = ApiRequest::post(
            "create_ike_policy",
            "/ike_policies",
        )
        .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_ike_policy(
        &self,
        options: &GetIkePolicyOptions,
    ) -> Result<DetailedResponse<IkePolicy>> {
        let request =
            ApiRequest::get("get_ike_policy", "/ike_policies/{id}").path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_ike_policy(
        &self,
        options: &UpdateIkePolicyOptions,
    ) -> Result<DetailedResponse<IkePolicy>> {
        let request = ApiRequest::patch("update_ike_policy", "/ike_policies/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_ike_policy(
        &self,
        options: &DeleteIkePolicyOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_ike_policy", "/ike_policies/{id}")
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    /// Connections that use this IKE policy.
    pub async fn list_ike_policy_connections(
        &self,
        options: &ListIkePolicyConnectionsOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnectionCollection>> {
        let request = ApiRequest::get(
            "list_ike_policy_connections",
            "/ike_policies/{id}/connections",
        )
        .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn list_ipsec_policies(
        &self,
        options: &ListIpsecPoliciesOptions,
    ) -> Result<DetailedResponse<IpsecPolicyCollection>> {
        let request = ApiRequest::get("list_ipsec_policies", "/ipsec_policies")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn create_ipsec_policy(
        &self,
        options: &CreateIpsecPolicyOptions,
    ) -> Result<DetailedResponse<IpsecPolicy>> {
        let request = ApiRequest::post(
            "create_ipsec_policy",
            "/ipsec_policies",
        )
        .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_ipsec_policy(
        &self,
        options: &GetIpsecPolicyOptions,
    ) -> Result<DetailedResponse<IpsecPolicy>> {
        let request = ApiRequest::get(
            "get_ipsec_policy",
            "/ipsec_policies/{id}",
        )
        .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_ipsec_policy(
        &self,
        options: &UpdateIpsecPolicyOptions,
    ) -> Result<DetailedResponse<IpsecPolicy>> {
        let request = ApiRequest::patch("update_ipsec_policy", "/ipsec_policies/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_ipsec_policy(
        &self,
        options: &DeleteIpsecPolicyOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_ipsec_policy", "/ipsec_policies/{id}")
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    /// Connections that use this IPsec policy.
    pub async fn list_ipsec_policy_connections(
        &self,
        options: &ListIpsecPolicyConnectionsOptions,
    ) -> Result<DetailedResponse<VpnGatewayConnectionCollection>> {
        let request = ApiRequest::get(
            "list_ipsec_policy_connections",
            "/ipsec_policies/{id}/connections",
        )
        .path_param("id", &options.id)?;
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn gateway(mode: &str) -> Value {
        json!({
            "id": "0717-gw",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/vpn_gateways/0717-gw",
            "name": "my-vpn-gateway",
            "mode": mode,
            "status": "available",
            "subnet": {"id": "0717-subnet", "href": "https://us-south.iaas.cloud.ibm.com/v1/subnets/0717-subnet"},
            "members": [{"public_ip": {"address": "169.21.50.5"}, "role": "active", "status": "available"}]
        })
    }

    #[test]
    fn gateways_decode_by_mode() {
        let collection: VpnGatewayCollection = serde_json::from_value(json!({
            "vpn_gateways": [gateway("route"), gateway("policy")],
            "limit": 50
        }))
        .unwrap();

        assert!(matches!(collection.vpn_gateways[0], VpnGateway::RouteMode(_)));
        assert!(matches!(collection.vpn_gateways[1], VpnGateway::PolicyMode(_)));
        assert_eq!(collection.vpn_gateways[0].common().members[0].role, "active");
    }

    #[test]
    fn unknown_gateway_mode_is_rejected() {
        let error = polymorphic::decode::<VpnGateway>(gateway("transit")).unwrap_err();
        assert!(matches!(error, DecodeError::UnknownVariant { .. }));
    }

    #[test]
    fn policy_connection_keeps_cidrs() {
        let decoded: VpnGatewayConnection = serde_json::from_value(json!({
            "id": "a10a5771",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/vpn_gateways/0717-gw/connections/a10a5771",
            "name": "my-connection",
            "mode": "policy",
            "peer_address": "169.21.50.5",
            "status": "up",
            "local_cidrs": ["192.168.1.0/24"],
            "peer_cidrs": ["10.45.1.0/24"]
        }))
        .unwrap();

        match decoded {
            VpnGatewayConnection::PolicyMode(connection) => {
                assert_eq!(connection.peer_cidrs, vec!["10.45.1.0/24".to_string()]);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn cidr_path_is_split() {
        let options = VpnGatewayConnectionCidrOptions::new(
            "0717-gw",
            "a10a5771",
            "10.45.1.0",
            "24",
        );
        let request = cidr_request(
            ApiRequest::put("add_vpn_gateway_connection_peer_cidr", PEER_CIDR_PATH),
            &options,
        )
        .unwrap();
        assert_eq!(
            request.path,
            "/vpn_gateways/0717-gw/connections/a10a5771/peer_cidrs/10.45.1.0/24"
        );
    }

    #[test]
    fn connection_patch_can_clear_policies() {
        let patch = VpnGatewayConnectionPatch {
            ike_policy: Some(Nullable::Null),
            ..Default::default()
        };
        assert_eq!(Value::Object(patch.as_patch().unwrap()), json!({"ike_policy": null}));
    }
}
