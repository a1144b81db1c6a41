use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::pager::collection;
use crate::common::polymorphic::{self, DecodeError, Polymorphic, unknown_variant, variant};
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::network_acls::RuleProtocol;
use crate::vpc::pager::pageable;
use crate::vpc::references::{Identity, ResourceGroupReference, ResourceReference};
use crate::vpc::serviceclient::VpcService;

/// A stateful filter for the traffic of its targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub id: String,
    pub href: String,
    pub name: String,
    pub vpc: ResourceReference,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub resource_group: Option<ResourceGroupReference>,
    #[serde(default)]
    pub rules: Vec<SecurityGroupRule>,
    #[serde(default)]
    pub targets: Vec<SecurityGroupTarget>,
}

collection!(SecurityGroupCollection, security_groups: SecurityGroup);

/// Where matching traffic comes from (inbound) or goes to (outbound).
///
/// Exactly one of `address`, `cidr_block` or the security group reference
/// fields is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroupRuleRemote {
    pub address: Option<String>,
    pub cidr_block: Option<String>,
    pub id: Option<String>,
    pub crn: Option<String>,
    pub href: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroupRuleCommon {
    pub id: String,
    pub href: String,
    /// `inbound` or `outbound`.
    pub direction: String,
    pub protocol: RuleProtocol,
    pub ip_version: Option<String>,
    pub remote: Option<SecurityGroupRuleRemote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroupRuleAll {
    #[serde(flatten)]
    pub common: SecurityGroupRuleCommon,
}

/// A TCP or UDP rule. Without a port range the rule matches every port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroupRuleTcpUdp {
    #[serde(flatten)]
    pub common: SecurityGroupRuleCommon,
    pub port_min: Option<i64>,
    pub port_max: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroupRuleIcmp {
    #[serde(flatten)]
    pub common: SecurityGroupRuleCommon,
    #[serde(rename = "type")]
    pub icmp_type: Option<i64>,
    pub code: Option<i64>,
}

/// A security group rule, selected by `protocol`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SecurityGroupRule {
    All(SecurityGroupRuleAll),
    TcpUdp(SecurityGroupRuleTcpUdp),
    Icmp(SecurityGroupRuleIcmp),
}

impl SecurityGroupRule {
    pub fn common(&self) -> &SecurityGroupRuleCommon {
        match self {
            SecurityGroupRule::All(rule) => &rule.common,
            SecurityGroupRule::TcpUdp(rule) => &rule.common,
            SecurityGroupRule::Icmp(rule) => &rule.common,
        }
    }
}

impl Polymorphic for SecurityGroupRule {
    const TYPE_NAME: &'static str = "SecurityGroupRule";
    const DISCRIMINATOR: &'static str = "protocol";

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "all" => variant(value).map(SecurityGroupRule::All),
            "tcp" | "udp" => variant(value).map(SecurityGroupRule::TcpUdp),
            "icmp" => variant(value).map(SecurityGroupRule::Icmp),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

impl<'de> Deserialize<'de> for SecurityGroupRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        polymorphic::deserialize(deserializer)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityGroupRuleCollection {
    pub rules: Vec<SecurityGroupRule>,
}

/// A resource a security group is bound to, selected by `resource_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SecurityGroupTarget {
    NetworkInterface(ResourceReference),
    BareMetalServerNetworkInterface(ResourceReference),
    LoadBalancer(ResourceReference),
    EndpointGateway(ResourceReference),
    VpnServer(ResourceReference),
}

impl SecurityGroupTarget {
    pub fn reference(&self) -> &ResourceReference {
        match self {
            SecurityGroupTarget::NetworkInterface(target)
            | SecurityGroupTarget::BareMetalServerNetworkInterface(target)
            | SecurityGroupTarget::LoadBalancer(target)
            | SecurityGroupTarget::EndpointGateway(target)
            | SecurityGroupTarget::VpnServer(target) => target,
        }
    }
}

impl Polymorphic for SecurityGroupTarget {
    const TYPE_NAME: &'static str = "SecurityGroupTarget";
    const DISCRIMINATOR: &'static str = "resource_type";

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "network_interface" => variant(value).map(SecurityGroupTarget::NetworkInterface),
            "bare_metal_server_network_interface" => {
                variant(value).map(SecurityGroupTarget::BareMetalServerNetworkInterface)
            }
            "load_balancer" => variant(value).map(SecurityGroupTarget::LoadBalancer),
            "endpoint_gateway" => variant(value).map(SecurityGroupTarget::EndpointGateway),
            "vpn_server" => variant(value).map(SecurityGroupTarget::VpnServer),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

impl<'de> Deserialize<'de> for SecurityGroupTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        polymorphic::deserialize(deserializer)
    }
}

collection!(SecurityGroupTargetCollection, targets: SecurityGroupTarget);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SecurityGroupRuleRemotePrototype {
    Ip { address: String },
    Cidr { cidr_block: String },
    SecurityGroup(Identity),
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityGroupRulePrototype {
    pub direction: String,
    pub protocol: RuleProtocol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<SecurityGroupRuleRemotePrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_max: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub icmp_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

impl SecurityGroupRulePrototype {
    pub fn new(protocol: RuleProtocol, direction: impl Into<String>) -> Self {
        Self {
            direction: direction.into(),
            protocol,
            ip_version: None,
            remote: None,
            port_min: None,
            port_max: None,
            icmp_type: None,
            code: None,
        }
    }

    pub fn with_remote(mut self, remote: SecurityGroupRuleRemotePrototype) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_ports(mut self, port_min: i64, port_max: i64) -> Self {
        self.port_min = Some(port_min);
        self.port_max = Some(port_max);
        self
    }

    pub fn with_icmp(mut self, icmp_type: i64, code: Option<i64>) -> Self {
        self.icmp_type = Some(icmp_type);
        self.code = code;
        self
    }

    pub fn with_ip_version(mut self, ip_version: impl Into<String>) -> Self {
        self.ip_version = Some(ip_version.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SecurityGroupRulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<SecurityGroupRuleRemotePrototype>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub icmp_type: Option<i64>,
}

impl AsPatch for SecurityGroupRulePatch {}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityGroupPrototype {
    pub vpc: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<SecurityGroupRulePrototype>>,
}

impl SecurityGroupPrototype {
    pub fn new(vpc: Identity) -> Self {
        Self {
            vpc,
            name: None,
            resource_group: None,
            rules: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rules(mut self, rules: Vec<SecurityGroupRulePrototype>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_resource_group(mut self, resource_group: Identity) -> Self {
        self.resource_group = Some(resource_group);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SecurityGroupPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for SecurityGroupPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListSecurityGroupsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub vpc_id: Option<String>,
    pub vpc_crn: Option<String>,
    pub vpc_name: Option<String>,
}

impl ListSecurityGroupsOptions {
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

    pub fn with_vpc_id(mut self, vpc_id: impl Into<String>) -> Self {
        self.vpc_id = Some(vpc_id.into());
        self
    }

    pub fn with_vpc_name(mut self, vpc_name: impl Into<String>) -> Self {
        self.vpc_name = Some(vpc_name.into());
        self
    }
}

pageable!(ListSecurityGroupsOptions, SecurityGroupCollection, list_security_groups);

#[derive(Debug, Clone)]
pub struct CreateSecurityGroupOptions {
    pub prototype: SecurityGroupPrototype,
}

impl CreateSecurityGroupOptions {
    pub fn new(prototype: SecurityGroupPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct SecurityGroupIdOptions {
    pub id: String,
}

impl SecurityGroupIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetSecurityGroupOptions = SecurityGroupIdOptions;
pub type DeleteSecurityGroupOptions = SecurityGroupIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateSecurityGroupOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateSecurityGroupOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListSecurityGroupRulesOptions {
    pub security_group_id: String,
}

impl ListSecurityGroupRulesOptions {
    pub fn new(security_group_id: impl Into<String>) -> Self {
        Self {
            security_group_id: security_group_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateSecurityGroupRuleOptions {
    pub security_group_id: String,
    pub prototype: SecurityGroupRulePrototype,
}

impl CreateSecurityGroupRuleOptions {
    pub fn new(
        security_group_id: impl Into<String>,
        prototype: SecurityGroupRulePrototype,
    ) -> Self {
        Self {
            security_group_id: security_group_id.into(),
            prototype,
        }
    }
}

/// Addresses one child (rule or target) of a security group.
#[derive(Debug, Clone)]
pub struct SecurityGroupChildOptions {
    pub security_group_id: String,
    pub id: String,
}

impl SecurityGroupChildOptions {
    pub fn new(security_group_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            security_group_id: security_group_id.into(),
            id: id.into(),
        }
    }
}

pub type GetSecurityGroupRuleOptions = SecurityGroupChildOptions;
pub type DeleteSecurityGroupRuleOptions = SecurityGroupChildOptions;
pub type GetSecurityGroupTargetOptions = SecurityGroupChildOptions;
pub type CreateSecurityGroupTargetBindingOptions = SecurityGroupChildOptions;
pub type DeleteSecurityGroupTargetBindingOptions = SecurityGroupChildOptions;

#[derive(Debug, Clone)]
pub struct UpdateSecurityGroupRuleOptions {
    pub security_group_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateSecurityGroupRuleOptions {
    pub fn new(
        security_group_id: impl Into<String>,
        id: impl Into<String>,
        patch: MergePatch,
    ) -> Self {
        Self {
            security_group_id: security_group_id.into(),
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListSecurityGroupTargetsOptions {
    pub security_group_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListSecurityGroupTargetsOptions {
    pub fn new(security_group_id: impl Into<String>) -> Self {
        Self {
            security_group_id: security_group_id.into(),
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
    ListSecurityGroupTargetsOptions,
    SecurityGroupTargetCollection,
    list_security_group_targets
);

const RULE_PATH: &str = "/security_groups/{security_group_id}/rules/{id}";
const TARGET_PATH: &str = "/security_groups/{security_group_id}/targets/{id}";

impl VpcService {
    pub async fn list_security_groups(
        &self,
        options: &ListSecurityGroupsOptions,
    ) -> Result<DetailedResponse<SecurityGroupCollection>> {
        let request = ApiRequest::get("list_security_groups", "/security_groups")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("resource_group.id", options.resource_group_id.as_deref())
            .query_opt("vpc.id", options.vpc_id.as_deref())
            .query_opt("vpc.crn", options.vpc_crn.as_deref())
            .query_opt("vpc.name", options.vpc_name.as_deref());
        self.send(request).await
    }

    pub async fn create_security_group(
        &self,
        options: &CreateSecurityGroupOptions,
    ) -> Result<DetailedResponse<SecurityGroup>> {
        let request =
            ApiRequest::post("create_security_group", "/security_groups").json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_security_group(
        &self,
        options: &GetSecurityGroupOptions,
    ) -> Result<DetailedResponse<SecurityGroup>> {
        let request = ApiRequest::get("get_security_group", "/security_groups/{id}")
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_security_group(
        &self,
        options: &UpdateSecurityGroupOptions,
    ) -> Result<DetailedResponse<SecurityGroup>> {
        let request = ApiRequest::patch("update_security_group", "/security_groups/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_security_group(
        &self,
        options: &DeleteSecurityGroupOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_security_group", "/security_groups/{id}")
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_security_group_rules(
        &self,
        options: &ListSecurityGroupRulesOptions,
    ) -> Result<DetailedResponse<SecurityGroupRuleCollection>> {
        let request = ApiRequest::get(
            "list_security_group_rules",
            "/security_groups/{security_group_id}/rules",
        )
                .path_param("security_group_id", &options.security_group_id)?;
        self.send(request).await
    }

    pub async fn create_security_group_rule(
        &self,
        options: &CreateSecurityGroupRuleOptions,
    ) -> Result<DetailedResponse<SecurityGroupRule>> {
        let request = ApiRequest::post(
            "create_security_group_rule",
            "/security_groups/{security_group_id}/rules",
        )
        .path_param("security_group_id", &options.security_group_id)?
        .json(&options.prototype)?;
        self.send_polymorphic(request).await
    }

    pub async fn get_security_group_rule(
        &self,
        options: &GetSecurityGroupRuleOptions,
    ) -> Result<DetailedResponse<SecurityGroupRule>> {
        let request = ApiRequest::get("get_security_group_rule", RULE_PATH)
            .path_param("security_group_id", &options.security_group_id)?
            .path_param("id", &options.id)?;
        self.send_polymorphic(request).await
    }

    pub async fn update_security_group_rule(
        &self,
        options: &UpdateSecurityGroupRuleOptions,
    ) -> Result<DetailedResponse<SecurityGroupRule>> {
        let request = ApiRequest::patch("update_security_group_rule", RULE_PATH)
            .path_param("security_group_id", &options.security_group_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send_polymorphic(request).await
    }

    pub async fn delete_security_group_rule(
        &self,
        options: &DeleteSecurityGroupRuleOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_security_group_rule", RULE_PATH)
            .path_param("security_group_id", &options.security_group_id)?
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_security_group_targets(
        &self,
        options: &ListSecurityGroupTargetsOptions,
    ) -> Result<DetailedResponse<SecurityGroupTargetCollection>> {
        let request = ApiRequest::get(
            "list_security_group_targets",
            "/security_groups/{security_group_id}/targets",
        )
        .path_param("security_group_id", &options.security_group_id)?
        .query_opt("start", options.start.as_deref())
        .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn get_security_group_target(
        &self,
        options: &GetSecurityGroupTargetOptions,
    ) -> Result<DetailedResponse<SecurityGroupTarget>> {
        let request = ApiRequest::get("get_security_group_target", TARGET_PATH)
            .path_param("security_group_id", &options.security_group_id)?
            .path_param("id", &options.id)?;
        self.send_polymorphic(request).await
    }

    /// Bind the security group to the target with id `options.id`.
    pub async fn create_security_group_target_binding(
        &self,
        options: &CreateSecurityGroupTargetBindingOptions,
    ) -> Result<DetailedResponse<SecurityGroupTarget>> {
        let request = ApiRequest::put("create_security_group_target_binding", TARGET_PATH)
            .path_param("security_group_id", &options.security_group_id)?
            .path_param("id", &options.id)?;
        self.send_polymorphic(request).await
    }

    pub async fn delete_security_group_target_binding(
        &self,
        options: &DeleteSecurityGroupTargetBindingOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_security_group_target_binding", TARGET_PATH)
            .path_param("security_group_id", &options.security_group_id)?
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn tcp_rule_with_cidr_remote() {
        let decoded: SecurityGroupRule = serde_json::from_value(json!({
            "id": "r006-rule",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/security_groups/r006-sg/rules/r006-rule",
            "direction": "inbound",
            "ip_version": "ipv4",
            "protocol": "tcp",
            "port_min": 443,
            "port_max": 443,
            "remote": {"cidr_block": "192.168.3.0/24"}
        }))
        .unwrap();

        match decoded {
            SecurityGroupRule::TcpUdp(rule) => {
                assert_eq!(rule.port_min, Some(443));
                let remote = rule.common.remote.unwrap();
                assert_eq!(remote.cidr_block.as_deref(), Some("192.168.3.0/24"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn targets_are_selected_by_resource_type() {
        let collection: SecurityGroupTargetCollection = serde_json::from_value(json!({
            "targets": [
                {"id": "0717-nic", "href": "https://example/nic", "name": "eth0", "resource_type": "network_interface"},
                {"id": "r006-lb", "href": "https://example/lb", "name": "my-lb", "resource_type": "load_balancer"}
            ],
            "limit": 50
        }))
        .unwrap();

        assert!(matches!(collection.targets[0], SecurityGroupTarget::NetworkInterface(_)));
        assert!(matches!(collection.targets[1], SecurityGroupTarget::LoadBalancer(_)));
        assert_eq!(collection.targets[1].reference().name.as_deref(), Some("my-lb"));
    }

    #[test]
    fn unknown_target_type_fails() {
        let result = serde_json::from_value::<SecurityGroupTarget>(json!({
            "id": "x", "href": "https://example/x", "resource_type": "private_path_service_gateway"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn remote_prototype_shapes() {
        let rule = SecurityGroupRulePrototype::new(RuleProtocol::Icmp, "inbound")
            .with_remote(SecurityGroupRuleRemotePrototype::SecurityGroup(Identity::id(
                "r006-other",
            )))
            .with_icmp(8, None);
        let body = serde_json::to_value(rule).unwrap();
        assert_eq!(body["remote"], json!({"id": "r006-other"}));
        assert_eq!(body["type"], 8);
        assert!(body.get("code").is_none());
    }
}
