use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::pager::collection;
use crate::common::polymorphic::{self, DecodeError, Polymorphic, unknown_variant, variant};
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::pager::pageable;
use crate::vpc::references::{Identity, ResourceGroupReference, ResourceReference};
use crate::vpc::serviceclient::VpcService;

/// The protocol a filtering rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleProtocol {
    All,
    Tcp,
    Udp,
    Icmp,
}

/// A stateless filter for the traffic of the subnets it is attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAcl {
    pub id: String,
    pub href: String,
    pub name: String,
    pub vpc: ResourceReference,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub resource_group: Option<ResourceGroupReference>,
    /// Rules in evaluation order.
    #[serde(default)]
    pub rules: Vec<NetworkAclRule>,
    #[serde(default)]
    pub subnets: Vec<ResourceReference>,
}

collection!(NetworkAclCollection, network_acls: NetworkAcl);

/// Fields shared by every network ACL rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAclRuleCommon {
    pub id: String,
    pub href: String,
    pub name: String,
    /// `allow` or `deny`.
    pub action: String,
    pub destination: String,
    /// `inbound` or `outbound`.
    pub direction: String,
    pub source: String,
    pub protocol: RuleProtocol,
    /// The rule this one is evaluated before; absent for the last rule.
    pub before: Option<ResourceReference>,
    pub created_at: Option<DateTime<Utc>>,
    pub ip_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAclRuleAll {
    #[serde(flatten)]
    pub common: NetworkAclRuleCommon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAclRuleTcpUdp {
    #[serde(flatten)]
    pub common: NetworkAclRuleCommon,
    pub port_min: i64,
    pub port_max: i64,
    pub source_port_min: i64,
    pub source_port_max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAclRuleIcmp {
    #[serde(flatten)]
    pub common: NetworkAclRuleCommon,
    /// ICMP type; absent means all types.
    #[serde(rename = "type")]
    pub icmp_type: Option<i64>,
    /// ICMP code; absent means all codes.
    pub code: Option<i64>,
}

/// A network ACL rule, selected by `protocol`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NetworkAclRule {
    All(NetworkAclRuleAll),
    TcpUdp(NetworkAclRuleTcpUdp),
    Icmp(NetworkAclRuleIcmp),
}

impl NetworkAclRule {
    pub fn common(&self) -> &NetworkAclRuleCommon {
        match self {
            NetworkAclRule::All(rule) => &rule.common,
            NetworkAclRule::TcpUdp(rule) => &rule.common,
            NetworkAclRule::Icmp(rule) => &rule.common,
        }
    }
}

impl Polymorphic for NetworkAclRule {
    const TYPE_NAME: &'static str = "NetworkAclRule";
    const DISCRIMINATOR: &'static str = "protocol";

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "all" => variant(value).map(NetworkAclRule::All),
            "tcp" | "udp" => variant(value).map(NetworkAclRule::TcpUdp),
            "icmp" => variant(value).map(NetworkAclRule::Icmp),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

impl<'de> Deserialize<'de> for NetworkAclRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        polymorphic::deserialize(deserializer)
    }
}

collection!(NetworkAclRuleCollection, rules: NetworkAclRule);

#[derive(Debug, Clone, Serialize)]
pub struct NetworkAclRulePrototype {
    pub action: String,
    pub direction: String,
    pub source: String,
    pub destination: String,
    pub protocol: RuleProtocol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_port_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_port_max: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub icmp_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

impl NetworkAclRulePrototype {
    pub fn new(
        protocol: RuleProtocol,
        action: impl Into<String>,
        direction: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            direction: direction.into(),
            source: source.into(),
            destination: destination.into(),
            protocol,
            before: None,
            ip_version: None,
            name: None,
            port_min: None,
            port_max: None,
            source_port_min: None,
            source_port_max: None,
            icmp_type: None,
            code: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_before(mut self, before: Identity) -> Self {
        self.before = Some(before);
        self
    }

    /// Destination port range (TCP and UDP).
    pub fn with_ports(mut self, port_min: i64, port_max: i64) -> Self {
        self.port_min = Some(port_min);
        self.port_max = Some(port_max);
        self
    }

    /// Source port range (TCP and UDP).
    pub fn with_source_ports(mut self, source_port_min: i64, source_port_max: i64) -> Self {
        self.source_port_min = Some(source_port_min);
        self.source_port_max = Some(source_port_max);
        self
    }

    pub fn with_icmp(mut self, icmp_type: i64, code: Option<i64>) -> Self {
        self.icmp_type = Some(icmp_type);
        self.code = code;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkAclRulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<RuleProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_port_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_port_min: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub icmp_type: Option<i64>,
}

impl AsPatch for NetworkAclRulePatch {}

/// Request body for a network ACL, either with its own rules or copying another ACL's.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkAclPrototype {
    pub vpc: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<NetworkAclRulePrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_network_acl: Option<Identity>,
}

impl NetworkAclPrototype {
    pub fn new(vpc: Identity) -> Self {
        Self {
            vpc,
            name: None,
            resource_group: None,
            rules: None,
            source_network_acl: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rules(mut self, rules: Vec<NetworkAclRulePrototype>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_source_network_acl(mut self, source: Identity) -> Self {
        self.source_network_acl = Some(source);
        self
    }

    pub fn with_resource_group(mut self, resource_group: Identity) -> Self {
        self.resource_group = Some(resource_group);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkAclPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for NetworkAclPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListNetworkAclsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
}

impl ListNetworkAclsOptions {
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

pageable!(ListNetworkAclsOptions, NetworkAclCollection, list_network_acls);

#[derive(Debug, Clone)]
pub struct CreateNetworkAclOptions {
    pub prototype: NetworkAclPrototype,
}

impl CreateNetworkAclOptions {
    pub fn new(prototype: NetworkAclPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct NetworkAclIdOptions {
    pub id: String,
}

impl NetworkAclIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetNetworkAclOptions = NetworkAclIdOptions;
pub type DeleteNetworkAclOptions = NetworkAclIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateNetworkAclOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateNetworkAclOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListNetworkAclRulesOptions {
    pub network_acl_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub direction: Option<String>,
}

impl ListNetworkAclRulesOptions {
    pub fn new(network_acl_id: impl Into<String>) -> Self {
        Self {
            network_acl_id: network_acl_id.into(),
            start: None,
            limit: None,
            direction: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }
}

pageable!(ListNetworkAclRulesOptions, NetworkAclRuleCollection, list_network_acl_rules);

#[derive(Debug, Clone)]
pub struct CreateNetworkAclRuleOptions {
    pub network_acl_id: String,
    pub prototype: NetworkAclRulePrototype,
}

impl CreateNetworkAclRuleOptions {
    pub fn new(network_acl_id: impl Into<String>, prototype: NetworkAclRulePrototype) -> Self {
        Self {
            network_acl_id: network_acl_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NetworkAclRuleOptions {
    pub network_acl_id: String,
    pub id: String,
}

impl NetworkAclRuleOptions {
    pub fn new(network_acl_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            network_acl_id: network_acl_id.into(),
            id: id.into(),
        }
    }
}

pub type GetNetworkAclRuleOptions = NetworkAclRuleOptions;
pub type DeleteNetworkAclRuleOptions = NetworkAclRuleOptions;

#[derive(Debug, Clone)]
pub struct UpdateNetworkAclRuleOptions {
    pub network_acl_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateNetworkAclRuleOptions {
    pub fn new(
        network_acl_id: impl Into<String>,
        id: impl Into<String>,
        patch: MergePatch,
    ) -> Self {
        Self {
            network_acl_id: network_acl_id.into(),
            id: id.into(),
            patch,
        }
    }
}

const RULE_PATH: &str = "/network_acls/{network_acl_id}/rules/{id}";

impl VpcService {
    pub async fn list_network_acls(
        &self,
        options: &ListNetworkAclsOptions,
    ) -> Result<DetailedResponse<NetworkAclCollection>> {
        let request = ApiRequest::get("list_network_acls", "/network_acls")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("resource_group.id", options.resource_group_id.as_deref());
        self.send(request).await
    }

    pub async fn create_network_acl(
        &self,
        options: &CreateNetworkAclOptions,
    ) -> Result<DetailedResponse<NetworkAcl>> {
        let request = ApiRequest::post(
            "create_network_acl",
            "/network_acls",
        )
        .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_network_acl(
        &self,
        options: &GetNetworkAclOptions,
    ) -> Result<DetailedResponse<NetworkAcl>> {
        let request =
            ApiRequest::get("get_network_acl", "/network_acls/{id}").path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_network_acl(
        &self,
        options: &UpdateNetworkAclOptions,
    ) -> Result<DetailedResponse<NetworkAcl>> {
        let request = ApiRequest::patch("update_network_acl", "/network_acls/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Delete a network ACL. It must not be the VPC default or attached to any subnet.
    pub async fn delete_network_acl(
        &self,
        options: &DeleteNetworkAclOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_network_acl", "/network_acls/{id}")
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_network_acl_rules(
        &self,
        options: &ListNetworkAclRulesOptions,
    ) -> Result<DetailedResponse<NetworkAclRuleCollection>> {
        let request = ApiRequest::get(
            "list_network_acl_rules",
            "/network_acls/{network_acl_id}/rules",
        )
        .path_param("network_acl_id", &options.network_acl_id)?
        .query_opt("start", options.start.as_deref())
        .query_opt("limit", options.limit)
        .query_opt("direction", options.direction.as_deref());
        self.send(request).await
    }

    pub async fn create_network_acl_rule(
        &self,
        options: &CreateNetworkAclRuleOptions,
    ) -> Result<DetailedResponse<NetworkAclRule>> {
        let request =
            ApiRequest::post("create_network_acl_rule", "/network_acls/{network_acl_id}/rules")
                .path_param("network_acl_id", &options.network_acl_id)?
                .json(&options.prototype)?;
        self.send_polymorphic(request).await
    }

    pub async fn get_network_acl_rule(
        &self,
        options: &GetNetworkAclRuleOptions,
    ) -> Result<DetailedResponse<NetworkAclRule>> {
        let request = ApiRequest::get("get_network_acl_rule", RULE_PATH)
            .path_param("network_acl_id", &options.network_acl_id)?
            .path_param("id", &options.id)?;
        self.send_polymorphic(request).await
    }

    pub async fn update_network_acl_rule(
        &self,
        options: &UpdateNetworkAclRuleOptions,
    ) -> Result<DetailedResponse<NetworkAclRule>> {
        let request = ApiRequest::patch("update_network_acl_rule", RULE_PATH)
            .path_param("network_acl_id", &options.network_acl_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send_polymorphic(request).await
    }

    pub async fn delete_network_acl_rule(
        &self,
        options: &DeleteNetworkAclRuleOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_network_acl_rule", RULE_PATH)
            .path_param("network_acl_id", &options.network_acl_id)?
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rule(protocol: &str, extra: Value) -> Value {
        let mut rule = json!({
            "id": "r006-rule",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/network_acls/r006-acl/rules/r006-rule",
            "name": "my-rule",
            "action": "allow",
            "destination": "0.0.0.0/0",
            "direction": "inbound",
            "source": "10.0.0.0/8",
            "ip_version": "ipv4",
            "protocol": protocol
        });
        if let (Some(rule), Some(extra)) = (rule.as_object_mut(), extra.as_object()) {
            rule.extend(extra.clone());
        }
        rule
    }

    #[test]
    fn udp_rule_exposes_ports() {
        let decoded: NetworkAclRule = serde_json::from_value(rule(
            "udp",
            json!({"port_min": 53, "port_max": 53, "source_port_min": 1, "source_port_max": 65535}),
        ))
        .unwrap();

        match decoded {
            NetworkAclRule::TcpUdp(rule) => {
                assert_eq!(rule.port_min, 53);
                assert_eq!(rule.port_max, 53);
                assert_eq!(rule.common.protocol, RuleProtocol::Udp);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn icmp_rule_exposes_type_and_code() {
        let decoded: NetworkAclRule =
            serde_json::from_value(rule("icmp", json!({"type": 8, "code": 0}))).unwrap();

        match decoded {
            NetworkAclRule::Icmp(rule) => {
                assert_eq!(rule.icmp_type, Some(8));
                assert_eq!(rule.code, Some(0));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn all_rule_has_no_ports() {
        let decoded: NetworkAclRule = serde_json::from_value(rule("all", json!({}))).unwrap();
        assert!(matches!(decoded, NetworkAclRule::All(_)));
        assert_eq!(decoded.common().name, "my-rule");
    }

    #[test]
    fn tcp_prototype_with_ports() {
        let prototype = NetworkAclRulePrototype::new(
            RuleProtocol::Tcp,
            "allow",
            "inbound",
            "0.0.0.0/0",
            "0.0.0.0/0",
        )
                .with_ports(22, 22);
        let body = serde_json::to_value(prototype).unwrap();
        assert_eq!(body["protocol"], "tcp");
        assert_eq!(body["port_min"], 22);
        assert!(body.get("type").is_none());
    }
}
