//! Load balancers and their listeners, policies, rules, pools and members.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
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
    Identity, ProfileValue, ReservedIpReference, ResourceGroupReference, ResourceReference,
};
use crate::vpc::serviceclient::VpcService;
use crate::vpc::vpcs::IpAddress;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub id: String,
    pub href: String,
    pub name: String,
    pub is_public: bool,
    /// `active`, `create_pending`, `delete_pending`, `failed`, `maintenance_pending`,
    /// `migrate_pending` or `update_pending`.
    pub provisioning_status: String,
    /// `offline` or `online`.
    pub operating_status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub hostname: Option<String>,
    pub profile: Option<LoadBalancerProfileReference>,
    pub resource_group: Option<ResourceGroupReference>,
    pub route_mode: Option<bool>,
    pub security_groups_supported: Option<bool>,
    pub udp_supported: Option<bool>,
    #[serde(default)]
    pub listeners: Vec<ResourceReference>,
    #[serde(default)]
    pub pools: Vec<ResourceReference>,
    #[serde(default)]
    pub private_ips: Vec<ReservedIpReference>,
    #[serde(default)]
    pub public_ips: Vec<IpAddress>,
    #[serde(default)]
    pub security_groups: Vec<ResourceReference>,
    #[serde(default)]
    pub subnets: Vec<ResourceReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerProfileReference {
    pub name: String,
    pub href: String,
    /// `application` or `network`.
    pub family: Option<String>,
}

collection!(LoadBalancerCollection, load_balancers: LoadBalancer);

/// Traffic counters for the last minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerStatistics {
    pub active_connections: i64,
    /// Connections per second.
    pub connection_rate: Decimal,
    /// Megabytes processed this month.
    pub data_processed_this_month: i64,
    /// Megabits per second.
    pub throughput: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerProfile {
    pub name: String,
    pub href: String,
    pub family: String,
    pub route_mode_supported: Option<ProfileValue<bool>>,
    pub security_groups_supported: Option<ProfileValue<bool>>,
    pub udp_supported: Option<ProfileValue<bool>>,
}

collection!(LoadBalancerProfileCollection, profiles: LoadBalancerProfile);

/// A listener created together with its load balancer.
#[derive(Debug, Clone, Serialize)]
pub struct LoadBalancerListenerPrototypeLoadBalancerContext {
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_proxy_protocol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_limit: Option<i64>,
    /// A pool of the same prototype, identified by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_pool: Option<Identity>,
}

impl LoadBalancerListenerPrototypeLoadBalancerContext {
    pub fn new(protocol: impl Into<String>, port: i64) -> Self {
        Self {
            protocol: protocol.into(),
            port: Some(port),
            port_min: None,
            port_max: None,
            accept_proxy_protocol: None,
            connection_limit: None,
            default_pool: None,
        }
    }

    pub fn with_default_pool(mut self, pool_name: impl Into<String>) -> Self {
        self.default_pool = Some(Identity::name(pool_name));
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadBalancerPrototype {
    pub is_public: bool,
    pub subnets: Vec<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listeners: Option<Vec<LoadBalancerListenerPrototypeLoadBalancerContext>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pools: Option<Vec<LoadBalancerPoolPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<Identity>>,
}

impl LoadBalancerPrototype {
    pub fn new(is_public: bool, subnets: Vec<Identity>) -> Self {
        Self {
            is_public,
            subnets,
            name: None,
            listeners: None,
            pools: None,
            profile: None,
            resource_group: None,
            route_mode: None,
            security_groups: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_listeners(
        mut self,
        listeners: Vec<LoadBalancerListenerPrototypeLoadBalancerContext>,
    ) -> Self {
        self.listeners = Some(listeners);
        self
    }

    pub fn with_pools(mut self, pools: Vec<LoadBalancerPoolPrototype>) -> Self {
        self.pools = Some(pools);
        self
    }

    pub fn with_profile(mut self, profile: Identity) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_security_groups(mut self, security_groups: Vec<Identity>) -> Self {
        self.security_groups = Some(security_groups);
        self
    }

    pub fn with_resource_group(mut self, resource_group: Identity) -> Self {
        self.resource_group = Some(resource_group);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadBalancerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<Identity>>,
}

impl AsPatch for LoadBalancerPatch {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInstanceReference {
    pub crn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListenerHttpsRedirect {
    pub http_status_code: i64,
    pub listener: ResourceReference,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListener {
    pub id: String,
    pub href: String,
    /// `http`, `https`, `tcp` or `udp`.
    pub protocol: String,
    pub provisioning_status: String,
    pub port: Option<i64>,
    pub port_min: Option<i64>,
    pub port_max: Option<i64>,
    pub accept_proxy_protocol: Option<bool>,
    pub certificate_instance: Option<CertificateInstanceReference>,
    pub connection_limit: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub default_pool: Option<ResourceReference>,
    pub https_redirect: Option<LoadBalancerListenerHttpsRedirect>,
    pub idle_connection_timeout: Option<i64>,
    #[serde(default)]
    pub policies: Vec<ResourceReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancerListenerCollection {
    pub listeners: Vec<LoadBalancerListener>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadBalancerListenerHttpsRedirectPrototype {
    pub http_status_code: i64,
    pub listener: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadBalancerListenerPrototype {
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_proxy_protocol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_instance: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_pool: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_redirect: Option<LoadBalancerListenerHttpsRedirectPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_connection_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies: Option<Vec<LoadBalancerListenerPolicyPrototype>>,
}

impl LoadBalancerListenerPrototype {
    pub fn new(protocol: impl Into<String>, port: i64) -> Self {
        Self::with_protocol(protocol, Some(port))
    }

    /// A listener on a port range (network load balancers in route mode).
    pub fn port_range(protocol: impl Into<String>, port_min: i64, port_max: i64) -> Self {
        Self {
            port_min: Some(port_min),
            port_max: Some(port_max),
            ..Self::with_protocol(protocol, None)
        }
    }

    fn with_protocol(protocol: impl Into<String>, port: Option<i64>) -> Self {
        Self {
            protocol: protocol.into(),
            port,
            port_min: None,
            port_max: None,
            accept_proxy_protocol: None,
            certificate_instance: None,
            connection_limit: None,
            default_pool: None,
            https_redirect: None,
            idle_connection_timeout: None,
            policies: None,
        }
    }

    pub fn with_default_pool(mut self, pool: Identity) -> Self {
        self.default_pool = Some(pool);
        self
    }

    pub fn with_certificate_instance(mut self, crn: impl Into<String>) -> Self {
        self.certificate_instance = Some(Identity::crn(crn));
        self
    }

    pub fn with_https_redirect(
        mut self,
        redirect: LoadBalancerListenerHttpsRedirectPrototype,
    ) -> Self {
        self.https_redirect = Some(redirect);
        self
    }

    pub fn with_connection_limit(mut self, connection_limit: i64) -> Self {
        self.connection_limit = Some(connection_limit);
        self
    }

    pub fn with_policies(mut self, policies: Vec<LoadBalancerListenerPolicyPrototype>) -> Self {
        self.policies = Some(policies);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadBalancerListenerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_proxy_protocol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_instance: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_pool: Option<Nullable<Identity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_redirect: Option<Nullable<LoadBalancerListenerHttpsRedirectPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_connection_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl AsPatch for LoadBalancerListenerPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListenerPolicyRedirectUrl {
    pub http_status_code: i64,
    pub url: String,
}

/// Where a policy sends matching requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoadBalancerListenerPolicyTarget {
    Pool(ResourceReference),
    Redirect(LoadBalancerListenerPolicyRedirectUrl),
    HttpsRedirect(LoadBalancerListenerHttpsRedirect),
}

impl Polymorphic for LoadBalancerListenerPolicyTarget {
    const TYPE_NAME: &'static str = "LoadBalancerListenerPolicyTarget";
    const DISCRIMINATOR: &'static str = "href";

    fn discriminant(value: &Value) -> Option<&str> {
        if value.get("listener").is_some() {
            Some("https_redirect")
        } else if value.get("url").is_some() {
            Some("redirect")
        } else if value.get("href").is_some() {
            Some("pool")
        } else {
            None
        }
    }

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "pool" => variant(value).map(LoadBalancerListenerPolicyTarget::Pool),
            "redirect" => variant(value).map(LoadBalancerListenerPolicyTarget::Redirect),
            "https_redirect" => variant(value).map(LoadBalancerListenerPolicyTarget::HttpsRedirect),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

fn deserialize_policy_target<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<LoadBalancerListenerPolicyTarget>, D::Error> {
    polymorphic::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListenerPolicy {
    pub id: String,
    pub href: String,
    pub name: String,
    /// `forward`, `redirect`, `reject` or `https_redirect`.
    pub action: String,
    pub priority: i64,
    pub provisioning_status: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rules: Vec<ResourceReference>,
    /// Absent for `reject` policies.
    #[serde(default, deserialize_with = "deserialize_policy_target")]
    pub target: Option<LoadBalancerListenerPolicyTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancerListenerPolicyCollection {
    pub policies: Vec<LoadBalancerListenerPolicy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoadBalancerListenerPolicyTargetPrototype {
    Pool(Identity),
    Redirect {
        http_status_code: i64,
        url: String,
    },
    HttpsRedirect(LoadBalancerListenerHttpsRedirectPrototype),
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadBalancerListenerPolicyPrototype {
    pub action: String,
    pub priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<LoadBalancerListenerPolicyRulePrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<LoadBalancerListenerPolicyTargetPrototype>,
}

impl LoadBalancerListenerPolicyPrototype {
    pub fn new(action: impl Into<String>, priority: i64) -> Self {
        Self {
            action: action.into(),
            priority,
            name: None,
            rules: None,
            target: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rules(mut self, rules: Vec<LoadBalancerListenerPolicyRulePrototype>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_target(mut self, target: LoadBalancerListenerPolicyTargetPrototype) -> Self {
        self.target = Some(target);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadBalancerListenerPolicyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<LoadBalancerListenerPolicyTargetPrototype>,
}

impl AsPatch for LoadBalancerListenerPolicyPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerListenerPolicyRule {
    pub id: String,
    pub href: String,
    /// `contains`, `equals` or `matches_regex`.
    pub condition: String,
    /// `body`, `header`, `hostname`, `path` or `query`.
    #[serde(rename = "type")]
    pub rule_type: String,
    pub value: String,
    pub provisioning_status: String,
    pub field: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancerListenerPolicyRuleCollection {
    pub rules: Vec<LoadBalancerListenerPolicyRule>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadBalancerListenerPolicyRulePrototype {
    pub condition: String,
    #[serde(rename = "type")]
    pub rule_type: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl LoadBalancerListenerPolicyRulePrototype {
    pub fn new(
        condition: impl Into<String>,
        rule_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            condition: condition.into(),
            rule_type: rule_type.into(),
            value: value.into(),
            field: None,
        }
    }

    /// Header or body field name the rule inspects.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadBalancerListenerPolicyRulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl AsPatch for LoadBalancerListenerPolicyRulePatch {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerPoolHealthMonitor {
    pub delay: i64,
    pub max_retries: i64,
    pub timeout: i64,
    /// `http`, `https` or `tcp`.
    #[serde(rename = "type")]
    pub monitor_type: String,
    pub port: Option<i64>,
    pub url_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerPoolSessionPersistence {
    /// `app_cookie`, `http_cookie` or `source_ip`.
    #[serde(rename = "type")]
    pub persistence_type: String,
    pub cookie_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerPool {
    pub id: String,
    pub href: String,
    pub name: String,
    /// `least_connections`, `round_robin` or `weighted_round_robin`.
    pub algorithm: String,
    pub protocol: String,
    pub health_monitor: LoadBalancerPoolHealthMonitor,
    pub provisioning_status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub instance_group: Option<ResourceReference>,
    #[serde(default)]
    pub members: Vec<ResourceReference>,
    pub proxy_protocol: Option<String>,
    pub session_persistence: Option<LoadBalancerPoolSessionPersistence>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancerPoolCollection {
    pub pools: Vec<LoadBalancerPool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadBalancerPoolHealthMonitorPrototype {
    pub delay: i64,
    pub max_retries: i64,
    pub timeout: i64,
    #[serde(rename = "type")]
    pub monitor_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
}

impl LoadBalancerPoolHealthMonitorPrototype {
    pub fn new(
        monitor_type: impl Into<String>,
        delay: i64,
        max_retries: i64,
        timeout: i64,
    ) -> Self {
        Self {
            delay,
            max_retries,
            timeout,
            monitor_type: monitor_type.into(),
            port: None,
            url_path: None,
        }
    }

    pub fn with_url_path(mut self, url_path: impl Into<String>) -> Self {
        self.url_path = Some(url_path.into());
        self
    }

    pub fn with_port(mut self, port: i64) -> Self {
        self.port = Some(port);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadBalancerPoolSessionPersistencePrototype {
    #[serde(rename = "type")]
    pub persistence_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
}

impl LoadBalancerPoolSessionPersistencePrototype {
    pub fn new(persistence_type: impl Into<String>) -> Self {
        Self {
            persistence_type: persistence_type.into(),
            cookie_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadBalancerPoolPrototype {
    pub algorithm: String,
    pub protocol: String,
    pub health_monitor: LoadBalancerPoolHealthMonitorPrototype,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<LoadBalancerPoolMemberPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_persistence: Option<LoadBalancerPoolSessionPersistencePrototype>,
}

impl LoadBalancerPoolPrototype {
    pub fn new(
        algorithm: impl Into<String>,
        protocol: impl Into<String>,
        health_monitor: LoadBalancerPoolHealthMonitorPrototype,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            protocol: protocol.into(),
            health_monitor,
            name: None,
            members: None,
            proxy_protocol: None,
            session_persistence: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_members(mut self, members: Vec<LoadBalancerPoolMemberPrototype>) -> Self {
        self.members = Some(members);
        self
    }

    pub fn with_session_persistence(
        mut self,
        persistence: LoadBalancerPoolSessionPersistencePrototype,
    ) -> Self {
        self.session_persistence = Some(persistence);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadBalancerPoolHealthMonitorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub monitor_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<Nullable<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadBalancerPoolPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_monitor: Option<LoadBalancerPoolHealthMonitorPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_protocol: Option<String>,
    /// `Some(Nullable::Null)` removes session persistence from the pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_persistence: Option<Nullable<LoadBalancerPoolSessionPersistencePrototype>>,
}

impl AsPatch for LoadBalancerPoolPatch {}

/// The backend of a pool member: an IP address or an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerPoolMemberTarget {
    pub address: Option<String>,
    pub id: Option<String>,
    pub crn: Option<String>,
    pub href: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerPoolMember {
    pub id: String,
    pub href: String,
    pub port: i64,
    pub target: LoadBalancerPoolMemberTarget,
    /// `faulted`, `ok` or `unknown`.
    pub health: String,
    pub provisioning_status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub weight: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancerPoolMemberCollection {
    pub members: Vec<LoadBalancerPoolMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoadBalancerPoolMemberTargetPrototype {
    Ip { address: String },
    Instance(Identity),
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadBalancerPoolMemberPrototype {
    pub port: i64,
    pub target: LoadBalancerPoolMemberTargetPrototype,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

impl LoadBalancerPoolMemberPrototype {
    pub fn new(port: i64, target: LoadBalancerPoolMemberTargetPrototype) -> Self {
        Self {
            port,
            target,
            weight: None,
        }
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadBalancerPoolMemberPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<LoadBalancerPoolMemberTargetPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

impl AsPatch for LoadBalancerPoolMemberPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListLoadBalancersOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListLoadBalancersOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pageable!(ListLoadBalancersOptions, LoadBalancerCollection, list_load_balancers);

#[derive(Debug, Clone)]
pub struct CreateLoadBalancerOptions {
    pub prototype: LoadBalancerPrototype,
}

impl CreateLoadBalancerOptions {
    pub fn new(prototype: LoadBalancerPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct LoadBalancerIdOptions {
    pub id: String,
}

impl LoadBalancerIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetLoadBalancerOptions = LoadBalancerIdOptions;
pub type GetLoadBalancerStatisticsOptions = LoadBalancerIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateLoadBalancerOptions {
    pub id: String,
    pub patch: MergePatch,
    pub if_match: Option<String>,
}

impl UpdateLoadBalancerOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
            if_match: None,
        }
    }

    pub fn with_if_match(mut self, etag: impl Into<String>) -> Self {
        self.if_match = Some(etag.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct DeleteLoadBalancerOptions {
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteLoadBalancerOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            if_match: None,
        }
    }

    pub fn with_if_match(mut self, etag: impl Into<String>) -> Self {
        self.if_match = Some(etag.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListLoadBalancerProfilesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListLoadBalancerProfilesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pageable!(
    ListLoadBalancerProfilesOptions,
    LoadBalancerProfileCollection,
    list_load_balancer_profiles
);

#[derive(Debug, Clone)]
pub struct GetLoadBalancerProfileOptions {
    pub name: String,
}

impl GetLoadBalancerProfileOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Addresses the listeners or pools of one load balancer.
#[derive(Debug, Clone)]
pub struct LoadBalancerChildrenOptions {
    pub load_balancer_id: String,
}

impl LoadBalancerChildrenOptions {
    pub fn new(load_balancer_id: impl Into<String>) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
        }
    }
}

pub type ListLoadBalancerListenersOptions = LoadBalancerChildrenOptions;
pub type ListLoadBalancerPoolsOptions = LoadBalancerChildrenOptions;

/// Addresses one listener or pool.
#[derive(Debug, Clone)]
pub struct LoadBalancerChildOptions {
    pub load_balancer_id: String,
    pub id: String,
}

impl LoadBalancerChildOptions {
    pub fn new(load_balancer_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            id: id.into(),
        }
    }
}

pub type GetLoadBalancerListenerOptions = LoadBalancerChildOptions;
pub type DeleteLoadBalancerListenerOptions = LoadBalancerChildOptions;
pub type GetLoadBalancerPoolOptions = LoadBalancerChildOptions;
pub type DeleteLoadBalancerPoolOptions = LoadBalancerChildOptions;

#[derive(Debug, Clone)]
pub struct UpdateLoadBalancerChildOptions {
    pub load_balancer_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateLoadBalancerChildOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        id: impl Into<String>,
        patch: MergePatch,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            id: id.into(),
            patch,
        }
    }
}

pub type UpdateLoadBalancerListenerOptions = UpdateLoadBalancerChildOptions;
pub type UpdateLoadBalancerPoolOptions = UpdateLoadBalancerChildOptions;

#[derive(Debug, Clone)]
pub struct CreateLoadBalancerListenerOptions {
    pub load_balancer_id: String,
    pub prototype: LoadBalancerListenerPrototype,
}

impl CreateLoadBalancerListenerOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        prototype: LoadBalancerListenerPrototype,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListLoadBalancerListenerPoliciesOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
}

impl ListLoadBalancerListenerPoliciesOptions {
    pub fn new(load_balancer_id: impl Into<String>, listener_id: impl Into<String>) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLoadBalancerListenerPolicyOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub prototype: LoadBalancerListenerPolicyPrototype,
}

impl CreateLoadBalancerListenerPolicyOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        listener_id: impl Into<String>,
        prototype: LoadBalancerListenerPolicyPrototype,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadBalancerListenerPolicyOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub id: String,
}

impl LoadBalancerListenerPolicyOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        listener_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
            id: id.into(),
        }
    }
}

pub type GetLoadBalancerListenerPolicyOptions = LoadBalancerListenerPolicyOptions;
pub type DeleteLoadBalancerListenerPolicyOptions = LoadBalancerListenerPolicyOptions;

#[derive(Debug, Clone)]
pub struct UpdateLoadBalancerListenerPolicyOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateLoadBalancerListenerPolicyOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        listener_id: impl Into<String>,
        id: impl Into<String>,
        patch: MergePatch,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListLoadBalancerListenerPolicyRulesOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub policy_id: String,
}

impl ListLoadBalancerListenerPolicyRulesOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        listener_id: impl Into<String>,
        policy_id: impl Into<String>,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
            policy_id: policy_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLoadBalancerListenerPolicyRuleOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub policy_id: String,
    pub prototype: LoadBalancerListenerPolicyRulePrototype,
}

impl CreateLoadBalancerListenerPolicyRuleOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        listener_id: impl Into<String>,
        policy_id: impl Into<String>,
        prototype: LoadBalancerListenerPolicyRulePrototype,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
            policy_id: policy_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadBalancerListenerPolicyRuleOptions {
    pub load_balancer_id: String,
    pub listener_id: String,
    pub policy_id: String,
    pub id: String,
}

impl LoadBalancerListenerPolicyRuleOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        listener_id: impl Into<String>,
        policy_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            listener_id: listener_id.into(),
            policy_id: policy_id.into(),
            id: id.into(),
        }
    }
}

pub type GetLoadBalancerListenerPolicyRuleOptions = LoadBalancerListenerPolicyRuleOptions;
pub type DeleteLoadBalancerListenerPolicyRuleOptions = LoadBalancerListenerPolicyRuleOptions;

#[derive(Debug, Clone)]
pub struct UpdateLoadBalancerListenerPolicyRuleOptions {
    pub rule: LoadBalancerListenerPolicyRuleOptions,
    pub patch: MergePatch,
}

impl UpdateLoadBalancerListenerPolicyRuleOptions {
    pub fn new(rule: LoadBalancerListenerPolicyRuleOptions, patch: MergePatch) -> Self {
        Self { rule, patch }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLoadBalancerPoolOptions {
    pub load_balancer_id: String,
    pub prototype: LoadBalancerPoolPrototype,
}

impl CreateLoadBalancerPoolOptions {
    pub fn new(load_balancer_id: impl Into<String>, prototype: LoadBalancerPoolPrototype) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListLoadBalancerPoolMembersOptions {
    pub load_balancer_id: String,
    pub pool_id: String,
}

impl ListLoadBalancerPoolMembersOptions {
    pub fn new(load_balancer_id: impl Into<String>, pool_id: impl Into<String>) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            pool_id: pool_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLoadBalancerPoolMemberOptions {
    pub load_balancer_id: String,
    pub pool_id: String,
    pub prototype: LoadBalancerPoolMemberPrototype,
}

impl CreateLoadBalancerPoolMemberOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        pool_id: impl Into<String>,
        prototype: LoadBalancerPoolMemberPrototype,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            pool_id: pool_id.into(),
            prototype,
        }
    }
}

/// Replaces the full member set of a pool.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaceLoadBalancerPoolMembersOptions {
    #[serde(skip)]
    pub load_balancer_id: String,
    #[serde(skip)]
    pub pool_id: String,
    pub members: Vec<LoadBalancerPoolMemberPrototype>,
}

impl ReplaceLoadBalancerPoolMembersOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        pool_id: impl Into<String>,
        members: Vec<LoadBalancerPoolMemberPrototype>,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            pool_id: pool_id.into(),
            members,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadBalancerPoolMemberOptions {
    pub load_balancer_id: String,
    pub pool_id: String,
    pub id: String,
}

impl LoadBalancerPoolMemberOptions {
    pub fn new(
        load_balancer_id: impl Into<String>,
        pool_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            load_balancer_id: load_balancer_id.into(),
            pool_id: pool_id.into(),
            id: id.into(),
        }
    }
}

pub type GetLoadBalancerPoolMemberOptions = LoadBalancerPoolMemberOptions;
pub type DeleteLoadBalancerPoolMemberOptions = LoadBalancerPoolMemberOptions;

#[derive(Debug, Clone)]
pub struct UpdateLoadBalancerPoolMemberOptions {
    pub member: LoadBalancerPoolMemberOptions,
    pub patch: MergePatch,
}

impl UpdateLoadBalancerPoolMemberOptions {
    pub fn new(member: LoadBalancerPoolMemberOptions, patch: MergePatch) -> Self {
        Self { member, patch }
    }
}

const LISTENERS_PATH: &str = "/load_balancers/{load_balancer_id}/listeners";
const LISTENER_PATH: &str = "/load_balancers/{load_balancer_id}/listeners/{id}";
const POLICIES_PATH: &str = "/load_balancers/{load_balancer_id}/listeners/{listener_id}/policies";
const POLICY_PATH: &str =
    "/load_balancers/{load_balancer_id}/listeners/{listener_id}/policies/{id}";
const RULES_PATH: &str =
    "/load_balancers/{load_balancer_id}/listeners/{listener_id}/policies/{policy_id}/rules";
const RULE_PATH: &str =
    "/load_balancers/{load_balancer_id}/listeners/{listener_id}/policies/{policy_id}/rules/{id}";
const POOLS_PATH: &str = "/load_balancers/{load_balancer_id}/pools";
const POOL_PATH: &str = "/load_balancers/{load_balancer_id}/pools/{id}";
const MEMBERS_PATH: &str = "/load_balancers/{load_balancer_id}/pools/{pool_id}/members";
const MEMBER_PATH: &str = "/load_balancers/{load_balancer_id}/pools/{pool_id}/members/{id}";

fn rule_request(
    request: ApiRequest,
    options: &LoadBalancerListenerPolicyRuleOptions,
) -> Result<ApiRequest> {
    request
        .path_param("load_balancer_id", &options.load_balancer_id)?
        .path_param("listener_id", &options.listener_id)?
        .path_param("policy_id", &options.policy_id)?
        .path_param("id", &options.id)
}

fn member_request(
    request: ApiRequest,
    options: &LoadBalancerPoolMemberOptions,
) -> Result<ApiRequest> {
    request
        .path_param("load_balancer_id", &options.load_balancer_id)?
        .path_param("pool_id", &options.pool_id)?
        .path_param("id", &options.id)
}

impl VpcService {
    pub async fn list_load_balancers(
        &self,
        options: &ListLoadBalancersOptions,
    ) -> Result<DetailedResponse<LoadBalancerCollection>> {
        let request = ApiRequest::get("list_load_balancers", "/load_balancers")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn create_load_balancer(
        &self,
        options: &CreateLoadBalancerOptions,
    ) -> Result<DetailedResponse<LoadBalancer>> {
        let request =
            ApiRequest::post("create_load_balancer", "/load_balancers").json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_load_balancer(
        &self,
        options: &GetLoadBalancerOptions,
    ) -> Result<DetailedResponse<LoadBalancer>> {
        let request = ApiRequest::get("get_load_balancer", "/load_balancers/{id}")
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_load_balancer(
        &self,
        options: &UpdateLoadBalancerOptions,
    ) -> Result<DetailedResponse<LoadBalancer>> {
        let request = ApiRequest::patch("update_load_balancer", "/load_balancers/{id}")
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref())
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Deletion is asynchronous; the service answers `202 Accepted`.
    pub async fn delete_load_balancer(
        &self,
        options: &DeleteLoadBalancerOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_load_balancer", "/load_balancers/{id}")
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref());
        self.send_empty(request).await
    }

    pub async fn get_load_balancer_statistics(
        &self,
        options: &GetLoadBalancerStatisticsOptions,
    ) -> Result<DetailedResponse<LoadBalancerStatistics>> {
        let request = ApiRequest::get(
            "get_load_balancer_statistics",
            "/load_balancers/{id}/statistics",
        )
        .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn list_load_balancer_profiles(
        &self,
        options: &ListLoadBalancerProfilesOptions,
    ) -> Result<DetailedResponse<LoadBalancerProfileCollection>> {
        let request = ApiRequest::get("list_load_balancer_profiles", "/load_balancer/profiles")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn get_load_balancer_profile(
        &self,
        options: &GetLoadBalancerProfileOptions,
    ) -> Result<DetailedResponse<LoadBalancerProfile>> {
        let request = ApiRequest::get("get_load_balancer_profile", "/load_balancer/profiles/{name}")
            .path_param("name", &options.name)?;
        self.send(request).await
    }

    pub async fn list_load_balancer_listeners(
        &self,
        options: &ListLoadBalancerListenersOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerCollection>> {
        let request = ApiRequest::get("list_load_balancer_listeners", LISTENERS_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?;
        self.send(request).await
    }

    pub async fn create_load_balancer_listener(
        &self,
        options: &CreateLoadBalancerListenerOptions,
    ) -> Result<DetailedResponse<LoadBalancerListener>> {
        let request = ApiRequest::post("create_load_balancer_listener", LISTENERS_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_load_balancer_listener(
        &self,
        options: &GetLoadBalancerListenerOptions,
    ) -> Result<DetailedResponse<LoadBalancerListener>> {
        let request = ApiRequest::get("get_load_balancer_listener", LISTENER_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_load_balancer_listener(
        &self,
        options: &UpdateLoadBalancerListenerOptions,
    ) -> Result<DetailedResponse<LoadBalancerListener>> {
        let request = ApiRequest::patch("update_load_balancer_listener", LISTENER_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_load_balancer_listener(
        &self,
        options: &DeleteLoadBalancerListenerOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_load_balancer_listener", LISTENER_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_load_balancer_listener_policies(
        &self,
        options: &ListLoadBalancerListenerPoliciesOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicyCollection>> {
        let request = ApiRequest::get("list_load_balancer_listener_policies", POLICIES_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("listener_id", &options.listener_id)?;
        self.send(request).await
    }

    pub async fn create_load_balancer_listener_policy(
        &self,
        options: &CreateLoadBalancerListenerPolicyOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicy>> {
        let request = ApiRequest::post("create_load_balancer_listener_policy", POLICIES_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("listener_id", &options.listener_id)?
            .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_load_balancer_listener_policy(
        &self,
        options: &GetLoadBalancerListenerPolicyOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicy>> {
        let request = ApiRequest::get("get_load_balancer_listener_policy", POLICY_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("listener_id", &options.listener_id)?
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_load_balancer_listener_policy(
        &self,
        options: &UpdateLoadBalancerListenerPolicyOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicy>> {
        let request = ApiRequest::patch("update_load_balancer_listener_policy", POLICY_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("listener_id", &options.listener_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_load_balancer_listener_policy(
        &self,
        options: &DeleteLoadBalancerListenerPolicyOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_load_balancer_listener_policy", POLICY_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("listener_id", &options.listener_id)?
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_load_balancer_listener_policy_rules(
        &self,
        options: &ListLoadBalancerListenerPolicyRulesOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicyRuleCollection>> {
        let request = ApiRequest::get("list_load_balancer_listener_policy_rules", RULES_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("listener_id", &options.listener_id)?
            .path_param("policy_id", &options.policy_id)?;
        self.send(request).await
    }

    pub async fn create_load_balancer_listener_policy_rule(
        &self,
        options: &CreateLoadBalancerListenerPolicyRuleOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicyRule>> {
        let request = ApiRequest::post("create_load_balancer_listener_policy_rule", RULES_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("listener_id", &options.listener_id)?
            .path_param("policy_id", &options.policy_id)?
            .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_load_balancer_listener_policy_rule(
        &self,
        options: &GetLoadBalancerListenerPolicyRuleOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicyRule>> {
        let request = rule_request(
            ApiRequest::get("get_load_balancer_listener_policy_rule", RULE_PATH),
            options,
        )?;
        self.send(request).await
    }

    pub async fn update_load_balancer_listener_policy_rule(
        &self,
        options: &UpdateLoadBalancerListenerPolicyRuleOptions,
    ) -> Result<DetailedResponse<LoadBalancerListenerPolicyRule>> {
        let request = rule_request(
            ApiRequest::patch("update_load_balancer_listener_policy_rule", RULE_PATH),
            &options.rule,
        )?
        .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_load_balancer_listener_policy_rule(
        &self,
        options: &DeleteLoadBalancerListenerPolicyRuleOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = rule_request(
            ApiRequest::delete("delete_load_balancer_listener_policy_rule", RULE_PATH),
            options,
        )?;
        self.send_empty(request).await
    }

    pub async fn list_load_balancer_pools(
        &self,
        options: &ListLoadBalancerPoolsOptions,
    ) -> Result<DetailedResponse<LoadBalancerPoolCollection>> {
        let request = ApiRequest::get("list_load_balancer_pools", POOLS_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?;
        self.send(request).await
    }

    pub async fn create_load_balancer_pool(
        &self,
        options: &CreateLoadBalancerPoolOptions,
    ) -> Result<DetailedResponse<LoadBalancerPool>> {
        let request = ApiRequest::post("create_load_balancer_pool", POOLS_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_load_balancer_pool(
        &self,
        options: &GetLoadBalancerPoolOptions,
    ) -> Result<DetailedResponse<LoadBalancerPool>> {
        let request = ApiRequest::get("get_load_balancer_pool", POOL_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_load_balancer_pool(
        &self,
        options: &UpdateLoadBalancerPoolOptions,
    ) -> Result<DetailedResponse<LoadBalancerPool>> {
        let request = ApiRequest::patch("update_load_balancer_pool", POOL_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_load_balancer_pool(
        &self,
        options: &DeleteLoadBalancerPoolOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_load_balancer_pool", POOL_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_load_balancer_pool_members(
        &self,
        options: &ListLoadBalancerPoolMembersOptions,
    ) -> Result<DetailedResponse<LoadBalancerPoolMemberCollection>> {
        let request = ApiRequest::get("list_load_balancer_pool_members", MEMBERS_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("pool_id", &options.pool_id)?;
        self.send(request).await
    }

    pub async fn create_load_balancer_pool_member(
        &self,
        options: &CreateLoadBalancerPoolMemberOptions,
    ) -> Result<DetailedResponse<LoadBalancerPoolMember>> {
        let request = ApiRequest::post("create_load_balancer_pool_member", MEMBERS_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("pool_id", &options.pool_id)?
            .json(&options.prototype)?;
        self.send(request).await
    }

    /// Replace every member of a pool with `options.members`.
    pub async fn replace_load_balancer_pool_members(
        &self,
        options: &ReplaceLoadBalancerPoolMembersOptions,
    ) -> Result<DetailedResponse<LoadBalancerPoolMemberCollection>> {
        let request = ApiRequest::put("replace_load_balancer_pool_members", MEMBERS_PATH)
            .path_param("load_balancer_id", &options.load_balancer_id)?
            .path_param("pool_id", &options.pool_id)?
            .json(options)?;
        self.send(request).await
    }

    pub async fn get_load_balancer_pool_member(
        &self,
        options: &GetLoadBalancerPoolMemberOptions,
    ) -> Result<DetailedResponse<LoadBalancerPoolMember>> {
        let request = member_request(
            ApiRequest::get("get_load_balancer_pool_member", MEMBER_PATH),
            options,
        )?;
        self.send(request).await
    }

    pub async fn update_load_balancer_pool_member(
        &self,
        options: &UpdateLoadBalancerPoolMemberOptions,
    ) -> Result<DetailedResponse<LoadBalancerPoolMember>> {
        let request = member_request(
            ApiRequest::patch("update_load_balancer_pool_member", MEMBER_PATH),
            &options.member,
        )?
        .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_load_balancer_pool_member(
        &self,
        options: &DeleteLoadBalancerPoolMemberOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = member_request(
            ApiRequest::delete("delete_load_balancer_pool_member", MEMBER_PATH),
            options,
        )?;
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn policy(target: Value) -> Value {
        json!({
            "id": "r006-policy",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/load_balancers/r006-lb/listeners/r006-l/policies/r006-policy",
            "name": "my-policy",
            "action": "forward",
            "priority": 5,
            "provisioning_status": "active",
            "target": target
        })
    }

    #[test]
    fn policy_target_pool() {
        let decoded: LoadBalancerListenerPolicy = serde_json::from_value(policy(json!({
            "id": "r006-pool",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/load_balancers/r006-lb/pools/r006-pool",
            "name": "my-pool"
        })))
        .unwrap();
        assert!(matches!(decoded.target, Some(LoadBalancerListenerPolicyTarget::Pool(_))));
    }

    #[test]
    fn policy_target_redirect_url() {
        let decoded: LoadBalancerListenerPolicy = serde_json::from_value(policy(json!({
            "http_status_code": 301,
            "url": "https://www.example.com"
        })))
        .unwrap();
        match decoded.target {
            Some(LoadBalancerListenerPolicyTarget::Redirect(redirect)) => {
                assert_eq!(redirect.http_status_code, 301);
            }
            other => panic!("unexpected target: {other:?}"),
        }
    }

    #[test]
    fn policy_target_https_redirect() {
        let decoded: LoadBalancerListenerPolicy = serde_json::from_value(policy(json!({
            "http_status_code": 302,
            "listener": {"id": "r006-l2", "href": "https://us-south.iaas.cloud.ibm.com/v1/load_balancers/r006-lb/listeners/r006-l2"},
            "uri": "/example"
        })))
        .unwrap();
        assert!(matches!(
            decoded.target,
            Some(LoadBalancerListenerPolicyTarget::HttpsRedirect(_))
        ));
    }

    #[test]
    fn reject_policy_has_no_target() {
        let mut body = policy(Value::Null);
        if let Some(object) = body.as_object_mut() {
            object.remove("target");
        }
        let decoded: LoadBalancerListenerPolicy = serde_json::from_value(body).unwrap();
        assert!(decoded.target.is_none());
    }

    #[test]
    fn statistics_keep_decimal_precision() {
        let stats: LoadBalancerStatistics = serde_json::from_value(json!({
            "active_connections": 797,
            "connection_rate": 91.121,
            "data_processed_this_month": 10093173145_i64,
            "throughput": 167.278
        }))
        .unwrap();
        assert_eq!(stats.connection_rate.to_string(), "91.121");
        assert_eq!(stats.throughput.to_string(), "167.278");
    }

    #[test]
    fn pool_patch_clears_session_persistence() {
        let patch = LoadBalancerPoolPatch {
            name: Some("renamed".to_string()),
            session_persistence: Some(Nullable::Null),
            ..Default::default()
        };
        let body = Value::Object(patch.as_patch().unwrap());
        assert_eq!(body, json!({"name": "renamed", "session_persistence": null}));
    }

    #[test]
    fn replace_members_body_lists_members_only() {
        let options = ReplaceLoadBalancerPoolMembersOptions::new(
            "r006-lb",
            "r006-pool",
            vec![LoadBalancerPoolMemberPrototype::new(
                80,
                LoadBalancerPoolMemberTargetPrototype::Ip {
                    address: "192.168.3.4".to_string(),
                },
            )],
        );
        let body = serde_json::to_value(&options).unwrap();
        assert_eq!(
            body,
            json!({"members": [{"port": 80, "target": {"address": "192.168.3.4"}}]})
        );
    }
}
