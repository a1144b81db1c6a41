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

/// A group of instances created from one template and scaled together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroup {
    pub id: String,
    pub href: String,
    pub name: String,
    pub instance_template: ResourceReference,
    /// `deleting`, `healthy`, `scaling` or `unhealthy`.
    pub status: String,
    pub application_port: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub load_balancer_pool: Option<ResourceReference>,
    #[serde(default)]
    pub managers: Vec<ResourceReference>,
    pub membership_count: Option<i64>,
    pub resource_group: Option<ResourceGroupReference>,
    #[serde(default)]
    pub subnets: Vec<ResourceReference>,
    pub updated_at: Option<DateTime<Utc>>,
    pub vpc: Option<ResourceReference>,
}

collection!(InstanceGroupCollection, instance_groups: InstanceGroup);

#[derive(Debug, Clone, Serialize)]
pub struct InstanceGroupPrototype {
    pub instance_template: Identity,
    pub subnets: Vec<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer_pool: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl InstanceGroupPrototype {
    pub fn new(instance_template: Identity, subnets: Vec<Identity>) -> Self {
        Self {
            instance_template,
            subnets,
            application_port: None,
            load_balancer: None,
            load_balancer_pool: None,
            membership_count: None,
            name: None,
            resource_group: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_membership_count(mut self, membership_count: i64) -> Self {
        self.membership_count = Some(membership_count);
        self
    }

    /// Register members with a load balancer pool on `application_port`.
    pub fn with_load_balancer(
        mut self,
        load_balancer: Identity,
        load_balancer_pool: Identity,
        application_port: i64,
    ) -> Self {
        self.load_balancer = Some(load_balancer);
        self.load_balancer_pool = Some(load_balancer_pool);
        self.application_port = Some(application_port);
        self
    }

    pub fn with_resource_group(mut self, resource_group: Identity) -> Self {
        self.resource_group = Some(resource_group);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceGroupPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_template: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer_pool: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<Identity>>,
}

impl AsPatch for InstanceGroupPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupManagerAutoScale {
    pub id: String,
    pub href: String,
    pub name: String,
    pub management_enabled: bool,
    pub max_membership_count: i64,
    pub min_membership_count: Option<i64>,
    /// Seconds of metrics averaged per scaling decision.
    pub aggregation_window: Option<i64>,
    /// Seconds to wait between scaling actions.
    pub cooldown: Option<i64>,
    pub manager_type: String,
    #[serde(default)]
    pub policies: Vec<ResourceReference>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupManagerScheduled {
    pub id: String,
    pub href: String,
    pub name: String,
    pub management_enabled: bool,
    pub manager_type: String,
    #[serde(default)]
    pub actions: Vec<ResourceReference>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An instance group manager, selected by `manager_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InstanceGroupManager {
    AutoScale(InstanceGroupManagerAutoScale),
    Scheduled(InstanceGroupManagerScheduled),
}

impl InstanceGroupManager {
    pub fn id(&self) -> &str {
        match self {
            InstanceGroupManager::AutoScale(manager) => &manager.id,
            InstanceGroupManager::Scheduled(manager) => &manager.id,
        }
    }
}

impl Polymorphic for InstanceGroupManager {
    const TYPE_NAME: &'static str = "InstanceGroupManager";
    const DISCRIMINATOR: &'static str = "manager_type";

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "autoscale" => variant(value).map(InstanceGroupManager::AutoScale),
            "scheduled" => variant(value).map(InstanceGroupManager::Scheduled),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

impl<'de> Deserialize<'de> for InstanceGroupManager {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        polymorphic::deserialize(deserializer)
    }
}

collection!(InstanceGroupManagerCollection, managers: InstanceGroupManager);

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "manager_type", rename_all = "snake_case")]
pub enum InstanceGroupManagerPrototype {
    #[serde(rename = "autoscale")]
    AutoScale {
        max_membership_count: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_membership_count: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        aggregation_window: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cooldown: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        management_enabled: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Scheduled {
        #[serde(skip_serializing_if = "Option::is_none")]
        management_enabled: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl InstanceGroupManagerPrototype {
    pub fn autoscale(max_membership_count: i64) -> Self {
        InstanceGroupManagerPrototype::AutoScale {
            max_membership_count,
            min_membership_count: None,
            aggregation_window: None,
            cooldown: None,
            management_enabled: None,
            name: None,
        }
    }

    pub fn scheduled() -> Self {
        InstanceGroupManagerPrototype::Scheduled {
            management_enabled: None,
            name: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceGroupManagerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_window: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_membership_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_membership_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for InstanceGroupManagerPatch {}

/// Scales the group to keep a metric near a target value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupManagerPolicyTarget {
    pub id: String,
    pub href: String,
    pub name: String,
    /// `cpu`, `memory`, `network_in` or `network_out`.
    pub metric_type: String,
    pub metric_value: i64,
    pub policy_type: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An autoscale manager policy, selected by `policy_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InstanceGroupManagerPolicy {
    Target(InstanceGroupManagerPolicyTarget),
}

impl Polymorphic for InstanceGroupManagerPolicy {
    const TYPE_NAME: &'static str = "InstanceGroupManagerPolicy";
    const DISCRIMINATOR: &'static str = "policy_type";

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "target" => variant(value).map(InstanceGroupManagerPolicy::Target),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

impl<'de> Deserialize<'de> for InstanceGroupManagerPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        polymorphic::deserialize(deserializer)
    }
}

collection!(InstanceGroupManagerPolicyCollection, policies: InstanceGroupManagerPolicy);

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "policy_type", rename_all = "snake_case")]
pub enum InstanceGroupManagerPolicyPrototype {
    Target {
        metric_type: String,
        metric_value: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl InstanceGroupManagerPolicyPrototype {
    pub fn target(metric_type: impl Into<String>, metric_value: i64) -> Self {
        InstanceGroupManagerPolicyPrototype::Target {
            metric_type: metric_type.into(),
            metric_value,
            name: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceGroupManagerPolicyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for InstanceGroupManagerPolicyPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroupMembership {
    pub id: String,
    pub href: String,
    pub name: String,
    pub instance: ResourceReference,
    /// `deleting`, `failed`, `healthy`, `pending` or `unhealthy`.
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub delete_instance_on_membership_delete: Option<bool>,
    pub instance_template: Option<ResourceReference>,
    pub pool_member: Option<ResourceReference>,
    pub updated_at: Option<DateTime<Utc>>,
}

collection!(InstanceGroupMembershipCollection, memberships: InstanceGroupMembership);

#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceGroupMembershipPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for InstanceGroupMembershipPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListInstanceGroupsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListInstanceGroupsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pageable!(ListInstanceGroupsOptions, InstanceGroupCollection, list_instance_groups);

#[derive(Debug, Clone)]
pub struct CreateInstanceGroupOptions {
    pub prototype: InstanceGroupPrototype,
}

impl CreateInstanceGroupOptions {
    pub fn new(prototype: InstanceGroupPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct InstanceGroupIdOptions {
    pub id: String,
}

impl InstanceGroupIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetInstanceGroupOptions = InstanceGroupIdOptions;
pub type DeleteInstanceGroupOptions = InstanceGroupIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateInstanceGroupOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateInstanceGroupOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

/// Options naming the instance group a bulk operation applies to.
#[derive(Debug, Clone)]
pub struct InstanceGroupChildrenOptions {
    pub instance_group_id: String,
}

impl InstanceGroupChildrenOptions {
    pub fn new(instance_group_id: impl Into<String>) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
        }
    }
}

pub type DeleteInstanceGroupLoadBalancerOptions = InstanceGroupChildrenOptions;
pub type DeleteInstanceGroupMembershipsOptions = InstanceGroupChildrenOptions;

#[derive(Debug, Clone)]
pub struct ListInstanceGroupManagersOptions {
    pub instance_group_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListInstanceGroupManagersOptions {
    pub fn new(instance_group_id: impl Into<String>) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
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
    ListInstanceGroupManagersOptions,
    InstanceGroupManagerCollection,
    list_instance_group_managers
);

#[derive(Debug, Clone)]
pub struct ListInstanceGroupMembershipsOptions {
    pub instance_group_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListInstanceGroupMembershipsOptions {
    pub fn new(instance_group_id: impl Into<String>) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
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
    ListInstanceGroupMembershipsOptions,
    InstanceGroupMembershipCollection,
    list_instance_group_memberships
);

#[derive(Debug, Clone)]
pub struct CreateInstanceGroupManagerOptions {
    pub instance_group_id: String,
    pub prototype: InstanceGroupManagerPrototype,
}

impl CreateInstanceGroupManagerOptions {
    pub fn new(
        instance_group_id: impl Into<String>,
        prototype: InstanceGroupManagerPrototype,
    ) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            prototype,
        }
    }
}

/// Options naming a manager or membership of an instance group.
#[derive(Debug, Clone)]
pub struct InstanceGroupChildOptions {
    pub instance_group_id: String,
    pub id: String,
}

impl InstanceGroupChildOptions {
    pub fn new(instance_group_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            id: id.into(),
        }
    }
}

pub type GetInstanceGroupManagerOptions = InstanceGroupChildOptions;
pub type DeleteInstanceGroupManagerOptions = InstanceGroupChildOptions;
pub type GetInstanceGroupMembershipOptions = InstanceGroupChildOptions;
pub type DeleteInstanceGroupMembershipOptions = InstanceGroupChildOptions;

#[derive(Debug, Clone)]
pub struct UpdateInstanceGroupChildOptions {
    pub instance_group_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateInstanceGroupChildOptions {
    pub fn new(
        instance_group_id: impl Into<String>,
        id: impl Into<String>,
        patch: MergePatch,
    ) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            id: id.into(),
            patch,
        }
    }
}

pub type UpdateInstanceGroupManagerOptions = UpdateInstanceGroupChildOptions;
pub type UpdateInstanceGroupMembershipOptions = UpdateInstanceGroupChildOptions;

#[derive(Debug, Clone)]
pub struct ListInstanceGroupManagerPoliciesOptions {
    pub instance_group_id: String,
    pub instance_group_manager_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListInstanceGroupManagerPoliciesOptions {
    pub fn new(
        instance_group_id: impl Into<String>,
        instance_group_manager_id: impl Into<String>,
    ) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            instance_group_manager_id: instance_group_manager_id.into(),
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
    ListInstanceGroupManagerPoliciesOptions,
    InstanceGroupManagerPolicyCollection,
    list_instance_group_manager_policies
);

#[derive(Debug, Clone)]
pub struct CreateInstanceGroupManagerPolicyOptions {
    pub instance_group_id: String,
    pub instance_group_manager_id: String,
    pub prototype: InstanceGroupManagerPolicyPrototype,
}

impl CreateInstanceGroupManagerPolicyOptions {
    pub fn new(
        instance_group_id: impl Into<String>,
        instance_group_manager_id: impl Into<String>,
        prototype: InstanceGroupManagerPolicyPrototype,
    ) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            instance_group_manager_id: instance_group_manager_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InstanceGroupManagerPolicyOptions {
    pub instance_group_id: String,
    pub instance_group_manager_id: String,
    pub id: String,
}

impl InstanceGroupManagerPolicyOptions {
    pub fn new(
        instance_group_id: impl Into<String>,
        instance_group_manager_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            instance_group_manager_id: instance_group_manager_id.into(),
            id: id.into(),
        }
    }
}

pub type GetInstanceGroupManagerPolicyOptions = InstanceGroupManagerPolicyOptions;
pub type DeleteInstanceGroupManagerPolicyOptions = InstanceGroupManagerPolicyOptions;

#[derive(Debug, Clone)]
pub struct UpdateInstanceGroupManagerPolicyOptions {
    pub instance_group_id: String,
    pub instance_group_manager_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateInstanceGroupManagerPolicyOptions {
    pub fn new(
        instance_group_id: impl Into<String>,
        instance_group_manager_id: impl Into<String>,
        id: impl Into<String>,
        patch: MergePatch,
    ) -> Self {
        Self {
            instance_group_id: instance_group_id.into(),
            instance_group_manager_id: instance_group_manager_id.into(),
            id: id.into(),
            patch,
        }
    }
}

const MANAGERS_PATH: &str = "/instance_groups/{instance_group_id}/managers";
const MANAGER_PATH: &str = "/instance_groups/{instance_group_id}/managers/{id}";
const POLICIES_PATH: &str =
    "/instance_groups/{instance_group_id}/managers/{instance_group_manager_id}/policies";
const POLICY_PATH: &str =
    "/instance_groups/{instance_group_id}/managers/{instance_group_manager_id}/policies/{id}";
const MEMBERSHIPS_PATH: &str = "/instance_groups/{instance_group_id}/memberships";
const MEMBERSHIP_PATH: &str = "/instance_groups/{instance_group_id}/memberships/{id}";

impl VpcService {
    pub async fn list_instance_groups(
        &self,
        options: &ListInstanceGroupsOptions,
    ) -> Result<DetailedResponse<InstanceGroupCollection>> {
        let request = ApiRequest::get("list_instance_groups", "/instance_groups")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn create_instance_group(
        &self,
        options: &CreateInstanceGroupOptions,
    ) -> Result<DetailedResponse<InstanceGroup>> {
        let request =
            ApiRequest::post("create_instance_group", "/instance_groups").json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_instance_group(
        &self,
        options: &GetInstanceGroupOptions,
    ) -> Result<DetailedResponse<InstanceGroup>> {
        let request = ApiRequest::get("get_instance_group", "/instance_groups/{id}")
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_instance_group(
        &self,
        options: &UpdateInstanceGroupOptions,
    ) -> Result<DetailedResponse<InstanceGroup>> {
        let request = ApiRequest::patch("update_instance_group", "/instance_groups/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Delete an instance group and all of its members' instances.
    pub async fn delete_instance_group(
        &self,
        options: &DeleteInstanceGroupOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_instance_group", "/instance_groups/{id}")
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    /// Detach the group from its load balancer pool.
    pub async fn delete_instance_group_load_balancer(
        &self,
        options: &DeleteInstanceGroupLoadBalancerOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete(
            "delete_instance_group_load_balancer",
            "/instance_groups/{instance_group_id}/load_balancer",
        )
        .path_param("instance_group_id", &options.instance_group_id)?;
        self.send_empty(request).await
    }

    pub async fn list_instance_group_managers(
        &self,
        options: &ListInstanceGroupManagersOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerCollection>> {
        let request = ApiRequest::get("list_instance_group_managers", MANAGERS_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn create_instance_group_manager(
        &self,
        options: &CreateInstanceGroupManagerOptions,
    ) -> Result<DetailedResponse<InstanceGroupManager>> {
        let request = ApiRequest::post("create_instance_group_manager", MANAGERS_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .json(&options.prototype)?;
        self.send_polymorphic(request).await
    }

    pub async fn get_instance_group_manager(
        &self,
        options: &GetInstanceGroupManagerOptions,
    ) -> Result<DetailedResponse<InstanceGroupManager>> {
        let request = ApiRequest::get("get_instance_group_manager", MANAGER_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .path_param("id", &options.id)?;
        self.send_polymorphic(request).await
    }

    pub async fn update_instance_group_manager(
        &self,
        options: &UpdateInstanceGroupManagerOptions,
    ) -> Result<DetailedResponse<InstanceGroupManager>> {
        let request = ApiRequest::patch("update_instance_group_manager", MANAGER_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send_polymorphic(request).await
    }

    pub async fn delete_instance_group_manager(
        &self,
        options: &DeleteInstanceGroupManagerOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_instance_group_manager", MANAGER_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_instance_group_manager_policies(
        &self,
        options: &ListInstanceGroupManagerPoliciesOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerPolicyCollection>> {
        let request = ApiRequest::get("list_instance_group_manager_policies", POLICIES_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .path_param("instance_group_manager_id", &options.instance_group_manager_id)?
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn create_instance_group_manager_policy(
        &self,
        options: &CreateInstanceGroupManagerPolicyOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerPolicy>> {
        let request = ApiRequest::post("create_instance_group_manager_policy", POLICIES_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .path_param("instance_group_manager_id", &options.instance_group_manager_id)?
            .json(&options.prototype)?;
        self.send_polymorphic(request).await
    }

    pub async fn get_instance_group_manager_policy(
        &self,
        options: &GetInstanceGroupManagerPolicyOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerPolicy>> {
        let request = ApiRequest::get("get_instance_group_manager_policy", POLICY_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .path_param("instance_group_manager_id", &options.instance_group_manager_id)?
            .path_param("id", &options.id)?;
        self.send_polymorphic(request).await
    }

    pub async fn update_instance_group_manager_policy(
        &self,
        options: &UpdateInstanceGroupManagerPolicyOptions,
    ) -> Result<DetailedResponse<InstanceGroupManagerPolicy>> {
        let request = ApiRequest::patch("update_instance_group_manager_policy", POLICY_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .path_param("instance_group_manager_id", &options.instance_group_manager_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send_polymorphic(request).await
    }

    pub async fn delete_instance_group_manager_policy(
        &self,
        options: &DeleteInstanceGroupManagerPolicyOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_instance_group_manager_policy", POLICY_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .path_param("instance_group_manager_id", &options.instance_group_manager_id)?
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_instance_group_memberships(
        &self,
        options: &ListInstanceGroupMembershipsOptions,
    ) -> Result<DetailedResponse<InstanceGroupMembershipCollection>> {
        let request = ApiRequest::get("list_instance_group_memberships", MEMBERSHIPS_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn get_instance_group_membership(
        &self,
        options: &GetInstanceGroupMembershipOptions,
    ) -> Result<DetailedResponse<InstanceGroupMembership>> {
        let request = ApiRequest::get("get_instance_group_membership", MEMBERSHIP_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_instance_group_membership(
        &self,
        options: &UpdateInstanceGroupMembershipOptions,
    ) -> Result<DetailedResponse<InstanceGroupMembership>> {
        let request = ApiRequest::patch("update_instance_group_membership", MEMBERSHIP_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Remove one member; its instance is deleted unless it opted out.
    pub async fn delete_instance_group_membership(
        &self,
        options: &DeleteInstanceGroupMembershipOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_instance_group_membership", MEMBERSHIP_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    /// Remove every member of the group.
    pub async fn delete_instance_group_memberships(
        &self,
        options: &DeleteInstanceGroupMembershipsOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_instance_group_memberships", MEMBERSHIPS_PATH)
            .path_param("instance_group_id", &options.instance_group_id)?;
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn manager_prototype_is_tagged() {
        let body = serde_json::to_value(InstanceGroupManagerPrototype::autoscale(5)).unwrap();
        assert_eq!(body, json!({"manager_type": "autoscale", "max_membership_count": 5}));

        let body = serde_json::to_value(InstanceGroupManagerPrototype::scheduled()).unwrap();
        assert_eq!(body, json!({"manager_type": "scheduled"}));
    }

    #[test]
    fn managers_decode_by_manager_type() {
        let collection: InstanceGroupManagerCollection = serde_json::from_value(json!({
            "managers": [
                {
                    "id": "m1", "href": "https://example/m1", "name": "auto",
                    "management_enabled": true, "manager_type": "autoscale",
                    "max_membership_count": 10, "policies": []
                },
                {
                    "id": "m2", "href": "https://example/m2", "name": "sched",
                    "management_enabled": false, "manager_type": "scheduled", "actions": []
                }
            ],
            "limit": 50,
            "total_count": 2
        }))
        .unwrap();

        assert!(matches!(collection.managers[0], InstanceGroupManager::AutoScale(_)));
        assert!(matches!(collection.managers[1], InstanceGroupManager::Scheduled(_)));
        assert_eq!(collection.managers[1].id(), "m2");
    }

    #[test]
    fn policy_prototype_carries_policy_type() {
        let body =
            serde_json::to_value(InstanceGroupManagerPolicyPrototype::target("cpu", 50)).unwrap();
        assert_eq!(
            body,
            json!({"policy_type": "target", "metric_type": "cpu", "metric_value": 50})
        );
    }
}
