//! Backup policies, their plans, and the jobs plans produce.
//!
//! A policy matches either volumes or instances by user tag; which one is
//! given by `match_resource_type`.

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
use crate::vpc::references::{Identity, ResourceGroupReference, ResourceReference};
use crate::vpc::serviceclient::VpcService;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPolicyCommon {
    pub id: String,
    pub href: String,
    pub name: String,
    pub match_resource_type: String,
    /// `deleting`, `failed`, `pending`, `stable`, `suspended`, `updating` or `waiting`.
    pub lifecycle_state: String,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub health_state: Option<String>,
    pub last_job_completed_at: Option<DateTime<Utc>>,
    pub resource_group: Option<ResourceGroupReference>,
    pub resource_type: Option<String>,
    #[serde(default)]
    pub match_user_tags: Vec<String>,
    #[serde(default)]
    pub plans: Vec<ResourceReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPolicyMatchVolume {
    #[serde(flatten)]
    pub common: BackupPolicyCommon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPolicyMatchInstance {
    #[serde(flatten)]
    pub common: BackupPolicyCommon,
    /// `boot_volume` and/or `data_volumes`.
    #[serde(default)]
    pub included_content: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BackupPolicy {
    Volume(BackupPolicyMatchVolume),
    Instance(BackupPolicyMatchInstance),
}

impl BackupPolicy {
    pub fn common(&self) -> &BackupPolicyCommon {
        match self {
            BackupPolicy::Volume(policy) => &policy.common,
            BackupPolicy::Instance(policy) => &policy.common,
        }
    }
}

impl Polymorphic for BackupPolicy {
    const TYPE_NAME: &'static str = "BackupPolicy";
    const DISCRIMINATOR: &'static str = "match_resource_type";

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "volume" => variant(value).map(BackupPolicy::Volume),
            "instance" => variant(value).map(BackupPolicy::Instance),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

impl<'de> Deserialize<'de> for BackupPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        polymorphic::deserialize(deserializer)
    }
}

collection!(BackupPolicyCollection, backup_policies: BackupPolicy);

#[derive(Debug, Clone, Serialize)]
pub struct BackupPolicyPrototype {
    pub match_user_tags: Vec<String>,
    pub match_resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_content: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<BackupPolicyPlanPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl BackupPolicyPrototype {
    /// A policy backing up volumes carrying any of `match_user_tags`.
    pub fn volume(match_user_tags: Vec<String>) -> Self {
        Self::matching(match_user_tags, "volume")
    }

    /// A policy backing up instances carrying any of `match_user_tags`.
    pub fn instance(match_user_tags: Vec<String>) -> Self {
        Self::matching(match_user_tags, "instance")
    }

    fn matching(match_user_tags: Vec<String>, resource_type: &str) -> Self {
        Self {
            match_user_tags,
            match_resource_type: resource_type.to_string(),
            included_content: None,
            name: None,
            plans: None,
            resource_group: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_plans(mut self, plans: Vec<BackupPolicyPlanPrototype>) -> Self {
        self.plans = Some(plans);
        self
    }

    pub fn with_included_content(mut self, included_content: Vec<String>) -> Self {
        self.included_content = Some(included_content);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BackupPolicyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_content: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_user_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for BackupPolicyPatch {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupPolicyPlanDeletionTrigger {
    /// Days to keep a backup.
    pub delete_after: i64,
    /// Keep at most this many backups.
    pub delete_over_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPolicyPlan {
    pub id: String,
    pub href: String,
    pub name: String,
    pub active: bool,
    /// Cron expression in UTC.
    pub cron_spec: String,
    pub lifecycle_state: String,
    pub copy_user_tags: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub deletion_trigger: Option<BackupPolicyPlanDeletionTrigger>,
    pub resource_type: Option<String>,
    #[serde(default)]
    pub attach_user_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupPolicyPlanCollection {
    pub plans: Vec<BackupPolicyPlan>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BackupPolicyPlanDeletionTriggerPrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_after: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_over_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BackupPolicyPlanPrototype {
    pub cron_spec: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attach_user_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_user_tags: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_trigger: Option<BackupPolicyPlanDeletionTriggerPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl BackupPolicyPlanPrototype {
    pub fn new(cron_spec: impl Into<String>) -> Self {
        Self {
            cron_spec: cron_spec.into(),
            active: None,
            attach_user_tags: None,
            copy_user_tags: None,
            deletion_trigger: None,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_attach_user_tags(mut self, tags: Vec<String>) -> Self {
        self.attach_user_tags = Some(tags);
        self
    }

    pub fn with_deletion_trigger(
        mut self,
        delete_after: i64,
        delete_over_count: Option<i64>,
    ) -> Self {
        self.deletion_trigger = Some(BackupPolicyPlanDeletionTriggerPrototype {
            delete_after: Some(delete_after),
            delete_over_count,
        });
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BackupPolicyPlanDeletionTriggerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_after: Option<i64>,
    /// `Some(Nullable::Null)` removes the count limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_over_count: Option<Nullable<i64>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BackupPolicyPlanPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attach_user_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_user_tags: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron_spec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_trigger: Option<BackupPolicyPlanDeletionTriggerPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for BackupPolicyPlanPatch {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupPolicyJobStatusReason {
    pub code: String,
    pub message: String,
    pub more_info: Option<String>,
}

/// One run of a plan: a backup or a retention deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPolicyJob {
    pub id: String,
    pub href: String,
    pub backup_policy_plan: ResourceReference,
    /// `creation` or `deletion`.
    pub job_type: String,
    /// The volume or instance the job backed up.
    pub source: ResourceReference,
    /// `failed`, `running` or `succeeded`.
    pub status: String,
    pub auto_delete: Option<bool>,
    pub auto_delete_after: Option<i64>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub resource_type: Option<String>,
    #[serde(default)]
    pub status_reasons: Vec<BackupPolicyJobStatusReason>,
    #[serde(default)]
    pub target_snapshots: Vec<ResourceReference>,
}

collection!(BackupPolicyJobCollection, jobs: BackupPolicyJob);

#[derive(Debug, Clone, Default)]
pub struct ListBackupPoliciesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub name: Option<String>,
    pub tag: Option<String>,
}

impl ListBackupPoliciesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

pageable!(ListBackupPoliciesOptions, BackupPolicyCollection, list_backup_policies);

#[derive(Debug, Clone)]
pub struct CreateBackupPolicyOptions {
    pub prototype: BackupPolicyPrototype,
}

impl CreateBackupPolicyOptions {
    pub fn new(prototype: BackupPolicyPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct GetBackupPolicyOptions {
    pub id: String,
}

impl GetBackupPolicyOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateBackupPolicyOptions {
    pub id: String,
    pub patch: MergePatch,
    pub if_match: Option<String>,
}

impl UpdateBackupPolicyOptions {
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
pub struct DeleteBackupPolicyOptions {
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteBackupPolicyOptions {
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

#[derive(Debug, Clone)]
pub struct ListBackupPolicyPlansOptions {
    pub backup_policy_id: String,
    pub name: Option<String>,
}

impl ListBackupPolicyPlansOptions {
    pub fn new(backup_policy_id: impl Into<String>) -> Self {
        Self {
            backup_policy_id: backup_policy_id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct CreateBackupPolicyPlanOptions {
    pub backup_policy_id: String,
    pub prototype: BackupPolicyPlanPrototype,
}

impl CreateBackupPolicyPlanOptions {
    pub fn new(backup_policy_id: impl Into<String>, prototype: BackupPolicyPlanPrototype) -> Self {
        Self {
            backup_policy_id: backup_policy_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetBackupPolicyPlanOptions {
    pub backup_policy_id: String,
    pub id: String,
}

impl GetBackupPolicyPlanOptions {
    pub fn new(backup_policy_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            backup_policy_id: backup_policy_id.into(),
            id: id.into(),
        }
    }
}

pub type GetBackupPolicyJobOptions = GetBackupPolicyPlanOptions;

#[derive(Debug, Clone)]
pub struct UpdateBackupPolicyPlanOptions {
    pub backup_policy_id: String,
    pub id: String,
    pub patch: MergePatch,
    pub if_match: Option<String>,
}

impl UpdateBackupPolicyPlanOptions {
    pub fn new(
        backup_policy_id: impl Into<String>,
        id: impl Into<String>,
        patch: MergePatch,
    ) -> Self {
        Self {
            backup_policy_id: backup_policy_id.into(),
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
pub struct DeleteBackupPolicyPlanOptions {
    pub backup_policy_id: String,
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteBackupPolicyPlanOptions {
    pub fn new(backup_policy_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            backup_policy_id: backup_policy_id.into(),
            id: id.into(),
            if_match: None,
        }
    }

    pub fn with_if_match(mut self, etag: impl Into<String>) -> Self {
        self.if_match = Some(etag.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct ListBackupPolicyJobsOptions {
    pub backup_policy_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub backup_policy_plan_id: Option<String>,
    pub sort: Option<String>,
    pub source_id: Option<String>,
    pub target_snapshots_id: Option<String>,
    pub target_snapshots_crn: Option<String>,
}

impl ListBackupPolicyJobsOptions {
    pub fn new(backup_policy_id: impl Into<String>) -> Self {
        Self {
            backup_policy_id: backup_policy_id.into(),
            start: None,
            limit: None,
            status: None,
            backup_policy_plan_id: None,
            sort: None,
            source_id: None,
            target_snapshots_id: None,
            target_snapshots_crn: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_backup_policy_plan_id(mut self, plan_id: impl Into<String>) -> Self {
        self.backup_policy_plan_id = Some(plan_id.into());
        self
    }

    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

pageable!(ListBackupPolicyJobsOptions, BackupPolicyJobCollection, list_backup_policy_jobs);

const PLANS_PATH: &str = "/backup_policies/{backup_policy_id}/plans";
const PLAN_PATH: &str = "/backup_policies/{backup_policy_id}/plans/{id}";

impl VpcService {
    pub async fn list_backup_policies(
        &self,
        options: &ListBackupPoliciesOptions,
    ) -> Result<DetailedResponse<BackupPolicyCollection>> {
        let request = ApiRequest::get("list_backup_policies", "/backup_policies")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("resource_group.id", options.resource_group_id.as_deref())
            .query_opt("name", options.name.as_deref())
            .query_opt("tag", options.tag.as_deref());
        self.send(request).await
    }

    pub async fn create_backup_policy(
        &self,
        options: &CreateBackupPolicyOptions,
    ) -> Result<DetailedResponse<BackupPolicy>> {
        let request =
            ApiRequest::post("create_backup_policy", "/backup_policies").json(&options.prototype)?;
        self.send_polymorphic(request).await
    }

    pub async fn get_backup_policy(
        &self,
        options: &GetBackupPolicyOptions,
    ) -> Result<DetailedResponse<BackupPolicy>> {
        let request = ApiRequest::get("get_backup_policy", "/backup_policies/{id}")
            .path_param("id", &options.id)?;
        self.send_polymorphic(request).await
    }

    pub async fn update_backup_policy(
        &self,
        options: &UpdateBackupPolicyOptions,
    ) -> Result<DetailedResponse<BackupPolicy>> {
        let request = ApiRequest::patch("update_backup_policy", "/backup_policies/{id}")
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref())
            .merge_patch(&options.patch);
        self.send_polymorphic(request).await
    }

    /// Delete a policy and its plans. The response carries the policy in its `deleting` state.
    pub async fn delete_backup_policy(
        &self,
        options: &DeleteBackupPolicyOptions,
    ) -> Result<DetailedResponse<BackupPolicy>> {
        let request = ApiRequest::delete("delete_backup_policy", "/backup_policies/{id}")
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref());
        self.send_polymorphic(request).await
    }

    pub async fn list_backup_policy_plans(
        &self,
        options: &ListBackupPolicyPlansOptions,
    ) -> Result<DetailedResponse<BackupPolicyPlanCollection>> {
        let request = ApiRequest::get("list_backup_policy_plans", PLANS_PATH)
            .path_param("backup_policy_id", &options.backup_policy_id)?
            .query_opt("name", options.name.as_deref());
        self.send(request).await
    }

    pub async fn create_backup_policy_plan(
        &self,
        options: &CreateBackupPolicyPlanOptions,
    ) -> Result<DetailedResponse<BackupPolicyPlan>> {
        let request = ApiRequest::post("create_backup_policy_plan", PLANS_PATH)
            .path_param("backup_policy_id", &options.backup_policy_id)?
            .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_backup_policy_plan(
        &self,
        options: &GetBackupPolicyPlanOptions,
    ) -> Result<DetailedResponse<BackupPolicyPlan>> {
        let request = ApiRequest::get("get_backup_policy_plan", PLAN_PATH)
            .path_param("backup_policy_id", &options.backup_policy_id)?
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_backup_policy_plan(
        &self,
        options: &UpdateBackupPolicyPlanOptions,
    ) -> Result<DetailedResponse<BackupPolicyPlan>> {
        let request = ApiRequest::patch("update_backup_policy_plan", PLAN_PATH)
            .path_param("backup_policy_id", &options.backup_policy_id)?
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref())
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_backup_policy_plan(
        &self,
        options: &DeleteBackupPolicyPlanOptions,
    ) -> Result<DetailedResponse<BackupPolicyPlan>> {
        let request = ApiRequest::delete("delete_backup_policy_plan", PLAN_PATH)
            .path_param("backup_policy_id", &options.backup_policy_id)?
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref());
        self.send(request).await
    }

    pub async fn list_backup_policy_jobs(
        &self,
        options: &ListBackupPolicyJobsOptions,
    ) -> Result<DetailedResponse<BackupPolicyJobCollection>> {
        let request = ApiRequest::get(
            "list_backup_policy_jobs",
            "/backup_policies/{backup_policy_id}/jobs",
        )
        .path_param("backup_policy_id", &options.backup_policy_id)?
        .query_opt("status", options.status.as_deref())
        .query_opt("backup_policy_plan.id", options.backup_policy_plan_id.as_deref())
        .query_opt("start", options.start.as_deref())
        .query_opt("limit", options.limit)
        .query_opt("sort", options.sort.as_deref())
        .query_opt("source.id", options.source_id.as_deref())
        .query_opt("target_snapshots[].id", options.target_snapshots_id.as_deref())
        .query_opt("target_snapshots[].crn", options.target_snapshots_crn.as_deref());
        self.send(request).await
    }

    pub async fn get_backup_policy_job(
        &self,
        options: &GetBackupPolicyJobOptions,
    ) -> Result<DetailedResponse<BackupPolicyJob>> {
        let request = ApiRequest::get(
            "get_backup_policy_job",
            "/backup_policies/{backup_policy_id}/jobs/{id}",
        )
        .path_param("backup_policy_id", &options.backup_policy_id)?
        .path_param("id", &options.id)?;
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn policy(match_resource_type: &str) -> Value {
        json!({
            "id": "r134-policy",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/backup_policies/r134-policy",
            "name": "my-backup-policy",
            "match_resource_type": match_resource_type,
            "lifecycle_state": "stable",
            "match_user_tags": ["my-daily-backup-policy"],
            "included_content": ["boot_volume", "data_volumes"]
        })
    }

    #[test]
    fn instance_policy_keeps_included_content() {
        let decoded: BackupPolicy = serde_json::from_value(policy("instance")).unwrap();
        match decoded {
            BackupPolicy::Instance(policy) => {
                assert_eq!(policy.included_content.len(), 2);
                assert_eq!(
                    policy.common.match_user_tags,
                    vec!["my-daily-backup-policy".to_string()]
                );
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn volume_policy() {
        let decoded: BackupPolicy = serde_json::from_value(policy("volume")).unwrap();
        assert!(matches!(decoded, BackupPolicy::Volume(_)));
        assert_eq!(decoded.common().lifecycle_state, "stable");
    }

    #[test]
    fn share_policy_is_unknown() {
        assert!(serde_json::from_value::<BackupPolicy>(policy("share")).is_err());
    }

    #[test]
    fn plan_patch_can_drop_count_limit() {
        let patch = BackupPolicyPlanPatch {
            deletion_trigger: Some(BackupPolicyPlanDeletionTriggerPatch {
                delete_after: Some(20),
                delete_over_count: Some(Nullable::Null),
            }),
            ..Default::default()
        };
        assert_eq!(
            Value::Object(patch.as_patch().unwrap()),
            json!({"deletion_trigger": {"delete_after": 20, "delete_over_count": null}})
        );
    }
}
