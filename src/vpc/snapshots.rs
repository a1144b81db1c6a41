use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::pager::collection;
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::{Error, Result};
use crate::vpc::pager::pageable;
use crate::vpc::references::{Identity, ResourceGroupReference, ResourceReference};
use crate::vpc::serviceclient::VpcService;

/// A point-in-time copy of a volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub href: String,
    pub name: String,
    pub source_volume: ResourceReference,
    /// `deleting`, `failed`, `pending`, `stable`, `updating`, `waiting` or `suspended`.
    pub lifecycle_state: String,
    pub backup_policy_plan: Option<ResourceReference>,
    pub bootable: Option<bool>,
    pub captured_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub deletable: Option<bool>,
    pub encryption: Option<String>,
    pub encryption_key: Option<ResourceReference>,
    /// Minimum capacity of a volume restored from this snapshot, in gigabytes.
    pub minimum_capacity: Option<i64>,
    pub operating_system: Option<ResourceReference>,
    pub resource_group: Option<ResourceGroupReference>,
    pub resource_type: Option<String>,
    /// Size in gigabytes.
    pub size: Option<i64>,
    pub source_image: Option<ResourceReference>,
    #[serde(default)]
    pub user_tags: Vec<String>,
}

collection!(SnapshotCollection, snapshots: Snapshot);

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotPrototype {
    pub source_volume: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_tags: Option<Vec<String>>,
}

impl SnapshotPrototype {
    pub fn new(source_volume: Identity) -> Self {
        Self {
            source_volume,
            name: None,
            resource_group: None,
            user_tags: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_user_tags(mut self, user_tags: Vec<String>) -> Self {
        self.user_tags = Some(user_tags);
        self
    }

    pub fn with_resource_group(mut self, resource_group: Identity) -> Self {
        self.resource_group = Some(resource_group);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SnapshotPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_tags: Option<Vec<String>>,
}

impl AsPatch for SnapshotPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListSnapshotsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub tag: Option<String>,
    pub resource_group_id: Option<String>,
    pub name: Option<String>,
    pub source_volume_id: Option<String>,
    pub source_volume_crn: Option<String>,
    pub source_image_id: Option<String>,
    pub source_image_crn: Option<String>,
    pub backup_policy_plan_id: Option<String>,
    pub sort: Option<String>,
}

impl ListSnapshotsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_source_volume_id(mut self, source_volume_id: impl Into<String>) -> Self {
        self.source_volume_id = Some(source_volume_id.into());
        self
    }

    pub fn with_backup_policy_plan_id(mut self, plan_id: impl Into<String>) -> Self {
        self.backup_policy_plan_id = Some(plan_id.into());
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

pageable!(ListSnapshotsOptions, SnapshotCollection, list_snapshots);

#[derive(Debug, Clone)]
pub struct CreateSnapshotOptions {
    pub prototype: SnapshotPrototype,
}

impl CreateSnapshotOptions {
    pub fn new(prototype: SnapshotPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct GetSnapshotOptions {
    pub id: String,
}

impl GetSnapshotOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateSnapshotOptions {
    pub id: String,
    pub patch: MergePatch,
    pub if_match: Option<String>,
}

impl UpdateSnapshotOptions {
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
pub struct DeleteSnapshotOptions {
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteSnapshotOptions {
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

/// Deletes every snapshot of one source volume.
#[derive(Debug, Clone)]
pub struct DeleteSnapshotsOptions {
    pub source_volume_id: String,
}

impl DeleteSnapshotsOptions {
    pub fn new(source_volume_id: impl Into<String>) -> Self {
        Self {
            source_volume_id: source_volume_id.into(),
        }
    }
}

impl VpcService {
    pub async fn list_snapshots(
        &self,
        options: &ListSnapshotsOptions,
    ) -> Result<DetailedResponse<SnapshotCollection>> {
        let request = ApiRequest::get("list_snapshots", "/snapshots")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("tag", options.tag.as_deref())
            .query_opt("resource_group.id", options.resource_group_id.as_deref())
            .query_opt("name", options.name.as_deref())
            .query_opt("source_volume.id", options.source_volume_id.as_deref())
            .query_opt("source_volume.crn", options.source_volume_crn.as_deref())
            .query_opt("source_image.id", options.source_image_id.as_deref())
            .query_opt("source_image.crn", options.source_image_crn.as_deref())
            .query_opt(
                "backup_policy_plan.id",
                options.backup_policy_plan_id.as_deref(),
            )
            .query_opt("sort", options.sort.as_deref());
        self.send(request).await
    }

    pub async fn create_snapshot(
        &self,
        options: &CreateSnapshotOptions,
    ) -> Result<DetailedResponse<Snapshot>> {
        let request = ApiRequest::post("create_snapshot", "/snapshots").json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_snapshot(
        &self,
        options: &GetSnapshotOptions,
    ) -> Result<DetailedResponse<Snapshot>> {
        let request =
            ApiRequest::get("get_snapshot", "/snapshots/{id}").path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_snapshot(
        &self,
        options: &UpdateSnapshotOptions,
    ) -> Result<DetailedResponse<Snapshot>> {
        let request = ApiRequest::patch("update_snapshot", "/snapshots/{id}")
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref())
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_snapshot(
        &self,
        options: &DeleteSnapshotOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_snapshot", "/snapshots/{id}")
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref());
        self.send_empty(request).await
    }

    /// Delete all snapshots of a volume.
    pub async fn delete_snapshots(
        &self,
        options: &DeleteSnapshotsOptions,
    ) -> Result<DetailedResponse<()>> {
        if options.source_volume_id.trim().is_empty() {
            return Err(Error::invalid(
                "delete_snapshots",
                "source_volume_id must not be empty",
            ));
        }
        let request = ApiRequest::delete("delete_snapshots", "/snapshots")
            .query("source_volume.id", &options.source_volume_id);
        self.send_empty(request).await
    }
}
