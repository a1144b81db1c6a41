use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::pager::collection;
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::pager::pageable;
use crate::vpc::references::{
    Identity, NameReference, ResourceGroupReference, ResourceReference, ZoneReference,
};
use crate::vpc::serviceclient::VpcService;

/// A block storage volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub id: String,
    pub href: String,
    pub name: String,
    /// Capacity in gigabytes.
    pub capacity: i64,
    pub profile: NameReference,
    /// `available`, `failed`, `pending`, `pending_deletion`, `unusable` or `updating`.
    pub status: String,
    pub zone: ZoneReference,
    pub active: Option<bool>,
    /// `attached`, `unattached` or `unusable`.
    pub attachment_state: Option<String>,
    pub bandwidth: Option<i64>,
    pub busy: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    /// `provider_managed` or `user_managed`.
    pub encryption: Option<String>,
    pub encryption_key: Option<ResourceReference>,
    pub iops: Option<i64>,
    pub operating_system: Option<ResourceReference>,
    pub resource_group: Option<ResourceGroupReference>,
    pub source_image: Option<ResourceReference>,
    pub source_snapshot: Option<ResourceReference>,
    #[serde(default)]
    pub status_reasons: Vec<VolumeStatusReason>,
    #[serde(default)]
    pub user_tags: Vec<String>,
    #[serde(default)]
    pub volume_attachments: Vec<VolumeAttachmentReferenceVolumeContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeStatusReason {
    pub code: String,
    pub message: String,
    pub more_info: Option<String>,
}

/// An attachment of this volume, seen from the volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAttachmentReferenceVolumeContext {
    pub href: String,
    pub id: String,
    pub name: String,
    pub delete_volume_on_instance_delete: Option<bool>,
    pub instance: Option<ResourceReference>,
    /// `boot` or `data`.
    #[serde(rename = "type")]
    pub attachment_type: Option<String>,
}

collection!(VolumeCollection, volumes: Volume);

#[derive(Debug, Clone, Serialize)]
pub struct VolumePrototype {
    pub profile: Identity,
    pub zone: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_snapshot: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_tags: Option<Vec<String>>,
}

impl VolumePrototype {
    /// An empty volume of `capacity` gigabytes.
    pub fn by_capacity(profile: Identity, zone: Identity, capacity: i64) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::empty(profile, zone)
        }
    }

    /// A volume restored from a snapshot.
    pub fn by_source_snapshot(
        profile: Identity,
        zone: Identity,
        source_snapshot: Identity,
    ) -> Self {
        Self {
            source_snapshot: Some(source_snapshot),
            ..Self::empty(profile, zone)
        }
    }

    fn empty(profile: Identity, zone: Identity) -> Self {
        Self {
            profile,
            zone,
            capacity: None,
            encryption_key: None,
            iops: None,
            name: None,
            resource_group: None,
            source_snapshot: None,
            user_tags: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_iops(mut self, iops: i64) -> Self {
        self.iops = Some(iops);
        self
    }

    pub fn with_encryption_key(mut self, encryption_key: Identity) -> Self {
        self.encryption_key = Some(encryption_key);
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
pub struct VolumePatch {
    /// Capacity can only grow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_tags: Option<Vec<String>>,
}

impl AsPatch for VolumePatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfile {
    pub href: String,
    pub name: String,
    /// `custom` or `tiered`.
    pub family: Option<String>,
}

collection!(VolumeProfileCollection, profiles: VolumeProfile);

#[derive(Debug, Clone, Default)]
pub struct ListVolumesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub name: Option<String>,
    pub attachment_state: Option<String>,
    pub encryption: Option<String>,
    pub operating_system_family: Option<String>,
    pub operating_system_architecture: Option<String>,
    pub zone_name: Option<String>,
}

impl ListVolumesOptions {
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

    pub fn with_attachment_state(mut self, attachment_state: impl Into<String>) -> Self {
        self.attachment_state = Some(attachment_state.into());
        self
    }

    pub fn with_zone_name(mut self, zone_name: impl Into<String>) -> Self {
        self.zone_name = Some(zone_name.into());
        self
    }
}

pageable!(ListVolumesOptions, VolumeCollection, list_volumes);

#[derive(Debug, Clone)]
pub struct CreateVolumeOptions {
    pub prototype: VolumePrototype,
}

impl CreateVolumeOptions {
    pub fn new(prototype: VolumePrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct GetVolumeOptions {
    pub id: String,
}

impl GetVolumeOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Volume updates should carry the `ETag` of the last read as `if_match`.
#[derive(Debug, Clone)]
pub struct UpdateVolumeOptions {
    pub id: String,
    pub patch: MergePatch,
    pub if_match: Option<String>,
}

impl UpdateVolumeOptions {
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
pub struct DeleteVolumeOptions {
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteVolumeOptions {
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
pub struct ListVolumeProfilesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListVolumeProfilesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pageable!(ListVolumeProfilesOptions, VolumeProfileCollection, list_volume_profiles);

#[derive(Debug, Clone)]
pub struct GetVolumeProfileOptions {
    pub name: String,
}

impl GetVolumeProfileOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl VpcService {
    pub async fn list_volumes(
        &self,
        options: &ListVolumesOptions,
    ) -> Result<DetailedResponse<VolumeCollection>> {
        let request = ApiRequest::get("list_volumes", "/volumes")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("name", options.name.as_deref())
            .query_opt("attachment_state", options.attachment_state.as_deref())
            .query_opt("encryption", options.encryption.as_deref())
            .query_opt(
                "operating_system.family",
                options.operating_system_family.as_deref(),
            )
            .query_opt(
                "operating_system.architecture",
                options.operating_system_architecture.as_deref(),
            )
            .query_opt("zone.name", options.zone_name.as_deref());
        self.send(request).await
    }

    pub async fn create_volume(
        &self,
        options: &CreateVolumeOptions,
    ) -> Result<DetailedResponse<Volume>> {
        let request = ApiRequest::post("create_volume", "/volumes").json(&options.prototype)?;
        self.send(request).await
    }

    /// Get a volume. The response `ETag` feeds `if_match` on update and delete.
    pub async fn get_volume(&self, options: &GetVolumeOptions) -> Result<DetailedResponse<Volume>> {
        let request = ApiRequest::get("get_volume", "/volumes/{id}").path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_volume(
        &self,
        options: &UpdateVolumeOptions,
    ) -> Result<DetailedResponse<Volume>> {
        let request = ApiRequest::patch("update_volume", "/volumes/{id}")
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref())
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_volume(
        &self,
        options: &DeleteVolumeOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_volume", "/volumes/{id}")
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref());
        self.send_empty(request).await
    }

    pub async fn list_volume_profiles(
        &self,
        options: &ListVolumeProfilesOptions,
    ) -> Result<DetailedResponse<VolumeProfileCollection>> {
        let request = ApiRequest::get("list_volume_profiles", "/volume/profiles")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn get_volume_profile(
        &self,
        options: &GetVolumeProfileOptions,
    ) -> Result<DetailedResponse<VolumeProfile>> {
        let request = ApiRequest::get("get_volume_profile", "/volume/profiles/{name}")
            .path_param("name", &options.name)?;
        self.send(request).await
    }
}
