use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::pager::collection;
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::pager::pageable;
use crate::vpc::references::{Identity, ResourceGroupReference, ResourceReference};
use crate::vpc::serviceclient::VpcService;

/// A boot image for instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub href: String,
    pub name: String,
    /// `available`, `deleting`, `deprecated`, `failed`, `obsolete`, `pending` or `unusable`.
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    /// `none` or `user_managed`.
    pub encryption: Option<String>,
    pub encryption_key: Option<ImageEncryptionKey>,
    pub file: Option<ImageFile>,
    pub minimum_provisioned_size: Option<i64>,
    pub operating_system: Option<OperatingSystem>,
    pub resource_group: Option<ResourceGroupReference>,
    pub source_volume: Option<ResourceReference>,
    #[serde(default)]
    pub status_reasons: Vec<ImageStatusReason>,
    /// `private` or `public`.
    pub visibility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEncryptionKey {
    pub crn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    pub checksums: Option<ImageFileChecksums>,
    /// Size in gigabytes, rounded up.
    pub size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFileChecksums {
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageStatusReason {
    pub code: String,
    pub message: String,
    pub more_info: Option<String>,
}

collection!(ImageCollection, images: Image);

/// The location of an image file in Cloud Object Storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageFilePrototype {
    pub href: String,
}

/// Request body for creating an image from a file or from an existing volume.
#[derive(Debug, Clone, Serialize)]
pub struct ImagePrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<ImageFilePrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_volume: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_data_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
}

impl ImagePrototype {
    /// Import an image file (`cos://...`) with the given operating system.
    pub fn by_file(file_href: impl Into<String>, operating_system: Identity) -> Self {
        Self {
            file: Some(ImageFilePrototype {
                href: file_href.into(),
            }),
            operating_system: Some(operating_system),
            ..Self::empty()
        }
    }

    /// Capture an image from a boot volume.
    pub fn by_source_volume(source_volume: Identity) -> Self {
        Self {
            source_volume: Some(source_volume),
            ..Self::empty()
        }
    }

    fn empty() -> Self {
        Self {
            file: None,
            operating_system: None,
            source_volume: None,
            encrypted_data_key: None,
            encryption_key: None,
            name: None,
            resource_group: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_encryption(mut self, encrypted_data_key: impl Into<String>, key: Identity) -> Self {
        self.encrypted_data_key = Some(encrypted_data_key.into());
        self.encryption_key = Some(key);
        self
    }

    pub fn with_resource_group(mut self, resource_group: Identity) -> Self {
        self.resource_group = Some(resource_group);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for ImagePatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingSystem {
    pub href: String,
    pub name: String,
    pub architecture: Option<String>,
    pub dedicated_host_only: Option<bool>,
    pub display_name: Option<String>,
    pub family: Option<String>,
    pub vendor: Option<String>,
    pub version: Option<String>,
}

collection!(OperatingSystemCollection, operating_systems: OperatingSystem);

#[derive(Debug, Clone, Default)]
pub struct ListImagesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub name: Option<String>,
    /// `private` or `public`.
    pub visibility: Option<String>,
}

impl ListImagesOptions {
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

    pub fn with_visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }

    pub fn with_resource_group_id(mut self, resource_group_id: impl Into<String>) -> Self {
        self.resource_group_id = Some(resource_group_id.into());
        self
    }
}

pageable!(ListImagesOptions, ImageCollection, list_images);

#[derive(Debug, Clone)]
pub struct CreateImageOptions {
    pub prototype: ImagePrototype,
}

impl CreateImageOptions {
    pub fn new(prototype: ImagePrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct ImageIdOptions {
    pub id: String,
}

impl ImageIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetImageOptions = ImageIdOptions;
pub type DeleteImageOptions = ImageIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateImageOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateImageOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListOperatingSystemsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListOperatingSystemsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pageable!(
    ListOperatingSystemsOptions,
    OperatingSystemCollection,
    list_operating_systems
);

#[derive(Debug, Clone)]
pub struct GetOperatingSystemOptions {
    pub name: String,
}

impl GetOperatingSystemOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl VpcService {
    pub async fn list_images(
        &self,
        options: &ListImagesOptions,
    ) -> Result<DetailedResponse<ImageCollection>> {
        let request = ApiRequest::get("list_images", "/images")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("resource_group.id", options.resource_group_id.as_deref())
            .query_opt("name", options.name.as_deref())
            .query_opt("visibility", options.visibility.as_deref());
        self.send(request).await
    }

    /// Create an image. The image is `pending` until the import completes.
    pub async fn create_image(
        &self,
        options: &CreateImageOptions,
    ) -> Result<DetailedResponse<Image>> {
        let request = ApiRequest::post("create_image", "/images").json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_image(&self, options: &GetImageOptions) -> Result<DetailedResponse<Image>> {
        let request = ApiRequest::get("get_image", "/images/{id}").path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_image(
        &self,
        options: &UpdateImageOptions,
    ) -> Result<DetailedResponse<Image>> {
        let request = ApiRequest::patch("update_image", "/images/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Delete an image. Returns 202; the image moves to `deleting`.
    pub async fn delete_image(&self, options: &DeleteImageOptions) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete(
            "delete_image",
            "/images/{id}",
        )
        .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_operating_systems(
        &self,
        options: &ListOperatingSystemsOptions,
    ) -> Result<DetailedResponse<OperatingSystemCollection>> {
        let request = ApiRequest::get("list_operating_systems", "/operating_systems")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn get_operating_system(
        &self,
        options: &GetOperatingSystemOptions,
    ) -> Result<DetailedResponse<OperatingSystem>> {
        let request = ApiRequest::get("get_operating_system", "/operating_systems/{name}")
            .path_param("name", &options.name)?;
        self.send(request).await
    }
}
