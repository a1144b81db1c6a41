use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::pager::collection;
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::pager::pageable;
use crate::vpc::references::{Identity, ResourceGroupReference};
use crate::vpc::serviceclient::VpcService;

/// An SSH public key used to access instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub id: String,
    pub href: String,
    pub name: String,
    pub public_key: String,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub fingerprint: Option<String>,
    pub length: Option<i64>,
    pub resource_group: Option<ResourceGroupReference>,
    /// `ed25519` or `rsa`.
    #[serde(rename = "type")]
    pub key_type: Option<String>,
}

collection!(KeyCollection, keys: Key);

#[derive(Debug, Clone, Serialize)]
pub struct KeyPrototype {
    pub public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
}

impl KeyPrototype {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            name: None,
            resource_group: None,
            key_type: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type(mut self, key_type: impl Into<String>) -> Self {
        self.key_type = Some(key_type.into());
        self
    }

    pub fn with_resource_group(mut self, resource_group: Identity) -> Self {
        self.resource_group = Some(resource_group);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct KeyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for KeyPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListKeysOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListKeysOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pageable!(ListKeysOptions, KeyCollection, list_keys);

#[derive(Debug, Clone)]
pub struct CreateKeyOptions {
    pub prototype: KeyPrototype,
}

impl CreateKeyOptions {
    pub fn new(prototype: KeyPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct KeyIdOptions {
    pub id: String,
}

impl KeyIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetKeyOptions = KeyIdOptions;
pub type DeleteKeyOptions = KeyIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateKeyOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateKeyOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

impl VpcService {
    pub async fn list_keys(
        &self,
        options: &ListKeysOptions,
    ) -> Result<DetailedResponse<KeyCollection>> {
        let request = ApiRequest::get("list_keys", "/keys")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn create_key(&self, options: &CreateKeyOptions) -> Result<DetailedResponse<Key>> {
        let request = ApiRequest::post("create_key", "/keys").json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_key(&self, options: &GetKeyOptions) -> Result<DetailedResponse<Key>> {
        let request = ApiRequest::get("get_key", "/keys/{id}").path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_key(&self, options: &UpdateKeyOptions) -> Result<DetailedResponse<Key>> {
        let request = ApiRequest::patch("update_key", "/keys/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_key(&self, options: &DeleteKeyOptions) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_key", "/keys/{id}").path_param("id", &options.id)?;
        self.send_empty(request).await
    }
}
