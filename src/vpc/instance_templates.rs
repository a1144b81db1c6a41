//! Instance templates.
//!
//! A template records the prototype an instance is created from. Which boot
//! source it uses (image, snapshot-backed boot volume or catalog offering)
//! is only visible from which fields are present, so templates decode into
//! [`InstanceTemplate`] by field presence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::polymorphic::{self, DecodeError, Polymorphic, unknown_variant, variant};
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::instances::InstancePrototype;
use crate::vpc::references::{Identity, ResourceGroupReference};
use crate::vpc::serviceclient::VpcService;

/// Fields every template carries regardless of its boot source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTemplateCommon {
    pub id: String,
    pub href: String,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    #[serde(default)]
    pub keys: Vec<Identity>,
    #[serde(default)]
    pub network_interfaces: Vec<InstanceTemplateNetworkInterface>,
    pub primary_network_interface: Option<InstanceTemplateNetworkInterface>,
    pub profile: Option<Identity>,
    pub resource_group: Option<ResourceGroupReference>,
    pub total_volume_bandwidth: Option<i64>,
    pub user_data: Option<String>,
    #[serde(default)]
    pub volume_attachments: Vec<InstanceTemplateVolumeAttachment>,
    pub vpc: Option<Identity>,
    pub zone: Option<Identity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTemplateNetworkInterface {
    pub subnet: Identity,
    pub allow_ip_spoofing: Option<bool>,
    pub name: Option<String>,
    pub primary_ip: Option<InstanceTemplatePrimaryIp>,
    #[serde(default)]
    pub security_groups: Vec<Identity>,
}

/// Either a reference to a reserved IP or the properties of a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceTemplatePrimaryIp {
    pub id: Option<String>,
    pub href: Option<String>,
    pub address: Option<String>,
    pub auto_delete: Option<bool>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTemplateVolumeAttachment {
    pub volume: InstanceTemplateVolume,
    pub delete_volume_on_instance_delete: Option<bool>,
    pub name: Option<String>,
}

/// Either a reference to an existing volume or the properties of a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTemplateVolume {
    pub id: Option<String>,
    pub crn: Option<String>,
    pub href: Option<String>,
    pub capacity: Option<i64>,
    pub iops: Option<i64>,
    pub name: Option<String>,
    pub profile: Option<Identity>,
    pub source_snapshot: Option<Identity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTemplateByImage {
    #[serde(flatten)]
    pub common: InstanceTemplateCommon,
    pub image: Identity,
    pub boot_volume_attachment: Option<InstanceTemplateVolumeAttachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTemplateBySourceSnapshot {
    #[serde(flatten)]
    pub common: InstanceTemplateCommon,
    pub boot_volume_attachment: InstanceTemplateVolumeAttachment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTemplateByCatalogOffering {
    #[serde(flatten)]
    pub common: InstanceTemplateCommon,
    pub catalog_offering: InstanceTemplateCatalogOffering,
    pub boot_volume_attachment: Option<InstanceTemplateVolumeAttachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTemplateCatalogOffering {
    pub offering: Option<Identity>,
    pub version: Option<Identity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InstanceTemplate {
    ByImage(InstanceTemplateByImage),
    BySourceSnapshot(InstanceTemplateBySourceSnapshot),
    ByCatalogOffering(InstanceTemplateByCatalogOffering),
}

impl InstanceTemplate {
    pub fn common(&self) -> &InstanceTemplateCommon {
        match self {
            InstanceTemplate::ByImage(template) => &template.common,
            InstanceTemplate::BySourceSnapshot(template) => &template.common,
            InstanceTemplate::ByCatalogOffering(template) => &template.common,
        }
    }

    pub fn id(&self) -> &str {
        &self.common().id
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }
}

impl Polymorphic for InstanceTemplate {
    const TYPE_NAME: &'static str = "InstanceTemplate";
    const DISCRIMINATOR: &'static str = "image";

    fn discriminant(value: &Value) -> Option<&str> {
        let source_snapshot = value
            .get("boot_volume_attachment")
            .and_then(|attachment| attachment.get("volume"))
            .and_then(|volume| volume.get("source_snapshot"));

        if value.get("image").is_some() {
            Some("image")
        } else if value.get("catalog_offering").is_some() {
            Some("catalog_offering")
        } else if source_snapshot.is_some() {
            Some("source_snapshot")
        } else {
            None
        }
    }

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "image" => variant(value).map(InstanceTemplate::ByImage),
            "source_snapshot" => variant(value).map(InstanceTemplate::BySourceSnapshot),
            "catalog_offering" => variant(value).map(InstanceTemplate::ByCatalogOffering),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

impl<'de> Deserialize<'de> for InstanceTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        polymorphic::deserialize(deserializer)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceTemplateCollection {
    pub templates: Vec<InstanceTemplate>,
}

pub type InstanceTemplatePrototype = InstancePrototype;

#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceTemplatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for InstanceTemplatePatch {}

#[derive(Debug, Clone, Default)]
pub struct ListInstanceTemplatesOptions {}

impl ListInstanceTemplatesOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct CreateInstanceTemplateOptions {
    pub prototype: InstanceTemplatePrototype,
}

impl CreateInstanceTemplateOptions {
    pub fn new(prototype: InstanceTemplatePrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct InstanceTemplateIdOptions {
    pub id: String,
}

impl InstanceTemplateIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetInstanceTemplateOptions = InstanceTemplateIdOptions;
pub type DeleteInstanceTemplateOptions = InstanceTemplateIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateInstanceTemplateOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateInstanceTemplateOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

impl VpcService {
    pub async fn list_instance_templates(
        &self,
        _options: &ListInstanceTemplatesOptions,
    ) -> Result<DetailedResponse<InstanceTemplateCollection>> {
        self.send(ApiRequest::get("list_instance_templates", "/instance/templates"))
            .await
    }

    pub async fn create_instance_template(
        &self,
        options: &CreateInstanceTemplateOptions,
    ) -> Result<DetailedResponse<InstanceTemplate>> {
        let request = ApiRequest::post("create_instance_template", "/instance/templates")
            .json(&options.prototype)?;
        self.send_polymorphic(request).await
    }

    pub async fn get_instance_template(
        &self,
        options: &GetInstanceTemplateOptions,
    ) -> Result<DetailedResponse<InstanceTemplate>> {
        let request = ApiRequest::get("get_instance_template", "/instance/templates/{id}")
            .path_param("id", &options.id)?;
        self.send_polymorphic(request).await
    }

    pub async fn update_instance_template(
        &self,
        options: &UpdateInstanceTemplateOptions,
    ) -> Result<DetailedResponse<InstanceTemplate>> {
        let request = ApiRequest::patch("update_instance_template", "/instance/templates/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send_polymorphic(request).await
    }

    pub async fn delete_instance_template(
        &self,
        options: &DeleteInstanceTemplateOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_instance_template", "/instance/templates/{id}")
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn template(extra: Value) -> Value {
        let mut base = json!({
            "id": "r006-tmpl",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/instance/templates/r006-tmpl",
            "name": "my-template",
            "profile": {"name": "bx2-2x8"},
            "zone": {"name": "us-south-1"},
            "primary_network_interface": {"subnet": {"id": "0717-subnet"}}
        });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            base.extend(extra.clone());
        }
        base
    }

    #[test]
    fn image_template() {
        let decoded: InstanceTemplate =
            serde_json::from_value(template(json!({"image": {"id": "r006-image"}}))).unwrap();
        match decoded {
            InstanceTemplate::ByImage(t) => {
                assert_eq!(t.image, Identity::id("r006-image"));
                assert_eq!(t.common.name, "my-template");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn snapshot_template() {
        let decoded: InstanceTemplate = serde_json::from_value(template(json!({
            "boot_volume_attachment": {
                "volume": {"profile": {"name": "general-purpose"}, "source_snapshot": {"id": "r006-snap"}}
            }
        })))
        .unwrap();
        assert!(matches!(decoded, InstanceTemplate::BySourceSnapshot(_)));
    }

    #[test]
    fn catalog_template() {
        let decoded: InstanceTemplate = serde_json::from_value(template(json!({
            "catalog_offering": {"offering": {"crn": "crn:v1:bluemix:public:globalcatalog-collection:global::1082e7d2"}}
        })))
        .unwrap();
        assert!(matches!(decoded, InstanceTemplate::ByCatalogOffering(_)));
        assert_eq!(decoded.id(), "r006-tmpl");
    }

    #[test]
    fn template_without_boot_source_is_rejected() {
        let error = polymorphic::decode::<InstanceTemplate>(template(json!({}))).unwrap_err();
        assert!(matches!(error, DecodeError::MissingDiscriminator { .. }));
    }
}
