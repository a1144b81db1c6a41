use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::pager::collection;
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::floating_ips::FloatingIp;
use crate::vpc::pager::pageable;
use crate::vpc::references::{
    Identity, NameReference, ProfileValue, ReservedIpReference, ResourceGroupReference,
    ResourceReference, ZoneReference,
};
use crate::vpc::serviceclient::VpcService;

/// A virtual server instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub href: String,
    pub name: String,
    /// `deleting`, `failed`, `pending`, `restarting`, `running`, `starting`, `stopped` or
    /// `stopping`.
    pub status: String,
    pub bandwidth: Option<i64>,
    pub boot_volume_attachment: Option<VolumeAttachmentReference>,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub image: Option<ResourceReference>,
    /// Memory in gibibytes.
    pub memory: Option<i64>,
    #[serde(default)]
    pub network_interfaces: Vec<NetworkInterfaceReference>,
    pub primary_network_interface: Option<NetworkInterfaceReference>,
    pub profile: Option<NameReference>,
    pub resource_group: Option<ResourceGroupReference>,
    pub vcpu: Option<InstanceVcpu>,
    #[serde(default)]
    pub volume_attachments: Vec<VolumeAttachmentReference>,
    pub vpc: Option<ResourceReference>,
    pub zone: Option<ZoneReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceVcpu {
    pub architecture: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterfaceReference {
    pub href: String,
    pub id: String,
    pub name: String,
    pub primary_ip: Option<ReservedIpReference>,
    pub resource_type: Option<String>,
    pub subnet: Option<ResourceReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAttachmentReference {
    pub href: String,
    pub id: String,
    pub name: String,
    pub device: Option<VolumeAttachmentDevice>,
    pub volume: Option<ResourceReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeAttachmentDevice {
    pub id: String,
}

collection!(InstanceCollection, instances: Instance);

/// A primary IP for a new network interface: an existing reserved IP, or a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NetworkInterfaceIpPrototype {
    Existing(Identity),
    New {
        #[serde(skip_serializing_if = "Option::is_none")]
        address: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        auto_delete: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkInterfacePrototype {
    pub subnet: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_ip_spoofing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_ip: Option<NetworkInterfaceIpPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<Identity>>,
}

impl NetworkInterfacePrototype {
    pub fn new(subnet: Identity) -> Self {
        Self {
            subnet,
            allow_ip_spoofing: None,
            name: None,
            primary_ip: None,
            security_groups: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_allow_ip_spoofing(mut self, allow_ip_spoofing: bool) -> Self {
        self.allow_ip_spoofing = Some(allow_ip_spoofing);
        self
    }

    pub fn with_primary_ip(mut self, primary_ip: NetworkInterfaceIpPrototype) -> Self {
        self.primary_ip = Some(primary_ip);
        self
    }

    pub fn with_security_groups(mut self, security_groups: Vec<Identity>) -> Self {
        self.security_groups = Some(security_groups);
        self
    }
}

/// A volume created along with its attachment.
#[derive(Debug, Clone, Serialize)]
pub struct VolumePrototypeInline {
    pub profile: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_snapshot: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_tags: Option<Vec<String>>,
}

impl VolumePrototypeInline {
    pub fn new(profile: Identity) -> Self {
        Self {
            profile,
            capacity: None,
            encryption_key: None,
            iops: None,
            name: None,
            source_snapshot: None,
            user_tags: None,
        }
    }

    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_iops(mut self, iops: i64) -> Self {
        self.iops = Some(iops);
        self
    }

    pub fn with_source_snapshot(mut self, snapshot: Identity) -> Self {
        self.source_snapshot = Some(snapshot);
        self
    }
}

/// The volume of an attachment: an existing volume, or one created inline.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum VolumeAttachmentVolumePrototype {
    Existing(Identity),
    New(VolumePrototypeInline),
}

#[derive(Debug, Clone, Serialize)]
pub struct VolumeAttachmentPrototype {
    pub volume: VolumeAttachmentVolumePrototype,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_volume_on_instance_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl VolumeAttachmentPrototype {
    pub fn new(volume: VolumeAttachmentVolumePrototype) -> Self {
        Self {
            volume,
            delete_volume_on_instance_delete: None,
            name: None,
        }
    }

    pub fn with_delete_volume_on_instance_delete(mut self, delete: bool) -> Self {
        self.delete_volume_on_instance_delete = Some(delete);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A catalog offering to provision from, either its latest version or a pinned one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogOfferingPrototype {
    Offering { offering: Identity },
    Version { version: Identity },
}

/// Request body for creating an instance (or an instance template) from an
/// image, a boot volume, a catalog offering or a template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstancePrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_template: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_offering: Option<CatalogOfferingPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_volume_attachment: Option<VolumeAttachmentPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_network_interface: Option<NetworkInterfacePrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_interfaces: Option<Vec<NetworkInterfacePrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<Identity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_volume_bandwidth: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_attachments: Option<Vec<VolumeAttachmentPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<Identity>,
}

impl InstancePrototype {
    pub fn by_image(
        image: Identity,
        zone: Identity,
        primary_network_interface: NetworkInterfacePrototype,
    ) -> Self {
        Self {
            image: Some(image),
            zone: Some(zone),
            primary_network_interface: Some(primary_network_interface),
            ..Self::default()
        }
    }

    /// Boot from an existing volume or from a volume created from a snapshot.
    pub fn by_boot_volume(
        boot_volume_attachment: VolumeAttachmentPrototype,
        zone: Identity,
        primary_network_interface: NetworkInterfacePrototype,
    ) -> Self {
        Self {
            boot_volume_attachment: Some(boot_volume_attachment),
            zone: Some(zone),
            primary_network_interface: Some(primary_network_interface),
            ..Self::default()
        }
    }

    pub fn by_catalog_offering(
        catalog_offering: CatalogOfferingPrototype,
        zone: Identity,
        primary_network_interface: NetworkInterfacePrototype,
    ) -> Self {
        Self {
            catalog_offering: Some(catalog_offering),
            zone: Some(zone),
            primary_network_interface: Some(primary_network_interface),
            ..Self::default()
        }
    }

    /// Take every unset property from an instance template.
    pub fn by_source_template(source_template: Identity) -> Self {
        Self {
            source_template: Some(source_template),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_profile(mut self, profile: Identity) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_vpc(mut self, vpc: Identity) -> Self {
        self.vpc = Some(vpc);
        self
    }

    pub fn with_keys(mut self, keys: Vec<Identity>) -> Self {
        self.keys = Some(keys);
        self
    }

    pub fn with_user_data(mut self, user_data: impl Into<String>) -> Self {
        self.user_data = Some(user_data.into());
        self
    }

    pub fn with_network_interfaces(mut self, interfaces: Vec<NetworkInterfacePrototype>) -> Self {
        self.network_interfaces = Some(interfaces);
        self
    }

    pub fn with_volume_attachments(mut self, attachments: Vec<VolumeAttachmentPrototype>) -> Self {
        self.volume_attachments = Some(attachments);
        self
    }

    pub fn with_resource_group(mut self, resource_group: Identity) -> Self {
        self.resource_group = Some(resource_group);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InstancePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The instance must be stopped to change its profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_volume_bandwidth: Option<i64>,
}

impl AsPatch for InstancePatch {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceActionType {
    Start,
    Stop,
    Reboot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceAction {
    pub id: String,
    pub href: String,
    /// `completed`, `failed`, `pending` or `running`.
    pub status: String,
    #[serde(rename = "type")]
    pub action_type: InstanceActionType,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub force: Option<bool>,
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
struct InstanceActionPrototype {
    #[serde(rename = "type")]
    action_type: InstanceActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    force: Option<bool>,
}

/// The keys and user accounts an instance was initialized with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceInitialization {
    #[serde(default)]
    pub keys: Vec<ResourceReference>,
    #[serde(default)]
    pub user_accounts: Vec<InstanceUserAccount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceUserAccount {
    pub username: String,
    /// Password encrypted with the public key, base64 encoded.
    pub encrypted_password: String,
    pub encryption_key: Option<ResourceReference>,
    pub resource_type: Option<String>,
}

impl InstanceUserAccount {
    /// The encrypted password bytes, ready for decryption with the private key.
    pub fn encrypted_password_bytes(&self) -> std::result::Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.encrypted_password.as_bytes())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceProfile {
    pub href: String,
    pub name: String,
    pub family: Option<String>,
    pub bandwidth: Option<ProfileValue>,
    pub memory: Option<ProfileValue>,
    pub port_speed: Option<ProfileValue>,
    pub vcpu_architecture: Option<ProfileValue<String>>,
    pub vcpu_count: Option<ProfileValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceProfileCollection {
    pub profiles: Vec<InstanceProfile>,
}

/// A network interface on an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub id: String,
    pub href: String,
    pub name: String,
    pub subnet: ResourceReference,
    pub allow_ip_spoofing: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub floating_ips: Vec<ResourceReference>,
    pub port_speed: Option<i64>,
    pub primary_ip: Option<ReservedIpReference>,
    pub resource_type: Option<String>,
    #[serde(default)]
    pub security_groups: Vec<ResourceReference>,
    /// `available`, `deleting`, `failed` or `pending`.
    pub status: Option<String>,
    /// `primary` or `secondary`.
    #[serde(rename = "type")]
    pub interface_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInterfaceCollection {
    pub network_interfaces: Vec<NetworkInterface>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkInterfacePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_ip_spoofing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for NetworkInterfacePatch {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingIpUnpaginatedCollection {
    pub floating_ips: Vec<FloatingIp>,
}

/// The attachment of a volume to an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAttachment {
    pub id: String,
    pub href: String,
    pub name: String,
    pub bandwidth: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub delete_volume_on_instance_delete: Option<bool>,
    pub device: Option<VolumeAttachmentDevice>,
    /// `attached`, `attaching`, `deleting` or `detaching`.
    pub status: Option<String>,
    /// `boot` or `data`.
    #[serde(rename = "type")]
    pub attachment_type: Option<String>,
    pub volume: Option<ResourceReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeAttachmentCollection {
    pub volume_attachments: Vec<VolumeAttachment>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VolumeAttachmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_volume_on_instance_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for VolumeAttachmentPatch {}

#[derive(Debug, Clone, Default)]
pub struct ListInstancesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub name: Option<String>,
    pub vpc_id: Option<String>,
    pub vpc_crn: Option<String>,
    pub vpc_name: Option<String>,
}

impl ListInstancesOptions {
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

    pub fn with_vpc_id(mut self, vpc_id: impl Into<String>) -> Self {
        self.vpc_id = Some(vpc_id.into());
        self
    }

    pub fn with_vpc_name(mut self, vpc_name: impl Into<String>) -> Self {
        self.vpc_name = Some(vpc_name.into());
        self
    }

    pub fn with_resource_group_id(mut self, resource_group_id: impl Into<String>) -> Self {
        self.resource_group_id = Some(resource_group_id.into());
        self
    }
}

pageable!(ListInstancesOptions, InstanceCollection, list_instances);

#[derive(Debug, Clone)]
pub struct CreateInstanceOptions {
    pub prototype: InstancePrototype,
}

impl CreateInstanceOptions {
    pub fn new(prototype: InstancePrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct InstanceIdOptions {
    pub id: String,
}

impl InstanceIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetInstanceOptions = InstanceIdOptions;
pub type DeleteInstanceOptions = InstanceIdOptions;
pub type GetInstanceInitializationOptions = InstanceIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateInstanceOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateInstanceOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateInstanceActionOptions {
    pub instance_id: String,
    pub action_type: InstanceActionType,
    /// Skip queued actions and act immediately.
    pub force: Option<bool>,
}

impl CreateInstanceActionOptions {
    pub fn new(instance_id: impl Into<String>, action_type: InstanceActionType) -> Self {
        Self {
            instance_id: instance_id.into(),
            action_type,
            force: None,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListInstanceProfilesOptions {}

impl ListInstanceProfilesOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct GetInstanceProfileOptions {
    pub name: String,
}

impl GetInstanceProfileOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone)]
pub struct InstanceChildrenOptions {
    pub instance_id: String,
}

impl InstanceChildrenOptions {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
        }
    }
}

pub type ListInstanceNetworkInterfacesOptions = InstanceChildrenOptions;
pub type ListInstanceVolumeAttachmentsOptions = InstanceChildrenOptions;

#[derive(Debug, Clone)]
pub struct CreateInstanceNetworkInterfaceOptions {
    pub instance_id: String,
    pub prototype: NetworkInterfacePrototype,
}

impl CreateInstanceNetworkInterfaceOptions {
    pub fn new(instance_id: impl Into<String>, prototype: NetworkInterfacePrototype) -> Self {
        Self {
            instance_id: instance_id.into(),
            prototype,
        }
    }
}

/// Options naming one child resource (interface or attachment) of an instance.
#[derive(Debug, Clone)]
pub struct InstanceChildOptions {
    pub instance_id: String,
    pub id: String,
}

impl InstanceChildOptions {
    pub fn new(instance_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            id: id.into(),
        }
    }
}

pub type GetInstanceNetworkInterfaceOptions = InstanceChildOptions;
pub type DeleteInstanceNetworkInterfaceOptions = InstanceChildOptions;
pub type GetInstanceVolumeAttachmentOptions = InstanceChildOptions;
pub type DeleteInstanceVolumeAttachmentOptions = InstanceChildOptions;

#[derive(Debug, Clone)]
pub struct UpdateInstanceChildOptions {
    pub instance_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateInstanceChildOptions {
    pub fn new(instance_id: impl Into<String>, id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            instance_id: instance_id.into(),
            id: id.into(),
            patch,
        }
    }
}

pub type UpdateInstanceNetworkInterfaceOptions = UpdateInstanceChildOptions;
pub type UpdateInstanceVolumeAttachmentOptions = UpdateInstanceChildOptions;

#[derive(Debug, Clone)]
pub struct ListInstanceNetworkInterfaceFloatingIpsOptions {
    pub instance_id: String,
    pub network_interface_id: String,
}

impl ListInstanceNetworkInterfaceFloatingIpsOptions {
    pub fn new(instance_id: impl Into<String>, network_interface_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            network_interface_id: network_interface_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InstanceNetworkInterfaceFloatingIpOptions {
    pub instance_id: String,
    pub network_interface_id: String,
    pub id: String,
}

impl InstanceNetworkInterfaceFloatingIpOptions {
    pub fn new(
        instance_id: impl Into<String>,
        network_interface_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            network_interface_id: network_interface_id.into(),
            id: id.into(),
        }
    }
}

pub type GetInstanceNetworkInterfaceFloatingIpOptions = InstanceNetworkInterfaceFloatingIpOptions;
pub type AddInstanceNetworkInterfaceFloatingIpOptions = InstanceNetworkInterfaceFloatingIpOptions;
pub type RemoveInstanceNetworkInterfaceFloatingIpOptions =
    InstanceNetworkInterfaceFloatingIpOptions;

#[derive(Debug, Clone)]
pub struct CreateInstanceVolumeAttachmentOptions {
    pub instance_id: String,
    pub prototype: VolumeAttachmentPrototype,
}

impl CreateInstanceVolumeAttachmentOptions {
    pub fn new(instance_id: impl Into<String>, prototype: VolumeAttachmentPrototype) -> Self {
        Self {
            instance_id: instance_id.into(),
            prototype,
        }
    }
}

const NETWORK_INTERFACES_PATH: &str = "/instances/{instance_id}/network_interfaces";
const NETWORK_INTERFACE_PATH: &str = "/instances/{instance_id}/network_interfaces/{id}";
const NIC_FLOATING_IP_PATH: &str =
    "/instances/{instance_id}/network_interfaces/{network_interface_id}/floating_ips/{id}";
const VOLUME_ATTACHMENTS_PATH: &str = "/instances/{instance_id}/volume_attachments";
const VOLUME_ATTACHMENT_PATH: &str = "/instances/{instance_id}/volume_attachments/{id}";

impl VpcService {
    pub async fn list_instances(
        &self,
        options: &ListInstancesOptions,
    ) -> Result<DetailedResponse<InstanceCollection>> {
        let request = ApiRequest::get("list_instances", "/instances")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("resource_group.id", options.resource_group_id.as_deref())
            .query_opt("name", options.name.as_deref())
            .query_opt("vpc.id", options.vpc_id.as_deref())
            .query_opt("vpc.crn", options.vpc_crn.as_deref())
            .query_opt("vpc.name", options.vpc_name.as_deref());
        self.send(request).await
    }

    /// Provision an instance. It starts automatically once provisioned.
    pub async fn create_instance(
        &self,
        options: &CreateInstanceOptions,
    ) -> Result<DetailedResponse<Instance>> {
        let request = ApiRequest::post("create_instance", "/instances").json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_instance(
        &self,
        options: &GetInstanceOptions,
    ) -> Result<DetailedResponse<Instance>> {
        let request =
            ApiRequest::get("get_instance", "/instances/{id}").path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_instance(
        &self,
        options: &UpdateInstanceOptions,
    ) -> Result<DetailedResponse<Instance>> {
        let request = ApiRequest::patch("update_instance", "/instances/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_instance(
        &self,
        options: &DeleteInstanceOptions,
    ) -> Result<DetailedResponse<()>> {
        let request =
            ApiRequest::delete("delete_instance", "/instances/{id}").path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    /// Start, stop or reboot an instance.
    pub async fn create_instance_action(
        &self,
        options: &CreateInstanceActionOptions,
    ) -> Result<DetailedResponse<InstanceAction>> {
        let body = InstanceActionPrototype {
            action_type: options.action_type,
            force: options.force,
        };
        let request = ApiRequest::post("create_instance_action", "/instances/{instance_id}/actions")
            .path_param("instance_id", &options.instance_id)?
            .json(&body)?;
        self.send(request).await
    }

    pub async fn get_instance_initialization(
        &self,
        options: &GetInstanceInitializationOptions,
    ) -> Result<DetailedResponse<InstanceInitialization>> {
        let request = ApiRequest::get(
            "get_instance_initialization",
            "/instances/{id}/initialization",
        )
        .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn list_instance_profiles(
        &self,
        _options: &ListInstanceProfilesOptions,
    ) -> Result<DetailedResponse<InstanceProfileCollection>> {
        self.send(ApiRequest::get("list_instance_profiles", "/instance/profiles"))
            .await
    }

    pub async fn get_instance_profile(
        &self,
        options: &GetInstanceProfileOptions,
    ) -> Result<DetailedResponse<InstanceProfile>> {
        let request = ApiRequest::get("get_instance_profile", "/instance/profiles/{name}")
            .path_param("name", &options.name)?;
        self.send(request).await
    }

    pub async fn list_instance_network_interfaces(
        &self,
        options: &ListInstanceNetworkInterfacesOptions,
    ) -> Result<DetailedResponse<NetworkInterfaceCollection>> {
        let request = ApiRequest::get("list_instance_network_interfaces", NETWORK_INTERFACES_PATH)
            .path_param("instance_id", &options.instance_id)?;
        self.send(request).await
    }

    pub async fn create_instance_network_interface(
        &self,
        options: &CreateInstanceNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<NetworkInterface>> {
        let request = ApiRequest::post("create_instance_network_interface", NETWORK_INTERFACES_PATH)
            .path_param("instance_id", &options.instance_id)?
            .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_instance_network_interface(
        &self,
        options: &GetInstanceNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<NetworkInterface>> {
        let request = ApiRequest::get("get_instance_network_interface", NETWORK_INTERFACE_PATH)
            .path_param("instance_id", &options.instance_id)?
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_instance_network_interface(
        &self,
        options: &UpdateInstanceNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<NetworkInterface>> {
        let request = ApiRequest::patch("update_instance_network_interface", NETWORK_INTERFACE_PATH)
            .path_param("instance_id", &options.instance_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Delete a secondary network interface. The primary interface cannot be deleted.
    pub async fn delete_instance_network_interface(
        &self,
        options: &DeleteInstanceNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete(
            "delete_instance_network_interface",
            NETWORK_INTERFACE_PATH,
        )
        .path_param("instance_id", &options.instance_id)?
        .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_instance_network_interface_floating_ips(
        &self,
        options: &ListInstanceNetworkInterfaceFloatingIpsOptions,
    ) -> Result<DetailedResponse<FloatingIpUnpaginatedCollection>> {
        let request = ApiRequest::get(
            "list_instance_network_interface_floating_ips",
            "/instances/{instance_id}/network_interfaces/{network_interface_id}/floating_ips",
        )
        .path_param("instance_id", &options.instance_id)?
        .path_param("network_interface_id", &options.network_interface_id)?;
        self.send(request).await
    }

    pub async fn get_instance_network_interface_floating_ip(
        &self,
        options: &GetInstanceNetworkInterfaceFloatingIpOptions,
    ) -> Result<DetailedResponse<FloatingIp>> {
        let request = ApiRequest::get(
            "get_instance_network_interface_floating_ip",
            NIC_FLOATING_IP_PATH,
        )
        .path_param("instance_id", &options.instance_id)?
        .path_param("network_interface_id", &options.network_interface_id)?
        .path_param("id", &options.id)?;
        self.send(request).await
    }

    /// Bind a floating IP to the interface.
    pub async fn add_instance_network_interface_floating_ip(
        &self,
        options: &AddInstanceNetworkInterfaceFloatingIpOptions,
    ) -> Result<DetailedResponse<FloatingIp>> {
        let request = ApiRequest::put(
            "add_instance_network_interface_floating_ip",
            NIC_FLOATING_IP_PATH,
        )
        .path_param("instance_id", &options.instance_id)?
        .path_param("network_interface_id", &options.network_interface_id)?
        .path_param("id", &options.id)?;
        self.send(request).await
    }

    /// Unbind a floating IP from the interface. The floating IP itself is kept.
    pub async fn remove_instance_network_interface_floating_ip(
        &self,
        options: &RemoveInstanceNetworkInterfaceFloatingIpOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete(
            "remove_instance_network_interface_floating_ip",
            NIC_FLOATING_IP_PATH,
        )
        .path_param("instance_id", &options.instance_id)?
        .path_param("network_interface_id", &options.network_interface_id)?
        .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_instance_volume_attachments(
        &self,
        options: &ListInstanceVolumeAttachmentsOptions,
    ) -> Result<DetailedResponse<VolumeAttachmentCollection>> {
        let request = ApiRequest::get("list_instance_volume_attachments", VOLUME_ATTACHMENTS_PATH)
            .path_param("instance_id", &options.instance_id)?;
        self.send(request).await
    }

    pub async fn create_instance_volume_attachment(
        &self,
        options: &CreateInstanceVolumeAttachmentOptions,
    ) -> Result<DetailedResponse<VolumeAttachment>> {
        let request = ApiRequest::post("create_instance_volume_attachment", VOLUME_ATTACHMENTS_PATH)
            .path_param("instance_id", &options.instance_id)?
            .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_instance_volume_attachment(
        &self,
        options: &GetInstanceVolumeAttachmentOptions,
    ) -> Result<DetailedResponse<VolumeAttachment>> {
        let request = ApiRequest::get("get_instance_volume_attachment", VOLUME_ATTACHMENT_PATH)
            .path_param("instance_id", &options.instance_id)?
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_instance_volume_attachment(
        &self,
        options: &UpdateInstanceVolumeAttachmentOptions,
    ) -> Result<DetailedResponse<VolumeAttachment>> {
        let request = ApiRequest::patch("update_instance_volume_attachment", VOLUME_ATTACHMENT_PATH)
            .path_param("instance_id", &options.instance_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Detach a volume. The volume is kept unless it was created with the attachment.
    pub async fn delete_instance_volume_attachment(
        &self,
        options: &DeleteInstanceVolumeAttachmentOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete(
            "delete_instance_volume_attachment",
            VOLUME_ATTACHMENT_PATH,
        )
        .path_param("instance_id", &options.instance_id)?
        .path_param("id", &options.id)?;
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn action_body_uses_wire_names() {
        let body = serde_json::to_value(InstanceActionPrototype {
            action_type: InstanceActionType::Reboot,
            force: Some(true),
        })
        .unwrap();
        assert_eq!(body, json!({"type": "reboot", "force": true}));
    }

    #[test]
    fn image_prototype_nests_interface() {
        let prototype = InstancePrototype::by_image(
            Identity::id("r006-image"),
            Identity::name("us-south-1"),
            NetworkInterfacePrototype::new(Identity::id("0717-subnet")).with_primary_ip(
                NetworkInterfaceIpPrototype::New {
                    address: Some("10.0.0.5".to_string()),
                    auto_delete: None,
                    name: None,
                },
            ),
        )
        .with_profile(Identity::name("bx2-2x8"));

        let body = serde_json::to_value(prototype).unwrap();
        assert_eq!(body["primary_network_interface"]["primary_ip"], json!({"address": "10.0.0.5"}));
        assert_eq!(body["profile"], json!({"name": "bx2-2x8"}));
        assert!(body.get("source_template").is_none());
    }

    #[test]
    fn inline_boot_volume_from_snapshot() {
        let attachment = VolumeAttachmentPrototype::new(VolumeAttachmentVolumePrototype::New(
            VolumePrototypeInline::new(Identity::name("general-purpose"))
                .with_source_snapshot(Identity::id("r006-snap")),
        ));
        let body = serde_json::to_value(attachment).unwrap();
        assert_eq!(
            body,
            json!({"volume": {"profile": {"name": "general-purpose"}, "source_snapshot": {"id": "r006-snap"}}})
        );
    }

    #[test]
    fn user_account_password_is_base64() {
        let account = InstanceUserAccount {
            username: "Administrator".to_string(),
            encrypted_password: "c2VjcmV0".to_string(),
            encryption_key: None,
            resource_type: Some("host_user_account".to_string()),
        };
        assert_eq!(account.encrypted_password_bytes().unwrap(), b"secret");
    }
}
