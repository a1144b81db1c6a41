//! Bare metal servers, their disks, and their network interfaces.
//!
//! Network interfaces are either physical (`pci`), `vlan` interfaces riding
//! on a pci interface, or `hipersocket` interfaces on s390x profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::pager::collection;
use crate::common::polymorphic::{self, DecodeError, Polymorphic, unknown_variant, variant};
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::instances::{InstanceUserAccount, NetworkInterfaceIpPrototype};
use crate::vpc::pager::pageable;
use crate::vpc::references::{
    Identity, NameReference, ProfileValue, ReservedIpReference, ResourceGroupReference,
    ResourceReference, ZoneReference,
};
use crate::vpc::serviceclient::VpcService;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareMetalServerCpu {
    pub architecture: String,
    pub core_count: i64,
    pub socket_count: i64,
    pub threads_per_core: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareMetalServerStatusReason {
    pub code: String,
    pub message: String,
    pub more_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServer {
    pub id: String,
    pub href: String,
    pub name: String,
    /// `deleting`, `failed`, `maintenance`, `pending`, `restarting`, `running`, `starting`,
    /// `stopped` or `stopping`.
    pub status: String,
    pub bandwidth: Option<i64>,
    pub cpu: Option<BareMetalServerCpu>,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    #[serde(default)]
    pub disks: Vec<BareMetalServerDisk>,
    pub enable_secure_boot: Option<bool>,
    /// Memory in gibibytes.
    pub memory: Option<i64>,
    #[serde(default)]
    pub network_interfaces: Vec<ResourceReference>,
    pub primary_network_interface: Option<ResourceReference>,
    pub profile: Option<NameReference>,
    pub resource_group: Option<ResourceGroupReference>,
    pub resource_type: Option<String>,
    #[serde(default)]
    pub status_reasons: Vec<BareMetalServerStatusReason>,
    pub vpc: Option<ResourceReference>,
    pub zone: Option<ZoneReference>,
}

collection!(BareMetalServerCollection, bare_metal_servers: BareMetalServer);

/// A disk on a bare metal server. Disks come with the profile and cannot be added or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareMetalServerDisk {
    pub id: String,
    pub href: String,
    pub name: String,
    /// `fcp`, `nvme` or `sata`.
    pub interface_type: String,
    /// Size in gigabytes.
    pub size: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BareMetalServerDiskCollection {
    pub disks: Vec<BareMetalServerDisk>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BareMetalServerDiskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for BareMetalServerDiskPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerInitialization {
    pub image: ResourceReference,
    #[serde(default)]
    pub keys: Vec<ResourceReference>,
    #[serde(default)]
    pub user_accounts: Vec<InstanceUserAccount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerProfile {
    pub href: String,
    pub name: String,
    pub family: Option<String>,
    pub bandwidth: Option<ProfileValue>,
    pub cpu_architecture: Option<ProfileValue<String>>,
    pub cpu_core_count: Option<ProfileValue>,
    pub cpu_socket_count: Option<ProfileValue>,
    pub memory: Option<ProfileValue>,
    pub os_architecture: Option<ProfileValue<String>>,
    pub resource_type: Option<String>,
}

collection!(BareMetalServerProfileCollection, profiles: BareMetalServerProfile);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerNetworkInterfaceCommon {
    pub id: String,
    pub href: String,
    pub name: String,
    pub interface_type: String,
    pub allow_ip_spoofing: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub enable_infrastructure_nat: Option<bool>,
    #[serde(default)]
    pub floating_ips: Vec<ResourceReference>,
    pub mac_address: Option<String>,
    pub port_speed: Option<i64>,
    pub primary_ip: Option<ReservedIpReference>,
    pub resource_type: Option<String>,
    #[serde(default)]
    pub security_groups: Vec<ResourceReference>,
    /// `available`, `deleting`, `failed` or `pending`.
    pub status: Option<String>,
    pub subnet: Option<ResourceReference>,
    /// `primary` or `secondary`.
    #[serde(rename = "type")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerNetworkInterfaceByPci {
    #[serde(flatten)]
    pub common: BareMetalServerNetworkInterfaceCommon,
    /// VLAN ids that vlan interfaces on this interface may use.
    #[serde(default)]
    pub allowed_vlans: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerNetworkInterfaceByVlan {
    #[serde(flatten)]
    pub common: BareMetalServerNetworkInterfaceCommon,
    /// Whether the interface may float to any other server in the same resource group.
    pub allow_interface_to_float: bool,
    pub vlan: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BareMetalServerNetworkInterfaceByHiperSocket {
    #[serde(flatten)]
    pub common: BareMetalServerNetworkInterfaceCommon,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BareMetalServerNetworkInterface {
    Pci(BareMetalServerNetworkInterfaceByPci),
    Vlan(BareMetalServerNetworkInterfaceByVlan),
    HiperSocket(BareMetalServerNetworkInterfaceByHiperSocket),
}

impl BareMetalServerNetworkInterface {
    pub fn common(&self) -> &BareMetalServerNetworkInterfaceCommon {
        match self {
            BareMetalServerNetworkInterface::Pci(nic) => &nic.common,
            BareMetalServerNetworkInterface::Vlan(nic) => &nic.common,
            BareMetalServerNetworkInterface::HiperSocket(nic) => &nic.common,
        }
    }
}

impl Polymorphic for BareMetalServerNetworkInterface {
    const TYPE_NAME: &'static str = "BareMetalServerNetworkInterface";
    const DISCRIMINATOR: &'static str = "interface_type";

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "pci" => variant(value).map(BareMetalServerNetworkInterface::Pci),
            "vlan" => variant(value).map(BareMetalServerNetworkInterface::Vlan),
            "hipersocket" => variant(value).map(BareMetalServerNetworkInterface::HiperSocket),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

impl<'de> Deserialize<'de> for BareMetalServerNetworkInterface {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        polymorphic::deserialize(deserializer)
    }
}

collection!(
    BareMetalServerNetworkInterfaceCollection,
    network_interfaces: BareMetalServerNetworkInterface
);

/// A new interface. The `interface_type` field selects pci, vlan or hipersocket.
#[derive(Debug, Clone, Serialize)]
pub struct BareMetalServerNetworkInterfacePrototype {
    pub interface_type: String,
    pub subnet: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_vlans: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_interface_to_float: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_ip_spoofing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_infrastructure_nat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_ip: Option<NetworkInterfaceIpPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<Identity>>,
}

impl BareMetalServerNetworkInterfacePrototype {
    fn of_type(interface_type: &str, subnet: Identity) -> Self {
        Self {
            interface_type: interface_type.to_string(),
            subnet,
            allowed_vlans: None,
            allow_interface_to_float: None,
            vlan: None,
            allow_ip_spoofing: None,
            enable_infrastructure_nat: None,
            name: None,
            primary_ip: None,
            security_groups: None,
        }
    }

    /// A physical interface carrying the listed VLANs.
    pub fn pci(subnet: Identity, allowed_vlans: Vec<i64>) -> Self {
        Self {
            allowed_vlans: Some(allowed_vlans),
            ..Self::of_type("pci", subnet)
        }
    }

    /// A VLAN interface. The VLAN id must be allowed on one of the server's pci interfaces.
    pub fn vlan(subnet: Identity, vlan: i64) -> Self {
        Self {
            vlan: Some(vlan),
            ..Self::of_type("vlan", subnet)
        }
    }

    pub fn hipersocket(subnet: Identity) -> Self {
        Self::of_type("hipersocket", subnet)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_allow_interface_to_float(mut self, allow: bool) -> Self {
        self.allow_interface_to_float = Some(allow);
        self
    }

    pub fn with_security_groups(mut self, security_groups: Vec<Identity>) -> Self {
        self.security_groups = Some(security_groups);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BareMetalServerNetworkInterfacePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_ip_spoofing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_vlans: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_infrastructure_nat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for BareMetalServerNetworkInterfacePatch {}

#[derive(Debug, Clone, Serialize)]
pub struct BareMetalServerInitializationPrototype {
    pub image: Identity,
    pub keys: Vec<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BareMetalServerPrototype {
    pub initialization: BareMetalServerInitializationPrototype,
    pub primary_network_interface: BareMetalServerNetworkInterfacePrototype,
    pub profile: Identity,
    pub zone: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_secure_boot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_interfaces: Option<Vec<BareMetalServerNetworkInterfacePrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<Identity>,
}

impl BareMetalServerPrototype {
    pub fn new(
        image: Identity,
        keys: Vec<Identity>,
        primary_network_interface: BareMetalServerNetworkInterfacePrototype,
        profile: Identity,
        zone: Identity,
    ) -> Self {
        Self {
            initialization: BareMetalServerInitializationPrototype {
                image,
                keys,
                user_data: None,
            },
            primary_network_interface,
            profile,
            zone,
            enable_secure_boot: None,
            name: None,
            network_interfaces: None,
            resource_group: None,
            vpc: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_user_data(mut self, user_data: impl Into<String>) -> Self {
        self.initialization.user_data = Some(user_data.into());
        self
    }

    pub fn with_network_interfaces(
        mut self,
        network_interfaces: Vec<BareMetalServerNetworkInterfacePrototype>,
    ) -> Self {
        self.network_interfaces = Some(network_interfaces);
        self
    }

    pub fn with_enable_secure_boot(mut self, enable: bool) -> Self {
        self.enable_secure_boot = Some(enable);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BareMetalServerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_secure_boot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for BareMetalServerPatch {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BareMetalServerStopType {
    /// Power off immediately.
    Hard,
    /// Signal the operating system to shut down.
    Soft,
}

#[derive(Debug, Clone, Serialize)]
struct StopBody {
    #[serde(rename = "type")]
    stop_type: BareMetalServerStopType,
}

#[derive(Debug, Clone, Default)]
pub struct ListBareMetalServersOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub resource_group_id: Option<String>,
    pub name: Option<String>,
    pub vpc_id: Option<String>,
    pub vpc_crn: Option<String>,
    pub vpc_name: Option<String>,
}

impl ListBareMetalServersOptions {
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
}

pageable!(ListBareMetalServersOptions, BareMetalServerCollection, list_bare_metal_servers);

#[derive(Debug, Clone)]
pub struct CreateBareMetalServerOptions {
    pub prototype: BareMetalServerPrototype,
}

impl CreateBareMetalServerOptions {
    pub fn new(prototype: BareMetalServerPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct BareMetalServerIdOptions {
    pub id: String,
}

impl BareMetalServerIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetBareMetalServerOptions = BareMetalServerIdOptions;
pub type DeleteBareMetalServerOptions = BareMetalServerIdOptions;
pub type StartBareMetalServerOptions = BareMetalServerIdOptions;
pub type RestartBareMetalServerOptions = BareMetalServerIdOptions;
pub type GetBareMetalServerInitializationOptions = BareMetalServerIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateBareMetalServerOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateBareMetalServerOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StopBareMetalServerOptions {
    pub id: String,
    pub stop_type: BareMetalServerStopType,
}

impl StopBareMetalServerOptions {
    pub fn new(id: impl Into<String>, stop_type: BareMetalServerStopType) -> Self {
        Self {
            id: id.into(),
            stop_type,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListBareMetalServerProfilesOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListBareMetalServerProfilesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pageable!(
    ListBareMetalServerProfilesOptions,
    BareMetalServerProfileCollection,
    list_bare_metal_server_profiles
);

#[derive(Debug, Clone)]
pub struct GetBareMetalServerProfileOptions {
    pub name: String,
}

impl GetBareMetalServerProfileOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone)]
pub struct ListBareMetalServerDisksOptions {
    pub bare_metal_server_id: String,
}

impl ListBareMetalServerDisksOptions {
    pub fn new(bare_metal_server_id: impl Into<String>) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
        }
    }
}

/// Options naming one disk or network interface of a server.
#[derive(Debug, Clone)]
pub struct BareMetalServerChildOptions {
    pub bare_metal_server_id: String,
    pub id: String,
}

impl BareMetalServerChildOptions {
    pub fn new(bare_metal_server_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
            id: id.into(),
        }
    }
}

pub type GetBareMetalServerDiskOptions = BareMetalServerChildOptions;
pub type GetBareMetalServerNetworkInterfaceOptions = BareMetalServerChildOptions;
pub type DeleteBareMetalServerNetworkInterfaceOptions = BareMetalServerChildOptions;

#[derive(Debug, Clone)]
pub struct UpdateBareMetalServerChildOptions {
    pub bare_metal_server_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateBareMetalServerChildOptions {
    pub fn new(
        bare_metal_server_id: impl Into<String>,
        id: impl Into<String>,
        patch: MergePatch,
    ) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
            id: id.into(),
            patch,
        }
    }
}

pub type UpdateBareMetalServerDiskOptions = UpdateBareMetalServerChildOptions;
pub type UpdateBareMetalServerNetworkInterfaceOptions = UpdateBareMetalServerChildOptions;

#[derive(Debug, Clone)]
pub struct ListBareMetalServerNetworkInterfacesOptions {
    pub bare_metal_server_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListBareMetalServerNetworkInterfacesOptions {
    pub fn new(bare_metal_server_id: impl Into<String>) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
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
    ListBareMetalServerNetworkInterfacesOptions,
    BareMetalServerNetworkInterfaceCollection,
    list_bare_metal_server_network_interfaces
);

#[derive(Debug, Clone)]
pub struct CreateBareMetalServerNetworkInterfaceOptions {
    pub bare_metal_server_id: String,
    pub prototype: BareMetalServerNetworkInterfacePrototype,
}

impl CreateBareMetalServerNetworkInterfaceOptions {
    pub fn new(
        bare_metal_server_id: impl Into<String>,
        prototype: BareMetalServerNetworkInterfacePrototype,
    ) -> Self {
        Self {
            bare_metal_server_id: bare_metal_server_id.into(),
            prototype,
        }
    }
}

const DISKS_PATH: &str = "/bare_metal_servers/{bare_metal_server_id}/disks";
const DISK_PATH: &str = "/bare_metal_servers/{bare_metal_server_id}/disks/{id}";
const NETWORK_INTERFACES_PATH: &str =
    "/bare_metal_servers/{bare_metal_server_id}/network_interfaces";
const NETWORK_INTERFACE_PATH: &str =
    "/bare_metal_servers/{bare_metal_server_id}/network_interfaces/{id}";

fn child_request(
    request: ApiRequest,
    options: &BareMetalServerChildOptions,
) -> Result<ApiRequest> {
    request
        .path_param("bare_metal_server_id", &options.bare_metal_server_id)?
        .path_param("id", &options.id)
}

impl VpcService {
    pub async fn list_bare_metal_servers(
        &self,
        options: &ListBareMetalServersOptions,
    ) -> Result<DetailedResponse<BareMetalServerCollection>> {
        let request = ApiRequest::get("list_bare_metal_servers", "/bare_metal_servers")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("resource_group.id", options.resource_group_id.as_deref())
            .query_opt("name", options.name.as_deref())
            .query_opt("vpc.id", options.vpc_id.as_deref())
            .query_opt("vpc.crn", options.vpc_crn.as_deref())
            .query_opt("vpc.name", options.vpc_name.as_deref());
        self.send(request).await
    }

    pub async fn create_bare_metal_server(
        &self,
        options: &CreateBareMetalServerOptions,
    ) -> Result<DetailedResponse<BareMetalServer>> {
        let request = ApiRequest::post("create_bare_metal_server", "/bare_metal_servers")
            .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_bare_metal_server(
        &self,
        options: &GetBareMetalServerOptions,
    ) -> Result<DetailedResponse<BareMetalServer>> {
        let request = ApiRequest::get("get_bare_metal_server", "/bare_metal_servers/{id}")
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_bare_metal_server(
        &self,
        options: &UpdateBareMetalServerOptions,
    ) -> Result<DetailedResponse<BareMetalServer>> {
        let request = ApiRequest::patch("update_bare_metal_server", "/bare_metal_servers/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_bare_metal_server(
        &self,
        options: &DeleteBareMetalServerOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_bare_metal_server", "/bare_metal_servers/{id}")
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn start_bare_metal_server(
        &self,
        options: &StartBareMetalServerOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::post("start_bare_metal_server", "/bare_metal_servers/{id}/start")
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn stop_bare_metal_server(
        &self,
        options: &StopBareMetalServerOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::post("stop_bare_metal_server", "/bare_metal_servers/{id}/stop")
            .path_param("id", &options.id)?
            .json(&StopBody {
                stop_type: options.stop_type,
            })?;
        self.send_empty(request).await
    }

    pub async fn restart_bare_metal_server(
        &self,
        options: &RestartBareMetalServerOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::post(
            "restart_bare_metal_server",
            "/bare_metal_servers/{id}/restart",
        )
        .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn get_bare_metal_server_initialization(
        &self,
        options: &GetBareMetalServerInitializationOptions,
    ) -> Result<DetailedResponse<BareMetalServerInitialization>> {
        let request = ApiRequest::get(
            "get_bare_metal_server_initialization",
            "/bare_metal_servers/{id}/initialization",
        )
        .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn list_bare_metal_server_profiles(
        &self,
        options: &ListBareMetalServerProfilesOptions,
    ) -> Result<DetailedResponse<BareMetalServerProfileCollection>> {
        let request = ApiRequest::get(
            "list_bare_metal_server_profiles",
            "/bare_metal_server/profiles",
        )
        .query_opt("start", options.start.as_deref())
        .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn get_bare_metal_server_profile(
        &self,
        options: &GetBareMetalServerProfileOptions,
    ) -> Result<DetailedResponse<BareMetalServerProfile>> {
        let request = ApiRequest::get(
            "get_bare_metal_server_profile",
            "/bare_metal_server/profiles/{name}",
        )
        .path_param("name", &options.name)?;
        self.send(request).await
    }

    pub async fn list_bare_metal_server_disks(
        &self,
        options: &ListBareMetalServerDisksOptions,
    ) -> Result<DetailedResponse<BareMetalServerDiskCollection>> {
        let request = ApiRequest::get("list_bare_metal_server_disks", DISKS_PATH)
            .path_param("bare_metal_server_id", &options.bare_metal_server_id)?;
        self.send(request).await
    }

    pub async fn get_bare_metal_server_disk(
        &self,
        options: &GetBareMetalServerDiskOptions,
    ) -> Result<DetailedResponse<BareMetalServerDisk>> {
        let request = child_request(
            ApiRequest::get("get_bare_metal_server_disk", DISK_PATH),
            options,
        )?;
        self.send(request).await
    }

    pub async fn update_bare_metal_server_disk(
        &self,
        options: &UpdateBareMetalServerDiskOptions,
    ) -> Result<DetailedResponse<BareMetalServerDisk>> {
        let request = ApiRequest::patch("update_bare_metal_server_disk", DISK_PATH)
            .path_param("bare_metal_server_id", &options.bare_metal_server_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn list_bare_metal_server_network_interfaces(
        &self,
        options: &ListBareMetalServerNetworkInterfacesOptions,
    ) -> Result<DetailedResponse<BareMetalServerNetworkInterfaceCollection>> {
        let request = ApiRequest::get(
            "list_bare_metal_server_network_interfaces",
            NETWORK_INTERFACES_PATH,
        )
        .path_param("bare_metal_server_id", &options.bare_metal_server_id)?
        .query_opt("start", options.start.as_deref())
        .query_opt("limit", options.limit);
        self.send(request).await
    }

    /// Create a secondary interface. Creating a pci interface requires the server to be stopped.
    pub async fn create_bare_metal_server_network_interface(
        &self,
        options: &CreateBareMetalServerNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<BareMetalServerNetworkInterface>> {
        let request = ApiRequest::post(
            "create_bare_metal_server_network_interface",
            NETWORK_INTERFACES_PATH,
        )
        .path_param("bare_metal_server_id", &options.bare_metal_server_id)?
        .json(&options.prototype)?;
        self.send_polymorphic(request).await
    }

    pub async fn get_bare_metal_server_network_interface(
        &self,
        options: &GetBareMetalServerNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<BareMetalServerNetworkInterface>> {
        let request = child_request(
            ApiRequest::get("get_bare_metal_server_network_interface", NETWORK_INTERFACE_PATH),
            options,
        )?;
        self.send_polymorphic(request).await
    }

    pub async fn update_bare_metal_server_network_interface(
        &self,
        options: &UpdateBareMetalServerNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<BareMetalServerNetworkInterface>> {
        let request = ApiRequest::patch(
            "update_bare_metal_server_network_interface",
            NETWORK_INTERFACE_PATH,
        )
        .path_param("bare_metal_server_id", &options.bare_metal_server_id)?
        .path_param("id", &options.id)?
        .merge_patch(&options.patch);
        self.send_polymorphic(request).await
    }

    pub async fn delete_bare_metal_server_network_interface(
        &self,
        options: &DeleteBareMetalServerNetworkInterfaceOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = child_request(
            ApiRequest::delete(
                "delete_bare_metal_server_network_interface",
                NETWORK_INTERFACE_PATH,
            ),
            options,
        )?;
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn nic(interface_type: &str, extra: Value) -> Value {
        let mut value = json!({
            "id": "0717-nic",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/bare_metal_servers/0717-bms/network_interfaces/0717-nic",
            "name": "my-nic",
            "interface_type": interface_type,
            "type": "secondary"
        });
        merge_fields(&mut value, extra);
        value
    }

    fn merge_fields(target: &mut Value, extra: Value) {
        if let (Value::Object(target), Value::Object(extra)) = (target, extra) {
            target.extend(extra);
        }
    }

    #[test]
    fn pci_interface_lists_allowed_vlans() {
        let decoded: BareMetalServerNetworkInterface =
            serde_json::from_value(nic("pci", json!({"allowed_vlans": [4, 100]}))).unwrap();
        match decoded {
            BareMetalServerNetworkInterface::Pci(pci) => {
                assert_eq!(pci.allowed_vlans, vec![4, 100])
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn vlan_interface() {
        let decoded: BareMetalServerNetworkInterface = serde_json::from_value(nic(
            "vlan",
            json!({"vlan": 4, "allow_interface_to_float": false}),
        ))
        .unwrap();
        assert!(matches!(
            &decoded,
            BareMetalServerNetworkInterface::Vlan(vlan) if vlan.vlan == 4
        ));
        assert_eq!(decoded.common().role.as_deref(), Some("secondary"));
    }

    #[test]
    fn vlan_interface_without_vlan_id_is_rejected() {
        let decoded =
            serde_json::from_value::<BareMetalServerNetworkInterface>(nic("vlan", json!({})));
        assert!(decoded.is_err());
    }

    #[test]
    fn stop_body_names_type() {
        let body = serde_json::to_value(StopBody {
            stop_type: BareMetalServerStopType::Soft,
        })
        .unwrap();
        assert_eq!(body, json!({"type": "soft"}));
    }

    #[test]
    fn vlan_prototype() {
        let body = serde_json::to_value(
            BareMetalServerNetworkInterfacePrototype::vlan(Identity::id("0717-subnet"), 4)
                .with_allow_interface_to_float(true),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({
                "interface_type": "vlan",
                "subnet": {"id": "0717-subnet"},
                "vlan": 4,
                "allow_interface_to_float": true
            })
        );
    }
}
