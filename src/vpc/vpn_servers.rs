use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::pager::collection;
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::pager::pageable;
use crate::vpc::references::{
    Identity, ReservedIpReference, ResourceGroupReference, ResourceReference,
};
use crate::vpc::serviceclient::VpcService;
use crate::vpc::vpcs::IpAddress;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrnReference {
    pub crn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnServerIdentityProvider {
    pub provider_type: String,
}

/// How clients authenticate: by certificate (`client_ca`) or by username (`identity_provider`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnServerAuthentication {
    /// `certificate` or `username`.
    pub method: String,
    pub client_ca: Option<CrnReference>,
    pub identity_provider: Option<VpnServerIdentityProvider>,
}

/// A client-to-site VPN server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnServer {
    pub id: String,
    pub href: String,
    pub name: String,
    pub certificate: CrnReference,
    pub client_ip_pool: String,
    /// `deleting`, `failed`, `pending`, `stable`, `suspended`, `updating` or `waiting`.
    pub lifecycle_state: String,
    pub client_auto_delete: Option<bool>,
    pub client_auto_delete_timeout: Option<i64>,
    pub client_idle_timeout: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub enable_split_tunneling: Option<bool>,
    pub health_state: Option<String>,
    pub hostname: Option<String>,
    pub port: Option<i64>,
    /// `tcp` or `udp`.
    pub protocol: Option<String>,
    pub resource_group: Option<ResourceGroupReference>,
    pub vpc: Option<ResourceReference>,
    #[serde(default)]
    pub client_authentication: Vec<VpnServerAuthentication>,
    #[serde(default)]
    pub client_dns_server_ips: Vec<IpAddress>,
    #[serde(default)]
    pub private_ips: Vec<ReservedIpReference>,
    #[serde(default)]
    pub security_groups: Vec<ResourceReference>,
    #[serde(default)]
    pub subnets: Vec<ResourceReference>,
}

collection!(VpnServerCollection, vpn_servers: VpnServer);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VpnServerAuthenticationPrototype {
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ca: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_provider: Option<VpnServerIdentityProviderPrototype>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VpnServerIdentityProviderPrototype {
    pub provider_type: String,
}

impl VpnServerAuthenticationPrototype {
    /// Clients present a certificate signed by `client_ca_crn`.
    pub fn by_certificate(client_ca_crn: impl Into<String>) -> Self {
        Self {
            method: "certificate".to_string(),
            client_ca: Some(Identity::crn(client_ca_crn)),
            identity_provider: None,
        }
    }

    /// Clients log in with an IAM username and passcode.
    pub fn by_username() -> Self {
        Self {
            method: "username".to_string(),
            client_ca: None,
            identity_provider: Some(VpnServerIdentityProviderPrototype {
                provider_type: "iam".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VpnServerPrototype {
    pub certificate: Identity,
    pub client_authentication: Vec<VpnServerAuthenticationPrototype>,
    pub client_ip_pool: String,
    pub subnets: Vec<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_dns_server_ips: Option<Vec<IpAddress>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_idle_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_split_tunneling: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<Identity>>,
}

impl VpnServerPrototype {
    pub fn new(
        certificate_crn: impl Into<String>,
        client_authentication: Vec<VpnServerAuthenticationPrototype>,
        client_ip_pool: impl Into<String>,
        subnets: Vec<Identity>,
    ) -> Self {
        Self {
            certificate: Identity::crn(certificate_crn),
            client_authentication,
            client_ip_pool: client_ip_pool.into(),
            subnets,
            client_dns_server_ips: None,
            client_idle_timeout: None,
            enable_split_tunneling: None,
            name: None,
            port: None,
            protocol: None,
            resource_group: None,
            security_groups: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_port(mut self, port: i64, protocol: impl Into<String>) -> Self {
        self.port = Some(port);
        self.protocol = Some(protocol.into());
        self
    }

    pub fn with_split_tunneling(mut self, enabled: bool) -> Self {
        self.enable_split_tunneling = Some(enabled);
        self
    }

    pub fn with_client_dns_server_ips(mut self, addresses: Vec<String>) -> Self {
        self.client_dns_server_ips = Some(
            addresses
                .into_iter()
                .map(|address| IpAddress { address })
                .collect(),
        );
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
pub struct VpnServerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_authentication: Option<Vec<VpnServerAuthenticationPrototype>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_dns_server_ips: Option<Vec<IpAddress>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_idle_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip_pool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_split_tunneling: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<Identity>>,
}

impl AsPatch for VpnServerPatch {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnServerClient {
    pub id: String,
    pub href: String,
    pub client_ip: IpAddress,
    pub remote_ip: IpAddress,
    pub remote_port: i64,
    /// `connected` or `disconnected`.
    pub status: String,
    pub common_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub disconnected_at: Option<DateTime<Utc>>,
    pub resource_type: Option<String>,
    pub username: Option<String>,
}

collection!(VpnServerClientCollection, clients: VpnServerClient);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnServerRoute {
    pub id: String,
    pub href: String,
    pub name: String,
    /// `deliver`, `drop` or `translate`.
    pub action: String,
    pub destination: String,
    pub created_at: Option<DateTime<Utc>>,
    pub health_state: Option<String>,
    pub lifecycle_state: Option<String>,
    pub resource_type: Option<String>,
}

collection!(VpnServerRouteCollection, routes: VpnServerRoute);

#[derive(Debug, Clone, Serialize)]
pub struct VpnServerRoutePrototype {
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl VpnServerRoutePrototype {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            action: None,
            name: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VpnServerRoutePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for VpnServerRoutePatch {}

#[derive(Debug, Clone, Default)]
pub struct ListVpnServersOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub name: Option<String>,
    pub resource_group_id: Option<String>,
    pub sort: Option<String>,
}

impl ListVpnServersOptions {
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

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

pageable!(ListVpnServersOptions, VpnServerCollection, list_vpn_servers);

#[derive(Debug, Clone)]
pub struct CreateVpnServerOptions {
    pub prototype: VpnServerPrototype,
}

impl CreateVpnServerOptions {
    pub fn new(prototype: VpnServerPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct VpnServerIdOptions {
    pub id: String,
}

impl VpnServerIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetVpnServerOptions = VpnServerIdOptions;
pub type GetVpnServerClientConfigurationOptions = VpnServerIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateVpnServerOptions {
    pub id: String,
    pub patch: MergePatch,
    pub if_match: Option<String>,
}

impl UpdateVpnServerOptions {
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
pub struct DeleteVpnServerOptions {
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteVpnServerOptions {
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
pub struct ListVpnServerClientsOptions {
    pub vpn_server_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

impl ListVpnServerClientsOptions {
    pub fn new(vpn_server_id: impl Into<String>) -> Self {
        Self {
            vpn_server_id: vpn_server_id.into(),
            start: None,
            limit: None,
            sort: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

pageable!(ListVpnServerClientsOptions, VpnServerClientCollection, list_vpn_server_clients);

/// Addresses one client or route of a VPN server.
#[derive(Debug, Clone)]
pub struct VpnServerChildOptions {
    pub vpn_server_id: String,
    pub id: String,
}

impl VpnServerChildOptions {
    pub fn new(vpn_server_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            vpn_server_id: vpn_server_id.into(),
            id: id.into(),
        }
    }
}

pub type GetVpnServerClientOptions = VpnServerChildOptions;
pub type DeleteVpnServerClientOptions = VpnServerChildOptions;
pub type DisconnectVpnClientOptions = VpnServerChildOptions;
pub type GetVpnServerRouteOptions = VpnServerChildOptions;
pub type DeleteVpnServerRouteOptions = VpnServerChildOptions;

#[derive(Debug, Clone)]
pub struct ListVpnServerRoutesOptions {
    pub vpn_server_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

impl ListVpnServerRoutesOptions {
    pub fn new(vpn_server_id: impl Into<String>) -> Self {
        Self {
            vpn_server_id: vpn_server_id.into(),
            start: None,
            limit: None,
            sort: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pageable!(ListVpnServerRoutesOptions, VpnServerRouteCollection, list_vpn_server_routes);

#[derive(Debug, Clone)]
pub struct CreateVpnServerRouteOptions {
    pub vpn_server_id: String,
    pub prototype: VpnServerRoutePrototype,
}

impl CreateVpnServerRouteOptions {
    pub fn new(vpn_server_id: impl Into<String>, prototype: VpnServerRoutePrototype) -> Self {
        Self {
            vpn_server_id: vpn_server_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateVpnServerRouteOptions {
    pub vpn_server_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateVpnServerRouteOptions {
    pub fn new(vpn_server_id: impl Into<String>, id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            vpn_server_id: vpn_server_id.into(),
            id: id.into(),
            patch,
        }
    }
}

const CLIENT_PATH: &str = "/vpn_servers/{vpn_server_id}/clients/{id}";
const ROUTES_PATH: &str = "/vpn_servers/{vpn_server_id}/routes";
const ROUTE_PATH: &str = "/vpn_servers/{vpn_server_id}/routes/{id}";

fn child_request(request: ApiRequest, options: &VpnServerChildOptions) -> Result<ApiRequest> {
    request
        .path_param("vpn_server_id", &options.vpn_server_id)?
        .path_param("id", &options.id)
}

impl VpcService {
    pub async fn list_vpn_servers(
        &self,
        options: &ListVpnServersOptions,
    ) -> Result<DetailedResponse<VpnServerCollection>> {
        let request = ApiRequest::get("list_vpn_servers", "/vpn_servers")
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("name", options.name.as_deref())
            .query_opt("resource_group.id", options.resource_group_id.as_deref())
            .query_opt("sort", options.sort.as_deref());
        self.send(request).await
    }

    pub async fn create_vpn_server(
        &self,
        options: &CreateVpnServerOptions,
    ) -> Result<DetailedResponse<VpnServer>> {
        let request = ApiRequest::post(
            "create_vpn_server",
            "/vpn_servers",
        )
        .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_vpn_server(
        &self,
        options: &GetVpnServerOptions,
    ) -> Result<DetailedResponse<VpnServer>> {
        let request =
            ApiRequest::get("get_vpn_server", "/vpn_servers/{id}").path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_vpn_server(
        &self,
        options: &UpdateVpnServerOptions,
    ) -> Result<DetailedResponse<VpnServer>> {
        let request = ApiRequest::patch("update_vpn_server", "/vpn_servers/{id}")
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref())
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Deletion is asynchronous; the service answers `202 Accepted`.
    pub async fn delete_vpn_server(
        &self,
        options: &DeleteVpnServerOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_vpn_server", "/vpn_servers/{id}")
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref());
        self.send_empty(request).await
    }

    /// The OpenVPN client configuration file, as text.
    pub async fn get_vpn_server_client_configuration(
        &self,
        options: &GetVpnServerClientConfigurationOptions,
    ) -> Result<DetailedResponse<String>> {
        let request = ApiRequest::get(
            "get_vpn_server_client_configuration",
            "/vpn_servers/{id}/client_configuration",
        )
        .path_param("id", &options.id)?
        .accept("text/plain");
        self.send_text(request).await
    }

    pub async fn list_vpn_server_clients(
        &self,
        options: &ListVpnServerClientsOptions,
    ) -> Result<DetailedResponse<VpnServerClientCollection>> {
        let request = ApiRequest::get(
            "list_vpn_server_clients",
            "/vpn_servers/{vpn_server_id}/clients",
        )
        .path_param("vpn_server_id", &options.vpn_server_id)?
        .query_opt("start", options.start.as_deref())
        .query_opt("limit", options.limit)
        .query_opt("sort", options.sort.as_deref());
        self.send(request).await
    }

    pub async fn get_vpn_server_client(
        &self,
        options: &GetVpnServerClientOptions,
    ) -> Result<DetailedResponse<VpnServerClient>> {
        let request = child_request(
            ApiRequest::get("get_vpn_server_client", CLIENT_PATH),
            options,
        )?;
        self.send(request).await
    }

    /// Remove a client record; a connected client is disconnected first.
    pub async fn delete_vpn_server_client(
        &self,
        options: &DeleteVpnServerClientOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = child_request(
            ApiRequest::delete("delete_vpn_server_client", CLIENT_PATH),
            options,
        )?;
        self.send_empty(request).await
    }

    /// Disconnect a client; the record is kept until it is deleted or auto-deleted.
    pub async fn disconnect_vpn_client(
        &self,
        options: &DisconnectVpnClientOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = child_request(
            ApiRequest::post(
                "disconnect_vpn_client",
                "/vpn_servers/{vpn_server_id}/clients/{id}/disconnect",
            ),
            options,
        )?;
        self.send_empty(request).await
    }

    pub async fn list_vpn_server_routes(
        &self,
        options: &ListVpnServerRoutesOptions,
    ) -> Result<DetailedResponse<VpnServerRouteCollection>> {
        let request = ApiRequest::get("list_vpn_server_routes", ROUTES_PATH)
            .path_param("vpn_server_id", &options.vpn_server_id)?
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("sort", options.sort.as_deref());
        self.send(request).await
    }

    pub async fn create_vpn_server_route(
        &self,
        options: &CreateVpnServerRouteOptions,
    ) -> Result<DetailedResponse<VpnServerRoute>> {
        let request = ApiRequest::post("create_vpn_server_route", ROUTES_PATH)
            .path_param("vpn_server_id", &options.vpn_server_id)?
            .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_vpn_server_route(
        &self,
        options: &GetVpnServerRouteOptions,
    ) -> Result<DetailedResponse<VpnServerRoute>> {
        let request = child_request(ApiRequest::get("get_vpn_server_route", ROUTE_PATH), options)?;
        self.send(request).await
    }

    pub async fn update_vpn_server_route(
        &self,
        options: &UpdateVpnServerRouteOptions,
    ) -> Result<DetailedResponse<VpnServerRoute>> {
        let request = ApiRequest::patch("update_vpn_server_route", ROUTE_PATH)
            .path_param("vpn_server_id", &options.vpn_server_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_vpn_server_route(
        &self,
        options: &DeleteVpnServerRouteOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = child_request(
            ApiRequest::delete("delete_vpn_server_route", ROUTE_PATH),
            options,
        )?;
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prototype_with_both_authentication_methods() {
        let prototype = VpnServerPrototype::new(
            "crn:v1:bluemix:public:secrets-manager:us-south:a/123:456:secret:789",
            vec![
                VpnServerAuthenticationPrototype::by_certificate(
                    "crn:v1:bluemix:public:secrets-manager:us-south:a/123:456:secret:abc",
                ),
                VpnServerAuthenticationPrototype::by_username(),
            ],
            "172.16.0.0/16",
            vec![Identity::id("0717-subnet")],
        )
        .with_client_dns_server_ips(vec!["192.168.3.4".to_string()]);

        let body = serde_json::to_value(prototype).unwrap();
        assert_eq!(
            body["client_authentication"][1],
            json!({"method": "username", "identity_provider": {"provider_type": "iam"}})
        );
        assert_eq!(body["client_dns_server_ips"], json!([{"address": "192.168.3.4"}]));
        assert!(body.get("port").is_none());
    }

    #[test]
    fn client_decodes() {
        let client: VpnServerClient = serde_json::from_value(json!({
            "id": "r006-client",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/vpn_servers/r006-server/clients/r006-client",
            "client_ip": {"address": "172.16.0.7"},
            "remote_ip": {"address": "203.0.113.9"},
            "remote_port": 22225,
            "status": "connected",
            "created_at": "2024-01-28T23:36:46Z",
            "username": "alice@example.com"
        }))
        .unwrap();
        assert_eq!(client.remote_port, 22225);
        assert!(client.disconnected_at.is_none());
    }

    #[test]
    fn child_request_fills_both_ids() {
        let request = child_request(
            ApiRequest::post(
                "disconnect_vpn_client",
                "/vpn_servers/{vpn_server_id}/clients/{id}/disconnect",
            ),
            &DisconnectVpnClientOptions::new("r006-server", "r006-client"),
        )
        .unwrap();
        assert_eq!(request.path, "/vpn_servers/r006-server/clients/r006-client/disconnect");
    }
}
