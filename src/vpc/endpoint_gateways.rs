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
use crate::vpc::subnets::ReservedIp;

/// The service an endpoint gateway connects to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointGatewayTarget {
    /// `provider_cloud_service` or `provider_infrastructure_service`.
    pub resource_type: String,
    pub crn: Option<String>,
    pub name: Option<String>,
}

/// A private path from a VPC to an IBM Cloud service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointGateway {
    pub id: String,
    pub href: String,
    pub name: String,
    pub target: EndpointGatewayTarget,
    pub vpc: ResourceReference,
    /// `deleting`, `failed`, `pending`, `stable`, `suspended`, `updating` or `waiting`.
    pub lifecycle_state: String,
    pub allow_dns_resolution_binding: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub crn: Option<String>,
    pub health_state: Option<String>,
    pub resource_group: Option<ResourceGroupReference>,
    pub resource_type: Option<String>,
    pub service_endpoint: Option<String>,
    #[serde(default)]
    pub ips: Vec<ReservedIpReference>,
    #[serde(default)]
    pub security_groups: Vec<ResourceReference>,
    #[serde(default)]
    pub service_endpoints: Vec<String>,
}

collection!(EndpointGatewayCollection, endpoint_gateways: EndpointGateway);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointGatewayTargetPrototype {
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EndpointGatewayTargetPrototype {
    pub fn cloud_service(crn: impl Into<String>) -> Self {
        Self {
            resource_type: "provider_cloud_service".to_string(),
            crn: Some(crn.into()),
            name: None,
        }
    }

    pub fn infrastructure_service(name: impl Into<String>) -> Self {
        Self {
            resource_type: "provider_infrastructure_service".to_string(),
            crn: None,
            name: Some(name.into()),
        }
    }
}

/// An IP for the gateway: an existing unbound reserved IP, or a new one in `subnet`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EndpointGatewayReservedIp {
    Existing(Identity),
    New {
        subnet: Identity,
        #[serde(skip_serializing_if = "Option::is_none")]
        address: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        auto_delete: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointGatewayPrototype {
    pub target: EndpointGatewayTargetPrototype,
    pub vpc: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_dns_resolution_binding: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ips: Option<Vec<EndpointGatewayReservedIp>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<Identity>>,
}

impl EndpointGatewayPrototype {
    pub fn new(target: EndpointGatewayTargetPrototype, vpc: Identity) -> Self {
        Self {
            target,
            vpc,
            allow_dns_resolution_binding: None,
            ips: None,
            name: None,
            resource_group: None,
            security_groups: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_ips(mut self, ips: Vec<EndpointGatewayReservedIp>) -> Self {
        self.ips = Some(ips);
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
pub struct EndpointGatewayPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_dns_resolution_binding: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AsPatch for EndpointGatewayPatch {}

collection!(EndpointGatewayIpCollection, ips: ReservedIp);

#[derive(Debug, Clone, Default)]
pub struct ListEndpointGatewaysOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub name: Option<String>,
    pub resource_group_id: Option<String>,
}

impl ListEndpointGatewaysOptions {
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

    pub fn with_resource_group_id(mut self, resource_group_id: impl Into<String>) -> Self {
        self.resource_group_id = Some(resource_group_id.into());
        self
    }
}

pageable!(ListEndpointGatewaysOptions, EndpointGatewayCollection, list_endpoint_gateways);

#[derive(Debug, Clone)]
pub struct CreateEndpointGatewayOptions {
    pub prototype: EndpointGatewayPrototype,
}

impl CreateEndpointGatewayOptions {
    pub fn new(prototype: EndpointGatewayPrototype) -> Self {
        Self { prototype }
    }
}

#[derive(Debug, Clone)]
pub struct EndpointGatewayIdOptions {
    pub id: String,
}

impl EndpointGatewayIdOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub type GetEndpointGatewayOptions = EndpointGatewayIdOptions;
pub type DeleteEndpointGatewayOptions = EndpointGatewayIdOptions;

#[derive(Debug, Clone)]
pub struct UpdateEndpointGatewayOptions {
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateEndpointGatewayOptions {
    pub fn new(id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListEndpointGatewayIpsOptions {
    pub endpoint_gateway_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

impl ListEndpointGatewayIpsOptions {
    pub fn new(endpoint_gateway_id: impl Into<String>) -> Self {
        Self {
            endpoint_gateway_id: endpoint_gateway_id.into(),
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

pageable!(ListEndpointGatewayIpsOptions, EndpointGatewayIpCollection, list_endpoint_gateway_ips);

/// A reserved IP of an endpoint gateway.
#[derive(Debug, Clone)]
pub struct EndpointGatewayIpOptions {
    pub endpoint_gateway_id: String,
    pub id: String,
}

impl EndpointGatewayIpOptions {
    pub fn new(endpoint_gateway_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            endpoint_gateway_id: endpoint_gateway_id.into(),
            id: id.into(),
        }
    }
}

pub type GetEndpointGatewayIpOptions = EndpointGatewayIpOptions;
pub type AddEndpointGatewayIpOptions = EndpointGatewayIpOptions;
pub type RemoveEndpointGatewayIpOptions = EndpointGatewayIpOptions;

const IP_PATH: &str = "/endpoint_gateways/{endpoint_gateway_id}/ips/{id}";

fn ip_request(request: ApiRequest, options: &EndpointGatewayIpOptions) -> Result<ApiRequest> {
    request
        .path_param("endpoint_gateway_id", &options.endpoint_gateway_id)?
        .path_param("id", &options.id)
}

impl VpcService {
    pub async fn list_endpoint_gateways(
        &self,
        options: &ListEndpointGatewaysOptions,
    ) -> Result<DetailedResponse<EndpointGatewayCollection>> {
        let request = ApiRequest::get("list_endpoint_gateways", "/endpoint_gateways")
            .query_opt("name", options.name.as_deref())
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("resource_group.id", options.resource_group_id.as_deref());
        self.send(request).await
    }

    pub async fn create_endpoint_gateway(
        &self,
        options: &CreateEndpointGatewayOptions,
    ) -> Result<DetailedResponse<EndpointGateway>> {
        let request = ApiRequest::post(
            "create_endpoint_gateway",
            "/endpoint_gateways",
        )
        .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_endpoint_gateway(
        &self,
        options: &GetEndpointGatewayOptions,
    ) -> Result<DetailedResponse<EndpointGateway>> {
        let request = ApiRequest::get("get_endpoint_gateway", "/endpoint_gateways/{id}")
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_endpoint_gateway(
        &self,
        options: &UpdateEndpointGatewayOptions,
    ) -> Result<DetailedResponse<EndpointGateway>> {
        let request = ApiRequest::patch("update_endpoint_gateway", "/endpoint_gateways/{id}")
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_endpoint_gateway(
        &self,
        options: &DeleteEndpointGatewayOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_endpoint_gateway", "/endpoint_gateways/{id}")
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }

    pub async fn list_endpoint_gateway_ips(
        &self,
        options: &ListEndpointGatewayIpsOptions,
    ) -> Result<DetailedResponse<EndpointGatewayIpCollection>> {
        let request = ApiRequest::get(
            "list_endpoint_gateway_ips",
            "/endpoint_gateways/{endpoint_gateway_id}/ips",
        )
        .path_param("endpoint_gateway_id", &options.endpoint_gateway_id)?
        .query_opt("start", options.start.as_deref())
        .query_opt("limit", options.limit)
        .query_opt("sort", options.sort.as_deref());
        self.send(request).await
    }

    pub async fn get_endpoint_gateway_ip(
        &self,
        options: &GetEndpointGatewayIpOptions,
    ) -> Result<DetailedResponse<ReservedIp>> {
        let request = ip_request(ApiRequest::get("get_endpoint_gateway_ip", IP_PATH), options)?;
        self.send(request).await
    }

    /// Bind an existing unbound reserved IP to the gateway.
    pub async fn add_endpoint_gateway_ip(
        &self,
        options: &AddEndpointGatewayIpOptions,
    ) -> Result<DetailedResponse<ReservedIp>> {
        let request = ip_request(ApiRequest::put("add_endpoint_gateway_ip", IP_PATH), options)?;
        self.send(request).await
    }

    /// Unbind a reserved IP; it is deleted if its `auto_delete` is set.
    pub async fn remove_endpoint_gateway_ip(
        &self,
        options: &RemoveEndpointGatewayIpOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ip_request(
            ApiRequest::delete("remove_endpoint_gateway_ip", IP_PATH),
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
    fn prototype_mixes_existing_and_new_ips() {
        let prototype = EndpointGatewayPrototype::new(
            EndpointGatewayTargetPrototype::infrastructure_service("ibm-ntp-server"),
            Identity::id("r006-vpc"),
        )
        .with_ips(vec![
            EndpointGatewayReservedIp::Existing(Identity::id("0717-ip")),
            EndpointGatewayReservedIp::New {
                subnet: Identity::id("0717-subnet"),
                address: None,
                auto_delete: Some(true),
                name: None,
            },
        ]);

        let body = serde_json::to_value(prototype).unwrap();
        assert_eq!(
            body["target"],
            json!({"resource_type": "provider_infrastructure_service", "name": "ibm-ntp-server"})
        );
        assert_eq!(body["ips"][0], json!({"id": "0717-ip"}));
        assert_eq!(body["ips"][1], json!({"subnet": {"id": "0717-subnet"}, "auto_delete": true}));
    }

    #[test]
    fn ip_path_uses_both_ids() {
        let request = ip_request(
            ApiRequest::put("add_endpoint_gateway_ip", IP_PATH),
            &AddEndpointGatewayIpOptions::new("r006-egw", "0717-ip"),
        )
        .unwrap();
        assert_eq!(request.path, "/endpoint_gateways/r006-egw/ips/0717-ip");
    }
}
