use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::merge_patch::{AsPatch, MergePatch};
use crate::common::pager::collection;
use crate::common::polymorphic::{self, DecodeError, Polymorphic, unknown_variant, variant};
use crate::common::request::ApiRequest;
use crate::common::response::DetailedResponse;
use crate::error::Result;
use crate::vpc::pager::pageable;
use crate::vpc::references::{Identity, ResourceReference, ZoneReference};
use crate::vpc::serviceclient::VpcService;

/// A routing table attached to a VPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingTable {
    pub id: String,
    pub href: String,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub is_default: Option<bool>,
    pub lifecycle_state: Option<String>,
    pub resource_type: Option<String>,
    pub route_direct_link_ingress: Option<bool>,
    pub route_transit_gateway_ingress: Option<bool>,
    pub route_vpc_zone_ingress: Option<bool>,
    #[serde(default)]
    pub routes: Vec<ResourceReference>,
    #[serde(default)]
    pub subnets: Vec<ResourceReference>,
}

collection!(RoutingTableCollection, routing_tables: RoutingTable);

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoutingTablePrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_direct_link_ingress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_transit_gateway_ingress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_vpc_zone_ingress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<RoutePrototype>>,
}

impl RoutingTablePrototype {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_routes(mut self, routes: Vec<RoutePrototype>) -> Self {
        self.routes = Some(routes);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoutingTablePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_direct_link_ingress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_transit_gateway_ingress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_vpc_zone_ingress: Option<bool>,
}

impl AsPatch for RoutingTablePatch {}

/// A route in a routing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub href: String,
    pub name: String,
    pub destination: String,
    pub zone: ZoneReference,
    /// `delegate`, `delegate_vpc`, `deliver` or `drop`.
    pub action: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub lifecycle_state: Option<String>,
    #[serde(default, deserialize_with = "deserialize_next_hop")]
    pub next_hop: Option<RouteNextHop>,
    pub origin: Option<String>,
    pub priority: Option<i64>,
}

/// Where a route forwards matching traffic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RouteNextHop {
    Ip(RouteNextHopIp),
    VpnGatewayConnection(ResourceReference),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNextHopIp {
    pub address: String,
}

impl Polymorphic for RouteNextHop {
    const TYPE_NAME: &'static str = "RouteNextHop";
    const DISCRIMINATOR: &'static str = "address";

    fn discriminant(value: &Value) -> Option<&str> {
        if value.get("address").is_some() {
            Some("ip")
        } else if value.get("href").is_some() {
            Some("vpn_gateway_connection")
        } else {
            None
        }
    }

    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
        match discriminant {
            "ip" => variant(value).map(RouteNextHop::Ip),
            "vpn_gateway_connection" => variant(value).map(RouteNextHop::VpnGatewayConnection),
            other => Err(unknown_variant::<Self>(other)),
        }
    }
}

fn deserialize_next_hop<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<RouteNextHop>, D::Error> {
    polymorphic::deserialize(deserializer).map(Some)
}

collection!(RouteCollection, routes: Route);

/// The next hop of a new route: an IP address or a VPN gateway connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RouteNextHopPrototype {
    Ip { address: String },
    VpnGatewayConnection(Identity),
}

#[derive(Debug, Clone, Serialize)]
pub struct RoutePrototype {
    pub destination: String,
    pub zone: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hop: Option<RouteNextHopPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl RoutePrototype {
    pub fn new(destination: impl Into<String>, zone: Identity) -> Self {
        Self {
            destination: destination.into(),
            zone,
            action: None,
            name: None,
            next_hop: None,
            priority: None,
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

    pub fn with_next_hop(mut self, next_hop: RouteNextHopPrototype) -> Self {
        self.next_hop = Some(next_hop);
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoutePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hop: Option<RouteNextHopPrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl AsPatch for RoutePatch {}

#[derive(Debug, Clone)]
pub struct ListVpcRoutingTablesOptions {
    pub vpc_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub is_default: Option<bool>,
}

impl ListVpcRoutingTablesOptions {
    pub fn new(vpc_id: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            start: None,
            limit: None,
            is_default: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_is_default(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }
}

pageable!(
    ListVpcRoutingTablesOptions,
    RoutingTableCollection,
    list_vpc_routing_tables
);

#[derive(Debug, Clone)]
pub struct CreateVpcRoutingTableOptions {
    pub vpc_id: String,
    pub prototype: RoutingTablePrototype,
}

impl CreateVpcRoutingTableOptions {
    pub fn new(vpc_id: impl Into<String>, prototype: RoutingTablePrototype) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetVpcRoutingTableOptions {
    pub vpc_id: String,
    pub id: String,
}

impl GetVpcRoutingTableOptions {
    pub fn new(vpc_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateVpcRoutingTableOptions {
    pub vpc_id: String,
    pub id: String,
    pub patch: MergePatch,
    pub if_match: Option<String>,
}

impl UpdateVpcRoutingTableOptions {
    pub fn new(vpc_id: impl Into<String>, id: impl Into<String>, patch: MergePatch) -> Self {
        Self {
            vpc_id: vpc_id.into(),
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
pub struct DeleteVpcRoutingTableOptions {
    pub vpc_id: String,
    pub id: String,
    pub if_match: Option<String>,
}

impl DeleteVpcRoutingTableOptions {
    pub fn new(vpc_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
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
pub struct ListVpcRoutingTableRoutesOptions {
    pub vpc_id: String,
    pub routing_table_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl ListVpcRoutingTableRoutesOptions {
    pub fn new(vpc_id: impl Into<String>, routing_table_id: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            routing_table_id: routing_table_id.into(),
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
    ListVpcRoutingTableRoutesOptions,
    RouteCollection,
    list_vpc_routing_table_routes
);

#[derive(Debug, Clone)]
pub struct CreateVpcRoutingTableRouteOptions {
    pub vpc_id: String,
    pub routing_table_id: String,
    pub prototype: RoutePrototype,
}

impl CreateVpcRoutingTableRouteOptions {
    pub fn new(
        vpc_id: impl Into<String>,
        routing_table_id: impl Into<String>,
        prototype: RoutePrototype,
    ) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            routing_table_id: routing_table_id.into(),
            prototype,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VpcRoutingTableRouteOptions {
    pub vpc_id: String,
    pub routing_table_id: String,
    pub id: String,
}

impl VpcRoutingTableRouteOptions {
    pub fn new(
        vpc_id: impl Into<String>,
        routing_table_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            routing_table_id: routing_table_id.into(),
            id: id.into(),
        }
    }
}

pub type GetVpcRoutingTableRouteOptions = VpcRoutingTableRouteOptions;
pub type DeleteVpcRoutingTableRouteOptions = VpcRoutingTableRouteOptions;

#[derive(Debug, Clone)]
pub struct UpdateVpcRoutingTableRouteOptions {
    pub vpc_id: String,
    pub routing_table_id: String,
    pub id: String,
    pub patch: MergePatch,
}

impl UpdateVpcRoutingTableRouteOptions {
    pub fn new(
        vpc_id: impl Into<String>,
        routing_table_id: impl Into<String>,
        id: impl Into<String>,
        patch: MergePatch,
    ) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            routing_table_id: routing_table_id.into(),
            id: id.into(),
            patch,
        }
    }
}

const ROUTING_TABLE_PATH: &str = "/vpcs/{vpc_id}/routing_tables/{id}";
const ROUTE_PATH: &str = "/vpcs/{vpc_id}/routing_tables/{routing_table_id}/routes/{id}";

impl VpcService {
    pub async fn list_vpc_routing_tables(
        &self,
        options: &ListVpcRoutingTablesOptions,
    ) -> Result<DetailedResponse<RoutingTableCollection>> {
        let request = ApiRequest::get("list_vpc_routing_tables", "/vpcs/{vpc_id}/routing_tables")
            .path_param("vpc_id", &options.vpc_id)?
            .query_opt("start", options.start.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("is_default", options.is_default);
        self.send(request).await
    }

    pub async fn create_vpc_routing_table(
        &self,
        options: &CreateVpcRoutingTableOptions,
    ) -> Result<DetailedResponse<RoutingTable>> {
        let request = ApiRequest::post("create_vpc_routing_table", "/vpcs/{vpc_id}/routing_tables")
            .path_param("vpc_id", &options.vpc_id)?
            .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_vpc_routing_table(
        &self,
        options: &GetVpcRoutingTableOptions,
    ) -> Result<DetailedResponse<RoutingTable>> {
        let request = ApiRequest::get("get_vpc_routing_table", ROUTING_TABLE_PATH)
            .path_param("vpc_id", &options.vpc_id)?
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_vpc_routing_table(
        &self,
        options: &UpdateVpcRoutingTableOptions,
    ) -> Result<DetailedResponse<RoutingTable>> {
        let request = ApiRequest::patch("update_vpc_routing_table", ROUTING_TABLE_PATH)
            .path_param("vpc_id", &options.vpc_id)?
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref())
            .merge_patch(&options.patch);
        self.send(request).await
    }

    /// Delete a routing table. The default routing table cannot be deleted.
    pub async fn delete_vpc_routing_table(
        &self,
        options: &DeleteVpcRoutingTableOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_vpc_routing_table", ROUTING_TABLE_PATH)
            .path_param("vpc_id", &options.vpc_id)?
            .path_param("id", &options.id)?
            .if_match(options.if_match.as_deref());
        self.send_empty(request).await
    }

    pub async fn list_vpc_routing_table_routes(
        &self,
        options: &ListVpcRoutingTableRoutesOptions,
    ) -> Result<DetailedResponse<RouteCollection>> {
        let request = ApiRequest::get(
            "list_vpc_routing_table_routes",
            "/vpcs/{vpc_id}/routing_tables/{routing_table_id}/routes",
        )
        .path_param("vpc_id", &options.vpc_id)?
        .path_param("routing_table_id", &options.routing_table_id)?
        .query_opt("start", options.start.as_deref())
        .query_opt("limit", options.limit);
        self.send(request).await
    }

    pub async fn create_vpc_routing_table_route(
        &self,
        options: &CreateVpcRoutingTableRouteOptions,
    ) -> Result<DetailedResponse<Route>> {
        let request = ApiRequest::post(
            "create_vpc_routing_table_route",
            "/vpcs/{vpc_id}/routing_tables/{routing_table_id}/routes",
        )
        .path_param("vpc_id", &options.vpc_id)?
        .path_param("routing_table_id", &options.routing_table_id)?
        .json(&options.prototype)?;
        self.send(request).await
    }

    pub async fn get_vpc_routing_table_route(
        &self,
        options: &GetVpcRoutingTableRouteOptions,
    ) -> Result<DetailedResponse<Route>> {
        let request = ApiRequest::get("get_vpc_routing_table_route", ROUTE_PATH)
            .path_param("vpc_id", &options.vpc_id)?
            .path_param("routing_table_id", &options.routing_table_id)?
            .path_param("id", &options.id)?;
        self.send(request).await
    }

    pub async fn update_vpc_routing_table_route(
        &self,
        options: &UpdateVpcRoutingTableRouteOptions,
    ) -> Result<DetailedResponse<Route>> {
        let request = ApiRequest::patch("update_vpc_routing_table_route", ROUTE_PATH)
            .path_param("vpc_id", &options.vpc_id)?
            .path_param("routing_table_id", &options.routing_table_id)?
            .path_param("id", &options.id)?
            .merge_patch(&options.patch);
        self.send(request).await
    }

    pub async fn delete_vpc_routing_table_route(
        &self,
        options: &DeleteVpcRoutingTableRouteOptions,
    ) -> Result<DetailedResponse<()>> {
        let request = ApiRequest::delete("delete_vpc_routing_table_route", ROUTE_PATH)
            .path_param("vpc_id", &options.vpc_id)?
            .path_param("routing_table_id", &options.routing_table_id)?
            .path_param("id", &options.id)?;
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn route(next_hop: Value) -> Value {
        json!({
            "id": "r006-route",
            "href": "https://us-south.iaas.cloud.ibm.com/v1/vpcs/r006-1/routing_tables/r006-rt/routes/r006-route",
            "name": "my-route",
            "destination": "192.168.3.0/24",
            "zone": {"name": "us-south-1", "href": "https://us-south.iaas.cloud.ibm.com/v1/regions/us-south/zones/us-south-1"},
            "next_hop": next_hop
        })
    }

    #[test]
    fn next_hop_with_address_is_ip() {
        let decoded: Route = serde_json::from_value(
            route(json!({"address": "192.168.3.4"})),
        )
        .unwrap();
        assert_eq!(
            decoded.next_hop,
            Some(RouteNextHop::Ip(RouteNextHopIp {
                address: "192.168.3.4".to_string()
            }))
        );
    }

    #[test]
    fn next_hop_reference_is_vpn_connection() {
        let decoded: Route = serde_json::from_value(route(json!({
            "href": "https://us-south.iaas.cloud.ibm.com/v1/vpn_gateways/g/connections/c",
            "id": "c",
            "resource_type": "vpn_gateway_connection"
        })))
        .unwrap();
        assert!(matches!(
            decoded.next_hop,
            Some(RouteNextHop::VpnGatewayConnection(_))
        ));
    }

    #[test]
    fn next_hop_prototype_serializes_flat() {
        let prototype = RoutePrototype::new("192.168.3.0/24", Identity::name("us-south-1"))
            .with_next_hop(RouteNextHopPrototype::Ip {
                address: "192.168.3.4".to_string(),
            });
        let body = serde_json::to_value(prototype).unwrap();
        assert_eq!(body["next_hop"], json!({"address": "192.168.3.4"}));
    }
}
