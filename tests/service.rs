//! Service behavior against a mocked VPC endpoint.
//!
//! Covers request decoration, error mapping, timeouts, pagination and token caching.

use ibmcloud_vpc_client::auth::Authenticator;
use ibmcloud_vpc_client::common::merge_patch::AsPatch;
use ibmcloud_vpc_client::vpc::network_acls::{
    GetNetworkAclRuleOptions, NetworkAclRule, RuleProtocol,
};
use ibmcloud_vpc_client::vpc::volumes::{UpdateVolumeOptions, VolumePatch};
use ibmcloud_vpc_client::vpc::vpcs::{
    CreateVpcOptions, GetVpcOptions, ListVpcsOptions, VpcPrototype,
};
use ibmcloud_vpc_client::vpc::vpn_gateways::CheckVpnGatewayConnectionLocalCidrOptions;
use ibmcloud_vpc_client::vpc::vpn_servers::GetVpnServerClientConfigurationOptions;
use ibmcloud_vpc_client::{ApiErrorKind, Error, VpcService, VpcServiceOptions};
use serde_json::{Value, json};
use wiremock::matchers::{bearer_token, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> VpcService {
    VpcService::new(VpcServiceOptions {
        url: Some(server.uri()),
        authenticator: Some(Authenticator::bearer("test-token")),
        ..Default::default()
    })
    .unwrap()
}

fn vpc(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("vpc-{id}"),
        "status": "available",
        "crn": format!("crn:v1:bluemix:public:is:us-south:a/123456::vpc:{id}"),
        "href": format!("https://us-south.iaas.cloud.ibm.com/v1/vpcs/{id}")
    })
}

fn error_body(code: &str, message: &str, trace: &str) -> Value {
    json!({
        "errors": [{"code": code, "message": message, "more_info": "https://cloud.ibm.com/docs/vpc"}],
        "trace": trace
    })
}

mod requests {
    use super::*;

    #[tokio::test]
    async fn create_vpc_returns_created_resource() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/vpcs"))
            .and(body_json(json!({"name": "my-vpc"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(vpc("r006-abc")))
            .expect(1)
            .mount(&server)
            .await;

        let response = service(&server)
            .create_vpc(&CreateVpcOptions::new(VpcPrototype::new().with_name("my-vpc")))
            .await
            .unwrap();

        assert_eq!(response.status_code.as_u16(), 201);
        assert_eq!(response.result.id, "r006-abc");
    }

    #[tokio::test]
    async fn every_request_carries_version_generation_and_bearer() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vpcs/r006-abc"))
            .and(query_param("version", "2024-04-30"))
            .and(query_param("generation", "2"))
            .and(bearer_token("test-token"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vpc("r006-abc")))
            .expect(1)
            .mount(&server)
            .await;

        let response = service(&server)
            .get_vpc(&GetVpcOptions::new("r006-abc"))
            .await
            .unwrap();
        assert_eq!(response.result.status, "available");

        let requests = server.received_requests().await.unwrap();
        let analytics = requests[0]
            .headers
            .get("X-IBMCloud-SDK-Analytics")
            .and_then(|value| value.to_str().ok())
            .unwrap();
        assert!(analytics.contains("operation_id=get_vpc"));
        assert!(requests[0].headers.get("X-Correlation-Id").is_some());
    }

    #[tokio::test]
    async fn empty_path_parameter_is_rejected_locally() {
        let server = MockServer::start().await;

        let error = service(&server)
            .get_vpc(&GetVpcOptions::new(""))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::InvalidRequest { operation: "get_vpc", .. }));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn client_configuration_is_plain_text() {
        let server = MockServer::start().await;
        let config = "client\ndev tun\nproto udp\nremote 169.61.161.150 443\n";

        Mock::given(method("GET"))
            .and(path("/vpn_servers/r006-vpn/client_configuration"))
            .and(header("Accept", "text/plain"))
            .respond_with(ResponseTemplate::new(200).set_body_string(config))
            .expect(1)
            .mount(&server)
            .await;

        let response = service(&server)
            .get_vpn_server_client_configuration(&GetVpnServerClientConfigurationOptions::new(
                "r006-vpn",
            ))
            .await
            .unwrap();

        assert_eq!(response.result, config);
    }

    #[tokio::test]
    async fn network_acl_rule_decodes_by_protocol() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/network_acls/r006-acl/rules/r006-rule"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "r006-rule",
                "href": "https://us-south.iaas.cloud.ibm.com/v1/network_acls/r006-acl/rules/r006-rule",
                "name": "allow-ssh",
                "action": "allow",
                "direction": "inbound",
                "ip_version": "ipv4",
                "protocol": "tcp",
                "source": "0.0.0.0/0",
                "destination": "10.0.0.0/24",
                "port_min": 22,
                "port_max": 22,
                "source_port_min": 1,
                "source_port_max": 65535
            })))
            .mount(&server)
            .await;

        let rule = service(&server)
            .get_network_acl_rule(&GetNetworkAclRuleOptions::new("r006-acl", "r006-rule"))
            .await
            .unwrap()
            .into_result();

        match rule {
            NetworkAclRule::TcpUdp(rule) => {
                assert_eq!(rule.common.protocol, RuleProtocol::Tcp);
                assert_eq!((rule.port_min, rule.port_max), (22, 22));
            }
            other => panic!("unexpected rule: {other:?}"),
        }
    }
}

mod errors {
    use super::*;

    #[tokio::test]
    async fn not_found_keeps_request_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vpcs/r006-missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(error_body("not_found", "VPC not found", "req-1")),
            )
            .mount(&server)
            .await;

        let error = service(&server)
            .get_vpc(&GetVpcOptions::new("r006-missing"))
            .await
            .unwrap_err();

        assert!(error.is_not_found());
        assert_eq!(error.kind(), Some(ApiErrorKind::NotFound));
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.request_id(), Some("req-1"));
    }

    #[tokio::test]
    async fn validation_failure_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/volumes/r006-vol"))
            .respond_with(ResponseTemplate::new(400).set_body_json(error_body(
                "missing_if_match",
                "An If-Match header is required",
                "req-2",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let patch = VolumePatch {
            capacity: Some(200),
            ..Default::default()
        }
        .as_patch()
        .unwrap();

        let error = service(&server)
            .update_volume(&UpdateVolumeOptions::new("r006-vol", patch))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), Some(ApiErrorKind::Validation));
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("If-Match").is_none());
        assert_eq!(
            requests[0].headers.get("Content-Type").and_then(|v| v.to_str().ok()),
            Some("application/merge-patch+json")
        );
    }

    #[tokio::test]
    async fn stale_etag_is_precondition_failed() {
        let server = MockServer::start().await;
        let etag = "W/\"96d225c4-56bd-43d9-98fc-d7148e5c5028\"";

        Mock::given(method("PATCH"))
            .and(path("/volumes/r006-vol"))
            .and(header("If-Match", etag))
            .respond_with(ResponseTemplate::new(412).set_body_json(error_body(
                "precondition_failed",
                "The resource has changed",
                "req-3",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let patch = VolumePatch {
            name: Some("renamed".to_string()),
            ..Default::default()
        }
        .as_patch()
        .unwrap();

        let error = service(&server)
            .update_volume(&UpdateVolumeOptions::new("r006-vol", patch).with_if_match(etag))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), Some(ApiErrorKind::PreconditionFailed));
    }

    #[tokio::test]
    async fn cidr_check_is_empty_success_or_not_found() {
        let server = MockServer::start().await;
        let cidr_path = "/vpn_gateways/r006-gw/connections/r006-conn/local_cidrs/10.45.0.0/24";

        Mock::given(method("GET"))
            .and(path(cidr_path))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let service = service(&server);
        let existing = CheckVpnGatewayConnectionLocalCidrOptions::new(
            "r006-gw",
            "r006-conn",
            "10.45.0.0",
            "24",
        );
        let present = service
            .check_vpn_gateway_connection_local_cidr(&existing)
            .await
            .unwrap();
        assert_eq!(present.status_code.as_u16(), 204);

        let missing = CheckVpnGatewayConnectionLocalCidrOptions::new(
            "r006-gw",
            "r006-conn",
            "10.46.0.0",
            "24",
        );
        let error = service
            .check_vpn_gateway_connection_local_cidr(&missing)
            .await
            .unwrap_err();
        assert!(error.is_not_found());
    }
}

mod timeouts {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use ibmcloud_vpc_client::auth::token::IamTokenManager;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn service_with_timeout(url: String, timeout: Option<Duration>) -> VpcService {
        VpcService::new(VpcServiceOptions {
            url: Some(url),
            authenticator: Some(Authenticator::bearer("test-token")),
            timeout,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn slow_headers_time_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vpcs/r006-slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(vpc("r006-slow"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let service = service_with_timeout(server.uri(), Some(Duration::from_millis(200)));
        let error = service
            .get_vpc(&GetVpcOptions::new("r006-slow"))
            .await
            .unwrap_err();

        match error {
            Error::Timeout { operation, timeout } => {
                assert_eq!(operation, "get_vpc");
                assert_eq!(timeout, Duration::from_millis(200));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn stalled_body_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let stalled = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await.unwrap();
            let head = concat!(
                "HTTP/1.1 200 OK\r\n",
                "Content-Type: application/json\r\n",
                "Content-Length: 100\r\n\r\n",
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(br#"{"id": "r006-"#).await.unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let service = service_with_timeout(
            format!("http://{address}"),
            Some(Duration::from_millis(300)),
        );
        let started = Instant::now();
        let result = tokio::time::timeout(
            Duration::from_secs(3),
            service.get_vpc(&GetVpcOptions::new("r006-abc")),
        )
        .await
        .expect("the service timeout should fire first");

        assert!(matches!(result, Err(Error::Timeout { operation: "get_vpc", .. })));
        assert!(started.elapsed() < Duration::from_secs(3));
        stalled.abort();
    }

    #[tokio::test]
    async fn per_call_timeout_overrides_the_service() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vpcs/r006-slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(vpc("r006-slow"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let service = service_with_timeout(server.uri(), None);
        let error = service
            .with_timeout(Duration::from_millis(100))
            .get_vpc(&GetVpcOptions::new("r006-slow"))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Timeout { operation: "get_vpc", .. }));
        assert_eq!(service.timeout(), None);
    }

    #[tokio::test]
    async fn stalled_token_exchange_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "late", "expires_in": 3600}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let manager = IamTokenManager::new("my-apikey", server.uri())
            .with_timeout(Duration::from_millis(200));
        let service = VpcService::new(VpcServiceOptions {
            url: Some(server.uri()),
            authenticator: Some(Authenticator::Iam(Arc::new(manager))),
            ..Default::default()
        })
        .unwrap();

        let error = service
            .get_vpc(&GetVpcOptions::new("r006-abc"))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Timeout { operation: "request_iam_token", .. }));
    }
}

mod paging {
    use std::collections::HashSet;

    use super::*;

    #[tokio::test]
    async fn get_all_follows_next_links() {
        let server = MockServer::start().await;
        let total_count = 3;

        Mock::given(method("GET"))
            .and(path("/vpcs"))
            .and(query_param("start", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "vpcs": [vpc("r006-c")],
                "limit": 2,
                "total_count": total_count,
                "first": {"href": format!("{}/vpcs?limit=2", server.uri())}
            })))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/vpcs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "vpcs": [vpc("r006-a"), vpc("r006-b")],
                "limit": 2,
                "total_count": total_count,
                "first": {"href": format!("{}/vpcs?limit=2", server.uri())},
                "next": {"href": format!("{}/vpcs?limit=2&start=page-2", server.uri())}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = service(&server);
        let mut pager = service.pager(ListVpcsOptions::new().with_limit(2));
        let mut ids = Vec::new();
        while let Some(page) = pager.next_page().await.unwrap() {
            ids.extend(page.into_iter().map(|vpc| vpc.id));
        }

        assert_eq!(ids, vec!["r006-a", "r006-b", "r006-c"]);
        assert_eq!(ids.len(), total_count);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), total_count);
        assert_eq!(pager.pages_fetched(), 2);
        assert!(!pager.has_next());
        assert!(pager.next_page().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn next_link_without_cursor_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vpcs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "vpcs": [vpc("r006-a")],
                "limit": 1,
                "first": {"href": format!("{}/vpcs?limit=1", server.uri())},
                "next": {"href": format!("{}/vpcs?limit=1", server.uri())}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = service(&server);
        let error = service
            .pager(ListVpcsOptions::new().with_limit(1))
            .get_all()
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Decode { .. }));
    }
}

mod authentication {
    use tokio::task::JoinSet;

    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_calls_share_one_token_exchange() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "iam-access-token",
                "refresh_token": "not-used",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/vpcs/r006-abc"))
            .and(bearer_token("iam-access-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vpc("r006-abc")))
            .expect(8)
            .mount(&server)
            .await;

        let service = VpcService::new(VpcServiceOptions {
            url: Some(server.uri()),
            authenticator: Some(Authenticator::iam_with_url("my-apikey", server.uri())),
            ..Default::default()
        })
        .unwrap();

        let mut calls = JoinSet::new();
        for _ in 0..8 {
            let service = service.clone();
            calls.spawn(async move { service.get_vpc(&GetVpcOptions::new("r006-abc")).await });
        }
        while let Some(result) = calls.join_next().await {
            assert_eq!(result.unwrap().unwrap().result.id, "r006-abc");
        }
    }

    #[tokio::test]
    async fn rejected_api_key_stops_the_call() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errorCode": "BXNIM0415E",
                "errorMessage": "Provided API key could not be found"
            })))
            .mount(&server)
            .await;

        let service = VpcService::new(VpcServiceOptions {
            url: Some(server.uri()),
            authenticator: Some(Authenticator::iam_with_url("bad-apikey", server.uri())),
            ..Default::default()
        })
        .unwrap();

        let error = service
            .get_vpc(&GetVpcOptions::new("r006-abc"))
            .await
            .unwrap_err();
        assert_eq!(error.status_code(), Some(400));
        assert!(server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .all(|request| request.url.path() == "/identity/token"));
    }
}
