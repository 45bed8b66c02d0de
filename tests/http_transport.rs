//! Integration tests for the HTTP transport using wiremock.
//!
//! These tests drive `CivoClient<HttpTransport>` against mocked endpoints,
//! checking authentication, the region parameter, request bodies, and the
//! mapping of error statuses.

#[path = "common/test_constants.rs"]
mod test_constants;

use civo::{
    CivoClient, CivoConfig, ClientError, FirewallRuleConfig, HttpTransport, ResourceKind,
    TransportError,
};
use serde_json::json;
use test_constants::{TEST_API_KEY, TEST_REGION};
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CivoClient<HttpTransport> {
    let config = CivoConfig {
        api_key: String::from(TEST_API_KEY),
        region: String::from(TEST_REGION),
        api_url: server.uri(),
    };
    CivoClient::from_config(&config).expect("client should build")
}

#[tokio::test]
async fn list_volumes_sends_token_and_region() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/volumes"))
        .and(bearer_token(TEST_API_KEY))
        .and(query_param("region", TEST_REGION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "vol-1", "name": "data", "size_gb": 20, "mountpoint": "/mnt"},
            {"id": "vol-2", "name": "logs", "cluster_id": "cluster-a"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let volumes = client_for(&server).list_volumes().await.expect("list");

    let ids: Vec<&str> = volumes.iter().map(|volume| volume.id.as_str()).collect();
    assert_eq!(ids, ["vol-1", "vol-2"]);
    assert_eq!(volumes.first().map(|volume| volume.mount_point.as_str()), Some("/mnt"));
}

#[tokio::test]
async fn cascade_delete_keeps_flag_alongside_region() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/volumes/vol-1"))
        .and(query_param("delete_snapshot", "true"))
        .and(query_param("region", TEST_REGION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .delete_volume_and_all_snapshots("vol-1")
        .await
        .expect("delete");

    assert!(response.is_success());
}

#[tokio::test]
async fn resize_sends_size_and_region_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/volumes/vol-1/resize"))
        .and(body_json(json!({"size_gb": 40, "region": TEST_REGION})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .resize_volume("vol-1", 40)
        .await
        .expect("resize");

    assert!(response.is_success());
}

#[tokio::test]
async fn firewall_rule_body_uses_snake_case_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/firewalls/fw-1/rules"))
        .and(body_json(json!({
            "firewall_id": "fw-1",
            "protocol": "tcp",
            "start_port": "22",
            "end_port": "22",
            "cidr": ["192.168.0.0/16"],
            "direction": "ingress",
            "label": "ssh"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "rule-1",
            "firewall_id": "fw-1",
            "protocol": "tcp",
            "start_port": "22",
            "end_port": "22",
            "cidr": ["192.168.0.0/16"],
            "direction": "ingress",
            "label": "ssh"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rule = client_for(&server)
        .new_firewall_rule(&FirewallRuleConfig {
            firewall_id: String::from("fw-1"),
            protocol: String::from("tcp"),
            start_port: String::from("22"),
            end_port: String::from("22"),
            cidr: vec![String::from("192.168.0.0/16")],
            direction: String::from("ingress"),
            label: Some(String::from("ssh")),
        })
        .await
        .expect("create rule");

    assert_eq!(rule.id, "rule-1");
}

#[tokio::test]
async fn error_status_carries_provider_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/volumes/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "database_volume_not_found",
            "reason": "The requested volume could not be found"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_volume("missing")
        .await
        .expect_err("should fail");

    assert_eq!(
        err,
        ClientError::Transport {
            resource: ResourceKind::Volume,
            operation: "get",
            source: TransportError::Status {
                status: 404,
                code: String::from("database_volume_not_found"),
                reason: String::from("The requested volume could not be found"),
            },
        }
    );
}

#[tokio::test]
async fn unauthorised_plain_body_is_kept_as_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/firewalls"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_firewalls()
        .await
        .expect_err("should fail");

    let ClientError::Transport {
        source: TransportError::Status { status, reason, .. },
        ..
    } = &err
    else {
        panic!("expected status error, got {err:?}");
    };
    assert_eq!(*status, 401);
    assert_eq!(reason, "Unauthorized");
}

#[tokio::test]
async fn empty_success_body_lists_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/firewalls"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let firewalls = client_for(&server).list_firewalls().await.expect("list");

    assert!(firewalls.is_empty());
}

#[tokio::test]
async fn dangling_volumes_are_detected_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/kubernetes/clusters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "per_page": 20,
            "pages": 1,
            "items": [{"id": "A", "name": "alpha"}, {"id": "B", "name": "beta"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "vol-a", "cluster_id": "A"},
            {"id": "vol-c", "cluster_id": "C"},
            {"id": "vol-none", "cluster_id": ""}
        ])))
        .mount(&server)
        .await;

    let dangling = client_for(&server)
        .list_dangling_volumes()
        .await
        .expect("dangling");

    let ids: Vec<&str> = dangling.iter().map(|volume| volume.id.as_str()).collect();
    assert_eq!(ids, ["vol-c"]);
}
