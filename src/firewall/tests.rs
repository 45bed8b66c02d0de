//! Unit tests for the firewall module.

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::test_support::{ScriptedTransport, json_firewalls};

fn client_with(transport: &ScriptedTransport) -> CivoClient<ScriptedTransport> {
    CivoClient::new(transport.clone(), "LON1")
}

fn web_rule_config(firewall_id: &str) -> FirewallRuleConfig {
    FirewallRuleConfig {
        firewall_id: firewall_id.to_owned(),
        protocol: String::from("tcp"),
        start_port: String::from("443"),
        end_port: String::from("443"),
        cidr: vec![String::from("0.0.0.0/0"), String::from("10.0.0.0/8")],
        direction: String::from("ingress"),
        label: Some(String::from("https")),
    }
}

#[tokio::test]
async fn list_firewalls_preserves_order_and_tolerates_null() {
    let transport = ScriptedTransport::new();
    transport.push_json(&json_firewalls(&[("fw-2", "web"), ("fw-1", "db")]));
    transport.push_body("null");
    let client = client_with(&transport);

    let firewalls = client.list_firewalls().await.expect("list");
    let names: Vec<&str> = firewalls.iter().map(|fw| fw.name.as_str()).collect();
    assert_eq!(names, ["web", "db"]);

    assert!(client.list_firewalls().await.expect("null list").is_empty());
}

#[rstest]
#[case("default", Ok("fw-1"))]
#[case("default-web", Ok("fw-2"))]
#[case("web", Ok("fw-2"))]
#[case("fw-", Err("multiple"))]
#[case("absent", Err("zero"))]
#[tokio::test]
async fn find_firewall_uses_exact_then_unique_partial_policy(
    #[case] search: &str,
    #[case] expected: Result<&str, &str>,
) {
    let transport = ScriptedTransport::new();
    transport.push_json(&json_firewalls(&[
        ("fw-1", "default"),
        ("fw-2", "default-web"),
    ]));

    let outcome = client_with(&transport).find_firewall(search).await;

    match (outcome, expected) {
        (Ok(found), Ok(id)) => assert_eq!(found.id, id),
        (Err(ClientError::MultipleMatches { .. }), Err("multiple"))
        | (Err(ClientError::ZeroMatches { .. }), Err("zero")) => {}
        (other, wanted) => panic!("search {search}: expected {wanted:?}, got {other:?}"),
    }
}

#[tokio::test]
async fn new_firewall_posts_to_collection_with_trailing_slash() {
    let transport = ScriptedTransport::new();
    transport.push_json(&json!({"id": "fw-9", "name": "edge", "result": "success"}));

    let result = client_with(&transport)
        .new_firewall(&FirewallConfig {
            name: String::from("edge"),
            network_id: None,
        })
        .await
        .expect("create");

    assert_eq!(result.id, "fw-9");
    let requests = transport.requests();
    assert_eq!(transport.request_lines(), ["POST /v2/firewalls/"]);
    assert_eq!(
        requests.first().and_then(|request| request.body.clone()),
        Some(json!({"name": "edge"}))
    );
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn new_firewall_rule_without_firewall_id_sends_nothing(#[case] firewall_id: &str) {
    let transport = ScriptedTransport::new();

    let err = client_with(&transport)
        .new_firewall_rule(&web_rule_config(firewall_id))
        .await
        .expect_err("validation should fail");

    assert_eq!(err, ClientError::Validation(String::from("firewall_id")));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn new_firewall_rule_posts_rule_body() {
    let transport = ScriptedTransport::new();
    transport.push_json(&json!({
        "id": "rule-1",
        "firewall_id": "fw-1",
        "protocol": "tcp",
        "start_port": "443",
        "end_port": "443",
        "cidr": ["0.0.0.0/0", "10.0.0.0/8"],
        "direction": "ingress",
        "label": "https"
    }));

    let rule = client_with(&transport)
        .new_firewall_rule(&web_rule_config("fw-1"))
        .await
        .expect("create rule");

    assert_eq!(rule.id, "rule-1");
    assert_eq!(rule.cidr, ["0.0.0.0/0", "10.0.0.0/8"]);
    let requests = transport.requests();
    let [request] = requests.as_slice() else {
        panic!("expected one request, got {requests:?}");
    };
    assert_eq!(request.line(), "POST /v2/firewalls/fw-1/rules");
    let body = request.body.as_ref().expect("body");
    assert_eq!(body["cidr"], json!(["0.0.0.0/0", "10.0.0.0/8"]));
    assert_eq!(body["label"], "https");
}

#[tokio::test]
async fn rule_without_label_omits_it_from_the_body() {
    let transport = ScriptedTransport::new();
    transport.push_json(&json!({"id": "rule-2", "firewall_id": "fw-1"}));
    let config = FirewallRuleConfig {
        label: None,
        ..web_rule_config("fw-1")
    };

    let rule = client_with(&transport)
        .new_firewall_rule(&config)
        .await
        .expect("create rule");

    assert_eq!(rule.label, None);
    let body = transport
        .requests()
        .first()
        .and_then(|request| request.body.clone())
        .expect("body");
    assert!(body.get("label").is_none());
}

#[tokio::test]
async fn find_firewall_rule_matches_on_label() {
    let transport = ScriptedTransport::new();
    transport.push_json(&json!([
        {"id": "rule-1", "firewall_id": "fw-1", "label": "ssh"},
        {"id": "rule-2", "firewall_id": "fw-1", "label": "https"},
        {"id": "rule-3", "firewall_id": "fw-1"}
    ]));

    let rule = client_with(&transport)
        .find_firewall_rule("fw-1", "https")
        .await
        .expect("rule");

    assert_eq!(rule.id, "rule-2");
    assert_eq!(transport.request_lines(), ["GET /v2/firewalls/fw-1/rules"]);
}

#[tokio::test]
async fn find_firewall_rule_with_empty_search_skips_unlabelled_rules() {
    let transport = ScriptedTransport::new();
    transport.push_json(&json!([
        {"id": "rule-1", "firewall_id": "fw-1"},
        {"id": "rule-2", "firewall_id": "fw-1", "label": ""}
    ]));

    let err = client_with(&transport)
        .find_firewall_rule("fw-1", "")
        .await
        .expect_err("empty search must not resolve");

    assert_eq!(
        err,
        ClientError::ZeroMatches {
            resource: ResourceKind::FirewallRule,
            search: String::new(),
        }
    );
}

#[tokio::test]
async fn deletes_target_firewall_and_rule_paths() {
    let transport = ScriptedTransport::new();
    transport.push_success();
    transport.push_success();
    let client = client_with(&transport);

    assert!(
        client
            .delete_firewall_rule("fw-1", "rule-1")
            .await
            .expect("delete rule")
            .is_success()
    );
    assert!(
        client
            .delete_firewall("fw-1")
            .await
            .expect("delete firewall")
            .is_success()
    );

    assert_eq!(
        transport.request_lines(),
        [
            "DELETE /v2/firewalls/fw-1/rules/rule-1",
            "DELETE /v2/firewalls/fw-1",
        ]
    );
}
