//! End-to-end discovery against a mock cluster API over HTTP

use redis_iam_client::ClientConfig;
use redis_iam_connector::{run_pass, Connector, ConnectorError};
use redis_iam_core::{Annotation, ResourceType};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USERS: &str = r#"[
  {"uid": 1, "name": "Test User 1", "email": "testuser1@redislabs.com", "role": "admin", "role_uids": [1], "status": "active"},
  {"uid": 2, "name": "Test User 2", "email": "testuser2@redislabs.com", "role": "db_viewer", "role_uids": [2, 3, 4], "status": "active"}
]"#;

const ROLES: &str = r#"[
  {"uid": 1, "name": "Admin", "management": "admin"},
  {"uid": 2, "name": "Member", "management": "db_viewer"},
  {"uid": 3, "name": "Super Member", "management": "cluster_viewer"}
]"#;

fn json(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "application/json")
        .set_body_string(body)
}

fn connector_for(server: &MockServer) -> Connector {
    let config = ClientConfig::new(
        "http://127.0.0.1",
        server.address().port().to_string(),
        "username",
        "password",
    );
    Connector::from_config(&config).unwrap()
}

async fn mount_role_details(server: &MockServer) {
    for (uid, name, management) in [
        (1, "Admin", "admin"),
        (2, "Member", "db_viewer"),
        (3, "Super Member", "cluster_viewer"),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/v1/roles/{}", uid)))
            .respond_with(json(&format!(
                r#"{{"uid": {}, "name": "{}", "management": "{}"}}"#,
                uid, name, management
            )))
            .expect(1)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_full_pass_over_http() {
    let server = MockServer::start().await;

    // Listed once by the user syncer and once into the role builder's cache.
    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .respond_with(json(USERS))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/roles"))
        .respond_with(json(ROLES))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/cluster"))
        .respond_with(json(r#"{"name": "prod-cluster", "rack_aware": false}"#))
        .expect(1)
        .mount(&server)
        .await;
    mount_role_details(&server).await;

    let connector = connector_for(&server);
    let graph = run_pass(&connector, &CancellationToken::new()).await.unwrap();

    assert_eq!(graph.resources_of(ResourceType::User).count(), 2);
    assert_eq!(graph.resources_of(ResourceType::Role).count(), 3);
    assert_eq!(graph.resources_of(ResourceType::Cluster).count(), 1);
    assert_eq!(graph.entitlements.len(), 3);

    // User 2 references role 4, which the roles endpoint no longer lists.
    let grant_ids: Vec<_> = graph
        .grants
        .iter()
        .filter_map(|g| g.external_id.as_deref())
        .collect();
    assert_eq!(
        grant_ids,
        vec![
            "role-grant:1:1:admin",
            "role-grant:2:2:db_viewer",
            "role-grant:3:2:cluster_viewer",
        ]
    );

    server.verify().await;
}

#[tokio::test]
async fn test_validate_reports_missing_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/cluster"))
        .respond_with(json(r#"{"name": "prod-cluster"}"#))
        .mount(&server)
        .await;

    let annotations = connector_for(&server)
        .validate(&CancellationToken::new())
        .await
        .unwrap();

    assert!(annotations
        .iter()
        .any(|a| matches!(a, Annotation::NoRateLimitData)));
}

#[tokio::test]
async fn test_unauthorized_aborts_pass() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = run_pass(&connector_for(&server), &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        ConnectorError::Client(client) => assert_eq!(client.status(), Some(401)),
        other => panic!("expected client error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .respond_with(json(USERS).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let connector = connector_for(&server);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let err = run_pass(&connector, &cancel).await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(2));
}
