//! End-to-end tests: the provider against a local fake Pingdom API.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::Query;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use terraform_provider_pingdom::testing::{assert_error_contains, ProviderTester, TestError};
use terraform_provider_pingdom::{PingdomError, PingdomProvider, ProviderError};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};

const TOKEN: &str = "e2e-secret-token";
const UNSET_TOKEN_VAR: &str = "PINGDOM_E2E_TOKEN_NOT_SET";

#[derive(Debug, Clone)]
struct SeenRequest {
    path: String,
    authorization: Option<String>,
    query: HashMap<String, String>,
}

type RequestLog = Arc<Mutex<Vec<SeenRequest>>>;

/// Serve `body` with `status` on both list endpoints, recording every request.
async fn fake_pingdom(status: StatusCode, body: Value) -> (String, RequestLog) {
    let log = RequestLog::default();
    let recorder = Arc::clone(&log);
    let handler =
        move |uri: Uri, headers: HeaderMap, Query(query): Query<HashMap<String, String>>| {
            let recorder = Arc::clone(&recorder);
            let body = body.clone();
            async move {
                recorder.lock().unwrap().push(SeenRequest {
                    path: uri.path().to_string(),
                    authorization: headers
                        .get(AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    query,
                });
                (status, Json(body))
            }
        };

    let app = Router::new()
        .route("/api/3.1/checks", get(handler.clone()))
        .route("/api/3.1/tms/check", get(handler));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (endpoint(addr), log)
}

fn endpoint(addr: SocketAddr) -> String {
    format!("http://{}/api/3.1", addr)
}

async fn configured_tester(endpoint: &str) -> ProviderTester<PingdomProvider> {
    let tester =
        ProviderTester::new(PingdomProvider::new("e2e").with_token_env_var(UNSET_TOKEN_VAR));
    assert_ok!(
        tester
            .configure(json!({"endpoint": endpoint, "api_token": TOKEN}))
            .await
    );
    tester
}

fn api_error(err: TestError) -> PingdomError {
    match err {
        TestError::Provider(ProviderError::Api(e)) => e,
        other => panic!("expected a Pingdom API error, got {}", other),
    }
}

#[tokio::test]
async fn transaction_checks_prod_filter() {
    let (endpoint, log) = fake_pingdom(
        StatusCode::OK,
        json!({
            "checks": [
                {"id": 101, "name": "checkout", "active": true, "region": "us-east", "tags": ["prod"], "type": "script"},
                {"id": 102, "name": "login", "active": false, "region": null, "tags": ["prod"], "type": "script"}
            ],
            "limit": 1000,
            "offset": 0
        }),
    )
    .await;
    let tester = configured_tester(&endpoint).await;

    let state = assert_ok!(
        tester
            .read_data_source("pingdom_transaction_checks", json!({"tags": ["prod"]}))
            .await
    );

    assert_eq!(
        state,
        json!({
            "tags": ["prod"],
            "checks": [
                {"name": "checkout", "id": 101, "region": "us-east", "active": true, "tags": ["prod"]},
                {"name": "login", "id": 102, "region": null, "active": false, "tags": ["prod"]}
            ],
            "limit": "1000",
            "offset": "0",
            "extended_tags": false
        })
    );

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/api/3.1/tms/check");
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer e2e-secret-token"));
    assert_eq!(seen[0].query.get("tags").map(String::as_str), Some("prod"));
    assert_eq!(seen[0].query.get("extended_tags").map(String::as_str), Some("false"));
}

#[tokio::test]
async fn transaction_checks_keep_api_order() {
    let names = ["zeta", "alpha", "mid", "beta"];
    let records: Vec<Value> = names.iter().map(|n| json!({"name": n})).collect();
    let (endpoint, _log) = fake_pingdom(StatusCode::OK, json!({"checks": records})).await;
    let tester = configured_tester(&endpoint).await;

    let state = assert_ok!(
        tester
            .read_data_source("pingdom_transaction_checks", json!({}))
            .await
    );

    let got: Vec<&str> = state["checks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(got, names);
    // Pagination falls back to the requested page
    assert_eq!(state["limit"], json!("1000"));
    assert_eq!(state["offset"], json!("0"));
    assert_eq!(state["checks"][0]["id"], Value::Null);
}

#[tokio::test]
async fn standard_checks_map_status_and_tags() {
    let (endpoint, log) = fake_pingdom(
        StatusCode::OK,
        json!({
            "checks": [
                {"id": 1, "name": "homepage", "hostname": "example.com", "status": "up",
                 "tags": [{"name": "web", "type": "u", "count": 1}]},
                {"id": 2, "name": "status-page", "status": "paused"}
            ],
            "counts": {"total": 2, "limited": 2, "filtered": 2}
        }),
    )
    .await;
    let tester = configured_tester(&endpoint).await;

    let state = assert_ok!(tester.read_data_source("pingdom_checks", json!({})).await);

    assert_eq!(
        state["checks"],
        json!([
            {"name": "homepage", "id": 1, "region": null, "active": true, "tags": ["web"]},
            {"name": "status-page", "id": 2, "region": null, "active": false, "tags": null}
        ])
    );

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen[0].path, "/api/3.1/checks");
    assert_eq!(seen[0].query.get("include_tags").map(String::as_str), Some("true"));
    assert!(!seen[0].query.contains_key("tags"));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let (endpoint, _log) = fake_pingdom(
        StatusCode::FORBIDDEN,
        json!({"error": {"statuscode": 403, "statusdesc": "Forbidden", "errormessage": "Invalid API token"}}),
    )
    .await;
    let tester = configured_tester(&endpoint).await;

    let err = assert_err!(
        tester
            .read_data_source("pingdom_transaction_checks", json!({}))
            .await
    );

    assert_error_contains(&err.diagnostics(), "Invalid API token");
    match api_error(err) {
        PingdomError::Status { status, .. } => assert_eq!(status, 403),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_checks_payload_is_an_error() {
    let (endpoint, _log) = fake_pingdom(StatusCode::OK, json!({"limit": 1000, "offset": 0})).await;
    let tester = configured_tester(&endpoint).await;

    let err = assert_err!(tester.read_data_source("pingdom_checks", json!({})).await);
    assert!(matches!(api_error(err), PingdomError::MissingPayload(_)));
}

#[tokio::test]
async fn transport_error_aborts_read() {
    // Reserve a port, then close it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let tester = configured_tester(&endpoint(addr)).await;

    let err = assert_err!(
        tester
            .read_data_source("pingdom_transaction_checks", json!({}))
            .await
    );
    assert_error_contains(&err.diagnostics(), "Error reading Pingdom checks");
    assert!(api_error(err).is_transport());
}

#[tokio::test]
async fn missing_token_blocks_reads() {
    let (endpoint, log) = fake_pingdom(StatusCode::OK, json!({"checks": []})).await;
    let tester =
        ProviderTester::new(PingdomProvider::new("e2e").with_token_env_var(UNSET_TOKEN_VAR));

    let err = assert_err!(tester.configure(json!({"endpoint": endpoint})).await);
    assert_error_contains(&err.diagnostics(), "Missing API Token");

    let err = assert_err!(tester.read_data_source("pingdom_checks", json!({})).await);
    assert!(matches!(err, TestError::Provider(ProviderError::NotConfigured(_))));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn token_is_sent_trimmed() {
    let (endpoint, log) = fake_pingdom(StatusCode::OK, json!({"checks": []})).await;
    let tester =
        ProviderTester::new(PingdomProvider::new("e2e").with_token_env_var(UNSET_TOKEN_VAR));
    assert_ok!(
        tester
            .configure(json!({"endpoint": endpoint, "api_token": " padded-token\t"}))
            .await
    );

    assert_ok!(tester.read_data_source("pingdom_checks", json!({})).await);

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer padded-token"));
}

#[tokio::test]
async fn invalid_filter_never_reaches_the_api() {
    let (endpoint, log) = fake_pingdom(StatusCode::OK, json!({"checks": []})).await;
    let tester = configured_tester(&endpoint).await;

    let err = assert_err!(
        tester
            .read_data_source("pingdom_transaction_checks", json!({"tags": "prod"}))
            .await
    );
    assert!(matches!(err, TestError::Diagnostics(_)));
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn metadata_lists_both_data_sources() {
    let tester = ProviderTester::new(PingdomProvider::new("e2e"));
    assert_eq!(
        tester.data_source_types(),
        vec!["pingdom_checks", "pingdom_transaction_checks"]
    );
    assert!(tester.schema().resources.is_empty());
}
