// ABOUTME: End-to-end tests of the reqwest transport against a local axum server
// ABOUTME: Checks routes, query parameters, auth headers, Location handling and failure classes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use helpers::{local_reading, uploaded_reading};
use nightscout_sync::config::{NightscoutConfig, SyncSettings};
use nightscout_sync::errors::NightscoutError;
use nightscout_sync::models::{NightscoutCollection, ResponseCode, SetupState};
use nightscout_sync::nightscout::{HttpNightscoutApi, NightscoutApi, NightscoutService};
use nightscout_sync::TransportFailure;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    authorization: Option<String>,
    has_date: bool,
    body: String,
}

type Reply = Arc<dyn Fn(&RecordedRequest) -> (StatusCode, HeaderMap, String) + Send + Sync>;

#[derive(Clone)]
struct ServerState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    reply: Reply,
}

impl ServerState {
    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let request = RecordedRequest {
        method,
        path: uri.path().to_owned(),
        query: uri
            .query()
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        has_date: headers.contains_key(header::DATE),
        body,
    };
    let reply = (state.reply)(&request);
    state.requests.lock().unwrap().push(request);
    reply.into_response()
}

async fn spawn_server(
    reply: impl Fn(&RecordedRequest) -> (StatusCode, HeaderMap, String) + Send + Sync + 'static,
) -> (SocketAddr, ServerState) {
    let state = ServerState {
        requests: Arc::new(Mutex::new(Vec::new())),
        reply: Arc::new(reply),
    };
    let app = Router::new().fallback(record).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

fn json_reply(status: StatusCode, body: &serde_json::Value) -> (StatusCode, HeaderMap, String) {
    (status, HeaderMap::new(), body.to_string())
}

fn text_reply(status: StatusCode, body: &str) -> (StatusCode, HeaderMap, String) {
    (status, HeaderMap::new(), body.to_owned())
}

fn config_for(addr: SocketAddr, path: &str) -> NightscoutConfig {
    let mut config = NightscoutConfig::new(&format!("http://{addr}{path}"))
        .unwrap()
        .with_token("secret-token");
    config.http.timeout_secs = 5;
    config.http.connect_timeout_secs = 2;
    config
}

fn status_document(entries: &str) -> serde_json::Value {
    json!({
        "status": 200,
        "result": {
            "version": "15.0.2",
            "apiVersion": "3.0.4-alpha",
            "srvDate": 1_700_000_000_000_i64,
            "storage": { "storage": "mongodb", "version": "4.4.19" },
            "apiPermissions": {
                "devicestatus": "crud",
                "entries": entries,
                "food": "crud",
                "profile": "crud",
                "settings": "crud",
                "treatments": "crud"
            }
        }
    })
}

#[tokio::test]
async fn test_status_request_sends_credentials_and_parses_permissions() {
    let (addr, state) =
        spawn_server(|_| json_reply(StatusCode::OK, &status_document("crud"))).await;
    let config = config_for(addr, "");
    let service = NightscoutService::from_config(&config, SyncSettings::default()).unwrap();

    let outcome = service.test_connection().await;

    let SetupState::Success(permissions) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert!(permissions.entries.full());

    let requests = state.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/api/v3/status");
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer secret-token")
    );
    assert!(requests[0].has_date);
}

#[tokio::test]
async fn test_base_path_prefix_is_kept() {
    let (addr, state) =
        spawn_server(|_| json_reply(StatusCode::OK, &status_document("r"))).await;
    let api = HttpNightscoutApi::new(&config_for(addr, "/nightscout")).unwrap();

    let response = api.status_verbose().await.unwrap();

    assert!(response.is_successful());
    assert_eq!(state.requests()[0].path, "/nightscout/api/v3/status");
}

#[tokio::test]
async fn test_unauthorized_body_reaches_message_mapping() {
    let (addr, _state) = spawn_server(|_| {
        text_reply(
            StatusCode::UNAUTHORIZED,
            r#"{"status":401,"message":"Date header out of tolerance"}"#,
        )
    })
    .await;
    let service =
        NightscoutService::from_config(&config_for(addr, ""), SyncSettings::default()).unwrap();

    assert_eq!(
        service.test_connection().await,
        SetupState::Error("Time/date out of sync with server!".to_owned())
    );
}

#[tokio::test]
async fn test_server_error_message() {
    let (addr, _state) =
        spawn_server(|_| text_reply(StatusCode::INTERNAL_SERVER_ERROR, "boom")).await;
    let service =
        NightscoutService::from_config(&config_for(addr, ""), SyncSettings::default()).unwrap();

    assert_eq!(
        service.test_connection().await,
        SetupState::Error("Network error code: 500, boom".to_owned())
    );
}

#[tokio::test]
async fn test_empty_error_body_is_not_null() {
    let (addr, _state) = spawn_server(|_| text_reply(StatusCode::BAD_GATEWAY, "")).await;
    let service =
        NightscoutService::from_config(&config_for(addr, ""), SyncSettings::default()).unwrap();

    assert_eq!(
        service.test_connection().await,
        SetupState::Error("Network error code: 502, ".to_owned())
    );
}

#[tokio::test]
async fn test_insert_returns_location_header() {
    let (addr, state) = spawn_server(move |request| {
        let mut headers = HeaderMap::new();
        if request.method == Method::POST {
            headers.insert(
                header::LOCATION,
                HeaderValue::from_static("/api/v3/entries/65a1"),
            );
        }
        (StatusCode::CREATED, headers, String::new())
    })
    .await;
    let service =
        NightscoutService::from_config(&config_for(addr, ""), SyncSettings::default()).unwrap();

    let response = service.insert(&local_reading()).await.unwrap();

    assert_eq!(response.code, ResponseCode::RecordCreated);
    assert_eq!(response.location.as_deref(), Some("/api/v3/entries/65a1"));

    let request = &state.requests()[0];
    assert_eq!(request.path, "/api/v3/entries");
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["type"], "sgv");
    assert_eq!(body["date"], 1_700_000_000_000_i64);
    assert_eq!(body["device"], "nightscout-sync");
}

#[tokio::test]
async fn test_update_and_delete_address_document() {
    let (addr, state) = spawn_server(|request| {
        let status = if request.method == Method::DELETE {
            StatusCode::NO_CONTENT
        } else {
            StatusCode::OK
        };
        (status, HeaderMap::new(), String::new())
    })
    .await;
    let service =
        NightscoutService::from_config(&config_for(addr, ""), SyncSettings::default()).unwrap();
    let reading = uploaded_reading("65a1");

    let updated = service.update(&reading).await.unwrap();
    let deleted = service.delete(&reading).await.unwrap().unwrap();

    assert_eq!(updated.code, ResponseCode::RecordExists);
    assert_eq!(deleted.code, ResponseCode::RecordDeleted);

    let requests = state.requests();
    assert_eq!(requests[0].method, Method::PUT);
    assert_eq!(requests[0].path, "/api/v3/entries/65a1");
    assert_eq!(requests[1].method, Method::DELETE);
    assert_eq!(requests[1].path, "/api/v3/entries/65a1");
}

#[tokio::test]
async fn test_range_queries_send_filter_sort_and_limit() {
    let (addr, state) = spawn_server(|_| {
        json_reply(
            StatusCode::OK,
            &json!({
                "status": 200,
                "result": [
                    { "identifier": "a", "date": 1_700_000_000_000_i64, "sgv": 110 },
                    { "identifier": "b", "date": 1_700_000_300_000_i64, "sgv": 115 }
                ]
            }),
        )
    })
    .await;
    let api = HttpNightscoutApi::new(&config_for(addr, "")).unwrap();

    let documents = api
        .get_by_date(NightscoutCollection::Entries, 1_699_000_000_000, "date", 2)
        .await
        .unwrap();
    api.get_by_last_modified(NightscoutCollection::Treatments, 42, "srvModified", 1000)
        .await
        .unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[1].identifier.as_deref(), Some("b"));
    assert_eq!(documents[0].fields["sgv"], 110);

    let requests = state.requests();
    assert_eq!(requests[0].path, "/api/v3/entries");
    assert_eq!(
        requests[0].query,
        vec![
            ("date$gte".to_owned(), "1699000000000".to_owned()),
            ("sort".to_owned(), "date".to_owned()),
            ("limit".to_owned(), "2".to_owned()),
        ]
    );
    assert_eq!(requests[1].path, "/api/v3/treatments");
    assert_eq!(
        requests[1].query[0],
        ("srvModified$gte".to_owned(), "42".to_owned())
    );
}

#[tokio::test]
async fn test_query_error_status_is_an_error() {
    let (addr, _state) = spawn_server(|_| text_reply(StatusCode::FORBIDDEN, "denied")).await;
    let api = HttpNightscoutApi::new(&config_for(addr, "")).unwrap();

    let error = api
        .get_by_date(NightscoutCollection::Food, 0, "date", 10)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        NightscoutError::Status { status: 403, ref body, .. } if body.as_deref() == Some("denied")
    ));
}

#[tokio::test]
async fn test_last_modified_route() {
    let (addr, state) = spawn_server(|_| {
        json_reply(
            StatusCode::OK,
            &json!({
                "srvDate": 1_700_000_000_000_i64,
                "collections": { "entries": 1_699_999_000_000_i64, "treatments": 1_699_998_000_000_i64 }
            }),
        )
    })
    .await;
    let api = HttpNightscoutApi::new(&config_for(addr, "")).unwrap();

    let summary = api.last_modified().await.unwrap();

    assert_eq!(state.requests()[0].path, "/api/v3/lastModified");
    assert_eq!(
        summary.for_collection(NightscoutCollection::Treatments),
        Some(1_699_998_000_000)
    );
}

#[tokio::test]
async fn test_refused_port_is_classified() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = NightscoutConfig::new(&format!("http://127.0.0.1:{port}")).unwrap();
    let api = HttpNightscoutApi::new(&config).unwrap();

    let error = api.status_verbose().await.unwrap_err();

    assert_eq!(
        error.transport_failure(),
        Some(&TransportFailure::PortUnreachable {
            host: "127.0.0.1".to_owned(),
            port,
        })
    );
}

#[tokio::test]
async fn test_unresolvable_host_is_classified() {
    let mut config = NightscoutConfig::new("http://nightscout.invalid").unwrap();
    config.http.connect_timeout_secs = 5;
    let service = NightscoutService::from_config(&config, SyncSettings::default()).unwrap();

    assert_eq!(
        service.test_connection().await,
        SetupState::Error("Offline or wrong Nightscout URL?".to_owned())
    );
}
