use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use intel_client::services::auth;
use intel_client::{ApiClient, MemorySessionStore};

pub const TEST_TOKEN: &str = "jwt-for-tests";

/// In-process stand-in for the threat intelligence backend. Shared handles
/// let tests inspect captured request bodies and mutate served data.
#[derive(Clone)]
pub struct Backend {
    pub reports: Arc<Mutex<Vec<Value>>>,
    pub search_bodies: Arc<Mutex<Vec<Value>>>,
    pub visualization_bodies: Arc<Mutex<Vec<Value>>>,
    pub visualization_override: Arc<Mutex<Option<Value>>>,
    pub login_attempts: Arc<AtomicUsize>,
    pub feed_requests: Arc<AtomicUsize>,
    pub feeds_return_garbage: Arc<AtomicBool>,
    pub visualization_returns_error: Arc<AtomicBool>,
    next_report_id: Arc<AtomicUsize>,
}

impl Backend {
    fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(seed_reports())),
            search_bodies: Arc::new(Mutex::new(Vec::new())),
            visualization_bodies: Arc::new(Mutex::new(Vec::new())),
            visualization_override: Arc::new(Mutex::new(None)),
            login_attempts: Arc::new(AtomicUsize::new(0)),
            feed_requests: Arc::new(AtomicUsize::new(0)),
            feeds_return_garbage: Arc::new(AtomicBool::new(false)),
            visualization_returns_error: Arc::new(AtomicBool::new(false)),
            next_report_id: Arc::new(AtomicUsize::new(3)),
        }
    }
}

pub async fn spawn_backend() -> (String, Backend) {
    let backend = Backend::new();
    let app = router(backend.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}/api"), backend)
}

pub fn client_for(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, Rc::new(MemorySessionStore::new()))
}

pub async fn logged_in_client(base_url: &str) -> ApiClient {
    let client = client_for(base_url);
    auth::login(&client, "admin", "admin").await.expect("login");
    client
}

fn router(backend: Backend) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/profile", get(profile))
        .route("/api/feeds", get(list_feeds))
        .route("/api/feeds/:id", get(get_feed))
        .route("/api/indicators/search", post(search_indicators))
        .route("/api/indicators/:id", get(get_indicator))
        .route("/api/indicators/:id/related", get(get_related))
        .route("/api/visualization", post(visualization))
        .route("/api/reports", get(list_reports).post(create_report))
        .route(
            "/api/reports/:id",
            get(get_report).put(update_report).delete(delete_report),
        )
        .route("/api/reports/:id/export", get(export_report))
        .with_state(backend)
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {TEST_TOKEN}"))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Not authenticated" })),
    )
        .into_response()
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": format!("{what} not found") })),
    )
        .into_response()
}

async fn login(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend.login_attempts.fetch_add(1, Ordering::SeqCst);
    let username = body
        .get("username")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let password = body
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if username == "admin" && password == "admin" {
        return Json(json!({ "token": TEST_TOKEN, "user": user_fixture() })).into_response();
    }
    // 401 with an unreadable body, for the client-side fallback message.
    if username == "ghost" {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Incorrect username or password" })),
    )
        .into_response()
}

async fn profile(headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    Json(user_fixture()).into_response()
}

async fn list_feeds(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    backend.feed_requests.fetch_add(1, Ordering::SeqCst);
    if backend.feeds_return_garbage.load(Ordering::SeqCst) {
        return Json(json!([{ "id": "feed-1" }])).into_response();
    }
    Json(feed_fixtures()).into_response()
}

async fn get_feed(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    match feed_fixtures()
        .as_array()
        .and_then(|feeds| {
            feeds
                .iter()
                .find(|feed| feed.get("id").and_then(Value::as_str) == Some(id.as_str()))
                .cloned()
        }) {
        Some(feed) => Json(feed).into_response(),
        None => not_found("Feed"),
    }
}

async fn search_indicators(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    backend.search_bodies.lock().expect("lock").push(body);
    Json(indicator_fixtures()).into_response()
}

async fn get_indicator(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    match indicator_fixtures()
        .as_array()
        .and_then(|indicators| {
            indicators
                .iter()
                .find(|entry| entry.get("id").and_then(Value::as_str) == Some(id.as_str()))
                .cloned()
        }) {
        Some(indicator) => Json(indicator).into_response(),
        None => not_found("Indicator"),
    }
}

async fn get_related(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let related: Vec<Value> = indicator_fixtures()
        .as_array()
        .map(|indicators| {
            indicators
                .iter()
                .filter(|entry| entry.get("id").and_then(Value::as_str) != Some(id.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Json(Value::Array(related)).into_response()
}

async fn visualization(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    backend.visualization_bodies.lock().expect("lock").push(body);
    if backend.visualization_returns_error.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "Visualization service unavailable" })),
        )
            .into_response();
    }
    if let Some(payload) = backend.visualization_override.lock().expect("lock").clone() {
        return Json(payload).into_response();
    }
    Json(visualization_fixture()).into_response()
}

async fn list_reports(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let reports = backend.reports.lock().expect("lock").clone();
    Json(Value::Array(reports)).into_response()
}

async fn get_report(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let reports = backend.reports.lock().expect("lock");
    match reports
        .iter()
        .find(|report| report.get("id").and_then(Value::as_str) == Some(id.as_str()))
    {
        Some(report) => Json(report.clone()).into_response(),
        None => not_found("Report"),
    }
}

async fn create_report(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let id = backend.next_report_id.fetch_add(1, Ordering::SeqCst);
    let report = json!({
        "id": format!("report-{id}"),
        "name": body.get("name").cloned().unwrap_or_else(|| json!("")),
        "createdAt": "2024-03-02T09:00:00",
        "createdBy": body.get("createdBy").cloned().unwrap_or_else(|| json!("")),
        "description": body.get("description").cloned().unwrap_or_else(|| json!("")),
        "content": body.get("content").cloned().unwrap_or_else(|| json!("")),
        "format": body.get("format").cloned().unwrap_or_else(|| json!("pdf")),
    });
    backend.reports.lock().expect("lock").push(report.clone());
    Json(report).into_response()
}

async fn update_report(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let mut reports = backend.reports.lock().expect("lock");
    for report in reports.iter_mut() {
        if report.get("id").and_then(Value::as_str) == Some(id.as_str()) {
            if let (Some(fields), Some(changes)) = (report.as_object_mut(), patch.as_object()) {
                for (key, value) in changes {
                    fields.insert(key.clone(), value.clone());
                }
            }
            return Json(report.clone()).into_response();
        }
    }
    not_found("Report")
}

async fn delete_report(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let mut reports = backend.reports.lock().expect("lock");
    let before = reports.len();
    reports.retain(|report| report.get("id").and_then(Value::as_str) != Some(id.as_str()));
    if reports.len() == before {
        return not_found("Report");
    }
    Json(json!({ "message": "Report deleted successfully" })).into_response()
}

async fn export_report(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let Some(format) = params.get("format") else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "format query parameter is required" })),
        )
            .into_response();
    };

    let reports = backend.reports.lock().expect("lock");
    let Some(report) = reports
        .iter()
        .find(|report| report.get("id").and_then(Value::as_str) == Some(id.as_str()))
    else {
        return not_found("Report");
    };

    let name = report.get("name").and_then(Value::as_str).unwrap_or_default();
    let (mime, body) = match format.as_str() {
        "json" => (
            "application/json",
            format!(r#"{{"report": "{name}", "content": "exported"}}"#),
        ),
        "csv" => (
            "text/csv",
            format!("This is the content of report {id} in csv format"),
        ),
        _ => (
            "application/pdf",
            format!("This is the content of report {id} in pdf format"),
        ),
    };
    ([(header::CONTENT_TYPE, mime)], body).into_response()
}

fn user_fixture() -> Value {
    json!({
        "id": "admin",
        "username": "admin",
        "email": "admin@example.com",
        "role": "admin"
    })
}

fn indicator_fixtures() -> Value {
    json!([
        {
            "id": "indicator-1",
            "type": "IP",
            "value": "192.168.1.1",
            "source": "MISP",
            "confidence": 0.8,
            "timestamp": "2024-03-01T08:00:00",
            "tags": ["malware", "c2"],
            "description": "Command and control server"
        },
        {
            "id": "indicator-2",
            "type": "Domain",
            "value": "example.com",
            "source": "OTX",
            "confidence": 0.9,
            "timestamp": "2024-03-01T08:00:00",
            "tags": ["phishing"],
            "description": "Phishing domain"
        },
        {
            "id": "indicator-3",
            "type": "Hash",
            "value": "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3",
            "source": "VirusTotal",
            "confidence": 0.95,
            "timestamp": "2024-03-01T08:00:00",
            "tags": ["ransomware"],
            "description": "Ransomware hash"
        }
    ])
}

fn feed_fixtures() -> Value {
    json!([
        {
            "id": "feed-1",
            "name": "MISP Feed",
            "source": "MISP",
            "description": "Community-driven threat intelligence sharing platform.",
            "lastUpdated": "2024-03-01T08:00:00",
            "indicators": [
                {
                    "id": "indicator-1",
                    "type": "IP",
                    "value": "192.168.1.1",
                    "source": "MISP",
                    "confidence": 0.8,
                    "timestamp": "2024-03-01T08:00:00",
                    "tags": ["malware", "c2"],
                    "description": "Command and control server"
                }
            ]
        },
        {
            "id": "feed-2",
            "name": "AlienVault OTX",
            "source": "OTX",
            "description": "Open Threat Exchange - crowd-sourced threat data.",
            "lastUpdated": "2024-03-01T08:00:00",
            "indicators": []
        }
    ])
}

fn visualization_fixture() -> Value {
    json!({
        "timelineData": [
            { "date": "2024-02-24", "count": 10 },
            { "date": "2024-02-25", "count": 15 },
            { "date": "2024-02-26", "count": 20 },
            { "date": "2024-02-27", "count": 25 },
            { "date": "2024-02-28", "count": 30 },
            { "date": "2024-02-29", "count": 35 },
            { "date": "2024-03-01", "count": 40 }
        ],
        "sourceDistribution": [
            { "source": "MISP", "count": 45 },
            { "source": "OTX", "count": 32 },
            { "source": "Recorded Future", "count": 28 },
            { "source": "VirusTotal", "count": 18 },
            { "source": "AbuseIPDB", "count": 12 }
        ],
        "typeDistribution": [
            { "type": "IP", "count": 56 },
            { "type": "Domain", "count": 42 },
            { "type": "URL", "count": 35 },
            { "type": "Hash", "count": 28 },
            { "type": "Email", "count": 14 }
        ]
    })
}

fn seed_reports() -> Vec<Value> {
    vec![
        json!({
            "id": "report-1",
            "name": "Monthly Threat Summary",
            "createdAt": "2024-03-01T08:00:00",
            "createdBy": "admin",
            "description": "Summary of threats detected in the past month",
            "content": "This is the report content",
            "format": "pdf"
        }),
        json!({
            "id": "report-2",
            "name": "Critical Vulnerabilities Report",
            "createdAt": "2024-03-01T08:00:00",
            "createdBy": "analyst",
            "description": "List of critical vulnerabilities requiring immediate attention",
            "content": "This is the report content",
            "format": "csv"
        }),
    ]
}
