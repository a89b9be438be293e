//! Router-level tests for the portfolio API
//!
//! These drive the full axum router (CORS and tracing layers included)
//! against fallback-only and in-memory store backends.

use std::io;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use portfolio_api::api::{create_fallback_router, create_router, AppState};
use portfolio_api::catalog::{
    Catalog, CONTACT_TABLE, PROJECTS_TABLE, SERVICES_TABLE, SERVICE_TIERS_TABLE,
};
use portfolio_api::store::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot

const CONTACT_BODY: &str = r#"{"name":"A","email":"a@b.com","subject":"S","message":"M"}"#;

fn store_router(store: Arc<MemoryStore>) -> Router {
    create_router(
        AppState::new(Catalog::new(Some(store))),
        &["http://localhost:3000".to_string()],
    )
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let source = response
        .headers()
        .get("x-data-source")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, source, bytes.to_vec())
}

async fn post_contact(app: &Router, body: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/contact")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn fallback_reads_are_stable_across_calls() {
    let app = create_fallback_router();

    for uri in ["/api/projects", "/api/projects/1", "/api/profile", "/api/services"] {
        let (status, source, first) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(source.as_deref(), Some("fallback"), "{uri}");

        let (_, _, second) = get(&app, uri).await;
        assert_eq!(first, second, "{uri} changed between calls");
    }
}

#[tokio::test]
async fn fallback_projects_list() {
    let app = create_fallback_router();
    let (_, _, bytes) = get(&app, "/api/projects").await;
    let projects = json_body(&bytes);

    let projects = projects.as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["title"], "Portfolio Website");
    assert_eq!(projects[0]["githubUrl"], "https://github.com/yourusername/portfolio");
    assert_eq!(projects[1]["technologies"], json!(["Go", "Cryptography", "AES", "Kyber"]));
}

#[tokio::test]
async fn unknown_project_id_returns_empty_project_with_ok() {
    let app = create_fallback_router();

    for uri in ["/api/projects/99", "/api/projects/not-a-number"] {
        let (status, _, bytes) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(
            json_body(&bytes),
            json!({
                "id": 0,
                "title": "",
                "description": "",
                "image": "",
                "githubUrl": "",
                "demoUrl": "",
                "technologies": [],
                "createdAt": "0001-01-01T00:00:00Z",
            }),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn fallback_profile_order() {
    let app = create_fallback_router();
    let (_, _, bytes) = get(&app, "/api/profile").await;
    let profile = json_body(&bytes);

    let categories: Vec<&str> = profile["skills"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, ["Frontend", "Backend", "Database", "Cryptography"]);

    let education = profile["education"].as_array().unwrap();
    assert_eq!(education.len(), 2);
    assert_eq!(education[0]["degree"], "Master of Science in Cryptography");
    assert_eq!(education[1]["degree"], "Bachelor of Computer Science");

    assert_eq!(profile["socialLinks"][3]["platform"], "WhatsApp");
}

#[tokio::test]
async fn fallback_services_tiers() {
    let app = create_fallback_router();
    let (_, _, bytes) = get(&app, "/api/services").await;
    let services = json_body(&bytes);

    let tier = &services[1]["tiers"][1];
    assert_eq!(tier["popular"], true);
    assert_eq!(tier["price"], 3500);
    assert_eq!(tier["name"], "Advanced");
}

#[tokio::test]
async fn contact_without_store_logs_submission() {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = create_fallback_router();
    let (status, bytes) = post_contact(&app, CONTACT_BODY).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"message":"Your message has been sent successfully!"}"#
    );

    let logs = buffer.contents();
    assert!(logs.contains("Contact form received"), "logs: {logs}");
    assert!(logs.contains(r#"name: "A""#), "logs: {logs}");
    assert!(logs.contains(r#"email: "a@b.com""#), "logs: {logs}");
    assert!(logs.contains(r#"subject: "S""#), "logs: {logs}");
    assert!(logs.contains(r#"message: "M""#), "logs: {logs}");
}

#[tokio::test]
async fn contact_rejects_invalid_body() {
    let app = create_fallback_router();

    let (status, bytes) = post_contact(&app, "this is not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(bytes).unwrap(), "Invalid request body");

    let (status, _) = post_contact(&app, r#"{"name": 42}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contact_accepts_null_fields() {
    let app = create_fallback_router();

    let (status, bytes) = post_contact(
        &app,
        r#"{"name":null,"email":"a@b.com","subject":"S","message":"M"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&bytes)["message"],
        "Your message has been sent successfully!"
    );
}

#[tokio::test]
async fn store_outage_between_requests_switches_to_fallback() {
    let store = Arc::new(
        MemoryStore::new()
            .with_rows(PROJECTS_TABLE, &[json!({ "id": 10, "title": "Stored" })])
            .unwrap(),
    );
    let app = store_router(store.clone());

    let (status, source, bytes) = get(&app, "/api/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(source.as_deref(), Some("store"));
    assert_eq!(json_body(&bytes)[0]["title"], "Stored");

    store.fail_table(PROJECTS_TABLE).await;
    store.fail_table(CONTACT_TABLE).await;

    let (status, source, bytes) = get(&app, "/api/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(source.as_deref(), Some("fallback"));
    assert_eq!(json_body(&bytes)[0]["title"], "Portfolio Website");

    let (status, _) = post_contact(&app, CONTACT_BODY).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn contact_is_saved_to_store() {
    let store = Arc::new(MemoryStore::new());
    let app = store_router(store.clone());

    let (status, _) = post_contact(&app, CONTACT_BODY).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_contact(&app, CONTACT_BODY).await;
    assert_eq!(status, StatusCode::OK);

    // Submissions are not deduplicated
    let rows = store.rows(CONTACT_TABLE).await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["email"], "a@b.com");
}

#[tokio::test]
async fn contact_store_failure_returns_500() {
    let store = Arc::new(MemoryStore::new().with_failing_table(CONTACT_TABLE));
    let app = store_router(store);

    let (status, bytes) = post_contact(&app, CONTACT_BODY).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(String::from_utf8(bytes).unwrap(), "Failed to save contact form");
}

#[tokio::test]
async fn store_backed_reads_report_source() {
    let store = MemoryStore::new()
        .with_rows(
            SERVICES_TABLE,
            &[json!({ "id": 5, "title": "Audits", "description": "", "icon": "" })],
        )
        .unwrap()
        .with_rows(
            SERVICE_TIERS_TABLE,
            &[json!({ "id": 50, "service_id": 5, "name": "Basic", "price": 100, "period": "one-time", "features": [], "popular": false })],
        )
        .unwrap()
        .with_failing_table(PROJECTS_TABLE);
    let app = store_router(Arc::new(store));

    let (status, source, bytes) = get(&app, "/api/services").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(source.as_deref(), Some("store"));
    let services = json_body(&bytes);
    assert_eq!(services[0]["title"], "Audits");
    assert_eq!(services[0]["tiers"][0]["price"], 100);

    let (status, source, bytes) = get(&app, "/api/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(source.as_deref(), Some("fallback"));
    assert_eq!(json_body(&bytes).as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn health_reports_store_mode() {
    let (status, _, bytes) = get(&create_fallback_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health = json_body(&bytes);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["store"], "fallback");

    let (_, _, bytes) = get(&store_router(Arc::new(MemoryStore::new())), "/health").await;
    assert_eq!(json_body(&bytes)["store"], "configured");
}

#[tokio::test]
async fn cors_preflight_allows_dev_origin() {
    let app = create_fallback_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/contact")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn cors_ignores_unknown_origin() {
    let app = create_fallback_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/projects")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reads_all_succeed() {
    let app = create_fallback_router();

    let requests = (0..64).map(|i| {
        let app = app.clone();
        let uri = match i % 4 {
            0 => "/api/projects",
            1 => "/api/projects/2",
            2 => "/api/profile",
            _ => "/api/services",
        };
        tokio::spawn(async move { get(&app, uri).await })
    });

    let results = futures::future::join_all(requests).await;
    for result in results {
        let (status, _, _) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
    }
}

/// Shared in-memory sink for captured log output
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
