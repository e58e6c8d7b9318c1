use std::sync::Mutex;

use serde_json::json;

use super::*;
use crate::net::transport::ApiResponse;
use crate::net::types::{Job, Paged};

/// Answers every request with one canned response and records requests.
struct Canned {
    status: u16,
    body: String,
    seen: Mutex<Vec<ApiRequest>>,
}

impl Canned {
    fn new(status: u16, body: serde_json::Value) -> Arc<Self> {
        Arc::new(Self { status, body: body.to_string(), seen: Mutex::new(Vec::new()) })
    }
}

#[async_trait::async_trait]
impl HttpCall for Canned {
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.seen.lock().unwrap().push(request);
        Ok(ApiResponse::new(self.status, self.body.clone()))
    }
}

#[tokio::test]
async fn get_with_query_decodes_paged_data() {
    let backend = Canned::new(
        200,
        json!({
            "statusCode": 200,
            "message": "ok",
            "data": {
                "result": [{ "_id": "j1", "name": "Rust dev", "company": { "_id": "c1", "name": "Acme" } }],
                "meta": { "current": 1, "pageSize": 10, "pages": 1, "total": 1 }
            }
        }),
    );
    let gateway = Gateway::from_pipeline(backend.clone());

    let page: Paged<Job> = gateway
        .get_with_query("/jobs", vec![("current".into(), "1".into()), ("pageSize".into(), "10".into())])
        .await
        .unwrap();
    assert_eq!(page.result[0].id, "j1");
    assert_eq!(page.meta.total, 1);
    assert_eq!(backend.seen.lock().unwrap()[0].query.len(), 2);
}

#[tokio::test]
async fn post_serializes_body() {
    let backend = Canned::new(201, json!({ "statusCode": 201, "message": "", "data": { "_id": "c9" } }));
    let gateway = Gateway::from_pipeline(backend.clone());

    let created: serde_json::Value = gateway.post("/companies", &json!({ "name": "Acme" })).await.unwrap();
    assert_eq!(created["_id"], "c9");
    let seen = backend.seen.lock().unwrap();
    assert_eq!(seen[0].method, reqwest::Method::POST);
    assert_eq!(seen[0].body, Some(json!({ "name": "Acme" })));
}

#[tokio::test]
async fn failure_status_preserves_envelope_message() {
    let backend = Canned::new(400, json!({ "statusCode": 400, "message": "Email already exists" }));
    let gateway = Gateway::from_pipeline(backend);

    let err = gateway.post::<serde_json::Value, _>("/auth/register", &json!({})).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message(), "Email already exists");
}

#[tokio::test]
async fn delete_ignores_body_on_success() {
    let backend = Canned::new(200, json!({ "statusCode": 200, "message": "deleted" }));
    let gateway = Gateway::from_pipeline(backend.clone());

    gateway.delete("/jobs/j1").await.unwrap();
    assert_eq!(backend.seen.lock().unwrap()[0].method, reqwest::Method::DELETE);
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let backend = Canned::new(200, json!({ "unexpected": true }));
    let gateway = Gateway::from_pipeline(backend);

    let err = gateway.get::<Job>("/jobs/j1").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn new_builds_production_pipeline() {
    let gateway = Gateway::new(
        &ClientConfig::default(),
        SessionHandle::in_memory(),
        Arc::new(crate::session::PersistentCookieJar::in_memory()),
        Arc::new(crate::routes::navigator::TracingNavigator::new()),
    );
    assert!(gateway.is_ok());
}
