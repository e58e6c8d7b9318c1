use std::sync::Mutex;

use super::*;

/// Records every request and answers 200.
#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<ApiRequest>>,
}

#[async_trait::async_trait]
impl HttpCall for Recorder {
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.seen.lock().unwrap().push(request);
        Ok(ApiResponse::new(200, "{}"))
    }
}

#[tokio::test]
async fn attaches_session_token() {
    let session = SessionHandle::in_memory();
    session.set_access_token(Some("abc".into())).unwrap();
    let layer = WithAuth::new(Recorder::default(), session);

    layer.call(ApiRequest::get("/jobs")).await.unwrap();
    let seen = layer.inner.seen.lock().unwrap();
    assert_eq!(seen[0].bearer.as_deref(), Some("abc"));
}

#[tokio::test]
async fn sends_unauthenticated_without_token() {
    let layer = WithAuth::new(Recorder::default(), SessionHandle::in_memory());

    layer.call(ApiRequest::get("/jobs")).await.unwrap();
    assert!(layer.inner.seen.lock().unwrap()[0].bearer.is_none());
}

#[tokio::test]
async fn explicit_bearer_is_kept() {
    let session = SessionHandle::in_memory();
    session.set_access_token(Some("stale".into())).unwrap();
    let layer = WithAuth::new(Recorder::default(), session);

    layer.call(ApiRequest::get("/jobs").with_bearer("fresh")).await.unwrap();
    assert_eq!(layer.inner.seen.lock().unwrap()[0].bearer.as_deref(), Some("fresh"));
}

#[tokio::test]
async fn reads_token_at_call_time() {
    let session = SessionHandle::in_memory();
    let layer = WithAuth::new(Recorder::default(), session.clone());

    layer.call(ApiRequest::get("/a")).await.unwrap();
    session.set_access_token(Some("later".into())).unwrap();
    layer.call(ApiRequest::get("/b")).await.unwrap();

    let seen = layer.inner.seen.lock().unwrap();
    assert!(seen[0].bearer.is_none());
    assert_eq!(seen[1].bearer.as_deref(), Some("later"));
}
