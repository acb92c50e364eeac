use async_trait::async_trait;
use axum::{body::Body, http::{Request, Response}, Router};
use serde_json::Value;
use std::sync::{atomic::{AtomicUsize, Ordering}, Arc};
use tower::ServiceExt;

use site_forge::{
    config::AppConfig,
    generator::{GenerationError, TextGenerator, TextRequest},
    routes::{router, AppState},
};

/// Counts calls and replies with a fixed text or a fixed failure.
pub struct RecordingGenerator {
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl RecordingGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(text.to_string()), calls: AtomicUsize::new(0) })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self { reply: Err(message.to_string()), calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    fn model_id(&self) -> String { "recording-model".into() }

    async fn generate_text(&self, _request: TextRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(GenerationError::Http)
    }
}

pub fn test_app(generator: Arc<RecordingGenerator>) -> Router {
    let config = AppConfig::from_lookup(|key| match key {
        "PUBLIC_BASE_URL" => Some("https://sites.test".to_string()),
        _ => None,
    }).unwrap();
    router(AppState::new(&config, generator))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
