use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use std::sync::Arc;
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};

use crate::{
    config::{AppConfig, GenerationSettings},
    error::AppError,
    generator::TextGenerator,
    models::{
        ChatRequest, ChatResponse, DeploymentList, GenerateRequest, GenerateResponse, HealthStatus,
        PublishRequest, PublishResponse, PublishedRecord, DEFAULT_PROJECT_NAME,
    },
    pipeline::{assist, generate_site},
    publish::{to_deployment, ArtifactStore, PREVIEW_SANDBOX},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
    pub generator: Arc<dyn TextGenerator>,
    pub settings: Arc<GenerationSettings>,
    pub public_base_url: Arc<str>,
}

impl AppState {
    pub fn new(config: &AppConfig, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            store: Arc::default(),
            generator,
            settings: Arc::new(config.generation.clone()),
            public_base_url: config.public_base_url.as_str().into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/generate", post(generate_website))
        .route("/chat", post(chat))
        .route("/publish", post(publish).get(list_published))
        .route("/publish/:id", get(get_published))
        .route("/health", get(health));

    Router::new()
        .nest("/api", api)
        .route("/published/:id", get(view_published))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

pub async fn generate_website(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(body) = payload?;
    let result = generate_site(state.generator.as_ref(), &state.settings, &body).await?;
    Ok(Json(GenerateResponse { success: true, result }))
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(body) = payload?;
    let message = assist(state.generator.as_ref(), &state.settings, &body.messages).await?;
    Ok(Json(ChatResponse { success: true, message }))
}

pub async fn publish(
    State(state): State<AppState>,
    payload: Result<Json<PublishRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublishResponse>), AppError> {
    let Json(body) = payload?;
    let project_id = body.project_id.trim();
    if project_id.is_empty() {
        return Err(AppError::InvalidRequest("Project ID is required".into()));
    }
    if body.html.trim().is_empty() {
        return Err(AppError::InvalidRequest("HTML is required".into()));
    }

    let display_name = body.project_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());

    let artifact = state.store.publish(body.html, display_name, Some(project_id.to_string()));
    let deployment = to_deployment(&artifact, &state.public_base_url);
    tracing::info!("🌐 Deployment live at {}", deployment.url);
    Ok((StatusCode::CREATED, Json(PublishResponse { success: true, deployment })))
}

pub async fn list_published(State(state): State<AppState>) -> Json<DeploymentList> {
    let deployments = state.store.list().iter()
        .map(|a| to_deployment(a, &state.public_base_url))
        .collect();
    Json(DeploymentList { success: true, count: state.store.len(), deployments })
}

pub async fn get_published(Path(id): Path<String>, State(state): State<AppState>) -> Result<Json<PublishedRecord>, AppError> {
    let artifact = state.store.get(&id).ok_or_else(|| AppError::NotFound("Website not found".into()))?;
    let deployment = to_deployment(&artifact, &state.public_base_url);
    Ok(Json(PublishedRecord { success: true, deployment, html: artifact.html }))
}

pub async fn view_published(Path(id): Path<String>, State(state): State<AppState>) -> Result<Response, AppError> {
    let html = state.store.lookup(&id).ok_or_else(|| AppError::NotFound("Website not found".into()))?;
    let headers = [
        (header::CONTENT_SECURITY_POLICY, format!("sandbox {PREVIEW_SANDBOX}")),
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
    ];
    Ok((headers, Html(html)).into_response())
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".into(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}
