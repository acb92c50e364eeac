use serde::{Serialize, Deserialize};
use serde_with::skip_serializing_none;
use chrono::{DateTime, Utc};

pub const DEFAULT_STYLE: &str = "Modern Minimal";
pub const DEFAULT_LAYOUT: &str = "Single Page";
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub style: Option<String>, // e.g. "Modern Minimal", "Brutalist"
    #[serde(default)]
    pub layout_type: Option<String>, // e.g. "Single Page", "Multi Section"
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), ..Default::default() }
    }

    /// Style label as sent; blank or missing falls back to the default.
    pub fn style_label(&self) -> &str {
        non_blank(self.style.as_deref()).unwrap_or(DEFAULT_STYLE)
    }

    pub fn layout_label(&self) -> &str {
        non_blank(self.layout_type.as_deref()).unwrap_or(DEFAULT_LAYOUT)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// `style` and `layout_type` echo the request as sent, absent when omitted.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub prompt: String,
    pub style: Option<String>,
    pub layout_type: Option<String>,
    pub preview_sandbox: String,
}

/// One-shot result of a website generation; never stored server-side.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerationResult {
    pub html: String,
    pub metadata: GenerationMetadata,
}

#[derive(Debug, Serialize, Clone)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: GenerationResult,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub html: String,
}

/// A stored artifact, addressable by its opaque id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublishedArtifact {
    pub id: String,
    pub project_id: Option<String>,
    pub display_name: String,
    pub html: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Live,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,
    pub project_id: Option<String>,
    pub display_name: String,
    pub url: String,
    pub status: DeploymentStatus,
    pub deployed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct PublishResponse {
    pub success: bool,
    pub deployment: Deployment,
}

#[derive(Debug, Serialize, Clone)]
pub struct PublishedRecord {
    pub success: bool,
    pub deployment: Deployment,
    pub html: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct DeploymentList {
    pub success: bool,
    pub count: usize,
    pub deployments: Vec<Deployment>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}
