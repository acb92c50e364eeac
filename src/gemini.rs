use crate::config::{AppConfig, DEMO_KEY};
use crate::generator::{GenerationError, Purpose, TextGenerator, TextRequest};
use async_trait::async_trait;
use serde_json::json;
use serde::Deserialize;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, error};

const LOG_PREVIEW_CHARS: usize = 300;

// Shortens long upstream payloads for log lines
fn preview(text: &str) -> String {
    if text.chars().count() <= LOG_PREVIEW_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
    format!("{}...[{} chars total]", head, text.chars().count())
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String, model: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                error!("❌ Failed to build HTTP client with timeout, using defaults: {}", e);
                Client::new()
            });
        Self { client, api_key, base_url: base_url.trim_end_matches('/').to_string(), model }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_key.clone(),
            config.api_base.clone(),
            config.model.clone(),
            config.generation.timeout,
        )
    }

    fn is_demo(&self) -> bool { self.api_key == DEMO_KEY }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent?key={}", self.base_url, self.model, self.api_key)
    }

    pub fn build_payload(request: &TextRequest) -> serde_json::Value {
        json!({
            "systemInstruction": {
                "parts": [{"text": request.system}]
            },
            "contents": [{
                "role": "user",
                "parts": [{"text": request.prompt}]
            }],
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_output_tokens,
                "candidateCount": 1
            }
        })
    }

    async fn perform_api_call(&self, request: &TextRequest) -> Result<String, GenerationError> {
        let url = self.endpoint();
        info!("🔗 Making {:?} request to: {}", request.purpose, url.replace(&self.api_key, "***"));

        let response = self.client
            .post(&url)
            .json(&Self::build_payload(request))
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| GenerationError::Http(e.to_string()))?;
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            error!("❌ Gemini API error response: {}", preview(&response_text));
            return Err(GenerationError::Http(format!("status={} body={}", status, response_text)));
        }

        info!("📥 Raw Gemini API response: {}", preview(&response_text));
        parse_text_response(&response_text)
    }

    fn demo_response(request: &TextRequest) -> String {
        match request.purpose {
            Purpose::Website => placeholder_site(&request.prompt),
            Purpose::Assistant => format!(
                "Demo assistant: to sharpen \"{}\", name your audience, the one action visitors should take, \
                 and two or three sections you expect on the page (hero, features, contact). \
                 Mention a color mood and tone of voice so the design can match.",
                request.prompt
            ),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn model_id(&self) -> String { self.model.clone() }

    async fn generate_text(&self, request: TextRequest) -> Result<String, GenerationError> {
        if self.is_demo() {
            info!("Using demo mode - no upstream call for {:?}", request.purpose);
            return Ok(Self::demo_response(&request));
        }

        info!("Generating text with Gemini API (max {} tokens, temperature {})", request.max_output_tokens, request.temperature);
        let result = self.perform_api_call(&request).await;
        match &result {
            Ok(text) => info!("✅ Generated {} chars of text", text.len()),
            Err(e) => error!("❌ Failed to generate text: {}", e),
        }
        result
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn placeholder_site(prompt: &str) -> String {
    let palette = ["#4F46E5", "#0EA5E9", "#10B981", "#F59E0B", "#EC4899"];
    let accent = palette[prompt.len() % palette.len()];
    let title = escape_html(prompt);

    format!(r#"Here is your website:
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ margin: 0; font-family: system-ui, sans-serif; color: #111827; }}
header {{ padding: 96px 24px; text-align: center; color: white; background: linear-gradient(135deg, {accent}, #111827); }}
main {{ max-width: 960px; margin: 0 auto; padding: 48px 24px; display: grid; gap: 24px; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); }}
section {{ padding: 24px; border-radius: 16px; box-shadow: 0 8px 24px rgba(0,0,0,0.08); transition: transform 0.3s; }}
section:hover {{ transform: translateY(-4px); }}
</style>
</head>
<body>
<header><h1>{title}</h1><p>Demo preview generated without an API key</p></header>
<main>
<section><h2>About</h2><p>Describe what makes you different.</p></section>
<section><h2>Services</h2><p>List what you offer.</p></section>
<section><h2>Contact</h2><p>Tell visitors how to reach you.</p></section>
</main>
<script>document.querySelectorAll('section').forEach(function (s, i) {{ s.style.opacity = 0; setTimeout(function () {{ s.style.opacity = 1; }}, 150 * i); }});</script>
</body>
</html>"#)
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate { #[serde(default)] content: Content }

#[derive(Debug, Deserialize, Default)]
struct Content { #[serde(default)] parts: Vec<Part> }

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Other(serde_json::Value),
}

/// Joins the text parts of the first candidate.
pub fn parse_text_response(body: &str) -> Result<String, GenerationError> {
    let parsed: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::Parse(format!("{}: {}", e, preview(body))))?;

    let text: String = parsed.candidates
        .first()
        .map(|c| c.content.parts.iter().filter_map(|p| match p {
            Part::Text { text } => Some(text.as_str()),
            Part::Other(_) => None,
        }).collect())
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text.to_string())
}
