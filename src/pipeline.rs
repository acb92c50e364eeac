use chrono::Utc;
use std::future::Future;
use tracing::info;

use crate::{
    composer::{compose_instruction, last_message, ASSISTANT_INSTRUCTION},
    config::GenerationSettings,
    error::AppError,
    extractor::extract_artifact,
    generator::{GenerationError, Purpose, TextGenerator, TextRequest},
    models::{ChatMessage, GenerateRequest, GenerationMetadata, GenerationResult},
    publish::PREVIEW_SANDBOX,
};

async fn with_ceiling<F>(settings: &GenerationSettings, call: F) -> Result<String, GenerationError>
where
    F: Future<Output = Result<String, GenerationError>>,
{
    tokio::time::timeout(settings.timeout, call)
        .await
        .unwrap_or(Err(GenerationError::Timeout(settings.timeout.as_secs())))
}

/// Prompt → instruction → upstream call → extracted artifact.
pub async fn generate_site(
    generator: &dyn TextGenerator,
    settings: &GenerationSettings,
    request: &GenerateRequest,
) -> Result<GenerationResult, AppError> {
    let system = compose_instruction(request)?;
    let prompt = request.prompt.clone();

    info!("🚀 Generating website for prompt: {} (style: {}, layout: {})", prompt, request.style_label(), request.layout_label());

    let text_request = TextRequest {
        purpose: Purpose::Website,
        system,
        prompt: prompt.clone(),
        max_output_tokens: settings.max_output_tokens,
        temperature: settings.temperature,
    };
    let raw = with_ceiling(settings, generator.generate_text(text_request))
        .await
        .map_err(|source| AppError::GenerationFailed { context: "Failed to generate website", source })?;

    let html = extract_artifact(&raw).to_string();
    info!("✅ Website generated: {} chars ({} raw)", html.len(), raw.len());

    Ok(GenerationResult {
        html,
        metadata: GenerationMetadata {
            generated_at: Utc::now(),
            model: generator.model_id(),
            prompt,
            style: request.style.clone(),
            layout_type: request.layout_type.clone(),
            preview_sandbox: PREVIEW_SANDBOX.to_string(),
        },
    })
}

/// Answers the last message of a builder-assistant conversation.
pub async fn assist(
    generator: &dyn TextGenerator,
    settings: &GenerationSettings,
    messages: &[ChatMessage],
) -> Result<String, AppError> {
    let question = last_message(messages)?;
    info!("💬 Assistant request ({} messages in thread)", messages.len());

    let text_request = TextRequest {
        purpose: Purpose::Assistant,
        system: ASSISTANT_INSTRUCTION.to_string(),
        prompt: question.to_string(),
        max_output_tokens: settings.chat_max_output_tokens,
        temperature: settings.chat_temperature,
    };
    with_ceiling(settings, generator.generate_text(text_request))
        .await
        .map_err(|source| AppError::GenerationFailed { context: "Failed to process chat message", source })
}
