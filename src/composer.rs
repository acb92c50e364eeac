//! Turns a user prompt and its design labels into model instructions.

use crate::error::AppError;
use crate::models::{ChatMessage, GenerateRequest};

const SITE_RULES: &str = "You are an expert web developer. Generate a complete, production-ready HTML website based on the user's description.

IMPORTANT REQUIREMENTS:
1. Return ONLY valid HTML code wrapped in <html> tags
2. Include ALL CSS inside <style> tags in the <head>
3. Include ALL JavaScript inside <script> tags before </body>
4. Make it visually stunning with modern design
5. Ensure responsive design for mobile and desktop
6. Use semantic HTML5 elements
7. No external dependencies - everything must be self-contained
8. No comments in the code
9. Implement smooth animations and transitions
10. Use a modern color palette with gradients";

pub const ASSISTANT_INSTRUCTION: &str = "You are a helpful website builder assistant. Help users refine their website ideas and write better prompts for AI website generation.

When users describe what they want, provide:
1. Suggestions to improve their idea
2. Questions to clarify their vision
3. Design recommendations
4. Feature suggestions that would work well

Be concise, friendly, and practical. Focus on helping them create better websites.";

/// Builds the system instruction for a website generation.
///
/// The fixed rules come first, then the style and layout labels, then the
/// prompt itself, all inserted unmodified. Fails with `InvalidRequest` when
/// the prompt is missing.
pub fn compose_instruction(request: &GenerateRequest) -> Result<String, AppError> {
    let prompt = request.prompt.as_str();
    if prompt.is_empty() {
        return Err(AppError::InvalidRequest("Prompt is required".into()));
    }

    Ok(format!(
        "{SITE_RULES}\n\nDesign Style: {}\nLayout Type: {}\n\nWebsite description: {prompt}\n\nGenerate the complete website now:",
        request.style_label(),
        request.layout_label(),
    ))
}

/// Picks the message the assistant answers: the last one in the thread.
pub fn last_message(messages: &[ChatMessage]) -> Result<&str, AppError> {
    match messages.last() {
        Some(message) if !message.content.trim().is_empty() => Ok(message.content.as_str()),
        _ => Err(AppError::InvalidRequest("Messages required".into())),
    }
}
