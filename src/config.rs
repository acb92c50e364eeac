use std::time::Duration;
use thiserror::Error;

pub const DEMO_KEY: &str = "DEMO_KEY";

/// Website sampling stays creative but bounded.
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.7..=0.8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")] Invalid { key: &'static str, value: String },
}

/// Output budgets and the wall-clock ceiling applied to upstream calls.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub chat_max_output_tokens: u32,
    pub chat_temperature: f32,
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_output_tokens: 4000,
            temperature: 0.7,
            chat_max_output_tokens: 500,
            chat_temperature: 0.7,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub port: u16,
    pub public_base_url: String,
    pub generation: GenerationSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = GenerationSettings::default();

        let port: u16 = parse_or(&lookup, "PORT", 8080)?;
        let timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", defaults.timeout.as_secs())?;
        let temperature: f32 = parse_or(&lookup, "GENERATION_TEMPERATURE", defaults.temperature)?;
        if !TEMPERATURE_RANGE.contains(&temperature) {
            return Err(ConfigError::Invalid { key: "GENERATION_TEMPERATURE", value: temperature.to_string() });
        }

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key: lookup("GEMINI_API_KEY").unwrap_or_else(|| DEMO_KEY.into()),
            api_base: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| "gemini-2.0-flash".to_string()),
            port,
            public_base_url,
            generation: GenerationSettings {
                max_output_tokens: parse_or(&lookup, "GENERATION_MAX_TOKENS", defaults.max_output_tokens)?,
                temperature,
                chat_max_output_tokens: parse_or(&lookup, "CHAT_MAX_TOKENS", defaults.chat_max_output_tokens)?,
                chat_temperature: defaults.chat_temperature,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    pub fn is_demo(&self) -> bool { self.api_key == DEMO_KEY }

    /// Key prefix safe to print in startup logs.
    pub fn masked_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(4).collect();
        format!("{prefix}***")
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
