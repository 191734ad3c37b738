//! Generative model capability
//!
//! The model is an opaque collaborator: prompt in, free text out, or
//! failure. No guarantee on output shape: all shape enforcement happens in
//! the response normalizer. The capability is constructed once from
//! configuration and passed explicitly into every component that generates,
//! so tests can substitute a scripted double.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::config::LlmConfig;

/// Generative model operation error.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Model not configured: {0}")]
    Configuration(String),

    #[error("Model API error: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Invalid response from model: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}

/// Core trait for generative model backends.
///
/// Object-safe; used with dynamic dispatch via `Arc<dyn GenerativeCapability>`.
#[async_trait]
pub trait GenerativeCapability: Send + Sync {
    /// Whether a real model backs this capability. When false, callers skip
    /// model strategies entirely instead of paying a failed round trip.
    fn is_configured(&self) -> bool;

    /// Generate free text from a prompt, optionally with PNG image bytes
    /// for vision-capable models.
    async fn generate(&self, prompt: &str, image_png: Option<&[u8]>) -> Result<String, LlmError>;
}

/// Gemini `generateContent` REST backend.
pub struct GeminiGenerative {
    client: Client,
    config: LlmConfig,
}

impl GeminiGenerative {
    pub fn new(config: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        self.config
            .gemini_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| LlmError::Configuration("Gemini API key not configured".into()))
    }
}

#[async_trait]
impl GenerativeCapability for GeminiGenerative {
    fn is_configured(&self) -> bool {
        self.config
            .gemini_api_key
            .as_deref()
            .is_some_and(|k| !k.is_empty())
    }

    async fn generate(&self, prompt: &str, image_png: Option<&[u8]>) -> Result<String, LlmError> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        );

        let mut parts = vec![json!({"text": prompt})];
        if let Some(bytes) = image_png {
            parts.push(json!({
                "inline_data": {
                    "mime_type": "image/png",
                    "data": BASE64.encode(bytes),
                }
            }));
        }

        let body = json!({
            "contents": [{"parts": parts}],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_output_tokens,
            }
        });

        debug!(model = %self.config.model, vision = image_png.is_some(), "sending generation request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            error!(status, "model API error");
            return Err(LlmError::Api { status, message });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Capability used when no API key is configured; callers see
/// `is_configured() == false` and fall through to deterministic paths.
pub struct DisabledGenerative;

#[async_trait]
impl GenerativeCapability for DisabledGenerative {
    fn is_configured(&self) -> bool {
        false
    }

    async fn generate(&self, _prompt: &str, _image_png: Option<&[u8]>) -> Result<String, LlmError> {
        Err(LlmError::Configuration(
            "no generative model configured".into(),
        ))
    }
}

/// Build the generative capability from configuration.
pub fn build_generative(config: &LlmConfig) -> Arc<dyn GenerativeCapability> {
    match config.gemini_api_key.as_deref() {
        Some(key) if !key.is_empty() => Arc::new(GeminiGenerative::new(config.clone())),
        _ => {
            warn!("no Gemini API key configured; analysis and rendering will use deterministic fallbacks");
            Arc::new(DisabledGenerative)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello"}, {"text": " world"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), "Hello world");
    }

    #[test]
    fn test_response_text_empty_without_candidates() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.text(), "");
    }

    #[tokio::test]
    async fn test_disabled_capability() {
        let capability = DisabledGenerative;
        assert!(!capability.is_configured());
        assert!(capability.generate("hi", None).await.is_err());
    }
}
