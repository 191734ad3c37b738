//! HTTP request and response models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::pipeline::{CloneCommand, CloneOptions, CloneOutcome};

/// Request body for `POST /clone`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CloneRequest {
    /// URL of the website to clone
    #[schema(example = "https://example.com")]
    pub url: String,

    /// Target framework for the generated project
    #[serde(default = "default_framework")]
    #[schema(example = "react")]
    pub framework: String,

    #[serde(default)]
    pub options: CloneOptions,
}

fn default_framework() -> String {
    "react".to_string()
}

impl CloneRequest {
    pub fn into_command(self) -> CloneCommand {
        CloneCommand {
            url: self.url,
            framework: Some(self.framework),
            options: self.options,
        }
    }
}

/// Response body for a successful clone.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CloneResponse {
    #[schema(example = "success")]
    pub status: String,

    /// Visual similarity against the original, in [0, 1]; 0.0 when the
    /// comparison stage was not requested
    pub similarity_score: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployed_url: Option<String>,

    /// Wall-clock pipeline duration in seconds
    pub generation_time: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lighthouse_score: Option<serde_json::Value>,
}

impl From<CloneOutcome> for CloneResponse {
    fn from(outcome: CloneOutcome) -> Self {
        Self {
            status: outcome.status,
            similarity_score: outcome.similarity_score,
            deployed_url: outcome.deployed_url,
            generation_time: outcome.generation_time,
            lighthouse_score: outcome.lighthouse_score,
        }
    }
}

/// Error payload for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Liveness payload for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_request_defaults() {
        let request: CloneRequest =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(request.framework, "react");
        assert!(request.options.generated_url.is_none());
        assert!(!request.options.run_lighthouse);
    }

    #[test]
    fn test_clone_request_with_options() {
        let request: CloneRequest = serde_json::from_str(
            r#"{
                "url": "https://example.com",
                "framework": "vue",
                "options": {"generated_url": "http://localhost:3000", "run_lighthouse": true}
            }"#,
        )
        .unwrap();
        assert_eq!(request.framework, "vue");
        let command = request.into_command();
        assert_eq!(
            command.options.generated_url.as_deref(),
            Some("http://localhost:3000")
        );
        assert!(command.options.run_lighthouse);
    }

    #[test]
    fn test_response_omits_absent_optionals() {
        let response = CloneResponse {
            status: "success".into(),
            similarity_score: 0.0,
            deployed_url: None,
            generation_time: 1.5,
            lighthouse_score: None,
        };
        let serialized = serde_json::to_string(&response).unwrap();
        assert!(!serialized.contains("deployed_url"));
        assert!(!serialized.contains("lighthouse_score"));
    }
}
