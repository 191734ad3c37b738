//! Shared test doubles and helpers
//!
//! Capability doubles follow the same seams the real app wires in
//! `create_app`, so a whole pipeline can run hermetically in-process.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use reweave::application::analysis::AnalyzeWebsiteUseCase;
use reweave::application::generation::ProjectGenerator;
use reweave::application::pipeline::ClonePipeline;
use reweave::config::Config;
use reweave::infrastructure::capture::{CaptureCapability, CaptureError, PageData};
use reweave::infrastructure::llm::{GenerativeCapability, LlmError};
use reweave::infrastructure::similarity::SimilarityCapability;

/// Capture double that serves a fixed page and optionally supports
/// screenshots by writing placeholder bytes.
pub struct StaticCapture {
    pub html: String,
    pub supports_screenshots: bool,
    pub fail_navigation: bool,
}

impl StaticCapture {
    pub fn serving(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            supports_screenshots: false,
            fail_navigation: false,
        }
    }

    pub fn with_screenshots(mut self) -> Self {
        self.supports_screenshots = true;
        self
    }

    pub fn failing() -> Self {
        Self {
            html: String::new(),
            supports_screenshots: false,
            fail_navigation: true,
        }
    }
}

#[async_trait]
impl CaptureCapability for StaticCapture {
    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<PageData, CaptureError> {
        if self.fail_navigation {
            return Err(CaptureError::Navigation {
                url: url.to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(PageData {
            url: url.to_string(),
            title: "Test Page".to_string(),
            meta_description: String::new(),
            html_content: self.html.clone(),
            status_code: Some(200),
        })
    }

    async fn screenshot(&self, output_path: &Path) -> Result<PathBuf, CaptureError> {
        if !self.supports_screenshots {
            return Err(CaptureError::ScreenshotUnsupported);
        }
        std::fs::write(output_path, b"placeholder image bytes")
            .map_err(|e| CaptureError::Screenshot(e.to_string()))?;
        Ok(output_path.to_path_buf())
    }
}

/// Model double that pops scripted responses in order; an empty queue means
/// the model errors.
pub struct ScriptedGenerative {
    responses: Mutex<Vec<String>>,
    configured: bool,
}

impl ScriptedGenerative {
    pub fn with_responses(responses: Vec<String>) -> Self {
        let mut queue = responses;
        queue.reverse();
        Self {
            responses: Mutex::new(queue),
            configured: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            configured: false,
        }
    }
}

#[async_trait]
impl GenerativeCapability for ScriptedGenerative {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, _prompt: &str, _image: Option<&[u8]>) -> Result<String, LlmError> {
        match self.responses.lock().await.pop() {
            Some(response) => Ok(response),
            None => Err(LlmError::EmptyResponse),
        }
    }
}

/// Similarity double returning a fixed score.
pub struct FixedSimilarity(pub f64);

#[async_trait]
impl SimilarityCapability for FixedSimilarity {
    async fn compare(&self, _original: &Path, _generated: &Path) -> f64 {
        self.0
    }
}

/// Build a config rooted in a temp directory.
pub fn test_config(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.generation.output_dir = output_dir.to_path_buf();
    config
}

/// Assemble a pipeline from doubles.
pub fn build_pipeline(
    capture: Arc<dyn CaptureCapability>,
    llm: Arc<dyn GenerativeCapability>,
    similarity: Arc<dyn SimilarityCapability>,
    config: &Config,
) -> ClonePipeline {
    let analyzer = AnalyzeWebsiteUseCase::new(llm.clone());
    let generator = ProjectGenerator::new(llm, &config.generation);
    ClonePipeline::new(capture, analyzer, generator, similarity, config)
}

/// A specification the model might plausibly return, as raw JSON text.
pub fn model_specification_json() -> String {
    serde_json::json!({
        "framework": {"primary": "react", "css": "tailwind"},
        "components": ["header", "hero", "footer"],
        "content_structure": {
            "text_content": {
                "header": "Acme Industries",
                "main": "We make everything",
                "footer": "© Acme 2025"
            }
        },
        "cloning_requirements": {
            "component_files": ["components/Header.jsx"],
            "components_description": {
                "components/Header.jsx": "Header with the Acme Industries wordmark"
            },
            "pages": ["src/index.jsx"],
            "pages_description": {
                "src/index.jsx": "Entry point that renders the app"
            },
            "styles": ["src/index.css"],
            "styles_description": {
                "src/index.css": "Tailwind base styles"
            },
            "package_json": {
                "name": "acme-clone",
                "version": "1.0.0",
                "dependencies": {"react": "^18.2.0", "react-dom": "^18.2.0"}
            }
        }
    })
    .to_string()
}
