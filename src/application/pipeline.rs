//! Clone pipeline orchestration
//!
//! Sequences capture → analyze → generate → validate → (optional) compare,
//! owning timing, resource cleanup, and error translation. Analysis and
//! generation recover their own failures; what reaches this layer is either
//! a capture error, a validation failure, or something unclassified.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::application::analysis::AnalyzeWebsiteUseCase;
use crate::application::generation::ProjectGenerator;
use crate::config::Config;
use crate::domain::error::CloneError;
use crate::domain::pipeline::{PipelineStage, StageTransitionError};
use crate::domain::project::GeneratedProject;
use crate::infrastructure::capture::CaptureCapability;
use crate::infrastructure::similarity::{DEFAULT_SIMILARITY, SimilarityCapability};

/// Caller-supplied options for one clone request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CloneOptions {
    /// URL of a deployed rendition of the generated site. Supplying it opts
    /// into the visual-comparison stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_url: Option<String>,
    /// Request a lighthouse audit placeholder in the response.
    pub run_lighthouse: bool,
}

/// One clone request as the pipeline sees it.
#[derive(Debug, Clone)]
pub struct CloneCommand {
    pub url: String,
    pub framework: Option<String>,
    pub options: CloneOptions,
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct CloneOutcome {
    pub status: String,
    pub similarity_score: f64,
    pub deployed_url: Option<String>,
    pub generation_time: f64,
    pub lighthouse_score: Option<serde_json::Value>,
    pub output_dir: PathBuf,
}

/// Orchestrates one clone request end to end.
pub struct ClonePipeline {
    capture: Arc<dyn CaptureCapability>,
    analyzer: AnalyzeWebsiteUseCase,
    generator: ProjectGenerator,
    similarity: Arc<dyn SimilarityCapability>,
    navigation_timeout: Duration,
    require_screenshot: bool,
    output_root: PathBuf,
}

impl ClonePipeline {
    pub fn new(
        capture: Arc<dyn CaptureCapability>,
        analyzer: AnalyzeWebsiteUseCase,
        generator: ProjectGenerator,
        similarity: Arc<dyn SimilarityCapability>,
        config: &Config,
    ) -> Self {
        Self {
            capture,
            analyzer,
            generator,
            similarity,
            navigation_timeout: Duration::from_millis(config.capture.navigation_timeout_ms),
            require_screenshot: config.capture.require_screenshot,
            output_root: config.generation.output_dir.clone(),
        }
    }

    /// Execute the full pipeline for one request.
    ///
    /// Capture resources are released on every exit path before the outcome
    /// is reported.
    pub async fn execute(&self, command: CloneCommand) -> Result<CloneOutcome, CloneError> {
        let started = Instant::now();
        let mut stage = PipelineStage::Created;
        info!(url = %command.url, "starting clone pipeline");

        let result = self.run(&mut stage, &command, started).await;

        self.capture.cleanup().await;

        if result.is_err() && !stage.is_terminal() {
            let failed_from = stage;
            stage = PipelineStage::Failed;
            debug!(from = %failed_from, to = %stage, "pipeline stage transition");
        }
        if let Err(e) = &result {
            warn!(url = %command.url, error = %e, "clone pipeline failed");
        }
        result
    }

    async fn run(
        &self,
        stage: &mut PipelineStage,
        command: &CloneCommand,
        started: Instant,
    ) -> Result<CloneOutcome, CloneError> {
        // Navigate
        let page = self
            .capture
            .navigate(&command.url, self.navigation_timeout)
            .await
            .map_err(|e| CloneError::Capture(e.to_string()))?;
        advance(stage, PipelineStage::Navigated)?;

        // Capture screenshot
        let timestamp = unix_timestamp();
        let screenshot_path = self.output_root.join(format!("original_{timestamp}.png"));
        let screenshot = match self.capture.screenshot(&screenshot_path).await {
            Ok(path) => Some(path),
            Err(e) if !self.require_screenshot => {
                debug!(error = %e, "screenshot unavailable; continuing without vision analysis");
                None
            }
            Err(e) => return Err(CloneError::Capture(e.to_string())),
        };
        advance(stage, PipelineStage::Captured)?;

        // Analyze
        let analyzed = self
            .analyzer
            .execute(&page.html_content, screenshot.as_deref())
            .await;
        advance(stage, PipelineStage::Analyzed)?;

        // Generate and persist
        let project = self
            .generator
            .generate(&analyzed.spec, command.framework.as_deref())
            .await;
        let output_dir = self
            .generator
            .persist(&project)
            .await
            .map_err(|e| CloneError::Internal(e.to_string()))?;
        advance(stage, PipelineStage::Generated)?;

        // Validate
        validate_project(&project)?;
        advance(stage, PipelineStage::Validated)?;

        // Compare (opt-in); its failures degrade, never escalate
        let similarity_score = match &command.options.generated_url {
            Some(generated_url) => {
                let score = self
                    .compare(generated_url, screenshot.as_deref(), timestamp)
                    .await;
                advance(stage, PipelineStage::Compared)?;
                score
            }
            None => 0.0,
        };

        let lighthouse_score = command
            .options
            .run_lighthouse
            .then(|| serde_json::json!({}));

        advance(stage, PipelineStage::Done)?;
        let generation_time = started.elapsed().as_secs_f64();
        info!(
            url = %command.url,
            seconds = generation_time,
            similarity = similarity_score,
            "clone pipeline completed"
        );

        Ok(CloneOutcome {
            status: "success".to_string(),
            similarity_score,
            deployed_url: None,
            generation_time,
            lighthouse_score,
            output_dir,
        })
    }

    /// Screenshot the generated site and score it against the original.
    async fn compare(
        &self,
        generated_url: &str,
        original_screenshot: Option<&Path>,
        timestamp: u64,
    ) -> f64 {
        let Some(original) = original_screenshot else {
            debug!("no original screenshot; using default similarity");
            return DEFAULT_SIMILARITY;
        };

        if let Err(e) = self
            .capture
            .navigate(generated_url, self.navigation_timeout)
            .await
        {
            warn!(url = generated_url, error = %e, "failed to load generated site");
            return DEFAULT_SIMILARITY;
        }

        let generated_path = self.output_root.join(format!("generated_{timestamp}.png"));
        match self.capture.screenshot(&generated_path).await {
            Ok(path) => self.similarity.compare(original, &path).await,
            Err(e) => {
                warn!(error = %e, "failed to capture generated site");
                DEFAULT_SIMILARITY
            }
        }
    }
}

/// Completeness checks for a generated project. Never panics; a failing
/// check is a validation failure distinct from an execution failure.
pub fn validate_project(project: &GeneratedProject) -> Result<(), CloneError> {
    for required in ["package.json", ".gitignore", "README.md"] {
        if !project.has_file(required) {
            return Err(CloneError::Validation(format!(
                "missing required file: {required}"
            )));
        }
    }

    if project.package_json.dependencies.is_empty() {
        return Err(CloneError::Validation(
            "package.json has no dependencies".to_string(),
        ));
    }

    let has_page = project.project_structure.keys().any(|path| {
        let lower = path.to_lowercase();
        lower.contains("page") || lower.contains("index")
    });
    if !has_page {
        return Err(CloneError::Validation(
            "no page or index file among generated files".to_string(),
        ));
    }

    Ok(())
}

fn advance(stage: &mut PipelineStage, to: PipelineStage) -> Result<(), CloneError> {
    if !stage.can_transition_to(&to) {
        return Err(CloneError::Stage(StageTransitionError {
            from: *stage,
            to,
        }));
    }
    debug!(from = %stage, to = %to, "pipeline stage transition");
    *stage = to;
    Ok(())
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
