//! Website analysis
//!
//! Turning a captured page into a complete [`Specification`] is attempted by
//! an explicit ordered list of strategies, first success wins:
//!
//! 1. vision: the model sees the screenshot plus markup (layout and
//!    rendered color that markup alone may not reveal),
//! 2. text-only: a degraded but still model-driven attempt over markup,
//! 3. rule-based: the deterministic floor, which cannot fail.
//!
//! Model and parse failures are recovered inside this module and never
//! surface to the pipeline.

pub mod completer;
pub mod fallback;
pub mod normalizer;

pub use completer::SpecificationCompleter;
pub use fallback::RuleBasedAnalyzer;
pub use normalizer::{ExtractionError, ResponseNormalizer};

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::hints::FrameworkHints;
use crate::domain::spec::Specification;
use crate::infrastructure::llm::{GenerativeCapability, LlmError};
use crate::infrastructure::prompts::PromptBuilder;

/// Which analysis strategy produced a specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    Vision,
    TextOnly,
    RuleBased,
}

impl std::fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vision => write!(f, "vision"),
            Self::TextOnly => write!(f, "text-only"),
            Self::RuleBased => write!(f, "rule-based"),
        }
    }
}

/// A completed specification plus the strategy that produced it.
#[derive(Debug, Clone)]
pub struct AnalyzedWebsite {
    pub spec: Specification,
    pub source: AnalysisSource,
}

/// Use case for deriving a design specification from a captured page.
pub struct AnalyzeWebsiteUseCase {
    llm: Arc<dyn GenerativeCapability>,
}

impl AnalyzeWebsiteUseCase {
    pub fn new(llm: Arc<dyn GenerativeCapability>) -> Self {
        Self { llm }
    }

    /// Analyze captured HTML (and optionally a screenshot) into a complete
    /// specification. Never fails: the rule-based floor always applies.
    pub async fn execute(&self, html: &str, screenshot: Option<&Path>) -> AnalyzedWebsite {
        let hints = FrameworkHints::detect(html);
        info!(
            frameworks = ?hints.frameworks,
            css_frameworks = ?hints.css_frameworks,
            cms = ?hints.cms,
            "framework hint detection complete"
        );

        // Build the ordered strategy list for this request. Vision needs
        // readable image bytes; text-only needs only a configured model.
        let mut attempts: Vec<(AnalysisSource, String, Option<Vec<u8>>)> = Vec::new();
        if self.llm.is_configured() {
            if let Some(path) = screenshot {
                match tokio::fs::read(path).await {
                    Ok(bytes) => attempts.push((
                        AnalysisSource::Vision,
                        PromptBuilder::vision_analysis(html, &hints),
                        Some(bytes),
                    )),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "screenshot unreadable; skipping vision analysis")
                    }
                }
            }
            attempts.push((
                AnalysisSource::TextOnly,
                PromptBuilder::text_analysis(html, &hints),
                None,
            ));
        }

        for (source, prompt, image) in attempts {
            match self.try_model(&prompt, image.as_deref(), &hints).await {
                Ok(spec) => {
                    let analyzed = AnalyzedWebsite { spec, source };
                    log_summary(&analyzed);
                    return analyzed;
                }
                Err(e) => warn!(source = %source, error = %e, "model analysis attempt failed"),
            }
        }

        let analyzed = AnalyzedWebsite {
            spec: RuleBasedAnalyzer::analyze(html, Some(&hints)),
            source: AnalysisSource::RuleBased,
        };
        log_summary(&analyzed);
        analyzed
    }

    /// One model attempt: generate, normalize, complete.
    ///
    /// Only the model call itself can fail here; an unparseable response is
    /// recovered by heuristic text segmentation, which always succeeds.
    async fn try_model(
        &self,
        prompt: &str,
        image: Option<&[u8]>,
        hints: &FrameworkHints,
    ) -> Result<Specification, LlmError> {
        let response = self.llm.generate(prompt, image).await?;
        if response.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        debug!(length = response.len(), "got model response");

        match ResponseNormalizer::extract(&response) {
            Ok(value) => Ok(SpecificationCompleter::complete(value, Some(hints))),
            Err(_) => {
                info!("no JSON object in model response; segmenting raw text");
                Ok(ResponseNormalizer::segment(&response, Some(hints)))
            }
        }
    }
}

fn log_summary(analyzed: &AnalyzedWebsite) {
    let spec = &analyzed.spec;
    info!(
        source = %analyzed.source,
        framework = %spec.framework.primary,
        css_framework = %spec.framework.css,
        components_count = spec.components.len(),
        layout_type = %spec.layout.layout_type,
        text_content_keys = ?spec.content_structure.text_content.keys().collect::<Vec<_>>(),
        "website analysis complete"
    );
}
