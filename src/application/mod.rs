//! Application layer: use cases and orchestration

pub mod analysis;
pub mod generation;
pub mod pipeline;

pub use analysis::{AnalysisSource, AnalyzeWebsiteUseCase, AnalyzedWebsite};
pub use generation::{FileContentGenerator, ProjectGenerator};
pub use pipeline::{CloneCommand, CloneOptions, CloneOutcome, ClonePipeline, validate_project};
