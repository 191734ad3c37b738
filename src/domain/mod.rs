//! Core domain models and value objects

pub mod error;
pub mod hints;
pub mod pipeline;
pub mod project;
pub mod spec;

pub use error::CloneError;
pub use hints::FrameworkHints;
pub use pipeline::{PipelineStage, StageTransitionError};
pub use project::{ConfigFiles, FileKind, GeneratedProject, OrderedFiles, ProjectFiles};
pub use spec::{
    CloningRequirements, ColorPalette, ContentStructure, CssFramework, Framework, FrameworkInfo,
    Layout, PackageManifest, Specification, Typography,
};
