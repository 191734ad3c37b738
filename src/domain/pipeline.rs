//! Pipeline stage machine
//!
//! Every clone request advances through a fixed sequence of stages; each
//! transition corresponds to one external-collaborator or component call.
//! `Failed` is reachable from any non-terminal stage.
//!
//! ```text
//! Created ──► Navigated ──► Captured ──► Analyzed ──► Generated ──► Validated ──► Done
//!                                                                       │           ▲
//!                                                                       └► Compared ┘
//! ```

use serde::{Deserialize, Serialize};

/// Stage of the clone pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    Created,
    Navigated,
    Captured,
    Analyzed,
    Generated,
    Validated,
    Compared,
    Done,
    Failed,
}

impl PipelineStage {
    /// Returns the set of valid target stages from the current stage.
    pub fn valid_transitions(&self) -> &[PipelineStage] {
        match self {
            Self::Created => &[Self::Navigated, Self::Failed],
            Self::Navigated => &[Self::Captured, Self::Failed],
            Self::Captured => &[Self::Analyzed, Self::Failed],
            Self::Analyzed => &[Self::Generated, Self::Failed],
            Self::Generated => &[Self::Validated, Self::Failed],
            Self::Validated => &[Self::Compared, Self::Done, Self::Failed],
            Self::Compared => &[Self::Done, Self::Failed],
            Self::Done | Self::Failed => &[],
        }
    }

    /// Check whether transitioning to `target` is allowed from this stage.
    pub fn can_transition_to(&self, target: &PipelineStage) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Whether this stage is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Created => "Created",
            Self::Navigated => "Navigated",
            Self::Captured => "Captured",
            Self::Analyzed => "Analyzed",
            Self::Generated => "Generated",
            Self::Validated => "Validated",
            Self::Compared => "Compared",
            Self::Done => "Done",
            Self::Failed => "Failed",
        };
        write!(f, "{}", name)
    }
}

/// Error returned when an invalid stage transition is attempted.
#[derive(Debug, thiserror::Error)]
#[error("Invalid pipeline transition from {from} to {to}")]
pub struct StageTransitionError {
    pub from: PipelineStage,
    pub to: PipelineStage,
}
