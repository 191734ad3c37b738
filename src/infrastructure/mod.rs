//! External collaborators behind capability traits
//!
//! Capture, generation, and similarity are opaque to the pipeline; each is
//! constructed once from configuration and injected where needed.

pub mod capture;
pub mod llm;
pub mod prompts;
pub mod similarity;

pub use capture::{CaptureCapability, CaptureError, HttpCapture, PageData};
pub use llm::{DisabledGenerative, GeminiGenerative, GenerativeCapability, LlmError, build_generative};
pub use prompts::PromptBuilder;
pub use similarity::{DEFAULT_SIMILARITY, PixelSimilarity, SimilarityCapability};
