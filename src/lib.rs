//! Reweave - website front-end reconstruction service
//!
//! Reconstructs a website's front-end from a live URL: capture, model-assisted
//! analysis with deterministic fallbacks, per-framework code generation,
//! validation, and optional visual comparison.
//!
//! # Architecture
//!
//! ```text
//! reweave/
//! ├── domain/           # Specification schema, project model, stage machine
//! ├── application/      # Analysis strategies, generation, pipeline
//! ├── infrastructure/   # Capture, model, similarity capabilities
//! ├── presentation/     # HTTP surface (axum)
//! └── config/           # Layered configuration
//! ```
//!
//! # Configuration
//!
//! Environment variables use the `REWEAVE__` prefix with double underscore
//! separators:
//!
//! ```bash
//! REWEAVE__SERVER__PORT=8000
//! REWEAVE__LLM__GEMINI_API_KEY=...
//! ```

mod app;

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

pub use app::{AppHandle, create_app};
pub use config::Config;
pub use logging::init_tracing;
