//! Application setup and wiring

use std::sync::Arc;

use axum::Router;

use crate::application::analysis::AnalyzeWebsiteUseCase;
use crate::application::generation::ProjectGenerator;
use crate::application::pipeline::ClonePipeline;
use crate::config::Config;
use crate::infrastructure::capture::{CaptureCapability, HttpCapture};
use crate::infrastructure::llm::build_generative;
use crate::infrastructure::similarity::{PixelSimilarity, SimilarityCapability};
use crate::presentation::controllers::AppState;
use crate::presentation::routes::create_router;

/// Handle returned from create_app.
pub struct AppHandle {
    pub router: Router,
}

/// Build the application router with all capabilities wired.
///
/// Capabilities are constructed once from configuration and injected
/// explicitly, so tests can substitute doubles at every seam.
pub async fn create_app(config: Config) -> anyhow::Result<AppHandle> {
    let config = Arc::new(config);

    tokio::fs::create_dir_all(&config.generation.output_dir).await?;

    let capture: Arc<dyn CaptureCapability> = Arc::new(HttpCapture::new(&config.capture));
    let llm = build_generative(&config.llm);
    let similarity: Arc<dyn SimilarityCapability> = Arc::new(PixelSimilarity);

    let analyzer = AnalyzeWebsiteUseCase::new(llm.clone());
    let generator = ProjectGenerator::new(llm, &config.generation);
    let pipeline = Arc::new(ClonePipeline::new(
        capture, analyzer, generator, similarity, &config,
    ));

    let state = AppState {
        pipeline,
        config: config.clone(),
    };
    let router = create_router(state, config);

    Ok(AppHandle { router })
}
