//! Route definitions and middleware stack

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::presentation::controllers::{AppState, clone_website, health_check, root};
use crate::presentation::models::{CloneRequest, CloneResponse, ErrorResponse, HealthResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::clone_website,
        crate::presentation::controllers::health_check,
    ),
    components(schemas(
        CloneRequest,
        CloneResponse,
        ErrorResponse,
        HealthResponse,
        crate::application::pipeline::CloneOptions,
    )),
    tags(
        (name = "clone", description = "Website cloning pipeline"),
        (name = "health", description = "Liveness endpoints")
    ),
    info(
        title = "Reweave API",
        version = "0.1.0",
        description = "Reconstructs a website's front-end from a live URL: capture, analysis, code generation, validation, and optional visual comparison."
    )
)]
pub struct ApiDoc;

/// Create the application router with the middleware stack.
pub fn create_router(state: AppState, config: Arc<Config>) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/clone", post(clone_website));

    // Avoid leaking docs in production unless explicitly enabled.
    if config.server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let cors = build_cors(&config.server.allowed_origins);

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_seconds,
                ))),
        )
        .with_state(state)
}

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<axum::http::HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| {
                axum::http::HeaderValue::from_str(origin)
                    .map_err(|_| {
                        tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                    })
                    .ok()
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    }
}
