//! Integration tests for the clone pipeline, run hermetically with
//! capability doubles at every seam.

mod common;

use std::sync::Arc;

use common::{
    FixedSimilarity, ScriptedGenerative, StaticCapture, build_pipeline, model_specification_json,
    test_config,
};
use reweave::application::pipeline::{CloneCommand, CloneOptions};
use reweave::domain::error::CloneError;

const SAMPLE_HTML: &str =
    "<header>Welcome</header><main>About</main><footer>\u{a9}2025</footer>";

fn command(url: &str, framework: &str) -> CloneCommand {
    CloneCommand {
        url: url.to_string(),
        framework: Some(framework.to_string()),
        options: CloneOptions::default(),
    }
}

#[tokio::test]
async fn test_happy_path_with_model_specification() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    // One response for analysis; file rendering then runs out of responses
    // and falls back to stubs, which must not fail the pipeline.
    let llm = Arc::new(ScriptedGenerative::with_responses(vec![
        model_specification_json(),
    ]));
    let pipeline = build_pipeline(
        Arc::new(StaticCapture::serving(SAMPLE_HTML)),
        llm,
        Arc::new(FixedSimilarity(0.0)),
        &config,
    );

    let outcome = pipeline
        .execute(command("https://acme.test", "react"))
        .await
        .expect("pipeline should succeed");

    assert_eq!(outcome.status, "success");
    assert_eq!(outcome.similarity_score, 0.0);
    assert!(outcome.generation_time >= 0.0);
    assert!(outcome.lighthouse_score.is_none());

    // Persisted layout: {output_root}/react_{ts}/project/
    assert!(outcome.output_dir.ends_with("project"));
    let parent = outcome.output_dir.parent().unwrap();
    let dir_name = parent.file_name().unwrap().to_string_lossy();
    assert!(dir_name.starts_with("react_"), "got {dir_name}");

    assert!(outcome.output_dir.join("components/Header.jsx").exists());
    assert!(outcome.output_dir.join("package.json").exists());
    assert!(outcome.output_dir.join(".gitignore").exists());
    assert!(outcome.output_dir.join("README.md").exists());
}

#[tokio::test]
async fn test_rule_based_floor_without_model() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let pipeline = build_pipeline(
        Arc::new(StaticCapture::serving(SAMPLE_HTML)),
        Arc::new(ScriptedGenerative::disabled()),
        Arc::new(FixedSimilarity(0.0)),
        &config,
    );

    let outcome = pipeline
        .execute(command("https://acme.test", "vanilla"))
        .await
        .expect("rule-based path should succeed");

    assert!(outcome.output_dir.join("index.html").exists());
    assert!(outcome.output_dir.join("main.js").exists());

    // Rule-based extraction quotes the actual page text into descriptions,
    // which the stub renderer embeds into the generated files.
    let header =
        std::fs::read_to_string(outcome.output_dir.join("components/Header.html")).unwrap();
    assert!(header.contains("Welcome"), "got: {header}");
}

#[tokio::test]
async fn test_model_failure_falls_through_to_rule_based() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    // Configured model with an empty script: every generate() call fails,
    // so analysis must fall through text-only to the rule-based floor.
    let pipeline = build_pipeline(
        Arc::new(StaticCapture::serving(SAMPLE_HTML)),
        Arc::new(ScriptedGenerative::with_responses(vec![])),
        Arc::new(FixedSimilarity(0.0)),
        &config,
    );

    let outcome = pipeline
        .execute(command("https://acme.test", "vanilla"))
        .await
        .expect("fallback must keep the pipeline alive");
    assert_eq!(outcome.status, "success");
}

#[tokio::test]
async fn test_unparseable_model_response_uses_text_segmentation() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let pipeline = build_pipeline(
        Arc::new(StaticCapture::serving(SAMPLE_HTML)),
        Arc::new(ScriptedGenerative::with_responses(vec![
            "The site is a marketing page with a big hero section.".to_string(),
        ])),
        Arc::new(FixedSimilarity(0.0)),
        &config,
    );

    let outcome = pipeline
        .execute(command("https://acme.test", "vanilla"))
        .await
        .expect("segmentation fallback never fails");
    assert_eq!(outcome.status, "success");
}

#[tokio::test]
async fn test_navigation_failure_is_a_capture_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let pipeline = build_pipeline(
        Arc::new(StaticCapture::failing()),
        Arc::new(ScriptedGenerative::disabled()),
        Arc::new(FixedSimilarity(0.0)),
        &config,
    );

    let err = pipeline
        .execute(command("https://unreachable.test", "react"))
        .await
        .unwrap_err();

    assert!(matches!(err, CloneError::Capture(_)));
    assert!(err.to_string().contains("connection refused"));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_comparison_opt_in_scores_generated_site() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let pipeline = build_pipeline(
        Arc::new(StaticCapture::serving(SAMPLE_HTML).with_screenshots()),
        Arc::new(ScriptedGenerative::disabled()),
        Arc::new(FixedSimilarity(0.87)),
        &config,
    );

    let mut cmd = command("https://acme.test", "vanilla");
    cmd.options.generated_url = Some("http://localhost:3000".to_string());

    let outcome = pipeline.execute(cmd).await.unwrap();
    assert_eq!(outcome.similarity_score, 0.87);
}

#[tokio::test]
async fn test_comparison_degrades_without_screenshots() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    // Capture backend cannot screenshot, so comparison has no original
    // image and must degrade to the neutral default instead of failing.
    let pipeline = build_pipeline(
        Arc::new(StaticCapture::serving(SAMPLE_HTML)),
        Arc::new(ScriptedGenerative::disabled()),
        Arc::new(FixedSimilarity(0.99)),
        &config,
    );

    let mut cmd = command("https://acme.test", "vanilla");
    cmd.options.generated_url = Some("http://localhost:3000".to_string());

    let outcome = pipeline.execute(cmd).await.unwrap();
    assert_eq!(outcome.similarity_score, 0.5);
}

#[tokio::test]
async fn test_lighthouse_placeholder_on_request() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let pipeline = build_pipeline(
        Arc::new(StaticCapture::serving(SAMPLE_HTML)),
        Arc::new(ScriptedGenerative::disabled()),
        Arc::new(FixedSimilarity(0.0)),
        &config,
    );

    let mut cmd = command("https://acme.test", "vanilla");
    cmd.options.run_lighthouse = true;

    let outcome = pipeline.execute(cmd).await.unwrap();
    assert_eq!(outcome.lighthouse_score, Some(serde_json::json!({})));
}
