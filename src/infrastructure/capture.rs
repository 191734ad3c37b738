//! Page capture capability
//!
//! Capture is an external collaborator behind a trait: given a URL and a
//! timeout it returns raw HTML plus page metadata, and can optionally write
//! a screenshot. The production backend fetches over plain HTTP; a
//! browser-based backend can be slotted in without touching the pipeline.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use crate::config::CaptureConfig;

/// Raw result of navigating to a page.
#[derive(Debug, Clone)]
pub struct PageData {
    pub url: String,
    pub title: String,
    pub meta_description: String,
    pub html_content: String,
    pub status_code: Option<u16>,
}

/// Capture operation error.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Navigation failed for {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("Screenshot capture is not supported by this backend")]
    ScreenshotUnsupported,

    #[error("Screenshot failed: {0}")]
    Screenshot(String),
}

/// Capability for navigating to a page and capturing it.
#[async_trait]
pub trait CaptureCapability: Send + Sync {
    /// Navigate to `url` and gather page content and metadata.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<PageData, CaptureError>;

    /// Capture a screenshot of the most recently navigated page into
    /// `output_path`.
    async fn screenshot(&self, output_path: &Path) -> Result<PathBuf, CaptureError>;

    /// Release any held resources. Must be idempotent and safe to call even
    /// if nothing was ever acquired.
    async fn cleanup(&self) {}
}

/// HTTP-based capture backend.
///
/// Fetches the page body with a plain GET. It cannot render, so
/// screenshots are unsupported; the pipeline degrades to text-first
/// analysis unless configured to require them.
pub struct HttpCapture {
    client: Client,
}

impl HttpCapture {
    pub fn new(config: &CaptureConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

#[async_trait]
impl CaptureCapability for HttpCapture {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<PageData, CaptureError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| CaptureError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status_code = Some(response.status().as_u16());
        let html_content = response.text().await.map_err(|e| CaptureError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let (title, meta_description) = page_metadata(&html_content);
        debug!(url, status = ?status_code, bytes = html_content.len(), "page fetched");

        Ok(PageData {
            url: url.to_string(),
            title,
            meta_description,
            html_content,
            status_code,
        })
    }

    async fn screenshot(&self, _output_path: &Path) -> Result<PathBuf, CaptureError> {
        Err(CaptureError::ScreenshotUnsupported)
    }
}

/// Pull `<title>` and the meta description out of the markup.
fn page_metadata(html: &str) -> (String, String) {
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|s| document.select(&s).next())
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let meta_description = Selector::parse(r#"meta[name="description"]"#)
        .ok()
        .and_then(|s| document.select(&s).next())
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default()
        .to_string();

    (title, meta_description)
}
