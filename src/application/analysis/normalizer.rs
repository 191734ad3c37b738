//! Response normalization for model outputs
//!
//! Model responses are inconsistent: sometimes pure JSON, sometimes
//! prose-wrapped, sometimes truncated. Extraction therefore tries a fixed
//! priority ladder of patterns and takes the first one whose matched span
//! parses, without ranking by content quality. When nothing parses, the
//! heuristic text-segmentation fallback still yields a complete
//! specification, so this stage cannot stall the pipeline.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::domain::hints::FrameworkHints;
use crate::domain::spec::{CssFramework, Framework, Specification};

/// Extraction failure: no pattern produced a syntactically valid object.
#[derive(Debug, thiserror::Error)]
#[error("no JSON object could be extracted from the model response")]
pub struct ExtractionError;

struct ExtractionPattern {
    regex: Regex,
    group: usize,
}

/// Priority order matters: a greedy whole-text match first, then a trailing
/// object, then fenced variants for responses the fence-stripping pre-pass
/// did not normalize.
static EXTRACTION_PATTERNS: Lazy<Vec<ExtractionPattern>> = Lazy::new(|| {
    vec![
        ExtractionPattern {
            regex: Regex::new(r"\{[\s\S]*\}").expect("valid extraction pattern"),
            group: 0,
        },
        ExtractionPattern {
            regex: Regex::new(r"(\{[\s\S]*?\})\s*$").expect("valid extraction pattern"),
            group: 1,
        },
        ExtractionPattern {
            regex: Regex::new(r"```json\s*(\{[\s\S]*?\})\s*```").expect("valid extraction pattern"),
            group: 1,
        },
        ExtractionPattern {
            regex: Regex::new(r"```\s*(\{[\s\S]*?\})\s*```").expect("valid extraction pattern"),
            group: 1,
        },
    ]
});

/// Extracts a structured object from arbitrary model output text.
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Extract the first parseable JSON object from `raw_text`.
    ///
    /// The first pattern that yields a syntactically valid object wins; the
    /// ladder stops immediately on success. Callers must fall back to
    /// [`ResponseNormalizer::segment`] on failure.
    pub fn extract(raw_text: &str) -> Result<Value, ExtractionError> {
        let cleaned = Self::strip_fence_markers(raw_text);

        for (index, pattern) in EXTRACTION_PATTERNS.iter().enumerate() {
            let Some(captures) = pattern.regex.captures(&cleaned) else {
                continue;
            };
            let Some(span) = captures.get(pattern.group) else {
                continue;
            };
            match serde_json::from_str::<Value>(span.as_str()) {
                Ok(value @ Value::Object(_)) => {
                    debug!(pattern = index, "extracted JSON object from model response");
                    return Ok(value);
                }
                Ok(_) => continue,
                Err(e) => {
                    debug!(pattern = index, error = %e, "extraction pattern produced invalid JSON");
                    continue;
                }
            }
        }

        Err(ExtractionError)
    }

    /// Remove surrounding markdown code-fence markers, if present.
    pub fn strip_fence_markers(text: &str) -> String {
        let trimmed = text.trim();
        if trimmed.starts_with("```") {
            trimmed.replace("```json", "").replace("```", "").trim().to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Heuristic text-segmentation fallback for responses with no
    /// extractable JSON. Always succeeds.
    ///
    /// Lines are bucketed by position: the first 30% feed the header text,
    /// up to 70% the main text, the rest the footer; within each bucket the
    /// last qualifying line wins. The result is a fully-populated
    /// specification built around that text.
    pub fn segment(raw_text: &str, hints: Option<&FrameworkHints>) -> Specification {
        let primary = hints
            .and_then(FrameworkHints::primary)
            .unwrap_or(Framework::Vanilla);
        let css = hints
            .and_then(FrameworkHints::css)
            .unwrap_or(CssFramework::Vanilla);

        let mut text_content = BTreeMap::from([
            ("header".to_string(), "Welcome to Our Site".to_string()),
            ("main".to_string(), "About Us Content".to_string()),
            ("footer".to_string(), "Copyright 2025".to_string()),
        ]);

        let lines: Vec<&str> = raw_text.lines().collect();
        let total = lines.len() as f64;
        for (i, line) in lines.iter().enumerate() {
            let line = line.trim();
            if line.len() <= 5 {
                continue;
            }
            let key = if (i as f64) < total * 0.3 {
                "header"
            } else if (i as f64) < total * 0.7 {
                "main"
            } else {
                "footer"
            };
            text_content.insert(key.to_string(), truncate_chars(line, 100));
        }

        let mut spec = Specification::scaffold(primary, css, text_content);
        if primary != Framework::Vanilla {
            spec.framework.build_tools = vec!["vite".to_string()];
        }
        spec
    }
}

/// Truncate to at most `max` characters, respecting char boundaries.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
