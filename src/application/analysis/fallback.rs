//! Rule-based fallback analysis
//!
//! Deterministic, non-model-based specification construction from raw
//! markup. This is the floor of the analysis strategy ladder: it always
//! produces a fully-completed specification, and every extraction rule is
//! independent; one failing simply leaves that field at its default.

use std::collections::BTreeMap;
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::application::analysis::normalizer::truncate_chars;
use crate::domain::hints::FrameworkHints;
use crate::domain::spec::{ColorPalette, CssFramework, Framework, Specification, Typography};

const MAX_TEXT_LEN: usize = 100;

static COLOR_DECLARATIONS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)color:\s*([#\w]+)").expect("valid color pattern"),
        Regex::new(r"(?i)background-color:\s*([#\w]+)").expect("valid color pattern"),
        Regex::new(r"(?i)border-color:\s*([#\w]+)").expect("valid color pattern"),
    ]
});

static BARE_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([0-9a-fA-F]{3,6})").expect("valid hex pattern"));

static RGB_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)").expect("valid rgb pattern")
});

static FONT_FAMILY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)font-family:\s*([^;]+)").expect("valid font pattern"));
static FONT_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)font-size:\s*(\d+(?:px|em|rem|%))").expect("valid font pattern"));
static FONT_WEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)font-weight:\s*(\d+)").expect("valid font pattern"));
static LINE_HEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)line-height:\s*([\d.]+)").expect("valid font pattern"));

/// Component categories tested against lowercased markup. Table order is the
/// order categories appear in the resulting component list.
static COMPONENT_INDICATORS: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    let table: &[(&str, &[&str])] = &[
        ("header", &["<header", "class.*header", "id.*header"]),
        ("navigation", &["<nav", "class.*nav", "navbar", "menu"]),
        ("hero", &["class.*hero", "class.*banner", "class.*jumbotron"]),
        ("main", &["<main", "class.*main", "id.*main"]),
        ("content", &["class.*content", "class.*article"]),
        ("sidebar", &["class.*sidebar", "class.*aside", "<aside"]),
        ("footer", &["<footer", "class.*footer", "id.*footer"]),
        ("card", &["class.*card", "class.*tile"]),
        ("form", &["<form", "class.*form"]),
        ("button", &["<button", "class.*btn"]),
        ("modal", &["class.*modal", "class.*popup"]),
        ("carousel", &["class.*carousel", "class.*slider"]),
        ("gallery", &["class.*gallery", "class.*grid"]),
    ];
    table
        .iter()
        .map(|(name, patterns)| {
            let compiled = patterns
                .iter()
                .map(|p| Regex::new(p).expect("valid component pattern"))
                .collect();
            (*name, compiled)
        })
        .collect()
});

/// Builds a complete specification directly from raw HTML, used when no
/// model is configured or every model path failed.
pub struct RuleBasedAnalyzer;

impl RuleBasedAnalyzer {
    /// Analyze raw HTML into a complete specification.
    pub fn analyze(html: &str, hints: Option<&FrameworkHints>) -> Specification {
        let primary = hints
            .and_then(FrameworkHints::primary)
            .unwrap_or(Framework::Vanilla);
        let css = hints
            .and_then(FrameworkHints::css)
            .unwrap_or(CssFramework::Vanilla);

        let text_content = extract_text_content(html);
        let mut spec = Specification::scaffold(primary, css, text_content);
        spec.colors = extract_colors(html);
        spec.typography = extract_typography(html);
        spec.components = detect_components(html);
        spec
    }
}

/// Pull header/main/footer text out of the markup.
///
/// For each region: the first element with the matching tag wins, else the
/// first element whose class attribute contains one of the region's
/// substrings. Empty extractions keep the built-in default.
fn extract_text_content(html: &str) -> BTreeMap<String, String> {
    let mut text_content = BTreeMap::from([
        ("header".to_string(), "Welcome to Our Site".to_string()),
        ("main".to_string(), "Main Content".to_string()),
        ("footer".to_string(), "Copyright 2025".to_string()),
    ]);

    let document = Html::parse_document(html);
    let regions: [(&str, &str, &[&str]); 3] = [
        ("header", "header", &["header"]),
        ("main", "main", &["main", "content"]),
        ("footer", "footer", &["footer"]),
    ];

    for (key, tag, class_substrings) in regions {
        match region_text(&document, tag, class_substrings) {
            Some(text) if !text.is_empty() => {
                text_content.insert(key.to_string(), text);
            }
            _ => debug!(region = key, "no text extracted; keeping default"),
        }
    }

    text_content
}

fn region_text(document: &Html, tag: &str, class_substrings: &[&str]) -> Option<String> {
    let tag_selector = Selector::parse(tag).ok()?;
    if let Some(element) = document.select(&tag_selector).next() {
        return Some(visible_text(element));
    }

    let classed = Selector::parse("[class]").ok()?;
    for element in document.select(&classed) {
        if let Some(class) = element.value().attr("class") {
            let class_lower = class.to_lowercase();
            if class_substrings.iter().any(|s| class_lower.contains(s)) {
                return Some(visible_text(element));
            }
        }
    }
    None
}

fn visible_text(element: ElementRef<'_>) -> String {
    let joined = element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(joined.trim(), MAX_TEXT_LEN)
}

/// First two distinct colors found in source order become primary and
/// secondary; the other roles keep their defaults.
fn extract_colors(html: &str) -> ColorPalette {
    let mut palette = ColorPalette::default();
    let mut seen: Vec<String> = Vec::new();
    let mut push_distinct = |color: String, seen: &mut Vec<String>| {
        if !seen.contains(&color) {
            seen.push(color);
        }
    };

    for pattern in COLOR_DECLARATIONS.iter() {
        for captures in pattern.captures_iter(html) {
            if let Some(value) = captures.get(1) {
                push_distinct(hex_prefixed(value.as_str()), &mut seen);
            }
        }
    }
    for captures in BARE_HEX.captures_iter(html) {
        if let Some(value) = captures.get(1) {
            push_distinct(format!("#{}", value.as_str()), &mut seen);
        }
    }
    for captures in RGB_CALL.captures_iter(html) {
        let channels: Option<Vec<u8>> = (1..=3)
            .map(|i| captures.get(i).and_then(|m| m.as_str().parse::<u8>().ok()))
            .collect();
        if let Some(channels) = channels {
            push_distinct(
                format!("#{:02x}{:02x}{:02x}", channels[0], channels[1], channels[2]),
                &mut seen,
            );
        }
    }

    if let Some(first) = seen.first() {
        palette.primary = first.clone();
    }
    if let Some(second) = seen.get(1) {
        palette.secondary = second.clone();
    }
    palette
}

fn hex_prefixed(value: &str) -> String {
    if value.starts_with('#') {
        value.to_string()
    } else {
        format!("#{}", value)
    }
}

/// Scan inline style declarations for typography. Any field with zero
/// matches keeps its default.
fn extract_typography(html: &str) -> Typography {
    let mut typography = Typography::default();

    if let Some(captures) = FONT_FAMILY.captures(html) {
        let family = captures[1].trim().replace(['"', '\''], "");
        if !family.is_empty() {
            typography.primary_font = family;
        }
    }

    let sizes = distinct_matches(&FONT_SIZE, html, 5);
    if !sizes.is_empty() {
        typography.font_sizes = sizes;
    }

    let mut weights: Vec<u32> = distinct_matches(&FONT_WEIGHT, html, usize::MAX)
        .iter()
        .filter_map(|w| w.parse().ok())
        .collect();
    if !weights.is_empty() {
        weights.sort_unstable();
        typography.font_weights = weights;
    }

    let heights = distinct_matches(&LINE_HEIGHT, html, 3);
    if !heights.is_empty() {
        typography.line_heights = heights;
    }

    typography
}

fn distinct_matches(pattern: &Regex, html: &str, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for captures in pattern.captures_iter(html) {
        let value = captures[1].to_string();
        if seen.insert(value.clone()) {
            values.push(value);
            if values.len() == limit {
                break;
            }
        }
    }
    values
}

/// Test markup against the component category table; the minimum viable set
/// (header, main, footer) is appended unconditionally.
fn detect_components(html: &str) -> Vec<String> {
    let html_lower = html.to_lowercase();
    let mut components: Vec<String> = COMPONENT_INDICATORS
        .iter()
        .filter(|(_, patterns)| patterns.iter().any(|p| p.is_match(&html_lower)))
        .map(|(name, _)| name.to_string())
        .collect();

    for required in ["header", "main", "footer"] {
        if !components.iter().any(|c| c == required) {
            components.push(required.to_string());
        }
    }
    components
}
