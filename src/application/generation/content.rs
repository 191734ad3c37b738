//! File content rendering
//!
//! Two tiers: best-effort generative content when a model is configured, and
//! a deterministic stub floor keyed by file extension. The floor guarantees
//! the generator never stalls or emits an empty file regardless of model
//! availability.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::project::FileKind;
use crate::domain::spec::Framework;
use crate::infrastructure::llm::GenerativeCapability;
use crate::infrastructure::prompts::PromptBuilder;

/// Renders one file's content from its description.
pub struct FileContentGenerator {
    llm: Arc<dyn GenerativeCapability>,
}

impl FileContentGenerator {
    pub fn new(llm: Arc<dyn GenerativeCapability>) -> Self {
        Self { llm }
    }

    /// Render content for `path`. Never fails and never returns an empty
    /// string.
    pub async fn render(
        &self,
        path: &str,
        description: &str,
        framework: Framework,
        kind: FileKind,
    ) -> String {
        if description.trim().is_empty() {
            return format!("// No description provided for {path}");
        }

        if self.llm.is_configured() {
            let prompt = PromptBuilder::file_content(path, description, framework, kind);
            match self.llm.generate(&prompt, None).await {
                Ok(code) if !code.trim().is_empty() => {
                    debug!(path, kind = %kind, "rendered file via model");
                    return strip_code_fences(&code);
                }
                Ok(_) => warn!(path, "model returned empty content; using stub"),
                Err(e) => warn!(path, error = %e, "model rendering failed; using stub"),
            }
        }

        stub(path, description, framework)
    }
}

/// Deterministic placeholder content keyed by file extension.
fn stub(path: &str, description: &str, framework: Framework) -> String {
    match extension(path) {
        "js" | "jsx" | "ts" | "tsx" => {
            let name = component_name(path);
            format!(
                "// {path} for {framework}\n// {description}\nexport default function {name}() {{\n  return (<div>{description}</div>);\n}}"
            )
        }
        "css" | "scss" | "less" => format!("/* {path} for {framework}\n{description}\n*/"),
        "json" => description.to_string(),
        _ => format!("# {path} for {framework}\n# {description}"),
    }
}

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
}

/// Derive a valid identifier from the file stem, capitalized.
fn component_name(path: &str) -> String {
    let stem = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Component");

    let cleaned: String = stem.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    let mut chars = cleaned.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => "Component".to_string(),
    }
}

/// Strip a surrounding markdown code fence, keeping fenced content intact.
pub(crate) fn strip_code_fences(code: &str) -> String {
    let trimmed = code.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let without_open = match trimmed.find('\n') {
        Some(pos) => &trimmed[pos + 1..],
        None => return String::new(),
    };
    without_open
        .trim_end()
        .trim_end_matches("```")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::DisabledGenerative;

    fn generator() -> FileContentGenerator {
        FileContentGenerator::new(Arc::new(DisabledGenerative))
    }

    #[tokio::test]
    async fn test_empty_description_placeholder() {
        let content = generator()
            .render("src/App.jsx", "", Framework::React, FileKind::Component)
            .await;
        assert_eq!(content, "// No description provided for src/App.jsx");
    }

    #[tokio::test]
    async fn test_script_stub_embeds_description() {
        let content = generator()
            .render(
                "components/Header.jsx",
                "Header with logo",
                Framework::React,
                FileKind::Component,
            )
            .await;
        assert!(content.contains("export default function Header()"));
        assert!(content.contains("<div>Header with logo</div>"));
    }

    #[tokio::test]
    async fn test_style_stub_is_comment_only() {
        let content = generator()
            .render("style.css", "Global styles", Framework::Vanilla, FileKind::Style)
            .await;
        assert!(content.starts_with("/*"));
        assert!(content.ends_with("*/"));
        assert!(content.contains("Global styles"));
    }

    #[tokio::test]
    async fn test_json_stub_is_raw_description() {
        let content = generator()
            .render("data.json", "{\"a\": 1}", Framework::Vanilla, FileKind::Page)
            .await;
        assert_eq!(content, "{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_other_extension_gets_line_comment() {
        let content = generator()
            .render("index.html", "Landing page", Framework::Vanilla, FileKind::Page)
            .await;
        assert!(content.starts_with("# index.html for vanilla"));
    }

    #[test]
    fn test_component_name_sanitized() {
        assert_eq!(component_name("components/nav-bar.jsx"), "Navbar");
        assert_eq!(component_name("src/App.jsx"), "App");
        assert_eq!(component_name("_app.js"), "App");
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(
            strip_code_fences("```jsx\nconst x = 1;\n```"),
            "const x = 1;"
        );
        assert_eq!(strip_code_fences("plain code"), "plain code");
        assert_eq!(
            strip_code_fences("```\nline1\nline2\n```"),
            "line1\nline2"
        );
    }
}
