//! Specification completion
//!
//! The completer turns a raw, possibly partial object (as extracted from a
//! model response) into a [`Specification`] with every field populated.
//! After this stage a missing field is a type-level impossibility rather
//! than a runtime lookup-with-default scattered across every consumer.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::hints::FrameworkHints;
use crate::domain::spec::{
    self, CloningRequirements, ColorPalette, ContentStructure, CssFramework, Framework,
    FrameworkInfo, Layout, PackageManifest, Specification, Typography,
};

/// Fills every required field of a partial specification with a sensible
/// default, so downstream consumers never see missing keys.
pub struct SpecificationCompleter;

impl SpecificationCompleter {
    /// Complete a raw specification object.
    ///
    /// Fields already present are never overwritten, with one exception:
    /// framework and CSS-framework identities are replaced when absent or
    /// `unknown`, using the first detected hint (else `vanilla`).
    pub fn complete(partial: Value, hints: Option<&FrameworkHints>) -> Specification {
        let object = match partial {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let mut framework: FrameworkInfo = field(&object, "framework");
        if framework.primary == Framework::Unknown {
            framework.primary = hints
                .and_then(FrameworkHints::primary)
                .unwrap_or(Framework::Vanilla);
        }
        if framework.css == CssFramework::Unknown {
            framework.css = hints
                .and_then(FrameworkHints::css)
                .unwrap_or(CssFramework::Vanilla);
        }

        let mut content_structure: ContentStructure = field(&object, "content_structure");
        ensure_text_content(&mut content_structure.text_content);

        // text_content must be finalized before the description maps are
        // synthesized, since they quote it.
        let mut requirements: CloningRequirements = field(&object, "cloning_requirements");
        complete_requirements(&mut requirements, &content_structure.text_content);

        Specification {
            framework,
            layout: field::<Layout>(&object, "layout"),
            colors: field::<ColorPalette>(&object, "colors"),
            typography: field::<Typography>(&object, "typography"),
            components: field::<Vec<String>>(&object, "components"),
            interactive_elements: field::<BTreeMap<String, Vec<String>>>(
                &object,
                "interactive_elements",
            ),
            content_structure,
            cloning_requirements: requirements,
        }
    }
}

/// Deserialize one top-level field leniently: a missing or malformed value
/// degrades to the field's default instead of failing the whole object.
fn field<T: DeserializeOwned + Default>(object: &Map<String, Value>, key: &str) -> T {
    match object.get(key) {
        Some(value) => match serde_json::from_value(value.clone()) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(field = key, error = %e, "malformed specification field; using default");
                T::default()
            }
        },
        None => T::default(),
    }
}

/// Guarantee the three canonical text keys exist, keeping any extra entries.
fn ensure_text_content(text_content: &mut BTreeMap<String, String>) {
    let defaults = [
        ("header", "Default header text"),
        ("main", "Default main content"),
        ("footer", "Default footer text"),
    ];
    for (key, default) in defaults {
        text_content
            .entry(key.to_string())
            .or_insert_with(|| default.to_string());
    }
}

fn complete_requirements(
    requirements: &mut CloningRequirements,
    text_content: &BTreeMap<String, String>,
) {
    if requirements.package_json == PackageManifest::default() {
        requirements.package_json = PackageManifest::minimal();
    }

    if requirements.components_description.is_empty() {
        requirements.components_description = spec::default_component_descriptions(text_content);
    }
    if requirements.pages_description.is_empty() {
        requirements.pages_description = spec::default_page_descriptions(text_content);
    }
    if requirements.styles_description.is_empty() {
        requirements.styles_description = spec::default_style_descriptions();
    }

    // Every described file must appear in its file list.
    union_keys(
        &mut requirements.component_files,
        &requirements.components_description,
    );
    union_keys(&mut requirements.pages, &requirements.pages_description);
    union_keys(&mut requirements.styles, &requirements.styles_description);
}

fn union_keys(files: &mut Vec<String>, descriptions: &BTreeMap<String, String>) {
    for key in descriptions.keys() {
        if !files.contains(key) {
            files.push(key.clone());
        }
    }
}
