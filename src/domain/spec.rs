//! Website specification schema
//!
//! The [`Specification`] is the central value object of the service: a
//! normalized, complete description of a website's design and content that
//! drives code generation. It is produced exactly once per clone request by
//! one of the analysis paths and is never mutated afterward.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Primary JavaScript framework detected or declared for a website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
    Angular,
    Next,
    Nuxt,
    Svelte,
    Vanilla,
    /// Anything unrecognized deserializes to `Unknown` rather than failing,
    /// since the value frequently originates from free-form model output.
    #[serde(other)]
    Unknown,
}

impl Framework {
    /// Parse a user-supplied framework name, case-insensitively.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "react" => Self::React,
            "vue" | "vuejs" => Self::Vue,
            "angular" => Self::Angular,
            "next" | "nextjs" => Self::Next,
            "nuxt" | "nuxtjs" => Self::Nuxt,
            "svelte" => Self::Svelte,
            "vanilla" => Self::Vanilla,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
            Self::Angular => "angular",
            Self::Next => "next",
            Self::Nuxt => "nuxt",
            Self::Svelte => "svelte",
            Self::Vanilla => "vanilla",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CSS framework or styling approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CssFramework {
    Tailwind,
    Bootstrap,
    MaterialUi,
    Chakra,
    StyledComponents,
    CssModules,
    Vanilla,
    #[serde(other)]
    Unknown,
}

impl CssFramework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tailwind => "tailwind",
            Self::Bootstrap => "bootstrap",
            Self::MaterialUi => "material-ui",
            Self::Chakra => "chakra",
            Self::StyledComponents => "styled-components",
            Self::CssModules => "css-modules",
            Self::Vanilla => "vanilla",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CssFramework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Framework section of a specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkInfo {
    pub primary: Framework,
    pub css: CssFramework,
    pub build_tools: Vec<String>,
    pub backend_indicators: Vec<String>,
}

impl Default for FrameworkInfo {
    fn default() -> Self {
        Self {
            primary: Framework::Unknown,
            css: CssFramework::Unknown,
            build_tools: Vec::new(),
            backend_indicators: Vec::new(),
        }
    }
}

/// Layout section of a specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    #[serde(rename = "type")]
    pub layout_type: String,
    pub structure: String,
    pub breakpoints: Vec<String>,
    pub component_hierarchy: Vec<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            layout_type: "flexbox".into(),
            structure: "header-main-footer".into(),
            breakpoints: vec![
                "sm:640px".into(),
                "md:768px".into(),
                "lg:1024px".into(),
                "xl:1280px".into(),
            ],
            component_hierarchy: vec!["Header".into(), "Main".into(), "Footer".into()],
        }
    }
}

/// Semantic color palette. Values are CSS color strings, hex-prefixed where
/// the source allowed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: "#3b82f6".into(),
            secondary: "#f8fafc".into(),
            accent: "#10b981".into(),
            background: "#ffffff".into(),
            text: "#111827".into(),
        }
    }
}

/// Typography section of a specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub primary_font: String,
    pub font_sizes: Vec<String>,
    /// Numeric weights, kept sorted ascending.
    pub font_weights: Vec<u32>,
    pub line_heights: Vec<String>,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            primary_font: "system-ui".into(),
            font_sizes: vec![
                "14px".into(),
                "16px".into(),
                "18px".into(),
                "24px".into(),
                "32px".into(),
            ],
            font_weights: vec![400, 500, 600, 700],
            line_heights: vec!["1.4".into(), "1.6".into(), "1.8".into()],
        }
    }
}

/// Content section: extracted text keyed by component, plus page anatomy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentStructure {
    pub sections: Vec<String>,
    pub text_hierarchy: Vec<String>,
    pub text_content: BTreeMap<String, String>,
    pub images: Vec<String>,
    pub icons: Vec<String>,
}

/// npm-style package manifest carried through generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    pub scripts: BTreeMap<String, String>,
    pub dependencies: BTreeMap<String, String>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Minimal manifest used when a specification carries none: a static
    /// file server is the only thing a skeleton clone needs to run.
    pub fn minimal() -> Self {
        Self {
            name: "cloned-website".into(),
            version: "1.0.0".into(),
            description: Some("Cloned website".into()),
            main: None,
            scripts: BTreeMap::from([
                ("start".to_string(), "live-server".to_string()),
                ("build".to_string(), "echo 'No build step required'".to_string()),
            ]),
            dependencies: BTreeMap::new(),
            dev_dependencies: BTreeMap::from([("live-server".to_string(), "^1.2.2".to_string())]),
        }
    }
}

/// Everything the generator needs to materialize the clone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloningRequirements {
    pub npm_packages: Vec<String>,
    pub component_files: Vec<String>,
    pub components_description: BTreeMap<String, String>,
    pub pages: Vec<String>,
    pub pages_description: BTreeMap<String, String>,
    pub styles: Vec<String>,
    pub styles_description: BTreeMap<String, String>,
    /// Config file path → string content or structured object, copied
    /// verbatim into the generated project.
    pub config_files: BTreeMap<String, serde_json::Value>,
    pub assets: Vec<String>,
    pub performance_tips: Vec<String>,
    pub package_json: PackageManifest,
}

/// The normalized, complete description of a website used to drive code
/// generation. Every field is guaranteed present once the completion stage
/// has run; consumers never probe for missing keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Specification {
    pub framework: FrameworkInfo,
    pub layout: Layout,
    pub colors: ColorPalette,
    pub typography: Typography,
    pub components: Vec<String>,
    pub interactive_elements: BTreeMap<String, Vec<String>>,
    pub content_structure: ContentStructure,
    pub cloning_requirements: CloningRequirements,
}

impl Specification {
    /// Build a fully-populated baseline specification around extracted text.
    ///
    /// Both deterministic analysis paths (heuristic text segmentation and
    /// rule-based HTML analysis) start from this scaffold and then override
    /// the fields they can actually extract.
    pub fn scaffold(
        primary: Framework,
        css: CssFramework,
        text_content: BTreeMap<String, String>,
    ) -> Self {
        let components_description = default_component_descriptions(&text_content);
        let pages_description = default_page_descriptions(&text_content);

        Self {
            framework: FrameworkInfo {
                primary,
                css,
                build_tools: Vec::new(),
                backend_indicators: Vec::new(),
            },
            layout: Layout::default(),
            colors: ColorPalette::default(),
            typography: Typography::default(),
            components: vec!["header".into(), "main".into(), "footer".into()],
            interactive_elements: BTreeMap::from([
                ("navigation".to_string(), vec!["hamburger".to_string()]),
                ("buttons".to_string(), vec!["primary".to_string()]),
                ("forms".to_string(), vec!["text-input".to_string()]),
                ("animations".to_string(), vec!["fade".to_string()]),
            ]),
            content_structure: ContentStructure {
                sections: vec!["hero".into(), "main".into(), "footer".into()],
                text_hierarchy: vec!["h1".into(), "h2".into(), "p".into()],
                text_content,
                images: vec!["hero-bg".into(), "content-images".into()],
                icons: vec!["fontawesome".into()],
            },
            cloning_requirements: CloningRequirements {
                npm_packages: npm_packages_for(primary, css),
                component_files: components_description.keys().cloned().collect(),
                components_description,
                pages: pages_description.keys().cloned().collect(),
                pages_description,
                styles: vec!["style.css".into()],
                styles_description: default_style_descriptions(),
                config_files: BTreeMap::from([(
                    "package.json".to_string(),
                    serde_json::Value::Object(serde_json::Map::new()),
                )]),
                assets: vec!["images/".into(), "icons/".into(), "fonts/".into()],
                performance_tips: vec!["lazy-loading".into(), "image-optimization".into()],
                package_json: PackageManifest::minimal(),
            },
        }
    }
}

fn text_for<'a>(text_content: &'a BTreeMap<String, String>, key: &str) -> &'a str {
    text_content.get(key).map(String::as_str).unwrap_or("")
}

/// Default component descriptions quoting the live extracted text, so that
/// downstream prose reflects what was actually on the page.
pub fn default_component_descriptions(
    text_content: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "components/Header.html".to_string(),
            format!(
                "Header with text '{}', blue background, flexbox layout",
                text_for(text_content, "header")
            ),
        ),
        (
            "components/Main.html".to_string(),
            format!(
                "Main section with text '{}', centered content",
                text_for(text_content, "main")
            ),
        ),
        (
            "components/Footer.html".to_string(),
            format!(
                "Footer with text '{}', dark background",
                text_for(text_content, "footer")
            ),
        ),
    ])
}

/// Default page descriptions quoting the live extracted text.
pub fn default_page_descriptions(
    text_content: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    BTreeMap::from([(
        "index.html".to_string(),
        format!(
            "Main page with header ('{}'), main ('{}'), and footer ('{}')",
            text_for(text_content, "header"),
            text_for(text_content, "main"),
            text_for(text_content, "footer"),
        ),
    )])
}

/// Default stylesheet description.
pub fn default_style_descriptions() -> BTreeMap<String, String> {
    BTreeMap::from([(
        "style.css".to_string(),
        "Main stylesheet with layout, typography, and component styles, including text styling"
            .to_string(),
    )])
}

/// npm packages a clone of the given framework pairing needs at minimum.
pub fn npm_packages_for(framework: Framework, css: CssFramework) -> Vec<String> {
    let mut packages: Vec<String> = match framework {
        Framework::React => vec!["react".into(), "react-dom".into()],
        Framework::Next => vec!["next".into(), "react".into(), "react-dom".into()],
        Framework::Vue => vec!["vue".into()],
        Framework::Angular => vec!["@angular/core".into(), "@angular/common".into()],
        Framework::Vanilla => vec!["live-server".into()],
        _ => Vec::new(),
    };

    match css {
        CssFramework::Tailwind => {
            packages.extend(["tailwindcss".into(), "autoprefixer".into(), "postcss".into()]);
        }
        CssFramework::Bootstrap => packages.push("bootstrap".into()),
        _ => {}
    }

    if packages.is_empty() {
        packages.push("live-server".into());
    }
    packages
}
