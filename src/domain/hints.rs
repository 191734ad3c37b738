//! Framework hint detection from raw HTML
//!
//! Hints are inferred by case-insensitive substring matching against a fixed
//! indicator table, independently of any model call. They are used to fill
//! framework fields the model left absent or `unknown`.

use crate::domain::spec::{CssFramework, Framework};

/// One detectable entry: what it maps to, and the markup substrings that
/// betray its presence.
struct Indicator {
    target: HintTarget,
    needles: &'static [&'static str],
}

enum HintTarget {
    Js(Framework),
    Css(CssFramework),
    Cms(&'static str),
}

/// Table order is significance order: the first detected entry per category
/// is the one completion falls back to.
static INDICATORS: &[Indicator] = &[
    Indicator {
        target: HintTarget::Js(Framework::React),
        needles: &["react", "_react", "jsx", "data-reactroot", "__react_devtools"],
    },
    Indicator {
        target: HintTarget::Js(Framework::Vue),
        needles: &["vue", "_vue", "v-", "@click", "data-v-"],
    },
    Indicator {
        target: HintTarget::Js(Framework::Angular),
        needles: &["ng-", "[ng", "angular", "_angular"],
    },
    Indicator {
        target: HintTarget::Js(Framework::Next),
        needles: &["_next", "__next", "next.js"],
    },
    Indicator {
        target: HintTarget::Js(Framework::Nuxt),
        needles: &["_nuxt", "__nuxt", "nuxt.js"],
    },
    Indicator {
        target: HintTarget::Js(Framework::Svelte),
        needles: &["svelte", "_svelte"],
    },
    Indicator {
        target: HintTarget::Css(CssFramework::Bootstrap),
        needles: &["bootstrap", "btn-", "col-", "container-fluid"],
    },
    Indicator {
        target: HintTarget::Css(CssFramework::Tailwind),
        needles: &["tailwind", "tw-", "text-", "bg-", "flex", "grid"],
    },
    Indicator {
        target: HintTarget::Css(CssFramework::MaterialUi),
        needles: &["mui", "material-ui", "makestyles"],
    },
    Indicator {
        target: HintTarget::Css(CssFramework::Chakra),
        needles: &["chakra-ui", "css-"],
    },
    Indicator {
        target: HintTarget::Cms("wordpress"),
        needles: &["wp-content", "wordpress", "wp-"],
    },
    Indicator {
        target: HintTarget::Cms("shopify"),
        needles: &["shopify", "liquid", "theme_id"],
    },
];

/// Framework and CSS-framework names inferred from raw HTML keyword matching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameworkHints {
    pub frameworks: Vec<Framework>,
    pub css_frameworks: Vec<CssFramework>,
    pub cms: Vec<String>,
}

impl FrameworkHints {
    /// Scan raw HTML for framework indicators.
    pub fn detect(html: &str) -> Self {
        let html_lower = html.to_lowercase();
        let mut hints = Self::default();

        for indicator in INDICATORS {
            if indicator.needles.iter().any(|n| html_lower.contains(n)) {
                match indicator.target {
                    HintTarget::Js(framework) => hints.frameworks.push(framework),
                    HintTarget::Css(css) => hints.css_frameworks.push(css),
                    HintTarget::Cms(name) => hints.cms.push(name.to_string()),
                }
            }
        }

        hints
    }

    /// First detected JS framework, if any.
    pub fn primary(&self) -> Option<Framework> {
        self.frameworks.first().copied()
    }

    /// First detected CSS framework, if any.
    pub fn css(&self) -> Option<CssFramework> {
        self.css_frameworks.first().copied()
    }
}
