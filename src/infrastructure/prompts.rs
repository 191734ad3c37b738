//! Prompt templates for the generative model
//!
//! Templates use `{placeholder}` markers filled by [`PromptBuilder`].

use crate::domain::hints::FrameworkHints;
use crate::domain::project::FileKind;
use crate::domain::spec::Framework;

/// HTML excerpt sizes keep prompts inside model context limits.
const VISION_HTML_EXCERPT: usize = 3000;
const TEXT_HTML_EXCERPT: usize = 5000;

pub const VISION_ANALYSIS_PROMPT: &str = r##"Analyze the provided website screenshot and HTML content to generate a detailed specification for cloning the website. Extract ALL VISIBLE TEXT from the screenshot and map it to specific components (e.g., header, main, footer). Combine this with design elements (layout, colors, typography) from both the screenshot and HTML to produce a comprehensive cloning specification.

FRAMEWORK DETECTION HINTS:
- JS Frameworks: {frameworks}
- CSS Frameworks: {css_frameworks}
- CMS: {cms}

HTML CONTENT (excerpt):
{html}

INSTRUCTIONS:
1. Extract all text visible in the screenshot, including headings, paragraphs, buttons, navigation items, and footer text.
2. Map extracted text to components (e.g., "Header: Welcome to Our Site", "Main: About Us").
3. Identify design elements: framework, CSS framework, colors (hex codes), typography (font-family, sizes, weights), layout (grid/flexbox), and components (header, navigation, etc.).
4. Provide detailed descriptions in `components_description`, `pages_description`, and `styles_description`, including exact text content for each component.
5. Ensure `content_structure.text_content` includes a dictionary mapping components to their text content.
6. Return a valid JSON object with the structure below, ensuring all fields are populated with accurate data.

OUTPUT FORMAT:
{
    "framework": {
        "primary": "react|vue|angular|next|nuxt|svelte|vanilla|unknown",
        "css": "tailwind|bootstrap|material-ui|chakra|styled-components|css-modules|vanilla|unknown",
        "build_tools": ["vite", "webpack", "parcel"],
        "backend_indicators": ["api", "graphql", "rest"]
    },
    "layout": {
        "type": "grid|flexbox|float|modern",
        "structure": "header-main-footer|sidebar-main|full-width|dashboard",
        "breakpoints": ["sm:640px", "md:768px", "lg:1024px", "xl:1280px"],
        "component_hierarchy": ["Header", "Navigation", "Main", "Footer"]
    },
    "colors": {
        "primary": "#hexcode",
        "secondary": "#hexcode",
        "accent": "#hexcode",
        "background": "#hexcode",
        "text": "#hexcode"
    },
    "typography": {
        "primary_font": "font-family-name",
        "font_sizes": ["12px", "14px", "16px", "18px", "24px"],
        "font_weights": [300, 400, 500, 600, 700],
        "line_heights": ["1.2", "1.4", "1.6"]
    },
    "components": ["header", "navigation", "hero", "cards", "forms", "footer"],
    "interactive_elements": {
        "navigation": ["dropdown", "hamburger", "tabs"],
        "buttons": ["primary", "secondary", "outline"],
        "forms": ["text-input", "select", "checkbox"],
        "animations": ["fade", "slide", "scale"]
    },
    "content_structure": {
        "sections": ["hero", "features", "testimonials", "cta", "footer"],
        "text_hierarchy": ["h1", "h2", "h3", "p"],
        "text_content": {"header": "Extracted text", "main": "Extracted text", "footer": "Extracted text"},
        "images": ["hero-bg", "thumbnails", "icons"],
        "icons": ["fontawesome", "heroicons", "custom"]
    },
    "cloning_requirements": {
        "npm_packages": ["react", "react-dom", "next", "tailwindcss"],
        "component_files": ["components/Header.html", "components/Main.html"],
        "components_description": {
            "components/Header.html": "Header with text 'Welcome to Our Site', blue background, flexbox layout"
        },
        "pages": ["index.html"],
        "pages_description": {
            "index.html": "Main page with header ('Welcome'), main ('About'), and footer ('Copyright')"
        },
        "styles": ["style.css"],
        "styles_description": {
            "style.css": "Styles for layout, typography, and colors, including text styling"
        },
        "config_files": {"package.json": {}},
        "assets": ["images/", "icons/"],
        "performance_tips": ["lazy-loading", "code-splitting"],
        "package_json": {
            "name": "cloned-website",
            "version": "1.0.0",
            "scripts": {"start": "live-server"},
            "dependencies": {},
            "devDependencies": {"live-server": "^1.2.2"}
        }
    }
}

CONSTRAINTS:
- Return ONLY valid JSON without markdown or extra text.
- Ensure text_content includes all extracted text, mapped to components.
- Use reasonable defaults for missing information (e.g., "unknown" for framework).
- Include exact hex codes for colors and precise typography details.
"##;

pub const TEXT_ANALYSIS_PROMPT: &str = r#"Analyze this HTML content to generate a website cloning specification. Extract all text content from the HTML and map it to components (e.g., header, main, footer). Infer design elements from HTML structure, class names, and inline styles.

FRAMEWORK HINTS: JS {frameworks}; CSS {css_frameworks}; CMS {cms}
HTML CONTENT: {html}

Return a JSON object with the same structure as the vision analysis, including:
- `content_structure.text_content` with extracted text mapped to components.
- Detailed `components_description` and `pages_description` with exact text content.
Ensure all fields are populated with reasonable defaults if specific information is missing.
"#;

pub const FILE_CONTENT_PROMPT: &str = r#"You are an expert senior front-end engineer. For every component, page, and stylesheet you generate, make it beautiful and production-worthy, not cookie-cutter.

By default, use JSX syntax with Tailwind CSS utility classes, React hooks, and lucide-react for icons. Do not install other packages for UI themes or icons unless absolutely necessary.

Use stock photos from Unsplash where appropriate: only link to valid URLs you know exist, never download them. Use 2 spaces for code indentation.

Generate a {framework} {kind} named {path} with the following description:
{description}

Return only the code, no explanations or comments outside the code. The code should be ready for production use, clean, and idiomatic. If generating a React component, export it as default. If generating a CSS file, include all necessary styles for the described component/page.
"#;

/// Fills prompt templates from request data.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn vision_analysis(html: &str, hints: &FrameworkHints) -> String {
        fill_analysis(VISION_ANALYSIS_PROMPT, html, VISION_HTML_EXCERPT, hints)
    }

    pub fn text_analysis(html: &str, hints: &FrameworkHints) -> String {
        fill_analysis(TEXT_ANALYSIS_PROMPT, html, TEXT_HTML_EXCERPT, hints)
    }

    pub fn file_content(
        path: &str,
        description: &str,
        framework: Framework,
        kind: FileKind,
    ) -> String {
        FILE_CONTENT_PROMPT
            .replace("{framework}", framework.as_str())
            .replace("{kind}", &kind.to_string())
            .replace("{path}", path)
            .replace("{description}", description)
    }
}

fn fill_analysis(template: &str, html: &str, excerpt: usize, hints: &FrameworkHints) -> String {
    let html_excerpt: String = html.chars().take(excerpt).collect();
    template
        .replace("{frameworks}", &join_display(&hints.frameworks))
        .replace("{css_frameworks}", &join_display(&hints.css_frameworks))
        .replace("{cms}", &hints.cms.join(", "))
        .replace("{html}", &html_excerpt)
}

fn join_display<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
