//! Per-framework boilerplate tables
//!
//! One table per concern (entry-point completeness rules, default
//! manifests, commands, deployment descriptors), keyed by framework, with a
//! single dispatch point each. The string literals are volume, not design.

use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::domain::spec::{Framework, PackageManifest};

/// One completeness rule: if no accumulated file path ends (case-
/// insensitively) with any of `suffixes`, `path` is injected with `content`.
pub struct EntryPointRule {
    pub suffixes: &'static [&'static str],
    pub path: &'static str,
    pub content: &'static str,
}

const REACT_RULES: &[EntryPointRule] = &[
    EntryPointRule {
        suffixes: &["index.js", "index.jsx"],
        path: "src/index.jsx",
        content: "import React from 'react';\nimport ReactDOM from 'react-dom/client';\nimport App from './App';\nimport './index.css';\n\nReactDOM.createRoot(document.getElementById('root')).render(<App />);",
    },
    EntryPointRule {
        suffixes: &["app.js", "app.jsx"],
        path: "src/App.jsx",
        content: "export default function App() {\n  return <div>Hello from App!</div>;\n}",
    },
    EntryPointRule {
        suffixes: &["index.html"],
        path: "public/index.html",
        content: "<!DOCTYPE html>\n<html lang='en'>\n  <head>\n    <meta charset='UTF-8' />\n    <meta name='viewport' content='width=device-width, initial-scale=1.0' />\n    <title>Cloned React App</title>\n  </head>\n  <body>\n    <div id='root'></div>\n  </body>\n</html>",
    },
];

const NEXT_RULES: &[EntryPointRule] = &[
    EntryPointRule {
        suffixes: &["_app.js", "_app.jsx"],
        path: "pages/_app.js",
        content: "export default function MyApp({ Component, pageProps }) {\n  return <Component {...pageProps} />;\n}",
    },
    EntryPointRule {
        suffixes: &["index.js", "index.jsx"],
        path: "pages/index.js",
        content: "export default function Home() {\n  return <div>Hello from Next.js Home!</div>;\n}",
    },
];

const VUE_RULES: &[EntryPointRule] = &[
    EntryPointRule {
        suffixes: &["main.js"],
        path: "src/main.js",
        content: "import { createApp } from 'vue';\nimport App from './App.vue';\ncreateApp(App).mount('#app');",
    },
    EntryPointRule {
        suffixes: &["app.vue"],
        path: "src/App.vue",
        content: "<template>\n  <div>Hello from Vue App!</div>\n</template>\n<script>\nexport default { name: 'App' }\n</script>",
    },
    EntryPointRule {
        suffixes: &["index.html"],
        path: "public/index.html",
        content: "<!DOCTYPE html>\n<html lang='en'>\n  <head>\n    <meta charset='UTF-8' />\n    <meta name='viewport' content='width=device-width, initial-scale=1.0' />\n    <title>Cloned Vue App</title>\n  </head>\n  <body>\n    <div id='app'></div>\n  </body>\n</html>",
    },
];

const VANILLA_RULES: &[EntryPointRule] = &[
    EntryPointRule {
        suffixes: &["index.html"],
        path: "index.html",
        content: "<!DOCTYPE html>\n<html lang='en'>\n  <head>\n    <meta charset='UTF-8' />\n    <meta name='viewport' content='width=device-width, initial-scale=1.0' />\n    <title>Cloned Vanilla App</title>\n  </head>\n  <body>\n    <h1>Hello from Vanilla JS!</h1>\n    <script src='main.js'></script>\n  </body>\n</html>",
    },
    EntryPointRule {
        suffixes: &["main.js"],
        path: "main.js",
        content: "console.log('Hello from Vanilla JS!');",
    },
];

/// Completeness rules for a framework. Frameworks without rules rely
/// entirely on the specification's file lists.
pub fn entry_point_rules(framework: Framework) -> &'static [EntryPointRule] {
    match framework {
        Framework::React => REACT_RULES,
        Framework::Next => NEXT_RULES,
        Framework::Vue => VUE_RULES,
        Framework::Vanilla => VANILLA_RULES,
        _ => &[],
    }
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Default manifest for a framework. Always has at least one dependency so a
/// skeleton project passes completeness validation.
pub fn default_manifest(framework: Framework) -> PackageManifest {
    let mut manifest = PackageManifest {
        name: "generated-website".into(),
        version: "1.0.0".into(),
        description: Some("Generated website clone".into()),
        main: Some("index.js".into()),
        ..PackageManifest::default()
    };

    match framework {
        Framework::React => {
            manifest.scripts = string_map(&[
                ("start", "react-scripts start"),
                ("build", "react-scripts build"),
                ("test", "react-scripts test"),
            ]);
            manifest.dependencies = string_map(&[
                ("react", "^18.2.0"),
                ("react-dom", "^18.2.0"),
                ("react-router-dom", "^6.8.0"),
                ("react-scripts", "5.0.1"),
            ]);
            manifest.dev_dependencies = string_map(&[
                ("tailwindcss", "^3.2.0"),
                ("autoprefixer", "^10.4.0"),
                ("postcss", "^8.4.0"),
            ]);
        }
        Framework::Next => {
            manifest.scripts = string_map(&[
                ("dev", "next dev"),
                ("build", "next build"),
                ("start", "next start"),
                ("lint", "next lint"),
            ]);
            manifest.dependencies = string_map(&[
                ("next", "^13.1.0"),
                ("react", "^18.2.0"),
                ("react-dom", "^18.2.0"),
            ]);
            manifest.dev_dependencies = string_map(&[
                ("tailwindcss", "^3.2.0"),
                ("autoprefixer", "^10.4.0"),
                ("postcss", "^8.4.0"),
                ("eslint", "^8.0.0"),
                ("eslint-config-next", "^13.1.0"),
            ]);
        }
        Framework::Vue => {
            manifest.scripts = string_map(&[
                ("serve", "vue-cli-service serve"),
                ("build", "vue-cli-service build"),
                ("lint", "vue-cli-service lint"),
            ]);
            manifest.dependencies =
                string_map(&[("vue", "^3.2.0"), ("vue-router", "^4.1.0")]);
            manifest.dev_dependencies = string_map(&[
                ("@vue/cli-service", "^5.0.0"),
                ("tailwindcss", "^3.2.0"),
                ("autoprefixer", "^10.4.0"),
                ("postcss", "^8.4.0"),
            ]);
        }
        Framework::Angular => {
            manifest.scripts = string_map(&[
                ("ng", "ng"),
                ("start", "ng serve"),
                ("build", "ng build"),
                ("test", "ng test"),
            ]);
            manifest.dependencies = string_map(&[
                ("@angular/core", "^15.0.0"),
                ("@angular/common", "^15.0.0"),
                ("@angular/platform-browser", "^15.0.0"),
                ("@angular/router", "^15.0.0"),
            ]);
            manifest.dev_dependencies = string_map(&[
                ("@angular/cli", "^15.0.0"),
                ("@angular/compiler-cli", "^15.0.0"),
                ("typescript", "^4.8.0"),
            ]);
        }
        // vanilla and anything exotic get a static file server
        _ => {
            manifest.scripts = string_map(&[("start", "serve .")]);
            manifest.dependencies = string_map(&[("serve", "^14.2.0")]);
        }
    }

    manifest
}

const GITIGNORE_BASE: &str = "# Dependencies
node_modules/
npm-debug.log*
yarn-debug.log*
yarn-error.log*

# Production builds
/build
/dist
/.next
/out

# Environment variables
.env
.env.local
.env.development.local
.env.test.local
.env.production.local

# IDE and editor files
.vscode/
.idea/
*.swp
*.swo

# OS generated files
.DS_Store
Thumbs.db

# Logs
logs
*.log

# Coverage
coverage/

# Temporary folders
tmp/
temp/";

/// `.gitignore` content, with framework-specific additions.
pub fn gitignore(framework: Framework) -> String {
    let mut content = GITIGNORE_BASE.to_string();
    if framework == Framework::Angular {
        content.push_str("\n\n# Angular specific\n/e2e\n/coverage\n/.nyc_output");
    }
    content
}

/// README content with the framework's dev command filled in.
pub fn readme(framework: Framework) -> String {
    let dev_command = match framework {
        Framework::Next => "npm run dev",
        Framework::Vue => "npm run serve",
        _ => "npm start",
    };

    format!(
        "# Generated Website Clone

This project was generated by reweave from a live website.

## Framework

- **{framework}**

## Getting Started

1. Install dependencies:

```bash
npm install
```

2. Start the development server:

```bash
{dev_command}
```

3. Open your browser to `http://localhost:3000`

## Building for Production

```bash
npm run build
```

## Project Structure

```
src/
├── components/     # Reusable components
├── pages/          # Page components
└── styles/         # CSS styles
```
"
    )
}

/// Build and dev commands per framework.
pub fn commands(framework: Framework) -> (Vec<String>, Vec<String>) {
    let (build, dev) = match framework {
        Framework::React => ("npm run build", "npm start"),
        Framework::Next => ("npm run build", "npm run dev"),
        Framework::Vue => ("npm run build", "npm run serve"),
        Framework::Angular => ("ng build --prod", "ng serve"),
        _ => (
            "# No build step required",
            "# Serve files using a local server like http-server",
        ),
    };
    (vec![build.to_string()], vec![dev.to_string()])
}

/// Deployment descriptors (vercel + netlify) per framework.
pub fn deployment_config(framework: Framework) -> Value {
    let (vercel_builds, netlify_publish) = match framework {
        Framework::React => (
            json!([{"src": "package.json", "use": "@vercel/static-build"}]),
            "build",
        ),
        Framework::Next => (
            json!([{"src": "next.config.js", "use": "@vercel/next"}]),
            ".next",
        ),
        Framework::Vue => (
            json!([{"src": "package.json", "use": "@vercel/static-build"}]),
            "dist",
        ),
        _ => (json!([]), ""),
    };

    json!({
        "vercel": {
            "name": "generated-website",
            "version": 2,
            "builds": vercel_builds,
        },
        "netlify": {
            "build": {
                "command": "npm run build",
                "publish": netlify_publish,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_default_manifest_has_dependencies() {
        for framework in [
            Framework::React,
            Framework::Next,
            Framework::Vue,
            Framework::Angular,
            Framework::Vanilla,
            Framework::Svelte,
        ] {
            let manifest = default_manifest(framework);
            assert!(
                !manifest.dependencies.is_empty(),
                "{framework} manifest must have dependencies"
            );
            assert!(!manifest.scripts.is_empty());
        }
    }

    #[test]
    fn test_entry_point_rules_cover_known_frameworks() {
        assert_eq!(entry_point_rules(Framework::React).len(), 3);
        assert_eq!(entry_point_rules(Framework::Next).len(), 2);
        assert_eq!(entry_point_rules(Framework::Vue).len(), 3);
        assert_eq!(entry_point_rules(Framework::Vanilla).len(), 2);
        assert!(entry_point_rules(Framework::Angular).is_empty());
    }

    #[test]
    fn test_gitignore_angular_extras() {
        assert!(gitignore(Framework::Angular).contains("/.nyc_output"));
        assert!(!gitignore(Framework::React).contains("/.nyc_output"));
        assert!(gitignore(Framework::React).contains("node_modules/"));
    }

    #[test]
    fn test_readme_dev_command_varies() {
        assert!(readme(Framework::Next).contains("npm run dev"));
        assert!(readme(Framework::Vue).contains("npm run serve"));
        assert!(readme(Framework::Vanilla).contains("npm start"));
    }

    #[test]
    fn test_deployment_config_shape() {
        let config = deployment_config(Framework::Next);
        assert_eq!(config["netlify"]["build"]["publish"], ".next");
        assert_eq!(config["vercel"]["builds"][0]["use"], "@vercel/next");
    }
}
