//! Project generation
//!
//! Maps a completed specification plus a target framework onto an ordered
//! file-path → content mapping, then persists it under a fresh timestamped
//! directory. Per-framework completeness fallbacks patch only the gaps, so
//! partially-populated specifications keep their real content.

pub mod content;
pub mod scaffold;

pub use content::FileContentGenerator;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use futures::StreamExt;
use futures::stream;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::GenerationConfig;
use crate::domain::project::{ConfigFiles, FileKind, GeneratedProject, ProjectFiles};
use crate::domain::spec::{Framework, Specification};
use crate::infrastructure::llm::GenerativeCapability;

/// Project generation error. Only persistence can fail; building the
/// in-memory project is total.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Failed to write project: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Generates and persists a project from a completed specification.
pub struct ProjectGenerator {
    content: FileContentGenerator,
    output_root: PathBuf,
    max_concurrent_renders: usize,
}

impl ProjectGenerator {
    pub fn new(llm: Arc<dyn GenerativeCapability>, config: &GenerationConfig) -> Self {
        Self {
            content: FileContentGenerator::new(llm),
            output_root: config.output_dir.clone(),
            max_concurrent_renders: config.max_concurrent_renders.max(1),
        }
    }

    /// Resolve the target framework: explicit override first, then the
    /// specification's declared framework, with react as the final default.
    pub fn resolve_framework(spec: &Specification, framework_override: Option<&str>) -> Framework {
        let resolved = match framework_override {
            Some(name) if !name.trim().is_empty() => Framework::parse(name),
            _ => spec.framework.primary,
        };
        match resolved {
            Framework::Unknown => Framework::React,
            other => other,
        }
    }

    /// Build the complete project in memory.
    pub async fn generate(
        &self,
        spec: &Specification,
        framework_override: Option<&str>,
    ) -> GeneratedProject {
        let framework = Self::resolve_framework(spec, framework_override);
        info!(%framework, "starting project generation");

        let requirements = &spec.cloning_requirements;
        let mut project_structure = ProjectFiles::new();

        // 1. Render described files, bounded concurrency, order preserved.
        let jobs: Vec<(String, String, FileKind)> = file_jobs(spec);
        let rendered: Vec<(String, String)> = stream::iter(jobs)
            .map(|(path, description, kind)| async move {
                let content = self.content.render(&path, &description, framework, kind).await;
                (path, content)
            })
            .buffered(self.max_concurrent_renders)
            .collect()
            .await;
        for (path, content) in rendered {
            project_structure.insert(path, content);
        }

        // 2. Config files copied verbatim.
        let mut config_files = ConfigFiles::new();
        for (path, value) in &requirements.config_files {
            config_files.insert(path.clone(), value.clone());
        }

        // 3. Per-framework completeness fallback, per missing pattern.
        for rule in scaffold::entry_point_rules(framework) {
            let satisfied = project_structure.keys().any(|path| {
                let lower = path.to_lowercase();
                rule.suffixes.iter().any(|suffix| lower.ends_with(suffix))
            });
            if !satisfied {
                info!(path = rule.path, "injecting missing entry point");
                project_structure.insert(rule.path, rule.content.to_string());
            }
        }

        // 4. Manifest: the specification's own when it declares dependencies,
        // else the framework default (which always has some).
        let package_json = if requirements.package_json.dependencies.is_empty() {
            scaffold::default_manifest(framework)
        } else {
            requirements.package_json.clone()
        };

        // 5. Unconditional boilerplate.
        if !project_structure.contains_key(".gitignore") && !config_files.contains_key(".gitignore")
        {
            config_files.insert(".gitignore", Value::String(scaffold::gitignore(framework)));
        }
        if !project_structure.contains_key("README.md") && !config_files.contains_key("README.md") {
            config_files.insert("README.md", Value::String(scaffold::readme(framework)));
        }
        if !project_structure.contains_key("package.json")
            && !config_files.contains_key("package.json")
        {
            let manifest_value =
                serde_json::to_value(&package_json).unwrap_or_else(|_| Value::Object(Default::default()));
            config_files.insert("package.json", manifest_value);
        }

        let (build_commands, dev_commands) = scaffold::commands(framework);

        info!(
            files = project_structure.len(),
            config_files = config_files.len(),
            "project generation complete"
        );

        GeneratedProject {
            framework,
            project_structure,
            package_json,
            config_files,
            assets: requirements.assets.clone(),
            build_commands,
            dev_commands,
            deployment_config: scaffold::deployment_config(framework),
        }
    }

    /// Persist every file under `{output_root}/{framework}_{unix_ts}/project/`.
    ///
    /// Returns the project directory. Unique per request under normal clock
    /// granularity; same-second collisions overwrite file-by-file.
    pub async fn persist(&self, project: &GeneratedProject) -> Result<PathBuf, GenerationError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let project_dir = self
            .output_root
            .join(format!("{}_{}", project.framework, timestamp))
            .join("project");
        tokio::fs::create_dir_all(&project_dir).await?;

        for (path, content) in project.project_structure.iter() {
            write_entry(&project_dir, path, content).await?;
        }

        for (path, value) in project.config_files.iter() {
            let content = match value {
                Value::String(s) => s.clone(),
                other => serde_json::to_string_pretty(other)?,
            };
            write_entry(&project_dir, path, &content).await?;
        }

        // Written last: the resolved manifest is authoritative even when a
        // config entry of the same name was carried in the specification.
        let manifest = serde_json::to_string_pretty(&project.package_json)?;
        tokio::fs::write(project_dir.join("package.json"), manifest).await?;

        info!(path = %project_dir.display(), "project saved");
        Ok(project_dir)
    }
}

/// Ordered render jobs: components, then pages, then styles.
fn file_jobs(spec: &Specification) -> Vec<(String, String, FileKind)> {
    let requirements = &spec.cloning_requirements;
    let mut jobs = Vec::new();

    let sets = [
        (
            &requirements.component_files,
            &requirements.components_description,
            FileKind::Component,
        ),
        (&requirements.pages, &requirements.pages_description, FileKind::Page),
        (&requirements.styles, &requirements.styles_description, FileKind::Style),
    ];
    for (files, descriptions, kind) in sets {
        for path in files {
            let description = descriptions.get(path).cloned().unwrap_or_default();
            jobs.push((path.clone(), description, kind));
        }
    }
    jobs
}

/// Write one project entry, creating parents and refusing paths that would
/// escape the project directory.
async fn write_entry(root: &Path, relative: &str, content: &str) -> Result<(), GenerationError> {
    let candidate = Path::new(relative);
    if candidate.is_absolute()
        || candidate
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        warn!(path = relative, "skipping entry that escapes the project directory");
        return Ok(());
    }

    let absolute = root.join(candidate);
    if let Some(parent) = absolute.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(absolute, content).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::spec::CssFramework;
    use crate::infrastructure::llm::DisabledGenerative;
    use std::collections::BTreeMap;

    fn generator(dir: &Path) -> ProjectGenerator {
        ProjectGenerator::new(
            Arc::new(DisabledGenerative),
            &GenerationConfig {
                output_dir: dir.to_path_buf(),
                max_concurrent_renders: 4,
            },
        )
    }

    #[test]
    fn test_framework_resolution() {
        let mut spec = Specification::default();
        assert_eq!(
            ProjectGenerator::resolve_framework(&spec, Some("vue")),
            Framework::Vue
        );
        assert_eq!(
            ProjectGenerator::resolve_framework(&spec, Some("")),
            Framework::React
        );
        assert_eq!(
            ProjectGenerator::resolve_framework(&spec, None),
            Framework::React
        );

        spec.framework.primary = Framework::Svelte;
        assert_eq!(
            ProjectGenerator::resolve_framework(&spec, None),
            Framework::Svelte
        );
        // override beats the declared framework
        assert_eq!(
            ProjectGenerator::resolve_framework(&spec, Some("vanilla")),
            Framework::Vanilla
        );
        // unparseable override falls back to react
        assert_eq!(
            ProjectGenerator::resolve_framework(&spec, Some("cobol")),
            Framework::React
        );
    }

    #[tokio::test]
    async fn test_vanilla_floor_from_empty_specification() {
        let dir = tempfile::tempdir().unwrap();
        let project = generator(dir.path())
            .generate(&Specification::default(), Some("vanilla"))
            .await;

        assert!(project.project_structure.contains_key("index.html"));
        assert!(project.project_structure.contains_key("main.js"));
        assert!(project.has_file(".gitignore"));
        assert!(project.has_file("README.md"));
        assert!(project.has_file("package.json"));
        assert!(!project.package_json.dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_unconditional_files_for_every_framework() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["react", "next", "vue", "angular", "vanilla", "svelte"] {
            let project = generator(dir.path())
                .generate(&Specification::default(), Some(name))
                .await;
            assert!(project.has_file(".gitignore"), "{name}");
            assert!(project.has_file("README.md"), "{name}");
            assert!(project.has_file("package.json"), "{name}");
        }
    }

    #[tokio::test]
    async fn test_fallback_patches_only_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let mut spec = Specification::default();
        spec.cloning_requirements.pages = vec!["src/index.jsx".to_string()];
        spec.cloning_requirements.pages_description = BTreeMap::from([(
            "src/index.jsx".to_string(),
            "Entry point rendering the app".to_string(),
        )]);

        let project = generator(dir.path()).generate(&spec, Some("react")).await;

        // the described index survives; only app + html are injected
        let content = project.project_structure.get("src/index.jsx").unwrap();
        assert!(content.contains("Entry point rendering the app"));
        assert!(project.project_structure.contains_key("src/App.jsx"));
        assert!(project.project_structure.contains_key("public/index.html"));
    }

    #[tokio::test]
    async fn test_specification_manifest_with_dependencies_survives() {
        let dir = tempfile::tempdir().unwrap();
        let mut spec = Specification::default();
        spec.cloning_requirements.package_json.name = "my-site".into();
        spec.cloning_requirements
            .package_json
            .dependencies
            .insert("preact".into(), "^10.0.0".into());

        let project = generator(dir.path()).generate(&spec, Some("vanilla")).await;
        assert_eq!(project.package_json.name, "my-site");
        assert!(project.package_json.dependencies.contains_key("preact"));
    }

    #[tokio::test]
    async fn test_config_files_copied_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let mut spec = Specification::default();
        spec.cloning_requirements.config_files.insert(
            "vercel.json".to_string(),
            serde_json::json!({"version": 2}),
        );

        let project = generator(dir.path()).generate(&spec, Some("vanilla")).await;
        assert_eq!(
            project.config_files.get("vercel.json").unwrap()["version"],
            2
        );
    }

    #[tokio::test]
    async fn test_persist_writes_expected_layout() {
        let dir = tempfile::tempdir().unwrap();
        let scaffold_spec = Specification::scaffold(
            Framework::Vanilla,
            CssFramework::Vanilla,
            BTreeMap::from([
                ("header".to_string(), "Hi".to_string()),
                ("main".to_string(), "Body".to_string()),
                ("footer".to_string(), "Bye".to_string()),
            ]),
        );
        let generator = generator(dir.path());
        let project = generator.generate(&scaffold_spec, None).await;
        let project_dir = generator.persist(&project).await.unwrap();

        assert!(project_dir.ends_with("project"));
        assert!(project_dir.join("index.html").exists());
        assert!(project_dir.join("package.json").exists());
        assert!(project_dir.join(".gitignore").exists());
        assert!(project_dir.join("README.md").exists());
        assert!(project_dir.join("components/Header.html").exists());

        let manifest: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(project_dir.join("package.json")).unwrap(),
        )
        .unwrap();
        assert!(manifest.get("dependencies").is_some());
    }

    #[tokio::test]
    async fn test_persist_refuses_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());
        let mut project = generator.generate(&Specification::default(), Some("vanilla")).await;
        project
            .project_structure
            .insert("../outside.txt", "nope".to_string());

        let project_dir = generator.persist(&project).await.unwrap();
        assert!(!project_dir.parent().unwrap().join("outside.txt").exists());
    }
}
