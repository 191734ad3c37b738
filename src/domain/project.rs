//! Generated project model
//!
//! A [`GeneratedProject`] is the output file-set plus manifest produced for
//! one target framework. It is owned by the pipeline for the duration of one
//! clone request and discarded afterward.

use serde_json::Value;

use crate::domain::spec::{Framework, PackageManifest};

/// Kind of file being generated, used to steer the content renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Component,
    Page,
    Style,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Component => write!(f, "component"),
            Self::Page => write!(f, "page"),
            Self::Style => write!(f, "style"),
        }
    }
}

/// Path-keyed map that preserves insertion order.
///
/// Insertion order is the write order on disk; inserting an existing key
/// replaces the value in place without moving it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedFiles<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedFiles<V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<V> OrderedFiles<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, value: V) {
        let path = path.into();
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| *p == path) {
            entry.1 = value;
        } else {
            self.entries.push((path, value));
        }
    }

    pub fn get(&self, path: &str) -> Option<&V> {
        self.entries.iter().find(|(p, _)| p == path).map(|(_, v)| v)
    }

    pub fn contains_key(&self, path: &str) -> bool {
        self.entries.iter().any(|(p, _)| p == path)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source files keyed by relative path.
pub type ProjectFiles = OrderedFiles<String>;

/// Config files keyed by relative path; values are either raw string content
/// or structured objects serialized pretty-printed at write time.
pub type ConfigFiles = OrderedFiles<Value>;

/// The output file-set plus manifest produced for one target framework.
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    pub framework: Framework,
    pub project_structure: ProjectFiles,
    pub package_json: PackageManifest,
    pub config_files: ConfigFiles,
    pub assets: Vec<String>,
    pub build_commands: Vec<String>,
    pub dev_commands: Vec<String>,
    pub deployment_config: Value,
}

impl GeneratedProject {
    /// Whether a file exists among either the generated sources or the
    /// config files.
    pub fn has_file(&self, path: &str) -> bool {
        self.project_structure.contains_key(path) || self.config_files.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_files_preserve_insertion_order() {
        let mut files = ProjectFiles::new();
        files.insert("b.js", "two".to_string());
        files.insert("a.js", "one".to_string());
        files.insert("c.js", "three".to_string());

        let keys: Vec<&str> = files.keys().collect();
        assert_eq!(keys, vec!["b.js", "a.js", "c.js"]);
    }

    #[test]
    fn test_ordered_files_replace_in_place() {
        let mut files = ProjectFiles::new();
        files.insert("a.js", "one".to_string());
        files.insert("b.js", "two".to_string());
        files.insert("a.js", "updated".to_string());

        assert_eq!(files.len(), 2);
        assert_eq!(files.get("a.js").unwrap(), "updated");
        let keys: Vec<&str> = files.keys().collect();
        assert_eq!(keys, vec!["a.js", "b.js"]);
    }
}
