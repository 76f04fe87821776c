//! The content glob handed to the styling engine's class scanner.

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File extensions scanned for class names by default.
pub const DEFAULT_CONTENT_EXTENSIONS: &[&str] = &[
    "astro", "html", "js", "jsx", "md", "mdx", "svelte", "ts", "tsx", "vue",
];

/// Default directory scanned for content.
pub const DEFAULT_CONTENT_ROOT: &str = "./src";

/// A recursive glob restricted to a fixed set of extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentGlob {
    pub root: String,
    pub extensions: Vec<String>,
}

impl Default for ContentGlob {
    fn default() -> Self {
        Self {
            root: DEFAULT_CONTENT_ROOT.to_string(),
            extensions: DEFAULT_CONTENT_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl ContentGlob {
    /// Checks that there is at least one extension and that each is a bare
    /// alphanumeric suffix without a leading dot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.trim().is_empty() {
            return Err(ConfigError::InvalidContent {
                reason: "content root is empty".to_string(),
            });
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::InvalidContent {
                reason: "no content extensions listed".to_string(),
            });
        }
        for ext in &self.extensions {
            if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::InvalidContent {
                    reason: format!("extension '{}' must be alphanumeric without a dot", ext),
                });
            }
        }
        Ok(())
    }

    /// The glob pattern, e.g. `./src/**/*.{astro,html,md}`.
    ///
    /// ```rust
    /// use prosetheme::ContentGlob;
    ///
    /// let glob = ContentGlob { root: "./src".into(), extensions: vec!["md".into(), "mdx".into()] };
    /// assert_eq!(glob.pattern(), "./src/**/*.{md,mdx}");
    /// ```
    pub fn pattern(&self) -> String {
        let root = self.root.trim_end_matches('/');
        match self.extensions.as_slice() {
            [single] => format!("{}/**/*.{}", root, single),
            many => format!("{}/**/*.{{{}}}", root, many.join(",")),
        }
    }

    /// Whether a project-relative path falls under the root with a listed extension.
    ///
    /// Paths containing `..` never match.
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return false;
        }
        let path = normalized(path);
        let root = normalized(Path::new(&self.root));
        if !path.starts_with(&root) || path == root {
            return false;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }
}

fn normalized(path: &Path) -> std::path::PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
