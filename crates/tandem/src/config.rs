//! Configuration file loading (tandem.toml).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tandem_compare::CompareLabels;

/// Configuration file structure (tandem.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub compare: CompareConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_docs_dir")]
    pub dir: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Paths to CSS stylesheets to include
    pub styles: Option<Vec<String>>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            output: default_output(),
            title: default_title(),
            base_url: default_base_url(),
            styles: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompareConfig {
    #[serde(default = "default_left_label")]
    pub left_label: String,
    #[serde(default = "default_right_label")]
    pub right_label: String,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            left_label: default_left_label(),
            right_label: default_right_label(),
        }
    }
}

impl CompareConfig {
    /// Column labels for the comparison renderer.
    pub fn labels(&self) -> CompareLabels {
        CompareLabels {
            left: self.left_label.clone(),
            right: self.right_label.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

fn default_docs_dir() -> String {
    "docs".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_title() -> String {
    "Documentation".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_left_label() -> String {
    "Next.js".to_string()
}
fn default_right_label() -> String {
    "Remix".to_string()
}
fn default_minify() -> bool {
    true
}

/// Load configuration from the given path if it exists.
///
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: ConfigFile = toml::from_str(
            r#"
[docs]
dir = "pages"
title = "Remix for Next.js Developers"

[compare]
left_label = "Next.js"
right_label = "Remix"

[build]
minify = false
"#,
        )
        .unwrap();

        assert_eq!(config.docs.dir, "pages");
        assert_eq!(config.docs.title, "Remix for Next.js Developers");
        assert_eq!(config.compare.labels().right, "Remix");
        assert!(!config.build.minify);
    }

    #[test]
    fn defaults_apply_for_missing_sections() {
        let config: ConfigFile = toml::from_str("").unwrap();

        assert_eq!(config.docs.dir, "docs");
        assert_eq!(config.docs.output, "dist");
        assert_eq!(config.compare.left_label, "Next.js");
        assert!(config.build.minify);
    }
}
