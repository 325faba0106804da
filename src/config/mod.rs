//! Configuration loading for rhcert-viewer

mod schema;

pub use schema::{CliOverrides, Config, DEFAULT_PREVIEW_LENGTH, DEFAULT_TITLE};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".rhcertviewerrc.json";

/// Find and load config file with extends resolution. Searches current directory then parents.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => load_config_with_extends(&path, &mut HashSet::new()),
        None => Ok(Config::default()),
    }
}

/// Load a config file and resolve extends chain
fn load_config_with_extends(config_path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Config> {
    // Prevent circular extends
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());
    if !visited.insert(canonical) {
        anyhow::bail!(
            "Circular extends detected in config: {}",
            config_path.display()
        );
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let mut config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", config_path.display()))?;

    if let Some(extends) = config.extends.take() {
        let config_dir = config_path.parent().unwrap_or(Path::new("."));
        let mut extends_path = config_dir.join(&extends);
        if extends_path.extension().is_none() {
            extends_path.set_extension("json");
        }
        if !extends_path.exists() {
            anyhow::bail!(
                "Extended config not found: {} (referenced from {})",
                extends_path.display(),
                config_path.display()
            );
        }
        let base_config = load_config_with_extends(&extends_path, visited)?;
        config.merge_from(base_config);
    }

    Ok(config)
}

/// Search for .rhcertviewerrc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Build a GlobSet from ignore patterns for path matching
pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| anyhow::anyhow!("{}", e))
}

/// Check if a path should be ignored based on config glob patterns
pub fn is_ignored(path: &Path, ignore_set: &GlobSet) -> bool {
    ignore_set.is_match(path)
}

/// Default config written by `rhcert-viewer init`
pub fn default_config_json() -> String {
    format!(
        r#"{{
  "outputDir": "viewers",
  "title": "{}",
  "commandPreviewLength": {},
  "cleanBeforeGenerate": false,
  "scopedOutput": false,
  "package": false,
  "indexJson": false,
  "ignore": [
    "**/uploads/tmp/**"
  ]
}}
"#,
        DEFAULT_TITLE, DEFAULT_PREVIEW_LENGTH
    )
}
