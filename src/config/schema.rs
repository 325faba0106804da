//! Config schema and deserialization

use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_TITLE: &str = "Red Hat Certification Viewer";
pub const DEFAULT_PREVIEW_LENGTH: usize = 50;

/// Root config structure for .rhcertviewerrc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Directory that receives the generated artifacts (default: current directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Page title of the generated viewer
    #[serde(default)]
    pub title: Option<String>,

    /// Maximum characters of command text shown in the sidebar (default: 50)
    #[serde(default)]
    pub command_preview_length: Option<usize>,

    /// Delete previously generated artifacts in the output directory first
    #[serde(default)]
    pub clean_before_generate: Option<bool>,

    /// Write into a per-document subdirectory named after the content hash
    #[serde(default)]
    pub scoped_output: Option<bool>,

    /// Also bundle the artifacts into `<base>-viewer.zip`
    #[serde(default)]
    pub package: Option<bool>,

    /// Also write the navigation index as `<base>-index.json`
    #[serde(default)]
    pub index_json: Option<bool>,

    /// Glob patterns for XML files to skip when processing a directory
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// CLI values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub preview_length: Option<usize>,
    pub clean: bool,
    pub scoped: bool,
    pub package: bool,
    pub index_json: bool,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli: &CliOverrides) -> Self {
        if cli.output_dir.is_some() {
            self.output_dir = cli.output_dir.clone();
        }
        if cli.preview_length.is_some() {
            self.command_preview_length = cli.preview_length;
        }
        if cli.clean {
            self.clean_before_generate = Some(true);
        }
        if cli.scoped {
            self.scoped_output = Some(true);
        }
        if cli.package {
            self.package = Some(true);
        }
        if cli.index_json {
            self.index_json = Some(true);
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        if self.output_dir.is_none() {
            self.output_dir = base.output_dir;
        }
        if self.title.is_none() {
            self.title = base.title;
        }
        if self.command_preview_length.is_none() {
            self.command_preview_length = base.command_preview_length;
        }
        if self.clean_before_generate.is_none() {
            self.clean_before_generate = base.clean_before_generate;
        }
        if self.scoped_output.is_none() {
            self.scoped_output = base.scoped_output;
        }
        if self.package.is_none() {
            self.package = base.package;
        }
        if self.index_json.is_none() {
            self.index_json = base.index_json;
        }

        // Merge ignore patterns
        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn preview_length(&self) -> usize {
        self.command_preview_length.unwrap_or(DEFAULT_PREVIEW_LENGTH)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn clean_before_generate(&self) -> bool {
        self.clean_before_generate.unwrap_or(false)
    }

    pub fn scoped_output(&self) -> bool {
        self.scoped_output.unwrap_or(false)
    }

    pub fn package(&self) -> bool {
        self.package.unwrap_or(false)
    }

    pub fn index_json(&self) -> bool {
        self.index_json.unwrap_or(false)
    }
}
