//! Viewer engine - orchestrates extraction, rendering and artifact output

use crate::config::Config;
use crate::navigation::{build_index, NavEntry};
use crate::output::{
    cleanup_generated, package_zip, scoped_output_dir, write_atomic, ArtifactNames,
};
use crate::parser::{read_report, ReportFileParser, XmlParser};
use std::collections::BTreeSet;
use crate::reporter::{HtmlReporter, JsonReporter, ScriptReporter, StylesheetReporter};
use crate::{DocumentAttributes, ReportSummary, TestCase, ViewerError};
use std::path::{Path, PathBuf};

/// Everything extracted from one report document
#[derive(Debug, Clone)]
pub struct ReportAnalysis {
    /// Path of the input document
    pub file_path: PathBuf,
    pub attributes: DocumentAttributes,
    pub tests: Vec<TestCase>,
    /// Sidebar index built from `tests`
    pub index: Vec<NavEntry>,
    pub summary: ReportSummary,
    /// Raw document text, inlined verbatim into the viewer
    pub source: String,
}

/// Rendered artifact contents, not yet written
#[derive(Debug, Clone)]
pub struct RenderedViewer {
    pub html: String,
    pub css: String,
    pub js: String,
}

/// Result of generating a viewer for one document
#[derive(Debug, Clone)]
pub struct GeneratedViewer {
    pub analysis: ReportAnalysis,
    /// Directory the artifacts were written to
    pub output_dir: PathBuf,
    pub html_path: PathBuf,
    pub css_path: PathBuf,
    pub js_path: PathBuf,
    pub package_path: Option<PathBuf>,
    pub index_path: Option<PathBuf>,
}

/// Main engine that turns report documents into viewers
pub struct ViewerEngine {
    config: Config,
}

impl ViewerEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Use the given configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read and parse a document, extracting tests, attributes and the index
    pub fn analyze(&self, path: &Path) -> Result<ReportAnalysis, ViewerError> {
        let source = read_report(path)?;
        self.analyze_source(path, source)
    }

    /// Same as [`analyze`](Self::analyze) for text already in memory
    pub fn analyze_source(&self, path: &Path, source: String) -> Result<ReportAnalysis, ViewerError> {
        tracing::debug!(path = %path.display(), "Parsing XML and extracting test structure");
        let (attributes, tests) = {
            let doc = XmlParser::new().parse_file(path, &source)?;
            let root = doc.root_element();
            (
                DocumentAttributes::from_root(root),
                ReportFileParser::new().extract_tests(root),
            )
        };
        let index = build_index(&tests);
        let summary = ReportSummary::from_tests(&tests);
        tracing::debug!(
            tests = summary.total_tests,
            commands = summary.total_commands,
            "Extracted test structure"
        );

        Ok(ReportAnalysis {
            file_path: path.to_path_buf(),
            attributes,
            tests,
            index,
            summary,
            source,
        })
    }

    /// Render the three viewer files for an analysis
    pub fn render(&self, analysis: &ReportAnalysis, names: &ArtifactNames) -> RenderedViewer {
        let html = HtmlReporter::new()
            .with_title(self.config.title())
            .with_preview_length(self.config.preview_length())
            .report(
                &analysis.index,
                &analysis.attributes,
                &analysis.source,
                &names.css,
                &names.js,
            );
        RenderedViewer {
            html,
            css: StylesheetReporter::new().report(),
            js: ScriptReporter::new().report(),
        }
    }

    /// Remove earlier artifacts from every directory the given documents will
    /// be written to. Returns how many files were removed.
    ///
    /// Runs once before a batch; `generate` itself never deletes anything.
    pub fn prepare_output(&self, paths: &[PathBuf]) -> usize {
        if !self.config.clean_before_generate() {
            return 0;
        }
        let base = self.config.output_dir();
        let dirs: BTreeSet<PathBuf> = if self.config.scoped_output() {
            paths
                .iter()
                .filter_map(|p| read_report(p).ok())
                .map(|source| scoped_output_dir(&base, &source))
                .collect()
        } else {
            BTreeSet::from([base])
        };

        let removed: usize = dirs
            .iter()
            .filter(|dir| dir.is_dir())
            .map(|dir| cleanup_generated(dir))
            .sum();
        tracing::debug!(removed, dirs = dirs.len(), "Cleaned output directories");
        removed
    }

    /// Generate the viewer for one document, named after its file stem.
    ///
    /// Input errors abort before anything is written.
    pub fn generate(&self, path: &Path) -> Result<GeneratedViewer, ViewerError> {
        self.generate_as(path, &ArtifactNames::for_input(path))
    }

    /// Generate the viewer for one document under the given artifact names
    pub fn generate_as(
        &self,
        path: &Path,
        names: &ArtifactNames,
    ) -> Result<GeneratedViewer, ViewerError> {
        let analysis = self.analyze(path)?;

        let output_dir = if self.config.scoped_output() {
            scoped_output_dir(&self.config.output_dir(), &analysis.source)
        } else {
            self.config.output_dir()
        };

        let rendered = self.render(&analysis, names);
        let css_path = output_dir.join(&names.css);
        let js_path = output_dir.join(&names.js);
        let html_path = output_dir.join(&names.html);
        write_atomic(&css_path, rendered.css.as_bytes())?;
        write_atomic(&js_path, rendered.js.as_bytes())?;
        write_atomic(&html_path, rendered.html.as_bytes())?;

        let index_path = if self.config.index_json() {
            let path = output_dir.join(&names.index_json);
            write_atomic(&path, JsonReporter::new().pretty().report(&analysis).as_bytes())?;
            Some(path)
        } else {
            None
        };

        let package_path = if self.config.package() {
            Some(package_zip(&output_dir, names)?)
        } else {
            None
        };

        tracing::debug!(html = %html_path.display(), "Viewer written");

        Ok(GeneratedViewer {
            analysis,
            output_dir,
            html_path,
            css_path,
            js_path,
            package_path,
            index_path,
        })
    }

    /// Generate viewers for several documents sequentially.
    ///
    /// Documents sharing a file stem get distinct names, see [`ArtifactNames::for_batch`].
    pub fn generate_many(&self, paths: &[PathBuf]) -> Vec<Result<GeneratedViewer, ViewerError>> {
        let names = ArtifactNames::for_batch(paths);
        paths
            .iter()
            .zip(&names)
            .map(|(p, n)| self.generate_as(p, n))
            .collect()
    }

    /// Generate viewers for several documents in parallel using rayon
    pub fn generate_parallel(
        &self,
        paths: &[PathBuf],
    ) -> Vec<Result<GeneratedViewer, ViewerError>> {
        use rayon::prelude::*;

        let names = ArtifactNames::for_batch(paths);
        paths
            .par_iter()
            .zip(names.par_iter())
            .map(|(p, n)| self.generate_as(p, n))
            .collect()
    }

    /// Get aggregate stats from multiple analyses
    pub fn aggregate_stats(analyses: &[&ReportAnalysis]) -> AggregateStats {
        let mut stats = AggregateStats {
            documents: analyses.len(),
            ..Default::default()
        };
        for analysis in analyses {
            let s = &analysis.summary;
            stats.total_tests += s.total_tests;
            stats.passed_tests += s.passed_tests;
            stats.failed_tests += s.failed_tests;
            stats.partial_tests += s.partial_tests;
            stats.unknown_tests += s.unknown_tests;
            stats.total_commands += s.total_commands;
            stats.passed_commands += s.passed_commands;
        }
        stats
    }
}

impl Default for ViewerEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics over several documents
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AggregateStats {
    pub documents: usize,
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub partial_tests: usize,
    pub unknown_tests: usize,
    pub total_commands: usize,
    pub passed_commands: usize,
}
