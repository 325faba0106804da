//! Console reporter with colored output

use crate::analyzer::engine::{AggregateStats, GeneratedViewer, ReportAnalysis};
use crate::{Status, TestCase};
use colored::{ColoredString, Colorize};

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to list every command
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a generated viewer
    pub fn report(&self, generated: &GeneratedViewer) {
        print!("{}", self.format_report(generated));
    }

    /// Report in quiet mode (one line per document)
    pub fn report_quiet(&self, analysis: &ReportAnalysis) {
        println!("{}", self.format_quiet(analysis));
    }

    /// Print the summary over several documents
    pub fn report_summary(&self, stats: &AggregateStats) {
        print!("{}", self.format_summary(stats));
    }

    /// Report how many stale artifacts were removed before generating
    pub fn report_cleaned(&self, removed: usize) {
        if removed > 0 {
            println!("{}", self.format_cleaned(removed));
        }
    }

    pub fn format_cleaned(&self, removed: usize) -> String {
        format!("Removed {} previously generated files", removed)
    }

    pub fn format_report(&self, generated: &GeneratedViewer) -> String {
        let analysis = &generated.analysis;
        let s = &analysis.summary;
        let mut out = String::new();

        out.push_str(&format!(
            "\n{}\n",
            self.bold(&format!("Processing: {}", analysis.file_path.display()))
        ));
        let attrs = &analysis.attributes;
        if !attrs.is_empty() {
            out.push_str(&format!(
                "  rhcert {} {}  plan time: {}\n",
                attrs.rhcert_version, attrs.rhcert_release, attrs.plan_time
            ));
        }
        out.push_str(&format!(
            "  Found {} tests with {} total commands\n",
            s.total_tests, s.total_commands
        ));
        out.push_str(&format!(
            "  {} {}  {} {}  {} {}  {} {}\n",
            self.status_label(Status::Pass),
            s.passed_tests,
            self.status_label(Status::Fail),
            s.failed_tests,
            self.status_label(Status::Partial),
            s.partial_tests,
            self.status_label(Status::Unknown),
            s.unknown_tests
        ));

        for test in &analysis.tests {
            out.push_str(&self.format_test(test));
        }

        out.push_str(&format!("  HTML: {}\n", generated.html_path.display()));
        out.push_str(&format!("  CSS:  {}\n", generated.css_path.display()));
        out.push_str(&format!("  JS:   {}\n", generated.js_path.display()));
        if let Some(ref path) = generated.index_path {
            out.push_str(&format!("  JSON: {}\n", path.display()));
        }
        if let Some(ref path) = generated.package_path {
            out.push_str(&format!("  ZIP:  {}\n", path.display()));
        }
        out
    }

    fn format_test(&self, test: &TestCase) -> String {
        let mut out = format!(
            "    {} {} ({}/{} commands)\n",
            self.status_label(test.status),
            test.name,
            test.passed_commands(),
            test.total_commands()
        );
        if self.verbose {
            for cmd in &test.commands {
                out.push_str(&format!(
                    "        #{} {} {} [returned {}]\n",
                    cmd.number,
                    self.status_label(cmd.status),
                    cmd.text,
                    cmd.return_value
                ));
            }
        }
        out
    }

    pub fn format_quiet(&self, analysis: &ReportAnalysis) -> String {
        let s = &analysis.summary;
        format!(
            "{}: {} tests, {} pass, {} fail, {} partial, {} unknown",
            analysis.file_path.display(),
            s.total_tests,
            s.passed_tests,
            s.failed_tests,
            s.partial_tests,
            s.unknown_tests
        )
    }

    pub fn format_summary(&self, stats: &AggregateStats) -> String {
        format!(
            "\n{}\n  Documents: {}\n  Tests: {} ({} pass, {} fail, {} partial, {} unknown)\n  Commands: {}/{} passed\n",
            self.bold("Summary"),
            stats.documents,
            stats.total_tests,
            stats.passed_tests,
            stats.failed_tests,
            stats.partial_tests,
            stats.unknown_tests,
            stats.passed_commands,
            stats.total_commands
        )
    }

    fn status_label(&self, status: Status) -> String {
        let label = format!("{:<7}", status.as_str());
        if !self.use_colors {
            return label;
        }
        let colored: ColoredString = match status {
            Status::Pass => label.green(),
            Status::Fail => label.red(),
            Status::Partial => label.yellow(),
            Status::Unknown => label.dimmed(),
        };
        colored.bold().to_string()
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ViewerEngine;
    use std::path::{Path, PathBuf};

    fn generated() -> GeneratedViewer {
        let analysis = ViewerEngine::new()
            .analyze_source(
                Path::new("lab.xml"),
                r#"<r><test name="net"><command command="ping -c1 host" return-value="0"/><command command="ethtool" return-value="75"/></test></r>"#
                    .to_string(),
            )
            .unwrap();
        GeneratedViewer {
            analysis,
            output_dir: PathBuf::from("out"),
            html_path: PathBuf::from("out/lab-viewer.html"),
            css_path: PathBuf::from("out/lab-styles.css"),
            js_path: PathBuf::from("out/lab-script.js"),
            package_path: None,
            index_path: None,
        }
    }

    #[test]
    fn test_format_report_plain() {
        let out = ConsoleReporter::new().without_colors().format_report(&generated());
        assert!(out.contains("Processing: lab.xml"));
        assert!(out.contains("Found 1 tests with 2 total commands"));
        assert!(out.contains("PARTIAL net (1/2 commands)"));
        assert!(out.contains("HTML: out/lab-viewer.html"));
        assert!(!out.contains("ethtool"));
    }

    #[test]
    fn test_format_report_verbose_lists_commands() {
        let out = ConsoleReporter::new()
            .without_colors()
            .verbose()
            .format_report(&generated());
        assert!(out.contains("#2 FAIL    ethtool [returned 75]"));
    }

    #[test]
    fn test_format_cleaned() {
        let out = ConsoleReporter::new().format_cleaned(3);
        assert_eq!(out, "Removed 3 previously generated files");
    }

    #[test]
    fn test_format_quiet() {
        let out = ConsoleReporter::new().format_quiet(&generated().analysis);
        assert_eq!(out, "lab.xml: 1 tests, 0 pass, 0 fail, 1 partial, 0 unknown");
    }

    #[test]
    fn test_format_summary() {
        let g = generated();
        let stats = ViewerEngine::aggregate_stats(&[&g.analysis]);
        let out = ConsoleReporter::new().without_colors().format_summary(&stats);
        assert!(out.contains("Documents: 1"));
        assert!(out.contains("Commands: 1/2 passed"));
    }
}
