//! JSON reporter for machine-readable output

use crate::analyzer::engine::{AggregateStats, ReportAnalysis};
use crate::navigation::NavEntry;
use crate::{DocumentAttributes, ReportSummary, TestCase};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn to_string<T: Serialize>(&self, value: &T, fallback: &str) -> String {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.unwrap_or_else(|_| fallback.to_string())
    }

    /// Report a single document: attributes, summary, tests and sidebar index
    pub fn report(&self, analysis: &ReportAnalysis) -> String {
        self.to_string(&JsonDocument::from(analysis), "{}")
    }

    /// Report multiple documents with a combined summary
    pub fn report_many(&self, analyses: &[&ReportAnalysis], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            documents: analyses.iter().map(|a| JsonDocument::from(*a)).collect(),
            summary: JsonSummary {
                documents: stats.documents,
                total_tests: stats.total_tests,
                passed_tests: stats.passed_tests,
                failed_tests: stats.failed_tests,
                partial_tests: stats.partial_tests,
                unknown_tests: stats.unknown_tests,
                total_commands: stats.total_commands,
                passed_commands: stats.passed_commands,
            },
        };
        self.to_string(&output, "{}")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDocument<'a> {
    file: String,
    attributes: &'a DocumentAttributes,
    summary: &'a ReportSummary,
    tests: &'a [TestCase],
    index: &'a [NavEntry],
}

impl<'a> From<&'a ReportAnalysis> for JsonDocument<'a> {
    fn from(analysis: &'a ReportAnalysis) -> Self {
        Self {
            file: analysis.file_path.display().to_string(),
            attributes: &analysis.attributes,
            summary: &analysis.summary,
            tests: &analysis.tests,
            index: &analysis.index,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    documents: Vec<JsonDocument<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    documents: usize,
    total_tests: usize,
    passed_tests: usize,
    failed_tests: usize,
    partial_tests: usize,
    unknown_tests: usize,
    total_commands: usize,
    passed_commands: usize,
}
