//! rhcert-viewer: browsable HTML viewer for Red Hat certification reports
//!
//! This library extracts the test/command structure from a certification
//! report XML document, derives pass/fail status for every test, and builds
//! the navigation index that drives the generated viewer.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod navigation;
pub mod output;
pub mod parser;
pub mod reporter;
pub mod watcher;

pub use error::ViewerError;

use serde::{Deserialize, Serialize};

/// Status of a command or a test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
    /// Mixed command outcomes
    Partial,
    Unknown,
}

impl Status {
    /// Map a summary `data-value` to a status. Unrecognized values are `Unknown`.
    pub fn from_summary(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("PASS") {
            Status::Pass
        } else if value.eq_ignore_ascii_case("FAIL") {
            Status::Fail
        } else if value.eq_ignore_ascii_case("PARTIAL") {
            Status::Partial
        } else {
            Status::Unknown
        }
    }

    /// Uppercase wire name (`PASS`, `FAIL`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
            Status::Partial => "PARTIAL",
            Status::Unknown => "UNKNOWN",
        }
    }

    /// CSS class used by the viewer sidebar
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::Pass => "status-pass",
            Status::Fail => "status-fail",
            Status::Partial => "status-partial",
            Status::Unknown => "status-unknown",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One command invocation recorded under a test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    /// 1-based position among the non-empty commands of the parent test
    pub number: usize,
    /// Literal command string (never empty)
    pub text: String,
    /// Process exit code as recorded in the document
    pub return_value: String,
    /// `Pass` iff `return_value == "0"`
    pub status: Status,
    /// Index of this element among all command elements in the document
    /// with identical text (0-based, document order)
    pub occurrence: usize,
}

/// One certification test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub name: String,
    pub description: String,
    pub logical_device: String,
    /// Overall status derived from the commands (or the summary fallback)
    pub status: Status,
    /// Raw `data-value` of the first summary element below the test
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub commands: Vec<Command>,
}

impl TestCase {
    /// Number of recorded commands
    pub fn total_commands(&self) -> usize {
        self.commands.len()
    }

    /// Number of commands that passed
    pub fn passed_commands(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| c.status == Status::Pass)
            .count()
    }

    /// Number of commands that failed
    pub fn failed_commands(&self) -> usize {
        self.total_commands() - self.passed_commands()
    }
}

/// Top-level metadata of the report document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAttributes {
    pub rhcert_version: String,
    pub rhcert_release: String,
    pub plan_time: String,
}

impl DocumentAttributes {
    /// True when none of the attributes carry a value
    pub fn is_empty(&self) -> bool {
        self.rhcert_version.is_empty() && self.rhcert_release.is_empty() && self.plan_time.is_empty()
    }
}

/// Totals for one report document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub partial_tests: usize,
    pub unknown_tests: usize,
    pub total_commands: usize,
    pub passed_commands: usize,
}

impl ReportSummary {
    /// Tally statuses and command counts over a test sequence
    pub fn from_tests(tests: &[TestCase]) -> Self {
        let mut summary = ReportSummary {
            total_tests: tests.len(),
            ..Default::default()
        };
        for test in tests {
            match test.status {
                Status::Pass => summary.passed_tests += 1,
                Status::Fail => summary.failed_tests += 1,
                Status::Partial => summary.partial_tests += 1,
                Status::Unknown => summary.unknown_tests += 1,
            }
            summary.total_commands += test.total_commands();
            summary.passed_commands += test.passed_commands();
        }
        summary
    }

    /// Commands that did not return 0
    pub fn failed_commands(&self) -> usize {
        self.total_commands - self.passed_commands
    }
}
