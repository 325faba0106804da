//! Navigation index - the render-ready test/command structure behind the sidebar

use crate::{Status, TestCase};
use serde::Serialize;

/// Sidebar entry for one test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavEntry {
    /// `test_<index>`; stable within one generation run
    pub id: String,
    pub name: String,
    pub description: String,
    pub logical_device: String,
    pub status: Status,
    pub total_commands: usize,
    pub passed_commands: usize,
    pub commands: Vec<NavCommand>,
}

/// Clickable command item of a sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavCommand {
    pub number: usize,
    /// Untruncated command text; also the jump target
    pub text: String,
    pub status: Status,
    pub occurrence: usize,
}

impl NavCommand {
    /// Display text cut to `max_chars` characters, with `...` appended when cut
    pub fn preview(&self, max_chars: usize) -> String {
        match self.text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => format!("{}...", &self.text[..byte_idx]),
            None => self.text.clone(),
        }
    }
}

impl NavEntry {
    /// Case-insensitive search over the entry's visible text
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&self.name, &self.description, &self.logical_device]
            .into_iter()
            .chain(self.commands.iter().map(|c| &c.text))
            .any(|s| s.to_lowercase().contains(&query))
    }

    /// True when the entry still shows something under the "failures only" filter
    pub fn has_failures(&self) -> bool {
        self.commands.iter().any(|c| c.status == Status::Fail)
    }
}

/// Build the sidebar index, one entry per test in sequence order
pub fn build_index(tests: &[TestCase]) -> Vec<NavEntry> {
    tests
        .iter()
        .enumerate()
        .map(|(i, test)| NavEntry {
            id: format!("test_{}", i),
            name: test.name.clone(),
            description: test.description.clone(),
            logical_device: test.logical_device.clone(),
            status: test.status,
            total_commands: test.total_commands(),
            passed_commands: test.passed_commands(),
            commands: test
                .commands
                .iter()
                .map(|c| NavCommand {
                    number: c.number,
                    text: c.text.clone(),
                    status: c.status,
                    occurrence: c.occurrence,
                })
                .collect(),
        })
        .collect()
}
