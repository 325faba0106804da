//! Report file parser - extracts tests and commands from the document tree

use crate::analyzer::{aggregate, command_status};
use crate::{Command, Status, TestCase};
use roxmltree::{Node, NodeId};
use std::collections::HashMap;

pub const TEST_TAG: &str = "test";
pub const COMMAND_TAG: &str = "command";
pub const SUMMARY_TAG: &str = "summary";

pub const DEFAULT_TEST_NAME: &str = "Unknown Test";
pub const DEFAULT_RETURN_VALUE: &str = "0";

/// Extracts the test structure from a parsed certification report
pub struct ReportFileParser;

impl ReportFileParser {
    /// Create a new report parser
    pub fn new() -> Self {
        Self
    }

    /// Extract every test below `root` (at any depth) in document order.
    ///
    /// `root` itself is never reported as a test. Nested tests are reported
    /// individually, and an outer test also lists the commands of the tests
    /// nested inside it.
    pub fn extract_tests(&self, root: Node<'_, '_>) -> Vec<TestCase> {
        let occurrences = command_occurrences(root);

        root.descendants()
            .skip(1)
            .filter(|n| n.has_tag_name(TEST_TAG))
            .map(|n| self.parse_test(n, &occurrences))
            .collect()
    }

    fn parse_test(&self, node: Node<'_, '_>, occurrences: &HashMap<NodeId, usize>) -> TestCase {
        let summary = node
            .descendants()
            .find(|n| n.has_tag_name(SUMMARY_TAG))
            .and_then(|n| n.attribute("data-value"))
            .map(String::from);
        let fallback = summary
            .as_deref()
            .map(Status::from_summary)
            .unwrap_or(Status::Unknown);

        let commands: Vec<Command> = node
            .descendants()
            .filter(|n| n.has_tag_name(COMMAND_TAG))
            .filter_map(|n| {
                let text = n.attribute("command").filter(|t| !t.is_empty())?;
                Some((n, text))
            })
            .enumerate()
            .map(|(i, (n, text))| {
                let return_value = n.attribute("return-value").unwrap_or(DEFAULT_RETURN_VALUE);
                Command {
                    number: i + 1,
                    text: text.to_string(),
                    return_value: return_value.to_string(),
                    status: command_status(return_value),
                    occurrence: occurrences.get(&n.id()).copied().unwrap_or(0),
                }
            })
            .collect();

        let status = aggregate(&commands, fallback);

        TestCase {
            name: node.attribute("name").unwrap_or(DEFAULT_TEST_NAME).to_string(),
            description: node.attribute("description").unwrap_or("").to_string(),
            logical_device: node.attribute("logical-device").unwrap_or("").to_string(),
            status,
            summary,
            commands,
        }
    }
}

impl Default for ReportFileParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Number every command element by how many earlier command elements carry the same text
fn command_occurrences(root: Node<'_, '_>) -> HashMap<NodeId, usize> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut occurrences = HashMap::new();
    for node in root.descendants().filter(|n| n.has_tag_name(COMMAND_TAG)) {
        let Some(text) = node.attribute("command").filter(|t| !t.is_empty()) else {
            continue;
        };
        let count = seen.entry(text).or_insert(0);
        occurrences.insert(node.id(), *count);
        *count += 1;
    }
    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::XmlParser;

    fn extract(source: &str) -> Vec<TestCase> {
        let doc = XmlParser::new().parse(source).unwrap();
        ReportFileParser::new().extract_tests(doc.root_element())
    }

    #[test]
    fn test_mixed_commands_are_partial() {
        let tests = extract(
            r#"<certification-test>
                <test name="storage">
                    <command command="ls" return-value="0"/>
                    <command command="rm" return-value="1"/>
                </test>
            </certification-test>"#,
        );
        assert_eq!(tests.len(), 1);
        let statuses: Vec<Status> = tests[0].commands.iter().map(|c| c.status).collect();
        assert_eq!(statuses, vec![Status::Pass, Status::Fail]);
        assert_eq!(tests[0].status, Status::Partial);
        assert_eq!(tests[0].passed_commands(), 1);
        assert_eq!(tests[0].total_commands(), 2);
    }

    #[test]
    fn test_summary_fallback_without_commands() {
        let tests = extract(
            r#"<certification-test>
                <test name="info"><output><summary data-value="FAIL"/></output></test>
            </certification-test>"#,
        );
        assert_eq!(tests[0].status, Status::Fail);
        assert_eq!(tests[0].total_commands(), 0);
        assert_eq!(tests[0].summary.as_deref(), Some("FAIL"));
    }

    #[test]
    fn test_no_summary_is_unknown() {
        let tests = extract(r#"<r><test name="bare"/></r>"#);
        assert_eq!(tests[0].status, Status::Unknown);
        assert_eq!(tests[0].summary, None);
    }

    #[test]
    fn test_summary_without_value_is_unknown() {
        let tests = extract(r#"<r><test name="t"><summary/></test></r>"#);
        assert_eq!(tests[0].status, Status::Unknown);
    }

    #[test]
    fn test_commands_override_summary() {
        let tests = extract(
            r#"<r><test name="t">
                <summary data-value="FAIL"/>
                <command command="true" return-value="0"/>
            </test></r>"#,
        );
        assert_eq!(tests[0].status, Status::Pass);
        assert_eq!(tests[0].summary.as_deref(), Some("FAIL"));
    }

    #[test]
    fn test_empty_command_skipped_in_numbering() {
        let tests = extract(
            r#"<r><test name="t">
                <command command="first"/>
                <command command="" return-value="1"/>
                <command return-value="1"/>
                <command command="second" return-value="2"/>
            </test></r>"#,
        );
        let numbers: Vec<usize> = tests[0].commands.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(tests[0].commands[1].text, "second");
        assert_eq!(tests[0].status, Status::Partial);
    }

    #[test]
    fn test_defaults_for_missing_attributes() {
        let tests = extract(r#"<r><test><command command="uname -a"/></test></r>"#);
        assert_eq!(tests[0].name, "Unknown Test");
        assert_eq!(tests[0].description, "");
        assert_eq!(tests[0].logical_device, "");
        assert_eq!(tests[0].commands[0].return_value, "0");
        assert_eq!(tests[0].commands[0].status, Status::Pass);
    }

    #[test]
    fn test_attributes_are_read() {
        let tests = extract(
            r#"<r><test name="network" description="NIC check" logical-device="eth0"/></r>"#,
        );
        assert_eq!(tests[0].name, "network");
        assert_eq!(tests[0].description, "NIC check");
        assert_eq!(tests[0].logical_device, "eth0");
    }

    #[test]
    fn test_deeply_nested_tests_and_commands() {
        let tests = extract(
            r#"<certification-test><certification><run><group>
                <test name="deep"><output><block>
                    <command command="lspci" return-value="0"/>
                </block></output></test>
            </group></run></certification></certification-test>"#,
        );
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].commands[0].text, "lspci");
    }

    #[test]
    fn test_root_is_not_a_test() {
        let tests = extract(r#"<test name="root"><test name="child"/></test>"#);
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].name, "child");
    }

    #[test]
    fn test_nested_test_commands_counted_for_outer() {
        let tests = extract(
            r#"<r><test name="outer">
                <command command="a" return-value="0"/>
                <test name="inner"><command command="b" return-value="1"/></test>
            </test></r>"#,
        );
        assert_eq!(tests.len(), 2);
        assert_eq!(tests[0].name, "outer");
        assert_eq!(tests[0].total_commands(), 2);
        assert_eq!(tests[0].status, Status::Partial);
        assert_eq!(tests[1].name, "inner");
        assert_eq!(tests[1].status, Status::Fail);
    }

    #[test]
    fn test_duplicate_names_kept() {
        let tests = extract(
            r#"<r>
                <test name="dup"><command command="x" return-value="0"/></test>
                <test name="dup"><command command="x" return-value="1"/></test>
            </r>"#,
        );
        assert_eq!(tests.len(), 2);
        assert_eq!(tests[0].status, Status::Pass);
        assert_eq!(tests[1].status, Status::Fail);
    }

    #[test]
    fn test_occurrence_counts_identical_text() {
        let tests = extract(
            r#"<r>
                <test name="a"><command command="dmesg"/><command command="uptime"/></test>
                <test name="b"><command command="dmesg"/></test>
            </r>"#,
        );
        assert_eq!(tests[0].commands[0].occurrence, 0);
        assert_eq!(tests[0].commands[1].occurrence, 0);
        assert_eq!(tests[1].commands[0].occurrence, 1);
    }

    #[test]
    fn test_multiline_command_text_uses_xml_whitespace() {
        let tests = extract(
            "<r><test name=\"a\"><command command=\"grep -c\n\tprocessor /proc/cpuinfo\"/></test>\
             <test name=\"b\"><command command=\"grep -c  processor /proc/cpuinfo\"/></test></r>",
        );
        assert_eq!(tests[0].commands[0].text, "grep -c  processor /proc/cpuinfo");
        assert_eq!(tests[1].commands[0].occurrence, 1);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let source = r#"<r><test name="a"><command command="ls" return-value="3"/></test></r>"#;
        let doc = XmlParser::new().parse(source).unwrap();
        let parser = ReportFileParser::new();
        let first = parser.extract_tests(doc.root_element());
        let second = parser.extract_tests(doc.root_element());
        assert_eq!(first, second);
    }
}
