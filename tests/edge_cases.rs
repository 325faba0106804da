//! Edge case tests: degenerate inputs must not panic.

use rhcert_viewer::analyzer::{ReportAnalysis, ViewerEngine};
use rhcert_viewer::{Status, ViewerError};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn analyze_text(text: &str) -> Result<ReportAnalysis, ViewerError> {
    let mut file = NamedTempFile::with_suffix(".xml").unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    ViewerEngine::new().analyze(file.path())
}

#[test]
fn empty_file_is_parse_error() {
    let err = analyze_text("").unwrap_err();
    assert!(matches!(err, ViewerError::Parse { .. }));
}

#[test]
fn not_xml_is_parse_error() {
    let err = analyze_text("hello world").unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn root_only_has_no_tests() {
    let r = analyze_text("<certification-test/>").unwrap();
    assert!(r.tests.is_empty());
    assert!(r.index.is_empty());
    assert_eq!(r.summary.total_tests, 0);
}

#[test]
fn root_named_test_is_not_reported() {
    let r = analyze_text(r#"<test name="outer"><command command="ls"/></test>"#).unwrap();
    assert!(r.tests.is_empty());
}

#[test]
fn unknown_summary_value_keeps_raw_text() {
    let r = analyze_text(r#"<r><test><summary data-value="WARN"/></test></r>"#).unwrap();
    assert_eq!(r.tests[0].status, Status::Unknown);
    assert_eq!(r.tests[0].summary.as_deref(), Some("WARN"));
}

#[test]
fn lowercase_summary_value() {
    let r = analyze_text(r#"<r><test><summary data-value="pass"/></test></r>"#).unwrap();
    assert_eq!(r.tests[0].status, Status::Pass);
}

#[test]
fn non_numeric_return_value_fails() {
    let r = analyze_text(
        r#"<r><test><command command="a" return-value="ok"/><command command="b" return-value=" 0"/></test></r>"#,
    )
    .unwrap();
    assert_eq!(r.tests[0].status, Status::Fail);
    assert_eq!(r.summary.passed_commands, 0);
}

#[test]
fn missing_return_value_passes() {
    let r = analyze_text(r#"<r><test><command command="true"/></test></r>"#).unwrap();
    assert_eq!(r.tests[0].commands[0].return_value, "0");
    assert_eq!(r.tests[0].status, Status::Pass);
}

#[test]
fn commands_override_summary() {
    let r = analyze_text(
        r#"<r><test><summary data-value="PASS"/><command command="x" return-value="1"/></test></r>"#,
    )
    .unwrap();
    assert_eq!(r.tests[0].status, Status::Fail);
}

#[test]
fn unicode_command_text() {
    let r = analyze_text(
        r#"<r><test name="ünïcode"><command command="echo 'héllo wörld ✓'"/></test></r>"#,
    )
    .unwrap();
    assert_eq!(r.tests[0].name, "ünïcode");
    assert_eq!(r.index[0].commands[0].preview(8), "echo 'hé...");
}

#[test]
fn html_special_characters_in_names() {
    let r = analyze_text(
        r#"<r><test name="&lt;script&gt;"><command command="a &amp;&amp; b"/></test></r>"#,
    )
    .unwrap();
    assert_eq!(r.tests[0].name, "<script>");
    assert_eq!(r.tests[0].commands[0].text, "a && b");
}

#[test]
fn deeply_nested_commands() {
    let mut xml = String::from("<r><test name=\"deep\">");
    for _ in 0..50 {
        xml.push_str("<g>");
    }
    xml.push_str("<command command=\"ls\" return-value=\"0\"/>");
    for _ in 0..50 {
        xml.push_str("</g>");
    }
    xml.push_str("</test></r>");
    let r = analyze_text(&xml).unwrap();
    assert_eq!(r.tests[0].total_commands(), 1);
}

#[test]
fn many_tests_no_panic() {
    let mut xml = String::from("<r>");
    for i in 0..500 {
        xml.push_str(&format!(
            "<test name=\"t{}\"><command command=\"c{}\" return-value=\"{}\"/></test>",
            i,
            i,
            i % 3
        ));
    }
    xml.push_str("</r>");
    let r = analyze_text(&xml).unwrap();
    assert_eq!(r.summary.total_tests, 500);
    assert_eq!(r.index[499].id, "test_499");
}

#[test]
fn missing_file_not_found() {
    let err = ViewerEngine::new()
        .analyze(Path::new("does/not/exist.xml"))
        .unwrap_err();
    assert!(matches!(err, ViewerError::NotFound(_)));
    assert!(err.to_string().contains("does/not/exist.xml"));
}
