//! Stylesheet for the generated viewer
//!
//! Styles the certification XML elements in place (the raw document is
//! inlined into the page) plus the navigation sidebar chrome.

/// Reporter that emits the viewer stylesheet
pub struct StylesheetReporter;

impl StylesheetReporter {
    pub fn new() -> Self {
        Self
    }

    /// Full stylesheet content
    pub fn report(&self) -> String {
        let mut css = String::with_capacity(DOCUMENT_CSS.len() + SIDEBAR_CSS.len() + 1);
        css.push_str(DOCUMENT_CSS);
        css.push('\n');
        css.push_str(SIDEBAR_CSS);
        css
    }
}

impl Default for StylesheetReporter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Certification document elements ────────────────────────────────────

const DOCUMENT_CSS: &str = r#"/* Red Hat Certification Viewer Styles */
@import url('https://fonts.googleapis.com/css2?family=Red+Hat+Mono:wght@300;400;500;600&display=swap');

* {
  font-family: 'Red Hat Mono', monospace, mono;
  font-size: 12px;
  padding: 3px;
}

certification-test::before {
  display: block;
  content: 'Certification Test Results,  rhcert ' attr(rhcert-version) ' '
    attr(rhcert-release) '   ' attr(plan-time);
  font-weight: 700;
  width: 100%;
  height: 40px;
  border-bottom: 2px solid gray;
}

certification-test {
  display: block;
  border: 1px solid black;
  padding: 10px;
  margin: 10px;
  margin-left: 330px;
  transition: margin-left 0.3s ease;
}

certification::before {
  display: block;
  content: 'Certification: ' attr(type) '  ID: ' attr(id);
}

certification {
  display: block;
  border: 1px solid gray;
}

hardware {
  display: grid;
  grid-template-rows: 2fr;
  width: fit-content;
  text-align: center;
}

hardware vendor::before { content: 'Host: '; }
hardware vendor { grid-row: 1; order: 1; }
hardware make { grid-row: 1; order: 2; }
hardware model { grid-row: 1; order: 3; }
hardware arch { grid-row: 1; order: 4; }
hardware test-server { display: none; }

hardware os,
os {
  grid-row: 2;
  grid-column: 1 / 5;
  display: flex;
  justify-content: flex-start;
  align-items: center;
}

os hostname::before { content: 'Host Name: '; font-weight: 700; }
os product::before { content: ' | OS: '; font-weight: 700; }
os platform::before { content: ' | Platform: '; font-weight: 700; }
os variant::before { content: ' | Variant: '; font-weight: 700; }
os build::before { content: ' | Build: '; font-weight: 700; }
os name { display: none; }
certification os { display: none; }

certification host-role::before {
  display: block;
  content: 'Host Role: ' attr(name);
}

device-class::before {
  display: block;
  font-size: 16px;
  content: ' class: ' attr(name);
  font-weight: 700;
  border-bottom: 1px solid black;
  width: 100%;
  background-color: #cccccc;
}

device-class {
  display: block;
  margin: 12px;
}

test::before {
  display: block;
  content: ' test: ' attr(name) '  ' attr(logical-device) '  ' attr(description);
  font-weight: 700;
  border-bottom: 1px solid black;
  width: 750px;
}

test {
  display: block;
  margin: 12px;
}

run::before {
  display: block;
  content: 'run ' attr(number) ': ' attr(run-time);
  font-weight: 700;
  margin: 12px 6px;
}

test parameters property::before {
  display: inline-block;
  content: attr(name) ': ';
  font-weight: 700;
}

test parameters property { display: block; }

summary {
  display: block;
  font-weight: 700;
  font-size: 0px;
}

summary:after {
  display: block;
  color: blue;
  font-weight: 700;
  font-size: 10px;
  content: attr(data-value);
}

summary[data-value='FAIL']:after { color: red; }
summary[data-value='WARN']:after { color: darkorange; }
summary[data-value='REVIEW']:after { color: blueviolet; }
summary[data-value='PASS']:after { color: green; }

message {
  display: block;
  font-weight: 700;
  font-size: 10px;
}

message[level='FAIL'] { color: red; }
message[level='WARN'] { color: darkorange; }
message[level='REVIEW'] { color: blueviolet; }
message[level='PASS'] { color: green; }

output::before {
  display: table;
  content: attr(name) ':  ' attr(description);
  font-weight: 700;
}

output {
  display: table;
  width: 760px;
  white-space: pre;
  font-size: 10px;
  background-color: #eee;
  border: 1px solid gray;
  margin: 10px;
}

command::before {
  display: table;
  content: attr(command);
  font-size: 10px;
  font-weight: 500;
}

command:after {
  display: table;
  content: 'returned: ' attr(return-value);
  font-size: 10px;
  font-weight: 500;
}

stdout,
stderr {
  display: table;
  width: 720px;
  white-space: pre;
  font-size: 10px;
  border: 1px solid gray;
  margin: 10px;
}

stdout { background-color: #b6ff6e; }
stderr { background-color: #ffb6b6; }

command.highlight {
  display: block;
  outline: 3px solid #f9ca24;
  background: #fff8d6 !important;
  animation: commandHighlight 2.5s ease-in-out;
}

@keyframes commandHighlight {
  0% { outline-color: #ff6b6b; }
  50% { outline-color: #45b7d1; }
  100% { outline-color: #f9ca24; }
}
"#;

// ─── Navigation sidebar ──────────────────────────────────────────────────

const SIDEBAR_CSS: &str = r#"/* Navigation Sidebar */
.nav-sidebar {
  position: fixed;
  left: 0;
  top: 0;
  width: 320px;
  height: 100vh;
  background: #f8f9fa;
  border-right: 2px solid #cc0000;
  overflow-y: auto;
  z-index: 1000;
  font-size: 11px;
  transition: width 0.3s ease, transform 0.3s ease;
  min-width: 200px;
  max-width: 600px;
}

.nav-sidebar.collapsed { transform: translateX(-100%); }

.sidebar-resizer {
  position: absolute;
  top: 0;
  right: 0;
  width: 8px;
  height: 100%;
  background: #cc0000;
  cursor: col-resize;
  opacity: 0.8;
  z-index: 1002;
}

.sidebar-resizer:hover,
.sidebar-resizer.dragging { opacity: 1; background: #990000; width: 12px; }

.sidebar-toggle {
  position: fixed;
  top: 10px;
  left: 320px;
  z-index: 1003;
  background: #cc0000;
  color: white;
  border: none;
  border-radius: 0 4px 4px 0;
  cursor: pointer;
  transition: left 0.3s ease;
}

.sidebar-toggle.collapsed { left: 0; }

.nav-header {
  background: #cc0000;
  color: white;
  padding: 12px;
  position: sticky;
  top: 0;
  z-index: 1001;
  border-bottom: 2px solid #990000;
}

.nav-title { font-weight: 600; margin-bottom: 4px; font-size: 14px; }
.nav-meta { font-size: 9px; opacity: 0.85; margin-bottom: 8px; }
.nav-controls { display: flex; gap: 4px; flex-wrap: wrap; }

.nav-btn {
  background: rgba(255, 255, 255, 0.2);
  color: white;
  border: 1px solid rgba(255, 255, 255, 0.3);
  padding: 4px 8px;
  border-radius: 3px;
  cursor: pointer;
  font-size: 9px;
}

.nav-btn:hover { background: rgba(255, 255, 255, 0.3); }

.nav-search {
  width: 100%;
  padding: 6px;
  border: 1px solid rgba(255, 255, 255, 0.3);
  border-radius: 3px;
  margin-top: 8px;
  background: rgba(255, 255, 255, 0.1);
  color: white;
  font-size: 10px;
}

.nav-search::placeholder { color: rgba(255, 255, 255, 0.7); }
.nav-content { padding: 10px; }
.nav-footer { font-size: 8px; color: #6c757d; padding: 0 10px 10px; }

.test-item {
  margin-bottom: 8px;
  border: 1px solid #dee2e6;
  border-radius: 4px;
  background: white;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
}

.test-header {
  padding: 8px;
  cursor: pointer;
  font-weight: 500;
  display: flex;
  justify-content: space-between;
  align-items: center;
  font-size: 10px;
}

.test-header:hover { opacity: 0.8; }
.test-header.status-pass { background: #d4edda; color: #155724; border-left: 3px solid #28a745; }
.test-header.status-fail { background: #f8d7da; color: #721c24; border-left: 3px solid #dc3545; }
.test-header.status-partial { background: #fff3cd; color: #856404; border-left: 3px solid #ffc107; }
.test-header.status-unknown { background: #e2e3e5; color: #383d41; border-left: 3px solid #6c757d; }

.test-info { display: flex; flex-direction: column; flex: 1; }
.test-name { font-size: 10px; font-weight: 600; }
.test-stats { font-size: 8px; opacity: 0.8; margin-top: 2px; }
.test-toggle { font-size: 10px; color: #6c757d; }

.command-list {
  display: none;
  max-height: 200px;
  overflow-y: auto;
  background: #f8f9fa;
}

.command-list.expanded { display: block; }

.command-item {
  padding: 4px 8px;
  border-top: 1px solid #e9ecef;
  cursor: pointer;
  display: flex;
  align-items: center;
  gap: 6px;
  font-size: 9px;
}

.command-item:hover { background: #e9ecef; }
.command-item.clicked { background: #007bff; color: white; }

.cmd-number { font-weight: 600; font-size: 8px; color: #6c757d; min-width: 18px; }
.cmd-status { font-size: 9px; font-weight: 600; min-width: 12px; }
.cmd-success { color: #28a745; }
.cmd-error { color: #dc3545; }

.cmd-text {
  flex: 1;
  font-size: 8px;
  overflow: hidden;
  text-overflow: ellipsis;
  white-space: nowrap;
}

.no-select { user-select: none; }
"#;
