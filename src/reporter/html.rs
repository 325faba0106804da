//! HTML reporter: generates the viewer page
//!
//! The page holds the navigation sidebar built from the index, links the
//! generated stylesheet and script, and inlines the source XML verbatim so
//! the script can highlight command elements in place.

use crate::navigation::{NavCommand, NavEntry};
use crate::config::{DEFAULT_PREVIEW_LENGTH, DEFAULT_TITLE};
use crate::{DocumentAttributes, Status};

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reporter that generates the viewer HTML page
pub struct HtmlReporter {
    title: String,
    preview_length: usize,
    generated_at: Option<String>,
}

impl HtmlReporter {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
            generated_at: None,
        }
    }

    /// Set the page title
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set how many characters of command text the sidebar shows
    pub fn with_preview_length(mut self, length: usize) -> Self {
        self.preview_length = length;
        self
    }

    /// Fix the generation timestamp (defaults to now)
    pub fn with_generated_at(mut self, timestamp: &str) -> Self {
        self.generated_at = Some(timestamp.to_string());
        self
    }

    /// Generate the full HTML page
    pub fn report(
        &self,
        index: &[NavEntry],
        attributes: &DocumentAttributes,
        xml_content: &str,
        css_filename: &str,
        js_filename: &str,
    ) -> String {
        let sidebar = self.sidebar(index, attributes);

        let mut html = String::with_capacity(xml_content.len() + sidebar.len() + 2048);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str("    <meta name=\"generator\" content=\"rhcert-viewer\">\n");
        html.push_str(&format!("    <title>{}</title>\n", escape_html(&self.title)));
        html.push_str(&format!(
            "    <link rel=\"stylesheet\" href=\"{}\">\n",
            escape_html(css_filename)
        ));
        html.push_str("</head>\n<body>\n");
        html.push_str("    <!-- Navigation Sidebar -->\n");
        html.push_str("    <div class=\"nav-sidebar\" id=\"sidebar\">\n");
        html.push_str("        <div class=\"sidebar-resizer\" id=\"resizer\"></div>\n");
        html.push_str(&sidebar);
        html.push_str("    </div>\n\n");
        html.push_str("    <!-- Sidebar Toggle Button -->\n");
        html.push_str(
            "    <button class=\"sidebar-toggle\" id=\"toggleBtn\" data-action=\"toggle-sidebar\">◀</button>\n\n",
        );
        html.push_str("    <!-- Main Content -->\n");
        html.push_str("    <div class=\"main-content\">\n");
        html.push_str(xml_content);
        html.push_str("\n    </div>\n\n");
        html.push_str(&format!(
            "    <script src=\"{}\"></script>\n",
            escape_html(js_filename)
        ));
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Generate the sidebar markup
    pub fn sidebar(&self, index: &[NavEntry], attributes: &DocumentAttributes) -> String {
        let mut out = String::with_capacity(1024 + index.len() * 512);
        out.push_str("        <div class=\"nav-header\">\n");
        out.push_str("            <div class=\"nav-title\">Test Navigator</div>\n");
        if !attributes.is_empty() {
            out.push_str(&format!(
                "            <div class=\"nav-meta\">rhcert {} {} · {}</div>\n",
                escape_html(&attributes.rhcert_version),
                escape_html(&attributes.rhcert_release),
                escape_html(&attributes.plan_time)
            ));
        }
        out.push_str("            <div class=\"nav-controls\">\n");
        out.push_str(
            "                <button class=\"nav-btn\" data-action=\"jump-top\">Top</button>\n",
        );
        out.push_str(
            "                <button class=\"nav-btn\" id=\"failedToggle\" data-action=\"toggle-failed\">Show Failures</button>\n",
        );
        out.push_str(
            "                <input type=\"text\" class=\"nav-search\" placeholder=\"Search tests/commands...\">\n",
        );
        out.push_str("            </div>\n        </div>\n\n");
        out.push_str("        <div class=\"nav-content\">\n");

        for entry in index {
            self.push_entry(&mut out, entry);
        }

        out.push_str("        </div>\n");
        out.push_str(&format!(
            "        <div class=\"nav-footer\">Generated {}</div>\n",
            escape_html(&self.timestamp())
        ));
        out
    }

    fn push_entry(&self, out: &mut String, entry: &NavEntry) {
        let id = escape_html(&entry.id);
        out.push_str("            <div class=\"test-item\">\n");
        out.push_str(&format!(
            "                <div class=\"test-header {}\" data-action=\"toggle-test\" data-test=\"{}\">\n",
            entry.status.css_class(),
            id
        ));
        out.push_str("                    <div class=\"test-info\">\n");
        out.push_str(&format!(
            "                        <div class=\"test-name\">{}</div>\n",
            escape_html(&entry.name)
        ));
        out.push_str(&format!(
            "                        <div class=\"test-stats\">✓ {}/{} commands</div>\n",
            entry.passed_commands, entry.total_commands
        ));
        out.push_str("                    </div>\n");
        out.push_str("                    <span class=\"test-toggle\">▼</span>\n");
        out.push_str("                </div>\n");
        out.push_str(&format!(
            "                <div class=\"command-list\" id=\"nav_{}\">\n",
            id
        ));
        for cmd in &entry.commands {
            self.push_command(out, &id, cmd);
        }
        out.push_str("                </div>\n            </div>\n");
    }

    fn push_command(&self, out: &mut String, test_id: &str, cmd: &NavCommand) {
        let (icon, class) = match cmd.status {
            Status::Pass => ("✓", "cmd-success"),
            _ => ("✗", "cmd-error"),
        };
        out.push_str(&format!(
            "                    <div class=\"command-item\" data-action=\"jump-command\" data-test=\"{}\" data-command=\"{}\" data-occurrence=\"{}\" data-status=\"{}\">\n",
            test_id,
            escape_html(&cmd.text),
            cmd.occurrence,
            cmd.status
        ));
        out.push_str(&format!(
            "                        <span class=\"cmd-number\">#{}</span>\n",
            cmd.number
        ));
        out.push_str(&format!(
            "                        <span class=\"cmd-status {}\">{}</span>\n",
            class, icon
        ));
        out.push_str(&format!(
            "                        <span class=\"cmd-text\" title=\"{}\">{}</span>\n",
            escape_html(&cmd.text),
            escape_html(&cmd.preview(self.preview_length))
        ));
        out.push_str("                    </div>\n");
    }

    fn timestamp(&self) -> String {
        self.generated_at
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string())
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}
