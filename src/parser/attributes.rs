//! Top-level document attributes (rhcert version, release, plan time)

use super::xml::{read_report, XmlParser};
use crate::DocumentAttributes;
use roxmltree::Node;
use std::path::Path;

impl DocumentAttributes {
    /// Read the attributes from an already parsed root element
    pub fn from_root(root: Node<'_, '_>) -> Self {
        let read = |name: &str| root.attribute(name).unwrap_or("").to_string();
        Self {
            rhcert_version: read("rhcert-version"),
            rhcert_release: read("rhcert-release"),
            plan_time: read("plan-time"),
        }
    }
}

/// Read the document attributes of the report at `path`.
///
/// Any read or parse failure degrades to the all-empty record; the cause is
/// logged rather than returned.
pub fn read_document_attributes(path: &Path) -> DocumentAttributes {
    let source = match read_report(path) {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Error extracting XML attributes");
            return DocumentAttributes::default();
        }
    };
    match XmlParser::new().parse(&source) {
        Ok(doc) => DocumentAttributes::from_root(doc.root_element()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Error extracting XML attributes");
            DocumentAttributes::default()
        }
    }
}
