//! XML document loading using roxmltree

use crate::ViewerError;
use roxmltree::{Document, ParsingOptions};
use std::fs;
use std::path::Path;

/// Parser for certification report documents
pub struct XmlParser {
    /// Whether a DOCTYPE declaration is accepted
    allow_dtd: bool,
}

impl XmlParser {
    /// Create a parser that accepts DOCTYPE declarations
    pub fn new() -> Self {
        Self { allow_dtd: true }
    }

    /// Reject documents carrying a DOCTYPE declaration
    pub fn strict(mut self) -> Self {
        self.allow_dtd = false;
        self
    }

    fn options(&self) -> ParsingOptions {
        ParsingOptions {
            allow_dtd: self.allow_dtd,
            ..ParsingOptions::default()
        }
    }

    /// Parse source text into a document tree
    pub fn parse<'input>(&self, source: &'input str) -> Result<Document<'input>, roxmltree::Error> {
        Document::parse_with_options(source, self.options())
    }

    /// Parse source text read from `path`, attaching the path to errors
    pub fn parse_file<'input>(
        &self,
        path: &Path,
        source: &'input str,
    ) -> Result<Document<'input>, ViewerError> {
        self.parse(source).map_err(|source| ViewerError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for XmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a report document from disk
pub fn read_report(path: &Path) -> Result<String, ViewerError> {
    if !path.exists() {
        return Err(ViewerError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| ViewerError::Read {
        path: path.to_path_buf(),
        source,
    })
}
