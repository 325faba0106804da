//! Error types for viewer generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the generation pipeline
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Input document does not exist
    #[error("XML file '{}' not found", .0.display())]
    NotFound(PathBuf),

    /// Input document exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input document is not well-formed XML
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// An artifact could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Zip packaging failed
    #[error("Failed to package {}: {source}", path.display())]
    Package {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl ViewerError {
    /// True for failures caused by the input document rather than the output side
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ViewerError::NotFound(_) | ViewerError::Read { .. } | ViewerError::Parse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ViewerError::NotFound(PathBuf::from("missing.xml"));
        assert_eq!(err.to_string(), "XML file 'missing.xml' not found");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_write_is_not_input_error() {
        let err = ViewerError::Write {
            path: PathBuf::from("out/x-viewer.html"),
            source: std::io::Error::other("disk full"),
        };
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("disk full"));
    }
}
