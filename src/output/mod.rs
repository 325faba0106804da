//! Artifact naming, writing and cleanup
//!
//! Every generated file name ends in one of the suffixes below, which is also
//! what cleanup matches on. Writes go to a temporary file in the destination
//! directory first and are renamed into place, so a reader never sees a
//! half-written artifact.

mod package;

pub use package::package_zip;

use crate::ViewerError;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::NamedTempFile;

pub const VIEWER_SUFFIX: &str = "-viewer.html";
pub const STYLES_SUFFIX: &str = "-styles.css";
pub const SCRIPT_SUFFIX: &str = "-script.js";
pub const PACKAGE_SUFFIX: &str = "-viewer.zip";
pub const INDEX_SUFFIX: &str = "-index.json";

/// Glob patterns matching every generated artifact
pub const GENERATED_PATTERNS: &[&str] = &[
    "*-viewer.html",
    "*-styles.css",
    "*-script.js",
    "*-viewer.zip",
    "*-index.json",
];

const SCOPE_HASH_LEN: usize = 12;

/// File names of the artifacts generated for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub base: String,
    pub html: String,
    pub css: String,
    pub js: String,
    pub package: String,
    pub index_json: String,
}

impl ArtifactNames {
    /// Names derived from an already sanitized base name
    pub fn for_base(base: &str) -> Self {
        Self {
            base: base.to_string(),
            html: format!("{}{}", base, VIEWER_SUFFIX),
            css: format!("{}{}", base, STYLES_SUFFIX),
            js: format!("{}{}", base, SCRIPT_SUFFIX),
            package: format!("{}{}", base, PACKAGE_SUFFIX),
            index_json: format!("{}{}", base, INDEX_SUFFIX),
        }
    }

    /// Names derived from the input document's file stem
    pub fn for_input(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::for_base(&sanitize_base_name(&stem))
    }

    /// Names for a batch of documents, one per path in the same order.
    ///
    /// Documents whose stems clash (ignoring ASCII case, as on case-insensitive
    /// file systems) get `-2`, `-3`, ... appended in path order; the first keeps
    /// its plain name and no suffix takes a name another document owns.
    pub fn for_batch(paths: &[PathBuf]) -> Vec<Self> {
        let bases: Vec<String> = paths.iter().map(|p| Self::for_input(p).base).collect();
        let owned: HashSet<String> = bases.iter().map(|b| b.to_ascii_lowercase()).collect();
        let mut assigned: HashSet<String> = HashSet::new();

        bases
            .iter()
            .map(|base| {
                let mut candidate = base.clone();
                let mut n = 2;
                while assigned.contains(&candidate.to_ascii_lowercase())
                    || (candidate != *base && owned.contains(&candidate.to_ascii_lowercase()))
                {
                    candidate = format!("{}-{}", base, n);
                    n += 1;
                }
                assigned.insert(candidate.to_ascii_lowercase());
                Self::for_base(&candidate)
            })
            .collect()
    }

    /// The three files that make up a viewer
    pub fn viewer_files(&self) -> [&str; 3] {
        [&self.html, &self.css, &self.js]
    }
}

fn unsafe_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_.-]+").expect("valid regex"))
}

/// Reduce a file name to `[A-Za-z0-9_.-]`, usable as an artifact base name.
///
/// Runs of other characters become a single `_`; leading dots and
/// underscores are stripped; an empty result becomes `report`.
pub fn sanitize_base_name(name: &str) -> String {
    let replaced = unsafe_chars().replace_all(name.trim(), "_");
    let trimmed = replaced.trim_start_matches(['.', '_']).trim_end_matches('_');
    if trimmed.is_empty() {
        "report".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Write `contents` to `path` via a temporary file in the same directory
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ViewerError> {
    let write_err = |source| ViewerError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Delete previously generated artifacts in `dir`. Returns how many were removed.
///
/// Files that cannot be removed are skipped.
pub fn cleanup_generated(dir: &Path) -> usize {
    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let mut removed = 0;
    for pattern in GENERATED_PATTERNS {
        let full = format!("{}/{}", escaped_dir, pattern);
        let Ok(paths) = glob::glob(&full) else {
            continue;
        };
        for path in paths.flatten() {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove generated file");
                }
            }
        }
    }
    removed
}

/// Per-document subdirectory of `dir`, named after the content hash.
///
/// Concurrent generations of different documents never share a directory.
pub fn scoped_output_dir(dir: &Path, content: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hex::encode(hasher.finalize());
    dir.join(&digest[..SCOPE_HASH_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_batch_names_distinct_for_same_stem() {
        let paths = vec![
            PathBuf::from("x/lab.xml"),
            PathBuf::from("y/lab.xml"),
            PathBuf::from("z/lab-2.xml"),
            PathBuf::from("w/other.xml"),
        ];
        let bases: Vec<String> = ArtifactNames::for_batch(&paths)
            .into_iter()
            .map(|n| n.base)
            .collect();
        assert_eq!(bases, vec!["lab", "lab-3", "lab-2", "other"]);
    }

    #[test]
    fn test_batch_names_case_insensitive() {
        let paths = vec![PathBuf::from("a/Lab.xml"), PathBuf::from("b/lab.xml")];
        let names = ArtifactNames::for_batch(&paths);
        assert_eq!(names[0].html, "Lab-viewer.html");
        assert_eq!(names[1].html, "lab-2-viewer.html");
    }

    #[test]
    fn test_batch_names_unique_stems_unchanged() {
        let paths = vec![PathBuf::from("first.xml"), PathBuf::from("nested/second.xml")];
        let names = ArtifactNames::for_batch(&paths);
        assert_eq!(names[0], ArtifactNames::for_input(&paths[0]));
        assert_eq!(names[1], ArtifactNames::for_input(&paths[1]));
    }

    #[test]
    fn test_artifact_names() {
        let names = ArtifactNames::for_base("lab1");
        assert_eq!(names.html, "lab1-viewer.html");
        assert_eq!(names.css, "lab1-styles.css");
        assert_eq!(names.js, "lab1-script.js");
        assert_eq!(names.package, "lab1-viewer.zip");
        assert_eq!(names.index_json, "lab1-index.json");
    }

    #[test]
    fn test_names_for_input() {
        let names = ArtifactNames::for_input(Path::new("/tmp/uploads/my report (1).xml"));
        assert_eq!(names.base, "my_report_1");
    }

    #[test]
    fn test_sanitize_base_name() {
        assert_eq!(sanitize_base_name("results-2024.01"), "results-2024.01");
        assert_eq!(sanitize_base_name("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_base_name("  "), "report");
        assert_eq!(sanitize_base_name("çà"), "report");
        assert_eq!(sanitize_base_name(".hidden"), "hidden");
    }

    #[test]
    fn test_write_atomic_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("a-viewer.html");
        write_atomic(&path, b"<html></html>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
        write_atomic(&path, b"replaced").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "replaced");
    }

    #[test]
    fn test_cleanup_generated_only_touches_artifacts() {
        let dir = TempDir::new().unwrap();
        for name in ["a-viewer.html", "a-styles.css", "a-script.js", "b-viewer.zip", "keep.xml"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        assert_eq!(cleanup_generated(dir.path()), 4);
        assert!(dir.path().join("keep.xml").exists());
        assert!(!dir.path().join("a-viewer.html").exists());
        assert_eq!(cleanup_generated(dir.path()), 0);
    }

    #[test]
    fn test_scoped_output_dir() {
        let base = Path::new("out");
        let a = scoped_output_dir(base, "<a/>");
        let b = scoped_output_dir(base, "<b/>");
        assert_ne!(a, b);
        assert_eq!(a, scoped_output_dir(base, "<a/>"));
        assert_eq!(a.file_name().unwrap().len(), 12);
        assert!(a.starts_with("out"));
    }
}
