//! Zip packaging of a generated viewer for download

use super::ArtifactNames;
use crate::ViewerError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// Bundle the viewer files found in `dir` into `<base>-viewer.zip` inside `dir`.
///
/// Missing files are skipped. The archive is built in a temporary file next to
/// the destination and renamed into place once complete. Returns the path of
/// the archive.
pub fn package_zip(dir: &Path, names: &ArtifactNames) -> Result<PathBuf, ViewerError> {
    let zip_path = dir.join(&names.package);
    let io_err = |source| ViewerError::Write {
        path: zip_path.clone(),
        source,
    };
    let zip_err = |source| ViewerError::Package {
        path: zip_path.clone(),
        source,
    };

    let tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    let mut writer = zip::ZipWriter::new(tmp);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for name in names.viewer_files() {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        let contents = fs::read(&path).map_err(|source| ViewerError::Read {
            path: path.clone(),
            source,
        })?;
        writer.start_file(name, options).map_err(zip_err)?;
        writer.write_all(&contents).map_err(io_err)?;
    }

    let tmp = writer.finish().map_err(zip_err)?;
    tmp.persist(&zip_path).map_err(|e| io_err(e.error))?;
    Ok(zip_path)
}
