//! Download trigger: hand an export document to the user as a saved file.
//!
//! On the command line "offering a download" means writing the document
//! into the export directory under exactly the name the exporter chose.

use std::path::{Path, PathBuf};

use portal_core::export::ExportDocument;

/// Errors from saving an export document.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The file name would escape the export directory.
    #[error("Refusing to save to unsafe file name '{0}'")]
    UnsafeName(String),

    #[error("Failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A file name is usable if it is a single, non-empty path component.
fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Write `doc` into `dir` (created if missing) and return the file path.
pub async fn save_export(dir: &Path, doc: &ExportDocument) -> Result<PathBuf, DownloadError> {
    if !is_safe_file_name(&doc.filename) {
        return Err(DownloadError::UnsafeName(doc.filename.clone()));
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| DownloadError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

    let path = dir.join(&doc.filename);
    tokio::fs::write(&path, doc.body.as_bytes())
        .await
        .map_err(|source| DownloadError::Write {
            path: path.clone(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        mime_type = doc.mime_type,
        bytes = doc.body.len(),
        "Export saved",
    );
    Ok(path)
}

/// Fire-and-forget variant of [`save_export`].
///
/// Failures are logged, not returned; the path is `None` when nothing was
/// written.
pub async fn trigger_download(dir: &Path, doc: &ExportDocument) -> Option<PathBuf> {
    match save_export(dir, doc).await {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::error!(filename = %doc.filename, error = %e, "Export download failed");
            None
        }
    }
}
