//! Upload receiver.
//!
//! Resolves the file part of an incoming submission to a stored filename
//! under a fixed upload directory.

use std::path::{Path, PathBuf};

use tokio::fs;

use roster_core::error::{Result, RosterError};
use roster_core::submission::FilePart;

/// Infers the MIME type from a filename extension using the `mime_guess`
/// library.
fn infer_mime_type(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .to_string()
}

/// Filesystem-backed upload store.
///
/// Files keep their original client-supplied name, so a second upload with
/// the same name silently overwrites the first file on disk. There is no
/// rollback: a file written here stays on disk even if the record mutation
/// that follows it fails.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Opens the store, creating the upload directory if needed.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await.map_err(|e| {
            RosterError::io(format!(
                "failed to create upload directory '{}': {e}",
                dir.display()
            ))
        })?;
        Ok(Self { dir })
    }

    /// The directory uploads are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the file part's bytes under its original filename and returns
    /// the stored name.
    ///
    /// Path components in the client-supplied name are stripped; only the
    /// final file name is used.
    pub async fn store(&self, part: &FilePart) -> Result<String> {
        let file_name = Path::new(&part.filename)
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                RosterError::io(format!("invalid upload filename '{}'", part.filename))
            })?
            .to_string();

        let dest_path = self.dir.join(&file_name);
        fs::write(&dest_path, &part.bytes).await.map_err(|e| {
            RosterError::io(format!(
                "failed to write upload '{}': {e}",
                dest_path.display()
            ))
        })?;

        tracing::debug!(
            file = %file_name,
            mime = %part
                .content_type
                .clone()
                .unwrap_or_else(|| infer_mime_type(&file_name)),
            size = part.bytes.len(),
            "stored upload"
        );

        Ok(file_name)
    }
}
