use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

/// A file written to local disk for the duration of one request.
///
/// The file is removed when the guard drops, so every exit path of a handler
/// (success, backend error, network error) leaves the scratch directory clean.
#[derive(Debug)]
pub struct TransientUpload {
    path: PathBuf,
    file_name: String,
}

impl TransientUpload {
    /// Write an uploaded file under `dir` with a unique name, keeping the
    /// extension of the client-supplied file name.
    pub async fn write(dir: &Path, file_name: String, bytes: &[u8]) -> io::Result<Self> {
        let ext = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let path = dir.join(format!("{}{ext}", Uuid::new_v4()));

        tokio::fs::write(&path, bytes).await?;
        debug!("Stored transient upload at {}", path.display());

        Ok(Self { path, file_name })
    }

    /// Read the stored bytes back for the outbound request.
    pub async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }

    /// The file name the client supplied, forwarded to the backend.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransientUpload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Failed to remove transient upload {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_read_and_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let stored_path;

        {
            let upload = TransientUpload::write(dir.path(), "leaf.jpg".to_string(), b"pixels")
                .await
                .unwrap();
            stored_path = upload.path().to_path_buf();

            assert!(stored_path.exists());
            assert_eq!(upload.read().await.unwrap(), b"pixels");
            assert_eq!(upload.file_name(), "leaf.jpg");
            assert_eq!(stored_path.extension().unwrap(), "jpg");
        }

        // Dropping the guard deletes the file
        assert!(!stored_path.exists());
    }

    #[tokio::test]
    async fn test_unique_names_for_identical_uploads() {
        let dir = tempfile::tempdir().unwrap();

        let a = TransientUpload::write(dir.path(), "leaf.jpg".to_string(), b"pixels")
            .await
            .unwrap();
        let b = TransientUpload::write(dir.path(), "leaf.jpg".to_string(), b"pixels")
            .await
            .unwrap();

        assert_ne!(a.path(), b.path());
    }

    #[tokio::test]
    async fn test_file_name_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let upload = TransientUpload::write(dir.path(), "photo".to_string(), b"pixels")
            .await
            .unwrap();
        assert!(upload.path().extension().is_none());
    }
}
