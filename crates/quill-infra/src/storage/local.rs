//! Local-disk object storage for uploaded images.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use quill_core::ports::{ObjectStorage, StorageError};

/// Maps a content type onto the file extension we store under.
/// Only image types are accepted.
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// Stores images under a local directory, one uuid-named file each,
/// and returns `/uploads/<name>` reference paths.
pub struct LocalDiskStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl LocalDiskStorage {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }
}

#[async_trait]
impl ObjectStorage for LocalDiskStorage {
    async fn store_image(&self, content_type: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let ext = extension_for(content_type)
            .ok_or_else(|| StorageError::UnsupportedType(content_type.to_string()))?;

        if bytes.len() > self.max_bytes {
            return Err(StorageError::TooLarge {
                size: bytes.len(),
                max: self.max_bytes,
            });
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        let filename = format!("image-{}.{}", Uuid::new_v4(), ext);
        let path = self.root.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        tracing::debug!(file = %path.display(), size = bytes.len(), "Stored uploaded image");

        Ok(format!("/uploads/{filename}"))
    }
}
