//! Object storage port for uploaded images.

use async_trait::async_trait;

/// Storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("file of {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: usize, max: usize },

    #[error("storage I/O error: {0}")]
    Io(String),
}

/// Stores uploaded images and hands back a stable reference path.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Persist an image and return its reference path. Rejects anything
    /// that is not jpeg/jpg/png/gif or exceeds the configured size cap.
    async fn store_image(&self, content_type: &str, bytes: &[u8]) -> Result<String, StorageError>;
}
