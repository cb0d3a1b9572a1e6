//! Fuel card image storage.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::server::error::AppError;

/// Object store for fuel card images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores `bytes` under `name` and returns the reference clients use to fetch it.
    async fn put(&self, name: &str, bytes: &[u8], content_type: &str) -> Result<String, AppError>;

    /// Removes a previously stored object. Missing objects are not an error.
    async fn delete(&self, reference: &str) -> Result<(), AppError>;
}

/// Stores images as files in one directory, served under `base_url`.
pub struct LocalImageStore {
    dir: PathBuf,
    base_url: String,
}

impl LocalImageStore {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Reduces a client-supplied name or a stored reference to a bare file name.
    fn file_name(name: &str) -> Result<String, AppError> {
        Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid image name: {}", name)))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn put(&self, name: &str, bytes: &[u8], content_type: &str) -> Result<String, AppError> {
        let file_name = Self::file_name(name)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        tracing::debug!(
            size = bytes.len(),
            content_type,
            "Stored image {}",
            file_name
        );

        Ok(format!("{}/{}", self.base_url, file_name))
    }

    async fn delete(&self, reference: &str) -> Result<(), AppError> {
        let file_name = Self::file_name(reference)?;

        match tokio::fs::remove_file(self.dir.join(&file_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
