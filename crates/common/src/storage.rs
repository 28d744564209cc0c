//! Object storage abstraction for uploaded images.
//!
//! Files are grouped into named buckets (one per content type). The bucket
//! name is always the first segment of a storage key, which is what lets a
//! public URL be mapped back to its key when a file is removed.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::{AppError, AppResult};

/// Uploaded file metadata.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Storage key, starting with the bucket name.
    pub key: String,
    /// Public URL to access the file.
    pub url: String,
    /// File size in bytes.
    pub size: u64,
}

/// Storage backend trait.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Upload a file.
    async fn upload(&self, key: &str, data: &[u8], content_type: &str)
    -> AppResult<UploadedFile>;

    /// Delete a file.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Get the public URL for a key.
    fn public_url(&self, key: &str) -> String;
}

/// Shared handle to the configured storage backend.
pub type StorageService = Arc<dyn StorageBackend>;

/// Local filesystem storage backend.
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self {
            base_path,
            base_url,
        }
    }

    /// Resolve `key` under the base path.
    ///
    /// Only plain relative keys are accepted, so a key can never name a file
    /// outside the storage root.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let relative = Path::new(key);
        let plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if key.is_empty() || !plain {
            return Err(AppError::BadRequest(format!("Invalid storage key: {key}")));
        }
        Ok(self.base_path.join(relative))
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalStorage {
    async fn upload(
        &self,
        key: &str,
        data: &[u8],
        _content_type: &str,
    ) -> AppResult<UploadedFile> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create directory: {e}")))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write file: {e}")))?;

        Ok(UploadedFile {
            key: key.to_string(),
            url: self.public_url(key),
            size: data.len() as u64,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        if path.exists() {
            tokio::fs::remove_file(&path)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to delete file: {e}")))?;
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

/// Generate a unique storage key for a file inside `bucket`.
#[must_use]
pub fn generate_storage_key(bucket: &str, original_name: &str) -> String {
    use chrono::Utc;

    let now = Utc::now();
    let date_path = now.format("%Y/%m/%d").to_string();
    let timestamp = now.timestamp_millis();

    let extension = original_name
        .rfind('.')
        .filter(|&pos| pos > 0 && pos < original_name.len() - 1)
        .map(|pos| &original_name[pos + 1..])
        .filter(|ext| ext.len() <= 10 && ext.chars().all(char::is_alphanumeric))
        .map_or_else(|| "bin".to_string(), str::to_lowercase);

    format!(
        "{}/{}/{}_{}.{}",
        bucket,
        date_path,
        timestamp,
        uuid::Uuid::new_v4().simple(),
        extension
    )
}

/// Recover the storage key of a public URL.
///
/// The key starts at the path segment equal to `bucket`. Returns `None` when
/// the bucket does not appear as a segment, nothing follows it, or a segment
/// after it is empty, `.` or `..`.
#[must_use]
pub fn key_from_public_url(public_url: &str, bucket: &str) -> Option<String> {
    let path = match url::Url::parse(public_url) {
        Ok(parsed) => parsed.path().to_string(),
        // Relative URLs such as "/files/service-icons/..." from local storage
        Err(_) => public_url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let segments: Vec<&str> = path.split('/').collect();
    let start = segments.iter().position(|s| *s == bucket)?;
    let rest = &segments[start + 1..];
    if rest.is_empty() || rest.iter().any(|s| matches!(*s, "" | "." | "..")) {
        return None;
    }

    Some(segments[start..].join("/"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_storage_key() {
        let key = generate_storage_key("service-icons", "Logo.PNG");
        assert!(key.starts_with("service-icons/"));
        assert!(key.ends_with(".png"));
        assert_eq!(key.split('/').count(), 5);
    }

    #[test]
    fn test_generate_storage_key_no_extension() {
        let key = generate_storage_key("team-avatars", "file");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn test_key_from_absolute_url() {
        let key = key_from_public_url(
            "https://cdn.example.com/storage/v1/object/public/team-avatars/2025/01/02/a.png",
            "team-avatars",
        );
        assert_eq!(key.as_deref(), Some("team-avatars/2025/01/02/a.png"));
    }

    #[test]
    fn test_key_from_relative_url() {
        let key = key_from_public_url("/files/service-icons/2025/01/02/x.webp?v=2", "service-icons");
        assert_eq!(key.as_deref(), Some("service-icons/2025/01/02/x.webp"));
    }

    #[test]
    fn test_key_requires_bucket_segment() {
        assert!(key_from_public_url("/files/other/x.png", "service-icons").is_none());
        assert!(key_from_public_url("/files/service-icons-old/x.png", "service-icons").is_none());
        assert!(key_from_public_url("/files/service-icons", "service-icons").is_none());
    }

    #[tokio::test]
    async fn test_local_storage_roundtrip() {
        let dir = std::env::temp_dir().join(format!("sitecms-test-{}", uuid::Uuid::new_v4()));
        let storage = LocalStorage::new(dir.clone(), "/files/".to_string());

        let uploaded = storage
            .upload("service-icons/a.png", b"png-bytes", "image/png")
            .await
            .unwrap();
        assert_eq!(uploaded.url, "/files/service-icons/a.png");
        assert_eq!(uploaded.size, 9);
        let path = dir.join("service-icons/a.png");
        assert!(tokio::fs::try_exists(&path).await.unwrap());

        storage.delete("service-icons/a.png").await.unwrap();
        assert!(!tokio::fs::try_exists(&path).await.unwrap());

        let _ = tokio::fs::remove_dir_all(dir).await;
    }

    #[test]
    fn test_key_rejects_dot_segments() {
        assert!(key_from_public_url("/files/service-icons/../../victim.txt", "service-icons").is_none());
        assert!(key_from_public_url("/files/service-icons/./a.png", "service-icons").is_none());
        assert!(key_from_public_url("/files/service-icons//a.png", "service-icons").is_none());
        assert!(
            key_from_public_url("https://cdn.example.com/service-icons/%2E%2E/a.png", "service-icons")
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_local_storage_stays_inside_root() {
        let dir = std::env::temp_dir().join(format!("sitecms-test-{}", uuid::Uuid::new_v4()));
        let root = dir.join("files");
        let victim = dir.join("victim.txt");
        tokio::fs::create_dir_all(&root).await.unwrap();
        tokio::fs::write(&victim, b"keep me").await.unwrap();

        let storage = LocalStorage::new(root.clone(), "/files".to_string());

        let err = storage
            .delete("service-icons/../../victim.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(tokio::fs::try_exists(&victim).await.unwrap());

        let err = storage
            .upload("../victim.txt", b"overwrite", "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(tokio::fs::read(&victim).await.unwrap(), b"keep me");

        assert!(storage.delete("/etc/hosts").await.is_err());

        let _ = tokio::fs::remove_dir_all(dir).await;
    }
}
