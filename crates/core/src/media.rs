//! Image attachments and the storage-backed object store.

use async_trait::async_trait;
use bytes::Bytes;
use sitecms_common::{
    AppError, AppResult, IdGenerator, StorageService, generate_storage_key, key_from_public_url,
};
use thiserror::Error;
use tracing::info;

use crate::gateway::ObjectStore;
use crate::schema::ContentKind;

/// Largest accepted image, in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Why a file was refused as an image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageRejection {
    /// The content type is not `image/*`.
    #[error("{0} is not an image")]
    NotAnImage(String),

    /// Over [`MAX_IMAGE_BYTES`].
    #[error("image is {size} bytes, the limit is {MAX_IMAGE_BYTES}")]
    TooLarge {
        /// Actual size in bytes.
        size: usize,
    },
}

impl From<ImageRejection> for AppError {
    fn from(rejection: ImageRejection) -> Self {
        match rejection {
            ImageRejection::NotAnImage(_) => Self::BadRequest(rejection.to_string()),
            ImageRejection::TooLarge { .. } => Self::PayloadTooLarge(rejection.to_string()),
        }
    }
}

/// Check a file against the image rules: `image/*` content type, at most
/// [`MAX_IMAGE_BYTES`].
pub fn check_image(content_type: &str, size: usize) -> Result<(), ImageRejection> {
    if !content_type.starts_with("image/") {
        return Err(ImageRejection::NotAnImage(content_type.to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ImageRejection::TooLarge { size });
    }
    Ok(())
}

/// Accept only the buckets that back a content type's image field.
pub fn ensure_bucket(bucket: &str) -> AppResult<()> {
    if ContentKind::buckets().any(|b| b == bucket) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Bucket {bucket}")))
    }
}

/// A locally held image waiting to be uploaded at save time.
#[derive(Debug, Clone)]
pub struct PendingImage {
    /// Name the file was attached under.
    pub file_name: String,
    /// MIME type, always `image/*`.
    pub content_type: String,
    /// File contents.
    pub bytes: Bytes,
    /// Temporary handle the form shows in place of the final URL.
    pub preview: String,
}

impl PendingImage {
    /// Accept a file as a pending image.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Result<Self, ImageRejection> {
        let content_type = content_type.into();
        let bytes = bytes.into();
        check_image(&content_type, bytes.len())?;

        Ok(Self {
            file_name: file_name.into(),
            content_type,
            bytes,
            preview: IdGenerator::new().generate_preview_handle(),
        })
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// [`ObjectStore`] over the configured storage backend.
///
/// Buckets map onto the first segment of the storage key, and only the
/// content buckets are accepted.
#[derive(Clone)]
pub struct BucketStore {
    storage: StorageService,
}

impl BucketStore {
    /// Create a new bucket store.
    #[must_use]
    pub const fn new(storage: StorageService) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ObjectStore for BucketStore {
    async fn upload(&self, bucket: &str, image: &PendingImage) -> AppResult<String> {
        ensure_bucket(bucket)?;
        check_image(&image.content_type, image.size())?;

        let key = generate_storage_key(bucket, &image.file_name);
        let uploaded = self
            .storage
            .upload(&key, &image.bytes, &image.content_type)
            .await?;

        info!(bucket = %bucket, key = %uploaded.key, size = uploaded.size, "Uploaded image");
        Ok(uploaded.url)
    }

    async fn remove(&self, bucket: &str, url: &str) -> AppResult<()> {
        ensure_bucket(bucket)?;
        let key = key_from_public_url(url, bucket).ok_or_else(|| {
            AppError::BadRequest(format!("URL does not point into bucket {bucket}"))
        })?;

        self.storage.delete(&key).await?;
        info!(bucket = %bucket, key = %key, "Removed image");
        Ok(())
    }
}
