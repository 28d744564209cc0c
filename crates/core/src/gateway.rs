//! Remote data gateway seams.
//!
//! The editor only talks to storage through these two traits. Production
//! code plugs in [`crate::services::ContentService`] and
//! [`crate::media::BucketStore`]; tests plug in in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use sitecms_common::AppResult;

use crate::content::Content;
use crate::media::PendingImage;
use crate::schema::Form;

/// Row storage for one content type.
#[async_trait]
pub trait ContentGateway<C: Content>: Send + Sync {
    /// All rows ordered by `sort_order`, then `created_at`.
    async fn list(&self) -> AppResult<Vec<C>>;

    /// Active rows in display order.
    async fn list_active(&self) -> AppResult<Vec<C>>;

    /// One row by id.
    async fn get(&self, id: &str) -> AppResult<Option<C>>;

    /// Insert a row built from a complete patch. The gateway assigns the id
    /// and timestamps and returns the stored row.
    async fn insert(&self, patch: &Form) -> AppResult<C>;

    /// Apply a partial patch to an existing row.
    async fn update(&self, id: &str, patch: &Form) -> AppResult<C>;

    /// Delete a row. Fails with `NotFound` when it does not exist.
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Object storage for uploaded images.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an image in `bucket` and return its public URL.
    async fn upload(&self, bucket: &str, image: &PendingImage) -> AppResult<String>;

    /// Remove the object a public URL points at.
    async fn remove(&self, bucket: &str, url: &str) -> AppResult<()>;
}

/// Shared, type-erased content gateway.
pub type DynGateway<C> = Arc<dyn ContentGateway<C>>;

#[async_trait]
impl<C: Content, G: ContentGateway<C> + ?Sized> ContentGateway<C> for Arc<G> {
    async fn list(&self) -> AppResult<Vec<C>> {
        (**self).list().await
    }

    async fn list_active(&self) -> AppResult<Vec<C>> {
        (**self).list_active().await
    }

    async fn get(&self, id: &str) -> AppResult<Option<C>> {
        (**self).get(id).await
    }

    async fn insert(&self, patch: &Form) -> AppResult<C> {
        (**self).insert(patch).await
    }

    async fn update(&self, id: &str, patch: &Form) -> AppResult<C> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        (**self).delete(id).await
    }
}

#[async_trait]
impl<S: ObjectStore + ?Sized> ObjectStore for Arc<S> {
    async fn upload(&self, bucket: &str, image: &PendingImage) -> AppResult<String> {
        (**self).upload(bucket, image).await
    }

    async fn remove(&self, bucket: &str, url: &str) -> AppResult<()> {
        (**self).remove(bucket, url).await
    }
}
