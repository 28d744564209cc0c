//! Core business logic for sitecms.
//!
//! - [`schema`] and [`content`]: the declarative description of each
//!   editable content type
//! - [`gateway`]: the storage seams the editor writes through
//! - [`editor`]: the generic master-detail editor
//! - [`services`]: database-backed gateways plus the site, contact and
//!   admin auth services used by the HTTP layer

pub mod content;
pub mod editor;
pub mod gateway;
pub mod media;
pub mod schema;
pub mod services;

pub use content::{Content, schema_for};
pub use editor::{ContentEditor, EditorError, EditorMode};
pub use gateway::{ContentGateway, DynGateway, ObjectStore};
pub use media::{
    BucketStore, ImageRejection, MAX_IMAGE_BYTES, PendingImage, check_image, ensure_bucket,
};
pub use schema::{ContentKind, ContentSchema, FieldKind, FieldSpec, Form};
pub use services::*;
