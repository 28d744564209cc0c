//! Editor errors.

use sitecms_common::AppError;
use thiserror::Error;
use validator::ValidationErrors;

/// Why an editor operation did not go through.
///
/// None of these are fatal: the editor stays usable and the operation can
/// be retried.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The form failed local validation; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The attached file is not an acceptable image.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// A remote read or write failed.
    #[error("failed to {action}: {source}")]
    Gateway {
        /// What was being attempted.
        action: &'static str,
        /// Underlying failure.
        #[source]
        source: AppError,
    },

    /// The pending image could not be uploaded.
    #[error("image upload failed: {0}")]
    Upload(#[source] AppError),

    /// No row with this ID.
    #[error("{0} not found")]
    NotFound(String),

    /// The form is read-only.
    #[error("no entity is being edited")]
    NotEditing,

    /// The operation needs a selected row.
    #[error("no entity is selected")]
    NothingSelected,

    /// Another write is in flight.
    #[error("an operation is already in progress")]
    Busy,

    /// Confirm was called with nothing armed.
    #[error("nothing is awaiting confirmation")]
    GateClosed,
}

impl EditorError {
    pub(crate) const fn gateway(action: &'static str, source: AppError) -> Self {
        Self::Gateway { action, source }
    }
}
