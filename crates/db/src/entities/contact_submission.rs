//! Contact form submission entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A message sent through the public contact form.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_submissions")]
pub struct Model {
    /// Submission ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Sender name.
    pub name: String,

    /// Sender email address.
    pub email: String,

    /// Sender company (optional).
    #[sea_orm(nullable)]
    pub company: Option<String>,

    /// Message body.
    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Whether an admin has read the submission.
    pub is_read: bool,

    /// When the submission was received.
    pub created_at: DateTime<Utc>,

    /// When the submission was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Contact submission relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
