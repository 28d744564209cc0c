//! Testimonial entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::repositories::ContentTable;

/// A client quote with a star rating.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "testimonials")]
pub struct Model {
    /// Unique testimonial ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Name of the person quoted.
    pub name: String,

    /// Role and company, e.g. "CTO, Acme".
    pub role_company: String,

    /// The quote itself.
    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Star rating, 1 to 5.
    pub rating: i32,

    /// Photo of the person quoted.
    #[sea_orm(nullable)]
    pub avatar_url: Option<String>,

    /// Display order (lower first).
    pub sort_order: i32,

    /// Whether the quote is shown on the public site.
    pub is_active: bool,

    /// When the row was created.
    pub created_at: DateTime<Utc>,

    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// No relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ContentTable for Entity {
    fn sort_order_column() -> Column {
        Column::SortOrder
    }

    fn is_active_column() -> Column {
        Column::IsActive
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }
}
