//! Team member entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::repositories::ContentTable;

/// A person listed in the team section.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_members")]
pub struct Model {
    /// Team member ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Full name.
    pub name: String,

    /// Job title / role.
    pub role: String,

    /// Short biography.
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    /// Avatar image URL.
    #[sea_orm(nullable)]
    pub avatar_url: Option<String>,

    /// `LinkedIn` profile URL.
    #[sea_orm(nullable)]
    pub linkedin_url: Option<String>,

    /// Display order (lower first).
    pub sort_order: i32,

    /// Whether the member is shown on the public site.
    pub is_active: bool,

    /// Created at timestamp.
    pub created_at: DateTime<Utc>,

    /// Updated at timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Team member relations.
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
