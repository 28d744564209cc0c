//! Service entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::repositories::ContentTable;

/// A service offering shown in the services section of the site.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    /// Unique service ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Service title.
    pub title: String,

    /// Short description of the service.
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Icon image URL.
    #[sea_orm(nullable)]
    pub icon_url: Option<String>,

    /// Link to a page with more details.
    #[sea_orm(nullable)]
    pub link_url: Option<String>,

    /// Display order (lower first).
    pub sort_order: i32,

    /// Whether the service is shown on the public site.
    pub is_active: bool,

    /// When the service was created.
    pub created_at: DateTime<Utc>,

    /// When the service was last updated.
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
