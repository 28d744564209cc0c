//! Working process step entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::repositories::ContentTable;

/// One numbered step of the "how we work" section.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "working_processes")]
pub struct Model {
    /// Unique step ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Step number shown next to the title (starts at 1).
    pub step_no: i32,

    /// Step title.
    pub title: String,

    /// What happens in this step.
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Display order (lower first).
    pub sort_order: i32,

    /// Whether the step is shown on the public site.
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
