//! Case study entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::repositories::ContentTable;

/// A client project showcased on the site.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "case_studies")]
pub struct Model {
    /// Unique case study ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Project title.
    pub title: String,

    /// What was built and why.
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Name of the client the work was done for.
    #[sea_orm(nullable)]
    pub client_name: Option<String>,

    /// Cover image URL.
    #[sea_orm(nullable)]
    pub image_url: Option<String>,

    /// Link to the live project.
    #[sea_orm(nullable)]
    pub project_url: Option<String>,

    /// Free-form outcome metrics, e.g. `[{"label": "Conversion", "value": "+32%"}]`.
    #[sea_orm(nullable)]
    pub results: Option<Json>,

    /// Display order (lower first).
    pub sort_order: i32,

    /// Whether the case study is shown on the public site.
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
