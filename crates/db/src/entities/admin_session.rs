//! Admin session entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A logged-in admin session, referenced by the session cookie.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_sessions")]
pub struct Model {
    /// Unique session ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Opaque cookie token.
    #[sea_orm(unique)]
    pub token: String,

    /// Owning admin user.
    pub admin_user_id: String,

    /// When the session was opened.
    pub created_at: DateTime<Utc>,

    /// The session is rejected after this instant.
    pub expires_at: DateTime<Utc>,
}

/// Relationships.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::admin_user::Entity",
        from = "Column::AdminUserId",
        to = "super::admin_user::Column::Id",
        on_delete = "Cascade"
    )]
    /// The admin this session signs in.
    AdminUser,
}

impl Related<super::admin_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
