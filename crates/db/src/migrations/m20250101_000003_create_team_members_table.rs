//! Create team members table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamMembers::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeamMembers::Name).string_len(256).not_null())
                    .col(ColumnDef::new(TeamMembers::Role).string_len(256).not_null())
                    .col(ColumnDef::new(TeamMembers::Bio).text())
                    .col(ColumnDef::new(TeamMembers::AvatarUrl).string_len(1024))
                    .col(ColumnDef::new(TeamMembers::LinkedinUrl).string_len(1024))
                    .col(
                        ColumnDef::new(TeamMembers::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_team_members_active_sort")
                    .table(TeamMembers::Table)
                    .col(TeamMembers::IsActive)
                    .col(TeamMembers::SortOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TeamMembers {
    Table,
    Id,
    Name,
    Role,
    Bio,
    AvatarUrl,
    LinkedinUrl,
    SortOrder,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
