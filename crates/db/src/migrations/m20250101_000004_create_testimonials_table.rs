//! Create testimonials table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Testimonials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Testimonials::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Testimonials::Name).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Testimonials::RoleCompany)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Testimonials::Message).text().not_null())
                    .col(
                        ColumnDef::new(Testimonials::Rating)
                            .integer()
                            .not_null()
                            .default(5)
                            .check(
                                Expr::col(Testimonials::Rating)
                                    .gte(1)
                                    .and(Expr::col(Testimonials::Rating).lte(5)),
                            ),
                    )
                    .col(ColumnDef::new(Testimonials::AvatarUrl).string_len(1024))
                    .col(
                        ColumnDef::new(Testimonials::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Testimonials::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Testimonials::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Testimonials::UpdatedAt)
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
                    .name("idx_testimonials_active_sort")
                    .table(Testimonials::Table)
                    .col(Testimonials::IsActive)
                    .col(Testimonials::SortOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Testimonials::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Testimonials {
    Table,
    Id,
    Name,
    RoleCompany,
    Message,
    Rating,
    AvatarUrl,
    SortOrder,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
