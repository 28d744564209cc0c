//! Create case studies table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseStudies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseStudies::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CaseStudies::Title).string_len(256).not_null())
                    .col(ColumnDef::new(CaseStudies::Description).text().not_null())
                    .col(ColumnDef::new(CaseStudies::ClientName).string_len(256))
                    .col(ColumnDef::new(CaseStudies::ImageUrl).string_len(1024))
                    .col(ColumnDef::new(CaseStudies::ProjectUrl).string_len(1024))
                    .col(ColumnDef::new(CaseStudies::Results).json_binary())
                    .col(
                        ColumnDef::new(CaseStudies::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CaseStudies::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CaseStudies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CaseStudies::UpdatedAt)
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
                    .name("idx_case_studies_active_sort")
                    .table(CaseStudies::Table)
                    .col(CaseStudies::IsActive)
                    .col(CaseStudies::SortOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CaseStudies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CaseStudies {
    Table,
    Id,
    Title,
    Description,
    ClientName,
    ImageUrl,
    ProjectUrl,
    Results,
    SortOrder,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
