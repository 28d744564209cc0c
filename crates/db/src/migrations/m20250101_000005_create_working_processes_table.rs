//! Create working processes table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkingProcesses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkingProcesses::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WorkingProcesses::StepNo)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(WorkingProcesses::Title)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(WorkingProcesses::Description).text().not_null())
                    .col(
                        ColumnDef::new(WorkingProcesses::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(WorkingProcesses::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(WorkingProcesses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(WorkingProcesses::UpdatedAt)
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
                    .name("idx_working_processes_active_sort")
                    .table(WorkingProcesses::Table)
                    .col(WorkingProcesses::IsActive)
                    .col(WorkingProcesses::SortOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkingProcesses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WorkingProcesses {
    Table,
    Id,
    StepNo,
    Title,
    Description,
    SortOrder,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
