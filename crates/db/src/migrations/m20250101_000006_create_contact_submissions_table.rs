//! Create contact submissions table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactSubmissions::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContactSubmissions::Name)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContactSubmissions::Email)
                            .string_len(320)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContactSubmissions::Company).string_len(256))
                    .col(ColumnDef::new(ContactSubmissions::Message).text().not_null())
                    .col(
                        ColumnDef::new(ContactSubmissions::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ContactSubmissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ContactSubmissions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (is_read, created_at) for the admin inbox
        manager
            .create_index(
                Index::create()
                    .name("idx_contact_submissions_read_created")
                    .table(ContactSubmissions::Table)
                    .col(ContactSubmissions::IsRead)
                    .col(ContactSubmissions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContactSubmissions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContactSubmissions {
    Table,
    Id,
    Name,
    Email,
    Company,
    Message,
    IsRead,
    CreatedAt,
    UpdatedAt,
}
