//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_services_table;
mod m20250101_000002_create_case_studies_table;
mod m20250101_000003_create_team_members_table;
mod m20250101_000004_create_testimonials_table;
mod m20250101_000005_create_working_processes_table;
mod m20250101_000006_create_contact_submissions_table;
mod m20250101_000007_create_admin_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_services_table::Migration),
            Box::new(m20250101_000002_create_case_studies_table::Migration),
            Box::new(m20250101_000003_create_team_members_table::Migration),
            Box::new(m20250101_000004_create_testimonials_table::Migration),
            Box::new(m20250101_000005_create_working_processes_table::Migration),
            Box::new(m20250101_000006_create_contact_submissions_table::Migration),
            Box::new(m20250101_000007_create_admin_tables::Migration),
        ]
    }
}
