//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_user_table;
mod m20250101_000002_create_course_table;
mod m20250101_000003_create_course_material_table;
mod m20250101_000004_create_enrollment_table;
mod m20250101_000005_create_feedback_table;
mod m20250101_000006_create_status_update_table;
mod m20250101_000007_create_notification_table;

/// Migrator for all schema migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_user_table::Migration),
            Box::new(m20250101_000002_create_course_table::Migration),
            Box::new(m20250101_000003_create_course_material_table::Migration),
            Box::new(m20250101_000004_create_enrollment_table::Migration),
            Box::new(m20250101_000005_create_feedback_table::Migration),
            Box::new(m20250101_000006_create_status_update_table::Migration),
            Box::new(m20250101_000007_create_notification_table::Migration),
        ]
    }
}
