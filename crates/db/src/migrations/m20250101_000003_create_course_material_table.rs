//! Create course material table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseMaterial::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseMaterial::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterial::CourseId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterial::FileName)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterial::FileUrl)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterial::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_material_course")
                            .from(CourseMaterial::Table, CourseMaterial::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: course_id (for a course's material list)
        manager
            .create_index(
                Index::create()
                    .name("idx_course_material_course_id")
                    .table(CourseMaterial::Table)
                    .col(CourseMaterial::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseMaterial::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CourseMaterial {
    Table,
    Id,
    CourseId,
    FileName,
    FileUrl,
    UploadedAt,
}

#[derive(Iden)]
enum Course {
    Table,
    Id,
}
