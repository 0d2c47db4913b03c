//! Create status update table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StatusUpdate::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StatusUpdate::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StatusUpdate::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(StatusUpdate::Content).text().not_null())
                    .col(
                        ColumnDef::new(StatusUpdate::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_status_update_user")
                            .from(StatusUpdate::Table, StatusUpdate::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, created_at) - newest-first profile listing
        manager
            .create_index(
                Index::create()
                    .name("idx_status_update_user_created_at")
                    .table(StatusUpdate::Table)
                    .col(StatusUpdate::UserId)
                    .col(StatusUpdate::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StatusUpdate::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum StatusUpdate {
    Table,
    Id,
    UserId,
    Content,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
