//! Create appeal table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appeal::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appeal::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appeal::Theme).string_len(256).not_null())
                    .col(ColumnDef::new(Appeal::Message).text().not_null())
                    .col(
                        ColumnDef::new(Appeal::Status)
                            .string_len(16)
                            .not_null()
                            .default("New"),
                    )
                    .col(ColumnDef::new(Appeal::Solution).text())
                    .col(ColumnDef::new(Appeal::CancelReason).text())
                    .col(
                        ColumnDef::new(Appeal::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Appeal::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: status (list and bulk-cancel scans)
        manager
            .create_index(
                Index::create()
                    .name("idx_appeal_status")
                    .table(Appeal::Table)
                    .col(Appeal::Status)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (date queries)
        manager
            .create_index(
                Index::create()
                    .name("idx_appeal_created_at")
                    .table(Appeal::Table)
                    .col(Appeal::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appeal::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Appeal {
    Table,
    Id,
    Theme,
    Message,
    Status,
    Solution,
    CancelReason,
    CreatedAt,
    UpdatedAt,
}
