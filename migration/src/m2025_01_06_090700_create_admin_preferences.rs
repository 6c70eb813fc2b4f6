//! Migration to create the per-operator preference table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminPreferences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminPreferences::UserId)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdminPreferences::Language)
                            .text()
                            .not_null()
                            .default("fr"),
                    )
                    .col(
                        ColumnDef::new(AdminPreferences::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminPreferences::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminPreferences {
    Table,
    UserId,
    Language,
    UpdatedAt,
}
