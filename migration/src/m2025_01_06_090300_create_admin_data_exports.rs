//! Migration to create the data export job table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminDataExports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminDataExports::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminDataExports::Name).text().not_null())
                    .col(
                        ColumnDef::new(AdminDataExports::Format)
                            .text()
                            .not_null()
                            .default("csv"),
                    )
                    .col(ColumnDef::new(AdminDataExports::DataSource).text().not_null())
                    .col(ColumnDef::new(AdminDataExports::Filters).text().null())
                    .col(
                        ColumnDef::new(AdminDataExports::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(AdminDataExports::UserId).text().not_null())
                    .col(
                        ColumnDef::new(AdminDataExports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdminDataExports::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(AdminDataExports::DownloadUrl).text().null())
                    .col(ColumnDef::new(AdminDataExports::FileSize).big_integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_admin_data_exports_created_at")
                    .table(AdminDataExports::Table)
                    .col(AdminDataExports::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_admin_data_exports_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(AdminDataExports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminDataExports {
    Table,
    Id,
    Name,
    Format,
    DataSource,
    Filters,
    Status,
    UserId,
    CreatedAt,
    CompletedAt,
    DownloadUrl,
    FileSize,
}
