//! Migration to create the API key and API endpoint catalogue tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminApiKeys::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminApiKeys::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminApiKeys::Name).text().not_null())
                    .col(
                        ColumnDef::new(AdminApiKeys::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(AdminApiKeys::ApiKey).text().not_null())
                    .col(ColumnDef::new(AdminApiKeys::KeyPrefix).text().not_null())
                    .col(ColumnDef::new(AdminApiKeys::KeyHash).text().not_null())
                    .col(
                        ColumnDef::new(AdminApiKeys::Platform)
                            .text()
                            .not_null()
                            .default("general"),
                    )
                    .col(ColumnDef::new(AdminApiKeys::Permissions).json_binary().null())
                    .col(
                        ColumnDef::new(AdminApiKeys::Status)
                            .text()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(AdminApiKeys::UsageCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminApiKeys::RateLimit)
                            .integer()
                            .not_null()
                            .default(1000),
                    )
                    .col(
                        ColumnDef::new(AdminApiKeys::LastUsed)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AdminApiKeys::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(AdminApiKeys::IpWhitelist).json_binary().null())
                    .col(
                        ColumnDef::new(AdminApiKeys::CreatedAt)
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
                    .name("idx_admin_api_keys_key_hash")
                    .table(AdminApiKeys::Table)
                    .col(AdminApiKeys::KeyHash)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminApiEndpoints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminApiEndpoints::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminApiEndpoints::Name).text().not_null())
                    .col(ColumnDef::new(AdminApiEndpoints::Path).text().not_null())
                    .col(
                        ColumnDef::new(AdminApiEndpoints::Method)
                            .text()
                            .not_null()
                            .default("GET"),
                    )
                    .col(
                        ColumnDef::new(AdminApiEndpoints::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdminApiEndpoints::DataType)
                            .text()
                            .not_null()
                            .default("anonymized"),
                    )
                    .col(
                        ColumnDef::new(AdminApiEndpoints::Platform)
                            .text()
                            .not_null()
                            .default("general"),
                    )
                    .col(
                        ColumnDef::new(AdminApiEndpoints::Status)
                            .text()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(AdminApiEndpoints::ResponseTimeAvg)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(AdminApiEndpoints::CallsToday)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminApiEndpoints::SuccessRate)
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_admin_api_endpoints_method_path")
                    .table(AdminApiEndpoints::Table)
                    .col(AdminApiEndpoints::Method)
                    .col(AdminApiEndpoints::Path)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_admin_api_endpoints_method_path")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(AdminApiEndpoints::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_admin_api_keys_key_hash").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminApiKeys::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminApiKeys {
    Table,
    Id,
    Name,
    Description,
    ApiKey,
    KeyPrefix,
    KeyHash,
    Platform,
    Permissions,
    Status,
    UsageCount,
    RateLimit,
    LastUsed,
    ExpiresAt,
    IpWhitelist,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AdminApiEndpoints {
    Table,
    Id,
    Name,
    Path,
    Method,
    Description,
    DataType,
    Platform,
    Status,
    ResponseTimeAvg,
    CallsToday,
    SuccessRate,
}
