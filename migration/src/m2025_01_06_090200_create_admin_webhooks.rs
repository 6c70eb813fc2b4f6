//! Migration to create the webhook configuration and webhook log tables.
//!
//! Log rows are written by simulated test deliveries only.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminWebhooks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminWebhooks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminWebhooks::Name).text().not_null())
                    .col(ColumnDef::new(AdminWebhooks::Url).text().not_null())
                    .col(
                        ColumnDef::new(AdminWebhooks::Platform)
                            .text()
                            .not_null()
                            .default("lebonlogiciel"),
                    )
                    .col(ColumnDef::new(AdminWebhooks::Events).json_binary().null())
                    .col(
                        ColumnDef::new(AdminWebhooks::Status)
                            .text()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(AdminWebhooks::Secret).text().not_null())
                    .col(
                        ColumnDef::new(AdminWebhooks::RetryCount)
                            .integer()
                            .not_null()
                            .default(3),
                    )
                    .col(
                        ColumnDef::new(AdminWebhooks::Timeout)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(
                        ColumnDef::new(AdminWebhooks::TotalCalls)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminWebhooks::SuccessRate)
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .col(
                        ColumnDef::new(AdminWebhooks::LastTriggered)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AdminWebhooks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminWebhookLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminWebhookLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminWebhookLogs::WebhookId).uuid().not_null())
                    .col(ColumnDef::new(AdminWebhookLogs::Event).text().not_null())
                    .col(
                        ColumnDef::new(AdminWebhookLogs::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(AdminWebhookLogs::ResponseCode).integer().null())
                    .col(
                        ColumnDef::new(AdminWebhookLogs::ResponseTime)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminWebhookLogs::Payload)
                            .text()
                            .not_null()
                            .default("{}"),
                    )
                    .col(ColumnDef::new(AdminWebhookLogs::Error).text().null())
                    .col(
                        ColumnDef::new(AdminWebhookLogs::RetryCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminWebhookLogs::Timestamp)
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
                    .name("idx_admin_webhook_logs_timestamp")
                    .table(AdminWebhookLogs::Table)
                    .col(AdminWebhookLogs::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_admin_webhook_logs_timestamp")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(AdminWebhookLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminWebhooks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminWebhooks {
    Table,
    Id,
    Name,
    Url,
    Platform,
    Events,
    Status,
    Secret,
    RetryCount,
    Timeout,
    TotalCalls,
    SuccessRate,
    LastTriggered,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AdminWebhookLogs {
    Table,
    Id,
    WebhookId,
    Event,
    Status,
    ResponseCode,
    ResponseTime,
    Payload,
    Error,
    RetryCount,
    Timestamp,
}
