//! Migration to create the BI dashboard and BI metric tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminBiDashboards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminBiDashboards::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminBiDashboards::Name).text().not_null())
                    .col(
                        ColumnDef::new(AdminBiDashboards::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdminBiDashboards::Category)
                            .text()
                            .not_null()
                            .default("general"),
                    )
                    .col(ColumnDef::new(AdminBiDashboards::Widgets).json_binary().null())
                    .col(
                        ColumnDef::new(AdminBiDashboards::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AdminBiDashboards::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(AdminBiDashboards::CreatedBy).text().not_null())
                    .col(
                        ColumnDef::new(AdminBiDashboards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdminBiDashboards::LastModified)
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
                    .table(AdminBiMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminBiMetrics::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminBiMetrics::Name).text().not_null())
                    .col(
                        ColumnDef::new(AdminBiMetrics::Category)
                            .text()
                            .not_null()
                            .default("general"),
                    )
                    .col(
                        ColumnDef::new(AdminBiMetrics::Value)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(AdminBiMetrics::PreviousValue)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(AdminBiMetrics::Change)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(AdminBiMetrics::ChangeType)
                            .text()
                            .not_null()
                            .default("stable"),
                    )
                    .col(
                        ColumnDef::new(AdminBiMetrics::Unit)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdminBiMetrics::Period)
                            .text()
                            .not_null()
                            .default("monthly"),
                    )
                    .col(
                        ColumnDef::new(AdminBiMetrics::UpdatedAt)
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
                    .name("idx_admin_bi_metrics_category_period")
                    .table(AdminBiMetrics::Table)
                    .col(AdminBiMetrics::Category)
                    .col(AdminBiMetrics::Period)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_admin_bi_metrics_category_period")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(AdminBiMetrics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminBiDashboards::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminBiDashboards {
    Table,
    Id,
    Name,
    Description,
    Category,
    Widgets,
    IsPublic,
    Views,
    CreatedBy,
    CreatedAt,
    LastModified,
}

#[derive(DeriveIden)]
enum AdminBiMetrics {
    Table,
    Id,
    Name,
    Category,
    Value,
    PreviousValue,
    Change,
    ChangeType,
    Unit,
    Period,
    UpdatedAt,
}
