//! Migration to create the admin_organizations table.
//!
//! Client organizations with their contact details, the two data-sharing
//! consent flags and denormalized usage counters.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminOrganizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminOrganizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminOrganizations::Name).text().not_null())
                    .col(
                        ColumnDef::new(AdminOrganizations::Domain)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::Industry)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::Size)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::Country)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::ContactEmail)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::ContactPhone)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::Address)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::ConsentLebonlogiciel)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::ConsentProspection)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::ConsentDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::TotalLicenses)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::TotalUsers)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::MonthlyRevenue)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdminOrganizations::LastActivity)
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
                    .name("idx_admin_organizations_created_at")
                    .table(AdminOrganizations::Table)
                    .col(AdminOrganizations::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_admin_organizations_created_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AdminOrganizations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminOrganizations {
    Table,
    Id,
    Name,
    Domain,
    Industry,
    Size,
    Country,
    ContactEmail,
    ContactPhone,
    Address,
    Status,
    ConsentLebonlogiciel,
    ConsentProspection,
    ConsentDate,
    TotalLicenses,
    TotalUsers,
    MonthlyRevenue,
    CreatedAt,
    LastActivity,
}
