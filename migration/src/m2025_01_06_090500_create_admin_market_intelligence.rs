//! Migration to create the market intelligence table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminMarketIntelligence::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminMarketIntelligence::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdminMarketIntelligence::SoftwareName)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminMarketIntelligence::Category)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AdminMarketIntelligence::MarketRank)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminMarketIntelligence::TotalUsers)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminMarketIntelligence::AverageRating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(AdminMarketIntelligence::GrowthRate)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(AdminMarketIntelligence::MainCompetitors)
                            .json_binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AdminMarketIntelligence::MarketShare)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(AdminMarketIntelligence::UpdatedAt)
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
                    .name("idx_admin_market_intelligence_rank")
                    .table(AdminMarketIntelligence::Table)
                    .col(AdminMarketIntelligence::MarketRank)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_admin_market_intelligence_rank")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(AdminMarketIntelligence::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum AdminMarketIntelligence {
    Table,
    Id,
    SoftwareName,
    Category,
    MarketRank,
    TotalUsers,
    AverageRating,
    GrowthRate,
    MainCompetitors,
    MarketShare,
    UpdatedAt,
}
