//! Market intelligence repository

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait, QueryOrder,
    QuerySelect, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::market_intelligence::{
    self, ActiveModel as MarketActiveModel, Entity as MarketIntelligence, Model as MarketModel,
};
use crate::repositories::ListOptions;

/// Market ranking row ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMarketEntry {
    pub software_name: String,
    pub category: String,
    pub market_rank: i32,
    pub total_users: i64,
    pub average_rating: f64,
    pub growth_rate: f64,
    pub main_competitors: Vec<String>,
    pub market_share: f64,
}

#[derive(Debug, Clone, Default)]
pub struct MarketChanges {
    pub software_name: Option<String>,
    pub category: Option<String>,
    pub market_rank: Option<i32>,
    pub total_users: Option<i64>,
    pub average_rating: Option<f64>,
    pub growth_rate: Option<f64>,
    pub main_competitors: Option<Vec<String>>,
    pub market_share: Option<f64>,
}

pub struct MarketIntelligenceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MarketIntelligenceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        entry: NewMarketEntry,
        now: DateTime<Utc>,
    ) -> Result<MarketModel, RepositoryError> {
        validate(&entry)?;

        MarketActiveModel {
            id: Set(Uuid::new_v4()),
            software_name: Set(entry.software_name.trim().to_string()),
            category: Set(entry.category),
            market_rank: Set(entry.market_rank),
            total_users: Set(entry.total_users),
            average_rating: Set(entry.average_rating),
            growth_rate: Set(entry.growth_rate),
            main_competitors: Set(Some(json!(entry.main_competitors))),
            market_share: Set(entry.market_share),
            updated_at: Set(now.into()),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<MarketModel>, RepositoryError> {
        MarketIntelligence::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List rankings on `market_rank` (ascending for the ranking table).
    pub async fn list(&self, options: ListOptions) -> Result<Vec<MarketModel>, RepositoryError> {
        options
            .apply(
                MarketIntelligence::find(),
                market_intelligence::Column::MarketRank,
                market_intelligence::Column::SoftwareName,
            )
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Most used software, highest `total_users` first.
    pub async fn top_by_users(&self, limit: u64) -> Result<Vec<MarketModel>, RepositoryError> {
        MarketIntelligence::find()
            .order_by_desc(market_intelligence::Column::TotalUsers)
            .order_by_asc(market_intelligence::Column::SoftwareName)
            .limit(limit)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: MarketChanges,
        now: DateTime<Utc>,
    ) -> Result<MarketModel, RepositoryError> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Market entry"))?;

        if let Some(name) = changes.software_name.as_deref()
            && name.trim().is_empty()
        {
            return Err(RepositoryError::validation_error(
                "Software name cannot be empty",
            ));
        }
        if let Some(rating) = changes.average_rating {
            validate_rating(rating)?;
        }

        let mut active = existing.into_active_model();
        if let Some(name) = changes.software_name {
            active.software_name = Set(name.trim().to_string());
        }
        if let Some(category) = changes.category {
            active.category = Set(category);
        }
        if let Some(rank) = changes.market_rank {
            active.market_rank = Set(rank);
        }
        if let Some(users) = changes.total_users {
            active.total_users = Set(users);
        }
        if let Some(rating) = changes.average_rating {
            active.average_rating = Set(rating);
        }
        if let Some(growth) = changes.growth_rate {
            active.growth_rate = Set(growth);
        }
        if let Some(competitors) = changes.main_competitors {
            active.main_competitors = Set(Some(json!(competitors)));
        }
        if let Some(share) = changes.market_share {
            active.market_share = Set(share);
        }
        active.updated_at = Set(now.into());

        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Market entry"))?;

        existing
            .delete(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(())
    }
}

fn validate(entry: &NewMarketEntry) -> Result<(), RepositoryError> {
    if entry.software_name.trim().is_empty() {
        return Err(RepositoryError::validation_error(
            "Software name cannot be empty",
        ));
    }
    validate_rating(entry.average_rating)
}

fn validate_rating(rating: f64) -> Result<(), RepositoryError> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(RepositoryError::validation_error(
            "Average rating must be between 0 and 5",
        ));
    }
    Ok(())
}
