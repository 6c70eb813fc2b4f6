//! API key repository

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::api_key::{
    self, ActiveModel as ApiKeyActiveModel, Entity as ApiKey, Model as ApiKeyModel,
    is_known_platform,
};
use crate::repositories::ListOptions;
use crate::secrets;
use crate::tabs;

/// Form data for a new key. The secret itself is generated by the caller.
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub name: String,
    pub description: String,
    pub platform: String,
    pub permissions: Vec<String>,
    pub rate_limit: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub ip_whitelist: Vec<String>,
}

pub struct ApiKeyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApiKeyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store a key with the given secret, deriving its prefix and hash.
    pub async fn create(
        &self,
        new_key: NewApiKey,
        secret: String,
        now: DateTime<Utc>,
    ) -> Result<ApiKeyModel, RepositoryError> {
        if new_key.name.trim().is_empty() {
            return Err(RepositoryError::validation_error("API key name cannot be empty"));
        }
        if !is_known_platform(&new_key.platform) {
            return Err(RepositoryError::validation_error(format!(
                "Unknown platform '{}'",
                new_key.platform
            )));
        }
        if new_key.rate_limit <= 0 {
            return Err(RepositoryError::validation_error(
                "Rate limit must be a positive number of requests",
            ));
        }
        if let Some(expires_at) = new_key.expires_at
            && expires_at <= now
        {
            return Err(RepositoryError::validation_error(
                "Expiry date must be in the future",
            ));
        }

        ApiKeyActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_key.name.trim().to_string()),
            description: Set(new_key.description),
            key_prefix: Set(secrets::key_prefix(&secret)),
            key_hash: Set(secrets::hash_key(&secret)),
            api_key: Set(secret),
            platform: Set(new_key.platform),
            permissions: Set(Some(json!(new_key.permissions))),
            status: Set("active".to_string()),
            usage_count: Set(0),
            rate_limit: Set(new_key.rate_limit),
            last_used: Set(None),
            expires_at: Set(new_key.expires_at.map(Into::into)),
            ip_whitelist: Set(Some(json!(new_key.ip_whitelist))),
            created_at: Set(now.into()),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<ApiKeyModel>, RepositoryError> {
        ApiKey::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list(&self, options: ListOptions) -> Result<Vec<ApiKeyModel>, RepositoryError> {
        options
            .apply(ApiKey::find(), api_key::Column::CreatedAt, api_key::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Flip `active` to `inactive`; any other status becomes `active`.
    pub async fn toggle(&self, id: Uuid) -> Result<ApiKeyModel, RepositoryError> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("API key"))?;

        let next = tabs::toggle_status(&existing.status);
        let mut active = existing.into_active_model();
        active.status = Set(next.to_string());

        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("API key"))?;

        existing
            .delete(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(())
    }
}
