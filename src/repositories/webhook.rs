//! Webhook configuration and delivery log repository

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::webhook::{
    self, AVAILABLE_EVENTS, ActiveModel as WebhookActiveModel, Entity as Webhook,
    MAX_RETRY_COUNT, MIN_RETRY_COUNT, Model as WebhookModel, WEBHOOK_PLATFORMS,
};
use crate::models::webhook_log::{
    self, ActiveModel as WebhookLogActiveModel, Entity as WebhookLog, Model as WebhookLogModel,
};
use crate::repositories::ListOptions;
use crate::tabs;

/// Form data for a new webhook. The signing secret is generated by the caller.
#[derive(Debug, Clone)]
pub struct NewWebhook {
    pub name: String,
    pub url: String,
    pub platform: String,
    pub events: Vec<String>,
    pub status: String,
    pub retry_count: i32,
    pub timeout: i32,
}

/// Outcome of one simulated delivery.
#[derive(Debug, Clone)]
pub struct DeliveryRecord {
    pub event: String,
    pub status: String,
    pub response_code: Option<i32>,
    pub response_time_ms: i64,
    pub payload: serde_json::Value,
    pub error: Option<String>,
}

pub struct WebhookRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WebhookRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new_webhook: NewWebhook,
        secret: String,
        now: DateTime<Utc>,
    ) -> Result<WebhookModel, RepositoryError> {
        validate(&new_webhook)?;

        WebhookActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_webhook.name.trim().to_string()),
            url: Set(new_webhook.url.trim().to_string()),
            platform: Set(new_webhook.platform),
            events: Set(Some(json!(new_webhook.events))),
            status: Set(new_webhook.status),
            secret: Set(secret),
            retry_count: Set(new_webhook.retry_count),
            timeout: Set(new_webhook.timeout),
            total_calls: Set(0),
            success_rate: Set(100.0),
            last_triggered: Set(None),
            created_at: Set(now.into()),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<WebhookModel>, RepositoryError> {
        Webhook::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list(&self, options: ListOptions) -> Result<Vec<WebhookModel>, RepositoryError> {
        options
            .apply(Webhook::find(), webhook::Column::CreatedAt, webhook::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Flip `active` to `inactive`; any other status becomes `active`.
    pub async fn toggle(&self, id: Uuid) -> Result<WebhookModel, RepositoryError> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Webhook"))?;

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
            .ok_or_else(|| RepositoryError::not_found("Webhook"))?;

        existing
            .delete(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(())
    }

    /// Store a delivery log row and bump the webhook's call counter.
    ///
    /// Nothing is sent over the network.
    pub async fn record_delivery(
        &self,
        webhook_id: Uuid,
        delivery: DeliveryRecord,
        now: DateTime<Utc>,
    ) -> Result<WebhookLogModel, RepositoryError> {
        let existing = self
            .get(webhook_id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Webhook"))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let log = WebhookLogActiveModel {
            id: Set(Uuid::new_v4()),
            webhook_id: Set(webhook_id),
            event: Set(delivery.event),
            status: Set(delivery.status),
            response_code: Set(delivery.response_code),
            response_time: Set(delivery.response_time_ms),
            payload: Set(delivery.payload.to_string()),
            error: Set(delivery.error),
            retry_count: Set(0),
            timestamp: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::database_error)?;

        let total_calls = existing.total_calls + 1;
        let mut active = existing.into_active_model();
        active.total_calls = Set(total_calls);
        active.last_triggered = Set(Some(now.into()));
        active
            .update(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit().await.map_err(RepositoryError::database_error)?;
        Ok(log)
    }

    /// Delivery logs, newest first, optionally for one webhook.
    pub async fn list_logs(
        &self,
        webhook_id: Option<Uuid>,
        options: ListOptions,
    ) -> Result<Vec<WebhookLogModel>, RepositoryError> {
        let mut select = WebhookLog::find();
        if let Some(webhook_id) = webhook_id {
            select = select.filter(webhook_log::Column::WebhookId.eq(webhook_id));
        }

        options
            .apply(select, webhook_log::Column::Timestamp, webhook_log::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}

fn validate(webhook: &NewWebhook) -> Result<(), RepositoryError> {
    if webhook.name.trim().is_empty() {
        return Err(RepositoryError::validation_error("Webhook name cannot be empty"));
    }

    let url = url::Url::parse(webhook.url.trim()).map_err(|_| {
        RepositoryError::validation_error("Webhook URL must be a valid HTTP/HTTPS URL")
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(RepositoryError::validation_error(
            "Webhook URL must be a valid HTTP/HTTPS URL",
        ));
    }

    if !WEBHOOK_PLATFORMS.contains(&webhook.platform.as_str()) {
        return Err(RepositoryError::validation_error(format!(
            "Unknown platform '{}'",
            webhook.platform
        )));
    }

    if let Some(unknown) = webhook
        .events
        .iter()
        .find(|event| !AVAILABLE_EVENTS.contains(&event.as_str()))
    {
        return Err(RepositoryError::validation_error(format!(
            "Unknown webhook event '{}'",
            unknown
        )));
    }

    if !matches!(webhook.status.as_str(), "active" | "inactive") {
        return Err(RepositoryError::validation_error(
            "Webhook status must be 'active' or 'inactive'",
        ));
    }

    if !(MIN_RETRY_COUNT..=MAX_RETRY_COUNT).contains(&webhook.retry_count) {
        return Err(RepositoryError::validation_error(format!(
            "Retry count must be between {} and {}",
            MIN_RETRY_COUNT, MAX_RETRY_COUNT
        )));
    }

    if !(1..=300).contains(&webhook.timeout) {
        return Err(RepositoryError::validation_error(
            "Timeout must be between 1 and 300 seconds",
        ));
    }

    Ok(())
}
