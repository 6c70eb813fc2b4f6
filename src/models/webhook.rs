//! Webhook configuration entity model

use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_webhooks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub url: String,
    /// lebonlogiciel | prospection
    pub platform: String,
    /// JSON array of subscribed event names
    #[sea_orm(column_type = "JsonBinary")]
    pub events: Option<JsonValue>,
    /// active | inactive | error
    pub status: String,
    pub secret: String,
    pub retry_count: i32,
    /// Delivery timeout in seconds
    pub timeout: i32,
    pub total_calls: i64,
    pub success_rate: f64,
    pub last_triggered: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Destination platforms a webhook can target.
pub const WEBHOOK_PLATFORMS: [&str; 2] = ["lebonlogiciel", "prospection"];

/// Events a webhook may subscribe to.
pub const AVAILABLE_EVENTS: [&str; 10] = [
    "organization.created",
    "organization.updated",
    "license.created",
    "license.renewed",
    "license.expired",
    "review.created",
    "review.updated",
    "user.created",
    "market.ranking_updated",
    "export.completed",
];

/// Event name used by simulated test deliveries.
pub const TEST_EVENT: &str = "test.webhook";

pub const MIN_RETRY_COUNT: i32 = 1;
pub const MAX_RETRY_COUNT: i32 = 10;
