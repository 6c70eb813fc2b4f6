//! API key entity model

use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

/// Partner API key. `api_key` holds the full secret; `key_hash` is its SHA-256 hex digest.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_api_keys")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub api_key: String,
    pub key_prefix: String,
    pub key_hash: String,
    /// lebonlogiciel | prospection_saas | general
    pub platform: String,
    /// JSON array of permission names
    #[sea_orm(column_type = "JsonBinary")]
    pub permissions: Option<JsonValue>,
    /// active | inactive | expired
    pub status: String,
    pub usage_count: i64,
    pub rate_limit: i32,
    pub last_used: Option<DateTimeWithTimeZone>,
    pub expires_at: Option<DateTimeWithTimeZone>,
    /// JSON array of allowed client addresses
    #[sea_orm(column_type = "JsonBinary")]
    pub ip_whitelist: Option<JsonValue>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Partner platform a key or endpoint is issued for.
pub const API_PLATFORMS: [&str; 3] = ["lebonlogiciel", "prospection_saas", "general"];

/// Lifecycle status of an API key.
pub const API_KEY_STATUSES: [&str; 3] = ["active", "inactive", "expired"];

pub fn is_known_platform(platform: &str) -> bool {
    API_PLATFORMS.contains(&platform)
}
