//! API endpoint catalogue entity model
//!
//! Descriptive metadata for the partner API. Counters are display-only.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_api_endpoints")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub path: String,
    /// GET | POST | PUT | DELETE
    pub method: String,
    pub description: String,
    /// anonymized | full | aggregated
    pub data_type: String,
    pub platform: String,
    /// active | inactive | maintenance
    pub status: String,
    pub response_time_avg: f64,
    pub calls_today: i64,
    pub success_rate: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const HTTP_METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

/// Level of detail the endpoint exposes.
pub const DATA_TYPES: [&str; 3] = ["anonymized", "full", "aggregated"];

pub const ENDPOINT_STATUSES: [&str; 3] = ["active", "inactive", "maintenance"];
