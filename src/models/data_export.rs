//! Data export job entity model

use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_data_exports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// json | csv | excel
    pub format: String,
    pub data_source: String,
    pub filters: Option<String>,
    /// pending | processing | completed | failed
    pub status: String,
    pub user_id: String,
    pub created_at: DateTimeWithTimeZone,
    pub completed_at: Option<DateTimeWithTimeZone>,
    pub download_url: Option<String>,
    pub file_size: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const EXPORT_FORMATS: [&str; 3] = ["json", "csv", "excel"];

/// Tables an export job may read from.
pub const EXPORT_SOURCES: [&str; 7] = [
    "software_licenses",
    "software_reviews",
    "software_declarations",
    "users",
    "admin_organizations",
    "admin_market_intelligence",
    "admin_bi_metrics",
];

pub const EXPORT_STATUSES: [&str; 4] = ["pending", "processing", "completed", "failed"];
