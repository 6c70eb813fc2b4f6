//! Market intelligence entity model

use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_market_intelligence")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub software_name: String,
    pub category: String,
    pub market_rank: i32,
    pub total_users: i64,
    pub average_rating: f64,
    pub growth_rate: f64,
    #[sea_orm(column_type = "JsonBinary")]
    pub main_competitors: Option<JsonValue>,
    pub market_share: f64,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
