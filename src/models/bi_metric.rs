//! BI metric entity model

use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Point-in-time metric value with its change against the previous period.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_bi_metrics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub value: f64,
    pub previous_value: f64,
    /// Percent change from `previous_value`
    pub change: f64,
    /// increase | decrease | stable
    pub change_type: String,
    pub unit: String,
    /// daily | weekly | monthly | quarterly
    pub period: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const METRIC_PERIODS: [&str; 4] = ["daily", "weekly", "monthly", "quarterly"];
