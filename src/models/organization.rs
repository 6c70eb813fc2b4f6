//! Organization entity model
//!
//! Customer organizations with their data-sharing consent flags and the
//! denormalized usage counters shown on the organizations tab.

use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_organizations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub industry: String,
    pub size: String,
    pub country: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    /// active | inactive | pending
    pub status: String,
    pub consent_lebonlogiciel: bool,
    pub consent_prospection: bool,
    pub consent_date: DateTimeWithTimeZone,
    pub total_licenses: i64,
    pub total_users: i64,
    pub monthly_revenue: f64,
    pub created_at: DateTimeWithTimeZone,
    pub last_activity: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Lifecycle status of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationStatus {
    Active,
    Inactive,
    Pending,
}

impl OrganizationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            OrganizationStatus::Active => "active",
            OrganizationStatus::Inactive => "inactive",
            OrganizationStatus::Pending => "pending",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Some(OrganizationStatus::Active),
            "inactive" => Some(OrganizationStatus::Inactive),
            "pending" => Some(OrganizationStatus::Pending),
            _ => None,
        }
    }
}
