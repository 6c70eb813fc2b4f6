//! Overview tab: headline cards, recent activity and top software.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::audit_log::Model as AuditLogModel;
use crate::models::market_intelligence::Model as MarketModel;
use crate::models::organization::{Model as OrganizationModel, OrganizationStatus};

pub const RECENT_ACTIVITY_LIMIT: u64 = 10;
pub const TOP_SOFTWARE_LIMIT: u64 = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OverviewStats {
    pub total_organizations: u64,
    /// Sum of `total_licenses` over active organizations
    pub active_licenses: i64,
    /// Latest monthly revenue metric, 0 when none is recorded
    pub monthly_revenue: f64,
    pub data_exports: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivityItem {
    pub id: Uuid,
    /// Audited action, e.g. `create`
    pub kind: String,
    pub resource: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub organization_name: Option<String>,
}

impl From<AuditLogModel> for ActivityItem {
    fn from(log: AuditLogModel) -> Self {
        let detail = |key: &str| {
            log.details
                .as_ref()
                .and_then(|details| details.get(key))
                .and_then(|value| value.as_str())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let description =
            detail("description").unwrap_or_else(|| format!("{} performed", log.action));
        let organization_name = detail("organization_name");

        Self {
            id: log.id,
            kind: log.action,
            resource: log.resource,
            description,
            timestamp: log.timestamp.with_timezone(&Utc),
            organization_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopSoftware {
    pub name: String,
    pub category: String,
    pub usage_count: i64,
    pub growth_rate: f64,
}

impl From<MarketModel> for TopSoftware {
    fn from(entry: MarketModel) -> Self {
        Self {
            name: entry.software_name,
            category: entry.category,
            usage_count: entry.total_users,
            growth_rate: entry.growth_rate,
        }
    }
}

pub fn active_licenses(organizations: &[OrganizationModel]) -> i64 {
    organizations
        .iter()
        .filter(|org| org.status == OrganizationStatus::Active.as_str())
        .map(|org| org.total_licenses)
        .sum()
}
