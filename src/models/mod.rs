//! # Data Models
//!
//! SeaORM entities for every admin table plus small shared response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod api_endpoint;
pub mod api_key;
pub mod audit_log;
pub mod bi_dashboard;
pub mod bi_metric;
pub mod data_export;
pub mod market_intelligence;
pub mod organization;
pub mod preference;
pub mod team_member;
pub mod webhook;
pub mod webhook_log;

pub use api_endpoint::Entity as ApiEndpoint;
pub use api_key::Entity as ApiKey;
pub use audit_log::Entity as AuditLog;
pub use bi_dashboard::Entity as BiDashboard;
pub use bi_metric::Entity as BiMetric;
pub use data_export::Entity as DataExport;
pub use market_intelligence::Entity as MarketIntelligence;
pub use organization::Entity as Organization;
pub use preference::Entity as Preference;
pub use team_member::Entity as TeamMember;
pub use webhook::Entity as Webhook;
pub use webhook_log::Entity as WebhookLog;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "licensehub-admin".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Health probe response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// `ok` or `degraded`
    #[schema(example = "ok")]
    pub status: String,
    pub database: bool,
}
