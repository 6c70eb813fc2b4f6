//! Overview tab handler.

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AdminSession;
use crate::handlers::or_empty;
use crate::repositories::{
    AuditLogRepository, BiRepository, DataExportRepository, ListOptions,
    MarketIntelligenceRepository, OrganizationRepository,
};
use crate::server::AppState;
use crate::tabs::overview::{
    self, ActivityItem, OverviewStats, RECENT_ACTIVITY_LIMIT, TOP_SOFTWARE_LIMIT, TopSoftware,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OverviewResponse {
    pub stats: OverviewStats,
    pub recent_activity: Vec<ActivityItem>,
    pub top_software: Vec<TopSoftware>,
}

/// Headline cards, recent activity and most used software
#[utoipa::path(
    get,
    path = "/api/v1/overview",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Overview tab", body = OverviewResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError)
    ),
    tag = "overview"
)]
pub async fn get_overview(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Json<OverviewResponse> {
    let organizations = or_empty(
        OrganizationRepository::new(&state.db)
            .list(ListOptions::newest_first())
            .await,
        "organizations",
    );

    let monthly_revenue = match BiRepository::new(&state.db)
        .latest_metric("revenue", "monthly")
        .await
    {
        Ok(metric) => metric.map(|metric| metric.value).unwrap_or(0.0),
        Err(err) => {
            tracing::error!(error = %err, "Failed to load revenue metric");
            0.0
        }
    };

    let data_exports = match DataExportRepository::new(&state.db).count().await {
        Ok(count) => count,
        Err(err) => {
            tracing::error!(error = %err, "Failed to count data exports");
            0
        }
    };

    let recent_activity = or_empty(
        AuditLogRepository::new(&state.db)
            .list(ListOptions::newest_first().with_limit(RECENT_ACTIVITY_LIMIT))
            .await,
        "audit_logs",
    );

    let top_software = or_empty(
        MarketIntelligenceRepository::new(&state.db)
            .top_by_users(TOP_SOFTWARE_LIMIT)
            .await,
        "market_intelligence",
    );

    Json(OverviewResponse {
        stats: OverviewStats {
            total_organizations: organizations.len() as u64,
            active_licenses: overview::active_licenses(&organizations),
            monthly_revenue,
            data_exports,
        },
        recent_activity: recent_activity.into_iter().map(ActivityItem::from).collect(),
        top_software: top_software.into_iter().map(TopSoftware::from).collect(),
    })
}
