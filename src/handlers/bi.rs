//! # BI Analytics Handlers
//!
//! Saved dashboards, tracked metrics and the synthesized chart series.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::error::ApiError;
use crate::handlers::session::operator_language;
use crate::handlers::{audit, count_created, or_empty, parse_id, to_utc};
use crate::i18n::Language;
use crate::models::bi_dashboard::Model as DashboardModel;
use crate::models::bi_metric::Model as MetricModel;
use crate::repositories::bi::{NewDashboard, NewMetric};
use crate::repositories::{BiRepository, ListOptions};
use crate::server::AppState;
use crate::tabs::{
    self,
    bi::{self as tab, AnalyticsData, DashboardFilter, DashboardStats},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub widgets: Vec<String>,
    pub is_public: bool,
    pub views: i64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl From<DashboardModel> for DashboardView {
    fn from(model: DashboardModel) -> Self {
        Self {
            id: model.id,
            widgets: tabs::string_list(model.widgets.as_ref()),
            name: model.name,
            description: model.description,
            category: model.category,
            is_public: model.is_public,
            views: model.views,
            created_by: model.created_by,
            created_at: to_utc(model.created_at),
            last_modified: to_utc(model.last_modified),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardsResponse {
    pub dashboards: Vec<DashboardView>,
    pub stats: DashboardStats,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateDashboardRequest {
    #[schema(example = "Revenue follow-up")]
    pub name: String,
    pub description: String,
    pub category: String,
    /// Empty for `revenue_chart`, `user_metrics` and `software_usage`
    pub widgets: Vec<String>,
    pub is_public: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetricView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub value: f64,
    pub previous_value: f64,
    pub change: f64,
    pub change_type: String,
    pub unit: String,
    pub period: String,
    pub updated_at: DateTime<Utc>,
}

impl From<MetricModel> for MetricView {
    fn from(model: MetricModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            value: model.value,
            previous_value: model.previous_value,
            change: model.change,
            change_type: model.change_type,
            unit: model.unit,
            period: model.period,
            updated_at: to_utc(model.updated_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetricsResponse {
    pub metrics: Vec<MetricView>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateMetricRequest {
    #[schema(example = "Monthly recurring revenue")]
    pub name: String,
    /// Defaults to `general`
    pub category: Option<String>,
    pub value: f64,
    pub previous_value: f64,
    pub unit: String,
    /// daily | weekly | monthly | quarterly, defaults to monthly
    pub period: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsResponse {
    pub language: Language,
    #[serde(flatten)]
    pub data: AnalyticsData,
}

#[utoipa::path(
    get,
    path = "/api/v1/bi/dashboards",
    security(("bearer_auth" = [])),
    params(DashboardFilter),
    responses(
        (status = 200, description = "Saved dashboards", body = DashboardsResponse),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "bi"
)]
pub async fn list_dashboards(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(filter): Query<DashboardFilter>,
) -> Json<DashboardsResponse> {
    let dashboards = or_empty(
        BiRepository::new(&state.db)
            .list_dashboards(ListOptions::newest_first())
            .await,
        "bi_dashboards",
    );

    let (filtered, stats) = tab::apply(&filter, dashboards);
    Json(DashboardsResponse {
        dashboards: filtered.into_iter().map(DashboardView::from).collect(),
        stats,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/bi/dashboards",
    security(("bearer_auth" = [])),
    request_body = CreateDashboardRequest,
    responses(
        (status = 201, description = "Dashboard created", body = DashboardView),
        (status = 400, description = "Validation error", body = ApiError)
    ),
    tag = "bi"
)]
pub async fn create_dashboard(
    State(state): State<AppState>,
    session: AdminSession,
    Json(request): Json<CreateDashboardRequest>,
) -> Result<(StatusCode, Json<DashboardView>), ApiError> {
    let dashboard = NewDashboard {
        name: request.name,
        description: request.description,
        category: request.category,
        widgets: request.widgets,
        is_public: request.is_public,
    };

    let created = BiRepository::new(&state.db)
        .create_dashboard(dashboard, session.user_id(), Utc::now())
        .await?;

    count_created("bi_dashboard");
    audit(
        &state,
        &session,
        "create",
        "bi_dashboard",
        Some(created.id.to_string()),
        json!({ "description": format!("Dashboard {} created", created.name) }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bi/dashboards/{id}",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Dashboard id")),
    responses(
        (status = 204, description = "Dashboard deleted"),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "bi"
)]
pub async fn delete_dashboard(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    BiRepository::new(&state.db).delete_dashboard(id).await?;

    audit(&state, &session, "delete", "bi_dashboard", Some(id.to_string()), json!({})).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Tracked metrics, most recently updated first
#[utoipa::path(
    get,
    path = "/api/v1/bi/metrics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Metrics", body = MetricsResponse)
    ),
    tag = "bi"
)]
pub async fn list_metrics(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Json<MetricsResponse> {
    let metrics = or_empty(
        BiRepository::new(&state.db)
            .list_metrics(ListOptions::newest_first())
            .await,
        "bi_metrics",
    );

    Json(MetricsResponse {
        metrics: metrics.into_iter().map(MetricView::from).collect(),
    })
}

/// Records a metric; the change against `previous_value` is derived
#[utoipa::path(
    post,
    path = "/api/v1/bi/metrics",
    security(("bearer_auth" = [])),
    request_body = CreateMetricRequest,
    responses(
        (status = 201, description = "Metric created", body = MetricView),
        (status = 400, description = "Validation error", body = ApiError)
    ),
    tag = "bi"
)]
pub async fn create_metric(
    State(state): State<AppState>,
    session: AdminSession,
    Json(request): Json<CreateMetricRequest>,
) -> Result<(StatusCode, Json<MetricView>), ApiError> {
    let metric = NewMetric {
        name: request.name,
        category: request
            .category
            .filter(|category| !category.trim().is_empty())
            .unwrap_or_else(|| "general".to_string()),
        value: request.value,
        previous_value: request.previous_value,
        unit: request.unit,
        period: request
            .period
            .filter(|period| !period.trim().is_empty())
            .unwrap_or_else(|| "monthly".to_string()),
    };

    let created = BiRepository::new(&state.db)
        .create_metric(metric, Utc::now())
        .await?;

    count_created("bi_metric");
    audit(
        &state,
        &session,
        "create",
        "bi_metric",
        Some(created.id.to_string()),
        json!({
            "description": format!("Metric {} recorded", created.name),
            "change_type": created.change_type,
        }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Chart series in the operator's language
#[utoipa::path(
    get,
    path = "/api/v1/bi/analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Analytics series", body = AnalyticsResponse)
    ),
    tag = "bi"
)]
pub async fn analytics(
    State(state): State<AppState>,
    session: AdminSession,
) -> Json<AnalyticsResponse> {
    let language = operator_language(&state, &session).await;
    let data = tab::synthesize_analytics(&mut rand::thread_rng(), language);
    Json(AnalyticsResponse { language, data })
}
