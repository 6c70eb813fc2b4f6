//! Market intelligence handlers.

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
use crate::handlers::{audit, count_created, or_empty, parse_id, to_utc};
use crate::models::market_intelligence::Model as MarketModel;
use crate::repositories::market::{MarketChanges, NewMarketEntry};
use crate::repositories::{ListOptions, MarketIntelligenceRepository};
use crate::server::AppState;
use crate::tabs::{
    self,
    market::{self as tab, MarketFilter, MarketStats},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarketEntryView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub software_name: String,
    pub category: String,
    pub market_rank: i32,
    pub total_users: i64,
    pub average_rating: f64,
    pub growth_rate: f64,
    pub main_competitors: Vec<String>,
    pub market_share: f64,
    pub updated_at: DateTime<Utc>,
}

impl From<MarketModel> for MarketEntryView {
    fn from(model: MarketModel) -> Self {
        Self {
            id: model.id,
            main_competitors: tabs::string_list(model.main_competitors.as_ref()),
            software_name: model.software_name,
            category: model.category,
            market_rank: model.market_rank,
            total_users: model.total_users,
            average_rating: model.average_rating,
            growth_rate: model.growth_rate,
            market_share: model.market_share,
            updated_at: to_utc(model.updated_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarketResponse {
    pub entries: Vec<MarketEntryView>,
    pub categories: Vec<String>,
    pub stats: MarketStats,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateMarketEntryRequest {
    #[schema(example = "Slack")]
    pub software_name: String,
    pub category: String,
    pub market_rank: i32,
    pub total_users: i64,
    pub average_rating: f64,
    pub growth_rate: f64,
    pub main_competitors: Vec<String>,
    pub market_share: f64,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateMarketEntryRequest {
    pub software_name: Option<String>,
    pub category: Option<String>,
    pub market_rank: Option<i32>,
    pub total_users: Option<i64>,
    pub average_rating: Option<f64>,
    pub growth_rate: Option<f64>,
    pub main_competitors: Option<Vec<String>>,
    pub market_share: Option<f64>,
}

/// Market rankings, best rank first
#[utoipa::path(
    get,
    path = "/api/v1/market-intelligence",
    security(("bearer_auth" = [])),
    params(MarketFilter),
    responses(
        (status = 200, description = "Market intelligence tab", body = MarketResponse),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "market"
)]
pub async fn list_market(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(filter): Query<MarketFilter>,
) -> Json<MarketResponse> {
    let entries = or_empty(
        MarketIntelligenceRepository::new(&state.db)
            .list(ListOptions::ascending())
            .await,
        "market_intelligence",
    );

    let categories = tab::categories(&entries);
    let (filtered, stats) = tab::apply(&filter, entries);
    Json(MarketResponse {
        entries: filtered.into_iter().map(MarketEntryView::from).collect(),
        categories,
        stats,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/market-intelligence",
    security(("bearer_auth" = [])),
    request_body = CreateMarketEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = MarketEntryView),
        (status = 400, description = "Validation error", body = ApiError)
    ),
    tag = "market"
)]
pub async fn create_market_entry(
    State(state): State<AppState>,
    session: AdminSession,
    Json(request): Json<CreateMarketEntryRequest>,
) -> Result<(StatusCode, Json<MarketEntryView>), ApiError> {
    let entry = NewMarketEntry {
        software_name: request.software_name,
        category: request.category,
        market_rank: request.market_rank,
        total_users: request.total_users,
        average_rating: request.average_rating,
        growth_rate: request.growth_rate,
        main_competitors: request.main_competitors,
        market_share: request.market_share,
    };

    let created = MarketIntelligenceRepository::new(&state.db)
        .create(entry, Utc::now())
        .await?;

    count_created("market_intelligence");
    audit(
        &state,
        &session,
        "create",
        "market_intelligence",
        Some(created.id.to_string()),
        json!({ "description": format!("{} added to market intelligence", created.software_name) }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/market-intelligence/{id}",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Market entry id")),
    request_body = UpdateMarketEntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = MarketEntryView),
        (status = 400, description = "Validation error", body = ApiError),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "market"
)]
pub async fn update_market_entry(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    Json(request): Json<UpdateMarketEntryRequest>,
) -> Result<Json<MarketEntryView>, ApiError> {
    let id = parse_id(&id)?;
    let changes = MarketChanges {
        software_name: request.software_name,
        category: request.category,
        market_rank: request.market_rank,
        total_users: request.total_users,
        average_rating: request.average_rating,
        growth_rate: request.growth_rate,
        main_competitors: request.main_competitors,
        market_share: request.market_share,
    };

    let updated = MarketIntelligenceRepository::new(&state.db)
        .update(id, changes, Utc::now())
        .await?;

    audit(
        &state,
        &session,
        "update",
        "market_intelligence",
        Some(id.to_string()),
        json!({ "description": format!("{} updated", updated.software_name) }),
    )
    .await;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/market-intelligence/{id}",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Market entry id")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "market"
)]
pub async fn delete_market_entry(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    MarketIntelligenceRepository::new(&state.db)
        .delete(id)
        .await?;

    audit(
        &state,
        &session,
        "delete",
        "market_intelligence",
        Some(id.to_string()),
        json!({}),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
