//! # API Management Handlers
//!
//! Partner API keys (masked listing, one-time full key on creation, toggle,
//! reveal, delete) and the descriptive endpoint catalogue.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::error::{ApiError, not_found};
use crate::handlers::{audit, count_created, or_empty, parse_id, to_utc};
use crate::models::api_endpoint::Model as ApiEndpointModel;
use crate::models::api_key::Model as ApiKeyModel;
use crate::normalization;
use crate::repositories::api_key::NewApiKey;
use crate::repositories::{ApiEndpointRepository, ApiKeyRepository, ListOptions};
use crate::secrets;
use crate::server::AppState;
use crate::tabs::{
    self,
    api_management::{self as tab, ApiFilter, ApiStats},
};

pub const DEFAULT_RATE_LIMIT: i32 = 1000;

/// Key as listed on the API tab. The secret is always masked here.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiKeyView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[schema(example = "lh_k3j9x0ab••••••••••••••••••")]
    pub api_key: String,
    pub key_prefix: String,
    pub platform: String,
    pub permissions: Vec<String>,
    pub status: String,
    pub usage_count: i64,
    pub rate_limit: i32,
    pub last_used: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub ip_whitelist: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ApiKeyModel> for ApiKeyView {
    fn from(model: ApiKeyModel) -> Self {
        Self {
            id: model.id,
            api_key: secrets::mask_secret(&model.api_key),
            permissions: tabs::string_list(model.permissions.as_ref()),
            ip_whitelist: tabs::string_list(model.ip_whitelist.as_ref()),
            name: model.name,
            description: model.description,
            key_prefix: model.key_prefix,
            platform: model.platform,
            status: model.status,
            usage_count: model.usage_count,
            rate_limit: model.rate_limit,
            last_used: model.last_used.map(to_utc),
            expires_at: model.expires_at.map(to_utc),
            created_at: to_utc(model.created_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiKeysResponse {
    pub keys: Vec<ApiKeyView>,
    pub stats: ApiStats,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateApiKeyRequest {
    #[schema(example = "Lebonlogiciel sync")]
    pub name: String,
    pub description: String,
    /// lebonlogiciel | prospection_saas | general
    pub platform: String,
    pub permissions: Vec<String>,
    /// Requests per hour, defaults to 1000
    pub rate_limit: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Comma-separated client addresses
    #[schema(example = "10.0.0.1, 10.0.0.2")]
    pub ip_whitelist: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiKeySecret {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub api_key: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiEndpointView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub path: String,
    pub method: String,
    pub description: String,
    pub data_type: String,
    pub platform: String,
    pub status: String,
    pub response_time_avg: f64,
    pub calls_today: i64,
    pub success_rate: f64,
}

impl From<ApiEndpointModel> for ApiEndpointView {
    fn from(model: ApiEndpointModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            path: model.path,
            method: model.method,
            description: model.description,
            data_type: model.data_type,
            platform: model.platform,
            status: model.status,
            response_time_avg: model.response_time_avg,
            calls_today: model.calls_today,
            success_rate: model.success_rate,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiEndpointsResponse {
    pub endpoints: Vec<ApiEndpointView>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateApiEndpointRequest {
    #[schema(example = "List organizations")]
    pub name: String,
    #[schema(example = "/api/v1/organizations")]
    pub path: String,
    pub method: String,
    pub description: String,
    pub data_type: String,
    pub platform: String,
    pub status: String,
}

/// Keys with filters and usage cards
#[utoipa::path(
    get,
    path = "/api/v1/api-keys",
    security(("bearer_auth" = [])),
    params(ApiFilter),
    responses(
        (status = 200, description = "API keys with masked secrets", body = ApiKeysResponse),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "api-management"
)]
pub async fn list_api_keys(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(filter): Query<ApiFilter>,
) -> Json<ApiKeysResponse> {
    let keys = or_empty(
        ApiKeyRepository::new(&state.db)
            .list(ListOptions::newest_first())
            .await,
        "api_keys",
    );
    let endpoints = or_empty(
        ApiEndpointRepository::new(&state.db)
            .list(ListOptions::ascending())
            .await,
        "api_endpoints",
    );

    let stats = tab::stats(&keys, &endpoints);
    Json(ApiKeysResponse {
        keys: keys
            .into_iter()
            .filter(|key| filter.matches_key(key))
            .map(ApiKeyView::from)
            .collect(),
        stats,
    })
}

/// Issues a new key and returns it in full, once
#[utoipa::path(
    post,
    path = "/api/v1/api-keys",
    security(("bearer_auth" = [])),
    request_body = CreateApiKeyRequest,
    responses(
        (status = 201, description = "Key created; `api_key` is unmasked only in this response", body = ApiKeyView),
        (status = 400, description = "Validation error", body = ApiError)
    ),
    tag = "api-management"
)]
pub async fn create_api_key(
    State(state): State<AppState>,
    session: AdminSession,
    Json(request): Json<CreateApiKeyRequest>,
) -> Result<(StatusCode, Json<ApiKeyView>), ApiError> {
    let secret = secrets::generate_api_key(&mut rand::thread_rng());
    let new_key = NewApiKey {
        name: request.name,
        description: request.description,
        platform: if request.platform.trim().is_empty() {
            "general".to_string()
        } else {
            request.platform
        },
        permissions: request.permissions,
        rate_limit: request.rate_limit.unwrap_or(DEFAULT_RATE_LIMIT),
        expires_at: request.expires_at,
        ip_whitelist: normalization::split_list(&request.ip_whitelist),
    };

    let created = ApiKeyRepository::new(&state.db)
        .create(new_key, secret, Utc::now())
        .await?;
    let full_key = created.api_key.clone();

    count_created("api_key");
    audit(
        &state,
        &session,
        "create",
        "api_key",
        Some(created.id.to_string()),
        json!({
            "description": format!("API key {} created", created.name),
            "key_prefix": created.key_prefix,
        }),
    )
    .await;

    let mut key = ApiKeyView::from(created);
    key.api_key = full_key;
    Ok((StatusCode::CREATED, Json(key)))
}

/// Switches a key between active and inactive
#[utoipa::path(
    post,
    path = "/api/v1/api-keys/{id}/toggle",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "API key id")),
    responses(
        (status = 200, description = "Key toggled", body = ApiKeyView),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "api-management"
)]
pub async fn toggle_api_key(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<Json<ApiKeyView>, ApiError> {
    let id = parse_id(&id)?;
    let updated = ApiKeyRepository::new(&state.db).toggle(id).await?;

    audit(
        &state,
        &session,
        "toggle",
        "api_key",
        Some(id.to_string()),
        json!({ "status": updated.status }),
    )
    .await;

    Ok(Json(updated.into()))
}

/// Reveals the full key
#[utoipa::path(
    get,
    path = "/api/v1/api-keys/{id}/secret",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "API key id")),
    responses(
        (status = 200, description = "Full key", body = ApiKeySecret),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "api-management"
)]
pub async fn reveal_api_key(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<Json<ApiKeySecret>, ApiError> {
    let id = parse_id(&id)?;
    let key = ApiKeyRepository::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| not_found("API key"))?;

    tracing::info!(operator = %session.email, key_prefix = %key.key_prefix, "API key revealed");
    Ok(Json(ApiKeySecret {
        id: key.id,
        api_key: key.api_key,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/api-keys/{id}",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "API key id")),
    responses(
        (status = 204, description = "Key deleted"),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "api-management"
)]
pub async fn delete_api_key(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    ApiKeyRepository::new(&state.db).delete(id).await?;

    audit(&state, &session, "delete", "api_key", Some(id.to_string()), json!({})).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Endpoint catalogue with filters
#[utoipa::path(
    get,
    path = "/api/v1/api-endpoints",
    security(("bearer_auth" = [])),
    params(ApiFilter),
    responses(
        (status = 200, description = "Endpoint catalogue", body = ApiEndpointsResponse)
    ),
    tag = "api-management"
)]
pub async fn list_api_endpoints(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(filter): Query<ApiFilter>,
) -> Json<ApiEndpointsResponse> {
    let endpoints = or_empty(
        ApiEndpointRepository::new(&state.db)
            .list(ListOptions::ascending())
            .await,
        "api_endpoints",
    );

    Json(ApiEndpointsResponse {
        endpoints: endpoints
            .into_iter()
            .filter(|endpoint| filter.matches_endpoint(endpoint))
            .map(ApiEndpointView::from)
            .collect(),
    })
}

/// Adds an entry to the endpoint catalogue
#[utoipa::path(
    post,
    path = "/api/v1/api-endpoints",
    security(("bearer_auth" = [])),
    request_body = CreateApiEndpointRequest,
    responses(
        (status = 201, description = "Endpoint created", body = ApiEndpointView),
        (status = 400, description = "Validation error", body = ApiError)
    ),
    tag = "api-management"
)]
pub async fn create_api_endpoint(
    State(state): State<AppState>,
    session: AdminSession,
    Json(request): Json<CreateApiEndpointRequest>,
) -> Result<(StatusCode, Json<ApiEndpointView>), ApiError> {
    // Blank fields take the same defaults as imported catalogue entries.
    let record: Map<String, Value> = [
        ("name", request.name),
        ("path", request.path),
        ("method", request.method),
        ("description", request.description),
        ("data_type", request.data_type),
        ("platform", request.platform),
        ("status", request.status),
    ]
    .into_iter()
    .map(|(field, value)| (field.to_string(), Value::String(value)))
    .collect();
    let endpoint = normalization::normalize_api_endpoint(&record);

    let created = ApiEndpointRepository::new(&state.db)
        .create(endpoint)
        .await?;

    count_created("api_endpoint");
    audit(
        &state,
        &session,
        "create",
        "api_endpoint",
        Some(created.id.to_string()),
        json!({ "description": format!("{} {} added to the catalogue", created.method, created.path) }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created.into())))
}
