//! # Webhook Handlers
//!
//! Outbound webhook configuration for partner platforms. Test deliveries are
//! simulated: a log row is written and no request leaves the service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::error::ApiError;
use crate::handlers::{audit, count_created, or_empty, parse_id, to_utc};
use crate::models::webhook::{AVAILABLE_EVENTS, Model as WebhookModel};
use crate::models::webhook_log::Model as WebhookLogModel;
use crate::repositories::webhook::NewWebhook;
use crate::repositories::{ListOptions, WebhookRepository};
use crate::secrets;
use crate::server::AppState;
use crate::tabs::{
    self,
    webhooks::{self as tab, WebhookFilter, WebhookStats},
};

/// Deliveries loaded for the tab and the logs endpoint.
pub const RECENT_LOGS_LIMIT: u64 = 100;

pub const DEFAULT_RETRY_COUNT: i32 = 3;
pub const DEFAULT_TIMEOUT_SECS: i32 = 30;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhookView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub platform: String,
    pub events: Vec<String>,
    pub status: String,
    pub secret: String,
    pub retry_count: i32,
    pub timeout: i32,
    pub total_calls: i64,
    pub success_rate: f64,
    pub last_triggered: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<WebhookModel> for WebhookView {
    fn from(model: WebhookModel) -> Self {
        Self {
            id: model.id,
            events: tabs::string_list(model.events.as_ref()),
            secret: secrets::mask_secret(&model.secret),
            name: model.name,
            url: model.url,
            platform: model.platform,
            status: model.status,
            retry_count: model.retry_count,
            timeout: model.timeout,
            total_calls: model.total_calls,
            success_rate: model.success_rate,
            last_triggered: model.last_triggered.map(to_utc),
            created_at: to_utc(model.created_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhookLogView {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[schema(value_type = String)]
    pub webhook_id: Uuid,
    pub event: String,
    pub status: String,
    pub response_code: Option<i32>,
    /// Milliseconds
    pub response_time: i64,
    pub payload: Value,
    pub error: Option<String>,
    pub retry_count: i32,
    pub timestamp: DateTime<Utc>,
}

impl From<WebhookLogModel> for WebhookLogView {
    fn from(model: WebhookLogModel) -> Self {
        // Snapshots are stored as text; anything unparsable is shown verbatim.
        let payload = serde_json::from_str(&model.payload)
            .unwrap_or_else(|_| Value::String(model.payload.clone()));
        Self {
            id: model.id,
            webhook_id: model.webhook_id,
            event: model.event,
            status: model.status,
            response_code: model.response_code,
            response_time: model.response_time,
            payload,
            error: model.error,
            retry_count: model.retry_count,
            timestamp: to_utc(model.timestamp),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhooksResponse {
    pub webhooks: Vec<WebhookView>,
    pub recent_logs: Vec<WebhookLogView>,
    pub stats: WebhookStats,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateWebhookRequest {
    #[schema(example = "CRM sync")]
    pub name: String,
    #[schema(example = "https://hooks.example.com/licensehub")]
    pub url: String,
    /// lebonlogiciel | prospection
    pub platform: String,
    pub events: Vec<String>,
    /// active | inactive, defaults to active
    pub status: Option<String>,
    /// 1..=10, defaults to 3
    pub retry_count: Option<i32>,
    /// Seconds, defaults to 30
    pub timeout: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogsQuery {
    /// Only deliveries of this webhook
    pub webhook_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogsResponse {
    pub logs: Vec<WebhookLogView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventsResponse {
    pub events: Vec<String>,
}

/// Webhooks with filters, recent deliveries and cards
#[utoipa::path(
    get,
    path = "/api/v1/webhooks",
    security(("bearer_auth" = [])),
    params(WebhookFilter),
    responses(
        (status = 200, description = "Webhooks tab", body = WebhooksResponse),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "webhooks"
)]
pub async fn list_webhooks(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(filter): Query<WebhookFilter>,
) -> Json<WebhooksResponse> {
    let repo = WebhookRepository::new(&state.db);
    let webhooks = or_empty(repo.list(ListOptions::newest_first()).await, "webhooks");
    let logs = or_empty(
        repo.list_logs(None, ListOptions::newest_first().with_limit(RECENT_LOGS_LIMIT))
            .await,
        "webhook_logs",
    );

    let stats = tab::stats(&webhooks, &logs, Utc::now().date_naive());
    Json(WebhooksResponse {
        webhooks: webhooks
            .into_iter()
            .filter(|webhook| filter.matches(webhook))
            .map(WebhookView::from)
            .collect(),
        recent_logs: logs.into_iter().map(WebhookLogView::from).collect(),
        stats,
    })
}

/// Registers a webhook with a freshly generated signing secret
#[utoipa::path(
    post,
    path = "/api/v1/webhooks",
    security(("bearer_auth" = [])),
    request_body = CreateWebhookRequest,
    responses(
        (status = 201, description = "Webhook created", body = WebhookView),
        (status = 400, description = "Validation error", body = ApiError)
    ),
    tag = "webhooks"
)]
pub async fn create_webhook(
    State(state): State<AppState>,
    session: AdminSession,
    Json(request): Json<CreateWebhookRequest>,
) -> Result<(StatusCode, Json<WebhookView>), ApiError> {
    let secret = secrets::generate_webhook_secret(&mut rand::thread_rng());
    let new_webhook = NewWebhook {
        name: request.name,
        url: request.url,
        platform: request.platform,
        events: request.events,
        status: request.status.unwrap_or_else(|| "active".to_string()),
        retry_count: request.retry_count.unwrap_or(DEFAULT_RETRY_COUNT),
        timeout: request.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
    };

    let created = WebhookRepository::new(&state.db)
        .create(new_webhook, secret, Utc::now())
        .await?;

    count_created("webhook");
    audit(
        &state,
        &session,
        "create",
        "webhook",
        Some(created.id.to_string()),
        json!({ "description": format!("Webhook {} created", created.name), "url": created.url }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/webhooks/{id}/toggle",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Webhook id")),
    responses(
        (status = 200, description = "Webhook toggled", body = WebhookView),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "webhooks"
)]
pub async fn toggle_webhook(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<Json<WebhookView>, ApiError> {
    let id = parse_id(&id)?;
    let updated = WebhookRepository::new(&state.db).toggle(id).await?;

    audit(
        &state,
        &session,
        "toggle",
        "webhook",
        Some(id.to_string()),
        json!({ "status": updated.status }),
    )
    .await;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/webhooks/{id}",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Webhook id")),
    responses(
        (status = 204, description = "Webhook deleted"),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "webhooks"
)]
pub async fn delete_webhook(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    WebhookRepository::new(&state.db).delete(id).await?;

    audit(&state, &session, "delete", "webhook", Some(id.to_string()), json!({})).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Simulates a test delivery and records it in the delivery log
#[utoipa::path(
    post,
    path = "/api/v1/webhooks/{id}/test",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Webhook id")),
    responses(
        (status = 201, description = "Delivery logged", body = WebhookLogView),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "webhooks"
)]
pub async fn test_webhook(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<WebhookLogView>), ApiError> {
    let id = parse_id(&id)?;
    let now = Utc::now();
    let delivery = tab::simulated_test_delivery(&mut rand::thread_rng(), id, now);

    let log = WebhookRepository::new(&state.db)
        .record_delivery(id, delivery, now)
        .await?;

    counter!("webhook_test_deliveries_total", "status" => log.status.clone()).increment(1);
    info!(
        webhook_id = %id,
        operator = %session.email,
        response_time_ms = log.response_time,
        "Simulated webhook test delivery"
    );
    audit(
        &state,
        &session,
        "test",
        "webhook",
        Some(id.to_string()),
        json!({ "description": "Test webhook delivered", "log_id": log.id }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(log.into())))
}

/// Latest deliveries, newest first
#[utoipa::path(
    get,
    path = "/api/v1/webhooks/logs",
    security(("bearer_auth" = [])),
    params(LogsQuery),
    responses(
        (status = 200, description = "Delivery logs", body = LogsResponse),
        (status = 400, description = "Invalid webhook id", body = ApiError)
    ),
    tag = "webhooks"
)]
pub async fn list_webhook_logs(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(query): Query<LogsQuery>,
) -> Result<Json<LogsResponse>, ApiError> {
    let webhook_id = query
        .webhook_id
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(parse_id)
        .transpose()?;

    let logs = or_empty(
        WebhookRepository::new(&state.db)
            .list_logs(
                webhook_id,
                ListOptions::newest_first().with_limit(RECENT_LOGS_LIMIT),
            )
            .await,
        "webhook_logs",
    );

    Ok(Json(LogsResponse {
        logs: logs.into_iter().map(WebhookLogView::from).collect(),
    }))
}

/// Events a webhook can subscribe to
#[utoipa::path(
    get,
    path = "/api/v1/webhooks/events",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event catalogue", body = EventsResponse)
    ),
    tag = "webhooks"
)]
pub async fn list_events(_session: AdminSession) -> Json<EventsResponse> {
    Json(EventsResponse {
        events: AVAILABLE_EVENTS.iter().map(|event| event.to_string()).collect(),
    })
}
