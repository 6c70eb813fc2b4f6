//! # API Handlers
//!
//! HTTP endpoint handlers for the admin API, one module per dashboard tab.
//! Tab views degrade to empty listings when the store fails; mutations
//! surface their errors as problem+json.

use axum::{extract::State, response::Json};
use chrono::{DateTime, Utc};
use metrics::counter;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::db;
use crate::error::{ApiError, RepositoryError, validation_error};
use crate::models::{HealthStatus, ServiceInfo};
use crate::repositories::AuditLogRepository;
use crate::repositories::audit_log::AuditEntry;
use crate::server::AppState;

pub mod api_keys;
pub mod bi;
pub mod exports;
pub mod market;
pub mod organizations;
pub mod overview;
pub mod session;
pub mod team;
pub mod webhooks;

/// Root handler that returns basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Liveness probe including a database round-trip
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service health", body = HealthStatus)
    ),
    tag = "root"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let database = match db::health_check(&state.db).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Database health check failed");
            false
        }
    };
    Json(HealthStatus {
        status: if database { "ok" } else { "degraded" }.to_string(),
        database,
    })
}

/// Parse a path id, reporting malformed ids as validation errors.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        validation_error(
            "Invalid identifier",
            serde_json::json!({ "id": "Must be a valid UUID" }),
        )
    })
}

pub(crate) fn to_utc(value: DateTimeWithTimeZone) -> DateTime<Utc> {
    value.with_timezone(&Utc)
}

/// Tab listings fall back to an empty list when the store fails.
pub(crate) fn or_empty<T>(result: Result<Vec<T>, RepositoryError>, what: &str) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!(error = %err, listing = what, "Failed to load listing, showing none");
            Vec::new()
        }
    }
}

/// Record an audit row for a mutation. Failures are logged, never returned.
pub(crate) async fn audit(
    state: &AppState,
    session: &AdminSession,
    action: &str,
    resource: &str,
    resource_id: Option<String>,
    details: Value,
) {
    let entry = AuditEntry {
        user_id: session.user_id().to_string(),
        action: action.to_string(),
        resource: resource.to_string(),
        resource_id,
        details,
    };
    if let Err(err) = AuditLogRepository::new(&state.db)
        .record(entry, Utc::now())
        .await
    {
        tracing::warn!(error = %err, action, resource, "Failed to record audit log entry");
    }
}

/// Count a created record of `resource` for the service metrics.
pub(crate) fn count_created(resource: &'static str) {
    counter!("admin_records_created_total", "resource" => resource).increment(1);
}
