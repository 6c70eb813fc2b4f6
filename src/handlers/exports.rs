//! Data export job handlers. Jobs are recorded as pending; nothing is extracted.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::error::{ApiError, not_found};
use crate::handlers::{audit, count_created, or_empty, parse_id, to_utc};
use crate::models::data_export::{EXPORT_FORMATS, EXPORT_SOURCES, Model as DataExportModel};
use crate::repositories::data_export::NewDataExport;
use crate::repositories::{DataExportRepository, ListOptions};
use crate::server::AppState;
use crate::tabs::exports::{self as tab, ExportStats, RECENT_EXPORTS_LIMIT};

pub const DEFAULT_FORMAT: &str = "csv";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DataExportView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub format: String,
    pub data_source: String,
    pub filters: Option<String>,
    pub status: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub download_url: Option<String>,
    pub file_size: Option<i64>,
}

impl From<DataExportModel> for DataExportView {
    fn from(model: DataExportModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            format: model.format,
            data_source: model.data_source,
            filters: model.filters,
            status: model.status,
            user_id: model.user_id,
            created_at: to_utc(model.created_at),
            completed_at: model.completed_at.map(to_utc),
            download_url: model.download_url,
            file_size: model.file_size,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportsResponse {
    pub exports: Vec<DataExportView>,
    pub stats: ExportStats,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateExportRequest {
    #[schema(example = "Q3 organizations")]
    pub name: String,
    /// json | csv | excel, defaults to csv
    pub format: Option<String>,
    #[schema(example = "admin_organizations")]
    pub data_source: String,
    /// Free-text filter description stored with the job
    pub filters: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportSourcesResponse {
    pub sources: Vec<String>,
    pub formats: Vec<String>,
}

/// Latest export jobs with status counts
#[utoipa::path(
    get,
    path = "/api/v1/exports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Export jobs", body = ExportsResponse),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "exports"
)]
pub async fn list_exports(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Json<ExportsResponse> {
    let jobs = or_empty(
        DataExportRepository::new(&state.db)
            .list(ListOptions::newest_first().with_limit(RECENT_EXPORTS_LIMIT))
            .await,
        "data_exports",
    );

    let stats = tab::stats(&jobs);
    Json(ExportsResponse {
        exports: jobs.into_iter().map(DataExportView::from).collect(),
        stats,
    })
}

/// Queues an export job owned by the current operator
#[utoipa::path(
    post,
    path = "/api/v1/exports",
    security(("bearer_auth" = [])),
    request_body = CreateExportRequest,
    responses(
        (status = 201, description = "Export job recorded", body = DataExportView),
        (status = 400, description = "Validation error", body = ApiError)
    ),
    tag = "exports"
)]
pub async fn create_export(
    State(state): State<AppState>,
    session: AdminSession,
    Json(request): Json<CreateExportRequest>,
) -> Result<(StatusCode, Json<DataExportView>), ApiError> {
    let export = NewDataExport {
        name: request.name,
        format: request
            .format
            .filter(|format| !format.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
        data_source: request.data_source,
        filters: request.filters,
    };

    let created = DataExportRepository::new(&state.db)
        .create(export, session.user_id(), Utc::now())
        .await?;

    count_created("data_export");
    audit(
        &state,
        &session,
        "export",
        created.data_source.as_str(),
        Some(created.id.to_string()),
        json!({
            "description": format!("Export {} requested ({})", created.name, created.format),
        }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/exports/{id}",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Export job id")),
    responses(
        (status = 200, description = "Export job", body = DataExportView),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "exports"
)]
pub async fn get_export(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> Result<Json<DataExportView>, ApiError> {
    let id = parse_id(&id)?;
    let job = DataExportRepository::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| not_found("Export"))?;
    Ok(Json(job.into()))
}

/// Tables that can be exported and the supported formats
#[utoipa::path(
    get,
    path = "/api/v1/exports/sources",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Export catalogue", body = ExportSourcesResponse)
    ),
    tag = "exports"
)]
pub async fn list_sources(_session: AdminSession) -> Json<ExportSourcesResponse> {
    Json(ExportSourcesResponse {
        sources: EXPORT_SOURCES.iter().map(|source| source.to_string()).collect(),
        formats: EXPORT_FORMATS.iter().map(|format| format.to_string()).collect(),
    })
}
