//! # Organizations API Handlers
//!
//! Listing with search/status/consent filters and summary cards, CRUD for
//! single organizations and bulk import of raw records.

use axum::{
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::error::{ApiError, not_found, validation_error};
use crate::handlers::{audit, count_created, or_empty, parse_id, to_utc};
use crate::models::organization::{Model as OrganizationModel, OrganizationStatus};
use crate::normalization;
use crate::repositories::organization::{NewOrganization, OrganizationChanges};
use crate::repositories::{ListOptions, OrganizationRepository};
use crate::server::AppState;
use crate::tabs::organizations::{self as tab, OrganizationFilter, OrganizationStats};

/// Organization as shown on the organizations tab
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrganizationView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub industry: String,
    pub size: String,
    pub country: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub status: String,
    pub consent_lebonlogiciel: bool,
    pub consent_prospection: bool,
    pub consent_date: DateTime<Utc>,
    pub total_licenses: i64,
    pub total_users: i64,
    pub monthly_revenue: f64,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl From<OrganizationModel> for OrganizationView {
    fn from(model: OrganizationModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            domain: model.domain,
            industry: model.industry,
            size: model.size,
            country: model.country,
            contact_email: model.contact_email,
            contact_phone: model.contact_phone,
            address: model.address,
            status: model.status,
            consent_lebonlogiciel: model.consent_lebonlogiciel,
            consent_prospection: model.consent_prospection,
            consent_date: to_utc(model.consent_date),
            total_licenses: model.total_licenses,
            total_users: model.total_users,
            monthly_revenue: model.monthly_revenue,
            created_at: to_utc(model.created_at),
            last_activity: to_utc(model.last_activity),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrganizationsResponse {
    pub organizations: Vec<OrganizationView>,
    pub stats: OrganizationStats,
}

/// Form payload for a new organization. Only `name` is required.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateOrganizationRequest {
    #[schema(example = "Acme SAS")]
    pub name: String,
    pub domain: String,
    pub industry: String,
    pub size: String,
    pub country: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub consent_lebonlogiciel: bool,
    pub consent_prospection: bool,
}

/// Partial update. Omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrganizationRequest {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub country: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    /// active | inactive | pending
    pub status: Option<String>,
    pub consent_lebonlogiciel: Option<bool>,
    pub consent_prospection: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportResponse {
    pub imported: usize,
}

/// Lists organizations with filters and summary cards
#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    security(("bearer_auth" = [])),
    params(OrganizationFilter),
    responses(
        (status = 200, description = "Organizations tab", body = OrganizationsResponse),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "organizations"
)]
pub async fn list_organizations(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(filter): Query<OrganizationFilter>,
) -> Json<OrganizationsResponse> {
    let organizations = or_empty(
        OrganizationRepository::new(&state.db)
            .list(ListOptions::newest_first())
            .await,
        "organizations",
    );

    let (filtered, stats) = tab::apply(&filter, organizations);
    Json(OrganizationsResponse {
        organizations: filtered.into_iter().map(OrganizationView::from).collect(),
        stats,
    })
}

/// Creates an active organization from the admin form
#[utoipa::path(
    post,
    path = "/api/v1/organizations",
    security(("bearer_auth" = [])),
    request_body = CreateOrganizationRequest,
    responses(
        (status = 201, description = "Organization created", body = OrganizationView),
        (status = 400, description = "Validation error", body = ApiError),
        (status = 403, description = "Read-only operator", body = ApiError)
    ),
    tag = "organizations"
)]
pub async fn create_organization(
    State(state): State<AppState>,
    session: AdminSession,
    Json(request): Json<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<OrganizationView>), ApiError> {
    let now = Utc::now();
    let organization = NewOrganization {
        domain: request.domain,
        industry: request.industry,
        size: request.size,
        country: request.country,
        contact_email: request.contact_email,
        contact_phone: request.contact_phone,
        address: request.address,
        consent_lebonlogiciel: request.consent_lebonlogiciel,
        consent_prospection: request.consent_prospection,
        ..NewOrganization::from_form(request.name.trim().to_string(), now)
    };

    let created = OrganizationRepository::new(&state.db)
        .create(organization)
        .await?;

    count_created("organization");
    audit(
        &state,
        &session,
        "create",
        "organization",
        Some(created.id.to_string()),
        json!({
            "description": format!("Organization {} added", created.name),
            "organization_name": created.name,
        }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Fetches one organization
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{id}",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Organization", body = OrganizationView),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "organizations"
)]
pub async fn get_organization(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> Result<Json<OrganizationView>, ApiError> {
    let id = parse_id(&id)?;
    let organization = OrganizationRepository::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| not_found("Organization"))?;
    Ok(Json(organization.into()))
}

/// Edits identity, contact, status and consent fields
#[utoipa::path(
    put,
    path = "/api/v1/organizations/{id}",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Organization id")),
    request_body = UpdateOrganizationRequest,
    responses(
        (status = 200, description = "Organization updated", body = OrganizationView),
        (status = 400, description = "Validation error", body = ApiError),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "organizations"
)]
pub async fn update_organization(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    Json(request): Json<UpdateOrganizationRequest>,
) -> Result<Json<OrganizationView>, ApiError> {
    let id = parse_id(&id)?;
    let status = request
        .status
        .as_deref()
        .map(|raw| {
            OrganizationStatus::parse(raw).ok_or_else(|| {
                validation_error(
                    "Invalid organization status",
                    json!({ "status": "Must be one of: active, inactive, pending" }),
                )
            })
        })
        .transpose()?;

    let changes = OrganizationChanges {
        name: request.name,
        domain: request.domain,
        industry: request.industry,
        size: request.size,
        country: request.country,
        contact_email: request.contact_email,
        contact_phone: request.contact_phone,
        address: request.address,
        status,
        consent_lebonlogiciel: request.consent_lebonlogiciel,
        consent_prospection: request.consent_prospection,
    };

    let updated = OrganizationRepository::new(&state.db)
        .update(id, changes, Utc::now())
        .await?;

    audit(
        &state,
        &session,
        "update",
        "organization",
        Some(updated.id.to_string()),
        json!({
            "description": format!("Organization {} updated", updated.name),
            "organization_name": updated.name,
        }),
    )
    .await;

    Ok(Json(updated.into()))
}

/// Deletes one organization
#[utoipa::path(
    delete,
    path = "/api/v1/organizations/{id}",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Organization id")),
    responses(
        (status = 204, description = "Organization deleted"),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "organizations"
)]
pub async fn delete_organization(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    OrganizationRepository::new(&state.db).delete(id).await?;

    audit(
        &state,
        &session,
        "delete",
        "organization",
        Some(id.to_string()),
        json!({}),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// Imports raw organization records written in camelCase or snake_case
#[utoipa::path(
    post,
    path = "/api/v1/organizations/import",
    security(("bearer_auth" = [])),
    request_body(content = Vec<serde_json::Value>, description = "Raw organization records"),
    responses(
        (status = 201, description = "Records imported", body = ImportResponse),
        (status = 400, description = "Payload is not an array of objects", body = ApiError)
    ),
    tag = "organizations"
)]
pub async fn import_organizations(
    State(state): State<AppState>,
    session: AdminSession,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ImportResponse>), ApiError> {
    let Json(payload) = payload?;
    let organizations = normalization::normalize_organizations(&payload, Utc::now())
        .map_err(|err| validation_error("Invalid import payload", json!({ "records": err.to_string() })))?;

    let imported = OrganizationRepository::new(&state.db)
        .import(organizations)
        .await?;

    tracing::info!(imported, "Organizations imported");
    audit(
        &state,
        &session,
        "import",
        "organization",
        None,
        json!({ "description": format!("{} organizations imported", imported) }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(ImportResponse { imported })))
}
