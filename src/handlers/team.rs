//! Team access handlers: admin membership and roles.

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
use crate::error::{ApiError, validation_error};
use crate::handlers::session::operator_language;
use crate::handlers::{audit, count_created, or_empty, parse_id, to_utc};
use crate::i18n;
use crate::models::team_member::{AdminRole, Model as TeamMemberModel};
use crate::repositories::team::{NewTeamMember, TeamMemberChanges};
use crate::repositories::{ListOptions, TeamRepository};
use crate::server::AppState;
use crate::tabs::{
    self,
    team::{self as tab, TeamStats},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeamMemberView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub user_id: String,
    pub role: String,
    /// Role label in the operator's language
    pub role_label: String,
    pub permissions: Vec<String>,
    pub invited_by: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub last_active: Option<DateTime<Utc>>,
}

impl TeamMemberView {
    fn new(model: TeamMemberModel, language: i18n::Language) -> Self {
        let role_label = AdminRole::parse(&model.role)
            .map(|role| i18n::translate(language, role.label_key()).to_string())
            .unwrap_or_else(|| model.role.clone());
        Self {
            id: model.id,
            permissions: tabs::string_list(model.permissions.as_ref()),
            user_id: model.user_id,
            role: model.role,
            role_label,
            invited_by: model.invited_by,
            joined_at: to_utc(model.joined_at),
            last_active: model.last_active.map(to_utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub members: Vec<TeamMemberView>,
    pub stats: TeamStats,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct InviteMemberRequest {
    /// Member email
    #[schema(example = "analyst@licensehub.fr")]
    pub user_id: String,
    /// super_admin | admin | analyst | viewer, defaults to viewer
    pub role: Option<String>,
    pub permissions: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateMemberRequest {
    pub role: Option<String>,
    pub permissions: Option<Vec<String>>,
}

fn parse_role(raw: &str) -> Result<AdminRole, ApiError> {
    AdminRole::parse(raw).ok_or_else(|| {
        validation_error(
            "Invalid role",
            json!({ "role": "Must be one of: super_admin, admin, analyst, viewer" }),
        )
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/team",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Team members", body = TeamResponse),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "team"
)]
pub async fn list_members(
    State(state): State<AppState>,
    session: AdminSession,
) -> Json<TeamResponse> {
    let members = or_empty(
        TeamRepository::new(&state.db)
            .list(ListOptions::ascending())
            .await,
        "team_members",
    );
    let language = operator_language(&state, &session).await;

    let stats = tab::stats(&members);
    Json(TeamResponse {
        members: members
            .into_iter()
            .map(|member| TeamMemberView::new(member, language))
            .collect(),
        stats,
    })
}

/// Invites an operator by email
#[utoipa::path(
    post,
    path = "/api/v1/team",
    security(("bearer_auth" = [])),
    request_body = InviteMemberRequest,
    responses(
        (status = 201, description = "Member invited", body = TeamMemberView),
        (status = 400, description = "Validation error", body = ApiError),
        (status = 409, description = "Already a member", body = ApiError)
    ),
    tag = "team"
)]
pub async fn invite_member(
    State(state): State<AppState>,
    session: AdminSession,
    Json(request): Json<InviteMemberRequest>,
) -> Result<(StatusCode, Json<TeamMemberView>), ApiError> {
    let role = match request.role.as_deref() {
        Some(raw) if !raw.trim().is_empty() => parse_role(raw)?,
        _ => AdminRole::Viewer,
    };
    let member = NewTeamMember {
        user_id: request.user_id,
        role,
        permissions: request.permissions,
    };

    let created = TeamRepository::new(&state.db)
        .invite(member, session.user_id(), Utc::now())
        .await?;

    count_created("team_member");
    audit(
        &state,
        &session,
        "invite",
        "team_member",
        Some(created.id.to_string()),
        json!({
            "description": format!("{} invited as {}", created.user_id, created.role),
        }),
    )
    .await;

    let language = operator_language(&state, &session).await;
    Ok((StatusCode::CREATED, Json(TeamMemberView::new(created, language))))
}

#[utoipa::path(
    put,
    path = "/api/v1/team/{id}",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Team member id")),
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "Member updated", body = TeamMemberView),
        (status = 400, description = "Validation error", body = ApiError),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "team"
)]
pub async fn update_member(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<Json<TeamMemberView>, ApiError> {
    let id = parse_id(&id)?;
    let changes = TeamMemberChanges {
        role: request.role.as_deref().map(parse_role).transpose()?,
        permissions: request.permissions,
    };

    let updated = TeamRepository::new(&state.db).update(id, changes).await?;

    audit(
        &state,
        &session,
        "update",
        "team_member",
        Some(id.to_string()),
        json!({ "role": updated.role }),
    )
    .await;

    let language = operator_language(&state, &session).await;
    Ok(Json(TeamMemberView::new(updated, language)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/team/{id}",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Team member id")),
    responses(
        (status = 204, description = "Member removed"),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "team"
)]
pub async fn remove_member(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    TeamRepository::new(&state.db).remove(id).await?;

    audit(&state, &session, "remove", "team_member", Some(id.to_string()), json!({})).await;
    Ok(StatusCode::NO_CONTENT)
}
