//! # Session, Localization and Navigation Handlers
//!
//! Who the operator is, which language they read the dashboard in, the
//! translation dictionaries and the route to tab mapping.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::AdminSession;
use crate::error::{ApiError, validation_error};
use crate::i18n::{self, Language};
use crate::models::team_member::AdminRole;
use crate::navigation::{Navigation, navigation_for};
use crate::repositories::{PreferenceRepository, TeamRepository};
use crate::server::AppState;

/// Current operator and their dashboard language
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionInfo {
    #[schema(example = "ops@licensehub.fr")]
    pub user_id: String,
    pub email: String,
    #[schema(example = "ops")]
    pub display_name: String,
    pub role: AdminRole,
    /// Role label in the operator's language
    pub role_label: String,
    pub language: Language,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LanguageRequest {
    /// `en` or `fr`
    #[schema(example = "en")]
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LanguageResponse {
    pub language: Language,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DictionaryQuery {
    /// Restrict the response to these comma-separated keys; unknown keys translate to themselves
    pub keys: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DictionaryResponse {
    pub language: Language,
    pub entries: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigationQuery {
    /// Front-end route, e.g. `/market`
    pub path: Option<String>,
    /// Overrides the operator's stored language
    pub lang: Option<String>,
}

/// Stored language for the operator, falling back to the configured default.
pub(crate) async fn operator_language(state: &AppState, session: &AdminSession) -> Language {
    match PreferenceRepository::new(&state.db)
        .language(session.user_id())
        .await
    {
        Ok(Some(language)) => language,
        Ok(None) => state.config.default_language(),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to load language preference");
            state.config.default_language()
        }
    }
}

fn parse_language(raw: &str) -> Result<Language, ApiError> {
    Language::parse(raw).ok_or_else(|| {
        let supported: Vec<&str> = Language::ALL.iter().map(|lang| lang.code()).collect();
        validation_error(
            "Unsupported language",
            serde_json::json!({ "language": format!("Must be one of: {}", supported.join(", ")) }),
        )
    })
}

/// Returns the authenticated operator
#[utoipa::path(
    get,
    path = "/api/v1/session",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current operator", body = SessionInfo),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "session"
)]
pub async fn get_session(
    State(state): State<AppState>,
    session: AdminSession,
) -> Json<SessionInfo> {
    if let Err(err) = TeamRepository::new(&state.db)
        .touch(session.user_id(), Utc::now())
        .await
    {
        tracing::warn!(error = %err, "Failed to update operator activity");
    }

    let language = operator_language(&state, &session).await;
    Json(SessionInfo {
        user_id: session.user_id().to_string(),
        email: session.email.clone(),
        display_name: session.display_name().to_string(),
        role: session.role,
        role_label: i18n::translate(language, session.role.label_key()).to_string(),
        language,
    })
}

/// Persists the operator's dashboard language
#[utoipa::path(
    put,
    path = "/api/v1/session/language",
    security(("bearer_auth" = [])),
    request_body = LanguageRequest,
    responses(
        (status = 200, description = "Language saved", body = LanguageResponse),
        (status = 400, description = "Unsupported language", body = ApiError),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "session"
)]
pub async fn set_language(
    State(state): State<AppState>,
    session: AdminSession,
    Json(request): Json<LanguageRequest>,
) -> Result<Json<LanguageResponse>, ApiError> {
    let language = parse_language(&request.language)?;
    PreferenceRepository::new(&state.db)
        .set_language(session.user_id(), language, Utc::now())
        .await?;

    tracing::info!(operator = %session.email, language = language.code(), "Language preference updated");
    Ok(Json(LanguageResponse { language }))
}

/// Translation dictionary for one language
#[utoipa::path(
    get,
    path = "/api/v1/i18n/{lang}",
    security(("bearer_auth" = [])),
    params(
        ("lang" = String, Path, description = "Language code (`en` or `fr`)"),
        DictionaryQuery
    ),
    responses(
        (status = 200, description = "Dictionary", body = DictionaryResponse),
        (status = 400, description = "Unsupported language", body = ApiError)
    ),
    tag = "session"
)]
pub async fn dictionary(
    Path(lang): Path<String>,
    Query(query): Query<DictionaryQuery>,
) -> Result<Json<DictionaryResponse>, ApiError> {
    let language = parse_language(&lang)?;

    let entries = match query.keys.as_deref() {
        Some(keys) => keys
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| (key.to_string(), i18n::translate(language, key).to_string()))
            .collect(),
        None => i18n::dictionary(language)
            .into_iter()
            .map(|(key, text)| (key.to_string(), text.to_string()))
            .collect(),
    };

    Ok(Json(DictionaryResponse { language, entries }))
}

/// Navigation bar for a route, with the active tab resolved
#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    security(("bearer_auth" = [])),
    params(NavigationQuery),
    responses(
        (status = 200, description = "Localized navigation", body = Navigation),
        (status = 400, description = "Unsupported language", body = ApiError)
    ),
    tag = "session"
)]
pub async fn navigation(
    State(state): State<AppState>,
    session: AdminSession,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<Navigation>, ApiError> {
    let language = match query.lang.as_deref() {
        Some(lang) => parse_language(lang)?,
        None => operator_language(&state, &session).await,
    };
    let path = query.path.as_deref().unwrap_or("/");
    Ok(Json(navigation_for(path, language)))
}
