//! # Authentication and Authorization
//!
//! Operators authenticate with pre-provisioned bearer tokens configured as
//! `email=token` pairs (or bare tokens, which map to the default operator).
//! The middleware resolves the operator's role from team membership and
//! rejects writes from read-only viewers.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, Method, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use utoipa::ToSchema;

use crate::error::{ApiError, forbidden, unauthorized};
use crate::models::team_member::AdminRole;
use crate::repositories::TeamRepository;
use crate::server::AppState;

/// Operator identity used for bare tokens without an `email=` part.
pub const DEFAULT_OPERATOR_EMAIL: &str = "admin@licensehub.local";

/// Path suffix viewers may still write to (their own language preference).
const SELF_SERVICE_PATH: &str = "/session/language";

/// One configured operator credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorCredential {
    pub email: String,
    pub token: String,
}

/// Authenticated operator attached to every protected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminSession {
    /// Operator email, also used as the user id in audit rows
    pub email: String,
    pub role: AdminRole,
}

impl AdminSession {
    pub fn user_id(&self) -> &str {
        &self.email
    }

    /// Local part of the email, e.g. `ops` for `ops@licensehub.fr`.
    pub fn display_name(&self) -> &str {
        self.email
            .split_once('@')
            .map(|(local, _)| local)
            .unwrap_or(&self.email)
    }
}

/// Parse configured `email=token` entries. Entries with a blank token are skipped.
pub fn parse_credentials(entries: &[String]) -> Vec<OperatorCredential> {
    entries
        .iter()
        .filter_map(|entry| {
            let (email, token) = match entry.split_once('=') {
                Some((email, token)) => (email.trim(), token.trim()),
                None => (DEFAULT_OPERATOR_EMAIL, entry.trim()),
            };
            if token.is_empty() {
                return None;
            }
            let email = if email.is_empty() {
                DEFAULT_OPERATOR_EMAIL
            } else {
                email
            };
            Some(OperatorCredential {
                email: email.to_ascii_lowercase(),
                token: token.to_string(),
            })
        })
        .collect()
}

/// Operator email for `token`. Every credential is compared in constant time.
pub fn authenticate(credentials: &[OperatorCredential], token: &str) -> Option<String> {
    let mut matched = None;
    for credential in credentials {
        let equal: bool = token.as_bytes().ct_eq(credential.token.as_bytes()).into();
        if equal && matched.is_none() {
            matched = Some(credential.email.clone());
        }
    }
    matched
}

/// Writes are refused for viewers, except their own language preference.
pub fn is_permitted(role: AdminRole, method: &Method, path: &str) -> bool {
    if role.can_write() {
        return true;
    }
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
        || path.trim_end_matches('/').ends_with(SELF_SERVICE_PATH)
}

/// Authentication middleware for every `/api/v1` route.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;
    let credentials = parse_credentials(&state.config.admin_tokens);
    let email = authenticate(&credentials, token)
        .ok_or_else(|| unauthorized(Some("Invalid bearer token")))?;

    // A failed lookup must not block the views, which degrade on their own.
    // The operator is treated as read-only until membership can be read.
    let role = match TeamRepository::new(&state.db).find_by_user_id(&email).await {
        Ok(member) => member
            .and_then(|member| AdminRole::parse(&member.role))
            .unwrap_or_default(),
        Err(err) => {
            tracing::warn!(operator = %email, error = %err, "Failed to resolve operator role, using viewer");
            AdminRole::Viewer
        }
    };

    if !is_permitted(role, request.method(), request.uri().path()) {
        tracing::warn!(operator = %email, role = role.as_str(), method = %request.method(), "Write refused for read-only operator");
        return Err(forbidden(Some("Viewers have read-only access")));
    }

    tracing::debug!(operator = %email, role = role.as_str(), "Authenticated operator request");
    request
        .extensions_mut()
        .insert(AdminSession { email, role });

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized(Some("Missing Authorization header")))?
        .to_str()
        .map_err(|_| unauthorized(Some("Invalid Authorization header")))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized(Some("Authorization header must use Bearer scheme")))
}

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminSession>()
            .cloned()
            .ok_or_else(|| unauthorized(Some("Operator authentication required")))
    }
}
