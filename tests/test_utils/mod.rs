//! Test utilities for database and router testing.
//!
//! Sets up a migrated in-memory SQLite database and drives the admin router
//! in-process with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use licensehub_admin::{
    config::AppConfig,
    db,
    models::team_member::AdminRole,
    repositories::{TeamRepository, team::NewTeamMember},
    server::{AppState, create_app},
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "ops@licensehub.fr";
pub const ADMIN_TOKEN: &str = "admin-test-token";
pub const VIEWER_EMAIL: &str = "viewer@licensehub.fr";
pub const VIEWER_TOKEN: &str = "viewer-test-token";

pub fn test_config() -> AppConfig {
    AppConfig {
        profile: "test".to_string(),
        database_url: "sqlite::memory:".to_string(),
        admin_tokens: vec![
            format!("{ADMIN_EMAIL}={ADMIN_TOKEN}"),
            format!("{VIEWER_EMAIL}={VIEWER_TOKEN}"),
        ],
        ..Default::default()
    }
}

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = db::init_pool(&test_config()).await?;
    db::run_migrations(&db).await?;
    Ok(db)
}

/// Router over a fresh database, plus the database handle for assertions.
pub async fn test_app() -> Result<(Router, DatabaseConnection)> {
    let db = setup_test_db().await?;
    let state = AppState {
        config: Arc::new(test_config()),
        db: db.clone(),
    };
    Ok((create_app(state), db))
}

/// Registers `VIEWER_EMAIL` as a read-only team member.
pub async fn register_viewer(db: &DatabaseConnection) -> Result<()> {
    TeamRepository::new(db)
        .invite(
            NewTeamMember {
                user_id: VIEWER_EMAIL.to_string(),
                role: AdminRole::Viewer,
                permissions: vec!["read".to_string()],
            },
            ADMIN_EMAIL,
            Utc::now(),
        )
        .await?;
    Ok(())
}

/// Sends one request and returns the status with the parsed JSON body
/// (`Value::Null` for empty bodies).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Some(ADMIN_TOKEN), None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(ADMIN_TOKEN), Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(ADMIN_TOKEN), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, Some(ADMIN_TOKEN), None).await
}
