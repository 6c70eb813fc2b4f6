//! Bearer authentication, operator session, language preference and navigation.

use axum::http::{Method, StatusCode};
use serde_json::json;

#[path = "test_utils/mod.rs"]
mod test_utils;

use test_utils::{
    ADMIN_EMAIL, ADMIN_TOKEN, VIEWER_EMAIL, VIEWER_TOKEN, get, register_viewer, send, test_app,
};

#[tokio::test]
async fn missing_or_unknown_token_is_unauthorized() {
    let (app, _db) = test_app().await.expect("app");

    let (status, body) = send(&app, Method::GET, "/api/v1/session", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert!(body["trace_id"].is_string());

    let (status, _) = send(&app, Method::GET, "/api/v1/organizations", Some("nope"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_and_openapi_are_public() {
    let (app, _db) = test_app().await.expect("app");

    let (status, body) = send(&app, Method::GET, "/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);

    let (status, body) = send(&app, Method::GET, "/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/organizations"].is_object());

    let (status, body) = send(&app, Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "licensehub-admin");
}

#[tokio::test]
async fn unregistered_operator_defaults_to_admin_in_french() {
    let (app, _db) = test_app().await.expect("app");

    let (status, body) = get(&app, "/api/v1/session").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], ADMIN_EMAIL);
    assert_eq!(body["user_id"], ADMIN_EMAIL);
    assert_eq!(body["display_name"], "ops");
    assert_eq!(body["role"], "admin");
    assert_eq!(body["language"], "fr");
}

#[tokio::test]
async fn language_preference_drives_navigation_labels() {
    let (app, _db) = test_app().await.expect("app");

    let (_, nav) = get(&app, "/api/v1/navigation?path=/organizations").await;
    assert_eq!(nav["language"], "fr");
    assert_eq!(nav["active_tab"], "organizations");
    assert_eq!(nav["items"][1]["label"], "Organisations");
    assert_eq!(nav["items"][1]["active"], true);
    assert_eq!(nav["items"][0]["active"], false);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/session/language",
        Some(ADMIN_TOKEN),
        Some(json!({ "language": "en" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "en");

    let (_, nav) = get(&app, "/api/v1/navigation?path=/market").await;
    assert_eq!(nav["language"], "en");
    assert_eq!(nav["active_tab"], "market-intelligence");
    assert_eq!(nav["items"][0]["label"], "Overview");
    assert_eq!(nav["items"][2]["label"], "Market Intelligence");

    let (_, session) = get(&app, "/api/v1/session").await;
    assert_eq!(session["language"], "en");

    // An explicit `lang` wins over the stored preference.
    let (_, nav) = get(&app, "/api/v1/navigation?lang=fr").await;
    assert_eq!(nav["active_tab"], "overview");
    assert_eq!(nav["items"][0]["label"], "Vue d'ensemble");
}

#[tokio::test]
async fn unsupported_language_is_rejected() {
    let (app, _db) = test_app().await.expect("app");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/session/language",
        Some(ADMIN_TOKEN),
        Some(json!({ "language": "de" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["language"], "Must be one of: en, fr");

    let (status, _) = get(&app, "/api/v1/i18n/es").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dictionary_returns_all_or_selected_keys() {
    let (app, _db) = test_app().await.expect("app");

    let (status, body) = get(&app, "/api/v1/i18n/en").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "en");
    assert_eq!(body["entries"]["nav.organizations"], "Organizations");

    let (_, body) = get(&app, "/api/v1/i18n/FR?keys=nav.overview,missing.key").await;
    assert_eq!(body["language"], "fr");
    let entries = body["entries"].as_object().expect("entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries["nav.overview"], "Vue d'ensemble");
    assert_eq!(entries["missing.key"], "missing.key");
}

#[tokio::test]
async fn viewer_reads_but_cannot_write() {
    let (app, db) = test_app().await.expect("app");
    register_viewer(&db).await.expect("viewer");

    let (status, session) = send(&app, Method::GET, "/api/v1/session", Some(VIEWER_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["email"], VIEWER_EMAIL);
    assert_eq!(session["role"], "viewer");
    assert_eq!(session["role_label"], "Visualiseur");

    let (status, _) = send(&app, Method::GET, "/api/v1/organizations", Some(VIEWER_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/organizations",
        Some(VIEWER_TOKEN),
        Some(json!({ "name": "Not allowed" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/session/language",
        Some(VIEWER_TOKEN),
        Some(json!({ "language": "en" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "en");
}
