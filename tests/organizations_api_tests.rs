//! Integration tests for the organizations tab and raw record import

use axum::http::{Method, StatusCode};
use serde_json::json;

#[path = "test_utils/mod.rs"]
mod test_utils;

use test_utils::{ADMIN_TOKEN, delete, get, post, put, send, test_app};

#[tokio::test]
async fn create_then_list_with_filters_and_stats() {
    let (app, _db) = test_app().await.expect("app");

    let (status, created) = post(
        &app,
        "/api/v1/organizations",
        json!({
            "name": "  Atelier Dumas ",
            "domain": "atelier-dumas.fr",
            "industry": "Manufacturing",
            "consent_lebonlogiciel": true,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Atelier Dumas");
    assert_eq!(created["status"], "active");
    assert_eq!(created["total_licenses"], 0);

    let (status, _) = post(
        &app,
        "/api/v1/organizations",
        json!({ "name": "Nordlys Logistics", "industry": "Logistics", "consent_prospection": true }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get(&app, "/api/v1/organizations?search=manufact").await;
    assert_eq!(status, StatusCode::OK);
    let organizations = body["organizations"].as_array().expect("array");
    assert_eq!(organizations.len(), 1);
    assert_eq!(organizations[0]["name"], "Atelier Dumas");

    // Cards other than `filtered` cover every organization.
    assert_eq!(body["stats"]["total"], 2);
    assert_eq!(body["stats"]["active"], 2);
    assert_eq!(body["stats"]["consent_lebonlogiciel"], 1);
    assert_eq!(body["stats"]["consent_prospection"], 1);
    assert_eq!(body["stats"]["filtered"], 1);

    let (_, body) = get(&app, "/api/v1/organizations?consent=prospection&status=all").await;
    assert_eq!(body["organizations"].as_array().unwrap().len(), 1);
    assert_eq!(body["organizations"][0]["name"], "Nordlys Logistics");

    let (_, body) = get(&app, "/api/v1/organizations?consent=all&search=").await;
    assert_eq!(body["organizations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let (app, _db) = test_app().await.expect("app");

    let (status, body) = post(&app, "/api/v1/organizations", json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn update_changes_status_and_consent() {
    let (app, _db) = test_app().await.expect("app");
    let (_, created) = post(&app, "/api/v1/organizations", json!({ "name": "Clinique Saint-Roch" })).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = put(
        &app,
        &format!("/api/v1/organizations/{id}"),
        json!({ "status": "inactive", "consent_prospection": true, "country": "France" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "inactive");
    assert_eq!(updated["consent_prospection"], true);
    assert_eq!(updated["country"], "France");
    assert_eq!(updated["name"], "Clinique Saint-Roch");

    let (status, _) = put(
        &app,
        &format!("/api/v1/organizations/{id}"),
        json!({ "status": "archived" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, fetched) = get(&app, &format!("/api/v1/organizations/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["status"], "inactive");
}

#[tokio::test]
async fn delete_removes_one_and_second_delete_is_not_found() {
    let (app, _db) = test_app().await.expect("app");
    let (_, first) = post(&app, "/api/v1/organizations", json!({ "name": "First" })).await;
    let (_, _second) = post(&app, "/api/v1/organizations", json!({ "name": "Second" })).await;
    let id = first["id"].as_str().unwrap().to_string();

    let (status, _) = delete(&app, &format!("/api/v1/organizations/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = get(&app, "/api/v1/organizations").await;
    let remaining = body["organizations"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["name"], "Second");

    let (status, body) = delete(&app, &format!("/api/v1/organizations/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_id_is_a_validation_error() {
    let (app, _db) = test_app().await.expect("app");

    let (status, body) = get(&app, "/api/v1/organizations/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["id"], "Must be a valid UUID");
}

#[tokio::test]
async fn import_accepts_mixed_casing_and_fills_defaults() {
    let (app, _db) = test_app().await.expect("app");

    let (status, body) = post(
        &app,
        "/api/v1/organizations/import",
        json!([
            {
                "name": "Camel Corp",
                "contactEmail": "it@camel.example",
                "consentLebonlogiciel": true,
                "totalLicenses": 40,
                "monthlyRevenue": 1200.5,
                "status": "active",
            },
            {
                "name": "Snake SARL",
                "contact_email": "it@snake.example",
                "consent_prospection": "yes",
                "total_licenses": "15",
            },
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["imported"], 2);

    let (_, body) = get(&app, "/api/v1/organizations?search=camel").await;
    let camel = &body["organizations"][0];
    assert_eq!(camel["contact_email"], "it@camel.example");
    assert_eq!(camel["consent_lebonlogiciel"], true);
    assert_eq!(camel["total_licenses"], 40);
    assert_eq!(camel["monthly_revenue"], 1200.5);

    let (_, body) = get(&app, "/api/v1/organizations?search=snake").await;
    let snake = &body["organizations"][0];
    assert_eq!(snake["status"], "pending");
    assert_eq!(snake["consent_prospection"], true);
    assert_eq!(snake["total_licenses"], 15);
    assert_eq!(snake["industry"], "");
}

#[tokio::test]
async fn import_rejects_non_array_payload() {
    let (app, _db) = test_app().await.expect("app");

    let (status, body) = post(&app, "/api/v1/organizations/import", json!({ "name": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let (status, _) = post(&app, "/api/v1/organizations/import", json!([{ "name": "ok" }, 3])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/organizations/import",
        Some(ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}
