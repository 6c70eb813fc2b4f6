//! Integration tests for the market, API management, webhooks, exports, BI,
//! team and overview tabs.

use axum::http::StatusCode;
use serde_json::json;

#[path = "test_utils/mod.rs"]
mod test_utils;

use licensehub_admin::seeds;
use test_utils::{ADMIN_EMAIL, delete, get, post, put, test_app};

#[tokio::test]
async fn market_entries_filter_and_update() {
    let (app, _db) = test_app().await.expect("app");

    for (name, category, rating) in [("Slack", "Communication", 4.5), ("Pipedrive", "CRM", 4.1)] {
        let (status, _) = post(
            &app,
            "/api/v1/market-intelligence",
            json!({
                "software_name": name,
                "category": category,
                "average_rating": rating,
                "growth_rate": 10.0,
                "main_competitors": ["Other"],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app, "/api/v1/market-intelligence?category=CRM").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["entries"][0]["software_name"], "Pipedrive");
    assert_eq!(body["stats"]["tracked"], 1);
    assert_eq!(body["categories"].as_array().unwrap().len(), 2);

    let id = body["entries"][0]["id"].as_str().unwrap().to_string();
    let (status, updated) = put(
        &app,
        &format!("/api/v1/market-intelligence/{id}"),
        json!({ "average_rating": 4.3, "main_competitors": ["Salesforce", "HubSpot"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["average_rating"], 4.3);
    assert_eq!(updated["main_competitors"], json!(["Salesforce", "HubSpot"]));

    let (status, _) = put(&app, &format!("/api/v1/market-intelligence/{id}"), json!({ "average_rating": 7.0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = delete(&app, &format!("/api/v1/market-intelligence/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = delete(&app, &format!("/api/v1/market-intelligence/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    let (_, body) = get(&app, "/api/v1/market-intelligence").await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn api_key_is_shown_once_then_masked() {
    let (app, _db) = test_app().await.expect("app");

    let (status, created) = post(
        &app,
        "/api/v1/api-keys",
        json!({
            "name": "Lebonlogiciel sync",
            "platform": "lebonlogiciel",
            "permissions": ["read"],
            "ip_whitelist": "10.0.0.1, ,10.0.0.2",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let full_key = created["api_key"].as_str().unwrap().to_string();
    assert!(full_key.starts_with("lh_"));
    assert_eq!(full_key.len(), 29);
    assert_eq!(created["rate_limit"], 1000);
    assert_eq!(created["status"], "active");
    assert_eq!(created["ip_whitelist"], json!(["10.0.0.1", "10.0.0.2"]));
    let id = created["id"].as_str().unwrap().to_string();

    let (_, listing) = get(&app, "/api/v1/api-keys").await;
    let listed = listing["keys"][0]["api_key"].as_str().unwrap();
    assert_ne!(listed, full_key);
    assert!(listed.starts_with(&full_key[..11]));
    assert!(listed.ends_with('•'));
    assert_eq!(listing["stats"]["active_keys"], 1);

    let (status, secret) = get(&app, &format!("/api/v1/api-keys/{id}/secret")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(secret["api_key"], full_key.as_str());
}

#[tokio::test]
async fn api_key_toggle_flips_only_that_key() {
    let (app, _db) = test_app().await.expect("app");
    let (_, first) = post(&app, "/api/v1/api-keys", json!({ "name": "First" })).await;
    let (_, second) = post(&app, "/api/v1/api-keys", json!({ "name": "Second" })).await;
    assert_eq!(first["platform"], "general");
    let first_id = first["id"].as_str().unwrap().to_string();

    let (status, toggled) = post(&app, &format!("/api/v1/api-keys/{first_id}/toggle"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["status"], "inactive");

    let (_, listing) = get(&app, "/api/v1/api-keys?status=active").await;
    let keys = listing["keys"].as_array().unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0]["id"], second["id"]);

    let (_, toggled) = post(&app, &format!("/api/v1/api-keys/{first_id}/toggle"), json!({})).await;
    assert_eq!(toggled["status"], "active");
}

#[tokio::test]
async fn api_key_validation_and_delete() {
    let (app, _db) = test_app().await.expect("app");

    let (status, _) = post(&app, "/api/v1/api-keys", json!({ "name": "x", "platform": "unknown" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = post(&app, "/api/v1/api-keys", json!({ "name": "x", "rate_limit": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, created) = post(&app, "/api/v1/api-keys", json!({ "name": "Short lived" })).await;
    let id = created["id"].as_str().unwrap().to_string();
    let (status, _) = delete(&app, &format!("/api/v1/api-keys/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get(&app, &format!("/api/v1/api-keys/{id}/secret")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_endpoints_catalogue_with_defaults() {
    let (app, db) = test_app().await.expect("app");
    let seeded = seeds::seed_api_endpoints(&db).await.expect("catalogue");
    assert!(seeded > 0);

    let (status, created) = post(
        &app,
        "/api/v1/api-endpoints",
        json!({ "name": "Licence renewals", "path": "/v1/licenses/renewals" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["method"], "GET");
    assert_eq!(created["data_type"], "anonymized");
    assert_eq!(created["success_rate"], 100.0);

    let (_, body) = get(&app, "/api/v1/api-endpoints?search=renewals").await;
    assert_eq!(body["endpoints"].as_array().unwrap().len(), 1);

    let (_, body) = get(&app, "/api/v1/api-endpoints").await;
    assert_eq!(body["endpoints"].as_array().unwrap().len(), seeded + 1);
}

#[tokio::test]
async fn webhook_test_delivery_is_logged() {
    let (app, _db) = test_app().await.expect("app");

    let (status, webhook) = post(
        &app,
        "/api/v1/webhooks",
        json!({
            "name": "Orders",
            "url": "https://hooks.example.com/orders",
            "platform": "lebonlogiciel",
            "events": ["organization.created"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(webhook["status"], "active");
    assert_eq!(webhook["retry_count"], 3);
    assert_eq!(webhook["timeout"], 30);
    assert!(webhook["secret"].as_str().unwrap().starts_with("whsec_"));
    let id = webhook["id"].as_str().unwrap().to_string();

    let (status, log) = post(&app, &format!("/api/v1/webhooks/{id}/test"), json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(log["status"], "success");
    assert_eq!(log["response_code"], 200);
    assert_eq!(log["event"], "test.webhook");
    assert_eq!(log["payload"]["data"]["webhook_id"], id.as_str());
    let response_time = log["response_time"].as_i64().unwrap();
    assert!((100..600).contains(&response_time));

    let (_, body) = get(&app, "/api/v1/webhooks").await;
    assert_eq!(body["webhooks"][0]["total_calls"], 1);
    assert_eq!(body["recent_logs"].as_array().unwrap().len(), 1);
    assert_eq!(body["stats"]["calls_today"], 1);
    assert_eq!(body["stats"]["success_rate"], 100.0);
    assert_eq!(body["stats"]["active_webhooks"], 1);

    let (_, logs) = get(&app, &format!("/api/v1/webhooks/logs?webhook_id={id}")).await;
    assert_eq!(logs["logs"].as_array().unwrap().len(), 1);
    let (status, _) = get(&app, "/api/v1/webhooks/logs?webhook_id=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn webhook_validation_toggle_and_events() {
    let (app, _db) = test_app().await.expect("app");

    let (status, _) = post(
        &app,
        "/api/v1/webhooks",
        json!({ "name": "Bad", "url": "ftp://example.com", "platform": "lebonlogiciel" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/v1/webhooks",
        json!({ "name": "Bad", "url": "https://example.com", "platform": "prospection", "events": ["nope"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, webhook) = post(
        &app,
        "/api/v1/webhooks",
        json!({ "name": "Leads", "url": "https://example.com/leads", "platform": "prospection" }),
    )
    .await;
    let id = webhook["id"].as_str().unwrap().to_string();
    let (_, toggled) = post(&app, &format!("/api/v1/webhooks/{id}/toggle"), json!({})).await;
    assert_eq!(toggled["status"], "inactive");

    let (_, events) = get(&app, "/api/v1/webhooks/events").await;
    let events = events["events"].as_array().unwrap();
    assert_eq!(events.len(), 10);
    assert!(events.contains(&json!("organization.created")));

    let (status, _) = delete(&app, &format!("/api/v1/webhooks/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = post(&app, &format!("/api/v1/webhooks/{id}/test"), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn export_jobs_start_pending() {
    let (app, _db) = test_app().await.expect("app");

    let (status, job) = post(
        &app,
        "/api/v1/exports",
        json!({ "name": "Q3 organizations", "data_source": "admin_organizations" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(job["format"], "csv");
    assert_eq!(job["status"], "pending");
    assert_eq!(job["user_id"], ADMIN_EMAIL);
    assert!(job["download_url"].is_null());
    let id = job["id"].as_str().unwrap().to_string();

    let (status, _) = post(
        &app,
        "/api/v1/exports",
        json!({ "name": "Broken", "data_source": "payroll" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = post(
        &app,
        "/api/v1/exports",
        json!({ "name": "Broken", "format": "pdf", "data_source": "users" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/api/v1/exports").await;
    assert_eq!(body["stats"]["total"], 1);
    assert_eq!(body["stats"]["pending"], 1);

    let (status, fetched) = get(&app, &format!("/api/v1/exports/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Q3 organizations");

    let (_, sources) = get(&app, "/api/v1/exports/sources").await;
    assert_eq!(sources["formats"], json!(["json", "csv", "excel"]));
    assert_eq!(sources["sources"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn bi_dashboards_metrics_and_analytics() {
    let (app, _db) = test_app().await.expect("app");

    let (status, dashboard) = post(
        &app,
        "/api/v1/bi/dashboards",
        json!({ "name": "Revenue follow-up", "is_public": true }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        dashboard["widgets"],
        json!(["revenue_chart", "user_metrics", "software_usage"])
    );
    assert_eq!(dashboard["category"], "general");
    assert_eq!(dashboard["created_by"], ADMIN_EMAIL);

    let (_, body) = get(&app, "/api/v1/bi/dashboards").await;
    assert_eq!(body["stats"]["total"], 1);
    assert_eq!(body["stats"]["public"], 1);

    let (status, metric) = post(
        &app,
        "/api/v1/bi/metrics",
        json!({ "name": "MRR", "value": 110.0, "previous_value": 100.0, "unit": "EUR" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(metric["change"], 10.0);
    assert_eq!(metric["change_type"], "increase");
    assert_eq!(metric["period"], "monthly");
    assert_eq!(metric["category"], "general");

    let (status, _) = post(
        &app,
        "/api/v1/bi/metrics",
        json!({ "name": "MRR", "value": 1.0, "period": "hourly" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, metrics) = get(&app, "/api/v1/bi/metrics").await;
    assert_eq!(metrics["metrics"].as_array().unwrap().len(), 1);

    let (status, analytics) = get(&app, "/api/v1/bi/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analytics["language"], "fr");
    assert!(!analytics["revenueData"].as_array().unwrap().is_empty());
    assert!(!analytics["softwareUsage"].as_array().unwrap().is_empty());

    let id = dashboard["id"].as_str().unwrap().to_string();
    let (status, _) = delete(&app, &format!("/api/v1/bi/dashboards/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = delete(&app, &format!("/api/v1/bi/dashboards/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn team_invite_update_and_remove() {
    let (app, _db) = test_app().await.expect("app");

    let (status, member) = post(&app, "/api/v1/team", json!({ "user_id": "Analyst@LicenseHub.fr" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(member["user_id"], "analyst@licensehub.fr");
    assert_eq!(member["role"], "viewer");
    assert_eq!(member["role_label"], "Visualiseur");
    assert_eq!(member["invited_by"], ADMIN_EMAIL);

    let (status, body) = post(&app, "/api/v1/team", json!({ "user_id": "analyst@licensehub.fr" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = post(&app, "/api/v1/team", json!({ "user_id": "not-an-email" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = post(
        &app,
        "/api/v1/team",
        json!({ "user_id": "other@licensehub.fr", "role": "owner" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = member["id"].as_str().unwrap().to_string();
    let (status, updated) = put(&app, &format!("/api/v1/team/{id}"), json!({ "role": "analyst" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["role"], "analyst");

    let (_, team) = get(&app, "/api/v1/team").await;
    assert_eq!(team["stats"]["total"], 1);
    assert_eq!(team["stats"]["analysts"], 1);

    let (status, _) = delete(&app, &format!("/api/v1/team/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = delete(&app, &format!("/api/v1/team/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn overview_reflects_demo_data_and_activity() {
    let (app, db) = test_app().await.expect("app");
    seeds::seed_demo_data(&db).await.expect("demo data");

    let (_, created) = post(&app, "/api/v1/organizations", json!({ "name": "Fresh Org" })).await;
    assert_eq!(created["status"], "active");
    let (status, _) = post(
        &app,
        "/api/v1/exports",
        json!({ "name": "Users", "format": "json", "data_source": "users" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, overview) = get(&app, "/api/v1/overview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["stats"]["total_organizations"], 5);
    assert_eq!(overview["stats"]["active_licenses"], 175);
    assert_eq!(overview["stats"]["monthly_revenue"], 124500.0);
    assert_eq!(overview["stats"]["data_exports"], 1);
    assert_eq!(overview["top_software"][0]["name"], "Slack");

    let activity = overview["recent_activity"].as_array().unwrap();
    assert_eq!(activity.len(), 2);
    let org_activity = activity
        .iter()
        .find(|item| item["resource"] == "organization")
        .expect("organization activity");
    assert_eq!(org_activity["organization_name"], "Fresh Org");
    assert_eq!(org_activity["kind"], "create");

    // Seeding again leaves populated tables untouched.
    seeds::seed_demo_data(&db).await.expect("reseed");
    let (_, overview) = get(&app, "/api/v1/overview").await;
    assert_eq!(overview["stats"]["total_organizations"], 5);
}
