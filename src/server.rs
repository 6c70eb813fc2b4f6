//! # Server Configuration
//!
//! Router assembly, OpenAPI document and the serve loop for the admin API.

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::auth_middleware;
use crate::config::AppConfig;
use crate::handlers::{
    self, api_keys, bi, exports, market, organizations, overview, session, team, webhooks,
};
use crate::telemetry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .route("/session", get(session::get_session))
        .route("/session/language", put(session::set_language))
        .route("/i18n/{lang}", get(session::dictionary))
        .route("/navigation", get(session::navigation))
        .route("/overview", get(overview::get_overview))
        .route(
            "/organizations",
            get(organizations::list_organizations).post(organizations::create_organization),
        )
        .route("/organizations/import", post(organizations::import_organizations))
        .route(
            "/organizations/{id}",
            get(organizations::get_organization)
                .put(organizations::update_organization)
                .delete(organizations::delete_organization),
        )
        .route(
            "/market-intelligence",
            get(market::list_market).post(market::create_market_entry),
        )
        .route(
            "/market-intelligence/{id}",
            put(market::update_market_entry).delete(market::delete_market_entry),
        )
        .route(
            "/api-keys",
            get(api_keys::list_api_keys).post(api_keys::create_api_key),
        )
        .route("/api-keys/{id}", delete(api_keys::delete_api_key))
        .route("/api-keys/{id}/toggle", post(api_keys::toggle_api_key))
        .route("/api-keys/{id}/secret", get(api_keys::reveal_api_key))
        .route(
            "/api-endpoints",
            get(api_keys::list_api_endpoints).post(api_keys::create_api_endpoint),
        )
        .route(
            "/webhooks",
            get(webhooks::list_webhooks).post(webhooks::create_webhook),
        )
        .route("/webhooks/events", get(webhooks::list_events))
        .route("/webhooks/logs", get(webhooks::list_webhook_logs))
        .route("/webhooks/{id}", delete(webhooks::delete_webhook))
        .route("/webhooks/{id}/toggle", post(webhooks::toggle_webhook))
        .route("/webhooks/{id}/test", post(webhooks::test_webhook))
        .route("/exports", get(exports::list_exports).post(exports::create_export))
        .route("/exports/sources", get(exports::list_sources))
        .route("/exports/{id}", get(exports::get_export))
        .route(
            "/bi/dashboards",
            get(bi::list_dashboards).post(bi::create_dashboard),
        )
        .route("/bi/dashboards/{id}", delete(bi::delete_dashboard))
        .route("/bi/metrics", get(bi::list_metrics).post(bi::create_metric))
        .route("/bi/analytics", get(bi::analytics))
        .route("/team", get(team::list_members).post(team::invite_member))
        .route(
            "/team/{id}",
            put(team::update_member).delete(team::remove_member),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::health))
        .nest("/api/v1", api)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(telemetry::trace_id_middleware))
}

/// Any origin unless an explicit allow-list is configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Starts the server and serves until Ctrl-C
pub async fn run_server(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let addr = config
        .bind_addr()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;
    let profile = config.profile.clone();

    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let app = create_app(state);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shutdown signal received");
        signal.cancel();
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, %profile, "LicenseHub admin API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::health,
        crate::handlers::session::get_session,
        crate::handlers::session::set_language,
        crate::handlers::session::dictionary,
        crate::handlers::session::navigation,
        crate::handlers::overview::get_overview,
        crate::handlers::organizations::list_organizations,
        crate::handlers::organizations::create_organization,
        crate::handlers::organizations::get_organization,
        crate::handlers::organizations::update_organization,
        crate::handlers::organizations::delete_organization,
        crate::handlers::organizations::import_organizations,
        crate::handlers::market::list_market,
        crate::handlers::market::create_market_entry,
        crate::handlers::market::update_market_entry,
        crate::handlers::market::delete_market_entry,
        crate::handlers::api_keys::list_api_keys,
        crate::handlers::api_keys::create_api_key,
        crate::handlers::api_keys::toggle_api_key,
        crate::handlers::api_keys::reveal_api_key,
        crate::handlers::api_keys::delete_api_key,
        crate::handlers::api_keys::list_api_endpoints,
        crate::handlers::api_keys::create_api_endpoint,
        crate::handlers::webhooks::list_webhooks,
        crate::handlers::webhooks::create_webhook,
        crate::handlers::webhooks::toggle_webhook,
        crate::handlers::webhooks::delete_webhook,
        crate::handlers::webhooks::test_webhook,
        crate::handlers::webhooks::list_webhook_logs,
        crate::handlers::webhooks::list_events,
        crate::handlers::exports::list_exports,
        crate::handlers::exports::create_export,
        crate::handlers::exports::get_export,
        crate::handlers::exports::list_sources,
        crate::handlers::bi::list_dashboards,
        crate::handlers::bi::create_dashboard,
        crate::handlers::bi::delete_dashboard,
        crate::handlers::bi::list_metrics,
        crate::handlers::bi::create_metric,
        crate::handlers::bi::analytics,
        crate::handlers::team::list_members,
        crate::handlers::team::invite_member,
        crate::handlers::team::update_member,
        crate::handlers::team::remove_member,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::models::HealthStatus,
            crate::error::ApiError,
            crate::i18n::Language,
            crate::models::team_member::AdminRole,
            crate::navigation::Navigation,
            crate::handlers::session::SessionInfo,
            crate::handlers::session::LanguageRequest,
            crate::handlers::session::LanguageResponse,
            crate::handlers::session::DictionaryResponse,
            crate::handlers::overview::OverviewResponse,
            crate::handlers::organizations::OrganizationView,
            crate::handlers::organizations::OrganizationsResponse,
            crate::handlers::organizations::CreateOrganizationRequest,
            crate::handlers::organizations::UpdateOrganizationRequest,
            crate::handlers::organizations::ImportResponse,
            crate::handlers::market::MarketEntryView,
            crate::handlers::market::MarketResponse,
            crate::handlers::market::CreateMarketEntryRequest,
            crate::handlers::market::UpdateMarketEntryRequest,
            crate::handlers::api_keys::ApiKeyView,
            crate::handlers::api_keys::ApiKeysResponse,
            crate::handlers::api_keys::CreateApiKeyRequest,
            crate::handlers::api_keys::ApiKeySecret,
            crate::handlers::api_keys::ApiEndpointView,
            crate::handlers::api_keys::ApiEndpointsResponse,
            crate::handlers::api_keys::CreateApiEndpointRequest,
            crate::handlers::webhooks::WebhookView,
            crate::handlers::webhooks::WebhookLogView,
            crate::handlers::webhooks::WebhooksResponse,
            crate::handlers::webhooks::CreateWebhookRequest,
            crate::handlers::webhooks::LogsResponse,
            crate::handlers::webhooks::EventsResponse,
            crate::handlers::exports::DataExportView,
            crate::handlers::exports::ExportsResponse,
            crate::handlers::exports::CreateExportRequest,
            crate::handlers::exports::ExportSourcesResponse,
            crate::handlers::bi::DashboardView,
            crate::handlers::bi::DashboardsResponse,
            crate::handlers::bi::CreateDashboardRequest,
            crate::handlers::bi::MetricView,
            crate::handlers::bi::MetricsResponse,
            crate::handlers::bi::CreateMetricRequest,
            crate::handlers::bi::AnalyticsResponse,
            crate::handlers::team::TeamMemberView,
            crate::handlers::team::TeamResponse,
            crate::handlers::team::InviteMemberRequest,
            crate::handlers::team::UpdateMemberRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "root", description = "Service information and health"),
        (name = "session", description = "Operator session, language and navigation"),
        (name = "overview", description = "Dashboard overview"),
        (name = "organizations", description = "Client organizations"),
        (name = "market", description = "Market intelligence"),
        (name = "api-management", description = "Partner API keys and endpoint catalogue"),
        (name = "webhooks", description = "Outbound webhooks"),
        (name = "exports", description = "Data export jobs"),
        (name = "bi", description = "BI dashboards, metrics and analytics"),
        (name = "team", description = "Admin team access"),
    ),
    info(
        title = "LicenseHub Admin API",
        description = "Back-office API for the LicenseHub license-management platform",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_admin_routes_and_bearer_auth() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/v1/organizations",
            "/api/v1/organizations/{id}",
            "/api/v1/webhooks/{id}/test",
            "/api/v1/bi/analytics",
            "/api/v1/i18n/{lang}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn wildcard_or_empty_origins_allow_any() {
        // Building the layer must not panic for either shape.
        let _ = cors_layer(&[]);
        let _ = cors_layer(&["*".to_string()]);
        let _ = cors_layer(&["https://admin.licensehub.fr".to_string(), "bad\norigin".to_string()]);
    }
}
