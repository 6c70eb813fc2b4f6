//! API management tab: keys, endpoint catalogue and usage cards.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{matches_choice, matches_search, mean};
use crate::models::api_endpoint::Model as ApiEndpointModel;
use crate::models::api_key::Model as ApiKeyModel;

/// Filters shared by the key list and the endpoint list.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ApiFilter {
    /// Keys: name and description. Endpoints: name and path.
    pub search: Option<String>,
    pub platform: Option<String>,
    pub status: Option<String>,
}

impl ApiFilter {
    pub fn matches_key(&self, key: &ApiKeyModel) -> bool {
        matches_search(self.search.as_deref(), &[&key.name, &key.description])
            && matches_choice(self.platform.as_deref(), &key.platform)
            && matches_choice(self.status.as_deref(), &key.status)
    }

    pub fn matches_endpoint(&self, endpoint: &ApiEndpointModel) -> bool {
        matches_search(self.search.as_deref(), &[&endpoint.name, &endpoint.path])
            && matches_choice(self.platform.as_deref(), &endpoint.platform)
            && matches_choice(self.status.as_deref(), &endpoint.status)
    }
}

/// Usage cards, computed over every key and endpoint regardless of filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiStats {
    pub active_keys: usize,
    pub active_endpoints: usize,
    pub total_calls_today: i64,
    /// Rounded mean of endpoint success rates; 0 without endpoints
    pub average_success_rate: f64,
}

pub fn stats(keys: &[ApiKeyModel], endpoints: &[ApiEndpointModel]) -> ApiStats {
    ApiStats {
        active_keys: keys.iter().filter(|key| key.status == "active").count(),
        active_endpoints: endpoints
            .iter()
            .filter(|endpoint| endpoint.status == "active")
            .count(),
        total_calls_today: endpoints.iter().map(|endpoint| endpoint.calls_today).sum(),
        average_success_rate: mean(endpoints.iter().map(|endpoint| endpoint.success_rate))
            .map(f64::round)
            .unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn key(name: &str, platform: &str, status: &str) -> ApiKeyModel {
        ApiKeyModel {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: format!("{} integration", name),
            api_key: "lh_abc".to_string(),
            key_prefix: "lh_abc".to_string(),
            key_hash: String::new(),
            platform: platform.to_string(),
            permissions: None,
            status: status.to_string(),
            usage_count: 0,
            rate_limit: 1000,
            last_used: None,
            expires_at: None,
            ip_whitelist: None,
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn endpoint(path: &str, status: &str, calls: i64, success: f64) -> ApiEndpointModel {
        ApiEndpointModel {
            id: Uuid::new_v4(),
            name: path.trim_start_matches('/').to_string(),
            path: path.to_string(),
            method: "GET".to_string(),
            description: String::new(),
            data_type: "anonymized".to_string(),
            platform: "general".to_string(),
            status: status.to_string(),
            response_time_avg: 120.0,
            calls_today: calls,
            success_rate: success,
        }
    }

    #[test]
    fn key_filters() {
        let keys = vec![
            key("Production", "lebonlogiciel", "active"),
            key("Staging", "prospection_saas", "inactive"),
        ];
        let everything = ApiFilter::default();
        assert!(keys.iter().all(|k| everything.matches_key(k)));

        let filter = ApiFilter {
            search: Some("integration".into()),
            platform: Some("prospection_saas".into()),
            status: Some("all".into()),
        };
        let matched: Vec<_> = keys.iter().filter(|k| filter.matches_key(k)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Staging");
    }

    #[test]
    fn endpoint_search_uses_path() {
        let filter = ApiFilter {
            search: Some("/v1/lic".into()),
            ..Default::default()
        };
        assert!(filter.matches_endpoint(&endpoint("/v1/licenses", "active", 0, 100.0)));
        assert!(!filter.matches_endpoint(&endpoint("/v1/reviews", "active", 0, 100.0)));
    }

    #[test]
    fn stats_reduce_over_everything() {
        let keys = vec![
            key("a", "general", "active"),
            key("b", "general", "inactive"),
            key("c", "general", "active"),
        ];
        let endpoints = vec![
            endpoint("/a", "active", 100, 99.0),
            endpoint("/b", "maintenance", 50, 96.0),
        ];
        let stats = stats(&keys, &endpoints);
        assert_eq!(stats.active_keys, 2);
        assert_eq!(stats.active_endpoints, 1);
        assert_eq!(stats.total_calls_today, 150);
        assert_eq!(stats.average_success_rate, 98.0);
    }

    #[test]
    fn no_endpoints_means_zero_success_rate() {
        assert_eq!(stats(&[], &[]).average_success_rate, 0.0);
    }
}
