//! Route path to tab mapping for the admin shell.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::i18n::{self, Language};

/// One of the eight admin tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    Overview,
    Organizations,
    MarketIntelligence,
    ApiManagement,
    Webhooks,
    DataExports,
    BiAnalytics,
    TeamAccess,
}

/// Display order of the navigation bar.
pub const ALL_TABS: [Tab; 8] = [
    Tab::Overview,
    Tab::Organizations,
    Tab::MarketIntelligence,
    Tab::ApiManagement,
    Tab::Webhooks,
    Tab::DataExports,
    Tab::BiAnalytics,
    Tab::TeamAccess,
];

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Organizations => "organizations",
            Tab::MarketIntelligence => "market-intelligence",
            Tab::ApiManagement => "api-management",
            Tab::Webhooks => "webhooks",
            Tab::DataExports => "data-exports",
            Tab::BiAnalytics => "bi-analytics",
            Tab::TeamAccess => "team-access",
        }
    }

    /// Front-end route that opens this tab.
    pub fn path(self) -> &'static str {
        match self {
            Tab::Overview => "/",
            Tab::Organizations => "/organizations",
            Tab::MarketIntelligence => "/market",
            Tab::ApiManagement => "/api",
            Tab::Webhooks => "/webhooks",
            Tab::DataExports => "/exports",
            Tab::BiAnalytics => "/analytics",
            Tab::TeamAccess => "/team",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Tab::Overview => "nav.overview",
            Tab::Organizations => "nav.organizations",
            Tab::MarketIntelligence => "nav.market_intelligence",
            Tab::ApiManagement => "nav.api_management",
            Tab::Webhooks => "nav.webhooks",
            Tab::DataExports => "nav.data_exports",
            Tab::BiAnalytics => "nav.bi_analytics",
            Tab::TeamAccess => "nav.team_access",
        }
    }

    /// Resolves a route path to its tab. Unknown paths open the overview.
    ///
    /// Query strings, fragments and a trailing slash are ignored.
    pub fn from_path(path: &str) -> Tab {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        ALL_TABS
            .into_iter()
            .find(|tab| tab.path() == path)
            .unwrap_or(Tab::Overview)
    }
}

/// One entry of the localized navigation bar.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NavItem {
    #[schema(example = "market-intelligence")]
    pub id: String,
    #[schema(example = "Intelligence Marché")]
    pub label: String,
    #[schema(example = "/market")]
    pub path: String,
    pub active: bool,
}

/// Localized navigation for the given route.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Navigation {
    pub active_tab: Tab,
    pub language: Language,
    pub items: Vec<NavItem>,
}

/// Builds the navigation bar with `active` marking the tab that `path` opens.
pub fn navigation_for(path: &str, language: Language) -> Navigation {
    let active_tab = Tab::from_path(path);
    let items = ALL_TABS
        .into_iter()
        .map(|tab| NavItem {
            id: tab.as_str().to_string(),
            label: i18n::translate(language, tab.label_key()).to_string(),
            path: tab.path().to_string(),
            active: tab == active_tab,
        })
        .collect();

    Navigation {
        active_tab,
        language,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_routes_map_to_tabs() {
        let cases = [
            ("/", Tab::Overview),
            ("/organizations", Tab::Organizations),
            ("/market", Tab::MarketIntelligence),
            ("/api", Tab::ApiManagement),
            ("/webhooks", Tab::Webhooks),
            ("/exports", Tab::DataExports),
            ("/analytics", Tab::BiAnalytics),
            ("/team", Tab::TeamAccess),
        ];
        for (path, expected) in cases {
            assert_eq!(Tab::from_path(path), expected, "path {path}");
        }
    }

    #[test]
    fn unknown_routes_fall_back_to_overview() {
        assert_eq!(Tab::from_path("/unknown"), Tab::Overview);
        assert_eq!(Tab::from_path(""), Tab::Overview);
        assert_eq!(Tab::from_path("/market/extra"), Tab::Overview);
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(Tab::from_path("/team/"), Tab::TeamAccess);
        assert_eq!(Tab::from_path("/api?tab=keys"), Tab::ApiManagement);
        assert_eq!(Tab::from_path("/exports#latest"), Tab::DataExports);
    }

    #[test]
    fn every_tab_path_resolves_to_itself() {
        for tab in ALL_TABS {
            assert_eq!(Tab::from_path(tab.path()), tab);
        }
    }

    #[test]
    fn navigation_is_localized_with_single_active_item() {
        let nav = navigation_for("/market", Language::Fr);
        assert_eq!(nav.active_tab, Tab::MarketIntelligence);
        assert_eq!(nav.items.len(), 8);
        assert_eq!(nav.items.iter().filter(|item| item.active).count(), 1);
        assert_eq!(nav.items[2].label, "Intelligence Marché");

        let nav = navigation_for("/market", Language::En);
        assert_eq!(nav.items[2].label, "Market Intelligence");
        assert_eq!(nav.items[0].label, "Overview");
    }

    #[test]
    fn tab_serializes_as_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Tab::BiAnalytics).unwrap(),
            "\"bi-analytics\""
        );
    }
}
