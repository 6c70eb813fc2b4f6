//! Market intelligence tab.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{matches_choice, matches_search, mean, round_to};
use crate::models::market_intelligence::Model as MarketModel;

#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MarketFilter {
    /// Substring searched in software name and category
    pub search: Option<String>,
    pub category: Option<String>,
}

impl MarketFilter {
    pub fn matches(&self, entry: &MarketModel) -> bool {
        matches_search(
            self.search.as_deref(),
            &[&entry.software_name, &entry.category],
        ) && matches_choice(self.category.as_deref(), &entry.category)
    }
}

/// Cards over the filtered rankings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarketStats {
    pub tracked: usize,
    /// Mean rating, one decimal
    pub average_rating: f64,
    /// Mean growth rate in percent, one decimal
    pub average_growth: f64,
    pub total_users: i64,
}

pub fn apply(filter: &MarketFilter, entries: Vec<MarketModel>) -> (Vec<MarketModel>, MarketStats) {
    let filtered: Vec<_> = entries
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .collect();

    let stats = MarketStats {
        tracked: filtered.len(),
        average_rating: mean(filtered.iter().map(|e| e.average_rating))
            .map(|value| round_to(value, 1))
            .unwrap_or(0.0),
        average_growth: mean(filtered.iter().map(|e| e.growth_rate))
            .map(|value| round_to(value, 1))
            .unwrap_or(0.0),
        total_users: filtered.iter().map(|e| e.total_users).sum(),
    };

    (filtered, stats)
}

/// Distinct categories in first-seen order, for the category dropdown.
pub fn categories(entries: &[MarketModel]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for entry in entries {
        if !entry.category.is_empty() && !seen.contains(&entry.category) {
            seen.push(entry.category.clone());
        }
    }
    seen
}
