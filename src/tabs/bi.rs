//! BI analytics tab: dashboard filters, metric deltas and synthesized series.

use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{matches_choice, matches_search, round_to};
use crate::i18n::Language;
use crate::models::bi_dashboard::Model as DashboardModel;

/// Widgets given to a dashboard created without any.
pub const DEFAULT_WIDGETS: [&str; 3] = ["revenue_chart", "user_metrics", "software_usage"];

const CHART_COLORS: [&str; 5] = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6"];

const MONTHS_FR: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DashboardFilter {
    /// Substring searched in name and description
    pub search: Option<String>,
    pub category: Option<String>,
}

impl DashboardFilter {
    pub fn matches(&self, dashboard: &DashboardModel) -> bool {
        matches_search(
            self.search.as_deref(),
            &[&dashboard.name, &dashboard.description],
        ) && matches_choice(self.category.as_deref(), &dashboard.category)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total: usize,
    pub public: usize,
    pub total_views: i64,
}

pub fn apply(
    filter: &DashboardFilter,
    dashboards: Vec<DashboardModel>,
) -> (Vec<DashboardModel>, DashboardStats) {
    let stats = DashboardStats {
        total: dashboards.len(),
        public: dashboards.iter().filter(|d| d.is_public).count(),
        total_views: dashboards.iter().map(|d| d.views).sum(),
    };
    let filtered = dashboards
        .into_iter()
        .filter(|dashboard| filter.matches(dashboard))
        .collect();
    (filtered, stats)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
    Stable,
}

impl ChangeType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ChangeType::Increase => "increase",
            ChangeType::Decrease => "decrease",
            ChangeType::Stable => "stable",
        }
    }
}

/// Percent change from `previous` to `value`, one decimal.
///
/// A zero previous value has no meaningful percentage; the change is 0 and
/// the direction still follows the sign of `value`.
pub fn metric_change(value: f64, previous: f64) -> (f64, ChangeType) {
    let change_type = if value > previous {
        ChangeType::Increase
    } else if value < previous {
        ChangeType::Decrease
    } else {
        ChangeType::Stable
    };
    let change = if previous == 0.0 {
        0.0
    } else {
        round_to((value - previous) / previous.abs() * 100.0, 1)
    };
    (change, change_type)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    pub month: String,
    pub revenue: u32,
    pub licenses: u32,
    pub users: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageSlice {
    pub name: String,
    pub value: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndustryRow {
    pub industry: String,
    pub companies: u32,
    pub revenue: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub month: String,
    pub new_users: u32,
    pub total_users: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SatisfactionPoint {
    pub month: String,
    pub satisfaction: f64,
    pub reviews: u32,
}

/// Chart series for the analytics view. The monthly series are random within
/// fixed bands; usage and industry breakdowns are fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub revenue_data: Vec<RevenuePoint>,
    pub software_usage: Vec<UsageSlice>,
    pub industry_breakdown: Vec<IndustryRow>,
    pub user_growth: Vec<GrowthPoint>,
    pub satisfaction_trends: Vec<SatisfactionPoint>,
}

pub fn synthesize_analytics<R: Rng + ?Sized>(rng: &mut R, language: Language) -> AnalyticsData {
    let months = match language {
        Language::Fr => MONTHS_FR,
        Language::En => MONTHS_EN,
    };

    let revenue_data = months
        .iter()
        .map(|month| RevenuePoint {
            month: month.to_string(),
            revenue: rng.gen_range(20_000..70_000),
            licenses: rng.gen_range(100..300),
            users: rng.gen_range(500..1_500),
        })
        .collect();

    let software_usage = [
        ("Microsoft Office", 35),
        ("Salesforce", 25),
        ("Adobe Creative", 20),
        ("Slack", 15),
        (other_label(language), 5),
    ]
    .into_iter()
    .zip(CHART_COLORS)
    .map(|((name, value), color)| UsageSlice {
        name: name.to_string(),
        value,
        color: color.to_string(),
    })
    .collect();

    let industry_breakdown = [
        ("Technologie", 45, 180_000),
        ("Finance", 32, 150_000),
        ("Santé", 28, 120_000),
        ("Éducation", 25, 100_000),
        ("Commerce", 22, 90_000),
    ]
    .into_iter()
    .map(|(industry, companies, revenue)| IndustryRow {
        industry: industry.to_string(),
        companies,
        revenue,
    })
    .collect();

    let user_growth = months
        .iter()
        .zip(0u32..)
        .map(|(month, index)| GrowthPoint {
            month: month.to_string(),
            new_users: rng.gen_range(50..150),
            total_users: 500 + index * 80 + rng.gen_range(0..50),
        })
        .collect();

    let satisfaction_trends = months
        .iter()
        .map(|month| SatisfactionPoint {
            month: month.to_string(),
            satisfaction: round_to(3.5 + rng.gen_range(0.0..1.5), 2),
            reviews: rng.gen_range(20..70),
        })
        .collect();

    AnalyticsData {
        revenue_data,
        software_usage,
        industry_breakdown,
        user_growth,
        satisfaction_trends,
    }
}

fn other_label(language: Language) -> &'static str {
    match language {
        Language::Fr => "Autres",
        Language::En => "Others",
    }
}
