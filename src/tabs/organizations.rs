//! Organizations tab: search, status and consent filters plus summary cards.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{matches_choice, matches_search};
use crate::models::organization::{Model as OrganizationModel, OrganizationStatus};

/// Query filters for the organizations view.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct OrganizationFilter {
    /// Substring searched in name, domain and industry
    pub search: Option<String>,
    /// all | active | inactive | pending
    pub status: Option<String>,
    /// all | both | lebonlogiciel | prospection | none
    pub consent: Option<String>,
}

impl OrganizationFilter {
    pub fn matches(&self, org: &OrganizationModel) -> bool {
        matches_search(
            self.search.as_deref(),
            &[&org.name, &org.domain, &org.industry],
        ) && matches_choice(self.status.as_deref(), &org.status)
            && self.matches_consent(org)
    }

    fn matches_consent(&self, org: &OrganizationModel) -> bool {
        let lbl = org.consent_lebonlogiciel;
        let prospection = org.consent_prospection;
        match self.consent.as_deref().map(str::trim) {
            None | Some("") | Some(super::ALL) => true,
            Some("both") => lbl && prospection,
            Some("lebonlogiciel") => lbl,
            Some("prospection") => prospection,
            Some("none") => !lbl && !prospection,
            Some(_) => false,
        }
    }
}

/// Summary cards. Counts cover every organization; `filtered*` cover the filtered view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrganizationStats {
    pub total: usize,
    pub active: usize,
    pub consent_lebonlogiciel: usize,
    pub consent_prospection: usize,
    pub filtered: usize,
    pub filtered_monthly_revenue: f64,
}

/// Filter `organizations` and compute the cards in one pass over the listing.
pub fn apply(
    filter: &OrganizationFilter,
    organizations: Vec<OrganizationModel>,
) -> (Vec<OrganizationModel>, OrganizationStats) {
    let mut stats = OrganizationStats {
        total: organizations.len(),
        ..OrganizationStats::default()
    };

    for org in &organizations {
        if org.status == OrganizationStatus::Active.as_str() {
            stats.active += 1;
        }
        if org.consent_lebonlogiciel {
            stats.consent_lebonlogiciel += 1;
        }
        if org.consent_prospection {
            stats.consent_prospection += 1;
        }
    }

    let filtered: Vec<_> = organizations
        .into_iter()
        .filter(|org| filter.matches(org))
        .collect();
    stats.filtered = filtered.len();
    stats.filtered_monthly_revenue = filtered
        .iter()
        .fold(0.0, |total, org| total + org.monthly_revenue);

    (filtered, stats)
}
