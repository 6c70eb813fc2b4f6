//! French/English dictionary for the admin interface.
//!
//! Lookups never fail: an unknown key resolves to the key itself so a missing
//! translation shows up verbatim instead of breaking the page.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Interface language. French is the default for new operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Fr,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    /// Parses a language code, tolerating case and region suffixes (`fr-FR`).
    pub fn parse(raw: &str) -> Option<Self> {
        let primary = raw
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Language::En),
            "fr" => Some(Language::Fr),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// (key, english, french)
const TRANSLATIONS: &[(&str, &str, &str)] = &[
    ("nav.overview", "Overview", "Vue d'ensemble"),
    ("nav.organizations", "Organizations", "Organisations"),
    ("nav.market_intelligence", "Market Intelligence", "Intelligence Marché"),
    ("nav.api_management", "API Management", "Gestion API"),
    ("nav.webhooks", "Webhooks", "Webhooks"),
    ("nav.data_exports", "Data Exports", "Exports de Données"),
    ("nav.bi_analytics", "BI Analytics", "Analytique BI"),
    ("nav.team_access", "Team Access", "Accès Équipe"),

    ("header.welcome", "Welcome to LicenseHub Admin", "Bienvenue sur LicenseHub Admin"),
    ("header.language", "Language", "Langue"),
    ("header.profile", "Profile", "Profil"),
    ("header.logout", "Logout", "Déconnexion"),

    ("overview.title", "Dashboard Overview", "Tableau de Bord"),
    ("overview.total_organizations", "Total Organizations", "Total Organisations"),
    ("overview.active_licenses", "Active Licenses", "Licences Actives"),
    ("overview.monthly_revenue", "Monthly Revenue", "Revenus Mensuels"),
    ("overview.data_exports", "Data Exports", "Exports de Données"),
    ("overview.recent_activity", "Recent Activity", "Activité Récente"),
    ("overview.top_software", "Top Software by Usage", "Top Logiciels par Usage"),

    ("organizations.title", "Organizations Management", "Gestion des Organisations"),
    ("organizations.add_new", "Add Organization", "Ajouter Organisation"),
    ("organizations.consent_status", "Consent Status", "Statut Consentement"),
    ("organizations.data_sharing", "Data Sharing", "Partage de Données"),
    ("organizations.granted", "Granted", "Accordé"),
    ("organizations.pending", "Pending", "En Attente"),
    ("organizations.revoked", "Revoked", "Révoqué"),

    ("market.title", "Market Intelligence", "Intelligence Marché"),
    ("market.software_rankings", "Software Rankings", "Classements Logiciels"),
    ("market.competitive_analysis", "Competitive Analysis", "Analyse Concurrentielle"),
    ("market.market_trends", "Market Trends", "Tendances Marché"),
    ("market.growth_rate", "Growth Rate", "Taux de Croissance"),
    ("market.market_share", "Market Share", "Part de Marché"),

    ("api.title", "API Management", "Gestion API"),
    ("api.create_key", "Create API Key", "Créer Clé API"),
    ("api.platform", "Platform", "Plateforme"),
    ("api.permissions", "Permissions", "Permissions"),
    ("api.last_used", "Last Used", "Dernière Utilisation"),
    ("api.status", "Status", "Statut"),
    ("api.active", "Active", "Actif"),
    ("api.inactive", "Inactive", "Inactif"),

    ("webhooks.title", "Webhook Management", "Gestion Webhooks"),
    ("webhooks.add_webhook", "Add Webhook", "Ajouter Webhook"),
    ("webhooks.endpoint_url", "Endpoint URL", "URL Endpoint"),
    ("webhooks.events", "Events", "Événements"),
    ("webhooks.success_rate", "Success Rate", "Taux de Succès"),
    ("webhooks.last_triggered", "Last Triggered", "Dernier Déclenchement"),

    ("bi.title", "BI Analytics", "Analytique BI"),
    ("bi.create_dashboard", "Create Dashboard", "Créer Tableau de Bord"),
    ("bi.revenue_metrics", "Revenue Metrics", "Métriques Revenus"),
    ("bi.usage_analytics", "Usage Analytics", "Analytique Usage"),
    ("bi.satisfaction_scores", "Satisfaction Scores", "Scores Satisfaction"),
    ("bi.custom_reports", "Custom Reports", "Rapports Personnalisés"),

    ("team.title", "Team Access Control", "Contrôle Accès Équipe"),
    ("team.invite_member", "Invite Member", "Inviter Membre"),
    ("team.role", "Role", "Rôle"),
    ("team.permissions", "Permissions", "Permissions"),
    ("team.last_active", "Last Active", "Dernière Activité"),
    ("team.super_admin", "Super Admin", "Super Admin"),
    ("team.admin", "Admin", "Admin"),
    ("team.analyst", "Analyst", "Analyste"),
    ("team.viewer", "Viewer", "Visualiseur"),

    ("common.save", "Save", "Enregistrer"),
    ("common.cancel", "Cancel", "Annuler"),
    ("common.delete", "Delete", "Supprimer"),
    ("common.edit", "Edit", "Modifier"),
    ("common.view", "View", "Voir"),
    ("common.export", "Export", "Exporter"),
    ("common.search", "Search", "Rechercher"),
    ("common.filter", "Filter", "Filtrer"),
    ("common.loading", "Loading...", "Chargement..."),
    ("common.no_data", "No data available", "Aucune donnée disponible"),
    ("common.error", "An error occurred", "Une erreur s'est produite"),
    ("common.success", "Operation successful", "Opération réussie"),
];

/// Translates `key` into `language`, falling back to the key itself.
pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    TRANSLATIONS
        .iter()
        .find(|(candidate, _, _)| *candidate == key)
        .map(|(_, en, fr)| match language {
            Language::En => *en,
            Language::Fr => *fr,
        })
        .unwrap_or(key)
}

/// Full dictionary for one language, keyed by translation key.
pub fn dictionary(language: Language) -> BTreeMap<&'static str, &'static str> {
    TRANSLATIONS
        .iter()
        .map(|(key, en, fr)| {
            let text = match language {
                Language::En => *en,
                Language::Fr => *fr,
            };
            (*key, text)
        })
        .collect()
}
