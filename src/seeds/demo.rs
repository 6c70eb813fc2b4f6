//! Demo data for local profiles

use anyhow::Result;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use crate::normalization;
use crate::repositories::{
    BiRepository, ListOptions, MarketIntelligenceRepository, OrganizationRepository,
};

fn organizations() -> Value {
    json!([
        {
            "name": "Atelier Dumas",
            "domain": "atelier-dumas.fr",
            "industry": "Manufacturing",
            "size": "51-200",
            "country": "France",
            "contactEmail": "it@atelier-dumas.fr",
            "status": "active",
            "consentLebonlogiciel": true,
            "consentProspection": true,
            "totalLicenses": 140,
            "totalUsers": 118,
            "monthlyRevenue": 4200,
        },
        {
            "name": "Cabinet Mercier Avocats",
            "domain": "mercier-avocats.fr",
            "industry": "Legal",
            "size": "11-50",
            "country": "France",
            "contact_email": "contact@mercier-avocats.fr",
            "status": "active",
            "consent_lebonlogiciel": 1,
            "consent_prospection": 0,
            "total_licenses": 35,
            "total_users": 32,
            "monthly_revenue": 1150,
        },
        {
            "name": "Nordlys Logistics",
            "domain": "nordlys.eu",
            "industry": "Logistics",
            "size": "201-500",
            "country": "Belgium",
            "contact_email": "procurement@nordlys.eu",
            "status": "pending",
            "consent_lebonlogiciel": "true",
            "total_licenses": 0,
            "total_users": 0,
        },
        {
            "name": "Clinique Saint-Roch",
            "domain": "clinique-saint-roch.fr",
            "industry": "Healthcare",
            "size": "201-500",
            "country": "France",
            "status": "inactive",
            "total_licenses": 60,
            "total_users": 12,
            "monthly_revenue": 900,
        },
    ])
}

fn market() -> Value {
    json!([
        {
            "softwareName": "Slack",
            "category": "Communication",
            "marketRank": 1,
            "totalUsers": 18400,
            "averageRating": 4.5,
            "growthRate": 12.4,
            "mainCompetitors": ["Microsoft Teams", "Google Chat"],
            "marketShare": 31.5,
        },
        {
            "software_name": "HubSpot CRM",
            "category": "CRM",
            "market_rank": 2,
            "total_users": 9200,
            "average_rating": 4.4,
            "growth_rate": 18.1,
            "main_competitors": "Salesforce, Pipedrive",
            "market_share": 22.0,
        },
        {
            "software_name": "Notion",
            "category": "Productivity",
            "market_rank": 3,
            "total_users": 7600,
            "average_rating": 4.6,
            "growth_rate": 25.3,
            "main_competitors": ["Confluence", "Coda"],
            "market_share": 14.2,
        },
        {
            "software_name": "Pennylane",
            "category": "Accounting",
            "market_rank": 4,
            "total_users": 4100,
            "average_rating": 4.2,
            "growth_rate": 31.0,
            "main_competitors": ["Sage", "QuickBooks"],
            "market_share": 9.8,
        },
    ])
}

fn metrics() -> Value {
    json!([
        { "name": "Monthly recurring revenue", "category": "revenue", "value": 124500, "previousValue": 118200, "unit": "EUR" },
        { "name": "Active users", "category": "users", "value": 3120, "previous_value": 3190, "unit": "users" },
        { "name": "Average satisfaction", "category": "satisfaction", "value": 4.4, "previous_value": 4.4, "unit": "/5", "period": "quarterly" },
    ])
}

/// Seeds demo records into whichever of the demo tables is still empty.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<()> {
    let now = Utc::now();

    let organizations_repo = OrganizationRepository::new(db);
    if organizations_repo.count().await? == 0 {
        let records = normalization::normalize_organizations(&organizations(), now)?;
        let imported = organizations_repo.import(records).await?;
        log::info!("Seeded {} demo organizations", imported);
    } else {
        log::info!("Organizations present, skipping demo organizations");
    }

    let market_repo = MarketIntelligenceRepository::new(db);
    if market_repo
        .list(ListOptions::ascending().with_limit(1))
        .await?
        .is_empty()
    {
        let entries = normalization::normalize_all(&market(), normalization::normalize_market_entry)?;
        let count = entries.len();
        for entry in entries {
            market_repo.create(entry, now).await?;
        }
        log::info!("Seeded {} demo market entries", count);
    } else {
        log::info!("Market intelligence present, skipping demo rankings");
    }

    let bi_repo = BiRepository::new(db);
    if bi_repo
        .list_metrics(ListOptions::newest_first().with_limit(1))
        .await?
        .is_empty()
    {
        let metrics = normalization::normalize_all(&metrics(), normalization::normalize_bi_metric)?;
        let count = metrics.len();
        for metric in metrics {
            bi_repo.create_metric(metric, now).await?;
        }
        log::info!("Seeded {} demo metrics", count);
    } else {
        log::info!("BI metrics present, skipping demo metrics");
    }

    Ok(())
}
