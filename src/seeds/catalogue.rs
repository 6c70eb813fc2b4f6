//! API endpoint catalogue seeding

use anyhow::Result;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use crate::normalization;
use crate::repositories::ApiEndpointRepository;

/// Catalogue entries exposed to partner platforms.
fn catalogue() -> Value {
    json!([
        {
            "name": "Software catalogue",
            "path": "/partner/v1/software",
            "method": "GET",
            "description": "Software listed on LicenseHub with category and ratings",
            "dataType": "aggregated",
            "platform": "lebonlogiciel",
            "responseTimeAvg": 120,
        },
        {
            "name": "Software reviews",
            "path": "/partner/v1/reviews",
            "method": "GET",
            "description": "Published user reviews without reviewer identity",
            "data_type": "anonymized",
            "platform": "lebonlogiciel",
            "response_time_avg": 180,
        },
        {
            "name": "Usage declarations",
            "path": "/partner/v1/declarations",
            "method": "GET",
            "description": "Declared software usage per organization size and industry",
            "data_type": "anonymized",
            "platform": "prospection_saas",
            "response_time_avg": 240,
        },
        {
            "name": "Consenting organizations",
            "path": "/partner/v1/organizations",
            "method": "GET",
            "description": "Organizations that agreed to prospection contact",
            "data_type": "full",
            "platform": "prospection_saas",
            "response_time_avg": 210,
        },
        {
            "name": "Market rankings",
            "path": "/partner/v1/market",
            "method": "GET",
            "description": "Category rankings and growth rates",
            "data_type": "aggregated",
            "platform": "general",
            "response_time_avg": 95,
        },
        {
            "name": "Review submission",
            "path": "/partner/v1/reviews",
            "method": "POST",
            "description": "Push a review collected on a partner site",
            "data_type": "full",
            "platform": "lebonlogiciel",
            "response_time_avg": 310,
        },
    ])
}

/// Inserts catalogue entries that are not present yet, matched on method and path.
pub async fn seed_api_endpoints(db: &DatabaseConnection) -> Result<usize> {
    let repo = ApiEndpointRepository::new(db);
    let endpoints = normalization::normalize_all(&catalogue(), normalization::normalize_api_endpoint)?;

    let mut created = 0;
    for endpoint in endpoints {
        if repo
            .find_by_method_and_path(&endpoint.method, &endpoint.path)
            .await?
            .is_some()
        {
            log::debug!(
                "Endpoint {} {} already catalogued, skipping",
                endpoint.method,
                endpoint.path
            );
            continue;
        }

        log::info!("Cataloguing endpoint: {} {}", endpoint.method, endpoint.path);
        repo.create(endpoint).await?;
        created += 1;
    }

    log::info!("API endpoint catalogue seeding completed ({} new)", created);
    Ok(created)
}
