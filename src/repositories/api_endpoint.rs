//! API endpoint catalogue repository

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::api_endpoint::{
    self, ActiveModel as ApiEndpointActiveModel, DATA_TYPES, ENDPOINT_STATUSES, Entity as ApiEndpoint,
    HTTP_METHODS, Model as ApiEndpointModel,
};
use crate::models::api_key::is_known_platform;
use crate::repositories::ListOptions;

/// Catalogue entry ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApiEndpoint {
    pub name: String,
    pub path: String,
    pub method: String,
    pub description: String,
    pub data_type: String,
    pub platform: String,
    pub status: String,
    pub response_time_avg: f64,
    pub calls_today: i64,
    pub success_rate: f64,
}

pub struct ApiEndpointRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApiEndpointRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        endpoint: NewApiEndpoint,
    ) -> Result<ApiEndpointModel, RepositoryError> {
        let method = endpoint.method.trim().to_ascii_uppercase();
        validate(&endpoint, &method)?;

        ApiEndpointActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(endpoint.name.trim().to_string()),
            path: Set(endpoint.path.trim().to_string()),
            method: Set(method),
            description: Set(endpoint.description),
            data_type: Set(endpoint.data_type),
            platform: Set(endpoint.platform),
            status: Set(endpoint.status),
            response_time_avg: Set(endpoint.response_time_avg.max(0.0)),
            calls_today: Set(endpoint.calls_today.max(0)),
            success_rate: Set(endpoint.success_rate.clamp(0.0, 100.0)),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_method_and_path(
        &self,
        method: &str,
        path: &str,
    ) -> Result<Option<ApiEndpointModel>, RepositoryError> {
        ApiEndpoint::find()
            .filter(api_endpoint::Column::Method.eq(method.to_ascii_uppercase()))
            .filter(api_endpoint::Column::Path.eq(path))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List endpoints ordered by path.
    pub async fn list(
        &self,
        options: ListOptions,
    ) -> Result<Vec<ApiEndpointModel>, RepositoryError> {
        options
            .apply(
                ApiEndpoint::find(),
                api_endpoint::Column::Path,
                api_endpoint::Column::Method,
            )
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}

fn validate(endpoint: &NewApiEndpoint, method: &str) -> Result<(), RepositoryError> {
    if endpoint.name.trim().is_empty() {
        return Err(RepositoryError::validation_error("Endpoint name cannot be empty"));
    }
    if !endpoint.path.trim().starts_with('/') {
        return Err(RepositoryError::validation_error(
            "Endpoint path must start with '/'",
        ));
    }
    if !HTTP_METHODS.contains(&method) {
        return Err(RepositoryError::validation_error(format!(
            "Unsupported HTTP method '{}'",
            method
        )));
    }
    if !DATA_TYPES.contains(&endpoint.data_type.as_str()) {
        return Err(RepositoryError::validation_error(format!(
            "Unknown data type '{}'",
            endpoint.data_type
        )));
    }
    if !is_known_platform(&endpoint.platform) {
        return Err(RepositoryError::validation_error(format!(
            "Unknown platform '{}'",
            endpoint.platform
        )));
    }
    if !ENDPOINT_STATUSES.contains(&endpoint.status.as_str()) {
        return Err(RepositoryError::validation_error(format!(
            "Unknown endpoint status '{}'",
            endpoint.status
        )));
    }
    Ok(())
}
