//! Data export job repository

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::data_export::{
    self, ActiveModel as DataExportActiveModel, EXPORT_FORMATS, EXPORT_SOURCES,
    Entity as DataExport, Model as DataExportModel,
};
use crate::repositories::ListOptions;

#[derive(Debug, Clone)]
pub struct NewDataExport {
    pub name: String,
    pub format: String,
    pub data_source: String,
    pub filters: Option<String>,
}

pub struct DataExportRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DataExportRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record a pending export job owned by `user_id`. No data is extracted.
    pub async fn create(
        &self,
        export: NewDataExport,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<DataExportModel, RepositoryError> {
        if export.name.trim().is_empty() {
            return Err(RepositoryError::validation_error(
                "Export name cannot be empty",
            ));
        }
        if !EXPORT_FORMATS.contains(&export.format.as_str()) {
            return Err(RepositoryError::validation_error(format!(
                "Unsupported export format '{}'",
                export.format
            )));
        }
        if !EXPORT_SOURCES.contains(&export.data_source.as_str()) {
            return Err(RepositoryError::validation_error(format!(
                "Unknown data source '{}'",
                export.data_source
            )));
        }

        let filters = export
            .filters
            .map(|filters| filters.trim().to_string())
            .filter(|filters| !filters.is_empty());

        DataExportActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(export.name.trim().to_string()),
            format: Set(export.format),
            data_source: Set(export.data_source),
            filters: Set(filters),
            status: Set("pending".to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(now.into()),
            completed_at: Set(None),
            download_url: Set(None),
            file_size: Set(None),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<DataExportModel>, RepositoryError> {
        DataExport::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list(
        &self,
        options: ListOptions,
    ) -> Result<Vec<DataExportModel>, RepositoryError> {
        options
            .apply(
                DataExport::find(),
                data_export::Column::CreatedAt,
                data_export::Column::Id,
            )
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn count(&self) -> Result<u64, RepositoryError> {
        DataExport::find()
            .count(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
