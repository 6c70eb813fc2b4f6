//! Audit trail of admin mutations

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde_json::Value;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::audit_log::{
    self, ActiveModel as AuditLogActiveModel, Entity as AuditLog, Model as AuditLogModel,
};
use crate::repositories::ListOptions;

/// One audited action.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub user_id: String,
    pub action: String,
    pub resource: String,
    pub resource_id: Option<String>,
    pub details: Value,
}

pub struct AuditLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuditLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record(
        &self,
        entry: AuditEntry,
        now: DateTime<Utc>,
    ) -> Result<AuditLogModel, RepositoryError> {
        AuditLogActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(entry.user_id),
            action: Set(entry.action),
            resource: Set(entry.resource),
            resource_id: Set(entry.resource_id),
            details: Set(Some(entry.details)),
            timestamp: Set(now.into()),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    pub async fn list(&self, options: ListOptions) -> Result<Vec<AuditLogModel>, RepositoryError> {
        options
            .apply(
                AuditLog::find(),
                audit_log::Column::Timestamp,
                audit_log::Column::Id,
            )
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
