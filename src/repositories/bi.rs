//! BI dashboards and metrics repository

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::bi_dashboard::{
    self, ActiveModel as DashboardActiveModel, Entity as BiDashboard, Model as DashboardModel,
};
use crate::models::bi_metric::{
    self, ActiveModel as MetricActiveModel, Entity as BiMetric, METRIC_PERIODS,
    Model as MetricModel,
};
use crate::repositories::ListOptions;
use crate::tabs::bi::{DEFAULT_WIDGETS, metric_change};

#[derive(Debug, Clone)]
pub struct NewDashboard {
    pub name: String,
    pub description: String,
    pub category: String,
    /// Empty means the default widget set.
    pub widgets: Vec<String>,
    pub is_public: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMetric {
    pub name: String,
    pub category: String,
    pub value: f64,
    pub previous_value: f64,
    pub unit: String,
    pub period: String,
}

pub struct BiRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BiRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_dashboard(
        &self,
        dashboard: NewDashboard,
        created_by: &str,
        now: DateTime<Utc>,
    ) -> Result<DashboardModel, RepositoryError> {
        if dashboard.name.trim().is_empty() {
            return Err(RepositoryError::validation_error(
                "Dashboard name cannot be empty",
            ));
        }

        let widgets = if dashboard.widgets.is_empty() {
            DEFAULT_WIDGETS.iter().map(|w| w.to_string()).collect()
        } else {
            dashboard.widgets
        };
        let category = match dashboard.category.trim() {
            "" => "general".to_string(),
            other => other.to_string(),
        };

        DashboardActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(dashboard.name.trim().to_string()),
            description: Set(dashboard.description),
            category: Set(category),
            widgets: Set(Some(json!(widgets))),
            is_public: Set(dashboard.is_public),
            views: Set(0),
            created_by: Set(created_by.to_string()),
            created_at: Set(now.into()),
            last_modified: Set(now.into()),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    pub async fn list_dashboards(
        &self,
        options: ListOptions,
    ) -> Result<Vec<DashboardModel>, RepositoryError> {
        options
            .apply(
                BiDashboard::find(),
                bi_dashboard::Column::CreatedAt,
                bi_dashboard::Column::Id,
            )
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn delete_dashboard(&self, id: Uuid) -> Result<(), RepositoryError> {
        let existing = BiDashboard::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Dashboard"))?;

        existing
            .delete(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(())
    }

    /// Store a metric; `change` and `change_type` are derived from the two values.
    pub async fn create_metric(
        &self,
        metric: NewMetric,
        now: DateTime<Utc>,
    ) -> Result<MetricModel, RepositoryError> {
        if metric.name.trim().is_empty() {
            return Err(RepositoryError::validation_error(
                "Metric name cannot be empty",
            ));
        }
        if !METRIC_PERIODS.contains(&metric.period.as_str()) {
            return Err(RepositoryError::validation_error(format!(
                "Unknown metric period '{}'",
                metric.period
            )));
        }
        if !metric.value.is_finite() || !metric.previous_value.is_finite() {
            return Err(RepositoryError::validation_error(
                "Metric values must be finite numbers",
            ));
        }

        let (change, change_type) = metric_change(metric.value, metric.previous_value);

        MetricActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(metric.name.trim().to_string()),
            category: Set(metric.category),
            value: Set(metric.value),
            previous_value: Set(metric.previous_value),
            change: Set(change),
            change_type: Set(change_type.as_str().to_string()),
            unit: Set(metric.unit),
            period: Set(metric.period),
            updated_at: Set(now.into()),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    pub async fn list_metrics(
        &self,
        options: ListOptions,
    ) -> Result<Vec<MetricModel>, RepositoryError> {
        options
            .apply(
                BiMetric::find(),
                bi_metric::Column::UpdatedAt,
                bi_metric::Column::Id,
            )
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Most recently updated metric in `category` for `period`.
    pub async fn latest_metric(
        &self,
        category: &str,
        period: &str,
    ) -> Result<Option<MetricModel>, RepositoryError> {
        BiMetric::find()
            .filter(bi_metric::Column::Category.eq(category))
            .filter(bi_metric::Column::Period.eq(period))
            .order_by_desc(bi_metric::Column::UpdatedAt)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
