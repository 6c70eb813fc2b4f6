//! # Organization Repository
//!
//! CRUD operations for customer organizations, including bulk import.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::organization::{
    self, ActiveModel as OrganizationActiveModel, Entity as Organization,
    Model as OrganizationModel, OrganizationStatus,
};
use crate::repositories::ListOptions;

/// Fully-defaulted organization ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrganization {
    pub name: String,
    pub domain: String,
    pub industry: String,
    pub size: String,
    pub country: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub status: OrganizationStatus,
    pub consent_lebonlogiciel: bool,
    pub consent_prospection: bool,
    pub consent_date: DateTime<Utc>,
    pub total_licenses: i64,
    pub total_users: i64,
    pub monthly_revenue: f64,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl NewOrganization {
    /// Organization created from the admin form: active, zero counters, timestamps now.
    pub fn from_form(name: String, now: DateTime<Utc>) -> Self {
        Self {
            name,
            domain: String::new(),
            industry: String::new(),
            size: String::new(),
            country: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            address: String::new(),
            status: OrganizationStatus::Active,
            consent_lebonlogiciel: false,
            consent_prospection: false,
            consent_date: now,
            total_licenses: 0,
            total_users: 0,
            monthly_revenue: 0.0,
            created_at: now,
            last_activity: now,
        }
    }

    fn into_active(self) -> OrganizationActiveModel {
        OrganizationActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.name),
            domain: Set(self.domain),
            industry: Set(self.industry),
            size: Set(self.size),
            country: Set(self.country),
            contact_email: Set(self.contact_email),
            contact_phone: Set(self.contact_phone),
            address: Set(self.address),
            status: Set(self.status.as_str().to_string()),
            consent_lebonlogiciel: Set(self.consent_lebonlogiciel),
            consent_prospection: Set(self.consent_prospection),
            consent_date: Set(self.consent_date.into()),
            total_licenses: Set(self.total_licenses),
            total_users: Set(self.total_users),
            monthly_revenue: Set(self.monthly_revenue),
            created_at: Set(self.created_at.into()),
            last_activity: Set(self.last_activity.into()),
        }
    }
}

/// Editable organization fields. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct OrganizationChanges {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub country: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<OrganizationStatus>,
    pub consent_lebonlogiciel: Option<bool>,
    pub consent_prospection: Option<bool>,
}

/// Repository for Organization database operations
pub struct OrganizationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrganizationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a single organization
    pub async fn create(
        &self,
        organization: NewOrganization,
    ) -> Result<OrganizationModel, RepositoryError> {
        validate_name(&organization.name)?;

        organization
            .into_active()
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Insert a batch of already-normalized organizations in one transaction.
    ///
    /// Returns the number of rows written.
    pub async fn import(
        &self,
        organizations: Vec<NewOrganization>,
    ) -> Result<usize, RepositoryError> {
        if organizations.is_empty() {
            return Ok(0);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let count = organizations.len();
        for organization in organizations {
            organization
                .into_active()
                .insert(&txn)
                .await
                .map_err(RepositoryError::database_error)?;
        }

        txn.commit().await.map_err(RepositoryError::database_error)?;
        Ok(count)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<OrganizationModel>, RepositoryError> {
        Organization::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List organizations ordered by creation time.
    pub async fn list(
        &self,
        options: ListOptions,
    ) -> Result<Vec<OrganizationModel>, RepositoryError> {
        options
            .apply(
                Organization::find(),
                organization::Column::CreatedAt,
                organization::Column::Id,
            )
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Apply edits. The consent date is refreshed whenever a consent flag changes.
    pub async fn update(
        &self,
        id: Uuid,
        changes: OrganizationChanges,
        now: DateTime<Utc>,
    ) -> Result<OrganizationModel, RepositoryError> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Organization"))?;

        if let Some(name) = changes.name.as_deref() {
            validate_name(name)?;
        }

        let consent_changed = changes
            .consent_lebonlogiciel
            .is_some_and(|value| value != existing.consent_lebonlogiciel)
            || changes
                .consent_prospection
                .is_some_and(|value| value != existing.consent_prospection);

        let mut active = existing.into_active_model();
        if let Some(name) = changes.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(domain) = changes.domain {
            active.domain = Set(domain);
        }
        if let Some(industry) = changes.industry {
            active.industry = Set(industry);
        }
        if let Some(size) = changes.size {
            active.size = Set(size);
        }
        if let Some(country) = changes.country {
            active.country = Set(country);
        }
        if let Some(contact_email) = changes.contact_email {
            active.contact_email = Set(contact_email);
        }
        if let Some(contact_phone) = changes.contact_phone {
            active.contact_phone = Set(contact_phone);
        }
        if let Some(address) = changes.address {
            active.address = Set(address);
        }
        if let Some(status) = changes.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(flag) = changes.consent_lebonlogiciel {
            active.consent_lebonlogiciel = Set(flag);
        }
        if let Some(flag) = changes.consent_prospection {
            active.consent_prospection = Set(flag);
        }
        if consent_changed {
            active.consent_date = Set(now.into());
        }
        active.last_activity = Set(now.into());

        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Delete one organization. A missing row is reported as `NotFound`.
    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Organization"))?;

        existing
            .delete(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Organization::find()
            .count(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}

fn validate_name(name: &str) -> Result<(), RepositoryError> {
    if name.trim().is_empty() {
        return Err(RepositoryError::validation_error(
            "Organization name cannot be empty",
        ));
    }
    if name.chars().count() > 255 {
        return Err(RepositoryError::validation_error(
            "Organization name cannot exceed 255 characters",
        ));
    }
    Ok(())
}
