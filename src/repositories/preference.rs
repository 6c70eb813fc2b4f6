//! Per-operator preferences

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

use crate::error::RepositoryError;
use crate::i18n::Language;
use crate::models::preference::{
    ActiveModel as PreferenceActiveModel, Entity as Preference, Model as PreferenceModel,
};

pub struct PreferenceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PreferenceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stored language for the operator, if any. Unparseable values read as unset.
    pub async fn language(&self, user_id: &str) -> Result<Option<Language>, RepositoryError> {
        let stored = Preference::find_by_id(user_id.to_string())
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(stored.and_then(|preference| Language::parse(&preference.language)))
    }

    /// Insert or overwrite the operator's language.
    pub async fn set_language(
        &self,
        user_id: &str,
        language: Language,
        now: DateTime<Utc>,
    ) -> Result<PreferenceModel, RepositoryError> {
        let existing = Preference::find_by_id(user_id.to_string())
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        match existing {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.language = Set(language.code().to_string());
                active.updated_at = Set(now.into());
                active
                    .update(self.db)
                    .await
                    .map_err(RepositoryError::database_error)
            }
            None => PreferenceActiveModel {
                user_id: Set(user_id.to_string()),
                language: Set(language.code().to_string()),
                updated_at: Set(now.into()),
            }
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error),
        }
    }
}
