//! Admin team membership repository

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::team_member::{
    self, ActiveModel as TeamMemberActiveModel, AdminRole, Entity as TeamMember,
    Model as TeamMemberModel,
};
use crate::repositories::ListOptions;

#[derive(Debug, Clone)]
pub struct NewTeamMember {
    pub user_id: String,
    pub role: AdminRole,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TeamMemberChanges {
    pub role: Option<AdminRole>,
    pub permissions: Option<Vec<String>>,
}

pub struct TeamRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Add a member. A second invite for the same email is a `Conflict`.
    pub async fn invite(
        &self,
        member: NewTeamMember,
        invited_by: &str,
        now: DateTime<Utc>,
    ) -> Result<TeamMemberModel, RepositoryError> {
        let user_id = member.user_id.trim().to_ascii_lowercase();
        if !looks_like_email(&user_id) {
            return Err(RepositoryError::validation_error(
                "Team member must be identified by an email address",
            ));
        }

        if self.find_by_user_id(&user_id).await?.is_some() {
            return Err(RepositoryError::Conflict(format!(
                "'{}' is already a team member",
                user_id
            )));
        }

        TeamMemberActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            role: Set(member.role.as_str().to_string()),
            permissions: Set(Some(json!(member.permissions))),
            invited_by: Set(Some(invited_by.to_string())),
            joined_at: Set(now.into()),
            last_active: Set(None),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<TeamMemberModel>, RepositoryError> {
        TeamMember::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Option<TeamMemberModel>, RepositoryError> {
        TeamMember::find()
            .filter(team_member::Column::UserId.eq(user_id.trim().to_ascii_lowercase()))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list(
        &self,
        options: ListOptions,
    ) -> Result<Vec<TeamMemberModel>, RepositoryError> {
        options
            .apply(
                TeamMember::find(),
                team_member::Column::JoinedAt,
                team_member::Column::Id,
            )
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: TeamMemberChanges,
    ) -> Result<TeamMemberModel, RepositoryError> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Team member"))?;

        let mut active = existing.into_active_model();
        if let Some(role) = changes.role {
            active.role = Set(role.as_str().to_string());
        }
        if let Some(permissions) = changes.permissions {
            active.permissions = Set(Some(json!(permissions)));
        }

        active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Stamp `last_active` for the operator, if they are a member.
    pub async fn touch(&self, user_id: &str, now: DateTime<Utc>) -> Result<(), RepositoryError> {
        if let Some(existing) = self.find_by_user_id(user_id).await? {
            let mut active = existing.into_active_model();
            active.last_active = Set(Some(now.into()));
            active
                .update(self.db)
                .await
                .map_err(RepositoryError::database_error)?;
        }
        Ok(())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), RepositoryError> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Team member"))?;

        existing
            .delete(self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(())
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
