//! Admin team member entity model

use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_team_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Operator email, unique
    pub user_id: String,
    pub role: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub permissions: Option<JsonValue>,
    pub invited_by: Option<String>,
    pub joined_at: DateTimeWithTimeZone,
    pub last_active: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Admin role. Only `Viewer` is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    #[default]
    Admin,
    Analyst,
    Viewer,
}

pub const ALL_ROLES: [AdminRole; 4] = [
    AdminRole::SuperAdmin,
    AdminRole::Admin,
    AdminRole::Analyst,
    AdminRole::Viewer,
];

impl AdminRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Admin => "admin",
            AdminRole::Analyst => "analyst",
            AdminRole::Viewer => "viewer",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        ALL_ROLES
            .into_iter()
            .find(|role| role.as_str() == raw.trim())
    }

    pub const fn can_write(self) -> bool {
        !matches!(self, AdminRole::Viewer)
    }

    /// Translation key for the role label.
    pub const fn label_key(self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "team.super_admin",
            AdminRole::Admin => "team.admin",
            AdminRole::Analyst => "team.analyst",
            AdminRole::Viewer => "team.viewer",
        }
    }
}
