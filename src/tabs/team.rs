//! Team access tab.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::team_member::{AdminRole, Model as TeamMemberModel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamStats {
    pub total: usize,
    pub super_admins: usize,
    pub admins: usize,
    pub analysts: usize,
    pub viewers: usize,
}

/// Members counted by role. Rows with an unknown role only count towards `total`.
pub fn stats(members: &[TeamMemberModel]) -> TeamStats {
    let mut stats = TeamStats {
        total: members.len(),
        ..TeamStats::default()
    };
    for member in members {
        match AdminRole::parse(&member.role) {
            Some(AdminRole::SuperAdmin) => stats.super_admins += 1,
            Some(AdminRole::Admin) => stats.admins += 1,
            Some(AdminRole::Analyst) => stats.analysts += 1,
            Some(AdminRole::Viewer) => stats.viewers += 1,
            None => {}
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn member(email: &str, role: &str) -> TeamMemberModel {
        TeamMemberModel {
            id: Uuid::new_v4(),
            user_id: email.to_string(),
            role: role.to_string(),
            permissions: None,
            invited_by: None,
            joined_at: Utc::now().fixed_offset(),
            last_active: None,
        }
    }

    #[test]
    fn counts_roles() {
        let members = [
            member("a@lh.fr", "super_admin"),
            member("b@lh.fr", "viewer"),
            member("c@lh.fr", "viewer"),
            member("d@lh.fr", "analyst"),
            member("e@lh.fr", "intern"),
        ];
        let stats = stats(&members);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.super_admins, 1);
        assert_eq!(stats.admins, 0);
        assert_eq!(stats.analysts, 1);
        assert_eq!(stats.viewers, 2);
    }
}
