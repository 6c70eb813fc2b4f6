//! Migration to create team membership and audit log tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminTeamMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminTeamMembers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminTeamMembers::UserId).text().not_null())
                    .col(
                        ColumnDef::new(AdminTeamMembers::Role)
                            .text()
                            .not_null()
                            .default("viewer"),
                    )
                    .col(
                        ColumnDef::new(AdminTeamMembers::Permissions)
                            .json_binary()
                            .null(),
                    )
                    .col(ColumnDef::new(AdminTeamMembers::InvitedBy).text().null())
                    .col(
                        ColumnDef::new(AdminTeamMembers::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AdminTeamMembers::LastActive)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_admin_team_members_user_id")
                    .table(AdminTeamMembers::Table)
                    .col(AdminTeamMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminAuditLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminAuditLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AdminAuditLogs::UserId).text().not_null())
                    .col(ColumnDef::new(AdminAuditLogs::Action).text().not_null())
                    .col(ColumnDef::new(AdminAuditLogs::Resource).text().not_null())
                    .col(ColumnDef::new(AdminAuditLogs::ResourceId).text().null())
                    .col(ColumnDef::new(AdminAuditLogs::Details).json_binary().null())
                    .col(
                        ColumnDef::new(AdminAuditLogs::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_admin_audit_logs_timestamp")
                    .table(AdminAuditLogs::Table)
                    .col(AdminAuditLogs::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_admin_audit_logs_timestamp").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminAuditLogs::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_admin_team_members_user_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminTeamMembers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminTeamMembers {
    Table,
    Id,
    UserId,
    Role,
    Permissions,
    InvitedBy,
    JoinedAt,
    LastActive,
}

#[derive(DeriveIden)]
enum AdminAuditLogs {
    Table,
    Id,
    UserId,
    Action,
    Resource,
    ResourceId,
    Details,
    Timestamp,
}
