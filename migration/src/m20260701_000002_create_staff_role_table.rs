use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaffRole::Table)
                    .if_not_exists()
                    .col(pk_auto(StaffRole::Id))
                    .col(string(StaffRole::GuildId))
                    .col(string(StaffRole::RoleId))
                    .col(boolean(StaffRole::CanView))
                    .col(boolean(StaffRole::CanAssign))
                    .col(boolean(StaffRole::CanClose))
                    .col(boolean(StaffRole::CanDelete))
                    .col(boolean(StaffRole::CanReopen))
                    .col(boolean(StaffRole::CanManagePanels))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_staff_role_guild_role")
                    .table(StaffRole::Table)
                    .col(StaffRole::GuildId)
                    .col(StaffRole::RoleId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StaffRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StaffRole {
    Table,
    Id,
    GuildId,
    RoleId,
    CanView,
    CanAssign,
    CanClose,
    CanDelete,
    CanReopen,
    CanManagePanels,
}
