use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::permission::Capabilities;

/// Capability flags for one staff role, used for creates and updates.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaffRoleParams {
    pub can_view: bool,
    pub can_assign: bool,
    pub can_close: bool,
    pub can_delete: bool,
    pub can_reopen: bool,
    pub can_manage_panels: bool,
}

pub struct StaffRoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StaffRoleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_by_guild(
        &self,
        guild_id: u64,
    ) -> Result<Vec<entity::staff_role::Model>, DbErr> {
        entity::prelude::StaffRole::find()
            .filter(entity::staff_role::Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await
    }

    /// Creates or updates the capability record for a role.
    pub async fn upsert(
        &self,
        guild_id: u64,
        role_id: u64,
        params: StaffRoleParams,
    ) -> Result<entity::staff_role::Model, DbErr> {
        let existing = entity::prelude::StaffRole::find()
            .filter(entity::staff_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::staff_role::Column::RoleId.eq(role_id.to_string()))
            .one(self.db)
            .await?;

        match existing {
            Some(model) => {
                let mut active: entity::staff_role::ActiveModel = model.into();
                Self::apply(&mut active, params);
                active.update(self.db).await
            }
            None => {
                let mut active = entity::staff_role::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    role_id: ActiveValue::Set(role_id.to_string()),
                    ..Default::default()
                };
                Self::apply(&mut active, params);
                active.insert(self.db).await
            }
        }
    }

    pub async fn delete(&self, guild_id: u64, role_id: u64) -> Result<(), DbErr> {
        entity::prelude::StaffRole::delete_many()
            .filter(entity::staff_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::staff_role::Column::RoleId.eq(role_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Replaces all staff roles for a guild in one sweep (dashboard saves
    /// submit the full list).
    pub async fn replace_all(
        &self,
        guild_id: u64,
        roles: Vec<(u64, StaffRoleParams)>,
    ) -> Result<(), DbErr> {
        entity::prelude::StaffRole::delete_many()
            .filter(entity::staff_role::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        for (role_id, params) in roles {
            let mut active = entity::staff_role::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.to_string()),
                role_id: ActiveValue::Set(role_id.to_string()),
                ..Default::default()
            };
            Self::apply(&mut active, params);
            active.insert(self.db).await?;
        }

        Ok(())
    }

    /// Resolves the capability union for a member's roles in a guild.
    pub async fn capabilities_for(
        &self,
        guild_id: u64,
        member_roles: &[u64],
    ) -> Result<Capabilities, DbErr> {
        let staff_roles = self.list_by_guild(guild_id).await?;

        Ok(Capabilities::from_staff_roles(&staff_roles, member_roles))
    }

    fn apply(active: &mut entity::staff_role::ActiveModel, params: StaffRoleParams) {
        active.can_view = ActiveValue::Set(params.can_view);
        active.can_assign = ActiveValue::Set(params.can_assign);
        active.can_close = ActiveValue::Set(params.can_close);
        active.can_delete = ActiveValue::Set(params.can_delete);
        active.can_reopen = ActiveValue::Set(params.can_reopen);
        active.can_manage_panels = ActiveValue::Set(params.can_manage_panels);
    }
}
