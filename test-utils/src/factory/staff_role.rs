use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test staff-role capability records.
pub struct StaffRoleFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    role_id: u64,
    can_view: bool,
    can_assign: bool,
    can_close: bool,
    can_delete: bool,
    can_reopen: bool,
    can_manage_panels: bool,
}

impl<'a> StaffRoleFactory<'a> {
    /// Defaults: a fresh role id with only `can_view` granted.
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        Self {
            db,
            guild_id,
            role_id: next_id(),
            can_view: true,
            can_assign: false,
            can_close: false,
            can_delete: false,
            can_reopen: false,
            can_manage_panels: false,
        }
    }

    pub fn role_id(mut self, role_id: u64) -> Self {
        self.role_id = role_id;
        self
    }

    pub fn can_assign(mut self, value: bool) -> Self {
        self.can_assign = value;
        self
    }

    pub fn can_close(mut self, value: bool) -> Self {
        self.can_close = value;
        self
    }

    pub fn can_delete(mut self, value: bool) -> Self {
        self.can_delete = value;
        self
    }

    pub fn can_reopen(mut self, value: bool) -> Self {
        self.can_reopen = value;
        self
    }

    pub fn can_manage_panels(mut self, value: bool) -> Self {
        self.can_manage_panels = value;
        self
    }

    pub async fn build(self) -> Result<entity::staff_role::Model, DbErr> {
        entity::staff_role::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            role_id: ActiveValue::Set(self.role_id.to_string()),
            can_view: ActiveValue::Set(self.can_view),
            can_assign: ActiveValue::Set(self.can_assign),
            can_close: ActiveValue::Set(self.can_close),
            can_delete: ActiveValue::Set(self.can_delete),
            can_reopen: ActiveValue::Set(self.can_reopen),
            can_manage_panels: ActiveValue::Set(self.can_manage_panels),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a view-only staff role with a fresh role id.
pub async fn create_staff_role(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::staff_role::Model, DbErr> {
    StaffRoleFactory::new(db, guild_id).build().await
}
