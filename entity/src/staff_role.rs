use sea_orm::entity::prelude::*;

/// A guild role granted a subset of ticket-management capabilities.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "staff_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub role_id: String,
    pub can_view: bool,
    pub can_assign: bool,
    pub can_close: bool,
    pub can_delete: bool,
    pub can_reopen: bool,
    pub can_manage_panels: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
