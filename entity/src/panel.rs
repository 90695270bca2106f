use sea_orm::entity::prelude::*;

/// A persistent Discord message exposing ticket-creation buttons.
/// `message_id` is null until the message has been posted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "panel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub channel_id: String,
    pub message_id: Option<String>,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub color: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::panel_button::Entity")]
    PanelButton,
}

impl Related<super::panel_button::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PanelButton.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
