use sea_orm::entity::prelude::*;

/// Registered ticket type. Panel buttons reference these rows; the modal
/// question schema lives in `modal_field`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub name: String,
    pub modal_title: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::modal_field::Entity")]
    ModalField,
    #[sea_orm(has_many = "super::panel_button::Entity")]
    PanelButton,
}

impl Related<super::modal_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModalField.def()
    }
}

impl Related<super::panel_button::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PanelButton.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
