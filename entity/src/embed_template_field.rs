use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "embed_template_field")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub template_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub value: String,
    pub inline: bool,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::embed_template::Entity",
        from = "Column::TemplateId",
        to = "super::embed_template::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    EmbedTemplate,
}

impl Related<super::embed_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmbedTemplate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
