use sea_orm::entity::prelude::*;

/// Named, guild-scoped snapshot of an embed's fields plus optional outer
/// message text.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "embed_template")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub message_content: Option<String>,
    pub title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub color: Option<i32>,
    pub author_name: Option<String>,
    pub author_icon_url: Option<String>,
    pub footer_text: Option<String>,
    pub footer_icon_url: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub uses: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::embed_template_field::Entity")]
    EmbedTemplateField,
}

impl Related<super::embed_template_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmbedTemplateField.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
