use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test embed templates.
pub struct EmbedTemplateFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    name: String,
    title: Option<String>,
    description: Option<String>,
    uses: i32,
}

impl<'a> EmbedTemplateFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        Self {
            db,
            guild_id,
            name: "welcome".to_string(),
            title: Some("Welcome".to_string()),
            description: Some("Hello!".to_string()),
            uses: 0,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn uses(mut self, uses: i32) -> Self {
        self.uses = uses;
        self
    }

    pub async fn build(self) -> Result<entity::embed_template::Model, DbErr> {
        let now = Utc::now();
        entity::embed_template::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            name: ActiveValue::Set(self.name),
            message_content: ActiveValue::Set(None),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            color: ActiveValue::Set(Some(0x5865F2)),
            author_name: ActiveValue::Set(None),
            author_icon_url: ActiveValue::Set(None),
            footer_text: ActiveValue::Set(None),
            footer_icon_url: ActiveValue::Set(None),
            image_url: ActiveValue::Set(None),
            thumbnail_url: ActiveValue::Set(None),
            uses: ActiveValue::Set(self.uses),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an embed template with default values.
pub async fn create_embed_template(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::embed_template::Model, DbErr> {
    EmbedTemplateFactory::new(db, guild_id).build().await
}
