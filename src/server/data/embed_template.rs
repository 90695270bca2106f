use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

pub struct EmbedFieldParams {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Snapshot of an embed's configurable surface, used for create and update.
pub struct EmbedTemplateParams {
    pub name: String,
    pub message_content: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<i32>,
    pub author_name: Option<String>,
    pub author_icon_url: Option<String>,
    pub footer_text: Option<String>,
    pub footer_icon_url: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub fields: Vec<EmbedFieldParams>,
}

pub struct EmbedTemplateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmbedTemplateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        guild_id: u64,
        params: EmbedTemplateParams,
        now: DateTime<Utc>,
    ) -> Result<entity::embed_template::Model, DbErr> {
        let template = entity::embed_template::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            name: ActiveValue::Set(params.name.clone()),
            uses: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        let mut template = template;
        Self::apply(&mut template, &params);
        let template = template.insert(self.db).await?;

        self.replace_fields(template.id, params.fields).await?;

        Ok(template)
    }

    /// Updates a template in place, replacing its field list.
    pub async fn update(
        &self,
        id: i32,
        params: EmbedTemplateParams,
        now: DateTime<Utc>,
    ) -> Result<entity::embed_template::Model, DbErr> {
        let template = self.find_by_id(id).await?.ok_or(DbErr::RecordNotFound(
            format!("Embed template {} not found", id),
        ))?;

        let mut active: entity::embed_template::ActiveModel = template.into();
        active.name = ActiveValue::Set(params.name.clone());
        Self::apply(&mut active, &params);
        active.updated_at = ActiveValue::Set(now);
        let template = active.update(self.db).await?;

        self.replace_fields(template.id, params.fields).await?;

        Ok(template)
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::embed_template::Model>, DbErr> {
        entity::prelude::EmbedTemplate::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn find_by_name(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<Option<entity::embed_template::Model>, DbErr> {
        entity::prelude::EmbedTemplate::find()
            .filter(entity::embed_template::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::embed_template::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    pub async fn list_by_guild(
        &self,
        guild_id: u64,
    ) -> Result<Vec<entity::embed_template::Model>, DbErr> {
        entity::prelude::EmbedTemplate::find()
            .filter(entity::embed_template::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::embed_template::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn fields(
        &self,
        template_id: i32,
    ) -> Result<Vec<entity::embed_template_field::Model>, DbErr> {
        entity::prelude::EmbedTemplateField::find()
            .filter(entity::embed_template_field::Column::TemplateId.eq(template_id))
            .order_by_asc(entity::embed_template_field::Column::Position)
            .all(self.db)
            .await
    }

    /// Bumps the usage counter after the template is posted.
    pub async fn increment_uses(&self, id: i32) -> Result<(), DbErr> {
        let template = self.find_by_id(id).await?.ok_or(DbErr::RecordNotFound(
            format!("Embed template {} not found", id),
        ))?;

        let uses = template.uses + 1;
        let mut active: entity::embed_template::ActiveModel = template.into();
        active.uses = ActiveValue::Set(uses);
        active.update(self.db).await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::EmbedTemplate::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    async fn replace_fields(
        &self,
        template_id: i32,
        fields: Vec<EmbedFieldParams>,
    ) -> Result<(), DbErr> {
        entity::prelude::EmbedTemplateField::delete_many()
            .filter(entity::embed_template_field::Column::TemplateId.eq(template_id))
            .exec(self.db)
            .await?;

        for (position, field) in fields.into_iter().enumerate() {
            entity::embed_template_field::ActiveModel {
                template_id: ActiveValue::Set(template_id),
                name: ActiveValue::Set(field.name),
                value: ActiveValue::Set(field.value),
                inline: ActiveValue::Set(field.inline),
                position: ActiveValue::Set(position as i32),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    fn apply(active: &mut entity::embed_template::ActiveModel, params: &EmbedTemplateParams) {
        active.message_content = ActiveValue::Set(params.message_content.clone());
        active.title = ActiveValue::Set(params.title.clone());
        active.description = ActiveValue::Set(params.description.clone());
        active.color = ActiveValue::Set(params.color);
        active.author_name = ActiveValue::Set(params.author_name.clone());
        active.author_icon_url = ActiveValue::Set(params.author_icon_url.clone());
        active.footer_text = ActiveValue::Set(params.footer_text.clone());
        active.footer_icon_url = ActiveValue::Set(params.footer_icon_url.clone());
        active.image_url = ActiveValue::Set(params.image_url.clone());
        active.thumbnail_url = ActiveValue::Set(params.thumbnail_url.clone());
    }
}
