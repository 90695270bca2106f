//! Embed template management and posting.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, CreateMessage,
};
use serenity::http::Http;
use std::sync::Arc;

use crate::server::{
    data::embed_template::{EmbedTemplateParams, EmbedTemplateRepository},
    error::AppError,
    util::url::is_valid_url,
};

/// Discord caps embeds at 25 fields.
const MAX_EMBED_FIELDS: usize = 25;

pub struct EmbedTemplateService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmbedTemplateService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and creates a template.
    ///
    /// # Returns
    /// - `Ok(Model)`: The stored template
    /// - `Err(AppError::BadRequest)`: Validation failure (bad URL, empty
    ///   name, too many fields, nothing to render)
    pub async fn create(
        &self,
        guild_id: u64,
        params: EmbedTemplateParams,
        now: DateTime<Utc>,
    ) -> Result<entity::embed_template::Model, AppError> {
        validate(&params)?;

        let repo = EmbedTemplateRepository::new(self.db);
        Ok(repo.create(guild_id, params, now).await?)
    }

    /// Validates and updates a template, verifying guild ownership.
    pub async fn update(
        &self,
        guild_id: u64,
        id: i32,
        params: EmbedTemplateParams,
        now: DateTime<Utc>,
    ) -> Result<entity::embed_template::Model, AppError> {
        validate(&params)?;

        let repo = EmbedTemplateRepository::new(self.db);
        self.require_owned(&repo, guild_id, id).await?;

        Ok(repo.update(id, params, now).await?)
    }

    pub async fn delete(&self, guild_id: u64, id: i32) -> Result<(), AppError> {
        let repo = EmbedTemplateRepository::new(self.db);
        self.require_owned(&repo, guild_id, id).await?;

        Ok(repo.delete(id).await?)
    }

    /// Posts a template to a channel and bumps its usage counter.
    ///
    /// The counter bump happens after the Discord send succeeds, so a failed
    /// post is not counted as a use.
    pub async fn post(
        &self,
        http: Arc<Http>,
        template: &entity::embed_template::Model,
        channel_id: u64,
    ) -> Result<(), AppError> {
        let repo = EmbedTemplateRepository::new(self.db);
        let fields = repo.fields(template.id).await?;

        let mut message = CreateMessage::new().embed(build_embed(template, &fields));
        if let Some(content) = &template.message_content {
            message = message.content(content.clone());
        }

        ChannelId::new(channel_id)
            .send_message(&http, message)
            .await?;

        repo.increment_uses(template.id).await?;

        Ok(())
    }

    async fn require_owned(
        &self,
        repo: &EmbedTemplateRepository<'_>,
        guild_id: u64,
        id: i32,
    ) -> Result<entity::embed_template::Model, AppError> {
        let template = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Embed template not found".to_string()))?;

        if template.guild_id != guild_id.to_string() {
            return Err(AppError::NotFound("Embed template not found".to_string()));
        }

        Ok(template)
    }
}

/// Builds the Discord embed from a stored template.
pub fn build_embed(
    template: &entity::embed_template::Model,
    fields: &[entity::embed_template_field::Model],
) -> CreateEmbed {
    let mut embed = CreateEmbed::new();

    if let Some(title) = &template.title {
        embed = embed.title(title.clone());
    }
    if let Some(description) = &template.description {
        embed = embed.description(description.clone());
    }
    if let Some(color) = template.color {
        embed = embed.color(color as u32);
    }
    if let Some(author_name) = &template.author_name {
        let mut author = CreateEmbedAuthor::new(author_name.clone());
        if let Some(icon) = &template.author_icon_url {
            author = author.icon_url(icon.clone());
        }
        embed = embed.author(author);
    }
    if let Some(footer_text) = &template.footer_text {
        let mut footer = CreateEmbedFooter::new(footer_text.clone());
        if let Some(icon) = &template.footer_icon_url {
            footer = footer.icon_url(icon.clone());
        }
        embed = embed.footer(footer);
    }
    if let Some(image) = &template.image_url {
        embed = embed.image(image.clone());
    }
    if let Some(thumbnail) = &template.thumbnail_url {
        embed = embed.thumbnail(thumbnail.clone());
    }

    for field in fields {
        embed = embed.field(field.name.clone(), field.value.clone(), field.inline);
    }

    embed
}

fn validate(params: &EmbedTemplateParams) -> Result<(), AppError> {
    if params.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Template name cannot be empty".to_string(),
        ));
    }

    if params.title.is_none() && params.description.is_none() && params.fields.is_empty() {
        return Err(AppError::BadRequest(
            "Template must have a title, description, or at least one field".to_string(),
        ));
    }

    if params.fields.len() > MAX_EMBED_FIELDS {
        return Err(AppError::BadRequest(format!(
            "Templates support at most {} fields",
            MAX_EMBED_FIELDS
        )));
    }

    for url in [
        &params.author_icon_url,
        &params.footer_icon_url,
        &params.image_url,
        &params.thumbnail_url,
    ]
    .into_iter()
    .flatten()
    {
        if !is_valid_url(url) {
            return Err(AppError::BadRequest(format!("Invalid URL: {}", url)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::data::embed_template::EmbedFieldParams;

    fn params() -> EmbedTemplateParams {
        EmbedTemplateParams {
            name: "rules".to_string(),
            message_content: None,
            title: Some("Rules".to_string()),
            description: None,
            color: None,
            author_name: None,
            author_icon_url: None,
            footer_text: None,
            footer_icon_url: None,
            image_url: None,
            thumbnail_url: None,
            fields: vec![],
        }
    }

    #[test]
    fn accepts_minimal_template() {
        assert!(validate(&params()).is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let mut p = params();
        p.name = "  ".to_string();
        assert!(validate(&p).is_err());
    }

    #[test]
    fn rejects_template_with_nothing_to_render() {
        let mut p = params();
        p.title = None;
        assert!(validate(&p).is_err());
    }

    #[test]
    fn rejects_invalid_image_url() {
        let mut p = params();
        p.image_url = Some("example.com/image.png".to_string());
        assert!(validate(&p).is_err());

        p.image_url = Some("https://example.com/image.png".to_string());
        assert!(validate(&p).is_ok());
    }

    #[test]
    fn rejects_too_many_fields() {
        let mut p = params();
        p.fields = (0..26)
            .map(|i| EmbedFieldParams {
                name: format!("field {}", i),
                value: "value".to_string(),
                inline: false,
            })
            .collect();
        assert!(validate(&p).is_err());
    }
}
