//! Panel posting: turns stored panel rows into Discord messages with
//! ticket-creation buttons.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ButtonStyle, ChannelId, CreateActionRow, CreateButton, CreateEmbed, CreateMessage, MessageId,
    ReactionType,
};
use serenity::http::Http;
use std::sync::Arc;

use crate::server::{
    bot::interaction::ComponentAction,
    data::panel::PanelRepository,
    error::AppError,
    util::parse::parse_u64_from_string,
};

pub struct PanelService<'a> {
    db: &'a DatabaseConnection,
    http: Arc<Http>,
}

impl<'a> PanelService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    /// Posts (or re-posts) a panel message and records its message id.
    ///
    /// # Returns
    /// - `Ok(Model)`: The panel with `message_id` set
    /// - `Err(AppError::BadRequest)`: The panel has no buttons
    pub async fn post(&self, panel_id: i32) -> Result<entity::panel::Model, AppError> {
        let repo = PanelRepository::new(self.db);

        let panel = repo
            .find_by_id(panel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Panel not found".to_string()))?;
        let buttons = repo.buttons(panel.id).await?;

        if buttons.is_empty() {
            return Err(AppError::BadRequest(
                "Panel has no buttons to post".to_string(),
            ));
        }

        let mut embed = CreateEmbed::new()
            .title(panel.title.clone())
            .color(panel.color as u32);
        if let Some(description) = &panel.description {
            embed = embed.description(description.clone());
        }

        let row = CreateActionRow::Buttons(
            buttons
                .iter()
                .map(|button| {
                    let custom_id = ComponentAction::OpenTicket {
                        panel_id: panel.id,
                        ticket_type_id: button.ticket_type_id,
                    }
                    .encode();

                    let mut create = CreateButton::new(custom_id)
                        .label(button.label.clone())
                        .style(button_style(&button.style));
                    if let Some(emoji) = &button.emoji {
                        create = create.emoji(ReactionType::Unicode(emoji.clone()));
                    }
                    create
                })
                .collect(),
        );

        let channel_id = parse_u64_from_string(panel.channel_id.clone())?;
        let message = ChannelId::new(channel_id)
            .send_message(
                &self.http,
                CreateMessage::new().embed(embed).components(vec![row]),
            )
            .await?;

        Ok(repo.set_message_id(panel.id, message.id.get()).await?)
    }

    /// Deletes a panel row and, best effort, its posted message.
    pub async fn delete(&self, panel: entity::panel::Model) -> Result<(), AppError> {
        if let Some(message_id) = &panel.message_id {
            if let (Ok(channel_id), Ok(message_id)) =
                (panel.channel_id.parse::<u64>(), message_id.parse::<u64>())
            {
                if let Err(e) = ChannelId::new(channel_id)
                    .delete_message(&self.http, MessageId::new(message_id))
                    .await
                {
                    tracing::warn!("Failed to delete panel message {}: {}", message_id, e);
                }
            }
        }

        let repo = PanelRepository::new(self.db);
        repo.delete(panel.id).await?;

        Ok(())
    }
}

fn button_style(style: &str) -> ButtonStyle {
    match style {
        "secondary" => ButtonStyle::Secondary,
        "success" => ButtonStyle::Success,
        "danger" => ButtonStyle::Danger,
        _ => ButtonStyle::Primary,
    }
}
