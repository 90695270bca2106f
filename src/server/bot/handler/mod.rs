mod component;
mod modal;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::all::{ActivityData, Context, EventHandler, Interaction, Message, Ready};
use serenity::async_trait;
use std::sync::Arc;

use crate::server::{
    bot::{
        commands,
        interaction::{ComponentAction, ModalAction},
    },
    cache::fixed_window::FixedWindowLimiter,
    data::ticket::TicketRepository,
    scheduler::auto_close::AutoCloseRegistry,
};

/// Discord bot event handler.
///
/// Holds the shared rate limiter and auto-close registry so tickets created
/// or touched through Discord and through the REST API see the same
/// in-process state.
pub struct Handler {
    pub db: DatabaseConnection,
    pub ticket_limiter: Arc<FixedWindowLimiter>,
    pub auto_close: Arc<AutoCloseRegistry>,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("{} is connected to Discord!", ready.user.name);

        ctx.set_activity(Some(ActivityData::watching("your tickets")));

        if let Err(e) = commands::register(&ctx).await {
            tracing::error!("Failed to register slash commands: {}", e);
        }
    }

    /// Bumps ticket activity when someone talks in a ticket channel.
    ///
    /// A message in an open ticket resets the inactivity clock and cancels
    /// any pending auto-close timer; the hourly sweep re-arms it if the
    /// channel goes quiet again.
    async fn message(&self, _ctx: Context, message: Message) {
        if message.author.bot {
            return;
        }

        let repo = TicketRepository::new(&self.db);
        let ticket = match repo.find_by_channel_id(message.channel_id.get()).await {
            Ok(Some(ticket)) => ticket,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("Failed to look up ticket by channel: {}", e);
                return;
            }
        };

        if let Err(e) = repo.touch_activity(message.channel_id.get(), Utc::now()).await {
            tracing::error!("Failed to bump ticket activity: {}", e);
            return;
        }

        self.auto_close.disarm(ticket.id);
    }

    /// Routes interactions to their handlers.
    ///
    /// Component and modal custom ids are decoded exactly once, here; ids
    /// this bot did not produce are dropped with a debug log.
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => {
                commands::dispatch(self, &ctx, &command).await;
            }
            Interaction::Component(component) => {
                match ComponentAction::parse(&component.data.custom_id) {
                    Some(action) => {
                        component::handle(self, &ctx, &component, action).await;
                    }
                    None => {
                        tracing::debug!(
                            "Ignoring unknown component id '{}'",
                            component.data.custom_id
                        );
                    }
                }
            }
            Interaction::Modal(modal) => match ModalAction::parse(&modal.data.custom_id) {
                Some(action) => {
                    modal::handle(self, &ctx, &modal, action).await;
                }
                None => {
                    tracing::debug!("Ignoring unknown modal id '{}'", modal.data.custom_id);
                }
            },
            _ => {}
        }
    }
}
