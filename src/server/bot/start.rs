use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};
use serenity::http::Http;
use std::sync::Arc;

use crate::server::{
    bot::handler::Handler, cache::fixed_window::FixedWindowLimiter, config::Config,
    error::AppError, scheduler::auto_close::AutoCloseRegistry,
};

/// Builds the Discord client and exposes its HTTP handle.
///
/// The HTTP handle is shared with the REST layer and the auto-close
/// scheduler so all three surfaces talk to Discord through one client.
///
/// # Arguments
/// - `config` - Application configuration (bot token)
/// - `db` - Database connection for the event handler
/// - `ticket_limiter` - Shared ticket-creation rate limiter
/// - `auto_close` - Shared auto-close timer registry
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready to start, plus its HTTP handle
/// - `Err(AppError)` - Client construction failed
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    ticket_limiter: Arc<FixedWindowLimiter>,
    auto_close: Arc<AutoCloseRegistry>,
) -> Result<(Client, Arc<Http>), AppError> {
    // GUILD_MESSAGES drives the last-activity bump for auto-close.
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;

    let handler = Handler {
        db,
        ticket_limiter,
        auto_close,
    };

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Starts the Discord bot; blocks until shutdown.
///
/// Call from a spawned task, since `Client::start` only returns when the
/// gateway connection ends.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
