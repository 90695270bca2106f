mod model;
mod server;

use std::sync::Arc;

use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use crate::server::{
    bot, cache::fixed_window::FixedWindowLimiter, config::Config, error::config::ConfigError,
    error::AppError, scheduler::auto_close, scheduler::auto_close::AutoCloseRegistry, startup,
    state::AppState,
};

/// Upper bound on concurrently tracked rate-limit windows.
const RATE_LIMIT_WINDOW_CAPACITY: usize = 10_000;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;

    // In-process state shared by the bot, the REST layer, and the sweep.
    let ticket_limiter = Arc::new(FixedWindowLimiter::new(RATE_LIMIT_WINDOW_CAPACITY));
    let auto_close_registry = Arc::new(AutoCloseRegistry::new());

    tracing::info!("Starting server");

    // Initialize the Discord bot and extract its HTTP client.
    let (bot_client, discord_http) = bot::start::init_bot(
        &config,
        db.clone(),
        ticket_limiter.clone(),
        auto_close_registry.clone(),
    )
    .await?;

    // Run the Discord bot in a separate task.
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    // Start the hourly auto-close sweep.
    let scheduler_db = db.clone();
    let scheduler_http = discord_http.clone();
    let scheduler_registry = auto_close_registry.clone();
    tokio::spawn(async move {
        if let Err(e) =
            auto_close::start_scheduler(scheduler_db, scheduler_http, scheduler_registry).await
        {
            tracing::error!("Auto-close scheduler error: {}", e);
        }
    });

    let state = AppState::new(
        db,
        http_client,
        discord_http,
        config.jwt_secret.clone(),
        ticket_limiter,
        auto_close_registry,
    );

    // One sliding-window limiter, applied uniformly to every /api route,
    // keyed by peer address.
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(30)
            .finish()
            .ok_or_else(|| ConfigError::InvalidValue("governor rate limiter".to_string()))?,
    );

    let mut app = server::router::router()
        .with_state(state)
        .layer(GovernorLayer::new(governor_conf));

    if let Some(origin) = &config.cors_origin {
        let origin: axum::http::HeaderValue = origin
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("CORS_ORIGIN '{}'", origin)))?;
        app = app.layer(
            CorsLayer::new()
                .allow_origin([origin])
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("API listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
