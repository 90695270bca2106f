//! Application state shared across all request handlers.
//!
//! `AppState` holds the shared resources the REST layer needs. It is built
//! once during startup and cloned for each request through Axum's state
//! extraction; every field is cheap to clone (pools, `Arc`s, small strings).

use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;

use super::{cache::fixed_window::FixedWindowLimiter, scheduler::auto_close::AutoCloseRegistry};

/// Application state containing shared resources and dependencies.
///
/// The ticket-creation rate limiter and the auto-close registry are the same
/// instances the Discord bot uses, so tickets opened through either surface
/// share one rate-limit window and one timer registry.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for external API requests (Discord OAuth token
    /// validation). Configured with redirects disabled to prevent SSRF.
    pub http_client: reqwest::Client,

    /// Discord HTTP client for bot API operations (channel edits, embeds,
    /// member and role lookups for permission tiers).
    pub discord_http: Arc<Http>,

    /// Secret used to sign and verify dashboard JWTs.
    pub jwt_secret: String,

    /// Bounded fixed-window rate limiter for ticket creation, keyed by user.
    pub ticket_limiter: Arc<FixedWindowLimiter>,

    /// Registry of armed per-ticket auto-close timers.
    pub auto_close: Arc<AutoCloseRegistry>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        discord_http: Arc<Http>,
        jwt_secret: String,
        ticket_limiter: Arc<FixedWindowLimiter>,
        auto_close: Arc<AutoCloseRegistry>,
    ) -> Self {
        Self {
            db,
            http_client,
            discord_http,
            jwt_secret,
            ticket_limiter,
            auto_close,
        }
    }
}
