//! Auto-close: per-ticket timers plus an hourly recovery sweep.
//!
//! Two mechanisms converge on `TicketService::auto_close`:
//!
//! - A timer armed at ticket creation (when the guild has auto-close
//!   enabled at that moment). Timers are plain in-process tasks and are
//!   lost on restart.
//! - An hourly sweep over every guild with auto-close enabled, which arms a
//!   timer for any open ticket past its inactivity threshold that has none
//!   registered. The sweep is the only recovery after a restart, so a lost
//!   timer is late by at most one sweep interval.
//!
//! Activity in a ticket channel disarms its timer; the close routine
//! re-checks the threshold at fire time regardless.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::{ticket::TicketRepository, ticket_config::TicketConfigRepository},
    error::AppError,
    service::ticket::TicketService,
};

/// Registry of armed per-ticket close timers, keyed by ticket primary key.
///
/// Shared between the bot handler (arm on create, disarm on activity), the
/// REST controllers (disarm on manual close), and the sweep.
pub struct AutoCloseRegistry {
    timers: Mutex<HashMap<i32, JoinHandle<()>>>,
}

impl AutoCloseRegistry {
    pub fn new() -> Self {
        Self {
            timers: Mutex::new(HashMap::new()),
        }
    }

    /// Arms a close timer for a ticket unless one is already registered.
    ///
    /// When the timer fires it runs the auto-close routine, which re-checks
    /// eligibility, and then removes itself from the registry.
    pub fn arm(
        self: &Arc<Self>,
        ticket_pk: i32,
        delay: std::time::Duration,
        db: DatabaseConnection,
        http: Arc<Http>,
    ) {
        let mut timers = self
            .timers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if timers.contains_key(&ticket_pk) {
            return;
        }

        let registry = Arc::clone(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let service = TicketService::new(&db, http);
            match service.auto_close(ticket_pk, Utc::now()).await {
                Ok(true) => {
                    tracing::info!("Auto-closed inactive ticket {}", ticket_pk);
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::error!("Auto-close failed for ticket {}: {}", ticket_pk, e);
                }
            }

            registry.remove(ticket_pk);
        });

        timers.insert(ticket_pk, handle);
    }

    /// Cancels a pending timer, if any. Called when a ticket sees activity
    /// or is closed manually.
    pub fn disarm(&self, ticket_pk: i32) {
        let handle = self
            .timers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&ticket_pk);

        if let Some(handle) = handle {
            handle.abort();
        }
    }

    pub fn is_armed(&self, ticket_pk: i32) -> bool {
        self.timers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(&ticket_pk)
    }

    /// Removes a finished timer without aborting it (called by the timer
    /// task itself).
    fn remove(&self, ticket_pk: i32) {
        self.timers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&ticket_pk);
    }
}

impl Default for AutoCloseRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Starts the hourly auto-close sweep.
///
/// # Arguments
/// - `db`: Database connection
/// - `discord_http`: Discord HTTP client for the close side effects
/// - `registry`: Shared timer registry
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
    registry: Arc<AutoCloseRegistry>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();
    let job_http = discord_http.clone();
    let job_registry = registry.clone();

    // Top of every hour.
    let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let db = job_db.clone();
        let http = job_http.clone();
        let registry = job_registry.clone();

        Box::pin(async move {
            if let Err(e) = sweep(&db, http, registry).await {
                tracing::error!("Auto-close sweep failed: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Auto-close scheduler started");

    Ok(())
}

/// One sweep pass: arms timers for stale tickets that have none.
///
/// Tickets already past their threshold get a zero-delay timer; the
/// eligibility re-check in the close routine keeps this idempotent.
async fn sweep(
    db: &DatabaseConnection,
    discord_http: Arc<Http>,
    registry: Arc<AutoCloseRegistry>,
) -> Result<(), AppError> {
    let configs = TicketConfigRepository::new(db).all_with_auto_close().await?;
    let ticket_repo = TicketRepository::new(db);

    for config in configs {
        let Ok(guild_id) = config.guild_id.parse::<u64>() else {
            tracing::warn!("Skipping config with bad guild id: {}", config.guild_id);
            continue;
        };

        let cutoff = Utc::now() - Duration::hours(config.auto_close_hours as i64);
        let stale = ticket_repo
            .open_tickets_inactive_since(guild_id, cutoff)
            .await?;

        for ticket in stale {
            if !registry.is_armed(ticket.id) {
                tracing::debug!(
                    "Sweep arming auto-close for ticket {} in guild {}",
                    ticket.id,
                    guild_id
                );
                registry.arm(
                    ticket.id,
                    std::time::Duration::ZERO,
                    db.clone(),
                    discord_http.clone(),
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Database;

    async fn test_deps() -> (DatabaseConnection, Arc<Http>) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        (db, Arc::new(Http::new("")))
    }

    #[tokio::test]
    async fn arm_registers_and_timer_removes_itself() {
        let (db, http) = test_deps().await;
        let registry = Arc::new(AutoCloseRegistry::new());

        registry.arm(1, std::time::Duration::from_millis(10), db, http);
        assert!(registry.is_armed(1));

        // The timer fires, fails against the empty database, and must still
        // deregister itself.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert!(!registry.is_armed(1));
    }

    #[tokio::test]
    async fn arm_is_idempotent_while_registered() {
        let (db, http) = test_deps().await;
        let registry = Arc::new(AutoCloseRegistry::new());

        registry.arm(1, std::time::Duration::from_secs(60), db.clone(), http.clone());
        registry.arm(1, std::time::Duration::from_secs(60), db, http);

        assert!(registry.is_armed(1));
        registry.disarm(1);
        assert!(!registry.is_armed(1));
    }

    #[tokio::test]
    async fn disarm_cancels_pending_timer() {
        let (db, http) = test_deps().await;
        let registry = Arc::new(AutoCloseRegistry::new());

        registry.arm(7, std::time::Duration::from_secs(60), db, http);
        registry.disarm(7);

        assert!(!registry.is_armed(7));
    }
}
