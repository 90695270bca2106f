use chrono::{TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::ticket_config::{TicketConfigParams, TicketConfigRepository},
    model::config::{NamingPattern, TranscriptFormat},
};

/// Tests creating a configuration for an unconfigured guild.
///
/// Expected: row inserted with the provided policy values
#[tokio::test]
async fn creates_config_for_new_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketConfigRepository::new(db);
    let now = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();

    let config = repo
        .upsert(
            100,
            TicketConfigParams {
                open_category_id: Some(9001),
                naming_pattern: NamingPattern::Username,
                auto_close_enabled: true,
                auto_close_hours: 48,
                transcript_format: TranscriptFormat::Json,
                ..Default::default()
            },
            now,
        )
        .await?;

    assert_eq!(config.guild_id, "100");
    assert_eq!(config.open_category_id.as_deref(), Some("9001"));
    assert_eq!(config.naming_pattern, "username");
    assert!(config.auto_close_enabled);
    assert_eq!(config.auto_close_hours, 48);
    assert_eq!(config.transcript_format, "json");

    Ok(())
}

/// Tests the singleton invariant: one config row per guild.
///
/// Expected: a second upsert updates the same row instead of inserting
#[tokio::test]
async fn upsert_is_a_singleton_per_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketConfigRepository::new(db);
    let now = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();

    let first = repo.upsert(100, TicketConfigParams::default(), now).await?;
    let second = repo
        .upsert(
            100,
            TicketConfigParams {
                rate_limit_max: 10,
                ..Default::default()
            },
            now,
        )
        .await?;

    assert_eq!(first.id, second.id);
    assert_eq!(second.rate_limit_max, 10);

    let found = repo.find_by_guild_id(100).await?.unwrap();
    assert_eq!(found.rate_limit_max, 10);

    Ok(())
}

/// Tests the sweep query for auto-close-enabled guilds.
///
/// Expected: only configs with the flag set are returned
#[tokio::test]
async fn all_with_auto_close_filters_disabled_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket_config::TicketConfigFactory::new(db, 100)
        .auto_close(true, 72)
        .build()
        .await?;
    factory::ticket_config::TicketConfigFactory::new(db, 200)
        .auto_close(false, 72)
        .build()
        .await?;

    let repo = TicketConfigRepository::new(db);
    let enabled = repo.all_with_auto_close().await?;

    assert_eq!(enabled.len(), 1);
    assert_eq!(enabled[0].guild_id, "100");

    Ok(())
}
