use chrono::{Duration, TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::ticket::TicketRepository,
    model::ticket::{CreateTicketParams, TicketStatus},
};

fn create_params(channel_id: u64) -> CreateTicketParams {
    CreateTicketParams {
        guild_id: 100,
        user_id: 1,
        channel_id,
        ticket_type: "support".to_string(),
        reason: None,
        now: Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap(),
    }
}

/// Tests activity bumping for open tickets.
///
/// Expected: last_activity_at moves forward to the touch time
#[tokio::test]
async fn touch_activity_bumps_open_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let later = Utc.with_ymd_and_hms(2026, 7, 1, 18, 0, 0).unwrap();
    repo.touch_activity(1001, later).await?;

    let updated = repo.find_by_id(ticket.id).await?.unwrap();
    assert_eq!(updated.last_activity_at, later);

    Ok(())
}

/// Tests that messages in a closed ticket channel are not activity.
///
/// Expected: last_activity_at unchanged after touching a closed ticket
#[tokio::test]
async fn touch_activity_ignores_closed_tickets() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let closed_at = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();
    repo.close(ticket.id, "555", closed_at).await?;

    let later = Utc.with_ymd_and_hms(2026, 7, 1, 18, 0, 0).unwrap();
    repo.touch_activity(1001, later).await?;

    let unchanged = repo.find_by_id(ticket.id).await?.unwrap();
    assert_ne!(unchanged.last_activity_at, later);

    Ok(())
}

/// Tests the inactivity query used by the auto-close sweep.
///
/// Expected: only open tickets with last activity before the cutoff
#[tokio::test]
async fn open_tickets_inactive_since_filters_by_cutoff_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();

    let stale = factory::ticket::TicketFactory::new(db, 100)
        .last_activity_at(now - Duration::hours(100))
        .build()
        .await?;
    let _fresh = factory::ticket::TicketFactory::new(db, 100)
        .last_activity_at(now)
        .build()
        .await?;
    let _stale_but_closed = factory::ticket::TicketFactory::new(db, 100)
        .status("closed")
        .last_activity_at(now - Duration::hours(100))
        .build()
        .await?;
    let _stale_other_guild = factory::ticket::TicketFactory::new(db, 200)
        .last_activity_at(now - Duration::hours(100))
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let cutoff = now - Duration::hours(72);
    let inactive = repo.open_tickets_inactive_since(100, cutoff).await?;

    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].id, stale.id);

    Ok(())
}

/// Tests pagination and the status filter.
///
/// Expected: deleted tickets are hidden unless explicitly requested
#[tokio::test]
async fn paginated_listing_hides_deleted_by_default() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db, 100).build().await?;
    factory::ticket::TicketFactory::new(db, 100)
        .status("closed")
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, 100)
        .status("deleted")
        .deleted(true)
        .build()
        .await?;

    let repo = TicketRepository::new(db);

    let (all_live, total) = repo.get_paginated_by_guild(100, None, 0, 10).await?;
    assert_eq!(all_live.len(), 2);
    assert_eq!(total, 2);

    let (deleted, _) = repo
        .get_paginated_by_guild(100, Some(TicketStatus::Deleted), 0, 10)
        .await?;
    assert_eq!(deleted.len(), 1);

    Ok(())
}
