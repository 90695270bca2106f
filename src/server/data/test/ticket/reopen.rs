use chrono::{TimeZone, Utc};
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

/// Tests reopening a closed ticket.
///
/// Expected: status open again; a reopen row exists with a timestamp later
/// than closed_at
#[tokio::test]
async fn reopens_closed_ticket_with_later_timestamp() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let closed_at = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();
    let reopened_at = Utc.with_ymd_and_hms(2026, 7, 2, 9, 0, 0).unwrap();

    repo.close(ticket.id, "555", closed_at).await?;
    let reopened = repo.reopen(ticket.id, 777, reopened_at).await?;

    assert_eq!(reopened.status, TicketStatus::Open.as_str());

    let reopens = repo.reopens(ticket.id).await?;
    assert_eq!(reopens.len(), 1);
    assert_eq!(reopens[0].reopened_at, reopened_at);
    assert!(reopens[0].reopened_at > closed_at);

    Ok(())
}

/// Tests that reopening clears neither close audit field.
///
/// Expected: closed_by and closed_at keep their values
#[tokio::test]
async fn reopen_preserves_close_audit() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let closed_at = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();
    let reopened_at = Utc.with_ymd_and_hms(2026, 7, 2, 9, 0, 0).unwrap();

    repo.close(ticket.id, "555", closed_at).await?;
    let reopened = repo.reopen(ticket.id, 777, reopened_at).await?;

    assert_eq!(reopened.closed_by.as_deref(), Some("555"));
    assert_eq!(reopened.closed_at, Some(closed_at));

    Ok(())
}

/// Tests that an open ticket cannot be reopened.
///
/// Expected: Err(DbErr::Custom)
#[tokio::test]
async fn rejects_reopening_an_open_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let now = Utc.with_ymd_and_hms(2026, 7, 2, 9, 0, 0).unwrap();
    let result = repo.reopen(ticket.id, 777, now).await;

    assert!(matches!(result, Err(DbErr::Custom(_))));

    Ok(())
}

/// Tests that a deleted ticket cannot be reopened.
///
/// Expected: Err(DbErr::Custom); no edge leads out of deleted
#[tokio::test]
async fn rejects_reopening_a_deleted_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ticket = factory::ticket::TicketFactory::new(db, 100)
        .status("deleted")
        .deleted(true)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let now = Utc.with_ymd_and_hms(2026, 7, 2, 9, 0, 0).unwrap();
    let result = repo.reopen(ticket.id, 777, now).await;

    assert!(matches!(result, Err(DbErr::Custom(_))));

    Ok(())
}
