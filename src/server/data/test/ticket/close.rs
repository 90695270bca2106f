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

/// Tests closing an open ticket.
///
/// Expected: status becomes closed and both close audit fields are set
#[tokio::test]
async fn closes_open_ticket_and_sets_audit_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let closed_at = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();
    let closed = repo.close(ticket.id, "555", closed_at).await?;

    assert_eq!(closed.status, TicketStatus::Closed.as_str());
    assert_eq!(closed.closed_by.as_deref(), Some("555"));
    assert_eq!(closed.closed_at, Some(closed_at));

    Ok(())
}

/// Tests that a closed ticket cannot be closed again.
///
/// Expected: Err(DbErr::Custom)
#[tokio::test]
async fn rejects_closing_a_closed_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let now = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();
    repo.close(ticket.id, "555", now).await?;
    let second_close = repo.close(ticket.id, "555", now).await;

    assert!(matches!(second_close, Err(DbErr::Custom(_))));

    Ok(())
}

/// Tests that closing never touches the reopen history.
///
/// Expected: one reopen row before and after the second close
#[tokio::test]
async fn close_leaves_reopen_history_untouched() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let t1 = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2026, 7, 1, 15, 0, 0).unwrap();
    let t3 = Utc.with_ymd_and_hms(2026, 7, 1, 16, 0, 0).unwrap();

    repo.close(ticket.id, "555", t1).await?;
    repo.reopen(ticket.id, 777, t2).await?;
    repo.close(ticket.id, "555", t3).await?;

    let reopens = repo.reopens(ticket.id).await?;
    assert_eq!(reopens.len(), 1);
    assert_eq!(reopens[0].user_id, "777");

    Ok(())
}

/// Tests that a deleted ticket cannot be closed.
///
/// Expected: Err(DbErr::Custom); deleted is terminal
#[tokio::test]
async fn rejects_closing_a_deleted_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ticket = factory::ticket::TicketFactory::new(db, 100)
        .status("deleted")
        .deleted(true)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let now = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();
    let result = repo.close(ticket.id, "555", now).await;

    assert!(matches!(result, Err(DbErr::Custom(_))));

    Ok(())
}
