use chrono::{TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

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

/// Tests soft-deleting an open ticket.
///
/// Expected: status deleted and the deleted flag set, row still present
#[tokio::test]
async fn soft_deletes_an_open_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let now = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();
    let deleted = repo.soft_delete(ticket.id, now).await?;

    assert_eq!(deleted.status, TicketStatus::Deleted.as_str());
    assert!(deleted.deleted);
    assert!(repo.find_by_id(ticket.id).await?.is_some());

    Ok(())
}

/// Tests soft-deleting a closed ticket.
///
/// Expected: both open and closed tickets can be deleted
#[tokio::test]
async fn soft_deletes_a_closed_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let now = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();
    repo.close(ticket.id, "555", now).await?;
    let deleted = repo.soft_delete(ticket.id, now).await?;

    assert_eq!(deleted.status, TicketStatus::Deleted.as_str());
    assert!(deleted.deleted);

    Ok(())
}

/// Tests that deletion is terminal.
///
/// Expected: no exposed operation transitions a deleted ticket anywhere
#[tokio::test]
async fn delete_is_terminal() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let now = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();
    repo.soft_delete(ticket.id, now).await?;

    assert!(repo.close(ticket.id, "555", now).await.is_err());
    assert!(repo.reopen(ticket.id, 777, now).await.is_err());
    assert!(repo.soft_delete(ticket.id, now).await.is_err());

    let unchanged = repo.find_by_id(ticket.id).await?.unwrap();
    assert_eq!(unchanged.status, TicketStatus::Deleted.as_str());

    Ok(())
}
