use chrono::{TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

use crate::server::{
    data::ticket::TicketRepository,
    model::ticket::{CreateTicketParams, TicketPriority, TicketStatus},
};

fn params(guild_id: u64, user_id: u64, channel_id: u64) -> CreateTicketParams {
    CreateTicketParams {
        guild_id,
        user_id,
        channel_id,
        ticket_type: "support".to_string(),
        reason: Some("help please".to_string()),
        now: Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap(),
    }
}

/// Tests that ticket numbers are allocated sequentially within a guild.
///
/// Expected: ticket_id 1, 2, 3 in creation order
#[tokio::test]
async fn allocates_sequential_ticket_ids_per_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);

    let first = repo.create(params(100, 1, 1001)).await?;
    let second = repo.create(params(100, 2, 1002)).await?;
    let third = repo.create(params(100, 3, 1003)).await?;

    assert_eq!(first.ticket_id, 1);
    assert_eq!(second.ticket_id, 2);
    assert_eq!(third.ticket_id, 3);

    Ok(())
}

/// Tests that ticket number sequences are independent between guilds.
///
/// Expected: each guild's first ticket is number 1
#[tokio::test]
async fn guild_sequences_are_independent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);

    let in_first_guild = repo.create(params(100, 1, 1001)).await?;
    let _second = repo.create(params(100, 1, 1002)).await?;
    let in_other_guild = repo.create(params(200, 1, 2001)).await?;

    assert_eq!(in_first_guild.ticket_id, 1);
    assert_eq!(in_other_guild.ticket_id, 1);

    Ok(())
}

/// Tests that two tickets cannot share a channel.
///
/// Expected: second insert with the same channel_id fails on the unique
/// constraint
#[tokio::test]
async fn rejects_duplicate_channel_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);

    repo.create(params(100, 1, 1001)).await?;
    let duplicate = repo.create(params(100, 2, 1001)).await;

    assert!(duplicate.is_err());

    Ok(())
}

/// Tests the initial state of a freshly created ticket.
///
/// Expected: open status, normal priority, no assignee, no close audit
#[tokio::test]
async fn new_tickets_start_open_with_normal_priority() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(params(100, 1, 1001)).await?;

    assert_eq!(ticket.status, TicketStatus::Open.as_str());
    assert_eq!(ticket.priority, TicketPriority::Normal.as_str());
    assert_eq!(ticket.assignee_id, None);
    assert_eq!(ticket.closed_by, None);
    assert_eq!(ticket.closed_at, None);
    assert!(!ticket.deleted);

    Ok(())
}
