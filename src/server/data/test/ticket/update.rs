use chrono::{TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::ticket::TicketRepository,
    model::ticket::{CreateTicketParams, TicketPriority},
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

/// Tests setting and clearing the assignee.
///
/// Expected: assignee stored as a string id, then cleared back to None
#[tokio::test]
async fn assign_sets_and_clears_assignee() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let now = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();

    let assigned = repo.assign(ticket.id, Some(555), now).await?;
    assert_eq!(assigned.assignee_id.as_deref(), Some("555"));

    let cleared = repo.assign(ticket.id, None, now).await?;
    assert_eq!(cleared.assignee_id, None);

    Ok(())
}

/// Tests changing the priority.
///
/// Expected: priority column reflects the new value
#[tokio::test]
async fn set_priority_updates_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    let now = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();
    let updated = repo.set_priority(ticket.id, TicketPriority::Urgent, now).await?;

    assert_eq!(updated.priority, "urgent");

    Ok(())
}

/// Tests tag add/remove behavior.
///
/// Expected: duplicate adds are no-ops; removal deletes the tag
#[tokio::test]
async fn add_tag_is_idempotent_and_remove_deletes() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(create_params(1001)).await?;

    repo.add_tag(ticket.id, "billing").await?;
    repo.add_tag(ticket.id, "billing").await?;
    repo.add_tag(ticket.id, "refund").await?;

    let mut tags = repo.tags(ticket.id).await?;
    tags.sort();
    assert_eq!(tags, vec!["billing".to_string(), "refund".to_string()]);

    repo.remove_tag(ticket.id, "billing").await?;
    assert_eq!(repo.tags(ticket.id).await?, vec!["refund".to_string()]);

    Ok(())
}

/// Tests that deleted tickets reject mutation.
///
/// Expected: Err(DbErr::Custom) for assign on a deleted ticket
#[tokio::test]
async fn rejects_updates_on_deleted_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ticket = factory::ticket::TicketFactory::new(db, 100)
        .status("deleted")
        .deleted(true)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let now = Utc.with_ymd_and_hms(2026, 7, 1, 14, 0, 0).unwrap();
    let result = repo.assign(ticket.id, Some(555), now).await;

    assert!(matches!(result, Err(DbErr::Custom(_))));

    Ok(())
}
