use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

use crate::server::data::ticket_type::{ModalFieldParams, TicketTypeRepository};

fn field(label: &str, required: bool) -> ModalFieldParams {
    ModalFieldParams {
        label: label.to_string(),
        placeholder: None,
        required,
        style: "short".to_string(),
        max_length: Some(200),
    }
}

/// Tests registering a type with an ordered modal schema.
///
/// Expected: fields come back in registration order
#[tokio::test]
async fn registers_type_with_ordered_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketTypeRepository::new(db);
    let ticket_type = repo
        .create(
            100,
            "bug-report",
            "Report a bug",
            vec![
                field("What happened?", true),
                field("Steps to reproduce", true),
                field("Anything else?", false),
            ],
        )
        .await?;

    let fields = repo.fields(ticket_type.id).await?;
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].label, "What happened?");
    assert_eq!(fields[1].label, "Steps to reproduce");
    assert_eq!(fields[2].label, "Anything else?");
    assert!(!fields[2].required);

    Ok(())
}

/// Tests lookup by name within a guild.
///
/// Expected: the type is found in its own guild and absent elsewhere
#[tokio::test]
async fn find_by_name_is_guild_scoped() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketTypeRepository::new(db);
    repo.create(100, "support", "Open a ticket", vec![]).await?;

    assert!(repo.find_by_name(100, "support").await?.is_some());
    assert!(repo.find_by_name(200, "support").await?.is_none());
    assert!(repo.find_by_name(100, "billing").await?.is_none());

    Ok(())
}

/// Tests that duplicate names within a guild are rejected.
///
/// Expected: unique-index violation on the second create
#[tokio::test]
async fn rejects_duplicate_names_in_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketTypeRepository::new(db);
    repo.create(100, "support", "Open a ticket", vec![]).await?;
    let duplicate = repo.create(100, "support", "Another", vec![]).await;

    assert!(duplicate.is_err());

    Ok(())
}

/// Tests deleting a registered type.
///
/// Expected: the type row is gone afterwards
#[tokio::test]
async fn delete_removes_the_type() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketTypeRepository::new(db);
    let ticket_type = repo.create(100, "support", "Open a ticket", vec![]).await?;

    repo.delete(ticket_type.id).await?;

    assert!(repo.find_by_id(ticket_type.id).await?.is_none());

    Ok(())
}
