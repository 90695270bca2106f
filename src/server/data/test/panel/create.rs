use chrono::{TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::data::panel::{CreatePanelParams, PanelButtonParams, PanelRepository};

/// Tests creating a panel with buttons.
///
/// Expected: buttons stored in order, message_id unset until posted
#[tokio::test]
async fn creates_panel_with_ordered_buttons() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let support = factory::ticket_type::TicketTypeFactory::new(db, 100)
        .name("support")
        .build()
        .await?;
    let billing = factory::ticket_type::TicketTypeFactory::new(db, 100)
        .name("billing")
        .build()
        .await?;

    let repo = PanelRepository::new(db);
    let panel = repo
        .create(CreatePanelParams {
            guild_id: 100,
            channel_id: 5001,
            title: "Need help?".to_string(),
            description: Some("Pick a category".to_string()),
            color: 0x5865F2,
            buttons: vec![
                PanelButtonParams {
                    ticket_type_id: support.id,
                    label: "Support".to_string(),
                    emoji: None,
                    style: "primary".to_string(),
                },
                PanelButtonParams {
                    ticket_type_id: billing.id,
                    label: "Billing".to_string(),
                    emoji: Some("💳".to_string()),
                    style: "secondary".to_string(),
                },
            ],
            now: Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap(),
        })
        .await?;

    assert_eq!(panel.message_id, None);

    let buttons = repo.buttons(panel.id).await?;
    assert_eq!(buttons.len(), 2);
    assert_eq!(buttons[0].label, "Support");
    assert_eq!(buttons[1].label, "Billing");
    assert_eq!(buttons[1].ticket_type_id, billing.id);

    Ok(())
}

/// Tests recording the posted message id.
///
/// Expected: message_id persisted after set_message_id
#[tokio::test]
async fn set_message_id_records_posted_message() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let panel = factory::panel::create_panel(db, 100).await?;

    let repo = PanelRepository::new(db);
    let updated = repo.set_message_id(panel.id, 987654321).await?;

    assert_eq!(updated.message_id.as_deref(), Some("987654321"));

    Ok(())
}

/// Tests panel deletion.
///
/// Expected: panel row gone, listing no longer includes it
#[tokio::test]
async fn delete_removes_panel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let panel = factory::panel::create_panel(db, 100).await?;

    let repo = PanelRepository::new(db);
    repo.delete(panel.id).await?;

    assert!(repo.find_by_id(panel.id).await?.is_none());
    assert!(repo.list_by_guild(100).await?.is_empty());

    Ok(())
}
