use chrono::{TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::data::embed_template::{
    EmbedFieldParams, EmbedTemplateParams, EmbedTemplateRepository,
};

fn params(name: &str) -> EmbedTemplateParams {
    EmbedTemplateParams {
        name: name.to_string(),
        message_content: None,
        title: Some("Rules".to_string()),
        description: Some("Be nice.".to_string()),
        color: Some(0x57F287),
        author_name: None,
        author_icon_url: None,
        footer_text: Some("The mods".to_string()),
        footer_icon_url: None,
        image_url: None,
        thumbnail_url: None,
        fields: vec![
            EmbedFieldParams {
                name: "Rule 1".to_string(),
                value: "No spam".to_string(),
                inline: false,
            },
            EmbedFieldParams {
                name: "Rule 2".to_string(),
                value: "Stay on topic".to_string(),
                inline: true,
            },
        ],
    }
}

/// Tests creating a template snapshot with fields.
///
/// Expected: row plus ordered field rows, zero uses
#[tokio::test]
async fn creates_template_with_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_embed_template_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EmbedTemplateRepository::new(db);
    let now = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();

    let template = repo.create(100, params("rules"), now).await?;

    assert_eq!(template.uses, 0);
    assert_eq!(template.title.as_deref(), Some("Rules"));

    let fields = repo.fields(template.id).await?;
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "Rule 1");
    assert!(fields[1].inline);

    Ok(())
}

/// Tests that update replaces the field list rather than appending.
///
/// Expected: only the new field remains after the update
#[tokio::test]
async fn update_replaces_field_list() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_embed_template_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EmbedTemplateRepository::new(db);
    let now = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();

    let template = repo.create(100, params("rules"), now).await?;

    let mut updated_params = params("rules");
    updated_params.fields = vec![EmbedFieldParams {
        name: "Only rule".to_string(),
        value: "Have fun".to_string(),
        inline: false,
    }];
    repo.update(template.id, updated_params, now).await?;

    let fields = repo.fields(template.id).await?;
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "Only rule");

    Ok(())
}

/// Tests the usage counter bump.
///
/// Expected: uses increments by one per call
#[tokio::test]
async fn increment_uses_counts_posts() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_embed_template_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let template = factory::embed_template::create_embed_template(db, 100).await?;

    let repo = EmbedTemplateRepository::new(db);
    repo.increment_uses(template.id).await?;
    repo.increment_uses(template.id).await?;

    let reloaded = repo.find_by_id(template.id).await?.unwrap();
    assert_eq!(reloaded.uses, 2);

    Ok(())
}

/// Tests name lookup scoping.
///
/// Expected: found in the owning guild only
#[tokio::test]
async fn find_by_name_is_guild_scoped() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_embed_template_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EmbedTemplateRepository::new(db);
    let now = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();
    repo.create(100, params("rules"), now).await?;

    assert!(repo.find_by_name(100, "rules").await?.is_some());
    assert!(repo.find_by_name(200, "rules").await?.is_none());

    Ok(())
}
