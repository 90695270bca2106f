use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::data::staff_role::{StaffRoleParams, StaffRoleRepository};

/// Tests capability resolution across multiple held roles.
///
/// Expected: the union of the capabilities of the roles the member holds
#[tokio::test]
async fn capabilities_union_across_held_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::staff_role::StaffRoleFactory::new(db, 100)
        .role_id(1001)
        .can_close(true)
        .build()
        .await?;
    factory::staff_role::StaffRoleFactory::new(db, 100)
        .role_id(1002)
        .can_reopen(true)
        .build()
        .await?;
    factory::staff_role::StaffRoleFactory::new(db, 100)
        .role_id(1003)
        .can_delete(true)
        .build()
        .await?;

    let repo = StaffRoleRepository::new(db);

    // Member holds two of the three staff roles.
    let caps = repo.capabilities_for(100, &[1001, 1002]).await?;

    assert!(caps.close);
    assert!(caps.reopen);
    assert!(!caps.delete);

    Ok(())
}

/// Tests that roles in other guilds grant nothing.
///
/// Expected: default (empty) capability set
#[tokio::test]
async fn capabilities_are_guild_scoped() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::staff_role::StaffRoleFactory::new(db, 200)
        .role_id(1001)
        .can_delete(true)
        .build()
        .await?;

    let repo = StaffRoleRepository::new(db);
    let caps = repo.capabilities_for(100, &[1001]).await?;

    assert!(!caps.delete);
    assert!(!caps.view);

    Ok(())
}

/// Tests the dashboard full-replace save path.
///
/// Expected: previous staff roles are gone; only the submitted list remains
#[tokio::test]
async fn replace_all_swaps_the_role_list() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = StaffRoleRepository::new(db);

    repo.upsert(
        100,
        1001,
        StaffRoleParams {
            can_view: true,
            can_close: true,
            ..Default::default()
        },
    )
    .await?;

    repo.replace_all(
        100,
        vec![(
            2002,
            StaffRoleParams {
                can_view: true,
                can_delete: true,
                ..Default::default()
            },
        )],
    )
    .await?;

    let roles = repo.list_by_guild(100).await?;
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].role_id, "2002");
    assert!(roles[0].can_delete);

    Ok(())
}
