use super::*;

/// Tests a new draft starts empty with the default molar volume.
///
/// Expected: draft status, creator set, molar volume 22.414, no moderator or result
#[tokio::test]
async fn creates_draft_with_defaults() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let draft = CombustionRequestRepository::new(db)
        .create_draft(user.id)
        .await?;

    assert_eq!(draft.status, RequestStatus::Draft);
    assert_eq!(draft.creator_id, user.id);
    assert_eq!(draft.molar_volume, Some(DEFAULT_MOLAR_VOLUME));
    assert!(draft.moderator_id.is_none());
    assert!(draft.final_result.is_none());

    Ok(())
}

/// Tests the draft lookup only returns the creator's own draft.
///
/// Expected: the user's draft; None for another user; submitted requests ignored
#[tokio::test]
async fn finds_own_draft_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::create_submitted(db, owner.id).await?;
    let draft = factory::create_draft(db, owner.id).await?;

    let repo = CombustionRequestRepository::new(db);

    assert_eq!(repo.find_draft(owner.id).await?.map(|r| r.id), Some(draft.id));
    assert!(repo.find_draft(other.id).await?.is_none());

    Ok(())
}

/// Tests molar volume can only change while the request is a draft.
///
/// Expected: true for the draft, false for the submitted request
#[tokio::test]
async fn sets_molar_volume_on_draft_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let draft = factory::create_draft(db, user.id).await?;
    let submitted = factory::create_submitted(db, user.id).await?;

    let repo = CombustionRequestRepository::new(db);

    assert!(repo.set_molar_volume(draft.id, 24.0).await?);
    assert!(!repo.set_molar_volume(submitted.id, 24.0).await?);

    let stored = repo.get_by_id(draft.id).await?.unwrap();
    assert_eq!(stored.molar_volume, Some(24.0));

    Ok(())
}
