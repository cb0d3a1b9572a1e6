use super::*;

/// Tests starting a session stores the token and processing marker.
///
/// Expected: token readable, calculation status `processing`, moderator recorded
#[tokio::test]
async fn starts_calculation_on_submitted_request() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let moderator = factory::create_moderator(db).await?;
    let request = factory::create_submitted(db, user.id).await?;

    let repo = CombustionRequestRepository::new(db);

    assert!(repo
        .start_calculation(request.id, "session-token", Some(moderator.id))
        .await?);

    assert_eq!(
        repo.get_calculation_token(request.id).await?.as_deref(),
        Some("session-token")
    );
    let stored = repo.get_by_id(request.id).await?.unwrap();
    assert_eq!(stored.calculation_status.as_deref(), Some("processing"));
    assert_eq!(stored.moderator_id, Some(moderator.id));

    Ok(())
}

/// Tests an existing moderator is kept when none is passed.
///
/// Expected: moderator unchanged
#[tokio::test]
async fn start_calculation_keeps_existing_moderator() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let moderator = factory::create_moderator(db).await?;
    let request = factory::combustion_request::CombustionRequestFactory::new(db, user.id)
        .status("submitted")
        .moderator_id(Some(moderator.id))
        .build()
        .await?;

    let repo = CombustionRequestRepository::new(db);
    assert!(repo.start_calculation(request.id, "t", None).await?);

    assert_eq!(
        repo.get_by_id(request.id).await?.unwrap().moderator_id,
        Some(moderator.id)
    );

    Ok(())
}

/// Tests sessions cannot start on drafts.
///
/// Expected: false and no token stored
#[tokio::test]
async fn does_not_start_calculation_on_draft() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let draft = factory::create_draft(db, user.id).await?;

    let repo = CombustionRequestRepository::new(db);

    assert!(!repo.start_calculation(draft.id, "t", None).await?);
    assert!(repo.get_calculation_token(draft.id).await?.is_none());

    Ok(())
}

/// Tests the completion transition succeeds exactly once.
///
/// Expected: first call true and stores the result, second call false
#[tokio::test]
async fn completes_calculation_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let moderator = factory::create_moderator(db).await?;
    let request = factory::combustion_request::CombustionRequestFactory::new(db, user.id)
        .status("submitted")
        .processing("t")
        .build()
        .await?;

    let repo = CombustionRequestRepository::new(db);

    assert!(repo
        .complete_calculation(request.id, 150.0, moderator.id, Utc::now())
        .await?);
    assert!(!repo
        .complete_calculation(request.id, 300.0, moderator.id, Utc::now())
        .await?);

    let stored = repo.get_by_id(request.id).await?.unwrap();
    assert_eq!(stored.status, RequestStatus::Completed);
    assert_eq!(stored.final_result, Some(150.0));
    assert_eq!(stored.calculation_status.as_deref(), Some("completed"));
    assert_eq!(stored.moderator_id, Some(moderator.id));
    assert!(stored.finished_at.is_some());

    Ok(())
}

/// Tests completion requires a running session.
///
/// Expected: false for a submitted request without the processing marker
#[tokio::test]
async fn does_not_complete_without_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let moderator = factory::create_moderator(db).await?;
    let request = factory::create_submitted(db, user.id).await?;

    assert!(!CombustionRequestRepository::new(db)
        .complete_calculation(request.id, 1.0, moderator.id, Utc::now())
        .await?);

    Ok(())
}
