use super::*;

/// Tests the default listing hides drafts and deleted requests.
///
/// Expected: submitted, completed and rejected requests only
#[tokio::test]
async fn hides_drafts_and_deleted_by_default() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    for status in ["draft", "submitted", "completed", "rejected", "deleted"] {
        factory::combustion_request::CombustionRequestFactory::new(db, user.id)
            .status(status)
            .build()
            .await?;
    }

    let requests = CombustionRequestRepository::new(db)
        .get_all(CombustionFilter::default())
        .await?;

    let mut statuses: Vec<&str> = requests.iter().map(|r| r.status.as_str()).collect();
    statuses.sort();
    assert_eq!(statuses, vec!["completed", "rejected", "submitted"]);

    Ok(())
}

/// Tests an explicit status shows otherwise hidden requests.
///
/// Expected: only the deleted request
#[tokio::test]
async fn explicit_status_shows_deleted() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_submitted(db, user.id).await?;
    let deleted = factory::combustion_request::CombustionRequestFactory::new(db, user.id)
        .status("deleted")
        .build()
        .await?;

    let requests = CombustionRequestRepository::new(db)
        .get_all(CombustionFilter {
            status: Some(RequestStatus::Deleted),
            ..Default::default()
        })
        .await?;

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].id, deleted.id);

    Ok(())
}

/// Tests filtering by creator and creation date.
///
/// Expected: only the creator's requests inside the date window
#[tokio::test]
async fn filters_by_creator_and_dates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let own = factory::create_submitted(db, owner.id).await?;
    factory::create_submitted(db, other.id).await?;

    let repo = CombustionRequestRepository::new(db);

    let mine = repo
        .get_all(CombustionFilter {
            creator_id: Some(owner.id),
            start_date: Some(Utc::now() - Duration::hours(1)),
            end_date: Some(Utc::now() + Duration::hours(1)),
            ..Default::default()
        })
        .await?;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, own.id);

    let future = repo
        .get_all(CombustionFilter {
            start_date: Some(Utc::now() + Duration::hours(1)),
            ..Default::default()
        })
        .await?;
    assert!(future.is_empty());

    Ok(())
}
