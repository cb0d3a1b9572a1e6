use super::*;

/// Tests creating an account and finding it again.
///
/// Expected: lookups by login and ID return the account; hash only on the entity
#[tokio::test]
async fn creates_and_finds_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create("alice".to_string(), "hash".to_string(), "Alice".to_string(), false)
        .await?;

    let by_login = repo.find_by_login("alice").await?.unwrap();
    assert_eq!(by_login.id, user.id);
    assert_eq!(by_login.password_hash, "hash");

    let by_id = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(by_id.name, "Alice");
    assert!(!by_id.is_moderator);

    assert!(repo.find_by_login("bob").await?.is_none());

    Ok(())
}

/// Tests moderator accounts keep their flag.
///
/// Expected: is_moderator true
#[tokio::test]
async fn finds_moderator() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let moderator = factory::create_moderator(db).await?;

    let found = UserRepository::new(db)
        .find_by_id(moderator.id)
        .await?
        .unwrap();

    assert!(found.is_moderator);

    Ok(())
}
