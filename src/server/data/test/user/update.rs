use super::*;

/// Tests a partial profile update.
///
/// Expected: name changed, login unchanged
#[tokio::test]
async fn updates_name_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .login("carol")
        .build()
        .await?;

    let updated = UserRepository::new(db)
        .update(UpdateUserParams {
            id: user.id,
            login: None,
            name: Some("Carol C.".to_string()),
        })
        .await?
        .unwrap();

    assert_eq!(updated.login, "carol");
    assert_eq!(updated.name, "Carol C.");

    Ok(())
}

/// Tests updating a missing account.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .update(UpdateUserParams {
            id: 999,
            login: Some("ghost".to_string()),
            name: None,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
