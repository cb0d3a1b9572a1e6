use super::*;

/// Tests a buyer token passes the buyer check.
///
/// Expected: Ok(AuthUser) carrying the buyer's claims and raw token
#[tokio::test]
async fn grants_buyer_access() -> Result<(), AppError> {
    let jwt = codec();
    let deny_list = MemoryDenyList::new();
    let token = jwt.issue(&user(7, false))?;
    let headers = bearer(&token);

    let auth_user = AuthGuard::new(&jwt, &deny_list, &headers)
        .require(&[Permission::Buyer])
        .await?;

    assert_eq!(auth_user.id(), 7);
    assert!(!auth_user.is_moderator());
    assert_eq!(auth_user.token, token);

    Ok(())
}

/// Tests a buyer token is refused on moderator routes.
///
/// Expected: Err(AuthError::AccessDenied) naming the buyer
#[tokio::test]
async fn denies_moderator_access_to_buyer() -> Result<(), AppError> {
    let jwt = codec();
    let deny_list = MemoryDenyList::new();
    let headers = bearer(&jwt.issue(&user(7, false))?);

    let result = AuthGuard::new(&jwt, &deny_list, &headers)
        .require(&[Permission::Moderator])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, _))) => assert_eq!(user_id, 7),
        other => panic!("Expected AccessDenied, got: {:?}", other),
    }

    Ok(())
}

/// Tests a moderator token passes every permission.
///
/// Expected: Ok(AuthUser) with the moderator flag set
#[tokio::test]
async fn grants_moderator_access() -> Result<(), AppError> {
    let jwt = codec();
    let deny_list = MemoryDenyList::new();
    let headers = bearer(&jwt.issue(&user(1, true))?);

    let auth_user = AuthGuard::new(&jwt, &deny_list, &headers)
        .require(&[Permission::Buyer, Permission::Moderator])
        .await?;

    assert!(auth_user.is_moderator());

    Ok(())
}

/// Tests requests without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_missing_header() {
    let jwt = codec();
    let deny_list = MemoryDenyList::new();
    let headers = HeaderMap::new();

    let result = AuthGuard::new(&jwt, &deny_list, &headers)
        .require(&[Permission::Buyer])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
}

/// Tests a token sent without the bearer prefix.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_token_without_bearer_prefix() -> Result<(), AppError> {
    let jwt = codec();
    let deny_list = MemoryDenyList::new();
    let token = jwt.issue(&user(7, false))?;
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&token).unwrap());

    let result = AuthGuard::new(&jwt, &deny_list, &headers)
        .require(&[Permission::Buyer])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests a token signed with another secret.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_foreign_token() -> Result<(), AppError> {
    let jwt = codec();
    let foreign = JwtCodec::new("other-secret", "fuelcalc", Duration::from_secs(3600));
    let deny_list = MemoryDenyList::new();
    let headers = bearer(&foreign.issue(&user(7, false))?);

    let result = AuthGuard::new(&jwt, &deny_list, &headers)
        .require(&[Permission::Buyer])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests a token revoked through logout.
///
/// Expected: Err(AuthError::TokenRevoked)
#[tokio::test]
async fn rejects_revoked_token() -> Result<(), AppError> {
    let jwt = codec();
    let deny_list = MemoryDenyList::new();
    let token = jwt.issue(&user(7, false))?;
    deny_list.deny(&token, Duration::from_secs(60)).await?;
    let headers = bearer(&token);

    let result = AuthGuard::new(&jwt, &deny_list, &headers)
        .require(&[Permission::Buyer])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::TokenRevoked))
    ));

    Ok(())
}
