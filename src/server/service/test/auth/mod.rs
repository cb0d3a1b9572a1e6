use std::time::Duration;

use async_trait::async_trait;
use test_utils::builder::TestBuilder;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::RegisterUserParams,
    service::auth::{
        deny_list::{MemoryDenyList, TokenDenyList},
        jwt::JwtCodec,
        AuthService,
    },
};

/// Deny-list whose backing store is always down.
struct UnavailableDenyList;

#[async_trait]
impl TokenDenyList for UnavailableDenyList {
    async fn deny(&self, _token: &str, _ttl: Duration) -> Result<(), AppError> {
        Err(AppError::InternalError("deny-list unavailable".to_string()))
    }

    async fn is_denied(&self, _token: &str) -> Result<bool, AppError> {
        Err(AppError::InternalError("deny-list unavailable".to_string()))
    }
}

fn codec() -> JwtCodec {
    JwtCodec::new("service-test-secret", "fuelcalc", Duration::from_secs(3600))
}

fn params(login: &str, password: &str) -> RegisterUserParams {
    RegisterUserParams {
        login: login.to_string(),
        password: password.to_string(),
        name: "Test User".to_string(),
    }
}

/// Tests registering a buyer and logging in.
///
/// Expected: the issued token verifies to the registered user with the buyer role
#[tokio::test]
async fn registers_and_logs_in() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = codec();
    let deny_list = MemoryDenyList::new();
    let service = AuthService::new(db, &jwt, &deny_list);

    let user = service.register(params("alice", "secret")).await?;
    assert!(!user.is_moderator);

    let (token, logged_in) = service.login("alice", "secret").await?;
    assert_eq!(logged_in.id, user.id);

    let claims = jwt.verify(&token)?;
    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.login, "alice");
    assert!(!claims.is_moderator);

    Ok(())
}

/// Tests registering a taken login or with empty fields.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_invalid_registration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = codec();
    let deny_list = MemoryDenyList::new();
    let service = AuthService::new(db, &jwt, &deny_list);

    service.register(params("alice", "secret")).await?;

    let result = service.register(params("alice", "other")).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = service.register(params("bob", "")).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests logging in with a wrong password or an unknown login.
///
/// Expected: Err(AuthError::InvalidCredentials) for both
#[tokio::test]
async fn rejects_bad_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = codec();
    let deny_list = MemoryDenyList::new();
    let service = AuthService::new(db, &jwt, &deny_list);

    service.register(params("alice", "secret")).await?;

    for (login, password) in [("alice", "wrong"), ("nobody", "secret")] {
        let result = service.login(login, password).await;
        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::InvalidCredentials))
        ));
    }

    Ok(())
}

/// Tests logging out.
///
/// Expected: the token is on the deny-list afterwards
#[tokio::test]
async fn logout_revokes_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = codec();
    let deny_list = MemoryDenyList::new();
    let service = AuthService::new(db, &jwt, &deny_list);

    service.register(params("alice", "secret")).await?;
    let (token, _) = service.login("alice", "secret").await?;
    let claims = jwt.verify(&token)?;

    service.logout(&token, &claims).await?;

    assert!(deny_list.is_denied(&token).await?);

    Ok(())
}

/// Tests logging out while the deny-list is unreachable.
///
/// Expected: Ok(())
#[tokio::test]
async fn logout_tolerates_deny_list_failure() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = codec();
    let deny_list = UnavailableDenyList;
    let service = AuthService::new(db, &jwt, &deny_list);

    service.register(params("alice", "secret")).await?;
    let (token, _) = service.login("alice", "secret").await?;
    let claims = jwt.verify(&token)?;

    service.logout(&token, &claims).await?;

    Ok(())
}
