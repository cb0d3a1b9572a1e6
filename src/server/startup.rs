use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::AppError,
    service::auth::deny_list::{MemoryDenyList, RedisDenyList, TokenDenyList},
};

/// Installs the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for calculator calls.
///
/// Redirects are not followed.
pub fn setup_reqwest_client(config: &Config) -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(5).min(config.calculator_timeout))
        .build()?;

    Ok(client)
}

/// Selects the logout deny-list: Redis when configured, in-process otherwise.
pub async fn connect_deny_list(config: &Config) -> Result<Arc<dyn TokenDenyList>, AppError> {
    match &config.redis_url {
        Some(redis_url) => Ok(Arc::new(RedisDenyList::connect(redis_url).await?)),
        None => {
            tracing::warn!("REDIS_URL not set, revoked tokens are kept in memory only");
            Ok(Arc::new(MemoryDenyList::new()))
        }
    }
}
