//! Revoked-token storage for logout.
//!
//! A revoked token is kept only until its own expiry; after that signature verification
//! rejects it anyway.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tokio::sync::RwLock;

use crate::server::error::AppError;

const KEY_PREFIX: &str = "fuelcalc.jwt.";

/// Store of tokens revoked before their expiry.
#[async_trait]
pub trait TokenDenyList: Send + Sync {
    /// Revokes `token` for `ttl`.
    async fn deny(&self, token: &str, ttl: Duration) -> Result<(), AppError>;

    /// Whether `token` is currently revoked.
    async fn is_denied(&self, token: &str) -> Result<bool, AppError>;
}

/// Redis-backed deny-list. Entries expire through Redis TTLs.
#[derive(Clone)]
pub struct RedisDenyList {
    conn_manager: ConnectionManager,
}

impl RedisDenyList {
    /// Connects to Redis.
    ///
    /// # Returns
    /// - `Ok(RedisDenyList)` - Connection manager established
    /// - `Err(AppError::RedisErr)` - Malformed URL or unreachable server
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url)?;
        let conn_manager = ConnectionManager::new(client).await?;

        tracing::info!("Redis token deny-list initialized");

        Ok(Self { conn_manager })
    }

    fn key(token: &str) -> String {
        format!("{}{}", KEY_PREFIX, token)
    }
}

#[async_trait]
impl TokenDenyList for RedisDenyList {
    async fn deny(&self, token: &str, ttl: Duration) -> Result<(), AppError> {
        let mut conn = self.conn_manager.clone();
        let ttl_seconds = ttl.as_secs().max(1);

        let _: () = conn.set_ex(Self::key(token), "revoked", ttl_seconds).await?;

        Ok(())
    }

    async fn is_denied(&self, token: &str) -> Result<bool, AppError> {
        let mut conn = self.conn_manager.clone();

        Ok(conn.exists(Self::key(token)).await?)
    }
}

/// In-process deny-list used when no Redis is configured.
///
/// Expired entries are purged whenever a new token is revoked.
#[derive(Clone, Default)]
pub struct MemoryDenyList {
    entries: Arc<RwLock<HashMap<String, Instant>>>,
}

impl MemoryDenyList {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenDenyList for MemoryDenyList {
    async fn deny(&self, token: &str, ttl: Duration) -> Result<(), AppError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, expires_at| *expires_at > now);
        entries.insert(token.to_string(), now + ttl);

        Ok(())
    }

    async fn is_denied(&self, token: &str) -> Result<bool, AppError> {
        let entries = self.entries.read().await;

        Ok(entries
            .get(token)
            .is_some_and(|expires_at| *expires_at > Instant::now()))
    }
}
