// src/cache.rs
//! Thin async wrapper around a Redis connection: strings, JSON values,
//! lists, sets, hashes and key management.

use crate::config::Config;
use crate::error::{DemoError, Result};
use log::{debug, error, info, warn};
use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::num::NonZeroUsize;

/// A Redis client backed by a `ConnectionManager`, which reconnects on its own
/// after a dropped connection.
#[derive(Clone)]
pub struct RedisClient {
    conn_manager: ConnectionManager,
    endpoint: String,
}

// ConnectionManager is not Debug
impl fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisClient")
            .field("endpoint", &self.endpoint)
            .field("conn_manager", &"<ConnectionManager instance>")
            .finish()
    }
}

impl RedisClient {
    /// Opens a connection and verifies it with `PING`.
    pub async fn connect(config: &Config) -> Result<Self> {
        let endpoint = config.endpoint();
        info!("Initializing Redis connection manager for {}", config.redacted_url());
        let client = redis::Client::open(config.redis_url()?.as_str())
            .map_err(|e| DemoError::Connection(format!("invalid connection settings: {}", e)))?;
        let mut conn_manager = ConnectionManager::new(client).await.map_err(|e| {
            error!("Failed to create Redis ConnectionManager: {}", e);
            DemoError::Connection(format!("{} ({})", endpoint, e))
        })?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut conn_manager)
            .await
            .map_err(|e| DemoError::Connection(format!("{} did not answer PING: {}", endpoint, e)))?;
        debug!("PING -> {}", pong);
        info!("Redis connection to {} ready", endpoint);

        Ok(Self {
            conn_manager,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn generate_key(prefix: &str, params: &[&str]) -> String {
        let mut key = prefix.to_string();
        for param in params {
            key.push(':');
            key.push_str(param);
        }
        key
    }

    // --- strings ---

    /// `SET`, or `SETEX` when a TTL is given.
    pub async fn set_string(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        match ttl_secs {
            Some(ttl) => conn.set_ex::<_, _, ()>(key, value, ttl).await?,
            None => conn.set::<_, _, ()>(key, value).await?,
        }
        debug!("SET {} (ttl: {:?})", key, ttl_secs);
        Ok(())
    }

    pub async fn get_string(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn_manager.clone();
        let value: Option<String> = conn.get(key).await?;
        match &value {
            Some(_) => debug!("Cache HIT for key: {}", key),
            None => debug!("Cache MISS for key: {}", key),
        }
        Ok(value)
    }

    // --- JSON ---

    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl_secs: Option<u64>) -> Result<()> {
        let value_str = serde_json::to_string(value)?;
        self.set_string(key, &value_str, ttl_secs).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(value_str) = self.get_string(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<T>(&value_str) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Failed to deserialize cached JSON for key {}: {}", key, e);
                Err(DemoError::Json(format!("cached value for {} is not valid: {}", key, e)))
            }
        }
    }

    // --- lists ---

    /// `LPUSH`; returns the new list length.
    pub async fn push_list(&self, key: &str, value: &str) -> Result<usize> {
        let mut conn = self.conn_manager.clone();
        Ok(conn.lpush(key, value).await?)
    }

    pub async fn list_range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let mut conn = self.conn_manager.clone();
        Ok(conn.lrange(key, start, stop).await?)
    }

    pub async fn list_len(&self, key: &str) -> Result<usize> {
        let mut conn = self.conn_manager.clone();
        Ok(conn.llen(key).await?)
    }

    /// `RPOP`. Paired with `push_list` this reads the list oldest-first.
    pub async fn pop_list_tail(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn_manager.clone();
        Ok(conn.rpop(key, None::<NonZeroUsize>).await?)
    }

    // --- sets ---

    /// `SADD`; true when the member was not already present.
    pub async fn add_to_set(&self, key: &str, member: &str) -> Result<bool> {
        let mut conn = self.conn_manager.clone();
        let added: i64 = conn.sadd(key, member).await?;
        Ok(added > 0)
    }

    pub async fn set_members(&self, key: &str) -> Result<BTreeSet<String>> {
        let mut conn = self.conn_manager.clone();
        Ok(conn.smembers(key).await?)
    }

    pub async fn is_set_member(&self, key: &str, member: &str) -> Result<bool> {
        let mut conn = self.conn_manager.clone();
        Ok(conn.sismember(key, member).await?)
    }

    // --- hashes ---

    pub async fn set_hash(&self, key: &str, field: &str, value: &str) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        conn.hset::<_, _, _, ()>(key, field, value).await?;
        Ok(())
    }

    pub async fn get_hash_field(&self, key: &str, field: &str) -> Result<Option<String>> {
        let mut conn = self.conn_manager.clone();
        Ok(conn.hget(key, field).await?)
    }

    pub async fn get_hash_all(&self, key: &str) -> Result<BTreeMap<String, String>> {
        let mut conn = self.conn_manager.clone();
        Ok(conn.hgetall(key).await?)
    }

    // --- keys ---

    /// `DEL`; true when the key existed.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn_manager.clone();
        let count: i64 = conn.del(key).await?;
        Ok(count > 0)
    }

    pub async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn_manager.clone();
        Ok(conn.exists(key).await?)
    }

    /// Remaining lifetime in seconds; `None` if the key is missing or never expires.
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>> {
        let mut conn = self.conn_manager.clone();
        let ttl: i64 = conn.ttl(key).await?;
        Ok((ttl >= 0).then_some(ttl))
    }

    /// Keys matching a glob pattern, collected with `SCAN` and sorted.
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.conn_manager.clone();
        let mut keys = BTreeSet::new();
        {
            let mut iter = conn.scan_match::<_, String>(pattern).await?;
            while let Some(key) = iter.next_item().await {
                keys.insert(key);
            }
        }
        Ok(keys.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_joined_with_colons() {
        assert_eq!(RedisClient::generate_key("computation", &["5"]), "computation:5");
        assert_eq!(
            RedisClient::generate_key("excel_data", &["sample_data.xlsx", "Sheet1"]),
            "excel_data:sample_data.xlsx:Sheet1"
        );
        assert_eq!(RedisClient::generate_key("plain", &[]), "plain");
    }
}
