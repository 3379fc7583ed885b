//! Valkey backed transient store for the LearnyBox client.
//!
//! The token pair and the member list pages must survive restarts and be shared between server
//! instances, so production keeps them in Valkey with the TTL carried by `SET EX`.

use std::time::Duration;

use async_trait::async_trait;
use fred::prelude::*;
use learnybox::TransientStore;

/// Prefix of every key written by [`RedisTransientStore`].
pub const TRANSIENT_KEY_PREFIX: &str = "learnyboxmap:transient:";

#[derive(Clone)]
pub struct RedisTransientStore {
    pool: Pool,
}

impl RedisTransientStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    fn key(key: &str) -> String {
        format!("{TRANSIENT_KEY_PREFIX}{key}")
    }
}

#[async_trait]
impl TransientStore for RedisTransientStore {
    async fn get(&self, key: &str) -> Result<Option<String>, learnybox::Error> {
        self.pool
            .get::<Option<String>, _>(Self::key(key))
            .await
            .map_err(store_error)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), learnybox::Error> {
        // Valkey rejects EX 0, an expired value is simply not stored.
        let seconds = ttl.as_secs() as i64;
        if seconds <= 0 {
            return self.delete(key).await;
        }

        self.pool
            .set::<(), _, _>(
                Self::key(key),
                value,
                Some(Expiration::EX(seconds)),
                None,
                false,
            )
            .await
            .map_err(store_error)
    }

    async fn delete(&self, key: &str) -> Result<(), learnybox::Error> {
        self.pool
            .del::<(), _>(Self::key(key))
            .await
            .map_err(store_error)
    }
}

fn store_error(e: Error) -> learnybox::Error {
    learnybox::Error::Store(e.to_string())
}
