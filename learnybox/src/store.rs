//! Key/value storage with a time-to-live per entry.
//!
//! The LearnyBox client keeps two kinds of values here: the authentication token pair and the
//! pages of paginated list routes. Both are plain JSON strings so any backend able to store
//! strings with an expiry can be plugged in.

use std::{
    collections::HashMap,
    sync::RwLock,
    time::{Duration, Instant},
};

use async_trait::async_trait;

use crate::error::Error;

/// Storage for values that expire after a given time-to-live.
#[async_trait]
pub trait TransientStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if it is missing or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Stores `value` under `key`, replacing any previous value, for `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), Error>;

    /// Removes the value stored under `key`. Missing keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), Error>;
}

/// In-process [`TransientStore`].
///
/// Expired entries are dropped lazily when they are read.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

#[async_trait]
impl TransientStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let now = Instant::now();

        {
            let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
            match entries.get(key) {
                Some((value, expires_at)) if *expires_at > now => return Ok(Some(value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);

        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), Error> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), (value, Instant::now() + ttl));

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), Error> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);

        Ok(())
    }
}
