use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use tracing::debug;

use crate::error::{TwitterError, TwitterResult};

/// Storage for response bodies of GET requests.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn get(&self, key: &str) -> TwitterResult<Option<String>>;
    async fn set(&self, key: &str, body: &str) -> TwitterResult<()>;
    async fn cached_time(&self, key: &str) -> TwitterResult<Option<DateTime<Utc>>>;
}

/// Cache keys are scoped to the consumer key so that two applications sharing a
/// cache never see each other's responses.
pub fn cache_key(consumer_key: Option<&str>, url: &str) -> String {
    match consumer_key {
        Some(key) => format!("{key}:{url}"),
        None => url.to_owned(),
    }
}

/// Whether an entry stored at `cached_at` is still valid at `now`.
pub fn is_fresh(cached_at: DateTime<Utc>, ttl: Duration, now: DateTime<Utc>) -> bool {
    match chrono::Duration::from_std(ttl) {
        Ok(ttl) => cached_at
            .checked_add_signed(ttl)
            .map_or(true, |expires| now < expires),
        Err(_) => true,
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct CacheEntry {
    cached_at: DateTime<Utc>,
    body: String,
}

impl CacheEntry {
    fn new(body: &str) -> Self {
        Self {
            cached_at: Utc::now(),
            body: body.to_owned(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    fn lock(&self) -> TwitterResult<std::sync::MutexGuard<'_, HashMap<String, CacheEntry>>> {
        self.entries
            .lock()
            .map_err(|_| TwitterError::Cache(std::io::Error::new(
                std::io::ErrorKind::Other,
                "memory cache lock poisoned",
            )))
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> TwitterResult<Option<String>> {
        Ok(self.lock()?.get(key).map(|e| e.body.clone()))
    }

    async fn set(&self, key: &str, body: &str) -> TwitterResult<()> {
        self.lock()?.insert(key.to_owned(), CacheEntry::new(body));
        Ok(())
    }

    async fn cached_time(&self, key: &str) -> TwitterResult<Option<DateTime<Utc>>> {
        Ok(self.lock()?.get(key).map(|e| e.cached_at))
    }
}

/// Keeps one JSON file per cache key.
#[derive(Debug, Clone)]
pub struct FileCache {
    cache_dir: PathBuf,
}

impl FileCache {
    /// Uses the per-user cache directory, or the system temp dir when there is none.
    pub fn new() -> Self {
        let cache_dir = ProjectDirs::from("", "", "twitter-rest")
            .map(|dirs| dirs.cache_dir().to_owned())
            .unwrap_or_else(|| std::env::temp_dir().join("twitter-rest-cache"));
        Self { cache_dir }
    }

    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            cache_dir: dir.as_ref().to_owned(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let digest = Sha1::digest(key.as_bytes());
        let name: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        self.cache_dir.join(name)
    }

    async fn read(&self, key: &str) -> TwitterResult<Option<CacheEntry>> {
        let s = match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(s) => s,
            Err(x) if x.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(x) => return Err(TwitterError::Cache(x)),
        };
        match serde_json::from_str(&s) {
            Ok(entry) => Ok(Some(entry)),
            // a torn or foreign file is a miss; the next fetch overwrites it
            Err(e) => {
                debug!("ignoring unreadable cache entry for {}: {}", key, e);
                Ok(None)
            }
        }
    }
}

impl Default for FileCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseCache for FileCache {
    async fn get(&self, key: &str) -> TwitterResult<Option<String>> {
        Ok(self.read(key).await?.map(|e| e.body))
    }

    async fn set(&self, key: &str, body: &str) -> TwitterResult<()> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;
        let json = serde_json::to_string(&CacheEntry::new(body)).map_err(TwitterError::Decode)?;

        // write then rename so readers never observe a partial entry
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn cached_time(&self, key: &str) -> TwitterResult<Option<DateTime<Utc>>> {
        Ok(self.read(key).await?.map(|e| e.cached_at))
    }
}
