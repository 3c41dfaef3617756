// crates/trustnet-scoring/src/social/cache.rs
//
// Read-through profile cache with a bounded freshness window.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use trustnet_core::{LinkedInProfile, ProfileFetcher, TrustError, TwitterProfile};

/// Default freshness window of cached profiles.
pub const DEFAULT_PROFILE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    fetched_at: Instant,
    value: T,
}

/// Wraps a `ProfileFetcher`, remembering found profiles for `ttl`.
///
/// A miss or an expired entry always goes to the inner fetcher. Not-found
/// results and fetch errors are never cached.
pub struct CachedProfileFetcher {
    inner: Arc<dyn ProfileFetcher>,
    ttl: Duration,
    twitter: RwLock<HashMap<String, CacheEntry<TwitterProfile>>>,
    linkedin: RwLock<HashMap<String, CacheEntry<LinkedInProfile>>>,
}

impl CachedProfileFetcher {
    pub fn new(inner: Arc<dyn ProfileFetcher>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            twitter: RwLock::new(HashMap::new()),
            linkedin: RwLock::new(HashMap::new()),
        }
    }

    async fn fresh<T: Clone>(
        &self,
        map: &RwLock<HashMap<String, CacheEntry<T>>>,
        key: &str,
    ) -> Option<T> {
        let guard = map.read().await;
        guard
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Drop every expired entry.
    pub async fn purge_expired(&self) {
        let ttl = self.ttl;
        self.twitter.write().await.retain(|_, e| e.fetched_at.elapsed() < ttl);
        self.linkedin.write().await.retain(|_, e| e.fetched_at.elapsed() < ttl);
    }

    /// Number of cached entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.twitter.read().await.len() + self.linkedin.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProfileFetcher for CachedProfileFetcher {
    async fn fetch_twitter(&self, username: &str) -> Result<Option<TwitterProfile>, TrustError> {
        let key = username.to_lowercase();
        if let Some(profile) = self.fresh(&self.twitter, &key).await {
            tracing::debug!(username, "Twitter profile served from cache");
            return Ok(Some(profile));
        }
        let fetched = self.inner.fetch_twitter(username).await?;
        if let Some(profile) = &fetched {
            self.twitter.write().await.insert(
                key,
                CacheEntry {
                    fetched_at: Instant::now(),
                    value: profile.clone(),
                },
            );
        }
        Ok(fetched)
    }

    async fn fetch_linkedin(
        &self,
        profile_id: &str,
    ) -> Result<Option<LinkedInProfile>, TrustError> {
        if let Some(profile) = self.fresh(&self.linkedin, profile_id).await {
            tracing::debug!(profile_id, "LinkedIn profile served from cache");
            return Ok(Some(profile));
        }
        let fetched = self.inner.fetch_linkedin(profile_id).await?;
        if let Some(profile) = &fetched {
            self.linkedin.write().await.insert(
                profile_id.to_string(),
                CacheEntry {
                    fetched_at: Instant::now(),
                    value: profile.clone(),
                },
            );
        }
        Ok(fetched)
    }
}
