//! Inspection Memoization
//!
//! Wraps any `RepoInspector` with a per-session, TTL-bounded memo cache
//! keyed by `owner/name`. A kit generation touches the same repository for
//! both the guidelines and overview sections; the memo keeps that at one
//! sandboxed clone.
//!
//! Uses `RwLock<HashMap>` over a caching crate: cardinality is tiny (one
//! entry per repository per session) and entries never mutate after
//! insertion, so concurrent readers are safe by construction. Failures are
//! not cached; a later section may retry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use contrib_navigator_core::{InspectionResult, NavResult, RepoInspector, RepositoryRef};

struct CacheEntry {
    inserted_at: Instant,
    result: Arc<InspectionResult>,
}

/// TTL-bounded memoizing wrapper around a `RepoInspector`.
pub struct MemoizedInspector<I> {
    inner: I,
    ttl: Duration,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

impl<I> MemoizedInspector<I> {
    pub fn new(inner: I, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cache: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<I: RepoInspector> RepoInspector for MemoizedInspector<I> {
    async fn inspect(&self, repo: &RepositoryRef) -> NavResult<InspectionResult> {
        let key = repo.full_name();

        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(&key) {
                if entry.inserted_at.elapsed() < self.ttl {
                    tracing::debug!(repo = %key, "inspection memo hit");
                    return Ok((*entry.result).clone());
                }
            }
        }

        let result = self.inner.inspect(repo).await?;

        let mut cache = self.cache.write().await;
        cache.insert(
            key,
            CacheEntry {
                inserted_at: Instant::now(),
                result: Arc::new(result.clone()),
            },
        );
        Ok(result)
    }
}
