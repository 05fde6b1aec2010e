//! TTL-bounded query cache for category fetches.
//!
//! Keys derive deterministically from the category and the origin
//! rounded to four decimal places (~11 m), so nearby requests for the
//! same category share an entry. The cache is a seam: the orchestrator
//! takes any [`QueryCache`], and tests substitute fakes.

use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};

use huni_core::Category;

use crate::overpass::RawElement;

/// Key-value store for raw category query results.
///
/// Implementations must tolerate concurrent scoring runs; the worst
/// acceptable race is a redundant fetch or a duplicate write.
pub trait QueryCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<RawElement>>;
    fn insert(&self, key: String, elements: Vec<RawElement>);
}

/// Compute the cache key for one category query.
///
/// SHA-256 over `category || lat || lng` with coordinates rounded to
/// four decimals, hex-encoded.
#[must_use]
pub fn cache_key(category: Category, lat: f64, lng: f64) -> String {
    let input = format!("{category}\x00{lat:.4}\x00{lng:.4}");
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// In-process cache with a global capacity bound and TTL expiry.
pub struct MemoryCache {
    inner: moka::sync::Cache<String, Arc<Vec<RawElement>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: moka::sync::Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }
}

impl QueryCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<RawElement>> {
        self.inner.get(key).map(|v| v.as_ref().clone())
    }

    fn insert(&self, key: String, elements: Vec<RawElement>) {
        self.inner.insert(key, Arc::new(elements));
    }
}
