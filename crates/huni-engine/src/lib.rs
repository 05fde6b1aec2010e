//! Async livability-scoring pipeline: Overpass fetches with retry and
//! rate-limit-aware backoff, a TTL query cache, raw-element processing,
//! custom-POI merging, and the sequential per-category orchestrator.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod overpass;
pub mod poi;
pub mod processor;
mod retry;
pub mod summary;

pub use cache::{cache_key, MemoryCache, QueryCache};
pub use config::{ConfigError, EngineConfig};
pub use engine::{LivabilityEngine, ScoreOutcome};
pub use error::EngineError;
pub use overpass::{OverpassClient, RawElement};
pub use poi::{EmptyPoiStore, PoiStore, StaticPoiStore};
pub use summary::render_summary;
