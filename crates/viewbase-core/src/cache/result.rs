//! Query result caching with LRU eviction and TTL expiry.
//!
//! This module provides thread-safe in-memory caching for GraphQL query results
//! with automatic least-recently-used (LRU) eviction and time-to-live (TTL) expiry.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::db::types::JsonbValue;
use crate::error::{ViewBaseError, Result};
use super::config::CacheConfig;

/// Cached query result with metadata.
///
/// Stores the query result along with tracking information for
/// TTL expiry, view-based invalidation, and monitoring.
#[derive(Debug, Clone)]
pub struct CachedResult {
    /// The actual query result (JSONB array from database).
    ///
    /// Wrapped in `Arc` for cheap cloning on cache hits (zero-copy).
    pub result: Arc<Vec<JsonbValue>>,

    /// Which views/tables this query accesses.
    ///
    /// Format: `vec!["v_user", "v_post"]`
    ///
    /// Used for view-based invalidation when mutations modify these views.
    pub accessed_views: Vec<String>,

    /// When this entry was cached (Unix timestamp in seconds).
    ///
    /// Used for TTL expiry check on access.
    pub cached_at: u64,

    /// Number of cache hits for this entry.
    ///
    /// Used for monitoring and optimization. Incremented on each `get()`.
    pub hit_count: u64,
}

/// Thread-safe LRU cache for query results.
///
/// # Thread Safety
///
/// All operations use interior mutability (`Arc<Mutex<>>`), making the cache
/// safe to share across async tasks. Lock contention is minimal as critical
/// sections are short.
///
/// # Memory Safety
///
/// - **Hard LRU limit**: Configured via `max_entries`, automatically evicts
///   least-recently-used entries when limit is reached
/// - **TTL expiry**: Entries older than `ttl_seconds` are considered expired
///   and removed on next access
/// - **Memory tracking**: Metrics include estimated memory usage
///
/// # Example
///
/// ```rust
/// use viewbase_core::cache::{QueryResultCache, CacheConfig};
/// use viewbase_core::db::types::JsonbValue;
/// use serde_json::json;
///
/// let cache = QueryResultCache::new(CacheConfig::default());
///
/// // Cache a result
/// let result = vec![JsonbValue::new(json!({"id": 1, "name": "Alice"}))];
/// cache.put(
///     "cache_key_123".to_string(),
///     result.clone(),
///     vec!["v_user".to_string()]
/// ).unwrap();
///
/// // Retrieve from cache
/// if let Some(cached) = cache.get("cache_key_123").unwrap() {
///     println!("Cache hit! {} results", cached.len());
/// }
/// ```
pub struct QueryResultCache {
    /// LRU cache: key -> cached result.
    ///
    /// Automatically evicts least-recently-used entries above `max_entries`.
    cache: Arc<Mutex<LruCache<String, CachedResult>>>,

    /// Configuration (immutable after creation).
    config: CacheConfig,

    /// Metrics for monitoring.
    metrics: Arc<Mutex<CacheMetrics>>,
}

/// Cache metrics for monitoring.
///
/// Exposed via API for observability and debugging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetrics {
    /// Number of cache hits (returned cached result).
    pub hits: u64,

    /// Number of cache misses (executed query).
    pub misses: u64,

    /// Total entries cached across all time.
    pub total_cached: u64,

    /// Number of invalidations triggered.
    pub invalidations: u64,

    /// Current size of cache (number of entries).
    pub size: usize,

    /// Estimated memory usage in bytes.
    ///
    /// This is a rough estimate based on cache key lengths and entry counts.
    /// Actual memory usage may vary based on result sizes.
    pub memory_bytes: usize,
}

impl QueryResultCache {
    /// Create new cache with configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.max_entries` is 0 (invalid configuration).
    ///
    /// # Example
    ///
    /// ```rust
    /// use viewbase_core::cache::{QueryResultCache, CacheConfig};
    ///
    /// let cache = QueryResultCache::new(CacheConfig::default());
    /// ```
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let max = NonZeroUsize::new(config.max_entries)
            .expect("max_entries must be > 0");

        Self {
            cache: Arc::new(Mutex::new(LruCache::new(max))),
            config,
            metrics: Arc::new(Mutex::new(CacheMetrics {
                hits: 0,
                misses: 0,
                total_cached: 0,
                invalidations: 0,
                size: 0,
                memory_bytes: 0,
            })),
        }
    }

    /// Get cached result by key.
    ///
    /// Returns `None` if:
    /// - Caching is disabled (`config.enabled = false`)
    /// - Entry not in cache (cache miss)
    /// - Entry expired (TTL exceeded)
    ///
    /// # Errors
    ///
    /// Returns error if cache or metrics mutex is poisoned (should never happen).
    ///
    /// # Example
    ///
    /// ```rust
    /// use viewbase_core::cache::{QueryResultCache, CacheConfig};
    ///
    /// let cache = QueryResultCache::new(CacheConfig::default());
    ///
    /// if let Some(result) = cache.get("cache_key_abc123")? {
    ///     // Cache hit - use result
    ///     println!("Found {} results in cache", result.len());
    /// } else {
    ///     // Cache miss - execute query
    ///     println!("Cache miss, executing query");
    /// }
    /// # Ok::<(), viewbase_core::error::ViewBaseError>(())
    /// ```
    pub fn get(&self, cache_key: &str) -> Result<Option<Arc<Vec<JsonbValue>>>> {
        if !self.config.enabled {
            return Ok(None);
        }

        let mut cache = self.cache.lock()
            .map_err(|e| ViewBaseError::Internal {
                message: format!("Cache lock poisoned: {e}"),
                source: None,
            })?;

        if let Some(cached) = cache.get_mut(cache_key) {
            // Check TTL
            let now = current_timestamp();
            if now - cached.cached_at > self.config.ttl_seconds {
                // Expired - remove and return None
                cache.pop(cache_key);
                self.record_miss()?;
                return Ok(None);
            }

            // Cache hit - update stats and return
            cached.hit_count += 1;
            self.record_hit()?;
            Ok(Some(cached.result.clone()))
        } else {
            // Cache miss
            self.record_miss()?;
            Ok(None)
        }
    }

    /// Store query result in cache.
    ///
    /// If caching is disabled, this is a no-op.
    ///
    /// # Arguments
    ///
    /// * `cache_key` - Cache key (from `generate_cache_key()`)
    /// * `result` - Query result to cache
    /// * `accessed_views` - List of views accessed by this query
    ///
    /// # Errors
    ///
    /// Returns error if cache or metrics mutex is poisoned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use viewbase_core::cache::{QueryResultCache, CacheConfig};
    /// use viewbase_core::db::types::JsonbValue;
    /// use serde_json::json;
    ///
    /// let cache = QueryResultCache::new(CacheConfig::default());
    ///
    /// let result = vec![JsonbValue::new(json!({"id": 1}))];
    /// cache.put(
    ///     "cache_key_abc123".to_string(),
    ///     result,
    ///     vec!["v_user".to_string()]
    /// )?;
    /// # Ok::<(), viewbase_core::error::ViewBaseError>(())
    /// ```
    pub fn put(
        &self,
        cache_key: String,
        result: Vec<JsonbValue>,
        accessed_views: Vec<String>,
    ) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let now = current_timestamp();

        let cached = CachedResult {
            result: Arc::new(result),
            accessed_views,
            cached_at: now,
            hit_count: 0,
        };

        // Estimate memory usage (rough approximation)
        let memory_size = std::mem::size_of::<CachedResult>() + cache_key.len() * 2;

        let mut cache = self.cache.lock()
            .map_err(|e| ViewBaseError::Internal {
                message: format!("Cache lock poisoned: {e}"),
                source: None,
            })?;

        cache.put(cache_key, cached);

        // Update metrics
        let mut metrics = self.metrics.lock()
            .map_err(|e| ViewBaseError::Internal {
                message: format!("Metrics lock poisoned: {e}"),
                source: None,
            })?;
        metrics.total_cached += 1;
        metrics.size = cache.len();
        metrics.memory_bytes += memory_size;

        Ok(())
    }

    /// Invalidate entries accessing specified views.
    ///
    /// Called after mutations to invalidate affected cache entries.
    ///
    /// # Phase 2 Behavior
    ///
    /// - Simple view-based invalidation
    /// - Removes all entries that read from any specified view
    ///
    /// # Future Enhancements (Phase 4+)
    ///
    /// - Entity-level invalidation (only invalidate specific IDs)
    /// - Cascade-driven invalidation (from mutation metadata)
    ///
    /// # Arguments
    ///
    /// * `views` - List of view/table names modified by mutation
    ///
    /// # Returns
    ///
    /// Number of cache entries invalidated
    ///
    /// # Errors
    ///
    /// Returns error if cache or metrics mutex is poisoned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use viewbase_core::cache::{QueryResultCache, CacheConfig};
    ///
    /// let cache = QueryResultCache::new(CacheConfig::default());
    ///
    /// // After createUser mutation
    /// let invalidated = cache.invalidate_views(&vec!["v_user".to_string()])?;
    /// println!("Invalidated {} cache entries", invalidated);
    /// # Ok::<(), viewbase_core::error::ViewBaseError>(())
    /// ```
    pub fn invalidate_views(&self, views: &[String]) -> Result<u64> {
        let mut invalidated_count = 0u64;

        let mut cache = self.cache.lock()
            .map_err(|e| ViewBaseError::Internal {
                message: format!("Cache lock poisoned: {e}"),
                source: None,
            })?;

        // Collect keys to remove (can't modify during iteration)
        let keys_to_remove: Vec<String> = cache
            .iter()
            .filter(|(_, cached)| {
                // Check if any accessed view matches invalidation list
                cached.accessed_views.iter().any(|v| views.contains(v))
            })
            .map(|(k, _)| k.clone())
            .collect();

        // Remove entries
        for key in keys_to_remove {
            cache.pop(&key);
            invalidated_count += 1;
        }

        // Update metrics
        let mut metrics = self.metrics.lock()
            .map_err(|e| ViewBaseError::Internal {
                message: format!("Metrics lock poisoned: {e}"),
                source: None,
            })?;
        metrics.invalidations += invalidated_count;
        metrics.size = cache.len();

        Ok(invalidated_count)
    }

    /// Get cache metrics.
    ///
    /// Used for monitoring and debugging.
    ///
    /// # Errors
    ///
    /// Returns error if metrics mutex is poisoned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use viewbase_core::cache::{QueryResultCache, CacheConfig};
    ///
    /// let cache = QueryResultCache::new(CacheConfig::default());
    /// let metrics = cache.metrics()?;
    ///
    /// println!("Hit rate: {:.1}%", metrics.hit_rate() * 100.0);
    /// println!("Size: {} / {} entries", metrics.size, 10_000);
    /// # Ok::<(), viewbase_core::error::ViewBaseError>(())
    /// ```
    pub fn metrics(&self) -> Result<CacheMetrics> {
        self.metrics.lock()
            .map_err(|e| ViewBaseError::Internal {
                message: format!("Metrics lock poisoned: {e}"),
                source: None,
            })
            .map(|m| m.clone())
    }

    /// Clear all cache entries.
    ///
    /// Used for testing and manual cache flush.
    ///
    /// # Errors
    ///
    /// Returns error if cache or metrics mutex is poisoned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use viewbase_core::cache::{QueryResultCache, CacheConfig};
    ///
    /// let cache = QueryResultCache::new(CacheConfig::default());
    /// cache.clear()?;
    /// # Ok::<(), viewbase_core::error::ViewBaseError>(())
    /// ```
    pub fn clear(&self) -> Result<()> {
        self.cache.lock()
            .map_err(|e| ViewBaseError::Internal {
                message: format!("Cache lock poisoned: {e}"),
                source: None,
            })?
            .clear();

        let mut metrics = self.metrics.lock()
            .map_err(|e| ViewBaseError::Internal {
                message: format!("Metrics lock poisoned: {e}"),
                source: None,
            })?;
        metrics.size = 0;
        metrics.memory_bytes = 0;

        Ok(())
    }

    // Private helpers

    fn record_hit(&self) -> Result<()> {
        let mut metrics = self.metrics.lock()
            .map_err(|e| ViewBaseError::Internal {
                message: format!("Metrics lock poisoned: {e}"),
                source: None,
            })?;
        metrics.hits += 1;
        Ok(())
    }

    fn record_miss(&self) -> Result<()> {
        let mut metrics = self.metrics.lock()
            .map_err(|e| ViewBaseError::Internal {
                message: format!("Metrics lock poisoned: {e}"),
                source: None,
            })?;
        metrics.misses += 1;
        Ok(())
    }
}

impl CacheMetrics {
    /// Calculate cache hit rate.
    ///
    /// Returns ratio of hits to total requests (0.0 to 1.0).
    ///
    /// # Returns
    ///
    /// - `1.0` if all requests were hits
    /// - `0.0` if all requests were misses
    /// - `0.0` if no requests yet
    ///
    /// # Example
    ///
    /// ```rust
    /// use viewbase_core::cache::CacheMetrics;
    ///
    /// let metrics = CacheMetrics {
    ///     hits: 80,
    ///     misses: 20,
    ///     total_cached: 100,
    ///     invalidations: 5,
    ///     size: 95,
    ///     memory_bytes: 1_000_000,
    /// };
    ///
    /// assert_eq!(metrics.hit_rate(), 0.8);  // 80% hit rate
    /// ```
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }

    /// Check if cache is performing well.
    ///
    /// Returns `true` if hit rate is above 60% (reasonable threshold).
    ///
    /// # Example
    ///
    /// ```rust
    /// use viewbase_core::cache::CacheMetrics;
    ///
    /// let good_metrics = CacheMetrics {
    ///     hits: 80,
    ///     misses: 20,
    ///     total_cached: 100,
    ///     invalidations: 5,
    ///     size: 95,
    ///     memory_bytes: 1_000_000,
    /// };
    ///
    /// assert!(good_metrics.is_healthy());  // 80% > 60%
    /// ```
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.hit_rate() > 0.6
    }
}

/// Get current Unix timestamp in seconds.
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
