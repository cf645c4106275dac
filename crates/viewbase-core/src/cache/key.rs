//! Cache key generation for query results.
//!
//! # Security Critical
//!
//! This module is **security-critical**. Cache keys MUST include variable values
//! to prevent data leakage between different users or requests. Incorrect key
//! generation could allow User A to see User B's cached data.
//!
//! # Key Composition
//!
//! Cache keys are generated from:
//! 1. Query string + variables (via APQ's security-audited `hash_query_with_variables`)
//! 2. WHERE clause structure (ensures different filters = different keys)
//! 3. Schema version (auto-invalidates on schema changes)
//!
//! # Example
//!
//! ```rust
//! use viewbase_core::cache::generate_cache_key;
//! use viewbase_core::db::{WhereClause, WhereOperator};
//! use serde_json::json;
//!
//! // Two different users querying their own data
//! let key1 = generate_cache_key(
//!     "query { user(id: $id) { name } }",
//!     &json!({"id": "alice"}),
//!     None,
//!     "v1"
//! );
//!
//! let key2 = generate_cache_key(
//!     "query { user(id: $id) { name } }",
//!     &json!({"id": "bob"}),
//!     None,
//!     "v1"
//! );
//!
//! // Different variables MUST produce different keys (security requirement)
//! assert_ne!(key1, key2);
//! ```

use serde_json::Value as JsonValue;
use sha2::{Digest, Sha256};

use crate::{
    apq::hasher::hash_query_with_variables, db::where_clause::WhereClause, schema::QueryDefinition,
};

/// Generate cache key for query result.
///
/// # Security Critical
///
/// **DIFFERENT VARIABLE VALUES MUST PRODUCE DIFFERENT KEYS** to prevent data
/// leakage between users. This function leverages APQ's security-audited
/// `hash_query_with_variables()` which correctly handles variable normalization.
///
/// # Key Composition
///
/// The cache key is a SHA-256 hash of:
/// ```text
/// SHA256(
///   hash_query_with_variables(query, variables) +
///   WHERE_clause_structure +
///   schema_version
/// )
/// ```
///
/// This ensures:
/// - Same query + variables = same key (cache hit)
/// - Different variables = different key (security)
/// - Different WHERE clauses = different key (correctness)
/// - Schema changes = different key (validity)
///
/// # Arguments
///
/// * `query` - GraphQL query string
/// * `variables` - Query variables from GraphQL request (optional)
/// * `where_clause` - WHERE filter from auto-params (optional)
/// * `schema_version` - Schema hash from `CompiledSchema`
///
/// # Returns
///
/// 64-character hex string (SHA-256 hash)
///
/// # Security Examples
///
/// ```rust
/// use viewbase_core::cache::generate_cache_key;
/// use serde_json::json;
///
/// let query = "query getUser($id: ID!) { user(id: $id) { name } }";
///
/// // Different users MUST get different cache keys
/// let alice_key = generate_cache_key(query, &json!({"id": "alice"}), None, "v1");
/// let bob_key = generate_cache_key(query, &json!({"id": "bob"}), None, "v1");
/// assert_ne!(alice_key, bob_key, "Security: different variables must produce different keys");
///
/// // Same user MUST get same key (determinism)
/// let alice_key2 = generate_cache_key(query, &json!({"id": "alice"}), None, "v1");
/// assert_eq!(alice_key, alice_key2, "Determinism: same inputs must produce same key");
/// ```
///
/// # Examples
///
/// ```rust
/// use viewbase_core::cache::generate_cache_key;
/// use viewbase_core::db::{WhereClause, WhereOperator};
/// use serde_json::json;
///
/// // Simple query with variables
/// let key = generate_cache_key(
///     "query { users(limit: $limit) { id } }",
///     &json!({"limit": 10}),
///     None,
///     "abc123"
/// );
/// assert_eq!(key.len(), 64); // SHA-256 hex
///
/// // Query with WHERE clause
/// let where_clause = WhereClause::Field {
///     path: vec!["email".to_string()],
///     operator: WhereOperator::Icontains,
///     value: json!("example.com"),
/// };
///
/// let key_with_where = generate_cache_key(
///     "query { users { id } }",
///     &json!({}),
///     Some(&where_clause),
///     "abc123"
/// );
/// assert_eq!(key_with_where.len(), 64);
/// ```
#[must_use]
pub fn generate_cache_key(
    query: &str,
    variables: &JsonValue,
    where_clause: Option<&WhereClause>,
    schema_version: &str,
) -> String {
    // Step 1: Base key from APQ (query + variables)
    // This is security-audited and handles variable ordering correctly
    // Different variables WILL produce different hashes (critical for security)
    let base_key = hash_query_with_variables(query, variables);

    // Step 2: Add WHERE clause structure if present
    // Different WHERE clauses must produce different keys for correctness
    // Using Debug format captures full structure including operators and values
    let where_structure = where_clause.map(|w| format!("{:?}", w)).unwrap_or_default();

    // Step 3: Combine with schema version
    // Schema changes invalidate all cached queries automatically
    let combined = format!("{}:{}:{}", base_key, where_structure, schema_version);

    // Step 4: Hash the combination for final cache key
    // SHA-256 provides collision resistance and fixed-length output
    let mut hasher = Sha256::new();
    hasher.update(combined.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract accessed views from query definition.
///
/// In Phase 2, we track which database views/tables a query accesses for
/// view-based cache invalidation. When a mutation modifies a view, we can
/// invalidate all cached queries that read from that view.
///
/// # Phase 2 Scope
///
/// Currently extracts only the primary SQL source from the query definition.
/// Does not analyze:
/// - JOIN clauses (requires compiled SQL - Phase 4)
/// - Resolver chains (requires runtime context - Phase 5)
/// - Nested queries (requires query analyzer - Phase 4)
///
/// # Future Enhancements (Phase 4+)
///
/// - Extract views from JOIN clauses in compiled SQL
/// - Extract views from resolver chains
/// - Support for custom resolver view tracking
/// - Entity-level tracking (extract IDs from results)
///
/// # Arguments
///
/// * `query_def` - The compiled query definition from schema
///
/// # Returns
///
/// List of view/table names accessed by this query
///
/// # Examples
///
/// ```ignore
/// use viewbase_core::cache::extract_accessed_views;
/// use viewbase_core::schema::{QueryDefinition, AutoParams};
///
/// let query_def = QueryDefinition {
///     name: "users".to_string(),
///     return_type: "User".to_string(),
///     returns_list: true,
///     nullable: false,
///     arguments: vec![],
///     sql_source: Some("v_user".to_string()),
///     auto_params: AutoParams {
///         has_where: true,
///         has_order_by: false,
///         has_limit: true,
///         has_offset: false,
///     },
/// };
///
/// let views = extract_accessed_views(&query_def);
/// assert_eq!(views, vec!["v_user"]);
/// ```
#[must_use]
pub fn extract_accessed_views(query_def: &QueryDefinition) -> Vec<String> {
    let mut views = Vec::new();

    // Add primary SQL source
    // Note: ViewBase uses single-table compiled templates (no JOINs or resolver chains),
    // so the sql_source is the complete set of accessed views for cache invalidation.
    if let Some(sql_source) = &query_def.sql_source {
        views.push(sql_source.clone());
    }

    views
}

/// Verify cache key generation is deterministic.
///
/// Used in testing to ensure cache hits work correctly.
/// Same inputs must always produce the same key.
///
/// # Arguments
///
/// * `query` - GraphQL query string
/// * `variables` - Query variables
/// * `schema_version` - Schema version hash
///
/// # Returns
///
/// `true` if two sequential key generations produce identical keys
///
/// # Example
///
/// ```rust
/// use viewbase_core::cache::verify_deterministic;
/// use serde_json::json;
///
/// assert!(verify_deterministic(
///     "query { users { id } }",
///     &json!({}),
///     "v1"
/// ));
/// ```
#[cfg(test)]
#[must_use]
pub fn verify_deterministic(query: &str, variables: &JsonValue, schema_version: &str) -> bool {
    let key1 = generate_cache_key(query, variables, None, schema_version);
    let key2 = generate_cache_key(query, variables, None, schema_version);
    key1 == key2
}
