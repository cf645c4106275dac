//! Database adapter trait definitions.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{Result, ViewBaseError};
use crate::schema::SqlProjectionHint;
use super::types::{DatabaseType, JsonbValue, PoolMetrics};
use super::where_clause::WhereClause;

/// Database adapter for executing queries against views.
///
/// This trait abstracts over different database backends (PostgreSQL, MySQL, SQLite, SQL Server).
/// All implementations must support:
/// - Executing simple WHERE queries against views
/// - Returning JSONB data from the `data` column
/// - Connection pooling and health checks
///
/// # Example
///
/// ```rust,no_run
/// use viewbase_core::db::{DatabaseAdapter, WhereClause, WhereOperator};
/// use serde_json::json;
///
/// # async fn example(adapter: impl DatabaseAdapter) -> Result<(), Box<dyn std::error::Error>> {
/// // Build WHERE clause
/// let where_clause = WhereClause::Field {
///     path: vec!["email".to_string()],
///     operator: WhereOperator::Icontains,
///     value: json!("example.com"),
/// };
///
/// // Execute query
/// let results = adapter
///     .execute_where_query("v_user", Some(&where_clause), None, None)
///     .await?;
///
/// println!("Found {} users", results.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait DatabaseAdapter: Send + Sync {
    /// Execute a WHERE query against a view and return JSONB rows.
    ///
    /// # Arguments
    ///
    /// * `view` - View name (e.g., "v_user", "v_post")
    /// * `where_clause` - Optional WHERE clause AST
    /// * `limit` - Optional row limit (for pagination)
    /// * `offset` - Optional row offset (for pagination)
    ///
    /// # Returns
    ///
    /// Vec of JSONB values from the `data` column.
    ///
    /// # Errors
    ///
    /// Returns `ViewBaseError::Database` on query execution failure.
    /// Returns `ViewBaseError::ConnectionPool` if connection pool is exhausted.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use viewbase_core::db::DatabaseAdapter;
    /// # async fn example(adapter: impl DatabaseAdapter) -> Result<(), Box<dyn std::error::Error>> {
    /// // Simple query without WHERE clause
    /// let all_users = adapter
    ///     .execute_where_query("v_user", None, Some(10), Some(0))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn execute_where_query(
        &self,
        view: &str,
        where_clause: Option<&WhereClause>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<JsonbValue>>;

    /// Call a stored procedure/function and return its result rows as JSONB.
    ///
    /// Mutations are dispatched as a single call — `SELECT * FROM
    /// fn_name($1, $2, ...)` on PostgreSQL, the analogous syntax on other
    /// backends — rather than as ad-hoc INSERT/UPDATE/DELETE statements.
    /// The function is expected to return a row shaped like the mutation's
    /// declared return type, optionally alongside a cascade-invalidation
    /// envelope column that callers parse separately.
    ///
    /// # Arguments
    ///
    /// * `function_name` - Fully-qualified stored procedure/function name.
    /// * `params` - Positional arguments, already coerced to JSON values in
    ///   declaration order.
    ///
    /// # Errors
    ///
    /// Returns `ViewBaseError::Database` on execution failure.
    async fn execute_procedure(
        &self,
        function_name: &str,
        params: &[serde_json::Value],
    ) -> Result<Vec<JsonbValue>>;

    /// Get database type (for logging/metrics).
    ///
    /// Used to identify which database backend is in use.
    fn database_type(&self) -> DatabaseType;

    /// Health check - verify database connectivity.
    ///
    /// Executes a simple query (e.g., `SELECT 1`) to verify the database is reachable.
    ///
    /// # Errors
    ///
    /// Returns `ViewBaseError::Database` if health check fails.
    async fn health_check(&self) -> Result<()>;

    /// Get connection pool metrics.
    ///
    /// Returns current statistics about the connection pool:
    /// - Total connections
    /// - Idle connections
    /// - Active connections
    /// - Waiting requests
    fn pool_metrics(&self) -> PoolMetrics;

    /// Execute a WHERE query with a database-specific projection pushed into
    /// the `SELECT` list instead of projected after the fact.
    ///
    /// Adapters that can generate a native JSON-object projection (e.g.
    /// MySQL's `JSON_OBJECT`) override this; the default falls back to
    /// [`Self::execute_where_query`] and ignores `projection`.
    ///
    /// # Errors
    ///
    /// Returns `ViewBaseError::Database` on query execution failure.
    async fn execute_with_projection(
        &self,
        view: &str,
        _projection: Option<&SqlProjectionHint>,
        where_clause: Option<&WhereClause>,
        limit: Option<u32>,
    ) -> Result<Vec<JsonbValue>> {
        self.execute_where_query(view, where_clause, limit, None).await
    }

    /// Execute an arbitrary SQL statement and return every column of every
    /// row, keyed by column name.
    ///
    /// This is an escape hatch for diagnostics and schema introspection
    /// helpers that need more than the `data` column `execute_where_query`
    /// returns. Adapters without a generic row decoder may leave this
    /// unimplemented; the default reports the operation as unsupported.
    ///
    /// # Errors
    ///
    /// Returns `ViewBaseError::Internal` when the adapter has no generic raw
    /// query support, or `ViewBaseError::Database` on execution failure.
    async fn execute_raw_query(&self, _sql: &str) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        Err(ViewBaseError::Internal {
            message: "execute_raw_query is not supported by this adapter".to_string(),
            source:  None,
        })
    }
}
