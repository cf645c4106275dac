//! PostgreSQL database adapter implementation.

use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::{NoTls, Row};
use tokio_postgres::types::Type as PgType;

use crate::error::{ViewBaseError, Result};
use crate::db::traits::DatabaseAdapter;
use crate::db::types::{DatabaseType, JsonbValue, PoolMetrics};
use crate::db::where_clause::WhereClause;
use super::where_generator::PostgresWhereGenerator;

/// PostgreSQL database adapter with connection pooling.
///
/// Uses `deadpool-postgres` for connection pooling and `tokio-postgres` for async queries.
///
/// # Example
///
/// ```rust,no_run
/// use viewbase_core::db::postgres::PostgresAdapter;
/// use viewbase_core::db::{DatabaseAdapter, WhereClause, WhereOperator};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Create adapter with connection string
/// let adapter = PostgresAdapter::new("postgresql://localhost/mydb").await?;
///
/// // Execute query
/// let where_clause = WhereClause::Field {
///     path: vec!["email".to_string()],
///     operator: WhereOperator::Icontains,
///     value: json!("example.com"),
/// };
///
/// let results = adapter
///     .execute_where_query("v_user", Some(&where_clause), Some(10), None)
///     .await?;
///
/// println!("Found {} users", results.len());
/// # Ok(())
/// # }
/// ```
pub struct PostgresAdapter {
    pool: Pool,
}

impl PostgresAdapter {
    /// Create new PostgreSQL adapter with default pool configuration.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - PostgreSQL connection string (e.g., "postgresql://localhost/mydb")
    ///
    /// # Errors
    ///
    /// Returns `ViewBaseError::ConnectionPool` if pool creation fails.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use viewbase_core::db::postgres::PostgresAdapter;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let adapter = PostgresAdapter::new("postgresql://localhost/mydb").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(connection_string: &str) -> Result<Self> {
        Self::with_pool_size(connection_string, 10).await
    }

    /// Create new PostgreSQL adapter with custom pool size.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - PostgreSQL connection string
    /// * `max_size` - Maximum number of connections in pool
    ///
    /// # Errors
    ///
    /// Returns `ViewBaseError::ConnectionPool` if pool creation fails.
    pub async fn with_pool_size(connection_string: &str, max_size: usize) -> Result<Self> {
        let mut cfg = Config::new();
        cfg.url = Some(connection_string.to_string());
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        cfg.pool = Some(deadpool_postgres::PoolConfig::new(max_size));

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| {
                ViewBaseError::ConnectionPool {
                    message: format!("Failed to create connection pool: {e}"),
                }
            })?;

        // Test connection
        let client = pool.get().await.map_err(|e| {
            ViewBaseError::ConnectionPool {
                message: format!("Failed to acquire connection: {e}"),
            }
        })?;

        client.query("SELECT 1", &[]).await.map_err(|e| {
            ViewBaseError::Database {
                message: format!("Failed to connect to database: {e}"),
                sql_state: e.code().map(|c| c.code().to_string()),
            }
        })?;

        Ok(Self { pool })
    }

    /// Execute raw SQL query and return JSONB rows.
    ///
    /// # Errors
    ///
    /// Returns `ViewBaseError::Database` on query execution failure.
    async fn execute_raw(&self, sql: &str, params: &[&(dyn tokio_postgres::types::ToSql + Sync)]) -> Result<Vec<JsonbValue>> {
        let client = self.pool.get().await.map_err(|e| {
            ViewBaseError::ConnectionPool {
                message: format!("Failed to acquire connection: {e}"),
            }
        })?;

        let rows: Vec<Row> = client.query(sql, params).await.map_err(|e| {
            ViewBaseError::Database {
                message: format!("Query execution failed: {e}"),
                sql_state: e.code().map(|c| c.code().to_string()),
            }
        })?;

        let results = rows
            .into_iter()
            .map(|row| {
                let data: serde_json::Value = row.get(0);
                JsonbValue::new(data)
            })
            .collect();

        Ok(results)
    }

    /// Convert a `Row` with arbitrary columns into a single JSON object keyed
    /// by column name, used for stored-procedure result rows where the
    /// shape isn't known to be a single `data` column.
    fn row_to_json_object(row: &Row) -> serde_json::Value {
        let mut obj = serde_json::Map::with_capacity(row.columns().len());
        for (idx, column) in row.columns().iter().enumerate() {
            let value = match *column.type_() {
                PgType::JSON | PgType::JSONB => row
                    .try_get::<_, Option<serde_json::Value>>(idx)
                    .unwrap_or_default()
                    .unwrap_or(serde_json::Value::Null),
                PgType::BOOL => row
                    .try_get::<_, Option<bool>>(idx)
                    .unwrap_or_default()
                    .map_or(serde_json::Value::Null, serde_json::Value::from),
                PgType::INT2 => row
                    .try_get::<_, Option<i16>>(idx)
                    .unwrap_or_default()
                    .map_or(serde_json::Value::Null, serde_json::Value::from),
                PgType::INT4 => row
                    .try_get::<_, Option<i32>>(idx)
                    .unwrap_or_default()
                    .map_or(serde_json::Value::Null, serde_json::Value::from),
                PgType::INT8 => row
                    .try_get::<_, Option<i64>>(idx)
                    .unwrap_or_default()
                    .map_or(serde_json::Value::Null, serde_json::Value::from),
                PgType::FLOAT4 => row
                    .try_get::<_, Option<f32>>(idx)
                    .unwrap_or_default()
                    .map_or(serde_json::Value::Null, |f| {
                        serde_json::Number::from_f64(f64::from(f))
                            .map_or(serde_json::Value::Null, serde_json::Value::Number)
                    }),
                PgType::FLOAT8 => row
                    .try_get::<_, Option<f64>>(idx)
                    .unwrap_or_default()
                    .map_or(serde_json::Value::Null, |f| {
                        serde_json::Number::from_f64(f)
                            .map_or(serde_json::Value::Null, serde_json::Value::Number)
                    }),
                PgType::UUID => row
                    .try_get::<_, Option<uuid::Uuid>>(idx)
                    .unwrap_or_default()
                    .map_or(serde_json::Value::Null, |u| {
                        serde_json::Value::String(u.to_string())
                    }),
                PgType::TIMESTAMP | PgType::TIMESTAMPTZ => row
                    .try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(idx)
                    .unwrap_or_default()
                    .map_or(serde_json::Value::Null, |dt| {
                        serde_json::Value::String(dt.to_rfc3339())
                    }),
                _ => row
                    .try_get::<_, Option<String>>(idx)
                    .unwrap_or_default()
                    .map_or(serde_json::Value::Null, serde_json::Value::String),
            };
            obj.insert(column.name().to_string(), value);
        }
        serde_json::Value::Object(obj)
    }
}

#[async_trait]
impl DatabaseAdapter for PostgresAdapter {
    async fn execute_where_query(
        &self,
        view: &str,
        where_clause: Option<&WhereClause>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<JsonbValue>> {
        // Build base query
        let mut sql = format!("SELECT data FROM {view}");
        let mut params: Vec<serde_json::Value> = Vec::new();

        // Add WHERE clause if present
        if let Some(clause) = where_clause {
            let generator = PostgresWhereGenerator::new();
            let (where_sql, where_params) = generator.generate(clause)?;
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
            params.extend(where_params);
        }

        // Add LIMIT
        if let Some(lim) = limit {
            sql.push_str(&format!(" LIMIT {lim}"));
        }

        // Add OFFSET
        if let Some(off) = offset {
            sql.push_str(&format!(" OFFSET {off}"));
        }

        // Convert params to references for execute_raw
        // serde_json::Value implements ToSql, so we can pass references directly
        let param_refs: Vec<&(dyn tokio_postgres::types::ToSql + Sync)> = params
            .iter()
            .map(|p| p as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect();

        self.execute_raw(&sql, &param_refs).await
    }

    async fn execute_procedure(
        &self,
        function_name: &str,
        params: &[serde_json::Value],
    ) -> Result<Vec<JsonbValue>> {
        let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("${i}")).collect();
        let sql = format!("SELECT * FROM {function_name}({})", placeholders.join(", "));

        let param_refs: Vec<&(dyn tokio_postgres::types::ToSql + Sync)> = params
            .iter()
            .map(|p| p as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect();

        let client = self.pool.get().await.map_err(|e| ViewBaseError::ConnectionPool {
            message: format!("Failed to acquire connection: {e}"),
        })?;

        let rows: Vec<Row> = client.query(&sql, &param_refs).await.map_err(|e| {
            ViewBaseError::Database {
                message: format!("Stored procedure call failed: {e}"),
                sql_state: e.code().map(|c| c.code().to_string()),
            }
        })?;

        Ok(rows
            .iter()
            .map(|row| JsonbValue::new(Self::row_to_json_object(row)))
            .collect())
    }

    fn database_type(&self) -> DatabaseType {
        DatabaseType::PostgreSQL
    }

    async fn health_check(&self) -> Result<()> {
        let client = self.pool.get().await.map_err(|e| {
            ViewBaseError::ConnectionPool {
                message: format!("Failed to acquire connection: {e}"),
            }
        })?;

        client.query("SELECT 1", &[]).await.map_err(|e| {
            ViewBaseError::Database {
                message: format!("Health check failed: {e}"),
                sql_state: e.code().map(|c| c.code().to_string()),
            }
        })?;

        Ok(())
    }

    fn pool_metrics(&self) -> PoolMetrics {
        let status = self.pool.status();

        PoolMetrics {
            total_connections: status.size as u32,
            idle_connections: status.available as u32,
            active_connections: (status.size - status.available) as u32,
            waiting_requests: status.waiting as u32,
        }
    }
}
