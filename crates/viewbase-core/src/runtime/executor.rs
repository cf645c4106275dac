//! Query executor - main runtime execution engine.

use crate::db::traits::DatabaseAdapter;
use crate::db::types::{DatabaseType, PoolMetrics};
use crate::db::where_clause::WhereClause;
use crate::error::{Result, ViewBaseError};
use crate::schema::CompiledSchema;
use crate::security::{RLSPolicy, SecurityContext};
use super::tenant_enforcer::TenantEnforcer;
use super::{QueryMatcher, QueryPlanner, ResultProjector, RuntimeConfig};
use std::sync::Arc;

/// Query executor - executes compiled GraphQL queries.
///
/// This is the main entry point for runtime query execution.
/// It coordinates matching, planning, execution, and projection.
pub struct Executor<A: DatabaseAdapter> {
    /// Compiled schema.
    schema: CompiledSchema,

    /// Database adapter.
    adapter: Arc<A>,

    /// Query matcher.
    matcher: QueryMatcher,

    /// Query planner.
    planner: QueryPlanner,

    /// Runtime configuration.
    config: RuntimeConfig,

    /// Row-level security policy, evaluated against the request's
    /// [`SecurityContext`] and conjoined into the plan's WHERE clause
    /// alongside tenant scope. `None` means no RLS predicate is added.
    rls_policy: Option<Arc<dyn RLSPolicy>>,
}

impl<A: DatabaseAdapter> Executor<A> {
    /// Create new executor.
    ///
    /// # Arguments
    ///
    /// * `schema` - Compiled schema
    /// * `adapter` - Database adapter
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let schema = CompiledSchema::from_json(schema_json)?;
    /// let adapter = PostgresAdapter::new(connection_string).await?;
    /// let executor = Executor::new(schema, Arc::new(adapter));
    /// ```
    #[must_use]
    pub fn new(schema: CompiledSchema, adapter: Arc<A>) -> Self {
        Self::with_config(schema, adapter, RuntimeConfig::default())
    }

    /// Create new executor with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `schema` - Compiled schema
    /// * `adapter` - Database adapter
    /// * `config` - Runtime configuration
    #[must_use]
    pub fn with_config(schema: CompiledSchema, adapter: Arc<A>, config: RuntimeConfig) -> Self {
        let matcher = QueryMatcher::new(schema.clone());
        let planner = QueryPlanner::new(config.cache_query_plans);

        Self {
            schema,
            adapter,
            matcher,
            planner,
            config,
            rls_policy: None,
        }
    }

    /// Attach a row-level security policy, evaluated per request against the
    /// auth context passed to `execute`/`execute_json` and conjoined into the
    /// plan's WHERE clause alongside tenant scope.
    #[must_use]
    pub fn with_rls_policy(mut self, policy: Arc<dyn RLSPolicy>) -> Self {
        self.rls_policy = Some(policy);
        self
    }

    /// Execute a GraphQL query.
    ///
    /// # Arguments
    ///
    /// * `query` - GraphQL query string
    /// * `variables` - Query variables (optional)
    /// * `auth_context` - Authenticated request context (optional). When
    ///   present, its row-level security predicate (if any policy is
    ///   configured) and tenant scope are conjoined into the query's WHERE
    ///   clause, and its scopes drive field-level masking of the response.
    ///
    /// # Returns
    ///
    /// GraphQL response as JSON string
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Query is malformed
    /// - Query references undefined operations
    /// - Database execution fails
    /// - Result projection fails
    /// - Tenant scope is required but no tenant is present on the auth context
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let query = r#"query { users { id name } }"#;
    /// let result = executor.execute(query, None, Some(&auth_context)).await?;
    /// println!("{}", result);
    /// ```
    pub async fn execute(
        &self,
        query: &str,
        variables: Option<&serde_json::Value>,
        auth_context: Option<&SecurityContext>,
    ) -> Result<String> {
        // 1. Match query to compiled template
        let query_match = self.matcher.match_query(query, variables)?;

        // 2. Create execution plan (view, WHERE tree, limit/offset)
        let mut plan = self.planner.plan(&query_match)?;

        // 2b. Conjoin the effective predicate `operation_where ∧
        // auth_row_predicate ∧ tenant_scope`. Both the RLS predicate and the
        // tenant filter are built as `WhereClause` nodes, so the value never
        // touches the SQL text — it flows through the adapter's parameter
        // vector exactly like a user-supplied `where:` value.
        if let Some(ctx) = auth_context {
            if let Some(policy) = &self.rls_policy {
                if let Some(rls_clause) = policy.evaluate(ctx, &query_match.query_def.return_type)? {
                    plan.where_clause = Some(match plan.where_clause.take() {
                        Some(existing) => WhereClause::And(vec![existing, rls_clause]),
                        None => rls_clause,
                    });
                }
            }

            let tenant_enforcer = TenantEnforcer::new(ctx.tenant_id.clone());
            plan.where_clause = tenant_enforcer
                .enforce_tenant_scope(plan.where_clause.as_ref())
                .map_err(|message| ViewBaseError::Validation { message, path: None })?;
        }

        // 3. Execute SQL query — one statement, WHERE compiled from the
        // `where:` argument by the adapter's target-specific generator.
        let results = self
            .adapter
            .execute_where_query(
                &plan.sql_source,
                plan.where_clause.as_ref(),
                plan.limit,
                plan.offset,
            )
            .await?;

        // 4. Project results
        let projector = ResultProjector::new(plan.projection_fields);
        let projected = projector.project_results(&results, query_match.query_def.returns_list)?;

        // 5. Apply field-level masking at response-assembly time, after
        // retrieval — masked fields become null with a `FIELD_MASKED` error
        // at their path; the database value never reaches the response.
        let scopes: &[String] = auth_context.map_or(&[][..], |ctx| ctx.scopes.as_slice());
        let (masked, mask_errors) = self.apply_field_masking(
            projected,
            &query_match.query_def.return_type,
            &query_match.query_def.name,
            query_match.query_def.returns_list,
            scopes,
        );

        // 6. Wrap in GraphQL data envelope
        let mut response = ResultProjector::wrap_in_data_envelope(
            masked,
            &query_match.query_def.name,
        );
        if !mask_errors.is_empty() {
            if let serde_json::Value::Object(ref mut map) = response {
                map.insert("errors".to_string(), serde_json::Value::Array(mask_errors));
            }
        }

        // 7. Serialize to JSON string
        Ok(serde_json::to_string(&response)?)
    }

    /// Execute a query and return parsed JSON.
    ///
    /// Same as `execute()` but returns parsed `serde_json::Value` instead of string.
    pub async fn execute_json(
        &self,
        query: &str,
        variables: Option<&serde_json::Value>,
        auth_context: Option<&SecurityContext>,
    ) -> Result<serde_json::Value> {
        let result_str = self.execute(query, variables, auth_context).await?;
        Ok(serde_json::from_str(&result_str)?)
    }

    /// Get the compiled schema.
    #[must_use]
    pub const fn schema(&self) -> &CompiledSchema {
        &self.schema
    }

    /// Get runtime configuration.
    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Null out fields the field filter denies for `scopes`, recording a
    /// `FIELD_MASKED` error at each field's response path. Masking is a
    /// response-assembly transformation, distinct from the RLS/tenant
    /// predicates applied at query time: the row is still fetched, only
    /// the denied field is hidden.
    fn apply_field_masking(
        &self,
        value: serde_json::Value,
        type_name: &str,
        query_name: &str,
        is_list: bool,
        scopes: &[String],
    ) -> (serde_json::Value, Vec<serde_json::Value>) {
        let mut errors = Vec::new();

        let masked = match value {
            serde_json::Value::Object(obj) if !is_list => {
                let base_path = vec![serde_json::Value::String(query_name.to_string())];
                serde_json::Value::Object(self.mask_object_fields(
                    obj,
                    type_name,
                    scopes,
                    &base_path,
                    &mut errors,
                ))
            }
            serde_json::Value::Array(items) if is_list => {
                let masked_items = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| match item {
                        serde_json::Value::Object(obj) => {
                            let base_path = vec![
                                serde_json::Value::String(query_name.to_string()),
                                serde_json::Value::Number(index.into()),
                            ];
                            serde_json::Value::Object(self.mask_object_fields(
                                obj,
                                type_name,
                                scopes,
                                &base_path,
                                &mut errors,
                            ))
                        }
                        other => other,
                    })
                    .collect();
                serde_json::Value::Array(masked_items)
            }
            other => other,
        };

        (masked, errors)
    }

    fn mask_object_fields(
        &self,
        mut obj: serde_json::Map<String, serde_json::Value>,
        type_name: &str,
        scopes: &[String],
        base_path: &[serde_json::Value],
        errors: &mut Vec<serde_json::Value>,
    ) -> serde_json::Map<String, serde_json::Value> {
        let fields: Vec<String> = obj.keys().cloned().collect();
        for field in fields {
            if field == "__typename" {
                continue;
            }
            let denied = self
                .config
                .field_filter
                .as_ref()
                .is_some_and(|filter| filter.can_access(type_name, &field, scopes).is_err());
            if denied {
                obj.insert(field.clone(), serde_json::Value::Null);
                let mut path = base_path.to_vec();
                path.push(serde_json::Value::String(field.clone()));
                errors.push(serde_json::json!({
                    "message": format!("Field '{field}' was masked by field-level access control"),
                    "path": path,
                    "extensions": { "code": "FIELD_MASKED" },
                }));
            }
        }
        obj
    }
}
