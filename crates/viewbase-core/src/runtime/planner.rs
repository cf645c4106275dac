//! Query plan selection - turns a matched query into a concrete execution plan.

use super::matcher::QueryMatch;
use crate::db::where_clause::WhereClause;
use crate::error::Result;

/// Execution plan for a query.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    /// View/table to select from.
    pub sql_source: String,

    /// WHERE clause to conjoin with auth/tenant predicates at execution time.
    pub where_clause: Option<WhereClause>,

    /// Row cap, from the `limit:` argument (if the query declares `has_limit`).
    pub limit: Option<u32>,

    /// Row skip, from the `offset:` argument (if the query declares `has_offset`).
    pub offset: Option<u32>,

    /// Whether this plan uses a cached result.
    pub is_cached: bool,

    /// Estimated cost (for optimization / complexity budgeting).
    pub estimated_cost: usize,

    /// Fields to project from the JSONB result.
    pub projection_fields: Vec<String>,
}

/// Query planner - selects optimal execution strategy.
pub struct QueryPlanner {
    /// Enable query plan caching.
    cache_enabled: bool,
}

impl QueryPlanner {
    /// Create new query planner.
    #[must_use]
    pub fn new(cache_enabled: bool) -> Self {
        Self { cache_enabled }
    }

    /// Create an execution plan for a matched query.
    ///
    /// # Errors
    ///
    /// Returns error if the query has no SQL source bound, or if a declared
    /// `limit`/`offset` argument is not a non-negative integer.
    pub fn plan(&self, query_match: &QueryMatch) -> Result<ExecutionPlan> {
        let sql_source = query_match
            .query_def
            .sql_source
            .clone()
            .ok_or_else(|| crate::error::ViewBaseError::Validation {
                message: format!(
                    "query '{}' has no bound view/table",
                    query_match.query_def.name
                ),
                path: None,
            })?;

        let limit = Self::extract_u32(query_match, "limit")?;
        let offset = Self::extract_u32(query_match, "offset")?;
        let projection_fields = query_match.fields.clone();

        Ok(ExecutionPlan {
            sql_source,
            where_clause: query_match.where_clause.clone(),
            limit,
            offset,
            is_cached: false,
            estimated_cost: self.estimate_cost(query_match),
            projection_fields,
        })
    }

    fn extract_u32(query_match: &QueryMatch, name: &str) -> Result<Option<u32>> {
        match query_match.arguments.get(name) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| crate::error::ViewBaseError::Validation {
                    message: format!("argument '{name}' must be a non-negative integer"),
                    path: None,
                }),
        }
    }

    /// Estimate query cost (for optimization/complexity budgeting).
    fn estimate_cost(&self, query_match: &QueryMatch) -> usize {
        let base_cost = 100;
        let field_cost = query_match.fields.len() * 10;
        let arg_cost = query_match.arguments.len() * 5;
        let filter_cost = query_match
            .where_clause
            .as_ref()
            .map_or(0, Self::where_clause_cost);

        base_cost + field_cost + arg_cost + filter_cost
    }

    fn where_clause_cost(clause: &WhereClause) -> usize {
        match clause {
            WhereClause::Field { .. } => 15,
            WhereClause::Not(inner) => 5 + Self::where_clause_cost(inner),
            WhereClause::And(children) | WhereClause::Or(children) => {
                5 + children.iter().map(Self::where_clause_cost).sum::<usize>()
            }
        }
    }

    /// Check if caching is enabled.
    #[must_use]
    pub const fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::where_clause::WhereOperator;
    use crate::schema::{AutoParams, QueryDefinition};
    use std::collections::HashMap;

    fn test_query_match() -> QueryMatch {
        QueryMatch {
            query_def: QueryDefinition {
                name: "users".to_string(),
                return_type: "User".to_string(),
                returns_list: true,
                nullable: false,
                arguments: Vec::new(),
                sql_source: Some("v_user".to_string()),
                description: None,
                auto_params: AutoParams::default(),
            },
            fields: vec!["id".to_string(), "name".to_string()],
            arguments: HashMap::new(),
            operation_name: Some("users".to_string()),
            where_clause: None,
        }
    }

    #[test]
    fn test_planner_new() {
        let planner = QueryPlanner::new(true);
        assert!(planner.cache_enabled());

        let planner = QueryPlanner::new(false);
        assert!(!planner.cache_enabled());
    }

    #[test]
    fn test_plan_sql_source_and_projection() {
        let planner = QueryPlanner::new(true);
        let query_match = test_query_match();

        let plan = planner.plan(&query_match).unwrap();
        assert_eq!(plan.sql_source, "v_user");
        assert_eq!(plan.projection_fields.len(), 2);
        assert!(!plan.is_cached);
        assert!(plan.limit.is_none());
        assert!(plan.offset.is_none());
    }

    #[test]
    fn test_plan_extracts_limit_and_offset() {
        let planner = QueryPlanner::new(true);
        let mut query_match = test_query_match();
        query_match
            .arguments
            .insert("limit".to_string(), serde_json::json!(10));
        query_match
            .arguments
            .insert("offset".to_string(), serde_json::json!(20));

        let plan = planner.plan(&query_match).unwrap();
        assert_eq!(plan.limit, Some(10));
        assert_eq!(plan.offset, Some(20));
    }

    #[test]
    fn test_plan_rejects_missing_sql_source() {
        let planner = QueryPlanner::new(true);
        let mut query_match = test_query_match();
        query_match.query_def.sql_source = None;

        assert!(planner.plan(&query_match).is_err());
    }

    #[test]
    fn test_estimate_cost_scales_with_fields_args_and_filters() {
        let planner = QueryPlanner::new(true);
        let query_match = test_query_match();

        // base (100) + 2 fields (20) + 0 args (0) = 120
        assert_eq!(planner.estimate_cost(&query_match), 120);

        let mut filtered = query_match.clone();
        filtered.where_clause = Some(WhereClause::And(vec![
            WhereClause::Field {
                path: vec!["category".to_string()],
                operator: WhereOperator::Eq,
                value: serde_json::json!("electronics"),
            },
            WhereClause::Field {
                path: vec!["price".to_string()],
                operator: WhereOperator::Lt,
                value: serde_json::json!(100),
            },
        ]));
        assert!(planner.estimate_cost(&filtered) > planner.estimate_cost(&query_match));
    }
}
