//! Query pattern matching - matches incoming GraphQL queries to compiled templates.

use crate::db::where_clause::WhereClause;
use crate::error::{Result, ViewBaseError};
use crate::graphql::parser::parse_query;
use crate::graphql::types::{FieldSelection, GraphQLArgument};
use crate::schema::{CompiledSchema, QueryDefinition};
use std::collections::HashMap;

/// A matched query with extracted information.
#[derive(Debug, Clone)]
pub struct QueryMatch {
    /// The matched query definition from compiled schema.
    pub query_def: QueryDefinition,

    /// Requested fields (selection set response keys).
    pub fields: Vec<String>,

    /// Query arguments, coerced to JSON and with variables substituted.
    pub arguments: HashMap<String, serde_json::Value>,

    /// Query operation name (if provided).
    pub operation_name: Option<String>,

    /// Parsed `where:` argument, if the root field declared one.
    pub where_clause: Option<WhereClause>,
}

/// Query pattern matcher.
///
/// Matches incoming GraphQL queries against the compiled schema to determine
/// which pre-compiled SQL template to execute. Parsing is delegated to
/// [`crate::graphql::parser`], which wraps the `graphql-parser` crate —
/// nothing here hand-parses GraphQL syntax.
pub struct QueryMatcher {
    schema: CompiledSchema,
}

impl QueryMatcher {
    /// Create new query matcher.
    #[must_use]
    pub fn new(schema: CompiledSchema) -> Self {
        Self { schema }
    }

    /// Match a GraphQL query to a compiled template.
    ///
    /// # Arguments
    ///
    /// * `query` - GraphQL query string
    /// * `variables` - Query variables (optional)
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Query syntax is invalid
    /// - Query references undefined operation
    /// - The root field's `where:` argument does not match the `WhereInput` shape
    pub fn match_query(
        &self,
        query: &str,
        variables: Option<&serde_json::Value>,
    ) -> Result<QueryMatch> {
        let parsed = parse_query(query, None).map_err(|e| ViewBaseError::Parse {
            message: e.to_string(),
            location: "query".to_string(),
        })?;

        let root = parsed
            .selections
            .first()
            .ok_or_else(|| ViewBaseError::Parse {
                message: "query has no root field selection".to_string(),
                location: "query".to_string(),
            })?;

        let query_def = self
            .schema
            .find_query(&root.name)
            .ok_or_else(|| ViewBaseError::Validation {
                message: format!("Query '{}' not found in schema", root.name),
                path: None,
            })?
            .clone();

        let fields = Self::extract_fields(root);
        let arguments = self.extract_arguments(root, variables)?;

        let where_clause = arguments
            .get("where")
            .map(WhereClause::from_where_input)
            .transpose()?;

        Ok(QueryMatch {
            query_def,
            fields,
            arguments,
            operation_name: parsed.operation_name,
            where_clause,
        })
    }

    /// Collect the response keys of the root field's immediate selection set.
    fn extract_fields(root: &FieldSelection) -> Vec<String> {
        root.nested_fields
            .iter()
            .map(|f| f.response_key().to_string())
            .collect()
    }

    /// Coerce each root-field argument to JSON, resolving `$variable`
    /// references against the supplied variables map.
    fn extract_arguments(
        &self,
        root: &FieldSelection,
        variables: Option<&serde_json::Value>,
    ) -> Result<HashMap<String, serde_json::Value>> {
        let mut out = HashMap::with_capacity(root.arguments.len());
        for arg in &root.arguments {
            let value = Self::decode_argument(arg)?;
            let resolved = Self::resolve_variables(&value, variables);
            out.insert(arg.name.clone(), resolved);
        }
        Ok(out)
    }

    fn decode_argument(arg: &GraphQLArgument) -> Result<serde_json::Value> {
        serde_json::from_str(&arg.value_json).map_err(|e| ViewBaseError::Parse {
            message: format!("argument '{}' is not valid JSON: {e}", arg.name),
            location: "query".to_string(),
        })
    }

    /// Walk a decoded argument value, replacing every `{"$var": name}`
    /// marker (the encoding `graphql::parser` uses for GraphQL variable
    /// references) with the variable's bound value.
    fn resolve_variables(
        value: &serde_json::Value,
        variables: Option<&serde_json::Value>,
    ) -> serde_json::Value {
        match value {
            serde_json::Value::Object(map) => {
                if map.len() == 1 {
                    if let Some(serde_json::Value::String(name)) = map.get("$var") {
                        return variables
                            .and_then(|v| v.get(name))
                            .cloned()
                            .unwrap_or(serde_json::Value::Null);
                    }
                }
                serde_json::Value::Object(
                    map.iter()
                        .map(|(k, v)| (k.clone(), Self::resolve_variables(v, variables)))
                        .collect(),
                )
            }
            serde_json::Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|v| Self::resolve_variables(v, variables))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Get the compiled schema.
    #[must_use]
    pub const fn schema(&self) -> &CompiledSchema {
        &self.schema
    }
}
