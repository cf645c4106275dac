//! SQL template generator - lowers IR to database-specific SQL.
//!
//! # Overview
//!
//! Transforms validated IR into SQL templates for each query/mutation.
//! Queries are lowered to a `SELECT` skeleton over their bound view/table
//! with placeholders for whichever auto-wired parameters the query declared
//! (`where`/`order_by`/`limit`/`offset`). Mutations are lowered to a single
//! stored-procedure call (`SELECT * FROM fn_<name>(...)`) - every mutation
//! in this engine dispatches through a database function, never through
//! hand-assembled `INSERT`/`UPDATE`/`DELETE` text.
//!
//! The placeholders here (`{where}`, `$1`, ...) are filled in by the query
//! translator and mutation dispatcher at request time; this phase only
//! fixes their shape and position.

use super::ir::{AuthoringIR, IRMutation, IRQuery};
use crate::error::Result;
use crate::utils::casing::to_snake_case;

/// Database target for SQL generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseTarget {
    /// PostgreSQL database.
    PostgreSQL,
    /// MySQL database.
    MySQL,
    /// SQLite database.
    SQLite,
    /// SQL Server database.
    SQLServer,
}

/// SQL template for a query/mutation.
#[derive(Debug, Clone)]
pub struct SqlTemplate {
    /// Template name (query/mutation name).
    pub name: String,
    /// SQL template with placeholders.
    pub template: String,
    /// Parameter names, in the order they appear in the template.
    pub parameters: Vec<String>,
}

/// SQL template generator.
pub struct SqlTemplateGenerator {
    target: DatabaseTarget,
}

impl SqlTemplateGenerator {
    /// Create new SQL template generator.
    #[must_use]
    pub fn new(target: DatabaseTarget) -> Self {
        Self { target }
    }

    /// Generate SQL templates from IR.
    ///
    /// # Arguments
    ///
    /// * `ir` - Validated IR
    ///
    /// # Returns
    ///
    /// SQL templates for all queries/mutations
    ///
    /// # Errors
    ///
    /// Returns error if SQL generation fails.
    pub fn generate(&self, ir: &AuthoringIR) -> Result<Vec<SqlTemplate>> {
        let mut templates = Vec::with_capacity(ir.queries.len() + ir.mutations.len());

        for query in &ir.queries {
            if let Some(template) = self.query_template(query) {
                templates.push(template);
            }
        }

        for mutation in &ir.mutations {
            templates.push(self.mutation_template(mutation));
        }

        Ok(templates)
    }

    /// Lower a single query to a `SELECT` skeleton.
    ///
    /// Queries without a bound `sql_source` (e.g. ones resolved entirely by
    /// a downstream resolver) produce no template.
    fn query_template(&self, query: &IRQuery) -> Option<SqlTemplate> {
        let sql_source = query.sql_source.as_deref()?;

        let mut sql = format!("SELECT data FROM {sql_source}");
        let mut parameters = Vec::new();

        if query.auto_params.has_where {
            sql.push_str(" WHERE {where}");
            parameters.push("where".to_string());
        }
        if query.auto_params.has_order_by {
            sql.push_str(" ORDER BY {order_by}");
            parameters.push("order_by".to_string());
        }
        if query.auto_params.has_limit {
            sql.push_str(&format!(" LIMIT {}", self.placeholder(parameters.len() + 1)));
            parameters.push("limit".to_string());
        }
        if query.auto_params.has_offset {
            sql.push_str(&format!(" OFFSET {}", self.placeholder(parameters.len() + 1)));
            parameters.push("offset".to_string());
        }

        parameters.extend(query.arguments.iter().map(|arg| arg.name.clone()));

        Some(SqlTemplate {
            name: query.name.clone(),
            template: sql,
            parameters,
        })
    }

    /// Lower a mutation to its stored-procedure call. Every mutation
    /// argument becomes one positional parameter, in declaration order.
    fn mutation_template(&self, mutation: &IRMutation) -> SqlTemplate {
        let function_name = format!("fn_{}", to_snake_case(&mutation.name));
        let placeholders: Vec<String> = (1..=mutation.arguments.len())
            .map(|i| self.placeholder(i))
            .collect();

        SqlTemplate {
            name: mutation.name.clone(),
            template: format!("SELECT * FROM {function_name}({})", placeholders.join(", ")),
            parameters: mutation.arguments.iter().map(|arg| arg.name.clone()).collect(),
        }
    }

    /// Render a positional parameter placeholder for this target's dialect.
    fn placeholder(&self, position: usize) -> String {
        match self.target {
            DatabaseTarget::PostgreSQL => format!("${position}"),
            DatabaseTarget::MySQL | DatabaseTarget::SQLite | DatabaseTarget::SQLServer => "?".to_string(),
        }
    }

    /// Get database target.
    #[must_use]
    pub const fn target(&self) -> DatabaseTarget {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::ir::{AutoParams, IRArgument, MutationOperation};

    #[test]
    fn test_sql_template_generator_new() {
        let generator = SqlTemplateGenerator::new(DatabaseTarget::PostgreSQL);
        assert_eq!(generator.target(), DatabaseTarget::PostgreSQL);
    }

    #[test]
    fn test_database_target_equality() {
        assert_eq!(DatabaseTarget::PostgreSQL, DatabaseTarget::PostgreSQL);
        assert_ne!(DatabaseTarget::PostgreSQL, DatabaseTarget::MySQL);
    }

    #[test]
    fn test_query_with_no_sql_source_is_skipped() {
        let generator = SqlTemplateGenerator::new(DatabaseTarget::PostgreSQL);
        let query = IRQuery {
            name: "computed".to_string(),
            return_type: "Int".to_string(),
            returns_list: false,
            nullable: false,
            arguments: vec![],
            sql_source: None,
            description: None,
            auto_params: AutoParams::default(),
        };
        assert!(generator.query_template(&query).is_none());
    }

    #[test]
    fn test_query_template_honors_auto_params() {
        let generator = SqlTemplateGenerator::new(DatabaseTarget::PostgreSQL);
        let query = IRQuery {
            name: "users".to_string(),
            return_type: "User".to_string(),
            returns_list: true,
            nullable: false,
            arguments: vec![],
            sql_source: Some("v_user".to_string()),
            description: None,
            auto_params: AutoParams {
                has_where: true,
                has_order_by: false,
                has_limit: true,
                has_offset: true,
            },
        };

        let template = generator.query_template(&query).unwrap();
        assert_eq!(template.template, "SELECT data FROM v_user WHERE {where} LIMIT $2 OFFSET $3");
        assert_eq!(template.parameters, vec!["where", "limit", "offset"]);
    }

    #[test]
    fn test_mutation_template_calls_stored_procedure() {
        let generator = SqlTemplateGenerator::new(DatabaseTarget::PostgreSQL);
        let mutation = IRMutation {
            name: "createUser".to_string(),
            return_type: "User".to_string(),
            nullable: false,
            arguments: vec![IRArgument {
                name: "input".to_string(),
                arg_type: "CreateUserInput!".to_string(),
                nullable: false,
                default_value: None,
                description: None,
            }],
            description: None,
            operation: MutationOperation::Create,
        };

        let template = generator.mutation_template(&mutation);
        assert_eq!(template.template, "SELECT * FROM fn_create_user($1)");
        assert_eq!(template.parameters, vec!["input"]);
    }

    #[test]
    fn test_mutation_template_on_non_postgres_uses_question_mark() {
        let generator = SqlTemplateGenerator::new(DatabaseTarget::MySQL);
        let mutation = IRMutation {
            name: "deletePost".to_string(),
            return_type: "Boolean".to_string(),
            nullable: false,
            arguments: vec![IRArgument {
                name: "id".to_string(),
                arg_type: "ID!".to_string(),
                nullable: false,
                default_value: None,
                description: None,
            }],
            description: None,
            operation: MutationOperation::Delete,
        };

        let template = generator.mutation_template(&mutation);
        assert_eq!(template.template, "SELECT * FROM fn_delete_post(?)");
    }
}
