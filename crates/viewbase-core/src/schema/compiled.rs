//! Compiled schema types - pure Rust, no Python/TypeScript references.
//!
//! These types represent GraphQL schemas after compilation from authoring languages.
//! All data is owned by Rust - no `Py<T>` or foreign object references.
//!
//! # Schema Freeze Invariant
//!
//! After `CompiledSchema::from_json()`, the schema is frozen:
//! - All data is Rust-owned
//! - No Python/TypeScript callbacks
//! - No foreign object references
//! - Safe to use from any Tokio worker thread
//!
//! This enables the Axum server to handle requests without any
//! interaction with Python/TypeScript runtimes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::field_type::{FieldDefinition, FieldType};
use crate::validation::ValidationRule;

/// Complete compiled schema - all type information for serving.
///
/// This is the central type that holds the entire GraphQL schema
/// after compilation from Python/TypeScript decorators.
///
/// # Example
///
/// ```
/// use viewbase_core::schema::CompiledSchema;
///
/// let json = r#"{
///     "types": [],
///     "queries": [],
///     "mutations": [],
///     "subscriptions": []
/// }"#;
///
/// let schema = CompiledSchema::from_json(json).unwrap();
/// assert_eq!(schema.types.len(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledSchema {
    /// GraphQL object type definitions.
    #[serde(default)]
    pub types: Vec<TypeDefinition>,

    /// GraphQL enum type definitions.
    #[serde(default)]
    pub enums: Vec<EnumDefinition>,

    /// GraphQL input object type definitions.
    #[serde(default)]
    pub input_types: Vec<InputObjectDefinition>,

    /// GraphQL interface type definitions.
    #[serde(default)]
    pub interfaces: Vec<InterfaceDefinition>,

    /// GraphQL union type definitions.
    #[serde(default)]
    pub unions: Vec<UnionDefinition>,

    /// GraphQL query definitions.
    #[serde(default)]
    pub queries: Vec<QueryDefinition>,

    /// GraphQL mutation definitions.
    #[serde(default)]
    pub mutations: Vec<MutationDefinition>,

    /// GraphQL subscription definitions.
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionDefinition>,

    /// Custom directive definitions (beyond `@skip`/`@include`/`@deprecated`).
    #[serde(default)]
    pub directives: Vec<DirectiveDefinition>,

    /// Capability-manifest-derived fact tables keyed by database target
    /// (e.g. `"postgres"`), holding the raw operator/feature data used to
    /// drive WHERE-clause synthesis. Opaque to the schema itself; consumed
    /// by the filter compiler.
    #[serde(default)]
    pub fact_tables: HashMap<String, serde_json::Value>,
}

impl CompiledSchema {
    /// Create empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserialize from JSON string.
    ///
    /// This is the primary way to create a schema from Python/TypeScript.
    /// The authoring language compiles to JSON, Rust deserializes and owns it.
    ///
    /// # Errors
    ///
    /// Returns error if JSON is malformed or doesn't match schema structure.
    ///
    /// # Example
    ///
    /// ```
    /// use viewbase_core::schema::CompiledSchema;
    ///
    /// let json = r#"{"types": [], "queries": [], "mutations": [], "subscriptions": []}"#;
    /// let schema = CompiledSchema::from_json(json).unwrap();
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails (should not happen for valid schema).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty JSON string (for debugging/config files).
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Find a type definition by name.
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Find an enum definition by name.
    #[must_use]
    pub fn find_enum(&self, name: &str) -> Option<&EnumDefinition> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Find an input object definition by name.
    #[must_use]
    pub fn find_input_type(&self, name: &str) -> Option<&InputObjectDefinition> {
        self.input_types.iter().find(|i| i.name == name)
    }

    /// Find an interface definition by name.
    #[must_use]
    pub fn find_interface(&self, name: &str) -> Option<&InterfaceDefinition> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Find a union definition by name.
    #[must_use]
    pub fn find_union(&self, name: &str) -> Option<&UnionDefinition> {
        self.unions.iter().find(|u| u.name == name)
    }

    /// Find a query definition by name.
    #[must_use]
    pub fn find_query(&self, name: &str) -> Option<&QueryDefinition> {
        self.queries.iter().find(|q| q.name == name)
    }

    /// Find a mutation definition by name.
    #[must_use]
    pub fn find_mutation(&self, name: &str) -> Option<&MutationDefinition> {
        self.mutations.iter().find(|m| m.name == name)
    }

    /// Find a subscription definition by name.
    #[must_use]
    pub fn find_subscription(&self, name: &str) -> Option<&SubscriptionDefinition> {
        self.subscriptions.iter().find(|s| s.name == name)
    }

    /// Find every object type that declares it implements `interface_name`.
    ///
    /// Used by introspection to populate `possibleTypes` on an `INTERFACE`
    /// and by the dependency graph to compute implementation edges.
    #[must_use]
    pub fn find_implementors(&self, interface_name: &str) -> Vec<&TypeDefinition> {
        self.types
            .iter()
            .filter(|t| t.implements.iter().any(|i| i == interface_name))
            .collect()
    }

    /// Get total number of operations (queries + mutations + subscriptions).
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.queries.len() + self.mutations.len() + self.subscriptions.len()
    }

    /// Validate the schema for internal consistency.
    ///
    /// Checks:
    /// - All type references resolve to defined types
    /// - No duplicate type/operation names
    /// - Required fields have valid types
    ///
    /// # Errors
    ///
    /// Returns list of validation errors if schema is invalid.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        // Check for duplicate type names
        let mut type_names: std::collections::HashSet<&str> = std::collections::HashSet::new();
        for type_def in &self.types {
            if !type_names.insert(&type_def.name) {
                errors.push(format!("Duplicate type name: {}", type_def.name));
            }
        }

        // Check for duplicate query names
        let mut query_names: std::collections::HashSet<&str> = std::collections::HashSet::new();
        for query in &self.queries {
            if !query_names.insert(&query.name) {
                errors.push(format!("Duplicate query name: {}", query.name));
            }
        }

        // Check for duplicate mutation names
        let mut mutation_names: std::collections::HashSet<&str> = std::collections::HashSet::new();
        for mutation in &self.mutations {
            if !mutation_names.insert(&mutation.name) {
                errors.push(format!("Duplicate mutation name: {}", mutation.name));
            }
        }

        // Check type references in queries
        for query in &self.queries {
            if !type_names.contains(query.return_type.as_str())
                && !is_builtin_type(&query.return_type)
            {
                errors.push(format!(
                    "Query '{}' references undefined type '{}'",
                    query.name, query.return_type
                ));
            }
        }

        // Check type references in mutations
        for mutation in &self.mutations {
            if !type_names.contains(mutation.return_type.as_str())
                && !is_builtin_type(&mutation.return_type)
            {
                errors.push(format!(
                    "Mutation '{}' references undefined type '{}'",
                    mutation.name, mutation.return_type
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Check if a type name is a built-in scalar type.
fn is_builtin_type(name: &str) -> bool {
    matches!(
        name,
        "String"
            | "Int"
            | "Float"
            | "Boolean"
            | "ID"
            | "DateTime"
            | "Date"
            | "Time"
            | "JSON"
            | "UUID"
            | "Decimal"
    )
}

/// A GraphQL type definition compiled from `@viewbase.type`.
///
/// This represents a complete object type with its fields and database binding.
///
/// # Example
///
/// ```
/// use viewbase_core::schema::{TypeDefinition, FieldDefinition, FieldType};
///
/// let user_type = TypeDefinition {
///     name: "User".to_string(),
///     sql_source: "v_user".to_string(),
///     jsonb_column: "data".to_string(),
///     sql_projection_hint: None,
///     implements: vec![],
///     fields: vec![
///         FieldDefinition::new("id", FieldType::Id),
///         FieldDefinition::new("email", FieldType::String),
///     ],
///     description: Some("A user in the system".to_string()),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// GraphQL type name (e.g., "User").
    pub name: String,

    /// SQL source table/view (e.g., `v_user`).
    pub sql_source: String,

    /// JSONB column name (e.g., "data").
    #[serde(default = "default_jsonb_column")]
    pub jsonb_column: String,

    /// Optional description (from docstring).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Database-specific SELECT projection for this type, when the
    /// compiler has pre-rendered one (see `db::projection_generator`).
    /// `None` means adapters fall back to a plain `SELECT {jsonb_column}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_projection_hint: Option<SqlProjectionHint>,

    /// Names of interfaces this type declares it implements.
    #[serde(default)]
    pub implements: Vec<String>,

    /// Field definitions.
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

fn default_jsonb_column() -> String {
    "data".to_string()
}

impl TypeDefinition {
    /// Create a new type definition.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_source: sql_source.into(),
            jsonb_column: "data".to_string(),
            description: None,
            sql_projection_hint: None,
            implements: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Add a field to this type.
    #[must_use]
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the JSONB column name.
    #[must_use]
    pub fn with_jsonb_column(mut self, column: impl Into<String>) -> Self {
        self.jsonb_column = column.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Declare that this type implements an interface.
    #[must_use]
    pub fn implementing(mut self, interface_name: impl Into<String>) -> Self {
        self.implements.push(interface_name.into());
        self
    }

    /// Set the SQL projection hint.
    #[must_use]
    pub fn with_projection_hint(mut self, hint: SqlProjectionHint) -> Self {
        self.sql_projection_hint = Some(hint);
        self
    }

    /// Find a field by name.
    #[must_use]
    pub fn find_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A database-specific rendering of a type's SELECT projection.
///
/// Generated at compile time by one of `db::projection_generator`'s
/// per-target generators (`PostgresProjectionGenerator`,
/// `MySqlProjectionGenerator`, `SqliteProjectionGenerator`). Adapters that
/// can push a native JSON-object projection into the `SELECT` list (e.g.
/// MySQL's `JSON_OBJECT(...)`) use `projection_template` verbatim instead of
/// projecting the JSONB column after the fact.
///
/// # Example
///
/// ```
/// use viewbase_core::schema::SqlProjectionHint;
///
/// let hint = SqlProjectionHint::new("JSON_OBJECT('id', id, 'email', email)");
/// assert_eq!(hint.projection_template, "JSON_OBJECT('id', id, 'email', email)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlProjectionHint {
    /// The rendered SELECT-list fragment (no placeholders; column names
    /// only, never user values).
    pub projection_template: String,

    /// Columns referenced by `projection_template`, for cache-key and
    /// dependency bookkeeping.
    #[serde(default)]
    pub source_columns: Vec<String>,
}

impl SqlProjectionHint {
    /// Create a new projection hint with no tracked source columns.
    #[must_use]
    pub fn new(projection_template: impl Into<String>) -> Self {
        Self {
            projection_template: projection_template.into(),
            source_columns: Vec::new(),
        }
    }

    /// Record the columns this projection reads from.
    #[must_use]
    pub fn with_source_columns(mut self, columns: Vec<String>) -> Self {
        self.source_columns = columns;
        self
    }
}

/// A query definition compiled from `@viewbase.query`.
///
/// Queries are declarative bindings to database views/tables.
/// They describe *what* to fetch, not *how* to fetch it.
///
/// # Example
///
/// ```
/// use viewbase_core::schema::{QueryDefinition, AutoParams};
///
/// let query = QueryDefinition {
///     name: "users".to_string(),
///     return_type: "User".to_string(),
///     returns_list: true,
///     nullable: false,
///     arguments: vec![],
///     sql_source: Some("v_user".to_string()),
///     description: Some("Get all users".to_string()),
///     auto_params: AutoParams::default(),
///     deprecation: None,
///     jsonb_column: "data".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDefinition {
    /// Query name (e.g., "users").
    pub name: String,

    /// Return type name (e.g., "User").
    pub return_type: String,

    /// Does this query return a list?
    #[serde(default)]
    pub returns_list: bool,

    /// Is the return value nullable?
    #[serde(default)]
    pub nullable: bool,

    /// Query arguments.
    #[serde(default)]
    pub arguments: Vec<ArgumentDefinition>,

    /// SQL source table/view (for direct table queries).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_source: Option<String>,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Auto-wired parameters (where, orderBy, limit, offset).
    #[serde(default)]
    pub auto_params: AutoParams,

    /// Deprecation information (from @deprecated directive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<super::field_type::DeprecationInfo>,

    /// JSONB column the returned rows project from (e.g., "data").
    #[serde(default = "default_jsonb_column")]
    pub jsonb_column: String,
}

impl QueryDefinition {
    /// Create a new query definition.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            returns_list: false,
            nullable: false,
            arguments: Vec::new(),
            sql_source: None,
            description: None,
            auto_params: AutoParams::default(),
            deprecation: None,
            jsonb_column: default_jsonb_column(),
        }
    }

    /// Set this query to return a list.
    #[must_use]
    pub fn returning_list(mut self) -> Self {
        self.returns_list = true;
        self
    }

    /// Set the SQL source.
    #[must_use]
    pub fn with_sql_source(mut self, source: impl Into<String>) -> Self {
        self.sql_source = Some(source.into());
        self
    }

    /// Mark this query as deprecated.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<String>) -> Self {
        self.deprecation = Some(super::field_type::DeprecationInfo { reason });
        self
    }

    /// Check if this query is deprecated.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }

    /// Get the deprecation reason if deprecated.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation.as_ref().and_then(|d| d.reason.as_deref())
    }
}

/// A mutation definition compiled from `@viewbase.mutation`.
///
/// Mutations are declarative bindings to database functions.
/// They describe *which function* to call, not arbitrary logic.
///
/// # Example
///
/// ```
/// use viewbase_core::schema::{MutationDefinition, MutationOperation};
///
/// let mutation = MutationDefinition {
///     name: "createUser".to_string(),
///     return_type: "User".to_string(),
///     arguments: vec![],
///     description: Some("Create a new user".to_string()),
///     operation: MutationOperation::Insert { table: "users".to_string() },
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationDefinition {
    /// Mutation name (e.g., "createUser").
    pub name: String,

    /// Return type name.
    pub return_type: String,

    /// Input arguments.
    #[serde(default)]
    pub arguments: Vec<ArgumentDefinition>,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// SQL operation type.
    #[serde(default)]
    pub operation: MutationOperation,
}

impl MutationDefinition {
    /// Create a new mutation definition.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            arguments: Vec::new(),
            description: None,
            operation: MutationOperation::default(),
        }
    }
}

/// Mutation operation types.
///
/// This enum describes what kind of database operation a mutation performs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MutationOperation {
    /// INSERT into a table.
    Insert {
        /// Target table name.
        table: String,
    },

    /// UPDATE a table.
    Update {
        /// Target table name.
        table: String,
    },

    /// DELETE from a table.
    Delete {
        /// Target table name.
        table: String,
    },

    /// Call a database function.
    Function {
        /// Function name.
        name: String,
    },

    /// Custom mutation (for complex operations).
    #[default]
    Custom,
}

/// A subscription definition.
///
/// Subscriptions are declarative bindings to event topics. The compiled
/// form is a projection of database change events (see
/// `runtime::subscription`), not a live resolver: `filter` narrows which
/// events reach a given subscriber without the core interpreting arbitrary
/// predicates at the GraphQL layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionDefinition {
    /// Subscription name.
    pub name: String,

    /// Return type name.
    pub return_type: String,

    /// Arguments.
    #[serde(default)]
    pub arguments: Vec<ArgumentDefinition>,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Event topic to subscribe to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// Deprecation information (from @deprecated directive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<super::field_type::DeprecationInfo>,

    /// Compiled WHERE-style filter applied to each event before it is
    /// delivered to subscribers of this subscription.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<SubscriptionFilter>,
}

impl SubscriptionDefinition {
    /// Create a new subscription definition.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            arguments: Vec::new(),
            description: None,
            topic: None,
            deprecation: None,
            filter: None,
        }
    }

    /// Set the event topic this subscription listens on.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Attach a compiled filter.
    #[must_use]
    pub fn with_filter(mut self, filter: SubscriptionFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Mark this subscription as deprecated.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<String>) -> Self {
        self.deprecation = Some(super::field_type::DeprecationInfo { reason });
        self
    }

    /// Check if this subscription is deprecated.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }

    /// Get the deprecation reason if deprecated.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation.as_ref().and_then(|d| d.reason.as_deref())
    }
}

/// A compiled WHERE-style predicate gating subscription event delivery.
///
/// Mirrors the query-side WHERE tree (`And`/`Or`/`Not`/leaf) but evaluates
/// against an in-memory event payload rather than being rendered to SQL -
/// events are already materialized JSON by the time a subscription matcher
/// sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SubscriptionFilter {
    /// All child filters must match.
    And {
        /// Child filters.
        children: Vec<SubscriptionFilter>,
    },
    /// At least one child filter must match.
    Or {
        /// Child filters.
        children: Vec<SubscriptionFilter>,
    },
    /// The child filter must not match.
    Not {
        /// Negated filter.
        child: Box<SubscriptionFilter>,
    },
    /// A single field comparison against the event's `data`/`old_data`.
    Field(StaticFilterCondition),
}

impl SubscriptionFilter {
    /// Build a simple single-field equality filter.
    #[must_use]
    pub fn field(condition: StaticFilterCondition) -> Self {
        Self::Field(condition)
    }

    /// Evaluate this filter against an event payload.
    ///
    /// Mirrors `WhereClause`'s tree semantics: an empty `And` matches
    /// everything, an empty `Or` matches nothing.
    #[must_use]
    pub fn matches(&self, data: &serde_json::Value) -> bool {
        match self {
            Self::And { children } => children.iter().all(|c| c.matches(data)),
            Self::Or { children } => children.iter().any(|c| c.matches(data)),
            Self::Not { child } => !child.matches(data),
            Self::Field(condition) => condition.matches(data),
        }
    }
}

/// A single leaf predicate in a `SubscriptionFilter` (or elsewhere, a static
/// fact-table condition), e.g. `status eq "shipped"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticFilterCondition {
    /// Dotted path into the event payload (e.g. `"status"`, `"customer.tier"`).
    pub path: String,

    /// Comparison operator.
    pub operator: FilterOperator,

    /// Comparison value.
    pub value: serde_json::Value,
}

impl StaticFilterCondition {
    /// Create a new field condition.
    #[must_use]
    pub fn new(path: impl Into<String>, operator: FilterOperator, value: serde_json::Value) -> Self {
        Self {
            path: path.into(),
            operator,
            value,
        }
    }

    /// Evaluate this condition against an event payload.
    ///
    /// A missing path matches only `IsNull` (against a `true` RHS); every
    /// other operator treats a missing field as non-matching rather than
    /// erroring, since subscription events are untyped JSON at this layer.
    #[must_use]
    pub fn matches(&self, data: &serde_json::Value) -> bool {
        let found = get_by_path(data, &self.path);

        if self.operator == FilterOperator::IsNull {
            let want_null = self.value.as_bool().unwrap_or(true);
            let is_null = found.map_or(true, serde_json::Value::is_null);
            return is_null == want_null;
        }

        let Some(actual) = found else { return false };
        self.operator.evaluate(actual, &self.value)
    }
}

fn get_by_path<'a>(value: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.get(segment))
}

/// Stable operator identifiers from the capability manifest.
///
/// These mirror the manifest's `OperatorId`s (e.g. `eq`, `ilike`,
/// `jsonb_contains`, `cidr_contained_by`) and are reused both by the WHERE
/// translator (rendered through the manifest's SQL templates) and by
/// in-memory subscription-filter evaluation (evaluated directly against a
/// `serde_json::Value`, no SQL involved).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// Equality.
    Eq,
    /// Inequality.
    Neq,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Membership in a list.
    In,
    /// Non-membership in a list.
    NotIn,
    /// Case-sensitive substring match.
    Contains,
    /// Case-insensitive substring match.
    Icontains,
    /// Case-insensitive equality/LIKE match.
    Ilike,
    /// Null check.
    IsNull,
    /// JSONB containment (`@>`).
    JsonbContains,
    /// Network address containment (`<<=`).
    CidrContainedBy,
    /// Vector cosine-distance threshold.
    VectorCosineLt,
}

impl FilterOperator {
    /// Evaluate `actual <op> expected` for in-memory subscription matching.
    ///
    /// `IsNull` is handled by the caller (it needs the "missing" case, not
    /// just the found value) and never reaches this function.
    #[must_use]
    fn evaluate(self, actual: &serde_json::Value, expected: &serde_json::Value) -> bool {
        match self {
            Self::Eq => actual == expected,
            Self::Neq => actual != expected,
            Self::Lt => compare_numeric_or_string(actual, expected) == Some(std::cmp::Ordering::Less),
            Self::Lte => matches!(
                compare_numeric_or_string(actual, expected),
                Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
            ),
            Self::Gt => compare_numeric_or_string(actual, expected) == Some(std::cmp::Ordering::Greater),
            Self::Gte => matches!(
                compare_numeric_or_string(actual, expected),
                Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
            ),
            Self::In => expected.as_array().is_some_and(|items| items.contains(actual)),
            Self::NotIn => !expected.as_array().is_some_and(|items| items.contains(actual)),
            Self::Contains => substring_match(actual, expected, false)
                .unwrap_or_else(|| array_contains(actual, expected)),
            Self::Icontains => substring_match(actual, expected, true)
                .unwrap_or_else(|| array_contains(actual, expected)),
            Self::Ilike => like_match(actual, expected),
            Self::IsNull => unreachable!("IsNull handled before evaluate() is called"),
            Self::JsonbContains => jsonb_contains(actual, expected),
            Self::CidrContainedBy => cidr_contains(expected, actual),
            Self::VectorCosineLt => vector_cosine_lt(actual, expected),
        }
    }
}

fn compare_numeric_or_string(
    actual: &serde_json::Value,
    expected: &serde_json::Value,
) -> Option<std::cmp::Ordering> {
    if let (Some(a), Some(b)) = (actual.as_f64(), expected.as_f64()) {
        return a.partial_cmp(&b);
    }
    if let (Some(a), Some(b)) = (actual.as_str(), expected.as_str()) {
        return Some(a.cmp(b));
    }
    None
}

fn substring_match(actual: &serde_json::Value, expected: &serde_json::Value, ci: bool) -> Option<bool> {
    let (a, b) = (actual.as_str()?, expected.as_str()?);
    Some(if ci {
        a.to_lowercase().contains(&b.to_lowercase())
    } else {
        a.contains(b)
    })
}

fn array_contains(actual: &serde_json::Value, expected: &serde_json::Value) -> bool {
    actual.as_array().is_some_and(|items| items.contains(expected))
}

/// `ILIKE`-style match: `%` is a wildcard run, `_` a single wildcard char,
/// case-insensitive, anchored to the whole value.
fn like_match(actual: &serde_json::Value, expected: &serde_json::Value) -> bool {
    let (Some(a), Some(pattern)) = (actual.as_str(), expected.as_str()) else {
        return false;
    };
    let a = a.to_lowercase();
    let pattern = pattern.to_lowercase();
    let regex = format!(
        "^{}$",
        regex::escape(&pattern).replace("%", ".*").replace('_', ".")
    );
    regex::Regex::new(&regex).is_ok_and(|re| re.is_match(&a))
}

fn jsonb_contains(actual: &serde_json::Value, expected: &serde_json::Value) -> bool {
    match (actual, expected) {
        (serde_json::Value::Object(a), serde_json::Value::Object(b)) => {
            b.iter().all(|(k, v)| a.get(k) == Some(v))
        }
        (serde_json::Value::Array(a), serde_json::Value::Array(b)) => {
            b.iter().all(|v| a.contains(v))
        }
        (a, b) => a == b,
    }
}

/// IPv4/IPv6 CIDR containment: is `addr` inside `cidr`?
fn cidr_contains(cidr: &serde_json::Value, addr: &serde_json::Value) -> bool {
    let (Some(cidr), Some(addr)) = (cidr.as_str(), addr.as_str()) else {
        return false;
    };
    let Some((network, prefix)) = cidr.split_once('/') else {
        return false;
    };
    let Ok(prefix_len) = prefix.parse::<u32>() else {
        return false;
    };

    match (
        network.parse::<std::net::Ipv4Addr>(),
        addr.parse::<std::net::Ipv4Addr>(),
    ) {
        (Ok(net), Ok(ip)) => {
            let mask = prefix_len.min(32);
            let shift = 32 - mask;
            (u32::from(net) >> shift) == (u32::from(ip) >> shift)
        }
        _ => match (
            network.parse::<std::net::Ipv6Addr>(),
            addr.parse::<std::net::Ipv6Addr>(),
        ) {
            (Ok(net), Ok(ip)) => {
                let mask = prefix_len.min(128);
                let shift = 128 - mask;
                (u128::from(net) >> shift) == (u128::from(ip) >> shift)
            }
            _ => false,
        },
    }
}

/// Cosine distance between two numeric vectors, below the threshold carried
/// in `expected.threshold` against the reference vector in `expected.vector`.
fn vector_cosine_lt(actual: &serde_json::Value, expected: &serde_json::Value) -> bool {
    let Some(actual_vec) = actual.as_array() else {
        return false;
    };
    let Some(reference) = expected.get("vector").and_then(serde_json::Value::as_array) else {
        return false;
    };
    let Some(threshold) = expected.get("threshold").and_then(serde_json::Value::as_f64) else {
        return false;
    };
    if actual_vec.len() != reference.len() || actual_vec.is_empty() {
        return false;
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0, 0.0, 0.0);
    for (a, b) in actual_vec.iter().zip(reference.iter()) {
        let (Some(a), Some(b)) = (a.as_f64(), b.as_f64()) else {
            return false;
        };
        dot += a * b;
        norm_a += a * a;
        norm_b += b * b;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return false;
    }

    let cosine_similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    (1.0 - cosine_similarity) < threshold
}

/// An enum type definition compiled from an authored GraphQL enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDefinition {
    /// Enum type name (e.g., "OrderStatus").
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Enum values.
    #[serde(default)]
    pub values: Vec<EnumValueDefinition>,
}

impl EnumDefinition {
    /// Create a new enum definition with no values.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: Vec::new(),
        }
    }

    /// Add a value to this enum.
    #[must_use]
    pub fn with_value(mut self, value: EnumValueDefinition) -> Self {
        self.values.push(value);
        self
    }
}

/// A single value within an `EnumDefinition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValueDefinition {
    /// Value name (e.g., "PENDING").
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Deprecation information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<super::field_type::DeprecationInfo>,
}

impl EnumValueDefinition {
    /// Create a new, non-deprecated enum value with no description.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            deprecation: None,
        }
    }
}

/// An input object type definition compiled from an authored GraphQL input type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputObjectDefinition {
    /// Input type name (e.g., "UserFilter").
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Input fields.
    #[serde(default)]
    pub fields: Vec<InputFieldDefinition>,

    /// Free-form metadata attached at compile time (e.g. generator
    /// provenance for synthesized `WhereInput`/`OrderByInput` types).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl InputObjectDefinition {
    /// Create a new input object definition with no fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            metadata: None,
        }
    }

    /// Add a field to this input object.
    #[must_use]
    pub fn with_field(mut self, field: InputFieldDefinition) -> Self {
        self.fields.push(field);
        self
    }
}

/// A single field within an `InputObjectDefinition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFieldDefinition {
    /// Field name.
    pub name: String,

    /// GraphQL SDL-style type string (e.g. `"String"`, `"Int!"`, `"[ID!]"`).
    pub field_type: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default value, rendered as GraphQL SDL value text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Deprecation information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<super::field_type::DeprecationInfo>,

    /// Validation rules applied to this field at mutation/query-argument
    /// binding time.
    #[serde(default)]
    pub validation_rules: Vec<ValidationRule>,
}

impl InputFieldDefinition {
    /// Create a new input field with no description, default, or validation.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            description: None,
            default_value: None,
            deprecation: None,
            validation_rules: Vec::new(),
        }
    }

    /// Check if this field is deprecated.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }
}

/// An interface type definition compiled from an authored GraphQL interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDefinition {
    /// Interface name (e.g., "Node").
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Fields every implementor must provide.
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl InterfaceDefinition {
    /// Create a new interface definition with no fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Add a field to this interface.
    #[must_use]
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }
}

/// A union type definition compiled from an authored GraphQL union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionDefinition {
    /// Union name (e.g., "SearchResult").
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Names of member object types.
    #[serde(default)]
    pub member_types: Vec<String>,
}

impl UnionDefinition {
    /// Create a new union definition with no members.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            member_types: Vec::new(),
        }
    }

    /// Add a member type.
    #[must_use]
    pub fn with_member(mut self, type_name: impl Into<String>) -> Self {
        self.member_types.push(type_name.into());
        self
    }
}

/// A custom directive definition, compiled from an authored `directive`
/// declaration. Built-in directives (`@skip`, `@include`, `@deprecated`) are
/// synthesized separately at introspection time and never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveDefinition {
    /// Directive name, without the leading `@` (e.g., "auth").
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Locations where this directive may be applied.
    #[serde(default)]
    pub locations: Vec<DirectiveLocationKind>,

    /// Directive arguments.
    #[serde(default)]
    pub arguments: Vec<ArgumentDefinition>,

    /// Whether this directive may be applied more than once to the same
    /// location.
    #[serde(default)]
    pub is_repeatable: bool,
}

impl DirectiveDefinition {
    /// Create a new non-repeatable directive definition with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            locations: Vec::new(),
            arguments: Vec::new(),
            is_repeatable: false,
        }
    }

    /// Add a valid location for this directive.
    #[must_use]
    pub fn with_location(mut self, location: DirectiveLocationKind) -> Self {
        self.locations.push(location);
        self
    }

    /// Add an argument to this directive.
    #[must_use]
    pub fn with_argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Mark this directive as repeatable.
    #[must_use]
    pub fn repeatable(mut self) -> Self {
        self.is_repeatable = true;
        self
    }
}

/// Schema-owned mirror of `introspection::DirectiveLocation`.
///
/// Kept as a separate, `Copy` type so `DirectiveDefinition` (part of the
/// frozen compiled schema) does not depend on the introspection module;
/// `introspection::DirectiveLocation` converts from this via `From`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectiveLocationKind {
    /// Directive on query operation.
    Query,
    /// Directive on mutation operation.
    Mutation,
    /// Directive on subscription operation.
    Subscription,
    /// Directive on field selection.
    Field,
    /// Directive on fragment definition.
    FragmentDefinition,
    /// Directive on fragment spread.
    FragmentSpread,
    /// Directive on inline fragment.
    InlineFragment,
    /// Directive on variable definition.
    VariableDefinition,
    /// Directive on schema definition.
    Schema,
    /// Directive on scalar type definition.
    Scalar,
    /// Directive on object type definition.
    Object,
    /// Directive on field definition.
    FieldDefinition,
    /// Directive on argument definition.
    ArgumentDefinition,
    /// Directive on interface definition.
    Interface,
    /// Directive on union definition.
    Union,
    /// Directive on enum definition.
    Enum,
    /// Directive on enum value.
    EnumValue,
    /// Directive on input object definition.
    InputObject,
    /// Directive on input field definition.
    InputFieldDefinition,
}

/// Query/mutation/subscription argument definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    /// Argument name.
    pub name: String,

    /// Argument type.
    pub arg_type: FieldType,

    /// Is this argument optional?
    #[serde(default)]
    pub nullable: bool,

    /// Default value (JSON representation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Deprecation information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<super::field_type::DeprecationInfo>,
}

impl ArgumentDefinition {
    /// Create a new required argument.
    #[must_use]
    pub fn new(name: impl Into<String>, arg_type: FieldType) -> Self {
        Self {
            name: name.into(),
            arg_type,
            nullable: false,
            default_value: None,
            description: None,
            deprecation: None,
        }
    }

    /// Create a new optional argument.
    #[must_use]
    pub fn optional(name: impl Into<String>, arg_type: FieldType) -> Self {
        Self {
            name: name.into(),
            arg_type,
            nullable: true,
            default_value: None,
            description: None,
            deprecation: None,
        }
    }

    /// Check if this argument is deprecated.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }

    /// Get the deprecation reason if deprecated.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation.as_ref().and_then(|d| d.reason.as_deref())
    }
}

/// Auto-wired query parameters.
///
/// These are standard parameters automatically added to list queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoParams {
    /// Enable `where` filtering.
    #[serde(default)]
    pub has_where: bool,

    /// Enable `orderBy` sorting.
    #[serde(default)]
    pub has_order_by: bool,

    /// Enable `limit` pagination.
    #[serde(default)]
    pub has_limit: bool,

    /// Enable `offset` pagination.
    #[serde(default)]
    pub has_offset: bool,
}

impl AutoParams {
    /// Create with all auto-params enabled (common for list queries).
    #[must_use]
    pub fn all() -> Self {
        Self {
            has_where: true,
            has_order_by: true,
            has_limit: true,
            has_offset: true,
        }
    }

    /// Create with no auto-params (common for single-item queries).
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

/// A named role, granting a set of permission scopes.
///
/// Roles are referenced by name from `SecurityContext::roles` (populated
/// from JWT claims); `SecurityConfig` is the compiled lookup table mapping
/// role name to its granted scopes.
///
/// # Example
///
/// ```
/// use viewbase_core::schema::RoleDefinition;
///
/// let admin = RoleDefinition::new("admin".to_string(), vec!["admin:*".to_string()]);
/// assert!(admin.grants_scope("admin:read"));
/// assert!(!admin.grants_scope("billing:read"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Role name (e.g., "admin", "viewer").
    pub name: String,

    /// Permission scopes this role grants (e.g. `["read:User.*", "admin:*"]`).
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RoleDefinition {
    /// Create a new role with the given granted permissions.
    #[must_use]
    pub fn new(name: String, permissions: Vec<String>) -> Self {
        Self { name, permissions }
    }

    /// Check whether this role's permissions grant `required_scope`.
    ///
    /// Supports the same wildcard conventions as `SecurityContext::has_scope`:
    /// an exact match, a trailing-colon prefix (`"admin:"` matches
    /// `"admin:read"`), or a trailing `*` prefix (`"admin:*"` matches
    /// `"admin:read"`, and bare `"*"` matches everything).
    #[must_use]
    pub fn grants_scope(&self, required_scope: &str) -> bool {
        self.permissions.iter().any(|p| {
            if p == required_scope {
                return true;
            }
            if let Some(prefix) = p.strip_suffix('*') {
                required_scope.starts_with(prefix)
            } else {
                false
            }
        })
    }
}

/// Compiled, role-based access-control configuration.
///
/// Maps role names to their granted permission scopes. Built at compile
/// time from the authored schema's `@viewbase.role` declarations and
/// consulted at request time by `SecurityContext::can_access_scope` and
/// `runtime::field_filter`.
///
/// # Example
///
/// ```
/// use viewbase_core::schema::{SecurityConfig, RoleDefinition};
///
/// let mut config = SecurityConfig::new();
/// config.add_role(RoleDefinition::new("admin".to_string(), vec!["admin:*".to_string()]));
/// assert!(config.find_role("admin").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Compiled role definitions, keyed implicitly by `RoleDefinition::name`.
    #[serde(default)]
    pub roles: Vec<RoleDefinition>,
}

impl SecurityConfig {
    /// Create an empty security configuration (no roles defined).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a role definition.
    pub fn add_role(&mut self, role: RoleDefinition) {
        self.roles.push(role);
    }

    /// Find a role definition by name.
    #[must_use]
    pub fn find_role(&self, name: &str) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.name == name)
    }
}

/// Declares an asynchronous observer of a mutation's cascade envelope.
///
/// Per the mutation-dispatch contract, a stored procedure's return row may
/// carry a cascade envelope describing invalidations and related-entity
/// changes alongside the mutated entity. The dispatcher parses that
/// envelope and publishes it to observers without interpreting its
/// contents; `ObserverDefinition` is the compiled description of *where*
/// a given mutation's envelope gets published (a subscription topic, a
/// cache-invalidation channel, a webhook), not *what* it means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverDefinition {
    /// Observer name, for diagnostics and metrics labeling.
    pub name: String,

    /// Destination the cascade envelope is published to (a subscription
    /// topic name, a webhook URL, a Kafka topic - interpreted by the
    /// transport adapter, not by the core).
    pub target: String,

    /// Mutation names this observer is attached to. Empty means "all
    /// mutations on the owning type".
    #[serde(default)]
    pub mutations: Vec<String>,

    /// Retry behavior if publishing to `target` fails.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ObserverDefinition {
    /// Create a new observer with default retry behavior and no mutation
    /// filter (observes every mutation on its owning type).
    #[must_use]
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            mutations: Vec::new(),
            retry: RetryConfig::default(),
        }
    }

    /// Restrict this observer to specific mutation names.
    #[must_use]
    pub fn for_mutations(mut self, mutations: Vec<String>) -> Self {
        self.mutations = mutations;
        self
    }
}

/// Retry policy for a failed cascade-envelope publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial publish.
    pub max_attempts: u32,

    /// Base delay between attempts, in milliseconds; doubled on each retry
    /// up to `max_backoff_ms`.
    pub initial_backoff_ms: u64,

    /// Upper bound on backoff delay, in milliseconds.
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 5_000,
        }
    }
}

impl RetryConfig {
    /// Compute the backoff delay (in milliseconds) before retry attempt
    /// number `attempt` (1-indexed), capped at `max_backoff_ms`.
    #[must_use]
    pub fn backoff_for_attempt(&self, attempt: u32) -> u64 {
        let shift = attempt.saturating_sub(1).min(31);
        self.initial_backoff_ms
            .saturating_mul(1u64 << shift)
            .min(self.max_backoff_ms)
    }
}
