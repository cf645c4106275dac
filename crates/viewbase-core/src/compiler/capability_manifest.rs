//! Capability manifest - per-database-target catalog of supported WHERE
//! operators, their SQL fragments, and feature flags.
//!
//! The manifest is the one place where target-specific asymmetry is
//! concentrated: adding a database target means adding one manifest entry,
//! not touching the compiler's validation or lowering phases. It is pure,
//! immutable data - the compiler consults it; the compiler never inlines
//! target knowledge directly.
//!
//! Operators are identified by the same stable [`WhereOperator`] variants the
//! runtime WHERE generators (`db::postgres::where_generator` and friends)
//! already render to SQL - the manifest is a *declarative* index over the
//! same operator space, used at compile time to answer "does this operator
//! exist for this logical type on this target" before a `WhereInput` is ever
//! synthesized.

use std::collections::{HashMap, HashSet};

use super::lowering::DatabaseTarget;
use crate::db::where_clause::WhereOperator;

/// The core's abstract classification of a field's value domain, used to
/// pick operators and coercions independently of the field's concrete SQL
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    /// `String`.
    String,
    /// `Int`.
    Int,
    /// `Float`.
    Float,
    /// `Boolean`.
    Bool,
    /// `ID`.
    Id,
    /// `UUID`.
    Uuid,
    /// `DateTime`.
    DateTime,
    /// `Date`.
    Date,
    /// `Decimal`.
    Decimal,
    /// `JSON`/`JSONB` container.
    Json,
    /// `IpAddress`/`Cidr` network scalar.
    Network,
    /// `LTree` hierarchical path scalar.
    LTree,
    /// `Vector` (pgvector embedding).
    Vector,
    /// Any enum or object-reference type (equality-only by default).
    Reference,
}

impl LogicalType {
    /// Classify a [`FieldType`](crate::schema::FieldType) into its logical
    /// type for manifest lookups. Lists resolve to their element's logical
    /// type - filtering always targets the scalar domain, never the
    /// container.
    #[must_use]
    pub fn from_field_type(field_type: &crate::schema::FieldType) -> Self {
        use crate::schema::FieldType as FT;
        match field_type {
            FT::String => Self::String,
            FT::Int => Self::Int,
            FT::Float => Self::Float,
            FT::Boolean => Self::Bool,
            FT::Id => Self::Id,
            FT::Uuid => Self::Uuid,
            FT::DateTime => Self::DateTime,
            FT::Date | FT::Time => Self::Date,
            FT::Decimal => Self::Decimal,
            FT::Json => Self::Json,
            FT::Vector => Self::Vector,
            FT::List(inner) => Self::from_field_type(inner),
            FT::Scalar(name) => match name.as_str() {
                "IpAddress" | "Cidr" | "MacAddress" => Self::Network,
                "LTree" => Self::LTree,
                _ => Self::String,
            },
            FT::Object(_) | FT::Enum(_) | FT::Input(_) | FT::Interface(_) | FT::Union(_) => {
                Self::Reference
            }
        }
    }
}

/// A declarative SQL fragment for one operator. Rendered with three slots:
/// `{column}` (the JSONB path or denormalized column reference), `{arg}` (or
/// `{arg1}`/`{arg2}` for binary operators), and optional `{cast}`. Rendering
/// never inlines a user value - values always flow through the parameter
/// vector; only column references (compiler-controlled) and this template
/// text (manifest-controlled) become SQL text.
#[derive(Debug, Clone)]
pub struct OperatorTemplate {
    /// Fragment text with placeholders, e.g. `"{column} = {arg}{cast}"`.
    pub fragment: String,
    /// Number of bind-parameter slots this operator consumes (0, 1, or 2).
    pub arity: usize,
}

impl OperatorTemplate {
    /// Create a unary template (one `{arg}` slot).
    #[must_use]
    pub fn unary(fragment: impl Into<String>) -> Self {
        Self { fragment: fragment.into(), arity: 1 }
    }

    /// Create a nullary template (no value arguments, e.g. `IS NULL`).
    #[must_use]
    pub fn nullary(fragment: impl Into<String>) -> Self {
        Self { fragment: fragment.into(), arity: 0 }
    }

    /// Render this template against a column reference and cast, returning
    /// the SQL fragment with `{arg}` left as a bind-parameter placeholder
    /// supplied by the caller (the translator substitutes the dialect's own
    /// positional marker, e.g. `$1` or `?`).
    #[must_use]
    pub fn render(&self, column: &str, arg_placeholder: &str, cast: &str) -> String {
        self.fragment
            .replace("{column}", column)
            .replace("{arg}", arg_placeholder)
            .replace("{cast}", cast)
    }
}

/// Feature gates a target may or may not support.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureFlags {
    /// Native JSONB column type and containment operators.
    pub jsonb: bool,
    /// `pgvector`-style vector similarity search.
    pub vector: bool,
    /// Full-text search (`tsvector`/`tsquery` or equivalent).
    pub full_text_search: bool,
    /// Network address types (`inet`/`cidr`) and containment operators.
    pub network: bool,
    /// Hierarchical path types (`ltree`).
    pub ltree: bool,
}

/// Per-target operator and feature catalog.
#[derive(Debug, Clone)]
pub struct TargetCapabilities {
    /// Minimum supported engine version, e.g. `">=13"`.
    pub version_constraint: String,
    /// Which operators are legal for which logical type.
    pub type_operators: HashMap<LogicalType, HashSet<WhereOperator>>,
    /// SQL rendering template per operator, independent of logical type.
    pub operator_templates: HashMap<WhereOperator, OperatorTemplate>,
    /// Feature gates.
    pub features: FeatureFlags,
}

impl TargetCapabilities {
    fn operators_for(&self, logical_type: LogicalType) -> &HashSet<WhereOperator> {
        static EMPTY: std::sync::OnceLock<HashSet<WhereOperator>> = std::sync::OnceLock::new();
        self.type_operators
            .get(&logical_type)
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }
}

/// The capability manifest: immutable, per-target data consulted by the
/// schema compiler's `WhereInput` synthesis phase and by the query
/// translator's operator-closure check.
#[derive(Debug, Clone)]
pub struct CapabilityManifest {
    targets: HashMap<DatabaseTarget, TargetCapabilities>,
}

impl CapabilityManifest {
    /// Build the standard manifest covering all four reference targets,
    /// mirroring the operator sets the per-target `where_generator` modules
    /// already implement.
    #[must_use]
    pub fn standard() -> Self {
        let mut targets = HashMap::new();
        targets.insert(DatabaseTarget::PostgreSQL, postgres_capabilities());
        targets.insert(DatabaseTarget::MySQL, mysql_capabilities());
        targets.insert(DatabaseTarget::SQLite, sqlite_capabilities());
        targets.insert(DatabaseTarget::SQLServer, sqlserver_capabilities());
        Self { targets }
    }

    /// Does `target` support `operator` for fields of `logical_type`?
    #[must_use]
    pub fn supports(&self, target: DatabaseTarget, logical_type: LogicalType, operator: WhereOperator) -> bool {
        self.targets
            .get(&target)
            .is_some_and(|caps| caps.operators_for(logical_type).contains(&operator))
    }

    /// The SQL template for `operator` on `target`, if the operator has a
    /// template registered (independent of the logical-type gate above -
    /// `supports` answers "is this combination admitted", `template`
    /// answers "how do I render it").
    #[must_use]
    pub fn template(&self, target: DatabaseTarget, operator: WhereOperator) -> Option<&OperatorTemplate> {
        self.targets.get(&target)?.operator_templates.get(&operator)
    }

    /// Is `flag` enabled for `target`?
    #[must_use]
    pub fn feature(&self, target: DatabaseTarget, flag: impl Fn(&FeatureFlags) -> bool) -> bool {
        self.targets.get(&target).is_some_and(|caps| flag(&caps.features))
    }

    /// The version constraint string for `target`, if the target is known.
    #[must_use]
    pub fn version_constraint(&self, target: DatabaseTarget) -> Option<&str> {
        self.targets.get(&target).map(|c| c.version_constraint.as_str())
    }

    /// All operators registered for `logical_type` on `target`, for
    /// `WhereInput` synthesis (the compiler emits exactly one input field
    /// per returned operator).
    #[must_use]
    pub fn operators_for_type(&self, target: DatabaseTarget, logical_type: LogicalType) -> Vec<WhereOperator> {
        self.targets
            .get(&target)
            .map(|caps| caps.operators_for(logical_type).iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for CapabilityManifest {
    fn default() -> Self {
        Self::standard()
    }
}

/// Operators common to every target: basic comparison, null check, and
/// substring matching against a JSONB-or-equivalent text extraction.
fn universal_scalar_ops() -> HashSet<WhereOperator> {
    [
        WhereOperator::Eq,
        WhereOperator::Neq,
        WhereOperator::In,
        WhereOperator::Nin,
        WhereOperator::IsNull,
    ]
    .into_iter()
    .collect()
}

fn ordered_ops() -> HashSet<WhereOperator> {
    let mut ops = universal_scalar_ops();
    ops.extend([WhereOperator::Gt, WhereOperator::Gte, WhereOperator::Lt, WhereOperator::Lte]);
    ops
}

fn string_ops() -> HashSet<WhereOperator> {
    let mut ops = universal_scalar_ops();
    ops.extend([
        WhereOperator::Contains,
        WhereOperator::Icontains,
        WhereOperator::Startswith,
        WhereOperator::Istartswith,
        WhereOperator::Endswith,
        WhereOperator::Iendswith,
        WhereOperator::Like,
        WhereOperator::Ilike,
    ]);
    ops
}

fn postgres_capabilities() -> TargetCapabilities {
    let mut type_operators = HashMap::new();
    type_operators.insert(LogicalType::String, string_ops());
    type_operators.insert(LogicalType::Int, ordered_ops());
    type_operators.insert(LogicalType::Float, ordered_ops());
    type_operators.insert(LogicalType::Decimal, ordered_ops());
    type_operators.insert(LogicalType::DateTime, ordered_ops());
    type_operators.insert(LogicalType::Date, ordered_ops());
    type_operators.insert(LogicalType::Bool, universal_scalar_ops());
    type_operators.insert(LogicalType::Id, universal_scalar_ops());
    type_operators.insert(LogicalType::Uuid, universal_scalar_ops());
    type_operators.insert(LogicalType::Reference, universal_scalar_ops());
    type_operators.insert(
        LogicalType::Json,
        [
            WhereOperator::Eq,
            WhereOperator::Neq,
            WhereOperator::IsNull,
            WhereOperator::ArrayContains,
            WhereOperator::ArrayContainedBy,
            WhereOperator::StrictlyContains,
        ]
        .into_iter()
        .collect(),
    );
    type_operators.insert(
        LogicalType::Network,
        [
            WhereOperator::Eq,
            WhereOperator::IsNull,
            WhereOperator::IsIPv4,
            WhereOperator::IsIPv6,
            WhereOperator::IsPrivate,
            WhereOperator::IsPublic,
            WhereOperator::IsLoopback,
            WhereOperator::InSubnet,
            WhereOperator::ContainsSubnet,
            WhereOperator::ContainsIP,
            WhereOperator::Overlaps,
        ]
        .into_iter()
        .collect(),
    );
    type_operators.insert(
        LogicalType::LTree,
        [
            WhereOperator::Eq,
            WhereOperator::IsNull,
            WhereOperator::AncestorOf,
            WhereOperator::DescendantOf,
            WhereOperator::MatchesLquery,
            WhereOperator::MatchesLtxtquery,
            WhereOperator::MatchesAnyLquery,
            WhereOperator::DepthEq,
            WhereOperator::DepthNeq,
            WhereOperator::DepthGt,
            WhereOperator::DepthGte,
            WhereOperator::DepthLt,
            WhereOperator::DepthLte,
        ]
        .into_iter()
        .collect(),
    );
    type_operators.insert(
        LogicalType::Vector,
        [
            WhereOperator::CosineDistance,
            WhereOperator::L2Distance,
            WhereOperator::L1Distance,
            WhereOperator::InnerProduct,
        ]
        .into_iter()
        .collect(),
    );

    let mut operator_templates = HashMap::new();
    operator_templates.insert(WhereOperator::Eq, OperatorTemplate::unary("{column}{cast} = {arg}"));
    operator_templates.insert(WhereOperator::Neq, OperatorTemplate::unary("{column}{cast} != {arg}"));
    operator_templates.insert(WhereOperator::Gt, OperatorTemplate::unary("{column}{cast} > {arg}"));
    operator_templates.insert(WhereOperator::Gte, OperatorTemplate::unary("{column}{cast} >= {arg}"));
    operator_templates.insert(WhereOperator::Lt, OperatorTemplate::unary("{column}{cast} < {arg}"));
    operator_templates.insert(WhereOperator::Lte, OperatorTemplate::unary("{column}{cast} <= {arg}"));
    operator_templates.insert(WhereOperator::In, OperatorTemplate::unary("{column}{cast} = ANY({arg})"));
    operator_templates.insert(WhereOperator::Nin, OperatorTemplate::unary("NOT ({column}{cast} = ANY({arg}))"));
    operator_templates.insert(WhereOperator::Contains, OperatorTemplate::unary("{column} LIKE '%' || {arg} || '%'"));
    operator_templates.insert(WhereOperator::Icontains, OperatorTemplate::unary("{column} ILIKE '%' || {arg} || '%'"));
    operator_templates.insert(WhereOperator::Ilike, OperatorTemplate::unary("{column} ILIKE {arg}"));
    operator_templates.insert(WhereOperator::IsNull, OperatorTemplate::nullary("{column} IS NULL"));
    operator_templates.insert(WhereOperator::ArrayContains, OperatorTemplate::unary("{column} @> {arg}"));
    operator_templates.insert(WhereOperator::ArrayContainedBy, OperatorTemplate::unary("{column} <@ {arg}"));
    operator_templates.insert(WhereOperator::StrictlyContains, OperatorTemplate::unary("{column} @> {arg}"));
    operator_templates.insert(WhereOperator::InSubnet, OperatorTemplate::unary("{column}::inet <<= {arg}::cidr"));
    operator_templates.insert(WhereOperator::ContainsSubnet, OperatorTemplate::unary("{column}::cidr >>= {arg}::cidr"));
    operator_templates.insert(WhereOperator::ContainsIP, OperatorTemplate::unary("{column}::cidr >>= {arg}::inet"));
    operator_templates.insert(WhereOperator::AncestorOf, OperatorTemplate::unary("{column}::ltree @> {arg}::ltree"));
    operator_templates.insert(WhereOperator::DescendantOf, OperatorTemplate::unary("{column}::ltree <@ {arg}::ltree"));
    operator_templates.insert(WhereOperator::CosineDistance, OperatorTemplate::unary("{column} <=> {arg}"));
    operator_templates.insert(WhereOperator::L2Distance, OperatorTemplate::unary("{column} <-> {arg}"));
    operator_templates.insert(WhereOperator::InnerProduct, OperatorTemplate::unary("{column} <#> {arg}"));

    TargetCapabilities {
        version_constraint: ">=13".to_string(),
        type_operators,
        operator_templates,
        features: FeatureFlags {
            jsonb: true,
            vector: true,
            full_text_search: true,
            network: true,
            ltree: true,
        },
    }
}

fn mysql_capabilities() -> TargetCapabilities {
    let mut type_operators = HashMap::new();
    type_operators.insert(LogicalType::String, string_ops());
    type_operators.insert(LogicalType::Int, ordered_ops());
    type_operators.insert(LogicalType::Float, ordered_ops());
    type_operators.insert(LogicalType::Decimal, ordered_ops());
    type_operators.insert(LogicalType::DateTime, ordered_ops());
    type_operators.insert(LogicalType::Date, ordered_ops());
    type_operators.insert(LogicalType::Bool, universal_scalar_ops());
    type_operators.insert(LogicalType::Id, universal_scalar_ops());
    type_operators.insert(LogicalType::Uuid, universal_scalar_ops());
    type_operators.insert(LogicalType::Reference, universal_scalar_ops());
    type_operators.insert(
        LogicalType::Json,
        [WhereOperator::Eq, WhereOperator::Neq, WhereOperator::IsNull, WhereOperator::ArrayContains]
            .into_iter()
            .collect(),
    );
    // MySQL has no INET/LTree/vector extensions in the reference target.

    let mut operator_templates = HashMap::new();
    operator_templates.insert(WhereOperator::Eq, OperatorTemplate::unary("{column}{cast} = {arg}"));
    operator_templates.insert(WhereOperator::Neq, OperatorTemplate::unary("{column}{cast} != {arg}"));
    operator_templates.insert(WhereOperator::Gt, OperatorTemplate::unary("{column}{cast} > {arg}"));
    operator_templates.insert(WhereOperator::Gte, OperatorTemplate::unary("{column}{cast} >= {arg}"));
    operator_templates.insert(WhereOperator::Lt, OperatorTemplate::unary("{column}{cast} < {arg}"));
    operator_templates.insert(WhereOperator::Lte, OperatorTemplate::unary("{column}{cast} <= {arg}"));
    operator_templates.insert(WhereOperator::In, OperatorTemplate::unary("{column}{cast} IN ({arg})"));
    operator_templates.insert(WhereOperator::Nin, OperatorTemplate::unary("{column}{cast} NOT IN ({arg})"));
    operator_templates.insert(WhereOperator::Contains, OperatorTemplate::unary("{column} LIKE CONCAT('%', {arg}, '%')"));
    operator_templates.insert(WhereOperator::Icontains, OperatorTemplate::unary("LOWER({column}) LIKE LOWER(CONCAT('%', {arg}, '%'))"));
    operator_templates.insert(WhereOperator::IsNull, OperatorTemplate::nullary("{column} IS NULL"));
    operator_templates.insert(WhereOperator::ArrayContains, OperatorTemplate::unary("JSON_CONTAINS({column}, {arg})"));

    TargetCapabilities {
        version_constraint: ">=8.0".to_string(),
        type_operators,
        operator_templates,
        features: FeatureFlags { jsonb: true, vector: false, full_text_search: true, network: false, ltree: false },
    }
}

fn sqlite_capabilities() -> TargetCapabilities {
    let mut type_operators = HashMap::new();
    type_operators.insert(LogicalType::String, string_ops());
    type_operators.insert(LogicalType::Int, ordered_ops());
    type_operators.insert(LogicalType::Float, ordered_ops());
    type_operators.insert(LogicalType::DateTime, ordered_ops());
    type_operators.insert(LogicalType::Date, ordered_ops());
    type_operators.insert(LogicalType::Bool, universal_scalar_ops());
    type_operators.insert(LogicalType::Id, universal_scalar_ops());
    type_operators.insert(LogicalType::Uuid, universal_scalar_ops());
    type_operators.insert(LogicalType::Reference, universal_scalar_ops());
    type_operators.insert(
        LogicalType::Json,
        [WhereOperator::Eq, WhereOperator::Neq, WhereOperator::IsNull].into_iter().collect(),
    );

    let mut operator_templates = HashMap::new();
    operator_templates.insert(WhereOperator::Eq, OperatorTemplate::unary("{column} = {arg}"));
    operator_templates.insert(WhereOperator::Neq, OperatorTemplate::unary("{column} != {arg}"));
    operator_templates.insert(WhereOperator::Gt, OperatorTemplate::unary("{column} > {arg}"));
    operator_templates.insert(WhereOperator::Gte, OperatorTemplate::unary("{column} >= {arg}"));
    operator_templates.insert(WhereOperator::Lt, OperatorTemplate::unary("{column} < {arg}"));
    operator_templates.insert(WhereOperator::Lte, OperatorTemplate::unary("{column} <= {arg}"));
    operator_templates.insert(WhereOperator::In, OperatorTemplate::unary("{column} IN ({arg})"));
    operator_templates.insert(WhereOperator::Nin, OperatorTemplate::unary("{column} NOT IN ({arg})"));
    operator_templates.insert(WhereOperator::Contains, OperatorTemplate::unary("{column} LIKE '%' || {arg} || '%'"));
    operator_templates.insert(WhereOperator::IsNull, OperatorTemplate::nullary("{column} IS NULL"));

    TargetCapabilities {
        version_constraint: ">=3.38".to_string(),
        type_operators,
        operator_templates,
        features: FeatureFlags { jsonb: false, vector: false, full_text_search: false, network: false, ltree: false },
    }
}

fn sqlserver_capabilities() -> TargetCapabilities {
    let mut type_operators = HashMap::new();
    type_operators.insert(LogicalType::String, string_ops());
    type_operators.insert(LogicalType::Int, ordered_ops());
    type_operators.insert(LogicalType::Float, ordered_ops());
    type_operators.insert(LogicalType::Decimal, ordered_ops());
    type_operators.insert(LogicalType::DateTime, ordered_ops());
    type_operators.insert(LogicalType::Date, ordered_ops());
    type_operators.insert(LogicalType::Bool, universal_scalar_ops());
    type_operators.insert(LogicalType::Id, universal_scalar_ops());
    type_operators.insert(LogicalType::Uuid, universal_scalar_ops());
    type_operators.insert(LogicalType::Reference, universal_scalar_ops());
    type_operators.insert(
        LogicalType::Json,
        [WhereOperator::Eq, WhereOperator::Neq, WhereOperator::IsNull].into_iter().collect(),
    );

    let mut operator_templates = HashMap::new();
    operator_templates.insert(WhereOperator::Eq, OperatorTemplate::unary("{column}{cast} = {arg}"));
    operator_templates.insert(WhereOperator::Neq, OperatorTemplate::unary("{column}{cast} <> {arg}"));
    operator_templates.insert(WhereOperator::Gt, OperatorTemplate::unary("{column}{cast} > {arg}"));
    operator_templates.insert(WhereOperator::Gte, OperatorTemplate::unary("{column}{cast} >= {arg}"));
    operator_templates.insert(WhereOperator::Lt, OperatorTemplate::unary("{column}{cast} < {arg}"));
    operator_templates.insert(WhereOperator::Lte, OperatorTemplate::unary("{column}{cast} <= {arg}"));
    operator_templates.insert(WhereOperator::In, OperatorTemplate::unary("{column}{cast} IN ({arg})"));
    operator_templates.insert(WhereOperator::Nin, OperatorTemplate::unary("{column}{cast} NOT IN ({arg})"));
    operator_templates.insert(WhereOperator::Contains, OperatorTemplate::unary("{column} LIKE '%' + {arg} + '%'"));
    operator_templates.insert(WhereOperator::IsNull, OperatorTemplate::nullary("{column} IS NULL"));

    TargetCapabilities {
        version_constraint: ">=2019".to_string(),
        type_operators,
        operator_templates,
        features: FeatureFlags { jsonb: true, vector: false, full_text_search: true, network: false, ltree: false },
    }
}
