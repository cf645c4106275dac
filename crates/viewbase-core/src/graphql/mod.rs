//! GraphQL parsing and query processing.
//!
//! This module provides runtime GraphQL query handling:
//! - Query parsing via `graphql-parser` crate
//! - Fragment resolution and expansion
//! - Directive evaluation (@skip, @include)
//! - Fragment cycle detection
//!
//! # Architecture
//!
//! ```text
//! Incoming GraphQL Query
//!         │
//!         ▼
//!   ┌─────────────┐
//!   │   Parser    │  ← graphql-parser crate
//!   └──────┬──────┘
//!          │ ParsedQuery
//!          ▼
//!   ┌─────────────┐
//!   │  Fragment   │  ← Cycle detection
//!   │  Validator  │
//!   └──────┬──────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │  Fragment   │  ← Spread expansion
//!   │  Resolver   │
//!   └──────┬──────┘
//!          │ Resolved selections
//!          ▼
//!   ┌─────────────┐
//!   │  Directive  │  ← @skip/@include
//!   │  Evaluator  │
//!   └──────┬──────┘
//!          │ Final field list
//!          ▼
//!     SQL Generation
//! ```
//!
//! # Example
//!
//! ```ignore
//! use viewbase_core::graphql::{parse_query, FragmentResolver, DirectiveEvaluator};
//!
//! let query = r#"
//!     fragment UserFields on User { id name }
//!     query { users { ...UserFields } }
//! "#;
//!
//! let parsed = parse_query(query)?;
//! let resolver = FragmentResolver::new(&parsed.fragments);
//! let resolved = resolver.resolve_spreads(&parsed.selections)?;
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// GraphQL AST types for query representation.
pub mod types;

/// GraphQL operation text parsing (`graphql-parser` → [`types::ParsedQuery`]).
pub mod parser;

/// Fragment resolution and expansion (spreads, inline fragments, cycle detection).
pub mod fragment_resolver;

/// Directive evaluation (@skip, @include, custom directives).
pub mod directive_evaluator;

/// The `@require_permission` field-level authorization directive.
pub mod require_permission_directive;

/// Query complexity analysis and DoS prevention.
pub mod complexity;

#[cfg(test)]
mod directive_integration_tests;

// ============================================================================
// Re-exports for convenient access
// ============================================================================

pub use complexity::{ComplexityAnalyzer, ComplexityConfig};
pub use directive_evaluator::{
    CustomDirectiveEvaluator, DirectiveError, DirectiveEvaluator, DirectiveHandler,
    DirectiveResult, EvaluationContext, OperationType,
};
pub use fragment_resolver::{FragmentError, FragmentResolver};
pub use parser::{ParseError, parse_query};
pub use require_permission_directive::RequirePermissionDirective;
pub use types::{
    Directive, FieldSelection, FragmentDefinition, GraphQLArgument, GraphQLType, ParsedQuery,
    VariableDefinition,
};
