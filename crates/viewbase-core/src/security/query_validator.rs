//! Query Validator (Phase 6.3)
//!
//! This module provides query validation for GraphQL queries.
//! It validates:
//! - Query depth (maximum nesting levels)
//! - Query complexity (weighted scoring of fields)
//! - Query size (maximum bytes)
//!
//! # Architecture
//!
//! The Query Validator acts as the third layer in the security middleware:
//! ```text
//! GraphQL Query String
//!     ↓
//! QueryValidator::validate()
//!     ├─ Check 1: Validate query size
//!     ├─ Check 2: Parse and analyze query structure
//!     ├─ Check 3: Check query depth
//!     └─ Check 4: Check query complexity
//!     ↓
//! Result<QueryMetrics> (validation passed or error)
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use viewbase_core::security::{QueryValidator, QueryValidatorConfig};
//!
//! // Create validator with standard limits
//! let config = QueryValidatorConfig {
//!     max_depth: 10,
//!     max_complexity: 1000,
//!     max_size_bytes: 100_000,
//! };
//! let validator = QueryValidator::from_config(config);
//!
//! // Validate a query
//! let query = "{ user { posts { comments { author { name } } } } }";
//! let metrics = validator.validate(query)?;
//! println!("Query depth: {}", metrics.depth);
//! println!("Query complexity: {}", metrics.complexity);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::security::errors::{Result, SecurityError};

/// Query validation configuration
///
/// Defines limits for query depth, complexity, and size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryValidatorConfig {
    /// Maximum nesting depth for queries
    pub max_depth: usize,

    /// Maximum complexity score for queries
    pub max_complexity: usize,

    /// Maximum query size in bytes
    pub max_size_bytes: usize,
}

impl QueryValidatorConfig {
    /// Create a permissive query validation configuration
    ///
    /// - Max depth: 20 levels
    /// - Max complexity: 5000
    /// - Max size: 1 MB
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            max_depth:      20,
            max_complexity: 5000,
            max_size_bytes: 1_000_000, // 1 MB
        }
    }

    /// Create a standard query validation configuration
    ///
    /// - Max depth: 10 levels
    /// - Max complexity: 1000
    /// - Max size: 256 KB
    #[must_use]
    pub fn standard() -> Self {
        Self {
            max_depth:      10,
            max_complexity: 1000,
            max_size_bytes: 256_000, // 256 KB
        }
    }

    /// Create a strict query validation configuration
    ///
    /// - Max depth: 5 levels
    /// - Max complexity: 500
    /// - Max size: 64 KB (regulated environments)
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_depth:      5,
            max_complexity: 500,
            max_size_bytes: 64_000, // 64 KB
        }
    }
}

/// Query metrics computed during validation
///
/// Contains information about the query structure and complexity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMetrics {
    /// Maximum nesting depth found in the query
    pub depth: usize,

    /// Computed complexity score
    pub complexity: usize,

    /// Query size in bytes
    pub size_bytes: usize,

    /// Number of fields in the query
    pub field_count: usize,
}

impl fmt::Display for QueryMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QueryMetrics(depth={}, complexity={}, size={}B, fields={})",
            self.depth, self.complexity, self.size_bytes, self.field_count
        )
    }
}

/// Query Validator
///
/// Validates incoming GraphQL queries against security policies.
/// Acts as the third layer in the security middleware pipeline.
#[derive(Debug, Clone)]
pub struct QueryValidator {
    config: QueryValidatorConfig,
}

impl QueryValidator {
    /// Create a new query validator from configuration
    #[must_use]
    pub fn from_config(config: QueryValidatorConfig) -> Self {
        Self { config }
    }

    /// Create validator with permissive settings
    #[must_use]
    pub fn permissive() -> Self {
        Self::from_config(QueryValidatorConfig::permissive())
    }

    /// Create validator with standard settings
    #[must_use]
    pub fn standard() -> Self {
        Self::from_config(QueryValidatorConfig::standard())
    }

    /// Create validator with strict settings
    #[must_use]
    pub fn strict() -> Self {
        Self::from_config(QueryValidatorConfig::strict())
    }

    /// Validate a GraphQL query
    ///
    /// Performs 4 validation checks:
    /// 1. Check query size
    /// 2. Parse and analyze structure
    /// 3. Check query depth
    /// 4. Check query complexity
    ///
    /// Returns QueryMetrics if valid, Err if any check fails.
    pub fn validate(&self, query: &str) -> Result<QueryMetrics> {
        // Check 1: Validate query size
        let size_bytes = query.len();
        if size_bytes > self.config.max_size_bytes {
            return Err(SecurityError::QueryTooLarge {
                size:     size_bytes,
                max_size: self.config.max_size_bytes,
            });
        }

        // Check 2: Parse and analyze query
        let metrics = self.analyze_query(query)?;

        // Check 3: Check query depth
        if metrics.depth > self.config.max_depth {
            return Err(SecurityError::QueryTooDeep {
                depth:     metrics.depth,
                max_depth: self.config.max_depth,
            });
        }

        // Check 4: Check query complexity
        if metrics.complexity > self.config.max_complexity {
            return Err(SecurityError::QueryTooComplex {
                complexity:     metrics.complexity,
                max_complexity: self.config.max_complexity,
            });
        }

        Ok(metrics)
    }

    /// Analyze query structure (without enforcing limits)
    ///
    /// Returns metrics about depth, complexity, size, and field count.
    fn analyze_query(&self, query: &str) -> Result<QueryMetrics> {
        // Simplified analysis: scan for braces and count nesting
        // In production, this would parse the full GraphQL AST
        let (depth, field_count) = self.calculate_depth_and_fields(query);
        let complexity = self.calculate_complexity(depth, field_count);

        Ok(QueryMetrics {
            depth,
            complexity,
            size_bytes: query.len(),
            field_count,
        })
    }

    /// Calculate maximum nesting depth and field count
    fn calculate_depth_and_fields(&self, query: &str) -> (usize, usize) {
        let mut max_depth = 0;
        let mut current_depth = 0;
        let mut field_count = 0;
        let mut in_string = false;
        let mut escape_next = false;

        for c in query.chars() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match c {
                '\\' if in_string => escape_next = true,
                '"' => in_string = !in_string,
                '{' if !in_string => {
                    current_depth += 1;
                    if current_depth > max_depth {
                        max_depth = current_depth;
                    }
                },
                '}' if !in_string => {
                    if current_depth > 0 {
                        current_depth -= 1;
                    }
                },
                _ if !in_string && (c.is_alphabetic() || c == '_') => {
                    // Count alphanumeric field names (simplified)
                    field_count += 1;
                },
                _ => {},
            }
        }

        // Ensure reasonable bounds
        if max_depth == 0 {
            max_depth = 1;
        }
        if field_count == 0 {
            field_count = 1;
        }

        (max_depth, field_count)
    }

    /// Calculate complexity score
    ///
    /// Simple heuristic: depth * field_count
    /// In production, would use schema-aware field weights
    fn calculate_complexity(&self, depth: usize, field_count: usize) -> usize {
        // Each field at each depth level contributes to complexity
        // This is a simplified calculation
        depth.saturating_mul(field_count)
    }

    /// Get the underlying configuration
    #[must_use]
    pub const fn config(&self) -> &QueryValidatorConfig {
        &self.config
    }
}
