//! Input processor for GraphQL variables with ID policy validation.
//!
//! Validates ID-shaped fields in coerced operation variables before they
//! reach the translator, according to the configured [`IDPolicy`]. This is
//! the boundary where the loosely-typed `Value` sum type described for the
//! authored schema gets its ID fields checked, rather than discovering a
//! malformed ID deep inside WHERE translation.

use serde_json::{Map, Value};
use std::collections::HashSet;

use super::id_policy::{IDPolicy, validate_id};

/// Configuration for input processing.
#[derive(Debug, Clone)]
pub struct InputProcessingConfig {
    /// ID policy to enforce for ID fields.
    pub id_policy: IDPolicy,

    /// Enable ID validation on all inputs (recommended).
    pub validate_ids: bool,

    /// Field names treated as ID-typed for validation purposes.
    pub id_field_names: HashSet<String>,
}

impl Default for InputProcessingConfig {
    fn default() -> Self {
        Self {
            id_policy: IDPolicy::default(),
            validate_ids: true,
            id_field_names: Self::default_id_field_names(),
        }
    }
}

impl InputProcessingConfig {
    fn default_id_field_names() -> HashSet<String> {
        [
            "id", "userId", "user_id", "postId", "post_id", "commentId", "comment_id",
            "authorId", "author_id", "ownerId", "owner_id", "creatorId", "creator_id",
            "tenantId", "tenant_id",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Register an additional field name as ID-typed.
    pub fn add_id_field(&mut self, field_name: String) {
        self.id_field_names.insert(field_name);
    }

    /// Strict UUID validation for every recognized ID field.
    #[must_use]
    pub fn strict_uuid() -> Self {
        Self {
            id_policy: IDPolicy::UUID,
            validate_ids: true,
            id_field_names: Self::default_id_field_names(),
        }
    }

    /// Opaque-ID mode (GraphQL-spec compliant): no format validation.
    #[must_use]
    pub fn opaque() -> Self {
        Self {
            id_policy: IDPolicy::OPAQUE,
            validate_ids: false,
            id_field_names: Self::default_id_field_names(),
        }
    }
}

/// Validate every recognized ID field in a coerced variables object.
///
/// Returns the variables unchanged (validation is a pass/fail gate, not a
/// transform); callers pass the original `variables` through to the
/// translator once this succeeds.
///
/// # Errors
///
/// Returns [`ProcessingError`] naming the offending field path if any
/// recognized ID field fails [`validate_id`] under the configured policy.
pub fn process_variables(
    variables: &Value,
    config: &InputProcessingConfig,
) -> Result<Value, ProcessingError> {
    if !config.validate_ids {
        return Ok(variables.clone());
    }

    match variables {
        Value::Object(obj) => {
            let mut result = Map::new();
            for (key, value) in obj {
                result.insert(key.clone(), process_value(value, config, key)?);
            }
            Ok(Value::Object(result))
        }
        Value::Null => Ok(Value::Null),
        other => Ok(other.clone()),
    }
}

fn process_value(
    value: &Value,
    config: &InputProcessingConfig,
    field_name: &str,
) -> Result<Value, ProcessingError> {
    match value {
        Value::String(s) if config.id_field_names.contains(field_name) => {
            validate_id(s, config.id_policy).map_err(|e| ProcessingError {
                field_path: field_name.to_string(),
                reason: format!("invalid ID value: {e}"),
            })?;
            Ok(Value::String(s.clone()))
        }
        Value::Object(obj) => {
            let mut result = Map::new();
            for (key, nested) in obj {
                result.insert(key.clone(), process_value(nested, config, key)?);
            }
            Ok(Value::Object(result))
        }
        Value::Array(arr) => {
            let processed: Result<Vec<_>, _> = arr
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    let array_field = format!("{field_name}[{idx}]");
                    process_value(item, config, &array_field)
                })
                .collect();
            Ok(Value::Array(processed?))
        }
        other => Ok(other.clone()),
    }
}

/// Error raised when a recognized ID field fails its configured policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingError {
    /// Path of the offending field, e.g. `input.profile.authorId`.
    pub field_path: String,
    /// Human-readable reason.
    pub reason: String,
}

impl std::fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error in field '{}': {}", self.field_path, self.reason)
    }
}

impl std::error::Error for ProcessingError {}
