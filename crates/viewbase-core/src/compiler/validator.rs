//! Schema validator - validates IR for correctness.
//!
//! # Validation Rules
//!
//! - Type references are valid (every field/argument/return type resolves to
//!   a built-in scalar or a name declared somewhere in the IR)
//! - No duplicate type/enum/interface/union/input-type names
//! - No duplicate query/mutation/subscription names
//! - Fact table metadata references a declared table name

use std::collections::HashSet;

use super::ir::AuthoringIR;
use crate::error::{Result, ViewBaseError};

/// Validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error message.
    pub message: String,
    /// Location in schema.
    pub location: String,
}

/// Built-in GraphQL scalar names that never need to resolve against the IR's
/// own type set.
const BUILTIN_SCALARS: &[&str] = &[
    "String", "Int", "Float", "Boolean", "ID", "DateTime", "Date", "Time", "JSON", "UUID",
    "Decimal",
];

/// Strip list brackets and non-null markers down to the bare type name, e.g.
/// `"[Post!]!"` -> `"Post"`.
fn base_type_name(type_str: &str) -> &str {
    let mut trimmed = type_str.trim().trim_end_matches('!').trim();
    while let Some(inner) = trimmed.strip_prefix('[') {
        trimmed = inner.trim_end_matches(']').trim_end_matches('!').trim();
    }
    trimmed
}

/// Schema validator.
///
/// Walks the parsed [`AuthoringIR`] and rejects schemas that reference
/// undeclared types before they reach lowering, where an unresolved
/// reference would otherwise be silently coerced to `String` by
/// `FieldType::parse`.
pub struct SchemaValidator {}

impl SchemaValidator {
    /// Create new validator.
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Validate IR.
    ///
    /// # Arguments
    ///
    /// * `ir` - Authoring IR to validate
    ///
    /// # Returns
    ///
    /// The same IR, unchanged, once every check passes.
    ///
    /// # Errors
    ///
    /// Returns [`ViewBaseError::Validation`] on the first unresolved type
    /// reference or duplicate name found.
    pub fn validate(&self, ir: AuthoringIR) -> Result<AuthoringIR> {
        let known_types = self.known_type_names(&ir);

        self.check_duplicate_names(&ir)?;
        self.check_type_references(&ir, &known_types)?;
        self.check_fact_tables(&ir)?;

        Ok(ir)
    }

    /// Every name an SDL type string is allowed to resolve to: the IR's own
    /// types, enums, interfaces, unions and input types.
    fn known_type_names(&self, ir: &AuthoringIR) -> HashSet<String> {
        let mut names = HashSet::new();
        names.extend(ir.types.iter().map(|t| t.name.clone()));
        names.extend(ir.enums.iter().map(|e| e.name.clone()));
        names.extend(ir.interfaces.iter().map(|i| i.name.clone()));
        names.extend(ir.unions.iter().map(|u| u.name.clone()));
        names.extend(ir.input_types.iter().map(|i| i.name.clone()));
        names
    }

    fn is_resolvable(&self, type_str: &str, known_types: &HashSet<String>) -> bool {
        let name = base_type_name(type_str);
        BUILTIN_SCALARS.contains(&name) || known_types.contains(name)
    }

    fn check_type_references(&self, ir: &AuthoringIR, known_types: &HashSet<String>) -> Result<()> {
        for t in &ir.types {
            for field in &t.fields {
                self.require_resolvable(&field.field_type, known_types, &format!("{}.{}", t.name, field.name))?;
            }
            for interface in &t.implements {
                if !known_types.contains(interface) {
                    return Err(ViewBaseError::validation_at(
                        format!("type '{}' implements undefined interface '{interface}'", t.name),
                        t.name.clone(),
                    ));
                }
            }
        }

        for interface in &ir.interfaces {
            for field in &interface.fields {
                self.require_resolvable(
                    &field.field_type,
                    known_types,
                    &format!("{}.{}", interface.name, field.name),
                )?;
            }
        }

        for union in &ir.unions {
            for member in &union.types {
                if !known_types.contains(member) {
                    return Err(ViewBaseError::validation_at(
                        format!("union '{}' references undefined member type '{member}'", union.name),
                        union.name.clone(),
                    ));
                }
            }
        }

        for input_type in &ir.input_types {
            for field in &input_type.fields {
                self.require_resolvable(
                    &field.field_type,
                    known_types,
                    &format!("{}.{}", input_type.name, field.name),
                )?;
            }
        }

        for query in &ir.queries {
            self.require_resolvable(&query.return_type, known_types, &query.name)?;
            for arg in &query.arguments {
                self.require_resolvable(&arg.arg_type, known_types, &format!("{}({})", query.name, arg.name))?;
            }
        }

        for mutation in &ir.mutations {
            self.require_resolvable(&mutation.return_type, known_types, &mutation.name)?;
            for arg in &mutation.arguments {
                self.require_resolvable(
                    &arg.arg_type,
                    known_types,
                    &format!("{}({})", mutation.name, arg.name),
                )?;
            }
        }

        for subscription in &ir.subscriptions {
            self.require_resolvable(&subscription.return_type, known_types, &subscription.name)?;
            for arg in &subscription.arguments {
                self.require_resolvable(
                    &arg.arg_type,
                    known_types,
                    &format!("{}({})", subscription.name, arg.name),
                )?;
            }
        }

        Ok(())
    }

    fn require_resolvable(&self, type_str: &str, known_types: &HashSet<String>, path: &str) -> Result<()> {
        if self.is_resolvable(type_str, known_types) {
            Ok(())
        } else {
            Err(ViewBaseError::validation_at(
                format!("unresolved type reference '{type_str}'"),
                path.to_string(),
            ))
        }
    }

    fn check_duplicate_names(&self, ir: &AuthoringIR) -> Result<()> {
        Self::reject_duplicates(ir.types.iter().map(|t| t.name.as_str()), "type")?;
        Self::reject_duplicates(ir.enums.iter().map(|e| e.name.as_str()), "enum")?;
        Self::reject_duplicates(ir.interfaces.iter().map(|i| i.name.as_str()), "interface")?;
        Self::reject_duplicates(ir.unions.iter().map(|u| u.name.as_str()), "union")?;
        Self::reject_duplicates(ir.input_types.iter().map(|i| i.name.as_str()), "input type")?;
        Self::reject_duplicates(ir.queries.iter().map(|q| q.name.as_str()), "query")?;
        Self::reject_duplicates(ir.mutations.iter().map(|m| m.name.as_str()), "mutation")?;
        Self::reject_duplicates(ir.subscriptions.iter().map(|s| s.name.as_str()), "subscription")?;
        Ok(())
    }

    fn reject_duplicates<'a>(names: impl Iterator<Item = &'a str>, kind: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name) {
                return Err(ViewBaseError::validation(format!("duplicate {kind} name '{name}'")));
            }
        }
        Ok(())
    }

    /// Fact table metadata is keyed by table name; every key must name a
    /// table actually bound to at least one type's `sql_source`.
    fn check_fact_tables(&self, ir: &AuthoringIR) -> Result<()> {
        if ir.fact_tables.is_empty() {
            return Ok(());
        }

        let sources: HashSet<&str> = ir
            .types
            .iter()
            .filter_map(|t| t.sql_source.as_deref())
            .collect();

        for table_name in ir.fact_tables.keys() {
            if !sources.contains(table_name.as_str()) {
                return Err(ViewBaseError::validation_at(
                    format!("fact table metadata references unbound table '{table_name}'"),
                    table_name.clone(),
                ));
            }
        }

        Ok(())
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::ir::{
        AutoParams, IRArgument, IREnum, IRField, IRQuery, IRType,
    };

    fn field(name: &str, field_type: &str) -> IRField {
        IRField {
            name: name.to_string(),
            field_type: field_type.to_string(),
            nullable: false,
            description: None,
            sql_column: None,
        }
    }

    #[test]
    fn test_validator_new_on_empty_ir() {
        let validator = SchemaValidator::new();
        let ir = AuthoringIR::new();
        let result = validator.validate(ir);
        assert!(result.is_ok());
    }

    #[test]
    fn test_rejects_unresolved_field_type() {
        let mut ir = AuthoringIR::new();
        ir.types.push(IRType {
            name: "User".to_string(),
            fields: vec![field("pet", "Dog")],
            sql_source: Some("v_user".to_string()),
            description: None,
            implements: Vec::new(),
        });

        let validator = SchemaValidator::new();
        assert!(validator.validate(ir).is_err());
    }

    #[test]
    fn test_accepts_known_list_type() {
        let mut ir = AuthoringIR::new();
        ir.types.push(IRType {
            name: "User".to_string(),
            fields: vec![field("posts", "[Post!]!")],
            sql_source: Some("v_user".to_string()),
            description: None,
            implements: Vec::new(),
        });
        ir.types.push(IRType {
            name: "Post".to_string(),
            fields: vec![field("id", "ID!")],
            sql_source: Some("v_post".to_string()),
            description: None,
            implements: Vec::new(),
        });

        let validator = SchemaValidator::new();
        assert!(validator.validate(ir).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_type_names() {
        let mut ir = AuthoringIR::new();
        for _ in 0..2 {
            ir.types.push(IRType {
                name: "User".to_string(),
                fields: vec![],
                sql_source: Some("v_user".to_string()),
                description: None,
                implements: Vec::new(),
            });
        }

        let validator = SchemaValidator::new();
        assert!(validator.validate(ir).is_err());
    }

    #[test]
    fn test_query_return_type_must_resolve() {
        let mut ir = AuthoringIR::new();
        ir.queries.push(IRQuery {
            name: "users".to_string(),
            return_type: "User".to_string(),
            returns_list: true,
            nullable: false,
            arguments: vec![IRArgument {
                name: "limit".to_string(),
                arg_type: "Int".to_string(),
                nullable: true,
                default_value: None,
                description: None,
            }],
            sql_source: Some("v_user".to_string()),
            description: None,
            auto_params: AutoParams::default(),
        });

        let validator = SchemaValidator::new();
        assert!(validator.validate(ir).is_err());
    }

    #[test]
    fn test_enum_satisfies_type_reference() {
        let mut ir = AuthoringIR::new();
        ir.enums.push(IREnum {
            name: "Status".to_string(),
            values: vec![],
            description: None,
        });
        ir.types.push(IRType {
            name: "Order".to_string(),
            fields: vec![field("status", "Status!")],
            sql_source: Some("v_order".to_string()),
            description: None,
            implements: Vec::new(),
        });

        let validator = SchemaValidator::new();
        assert!(validator.validate(ir).is_ok());
    }
}
