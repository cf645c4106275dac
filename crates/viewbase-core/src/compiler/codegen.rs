//! Code generator - produces final CompiledSchema JSON.
//!
//! # Overview
//!
//! Takes validated IR and SQL templates, produces runtime-optimized
//! CompiledSchema ready for execution. This is the last compilation phase:
//! every GraphQL-SDL type string in the IR (`"[Post!]!"`, `"CreateUserInput"`,
//! ...) is resolved here, against the full set of names the IR declares,
//! into the `FieldType` the runtime actually dispatches on.

use std::collections::HashSet;

use super::ir::{
    AuthoringIR, IREnum, IRInputType, IRInterface, IRMutation, IRQuery, IRSubscription, IRType,
    IRUnion,
};
use super::lowering::SqlTemplate;
use crate::error::Result;
use crate::schema::{
    ArgumentDefinition, AutoParams as SchemaAutoParams, CompiledSchema, DeprecationInfo,
    EnumDefinition, EnumValueDefinition, FieldDefinition, FieldType, InputFieldDefinition,
    InputObjectDefinition, InterfaceDefinition, MutationDefinition, MutationOperation,
    QueryDefinition, SubscriptionDefinition, TypeDefinition, UnionDefinition,
};
use crate::utils::casing::to_snake_case;

/// Code generator.
pub struct CodeGenerator {
    optimize: bool,
}

impl CodeGenerator {
    /// Create new code generator.
    #[must_use]
    pub fn new(optimize: bool) -> Self {
        Self { optimize }
    }

    /// Generate CompiledSchema from IR and SQL templates.
    ///
    /// # Arguments
    ///
    /// * `ir` - Validated IR
    /// * `_templates` - SQL templates, reserved for projection-hint
    ///   generation once the optimizer inlines them into `sql_projection_hint`
    ///
    /// # Returns
    ///
    /// CompiledSchema ready for runtime execution
    ///
    /// # Errors
    ///
    /// Returns error if code generation fails.
    pub fn generate(&self, ir: &AuthoringIR, _templates: &[SqlTemplate]) -> Result<CompiledSchema> {
        let known_types = known_type_names(ir);

        let types = ir.types.iter().map(|t| self.lower_type(t, &known_types)).collect();
        let enums = ir.enums.iter().map(lower_enum).collect();
        let interfaces = ir
            .interfaces
            .iter()
            .map(|i| self.lower_interface(i, &known_types))
            .collect();
        let unions = ir.unions.iter().map(lower_union).collect();
        let input_types = ir
            .input_types
            .iter()
            .map(|i| self.lower_input_type(i, &known_types))
            .collect();
        let queries = ir
            .queries
            .iter()
            .map(|q| self.lower_query(q, &known_types))
            .collect();
        let mutations = ir
            .mutations
            .iter()
            .map(|m| self.lower_mutation(m, &known_types))
            .collect();
        let subscriptions = ir
            .subscriptions
            .iter()
            .map(|s| self.lower_subscription(s, &known_types))
            .collect();

        Ok(CompiledSchema {
            types,
            enums,
            input_types,
            interfaces,
            unions,
            queries,
            mutations,
            subscriptions,
            directives: Vec::new(),
            fact_tables: ir.fact_tables.clone(),
        })
    }

    fn lower_type(&self, t: &IRType, known_types: &HashSet<String>) -> TypeDefinition {
        TypeDefinition {
            name: t.name.clone(),
            sql_source: t.sql_source.clone().unwrap_or_else(|| t.name.clone()),
            jsonb_column: "data".to_string(),
            description: t.description.clone(),
            sql_projection_hint: None,
            implements: t.implements.clone(),
            fields: t
                .fields
                .iter()
                .map(|f| FieldDefinition {
                    name: f.name.clone(),
                    field_type: FieldType::parse(&f.field_type, known_types),
                    nullable: f.nullable,
                    description: f.description.clone(),
                    default_value: None,
                    vector_config: None,
                    alias: None,
                    deprecation: None,
                    requires_scope: None,
                })
                .collect(),
        }
    }

    fn lower_interface(&self, i: &IRInterface, known_types: &HashSet<String>) -> InterfaceDefinition {
        InterfaceDefinition {
            name: i.name.clone(),
            description: i.description.clone(),
            fields: i
                .fields
                .iter()
                .map(|f| FieldDefinition {
                    name: f.name.clone(),
                    field_type: FieldType::parse(&f.field_type, known_types),
                    nullable: f.nullable,
                    description: f.description.clone(),
                    default_value: None,
                    vector_config: None,
                    alias: None,
                    deprecation: None,
                    requires_scope: None,
                })
                .collect(),
        }
    }

    fn lower_input_type(&self, i: &IRInputType, known_types: &HashSet<String>) -> InputObjectDefinition {
        let _ = known_types;
        InputObjectDefinition {
            name: i.name.clone(),
            description: i.description.clone(),
            fields: i
                .fields
                .iter()
                .map(|f| InputFieldDefinition {
                    name: f.name.clone(),
                    field_type: f.field_type.clone(),
                    description: f.description.clone(),
                    default_value: f.default_value.as_ref().map(json_to_sdl_value),
                    deprecation: None,
                    validation_rules: Vec::new(),
                })
                .collect(),
            metadata: None,
        }
    }

    fn lower_query(&self, q: &IRQuery, known_types: &HashSet<String>) -> QueryDefinition {
        QueryDefinition {
            name: q.name.clone(),
            return_type: q.return_type.clone(),
            returns_list: q.returns_list,
            nullable: q.nullable,
            arguments: q.arguments.iter().map(|a| lower_argument(a, known_types)).collect(),
            sql_source: q.sql_source.clone(),
            description: q.description.clone(),
            auto_params: SchemaAutoParams {
                has_where: q.auto_params.has_where,
                has_order_by: q.auto_params.has_order_by,
                has_limit: q.auto_params.has_limit,
                has_offset: q.auto_params.has_offset,
            },
            deprecation: None,
            jsonb_column: "data".to_string(),
        }
    }

    fn lower_mutation(&self, m: &IRMutation, known_types: &HashSet<String>) -> MutationDefinition {
        MutationDefinition {
            name: m.name.clone(),
            return_type: m.return_type.clone(),
            arguments: m.arguments.iter().map(|a| lower_argument(a, known_types)).collect(),
            description: m.description.clone(),
            operation: self.lower_operation(m),
        }
    }

    /// Every mutation dispatches through a stored procedure; the authoring-side
    /// `Create`/`Update`/`Delete`/`Custom` distinction only shapes the
    /// generated function's SQL body, not how the engine calls it, so all
    /// four collapse to `MutationOperation::Function`.
    fn lower_operation(&self, m: &IRMutation) -> MutationOperation {
        MutationOperation::Function {
            name: format!("fn_{}", to_snake_case(&m.name)),
        }
    }

    fn lower_subscription(&self, s: &IRSubscription, known_types: &HashSet<String>) -> SubscriptionDefinition {
        SubscriptionDefinition {
            name: s.name.clone(),
            return_type: s.return_type.clone(),
            arguments: s.arguments.iter().map(|a| lower_argument(a, known_types)).collect(),
            description: s.description.clone(),
            topic: None,
            deprecation: None,
            filter: None,
        }
    }

    /// Check if optimization is enabled.
    #[must_use]
    pub const fn optimize(&self) -> bool {
        self.optimize
    }
}

fn lower_argument(a: &super::ir::IRArgument, known_types: &HashSet<String>) -> ArgumentDefinition {
    ArgumentDefinition {
        name: a.name.clone(),
        arg_type: FieldType::parse(&a.arg_type, known_types),
        nullable: a.nullable,
        default_value: a.default_value.clone(),
        description: a.description.clone(),
        deprecation: None,
    }
}

fn lower_enum(e: &IREnum) -> EnumDefinition {
    EnumDefinition {
        name: e.name.clone(),
        description: e.description.clone(),
        values: e
            .values
            .iter()
            .map(|v| EnumValueDefinition {
                name: v.name.clone(),
                description: v.description.clone(),
                deprecation: v
                    .deprecation_reason
                    .clone()
                    .map(|reason| DeprecationInfo { reason: Some(reason) }),
            })
            .collect(),
    }
}

fn lower_union(u: &IRUnion) -> UnionDefinition {
    UnionDefinition {
        name: u.name.clone(),
        description: u.description.clone(),
        member_types: u.types.clone(),
    }
}

/// Every name an SDL type string in this IR is allowed to resolve to.
fn known_type_names(ir: &AuthoringIR) -> HashSet<String> {
    let mut names = HashSet::new();
    names.extend(ir.types.iter().map(|t| t.name.clone()));
    names.extend(ir.enums.iter().map(|e| e.name.clone()));
    names.extend(ir.interfaces.iter().map(|i| i.name.clone()));
    names.extend(ir.unions.iter().map(|u| u.name.clone()));
    names.extend(ir.input_types.iter().map(|i| i.name.clone()));
    names
}

/// Render a JSON default value as GraphQL SDL value text.
///
/// Strings become quoted SDL string literals; everything else (numbers,
/// booleans, null, arrays, objects) already matches SDL value syntax closely
/// enough to use its JSON text verbatim.
fn json_to_sdl_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => format!("{s:?}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::ir::{
        AutoParams, IRArgument, IREnumValue, IRField, IRInputField, MutationOperation as IrOp,
    };

    #[test]
    fn test_code_generator_new() {
        let generator = CodeGenerator::new(true);
        assert!(generator.optimize());

        let generator = CodeGenerator::new(false);
        assert!(!generator.optimize());
    }

    #[test]
    fn test_generate_empty_schema() {
        let generator = CodeGenerator::new(true);
        let ir = AuthoringIR::new();
        let templates = Vec::new();

        let result = generator.generate(&ir, &templates);
        assert!(result.is_ok());

        let schema = result.unwrap();
        assert!(schema.types.is_empty());
        assert!(schema.queries.is_empty());
    }

    #[test]
    fn test_lowers_field_types_against_known_types() {
        let generator = CodeGenerator::new(true);
        let mut ir = AuthoringIR::new();
        ir.types.push(IRType {
            name: "User".to_string(),
            fields: vec![IRField {
                name: "posts".to_string(),
                field_type: "[Post!]!".to_string(),
                nullable: false,
                description: None,
                sql_column: None,
            }],
            sql_source: Some("v_user".to_string()),
            description: None,
            implements: vec!["Node".to_string()],
        });
        ir.types.push(IRType {
            name: "Post".to_string(),
            fields: vec![],
            sql_source: Some("v_post".to_string()),
            description: None,
            implements: Vec::new(),
        });

        let schema = generator.generate(&ir, &[]).unwrap();
        let user = schema.types.iter().find(|t| t.name == "User").unwrap();
        assert_eq!(user.implements, vec!["Node".to_string()]);
        assert_eq!(
            user.fields[0].field_type,
            FieldType::List(Box::new(FieldType::Object("Post".to_string())))
        );
    }

    #[test]
    fn test_mutation_operation_dispatches_to_function() {
        let generator = CodeGenerator::new(true);
        let mut ir = AuthoringIR::new();
        ir.mutations.push(IRMutation {
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
            operation: IrOp::Create,
        });

        let schema = generator.generate(&ir, &[]).unwrap();
        let mutation = &schema.mutations[0];
        assert_eq!(
            mutation.operation,
            MutationOperation::Function {
                name: "fn_create_user".to_string()
            }
        );
    }

    #[test]
    fn test_enum_values_carry_deprecation() {
        let generator = CodeGenerator::new(true);
        let mut ir = AuthoringIR::new();
        ir.enums.push(IREnum {
            name: "Status".to_string(),
            values: vec![IREnumValue {
                name: "LEGACY".to_string(),
                description: None,
                deprecation_reason: Some("use ACTIVE instead".to_string()),
            }],
            description: None,
        });

        let schema = generator.generate(&ir, &[]).unwrap();
        let status = &schema.enums[0];
        assert!(status.values[0].deprecation.is_some());
    }

    #[test]
    fn test_input_field_default_value_renders_sdl() {
        let generator = CodeGenerator::new(true);
        let mut ir = AuthoringIR::new();
        ir.input_types.push(IRInputType {
            name: "CreateUserInput".to_string(),
            fields: vec![IRInputField {
                name: "role".to_string(),
                field_type: "String".to_string(),
                nullable: true,
                default_value: Some(serde_json::json!("member")),
                description: None,
            }],
            description: None,
        });

        let schema = generator.generate(&ir, &[]).unwrap();
        let input = &schema.input_types[0];
        assert_eq!(input.fields[0].default_value.as_deref(), Some("\"member\""));
    }

    #[test]
    fn test_fact_tables_pass_through() {
        let generator = CodeGenerator::new(true);
        let mut ir = AuthoringIR::new();
        ir.fact_tables
            .insert("tf_sales".to_string(), serde_json::json!({"measures": ["amount"]}));

        let schema = generator.generate(&ir, &[]).unwrap();
        assert!(schema.fact_tables.contains_key("tf_sales"));
    }
}
