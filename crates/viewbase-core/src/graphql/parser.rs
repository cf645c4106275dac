//! GraphQL operation text → [`ParsedQuery`].
//!
//! Parsing is delegated to the `graphql-parser` crate; this module only
//! lowers its AST into the crate-local, serializable representation that
//! fragment resolution, directive evaluation, and the translator consume.
//! Multi-operation documents are rejected here — the caller selects which
//! operation to execute the way the GraphQL spec requires (an explicit
//! `operationName`), and this parser only ever returns the one operation it
//! was asked to find.

use graphql_parser::query::{
    self as gq, Definition, OperationDefinition, Selection as GqSelection, Value as GqValue,
};
use thiserror::Error;

use super::types::{
    Directive, FieldSelection, FragmentDefinition, GraphQLArgument, GraphQLType, ParsedQuery,
    VariableDefinition,
};

/// Errors raised while parsing or selecting a GraphQL operation.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The query text is not syntactically valid GraphQL.
    #[error("GraphQL syntax error: {0}")]
    Syntax(String),

    /// The document contains more than one operation and no `operation_name`
    /// (or a non-matching one) was supplied to disambiguate.
    #[error("ambiguous document: {0} operations defined, specify operation_name")]
    AmbiguousOperation(usize),

    /// `operation_name` was supplied but no operation in the document has it.
    #[error("operation '{0}' not found in document")]
    OperationNotFound(String),

    /// The document defines no operations at all.
    #[error("document contains no operations")]
    NoOperations,
}

/// Parse GraphQL operation text into a [`ParsedQuery`].
///
/// `operation_name` selects which operation to execute when the document
/// defines more than one; it may be omitted when the document defines
/// exactly one.
///
/// # Errors
///
/// Returns [`ParseError`] on invalid syntax, an ambiguous/missing operation
/// selection, or a document with no operations.
pub fn parse_query(source: &str, operation_name: Option<&str>) -> Result<ParsedQuery, ParseError> {
    let document =
        gq::parse_query::<String>(source).map_err(|e| ParseError::Syntax(e.to_string()))?;

    let fragments: Vec<FragmentDefinition> = document
        .definitions
        .iter()
        .filter_map(|def| match def {
            Definition::Fragment(frag) => Some(FragmentDefinition {
                name: frag.name.clone(),
                type_condition: type_condition_name(&frag.type_condition),
                selections: lower_selection_set(&frag.selection_set),
                fragment_spreads: collect_spreads(&frag.selection_set),
            }),
            Definition::Operation(_) => None,
        })
        .collect();

    let operations: Vec<&OperationDefinition<String>> = document
        .definitions
        .iter()
        .filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            Definition::Fragment(_) => None,
        })
        .collect();

    if operations.is_empty() {
        return Err(ParseError::NoOperations);
    }

    let selected = select_operation(&operations, operation_name)?;
    Ok(lower_operation(selected, fragments, source))
}

fn select_operation<'a>(
    operations: &[&'a OperationDefinition<String>],
    operation_name: Option<&str>,
) -> Result<&'a OperationDefinition<String>, ParseError> {
    if let Some(name) = operation_name {
        return operations
            .iter()
            .copied()
            .find(|op| operation_name_of(op).as_deref() == Some(name))
            .ok_or_else(|| ParseError::OperationNotFound(name.to_string()));
    }

    if operations.len() == 1 {
        return Ok(operations[0]);
    }

    Err(ParseError::AmbiguousOperation(operations.len()))
}

fn operation_name_of(op: &OperationDefinition<String>) -> Option<String> {
    match op {
        OperationDefinition::SelectionSet(_) => None,
        OperationDefinition::Query(q) => q.name.clone(),
        OperationDefinition::Mutation(m) => m.name.clone(),
        OperationDefinition::Subscription(s) => s.name.clone(),
    }
}

fn lower_operation(
    op: &OperationDefinition<String>,
    fragments: Vec<FragmentDefinition>,
    source: &str,
) -> ParsedQuery {
    let (operation_type, operation_name, selection_set, variables) = match op {
        OperationDefinition::SelectionSet(set) => ("query".to_string(), None, set, Vec::new()),
        OperationDefinition::Query(q) => (
            "query".to_string(),
            q.name.clone(),
            &q.selection_set,
            lower_variable_definitions(&q.variable_definitions),
        ),
        OperationDefinition::Mutation(m) => (
            "mutation".to_string(),
            m.name.clone(),
            &m.selection_set,
            lower_variable_definitions(&m.variable_definitions),
        ),
        OperationDefinition::Subscription(s) => (
            "subscription".to_string(),
            s.name.clone(),
            &s.selection_set,
            lower_variable_definitions(&s.variable_definitions),
        ),
    };

    let selections = lower_selection_set(selection_set);
    let root_field = selections
        .first()
        .map(|f| f.name.clone())
        .unwrap_or_default();

    ParsedQuery {
        operation_type,
        operation_name,
        root_field,
        selections,
        variables,
        fragments,
        source: source.to_string(),
    }
}

fn lower_variable_definitions(defs: &[gq::VariableDefinition<String>]) -> Vec<VariableDefinition> {
    defs.iter()
        .map(|d| VariableDefinition {
            name: d.name.clone(),
            var_type: lower_type(&d.var_type),
            default_value: d.default_value.as_ref().map(value_to_json_string),
        })
        .collect()
}

fn lower_type(ty: &gq::Type<String>) -> GraphQLType {
    fn inner(ty: &gq::Type<String>, nullable: bool) -> GraphQLType {
        match ty {
            gq::Type::NamedType(name) => GraphQLType {
                name: name.clone(),
                nullable,
                list: false,
                list_nullable: false,
            },
            gq::Type::ListType(inner_ty) => {
                let item = inner(inner_ty, true);
                GraphQLType {
                    name: item.name,
                    nullable,
                    list: true,
                    list_nullable: item.nullable,
                }
            }
            gq::Type::NonNullType(inner_ty) => inner(inner_ty, false),
        }
    }
    inner(ty, true)
}

fn lower_selection_set(set: &gq::SelectionSet<String>) -> Vec<FieldSelection> {
    set.items
        .iter()
        .filter_map(|sel| match sel {
            GqSelection::Field(field) => Some(FieldSelection {
                name: field.name.clone(),
                alias: field.alias.clone(),
                arguments: field
                    .arguments
                    .iter()
                    .map(|(name, value)| GraphQLArgument {
                        name: name.clone(),
                        value_type: value_type_name(value),
                        value_json: value_to_json_string(value),
                    })
                    .collect(),
                nested_fields: lower_selection_set(&field.selection_set),
                directives: lower_directives(&field.directives),
            }),
            // Fragment spreads/inline fragments are expanded by
            // `FragmentResolver` after parsing, not here — the parser's job
            // is syntax lowering, not semantic expansion.
            GqSelection::FragmentSpread(_) | GqSelection::InlineFragment(_) => None,
        })
        .collect()
}

fn collect_spreads(set: &gq::SelectionSet<String>) -> Vec<String> {
    let mut spreads = Vec::new();
    for sel in &set.items {
        match sel {
            GqSelection::FragmentSpread(spread) => spreads.push(spread.fragment_name.clone()),
            GqSelection::InlineFragment(inline) => {
                spreads.extend(collect_spreads(&inline.selection_set));
            }
            GqSelection::Field(field) => {
                spreads.extend(collect_spreads(&field.selection_set));
            }
        }
    }
    spreads
}

fn lower_directives(directives: &[gq::Directive<String>]) -> Vec<Directive> {
    directives
        .iter()
        .map(|d| Directive {
            name: d.name.clone(),
            arguments: d
                .arguments
                .iter()
                .map(|(name, value)| GraphQLArgument {
                    name: name.clone(),
                    value_type: value_type_name(value),
                    value_json: value_to_json_string(value),
                })
                .collect(),
        })
        .collect()
}

fn type_condition_name(condition: &gq::TypeCondition<String>) -> String {
    match condition {
        gq::TypeCondition::On(name) => name.clone(),
    }
}

fn value_type_name(value: &GqValue<String>) -> String {
    match value {
        GqValue::Variable(_) => "variable",
        GqValue::Int(_) => "int",
        GqValue::Float(_) => "float",
        GqValue::String(_) => "string",
        GqValue::Boolean(_) => "boolean",
        GqValue::Null => "null",
        GqValue::Enum(_) => "enum",
        GqValue::List(_) => "list",
        GqValue::Object(_) => "object",
    }
    .to_string()
}

fn value_to_json_string(value: &GqValue<String>) -> String {
    serde_json::to_string(&value_to_json(value)).unwrap_or_else(|_| "null".to_string())
}

fn value_to_json(value: &GqValue<String>) -> serde_json::Value {
    match value {
        GqValue::Variable(name) => serde_json::json!({ "$var": name }),
        GqValue::Int(i) => serde_json::Value::from(i.as_i64().unwrap_or_default()),
        GqValue::Float(f) => serde_json::json!(f),
        GqValue::String(s) => serde_json::Value::String(s.clone()),
        GqValue::Boolean(b) => serde_json::Value::Bool(*b),
        GqValue::Null => serde_json::Value::Null,
        GqValue::Enum(e) => serde_json::Value::String(e.clone()),
        GqValue::List(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        GqValue::Object(map) => {
            let obj = map
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect();
            serde_json::Value::Object(obj)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_query_root_field() {
        let parsed = parse_query("{ users { id name } }", None).unwrap();
        assert_eq!(parsed.operation_type, "query");
        assert_eq!(parsed.root_field, "users");
        assert_eq!(parsed.selections.len(), 1);
        assert_eq!(parsed.selections[0].nested_fields.len(), 2);
    }

    #[test]
    fn parses_mutation_operation_type() {
        let parsed = parse_query(
            r#"mutation { deleteUser(id: "u1") { id } }"#,
            None,
        )
        .unwrap();
        assert_eq!(parsed.operation_type, "mutation");
        assert_eq!(parsed.root_field, "deleteUser");
    }

    #[test]
    fn resolves_alias_as_response_key() {
        let parsed = parse_query("{ device: equipment { id } }", None).unwrap();
        assert_eq!(parsed.selections[0].response_key(), "device");
        assert_eq!(parsed.selections[0].name, "equipment");
    }

    #[test]
    fn captures_variable_definitions() {
        let parsed = parse_query(
            "query($limit: Int) { users(limit: $limit) { id } }",
            None,
        )
        .unwrap();
        assert_eq!(parsed.variables.len(), 1);
        assert_eq!(parsed.variables[0].name, "limit");
        assert_eq!(parsed.variables[0].var_type.name, "Int");
    }

    #[test]
    fn ambiguous_multi_operation_document_requires_name() {
        let source = "query A { users { id } } query B { posts { id } }";
        let err = parse_query(source, None).unwrap_err();
        assert!(matches!(err, ParseError::AmbiguousOperation(2)));

        let parsed = parse_query(source, Some("B")).unwrap();
        assert_eq!(parsed.root_field, "posts");
    }

    #[test]
    fn unknown_operation_name_errors() {
        let source = "query A { users { id } }";
        let err = parse_query(source, Some("Missing")).unwrap_err();
        assert!(matches!(err, ParseError::OperationNotFound(_)));
    }

    #[test]
    fn invalid_syntax_is_a_parse_error() {
        let err = parse_query("{ users {", None).unwrap_err();
        assert!(matches!(err, ParseError::Syntax(_)));
    }

    #[test]
    fn fragment_definitions_are_collected() {
        let source = "fragment F on User { id } query { users { ...F } }";
        let parsed = parse_query(source, None).unwrap();
        assert_eq!(parsed.fragments.len(), 1);
        assert_eq!(parsed.fragments[0].name, "F");
        assert_eq!(parsed.fragments[0].type_condition, "User");
    }
}
