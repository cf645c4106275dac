//! Input validation.
//!
//! This is where the authored schema's loosely-typed `Value` sum type gets
//! coerced and checked at the compiler/validator boundary: ID policy
//! enforcement, rich-scalar formats (email, phone, VIN, country code, IBAN
//! checksum), cross-field comparisons, and `oneOf`/`anyOf` input-object
//! shape rules. Anything that would otherwise be duck-typed at request time
//! is surfaced here as a validation error instead.

mod async_validators;
mod checksum;
mod compile_time;
mod composite;
mod cross_field;
mod date_validators;
mod error_responses;
mod id_policy;
mod inheritance;
mod input_object;
mod input_processor;
mod mutual_exclusivity;
mod rich_scalars;
mod rules;
mod validators;

pub use async_validators::{
    AsyncValidator, AsyncValidatorConfig, AsyncValidatorProvider, AsyncValidatorResult,
};
pub use checksum::{LuhnValidator, Mod97Validator};
pub use compile_time::{
    CompileTimeError, CompileTimeValidationResult, CompileTimeValidator, FieldType, SchemaContext,
    TypeDef,
};
pub use composite::{CompositeError, CompositeOperator, validate_all, validate_any, validate_not, validate_optional};
pub use cross_field::{ComparisonOperator, validate_cross_field_comparison};
pub use date_validators::{
    validate_date_range, validate_max_age, validate_max_date, validate_max_days_in_future,
    validate_max_days_in_past, validate_min_age, validate_min_date,
};
pub use error_responses::{GraphQLValidationError, GraphQLValidationResponse, ValidationErrorExtensions};
pub use id_policy::{IDPolicy, IDValidationError, validate_id, validate_ids};
pub use inheritance::{
    InheritanceMode, RuleMetadata, ValidationRuleRegistry, inherit_validation_rules,
    validate_inheritance,
};
pub use input_object::{InputObjectRule, InputObjectValidationResult, validate_input_object};
pub use input_processor::{InputProcessingConfig, ProcessingError, process_variables};
pub use mutual_exclusivity::{
    AnyOfValidator, ConditionalRequiredValidator, OneOfValidator, RequiredIfAbsentValidator,
};
pub use rich_scalars::{CountryCodeValidator, EmailValidator, PhoneNumberValidator, VinValidator};
pub use rules::ValidationRule;
pub use validators::{
    EnumValidator, LengthValidator, PatternValidator, RangeValidator, RequiredValidator,
    Validator, create_validator_from_rule,
};
