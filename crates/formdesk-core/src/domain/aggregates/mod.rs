//! Aggregates module

pub mod form;
pub mod response;

pub use form::{
    duplicate_schema, validate_schema, FieldDefinition, FormSchema, SchemaViolation,
    SchemaViolations,
};
pub use response::{ResponseRecord, ResponseValue, ANONYMOUS_RESPONDENT, UNKNOWN_FIELD_LABEL};
