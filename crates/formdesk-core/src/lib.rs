//! FormDesk Form Builder Core
//!
//! Self-hosted form builder: administrators define forms from a fixed
//! catalog of field types, respondents fill them in, administrators review
//! and export the collected responses.
//!
//! ## Architecture
//!
//! - **Domain Layer**: field-type registry, field values, form schema,
//!   response records, validation services, domain events
//! - **Application Layer**: use case orchestration, DTOs, CSV export
//! - **Ports Layer**: hexagonal interfaces (use cases, repositories)
//! - **Infrastructure Layer**: in-memory document store, event logging
//!
//! ## Submission pipeline
//!
//! ```text
//! raw JSON ──normalize──▶ FormValues ──validate──▶ ResponseRecord ──▶ ResponseRepository
//!              ▲                           ▲
//!        FieldType registry           FormSchema
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

pub use application::{FormService, ResponseService};
pub use domain::aggregates::{
    duplicate_schema, validate_schema, FieldDefinition, FormSchema, ResponseRecord, ResponseValue,
    SchemaViolation, SchemaViolations,
};
pub use domain::events::{DomainEvent, FormEvent, ResponseEvent};
pub use domain::services::{
    build_response, compute_progress, is_filled, normalize_values, validate_submission,
    FieldErrorKind, SubmissionErrors,
};
pub use domain::value_objects::{
    catalog, describe, EntityId, FieldType, FieldTypeDescriptor, FieldTypeError, FieldValue,
    FileRef, FormCategory, FormStatus, FormValues, InputShape,
};
pub use error::{FormsError, Result};
pub use ports::inbound::{FormUseCases, ResponseUseCases};
pub use ports::outbound::{EventPublisher, FormRepository, RepositoryError, ResponseRepository};
