//! Error types for FormDesk

use thiserror::Error;

use crate::domain::aggregates::SchemaViolations;
use crate::domain::services::SubmissionErrors;
use crate::ports::outbound::RepositoryError;

/// Errors surfaced by the form and response use cases.
#[derive(Error, Debug)]
pub enum FormsError {
    #[error("form not found: {0}")]
    FormNotFound(String),

    #[error("response not found: {0}")]
    ResponseNotFound(String),

    /// The schema failed validation; every violation is listed.
    #[error("invalid form: {0}")]
    InvalidSchema(SchemaViolations),

    /// Required fields are empty or values do not match their field shape.
    #[error("submission rejected: {0}")]
    IncompleteSubmission(SubmissionErrors),

    #[error("form has no fields to submit")]
    EmptyFieldSet,

    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<RepositoryError> for FormsError {
    fn from(err: RepositoryError) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<SchemaViolations> for FormsError {
    fn from(violations: SchemaViolations) -> Self {
        Self::InvalidSchema(violations)
    }
}

impl From<SubmissionErrors> for FormsError {
    fn from(errors: SubmissionErrors) -> Self {
        Self::IncompleteSubmission(errors)
    }
}

impl FormsError {
    /// Stable machine-readable code for transport layers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::FormNotFound(_) | Self::ResponseNotFound(_) => "NOT_FOUND",
            Self::InvalidSchema(_) => "INVALID_SCHEMA",
            Self::IncompleteSubmission(_) => "INCOMPLETE_SUBMISSION",
            Self::EmptyFieldSet => "EMPTY_FIELD_SET",
            Self::Persistence(_) => "PERSISTENCE_FAILURE",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FormNotFound(_) | Self::ResponseNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, FormsError>;
