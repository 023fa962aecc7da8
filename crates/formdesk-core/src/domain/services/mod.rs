//! Domain services module

pub mod recorder;
pub mod render;

pub use recorder::build_response;
pub use render::{
    check_answers, compute_progress, is_filled, normalize_values, preview, validate_submission, FieldErrorKind,
    SubmissionErrors, SubmissionPreview,
};
