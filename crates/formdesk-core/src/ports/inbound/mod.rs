//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: application service interfaces.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::application::dto::*;
use crate::domain::aggregates::{FormSchema, ResponseRecord};
use crate::domain::services::SubmissionPreview;
use crate::domain::value_objects::EntityId;
use crate::error::Result;

/// Form management use cases
#[async_trait]
pub trait FormUseCases: Send + Sync {
    /// Summaries (fields omitted), newest first
    async fn list_forms(&self, filter: &FormFilter) -> Result<Vec<FormSummary>>;

    /// Get a form with its fields
    async fn get_form(&self, id: &EntityId) -> Result<FormSchema>;

    /// Validate and store a new form, returning its id
    async fn create_form(&self, draft: FormDraft) -> Result<EntityId>;

    /// Replace name, metadata and fields of an existing form
    async fn update_form(&self, id: &EntityId, draft: FormDraft) -> Result<FormSchema>;

    /// Delete a form and every response recorded against it
    async fn delete_form(&self, id: &EntityId) -> Result<usize>;

    /// Copy a form under a new id
    async fn duplicate_form(&self, id: &EntityId) -> Result<EntityId>;

    /// Dashboard counters
    async fn stats(&self) -> Result<FormStats>;
}

/// Submission and response review use cases
#[async_trait]
pub trait ResponseUseCases: Send + Sync {
    /// Validate raw answers and record them, returning the response id
    async fn submit_response(&self, form_id: &EntityId, submission: Submission) -> Result<EntityId>;

    /// Progress and field errors for answers in progress; nothing is stored
    async fn preview_submission(
        &self,
        form_id: &EntityId,
        values: &Map<String, Value>,
    ) -> Result<SubmissionPreview>;

    /// Responses of one form, newest first
    async fn list_responses(&self, form_id: &EntityId) -> Result<Vec<ResponseRecord>>;

    /// Every response, newest first
    async fn list_all_responses(&self) -> Result<Vec<ResponseRecord>>;

    async fn get_response(&self, id: &EntityId) -> Result<ResponseRecord>;

    async fn delete_response(&self, id: &EntityId) -> Result<()>;

    /// CSV export of a form's responses
    async fn export_csv(&self, form_id: &EntityId) -> Result<CsvExport>;
}
