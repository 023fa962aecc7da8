//! Command handlers
//!
//! Application services that orchestrate use cases.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::application::dto::*;
use crate::application::export;
use crate::domain::aggregates::{duplicate_schema, FormSchema, ResponseRecord};
use crate::domain::events::{DomainEvent, FormEvent, ResponseEvent};
use crate::domain::services::{self, build_response, check_answers, SubmissionPreview};
use crate::domain::value_objects::{EntityId, FormStatus};
use crate::error::{FormsError, Result};
use crate::ports::inbound::{FormUseCases, ResponseUseCases};
use crate::ports::outbound::{EventPublisher, FormRepository, RepositoryError, ResponseRepository};

async fn load_form(forms: &dyn FormRepository, id: &EntityId) -> Result<FormSchema> {
    forms
        .find_by_id(id)
        .await?
        .ok_or_else(|| FormsError::FormNotFound(id.to_string()))
}

/// Events are published after the change is stored; a failing publisher
/// does not undo it.
async fn publish(events: &dyn EventPublisher, event: DomainEvent) {
    let event_type = event.event_type();
    if let Err(e) = events.publish(vec![event]).await {
        tracing::warn!(event_type, error = %e, "failed to publish domain event");
    }
}

/// Form application service
pub struct FormService {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
    events: Arc<dyn EventPublisher>,
}

impl FormService {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        responses: Arc<dyn ResponseRepository>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            forms,
            responses,
            events,
        }
    }
}

#[async_trait]
impl FormUseCases for FormService {
    async fn list_forms(&self, filter: &FormFilter) -> Result<Vec<FormSummary>> {
        let forms = self.forms.list().await?;
        let responses = self.responses.list_all().await?;

        let mut counts: HashMap<&EntityId, usize> = HashMap::new();
        for response in &responses {
            *counts.entry(response.form_id()).or_default() += 1;
        }

        Ok(forms
            .iter()
            .filter(|form| filter.matches(form))
            .map(|form| FormSummary::of(form, counts.get(form.id()).copied().unwrap_or(0)))
            .collect())
    }

    async fn get_form(&self, id: &EntityId) -> Result<FormSchema> {
        load_form(self.forms.as_ref(), id).await
    }

    async fn create_form(&self, draft: FormDraft) -> Result<EntityId> {
        let form = draft.into_schema()?;
        self.forms.save(&form).await?;

        tracing::info!(form_id = %form.id(), fields = form.fields().len(), "form created");
        publish(
            self.events.as_ref(),
            DomainEvent::Form(FormEvent::Created {
                form_id: form.id().clone(),
                name: form.name().to_string(),
            }),
        )
        .await;

        Ok(form.id().clone())
    }

    async fn update_form(&self, id: &EntityId, draft: FormDraft) -> Result<FormSchema> {
        let existing = load_form(self.forms.as_ref(), id).await?;

        let mut form = draft.into_schema()?;
        form.adopt_identity(&existing);
        self.forms.save(&form).await?;

        tracing::info!(form_id = %id, fields = form.fields().len(), "form updated");
        publish(
            self.events.as_ref(),
            DomainEvent::Form(FormEvent::Updated { form_id: id.clone() }),
        )
        .await;

        Ok(form)
    }

    async fn delete_form(&self, id: &EntityId) -> Result<usize> {
        let existing = load_form(self.forms.as_ref(), id).await?;

        self.forms.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound(_) => FormsError::FormNotFound(id.to_string()),
            other => other.into(),
        })?;

        let removed = match self.responses.delete_by_form(id).await {
            Ok(removed) => removed,
            Err(e) => {
                tracing::warn!(form_id = %id, error = %e, "response cleanup failed, restoring form");
                if let Err(restore) = self.forms.save(&existing).await {
                    tracing::error!(form_id = %id, error = %restore, "failed to restore form");
                }
                return Err(e.into());
            }
        };

        tracing::info!(form_id = %id, responses_removed = removed, "form deleted");
        publish(
            self.events.as_ref(),
            DomainEvent::Form(FormEvent::Deleted {
                form_id: id.clone(),
                responses_removed: removed,
            }),
        )
        .await;

        Ok(removed)
    }

    async fn duplicate_form(&self, id: &EntityId) -> Result<EntityId> {
        let original = load_form(self.forms.as_ref(), id).await?;
        let copy = duplicate_schema(&original);
        self.forms.save(&copy).await?;

        tracing::info!(source_id = %id, form_id = %copy.id(), "form duplicated");
        publish(
            self.events.as_ref(),
            DomainEvent::Form(FormEvent::Duplicated {
                source_id: id.clone(),
                form_id: copy.id().clone(),
            }),
        )
        .await;

        Ok(copy.id().clone())
    }

    async fn stats(&self) -> Result<FormStats> {
        let forms = self.forms.list().await?;
        let responses = self.responses.list_all().await?;
        Ok(FormStats {
            total_forms: forms.len(),
            active_forms: forms.iter().filter(|f| f.status() == FormStatus::Active).count(),
            total_responses: responses.len(),
        })
    }
}

/// Response application service
pub struct ResponseService {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
    events: Arc<dyn EventPublisher>,
}

impl ResponseService {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        responses: Arc<dyn ResponseRepository>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            forms,
            responses,
            events,
        }
    }
}

#[async_trait]
impl ResponseUseCases for ResponseService {
    async fn submit_response(&self, form_id: &EntityId, submission: Submission) -> Result<EntityId> {
        let form = load_form(self.forms.as_ref(), form_id).await?;
        if !form.is_submittable() {
            return Err(FormsError::EmptyFieldSet);
        }

        let (values, errors) = check_answers(&form, &submission.values);
        if !errors.is_empty() {
            tracing::warn!(form_id = %form_id, errors = %errors, "submission rejected");
            return Err(errors.into());
        }

        let mut record = build_response(&form, &values);
        if let Some(respondent) = submission.respondent {
            record = record.attributed_to(respondent);
        }
        self.responses.insert(&record).await?;

        // a delete that ran between the load and the insert has already
        // swept this form's responses
        if self.forms.find_by_id(form_id).await?.is_none() {
            match self.responses.delete(record.id()).await {
                Ok(()) | Err(RepositoryError::NotFound(_)) => {}
                Err(e) => {
                    tracing::error!(form_id = %form_id, response_id = %record.id(), error = %e, "failed to remove response to deleted form");
                }
            }
            tracing::warn!(form_id = %form_id, "form deleted during submission");
            return Err(FormsError::FormNotFound(form_id.to_string()));
        }

        tracing::info!(form_id = %form_id, response_id = %record.id(), "response recorded");
        publish(
            self.events.as_ref(),
            DomainEvent::Response(ResponseEvent::Submitted {
                response_id: record.id().clone(),
                form_id: form_id.clone(),
                submitted_at: record.submitted_at(),
            }),
        )
        .await;

        Ok(record.id().clone())
    }

    async fn preview_submission(
        &self,
        form_id: &EntityId,
        values: &Map<String, Value>,
    ) -> Result<SubmissionPreview> {
        let form = load_form(self.forms.as_ref(), form_id).await?;
        Ok(services::preview(&form, values))
    }

    async fn list_responses(&self, form_id: &EntityId) -> Result<Vec<ResponseRecord>> {
        Ok(self.responses.list_by_form(form_id).await?)
    }

    async fn list_all_responses(&self) -> Result<Vec<ResponseRecord>> {
        Ok(self.responses.list_all().await?)
    }

    async fn get_response(&self, id: &EntityId) -> Result<ResponseRecord> {
        self.responses
            .find_by_id(id)
            .await?
            .ok_or_else(|| FormsError::ResponseNotFound(id.to_string()))
    }

    async fn delete_response(&self, id: &EntityId) -> Result<()> {
        let record = self.get_response(id).await?;
        self.responses.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound(_) => FormsError::ResponseNotFound(id.to_string()),
            other => other.into(),
        })?;

        tracing::info!(response_id = %id, form_id = %record.form_id(), "response deleted");
        publish(
            self.events.as_ref(),
            DomainEvent::Response(ResponseEvent::Deleted {
                response_id: id.clone(),
                form_id: record.form_id().clone(),
            }),
        )
        .await;
        Ok(())
    }

    async fn export_csv(&self, form_id: &EntityId) -> Result<CsvExport> {
        let form = load_form(self.forms.as_ref(), form_id).await?;
        let responses = self.responses.list_by_form(form_id).await?;
        Ok(CsvExport {
            file_name: export::file_name(form.name()),
            content: export::to_csv(&form, &responses),
        })
    }
}
