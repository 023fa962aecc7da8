//! In-memory repository implementations
//!
//! Back the API server when no external store is configured, and the tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::aggregates::{FormSchema, ResponseRecord};
use crate::domain::value_objects::EntityId;
use crate::domain::DomainEvent;
use crate::ports::outbound::{EventPublisher, FormRepository, RepositoryError, ResponseRepository};

/// In-memory form repository
#[derive(Default)]
pub struct InMemoryFormRepository {
    forms: RwLock<HashMap<String, FormSchema>>,
}

impl InMemoryFormRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormRepository for InMemoryFormRepository {
    async fn list(&self) -> Result<Vec<FormSchema>, RepositoryError> {
        let forms = self.forms.read();
        let mut all: Vec<FormSchema> = forms.values().cloned().collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(all)
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<FormSchema>, RepositoryError> {
        let forms = self.forms.read();
        Ok(forms.get(id.as_str()).cloned())
    }

    async fn save(&self, form: &FormSchema) -> Result<(), RepositoryError> {
        let mut forms = self.forms.write();
        forms.insert(form.id().to_string(), form.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        let mut forms = self.forms.write();
        forms
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

/// In-memory response repository
#[derive(Default)]
pub struct InMemoryResponseRepository {
    responses: RwLock<HashMap<String, ResponseRecord>>,
}

impl InMemoryResponseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect<F>(&self, keep: F) -> Vec<ResponseRecord>
    where
        F: Fn(&ResponseRecord) -> bool,
    {
        let responses = self.responses.read();
        let mut matching: Vec<ResponseRecord> =
            responses.values().filter(|r| keep(r)).cloned().collect();
        matching.sort_by(|a, b| b.submitted_at().cmp(&a.submitted_at()));
        matching
    }
}

#[async_trait]
impl ResponseRepository for InMemoryResponseRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<ResponseRecord>, RepositoryError> {
        let responses = self.responses.read();
        Ok(responses.get(id.as_str()).cloned())
    }

    async fn list_by_form(&self, form_id: &EntityId) -> Result<Vec<ResponseRecord>, RepositoryError> {
        Ok(self.collect(|r| r.form_id() == form_id))
    }

    async fn list_all(&self) -> Result<Vec<ResponseRecord>, RepositoryError> {
        Ok(self.collect(|_| true))
    }

    async fn insert(&self, response: &ResponseRecord) -> Result<(), RepositoryError> {
        let mut responses = self.responses.write();
        if responses.contains_key(response.id().as_str()) {
            return Err(RepositoryError::Storage(format!(
                "response {} already recorded",
                response.id()
            )));
        }
        responses.insert(response.id().to_string(), response.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        let mut responses = self.responses.write();
        responses
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn delete_by_form(&self, form_id: &EntityId) -> Result<usize, RepositoryError> {
        let mut responses = self.responses.write();
        let before = responses.len();
        responses.retain(|_, r| r.form_id() != form_id);
        Ok(before - responses.len())
    }
}

/// Publisher that writes each event to the tracing log
#[derive(Default)]
pub struct LoggingEventPublisher;

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        for event in events {
            tracing::info!(
                event_type = event.event_type(),
                aggregate_id = %event.aggregate_id(),
                "domain event"
            );
        }
        Ok(())
    }
}

/// No-op event publisher
#[derive(Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        Ok(())
    }
}
