//! Outbound ports (Repository traits)
//!
//! The persistence gateway: document-store operations the use cases need.
//! Implementations must not cache; every read reflects the store.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::{FormSchema, ResponseRecord};
use crate::domain::value_objects::EntityId;
use crate::domain::DomainEvent;

/// Form schema repository port
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// All forms, newest first
    async fn list(&self) -> Result<Vec<FormSchema>, RepositoryError>;

    /// Find form by ID
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<FormSchema>, RepositoryError>;

    /// Save form (insert or replace)
    async fn save(&self, form: &FormSchema) -> Result<(), RepositoryError>;

    /// Delete form, `NotFound` if absent
    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;
}

/// Response record repository port
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Find response by ID
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<ResponseRecord>, RepositoryError>;

    /// Responses of one form, newest first
    async fn list_by_form(&self, form_id: &EntityId) -> Result<Vec<ResponseRecord>, RepositoryError>;

    /// Every response, newest first
    async fn list_all(&self) -> Result<Vec<ResponseRecord>, RepositoryError>;

    /// Insert a response; records are never updated
    async fn insert(&self, response: &ResponseRecord) -> Result<(), RepositoryError>;

    /// Delete one response, `NotFound` if absent
    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;

    /// Delete every response of a form, returning how many were removed
    async fn delete_by_form(&self, form_id: &EntityId) -> Result<usize, RepositoryError>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish domain events
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError>;
}

/// Repository error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),
}
