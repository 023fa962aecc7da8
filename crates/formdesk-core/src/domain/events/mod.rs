//! Domain Events
//!
//! Signals raised by the use cases. `FormEvent::Deleted` is emitted after a
//! form and every response referencing it have been removed.

use chrono::{DateTime, Utc};
use crate::domain::value_objects::EntityId;

/// All domain events of the forms bounded context
#[derive(Clone, Debug, PartialEq)]
pub enum DomainEvent {
    Form(FormEvent),
    Response(ResponseEvent),
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormEvent {
    Created {
        form_id: EntityId,
        name: String,
    },

    Updated {
        form_id: EntityId,
    },

    Deleted {
        form_id: EntityId,
        responses_removed: usize,
    },

    Duplicated {
        source_id: EntityId,
        form_id: EntityId,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResponseEvent {
    Submitted {
        response_id: EntityId,
        form_id: EntityId,
        submitted_at: DateTime<Utc>,
    },

    Deleted {
        response_id: EntityId,
        form_id: EntityId,
    },
}

impl DomainEvent {
    /// Get the aggregate ID this event belongs to
    pub fn aggregate_id(&self) -> &EntityId {
        match self {
            DomainEvent::Form(e) => match e {
                FormEvent::Created { form_id, .. } => form_id,
                FormEvent::Updated { form_id } => form_id,
                FormEvent::Deleted { form_id, .. } => form_id,
                FormEvent::Duplicated { form_id, .. } => form_id,
            },
            DomainEvent::Response(e) => match e {
                ResponseEvent::Submitted { response_id, .. } => response_id,
                ResponseEvent::Deleted { response_id, .. } => response_id,
            },
        }
    }

    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::Form(e) => match e {
                FormEvent::Created { .. } => "form.created",
                FormEvent::Updated { .. } => "form.updated",
                FormEvent::Deleted { .. } => "form.deleted",
                FormEvent::Duplicated { .. } => "form.duplicated",
            },
            DomainEvent::Response(e) => match e {
                ResponseEvent::Submitted { .. } => "response.submitted",
                ResponseEvent::Deleted { .. } => "response.deleted",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_metadata() {
        let event = DomainEvent::Form(FormEvent::Deleted {
            form_id: EntityId::from_string("f"),
            responses_removed: 3,
        });
        assert_eq!(event.event_type(), "form.deleted");
        assert_eq!(event.aggregate_id().as_str(), "f");
    }
}
