//! Response Record Aggregate
//!
//! One completed submission. Carries a snapshot of the form name and of
//! each field label so it stays readable after the form is edited or
//! deleted. There is no update path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{EntityId, FieldValue, FormValues};

/// Label used for values whose field is no longer part of the schema.
pub const UNKNOWN_FIELD_LABEL: &str = "Unknown";

/// Respondent recorded when the submitter is not identified.
pub const ANONYMOUS_RESPONDENT: &str = "anonymous";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseValue {
    pub field_id: String,
    pub field_label: String,
    pub value: FieldValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    id: EntityId,
    form_id: EntityId,
    form_name: String,
    respondent: String,
    submitted_at: DateTime<Utc>,
    values: Vec<ResponseValue>,
}

impl ResponseRecord {
    /// Record a submission accepted now.
    pub fn record(form_id: EntityId, form_name: impl Into<String>, values: Vec<ResponseValue>) -> Self {
        Self {
            id: EntityId::new(),
            form_id,
            form_name: form_name.into(),
            respondent: ANONYMOUS_RESPONDENT.to_string(),
            submitted_at: Utc::now(),
            values,
        }
    }

    pub fn attributed_to(mut self, respondent: impl Into<String>) -> Self {
        let respondent = respondent.into();
        if !respondent.trim().is_empty() {
            self.respondent = respondent;
        }
        self
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn form_id(&self) -> &EntityId { &self.form_id }
    pub fn form_name(&self) -> &str { &self.form_name }
    pub fn respondent(&self) -> &str { &self.respondent }
    pub fn submitted_at(&self) -> DateTime<Utc> { self.submitted_at }
    pub fn values(&self) -> &[ResponseValue] { &self.values }

    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|v| v.field_id == field_id)
            .map(|v| &v.value)
    }

    /// Values keyed by field id, labels dropped.
    pub fn value_map(&self) -> FormValues {
        self.values
            .iter()
            .map(|v| (v.field_id.clone(), v.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResponseRecord {
        ResponseRecord::record(
            EntityId::from_string("form-1"),
            "Feedback",
            vec![ResponseValue {
                field_id: "f1".into(),
                field_label: "Name".into(),
                value: FieldValue::Text("Ada".into()),
            }],
        )
    }

    #[test]
    fn test_defaults_to_anonymous() {
        let record = sample();
        assert_eq!(record.respondent(), ANONYMOUS_RESPONDENT);
        assert_eq!(record.attributed_to("  ").respondent(), ANONYMOUS_RESPONDENT);
        assert_eq!(sample().attributed_to("ada@example.com").respondent(), "ada@example.com");
    }

    #[test]
    fn test_value_lookup() {
        let record = sample();
        assert_eq!(record.value("f1"), Some(&FieldValue::Text("Ada".into())));
        assert_eq!(record.value("missing"), None);
        assert_eq!(record.value_map().len(), 1);
    }
}
