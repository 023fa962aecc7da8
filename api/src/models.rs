//! API Models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use formdesk_core::application::dto::{
    FieldDraft, FormDraft, FormStats, FormSummary, Submission,
};
use formdesk_core::domain::services::SubmissionPreview;
use formdesk_core::{
    EntityId, FieldDefinition, FieldTypeDescriptor, FieldValue, FormCategory, FormSchema,
    FormStatus, InputShape, ResponseRecord, ResponseValue,
};

/// Standard API response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
                fields: None,
            }),
        }
    }

    /// Error carrying per-field codes, keyed by field id.
    pub fn rejected(code: &str, message: &str, fields: BTreeMap<String, String>) -> Self {
        let mut response = Self::error(code, message);
        if let Some(error) = response.error.as_mut() {
            error.fields = Some(fields);
        }
        response
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

/// Id of a newly created resource
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Created {
    #[schema(value_type = String)]
    pub id: EntityId,
}

// ============ Field types ============

/// Field type registry entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldTypeInfo {
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    pub requires_options: bool,
    #[schema(value_type = String)]
    pub input_shape: InputShape,
}

impl From<FieldTypeDescriptor> for FieldTypeInfo {
    fn from(descriptor: FieldTypeDescriptor) -> Self {
        Self {
            field_type: descriptor.field_type.tag().to_string(),
            label: descriptor.label.to_string(),
            requires_options: descriptor.requires_options,
            input_shape: descriptor.input_shape,
        }
    }
}

// ============ Forms ============

/// Form field
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Field {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    pub placeholder: String,
    pub help_text: String,
    pub options: Vec<String>,
    pub multiple: bool,
    pub sort_order: u32,
}

impl From<&FieldDefinition> for Field {
    fn from(field: &FieldDefinition) -> Self {
        Self {
            id: field.id.clone(),
            label: field.label.clone(),
            field_type: field.field_type.tag().to_string(),
            required: field.required,
            placeholder: field.placeholder.clone(),
            help_text: field.help_text.clone(),
            options: field.options.clone(),
            multiple: field.multiple,
            sort_order: field.sort_order,
        }
    }
}

/// Form with its fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Form {
    #[schema(value_type = String)]
    pub id: EntityId,
    pub name: String,
    pub description: String,
    #[schema(value_type = String)]
    pub category: FormCategory,
    #[schema(value_type = String)]
    pub status: FormStatus,
    pub fields: Vec<Field>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&FormSchema> for Form {
    fn from(schema: &FormSchema) -> Self {
        Self {
            id: schema.id().clone(),
            name: schema.name().to_string(),
            description: schema.description().to_string(),
            category: schema.category().clone(),
            status: schema.status(),
            fields: schema.fields().iter().map(Field::from).collect(),
            created_at: schema.created_at(),
            updated_at: schema.updated_at(),
        }
    }
}

/// Form listing entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormListItem {
    #[schema(value_type = String)]
    pub id: EntityId,
    pub name: String,
    pub description: String,
    #[schema(value_type = String)]
    pub category: FormCategory,
    #[schema(value_type = String)]
    pub status: FormStatus,
    pub field_count: usize,
    pub response_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FormSummary> for FormListItem {
    fn from(summary: FormSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            description: summary.description,
            category: summary.category,
            status: summary.status,
            field_count: summary.field_count,
            response_count: summary.response_count,
            created_at: summary.created_at,
            updated_at: summary.updated_at,
        }
    }
}

// The request models below mirror `FieldDraft`/`FormDraft` field for field.
// They carry the OpenAPI schema so the core crate stays free of utoipa.

/// Field as sent by the form editor
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct FieldCreate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default, alias = "helpText")]
    pub help_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub multiple: bool,
}

/// Form create/update request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct FormCreate {
    #[serde(default, alias = "form_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[schema(value_type = String)]
    pub category: FormCategory,
    #[serde(default)]
    #[schema(value_type = String)]
    pub status: FormStatus,
    #[serde(default)]
    pub fields: Vec<FieldCreate>,
}

impl From<FieldCreate> for FieldDraft {
    fn from(input: FieldCreate) -> Self {
        Self {
            id: input.id,
            label: input.label,
            field_type: input.field_type,
            required: input.required,
            placeholder: input.placeholder,
            help_text: input.help_text,
            options: input.options,
            multiple: input.multiple,
        }
    }
}

impl From<FormCreate> for FormDraft {
    fn from(input: FormCreate) -> Self {
        Self {
            name: input.name,
            description: input.description,
            category: input.category,
            status: input.status,
            fields: input.fields.into_iter().map(FieldDraft::from).collect(),
        }
    }
}

/// Result of a cascade delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FormDeleted {
    pub responses_removed: usize,
}

/// Dashboard counters
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Stats {
    pub total_forms: usize,
    pub active_forms: usize,
    pub total_responses: usize,
}

impl From<FormStats> for Stats {
    fn from(stats: FormStats) -> Self {
        Self {
            total_forms: stats.total_forms,
            active_forms: stats.active_forms,
            total_responses: stats.total_responses,
        }
    }
}

// ============ Submissions ============

/// Answers keyed by field id
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SubmissionCreate {
    #[serde(default, alias = "responses")]
    #[schema(value_type = Object)]
    pub values: Map<String, Value>,
    #[serde(default, alias = "user_id")]
    pub respondent: Option<String>,
}

impl From<SubmissionCreate> for Submission {
    fn from(input: SubmissionCreate) -> Self {
        Self {
            values: input.values,
            respondent: input.respondent,
        }
    }
}

/// Progress and per-field error codes for answers in progress
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationReport {
    pub progress: u8,
    pub valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl From<SubmissionPreview> for ValidationReport {
    fn from(preview: SubmissionPreview) -> Self {
        let errors: BTreeMap<String, String> = preview
            .errors
            .iter()
            .map(|(field_id, kind)| (field_id.clone(), kind.code().to_string()))
            .collect();
        Self {
            progress: preview.progress,
            valid: errors.is_empty(),
            errors,
        }
    }
}

// ============ Responses ============

/// One recorded answer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Answer {
    pub field_id: String,
    pub field_label: String,
    #[schema(value_type = Object)]
    pub value: FieldValue,
}

impl From<&ResponseValue> for Answer {
    fn from(value: &ResponseValue) -> Self {
        Self {
            field_id: value.field_id.clone(),
            field_label: value.field_label.clone(),
            value: value.value.clone(),
        }
    }
}

/// Recorded response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Response {
    #[schema(value_type = String)]
    pub id: EntityId,
    #[schema(value_type = String)]
    pub form_id: EntityId,
    pub form_name: String,
    pub respondent: String,
    pub submitted_at: DateTime<Utc>,
    pub values: Vec<Answer>,
}

impl From<&ResponseRecord> for Response {
    fn from(record: &ResponseRecord) -> Self {
        Self {
            id: record.id().clone(),
            form_id: record.form_id().clone(),
            form_name: record.form_name().to_string(),
            respondent: record.respondent().to_string(),
            submitted_at: record.submitted_at(),
            values: record.values().iter().map(Answer::from).collect(),
        }
    }
}
