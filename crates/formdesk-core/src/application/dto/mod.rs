//! Data Transfer Objects (DTOs)
//!
//! Objects for transferring data across boundaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::aggregates::{
    validate_schema, FieldDefinition, FormSchema, SchemaViolation, SchemaViolations,
};
use crate::domain::value_objects::{EntityId, FieldType, FormCategory, FormStatus};

// =============================================================================
// Form Commands
// =============================================================================

/// Form as sent by the editor, for create and update.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormDraft {
    #[serde(default, alias = "form_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: FormCategory,
    #[serde(default)]
    pub status: FormStatus,
    #[serde(default)]
    pub fields: Vec<FieldDraft>,
}

/// Field as sent by the editor. The type is still a raw tag here.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FieldDraft {
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

impl FormDraft {
    /// Convert to a validated schema.
    ///
    /// Unknown type tags are rejected before structural checks run, since a
    /// field without a known type has no structure to check.
    pub fn into_schema(self) -> Result<FormSchema, SchemaViolations> {
        let mut unknown = Vec::new();
        let mut fields = Vec::with_capacity(self.fields.len());

        for (index, draft) in self.fields.into_iter().enumerate() {
            match draft.field_type.parse::<FieldType>() {
                Ok(field_type) => fields.push(draft.into_definition(field_type)),
                Err(_) => unknown.push(SchemaViolation::UnknownFieldType {
                    index,
                    tag: draft.field_type,
                }),
            }
        }
        if !unknown.is_empty() {
            return Err(SchemaViolations(unknown));
        }

        let mut schema = FormSchema::create(self.name.clone());
        schema.set_details(self.name, self.description, self.category, self.status);
        schema.replace_fields(fields);
        validate_schema(&schema)?;
        Ok(schema)
    }
}

impl FieldDraft {
    pub fn new(label: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    fn into_definition(self, field_type: FieldType) -> FieldDefinition {
        let definition = FieldDefinition::new(self.label, field_type)
            .with_required(self.required)
            .with_placeholder(self.placeholder)
            .with_help_text(self.help_text)
            .with_options(self.options)
            .with_multiple(self.multiple);
        match self.id.filter(|id| !id.trim().is_empty()) {
            Some(id) => definition.with_id(id),
            None => definition,
        }
    }
}

impl From<&FieldDefinition> for FieldDraft {
    fn from(field: &FieldDefinition) -> Self {
        Self {
            id: Some(field.id.clone()),
            label: field.label.clone(),
            field_type: field.field_type.tag().to_string(),
            required: field.required,
            placeholder: field.placeholder.clone(),
            help_text: field.help_text.clone(),
            options: field.options.clone(),
            multiple: field.multiple,
        }
    }
}

impl From<&FormSchema> for FormDraft {
    fn from(schema: &FormSchema) -> Self {
        Self {
            name: schema.name().to_string(),
            description: schema.description().to_string(),
            category: schema.category().clone(),
            status: schema.status(),
            fields: schema.fields().iter().map(FieldDraft::from).collect(),
        }
    }
}

// =============================================================================
// Submission Commands
// =============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Submission {
    pub values: Map<String, Value>,
    #[serde(default)]
    pub respondent: Option<String>,
}

impl Submission {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values, respondent: None }
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Listing filter used by the admin and respondent dashboards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormFilter {
    /// Case-insensitive substring of the form name
    #[serde(default)]
    pub search: Option<String>,
    /// Category name; "All" disables the filter
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<FormStatus>,
}

impl FormFilter {
    pub fn matches(&self, form: &FormSchema) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                form.name().to_lowercase().contains(&term.to_lowercase())
            }
            _ => true,
        };
        let category_ok = match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() && !c.eq_ignore_ascii_case("all") => {
                form.category() == &FormCategory::from(c)
            }
            _ => true,
        };
        let status_ok = self.status.map_or(true, |s| form.status() == s);
        search_ok && category_ok && status_ok
    }
}

// =============================================================================
// Views (Read Models)
// =============================================================================

/// Form listing entry; fields are omitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub category: FormCategory,
    pub status: FormStatus,
    pub field_count: usize,
    pub response_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FormSummary {
    pub fn of(form: &FormSchema, response_count: usize) -> Self {
        Self {
            id: form.id().clone(),
            name: form.name().to_string(),
            description: form.description().to_string(),
            category: form.category().clone(),
            status: form.status(),
            field_count: form.fields().len(),
            response_count,
            created_at: form.created_at(),
            updated_at: form.updated_at(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStats {
    pub total_forms: usize,
    pub active_forms: usize,
    pub total_responses: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> FormDraft {
        FormDraft {
            name: "Event Signup".into(),
            category: FormCategory::Registration,
            fields: vec![
                FieldDraft::new("Name", "text"),
                FieldDraft {
                    options: vec!["Yes".into(), "No".into()],
                    ..FieldDraft::new("Attending", "radio")
                },
            ],
            ..FormDraft::default()
        }
    }

    #[test]
    fn test_draft_into_schema() {
        let schema = draft().into_schema().unwrap();
        assert_eq!(schema.name(), "Event Signup");
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.fields()[1].field_type, FieldType::Radio);
        assert_eq!(schema.fields()[1].sort_order, 1);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut draft = draft();
        draft.fields.push(FieldDraft::new("Sign here", "signature"));
        let violations = draft.into_schema().unwrap_err();
        assert_eq!(
            violations.0,
            vec![SchemaViolation::UnknownFieldType { index: 2, tag: "signature".into() }]
        );
    }

    #[test]
    fn test_editor_ids_are_kept() {
        let mut draft = draft();
        draft.fields[0].id = Some("name-field".into());
        let schema = draft.into_schema().unwrap();
        assert_eq!(schema.fields()[0].id, "name-field");
        assert!(!schema.fields()[1].id.is_empty());
    }

    #[test]
    fn test_accepts_legacy_json_keys() {
        let draft: FormDraft = serde_json::from_str(
            r#"{"form_name": "Legacy", "fields": [{"label": "Bio", "type": "textarea", "helpText": "About you"}]}"#,
        )
        .unwrap();
        let schema = draft.into_schema().unwrap();
        assert_eq!(schema.fields()[0].help_text, "About you");
        assert_eq!(schema.status(), FormStatus::Active);
    }

    #[test]
    fn test_filter() {
        let schema = draft().into_schema().unwrap();
        assert!(FormFilter::default().matches(&schema));
        let by_search = FormFilter { search: Some("signup".into()), ..FormFilter::default() };
        assert!(by_search.matches(&schema));
        let by_category = FormFilter { category: Some("Survey".into()), ..FormFilter::default() };
        assert!(!by_category.matches(&schema));
        let all = FormFilter { category: Some("All".into()), ..FormFilter::default() };
        assert!(all.matches(&schema));
        let drafts = FormFilter { status: Some(FormStatus::Draft), ..FormFilter::default() };
        assert!(!drafts.matches(&schema));
    }
}
