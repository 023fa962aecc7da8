//! Form Schema Aggregate
//!
//! Ordered field definitions plus form-level metadata. Field order is the
//! editor's order; `sort_order` mirrors the position and is kept through
//! storage, rendering and response label resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::domain::value_objects::{
    EntityId, FieldType, FieldTypeDescriptor, FormCategory, FormStatus, InputShape,
};

/// One question of a form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub help_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// File fields only: accept several uploads.
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub sort_order: u32,
}

impl FieldDefinition {
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: EntityId::new().to_string(),
            label: label.into(),
            field_type,
            required: false,
            placeholder: String::new(),
            help_text: String::new(),
            options: Vec::new(),
            multiple: false,
            sort_order: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn descriptor(&self) -> FieldTypeDescriptor {
        self.field_type.descriptor()
    }

    /// Registry shape refined by the field's own settings.
    ///
    /// A checkbox without options is a single yes/no box; a file field with
    /// `multiple` collects a list.
    pub fn input_shape(&self) -> InputShape {
        match self.descriptor().input_shape {
            InputShape::MultiChoice if self.options.is_empty() => InputShape::ScalarBoolean,
            InputShape::FileRef if self.multiple => InputShape::FileRefList,
            shape => shape,
        }
    }

    /// Trim text, drop blank options, clear settings the type ignores.
    pub fn normalize(&mut self) {
        self.label = self.label.trim().to_string();
        if self.field_type.requires_options() {
            self.options = self
                .options
                .iter()
                .map(|o| o.trim())
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        } else {
            self.options.clear();
        }
        if self.field_type != FieldType::File {
            self.multiple = false;
        }
    }
}

/// Form schema aggregate root
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    id: EntityId,
    name: String,
    description: String,
    category: FormCategory,
    status: FormStatus,
    fields: Vec<FieldDefinition>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FormSchema {
    /// Create a new, empty, active form (factory method)
    pub fn create(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::new(),
            name: name.into().trim().to_string(),
            description: String::new(),
            category: FormCategory::default(),
            status: FormStatus::default(),
            fields: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &str { &self.description }
    pub fn category(&self) -> &FormCategory { &self.category }
    pub fn status(&self) -> FormStatus { self.status }
    pub fn fields(&self) -> &[FieldDefinition] { &self.fields }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    pub fn field(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// A form with no fields can be edited but never submitted.
    pub fn is_submittable(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn set_details(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        category: FormCategory,
        status: FormStatus,
    ) {
        self.name = name.into().trim().to_string();
        self.description = description.into();
        self.category = category;
        self.status = status;
        self.touch();
    }

    pub fn set_status(&mut self, status: FormStatus) {
        self.status = status;
        self.touch();
    }

    /// Replace the field list; positions become the sort order.
    pub fn replace_fields(&mut self, fields: Vec<FieldDefinition>) {
        self.fields = fields;
        for (index, field) in self.fields.iter_mut().enumerate() {
            field.normalize();
            field.sort_order = index as u32;
        }
        self.touch();
    }

    pub fn add_field(&mut self, mut field: FieldDefinition) {
        field.normalize();
        field.sort_order = self.fields.len() as u32;
        self.fields.push(field);
        self.touch();
    }

    pub fn remove_field(&mut self, field_id: &str) {
        self.fields.retain(|f| f.id != field_id);
        for (index, field) in self.fields.iter_mut().enumerate() {
            field.sort_order = index as u32;
        }
        self.touch();
    }

    /// Take over identity and creation time of the stored version (updates).
    pub fn adopt_identity(&mut self, previous: &FormSchema) {
        self.id = previous.id.clone();
        self.created_at = previous.created_at;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Validation
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("form name is required")]
    MissingName,

    #[error("an active form needs at least one field")]
    EmptyFieldSet,

    #[error("field {index} has no label")]
    MissingFieldLabel { index: usize },

    #[error("field {index} needs at least one option")]
    MissingOptions { index: usize },

    #[error("field {index} has unknown type {tag:?}")]
    UnknownFieldType { index: usize, tag: String },

    #[error("field id {id} is used more than once")]
    DuplicateFieldId { id: String },
}

/// Every violation found in a schema, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolations(pub Vec<SchemaViolation>);

impl SchemaViolations {
    pub fn iter(&self) -> impl Iterator<Item = &SchemaViolation> {
        self.0.iter()
    }

    pub fn contains(&self, violation: &SchemaViolation) -> bool {
        self.0.contains(violation)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for SchemaViolations {}

/// Check a schema before it is saved. All violations are collected.
pub fn validate_schema(schema: &FormSchema) -> Result<(), SchemaViolations> {
    let mut violations = Vec::new();

    if schema.name.trim().is_empty() {
        violations.push(SchemaViolation::MissingName);
    }
    if schema.fields.is_empty() && schema.status == FormStatus::Active {
        violations.push(SchemaViolation::EmptyFieldSet);
    }

    let mut seen = HashSet::new();
    for (index, field) in schema.fields.iter().enumerate() {
        if field.label.trim().is_empty() {
            violations.push(SchemaViolation::MissingFieldLabel { index });
        }
        if field.field_type.requires_options() && field.options.is_empty() {
            violations.push(SchemaViolation::MissingOptions { index });
        }
        if !seen.insert(field.id.as_str()) {
            violations.push(SchemaViolation::DuplicateFieldId { id: field.id.clone() });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaViolations(violations))
    }
}

/// Deep copy under a new identity, named "<name> (Copy)".
pub fn duplicate_schema(schema: &FormSchema) -> FormSchema {
    let now = Utc::now();
    FormSchema {
        id: EntityId::new(),
        name: format!("{} (Copy)", schema.name),
        description: schema.description.clone(),
        category: schema.category.clone(),
        status: schema.status,
        fields: schema.fields.clone(),
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn contact_form() -> FormSchema {
        let mut form = FormSchema::create("Contact Us");
        form.add_field(FieldDefinition::new("Email", FieldType::Email).with_required(true));
        form.add_field(
            FieldDefinition::new("Topic", FieldType::Dropdown).with_options(["Sales", "Support"]),
        );
        form
    }

    #[test]
    fn test_valid_schema() {
        assert!(validate_schema(&contact_form()).is_ok());
    }

    #[test]
    fn test_sort_order_follows_position() {
        let form = contact_form();
        let orders: Vec<u32> = form.fields().iter().map(|f| f.sort_order).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn test_collects_every_violation() {
        let mut form = FormSchema::create("  ");
        form.replace_fields(vec![
            FieldDefinition::new("", FieldType::Text),
            FieldDefinition::new("Pick", FieldType::Radio),
        ]);
        let violations = validate_schema(&form).unwrap_err();
        assert_eq!(
            violations.0,
            vec![
                SchemaViolation::MissingName,
                SchemaViolation::MissingFieldLabel { index: 0 },
                SchemaViolation::MissingOptions { index: 1 },
            ]
        );
    }

    #[test]
    fn test_empty_field_set_only_blocks_active_forms() {
        let mut form = FormSchema::create("Draft");
        assert_eq!(
            validate_schema(&form).unwrap_err().0,
            vec![SchemaViolation::EmptyFieldSet]
        );
        form.set_status(FormStatus::Draft);
        assert!(validate_schema(&form).is_ok());
        assert!(!form.is_submittable());
    }

    #[test]
    fn test_duplicate_field_ids() {
        let mut form = FormSchema::create("Dupes");
        form.replace_fields(vec![
            FieldDefinition::new("A", FieldType::Text).with_id("f1"),
            FieldDefinition::new("B", FieldType::Text).with_id("f1"),
        ]);
        assert!(validate_schema(&form)
            .unwrap_err()
            .contains(&SchemaViolation::DuplicateFieldId { id: "f1".into() }));
    }

    #[test]
    fn test_normalize_clears_options_for_plain_types() {
        let mut field = FieldDefinition::new(" Age ", FieldType::Number).with_options(["x"]);
        field.normalize();
        assert_eq!(field.label, "Age");
        assert!(field.options.is_empty());

        let mut field =
            FieldDefinition::new("Pick", FieldType::Checkbox).with_options([" a ", "", "b"]);
        field.normalize();
        assert_eq!(field.options, vec!["a", "b"]);
    }

    #[test]
    fn test_input_shape_refinement() {
        let plain = FieldDefinition::new("Agree", FieldType::Checkbox);
        assert_eq!(plain.input_shape(), InputShape::ScalarBoolean);
        let group = FieldDefinition::new("Pick", FieldType::Checkbox).with_options(["X"]);
        assert_eq!(group.input_shape(), InputShape::MultiChoice);
        let uploads = FieldDefinition::new("Docs", FieldType::File).with_multiple(true);
        assert_eq!(uploads.input_shape(), InputShape::FileRefList);
    }

    #[test]
    fn test_duplicate_schema() {
        let mut original = contact_form();
        original.set_details("Contact Us", "desc", FormCategory::Survey, FormStatus::Archived);
        let copy = duplicate_schema(&original);

        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.name(), "Contact Us (Copy)");
        assert_eq!(copy.fields(), original.fields());
        assert_eq!(copy.status(), FormStatus::Archived);
        assert_eq!(copy.category(), &FormCategory::Survey);
    }

    #[test]
    fn test_remove_field_renumbers() {
        let mut form = contact_form();
        let first = form.fields()[0].id.clone();
        form.remove_field(&first);
        assert_eq!(form.fields().len(), 1);
        assert_eq!(form.fields()[0].sort_order, 0);
    }

    fn any_field_type() -> impl Strategy<Value = FieldType> {
        proptest::sample::select(FieldType::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_missing_options_iff_empty(
            field_type in any_field_type(),
            options in proptest::collection::vec("[a-z]{1,6}", 0..4),
        ) {
            let mut form = FormSchema::create("Props");
            form.replace_fields(vec![
                FieldDefinition::new("Q", field_type).with_options(options.clone()),
            ]);
            let flagged = validate_schema(&form)
                .err()
                .map(|v| v.contains(&SchemaViolation::MissingOptions { index: 0 }))
                .unwrap_or(false);
            prop_assert_eq!(flagged, field_type.requires_options() && options.is_empty());
        }

        #[test]
        fn prop_duplicate_keeps_fields_changes_id(
            labels in proptest::collection::vec("[A-Za-z ]{1,12}", 0..6),
        ) {
            let mut form = FormSchema::create("Props");
            form.replace_fields(
                labels.iter().map(|l| FieldDefinition::new(l.clone(), FieldType::Text)).collect(),
            );
            let copy = duplicate_schema(&form);
            prop_assert_ne!(copy.id(), form.id());
            prop_assert_eq!(copy.fields(), form.fields());
        }
    }
}
