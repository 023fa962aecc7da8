//! Form Renderer/Validator
//!
//! Pure functions evaluated against a schema and the current values: the
//! "filled" predicate, completion progress and required-field checks. Nothing
//! is cached; callers re-run them on every value change.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::domain::aggregates::FormSchema;
use crate::domain::value_objects::{FieldType, FieldValue, FormValues, InputShape};

/// Whether a value counts as provided.
///
/// Zero is a real answer for a number field but means "not rated" for a
/// rating field; the two are deliberately not unified.
pub fn is_filled(field_type: FieldType, value: Option<&FieldValue>) -> bool {
    match value {
        None => false,
        Some(FieldValue::Text(s)) => !s.is_empty(),
        Some(FieldValue::Choices(items)) => !items.is_empty(),
        Some(FieldValue::Files(files)) => !files.is_empty(),
        Some(FieldValue::File(_)) => true,
        Some(FieldValue::Bool(checked)) => *checked,
        Some(FieldValue::Number(n)) => match field_type {
            FieldType::Rating => *n > 0.0,
            _ => true,
        },
    }
}

/// Percentage of fields filled, rounded; 0 for a form without fields.
pub fn compute_progress(schema: &FormSchema, values: &FormValues) -> u8 {
    let total = schema.fields().len();
    if total == 0 {
        return 0;
    }
    let filled = schema
        .fields()
        .iter()
        .filter(|f| is_filled(f.field_type, values.get(&f.id)))
        .count();
    ((filled as f64 / total as f64) * 100.0).round() as u8
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    #[error("this field is required")]
    RequiredFieldEmpty,

    #[error("value does not match the {expected:?} input")]
    InvalidValue { expected: InputShape },
}

impl FieldErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::RequiredFieldEmpty => "required_field_empty",
            Self::InvalidValue { .. } => "invalid_value",
        }
    }
}

/// Per-field errors of one submission. Empty means accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionErrors(pub BTreeMap<String, FieldErrorKind>);

impl SubmissionErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldErrorKind> {
        self.0.get(field_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldErrorKind)> {
        self.0.iter()
    }

    fn merge(&mut self, other: SubmissionErrors) {
        for (field_id, kind) in other.0 {
            self.0.entry(field_id).or_insert(kind);
        }
    }
}

impl fmt::Display for SubmissionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .0
            .iter()
            .map(|(field_id, kind)| format!("{field_id}: {kind}"))
            .collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for SubmissionErrors {}

/// Required-field presence check. No format validation is applied.
pub fn validate_submission(schema: &FormSchema, values: &FormValues) -> SubmissionErrors {
    let errors = schema
        .fields()
        .iter()
        .filter(|f| f.required && !is_filled(f.field_type, values.get(&f.id)))
        .map(|f| (f.id.clone(), FieldErrorKind::RequiredFieldEmpty))
        .collect();
    SubmissionErrors(errors)
}

/// Convert raw answers into typed values, once, by each field's shape.
///
/// Answers for ids the schema does not know are kept with a best-effort
/// type so the recorder can still snapshot them.
pub fn normalize_values(
    schema: &FormSchema,
    raw: &Map<String, Value>,
) -> Result<FormValues, SubmissionErrors> {
    let mut values = FormValues::new();
    let mut errors = SubmissionErrors::default();

    for (field_id, answer) in raw {
        match schema.field(field_id) {
            Some(field) => match FieldValue::from_json(field.input_shape(), answer) {
                Ok(Some(value)) => {
                    values.insert(field_id.clone(), value);
                }
                Ok(None) => {}
                Err(e) => {
                    errors
                        .0
                        .insert(field_id.clone(), FieldErrorKind::InvalidValue { expected: e.expected });
                }
            },
            None => {
                tracing::debug!(form_id = %schema.id(), field_id = %field_id, "value for unknown field");
                if let Some(value) = FieldValue::from_untyped(answer) {
                    values.insert(field_id.clone(), value);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

/// Live state of a form being filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPreview {
    pub progress: u8,
    pub errors: SubmissionErrors,
}

/// Convert raw answers and collect every field error in one pass.
///
/// Malformed answers are reported and left out of the returned values, so
/// required fields are checked against what did convert.
pub fn check_answers(
    schema: &FormSchema,
    raw: &Map<String, Value>,
) -> (FormValues, SubmissionErrors) {
    let (values, mut errors) = match normalize_values(schema, raw) {
        Ok(values) => (values, SubmissionErrors::default()),
        Err(errors) => {
            let valid: Map<String, Value> = raw
                .iter()
                .filter(|(k, _)| errors.get(k).is_none())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            (normalize_values(schema, &valid).unwrap_or_default(), errors)
        }
    };
    errors.merge(validate_submission(schema, &values));
    (values, errors)
}

/// Progress and every field error for raw answers, without storing anything.
pub fn preview(schema: &FormSchema, raw: &Map<String, Value>) -> SubmissionPreview {
    let (values, errors) = check_answers(schema, raw);
    SubmissionPreview {
        progress: compute_progress(schema, &values),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::FieldDefinition;
    use crate::domain::value_objects::FileRef;
    use proptest::prelude::*;
    use serde_json::json;

    fn survey() -> FormSchema {
        let mut form = FormSchema::create("Survey");
        form.replace_fields(vec![
            FieldDefinition::new("Name", FieldType::Text).with_id("name").with_required(true),
            FieldDefinition::new("Age", FieldType::Number).with_id("age"),
            FieldDefinition::new("Score", FieldType::Rating).with_id("score"),
            FieldDefinition::new("Tags", FieldType::Checkbox)
                .with_id("tags")
                .with_options(["X", "Y", "Z"]),
        ]);
        form
    }

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_is_filled_truth_table() {
        assert!(!is_filled(FieldType::Text, None));
        assert!(!is_filled(FieldType::Text, Some(&FieldValue::Text(String::new()))));
        assert!(is_filled(FieldType::Text, Some(&FieldValue::Text("a".into()))));
        assert!(!is_filled(FieldType::Checkbox, Some(&FieldValue::Choices(vec![]))));
        assert!(!is_filled(FieldType::Checkbox, Some(&FieldValue::Bool(false))));
        assert!(is_filled(FieldType::Checkbox, Some(&FieldValue::Bool(true))));
        assert!(!is_filled(FieldType::File, Some(&FieldValue::Files(vec![]))));
        assert!(is_filled(FieldType::File, Some(&FieldValue::File(FileRef::named("a")))));
    }

    #[test]
    fn test_zero_asymmetry_between_number_and_rating() {
        assert!(is_filled(FieldType::Number, Some(&FieldValue::Number(0.0))));
        assert!(!is_filled(FieldType::Rating, Some(&FieldValue::Number(0.0))));
        assert!(is_filled(FieldType::Rating, Some(&FieldValue::Number(1.0))));
    }

    #[test]
    fn test_checkbox_group_is_filled() {
        let values = normalize_values(&survey(), &raw(json!({"tags": ["X", "Z"]}))).unwrap();
        assert!(is_filled(FieldType::Checkbox, values.get("tags")));
    }

    #[test]
    fn test_progress_bounds() {
        let form = survey();
        assert_eq!(compute_progress(&form, &FormValues::new()), 0);

        let values = normalize_values(
            &form,
            &raw(json!({"name": "Ada", "age": 0, "score": 5, "tags": ["Y"]})),
        )
        .unwrap();
        assert_eq!(compute_progress(&form, &values), 100);
    }

    #[test]
    fn test_progress_rounds() {
        let mut form = FormSchema::create("Thirds");
        form.replace_fields(vec![
            FieldDefinition::new("A", FieldType::Text).with_id("a"),
            FieldDefinition::new("B", FieldType::Text).with_id("b"),
            FieldDefinition::new("C", FieldType::Text).with_id("c"),
        ]);
        let values = normalize_values(&form, &raw(json!({"a": "x"}))).unwrap();
        assert_eq!(compute_progress(&form, &values), 33);
        let values = normalize_values(&form, &raw(json!({"a": "x", "b": "y"}))).unwrap();
        assert_eq!(compute_progress(&form, &values), 67);
    }

    #[test]
    fn test_progress_of_empty_schema_is_zero() {
        let form = FormSchema::create("Empty");
        assert_eq!(compute_progress(&form, &FormValues::new()), 0);
    }

    #[test]
    fn test_only_required_fields_are_checked() {
        let form = survey();
        let errors = validate_submission(&form, &FormValues::new());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some(&FieldErrorKind::RequiredFieldEmpty));
    }

    #[test]
    fn test_no_format_validation() {
        let mut form = FormSchema::create("Email");
        form.add_field(FieldDefinition::new("Email", FieldType::Email).with_id("e").with_required(true));
        let values = normalize_values(&form, &raw(json!({"e": "not-an-email"}))).unwrap();
        assert!(validate_submission(&form, &values).is_empty());
    }

    #[test]
    fn test_shape_mismatch_reported_per_field() {
        let errors = normalize_values(&survey(), &raw(json!({"age": "old", "name": "Ada"}))).unwrap_err();
        assert_eq!(
            errors.get("age"),
            Some(&FieldErrorKind::InvalidValue { expected: InputShape::ScalarNumber })
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_unknown_ids_are_kept() {
        let values = normalize_values(&survey(), &raw(json!({"ghost": "boo"}))).unwrap();
        assert_eq!(values.get("ghost"), Some(&FieldValue::Text("boo".into())));
    }

    #[test]
    fn test_preview_merges_errors() {
        let preview = preview(&survey(), &raw(json!({"age": "old", "score": 3})));
        assert_eq!(preview.progress, 25);
        assert_eq!(preview.errors.len(), 2);
        assert_eq!(preview.errors.get("name"), Some(&FieldErrorKind::RequiredFieldEmpty));
    }

    #[test]
    fn test_check_answers_keeps_converted_values() {
        let (values, errors) = check_answers(&survey(), &raw(json!({"age": "old", "score": 3})));
        assert_eq!(values.get("score"), Some(&FieldValue::Number(3.0)));
        assert!(values.get("age").is_none());
        assert_eq!(errors.get("name"), Some(&FieldErrorKind::RequiredFieldEmpty));
        assert!(matches!(errors.get("age"), Some(FieldErrorKind::InvalidValue { .. })));
    }

    proptest! {
        #[test]
        fn prop_is_filled_is_idempotent(text in ".{0,8}", n in -5.0f64..5.0) {
            let text_value = FieldValue::Text(text);
            let number_value = FieldValue::Number(n);
            prop_assert_eq!(
                is_filled(FieldType::Text, Some(&text_value)),
                is_filled(FieldType::Text, Some(&text_value))
            );
            prop_assert_eq!(
                is_filled(FieldType::Rating, Some(&number_value)),
                is_filled(FieldType::Rating, Some(&number_value))
            );
        }

        #[test]
        fn prop_progress_is_monotonic(filled in proptest::collection::vec(any::<bool>(), 1..10)) {
            let mut form = FormSchema::create("Mono");
            form.replace_fields(
                (0..filled.len())
                    .map(|i| FieldDefinition::new(format!("Q{i}"), FieldType::Text).with_id(format!("q{i}")))
                    .collect(),
            );
            let mut values = FormValues::new();
            let mut last = compute_progress(&form, &values);
            for (i, fill) in filled.iter().enumerate() {
                if *fill {
                    values.insert(format!("q{i}"), FieldValue::Text("answer".into()));
                }
                let current = compute_progress(&form, &values);
                prop_assert!(current >= last);
                last = current;
            }
            prop_assert!(last <= 100);
        }
    }
}
