//! Response Recorder

use crate::domain::aggregates::{FormSchema, ResponseRecord, ResponseValue, UNKNOWN_FIELD_LABEL};
use crate::domain::value_objects::FormValues;

/// Snapshot validated values against the schema they were submitted to.
///
/// Values follow schema order; values whose id is not in the schema are
/// appended with the "Unknown" label instead of failing the submission.
pub fn build_response(schema: &FormSchema, values: &FormValues) -> ResponseRecord {
    let mut snapshot: Vec<ResponseValue> = schema
        .fields()
        .iter()
        .filter_map(|field| {
            values.get(&field.id).map(|value| ResponseValue {
                field_id: field.id.clone(),
                field_label: field.label.clone(),
                value: value.clone(),
            })
        })
        .collect();

    snapshot.extend(
        values
            .iter()
            .filter(|(field_id, _)| schema.field(field_id).is_none())
            .map(|(field_id, value)| ResponseValue {
                field_id: field_id.clone(),
                field_label: UNKNOWN_FIELD_LABEL.to_string(),
                value: value.clone(),
            }),
    );

    ResponseRecord::record(schema.id().clone(), schema.name(), snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::FieldDefinition;
    use crate::domain::value_objects::{FieldType, FieldValue};

    #[test]
    fn test_labels_snapshot_in_schema_order() {
        let mut form = FormSchema::create("Order");
        form.replace_fields(vec![
            FieldDefinition::new("Second id, first field", FieldType::Text).with_id("b"),
            FieldDefinition::new("First id, second field", FieldType::Text).with_id("a"),
        ]);
        let mut values = FormValues::new();
        values.insert("a".into(), FieldValue::Text("1".into()));
        values.insert("b".into(), FieldValue::Text("2".into()));

        let record = build_response(&form, &values);
        let ids: Vec<&str> = record.values().iter().map(|v| v.field_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(record.values()[0].field_label, "Second id, first field");
        assert_eq!(record.form_name(), "Order");
        assert_eq!(record.form_id(), form.id());
    }

    #[test]
    fn test_orphaned_value_gets_unknown_label() {
        let form = FormSchema::create("Orphans");
        let mut values = FormValues::new();
        values.insert("gone".into(), FieldValue::Number(7.0));

        let record = build_response(&form, &values);
        assert_eq!(record.values().len(), 1);
        assert_eq!(record.values()[0].field_label, UNKNOWN_FIELD_LABEL);
        assert_eq!(record.value("gone"), Some(&FieldValue::Number(7.0)));
    }

    #[test]
    fn test_reproduces_submitted_values() {
        let mut form = FormSchema::create("Round trip");
        form.replace_fields(vec![
            FieldDefinition::new("Pick", FieldType::Checkbox).with_id("c").with_options(["X", "Z"]),
            FieldDefinition::new("Rate", FieldType::Rating).with_id("r"),
        ]);
        let mut values = FormValues::new();
        values.insert("c".into(), FieldValue::Choices(vec!["X".into(), "Z".into()]));
        values.insert("r".into(), FieldValue::Number(4.0));

        assert_eq!(build_response(&form, &values).value_map(), values);
    }
}
