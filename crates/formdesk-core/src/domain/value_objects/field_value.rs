//! Field Value Model
//!
//! A submitted answer is converted once, at the submission boundary, from
//! raw JSON into a [`FieldValue`] whose variant follows the owning field's
//! [`InputShape`]. Nothing downstream re-inspects untyped JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::field_type::InputShape;

/// Normalized values of one submission, keyed by field id.
pub type FormValues = BTreeMap<String, FieldValue>;

/// Reference to an uploaded file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl FileRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            content_type: None,
            url: None,
        }
    }
}

/// Answer recorded for one field.
///
/// Serialized untagged so stored documents look like the raw answers
/// (`"text"`, `4`, `["a", "b"]`, `{"name": "cv.pdf"}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Choices(Vec<String>),
    File(FileRef),
    Files(Vec<FileRef>),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("value does not match the {expected:?} input")]
pub struct ValueShapeError {
    pub expected: InputShape,
}

impl FieldValue {
    /// Convert a raw answer for a field of the given shape.
    ///
    /// `null` and blank numeric input are treated as absent (`Ok(None)`).
    pub fn from_json(shape: InputShape, raw: &Value) -> Result<Option<Self>, ValueShapeError> {
        let mismatch = ValueShapeError { expected: shape };
        if raw.is_null() {
            return Ok(None);
        }

        let value = match shape {
            InputShape::ScalarText
            | InputShape::ScalarDate
            | InputShape::ScalarTime
            | InputShape::SingleChoice => match raw {
                Value::String(s) => Self::Text(s.clone()),
                Value::Number(n) => Self::Text(n.to_string()),
                _ => return Err(mismatch),
            },
            InputShape::ScalarNumber => match parse_number(raw) {
                Some(Some(n)) => Self::Number(n),
                Some(None) => return Ok(None),
                None => return Err(mismatch),
            },
            InputShape::RatingScale => match parse_number(raw) {
                Some(Some(n)) if (0.0..=5.0).contains(&n) && n.fract() == 0.0 => Self::Number(n),
                Some(None) => return Ok(None),
                _ => return Err(mismatch),
            },
            InputShape::ScalarBoolean => match raw {
                Value::Bool(b) => Self::Bool(*b),
                Value::String(s) if s == "true" || s == "false" => Self::Bool(s == "true"),
                _ => return Err(mismatch),
            },
            InputShape::MultiChoice => match raw {
                Value::Array(items) => Self::Choices(string_items(items).ok_or(mismatch)?),
                Value::String(s) if s.is_empty() => Self::Choices(Vec::new()),
                Value::String(s) => Self::Choices(vec![s.clone()]),
                Value::Bool(b) => Self::Bool(*b),
                _ => return Err(mismatch),
            },
            InputShape::FileRef => match raw {
                Value::Array(items) => Self::Files(file_items(items).ok_or(mismatch)?),
                single => Self::File(file_item(single).ok_or(mismatch)?),
            },
            InputShape::FileRefList => match raw {
                Value::Array(items) => Self::Files(file_items(items).ok_or(mismatch)?),
                single => Self::Files(vec![file_item(single).ok_or(mismatch)?]),
            },
        };
        Ok(Some(value))
    }

    /// Best-effort conversion for answers whose field is not in the schema.
    pub fn from_untyped(raw: &Value) -> Option<Self> {
        match raw {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => string_items(items)
                .map(Self::Choices)
                .or_else(|| file_items(items).map(Self::Files))
                .or_else(|| Some(Self::Text(raw.to_string()))),
            Value::Object(_) => file_item(raw)
                .map(Self::File)
                .or_else(|| Some(Self::Text(raw.to_string()))),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// `Some(Some(n))` for a number, `Some(None)` for blank input, `None` on mismatch.
fn parse_number(raw: &Value) -> Option<Option<f64>> {
    match raw {
        Value::Number(n) => n.as_f64().map(Some),
        Value::String(s) if s.trim().is_empty() => Some(None),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()).map(Some),
        _ => None,
    }
}

fn string_items(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

fn file_item(raw: &Value) -> Option<FileRef> {
    match raw {
        Value::String(name) if !name.is_empty() => Some(FileRef::named(name.clone())),
        Value::Object(_) => serde_json::from_value(raw.clone()).ok(),
        _ => None,
    }
}

fn file_items(items: &[Value]) -> Option<Vec<FileRef>> {
    items.iter().map(file_item).collect()
}

/// Human readable rendering used by exports.
///
/// `false` renders empty, matching how an unticked box reads in a sheet.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("true"),
            Self::Bool(false) => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Choices(items) => f.write_str(&items.join(", ")),
            Self::File(file) => f.write_str(&file.name),
            Self::Files(files) => {
                let names: Vec<&str> = files.iter().map(|file| file.name.as_str()).collect();
                f.write_str(&names.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_shapes_accept_strings_and_numbers() {
        assert_eq!(
            FieldValue::from_json(InputShape::ScalarText, &json!("hello")).unwrap(),
            Some(FieldValue::Text("hello".into()))
        );
        assert_eq!(
            FieldValue::from_json(InputShape::SingleChoice, &json!(3)).unwrap(),
            Some(FieldValue::Text("3".into()))
        );
        assert!(FieldValue::from_json(InputShape::ScalarDate, &json!(["x"])).is_err());
    }

    #[test]
    fn test_number_from_input_string() {
        assert_eq!(
            FieldValue::from_json(InputShape::ScalarNumber, &json!("42.5")).unwrap(),
            Some(FieldValue::Number(42.5))
        );
        assert_eq!(
            FieldValue::from_json(InputShape::ScalarNumber, &json!("")).unwrap(),
            None
        );
        let err = FieldValue::from_json(InputShape::ScalarNumber, &json!("abc")).unwrap_err();
        assert_eq!(err.expected, InputShape::ScalarNumber);
    }

    #[test]
    fn test_rating_range() {
        assert_eq!(
            FieldValue::from_json(InputShape::RatingScale, &json!(4)).unwrap(),
            Some(FieldValue::Number(4.0))
        );
        assert_eq!(
            FieldValue::from_json(InputShape::RatingScale, &json!(0)).unwrap(),
            Some(FieldValue::Number(0.0))
        );
        assert!(FieldValue::from_json(InputShape::RatingScale, &json!(6)).is_err());
        assert!(FieldValue::from_json(InputShape::RatingScale, &json!(2.5)).is_err());
    }

    #[test]
    fn test_multi_choice() {
        assert_eq!(
            FieldValue::from_json(InputShape::MultiChoice, &json!(["X", "Z"])).unwrap(),
            Some(FieldValue::Choices(vec!["X".into(), "Z".into()]))
        );
        assert_eq!(
            FieldValue::from_json(InputShape::MultiChoice, &json!(true)).unwrap(),
            Some(FieldValue::Bool(true))
        );
        assert!(FieldValue::from_json(InputShape::MultiChoice, &json!([1, 2])).is_err());
    }

    #[test]
    fn test_file_references() {
        assert_eq!(
            FieldValue::from_json(InputShape::FileRef, &json!({"name": "cv.pdf", "type": "application/pdf"}))
                .unwrap(),
            Some(FieldValue::File(FileRef {
                name: "cv.pdf".into(),
                size: None,
                content_type: Some("application/pdf".into()),
                url: None,
            }))
        );
        assert_eq!(
            FieldValue::from_json(InputShape::FileRefList, &json!("a.png")).unwrap(),
            Some(FieldValue::Files(vec![FileRef::named("a.png")]))
        );
        assert!(FieldValue::from_json(InputShape::FileRef, &json!(12)).is_err());
    }

    #[test]
    fn test_null_is_absent_for_every_shape() {
        for shape in [
            InputShape::ScalarText,
            InputShape::ScalarNumber,
            InputShape::MultiChoice,
            InputShape::FileRef,
            InputShape::RatingScale,
        ] {
            assert_eq!(FieldValue::from_json(shape, &Value::Null).unwrap(), None);
        }
    }

    #[test]
    fn test_untyped_conversion() {
        assert_eq!(
            FieldValue::from_untyped(&json!(["a"])),
            Some(FieldValue::Choices(vec!["a".into()]))
        );
        assert_eq!(FieldValue::from_untyped(&json!(null)), None);
        assert_eq!(
            FieldValue::from_untyped(&json!({"nested": true})),
            Some(FieldValue::Text("{\"nested\":true}".into()))
        );
    }

    #[test]
    fn test_stored_form_deserializes_back() {
        let value = FieldValue::Choices(vec!["X".into(), "Z".into()]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, json!(["X", "Z"]));
        assert_eq!(serde_json::from_value::<FieldValue>(json).unwrap(), value);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Choices(vec!["X".into(), "Z".into()]).to_string(), "X, Z");
        assert_eq!(FieldValue::Number(3.0).to_string(), "3");
        assert_eq!(FieldValue::Bool(false).to_string(), "");
    }
}
