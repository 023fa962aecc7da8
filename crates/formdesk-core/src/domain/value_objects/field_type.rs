//! Field Type Registry
//!
//! Closed catalog of the input types a form field can take. Every consumer
//! (schema editor, renderer, value normalization) goes through
//! [`FieldType::descriptor`], which is an exhaustive match: adding a type is
//! a compile error until every table here covers it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Field input type, serialized as its lowercase tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Password,
    Textarea,
    Number,
    Date,
    Time,
    Url,
    Dropdown,
    Radio,
    Checkbox,
    Rating,
    File,
}

/// Shape of the value a field collects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputShape {
    ScalarText,
    ScalarNumber,
    ScalarDate,
    ScalarTime,
    ScalarBoolean,
    SingleChoice,
    MultiChoice,
    FileRef,
    FileRefList,
    RatingScale,
}

/// Registry entry for a field type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FieldTypeDescriptor {
    pub field_type: FieldType,
    pub label: &'static str,
    pub requires_options: bool,
    pub input_shape: InputShape,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldTypeError {
    #[error("unknown field type: {0:?}")]
    Unknown(String),
}

impl FieldType {
    /// Every field type, in the order the editor offers them.
    pub const ALL: [FieldType; 14] = [
        Self::Text,
        Self::Email,
        Self::Phone,
        Self::Password,
        Self::Textarea,
        Self::Number,
        Self::Date,
        Self::Time,
        Self::Url,
        Self::Dropdown,
        Self::Radio,
        Self::Checkbox,
        Self::Rating,
        Self::File,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Date => "date",
            Self::Time => "time",
            Self::Url => "url",
            Self::Dropdown => "dropdown",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Rating => "rating",
            Self::File => "file",
        }
    }

    pub fn descriptor(self) -> FieldTypeDescriptor {
        let (label, input_shape) = match self {
            Self::Text => ("Text", InputShape::ScalarText),
            Self::Email => ("Email", InputShape::ScalarText),
            Self::Phone => ("Phone", InputShape::ScalarText),
            Self::Password => ("Password", InputShape::ScalarText),
            Self::Textarea => ("Long Text", InputShape::ScalarText),
            Self::Number => ("Number", InputShape::ScalarNumber),
            Self::Date => ("Date", InputShape::ScalarDate),
            Self::Time => ("Time", InputShape::ScalarTime),
            Self::Url => ("URL", InputShape::ScalarText),
            Self::Dropdown => ("Dropdown", InputShape::SingleChoice),
            Self::Radio => ("Radio", InputShape::SingleChoice),
            Self::Checkbox => ("Checkbox", InputShape::MultiChoice),
            Self::Rating => ("Rating", InputShape::RatingScale),
            Self::File => ("Upload", InputShape::FileRef),
        };
        FieldTypeDescriptor {
            field_type: self,
            label,
            requires_options: self.requires_options(),
            input_shape,
        }
    }

    pub fn requires_options(self) -> bool {
        matches!(self, Self::Dropdown | Self::Radio | Self::Checkbox)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FieldType {
    type Err = FieldTypeError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == tag)
            .ok_or_else(|| FieldTypeError::Unknown(tag.to_string()))
    }
}

/// Look up the registry entry for a raw type tag.
pub fn describe(tag: &str) -> Result<FieldTypeDescriptor, FieldTypeError> {
    tag.parse::<FieldType>().map(FieldType::descriptor)
}

/// The full catalog, for type pickers.
pub fn catalog() -> Vec<FieldTypeDescriptor> {
    FieldType::ALL.iter().map(|t| t.descriptor()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known_tags() {
        let d = describe("dropdown").unwrap();
        assert_eq!(d.field_type, FieldType::Dropdown);
        assert!(d.requires_options);
        assert_eq!(d.input_shape, InputShape::SingleChoice);

        let d = describe("rating").unwrap();
        assert!(!d.requires_options);
        assert_eq!(d.input_shape, InputShape::RatingScale);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        assert_eq!(
            describe("signature"),
            Err(FieldTypeError::Unknown("signature".into()))
        );
        // tags are case sensitive
        assert!(describe("Text").is_err());
    }

    #[test]
    fn test_requires_options_exactly_for_choice_types() {
        let with_options: Vec<_> = FieldType::ALL
            .into_iter()
            .filter(|t| t.requires_options())
            .collect();
        assert_eq!(
            with_options,
            vec![FieldType::Dropdown, FieldType::Radio, FieldType::Checkbox]
        );
    }

    #[test]
    fn test_tag_round_trips_through_serde() {
        for t in FieldType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.tag()));
            assert_eq!(t.tag().parse::<FieldType>().unwrap(), t);
        }
    }

    #[test]
    fn test_catalog_covers_every_type() {
        let catalog = catalog();
        assert_eq!(catalog.len(), FieldType::ALL.len());
        assert_eq!(catalog[4].label, "Long Text");
    }
}
