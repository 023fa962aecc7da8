//! Value Objects module
//!
//! Immutable domain primitives: field types, field values, form metadata.

pub mod field_type;
pub mod field_value;
pub mod metadata;

pub use field_type::{catalog, describe, FieldType, FieldTypeDescriptor, FieldTypeError, InputShape};
pub use field_value::{FieldValue, FileRef, FormValues};
pub use metadata::{FormCategory, FormStatus};

/// Identifier value object for forms, fields and responses
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::from_string(id)
    }
}
