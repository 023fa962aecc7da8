//! Form-level metadata: category and lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Form category: a fixed vocabulary plus free text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormCategory {
    #[default]
    General,
    Registration,
    Feedback,
    Survey,
    Application,
    Contact,
    Other(String),
}

impl FormCategory {
    pub const PREDEFINED: [FormCategory; 6] = [
        Self::General,
        Self::Registration,
        Self::Feedback,
        Self::Survey,
        Self::Application,
        Self::Contact,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::General => "General",
            Self::Registration => "Registration",
            Self::Feedback => "Feedback",
            Self::Survey => "Survey",
            Self::Application => "Application",
            Self::Contact => "Contact",
            Self::Other(name) => name,
        }
    }

    pub fn is_predefined(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for FormCategory {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Self::General;
        }
        Self::PREDEFINED
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Self::Other(trimmed.to_string()))
    }
}

impl From<&str> for FormCategory {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<FormCategory> for String {
    fn from(category: FormCategory) -> Self {
        match category {
            FormCategory::Other(name) => name,
            predefined => predefined.as_str().to_string(),
        }
    }
}

impl fmt::Display for FormCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Active,
    Draft,
    Archived,
}

impl FormStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Draft => "draft",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "draft" => Ok(Self::Draft),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown form status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_category_parsing() {
        assert_eq!(FormCategory::from("survey"), FormCategory::Survey);
        assert_eq!(FormCategory::from(""), FormCategory::General);
        assert_eq!(
            FormCategory::from(" Onboarding "),
            FormCategory::Other("Onboarding".into())
        );
    }

    #[test]
    fn test_category_serde_is_plain_string() {
        let json = serde_json::to_string(&FormCategory::Other("Events".into())).unwrap();
        assert_eq!(json, "\"Events\"");
        let parsed: FormCategory = serde_json::from_str("\"Feedback\"").unwrap();
        assert_eq!(parsed, FormCategory::Feedback);
    }

    #[test]
    fn test_status_defaults_to_active() {
        assert_eq!(FormStatus::default(), FormStatus::Active);
        assert_eq!("Draft".parse::<FormStatus>().unwrap(), FormStatus::Draft);
        assert!("closed".parse::<FormStatus>().is_err());
    }
}
