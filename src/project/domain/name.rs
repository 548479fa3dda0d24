//! Validated project name type.

use super::ProjectDomainError;
use crate::validation::{TextViolation, validated_text};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of characters in a project name after trimming.
const MIN_NAME_LENGTH: usize = 3;

/// Validated project name.
///
/// Names keep the caller's casing for display but are unique across all
/// projects case-insensitively; [`ProjectName::normalized`] yields the form
/// used for uniqueness checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// The input is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when the value is blank
    /// after trimming, or [`ProjectDomainError::NameTooShort`] when it has
    /// fewer than three characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let trimmed = validated_text(value, MIN_NAME_LENGTH).map_err(|violation| match violation {
            TextViolation::Blank => ProjectDomainError::EmptyName,
            TextViolation::TooShort { minimum } => ProjectDomainError::NameTooShort(minimum),
        })?;
        Ok(Self(trimmed))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lowercase form used for case-insensitive uniqueness.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
