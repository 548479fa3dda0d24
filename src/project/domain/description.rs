//! Validated project description type.

use super::ProjectDomainError;
use crate::validation::{TextViolation, validated_text};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of characters in a project description after trimming.
const MIN_DESCRIPTION_LENGTH: usize = 15;

/// Validated project description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectDescription(String);

impl ProjectDescription {
    /// Creates a validated project description.
    ///
    /// The input is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyDescription`] when the value is
    /// blank after trimming, or [`ProjectDomainError::DescriptionTooShort`]
    /// when it has fewer than fifteen characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let trimmed =
            validated_text(value, MIN_DESCRIPTION_LENGTH).map_err(|violation| match violation {
                TextViolation::Blank => ProjectDomainError::EmptyDescription,
                TextViolation::TooShort { minimum } => {
                    ProjectDomainError::DescriptionTooShort(minimum)
                }
            })?;
        Ok(Self(trimmed))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
