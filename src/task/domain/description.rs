//! Validated task description type.

use super::TaskDomainError;
use crate::validation::{TextViolation, validated_text};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of characters in a task description after trimming.
const MIN_DESCRIPTION_LENGTH: usize = 15;

/// Validated task description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a validated task description.
    ///
    /// The input is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] when the value is blank
    /// after trimming, or [`TaskDomainError::DescriptionTooShort`] when it
    /// has fewer than fifteen characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let trimmed =
            validated_text(value, MIN_DESCRIPTION_LENGTH).map_err(|violation| match violation {
                TextViolation::Blank => TaskDomainError::EmptyDescription,
                TextViolation::TooShort { minimum } => {
                    TaskDomainError::DescriptionTooShort(minimum)
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

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
