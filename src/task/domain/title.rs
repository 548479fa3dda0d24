//! Validated task title type.

use super::TaskDomainError;
use crate::validation::{TextViolation, validated_text};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of characters in a task title after trimming.
const MIN_TITLE_LENGTH: usize = 3;

/// Validated task title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// The input is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank after
    /// trimming, or [`TaskDomainError::TitleTooShort`] when it has fewer
    /// than three characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let trimmed =
            validated_text(value, MIN_TITLE_LENGTH).map_err(|violation| match violation {
                TextViolation::Blank => TaskDomainError::EmptyTitle,
                TextViolation::TooShort { minimum } => TaskDomainError::TitleTooShort(minimum),
            })?;
        Ok(Self(trimmed))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
