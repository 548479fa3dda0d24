//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title cannot be empty")]
    EmptyTitle,

    /// The task title is shorter than the required minimum after trimming.
    #[error("task title must be at least {0} characters long")]
    TitleTooShort(usize),

    /// The task description is empty after trimming.
    #[error("task description cannot be empty")]
    EmptyDescription,

    /// The task description is shorter than the required minimum after
    /// trimming.
    #[error("task description must be at least {0} characters long")]
    DescriptionTooShort(usize),

    /// The status is outside the fixed set. Kept as its own variant so
    /// callers can branch on "bad status" separately from "bad text".
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
}

/// Error returned while parsing a task status string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
