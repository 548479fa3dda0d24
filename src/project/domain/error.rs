//! Error types for project domain validation.

use thiserror::Error;

/// Errors returned while constructing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name cannot be empty")]
    EmptyName,

    /// The project name is shorter than the required minimum after trimming.
    #[error("project name must be at least {0} characters long")]
    NameTooShort(usize),

    /// The project description is empty after trimming.
    #[error("project description cannot be empty")]
    EmptyDescription,

    /// The project description is shorter than the required minimum after
    /// trimming.
    #[error("project description must be at least {0} characters long")]
    DescriptionTooShort(usize),
}
