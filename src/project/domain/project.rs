//! Project aggregate root.

use super::{ProjectDescription, ProjectId, ProjectName};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root.
///
/// A project owns zero or more tasks; the owning relationship is enforced
/// at the service layer (tasks reference the project id, and deleting a
/// project cascades to its tasks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: ProjectDescription,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted project name.
    pub name: ProjectName,
    /// Persisted project description.
    pub description: ProjectDescription,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project with a fresh identifier.
    #[must_use]
    pub fn new(name: ProjectName, description: ProjectDescription, clock: &impl Clock) -> Self {
        Self {
            id: ProjectId::new(),
            name,
            description,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            created_at: data.created_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub const fn description(&self) -> &ProjectDescription {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the project name.
    pub fn rename(&mut self, name: ProjectName) {
        self.name = name;
    }

    /// Replaces the project description.
    pub fn redescribe(&mut self, description: ProjectDescription) {
        self.description = description;
    }
}
