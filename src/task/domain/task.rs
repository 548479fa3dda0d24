//! Task aggregate root.

use super::{TaskDescription, TaskId, TaskStatus, TaskTitle};
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// The parent project identifier is immutable; the owning service verifies
/// it references an existing project at creation time. `closed_at` is only
/// ever written by [`Task::force_close`]; an ordinary status change to
/// `done` leaves it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: TaskDescription,
    status: TaskStatus,
    deadline: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted parent project identifier.
    pub project_id: ProjectId,
    /// Persisted task title.
    pub title: TaskTitle,
    /// Persisted task description.
    pub description: TaskDescription,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted deadline, if any.
    pub deadline: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted autoclose timestamp, if the sweep has closed the task.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task in the given project.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: TaskTitle,
        description: TaskDescription,
        status: TaskStatus,
        deadline: Option<NaiveDate>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id,
            title,
            description,
            status,
            deadline,
            created_at: timestamp,
            updated_at: timestamp,
            closed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            deadline: data.deadline,
            created_at: data.created_at,
            updated_at: data.updated_at,
            closed_at: data.closed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the parent project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the autoclose timestamp, if the sweep has closed the task.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Reports whether the deadline has passed without the task reaching
    /// `done`.
    ///
    /// A task with no deadline is never overdue. The comparison is strict:
    /// a task due today is not yet overdue.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.deadline.is_some_and(|deadline| deadline < today) && self.status != TaskStatus::Done
    }

    /// Reports whether the task has reached `done`.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Replaces the task title.
    pub fn retitle(&mut self, title: TaskTitle, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Replaces the task description.
    pub fn redescribe(&mut self, description: TaskDescription, clock: &impl Clock) {
        self.description = description;
        self.touch(clock);
    }

    /// Replaces the task status.
    ///
    /// Moving to `done` through this path leaves `closed_at` untouched; the
    /// closed timestamp is reserved for the autoclose sweep.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Replaces the deadline.
    pub fn set_deadline(&mut self, deadline: NaiveDate, clock: &impl Clock) {
        self.deadline = Some(deadline);
        self.touch(clock);
    }

    /// Force-closes the task: status becomes `done` and the closed
    /// timestamp is stamped with the current instant.
    ///
    /// This is the privileged, system-initiated transition used by the
    /// autoclose sweep. It bypasses caller intent entirely.
    pub fn force_close(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Done;
        self.closed_at = Some(clock.utc());
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
