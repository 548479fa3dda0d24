//! Service layer for task lifecycle orchestration.
//!
//! Provides [`TaskLifecycleService`] which coordinates task creation within
//! a project, filtered reads, partial updates, deletion, search, statistics,
//! and the privileged autoclose sweep over overdue tasks.

use crate::config::AppConfig;
use crate::project::{
    domain::ProjectId,
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{Task, TaskDescription, TaskDomainError, TaskId, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a new task.
///
/// Status defaults to `todo` when not supplied; the deadline is optional
/// and may lie in the past, since a task may record something already
/// overdue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: String,
    status: Option<String>,
    deadline: Option<NaiveDate>,
}

impl CreateTaskRequest {
    /// Creates a request with the mandatory task fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: description.into(),
            status: None,
            deadline: None,
        }
    }

    /// Supplies an initial status instead of the `todo` default.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Supplies a deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Request payload for a partial task update.
///
/// Omitted fields are left untouched; a supplied deadline replaces the old
/// one. Fields are validated and applied in the fixed order title,
/// description, status, deadline, and the first invalid field fails the
/// whole call before any write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    deadline: Option<NaiveDate>,
}

impl UpdateTaskRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Supplies a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Supplies a new status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Supplies a new deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Task counts aggregated over all tasks or one project's tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStatistics {
    /// Number of tasks in scope.
    pub total: usize,
    /// Tasks with status `todo`.
    pub todo: usize,
    /// Tasks with status `doing`.
    pub doing: usize,
    /// Tasks with status `done`.
    pub done: usize,
    /// Tasks past their deadline and not yet done.
    pub overdue: usize,
    /// Tasks that have reached `done`.
    pub completed: usize,
}

impl TaskStatistics {
    fn summarize(tasks: &[Task], today: NaiveDate) -> Self {
        let mut stats = Self {
            total: tasks.len(),
            ..Self::default()
        };
        for task in tasks {
            match task.status() {
                TaskStatus::Todo => stats.todo += 1,
                TaskStatus::Doing => stats.doing += 1,
                TaskStatus::Done => stats.done += 1,
            }
            if task.is_overdue(today) {
                stats.overdue += 1;
            }
        }
        stats.completed = stats.done;
        stats
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The parent project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The configured per-project task maximum has been reached.
    #[error("maximum number of tasks ({0}) exceeded for this project")]
    LimitExceeded(usize),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Project repository operation failed during the parent check.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Owns the task port and the project port; the latter backs the
/// parent-existence check on creation.
#[derive(Clone)]
pub struct TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<T>,
    project_repository: Arc<P>,
    config: Arc<AppConfig>,
    clock: Arc<C>,
}

impl<T, P, C> TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        repository: Arc<T>,
        project_repository: Arc<P>,
        config: Arc<AppConfig>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            project_repository,
            config,
            clock,
        }
    }

    /// Creates a new task in a project.
    ///
    /// All fields are validated before any read or write; the parent project
    /// must exist and must not have reached the per-project task maximum.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when a field fails validation,
    /// [`TaskLifecycleError::ProjectNotFound`] when the parent project does
    /// not exist, or [`TaskLifecycleError::LimitExceeded`] when the project
    /// is full.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            project_id,
            title,
            description,
            status,
            deadline,
        } = request;

        let validated_title = TaskTitle::new(title)?;
        let validated_description = TaskDescription::new(description)?;
        let validated_status = status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()
            .map_err(TaskDomainError::from)?
            .unwrap_or_default();

        if !self.project_repository.exists(project_id).await? {
            return Err(TaskLifecycleError::ProjectNotFound(project_id));
        }

        let limit = self.config.max_tasks_per_project();
        if self.repository.count_by_project(project_id).await? >= limit {
            return Err(TaskLifecycleError::LimitExceeded(limit));
        }

        let task = Task::new(
            project_id,
            validated_title,
            validated_description,
            validated_status,
            deadline,
            &*self.clock,
        );
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// Returns `Ok(None)` when no task has the given ID; callers decide
    /// whether absence is an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns all tasks in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_all(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }

    /// Returns the tasks belonging to one project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_project(&self, project_id: ProjectId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_by_project(project_id).await?)
    }

    /// Returns the tasks with the given status.
    ///
    /// An unrecognized status yields an empty list, never an error: these
    /// are filters, not mutating validated input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_status(&self, status: &str) -> TaskLifecycleResult<Vec<Task>> {
        let Ok(parsed) = TaskStatus::try_from(status) else {
            return Ok(Vec::new());
        };
        Ok(self.repository.list_by_status(parsed).await?)
    }

    /// Returns the tasks in one project with the given status.
    ///
    /// Follows the same lenient filter policy as [`Self::list_by_status`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_project_and_status(
        &self,
        project_id: ProjectId,
        status: &str,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let Ok(parsed) = TaskStatus::try_from(status) else {
            return Ok(Vec::new());
        };
        Ok(self
            .repository
            .list_by_project_and_status(project_id, parsed)
            .await?)
    }

    /// Applies a partial update to a task.
    ///
    /// Supplied fields are validated and applied in the fixed order title,
    /// description, status, deadline; the first invalid field fails the
    /// whole call and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist, or [`TaskLifecycleError::Domain`] when a supplied field fails
    /// validation.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_by_id_or_error(id).await?;
        let UpdateTaskRequest {
            title,
            description,
            status,
            deadline,
        } = request;

        if let Some(raw_title) = title {
            task.retitle(TaskTitle::new(raw_title)?, &*self.clock);
        }

        if let Some(raw_description) = description {
            task.redescribe(TaskDescription::new(raw_description)?, &*self.clock);
        }

        if let Some(raw_status) = status {
            let parsed = TaskStatus::try_from(raw_status.as_str()).map_err(TaskDomainError::from)?;
            task.set_status(parsed, &*self.clock);
        }

        if let Some(new_deadline) = deadline {
            task.set_deadline(new_deadline, &*self.clock);
        }

        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task by identifier.
    ///
    /// Returns `false` when the task did not exist; deletion is
    /// idempotent-style rather than erroring on absence.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the delete fails.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<bool> {
        Ok(self.repository.delete(id).await?)
    }

    /// Reports whether a task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn exists(&self, id: TaskId) -> TaskLifecycleResult<bool> {
        Ok(self.repository.exists(id).await?)
    }

    /// Returns the number of tasks in one project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn count_by_project(&self, project_id: ProjectId) -> TaskLifecycleResult<usize> {
        Ok(self.repository.count_by_project(project_id).await?)
    }

    /// Returns every overdue task, evaluated against the clock's current
    /// date at call time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn overdue(&self) -> TaskLifecycleResult<Vec<Task>> {
        let today = self.clock.utc().date_naive();
        let tasks = self.repository.list_all().await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.is_overdue(today))
            .collect())
    }

    /// Returns the overdue tasks in one project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn overdue_by_project(
        &self,
        project_id: ProjectId,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let today = self.clock.utc().date_naive();
        let tasks = self.repository.list_by_project(project_id).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.is_overdue(today))
            .collect())
    }

    /// Returns every completed task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn completed(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_by_status(TaskStatus::Done).await?)
    }

    /// Returns the completed tasks in one project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn completed_by_project(
        &self,
        project_id: ProjectId,
    ) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self
            .repository
            .list_by_project_and_status(project_id, TaskStatus::Done)
            .await?)
    }

    /// Searches tasks by title or description, ignoring case, optionally
    /// scoped to one project.
    ///
    /// A blank query returns an empty list rather than every task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn search(
        &self,
        query: &str,
        scope: Option<ProjectId>,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(project_id) = scope {
            let tasks = self.repository.list_by_project(project_id).await?;
            return Ok(filter_matching(tasks, &needle));
        }

        let tasks = self.repository.list_all().await?;
        Ok(filter_matching(tasks, &needle))
    }

    /// Returns task counts over all tasks or one project's tasks.
    ///
    /// Overdue counts are evaluated against the clock's current date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn statistics(&self, scope: Option<ProjectId>) -> TaskLifecycleResult<TaskStatistics> {
        let today = self.clock.utc().date_naive();

        if let Some(project_id) = scope {
            let tasks = self.repository.list_by_project(project_id).await?;
            return Ok(TaskStatistics::summarize(&tasks, today));
        }

        let tasks = self.repository.list_all().await?;
        Ok(TaskStatistics::summarize(&tasks, today))
    }

    /// Force-closes every overdue task, returning the number closed.
    ///
    /// Each task with a deadline strictly before today and status other
    /// than `done` transitions to `done` with the closed timestamp stamped
    /// to the current instant. This bypasses the normal update validation
    /// path and is idempotent across repeated runs: once a task is `done`
    /// it is excluded from further sweeps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when a lookup or write
    /// fails; tasks already swept stay closed.
    pub async fn autoclose_overdue(&self) -> TaskLifecycleResult<usize> {
        let today = self.clock.utc().date_naive();
        let tasks = self.repository.list_all().await?;

        let mut closed = 0_usize;
        for mut task in tasks {
            if !task.is_overdue(today) {
                continue;
            }
            task.force_close(&*self.clock);
            self.repository.update(&task).await?;
            closed += 1;
        }

        tracing::info!(closed, "autoclose sweep finished");
        Ok(closed)
    }

    async fn find_by_id_or_error(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskLifecycleError::NotFound(id))
    }
}

fn filter_matching(tasks: Vec<Task>, needle: &str) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| {
            task.title().as_str().to_lowercase().contains(needle)
                || task.description().as_str().to_lowercase().contains(needle)
        })
        .collect()
}
