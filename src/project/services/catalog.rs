//! Service layer for project catalog orchestration.
//!
//! Provides [`ProjectCatalogService`] which coordinates project creation,
//! lookup, partial update, cascading deletion, search, and per-project task
//! statistics.

use crate::config::AppConfig;
use crate::project::{
    domain::{Project, ProjectDescription, ProjectDomainError, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{Task, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: String,
}

impl CreateProjectRequest {
    /// Creates a request with the mandatory project fields.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Request payload for a partial project update.
///
/// Omitted fields are left untouched; absence, not emptiness, signals
/// "no change".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    name: Option<String>,
    description: Option<String>,
}

impl UpdateProjectRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies a new project name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Supplies a new project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Task counts aggregated for a single project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectStatistics {
    /// Number of tasks in the project.
    pub total: usize,
    /// Tasks with status `todo`.
    pub todo: usize,
    /// Tasks with status `doing`.
    pub doing: usize,
    /// Tasks with status `done`.
    pub done: usize,
    /// Tasks past their deadline and not yet done.
    pub overdue: usize,
}

impl ProjectStatistics {
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
        stats
    }
}

/// Service-level errors for project catalog operations.
#[derive(Debug, Error)]
pub enum ProjectCatalogError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Another project already holds the name, compared case-insensitively.
    #[error("project name already in use: {0}")]
    DuplicateName(ProjectName),

    /// The configured project maximum has been reached.
    #[error("maximum number of projects ({0}) exceeded")]
    LimitExceeded(usize),

    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),

    /// Task repository operation failed during a cascade or statistics read.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

/// Result type for project catalog service operations.
pub type ProjectCatalogResult<T> = Result<T, ProjectCatalogError>;

/// Project catalog orchestration service.
///
/// Owns both repository ports: the task port is needed for the deletion
/// cascade and for per-project statistics.
#[derive(Clone)]
pub struct ProjectCatalogService<R, T, C>
where
    R: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    task_repository: Arc<T>,
    config: Arc<AppConfig>,
    clock: Arc<C>,
}

impl<R, T, C> ProjectCatalogService<R, T, C>
where
    R: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project catalog service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        task_repository: Arc<T>,
        config: Arc<AppConfig>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            task_repository,
            config,
            clock,
        }
    }

    /// Creates a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Domain`] when a field fails
    /// validation, [`ProjectCatalogError::LimitExceeded`] when the
    /// configured maximum is reached, or
    /// [`ProjectCatalogError::DuplicateName`] when the name is already in
    /// use (including a concurrent create detected by the repository).
    pub async fn create(&self, request: CreateProjectRequest) -> ProjectCatalogResult<Project> {
        let CreateProjectRequest { name, description } = request;
        let validated_name = ProjectName::new(name)?;
        let validated_description = ProjectDescription::new(description)?;

        let limit = self.config.max_projects();
        if self.repository.count().await? >= limit {
            return Err(ProjectCatalogError::LimitExceeded(limit));
        }

        if self.repository.find_by_name(&validated_name).await?.is_some() {
            return Err(ProjectCatalogError::DuplicateName(validated_name));
        }

        let project = Project::new(validated_name, validated_description, &*self.clock);
        match self.repository.store(&project).await {
            Ok(()) => Ok(project),
            Err(ProjectRepositoryError::DuplicateProjectName(existing)) => {
                Err(ProjectCatalogError::DuplicateName(existing))
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Finds a project by identifier.
    ///
    /// Returns `Ok(None)` when no project has the given ID; callers decide
    /// whether absence is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: ProjectId) -> ProjectCatalogResult<Option<Project>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Finds a project by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Domain`] when the name string fails
    /// validation, or [`ProjectCatalogError::Repository`] when persistence
    /// lookup fails.
    pub async fn find_by_name(&self, name: &str) -> ProjectCatalogResult<Option<Project>> {
        let validated_name = ProjectName::new(name)?;
        Ok(self.repository.find_by_name(&validated_name).await?)
    }

    /// Returns all projects in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_all(&self) -> ProjectCatalogResult<Vec<Project>> {
        Ok(self.repository.list_all().await?)
    }

    /// Applies a partial update to a project.
    ///
    /// Supplied fields are re-validated; the duplicate-name rule is
    /// re-checked excluding the project being updated.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::NotFound`] when the project does not
    /// exist, [`ProjectCatalogError::Domain`] when a supplied field fails
    /// validation, or [`ProjectCatalogError::DuplicateName`] when the new
    /// name collides with another project.
    pub async fn update(
        &self,
        id: ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectCatalogResult<Project> {
        let mut project = self.find_by_id_or_error(id).await?;
        let UpdateProjectRequest { name, description } = request;

        if let Some(raw_name) = name {
            let new_name = ProjectName::new(raw_name)?;
            if let Some(existing) = self.repository.find_by_name(&new_name).await?
                && existing.id() != id
            {
                return Err(ProjectCatalogError::DuplicateName(new_name));
            }
            project.rename(new_name);
        }

        if let Some(raw_description) = description {
            project.redescribe(ProjectDescription::new(raw_description)?);
        }

        match self.repository.update(&project).await {
            Ok(()) => Ok(project),
            Err(ProjectRepositoryError::DuplicateProjectName(existing)) => {
                Err(ProjectCatalogError::DuplicateName(existing))
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Deletes a project and all of its tasks.
    ///
    /// Returns `false` when the project did not exist; deletion is
    /// idempotent-style rather than erroring on absence.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::TaskRepository`] or
    /// [`ProjectCatalogError::Repository`] when either delete fails.
    pub async fn delete(&self, id: ProjectId) -> ProjectCatalogResult<bool> {
        if !self.repository.exists(id).await? {
            return Ok(false);
        }

        let removed_tasks = self.task_repository.delete_by_project(id).await?;
        tracing::debug!(project = %id, removed_tasks, "cascade removed project tasks");
        Ok(self.repository.delete(id).await?)
    }

    /// Reports whether a project exists.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn exists(&self, id: ProjectId) -> ProjectCatalogResult<bool> {
        Ok(self.repository.exists(id).await?)
    }

    /// Returns the total number of projects.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn count(&self) -> ProjectCatalogResult<usize> {
        Ok(self.repository.count().await?)
    }

    /// Searches projects by name or description, ignoring case.
    ///
    /// A blank query returns an empty list rather than every project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn search(&self, query: &str) -> ProjectCatalogResult<Vec<Project>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let projects = self.repository.list_all().await?;
        Ok(projects
            .into_iter()
            .filter(|project| matches_project(project, &needle))
            .collect())
    }

    /// Returns task counts for one project.
    ///
    /// Overdue counts are evaluated against the clock's current date.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::NotFound`] when the project does not
    /// exist, or [`ProjectCatalogError::TaskRepository`] when the task
    /// lookup fails.
    pub async fn statistics(&self, id: ProjectId) -> ProjectCatalogResult<ProjectStatistics> {
        if !self.repository.exists(id).await? {
            return Err(ProjectCatalogError::NotFound(id));
        }

        let tasks = self.task_repository.list_by_project(id).await?;
        let today = self.clock.utc().date_naive();
        Ok(ProjectStatistics::summarize(&tasks, today))
    }

    async fn find_by_id_or_error(&self, id: ProjectId) -> ProjectCatalogResult<Project> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProjectCatalogError::NotFound(id))
    }
}

fn matches_project(project: &Project, needle: &str) -> bool {
    project.name().as_str().to_lowercase().contains(needle)
        || project.description().as_str().to_lowercase().contains(needle)
}
