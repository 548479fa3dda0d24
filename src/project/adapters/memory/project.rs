//! In-memory repository for project catalog storage.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{Project, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
///
/// The insertion-order vector stands in for the `ORDER BY created_at`
/// queries of the durable adapter, so listings stay in creation order even
/// when two projects share a timestamp.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    insertion_order: Vec<ProjectId>,
    name_index: HashMap<String, ProjectId>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }

        let key = project.name().normalized();
        if state.name_index.contains_key(&key) {
            return Err(ProjectRepositoryError::DuplicateProjectName(
                project.name().clone(),
            ));
        }

        state.name_index.insert(key, project.id());
        state.insertion_order.push(project.id());
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let old_key = state
            .projects
            .get(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?
            .name()
            .normalized();

        let new_key = project.name().normalized();
        if new_key != old_key {
            if let Some(&indexed_id) = state.name_index.get(&new_key)
                && indexed_id != project.id()
            {
                return Err(ProjectRepositoryError::DuplicateProjectName(
                    project.name().clone(),
                ));
            }
            state.name_index.remove(&old_key);
            state.name_index.insert(new_key, project.id());
        }

        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &ProjectName) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let project = state
            .name_index
            .get(&name.normalized())
            .and_then(|id| state.projects.get(id))
            .cloned();
        Ok(project)
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let projects = state
            .insertion_order
            .iter()
            .filter_map(|id| state.projects.get(id))
            .cloned()
            .collect();
        Ok(projects)
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        let mut state = self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let Some(removed) = state.projects.remove(&id) else {
            return Ok(false);
        };
        state.name_index.remove(&removed.name().normalized());
        state.insertion_order.retain(|entry| *entry != id);
        Ok(true)
    }

    async fn exists(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.projects.contains_key(&id))
    }

    async fn count(&self) -> ProjectRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.projects.len())
    }
}
