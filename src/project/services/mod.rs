//! Application services for project catalog orchestration.

mod catalog;

pub use catalog::{
    CreateProjectRequest, ProjectCatalogError, ProjectCatalogResult, ProjectCatalogService,
    ProjectStatistics, UpdateProjectRequest,
};
