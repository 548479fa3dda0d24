//! `PostgreSQL` repository implementation for project catalog storage.

use super::{
    models::{NewProjectRow, ProjectRow},
    schema::projects,
};
use crate::project::{
    domain::{PersistedProjectData, Project, ProjectDescription, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by project adapters.
pub type ProjectPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: ProjectPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProjectPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let project_name = project.name().clone();
        let new_row = to_new_row(project);

        self.run_blocking(move |connection| {
            // The lookup gives a precise conflict error up front; the
            // lowered-name unique index still covers the window between
            // check and insert.
            let duplicate = find_project_by_name(connection, &project_name)?;
            if duplicate.is_some() {
                return Err(ProjectRepositoryError::DuplicateProjectName(project_name));
            }

            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_project_name_unique_violation(info.as_ref()) =>
                    {
                        ProjectRepositoryError::DuplicateProjectName(project_name)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;

            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let project_name = project.name().clone();
        let name_value = project.name().as_str().to_owned();
        let description_value = project.description().as_str().to_owned();

        self.run_blocking(move |connection| {
            let updated = diesel::update(projects::table.filter(projects::id.eq(project_id.into_inner())))
                .set((
                    projects::name.eq(name_value),
                    projects::description.eq(description_value),
                ))
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProjectName(project_name)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;

            if updated == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_by_name(&self, name: &ProjectName) -> ProjectRepositoryResult<Option<Project>> {
        let lookup_name = name.clone();
        self.run_blocking(move |connection| {
            let row = find_project_by_name(connection, &lookup_name)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .order_by(projects::created_at.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(projects::table.filter(projects::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn exists(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                projects::table.filter(projects::id.eq(id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(ProjectRepositoryError::persistence)
        })
        .await
    }

    async fn count(&self) -> ProjectRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let total = projects::table
                .count()
                .get_result::<i64>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            usize::try_from(total).map_err(ProjectRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        description: project.description().as_str().to_owned(),
        created_at: project.created_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        description,
        created_at,
    } = row;

    let data = PersistedProjectData {
        id: ProjectId::from_uuid(id),
        name: ProjectName::new(name).map_err(ProjectRepositoryError::invalid_persisted_data)?,
        description: ProjectDescription::new(description)
            .map_err(ProjectRepositoryError::invalid_persisted_data)?,
        created_at,
    };
    Ok(Project::from_persisted(data))
}

fn is_project_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "uq_projects_name_lower")
}

fn find_project_by_name(
    connection: &mut PgConnection,
    name: &ProjectName,
) -> ProjectRepositoryResult<Option<ProjectRow>> {
    let query = diesel::sql_query(concat!(
        "SELECT id, name, description, created_at FROM projects ",
        "WHERE LOWER(name) = $1 ",
        "LIMIT 1",
    ))
    .bind::<diesel::sql_types::Text, _>(name.normalized());

    query
        .get_result::<ProjectRow>(connection)
        .optional()
        .map_err(ProjectRepositoryError::persistence)
}
