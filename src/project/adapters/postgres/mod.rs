//! `PostgreSQL` adapters for project catalog persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresProjectRepository, ProjectPgPool};
