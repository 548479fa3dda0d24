//! Environment-sourced application configuration.
//!
//! Limits and display metadata are read once at process start and injected
//! into the services; business logic never consults the environment
//! directly. Absent or malformed values fall back to the static defaults
//! silently, so configuration loading can never fail.

use std::env;

/// Environment variable naming the global project maximum.
const ENV_MAX_PROJECTS: &str = "PROJECT_OF_NUMBER_MAX";

/// Environment variable naming the per-project task maximum.
const ENV_MAX_TASKS_PER_PROJECT: &str = "TASK_OF_NUMBER_MAX";

/// Environment variable overriding the application display name.
const ENV_APP_NAME: &str = "APP_NAME";

/// Environment variable overriding the application version string.
const ENV_APP_VERSION: &str = "APP_VERSION";

const DEFAULT_MAX_PROJECTS: usize = 10;
const DEFAULT_MAX_TASKS_PER_PROJECT: usize = 50;
const DEFAULT_APP_NAME: &str = "aalto";

/// Tunable limits and display metadata for one process.
///
/// Constructed once at composition time (usually via [`AppConfig::from_env`])
/// and shared with the services behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    max_projects: usize,
    max_tasks_per_project: usize,
    app_name: String,
    app_version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_projects: DEFAULT_MAX_PROJECTS,
            max_tasks_per_project: DEFAULT_MAX_TASKS_PER_PROJECT,
            app_name: DEFAULT_APP_NAME.to_owned(),
            app_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// Unset or unparseable values keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_projects: env_usize(ENV_MAX_PROJECTS, defaults.max_projects),
            max_tasks_per_project: env_usize(
                ENV_MAX_TASKS_PER_PROJECT,
                defaults.max_tasks_per_project,
            ),
            app_name: env_string(ENV_APP_NAME, defaults.app_name),
            app_version: env_string(ENV_APP_VERSION, defaults.app_version),
        }
    }

    /// Returns the maximum number of projects allowed.
    #[must_use]
    pub const fn max_projects(&self) -> usize {
        self.max_projects
    }

    /// Returns the maximum number of tasks allowed per project.
    #[must_use]
    pub const fn max_tasks_per_project(&self) -> usize {
        self.max_tasks_per_project
    }

    /// Returns the application display name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the application version string.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Overrides the project maximum.
    #[must_use]
    pub const fn with_max_projects(mut self, maximum: usize) -> Self {
        self.max_projects = maximum;
        self
    }

    /// Overrides the per-project task maximum.
    #[must_use]
    pub const fn with_max_tasks_per_project(mut self, maximum: usize) -> Self {
        self.max_tasks_per_project = maximum;
        self
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}
