//! Project catalog management for Aalto.
//!
//! This module owns the Project aggregate: globally unique, case-insensitive
//! names, validated descriptions, a configurable count limit, and the
//! cascade that removes a project's tasks along with the project. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
