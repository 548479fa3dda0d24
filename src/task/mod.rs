//! Task lifecycle management for Aalto.
//!
//! This module owns the Task aggregate: validated titles and descriptions,
//! the three-state status machine, deadline-derived overdue state, the
//! per-project task limit, and the privileged autoclose sweep that forces
//! overdue tasks to `done`. The module follows hexagonal architecture:
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
