//! Work-program task records and their guarded lifecycle.
//!
//! Tasks are created as drafts, moved between nine states by guarded
//! actions, and imported from spreadsheet rows. The module follows hexagonal
//! architecture:
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
pub(crate) mod tests;
