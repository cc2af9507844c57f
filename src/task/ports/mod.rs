//! Port contracts for task records and the organisational directory.
//!
//! Ports define infrastructure-agnostic interfaces used by task and analytics
//! services.

pub mod directory;
pub mod repository;

pub use directory::{DirectoryError, DirectoryRepository, DirectoryResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

#[cfg(test)]
pub use directory::MockDirectoryRepository;
