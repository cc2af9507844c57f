//! In-memory adapters used by tests and reference deployments.

mod directory;
mod task;

pub use directory::InMemoryDirectory;
pub use task::InMemoryTaskRepository;
