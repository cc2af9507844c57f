//! Domain model for work-program tasks.
//!
//! Tasks move through a guarded lifecycle; every state-mutating operation is
//! checked against the transition table before any field changes. Directory
//! records (employees, departments, projects) are plain values referenced by
//! id. Nothing here touches storage.

mod directory;
mod error;
mod ids;
mod level;
mod state;
mod task;

pub use directory::{Department, DepartmentKind, Employee, Project};
pub use error::{ParseLevelError, ParseTaskActionError, ParseTaskStateError, TaskDomainError};
pub use ids::{DepartmentId, EmployeeId, ProjectId, TaskId, UserId};
pub use level::Level;
pub use state::{TaskAction, TaskState};
pub use task::{CompletionPercentage, PersistedTaskData, Task};
