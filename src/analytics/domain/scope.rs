//! Access scope filter applied before any other filtering.

use super::Role;
use crate::task::domain::{EmployeeId, Task};

/// Visibility granted to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    /// Every task is visible.
    Unrestricted,
    /// Only tasks the employee owns or supports are visible.
    Employee(EmployeeId),
    /// Nothing is visible.
    Nothing,
}

impl AccessScope {
    /// Derives the scope from the caller's role and linked employee.
    ///
    /// Privileged roles ignore the employee link; other roles without a
    /// linked employee see nothing.
    #[must_use]
    pub const fn for_caller(role: Role, employee_id: Option<EmployeeId>) -> Self {
        if role.is_privileged() {
            return Self::Unrestricted;
        }
        match employee_id {
            Some(id) => Self::Employee(id),
            None => Self::Nothing,
        }
    }

    /// Returns `true` when `task` is visible under this scope.
    #[must_use]
    pub fn permits(&self, task: &Task) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Employee(id) => task.involves(*id, true),
            Self::Nothing => false,
        }
    }

    /// Keeps only the visible tasks, preserving order.
    #[must_use]
    pub fn apply(&self, mut tasks: Vec<Task>) -> Vec<Task> {
        tasks.retain(|task| self.permits(task));
        tasks
    }
}
