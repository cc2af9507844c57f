//! Read-only port onto employee, department and project records.

use crate::task::domain::{
    Department, DepartmentId, Employee, EmployeeId, Project, ProjectId, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Lookup contract for the organisational directory.
///
/// Every single-record lookup returns `None` when nothing matches; absence is
/// not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Returns the employee linked to a user account.
    async fn employee_by_user(&self, user_id: UserId) -> DirectoryResult<Option<Employee>>;

    /// Returns an employee by identifier.
    async fn employee(&self, id: EmployeeId) -> DirectoryResult<Option<Employee>>;

    /// Returns a department by identifier.
    async fn department(&self, id: DepartmentId) -> DirectoryResult<Option<Department>>;

    /// Returns a project by identifier.
    async fn project(&self, id: ProjectId) -> DirectoryResult<Option<Project>>;

    /// Returns every employee.
    async fn list_employees(&self) -> DirectoryResult<Vec<Employee>>;

    /// Returns every department.
    async fn list_departments(&self) -> DirectoryResult<Vec<Department>>;

    /// Returns every project.
    async fn list_projects(&self) -> DirectoryResult<Vec<Project>>;

    /// Returns the first employee whose name matches, ignoring case and
    /// surrounding whitespace.
    async fn employee_by_name(&self, name: &str) -> DirectoryResult<Option<Employee>>;

    /// Returns the first department whose name matches, ignoring case and
    /// surrounding whitespace.
    async fn department_by_name(&self, name: &str) -> DirectoryResult<Option<Department>>;

    /// Returns the first project whose name matches, ignoring case and
    /// surrounding whitespace.
    async fn project_by_name(&self, name: &str) -> DirectoryResult<Option<Project>>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Persistence-layer failure.
    #[error("directory persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
