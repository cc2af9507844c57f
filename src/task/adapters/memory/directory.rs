//! In-memory organisational directory.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Department, DepartmentId, Employee, EmployeeId, Project, ProjectId, UserId},
    ports::{DirectoryError, DirectoryRepository, DirectoryResult},
};

/// Thread-safe in-memory directory of employees, departments and projects.
///
/// Records are kept in insertion order; inserting a record whose identifier
/// already exists replaces it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    employees: Vec<Employee>,
    departments: Vec<Department>,
    projects: Vec<Project>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the lock is poisoned.
    pub fn insert_employee(&self, employee: Employee) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        upsert(&mut state.employees, employee, Employee::id);
        Ok(())
    }

    /// Adds or replaces a department.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the lock is poisoned.
    pub fn insert_department(&self, department: Department) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        upsert(&mut state.departments, department, Department::id);
        Ok(())
    }

    /// Adds or replaces a project.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the lock is poisoned.
    pub fn insert_project(&self, project: Project) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        upsert(&mut state.projects, project, Project::id);
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&DirectoryState) -> T) -> DirectoryResult<T> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(f(&state))
    }
}

fn lock_error(err: impl ToString) -> DirectoryError {
    DirectoryError::persistence(std::io::Error::other(err.to_string()))
}

fn upsert<T, K: PartialEq>(records: &mut Vec<T>, record: T, key: impl Fn(&T) -> K) {
    let id = key(&record);
    match records.iter_mut().find(|existing| key(existing) == id) {
        Some(slot) => *slot = record,
        None => records.push(record),
    }
}

fn same_name(candidate: &str, wanted: &str) -> bool {
    candidate.trim().eq_ignore_ascii_case(wanted.trim())
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectory {
    async fn employee_by_user(&self, user_id: UserId) -> DirectoryResult<Option<Employee>> {
        self.read(|state| {
            state
                .employees
                .iter()
                .find(|employee| employee.user_id() == Some(user_id))
                .cloned()
        })
    }

    async fn employee(&self, id: EmployeeId) -> DirectoryResult<Option<Employee>> {
        self.read(|state| state.employees.iter().find(|e| e.id() == id).cloned())
    }

    async fn department(&self, id: DepartmentId) -> DirectoryResult<Option<Department>> {
        self.read(|state| state.departments.iter().find(|d| d.id() == id).cloned())
    }

    async fn project(&self, id: ProjectId) -> DirectoryResult<Option<Project>> {
        self.read(|state| state.projects.iter().find(|p| p.id() == id).cloned())
    }

    async fn list_employees(&self) -> DirectoryResult<Vec<Employee>> {
        self.read(|state| state.employees.clone())
    }

    async fn list_departments(&self) -> DirectoryResult<Vec<Department>> {
        self.read(|state| state.departments.clone())
    }

    async fn list_projects(&self) -> DirectoryResult<Vec<Project>> {
        self.read(|state| state.projects.clone())
    }

    async fn employee_by_name(&self, name: &str) -> DirectoryResult<Option<Employee>> {
        self.read(|state| {
            state
                .employees
                .iter()
                .find(|e| same_name(e.name(), name))
                .cloned()
        })
    }

    async fn department_by_name(&self, name: &str) -> DirectoryResult<Option<Department>> {
        self.read(|state| {
            state
                .departments
                .iter()
                .find(|d| same_name(d.name(), name))
                .cloned()
        })
    }

    async fn project_by_name(&self, name: &str) -> DirectoryResult<Option<Project>> {
        self.read(|state| {
            state
                .projects
                .iter()
                .find(|p| same_name(p.name(), name))
                .cloned()
        })
    }
}
