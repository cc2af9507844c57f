//! Point-in-time view of the organisational directory used for rendering.

use crate::analytics::config::DisplayConfig;
use crate::task::domain::{Department, DepartmentId, Employee, EmployeeId, Project, ProjectId};
use std::collections::HashMap;

/// Employees, departments and projects indexed by identifier.
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    employees: HashMap<EmployeeId, Employee>,
    departments: HashMap<DepartmentId, Department>,
    projects: HashMap<ProjectId, Project>,
}

impl DirectorySnapshot {
    /// Indexes the given records. Later duplicates replace earlier ones.
    #[must_use]
    pub fn new(
        employees: impl IntoIterator<Item = Employee>,
        departments: impl IntoIterator<Item = Department>,
        projects: impl IntoIterator<Item = Project>,
    ) -> Self {
        Self {
            employees: employees.into_iter().map(|e| (e.id(), e)).collect(),
            departments: departments.into_iter().map(|d| (d.id(), d)).collect(),
            projects: projects.into_iter().map(|p| (p.id(), p)).collect(),
        }
    }

    /// Returns an employee by identifier.
    #[must_use]
    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&id)
    }

    /// Returns a department by identifier.
    #[must_use]
    pub fn department(&self, id: DepartmentId) -> Option<&Department> {
        self.departments.get(&id)
    }

    /// Returns a project by identifier.
    #[must_use]
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }
}

/// Returns the image reference for an employee: the stored image if any,
/// otherwise the configured per-employee pattern.
#[must_use]
pub fn employee_image(employee: &Employee, display: &DisplayConfig) -> String {
    employee.image_url().map_or_else(
        || {
            display
                .employee_image_pattern
                .replace("{id}", &employee.id().to_string())
        },
        str::to_owned,
    )
}
