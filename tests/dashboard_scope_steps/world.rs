//! Shared world state for dashboard scope BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workprogram::analytics::services::DashboardService;
use workprogram::task::{
    adapters::memory::{InMemoryDirectory, InMemoryTaskRepository},
    domain::{DepartmentId, Employee, EmployeeId, UserId},
    services::TaskLifecycleService,
};

/// Outcome of the last dashboard request, reduced to what the steps check.
#[derive(Debug, Clone, Default)]
pub struct LastResponse {
    pub error: bool,
    pub message: Option<String>,
    pub total_tasks: Option<usize>,
}

/// Scenario world for dashboard scope behaviour tests.
pub struct DashboardScopeWorld {
    pub lifecycle: TaskLifecycleService<InMemoryTaskRepository, InMemoryDirectory, DefaultClock>,
    pub dashboard: DashboardService<InMemoryTaskRepository, InMemoryDirectory, DefaultClock>,
    pub last_response: Option<LastResponse>,
}

impl DashboardScopeWorld {
    /// Creates a world whose directory holds Amina, Bruno and Chen.
    ///
    /// # Panics
    ///
    /// Panics when the in-memory directory lock is poisoned.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let directory = Arc::new(InMemoryDirectory::new());
        let clock = Arc::new(DefaultClock);
        for employee in [
            Employee::new(EmployeeId::new(1), "Amina")
                .with_department(DepartmentId::new(10))
                .with_user(UserId::new(101)),
            Employee::new(EmployeeId::new(2), "Bruno")
                .with_department(DepartmentId::new(20))
                .with_user(UserId::new(102)),
            Employee::new(EmployeeId::new(3), "Chen")
                .with_department(DepartmentId::new(10))
                .with_user(UserId::new(103)),
        ] {
            directory
                .insert_employee(employee)
                .expect("employee insert");
        }

        Self {
            lifecycle: TaskLifecycleService::new(
                Arc::clone(&repository),
                Arc::clone(&directory),
                Arc::clone(&clock),
            ),
            dashboard: DashboardService::new(repository, directory, clock),
            last_response: None,
        }
    }

    /// Returns the last recorded response.
    ///
    /// # Errors
    ///
    /// Returns an error when no request was made yet.
    pub fn response(&self) -> Result<&LastResponse, eyre::Report> {
        self.last_response
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing dashboard response in scenario world"))
    }
}

impl Default for DashboardScopeWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DashboardScopeWorld {
    DashboardScopeWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
