//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use workprogram::analytics::services::DashboardService;
use workprogram::task::{
    adapters::memory::{InMemoryDirectory, InMemoryTaskRepository},
    domain::{
        Department, DepartmentId, DepartmentKind, Employee, EmployeeId, Project, ProjectId,
        UserId,
    },
    services::{TaskImportService, TaskLifecycleService},
};

/// Clock pinned to noon UTC on a fixed day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Pins the clock to the given calendar day.
    ///
    /// # Panics
    ///
    /// Panics when the date does not exist.
    #[must_use]
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
                .single()
                .expect("valid fixed clock instant"),
        )
    }

    /// Returns the pinned calendar day.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a calendar date.
///
/// # Panics
///
/// Panics when the date does not exist.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Lifecycle service over the shared adapters.
pub type Lifecycle = TaskLifecycleService<InMemoryTaskRepository, InMemoryDirectory, FixedClock>;
/// Import service over the shared adapters.
pub type Importer = TaskImportService<InMemoryTaskRepository, InMemoryDirectory, FixedClock>;
/// Dashboard service over the shared adapters.
pub type Dashboard = DashboardService<InMemoryTaskRepository, InMemoryDirectory, FixedClock>;

/// Services wired to one repository, one directory and one clock.
pub struct Workspace {
    /// Task repository shared by every service.
    pub repository: Arc<InMemoryTaskRepository>,
    /// Lifecycle service.
    pub lifecycle: Lifecycle,
    /// Import service.
    pub importer: Importer,
    /// Dashboard service.
    pub dashboard: Dashboard,
    /// Clock shared by every service.
    pub clock: FixedClock,
}

/// Seeds two departments, three employees and two projects.
///
/// Amina (1, user 101) and Chen (3, user 103) work in Finance; Bruno (2,
/// user 102) works in Operations.
///
/// # Panics
///
/// Panics when the in-memory directory lock is poisoned.
#[must_use]
pub fn seeded_directory() -> InMemoryDirectory {
    let directory = InMemoryDirectory::new();
    for department in [
        Department::new(DepartmentId::new(10), "Finance", DepartmentKind::Internal),
        Department::new(DepartmentId::new(20), "Operations", DepartmentKind::External),
    ] {
        directory
            .insert_department(department)
            .expect("department insert");
    }
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
        directory.insert_employee(employee).expect("employee insert");
    }
    for project in [
        Project::new(ProjectId::new(100), "Payroll"),
        Project::new(ProjectId::new(200), "Logistics"),
    ] {
        directory.insert_project(project).expect("project insert");
    }
    directory
}

/// Provides services sharing fresh adapters, with today pinned to
/// 2024-06-30.
#[fixture]
pub fn workspace() -> Workspace {
    let clock = FixedClock::on(2024, 6, 30);
    let repository = Arc::new(InMemoryTaskRepository::new());
    let directory = Arc::new(seeded_directory());
    let shared_clock = Arc::new(clock);
    Workspace {
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::clone(&directory),
            Arc::clone(&shared_clock),
        ),
        importer: TaskImportService::new(
            Arc::clone(&repository),
            Arc::clone(&directory),
            Arc::clone(&shared_clock),
        ),
        dashboard: DashboardService::new(Arc::clone(&repository), directory, shared_clock),
        repository,
        clock,
    }
}
