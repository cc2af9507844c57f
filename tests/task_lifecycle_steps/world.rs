//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use workprogram::task::{
    adapters::memory::{InMemoryDirectory, InMemoryTaskRepository},
    domain::{ParseTaskActionError, Task, TaskState},
    services::{TaskLifecycleError, TaskLifecycleService},
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

/// Clock pinned to noon UTC on one day, so "today" cannot move mid-scenario.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioClock(DateTime<Utc>);

impl ScenarioClock {
    /// Pins the clock to 2024-06-30.
    ///
    /// # Panics
    ///
    /// Panics when the pinned instant is invalid.
    #[must_use]
    pub fn pinned() -> Self {
        Self(
            Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0)
                .single()
                .expect("valid scenario clock instant"),
        )
    }

    /// Returns the pinned calendar day.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Service type used by the BDD world.
pub type TestLifecycleService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryDirectory, ScenarioClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub service: TestLifecycleService,
    pub clock: ScenarioClock,
    pub tasks: Vec<Task>,
    pub states_before_batch: Vec<TaskState>,
    pub last_action_result: Option<Result<Task, TaskLifecycleError>>,
    pub last_parse_error: Option<ParseTaskActionError>,
    pub last_batch_result: Option<Result<Vec<Task>, TaskLifecycleError>>,
}

impl TaskLifecycleWorld {
    /// Creates a world with an empty repository and directory.
    #[must_use]
    pub fn new() -> Self {
        let clock = ScenarioClock::pinned();
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryDirectory::new()),
            Arc::new(clock),
        );

        Self {
            service,
            clock,
            tasks: Vec::new(),
            states_before_batch: Vec::new(),
            last_action_result: None,
            last_parse_error: None,
            last_batch_result: None,
        }
    }

    /// Returns the most recently created task.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created yet.
    pub fn current_task(&self) -> Result<&Task, eyre::Report> {
        self.tasks
            .last()
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }

    /// Replaces the stored copy of `task`.
    pub fn remember(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id() == task.id()) {
            *slot = task;
        }
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
