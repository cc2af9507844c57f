//! Task builders shared by the analytics tests.

pub(crate) use crate::task::tests::fixtures::{FixedClock, date};
use crate::task::domain::{
    DepartmentId, EmployeeId, Level, PersistedTaskData, ProjectId, Task, TaskState,
};
use chrono::NaiveDate;

/// Terse builder over [`PersistedTaskData`].
pub(crate) struct TaskSpec(PersistedTaskData);

impl TaskSpec {
    pub(crate) fn new(state: TaskState) -> Self {
        let data = PersistedTaskData {
            state,
            ..PersistedTaskData::default()
        };
        Self(PersistedTaskData {
            reference: format!("WP-{}", data.id),
            ..data
        })
    }

    pub(crate) fn assigned(mut self, on: NaiveDate) -> Self {
        self.0.assignment_date = Some(on);
        self
    }

    pub(crate) fn due(mut self, initial: NaiveDate, actual: Option<NaiveDate>) -> Self {
        self.0.initial_deadline = Some(initial);
        self.0.actual_deadline = actual;
        self
    }

    pub(crate) fn owner(mut self, employee: u64, department: Option<u64>) -> Self {
        self.0.responsible_id = Some(EmployeeId::new(employee));
        self.0.department_id = department.map(DepartmentId::new);
        self
    }

    pub(crate) fn support(mut self, employees: &[u64]) -> Self {
        self.0.support_ids = employees.iter().copied().map(EmployeeId::new).collect();
        self
    }

    pub(crate) fn project(mut self, project: u64) -> Self {
        self.0.project_id = Some(ProjectId::new(project));
        self
    }

    pub(crate) fn ratings(mut self, priority: Option<Level>, complexity: Option<Level>) -> Self {
        self.0.priority = priority;
        self.0.complexity = complexity;
        self
    }

    pub(crate) fn satisfaction(mut self, level: Level) -> Self {
        self.0.satisfaction_level = Some(level);
        self
    }

    pub(crate) fn build(self) -> Task {
        Task::from_persisted(self.0)
    }
}

/// A done task due on `due` and concluded on `finished`.
pub(crate) fn done(due: NaiveDate, finished: NaiveDate) -> TaskSpec {
    TaskSpec::new(TaskState::Done).due(due, Some(finished))
}
