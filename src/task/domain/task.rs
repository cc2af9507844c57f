//! Task aggregate root and its guarded lifecycle.

use super::{
    DepartmentId, EmployeeId, Level, ProjectId, TaskAction, TaskDomainError, TaskId, TaskState,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Share of the work completed, constrained to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CompletionPercentage(f64);

impl CompletionPercentage {
    /// Creates a validated completion percentage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidCompletionPercentage`] when the value
    /// lies outside `[0, 100]` or is not a number.
    pub fn new(value: f64) -> Result<Self, TaskDomainError> {
        if !(0.0..=100.0).contains(&value) {
            return Err(TaskDomainError::InvalidCompletionPercentage(value));
        }
        Ok(Self(value))
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for CompletionPercentage {
    type Error = TaskDomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompletionPercentage> for f64 {
    fn from(value: CompletionPercentage) -> Self {
        value.0
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    reference: String,
    description: Option<String>,
    comments: Option<String>,
    project_id: Option<ProjectId>,
    department_id: Option<DepartmentId>,
    responsible_id: Option<EmployeeId>,
    support_ids: BTreeSet<EmployeeId>,
    priority: Option<Level>,
    complexity: Option<Level>,
    satisfaction_level: Option<Level>,
    assignment_date: Option<NaiveDate>,
    initial_deadline: Option<NaiveDate>,
    actual_deadline: Option<NaiveDate>,
    duration_hours: f64,
    postpone_count: u32,
    completion: CompletionPercentage,
    state: TaskState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Unique human-facing reference.
    pub reference: String,
    /// Inputs needed to carry out the task.
    pub description: Option<String>,
    /// Free-form remarks.
    pub comments: Option<String>,
    /// Project the task belongs to.
    pub project_id: Option<ProjectId>,
    /// Department of the responsible employee.
    pub department_id: Option<DepartmentId>,
    /// Owning employee.
    pub responsible_id: Option<EmployeeId>,
    /// Collaborating employees.
    pub support_ids: BTreeSet<EmployeeId>,
    /// Priority rating.
    pub priority: Option<Level>,
    /// Complexity rating.
    pub complexity: Option<Level>,
    /// Satisfaction rating recorded on completion.
    pub satisfaction_level: Option<Level>,
    /// Date the task was assigned.
    pub assignment_date: Option<NaiveDate>,
    /// Deadline agreed at assignment.
    pub initial_deadline: Option<NaiveDate>,
    /// Date the work concluded.
    pub actual_deadline: Option<NaiveDate>,
    /// Estimated effort in hours.
    pub duration_hours: f64,
    /// Number of times the deadline was postponed.
    pub postpone_count: u32,
    /// Completion percentage.
    pub completion: CompletionPercentage,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a draft task assigned today, due today, with medium priority
    /// and complexity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyReference`] when the reference is blank.
    pub fn new(reference: impl Into<String>, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let raw = reference.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyReference);
        }

        let timestamp = clock.utc();
        let today = timestamp.date_naive();
        Ok(Self {
            id: TaskId::new(),
            reference: trimmed.to_owned(),
            description: None,
            comments: None,
            project_id: None,
            department_id: None,
            responsible_id: None,
            support_ids: BTreeSet::new(),
            priority: Some(Level::Medium),
            complexity: Some(Level::Medium),
            satisfaction_level: None,
            assignment_date: Some(today),
            initial_deadline: Some(today),
            actual_deadline: None,
            duration_hours: 0.0,
            postpone_count: 0,
            completion: CompletionPercentage::default(),
            state: TaskState::Draft,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            reference: data.reference,
            description: data.description,
            comments: data.comments,
            project_id: data.project_id,
            department_id: data.department_id,
            responsible_id: data.responsible_id,
            support_ids: data.support_ids,
            priority: data.priority,
            complexity: data.complexity,
            satisfaction_level: data.satisfaction_level,
            assignment_date: data.assignment_date,
            initial_deadline: data.initial_deadline,
            actual_deadline: data.actual_deadline,
            duration_hours: data.duration_hours,
            postpone_count: data.postpone_count,
            completion: data.completion,
            state: data.state,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Sets the inputs-needed description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the free-form comments.
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Sets the project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the owning employee together with the department derived from
    /// that employee.
    #[must_use]
    pub const fn with_responsible(
        mut self,
        responsible_id: EmployeeId,
        department_id: Option<DepartmentId>,
    ) -> Self {
        self.responsible_id = Some(responsible_id);
        self.department_id = department_id;
        self
    }

    /// Overrides the derived department.
    #[must_use]
    pub const fn with_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Sets the collaborating employees.
    #[must_use]
    pub fn with_support(mut self, support_ids: impl IntoIterator<Item = EmployeeId>) -> Self {
        self.support_ids = support_ids.into_iter().collect();
        self
    }

    /// Sets priority and complexity ratings.
    #[must_use]
    pub const fn with_ratings(
        mut self,
        priority: Option<Level>,
        complexity: Option<Level>,
    ) -> Self {
        self.priority = priority;
        self.complexity = complexity;
        self
    }

    /// Sets assignment and initial deadline dates.
    #[must_use]
    pub const fn with_schedule(
        mut self,
        assignment_date: Option<NaiveDate>,
        initial_deadline: Option<NaiveDate>,
    ) -> Self {
        self.assignment_date = assignment_date;
        self.initial_deadline = initial_deadline;
        self
    }

    /// Sets the effort estimate and the number of postponements.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDuration`] when `hours` is negative or
    /// not finite.
    pub fn with_effort(mut self, hours: f64, postpone_count: u32) -> Result<Self, TaskDomainError> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(TaskDomainError::InvalidDuration(hours));
        }
        self.duration_hours = hours;
        self.postpone_count = postpone_count;
        Ok(self)
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the human-facing reference.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the inputs-needed description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the comments, if any.
    #[must_use]
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    /// Returns the project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the department derived from the responsible employee.
    #[must_use]
    pub const fn department_id(&self) -> Option<DepartmentId> {
        self.department_id
    }

    /// Returns the owning employee, if any.
    #[must_use]
    pub const fn responsible_id(&self) -> Option<EmployeeId> {
        self.responsible_id
    }

    /// Returns the collaborating employees.
    #[must_use]
    pub const fn support_ids(&self) -> &BTreeSet<EmployeeId> {
        &self.support_ids
    }

    /// Returns the priority rating, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<Level> {
        self.priority
    }

    /// Returns the complexity rating, if any.
    #[must_use]
    pub const fn complexity(&self) -> Option<Level> {
        self.complexity
    }

    /// Returns the satisfaction rating, if recorded.
    #[must_use]
    pub const fn satisfaction_level(&self) -> Option<Level> {
        self.satisfaction_level
    }

    /// Returns the assignment date, if any.
    #[must_use]
    pub const fn assignment_date(&self) -> Option<NaiveDate> {
        self.assignment_date
    }

    /// Returns the initial deadline, if any.
    #[must_use]
    pub const fn initial_deadline(&self) -> Option<NaiveDate> {
        self.initial_deadline
    }

    /// Returns the date the work concluded, if it has.
    #[must_use]
    pub const fn actual_deadline(&self) -> Option<NaiveDate> {
        self.actual_deadline
    }

    /// Returns the effort estimate in hours.
    #[must_use]
    pub const fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    /// Returns the number of deadline postponements.
    #[must_use]
    pub const fn postpone_count(&self) -> u32 {
        self.postpone_count
    }

    /// Returns the completion percentage.
    #[must_use]
    pub const fn completion(&self) -> CompletionPercentage {
        self.completion
    }

    /// Returns the task lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the initial deadline is on or before `today`.
    #[must_use]
    pub fn is_supposed_done(&self, today: NaiveDate) -> bool {
        self.initial_deadline.is_some_and(|deadline| deadline <= today)
    }

    /// Returns `true` when the task concluded no later than its initial
    /// deadline in a completed state.
    #[must_use]
    pub fn is_done_on_time(&self) -> bool {
        match (self.actual_deadline, self.initial_deadline) {
            (Some(actual), Some(initial)) => actual <= initial && self.state.is_completed(),
            _ => false,
        }
    }

    /// Returns `true` when `employee` is listed as a collaborator.
    #[must_use]
    pub fn is_supported_by(&self, employee: EmployeeId) -> bool {
        self.support_ids.contains(&employee)
    }

    /// Returns `true` when `employee` owns the task or, if `include_support`
    /// is set, collaborates on it.
    #[must_use]
    pub fn involves(&self, employee: EmployeeId, include_support: bool) -> bool {
        self.responsible_id == Some(employee) || (include_support && self.is_supported_by(employee))
    }

    /// Checks the action's guard against the current state without mutating
    /// the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] naming the current state
    /// when the guard rejects the action.
    pub fn ensure_permitted(&self, action: TaskAction) -> Result<(), TaskDomainError> {
        if action.is_permitted_from(self.state) {
            Ok(())
        } else {
            Err(TaskDomainError::InvalidTransition {
                task_id: self.id,
                action,
                from: self.state,
            })
        }
    }

    /// Applies a guarded lifecycle action, stamping dates from `clock`.
    ///
    /// Leaving a concluded state for draft, ongoing or to-validate clears the
    /// actual deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the guard rejects
    /// the action; the task is left untouched.
    pub fn apply(&mut self, action: TaskAction, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_permitted(action)?;

        let today = clock.utc().date_naive();
        if action == TaskAction::Start {
            self.assignment_date = Some(today);
            self.initial_deadline = Some(today);
        }
        if action.records_actual_deadline() {
            self.actual_deadline = Some(today);
        }

        self.state = action.target_state();
        if !self.state.allows_actual_deadline() {
            self.actual_deadline = None;
        }
        self.touch(clock);
        Ok(())
    }

    /// Records a new completion percentage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidCompletionPercentage`] when `value`
    /// lies outside `[0, 100]`.
    pub fn set_completion(
        &mut self,
        value: f64,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.completion = CompletionPercentage::new(value)?;
        self.touch(clock);
        Ok(())
    }

    /// Records the satisfaction rating.
    pub fn set_satisfaction(&mut self, level: Level, clock: &impl Clock) {
        self.satisfaction_level = Some(level);
        self.touch(clock);
    }

    /// Replaces the descriptive and planning fields with those of `other`,
    /// keeping this task's identity and creation timestamp.
    pub fn overwrite_from(&mut self, other: Self, clock: &impl Clock) {
        let id = self.id;
        let created_at = self.created_at;
        *self = Self {
            id,
            created_at,
            ..other
        };
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
