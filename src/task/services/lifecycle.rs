//! Service layer for task creation and guarded lifecycle transitions.

use crate::task::{
    domain::{
        CompletionPercentage, EmployeeId, Level, ProjectId, Task, TaskAction, TaskDomainError,
        TaskId,
    },
    ports::{DirectoryError, DirectoryRepository, TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a draft task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    reference: String,
    description: Option<String>,
    comments: Option<String>,
    project_id: Option<ProjectId>,
    responsible_id: Option<EmployeeId>,
    support_ids: Vec<EmployeeId>,
    priority: Option<Level>,
    complexity: Option<Level>,
    assignment_date: Option<NaiveDate>,
    initial_deadline: Option<NaiveDate>,
    duration_hours: f64,
    postpone_count: u32,
    completion_percentage: f64,
}

impl CreateTaskRequest {
    /// Creates a request with the required reference; every other field takes
    /// the draft defaults.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            description: None,
            comments: None,
            project_id: None,
            responsible_id: None,
            support_ids: Vec::new(),
            priority: Some(Level::Medium),
            complexity: Some(Level::Medium),
            assignment_date: None,
            initial_deadline: None,
            duration_hours: 0.0,
            postpone_count: 0,
            completion_percentage: 0.0,
        }
    }

    /// Sets the inputs-needed description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets free-form comments.
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

    /// Sets the owning employee.
    #[must_use]
    pub const fn with_responsible(mut self, responsible_id: EmployeeId) -> Self {
        self.responsible_id = Some(responsible_id);
        self
    }

    /// Sets the collaborating employees.
    #[must_use]
    pub fn with_support(mut self, support_ids: impl IntoIterator<Item = EmployeeId>) -> Self {
        self.support_ids = support_ids.into_iter().collect();
        self
    }

    /// Sets priority and complexity.
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

    /// Sets the assignment date and initial deadline. Dates left unset
    /// default to today.
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

    /// Sets the effort estimate and postponement count.
    #[must_use]
    pub const fn with_effort(mut self, duration_hours: f64, postpone_count: u32) -> Self {
        self.duration_hours = duration_hours;
        self.postpone_count = postpone_count;
        self
    }

    /// Sets the initial completion percentage.
    #[must_use]
    pub const fn with_completion_percentage(mut self, value: f64) -> Self {
        self.completion_percentage = value;
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// The requested responsible employee does not exist.
    #[error("employee not found: {0}")]
    EmployeeNotFound(EmployeeId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, D, C>
where
    R: TaskRepository,
    D: DirectoryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<R, D, C> TaskLifecycleService<R, D, C>
where
    R: TaskRepository,
    D: DirectoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
        }
    }

    /// Creates and stores a draft task.
    ///
    /// The department is derived from the responsible employee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the reference is blank or a
    /// numeric field is out of range,
    /// [`TaskLifecycleError::EmployeeNotFound`] when the responsible employee
    /// is unknown, and [`TaskLifecycleError::Repository`] when the repository
    /// rejects the task.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let completion = CompletionPercentage::new(request.completion_percentage)?;
        let mut task = Task::new(request.reference, &*self.clock)?
            .with_support(request.support_ids)
            .with_ratings(request.priority, request.complexity)
            .with_effort(request.duration_hours, request.postpone_count)?;

        let today = self.clock.utc().date_naive();
        task = task.with_schedule(
            request.assignment_date.or(Some(today)),
            request.initial_deadline.or(Some(today)),
        );

        if let Some(responsible_id) = request.responsible_id {
            let employee = self
                .directory
                .employee(responsible_id)
                .await?
                .ok_or(TaskLifecycleError::EmployeeNotFound(responsible_id))?;
            task = task.with_responsible(responsible_id, employee.department_id());
        }
        if let Some(project_id) = request.project_id {
            task = task.with_project(project_id);
        }
        if let Some(description) = request.description {
            task = task.with_description(description);
        }
        if let Some(comments) = request.comments {
            task = task.with_comments(comments);
        }
        task.set_completion(completion.value(), &*self.clock)?;

        self.repository.store(&task).await?;
        info!(task_id = %task.id(), reference = task.reference(), "task created");
        Ok(task)
    }

    /// Applies a guarded lifecycle action to one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task is missing or
    /// persistence fails, and [`TaskLifecycleError::Domain`] when the guard
    /// rejects the action.
    pub async fn apply_action(
        &self,
        task_id: TaskId,
        action: TaskAction,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        let from = task.state();
        task.apply(action, &*self.clock)?;
        self.repository.update(&task).await?;
        info!(%task_id, %action, %from, to = %task.state(), "task transitioned");
        Ok(task)
    }

    /// Applies the same guarded action to several tasks, all or nothing.
    ///
    /// Every task is loaded and every guard is checked before anything is
    /// written, and the updated tasks are persisted in one
    /// [`TaskRepository::update_many`] call. Repeated identifiers are applied
    /// once.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when a task is missing and
    /// [`TaskLifecycleError::Domain`] naming the first violating task; in both
    /// cases no task is written.
    pub async fn apply_batch(
        &self,
        task_ids: &[TaskId],
        action: TaskAction,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let mut tasks: Vec<Task> = Vec::with_capacity(task_ids.len());
        for task_id in task_ids {
            if tasks.iter().any(|task| task.id() == *task_id) {
                continue;
            }
            tasks.push(self.load(*task_id).await?);
        }

        for task in &tasks {
            task.ensure_permitted(action)?;
        }
        debug!(count = tasks.len(), %action, "batch guards passed");

        for task in &mut tasks {
            task.apply(action, &*self.clock)?;
        }
        self.repository.update_many(&tasks).await?;
        info!(count = tasks.len(), %action, "batch transition applied");
        Ok(tasks)
    }

    /// Records a new completion percentage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when `value` lies outside
    /// `[0, 100]`; the repository is not consulted in that case.
    pub async fn set_completion_percentage(
        &self,
        task_id: TaskId,
        value: f64,
    ) -> TaskLifecycleResult<Task> {
        let completion = CompletionPercentage::new(value)?;
        let mut task = self.load(task_id).await?;
        task.set_completion(completion.value(), &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Records the satisfaction level of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task is missing or
    /// persistence fails.
    pub async fn set_satisfaction(
        &self,
        task_id: TaskId,
        level: Level,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        task.set_satisfaction(level, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    async fn load(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::Repository(TaskRepositoryError::NotFound(task_id)))
    }
}
