//! Spreadsheet-row import for work-program tasks.
//!
//! Each row is a map from column header to raw cell text. Rows are upserted
//! by reference; a row that cannot be converted leaves a cancelled
//! `ERROR-IMPORT-<reference>` record behind so the failure stays visible in
//! the task list.

use crate::task::{
    domain::{
        CompletionPercentage, DepartmentId, EmployeeId, Level, ParseTaskStateError,
        PersistedTaskData, ProjectId, Task, TaskAction, TaskDomainError, TaskId, TaskState,
    },
    ports::{DirectoryError, DirectoryRepository, TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Column headers recognised by the importer.
pub mod columns {
    /// Task reference.
    pub const REFERENCE: &str = "Task Description";
    /// Inputs needed to carry out the task.
    pub const DESCRIPTION: &str = "Inputs needed (If applicable)";
    /// Priority level.
    pub const PRIORITY: &str = "Priority";
    /// Complexity level.
    pub const COMPLEXITY: &str = "Complexity";
    /// Assignment date.
    pub const ASSIGNMENT_DATE: &str = "Assignment date";
    /// Initial deadline.
    pub const INITIAL_DEADLINE: &str = "Initial Dateline";
    /// Actual deadline.
    pub const ACTUAL_DEADLINE: &str = "Actual Deadline";
    /// Effort estimate in hours.
    pub const DURATION: &str = "Duration / Effort (Hrs)";
    /// Number of postponements.
    pub const POSTPONES: &str = "Nb of Postpones";
    /// Completion percentage.
    pub const COMPLETION: &str = "% of completion";
    /// Lifecycle state.
    pub const STATUS: &str = "Status";
    /// Satisfaction level.
    pub const SATISFACTION: &str = "Satisfaction Level";
    /// Free-form remarks.
    pub const COMMENTS: &str =
        "Comments / Remarques / Problems encountered / Additionals informations";
    /// Responsible employee name.
    pub const RESPONSIBLE: &str = "Responsible";
    /// Comma-separated support employee names.
    pub const SUPPORT: &str = "Support";
    /// Department name.
    pub const DEPARTMENT: &str = "Departments";
    /// Project name.
    pub const PROJECT: &str = "Project";
}

/// Reference used when a row leaves the reference column blank.
pub const DEFAULT_REFERENCE: &str = "New work program";

/// Prefix of the cancelled record stored for a row that failed to import.
pub const ERROR_REFERENCE_PREFIX: &str = "ERROR-IMPORT-";

/// One spreadsheet row keyed by column header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRow {
    cells: BTreeMap<String, String>,
}

impl ImportRow {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell value.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    /// Returns the trimmed cell value, or `None` when absent or blank.
    #[must_use]
    pub fn cell(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Returns the reference the row imports under.
    #[must_use]
    pub fn reference(&self) -> &str {
        self.cell(columns::REFERENCE).unwrap_or(DEFAULT_REFERENCE)
    }
}

impl<K, V> FromIterator<(K, V)> for ImportRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}

/// Result of importing one row.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// A new task was stored.
    Created(Task),
    /// An existing task with the same reference was overwritten.
    Updated(Task),
    /// The row could not be converted; the error record was stored instead.
    Failed {
        /// Cancelled record carrying the failure in its comments.
        record: Task,
        /// Conversion failure.
        error: TaskDomainError,
    },
}

impl ImportOutcome {
    /// Returns the task written by the import.
    #[must_use]
    pub const fn task(&self) -> &Task {
        match self {
            Self::Created(task) | Self::Updated(task) | Self::Failed { record: task, .. } => task,
        }
    }

    /// Consumes the outcome, returning the task written by the import.
    #[must_use]
    pub fn into_task(self) -> Task {
        match self {
            Self::Created(task) | Self::Updated(task) | Self::Failed { record: task, .. } => task,
        }
    }

    /// Returns `true` when the row failed to convert.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Service-level errors for task import.
#[derive(Debug, Error)]
pub enum TaskImportError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// Building the error record failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
}

/// Result type for task import operations.
pub type TaskImportResult<T> = Result<T, TaskImportError>;

/// Directory references resolved from a row's name columns.
#[derive(Debug, Default)]
struct ResolvedNames {
    responsible_id: Option<EmployeeId>,
    responsible_department: Option<DepartmentId>,
    support_ids: BTreeSet<EmployeeId>,
    department_id: Option<DepartmentId>,
    project_id: Option<ProjectId>,
}

/// Converts spreadsheet rows into stored tasks.
#[derive(Clone)]
pub struct TaskImportService<R, D, C>
where
    R: TaskRepository,
    D: DirectoryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<R, D, C> TaskImportService<R, D, C>
where
    R: TaskRepository,
    D: DirectoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new import service.
    #[must_use]
    pub const fn new(repository: Arc<R>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
        }
    }

    /// Imports one row, updating the task with the same reference when one
    /// exists.
    ///
    /// Conversion failures are not errors: they produce
    /// [`ImportOutcome::Failed`] after storing the error record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskImportError`] when the repository or directory fails.
    pub async fn import_row(&self, row: &ImportRow) -> TaskImportResult<ImportOutcome> {
        let names = self.resolve_names(row).await?;
        match self.convert(row, names) {
            Ok(task) => self.upsert(task).await,
            Err(error) => {
                warn!(reference = row.reference(), %error, "row failed to import");
                let placeholder = self.error_record(row.reference(), &error)?;
                let record = self.upsert(placeholder).await?.into_task();
                Ok(ImportOutcome::Failed { record, error })
            }
        }
    }

    /// Imports every row in order.
    ///
    /// # Errors
    ///
    /// Stops at the first repository or directory failure.
    pub async fn import_rows(&self, rows: &[ImportRow]) -> TaskImportResult<Vec<ImportOutcome>> {
        let mut outcomes = Vec::with_capacity(rows.len());
        for row in rows {
            outcomes.push(self.import_row(row).await?);
        }
        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        info!(rows = rows.len(), failed, "import finished");
        Ok(outcomes)
    }

    async fn resolve_names(&self, row: &ImportRow) -> TaskImportResult<ResolvedNames> {
        let mut names = ResolvedNames::default();

        if let Some(responsible) = row.cell(columns::RESPONSIBLE) {
            match self.directory.employee_by_name(responsible).await? {
                Some(employee) => {
                    names.responsible_id = Some(employee.id());
                    names.responsible_department = employee.department_id();
                }
                None => warn!(name = responsible, "unknown responsible employee skipped"),
            }
        }

        if let Some(list) = row.cell(columns::SUPPORT) {
            for member in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                match self.directory.employee_by_name(member).await? {
                    Some(employee) => {
                        names.support_ids.insert(employee.id());
                    }
                    None => warn!(name = member, "unknown support employee skipped"),
                }
            }
        }

        if let Some(department) = row.cell(columns::DEPARTMENT) {
            names.department_id = self
                .directory
                .department_by_name(department)
                .await?
                .map(|found| found.id());
        }

        if let Some(project) = row.cell(columns::PROJECT) {
            names.project_id = self
                .directory
                .project_by_name(project)
                .await?
                .map(|found| found.id());
        }

        Ok(names)
    }

    fn convert(&self, row: &ImportRow, names: ResolvedNames) -> Result<Task, TaskDomainError> {
        let now = self.clock.utc();
        let today = now.date_naive();

        let state = optional(row, columns::STATUS, parse_state)?.unwrap_or_default();
        let actual_deadline = optional(row, columns::ACTUAL_DEADLINE, |v| {
            parse_date(columns::ACTUAL_DEADLINE, v)
        })?
        .filter(|_| state.allows_actual_deadline());
        let completion = optional(row, columns::COMPLETION, |v| {
            parse_number(columns::COMPLETION, v)
        })?
        .map_or(Ok(CompletionPercentage::default()), CompletionPercentage::new)?;
        let duration_hours =
            optional(row, columns::DURATION, |v| parse_number(columns::DURATION, v))?
                .unwrap_or(0.0);
        let postpone_count = optional(row, columns::POSTPONES, parse_postpones)?.unwrap_or(0);

        let data = PersistedTaskData {
            id: TaskId::new(),
            reference: row.reference().to_owned(),
            description: row.cell(columns::DESCRIPTION).map(str::to_owned),
            comments: row.cell(columns::COMMENTS).map(str::to_owned),
            project_id: names.project_id,
            department_id: names.department_id.or(names.responsible_department),
            responsible_id: names.responsible_id,
            support_ids: names.support_ids,
            priority: Some(optional(row, columns::PRIORITY, parse_level)?.unwrap_or(Level::Medium)),
            complexity: Some(
                optional(row, columns::COMPLEXITY, parse_level)?.unwrap_or(Level::Medium),
            ),
            satisfaction_level: optional(row, columns::SATISFACTION, parse_level)?,
            assignment_date: Some(
                optional(row, columns::ASSIGNMENT_DATE, |v| {
                    parse_date(columns::ASSIGNMENT_DATE, v)
                })?
                .unwrap_or(today),
            ),
            initial_deadline: Some(
                optional(row, columns::INITIAL_DEADLINE, |v| {
                    parse_date(columns::INITIAL_DEADLINE, v)
                })?
                .unwrap_or(today),
            ),
            actual_deadline,
            duration_hours: 0.0,
            postpone_count: 0,
            completion,
            state,
            created_at: now,
            updated_at: now,
        };
        Task::from_persisted(data).with_effort(duration_hours, postpone_count)
    }

    fn error_record(
        &self,
        reference: &str,
        error: &TaskDomainError,
    ) -> Result<Task, TaskDomainError> {
        let mut record = Task::new(format!("{ERROR_REFERENCE_PREFIX}{reference}"), &*self.clock)?
            .with_comments(format!("Import error: {error}"));
        record.apply(TaskAction::Cancel, &*self.clock)?;
        Ok(record)
    }

    async fn upsert(&self, task: Task) -> TaskImportResult<ImportOutcome> {
        match self.repository.find_by_reference(task.reference()).await? {
            Some(mut existing) => {
                existing.overwrite_from(task, &*self.clock);
                self.repository.update(&existing).await?;
                Ok(ImportOutcome::Updated(existing))
            }
            None => {
                self.repository.store(&task).await?;
                Ok(ImportOutcome::Created(task))
            }
        }
    }
}

fn optional<T>(
    row: &ImportRow,
    column: &str,
    parse: impl FnOnce(&str) -> Result<T, TaskDomainError>,
) -> Result<Option<T>, TaskDomainError> {
    row.cell(column).map(parse).transpose()
}

fn parse_level(value: &str) -> Result<Level, TaskDomainError> {
    Ok(Level::try_from(value)?)
}

/// Accepts both storage names (`to_validate`) and labels (`To validate`).
fn parse_state(value: &str) -> Result<TaskState, TaskDomainError> {
    let normalized = value.trim().replace([' ', '-'], "_");
    TaskState::try_from(normalized.as_str())
        .map_err(|_| TaskDomainError::State(ParseTaskStateError(value.to_owned())))
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, TaskDomainError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| TaskDomainError::MalformedDate {
        field,
        value: value.to_owned(),
    })
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, TaskDomainError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| TaskDomainError::MalformedNumber {
            field,
            value: value.to_owned(),
        })
}

fn parse_postpones(value: &str) -> Result<u32, TaskDomainError> {
    let digits = value.strip_suffix(".0").unwrap_or(value);
    digits
        .parse::<u32>()
        .map_err(|_| TaskDomainError::MalformedNumber {
            field: columns::POSTPONES,
            value: value.to_owned(),
        })
}
