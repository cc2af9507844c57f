//! Counts, categorical distributions and grid rows.

use super::{DirectorySnapshot, employee_image};
use crate::analytics::config::DisplayConfig;
use crate::task::domain::{Level, Task, TaskState};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Scalar task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    /// Number of tasks.
    pub total_tasks: usize,
    /// Number of distinct projects; tasks without a project are ignored.
    pub total_projects: usize,
    /// Number of validated tasks.
    pub tasks_valid: usize,
    /// Number of tasks awaiting validation.
    pub tasks_to_validate: usize,
}

impl TaskCounts {
    /// Counts the given tasks.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let projects: BTreeSet<_> = tasks.iter().filter_map(Task::project_id).collect();
        Self {
            total_tasks: tasks.len(),
            total_projects: projects.len(),
            tasks_valid: count_in_state(tasks, TaskState::Validated),
            tasks_to_validate: count_in_state(tasks, TaskState::ToValidate),
        }
    }
}

fn count_in_state(tasks: &[Task], state: TaskState) -> usize {
    tasks.iter().filter(|task| task.state() == state).count()
}

/// Parallel label and count arrays, one entry per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    /// Category labels.
    pub labels: Vec<String>,
    /// Count per label.
    pub values: Vec<usize>,
}

impl Distribution {
    fn from_pairs(pairs: impl IntoIterator<Item = (String, usize)>) -> Self {
        let (labels, values) = pairs.into_iter().unzip();
        Self { labels, values }
    }

    /// Returns the sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.values.iter().sum()
    }
}

fn level_distribution(tasks: &[Task], level_of: impl Fn(&Task) -> Option<Level>) -> Distribution {
    Distribution::from_pairs(Level::ALL.into_iter().map(|level| {
        let count = tasks
            .iter()
            .filter(|task| level_of(task) == Some(level))
            .count();
        (level.as_str().to_owned(), count)
    }))
}

/// Counts tasks per complexity level; tasks without complexity are skipped.
#[must_use]
pub fn complexity_distribution(tasks: &[Task]) -> Distribution {
    level_distribution(tasks, Task::complexity)
}

/// Counts tasks per priority level; tasks without priority are skipped.
#[must_use]
pub fn priority_distribution(tasks: &[Task]) -> Distribution {
    level_distribution(tasks, Task::priority)
}

/// Counts tasks per non-draft state, sorted by ascending count with ties in
/// lifecycle order.
#[must_use]
pub fn state_distribution(tasks: &[Task]) -> Distribution {
    let mut counts: Vec<(TaskState, usize)> = TaskState::ALL
        .into_iter()
        .filter(|state| *state != TaskState::Draft)
        .map(|state| (state, count_in_state(tasks, state)))
        .collect();
    counts.sort_by_key(|(_, count)| *count);
    Distribution::from_pairs(
        counts
            .into_iter()
            .map(|(state, count)| (state.label().to_owned(), count)),
    )
}

/// One row of the task grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    /// Project name.
    pub project: String,
    /// Inputs-needed description.
    pub description: String,
    /// Responsible employee name.
    pub responsible_display: String,
    /// Responsible employee image reference.
    pub responsible_image: String,
    /// Department name.
    pub department_display: String,
    /// Comma-separated collaborator names.
    pub support: String,
    /// Assignment date as `YYYY-MM-DD`, or empty.
    pub start_date: String,
    /// Initial deadline as `YYYY-MM-DD`, or empty.
    pub due_date: String,
    /// Actual deadline as `YYYY-MM-DD`, or empty.
    pub completion_date: String,
    /// Priority level name.
    pub priority: String,
    /// Complexity level name.
    pub complexity: String,
    /// Lifecycle state name.
    pub state: String,
}

const UNKNOWN: &str = "unknown";

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn level_name(level: Option<Level>) -> String {
    level.map_or(UNKNOWN, Level::as_str).to_owned()
}

/// Projects tasks into grid rows, newest assignment first and undated tasks
/// last.
#[must_use]
pub fn project_grid(
    tasks: &[Task],
    directory: &DirectorySnapshot,
    display: &DisplayConfig,
) -> Vec<GridRow> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by_key(|task| Reverse(task.assignment_date()));
    ordered
        .into_iter()
        .map(|task| grid_row(task, directory, display))
        .collect()
}

fn grid_row(task: &Task, directory: &DirectorySnapshot, display: &DisplayConfig) -> GridRow {
    let undefined = || display.undefined_label.clone();
    let responsible = task.responsible_id().and_then(|id| directory.employee(id));

    GridRow {
        project: task
            .project_id()
            .and_then(|id| directory.project(id))
            .map_or_else(undefined, |p| p.name().to_owned()),
        description: task.description().unwrap_or_default().to_owned(),
        responsible_display: responsible.map_or_else(undefined, |e| e.name().to_owned()),
        responsible_image: responsible.map_or_else(
            || display.placeholder_image.clone(),
            |e| employee_image(e, display),
        ),
        department_display: task
            .department_id()
            .and_then(|id| directory.department(id))
            .map_or_else(undefined, |d| d.name().to_owned()),
        support: task
            .support_ids()
            .iter()
            .map(|id| directory.employee(*id).map_or_else(undefined, |e| e.name().to_owned()))
            .collect::<Vec<_>>()
            .join(", "),
        start_date: format_date(task.assignment_date()),
        due_date: format_date(task.initial_deadline()),
        completion_date: format_date(task.actual_deadline()),
        priority: level_name(task.priority()),
        complexity: level_name(task.complexity()),
        state: task.state().as_str().to_owned(),
    }
}
