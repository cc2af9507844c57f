//! Error types for task domain validation and parsing.

use super::{TaskAction, TaskId, TaskState};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskDomainError {
    /// The requested lifecycle action is not permitted from the current
    /// state.
    #[error("task {task_id}: cannot {action} while in state {from}")]
    InvalidTransition {
        /// Task whose guard rejected the action.
        task_id: TaskId,
        /// Action that was attempted.
        action: TaskAction,
        /// State the task was in when the action was attempted.
        from: TaskState,
    },

    /// The completion percentage lies outside `[0, 100]`.
    #[error("completion percentage must be between 0 and 100, got {0}")]
    InvalidCompletionPercentage(f64),

    /// The effort estimate is negative or not a finite number.
    #[error("duration must be a non-negative number of hours, got {0}")]
    InvalidDuration(f64),

    /// A date field could not be parsed as `YYYY-MM-DD`.
    #[error("malformed {field} date '{value}', expected YYYY-MM-DD")]
    MalformedDate {
        /// Name of the offending field.
        field: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },

    /// A numeric field could not be parsed.
    #[error("malformed {field} value '{value}'")]
    MalformedNumber {
        /// Name of the offending field.
        field: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },

    /// The task reference is empty after trimming.
    #[error("task reference must not be empty")]
    EmptyReference,

    /// A state name could not be parsed.
    #[error(transparent)]
    State(#[from] ParseTaskStateError),

    /// A level name could not be parsed.
    #[error(transparent)]
    Level(#[from] ParseLevelError),
}

/// Error returned while parsing task states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);

/// Error returned while parsing lifecycle action names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task action: {0}")]
pub struct ParseTaskActionError(pub String);

/// Error returned while parsing priority, complexity or satisfaction levels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown level: {0}")]
pub struct ParseLevelError(pub String);
