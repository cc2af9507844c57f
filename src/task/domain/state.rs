//! Task lifecycle states and the actions that move between them.

use super::{ParseTaskActionError, ParseTaskStateError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Task has been created but work has not started.
    #[default]
    Draft,
    /// Task is being worked on.
    Ongoing,
    /// Task has been submitted and awaits validation.
    ToValidate,
    /// Task has been accepted.
    Validated,
    /// Task has been rejected.
    Refused,
    /// Task must be reworked.
    ToRedo,
    /// Task was left unfinished.
    Incomplete,
    /// Task has been completed.
    Done,
    /// Task has been abandoned.
    Cancelled,
}

impl TaskState {
    /// Every state, in lifecycle order.
    pub const ALL: [Self; 9] = [
        Self::Draft,
        Self::Ongoing,
        Self::ToValidate,
        Self::Validated,
        Self::Refused,
        Self::ToRedo,
        Self::Incomplete,
        Self::Done,
        Self::Cancelled,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Ongoing => "ongoing",
            Self::ToValidate => "to_validate",
            Self::Validated => "validated",
            Self::Refused => "refused",
            Self::ToRedo => "to_redo",
            Self::Incomplete => "incomplete",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns the human-readable label shown on dashboards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Ongoing => "Ongoing",
            Self::ToValidate => "To validate",
            Self::Validated => "Validated",
            Self::Refused => "Refused",
            Self::ToRedo => "To redo",
            Self::Incomplete => "Incomplete",
            Self::Done => "Done",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns `true` for states that count as completed work.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Validated | Self::Done)
    }

    /// Returns `true` when a task in this state may carry an actual deadline.
    #[must_use]
    pub const fn allows_actual_deadline(self) -> bool {
        !matches!(self, Self::Draft | Self::Ongoing | Self::ToValidate)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == normalized)
            .ok_or_else(|| ParseTaskStateError(value.to_owned()))
    }
}

/// Guarded lifecycle operation applicable to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// Put the task in progress, restarting its schedule from today.
    Start,
    /// Submit the task for validation.
    SubmitForValidation,
    /// Accept a submitted task.
    Validate,
    /// Reject a submitted task.
    Refuse,
    /// Send a reviewed or unfinished task back for rework.
    MarkToRedo,
    /// Flag the task as left unfinished.
    MarkIncomplete,
    /// Complete the task.
    MarkDone,
    /// Abandon the task.
    Cancel,
    /// Return the task to draft for correction.
    ResetToDraft,
}

impl TaskAction {
    /// Every action.
    pub const ALL: [Self; 9] = [
        Self::Start,
        Self::SubmitForValidation,
        Self::Validate,
        Self::Refuse,
        Self::MarkToRedo,
        Self::MarkIncomplete,
        Self::MarkDone,
        Self::Cancel,
        Self::ResetToDraft,
    ];

    /// Returns the canonical action name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::SubmitForValidation => "submit_for_validation",
            Self::Validate => "validate",
            Self::Refuse => "refuse",
            Self::MarkToRedo => "mark_to_redo",
            Self::MarkIncomplete => "mark_incomplete",
            Self::MarkDone => "mark_done",
            Self::Cancel => "cancel",
            Self::ResetToDraft => "reset_to_draft",
        }
    }

    /// Returns the state a task lands in after this action.
    #[must_use]
    pub const fn target_state(self) -> TaskState {
        match self {
            Self::Start => TaskState::Ongoing,
            Self::SubmitForValidation => TaskState::ToValidate,
            Self::Validate => TaskState::Validated,
            Self::Refuse => TaskState::Refused,
            Self::MarkToRedo => TaskState::ToRedo,
            Self::MarkIncomplete => TaskState::Incomplete,
            Self::MarkDone => TaskState::Done,
            Self::Cancel => TaskState::Cancelled,
            Self::ResetToDraft => TaskState::Draft,
        }
    }

    /// Returns whether the action's guard accepts a task in `state`.
    #[must_use]
    pub const fn is_permitted_from(self, state: TaskState) -> bool {
        match self {
            Self::Start | Self::MarkDone | Self::Cancel | Self::ResetToDraft => true,
            Self::SubmitForValidation => matches!(
                state,
                TaskState::Draft | TaskState::Ongoing | TaskState::ToRedo | TaskState::Incomplete
            ),
            Self::Validate | Self::Refuse => matches!(state, TaskState::ToValidate),
            Self::MarkToRedo => matches!(
                state,
                TaskState::Validated | TaskState::Refused | TaskState::Incomplete
            ),
            Self::MarkIncomplete => !matches!(
                state,
                TaskState::Validated | TaskState::Refused | TaskState::Cancelled | TaskState::Done
            ),
        }
    }

    /// Returns `true` when the action stamps the actual deadline with today.
    #[must_use]
    pub const fn records_actual_deadline(self) -> bool {
        matches!(self, Self::Validate | Self::Refuse | Self::MarkDone)
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskAction {
    type Error = ParseTaskActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == normalized)
            .ok_or_else(|| ParseTaskActionError(value.to_owned()))
    }
}
