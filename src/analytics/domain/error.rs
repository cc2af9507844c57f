//! Error types raised while interpreting analytics requests.

use crate::task::domain::{EmployeeId, UserId};
use thiserror::Error;

/// Errors returned while parsing filters or resolving the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    /// A date bound could not be parsed as `YYYY-MM-DD`.
    #[error("malformed {field} '{value}', expected YYYY-MM-DD")]
    MalformedDate {
        /// Name of the offending parameter.
        field: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },

    /// A month name matched none of the twelve calendar months.
    #[error("unknown month name: {0}")]
    UnknownMonth(String),

    /// A role name could not be parsed.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// No employee is linked to the calling user.
    #[error("no employee is linked to user {0}")]
    NoEmployeeForIdentity(UserId),

    /// The requested employee does not exist.
    #[error("employee not found: {0}")]
    EmployeeNotFound(EmployeeId),
}
