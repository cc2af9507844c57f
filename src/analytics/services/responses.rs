//! Payloads returned by the dashboard entry points.

use crate::analytics::domain::{Evolution, GridRow, KpiValue, PerformanceCategory};
use crate::task::domain::{DepartmentId, EmployeeId};
use serde::Serialize;

/// Envelope around every dashboard payload.
///
/// Failures keep the payload shape, filled with zero or empty values, so
/// consumers can render without branching on the error flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardResponse<T> {
    /// Whether the request failed.
    pub error: bool,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Computed data.
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Default> DashboardResponse<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn ok(payload: T) -> Self {
        Self {
            error: false,
            message: None,
            payload,
        }
    }

    /// Builds a failure with an empty payload.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: Some(message.into()),
            payload: T::default(),
        }
    }

    /// Returns `true` for a successful response.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        !self.error
    }
}

/// Projected task rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskGrid {
    /// Rows, newest assignment first.
    pub rows: Vec<GridRow>,
}

/// A rate with its optional month-over-month evolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RateReport {
    /// Current rate.
    pub kpi_value: KpiValue,
    /// Comparison with the preceding month, when a full period was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evolution: Option<Evolution>,
}

/// Chart series keyed under `chart_data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartReport<T> {
    /// Series consumed by the chart.
    pub chart_data: T,
}

/// Performance summary of one employee or of everyone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmployeePerformance {
    /// Employee name, or the global label.
    pub display_name: String,
    /// Department name, or the global label.
    pub department_name: String,
    /// Profile image reference.
    pub profile_image: String,
    /// Performance category.
    pub category: PerformanceCategory,
    /// Composite score.
    pub score: f64,
    /// Whether the summary covers every employee.
    pub is_global: bool,
}

/// Department reference inside an [`EmployeeProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentSummary {
    /// Department identifier.
    pub id: DepartmentId,
    /// Department name.
    pub name: String,
}

/// The caller's own employee record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeProfile {
    /// Employee identifier.
    pub id: Option<EmployeeId>,
    /// Employee name.
    pub name: String,
    /// Owning department, if any.
    pub department: Option<DepartmentSummary>,
    /// Profile image reference.
    pub image: String,
    /// Role label such as `"Manager"`.
    pub role: String,
}
