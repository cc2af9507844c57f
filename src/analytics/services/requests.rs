//! Raw filter parameters accepted by the dashboard entry points.
//!
//! Fields arrive as plain scalars and are interpreted into a
//! [`TaskCriteria`] only when a request is served, so parse failures surface
//! as error payloads rather than at deserialization time.

use crate::analytics::domain::{
    AnalyticsError, DateRange, MemberFilter, Month, Period, TaskCriteria, parse_department,
};
use crate::task::domain::{EmployeeId, ProjectId};
use serde::Deserialize;

/// Filters used by counts, distributions and the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CardFilterRequest {
    date_from: Option<String>,
    date_to: Option<String>,
    department: Option<String>,
    responsible: Option<u64>,
    project: Option<u64>,
}

impl CardFilterRequest {
    /// Creates a request with no filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `YYYY-MM-DD` assignment-date bounds.
    #[must_use]
    pub fn with_dates(mut self, from: Option<&str>, to: Option<&str>) -> Self {
        self.date_from = from.map(str::to_owned);
        self.date_to = to.map(str::to_owned);
        self
    }

    /// Sets the raw department parameter.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Keeps tasks owned or supported by an employee.
    #[must_use]
    pub const fn with_responsible(mut self, employee_id: EmployeeId) -> Self {
        self.responsible = Some(employee_id.value());
        self
    }

    /// Keeps tasks of one project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project = Some(project_id.value());
        self
    }

    /// Interprets the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::MalformedDate`] for an unparseable bound.
    pub fn criteria(&self) -> Result<TaskCriteria, AnalyticsError> {
        let dates = DateRange::parse(self.date_from.as_deref(), self.date_to.as_deref())?;
        Ok(TaskCriteria::new()
            .with_date_range(dates)
            .with_department(parse_department(self.department.as_deref()))
            .with_member(
                self.responsible
                    .map(|id| MemberFilter::new(EmployeeId::new(id), true)),
            )
            .with_project(self.project.map(ProjectId::new)))
    }
}

/// Filters used by rates, charts and performance scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PeriodFilterRequest {
    year: Option<i32>,
    month: Option<String>,
    department: Option<String>,
    responsible: Option<u64>,
}

impl PeriodFilterRequest {
    /// Creates a request with no filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the calendar year.
    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the month name.
    #[must_use]
    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    /// Sets the raw department parameter.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Restricts to one employee.
    #[must_use]
    pub const fn with_responsible(mut self, employee_id: EmployeeId) -> Self {
        self.responsible = Some(employee_id.value());
        self
    }

    /// Returns the employee the request is restricted to, if any.
    #[must_use]
    pub fn responsible(&self) -> Option<EmployeeId> {
        self.responsible.map(EmployeeId::new)
    }

    /// Interprets year and month.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownMonth`] for an unrecognized month
    /// name.
    pub fn period(&self) -> Result<Period, AnalyticsError> {
        let month = match self.month.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Month::parse(raw)?),
        };
        Ok(Period::new(self.year, month))
    }

    /// Builds criteria from every parameter. `include_support` selects whether
    /// the employee filter also matches collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownMonth`] for an unrecognized month
    /// name.
    pub fn criteria(&self, include_support: bool) -> Result<TaskCriteria, AnalyticsError> {
        Ok(self.scoring_criteria()?.with_member(
            self.responsible
                .map(|id| MemberFilter::new(EmployeeId::new(id), include_support)),
        ))
    }

    /// Builds criteria from period and department only.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownMonth`] for an unrecognized month
    /// name.
    pub fn scoring_criteria(&self) -> Result<TaskCriteria, AnalyticsError> {
        Ok(TaskCriteria::new()
            .with_period(self.period()?)
            .with_department(parse_department(self.department.as_deref())))
    }
}
