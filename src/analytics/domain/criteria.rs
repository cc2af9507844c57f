//! Criteria filter pipeline.
//!
//! A [`TaskCriteria`] is a conjunction of optional predicates over a task's
//! assignment date, department, owner/collaborators and project. Every
//! predicate left unset matches everything.

use super::AnalyticsError;
use crate::task::domain::{DepartmentId, EmployeeId, ProjectId, Task};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    /// January.
    January,
    /// February.
    February,
    /// March.
    March,
    /// April.
    April,
    /// May.
    May,
    /// June.
    June,
    /// July.
    July,
    /// August.
    August,
    /// September.
    September,
    /// October.
    October,
    /// November.
    November,
    /// December.
    December,
}

impl Month {
    /// Every month in calendar order.
    pub const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Returns the month number, January being 1.
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::January => 1,
            Self::February => 2,
            Self::March => 3,
            Self::April => 4,
            Self::May => 5,
            Self::June => 6,
            Self::July => 7,
            Self::August => 8,
            Self::September => 9,
            Self::October => 10,
            Self::November => 11,
            Self::December => 12,
        }
    }

    /// Returns the month with the given number, if it is in `1..=12`.
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|month| month.number() == number)
    }

    /// Returns the month a date falls in.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self::from_number(date.month()).unwrap_or(Self::January)
    }

    /// Returns the English month name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// Returns the preceding month and whether the year rolls back.
    #[must_use]
    pub fn previous(self) -> (Self, bool) {
        match self {
            Self::January => (Self::December, true),
            other => (
                Self::from_number(other.number() - 1).unwrap_or(Self::January),
                false,
            ),
        }
    }

    /// Parses an English or French month name, ignoring case, surrounding
    /// whitespace and French accents.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownMonth`] for any other input.
    pub fn parse(raw: &str) -> Result<Self, AnalyticsError> {
        let folded: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'é' | 'è' | 'ê' => 'e',
                'û' | 'ù' => 'u',
                'à' | 'â' => 'a',
                other => other,
            })
            .collect();
        let month = match folded.as_str() {
            "january" | "janvier" => Self::January,
            "february" | "fevrier" => Self::February,
            "march" | "mars" => Self::March,
            "april" | "avril" => Self::April,
            "may" | "mai" => Self::May,
            "june" | "juin" => Self::June,
            "july" | "juillet" => Self::July,
            "august" | "aout" => Self::August,
            "september" | "septembre" => Self::September,
            "october" | "octobre" => Self::October,
            "november" | "novembre" => Self::November,
            "december" | "decembre" => Self::December,
            _ => return Err(AnalyticsError::UnknownMonth(raw.to_owned())),
        };
        Ok(month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive assignment-date window; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a window from optional bounds.
    #[must_use]
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Parses `YYYY-MM-DD` bounds; blank strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::MalformedDate`] naming the bound that failed
    /// to parse.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, AnalyticsError> {
        Ok(Self {
            from: parse_bound("date_from", from)?,
            to: parse_bound("date_to", to)?,
        })
    }

    /// Returns `true` when neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Returns `true` when `date` lies inside the window. A missing date only
    /// matches an unbounded window.
    #[must_use]
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        date.is_some_and(|d| {
            self.from.is_none_or(|from| d >= from) && self.to.is_none_or(|to| d <= to)
        })
    }
}

fn parse_bound(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, AnalyticsError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AnalyticsError::MalformedDate {
            field,
            value: value.to_owned(),
        })
}

/// Calendar period matched against a task's assignment date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Period {
    year: Option<i32>,
    month: Option<Month>,
}

impl Period {
    /// Creates a period; either part may be absent.
    #[must_use]
    pub const fn new(year: Option<i32>, month: Option<Month>) -> Self {
        Self { year, month }
    }

    /// Creates the period covering one month of one year.
    #[must_use]
    pub const fn month_of(year: i32, month: Month) -> Self {
        Self::new(Some(year), Some(month))
    }

    /// Returns the year, if set.
    #[must_use]
    pub const fn year(&self) -> Option<i32> {
        self.year
    }

    /// Returns the month, if set.
    #[must_use]
    pub const fn month(&self) -> Option<Month> {
        self.month
    }

    /// Returns `true` when neither part is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.year.is_none() && self.month.is_none()
    }

    /// Returns `true` when `date` falls in the period. A missing date only
    /// matches an unbounded period.
    #[must_use]
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        date.is_some_and(|d| {
            self.year.is_none_or(|year| d.year() == year)
                && self.month.is_none_or(|month| Month::of(d) == month)
        })
    }

    /// Returns the immediately preceding month when both year and month are
    /// set.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        let (year, month) = (self.year?, self.month?);
        let (previous, rolls_back) = month.previous();
        let previous_year = if rolls_back { year - 1 } else { year };
        Some(Self::month_of(previous_year, previous))
    }

    /// Returns `"<Month> <year>"` when both parts are set.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        Some(format!("{} {}", self.month?, self.year?))
    }
}

/// Parses the raw department parameter.
///
/// Absent, blank, `"null"` and `"unset"` mean no department filtering. A
/// value that is not an integer is logged and ignored.
#[must_use]
pub fn parse_department(raw: Option<&str>) -> Option<DepartmentId> {
    let value = raw.map(str::trim)?;
    if value.is_empty() || value.eq_ignore_ascii_case("null") || value.eq_ignore_ascii_case("unset")
    {
        return None;
    }
    match value.parse::<u64>() {
        Ok(id) => Some(DepartmentId::new(id)),
        Err(_) => {
            warn!(department = value, "ignoring non-numeric department filter");
            None
        }
    }
}

/// Keeps tasks owned by an employee, optionally also those the employee
/// supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberFilter {
    employee_id: EmployeeId,
    include_support: bool,
}

impl MemberFilter {
    /// Creates a member filter.
    #[must_use]
    pub const fn new(employee_id: EmployeeId, include_support: bool) -> Self {
        Self {
            employee_id,
            include_support,
        }
    }

    /// Returns the filtered employee.
    #[must_use]
    pub const fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns whether collaborators match too.
    #[must_use]
    pub const fn include_support(&self) -> bool {
        self.include_support
    }

    /// Returns `true` when the task matches.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        task.involves(self.employee_id, self.include_support)
    }
}

/// Conjunction of optional task predicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCriteria {
    date_range: DateRange,
    period: Period,
    department_id: Option<DepartmentId>,
    member: Option<MemberFilter>,
    project_id: Option<ProjectId>,
}

impl TaskCriteria {
    /// Creates criteria matching every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the assignment date to a window.
    #[must_use]
    pub const fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    /// Restricts the assignment date to a calendar period.
    #[must_use]
    pub const fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Restricts the derived department; `None` leaves it unfiltered.
    #[must_use]
    pub const fn with_department(mut self, department_id: Option<DepartmentId>) -> Self {
        self.department_id = department_id;
        self
    }

    /// Restricts owner or collaborators; `None` leaves them unfiltered.
    #[must_use]
    pub const fn with_member(mut self, member: Option<MemberFilter>) -> Self {
        self.member = member;
        self
    }

    /// Restricts the project; `None` leaves it unfiltered.
    #[must_use]
    pub const fn with_project(mut self, project_id: Option<ProjectId>) -> Self {
        self.project_id = project_id;
        self
    }

    /// Returns the calendar period.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Returns `true` when the task satisfies every set predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.date_range.contains(task.assignment_date())
            && self.period.contains(task.assignment_date())
            && self
                .department_id
                .is_none_or(|id| task.department_id() == Some(id))
            && self.member.is_none_or(|member| member.matches(task))
            && self
                .project_id
                .is_none_or(|id| task.project_id() == Some(id))
    }

    /// Keeps the matching tasks, preserving order.
    #[must_use]
    pub fn apply(&self, mut tasks: Vec<Task>) -> Vec<Task> {
        tasks.retain(|task| self.matches(task));
        tasks
    }
}
