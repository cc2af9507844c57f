//! Deadline compliance and satisfaction rates.
//!
//! Every rate is built on the same population: tasks whose initial deadline
//! has passed ("supposed done"). The share of those concluded on time, or a
//! narrower subset of them, becomes a percentage rounded to two decimals.

use super::Month;
use crate::task::domain::{Level, Task};
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Display form of a rate with no population.
pub const NO_DATA: &str = "--";

/// A rate that may be undefined for lack of data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum KpiValue {
    /// The population was empty.
    #[default]
    NoData,
    /// Percentage in `[0, 100]`.
    Value(f64),
}

impl KpiValue {
    /// Returns the percentage, if any.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::NoData => None,
            Self::Value(value) => Some(value),
        }
    }

    /// Returns `true` for the sentinel.
    #[must_use]
    pub const fn is_no_data(self) -> bool {
        matches!(self, Self::NoData)
    }
}

impl fmt::Display for KpiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoData => f.write_str(NO_DATA),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for KpiValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NoData => serializer.serialize_str(NO_DATA),
            Self::Value(value) => serializer.serialize_f64(*value),
        }
    }
}

/// Rounds to `places` decimals, half away from zero.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "decimal rounding of a percentage")]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Returns `100 * part / whole` rounded to two decimals, or `None` for an
/// empty whole.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "task counts stay far below 2^52 and the ratio is a float by definition"
)]
pub fn percentage(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| round_to(100.0 * part as f64 / whole as f64, 2))
}

/// Which rate to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateKind {
    /// Share of supposed-done tasks finished on time.
    DeadlineCompliance,
    /// Share of supposed-done tasks finished on time with high satisfaction.
    Satisfaction,
    /// Deadline compliance over high-complexity tasks.
    ComplexResolution,
    /// Deadline compliance over high-priority tasks.
    PriorityResolution,
}

impl RateKind {
    /// Every rate kind.
    pub const ALL: [Self; 4] = [
        Self::DeadlineCompliance,
        Self::Satisfaction,
        Self::ComplexResolution,
        Self::PriorityResolution,
    ];

    /// Returns whether the employee filter for this rate also matches
    /// collaborators. Only deadline compliance counts supported tasks.
    #[must_use]
    pub const fn member_includes_support(self) -> bool {
        matches!(self, Self::DeadlineCompliance)
    }

    const fn in_population(self, task: &Task) -> bool {
        match self {
            Self::DeadlineCompliance | Self::Satisfaction => true,
            Self::ComplexResolution => matches!(task.complexity(), Some(Level::High)),
            Self::PriorityResolution => matches!(task.priority(), Some(Level::High)),
        }
    }

    fn is_success(self, task: &Task) -> bool {
        task.is_done_on_time()
            && (!matches!(self, Self::Satisfaction)
                || task.satisfaction_level() == Some(Level::High))
    }
}

/// Computes a rate over `tasks` as of `today`.
#[must_use]
pub fn rate(kind: RateKind, tasks: &[Task], today: NaiveDate) -> KpiValue {
    let population = tasks
        .iter()
        .filter(|task| task.is_supposed_done(today) && kind.in_population(task));
    let (mut successes, mut total) = (0, 0);
    for task in population {
        total += 1;
        if kind.is_success(task) {
            successes += 1;
        }
    }
    percentage(successes, total).map_or(KpiValue::NoData, KpiValue::Value)
}

/// Level attribute used to slice a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownDimension {
    /// Slice by priority.
    Priority,
    /// Slice by complexity.
    Complexity,
}

impl BreakdownDimension {
    const fn level_of(self, task: &Task) -> Option<Level> {
        match self {
            Self::Priority => task.priority(),
            Self::Complexity => task.complexity(),
        }
    }

    /// Returns the chart label for `level`, e.g. `"High priority"`.
    #[must_use]
    pub fn label(self, level: Level) -> String {
        let name = match level {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        };
        match self {
            Self::Priority => format!("{name} priority"),
            Self::Complexity => format!("{name} complexity"),
        }
    }
}

/// Per-category deadline compliance for pie charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    /// Category labels.
    pub labels: Vec<String>,
    /// Compliance rate per category.
    pub values: Vec<f64>,
    /// On-time task count per category.
    pub task_counts: Vec<usize>,
}

impl CategoryBreakdown {
    /// Slices supposed-done tasks by `dimension`, omitting categories with no
    /// on-time task.
    #[must_use]
    pub fn compute(dimension: BreakdownDimension, tasks: &[Task], today: NaiveDate) -> Self {
        let mut breakdown = Self::default();
        for level in Level::ALL {
            let population: Vec<&Task> = tasks
                .iter()
                .filter(|task| {
                    task.is_supposed_done(today) && dimension.level_of(task) == Some(level)
                })
                .collect();
            let on_time = population.iter().filter(|task| task.is_done_on_time()).count();
            if on_time == 0 {
                continue;
            }
            let Some(value) = percentage(on_time, population.len()) else {
                continue;
            };
            breakdown.labels.push(dimension.label(level));
            breakdown.values.push(value);
            breakdown.task_counts.push(on_time);
        }
        breakdown
    }

    /// Returns `true` when no category qualified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// On-time versus late split per assignment month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyTrend {
    /// Month labels, e.g. `"March 2024"`, in chronological order.
    pub months: Vec<String>,
    /// On-time percentage per month.
    pub pct_on_time: Vec<f64>,
    /// Late percentage per month.
    pub pct_late: Vec<f64>,
    /// On-time count per month.
    pub count_on_time: Vec<usize>,
    /// Late count per month.
    pub count_late: Vec<usize>,
}

impl MonthlyTrend {
    /// Groups supposed-done tasks by the month of their assignment date.
    /// Tasks without an assignment date are left out.
    #[must_use]
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let mut buckets: BTreeMap<(i32, Month), (usize, usize)> = BTreeMap::new();
        for task in tasks.iter().filter(|task| task.is_supposed_done(today)) {
            let Some(assigned) = task.assignment_date() else {
                continue;
            };
            let (on_time, late) = buckets
                .entry((assigned.year(), Month::of(assigned)))
                .or_default();
            if task.is_done_on_time() {
                *on_time += 1;
            } else {
                *late += 1;
            }
        }

        let mut trend = Self::default();
        for ((year, month), (on_time, late)) in buckets {
            let total = on_time + late;
            trend.months.push(format!("{month} {year}"));
            trend.pct_on_time.push(percentage(on_time, total).unwrap_or_default());
            trend.pct_late.push(percentage(late, total).unwrap_or_default());
            trend.count_on_time.push(on_time);
            trend.count_late.push(late);
        }
        trend
    }

    /// Returns `true` when no month had supposed-done tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}
