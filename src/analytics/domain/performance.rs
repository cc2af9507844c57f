//! Weighted performance scoring of employees.

use super::round_to;
use crate::analytics::config::ScoringConfig;
use crate::task::domain::{EmployeeId, Level, Task};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Category derived from a composite score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PerformanceCategory {
    /// Below the satisfactory threshold.
    AtRisk,
    /// Between the satisfactory and performing thresholds.
    Satisfactory,
    /// Between the performing and high-potential thresholds.
    Performing,
    /// At or above the high-potential threshold.
    HighPotential,
    /// The employee has no task whose deadline has passed.
    NoEvaluableData,
    /// No employee could be evaluated.
    #[default]
    NoData,
}

impl PerformanceCategory {
    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AtRisk => "At risk",
            Self::Satisfactory => "Satisfactory",
            Self::Performing => "Performing",
            Self::HighPotential => "High potential",
            Self::NoEvaluableData => "No evaluable data",
            Self::NoData => "No data",
        }
    }

    /// Returns `true` for categories backed by an actual score.
    #[must_use]
    pub const fn is_evaluated(self) -> bool {
        !matches!(self, Self::NoEvaluableData | Self::NoData)
    }
}

impl fmt::Display for PerformanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PerformanceCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Composite score and its category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Category of the score.
    pub category: PerformanceCategory,
    /// Composite score in `[0, 100]`, rounded to two decimals.
    pub score: f64,
}

impl ScoreResult {
    const fn unevaluated(category: PerformanceCategory) -> Self {
        Self {
            category,
            score: 0.0,
        }
    }
}

/// The five components of the composite score, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SubScores {
    /// On-time share of owned tasks.
    pub pct_responsible_on_time: f64,
    /// On-time share of supported tasks.
    pub pct_support_on_time: f64,
    /// Average satisfaction mapped low/medium/high to 0/50/100.
    pub avg_satisfaction_norm: f64,
    /// Average complexity as a share of the highest level.
    pub avg_complexity_norm: f64,
    /// Average priority as a share of the highest level.
    pub avg_priority_norm: f64,
}

#[expect(clippy::float_arithmetic, reason = "sub-scores are percentages")]
fn on_time_share<'a>(tasks: impl Iterator<Item = &'a Task>) -> f64 {
    let (mut on_time, mut total) = (0_u32, 0_u32);
    for task in tasks {
        total += 1;
        if task.is_done_on_time() {
            on_time += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        100.0 * f64::from(on_time) / f64::from(total)
    }
}

#[expect(clippy::float_arithmetic, reason = "sub-scores are percentages")]
fn mean_of(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

#[expect(clippy::float_arithmetic, reason = "sub-scores are percentages")]
fn satisfaction_norm(level: Level) -> f64 {
    (f64::from(level.score()) - 1.0) / 2.0 * 100.0
}

#[expect(clippy::float_arithmetic, reason = "sub-scores are percentages")]
fn level_norm(level: Level) -> f64 {
    f64::from(level.score()) / 3.0 * 100.0
}

/// Scores employees from the tasks they own or support.
#[derive(Debug, Clone)]
pub struct PerformanceScorer<'a> {
    config: &'a ScoringConfig,
    today: NaiveDate,
}

impl<'a> PerformanceScorer<'a> {
    /// Creates a scorer evaluating deadlines as of `today`.
    #[must_use]
    pub const fn new(config: &'a ScoringConfig, today: NaiveDate) -> Self {
        Self { config, today }
    }

    /// Computes the sub-scores for `employee`, or `None` when none of the
    /// employee's tasks has a passed deadline.
    #[must_use]
    pub fn sub_scores(&self, employee: EmployeeId, tasks: &[Task]) -> Option<SubScores> {
        let evaluable: Vec<&Task> = tasks
            .iter()
            .filter(|task| task.involves(employee, true) && task.is_supposed_done(self.today))
            .collect();
        if evaluable.is_empty() {
            return None;
        }

        let owns = |task: &Task| task.responsible_id() == Some(employee);
        Some(SubScores {
            pct_responsible_on_time: on_time_share(
                evaluable.iter().copied().filter(|task| owns(task)),
            ),
            pct_support_on_time: on_time_share(
                evaluable
                    .iter()
                    .copied()
                    .filter(|task| !owns(task) && task.is_supported_by(employee)),
            ),
            avg_satisfaction_norm: mean_of(
                evaluable
                    .iter()
                    .filter_map(|task| task.satisfaction_level())
                    .map(satisfaction_norm),
            ),
            avg_complexity_norm: mean_of(
                evaluable
                    .iter()
                    .filter_map(|task| task.complexity())
                    .map(level_norm),
            ),
            avg_priority_norm: mean_of(
                evaluable
                    .iter()
                    .filter_map(|task| task.priority())
                    .map(level_norm),
            ),
        })
    }

    /// Returns the weighted composite of `scores`, rounded to two decimals.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "weighted sum of sub-scores")]
    pub fn composite(&self, scores: &SubScores) -> f64 {
        let c = self.config;
        round_to(
            c.responsible_weight * scores.pct_responsible_on_time
                + c.support_weight * scores.pct_support_on_time
                + c.satisfaction_weight * scores.avg_satisfaction_norm
                + c.complexity_weight * scores.avg_complexity_norm
                + c.priority_weight * scores.avg_priority_norm,
            2,
        )
    }

    /// Maps a score onto the configured thresholds.
    #[must_use]
    pub fn categorize(&self, score: f64) -> PerformanceCategory {
        if score < self.config.satisfactory_threshold {
            PerformanceCategory::AtRisk
        } else if score < self.config.performing_threshold {
            PerformanceCategory::Satisfactory
        } else if score < self.config.high_potential_threshold {
            PerformanceCategory::Performing
        } else {
            PerformanceCategory::HighPotential
        }
    }

    /// Scores a single employee.
    #[must_use]
    pub fn score_employee(&self, employee: EmployeeId, tasks: &[Task]) -> ScoreResult {
        self.sub_scores(employee, tasks).map_or(
            ScoreResult::unevaluated(PerformanceCategory::NoEvaluableData),
            |scores| {
                let score = self.composite(&scores);
                ScoreResult {
                    category: self.categorize(score),
                    score,
                }
            },
        )
    }

    /// Averages the scores of every evaluable employee appearing on `tasks`.
    #[must_use]
    pub fn score_global(&self, tasks: &[Task]) -> ScoreResult {
        let involved: BTreeSet<EmployeeId> = tasks
            .iter()
            .flat_map(|task| {
                task.responsible_id()
                    .into_iter()
                    .chain(task.support_ids().iter().copied())
            })
            .collect();
        let scores: Vec<f64> = involved
            .into_iter()
            .map(|employee| self.score_employee(employee, tasks))
            .filter(|result| result.category.is_evaluated())
            .map(|result| result.score)
            .collect();
        if scores.is_empty() {
            return ScoreResult::unevaluated(PerformanceCategory::NoData);
        }
        let score = round_to(mean_of(scores.into_iter()), 2);
        ScoreResult {
            category: self.categorize(score),
            score,
        }
    }
}
