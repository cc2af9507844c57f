//! Month-over-month change of a rate.

use super::{KpiValue, NO_DATA, round_to};
use serde::Serialize;

/// Direction of change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// The rate increased.
    Up,
    /// The rate decreased.
    Down,
    /// Unchanged or not comparable.
    #[default]
    Neutral,
}

/// Comparison of a rate with the same rate one month earlier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evolution {
    /// Rate for the preceding month.
    pub previous_kpi: KpiValue,
    /// `current - previous`, rounded to one decimal.
    pub evolution_value: Option<f64>,
    /// Relative change in percent, absent when the previous rate is zero.
    pub evolution_percentage: Option<f64>,
    /// Direction of change.
    pub trend: Trend,
    /// Signed display string such as `"+12.5%"`.
    pub display: String,
    /// Label of the preceding month, e.g. `"December 2023"`.
    pub previous_period: String,
}

impl Evolution {
    /// Compares `current` with `previous`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "deltas between two percentages")]
    pub fn between(current: KpiValue, previous: KpiValue, previous_period: String) -> Self {
        let (KpiValue::Value(now), KpiValue::Value(before)) = (current, previous) else {
            return Self {
                previous_kpi: previous,
                display: NO_DATA.to_owned(),
                previous_period,
                ..Self::default()
            };
        };

        let delta = now - before;
        let (trend, display) = if delta > 0.0 {
            (Trend::Up, format!("+{delta:.1}%"))
        } else if delta < 0.0 {
            (Trend::Down, format!("{delta:.1}%"))
        } else {
            (Trend::Neutral, "0.0%".to_owned())
        };
        let evolution_percentage =
            (before.abs() > f64::EPSILON).then(|| round_to(100.0 * delta / before, 1));

        Self {
            previous_kpi: previous,
            evolution_value: Some(round_to(delta, 1)),
            evolution_percentage,
            trend,
            display,
            previous_period,
        }
    }
}
