//! Tunable weights, thresholds and display defaults for the analytics
//! engine.
//!
//! # Examples
//!
//! ```
//! use workprogram::analytics::config::AnalyticsConfig;
//!
//! let config = AnalyticsConfig::default();
//! assert!((config.scoring.responsible_weight - 0.35).abs() < f64::EPSILON);
//!
//! let tuned = AnalyticsConfig::from_json_str(r#"{"scoring": {"support_weight": 0.3}}"#)
//!     .expect("valid configuration");
//! assert!((tuned.scoring.support_weight - 0.3).abs() < f64::EPSILON);
//! assert!((tuned.scoring.responsible_weight - 0.35).abs() < f64::EPSILON);
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid analytics configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A weight is negative or not a finite number.
    #[error("scoring weight {name} must be a non-negative number, got {value}")]
    InvalidWeight {
        /// Name of the offending weight.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Category thresholds are not strictly increasing.
    #[error("category thresholds must be strictly increasing")]
    UnorderedThresholds,
}

/// Weights and category thresholds of the composite performance score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the share of owned tasks finished on time.
    pub responsible_weight: f64,
    /// Weight of the share of supported tasks finished on time.
    pub support_weight: f64,
    /// Weight of the normalised average satisfaction.
    pub satisfaction_weight: f64,
    /// Weight of the normalised average complexity.
    pub complexity_weight: f64,
    /// Weight of the normalised average priority.
    pub priority_weight: f64,
    /// Lowest score rated satisfactory; anything below is at risk.
    pub satisfactory_threshold: f64,
    /// Lowest score rated performing.
    pub performing_threshold: f64,
    /// Lowest score rated high potential.
    pub high_potential_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            responsible_weight: 0.35,
            support_weight: 0.25,
            satisfaction_weight: 0.20,
            complexity_weight: 0.10,
            priority_weight: 0.10,
            satisfactory_threshold: 60.0,
            performing_threshold: 75.0,
            high_potential_threshold: 90.0,
        }
    }
}

impl ScoringConfig {
    /// Creates a configuration that scores delivery alone, ignoring
    /// satisfaction, complexity and priority.
    #[must_use]
    pub fn delivery_only() -> Self {
        Self {
            responsible_weight: 0.6,
            support_weight: 0.4,
            satisfaction_weight: 0.0,
            complexity_weight: 0.0,
            priority_weight: 0.0,
            ..Self::default()
        }
    }

    /// Checks weights and thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWeight`] for a negative or non-finite
    /// weight and [`ConfigError::UnorderedThresholds`] when thresholds do not
    /// increase.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("responsible_weight", self.responsible_weight),
            ("support_weight", self.support_weight),
            ("satisfaction_weight", self.satisfaction_weight),
            ("complexity_weight", self.complexity_weight),
            ("priority_weight", self.priority_weight),
        ];
        if let Some((name, value)) = weights
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(ConfigError::InvalidWeight { name, value });
        }
        if !(self.satisfactory_threshold < self.performing_threshold
            && self.performing_threshold < self.high_potential_threshold)
        {
            return Err(ConfigError::UnorderedThresholds);
        }
        Ok(())
    }
}

/// Labels and image references used when rendering rows and profiles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Image shown when no employee image is available.
    pub placeholder_image: String,
    /// Image reference for an employee without a stored image; `{id}` is
    /// replaced by the employee identifier.
    pub employee_image_pattern: String,
    /// Text shown for a name that cannot be resolved.
    pub undefined_label: String,
    /// Department name shown for an employee without a department.
    pub unassigned_department_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder_image: "/web/static/src/img/placeholder.png".to_owned(),
            employee_image_pattern: "/web/image/hr.employee/{id}/avatar_128".to_owned(),
            undefined_label: "Undefined".to_owned(),
            unassigned_department_label: "Unassigned".to_owned(),
        }
    }
}

/// Top-level analytics configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Performance scoring parameters.
    pub scoring: ScoringConfig,
    /// Rendering defaults.
    pub display: DisplayConfig,
}

impl AnalyticsConfig {
    /// Parses and validates a JSON document. Missing fields take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is malformed or the scoring
    /// parameters are invalid.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.scoring.validate()?;
        Ok(config)
    }
}
