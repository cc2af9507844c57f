//! Analytics domain: caller scoping, filtering and the aggregations built on
//! top of them.

mod criteria;
mod directory;
mod error;
mod evolution;
mod identity;
mod kpi;
mod performance;
mod rates;
mod scope;

pub use criteria::{DateRange, MemberFilter, Month, Period, TaskCriteria, parse_department};
pub use directory::{DirectorySnapshot, employee_image};
pub use error::AnalyticsError;
pub use evolution::{Evolution, Trend};
pub use identity::{Identity, Role};
pub use kpi::{
    Distribution, GridRow, TaskCounts, complexity_distribution, priority_distribution,
    project_grid, state_distribution,
};
pub use performance::{PerformanceCategory, PerformanceScorer, ScoreResult, SubScores};
pub use rates::{
    BreakdownDimension, CategoryBreakdown, KpiValue, MonthlyTrend, NO_DATA, RateKind, percentage,
    rate, round_to,
};
pub use scope::AccessScope;
