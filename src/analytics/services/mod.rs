//! Application services exposing the analytics engine.

mod dashboard;
mod requests;
mod responses;

pub use dashboard::{DashboardError, DashboardResult, DashboardService};
pub use requests::{CardFilterRequest, PeriodFilterRequest};
pub use responses::{
    ChartReport, DashboardResponse, DepartmentSummary, EmployeePerformance, EmployeeProfile,
    RateReport, TaskGrid,
};
