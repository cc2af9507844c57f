//! Dashboard entry points.
//!
//! Each entry point fetches one task snapshot, narrows it to what the caller
//! may see, applies the request's criteria and hands the result to a pure
//! aggregation. Every failure is logged and folded into the response
//! envelope.

use super::{
    CardFilterRequest, ChartReport, DashboardResponse, DepartmentSummary, EmployeePerformance,
    EmployeeProfile, PeriodFilterRequest, RateReport, TaskGrid,
};
use crate::analytics::config::AnalyticsConfig;
use crate::analytics::domain::{
    AccessScope, AnalyticsError, BreakdownDimension, CategoryBreakdown, DirectorySnapshot,
    Distribution, Evolution, Identity, MonthlyTrend, PerformanceScorer, RateKind, TaskCounts,
    TaskCriteria, complexity_distribution, employee_image, priority_distribution, project_grid,
    rate, state_distribution,
};
use crate::task::domain::{EmployeeId, Task};
use crate::task::ports::{DirectoryError, DirectoryRepository, TaskRepository, TaskRepositoryError};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors raised while serving a dashboard request.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Request parameters or caller resolution failed.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Directory failure.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result type for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

const ALL_EMPLOYEES: &str = "All employees";
const ALL_DEPARTMENTS: &str = "All departments";

fn respond<T: Default>(
    operation: &'static str,
    result: DashboardResult<T>,
) -> DashboardResponse<T> {
    match result {
        Ok(payload) => DashboardResponse::ok(payload),
        Err(err) => {
            error!(operation, error = %err, "dashboard request failed");
            DashboardResponse::failure(err.to_string())
        }
    }
}

/// Read-only analytics over the task repository.
#[derive(Clone)]
pub struct DashboardService<T, D, C>
where
    T: TaskRepository,
    D: DirectoryRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    directory: Arc<D>,
    clock: Arc<C>,
    config: AnalyticsConfig,
}

impl<T, D, C> DashboardService<T, D, C>
where
    T: TaskRepository,
    D: DirectoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a dashboard service with the default configuration.
    #[must_use]
    pub fn new(tasks: Arc<T>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            directory,
            clock,
            config: AnalyticsConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AnalyticsConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Counts visible tasks matching the card filters.
    pub async fn task_counts(
        &self,
        identity: &Identity,
        request: &CardFilterRequest,
    ) -> DashboardResponse<TaskCounts> {
        let result = self
            .card_tasks(identity, request)
            .await
            .map(|tasks| TaskCounts::from_tasks(&tasks));
        respond("task_counts", result)
    }

    /// Distributes visible tasks by complexity.
    pub async fn complexity_distribution(
        &self,
        identity: &Identity,
        request: &CardFilterRequest,
    ) -> DashboardResponse<Distribution> {
        let result = self
            .card_tasks(identity, request)
            .await
            .map(|tasks| complexity_distribution(&tasks));
        respond("complexity_distribution", result)
    }

    /// Distributes visible tasks by priority.
    pub async fn priority_distribution(
        &self,
        identity: &Identity,
        request: &CardFilterRequest,
    ) -> DashboardResponse<Distribution> {
        let result = self
            .card_tasks(identity, request)
            .await
            .map(|tasks| priority_distribution(&tasks));
        respond("priority_distribution", result)
    }

    /// Distributes visible non-draft tasks by state.
    pub async fn state_distribution(
        &self,
        identity: &Identity,
        request: &CardFilterRequest,
    ) -> DashboardResponse<Distribution> {
        let result = self
            .card_tasks(identity, request)
            .await
            .map(|tasks| state_distribution(&tasks));
        respond("state_distribution", result)
    }

    /// Projects visible tasks into grid rows.
    pub async fn grid(
        &self,
        identity: &Identity,
        request: &CardFilterRequest,
    ) -> DashboardResponse<TaskGrid> {
        let result = async {
            let (tasks, directory) =
                tokio::try_join!(self.card_tasks(identity, request), self.snapshot())?;
            Ok::<_, DashboardError>(TaskGrid {
                rows: project_grid(&tasks, &directory, &self.config.display),
            })
        }
        .await;
        respond("grid", result)
    }

    /// Computes a rate and, when both year and month are given, its change
    /// since the preceding month.
    pub async fn rate(
        &self,
        identity: &Identity,
        kind: RateKind,
        request: &PeriodFilterRequest,
    ) -> DashboardResponse<RateReport> {
        let result = async {
            let criteria = request.criteria(kind.member_includes_support())?;
            let visible = self.visible_tasks(identity).await?;
            let today = self.today();
            let kpi_value = rate(kind, &criteria.apply(visible.clone()), today);

            let period = criteria.period();
            let evolution = period.previous().map(|previous| {
                let earlier = criteria.with_period(previous).apply(visible);
                Evolution::between(
                    kpi_value,
                    rate(kind, &earlier, today),
                    previous.label().unwrap_or_default(),
                )
            });
            debug!(?kind, %kpi_value, "rate computed");
            Ok::<_, DashboardError>(RateReport {
                kpi_value,
                evolution,
            })
        }
        .await;
        respond("rate", result)
    }

    /// Computes per-category deadline compliance.
    pub async fn breakdown(
        &self,
        identity: &Identity,
        dimension: BreakdownDimension,
        request: &PeriodFilterRequest,
    ) -> DashboardResponse<ChartReport<CategoryBreakdown>> {
        let result = async {
            let tasks = self.period_tasks(identity, request, false).await?;
            Ok::<_, DashboardError>(ChartReport {
                chart_data: CategoryBreakdown::compute(dimension, &tasks, self.today()),
            })
        }
        .await;
        respond("breakdown", result)
    }

    /// Computes the monthly on-time versus late split.
    pub async fn monthly_trend(
        &self,
        identity: &Identity,
        request: &PeriodFilterRequest,
    ) -> DashboardResponse<ChartReport<MonthlyTrend>> {
        let result = async {
            let tasks = self.period_tasks(identity, request, false).await?;
            Ok::<_, DashboardError>(ChartReport {
                chart_data: MonthlyTrend::compute(&tasks, self.today()),
            })
        }
        .await;
        respond("monthly_trend", result)
    }

    /// Scores the request's responsible employee, or every employee when the
    /// request names none.
    ///
    /// Tasks are narrowed by period and department only. The responsible
    /// employee selects whose score is reported; their supported tasks count
    /// as well.
    pub async fn employee_performance(
        &self,
        identity: &Identity,
        request: &PeriodFilterRequest,
    ) -> DashboardResponse<EmployeePerformance> {
        let result = async {
            let criteria = request.scoring_criteria()?;
            let tasks = criteria.apply(self.visible_tasks(identity).await?);
            let scorer = PerformanceScorer::new(&self.config.scoring, self.today());
            match request.responsible() {
                Some(id) => self.employee_summary(id, &tasks, &scorer).await,
                None => {
                    let global = scorer.score_global(&tasks);
                    Ok(EmployeePerformance {
                        display_name: ALL_EMPLOYEES.to_owned(),
                        department_name: ALL_DEPARTMENTS.to_owned(),
                        profile_image: self.config.display.placeholder_image.clone(),
                        category: global.category,
                        score: global.score,
                        is_global: true,
                    })
                }
            }
        }
        .await;
        respond("employee_performance", result)
    }

    /// Describes the employee linked to the caller.
    pub async fn current_employee_info(
        &self,
        identity: &Identity,
    ) -> DashboardResponse<EmployeeProfile> {
        let result = async {
            let employee = self
                .directory
                .employee_by_user(identity.user_id())
                .await?
                .ok_or(AnalyticsError::NoEmployeeForIdentity(identity.user_id()))?;
            let department = match employee.department_id() {
                Some(id) => self.directory.department(id).await?,
                None => None,
            };
            Ok::<_, DashboardError>(EmployeeProfile {
                id: Some(employee.id()),
                name: employee.name().to_owned(),
                department: department.map(|d| DepartmentSummary {
                    id: d.id(),
                    name: d.name().to_owned(),
                }),
                image: employee_image(&employee, &self.config.display),
                role: identity.role().label().to_owned(),
            })
        }
        .await;
        respond("current_employee_info", result)
    }

    async fn employee_summary(
        &self,
        id: EmployeeId,
        tasks: &[Task],
        scorer: &PerformanceScorer<'_>,
    ) -> DashboardResult<EmployeePerformance> {
        let employee = self
            .directory
            .employee(id)
            .await?
            .ok_or(AnalyticsError::EmployeeNotFound(id))?;
        let department_name = match employee.department_id() {
            Some(department_id) => self
                .directory
                .department(department_id)
                .await?
                .map(|d| d.name().to_owned()),
            None => None,
        }
        .unwrap_or_else(|| self.config.display.unassigned_department_label.clone());

        let result = scorer.score_employee(id, tasks);
        debug!(
            employee_id = %id,
            score = result.score,
            category = %result.category,
            "employee scored"
        );
        Ok(EmployeePerformance {
            display_name: employee.name().to_owned(),
            department_name,
            profile_image: employee_image(&employee, &self.config.display),
            category: result.category,
            score: result.score,
            is_global: false,
        })
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    async fn scope(&self, identity: &Identity) -> DashboardResult<AccessScope> {
        if identity.role().is_privileged() {
            return Ok(AccessScope::Unrestricted);
        }
        let employee = self.directory.employee_by_user(identity.user_id()).await?;
        if employee.is_none() {
            debug!(user_id = %identity.user_id(), "no employee linked to caller; scope is empty");
        }
        Ok(AccessScope::for_caller(
            identity.role(),
            employee.map(|e| e.id()),
        ))
    }

    async fn visible_tasks(&self, identity: &Identity) -> DashboardResult<Vec<Task>> {
        let (tasks, scope) = tokio::try_join!(
            async { Ok::<_, DashboardError>(self.tasks.list_tasks().await?) },
            self.scope(identity),
        )?;
        let fetched = tasks.len();
        let visible = scope.apply(tasks);
        info!(
            user_id = %identity.user_id(),
            role = %identity.role(),
            fetched,
            visible = visible.len(),
            "task snapshot scoped"
        );
        Ok(visible)
    }

    async fn card_tasks(
        &self,
        identity: &Identity,
        request: &CardFilterRequest,
    ) -> DashboardResult<Vec<Task>> {
        let criteria = request.criteria()?;
        self.filtered(identity, criteria).await
    }

    async fn period_tasks(
        &self,
        identity: &Identity,
        request: &PeriodFilterRequest,
        include_support: bool,
    ) -> DashboardResult<Vec<Task>> {
        let criteria = request.criteria(include_support)?;
        self.filtered(identity, criteria).await
    }

    async fn filtered(
        &self,
        identity: &Identity,
        criteria: TaskCriteria,
    ) -> DashboardResult<Vec<Task>> {
        let tasks = criteria.apply(self.visible_tasks(identity).await?);
        debug!(matched = tasks.len(), "criteria applied");
        Ok(tasks)
    }

    async fn snapshot(&self) -> DashboardResult<DirectorySnapshot> {
        let (employees, departments, projects) = tokio::try_join!(
            self.directory.list_employees(),
            self.directory.list_departments(),
            self.directory.list_projects(),
        )?;
        Ok(DirectorySnapshot::new(employees, departments, projects))
    }
}
