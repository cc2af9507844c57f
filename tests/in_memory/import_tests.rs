//! In-memory integration tests for spreadsheet import.

use super::helpers::{Workspace, date, workspace};
use eyre::ensure;
use rstest::rstest;
use workprogram::analytics::domain::{Identity, KpiValue, RateKind, Role};
use workprogram::analytics::services::{CardFilterRequest, PeriodFilterRequest};
use workprogram::task::{
    domain::{DepartmentId, EmployeeId, Level, ProjectId, TaskState, UserId},
    ports::TaskRepository,
    services::{ERROR_REFERENCE_PREFIX, ImportOutcome, ImportRow, columns},
};

const ADMIN: Identity = Identity::new(UserId::new(1), Role::Admin);

fn row(reference: &str, responsible: &str, status: &str) -> ImportRow {
    ImportRow::new()
        .with(columns::REFERENCE, reference)
        .with(columns::RESPONSIBLE, responsible)
        .with(columns::STATUS, status)
        .with(columns::PRIORITY, "High")
        .with(columns::COMPLEXITY, "low")
        .with(columns::ASSIGNMENT_DATE, "2024-05-02")
        .with(columns::INITIAL_DEADLINE, "2024-05-20")
        .with(columns::PROJECT, "payroll")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn imported_rows_resolve_directory_names(workspace: Workspace) -> eyre::Result<()> {
    let outcome = workspace
        .importer
        .import_row(
            &row("WP-IMP-1", "Amina", "done")
                .with(columns::ACTUAL_DEADLINE, "2024-05-18")
                .with(columns::SUPPORT, "Bruno, Nobody")
                .with(columns::SATISFACTION, "HIGH"),
        )
        .await?;

    let ImportOutcome::Created(task) = outcome else {
        eyre::bail!("expected a created task, got {outcome:?}");
    };
    ensure!(task.responsible_id() == Some(EmployeeId::new(1)));
    ensure!(task.department_id() == Some(DepartmentId::new(10)));
    ensure!(task.support_ids().len() == 1);
    ensure!(task.project_id() == Some(ProjectId::new(100)));
    ensure!(task.priority() == Some(Level::High));
    ensure!(task.satisfaction_level() == Some(Level::High));
    ensure!(task.is_done_on_time());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reimport_updates_by_reference(workspace: Workspace) -> eyre::Result<()> {
    workspace
        .importer
        .import_row(&row("WP-IMP-2", "Amina", "ongoing"))
        .await?;
    let outcome = workspace
        .importer
        .import_row(&row("WP-IMP-2", "Bruno", "to_validate"))
        .await?;

    ensure!(matches!(outcome, ImportOutcome::Updated(_)));
    let tasks = workspace.repository.list_tasks().await?;
    ensure!(tasks.len() == 1);
    let task = workspace
        .repository
        .find_by_reference("WP-IMP-2")
        .await?
        .ok_or_else(|| eyre::eyre!("imported task should exist"))?;
    ensure!(task.state() == TaskState::ToValidate);
    ensure!(task.responsible_id() == Some(EmployeeId::new(2)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_row_leaves_cancelled_error_record(workspace: Workspace) -> eyre::Result<()> {
    let outcome = workspace
        .importer
        .import_row(&row("WP-IMP-3", "Amina", "done").with(columns::INITIAL_DEADLINE, "20/05/2024"))
        .await?;

    ensure!(outcome.is_failure());
    let record = outcome.task();
    ensure!(record.reference() == format!("{ERROR_REFERENCE_PREFIX}WP-IMP-3"));
    ensure!(record.state() == TaskState::Cancelled);
    ensure!(record.comments().is_some_and(|c| c.contains("20/05/2024")));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn imported_work_program_feeds_the_dashboard(workspace: Workspace) -> eyre::Result<()> {
    let rows = vec![
        row("WP-A", "Amina", "done").with(columns::ACTUAL_DEADLINE, "2024-05-19"),
        row("WP-B", "Amina", "validated").with(columns::ACTUAL_DEADLINE, "2024-05-25"),
        row("WP-C", "Bruno", "done").with(columns::ACTUAL_DEADLINE, "2024-05-10"),
        row("WP-D", "Bruno", "draft"),
    ];
    let outcomes = workspace.importer.import_rows(&rows).await?;
    ensure!(outcomes.iter().all(|o| !o.is_failure()));

    let counts = workspace
        .dashboard
        .task_counts(&ADMIN, &CardFilterRequest::new())
        .await;
    ensure!(counts.payload.total_tasks == 4);
    ensure!(counts.payload.total_projects == 1);
    ensure!(counts.payload.tasks_valid == 1);

    let may = PeriodFilterRequest::new().with_year(2024).with_month("mai");
    let compliance = workspace
        .dashboard
        .rate(&ADMIN, RateKind::DeadlineCompliance, &may)
        .await;
    ensure!(compliance.payload.kpi_value == KpiValue::Value(50.0));

    let amina = Identity::new(UserId::new(101), Role::LimitedUser);
    let own = workspace
        .dashboard
        .rate(&amina, RateKind::DeadlineCompliance, &may)
        .await;
    ensure!(own.payload.kpi_value == KpiValue::Value(50.0));

    let schedule = date(2024, 5, 20);
    let tasks = workspace.repository.list_tasks().await?;
    ensure!(tasks.iter().all(|t| t.initial_deadline() == Some(schedule)));
    Ok(())
}
