//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Workspace, date, workspace};
use eyre::{bail, ensure};
use rstest::rstest;
use workprogram::task::{
    domain::{DepartmentId, EmployeeId, Level, TaskAction, TaskDomainError, TaskId, TaskState},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskLifecycleError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_moves_through_review_cycle(workspace: Workspace) -> eyre::Result<()> {
    let created = workspace
        .lifecycle
        .create_task(
            CreateTaskRequest::new("WP-001")
                .with_responsible(EmployeeId::new(2))
                .with_schedule(Some(date(2024, 6, 1)), Some(date(2024, 7, 15))),
        )
        .await?;
    ensure!(created.state() == TaskState::Draft);
    ensure!(created.department_id() == Some(DepartmentId::new(20)));

    let lifecycle = &workspace.lifecycle;
    lifecycle.apply_action(created.id(), TaskAction::Start).await?;
    lifecycle
        .apply_action(created.id(), TaskAction::SubmitForValidation)
        .await?;
    let validated = lifecycle
        .apply_action(created.id(), TaskAction::Validate)
        .await?;

    ensure!(validated.state() == TaskState::Validated);
    ensure!(validated.actual_deadline() == Some(workspace.clock.today()));
    ensure!(validated.assignment_date() == Some(workspace.clock.today()));

    let stored = workspace.repository.find_by_id(created.id()).await?;
    ensure!(stored.as_ref() == Some(&validated));

    let refused = lifecycle.apply_action(created.id(), TaskAction::Refuse).await;
    let Err(TaskLifecycleError::Domain(TaskDomainError::InvalidTransition { from, .. })) = &refused
    else {
        bail!("expected an invalid transition, got {refused:?}");
    };
    ensure!(*from == TaskState::Validated);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_is_all_or_nothing(workspace: Workspace) -> eyre::Result<()> {
    let lifecycle = &workspace.lifecycle;
    let first = lifecycle.create_task(CreateTaskRequest::new("WP-010")).await?;
    let second = lifecycle.create_task(CreateTaskRequest::new("WP-011")).await?;
    lifecycle
        .apply_action(second.id(), TaskAction::MarkDone)
        .await?;

    let result = lifecycle
        .apply_batch(&[first.id(), second.id()], TaskAction::MarkIncomplete)
        .await;
    ensure!(result.is_err());

    let untouched = workspace.repository.find_by_id(first.id()).await?;
    ensure!(untouched.map(|task| task.state()) == Some(TaskState::Draft));

    let cancelled = lifecycle
        .apply_batch(&[first.id(), second.id(), first.id()], TaskAction::Cancel)
        .await?;
    ensure!(cancelled.len() == 2);
    ensure!(
        cancelled
            .iter()
            .all(|task| task.state() == TaskState::Cancelled)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_with_unknown_task_writes_nothing(workspace: Workspace) -> eyre::Result<()> {
    let lifecycle = &workspace.lifecycle;
    let task = lifecycle.create_task(CreateTaskRequest::new("WP-020")).await?;
    let missing = TaskId::new();

    let result = lifecycle
        .apply_batch(&[task.id(), missing], TaskAction::Start)
        .await;

    ensure!(matches!(
        result,
        Err(TaskLifecycleError::Repository(TaskRepositoryError::NotFound(id))) if id == missing
    ));
    let stored = workspace.repository.find_by_id(task.id()).await?;
    ensure!(stored.map(|t| t.state()) == Some(TaskState::Draft));
    Ok(())
}

#[rstest]
#[case(-1.0)]
#[case(100.5)]
#[tokio::test(flavor = "multi_thread")]
async fn completion_outside_bounds_is_rejected(
    workspace: Workspace,
    #[case] value: f64,
) -> eyre::Result<()> {
    let task = workspace
        .lifecycle
        .create_task(CreateTaskRequest::new("WP-030"))
        .await?;

    let result = workspace
        .lifecycle
        .set_completion_percentage(task.id(), value)
        .await;

    ensure!(matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidCompletionPercentage(_)
        ))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn satisfaction_and_completion_are_persisted(workspace: Workspace) -> eyre::Result<()> {
    let lifecycle = &workspace.lifecycle;
    let task = lifecycle.create_task(CreateTaskRequest::new("WP-040")).await?;

    lifecycle.set_completion_percentage(task.id(), 80.0).await?;
    lifecycle.set_satisfaction(task.id(), Level::High).await?;

    let stored = lifecycle
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    ensure!((stored.completion().value() - 80.0).abs() < f64::EPSILON);
    ensure!(stored.satisfaction_level() == Some(Level::High));
    Ok(())
}
