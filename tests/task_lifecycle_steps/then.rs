//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::then;
use workprogram::task::{
    domain::{TaskDomainError, TaskState},
    services::TaskLifecycleError,
};

fn expected_state(state: &str) -> Result<TaskState, eyre::Report> {
    TaskState::try_from(state).map_err(|err| eyre::eyre!("invalid expected state: {err}"))
}

#[then(r#"the task state is "{state}""#)]
fn task_state_is(world: &TaskLifecycleWorld, state: String) -> Result<(), eyre::Report> {
    let expected = expected_state(&state)?;
    let task = world.current_task()?;
    let stored = run_async(world.service.find_by_id(task.id()))?
        .ok_or_else(|| eyre::eyre!("task missing from repository"))?;

    eyre::ensure!(
        stored.state() == expected,
        "expected state {expected}, found {}",
        stored.state()
    );
    Ok(())
}

#[then("the actual deadline is today")]
fn actual_deadline_is_today(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let today = world.clock.today();
    let task = world.current_task()?;
    eyre::ensure!(
        task.actual_deadline() == Some(today),
        "expected actual deadline {today}, found {:?}",
        task.actual_deadline()
    );
    Ok(())
}

#[then("the task has no actual deadline")]
fn task_has_no_actual_deadline(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    eyre::ensure!(task.actual_deadline().is_none());
    Ok(())
}

#[then(r#"the action fails with an invalid transition from "{state}""#)]
fn action_fails_with_invalid_transition(
    world: &TaskLifecycleWorld,
    state: String,
) -> Result<(), eyre::Report> {
    let expected = expected_state(&state)?;
    let result = world
        .last_action_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing action result"))?;

    match result {
        Err(TaskLifecycleError::Domain(TaskDomainError::InvalidTransition { from, .. }))
            if *from == expected =>
        {
            Ok(())
        }
        other => Err(eyre::eyre!(
            "expected InvalidTransition from {expected}, got {other:?}"
        )),
    }
}

#[then("the action name is rejected")]
fn action_name_is_rejected(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.last_parse_error.is_some(),
        "expected the action name to be rejected"
    );
    eyre::ensure!(world.last_action_result.is_none());
    Ok(())
}

#[then("the batch fails")]
fn batch_fails(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_batch_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing batch result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Domain(TaskDomainError::InvalidTransition { .. }))
        ),
        "expected InvalidTransition, got {result:?}"
    );
    Ok(())
}

#[then("every task keeps its previous state")]
fn every_task_keeps_state(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    for (task, before) in world.tasks.iter().zip(&world.states_before_batch) {
        let stored = run_async(world.service.find_by_id(task.id()))?
            .ok_or_else(|| eyre::eyre!("task missing from repository"))?;
        eyre::ensure!(
            stored.state() == *before,
            "task {} moved from {before} to {}",
            stored.reference(),
            stored.state()
        );
    }
    Ok(())
}
