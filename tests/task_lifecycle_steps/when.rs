//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::when;
use workprogram::task::domain::{TaskAction, TaskId};

#[when(r#"the task receives the action "{action_name}""#)]
fn task_receives_action(
    world: &mut TaskLifecycleWorld,
    action_name: String,
) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?.id();
    let action = match TaskAction::try_from(action_name.as_str()) {
        Ok(parsed) => parsed,
        Err(err) => {
            world.last_parse_error = Some(err);
            return Ok(());
        }
    };

    let result = run_async(world.service.apply_action(task_id, action));
    if let Ok(ref updated) = result {
        world.remember(updated.clone());
    }
    world.last_action_result = Some(result);
    Ok(())
}

#[when(r#"every task receives the action "{action_name}" as a batch"#)]
fn every_task_receives_batch(
    world: &mut TaskLifecycleWorld,
    action_name: String,
) -> Result<(), eyre::Report> {
    let action = TaskAction::try_from(action_name.as_str())
        .map_err(|err| eyre::eyre!("invalid action in scenario: {err}"))?;
    let ids: Vec<TaskId> = world.tasks.iter().map(|task| task.id()).collect();
    world.states_before_batch = world.tasks.iter().map(|task| task.state()).collect();
    world.last_batch_result = Some(run_async(world.service.apply_batch(&ids, action)));
    Ok(())
}
