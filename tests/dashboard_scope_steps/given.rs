//! Given steps for dashboard scope BDD scenarios.

use super::world::{DashboardScopeWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use workprogram::task::{domain::EmployeeId, services::CreateTaskRequest};

#[given("a work program where Amina owns a task supported by Bruno")]
fn amina_task_supported_by_bruno(world: &mut DashboardScopeWorld) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new("WP-AMINA")
        .with_responsible(EmployeeId::new(1))
        .with_support([EmployeeId::new(2)]);
    run_async(world.lifecycle.create_task(request)).wrap_err("create Amina's task")?;
    Ok(())
}

#[given("Chen owns a task of their own")]
fn chen_owns_task(world: &mut DashboardScopeWorld) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new("WP-CHEN").with_responsible(EmployeeId::new(3));
    run_async(world.lifecycle.create_task(request)).wrap_err("create Chen's task")?;
    Ok(())
}
