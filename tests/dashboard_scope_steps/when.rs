//! When steps for dashboard scope BDD scenarios.

use super::world::{DashboardScopeWorld, LastResponse, run_async};
use rstest_bdd_macros::when;
use workprogram::analytics::{
    domain::{Identity, RateKind, Role},
    services::{CardFilterRequest, PeriodFilterRequest},
};
use workprogram::task::domain::UserId;

fn identity(role_name: &str, user: u64) -> Result<Identity, eyre::Report> {
    let role = Role::try_from(role_name)
        .map_err(|err| eyre::eyre!("invalid role in scenario: {err}"))?;
    Ok(Identity::new(UserId::new(user), role))
}

#[when(r#"a "{role}" with user {user:u64} requests the task counts"#)]
fn request_task_counts(
    world: &mut DashboardScopeWorld,
    role: String,
    user: u64,
) -> Result<(), eyre::Report> {
    let identity = identity(&role, user)?;
    let response = run_async(
        world
            .dashboard
            .task_counts(&identity, &CardFilterRequest::new()),
    );
    world.last_response = Some(LastResponse {
        error: response.error,
        message: response.message,
        total_tasks: Some(response.payload.total_tasks),
    });
    Ok(())
}

#[when(r#"a "{role}" with user {user:u64} requests deadline compliance for "{month}" {year:i32}"#)]
fn request_compliance(
    world: &mut DashboardScopeWorld,
    role: String,
    user: u64,
    month: String,
    year: i32,
) -> Result<(), eyre::Report> {
    let identity = identity(&role, user)?;
    let request = PeriodFilterRequest::new().with_year(year).with_month(month);
    let response = run_async(world.dashboard.rate(
        &identity,
        RateKind::DeadlineCompliance,
        &request,
    ));
    world.last_response = Some(LastResponse {
        error: response.error,
        message: response.message,
        total_tasks: None,
    });
    Ok(())
}
