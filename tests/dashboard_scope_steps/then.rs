//! Then steps for dashboard scope BDD scenarios.

use super::world::DashboardScopeWorld;
use rstest_bdd_macros::then;

#[then("the dashboard reports {count:usize} tasks")]
fn dashboard_reports_tasks(world: &DashboardScopeWorld, count: usize) -> Result<(), eyre::Report> {
    let response = world.response()?;
    eyre::ensure!(
        response.total_tasks == Some(count),
        "expected {count} tasks, found {:?}",
        response.total_tasks
    );
    Ok(())
}

#[then("the response is not an error")]
fn response_is_not_an_error(world: &DashboardScopeWorld) -> Result<(), eyre::Report> {
    let response = world.response()?;
    eyre::ensure!(!response.error, "unexpected error: {:?}", response.message);
    Ok(())
}

#[then(r#"the response is an error mentioning "{text}""#)]
fn response_mentions(world: &DashboardScopeWorld, text: String) -> Result<(), eyre::Report> {
    let response = world.response()?;
    eyre::ensure!(response.error, "expected an error response");
    let message = response.message.as_deref().unwrap_or_default();
    eyre::ensure!(
        message.contains(&text),
        "expected message mentioning {text}, got {message}"
    );
    Ok(())
}
