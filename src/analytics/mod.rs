//! Access-scoped analytics over work-program tasks.
//!
//! The [`domain`] module holds the pure pipeline: caller scoping, criteria
//! filtering and the aggregations. [`services::DashboardService`] wires it to
//! the task and directory ports and wraps every outcome in a response
//! envelope.

pub mod config;
pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
