//! Workprogram: task lifecycle and access-scoped analytics for work programs.
//!
//! This crate tracks work-program tasks through a guarded lifecycle and
//! computes dashboard analytics (counts, distributions, deadline compliance,
//! satisfaction and a weighted employee performance score) over the tasks a
//! caller is allowed to see.
//!
//! # Architecture
//!
//! Workprogram follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Task records, lifecycle transitions and spreadsheet import
//! - [`analytics`]: Access scoping, filtering and dashboard aggregations

pub mod analytics;
pub mod task;
