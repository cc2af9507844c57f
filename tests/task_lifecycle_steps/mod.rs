//! Step definitions for task lifecycle scenarios.

pub mod then;
pub mod when;
pub mod world;
