//! Step definitions for dashboard scope scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
