//! Adapter implementations for task and directory ports.

pub mod memory;
