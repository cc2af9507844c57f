//! Unit tests for the task domain, lifecycle service and importer.
