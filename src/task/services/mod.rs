//! Application services for task lifecycle orchestration and import.

mod import;
mod lifecycle;

pub use import::{
    DEFAULT_REFERENCE, ERROR_REFERENCE_PREFIX, ImportOutcome, ImportRow, TaskImportError,
    TaskImportResult, TaskImportService, columns,
};
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
