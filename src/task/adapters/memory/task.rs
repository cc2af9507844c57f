//! In-memory task store backing tests and the dashboard examples.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Tasks are kept in insertion order, which is also the listing order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&[Task]) -> T) -> TaskRepositoryResult<T> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        Ok(f(&tasks))
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn reference_taken_by_other(tasks: &[Task], candidate: &Task) -> bool {
    tasks
        .iter()
        .any(|task| task.reference() == candidate.reference() && task.id() != candidate.id())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        if tasks.iter().any(|existing| existing.id() == task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        if reference_taken_by_other(&tasks, task) {
            return Err(TaskRepositoryError::DuplicateReference(
                task.reference().to_owned(),
            ));
        }
        tasks.push(task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.update_many(std::slice::from_ref(task)).await
    }

    async fn update_many(&self, updates: &[Task]) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        let mut positions = Vec::with_capacity(updates.len());
        for task in updates {
            let position = tasks
                .iter()
                .position(|existing| existing.id() == task.id())
                .ok_or(TaskRepositoryError::NotFound(task.id()))?;
            if reference_taken_by_other(&tasks, task) {
                return Err(TaskRepositoryError::DuplicateReference(
                    task.reference().to_owned(),
                ));
            }
            positions.push(position);
        }
        for (position, task) in positions.into_iter().zip(updates) {
            if let Some(slot) = tasks.get_mut(position) {
                *slot = task.clone();
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.read(|tasks| tasks.iter().find(|task| task.id() == id).cloned())
    }

    async fn find_by_reference(&self, reference: &str) -> TaskRepositoryResult<Option<Task>> {
        let wanted = reference.trim();
        self.read(|tasks| tasks.iter().find(|task| task.reference() == wanted).cloned())
    }

    async fn list_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.read(<[Task]>::to_vec)
    }
}
