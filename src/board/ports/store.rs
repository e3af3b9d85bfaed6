//! Cache port holding each project's task collection.

use crate::board::domain::{ProjectId, Task, TaskId};
use thiserror::Error;
use tokio::sync::broadcast;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Change notification published by a [`TaskStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A project collection was (re)populated.
    Loaded {
        /// Project whose collection was replaced.
        project_id: ProjectId,
        /// Number of tasks now cached.
        task_count: usize,
    },
    /// A single task record was written.
    TaskWritten {
        /// Project owning the task.
        project_id: ProjectId,
        /// The task as now stored.
        task: Task,
    },
    /// A project collection was dropped and must be refetched.
    Invalidated {
        /// Project whose collection was dropped.
        project_id: ProjectId,
    },
}

/// Outcome of an atomic read-modify-write on one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modification {
    /// The task is not cached for the project.
    Missing,
    /// The update function declined to write.
    Unchanged(Task),
    /// The task was replaced.
    Replaced {
        /// Value held the instant before the write.
        previous: Task,
        /// Value written.
        current: Task,
    },
}

/// Addressable, observable cache of task records keyed by project.
///
/// Operations are synchronous and in-memory from the caller's point of view.
/// Every successful write publishes a [`StoreEvent`] to subscribers.
pub trait TaskStore: Send + Sync {
    /// Returns the cached tasks of a project in insertion order.
    ///
    /// An unloaded project yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the cache is unusable.
    fn read(&self, project_id: ProjectId) -> TaskStoreResult<Vec<Task>>;

    /// Returns one cached task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the cache is unusable.
    fn get(&self, project_id: ProjectId, task_id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Inserts or replaces a task in its project collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the cache is unusable.
    fn write(&self, project_id: ProjectId, task: Task) -> TaskStoreResult<()>;

    /// Applies `update` to the cached task under the store's write lock.
    ///
    /// `update` receives the current value and returns the replacement, or
    /// `None` to leave it untouched. No other writer can interleave between
    /// the read and the write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the cache is unusable.
    fn modify(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        update: &mut dyn FnMut(&Task) -> Option<Task>,
    ) -> TaskStoreResult<Modification>;

    /// Replaces a project's whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the cache is unusable.
    fn replace_all(&self, project_id: ProjectId, tasks: Vec<Task>) -> TaskStoreResult<()>;

    /// Drops a project's collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the cache is unusable.
    fn invalidate(&self, project_id: ProjectId) -> TaskStoreResult<()>;

    /// Subscribes to change notifications.
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskStoreError {
    /// A writer panicked while holding the cache lock.
    #[error("task store lock poisoned: {0}")]
    Poisoned(String),
}
