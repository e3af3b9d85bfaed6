//! Service-level errors for board operations.

use crate::board::{
    domain::{Column, MemberId, ProjectId, TaskId},
    ports::{RemoteTaskError, TaskStoreError},
};
use thiserror::Error;

/// Errors returned by [`super::TaskMoveCoordinator::move_task`].
#[derive(Debug, Error)]
pub enum MoveTaskError {
    /// The member is neither the task owner nor the team leader.
    #[error("member {member_id} is not allowed to move task {task_id}")]
    Unauthorized {
        /// Task the member tried to move.
        task_id: TaskId,
        /// Member who tried to move it.
        member_id: MemberId,
    },

    /// The task is not in the cached collection of the project.
    #[error("task {task_id} is not loaded for project {project_id}")]
    NotFound {
        /// Project whose collection was searched.
        project_id: ProjectId,
        /// Task that was not found.
        task_id: TaskId,
    },

    /// The backend refused or failed the move; local state was rolled back.
    #[error("could not move task {task_id} to {}", .destination.display_name())]
    MoveRejected {
        /// Task that was moved.
        task_id: TaskId,
        /// Column the move attempted to reach.
        destination: Column,
        /// Backend failure.
        source: RemoteTaskError,
    },

    /// The local cache failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

impl MoveTaskError {
    /// Returns the attempted column when the move was rejected remotely.
    #[must_use]
    pub const fn attempted_destination(&self) -> Option<Column> {
        match self {
            Self::MoveRejected { destination, .. } => Some(*destination),
            _ => None,
        }
    }
}

/// Result type for task moves.
pub type MoveTaskResult<T> = Result<T, MoveTaskError>;

/// Errors returned while loading or refreshing cached tasks.
#[derive(Debug, Error)]
pub enum BoardSyncError {
    /// The backend request failed.
    #[error(transparent)]
    Remote(#[from] RemoteTaskError),

    /// The local cache failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),

    /// The refreshed task is not in the cached collection of the project.
    #[error("task {task_id} is not loaded for project {project_id}")]
    NotLoaded {
        /// Project whose collection was searched.
        project_id: ProjectId,
        /// Task that was not found.
        task_id: TaskId,
    },
}

/// Result type for load and refresh operations.
pub type BoardSyncResult<T> = Result<T, BoardSyncError>;
