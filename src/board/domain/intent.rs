//! Request-scoped description of a drag-and-drop move.

use super::{Column, MemberId, ProjectId, TaskId};

/// A single requested column change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    /// Project whose task collection holds the task.
    pub project_id: ProjectId,
    /// Task being moved.
    pub task_id: TaskId,
    /// Column the task was dragged from.
    pub source_column: Column,
    /// Column the task was dropped on.
    pub destination_column: Column,
    /// Member performing the move.
    pub requesting_member_id: MemberId,
}

impl MoveIntent {
    /// Creates a move intent.
    #[must_use]
    pub const fn new(
        project_id: ProjectId,
        task_id: TaskId,
        source_column: Column,
        destination_column: Column,
        requesting_member_id: MemberId,
    ) -> Self {
        Self {
            project_id,
            task_id,
            source_column,
            destination_column,
            requesting_member_id,
        }
    }

    /// Returns `true` when the task was dropped on its own column.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.source_column == self.destination_column
    }
}
