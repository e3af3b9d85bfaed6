//! Task record cached per project and moved across the board.

use super::{Column, MemberId, ProjectId, TaskId, TaskPatch};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A unit of work on a project's Kanban board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: String,
    column: Column,
    points: u32,
    assigned_member_id: Option<MemberId>,
    assignees: Vec<MemberId>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    deadline: Option<DateTime<Utc>>,
    criteria: Option<String>,
}

impl Task {
    /// Creates a task with the required fields and empty metadata.
    #[must_use]
    pub fn new(
        id: TaskId,
        project_id: ProjectId,
        title: impl Into<String>,
        column: Column,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            project_id,
            title: title.into(),
            description: String::new(),
            column,
            points: 0,
            assigned_member_id: None,
            assignees: Vec::new(),
            created_at,
            completed_at: None,
            deadline: None,
            criteria: None,
        }
    }

    /// Builds a task from a backend document.
    ///
    /// Returns `None` when the document carries no task identifier. Missing
    /// descriptive fields take their empty defaults and `created_at` falls
    /// back to `received_at`.
    #[must_use]
    pub fn from_patch(
        project_id: ProjectId,
        patch: TaskPatch,
        column: Column,
        received_at: DateTime<Utc>,
    ) -> Option<Self> {
        let id = patch.id?;
        let mut task = Self::new(id, project_id, String::new(), column, received_at);
        task.apply_patch(patch);
        Some(task)
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the scoring weight.
    #[must_use]
    pub const fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    /// Sets the directly assigned member.
    #[must_use]
    pub const fn with_assigned_member(mut self, member_id: MemberId) -> Self {
        self.assigned_member_id = Some(member_id);
        self
    }

    /// Sets the assignee list.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = MemberId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the acceptance criteria.
    #[must_use]
    pub fn with_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.criteria = Some(criteria.into());
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the current column.
    #[must_use]
    pub const fn column(&self) -> Column {
        self.column
    }

    /// Returns the scoring weight.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Returns the directly assigned member, if any.
    #[must_use]
    pub const fn assigned_member_id(&self) -> Option<MemberId> {
        self.assigned_member_id
    }

    /// Returns the assignee list as delivered by the backend.
    #[must_use]
    pub fn assignees(&self) -> &[MemberId] {
        &self.assignees
    }

    /// Returns the member that owns this task for authorization purposes.
    ///
    /// The direct assignment wins; otherwise only the first entry of the
    /// assignee list counts.
    #[must_use]
    pub fn canonical_owner(&self) -> Option<MemberId> {
        self.assigned_member_id
            .or_else(|| self.assignees.first().copied())
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if the task is finished.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the acceptance criteria, if any.
    #[must_use]
    pub fn criteria(&self) -> Option<&str> {
        self.criteria.as_deref()
    }

    /// Returns a copy of this task placed in `column`.
    ///
    /// Entering [`Column::Done`] stamps `completed_at` with the clock's
    /// current time; leaving it clears the stamp.
    #[must_use]
    pub fn moved_to(&self, column: Column, clock: &impl Clock) -> Self {
        let mut moved = self.clone();
        moved.column = column;
        if column.is_done() {
            if !self.column.is_done() {
                moved.completed_at = Some(clock.utc());
            }
        } else {
            moved.completed_at = None;
        }
        moved
    }

    /// Overwrites every field present in `patch`.
    ///
    /// Identity fields and the column are never taken from a patch.
    pub fn apply_patch(&mut self, patch: TaskPatch) {
        let TaskPatch {
            title,
            description,
            points,
            assigned_member_id,
            assignees,
            created_at,
            completed_at,
            deadline,
            criteria,
            ..
        } = patch;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = points {
            self.points = value;
        }
        if let Some(value) = assigned_member_id {
            self.assigned_member_id = Some(value);
        }
        if let Some(value) = assignees {
            self.assignees = value;
        }
        if let Some(value) = created_at {
            self.created_at = value;
        }
        if let Some(value) = completed_at {
            self.completed_at = Some(value);
        }
        if let Some(value) = deadline {
            self.deadline = Some(value);
        }
        if let Some(value) = criteria {
            self.criteria = Some(value);
        }
    }

    /// Replaces the column with an authoritative value.
    pub const fn set_column(&mut self, column: Column) {
        self.column = column;
    }
}
