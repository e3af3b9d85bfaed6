//! Typed view of the descriptive fields in a backend task document.

use super::{MemberId, TaskId};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Fields the backend reported for a task, each optional.
///
/// The backend is inconsistent about spelling, so every field is looked up
/// under its camelCase and snake_case names. Fields that are present but do
/// not decode (a malformed date, a negative point value) are treated as
/// absent rather than failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Task identifier.
    pub id: Option<TaskId>,
    /// Title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Scoring weight.
    pub points: Option<u32>,
    /// Directly assigned member.
    pub assigned_member_id: Option<MemberId>,
    /// Assignee list.
    pub assignees: Option<Vec<MemberId>>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Acceptance criteria.
    pub criteria: Option<String>,
}

impl TaskPatch {
    /// Extracts the known task fields from a JSON object.
    #[must_use]
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            id: lookup(fields, &["id", "taskId", "task_id"]),
            title: lookup(fields, &["title"]),
            description: lookup(fields, &["description"]),
            points: lookup(fields, &["points"]),
            // `memberId` names the acting member of a move, never the owner.
            assigned_member_id: lookup(fields, &["assignedMemberId", "assigned_member_id"]),
            assignees: lookup_assignees(fields),
            created_at: lookup(fields, &["createdAt", "created_at"]),
            completed_at: lookup(fields, &["completedAt", "completed_at"]),
            deadline: lookup(fields, &["deadline"]),
            criteria: lookup(fields, &["criteria"]),
        }
    }
}

/// Returns the first listed field that is present, non-null and decodes.
fn lookup<T: DeserializeOwned>(fields: &Map<String, Value>, names: &[&str]) -> Option<T> {
    names
        .iter()
        .filter_map(|name| fields.get(*name))
        .filter(|value| !value.is_null())
        .find_map(|value| serde_json::from_value(value.clone()).ok())
}

/// Accepts either a list of member ids or a list of `{ "id": .. }` objects.
fn lookup_assignees(fields: &Map<String, Value>) -> Option<Vec<MemberId>> {
    let entries = fields.get("assignees")?.as_array()?;
    let ids = entries
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(member) => lookup(member, &["id", "memberId", "member_id"]),
            other => serde_json::from_value(other.clone()).ok(),
        })
        .collect();
    Some(ids)
}
