//! Network port persisting column changes on the backend.

use crate::board::domain::{Column, MemberId, ProjectId, TaskId, TaskPatch};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote task operations.
pub type RemoteTaskResult<T> = Result<T, RemoteTaskError>;

/// Backend task service contract.
#[async_trait]
pub trait RemoteTaskService: Send + Sync {
    /// Moves a task to `column` on behalf of `acting_member_id`.
    ///
    /// Returns the backend's authoritative task document.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteTaskError`] when the backend rejects the change or
    /// cannot be reached.
    async fn set_column(
        &self,
        task_id: TaskId,
        column: Column,
        acting_member_id: MemberId,
    ) -> RemoteTaskResult<RemoteTask>;

    /// Fetches the authoritative document of a single task.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteTaskError`] when the task cannot be fetched.
    async fn get_task(&self, task_id: TaskId) -> RemoteTaskResult<RemoteTask>;

    /// Fetches every task of a project.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteTaskError`] when the collection cannot be fetched.
    async fn list_tasks(&self, project_id: ProjectId) -> RemoteTaskResult<Vec<RemoteTask>>;
}

/// Untyped task document as returned by the backend.
///
/// The backend reports the column under varying field names and spellings,
/// so the document is kept as raw JSON until it is reconciled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteTask {
    fields: Map<String, Value>,
}

impl RemoteTask {
    /// Wraps a JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Interprets a decoded response body.
    ///
    /// `null` yields an empty document. An object holding a `data` or `task`
    /// object is unwrapped one level.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteTaskError::MalformedResponse`] when the body is not
    /// an object.
    pub fn from_value(value: Value) -> RemoteTaskResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(fields) => {
                for envelope in ["data", "task"] {
                    if let Some(Value::Object(inner)) = fields.get(envelope) {
                        return Ok(Self::new(inner.clone()));
                    }
                }
                Ok(Self::new(fields))
            }
            other => Err(RemoteTaskError::MalformedResponse(format!(
                "expected a task object, got {other}"
            ))),
        }
    }

    /// Returns `true` when the backend sent no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns a raw field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the raw JSON object.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Extracts the typed descriptive fields.
    #[must_use]
    pub fn patch(&self) -> TaskPatch {
        TaskPatch::from_fields(&self.fields)
    }
}

impl From<Map<String, Value>> for RemoteTask {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Errors returned by remote task service implementations.
#[derive(Debug, Clone, Error)]
pub enum RemoteTaskError {
    /// The backend refused the request.
    #[error("backend rejected request with status {status}: {message}")]
    Rejected {
        /// HTTP-style status code.
        status: u16,
        /// Backend-provided explanation.
        message: String,
    },

    /// The backend does not know the task.
    #[error("task not found on backend: {0}")]
    NotFound(TaskId),

    /// The backend answered with a body that is not a task document.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),

    /// The request never completed.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl RemoteTaskError {
    /// Wraps a transport failure.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
