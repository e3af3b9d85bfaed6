//! Shared world state for task move BDD scenarios.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rstest::fixture;
use sprintboard::board::{
    adapters::memory::InMemoryTaskStore,
    domain::{Column, MemberId, ProjectId, Session, Task, TaskId},
    ports::{RemoteTask, RemoteTaskError, RemoteTaskResult, RemoteTaskService, TaskStore},
    services::MoveTaskError,
};

/// Project every scenario works in.
pub const PROJECT: ProjectId = ProjectId::new(1);

/// Backend double that answers from a script and records what it saw.
pub struct ScriptedRemote {
    store: Arc<InMemoryTaskStore>,
    pub response: Mutex<Option<RemoteTaskResult<RemoteTask>>>,
    pub calls: Mutex<Vec<(TaskId, Column, MemberId)>>,
    pub columns_seen: Mutex<Vec<Option<Column>>>,
}

impl ScriptedRemote {
    fn new(store: Arc<InMemoryTaskStore>) -> Self {
        Self {
            store,
            response: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            columns_seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RemoteTaskService for ScriptedRemote {
    async fn set_column(
        &self,
        task_id: TaskId,
        column: Column,
        acting_member_id: MemberId,
    ) -> RemoteTaskResult<RemoteTask> {
        let seen = self
            .store
            .get(PROJECT, task_id)
            .ok()
            .flatten()
            .map(|task| task.column());
        if let Ok(mut columns) = self.columns_seen.lock() {
            columns.push(seen);
        }
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((task_id, column, acting_member_id));
        }
        self.response
            .lock()
            .ok()
            .and_then(|mut response| response.take())
            .unwrap_or_else(|| Ok(RemoteTask::default()))
    }

    async fn get_task(&self, task_id: TaskId) -> RemoteTaskResult<RemoteTask> {
        Err(RemoteTaskError::NotFound(task_id))
    }

    async fn list_tasks(&self, _project_id: ProjectId) -> RemoteTaskResult<Vec<RemoteTask>> {
        Ok(Vec::new())
    }
}

/// Scenario world for task move behaviour tests.
pub struct TaskMoveWorld {
    pub store: Arc<InMemoryTaskStore>,
    pub remote: Arc<ScriptedRemote>,
    pub session: Option<Session>,
    pub last_move_result: Option<Result<Task, MoveTaskError>>,
}

impl TaskMoveWorld {
    /// Creates a world with an empty store and no scripted response.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let remote = Arc::new(ScriptedRemote::new(Arc::clone(&store)));
        Self {
            store,
            remote,
            session: None,
            last_move_result: None,
        }
    }
}

impl Default for TaskMoveWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskMoveWorld {
    TaskMoveWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a column named in a scenario.
pub fn column(raw: &str) -> Result<Column, eyre::Report> {
    Column::try_from(raw).map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))
}
