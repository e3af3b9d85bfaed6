//! Shared fixtures and test doubles for board unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockall::mock;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::board::{
    domain::{Column, MemberId, ProjectId, Task, TaskId},
    ports::{RemoteTask, RemoteTaskError, RemoteTaskResult, RemoteTaskService},
};

pub const PROJECT: ProjectId = ProjectId::new(3);

mock! {
    pub Remote {}

    #[async_trait]
    impl RemoteTaskService for Remote {
        async fn set_column(
            &self,
            task_id: TaskId,
            column: Column,
            acting_member_id: MemberId,
        ) -> RemoteTaskResult<RemoteTask>;

        async fn get_task(&self, task_id: TaskId) -> RemoteTaskResult<RemoteTask>;

        async fn list_tasks(&self, project_id: ProjectId) -> RemoteTaskResult<Vec<RemoteTask>>;
    }
}

/// Builds a backlog task owned by `owner`.
pub fn task(id: u64, owner: u64) -> Task {
    Task::new(
        TaskId::new(id),
        PROJECT,
        format!("Task {id}"),
        Column::Backlog,
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().unwrap_or_default(),
    )
    .with_points(5)
    .with_assigned_member(MemberId::new(owner))
}

/// Wraps a JSON literal as a backend document.
pub fn document(value: Value) -> RemoteTask {
    RemoteTask::from_value(value).unwrap_or_default()
}

pub fn rejected() -> RemoteTaskError {
    RemoteTaskError::Rejected {
        status: 409,
        message: "column transition refused".to_owned(),
    }
}

/// Remote whose `set_column` calls block until the test releases them.
///
/// Each call takes the next gate in order and reports its arrival index.
/// `get_task` answers immediately with the document set by
/// [`GatedRemote::set_document`].
pub struct GatedRemote {
    gates: Mutex<VecDeque<oneshot::Receiver<RemoteTaskResult<RemoteTask>>>>,
    calls: Mutex<Vec<(TaskId, Column, MemberId)>>,
    arrived: mpsc::UnboundedSender<usize>,
    current: Mutex<Option<RemoteTask>>,
}

/// Test-side handles of a [`GatedRemote`].
pub struct Gates {
    pub releases: VecDeque<oneshot::Sender<RemoteTaskResult<RemoteTask>>>,
    pub arrived: mpsc::UnboundedReceiver<usize>,
}

impl GatedRemote {
    pub fn new(count: usize) -> (Self, Gates) {
        let (arrived_tx, arrived_rx) = mpsc::unbounded_channel();
        let mut receivers = VecDeque::new();
        let mut releases = VecDeque::new();
        for _ in 0..count {
            let (tx, rx) = oneshot::channel();
            releases.push_back(tx);
            receivers.push_back(rx);
        }
        (
            Self {
                gates: Mutex::new(receivers),
                calls: Mutex::new(Vec::new()),
                arrived: arrived_tx,
                current: Mutex::new(None),
            },
            Gates {
                releases,
                arrived: arrived_rx,
            },
        )
    }

    pub fn calls(&self) -> Vec<(TaskId, Column, MemberId)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn set_document(&self, document: RemoteTask) {
        *self.current.lock().expect("document lock") = Some(document);
    }
}

#[async_trait]
impl RemoteTaskService for GatedRemote {
    async fn set_column(
        &self,
        task_id: TaskId,
        column: Column,
        acting_member_id: MemberId,
    ) -> RemoteTaskResult<RemoteTask> {
        let (gate, index) = {
            let mut calls = self.calls.lock().expect("calls lock");
            calls.push((task_id, column, acting_member_id));
            let gate = self.gates.lock().expect("gates lock").pop_front();
            (gate, calls.len() - 1)
        };
        self.arrived.send(index).expect("test still listening");
        match gate {
            Some(receiver) => receiver.await.unwrap_or_else(|_| Err(rejected())),
            None => Err(rejected()),
        }
    }

    async fn get_task(&self, task_id: TaskId) -> RemoteTaskResult<RemoteTask> {
        self.current
            .lock()
            .expect("document lock")
            .clone()
            .ok_or(RemoteTaskError::NotFound(task_id))
    }

    async fn list_tasks(&self, _project_id: ProjectId) -> RemoteTaskResult<Vec<RemoteTask>> {
        Ok(Vec::new())
    }
}
