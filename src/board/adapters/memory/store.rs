//! In-memory task cache backing the board views.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use crate::board::{
    domain::{ProjectId, Task, TaskId},
    ports::{Modification, StoreEvent, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Default number of undelivered events a slow subscriber may lag behind.
const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Thread-safe in-memory task store.
#[derive(Debug, Clone)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryStoreState>>,
    events: broadcast::Sender<StoreEvent>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    projects: HashMap<ProjectId, ProjectTasks>,
}

/// One project's collection, remembering first-insertion order.
#[derive(Debug, Default)]
struct ProjectTasks {
    order: Vec<TaskId>,
    tasks: HashMap<TaskId, Task>,
}

impl ProjectTasks {
    fn upsert(&mut self, task: Task) {
        let id = task.id();
        if self.tasks.insert(id, task).is_none() {
            self.order.push(id);
        }
    }

    fn ordered(&self) -> Vec<Task> {
        self.order
            .iter()
            .filter_map(|id| self.tasks.get(id).cloned())
            .collect()
    }
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Creates an empty store whose subscribers may lag `capacity` events.
    #[must_use]
    pub fn with_event_capacity(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState::default())),
            events,
        }
    }

    /// Sends an event. Callers hold the write lock so events follow the
    /// order in which writes were applied.
    fn publish(&self, event: StoreEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("task store event dropped, no subscribers");
        }
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(err: &impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::Poisoned(err.to_string())
}

impl TaskStore for InMemoryTaskStore {
    fn read(&self, project_id: ProjectId) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .projects
            .get(&project_id)
            .map(ProjectTasks::ordered)
            .unwrap_or_default())
    }

    fn get(&self, project_id: ProjectId, task_id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .projects
            .get(&project_id)
            .and_then(|project| project.tasks.get(&task_id))
            .cloned())
    }

    fn write(&self, project_id: ProjectId, task: Task) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state
            .projects
            .entry(project_id)
            .or_default()
            .upsert(task.clone());
        self.publish(StoreEvent::TaskWritten { project_id, task });
        Ok(())
    }

    fn modify(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        update: &mut dyn FnMut(&Task) -> Option<Task>,
    ) -> TaskStoreResult<Modification> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let Some(slot) = state
            .projects
            .get_mut(&project_id)
            .and_then(|project| project.tasks.get_mut(&task_id))
        else {
            return Ok(Modification::Missing);
        };
        let Some(current) = update(&*slot) else {
            return Ok(Modification::Unchanged(slot.clone()));
        };

        let previous = std::mem::replace(slot, current.clone());
        self.publish(StoreEvent::TaskWritten {
            project_id,
            task: current.clone(),
        });
        Ok(Modification::Replaced { previous, current })
    }

    fn replace_all(&self, project_id: ProjectId, tasks: Vec<Task>) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let mut project = ProjectTasks::default();
        for task in tasks {
            project.upsert(task);
        }
        let task_count = project.order.len();
        state.projects.insert(project_id, project);
        self.publish(StoreEvent::Loaded {
            project_id,
            task_count,
        });
        Ok(())
    }

    fn invalidate(&self, project_id: ProjectId) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.projects.remove(&project_id);
        self.publish(StoreEvent::Invalidated { project_id });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
