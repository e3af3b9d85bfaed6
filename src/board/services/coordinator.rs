//! Optimistic task movement across Kanban columns.

use std::sync::Arc;

use mockable::Clock;
use tokio::sync::broadcast;

use super::{
    BoardSyncError, BoardSyncResult, CoordinatorConfig, MoveTaskError, MoveTaskResult,
    sequence::MoveSequencer,
};
use crate::board::{
    domain::{Column, MoveIntent, ProjectId, Session, Task, TaskId},
    ports::{
        Modification, RemoteTask, RemoteTaskError, RemoteTaskService, StoreEvent, TaskStore,
    },
};

/// Moves tasks between columns with optimistic cache updates.
///
/// A move is written to the [`TaskStore`] before the backend is asked, then
/// either reconciled with the backend's answer or rolled back. A move issued
/// later for the same task always wins over the reconciliation of an earlier
/// one when the sequence guard is enabled. If that later move is rejected,
/// the earlier one settles the board once its own answer arrives.
pub struct TaskMoveCoordinator<S, R, C>
where
    S: TaskStore,
    R: RemoteTaskService,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    remote: Arc<R>,
    clock: Arc<C>,
    session: Session,
    config: CoordinatorConfig,
    sequencer: MoveSequencer,
}

/// Snapshot pair captured by the optimistic write.
struct OptimisticWrite {
    previous: Task,
    current: Task,
    sequence: u64,
}

impl<S, R, C> TaskMoveCoordinator<S, R, C>
where
    S: TaskStore,
    R: RemoteTaskService,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator with the default configuration.
    #[must_use]
    pub fn new(store: Arc<S>, remote: Arc<R>, clock: Arc<C>, session: Session) -> Self {
        Self::with_config(store, remote, clock, session, CoordinatorConfig::default())
    }

    /// Creates a coordinator with an explicit configuration.
    #[must_use]
    pub fn with_config(
        store: Arc<S>,
        remote: Arc<R>,
        clock: Arc<C>,
        session: Session,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            store,
            remote,
            clock,
            session,
            config,
            sequencer: MoveSequencer::default(),
        }
    }

    /// Returns the session moves are authorized against.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the store this coordinator writes to.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Subscribes to changes of the underlying store.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store.subscribe()
    }

    /// Moves a task to the intent's destination column.
    ///
    /// The destination is visible in the store before the backend is
    /// contacted. On success the backend's document is merged into the
    /// cached task; on failure the pre-move task is restored.
    ///
    /// # Errors
    ///
    /// - [`MoveTaskError::NotFound`] when the task is not cached.
    /// - [`MoveTaskError::Unauthorized`] when the requesting member is
    ///   neither the task owner nor the team leader.
    /// - [`MoveTaskError::MoveRejected`] when the backend call fails.
    /// - [`MoveTaskError::Store`] when the cache is unusable.
    ///
    /// `NotFound` and `Unauthorized` are returned before any store write or
    /// network call.
    pub async fn move_task(&self, intent: MoveIntent) -> MoveTaskResult<Task> {
        let MoveIntent {
            project_id,
            task_id,
            destination_column: destination,
            requesting_member_id: member_id,
            ..
        } = intent;

        let task = self
            .store
            .get(project_id, task_id)?
            .ok_or(MoveTaskError::NotFound {
                project_id,
                task_id,
            })?;
        if intent.is_noop() {
            tracing::debug!(%task_id, column = %destination, "move is a no-op");
            return Ok(task);
        }
        if !self.session.may_move(member_id, &task) {
            tracing::debug!(%task_id, %member_id, "move refused, not owner or leader");
            return Err(MoveTaskError::Unauthorized { task_id, member_id });
        }

        let optimistic = self.apply_optimistic(intent)?;
        tracing::debug!(
            %task_id,
            from = %optimistic.previous.column(),
            to = %destination,
            sequence = optimistic.sequence,
            "optimistic move applied"
        );

        let response = self
            .remote
            .set_column(task_id, destination, member_id)
            .await;

        match response {
            Ok(document) => {
                self.reconcile(project_id, &optimistic, destination, document)
                    .await
            }
            Err(source) => self.roll_back(project_id, &optimistic, destination, source),
        }
    }

    /// Writes the destination column and captures the value it replaced.
    fn apply_optimistic(&self, intent: MoveIntent) -> MoveTaskResult<OptimisticWrite> {
        let MoveIntent {
            project_id,
            task_id,
            destination_column,
            requesting_member_id,
            ..
        } = intent;
        let mut sequence = None;
        let mut authorized = true;

        let modification = self.store.modify(project_id, task_id, &mut |current| {
            // Ownership may have changed since the pre-check.
            if !self.session.may_move(requesting_member_id, current) {
                authorized = false;
                return None;
            }
            sequence = Some(self.sequencer.issue(task_id, current.clone()));
            Some(current.moved_to(destination_column, &*self.clock))
        })?;

        match (modification, sequence) {
            (Modification::Replaced { previous, current }, Some(issued)) => {
                Ok(OptimisticWrite {
                    previous,
                    current,
                    sequence: issued,
                })
            }
            (Modification::Missing, _) => Err(MoveTaskError::NotFound {
                project_id,
                task_id,
            }),
            _ if !authorized => Err(MoveTaskError::Unauthorized {
                task_id,
                member_id: requesting_member_id,
            }),
            _ => Err(MoveTaskError::NotFound {
                project_id,
                task_id,
            }),
        }
    }

    /// Merges the backend's document into the cached task.
    async fn reconcile(
        &self,
        project_id: ProjectId,
        optimistic: &OptimisticWrite,
        destination: Column,
        document: RemoteTask,
    ) -> MoveTaskResult<Task> {
        let task_id = optimistic.current.id();
        let authoritative = self.baseline_if_empty(task_id, document).await;

        let column = match self.config.resolver.resolve(&authoritative) {
            Some(resolved) => {
                tracing::debug!(
                    %task_id,
                    field = %resolved.field,
                    column = %resolved.column,
                    "column resolved"
                );
                resolved.column
            }
            None => {
                tracing::warn!(
                    %task_id,
                    fallback = %destination,
                    "malformed move response, no recognizable column field"
                );
                destination
            }
        };
        let patch = authoritative.patch();
        let merge = |base: &Task| {
            let mut merged = base.clone();
            merged.apply_patch(patch.clone());
            merged.set_column(column);
            merged
        };

        // What this move settles to if a newer move is still in flight.
        let confirmed = merge(&optimistic.current);
        let mut settled = false;

        let modification = self.store.modify(project_id, task_id, &mut |current| {
            settled = true;
            let newest = self
                .sequencer
                .confirm(task_id, optimistic.sequence, &confirmed);
            (newest || !self.config.sequence_guard).then(|| merge(current))
        });
        if !settled {
            self.sequencer.forget(task_id, optimistic.sequence);
        }

        match modification? {
            Modification::Replaced { current, .. } => Ok(current),
            Modification::Unchanged(_) => {
                tracing::debug!(
                    %task_id,
                    sequence = optimistic.sequence,
                    "stale move response discarded"
                );
                Ok(confirmed)
            }
            Modification::Missing => {
                tracing::debug!(%task_id, %project_id, "task evicted before move settled");
                Ok(confirmed)
            }
        }
    }

    /// Restores the pre-move task and reports the rejection.
    fn roll_back(
        &self,
        project_id: ProjectId,
        optimistic: &OptimisticWrite,
        destination: Column,
        source: RemoteTaskError,
    ) -> MoveTaskResult<Task> {
        let task_id = optimistic.current.id();
        tracing::warn!(
            %task_id,
            to = %destination,
            error = %source,
            "move rejected, rolling back"
        );

        let mut settled = false;
        let modification = self.store.modify(project_id, task_id, &mut |_| {
            settled = true;
            let restore = self.sequencer.reject(task_id, optimistic.sequence);
            if self.config.sequence_guard {
                restore
            } else {
                Some(optimistic.previous.clone())
            }
        });
        if !settled {
            self.sequencer.forget(task_id, optimistic.sequence);
        }
        if matches!(modification?, Modification::Unchanged(_)) {
            tracing::debug!(%task_id, "rollback superseded by a newer move");
        }

        Err(MoveTaskError::MoveRejected {
            task_id,
            destination,
            source,
        })
    }

    /// Replaces an empty success body with a fresh fetch when configured.
    async fn baseline_if_empty(&self, task_id: TaskId, document: RemoteTask) -> RemoteTask {
        if !document.is_empty() || !self.config.refresh_on_empty_response {
            return document;
        }
        match self.remote.get_task(task_id).await {
            Ok(baseline) => baseline,
            Err(err) => {
                tracing::warn!(
                    %task_id,
                    error = %err,
                    "baseline fetch failed, keeping optimistic task"
                );
                document
            }
        }
    }

    /// Fetches a project's tasks and replaces its cached collection.
    ///
    /// Documents without an identifier or a recognizable column are
    /// skipped. Returns the tasks now cached.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError`] when the backend or the cache fails.
    pub async fn load_project(&self, project_id: ProjectId) -> BoardSyncResult<Vec<Task>> {
        let documents = self.remote.list_tasks(project_id).await?;
        let received_at = self.clock.utc();
        let tasks: Vec<Task> = documents
            .into_iter()
            .filter_map(|document| {
                let Some(resolved) = self.config.resolver.resolve(&document) else {
                    tracing::warn!(%project_id, "skipping task without a recognizable column");
                    return None;
                };
                let task =
                    Task::from_patch(project_id, document.patch(), resolved.column, received_at);
                if task.is_none() {
                    tracing::warn!(%project_id, "skipping task without an identifier");
                }
                task
            })
            .collect();

        tracing::debug!(%project_id, count = tasks.len(), "project tasks loaded");
        self.store.replace_all(project_id, tasks.clone())?;
        Ok(tasks)
    }

    /// Re-fetches one cached task and merges the backend's document.
    ///
    /// The cached column is kept when the document has no recognizable
    /// column field, and while a move of the task awaits the backend.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::NotLoaded`] when the task is not cached and
    /// [`BoardSyncError::Remote`] or [`BoardSyncError::Store`] on failure.
    pub async fn refresh_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> BoardSyncResult<Task> {
        let document = self.remote.get_task(task_id).await?;
        let column = self
            .config
            .resolver
            .resolve(&document)
            .map(|resolved| resolved.column);
        let patch = document.patch();

        let modification = self.store.modify(project_id, task_id, &mut |current| {
            let mut merged = current.clone();
            merged.apply_patch(patch.clone());
            if self.sequencer.in_flight(task_id) {
                tracing::debug!(%task_id, "move in flight, keeping optimistic column");
            } else if let Some(resolved) = column {
                merged.set_column(resolved);
            }
            Some(merged)
        })?;

        match modification {
            Modification::Replaced { current, .. } | Modification::Unchanged(current) => {
                Ok(current)
            }
            Modification::Missing => Err(BoardSyncError::NotLoaded {
                project_id,
                task_id,
            }),
        }
    }

    /// Drops a project's cached collection so the next view refetches it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Store`] when the cache is unusable.
    pub fn invalidate(&self, project_id: ProjectId) -> BoardSyncResult<()> {
        tracing::debug!(%project_id, "project tasks invalidated");
        self.store.invalidate(project_id)?;
        Ok(())
    }
}
