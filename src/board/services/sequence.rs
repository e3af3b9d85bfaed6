//! Per-task ordering of moves still awaiting the backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::board::domain::{Task, TaskId};

#[derive(Debug)]
struct PendingMove {
    sequence: u64,
    /// Value the board returns to if this move is rejected.
    restore: Task,
}

/// Tracks every move in flight, oldest first, for each task.
///
/// Only the newest pending move of a task writes its outcome to the store.
/// A rejected newest move hands that role back to its predecessor, so an
/// older move still waiting on the backend settles the board afterwards. A
/// move settling underneath a newer one passes its outcome to its successor
/// as the value to restore.
#[derive(Debug, Default)]
pub(crate) struct MoveSequencer {
    next: AtomicU64,
    pending: Mutex<HashMap<TaskId, Vec<PendingMove>>>,
}

impl MoveSequencer {
    fn pending(&self) -> MutexGuard<'_, HashMap<TaskId, Vec<PendingMove>>> {
        // The queues stay consistent even if a holder panicked.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issues a new sequence number for a move replacing `restore`.
    pub(crate) fn issue(&self, task_id: TaskId, restore: Task) -> u64 {
        let sequence = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        self.pending()
            .entry(task_id)
            .or_default()
            .push(PendingMove { sequence, restore });
        sequence
    }

    /// Returns `true` while any move of the task awaits the backend.
    pub(crate) fn in_flight(&self, task_id: TaskId) -> bool {
        self.pending().contains_key(&task_id)
    }

    /// Settles a move the backend accepted.
    ///
    /// Returns `true` when the move is the newest pending one and its result
    /// should be written. That also retires every older move of the task,
    /// whose answers are superseded. An older confirmed move becomes its
    /// successor's restore value instead.
    pub(crate) fn confirm(&self, task_id: TaskId, sequence: u64, confirmed: &Task) -> bool {
        let mut pending = self.pending();
        let Some(moves) = pending.get_mut(&task_id) else {
            return false;
        };
        let Some(index) = moves.iter().position(|entry| entry.sequence == sequence) else {
            return false;
        };

        if index + 1 == moves.len() {
            pending.remove(&task_id);
            return true;
        }
        moves.remove(index);
        if let Some(successor) = moves.get_mut(index) {
            successor.restore = confirmed.clone();
        }
        false
    }

    /// Settles a move the backend rejected.
    ///
    /// Returns the value to restore when the move is the newest pending one.
    /// Otherwise the move's restore value passes to its successor and `None`
    /// is returned.
    pub(crate) fn reject(&self, task_id: TaskId, sequence: u64) -> Option<Task> {
        let mut pending = self.pending();
        let moves = pending.get_mut(&task_id)?;
        let index = moves.iter().position(|entry| entry.sequence == sequence)?;
        let rejected = moves.remove(index);

        let restore = match moves.get_mut(index) {
            Some(successor) => {
                successor.restore = rejected.restore;
                None
            }
            None => Some(rejected.restore),
        };
        if moves.is_empty() {
            pending.remove(&task_id);
        }
        restore
    }

    /// Drops a move whose task left the store before it settled.
    pub(crate) fn forget(&self, task_id: TaskId, sequence: u64) {
        let mut pending = self.pending();
        let Some(moves) = pending.get_mut(&task_id) else {
            return;
        };
        moves.retain(|entry| entry.sequence != sequence);
        if moves.is_empty() {
            pending.remove(&task_id);
        }
    }
}
