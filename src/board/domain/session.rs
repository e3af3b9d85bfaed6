//! Explicit client session context and the move authorization rule.

use super::{MemberId, Task};

/// The signed-in member on whose behalf the client acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    current_member_id: MemberId,
    is_team_leader: bool,
}

impl Session {
    /// Creates a session for a regular team member.
    #[must_use]
    pub const fn member(current_member_id: MemberId) -> Self {
        Self {
            current_member_id,
            is_team_leader: false,
        }
    }

    /// Creates a session for a team leader.
    #[must_use]
    pub const fn leader(current_member_id: MemberId) -> Self {
        Self {
            current_member_id,
            is_team_leader: true,
        }
    }

    /// Returns the signed-in member.
    #[must_use]
    pub const fn current_member_id(&self) -> MemberId {
        self.current_member_id
    }

    /// Returns `true` when the signed-in member leads their team.
    #[must_use]
    pub const fn is_team_leader(&self) -> bool {
        self.is_team_leader
    }

    /// Returns `true` when `member_id` is the team leader of this session.
    #[must_use]
    pub fn is_leader(&self, member_id: MemberId) -> bool {
        self.is_team_leader && self.current_member_id == member_id
    }

    /// Returns `true` when `member_id` may move `task`.
    ///
    /// The task's canonical owner and the team leader may move it; nobody
    /// else may.
    #[must_use]
    pub fn may_move(&self, member_id: MemberId, task: &Task) -> bool {
        task.canonical_owner() == Some(member_id) || self.is_leader(member_id)
    }
}
