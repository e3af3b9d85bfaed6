//! Tunables for the task move coordinator.

use super::ColumnResolver;

/// Configuration for [`super::TaskMoveCoordinator`].
///
/// # Examples
///
/// ```
/// use sprintboard::board::services::CoordinatorConfig;
///
/// let config = CoordinatorConfig::default();
/// assert!(config.sequence_guard);
///
/// let racy = CoordinatorConfig::last_response_wins();
/// assert!(!racy.sequence_guard);
/// ```
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Discard reconciliations and rollbacks superseded by a newer move of
    /// the same task.
    pub sequence_guard: bool,
    /// Priority list used to read the column out of backend documents.
    pub resolver: ColumnResolver,
    /// Fetch the task again when a move succeeds with an empty body.
    pub refresh_on_empty_response: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            sequence_guard: true,
            resolver: ColumnResolver::default(),
            refresh_on_empty_response: true,
        }
    }
}

impl CoordinatorConfig {
    /// Applies every response as it arrives, even when superseded.
    #[must_use]
    pub fn last_response_wins() -> Self {
        Self {
            sequence_guard: false,
            ..Self::default()
        }
    }

    /// Replaces the column resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: ColumnResolver) -> Self {
        self.resolver = resolver;
        self
    }
}
