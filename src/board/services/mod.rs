//! Application services for moving and syncing board tasks.

mod config;
mod coordinator;
mod error;
mod resolver;
mod sequence;

pub use config::CoordinatorConfig;
pub use coordinator::TaskMoveCoordinator;
pub use error::{BoardSyncError, BoardSyncResult, MoveTaskError, MoveTaskResult};
pub use resolver::{
    ColumnField, ColumnParser, ColumnResolver, ResolvedColumn, parse_column_object,
    parse_column_text, parse_column_value,
};
