//! Domain model for the Kanban board client.
//!
//! Tasks, columns, the signed-in session and move intents live here with no
//! knowledge of caching or transport.

mod column;
mod error;
mod ids;
mod intent;
mod patch;
mod session;
mod task;

pub use column::Column;
pub use error::ParseColumnError;
pub use ids::{MemberId, ProjectId, TaskId};
pub use intent::MoveIntent;
pub use patch::TaskPatch;
pub use session::Session;
pub use task::Task;
