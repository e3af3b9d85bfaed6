//! Port contracts for the board client.
//!
//! Ports define the cache and network boundaries used by board services.

pub mod remote;
pub mod store;

pub use remote::{RemoteTask, RemoteTaskError, RemoteTaskResult, RemoteTaskService};
pub use store::{Modification, StoreEvent, TaskStore, TaskStoreError, TaskStoreResult};
