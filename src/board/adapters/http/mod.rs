//! REST adapter for the remote task port.
//!
//! Endpoints:
//!
//! - `PATCH {base}/tasks/{id}/column` with `{"column": .., "memberId": ..}`
//! - `GET {base}/tasks/{id}`
//! - `GET {base}/projects/{id}/tasks`

mod client;
mod config;

pub use client::{HttpTaskService, decode_body, decode_task_list};
pub use config::{
    API_TIMEOUT_VAR, API_TOKEN_VAR, API_URL_VAR, HttpConfigError, HttpTaskServiceConfig,
};
