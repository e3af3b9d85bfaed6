//! `reqwest` implementation of the remote task port.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use super::HttpTaskServiceConfig;
use crate::board::{
    domain::{Column, MemberId, ProjectId, TaskId},
    ports::{RemoteTask, RemoteTaskError, RemoteTaskResult, RemoteTaskService},
};

/// Remote task service talking to the REST backend.
#[derive(Debug, Clone)]
pub struct HttpTaskService {
    config: HttpTaskServiceConfig,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetColumnBody<'a> {
    column: &'a str,
    member_id: MemberId,
}

impl HttpTaskService {
    /// Builds a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteTaskError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: HttpTaskServiceConfig) -> RemoteTaskResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RemoteTaskError::transport)?;
        Ok(Self { config, http })
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpTaskServiceConfig {
        &self.config
    }

    /// Joins `path` onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    fn auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> RemoteTaskResult<(StatusCode, String)> {
        let response = self
            .auth(request)
            .send()
            .await
            .map_err(RemoteTaskError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(RemoteTaskError::transport)?;
        Ok((status, body))
    }

    async fn fetch_task(
        &self,
        task_id: TaskId,
        request: reqwest::RequestBuilder,
    ) -> RemoteTaskResult<RemoteTask> {
        let (status, body) = self.send(request).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteTaskError::NotFound(task_id));
        }
        RemoteTask::from_value(decode_body(status.as_u16(), &body)?)
    }
}

#[async_trait]
impl RemoteTaskService for HttpTaskService {
    async fn set_column(
        &self,
        task_id: TaskId,
        column: Column,
        acting_member_id: MemberId,
    ) -> RemoteTaskResult<RemoteTask> {
        let url = self.endpoint(&format!("tasks/{task_id}/column"));
        let body = SetColumnBody {
            column: column.display_name(),
            member_id: acting_member_id,
        };
        tracing::debug!(%task_id, column = column.display_name(), "PATCH {url}");
        self.fetch_task(task_id, self.http.patch(url).json(&body)).await
    }

    async fn get_task(&self, task_id: TaskId) -> RemoteTaskResult<RemoteTask> {
        let url = self.endpoint(&format!("tasks/{task_id}"));
        tracing::debug!(%task_id, "GET {url}");
        self.fetch_task(task_id, self.http.get(url)).await
    }

    async fn list_tasks(&self, project_id: ProjectId) -> RemoteTaskResult<Vec<RemoteTask>> {
        let url = self.endpoint(&format!("projects/{project_id}/tasks"));
        tracing::debug!(%project_id, "GET {url}");
        let (status, body) = self.send(self.http.get(url)).await?;
        decode_task_list(decode_body(status.as_u16(), &body)?)
    }
}

/// Turns a raw response into JSON, mapping non-2xx statuses to rejections.
///
/// A successful empty body decodes to `null`.
///
/// # Errors
///
/// Returns [`RemoteTaskError::Rejected`] for non-2xx statuses and
/// [`RemoteTaskError::MalformedResponse`] for bodies that are not JSON.
pub fn decode_body(status: u16, body: &str) -> RemoteTaskResult<Value> {
    if !(200..300).contains(&status) {
        return Err(RemoteTaskError::Rejected {
            status,
            message: rejection_message(body),
        });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|err| RemoteTaskError::MalformedResponse(err.to_string()))
}

/// Accepts a bare array or an object wrapping one under `data` or `tasks`.
///
/// # Errors
///
/// Returns [`RemoteTaskError::MalformedResponse`] when no task list is found
/// or an entry is not an object.
pub fn decode_task_list(value: Value) -> RemoteTaskResult<Vec<RemoteTask>> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Null => Vec::new(),
        Value::Object(mut fields) => {
            let wrapped = ["data", "tasks"]
                .into_iter()
                .find_map(|key| match fields.remove(key) {
                    Some(Value::Array(entries)) => Some(entries),
                    _ => None,
                });
            wrapped.ok_or_else(|| {
                RemoteTaskError::MalformedResponse("expected a task list".to_owned())
            })?
        }
        other => {
            return Err(RemoteTaskError::MalformedResponse(format!(
                "expected a task list, got {other}"
            )));
        }
    };
    entries
        .into_iter()
        .map(|entry| match entry {
            Value::Object(fields) => Ok(RemoteTask::new(fields)),
            other => Err(RemoteTaskError::MalformedResponse(format!(
                "expected a task object, got {other}"
            ))),
        })
        .collect()
}

/// Extracts `message` or `error` from a JSON error body, else the raw text.
fn rejection_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["message", "error"]
            .into_iter()
            .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_owned))
    });
    from_json.unwrap_or_else(|| body.trim().to_owned())
}
