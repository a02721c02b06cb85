//! REST implementation of the TaskView service contract.
//!
//! All endpoints return a JSON envelope carrying a `responseStatus` flag;
//! envelope validation is kept in plain parse functions so it can be tested
//! without a server.

use std::sync::RwLock;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{NewTask, ServiceError, Task, TaskService};

/// Default service base URL. The original widget used the relative `./api`;
/// a standalone client needs an absolute one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Deserialize)]
struct StatusesEnvelope {
    #[serde(rename = "responseStatus", default)]
    response_status: bool,
    #[serde(default)]
    allstatuses: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct TaskListEnvelope {
    #[serde(rename = "responseStatus", default)]
    response_status: bool,
    #[serde(default)]
    tasks: Option<Vec<Task>>,
}

#[derive(Deserialize)]
struct CreatedTaskEnvelope {
    #[serde(rename = "responseStatus", default)]
    response_status: bool,
    #[serde(default)]
    task: Option<Task>,
}

#[derive(Deserialize)]
struct AckEnvelope {
    #[serde(rename = "responseStatus", default)]
    response_status: bool,
}

/// Parse the `/allstatuses` response body.
pub fn parse_statuses(body: &str) -> Result<Vec<String>, ServiceError> {
    let envelope: StatusesEnvelope =
        serde_json::from_str(body).map_err(|_| ServiceError::Protocol("Failed to load statuses.".to_string()))?;
    match (envelope.response_status, envelope.allstatuses) {
        (true, Some(statuses)) => Ok(statuses),
        _ => Err(ServiceError::Protocol("Failed to load statuses.".to_string())),
    }
}

/// Parse the `/tasklist` response body.
pub fn parse_tasks(body: &str) -> Result<Vec<Task>, ServiceError> {
    let envelope: TaskListEnvelope =
        serde_json::from_str(body).map_err(|_| ServiceError::Protocol("Failed to load task list.".to_string()))?;
    match (envelope.response_status, envelope.tasks) {
        (true, Some(tasks)) => Ok(tasks),
        _ => Err(ServiceError::Protocol("Failed to load task list.".to_string())),
    }
}

/// Parse the `POST /task` response body; the created task must carry a
/// numeric server-assigned id.
pub fn parse_created_task(body: &str) -> Result<Task, ServiceError> {
    let envelope: CreatedTaskEnvelope =
        serde_json::from_str(body).map_err(|_| ServiceError::Protocol("Failed to add task.".to_string()))?;
    match (envelope.response_status, envelope.task) {
        (true, Some(task)) => Ok(task),
        _ => Err(ServiceError::Protocol("Failed to add task.".to_string())),
    }
}

/// Parse a bare acknowledgement envelope (update/delete responses).
pub fn parse_ack(body: &str, failure_message: &str) -> Result<(), ServiceError> {
    let envelope: AckEnvelope =
        serde_json::from_str(body).map_err(|_| ServiceError::Protocol(failure_message.to_string()))?;
    if envelope.response_status {
        Ok(())
    } else {
        Err(ServiceError::Protocol(failure_message.to_string()))
    }
}

/// REST client for the TaskView service.
///
/// The base URL is shared mutable state with a single read path, re-read on
/// every operation, so it can be reconfigured mid-session.
pub struct RestService {
    client: reqwest::Client,
    base_url: RwLock<String>,
}

impl RestService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: RwLock::new(base_url.into()),
        }
    }

    /// Replace the base URL for all subsequent operations.
    pub fn set_base_url(&self, base_url: impl Into<String>) {
        if let Ok(mut url) = self.base_url.write() {
            *url = base_url.into();
        }
    }

    fn url(&self, path: &str) -> String {
        let base = self
            .base_url
            .read()
            .map(|url| url.clone())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        format!("{}/{}", base.trim_end_matches('/'), path)
    }

    /// Execute a request and return the response body, mapping HTTP-level
    /// failures to [`ServiceError::Transport`].
    async fn exchange(&self, request: reqwest::RequestBuilder) -> Result<String, ServiceError> {
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Transport(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))
    }
}

#[async_trait]
impl TaskService for RestService {
    async fn fetch_statuses(&self) -> Result<Vec<String>, ServiceError> {
        let body = self.exchange(self.client.get(self.url("allstatuses"))).await?;
        parse_statuses(&body)
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        let body = self.exchange(self.client.get(self.url("tasklist"))).await?;
        parse_tasks(&body)
    }

    async fn create_task(&self, draft: &NewTask) -> Result<Task, ServiceError> {
        let body = self
            .exchange(self.client.post(self.url("task")).json(draft))
            .await?;
        parse_created_task(&body)
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<(), ServiceError> {
        let body = self
            .exchange(
                self.client
                    .put(self.url(&format!("task/{id}")))
                    .json(&json!({ "status": status })),
            )
            .await?;
        parse_ack(&body, "Failed to update task status.")
    }

    async fn delete_task(&self, id: i64) -> Result<(), ServiceError> {
        let body = self
            .exchange(self.client.delete(self.url(&format!("task/{id}"))))
            .await?;
        parse_ack(&body, "Failed to delete task.")
    }
}
