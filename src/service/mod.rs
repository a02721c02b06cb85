//! Service abstraction for the TaskView backend.
//!
//! This module defines the interface the orchestrator talks to, along with
//! the task data types and error handling. The REST implementation lives in
//! [`rest`]; tests substitute their own implementations of [`TaskService`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod rest;

pub use rest::RestService;

/// Reserved "no change selected" value for status-selection controls.
/// Never a real status.
pub const STATUS_SENTINEL: &str = "0";

/// Error types for service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The HTTP exchange itself failed or returned a non-success status.
    #[error("{0}")]
    Transport(String),

    /// The response body did not match the expected envelope.
    #[error("{0}")]
    Protocol(String),
}

/// A task as the backend reports it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub status: String,
}

/// Payload for creating a task; the server assigns the id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub status: String,
}

/// Service trait the orchestrator is written against.
///
/// The five operations are the only suspension points in the core; they are
/// awaited strictly in sequence during initialization.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Load the ordered set of allowed status values.
    async fn fetch_statuses(&self) -> Result<Vec<String>, ServiceError>;

    /// Load the current task list.
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ServiceError>;

    /// Create a task; returns the canonical task with its server-assigned id.
    async fn create_task(&self, draft: &NewTask) -> Result<Task, ServiceError>;

    /// Change the status of an existing task.
    async fn update_status(&self, id: i64, status: &str) -> Result<(), ServiceError>;

    /// Delete a task.
    async fn delete_task(&self, id: i64) -> Result<(), ServiceError>;
}
