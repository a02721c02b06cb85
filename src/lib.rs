//! TaskView - a terminal client for the TaskView task-management service
//!
//! The client lists tasks fetched from a backend, lets the user create a
//! task, change its status from a server-provided allowed set, or delete it,
//! and reflects the outcomes in the view. Statuses are loaded once per
//! session before any task row exists; create, status-change, and delete
//! only mutate the view after the backend confirms.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`service`] - Service contract and the REST client
//! * [`logger`] - Session log and file logging
//! * [`ui`] - Terminal user interface components

/// Configuration module for managing application settings
pub mod config;

/// User-facing messages and default values
pub mod constants;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Backend service contract, data types, and the REST implementation
pub mod service;

/// Terminal user interface components and rendering
pub mod ui;

pub use service::{NewTask, ServiceError, Task, TaskService};
