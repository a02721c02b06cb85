//! UI components

pub mod dialogs;
pub mod task_list;

pub use task_list::{TaskListView, TaskRow};
