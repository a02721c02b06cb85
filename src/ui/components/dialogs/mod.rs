//! Dialog components rendered over the main layout.

pub mod confirm_dialog;
pub mod logs_dialog;
pub mod new_task_dialog;

pub use confirm_dialog::ConfirmDialog;
pub use logs_dialog::LogsDialog;
pub use new_task_dialog::NewTaskDialog;

use crate::service::NewTask;
use crate::ui::core::Component;

/// Contract the orchestrator consumes the "new task" dialog through.
///
/// The dialog owns its form state; the orchestrator only opens and closes it,
/// feeds it the status set, and registers the single create-intent handler.
pub trait TaskDialog: Component {
    fn show(&mut self);

    fn close(&mut self);

    fn is_visible(&self) -> bool;

    /// Propagate the allowed status set to the form's status picker.
    fn set_statuses(&mut self, statuses: &[String]);

    /// Register the create-intent handler, invoked with the drafted task when
    /// the user submits. Single slot, last registration wins.
    fn add_newtask_callback(&mut self, callback: Box<dyn FnMut(NewTask)>);
}
