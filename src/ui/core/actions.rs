use crate::service::NewTask;

/// Actions flowing through the component hierarchy.
///
/// The `CreateTask`/`ChangeTaskStatus`/`DeleteTask` variants carry
/// already-confirmed user intent: they are only produced by the single-slot
/// callbacks wired at initialization and are handled at the orchestrator's
/// callback boundary.
#[derive(Debug, Clone)]
pub enum Action {
    // Confirmation-gated requests from the list view (not yet confirmed)
    RequestStatusChange(i64),
    RequestDelete(i64),
    ConfirmPending(bool),

    // Confirmed intents (callback boundary)
    CreateTask(NewTask),
    ChangeTaskStatus { id: i64, status: String },
    DeleteTask(i64),

    // Dialog control
    OpenNewTaskDialog,
    CloseDialog,

    // Session control
    RetryInit,
    ShowLogs(bool),
    ClearLogs,
    Quit,
    None,
}

/// What a pending confirmation prompt will resolve into.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingConfirm {
    StatusChange(i64),
    Delete(i64),
}
