//! Orchestrator component.
//!
//! Single authority for initialization order, network access, and
//! cross-component wiring. Composes the task list view and the new-task
//! dialog; turns confirmed user intents into service calls and reconciles
//! the results back into the view. All user-facing status text goes through
//! one message banner.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};
use tokio::sync::mpsc;

use crate::constants::{MSG_NO_TASKS, MSG_WAITING};
use crate::logger::Logger;
use crate::service::{NewTask, TaskService};
use crate::ui::components::dialogs::{ConfirmDialog, LogsDialog, TaskDialog};
use crate::ui::components::task_list::{change_status_prompt, delete_prompt};
use crate::ui::components::TaskListView;
use crate::ui::core::{Action, Component, EventType, PendingConfirm, SharedConfirm};
use crate::ui::layout::LayoutManager;

pub struct AppComponent {
    // Component composition
    task_list: TaskListView,
    dialog: Box<dyn TaskDialog>,

    // Services
    service: Arc<dyn TaskService>,
    logger: Logger,

    // Orchestration state
    message: Option<String>,
    create_enabled: bool,
    initialized: bool,
    statuses: Vec<String>,

    // Confirmed intents travel from the single-slot callbacks to the drain
    // loop over this channel.
    intent_tx: mpsc::UnboundedSender<Action>,
    intent_rx: mpsc::UnboundedReceiver<Action>,

    // Confirmation flow
    pending_confirm: Option<(PendingConfirm, String)>,
    confirm: SharedConfirm,

    // Simple UI state
    show_logs: bool,
    should_quit: bool,
}

impl AppComponent {
    pub fn new(service: Arc<dyn TaskService>, dialog: Box<dyn TaskDialog>) -> Self {
        let confirm = SharedConfirm::new();
        let task_list = TaskListView::new(Box::new(confirm.clone()));
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();

        Self {
            task_list,
            dialog,
            service,
            logger: Logger::new(),
            // The first frame is drawn before init() runs; the waiting banner
            // must already be up for it.
            message: Some(MSG_WAITING.to_string()),
            create_enabled: false,
            initialized: false,
            statuses: Vec::new(),
            intent_tx,
            intent_rx,
            pending_confirm: None,
            confirm,
            show_logs: false,
            should_quit: false,
        }
    }

    // ---------- Initialization ----------

    /// Run the initialization protocol: waiting banner, statuses, callback
    /// wiring, task list, empty state, create control. Strictly sequential;
    /// a statuses failure is fatal (no wiring, no list), a task-list failure
    /// degrades to an empty list.
    pub async fn init(&mut self) {
        self.set_message(MSG_WAITING);
        self.create_enabled = false;

        self.logger.log("Init: loading status set".to_string());
        let statuses = match self.service.fetch_statuses().await {
            Ok(statuses) => statuses,
            Err(e) => {
                self.logger.log(format!("Init: status load failed: {e}"));
                self.show_error(&e.to_string());
                return;
            }
        };

        self.statuses = statuses.clone();
        self.task_list.set_statuses(&statuses);
        self.dialog.set_statuses(&statuses);

        // Rows created before the status set is known would carry an empty
        // option list, so the callbacks are only wired from here on.
        self.wire_callbacks();

        self.logger.log("Init: loading task list".to_string());
        let tasks = self.service.fetch_tasks().await.unwrap_or_else(|e| {
            self.logger.log(format!("Init: task list load failed, showing empty list: {e}"));
            Vec::new()
        });
        for task in tasks {
            self.task_list.show_task(task);
        }

        self.update_empty_state();
        self.create_enabled = true;
        self.initialized = true;
        self.logger
            .log(format!("Init: done, {} tasks", self.task_list.num_tasks()));
    }

    fn wire_callbacks(&mut self) {
        let tx = self.intent_tx.clone();
        self.dialog.add_newtask_callback(Box::new(move |draft| {
            let _ = tx.send(Action::CreateTask(draft));
        }));

        let tx = self.intent_tx.clone();
        self.task_list.add_changestatus_callback(Box::new(move |id, status| {
            let _ = tx.send(Action::ChangeTaskStatus { id, status });
        }));

        let tx = self.intent_tx.clone();
        self.task_list.add_deletetask_callback(Box::new(move |id| {
            let _ = tx.send(Action::DeleteTask(id));
        }));
    }

    // ---------- Messaging ----------

    fn set_message(&mut self, text: &str) {
        self.message = Some(text.to_string());
    }

    fn clear_message(&mut self) {
        self.message = None;
    }

    fn show_error(&mut self, message: &str) {
        self.set_message(&format!("Error: {message}"));
        // Allow retry actions after any failure
        self.create_enabled = true;
    }

    fn update_empty_state(&mut self) {
        if self.task_list.num_tasks() == 0 {
            self.set_message(MSG_NO_TASKS);
        } else {
            self.clear_message();
        }
    }

    // ---------- Intent handling (callback boundary) ----------

    /// Drain the intent channel, handling each confirmed intent in order.
    pub async fn process_pending_actions(&mut self) {
        while let Ok(action) = self.intent_rx.try_recv() {
            self.handle_action(action).await;
        }
    }

    /// Handle a single action. The `CreateTask`/`ChangeTaskStatus`/
    /// `DeleteTask` variants arrive with user confirmation already given;
    /// service failures are caught here and turned into banner text, never
    /// propagated further.
    pub async fn handle_action(&mut self, action: Action) {
        match action {
            Action::CreateTask(draft) => self.handle_create(draft).await,
            Action::ChangeTaskStatus { id, status } => self.handle_change_status(id, &status).await,
            Action::DeleteTask(id) => self.handle_delete(id).await,
            Action::RequestStatusChange(id) => self.begin_confirmation(PendingConfirm::StatusChange(id)),
            Action::RequestDelete(id) => self.begin_confirmation(PendingConfirm::Delete(id)),
            Action::ConfirmPending(answer) => self.resolve_confirmation(answer),
            Action::OpenNewTaskDialog => {
                if self.create_enabled {
                    self.dialog.show();
                }
            }
            Action::CloseDialog => self.dialog.close(),
            Action::RetryInit => {
                if !self.initialized {
                    self.logger.log("Init: retrying".to_string());
                    self.init().await;
                }
            }
            Action::ShowLogs(show) => self.show_logs = show,
            Action::ClearLogs => self.logger.clear(),
            Action::Quit => self.should_quit = true,
            Action::None => {}
        }
    }

    async fn handle_create(&mut self, draft: NewTask) {
        self.logger
            .log(format!("Create: '{}' with status {}", draft.title, draft.status));
        match self.service.create_task(&draft).await {
            Ok(task) => {
                if self.task_list.has_task(task.id) {
                    // Server-assigned ids are unique; a duplicate means the
                    // view already has this row.
                    self.logger.log(format!("Create: duplicate id {}, row kept as is", task.id));
                } else {
                    self.task_list.show_task(task);
                }
                self.update_empty_state();
                self.dialog.close();
                self.clear_message();
            }
            Err(e) => {
                self.logger.log(format!("Create: failed: {e}"));
                // Dialog stays open so the draft is not lost
                self.show_error(&e.to_string());
            }
        }
    }

    async fn handle_change_status(&mut self, id: i64, status: &str) {
        self.logger.log(format!("Status: task {id} -> {status}"));
        match self.service.update_status(id, status).await {
            Ok(()) => {
                self.task_list.update_task(id, status);
                self.clear_message();
            }
            Err(e) => {
                self.logger.log(format!("Status: update failed: {e}"));
                // Row was never mutated, nothing to roll back
                self.show_error(&e.to_string());
            }
        }
    }

    async fn handle_delete(&mut self, id: i64) {
        self.logger.log(format!("Delete: task {id}"));
        match self.service.delete_task(id).await {
            Ok(()) => {
                self.task_list.remove_task(id);
                self.update_empty_state();
            }
            Err(e) => {
                self.logger.log(format!("Delete: failed: {e}"));
                self.show_error(&e.to_string());
            }
        }
    }

    // ---------- Confirmation flow ----------

    fn begin_confirmation(&mut self, pending: PendingConfirm) {
        let prompt = match &pending {
            PendingConfirm::StatusChange(id) => self
                .task_list
                .row(*id)
                .map(|row| change_status_prompt(&row.title, &row.selected)),
            PendingConfirm::Delete(id) => self.task_list.row(*id).map(|row| delete_prompt(&row.title)),
        };
        if let Some(prompt) = prompt {
            self.pending_confirm = Some((pending, prompt));
        }
    }

    /// Resolve the pending prompt. The answer is preset into the shared
    /// confirmation provider and the gated interaction is driven either way:
    /// a canceled status change must still reset the control to the sentinel.
    fn resolve_confirmation(&mut self, answer: bool) {
        if let Some((pending, _)) = self.pending_confirm.take() {
            self.confirm.preset(answer);
            match pending {
                PendingConfirm::StatusChange(id) => {
                    self.task_list.commit_selection(id);
                }
                PendingConfirm::Delete(id) => {
                    self.task_list.request_delete(id);
                }
            }
        }
    }

    // ---------- Event routing ----------

    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('a') => Action::OpenNewTaskDialog,
            KeyCode::Char('r') => Action::RetryInit,
            KeyCode::Char('G') => Action::ShowLogs(true),
            _ => Action::None,
        }
    }

    /// Process one terminal event through the component hierarchy, then
    /// drain any intents the resulting interaction produced.
    pub async fn handle_event(&mut self, event: EventType) -> anyhow::Result<()> {
        if let EventType::Key(key) = event {
            let action = if self.pending_confirm.is_some() {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => Action::ConfirmPending(true),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::ConfirmPending(false),
                    _ => Action::None,
                }
            } else if self.show_logs {
                match key.code {
                    KeyCode::Char('G') | KeyCode::Esc | KeyCode::Char('q') => Action::ShowLogs(false),
                    KeyCode::Char('c') => Action::ClearLogs,
                    _ => Action::None,
                }
            } else if self.dialog.is_visible() {
                self.dialog.handle_key_events(key)
            } else {
                let action = self.task_list.handle_key_events(key);
                if matches!(action, Action::None) {
                    self.handle_global_key(key)
                } else {
                    action
                }
            };
            self.handle_action(action).await;
        }

        self.process_pending_actions().await;
        Ok(())
    }

    // ---------- Accessors ----------

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_create_enabled(&self) -> bool {
        self.create_enabled
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    pub fn task_list(&self) -> &TaskListView {
        &self.task_list
    }

    pub fn task_list_mut(&mut self) -> &mut TaskListView {
        &mut self.task_list
    }

    pub fn dialog(&self) -> &dyn TaskDialog {
        self.dialog.as_ref()
    }

    pub fn pending_prompt(&self) -> Option<&str> {
        self.pending_confirm.as_ref().map(|(_, prompt)| prompt.as_str())
    }

    /// Preset the answer the confirmation provider will give. Used by the
    /// y/n dialog resolution; exposed for driving interactions in tests.
    pub fn preset_confirm(&self, answer: bool) {
        self.confirm.preset(answer);
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        // Events are normally routed through handle_event
        self.handle_global_key(key)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = LayoutManager::main_layout(rect);

        // Message banner: the single channel for informational and error text
        if let Some(message) = &self.message {
            let style = if message.starts_with("Error:") {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Yellow)
            };
            f.render_widget(Paragraph::new(message.clone()).style(style), chunks[0]);
        }

        self.task_list.render(f, chunks[1]);

        let help = if self.create_enabled {
            "a new task  j/k move  s select status  Enter apply  d delete  G logs  q quit"
        } else if self.initialized {
            "j/k move  s select status  Enter apply  d delete  G logs  q quit"
        } else {
            "r retry  G logs  q quit"
        };
        f.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)),
            chunks[2],
        );

        // Overlays
        if self.dialog.is_visible() {
            self.dialog.render(f, rect);
        }
        if let Some((_, prompt)) = &self.pending_confirm {
            ConfirmDialog::render(f, prompt);
        }
        if self.show_logs {
            LogsDialog::render(f, &self.logger);
        }
    }
}
