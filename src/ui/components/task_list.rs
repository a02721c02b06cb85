//! Task list view: a keyed row collection with confirmation-gated mutation.
//!
//! The view owns no network knowledge. Rows are keyed by task id; the
//! status-selection control of every row is cloned from a shared template at
//! row-creation time, so a later `set_statuses` call does not touch rows that
//! already exist. Status changes and deletions fire single-slot callbacks
//! after the user confirms; the rows themselves are only mutated by explicit
//! `update_task` / `remove_task` calls from the orchestrator.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::constants::STATUS_SENTINEL_LABEL;
use crate::service::{Task, STATUS_SENTINEL};
use crate::ui::core::{Action, Component, Confirmation, StaticConfirm};

type ChangeStatusCallback = Box<dyn FnMut(i64, String)>;
type DeleteTaskCallback = Box<dyn FnMut(i64)>;

/// Prompt text for a status-change confirmation.
pub fn change_status_prompt(title: &str, status: &str) -> String {
    format!("Change status of \"{title}\" to {status}?")
}

/// Prompt text for a delete confirmation.
pub fn delete_prompt(title: &str) -> String {
    format!("Delete task \"{title}\"?")
}

/// One rendered task row.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub status: String,
    /// Option set of the row's status-selection control, sentinel first.
    /// Snapshot of the shared template at row creation.
    pub options: Vec<String>,
    /// Current value of the selection control.
    pub selected: String,
}

impl TaskRow {
    /// User-visible label of the control's current value.
    pub fn selected_label(&self) -> &str {
        if self.selected == STATUS_SENTINEL {
            STATUS_SENTINEL_LABEL
        } else {
            &self.selected
        }
    }
}

pub struct TaskListView {
    rows: Vec<TaskRow>,
    status_template: Vec<String>,
    on_change_status: Option<ChangeStatusCallback>,
    on_delete_task: Option<DeleteTaskCallback>,
    confirm: Box<dyn Confirmation>,
    cursor: usize,
}

impl TaskListView {
    pub fn new(confirm: Box<dyn Confirmation>) -> Self {
        Self {
            rows: Vec::new(),
            status_template: vec![STATUS_SENTINEL.to_string()],
            on_change_status: None,
            on_delete_task: None,
            confirm,
            cursor: 0,
        }
    }

    /// View that auto-confirms every prompt. Only useful in scripted flows.
    pub fn with_auto_confirm() -> Self {
        Self::new(Box::new(StaticConfirm(true)))
    }

    /// Replace the shared status template: sentinel first, then one entry per
    /// status in the given order. Existing rows keep the options they were
    /// created with.
    pub fn set_statuses(&mut self, statuses: &[String]) {
        let mut template = Vec::with_capacity(statuses.len() + 1);
        template.push(STATUS_SENTINEL.to_string());
        template.extend(statuses.iter().cloned());
        self.status_template = template;
    }

    /// Register the status-change handler. Single slot: a second registration
    /// replaces the first.
    pub fn add_changestatus_callback(&mut self, callback: ChangeStatusCallback) {
        self.on_change_status = Some(callback);
    }

    /// Register the delete handler. Single slot, last registration wins.
    pub fn add_deletetask_callback(&mut self, callback: DeleteTaskCallback) {
        self.on_delete_task = Some(callback);
    }

    /// Add a task row at the top of the list. Duplicate ids are the caller's
    /// responsibility.
    pub fn show_task(&mut self, task: Task) {
        let row = TaskRow {
            id: task.id,
            title: task.title,
            status: task.status,
            options: self.status_template.clone(),
            selected: STATUS_SENTINEL.to_string(),
        };
        self.rows.insert(0, row);
    }

    /// Update the status of a task in the view. Unknown ids are a no-op.
    pub fn update_task(&mut self, id: i64, status: &str) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.status = status.to_string();
            row.selected = status.to_string();
        }
    }

    /// Remove a task row. Unknown ids are a no-op.
    pub fn remove_task(&mut self, id: i64) {
        self.rows.retain(|r| r.id != id);
        if self.cursor >= self.rows.len() && self.cursor > 0 {
            self.cursor = self.rows.len() - 1;
        }
    }

    pub fn num_tasks(&self) -> usize {
        self.rows.len()
    }

    pub fn has_task(&self, id: i64) -> bool {
        self.rows.iter().any(|r| r.id == id)
    }

    pub fn row(&self, id: i64) -> Option<&TaskRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn rows(&self) -> &[TaskRow] {
        &self.rows
    }

    pub fn cursor_row(&self) -> Option<&TaskRow> {
        self.rows.get(self.cursor)
    }

    /// Set the row's selection control to `value` and run the confirmation
    /// gate, mirroring a change event on the control. Whatever the outcome,
    /// the control ends up back on the sentinel: it must never be left
    /// showing an unconfirmed selection. Returns true if the callback fired.
    pub fn select_status(&mut self, id: i64, value: &str) -> bool {
        if value == STATUS_SENTINEL {
            return false;
        }
        let prompt = match self.rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.selected = value.to_string();
                change_status_prompt(&row.title, value)
            }
            None => return false,
        };

        let confirmed = self.confirm.confirm(&prompt);

        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.selected = STATUS_SENTINEL.to_string();
        }
        if confirmed {
            if let Some(callback) = self.on_change_status.as_mut() {
                callback(id, value.to_string());
                return true;
            }
        }
        false
    }

    /// Run the confirmation gate on the row's currently selected value.
    pub fn commit_selection(&mut self, id: i64) -> bool {
        let Some(value) = self.row(id).map(|r| r.selected.clone()) else {
            return false;
        };
        self.select_status(id, &value)
    }

    /// Ask to delete the row; fires the delete callback on confirmation. The
    /// row itself stays until the orchestrator calls `remove_task`.
    pub fn request_delete(&mut self, id: i64) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id == id) else {
            return false;
        };
        let prompt = delete_prompt(&row.title);

        if self.confirm.confirm(&prompt) {
            if let Some(callback) = self.on_delete_task.as_mut() {
                callback(id);
                return true;
            }
        }
        false
    }

    /// Advance the cursor row's selection control to its next option,
    /// wrapping past the end. View-local; nothing fires until commit.
    fn cycle_selection(&mut self) {
        if let Some(row) = self.rows.get_mut(self.cursor) {
            let current = row.options.iter().position(|o| *o == row.selected).unwrap_or(0);
            let next = (current + 1) % row.options.len();
            row.selected = row.options[next].clone();
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.rows.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.rows.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
    }
}

impl Component for TaskListView {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursor(1);
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursor(-1);
                Action::None
            }
            KeyCode::Char('s') => {
                self.cycle_selection();
                Action::None
            }
            KeyCode::Enter => match self.cursor_row() {
                Some(row) if row.selected != STATUS_SENTINEL => Action::RequestStatusChange(row.id),
                _ => Action::None,
            },
            KeyCode::Char('d') | KeyCode::Delete => match self.cursor_row() {
                Some(row) => Action::RequestDelete(row.id),
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let header = Row::new([Cell::from("Task"), Cell::from("Status"), Cell::from("Change")])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let style = if index == self.cursor {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new([
                    Cell::from(row.title.clone()),
                    Cell::from(row.status.clone()),
                    Cell::from(format!("[{}]", row.selected_label())),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(50),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Tasks")
                .title_alignment(Alignment::Center),
        );

        f.render_widget(table, rect);
    }
}
