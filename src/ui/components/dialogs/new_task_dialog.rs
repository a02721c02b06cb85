//! New task dialog component.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::TaskDialog;
use crate::service::NewTask;
use crate::ui::core::{Action, Component};
use crate::ui::layout::LayoutManager;

type NewTaskCallback = Box<dyn FnMut(NewTask)>;

/// Modal form for drafting a new task: a title input plus a status picker
/// fed from the server's status set.
pub struct NewTaskDialog {
    visible: bool,
    title_input: String,
    statuses: Vec<String>,
    status_index: usize,
    on_newtask: Option<NewTaskCallback>,
}

impl NewTaskDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            title_input: String::new(),
            statuses: Vec::new(),
            status_index: 0,
            on_newtask: None,
        }
    }

    fn selected_status(&self) -> Option<&String> {
        self.statuses.get(self.status_index)
    }

    fn submit(&mut self) {
        let title = self.title_input.trim().to_string();
        if title.is_empty() {
            return;
        }
        let Some(status) = self.selected_status().cloned() else {
            return;
        };
        if let Some(callback) = self.on_newtask.as_mut() {
            callback(NewTask { title, status });
        }
        // The dialog stays open; the orchestrator closes it once the server
        // confirms the creation.
    }
}

impl Default for NewTaskDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskDialog for NewTaskDialog {
    fn show(&mut self) {
        self.visible = true;
        log::info!("New task dialog opened");
    }

    fn close(&mut self) {
        self.visible = false;
        self.title_input.clear();
        self.status_index = 0;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_statuses(&mut self, statuses: &[String]) {
        self.statuses = statuses.to_vec();
        self.status_index = 0;
    }

    fn add_newtask_callback(&mut self, callback: NewTaskCallback) {
        self.on_newtask = Some(callback);
    }
}

impl Component for NewTaskDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::CloseDialog,
            KeyCode::Enter => {
                self.submit();
                Action::None
            }
            KeyCode::Tab => {
                if !self.statuses.is_empty() {
                    self.status_index = (self.status_index + 1) % self.statuses.len();
                }
                Action::None
            }
            KeyCode::Backspace => {
                self.title_input.pop();
                Action::None
            }
            KeyCode::Char(c) => {
                self.title_input.push(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, _rect: Rect) {
        if !self.visible {
            return;
        }

        let dialog_area = LayoutManager::centered_rect(60, 30, f.area());
        f.render_widget(Clear, dialog_area);

        let title_rect = Rect::new(
            dialog_area.x + 2,
            dialog_area.y + 1,
            dialog_area.width.saturating_sub(4),
            3,
        );
        let title_text = if self.title_input.is_empty() {
            "Enter task title: "
        } else {
            &self.title_input
        };
        let title_paragraph = Paragraph::new(title_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("New Task")
                    .title_alignment(Alignment::Center),
            )
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Left);
        f.render_widget(title_paragraph, title_rect);

        let status_rect = Rect::new(
            dialog_area.x + 2,
            title_rect.y + 4,
            dialog_area.width.saturating_sub(4),
            3,
        );
        let status_text = match self.selected_status() {
            Some(status) => format!("Status: {}", status),
            None => "Status: (none available)".to_string(),
        };
        let status_paragraph = Paragraph::new(status_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Status (Tab to change)")
                    .title_alignment(Alignment::Center),
            )
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status_paragraph, status_rect);

        let instructions_y = status_rect.y + 4;
        if instructions_y < dialog_area.y + dialog_area.height {
            let instructions_rect = Rect::new(
                dialog_area.x + 2,
                instructions_y,
                dialog_area.width.saturating_sub(4),
                1,
            );
            let instructions = Paragraph::new("Press Enter to create, Esc to cancel")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            f.render_widget(instructions, instructions_rect);
        }
    }
}
