//! Confirmation prompt dialog.

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::layout::LayoutManager;

/// Renders the pending confirmation prompt. The y/n answer is collected by
/// the orchestrator's key handling, not here.
pub struct ConfirmDialog;

impl ConfirmDialog {
    pub fn render(f: &mut Frame, prompt: &str) {
        let confirm_area = LayoutManager::centered_rect(60, 25, f.area());
        f.render_widget(Clear, confirm_area);

        let confirm_text = format!("{prompt}\n\nPress 'y' to confirm or 'n'/Esc to cancel");
        let confirm_paragraph = Paragraph::new(confirm_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Confirm")
                    .title_alignment(Alignment::Center),
            )
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(confirm_paragraph, confirm_area);
    }
}
