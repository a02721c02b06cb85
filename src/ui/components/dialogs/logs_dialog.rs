//! Session log overlay.

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::logger::Logger;
use crate::ui::layout::LayoutManager;

pub struct LogsDialog;

impl LogsDialog {
    pub fn render(f: &mut Frame, logger: &Logger) {
        let area = LayoutManager::centered_rect(80, 70, f.area());
        f.render_widget(Clear, area);

        let visible = area.height.saturating_sub(2) as usize;
        let text = logger
            .get_logs()
            .into_iter()
            .take(visible)
            .collect::<Vec<_>>()
            .join("\n");

        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Logs (G close, c clear)")
                    .title_alignment(Alignment::Center),
            )
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Left);
        f.render_widget(paragraph, area);
    }
}
