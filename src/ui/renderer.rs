//! Terminal setup and the main event loop.

use std::io;
use std::sync::Arc;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::config::Config;
use crate::service::RestService;
use crate::ui::app_component::AppComponent;
use crate::ui::components::dialogs::NewTaskDialog;
use crate::ui::core::{Component, EventHandler, EventType};

pub async fn run_app(config: Config) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.ui.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let service = Arc::new(RestService::new(config.service.base_url.clone()));
    let dialog = Box::new(NewTaskDialog::new());
    let mut app = AppComponent::new(service, dialog);
    let mut event_handler = EventHandler::new();

    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    if config.ui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
) -> anyhow::Result<()> {
    // Draw one frame before initialization so the waiting banner is visible
    // while server data loads.
    terminal.draw(|f| app.render(f, f.area()))?;
    app.init().await;

    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| app.render(f, f.area()))?;
            needs_render = false;
        }

        match event_handler.next_event().await? {
            event @ (EventType::Key(_) | EventType::Resize(_, _)) => {
                app.handle_event(event).await?;
                needs_render = true;
            }
            EventType::Tick => {
                app.process_pending_actions().await;
            }
            EventType::Other => {}
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
