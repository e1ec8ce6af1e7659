//! Terminal UI: main entry point and event loop.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

use std::io;
use std::time::Duration;

use crossterm::event::{poll as ct_poll, read as ct_read, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use self::app::App;
use crate::command::Mailbox;
use crate::config::Config;

/// Run the TUI application over `mailbox`. Blocks until the user quits.
pub fn run_tui(mailbox: Mailbox, config: &Config) -> anyhow::Result<()> {
    let app = App::new(mailbox, config)?;

    // Setup terminal (alternate screen)
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, app);

    // Restore terminal (always, even on error)
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop: render → poll → handle → repeat.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| {
            ui::render(frame, &mut app);
        })?;

        if ct_poll(tick_rate)? {
            if let Event::Key(key) = ct_read()? {
                if key.kind == KeyEventKind::Press {
                    event::handle_key_event(&mut app, key)?;
                }
            }
        }

        // Apply engine events, expire status messages
        app.tick();

        if app.should_quit {
            break;
        }
    }

    tracing::info!("TUI closed");
    Ok(())
}
