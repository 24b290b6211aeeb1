//! Full-screen terminal interface.
//!
//! Six screens (see [`View`]) share one event loop. Gateway calls run on
//! worker threads and report back over a channel; the loop polls keys every
//! 100 ms, drains finished work and advances the breathing timer.
//!
//! Keys:
//! - Tab / Shift+Tab: cycle screens
//! - Esc: back to Home (quit from Home)
//! - Q: quit on screens without text input
//! - Ctrl+C: quit

pub mod app;
pub mod input;
pub mod ui;
pub mod views;
pub mod worker;

pub use app::CosmosApp;
pub use input::{format_birth_date_input, format_birth_time_input};
pub use views::View;

use crate::error::CosmosError;
use crate::gateway::Gateway;
use crate::storage::RitualJournal;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::info;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Result type for TUI operations.
pub type TuiResult<T> = std::result::Result<T, TuiError>;

/// Error types for the TUI.
#[derive(Debug)]
pub enum TuiError {
    /// IO error from terminal operations
    Io(io::Error),
    Cosmos(CosmosError),
}

impl std::fmt::Display for TuiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuiError::Io(e) => write!(f, "IO error: {}", e),
            TuiError::Cosmos(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TuiError {}

impl From<io::Error> for TuiError {
    fn from(err: io::Error) -> Self {
        TuiError::Io(err)
    }
}

impl From<CosmosError> for TuiError {
    fn from(err: CosmosError) -> Self {
        TuiError::Cosmos(err)
    }
}

impl From<TuiError> for CosmosError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(e) => CosmosError::Terminal(e.to_string()),
            TuiError::Cosmos(e) => e,
        }
    }
}

/// Initialize the terminal for TUI mode.
pub fn init_terminal() -> TuiResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> TuiResult<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut CosmosApp,
) -> TuiResult<()> {
    loop {
        app.poll_workers();
        app.tick(Instant::now());
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release or repeat)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Run the TUI until the user quits.
pub fn run_tui(gateway: Gateway, journal: RitualJournal) -> crate::error::Result<()> {
    // Restore the terminal before the default hook prints the panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    info!(available = gateway.is_available(), "starting tui");
    let mut terminal = init_terminal()?;
    let mut app = CosmosApp::new(gateway, journal);

    let result = event_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    info!("tui closed");
    result.map_err(CosmosError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_error_display() {
        let err = TuiError::Io(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(err.to_string(), "IO error: boom");
        let err = TuiError::Cosmos(CosmosError::Unconfigured);
        assert_eq!(err.to_string(), "Chave de API não configurada.");
    }

    #[test]
    fn test_tui_error_into_cosmos_error() {
        let err: CosmosError = TuiError::Io(io::Error::new(io::ErrorKind::Other, "tty")).into();
        assert!(matches!(err, CosmosError::Terminal(_)));
    }
}
