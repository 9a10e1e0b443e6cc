//! Menu Board - Restaurant Menu Terminal Application
//!
//! Keeps a restaurant's menu of dishes, a log of every dish added or
//! deleted, and average prices per course. Data is saved locally after
//! every change.

use std::io;
use std::sync::Arc;
use std::time::Duration;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use menuboard::application::{App, AppMode, MenuRepository};
use menuboard::infrastructure::{init_logging, Config, FileStore};
use menuboard::presentation::{render_ui, InputHandler};

/// How often the screen redraws without input, which keeps the clock current.
const TICK: Duration = Duration::from_secs(1);

/// Entry point for the menu board.
///
/// Reads the configuration, opens the data directory, loads the menu and
/// history, then runs the terminal UI until the user quits.
///
/// # Errors
///
/// Returns an error if the configuration or log file cannot be set up, if
/// the stored data cannot be read, or if terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_logging(&config)?;
    info!(data_dir = %config.data_dir.display(), "starting menuboard");

    let store = Arc::new(FileStore::new(&config.data_dir));
    let menu = MenuRepository::load(store)?;
    let mut app = App::new(menu);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "terminal loop failed");
        println!("{err:?}");
    }

    info!("menuboard stopped");
    Ok(())
}

/// Main application event loop.
///
/// Redraws at least once per tick so the header clock keeps running, and
/// hands every key press to the input handler. Continues until the user
/// presses 'q' on the menu screen.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
