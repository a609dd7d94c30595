use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use dragon_dance::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::fs::File;
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;

/// Environment variable naming the debug log file.
const LOG_ENV: &str = "DRAGON_DANCE_LOG";

/// Log to the file named by `DRAGON_DANCE_LOG`, if set. The TUI owns the
/// terminal, so there is no terminal logger.
fn init_logging() -> io::Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = File::create(path)?;
    simplelog::WriteLogger::init(log::LevelFilter::Debug, config, file)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "dragon-dance TUI requires a real terminal (TTY).\nRun in Terminal and press q to quit. Version: {}",
            dragon_dance::VERSION
        );
        return Ok(());
    }
    init_logging()?;
    log::info!("dragon-dance {} starting", dragon_dance::VERSION);
    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(100);
    let mut app = AppState::default();

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
