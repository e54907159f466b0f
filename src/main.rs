//! member-admin binary entry point.
//!
//! Parses options, sets up logging and config, loads the member list once,
//! then runs the TUI event loop in raw mode and restores the terminal on exit.
//!
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use member_admin::Result;
use member_admin::app::keymap::Keymap;
use member_admin::app::{self, AppState, Theme};
use member_admin::cli::{Cli, init_logging};
use member_admin::error::Context;
use member_admin::members;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_dir = cli.config_dir();
    std::fs::create_dir_all(&config_dir)
        .with_ctx(|| format!("create config dir {}", config_dir.display()))?;
    init_logging(&cli.log_path())?;

    let source = cli.source();
    let (records, load_error) = members::load_or_empty(&source);

    let mut state = AppState::new(records);
    state.source_label = source.to_string();
    state.status = load_error;
    state.theme = Theme::load_or_init(&config_dir.join("theme.conf"));
    state.keymap = Keymap::load_or_init(&config_dir.join("keybinds.conf"));

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {e}"))?;

    let res = app::run(&mut terminal, &mut state);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        let message = format!("{err:#}");
        tracing::error!(error = %message, "application error");
        eprintln!("application error: {message}");
    }
    Ok(())
}
