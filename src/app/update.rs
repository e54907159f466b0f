use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;
use tracing::info;

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState};
use crate::search::apply_search;
use crate::ui;

/// Whether the event loop should keep running after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key(app, key) == Flow::Quit
        {
            break;
        }
    }
    info!("quit");
    Ok(())
}

/// Apply one key press to the application state.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Flow::Quit;
    }
    match app.input_mode {
        InputMode::Normal => return handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key),
        InputMode::Edit => handle_edit_key(app, key),
        InputMode::Modal => handle_modal_key(app, key.code),
    }
    Flow::Continue
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    app.status = None;
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::OpenHelp => open_modal(app, ModalState::Help { scroll: 0 }),
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::ToggleSelect => {
            if let Some(id) = app.cursor_member().map(|m| m.id) {
                app.toggle_selection(id);
            }
        }
        KeyAction::TogglePageSelect => app.toggle_page_selection(),
        KeyAction::ClearSelection => app.clear_selection(),
        KeyAction::DeleteSelected => {
            if app.selected_ids.is_empty() {
                app.set_status("Nothing selected");
            } else {
                let removed = app.delete_selected();
                app.set_status(format!("Deleted {removed} member(s)"));
            }
        }
        KeyAction::DeleteAll => {
            if app.members_all.is_empty() {
                app.set_status("There is nothing to delete");
            } else {
                open_modal(app, ModalState::ConfirmDeleteAll { selected: 1 });
            }
        }
        KeyAction::EditRow => {
            if let Some(id) = app.cursor_member().map(|m| m.id) {
                app.begin_edit(id);
            }
        }
        KeyAction::MoveUp => app.move_up(),
        KeyAction::MoveDown => app.move_down(),
        KeyAction::FirstPage => app.first_page(),
        KeyAction::PrevPage => app.prev_page(),
        KeyAction::NextPage => app.next_page(),
        KeyAction::LastPage => app.last_page(),
        KeyAction::Ignore => {}
    }
    Flow::Continue
}

// Ctrl and Alt chords are never text; Shift still types.
fn is_text(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

// Every keystroke re-filters; Enter keeps the query, Esc drops it.
fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Down => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_query.clear();
            apply_search(app);
        }
        KeyCode::Backspace => {
            if app.search_query.pop().is_some() {
                apply_search(app);
            }
        }
        KeyCode::Char(c) if is_text(&key) => {
            app.search_query.push(c);
            apply_search(app);
        }
        _ => {}
    }
}

fn handle_edit_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.save_edit(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Tab | KeyCode::Right => app.edit_next_field(),
        KeyCode::BackTab | KeyCode::Left => app.edit_prev_field(),
        KeyCode::Backspace => app.edit_backspace(),
        KeyCode::Char(c) if is_text(&key) => app.edit_input(c),
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    let help_max = ui::components::help_max_scroll(app);
    match &mut app.modal {
        Some(ModalState::Help { scroll }) => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {
                close_modal(app)
            }
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1).min(help_max),
            _ => {}
        },
        Some(ModalState::ConfirmDeleteAll { selected }) => match code {
            KeyCode::Esc | KeyCode::Char('n') => close_modal(app),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                *selected = if *selected == 0 { 1 } else { 0 };
            }
            KeyCode::Char('y') => confirm_delete_all(app),
            KeyCode::Enter => {
                if *selected == 0 {
                    confirm_delete_all(app);
                } else {
                    close_modal(app);
                }
            }
            _ => {}
        },
        Some(ModalState::Info { .. }) => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter) {
                close_modal(app);
            }
        }
        None => app.input_mode = InputMode::Normal,
    }
}

fn confirm_delete_all(app: &mut AppState) {
    let removed = app.members_all.len();
    app.delete_all();
    app.modal = Some(ModalState::Info {
        message: format!("Deleted all {removed} member(s)."),
    });
}

fn open_modal(app: &mut AppState, modal: ModalState) {
    app.modal = Some(modal);
    app.input_mode = InputMode::Modal;
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Normal;
}
