//! Frame layout: header with search box, member table, action/pagination bar,
//! status bar, and modal overlays.
//!
pub mod components;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};

pub fn render(f: &mut Frame, app: &AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, root[0], app);
    table::render_members_table(f, root[1], app);
    components::render_action_bar(f, root[2], app);
    components::render_status_bar(f, root[3], app);

    if let Some(modal) = &app.modal {
        let area = f.area();
        match modal {
            ModalState::Help { scroll } => components::render_help_modal(f, area, app, *scroll),
            ModalState::ConfirmDeleteAll { selected } => {
                components::render_confirm_delete_all(f, area, app, *selected)
            }
            ModalState::Info { message } => components::render_info_modal(f, area, app, message),
        }
    }
}

fn render_header(f: &mut Frame, area: ratatui::layout::Rect, app: &AppState) {
    let searching = app.input_mode == InputMode::Search;
    let mut spans = vec![Span::styled(
        "Search: ",
        Style::default().fg(app.theme.header_fg).add_modifier(Modifier::BOLD),
    )];
    if app.search_query.is_empty() && !searching {
        spans.push(Span::styled(
            "name, email or role (press /)",
            Style::default().fg(app.theme.muted),
        ));
    } else {
        spans.push(Span::styled(
            app.search_query.clone(),
            Style::default().fg(app.theme.text),
        ));
    }
    if searching {
        spans.push(Span::styled("█", Style::default().fg(app.theme.cursor_fg)));
    }

    let title = if app.source_label.is_empty() {
        "member-admin".to_string()
    } else {
        format!("member-admin ({})", app.source_label)
    };
    let border = if searching { app.theme.cursor_fg } else { app.theme.border };
    let p = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title(Span::styled(title, Style::default().fg(app.theme.title)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .style(Style::default().bg(app.theme.header_bg));
    f.render_widget(p, area);
}
