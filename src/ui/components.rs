//! Shared UI components (status bar, action bar, modal dialogs).
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode};
use crate::pagination;

/// Render the bottom status bar with mode, counts and the last status message.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Edit => "EDIT",
        InputMode::Modal => "MODAL",
    };
    let mut msg = format!(
        "mode: {mode}  members:{}  shown:{}  selected:{}  page:{}/{}",
        app.members_all.len(),
        app.members.len(),
        app.selected_ids.len(),
        app.current_page,
        app.page_count()
    );
    if let Some(status) = &app.status {
        msg.push_str("  | ");
        msg.push_str(status);
    }
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

fn button(label: impl Into<String>, enabled: bool, app: &AppState) -> Span<'static> {
    let style = if enabled {
        Style::default()
            .fg(app.theme.header_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.muted)
    };
    Span::styled(format!("[{}]", label.into()), style)
}

/// Render the bulk-delete buttons and the pagination controls.
pub fn render_action_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let page = app.current_page;
    let len = app.members.len();
    let selected = app.selected_ids.len();
    let line = Line::from(vec![
        button(format!("Delete Selected ({selected})"), selected > 0, app),
        Span::raw(" "),
        button("Delete All", !app.members_all.is_empty(), app),
        Span::raw("  "),
        Span::styled(
            format!("Page {page} of {}", app.page_count()),
            Style::default().fg(app.theme.text),
        ),
        Span::raw("  "),
        button("First", true, app),
        Span::raw(" "),
        button("Prev", pagination::has_prev(page), app),
        Span::raw(" "),
        button("Next", pagination::has_next(page, len), app),
        Span::raw(" "),
        button("Last", true, app),
    ]);
    let p = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    let width = 44u16.min(area.width.saturating_sub(4)).max(20);
    let approx_lines = (message.len() as u16 / width.saturating_sub(4).max(10)).max(1);
    let height = (approx_lines + 4).min(area.height.saturating_sub(2)).max(5);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(format!("{message}\n\nEnter / Esc to close"))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Info")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

pub fn render_confirm_delete_all(f: &mut Frame, area: Rect, app: &AppState, selected: usize) {
    let rect = centered_rect(50, 7, area);
    let yes = if selected == 0 { "[Yes]" } else { " Yes " };
    let no = if selected == 1 { "[No]" } else { " No " };
    let body = format!(
        "Delete all {} member(s)? This cannot be undone.\n\n      {yes}    {no}",
        app.members_all.len()
    );
    let p = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Confirm delete")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

const HELP_SECTIONS: [(&str, &[(KeyAction, &str)]); 3] = [
    (
        "General",
        &[
            (KeyAction::StartSearch, "Search"),
            (KeyAction::OpenHelp, "Help"),
            (KeyAction::Quit, "Quit"),
        ],
    ),
    (
        "Rows",
        &[
            (KeyAction::MoveUp, "Move up"),
            (KeyAction::MoveDown, "Move down"),
            (KeyAction::ToggleSelect, "Select row"),
            (KeyAction::TogglePageSelect, "Select page"),
            (KeyAction::ClearSelection, "Clear selection"),
            (KeyAction::EditRow, "Edit row"),
            (KeyAction::DeleteSelected, "Delete selected"),
            (KeyAction::DeleteAll, "Delete all"),
        ],
    ),
    (
        "Pages",
        &[
            (KeyAction::FirstPage, "First page"),
            (KeyAction::PrevPage, "Previous page"),
            (KeyAction::NextPage, "Next page"),
            (KeyAction::LastPage, "Last page"),
        ],
    ),
];

fn help_lines(app: &AppState) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let label_w = 18usize;
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (section, entries) in HELP_SECTIONS {
        lines.push(Line::from(Span::styled(format!("{section}:"), bold)));
        for (action, label) in entries {
            let keys = app.keymap.keys_for(*action);
            if keys.is_empty() {
                continue;
            }
            lines.push(Line::from(vec![
                Span::raw(format!("  {label:>label_w$} │ ")),
                Span::styled(keys.join(", "), italic),
            ]));
        }
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(Span::styled("Search / Edit:", bold)));
    for (label, value) in [
        ("Type", "filter or edit text"),
        ("Enter", "apply search / save row"),
        ("Esc", "clear search / cancel edit"),
        ("Tab, Shift+Tab", "next / previous field"),
    ] {
        lines.push(Line::from(vec![
            Span::raw(format!("  {label:>label_w$} │ ")),
            Span::styled(value, italic),
        ]));
    }
    lines
}

/// Last useful scroll offset of the help modal: its final line at the top.
pub fn help_max_scroll(app: &AppState) -> u16 {
    u16::try_from(help_lines(app).len().saturating_sub(1)).unwrap_or(u16::MAX)
}

/// Render the help modal built from the active keymap.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 30u16.min(area.height.saturating_sub(2)).max(10);
    let rect = centered_rect(width, height, area);

    let p = Paragraph::new(help_lines(app))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
