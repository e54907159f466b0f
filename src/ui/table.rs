use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::{AppState, EditState, InputMode};
use crate::members::{Member, MemberField};

pub fn render_members_table(f: &mut Frame, area: Rect, app: &AppState) {
    let title = format!(
        "Members ({} shown of {})",
        app.members.len(),
        app.members_all.len()
    );
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(app.theme.title)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    if app.members.is_empty() {
        let msg = if app.members_all.is_empty() {
            "No members loaded."
        } else {
            "No members match the search."
        };
        let p = Paragraph::new(msg)
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let show_cursor = matches!(app.input_mode, InputMode::Normal | InputMode::Edit);
    let rows = app.page_rows().iter().enumerate().map(|(i, m)| {
        let editing = app.editing.as_ref().filter(|e| e.id == m.id);
        let mut style = Style::default().fg(app.theme.text);
        if app.is_selected(m.id) {
            style = style.bg(app.theme.selected_bg);
        }
        if show_cursor && i == app.cursor {
            style = style.fg(app.theme.cursor_fg).add_modifier(Modifier::BOLD);
        }
        member_row(app, m, editing).style(style)
    });

    let widths = [
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Percentage(30),
        Constraint::Percentage(40),
        Constraint::Length(10),
        Constraint::Length(6),
    ];
    let header = Row::new(vec!["", "ID", "Name", "Email", "Role", "Action"]).style(
        Style::default()
            .fg(app.theme.header_fg)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

fn member_row<'a>(app: &AppState, m: &'a Member, editing: Option<&EditState>) -> Row<'a> {
    let checkbox = if app.is_selected(m.id) { "[x]" } else { "[ ]" };
    let mut cells = vec![Cell::from(checkbox), Cell::from(m.id.to_string())];
    match editing {
        Some(edit) => {
            for field in MemberField::ALL {
                cells.push(edit_cell(app, m.field(field).to_string(), field == edit.field));
            }
            cells.push(Cell::from("Save"));
        }
        None => {
            cells.push(Cell::from(m.name.as_str()));
            cells.push(Cell::from(m.email.as_str()));
            cells.push(Cell::from(m.role.as_str()));
            cells.push(Cell::from("Edit"));
        }
    }
    Row::new(cells)
}

// Input look: focused field gets a caret and underline.
fn edit_cell(app: &AppState, value: String, focused: bool) -> Cell<'static> {
    let style = Style::default().fg(app.theme.edit_fg);
    if focused {
        Cell::from(Line::from(vec![
            Span::styled(value, style.add_modifier(Modifier::UNDERLINED)),
            Span::styled("▏", style),
        ]))
    } else {
        Cell::from(Span::styled(value, style))
    }
}
