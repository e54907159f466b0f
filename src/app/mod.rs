//! Application state types and entry glue.
//!
//! [`AppState`] owns the loaded records and everything derived from them:
//! the search-filtered list, the current page, the row cursor, the selection
//! set and the row being edited. All mutations go through methods here so the
//! derived view is re-computed after every change.
//!
pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::members::{Member, MemberField};
use crate::pagination;
use crate::search::filter_members;
use keymap::Keymap;

pub const APP_NAME: &str = "member-admin";

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Edit,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub cursor_fg: Color,
    pub selected_bg: Color,
    pub edit_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::nord()
    }
}

impl Theme {
    /// Nord palette, the default.
    pub fn nord() -> Self {
        Self {
            text: Color::Rgb(0xd8, 0xde, 0xe9),
            muted: Color::Rgb(0x4c, 0x56, 0x6a),
            title: Color::Rgb(0x88, 0xc0, 0xd0),
            border: Color::Rgb(0x43, 0x4c, 0x5e),
            header_bg: Color::Rgb(0x2e, 0x34, 0x40),
            header_fg: Color::Rgb(0x81, 0xa1, 0xc1),
            status_bg: Color::Rgb(0x3b, 0x42, 0x52),
            status_fg: Color::Rgb(0xec, 0xef, 0xf4),
            cursor_fg: Color::Rgb(0xeb, 0xcb, 0x8b),
            selected_bg: Color::Rgb(0x43, 0x4c, 0x5e),
            edit_fg: Color::Rgb(0xa3, 0xbe, 0x8c),
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "border" => &mut self.border,
            "header_bg" => &mut self.header_bg,
            "header_fg" => &mut self.header_fg,
            "status_bg" => &mut self.status_bg,
            "status_fg" => &mut self.status_fg,
            "cursor_fg" => &mut self.cursor_fg,
            "selected_bg" => &mut self.selected_bg,
            "edit_fg" => &mut self.edit_fg,
            _ => return None,
        })
    }

    fn entries(&self) -> [(&'static str, Color); 11] {
        [
            ("text", self.text),
            ("muted", self.muted),
            ("title", self.title),
            ("border", self.border),
            ("header_bg", self.header_bg),
            ("header_fg", self.header_fg),
            ("status_bg", self.status_bg),
            ("status_fg", self.status_fg),
            ("cursor_fg", self.cursor_fg),
            ("selected_bg", self.selected_bg),
            ("edit_fg", self.edit_fg),
        ]
    }

    /// Load a theme from `key = value` lines. Unknown keys and bad colors are skipped.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::default();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            if let (Some(slot), Some(color)) = (theme.slot_mut(key.trim()), parse_color(val)) {
                *slot = color;
            }
        }
        Some(theme)
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# member-admin theme\n");
        buf.push_str("# Colors: #RRGGBB, RRGGBB or 'reset'\n\n");
        for (key, color) in self.entries() {
            let _ = writeln!(&mut buf, "{key} = {}", color_to_str(color));
        }
        std::fs::write(path, buf)
    }

    /// Read the theme at `path`, writing the default palette there first if it is missing.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let theme = Self::default();
        if let Err(e) = theme.write_file(path) {
            debug!(path = %path.display(), error = %e, "could not write default theme");
        }
        theme
    }
}

fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_str(c: Color) -> String {
    match c {
        Color::Rgb(r, g, b) => format!("#{r:02X}{g:02X}{b:02X}"),
        _ => "reset".to_string(),
    }
}

/// Directory holding `theme.conf`, `keybinds.conf` and the log file.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Modal dialogs drawn over the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    Help { scroll: u16 },
    /// 0 = Yes, 1 = No.
    ConfirmDeleteAll { selected: usize },
    Info { message: String },
}

/// The row currently in inline-edit mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditState {
    pub id: u64,
    pub field: MemberField,
    /// Record as it was when editing started, restored on cancel.
    pub original: Member,
}

pub struct AppState {
    pub source_label: String,
    pub members_all: Vec<Member>,
    /// `members_all` filtered by `search_query`; never edited directly.
    pub members: Vec<Member>,
    pub selected_ids: BTreeSet<u64>,
    /// 1-based.
    pub current_page: usize,
    /// Row index inside the current page.
    pub cursor: usize,
    pub input_mode: InputMode,
    pub search_query: String,
    pub editing: Option<EditState>,
    pub modal: Option<ModalState>,
    pub status: Option<String>,
    pub theme: Theme,
    pub keymap: Keymap,
}

impl AppState {
    /// Create a state over `members` with the default theme and keybindings.
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            source_label: String::new(),
            members: members.clone(),
            members_all: members,
            selected_ids: BTreeSet::new(),
            current_page: 1,
            cursor: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            editing: None,
            modal: None,
            status: None,
            theme: Theme::default(),
            keymap: Keymap::default(),
        }
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(self.members.len())
    }

    /// Rows of the filtered list visible on the current page.
    pub fn page_rows(&self) -> &[Member] {
        let (start, end) = pagination::page_bounds(self.current_page, self.members.len());
        &self.members[start..end]
    }

    pub fn cursor_member(&self) -> Option<&Member> {
        self.page_rows().get(self.cursor)
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.selected_ids.contains(&id)
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Re-derive the filtered list after the records changed, keeping the page where possible.
    pub fn refresh_view(&mut self) {
        self.members = filter_members(&self.members_all, &self.search_query);
        self.clamp_position();
        self.finish_edit_if_hidden();
    }

    fn clamp_position(&mut self) {
        self.current_page = pagination::clamp_page(self.current_page, self.members.len());
        let rows = pagination::page_len(self.current_page, self.members.len());
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    /// Save the running edit when its row is no longer part of the filtered list.
    pub(crate) fn finish_edit_if_hidden(&mut self) {
        let Some(edit) = &self.editing else {
            return;
        };
        let id = edit.id;
        if !self.members.iter().any(|m| m.id == id) {
            self.save_edit();
            self.set_status(format!("Saved #{id}; it no longer matches the search"));
        }
    }

    // ----- selection -----

    pub fn toggle_selection(&mut self, id: u64) {
        if !self.selected_ids.remove(&id) {
            self.selected_ids.insert(id);
        }
    }

    /// Select every row on the page, or clear them if they are all selected already.
    pub fn toggle_page_selection(&mut self) {
        let ids: Vec<u64> = self.page_rows().iter().map(|m| m.id).collect();
        if ids.is_empty() {
            return;
        }
        if ids.iter().all(|id| self.selected_ids.contains(id)) {
            for id in &ids {
                self.selected_ids.remove(id);
            }
        } else {
            self.selected_ids.extend(ids);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    // ----- deletion -----

    /// Remove every selected record. Returns how many records were removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.selected_ids.is_empty() {
            return 0;
        }
        let before = self.members_all.len();
        let selected = std::mem::take(&mut self.selected_ids);
        self.members_all.retain(|m| !selected.contains(&m.id));
        if let Some(edit) = &self.editing
            && selected.contains(&edit.id)
        {
            self.editing = None;
            self.input_mode = InputMode::Normal;
        }
        self.refresh_view();
        let removed = before - self.members_all.len();
        info!(removed, remaining = self.members_all.len(), "deleted selected members");
        removed
    }

    pub fn delete_all(&mut self) {
        let removed = self.members_all.len();
        self.members_all.clear();
        self.members.clear();
        self.selected_ids.clear();
        self.editing = None;
        self.current_page = 1;
        self.cursor = 0;
        info!(removed, "deleted all members");
    }

    // ----- inline edit -----

    /// Start editing the record with `id`. A row already being edited is saved first.
    pub fn begin_edit(&mut self, id: u64) -> bool {
        let Some(member) = self.members_all.iter().find(|m| m.id == id).cloned() else {
            return false;
        };
        if self.editing.is_some() {
            self.save_edit();
        }
        debug!(id, "begin edit");
        self.editing = Some(EditState {
            id,
            field: MemberField::Name,
            original: member,
        });
        self.input_mode = InputMode::Edit;
        true
    }

    fn edited_member_mut(&mut self) -> Option<(&mut Member, MemberField)> {
        let edit = self.editing.as_ref()?;
        let (id, field) = (edit.id, edit.field);
        self.members_all
            .iter_mut()
            .find(|m| m.id == id)
            .map(|m| (m, field))
    }

    pub fn edit_input(&mut self, c: char) {
        if let Some((member, field)) = self.edited_member_mut() {
            member.field_mut(field).push(c);
            self.refresh_view();
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Some((member, field)) = self.edited_member_mut() {
            member.field_mut(field).pop();
            self.refresh_view();
        }
    }

    pub fn edit_next_field(&mut self) {
        if let Some(edit) = &mut self.editing {
            edit.field = edit.field.next();
        }
    }

    pub fn edit_prev_field(&mut self) {
        if let Some(edit) = &mut self.editing {
            edit.field = edit.field.prev();
        }
    }

    /// Leave edit mode keeping the current field values.
    pub fn save_edit(&mut self) {
        if let Some(edit) = self.editing.take() {
            debug!(id = edit.id, "saved edit");
        }
        self.input_mode = InputMode::Normal;
    }

    /// Leave edit mode restoring the values from before the edit started.
    pub fn cancel_edit(&mut self) {
        let Some(edit) = self.editing.take() else {
            return;
        };
        if let Some(member) = self.members_all.iter_mut().find(|m| m.id == edit.id) {
            *member = edit.original;
        }
        self.input_mode = InputMode::Normal;
        self.refresh_view();
        debug!(id = edit.id, "cancelled edit");
    }

    // ----- navigation -----

    pub fn first_page(&mut self) {
        self.goto_page(1);
    }

    pub fn prev_page(&mut self) {
        if pagination::has_prev(self.current_page) {
            self.goto_page(self.current_page - 1);
        }
    }

    pub fn next_page(&mut self) {
        if pagination::has_next(self.current_page, self.members.len()) {
            self.goto_page(self.current_page + 1);
        }
    }

    pub fn last_page(&mut self) {
        self.goto_page(self.page_count());
    }

    fn goto_page(&mut self, page: usize) {
        let page = pagination::clamp_page(page, self.members.len());
        if page != self.current_page {
            self.current_page = page;
            self.cursor = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        } else if pagination::has_prev(self.current_page) {
            self.current_page -= 1;
            self.cursor = pagination::PAGE_SIZE - 1;
        }
    }

    pub fn move_down(&mut self) {
        let rows = self.page_rows().len();
        if self.cursor + 1 < rows {
            self.cursor += 1;
        } else if pagination::has_next(self.current_page, self.members.len()) {
            self.current_page += 1;
            self.cursor = 0;
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
