//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Only normal mode goes through the keymap. Search and edit modes read raw
//! characters, and modals use fixed keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Semantic keyboard actions available in normal mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Show the help and keybindings reference.
    OpenHelp,
    /// Focus the search box.
    StartSearch,
    /// Toggle the checkbox of the row under the cursor.
    ToggleSelect,
    /// Select or deselect every row on the current page.
    TogglePageSelect,
    ClearSelection,
    /// Delete every selected row.
    DeleteSelected,
    /// Delete all rows (asks for confirmation).
    DeleteAll,
    /// Inline-edit the row under the cursor.
    EditRow,
    MoveUp,
    MoveDown,
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    /// Swallow the key.
    Ignore,
}

const ACTION_NAMES: [(KeyAction, &str); 16] = [
    (KeyAction::Quit, "Quit"),
    (KeyAction::OpenHelp, "OpenHelp"),
    (KeyAction::StartSearch, "StartSearch"),
    (KeyAction::ToggleSelect, "ToggleSelect"),
    (KeyAction::TogglePageSelect, "TogglePageSelect"),
    (KeyAction::ClearSelection, "ClearSelection"),
    (KeyAction::DeleteSelected, "DeleteSelected"),
    (KeyAction::DeleteAll, "DeleteAll"),
    (KeyAction::EditRow, "EditRow"),
    (KeyAction::MoveUp, "MoveUp"),
    (KeyAction::MoveDown, "MoveDown"),
    (KeyAction::FirstPage, "FirstPage"),
    (KeyAction::PrevPage, "PrevPage"),
    (KeyAction::NextPage, "NextPage"),
    (KeyAction::LastPage, "LastPage"),
    (KeyAction::Ignore, "Ignore"),
];

/// Mapping from `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Default bindings: arrows and vim keys to move, h/l to page, Space to select.
    pub fn new_defaults() -> Self {
        use KeyAction as A;
        use KeyCode::*;
        use KeyModifiers as M;
        let bindings = HashMap::from([
            ((M::NONE, Char('q')), A::Quit),
            ((M::CONTROL, Char('c')), A::Quit),
            ((M::NONE, Char('?')), A::OpenHelp),
            ((M::NONE, Char('/')), A::StartSearch),
            ((M::NONE, Char(' ')), A::ToggleSelect),
            ((M::NONE, Char('a')), A::TogglePageSelect),
            ((M::NONE, Esc), A::ClearSelection),
            ((M::NONE, Char('d')), A::DeleteSelected),
            ((M::NONE, Delete), A::DeleteSelected),
            ((M::NONE, Char('D')), A::DeleteAll),
            ((M::NONE, Char('e')), A::EditRow),
            ((M::NONE, Enter), A::EditRow),
            ((M::NONE, Up), A::MoveUp),
            ((M::NONE, Char('k')), A::MoveUp),
            ((M::NONE, Down), A::MoveDown),
            ((M::NONE, Char('j')), A::MoveDown),
            ((M::NONE, Home), A::FirstPage),
            ((M::NONE, Char('g')), A::FirstPage),
            ((M::NONE, Left), A::PrevPage),
            ((M::NONE, Char('h')), A::PrevPage),
            ((M::NONE, PageUp), A::PrevPage),
            ((M::NONE, Right), A::NextPage),
            ((M::NONE, Char('l')), A::NextPage),
            ((M::NONE, PageDown), A::NextPage),
            ((M::NONE, End), A::LastPage),
            ((M::NONE, Char('G')), A::LastPage),
        ]);
        Self { bindings }
    }

    /// Load the keymap at `path`, writing the defaults there first if it is missing.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            debug!(path = %path.display(), error = %e, "could not write default keybinds");
        }
        km
    }

    /// Parse `<Action> = <KeySpec>` lines on top of the defaults.
    ///
    /// Returns `None` only when the file cannot be read; bad lines are skipped.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::from_config_str(&contents))
    }

    pub fn from_config_str(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => debug!(line, "skipping unrecognised keybinding"),
            }
        }
        map
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# member-admin keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Space, Enter, Esc, Up, Down, Left, Right, Home, End, PageUp, PageDown, Delete\n");
        let names: Vec<&str> = ACTION_NAMES.iter().map(|(_, n)| *n).collect();
        let _ = writeln!(&mut buf, "# Actions: {}\n", names.join(", "));

        let mut entries = self.all_bindings();
        entries.sort_by_key(|((mods, code), action)| (*action, Self::format_key(*mods, *code)));
        for ((mods, code), action) in entries {
            let _ = writeln!(&mut buf, "{} = {}", format_action(action), Self::format_key(mods, code));
        }
        std::fs::write(path, buf)
    }

    /// Resolve a key event. Shifted characters fall back to their unmodified binding,
    /// since terminals disagree on whether `D` arrives with SHIFT set.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        if let Some(action) = self.bindings.get(&(key.modifiers, key.code)) {
            return Some(*action);
        }
        if key.modifiers == KeyModifiers::SHIFT && matches!(key.code, KeyCode::Char(_)) {
            return self.bindings.get(&(KeyModifiers::NONE, key.code)).copied();
        }
        None
    }

    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Keys bound to `action`, formatted and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys
    }

    /// Human-readable spec like "Ctrl+c", "Space", "PageDown".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Char(' ') => "Space".to_string(),
            Char(c) => c.to_string(),
            Enter => "Enter".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Delete => "Delete".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            Home => "Home".to_string(),
            End => "End".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Space" => Char(' '),
        "Enter" => Enter,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Delete" => Delete,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "Home" => Home,
        "End" => End,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    ACTION_NAMES
        .iter()
        .find(|(_, name)| *name == s)
        .map(|(action, _)| *action)
}

pub fn format_action(a: KeyAction) -> &'static str {
    ACTION_NAMES
        .iter()
        .find(|(action, _)| *action == a)
        .map(|(_, name)| *name)
        .unwrap_or("Ignore")
}
