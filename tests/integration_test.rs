// Integration tests for member-admin

use member_admin::app::AppState;
use member_admin::members::Member;
use ratatui::{Terminal, backend::TestBackend};

fn mk_members(n: u64) -> Vec<Member> {
    (1..=n)
        .map(|i| Member {
            id: i,
            name: format!("Member {i}"),
            email: format!("member{i}@mailinator.com"),
            role: if i == 1 { "admin" } else { "member" }.to_string(),
        })
        .collect()
}

fn draw(app: &AppState, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("create terminal");
    terminal
        .draw(|f| member_admin::ui::render(f, app))
        .expect("render frame");
    let buf = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            text.push_str(buf[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn temp_path(tag: &str) -> std::path::PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("member_admin_{tag}_{}_{nonce}", std::process::id()))
}

// 1) Theme config roundtrip and init
#[test]
fn theme_roundtrip_and_init() {
    use member_admin::app::Theme;
    use ratatui::style::Color;

    let path = temp_path("theme.conf");
    let mut theme = Theme::nord();
    theme.cursor_fg = Color::Rgb(1, 2, 3);
    theme.selected_bg = Color::Reset;
    theme.write_file(&path).expect("write theme");
    let loaded = Theme::from_file(&path).expect("read theme");
    assert_eq!(loaded, theme);

    // unknown keys and bad values are ignored, missing keys keep defaults
    std::fs::write(&path, "cursor_fg = #FF0000\nbogus = #000000\ntext = nope\n").expect("write");
    let partial = Theme::from_file(&path).expect("read theme");
    assert_eq!(partial.cursor_fg, Color::Rgb(255, 0, 0));
    assert_eq!(partial.text, Theme::nord().text);

    let init_path = temp_path("theme_init.conf");
    let _ = std::fs::remove_file(&init_path);
    let created = Theme::load_or_init(&init_path);
    assert!(init_path.exists());
    assert_eq!(created, Theme::default());

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(&init_path);
}

// 2) Keybinds file is created with defaults and read back identically
#[test]
fn keymap_init_writes_loadable_defaults() {
    use member_admin::app::keymap::Keymap;

    let path = temp_path("keybinds.conf");
    let _ = std::fs::remove_file(&path);
    let created = Keymap::load_or_init(&path);
    assert!(path.exists());

    let reloaded = Keymap::from_file(&path).expect("read keybinds");
    let mut a = created.all_bindings();
    let mut b = reloaded.all_bindings();
    a.sort_by_key(|((m, c), _)| Keymap::format_key(*m, *c));
    b.sort_by_key(|((m, c), _)| Keymap::format_key(*m, *c));
    assert_eq!(a, b);

    let _ = std::fs::remove_file(&path);
}

// 3) Rendering shows one page of rows, the pager and the selection state
#[test]
fn render_first_page_with_selection() {
    let mut app = AppState::new(mk_members(23));
    app.toggle_selection(2);
    let screen = draw(&app, 120, 24);

    assert!(screen.contains("Members (23 shown of 23)"));
    assert!(screen.contains("Member 10"));
    assert!(!screen.contains("Member 11"));
    assert!(screen.contains("[x]"));
    assert!(screen.contains("Page 1 of 3"));
    assert!(screen.contains("[Delete Selected (1)]"));
    assert!(screen.contains("selected:1"));
}

#[test]
fn render_last_page_and_search_prompt() {
    let mut app = AppState::new(mk_members(23));
    app.last_page();
    app.input_mode = member_admin::app::InputMode::Search;
    app.search_query = "member2".to_string();
    let screen = draw(&app, 120, 24);
    assert!(screen.contains("Search: member2"));
    assert!(screen.contains("Member 23"));
    assert!(screen.contains("Page 3 of 3"));
    assert!(screen.contains("mode: SEARCH"));
}

#[test]
fn render_edit_row_shows_save_action() {
    let mut app = AppState::new(mk_members(3));
    app.begin_edit(1);
    app.edit_input('!');
    let screen = draw(&app, 120, 24);
    assert!(screen.contains("Member 1!"));
    assert!(screen.contains("Save"));
    assert!(screen.contains("mode: EDIT"));
}

#[test]
fn render_empty_states_and_modals() {
    use member_admin::app::{InputMode, ModalState};

    let app = AppState::new(vec![]);
    let screen = draw(&app, 80, 24);
    assert!(screen.contains("No members loaded."));
    assert!(screen.contains("Page 1 of 1"));

    let mut app = AppState::new(mk_members(5));
    app.search_query = "zzz".to_string();
    app.refresh_view();
    assert!(draw(&app, 80, 24).contains("No members match the search."));

    let mut app = AppState::new(mk_members(5));
    app.modal = Some(ModalState::ConfirmDeleteAll { selected: 1 });
    app.input_mode = InputMode::Modal;
    assert!(draw(&app, 80, 24).contains("Delete all 5 member(s)?"));

    app.modal = Some(ModalState::Help { scroll: 0 });
    let help = draw(&app, 80, 30);
    assert!(help.contains("Delete selected"));
    assert!(help.contains("Space"));
}

#[test]
fn render_tiny_terminal_does_not_panic() {
    let mut app = AppState::new(mk_members(15));
    app.modal = Some(member_admin::app::ModalState::Help { scroll: 3 });
    draw(&app, 10, 5);
}

// 4) Loading members over HTTP and from files
#[test]
fn fetch_members_from_http_server() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/members.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":"1","name":"Aaron Miles","email":"aaron@mailinator.com","role":"member"},
                {"id":"2","name":"Aishwarya Naik","email":"aishwarya@mailinator.com","role":"admin"}]"#,
        )
        .create();

    let url = format!("{}/members.json", server.url());
    let members = member_admin::members::fetch_members(&url).expect("fetch");
    mock.assert();
    assert_eq!(members.len(), 2);
    assert_eq!(members[1].id, 2);
    assert_eq!(members[1].name, "Aishwarya Naik");
}

#[test]
fn failed_fetch_starts_with_an_empty_table() {
    use member_admin::members::{MemberSource, load_or_empty};

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/members.json")
        .with_status(500)
        .with_body("boom")
        .create();

    let source = MemberSource::Url(format!("{}/members.json", server.url()));
    let (members, status) = load_or_empty(&source);
    mock.assert();
    assert!(members.is_empty());
    let status = status.expect("status message");
    assert!(status.contains("500"), "status was {status}");
}

#[test]
fn load_members_from_file_source() {
    use member_admin::members::MemberSource;

    let path = temp_path("members.json");
    let json = serde_json::to_string(&mk_members(12)).expect("serialize");
    std::fs::write(&path, json).expect("write members");

    let members = MemberSource::File(path.clone()).load().expect("load");
    assert_eq!(members, mk_members(12));

    let _ = std::fs::remove_file(&path);
}
