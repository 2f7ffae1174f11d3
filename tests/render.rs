use crossterm::event::KeyCode;
use events_manager::ui::table::PLACEHOLDER_TEXT;
use events_manager::{App, NewEntity, Store};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

fn render(app: &App) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| app.draw(frame)).unwrap();
    buffer_lines(terminal.backend().buffer())
}

fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect()
}

fn screen_contains(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|line| line.contains(needle))
}

#[test]
fn idle_screen_asks_for_a_list() {
    let app = App::new(Store::new());
    let lines = render(&app);
    assert!(screen_contains(&lines, "Events Manager"));
    assert!(screen_contains(&lines, "Press 1, 2 or 3 to open a list."));
}

#[test]
fn empty_collection_draws_the_placeholder_row() {
    let mut app = App::new(Store::new());
    app.handle_key(KeyCode::Char('3'));
    let lines = render(&app);
    assert!(screen_contains(&lines, PLACEHOLDER_TEXT));
    assert!(!screen_contains(&lines, "Description"));
}

#[test]
fn table_draws_header_and_rows_in_order() {
    let mut app = App::new(Store::with_demo_data());
    app.handle_key(KeyCode::Char('2'));
    let lines = render(&app);

    let header = lines
        .iter()
        .position(|line| line.contains("Description") && line.contains("Event Type"))
        .expect("header row");
    assert!(lines[header + 1].contains("Race") && lines[header + 1].contains("2024-12-15"));
    assert!(lines[header + 4].contains("Concert") && lines[header + 4].contains("Fun"));
}

#[test]
fn member_form_lists_known_event_types() {
    let mut store = Store::new();
    store.add(NewEntity::EventType {
        description: "School".into(),
    });
    let mut app = App::new(store);
    app.handle_key(KeyCode::Char('1'));
    app.handle_key(KeyCode::Char('+'));

    let lines = render(&app);
    assert!(screen_contains(&lines, "New member"));
    assert!(screen_contains(&lines, "[ ] School"));
    assert!(!screen_contains(&lines, PLACEHOLDER_TEXT));
}

#[test]
fn notice_is_drawn_over_the_table() {
    let mut app = App::new(Store::with_demo_data());
    app.handle_key(KeyCode::Char('1'));
    app.handle_key(KeyCode::Char('-'));

    let lines = render(&app);
    assert!(screen_contains(&lines, "Notice"));
    assert!(screen_contains(&lines, "Select a row to remove."));
}
