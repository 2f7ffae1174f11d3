use crossterm::event::KeyCode;
use events_manager::ui::forms::EntityForm;
use events_manager::ui::{ViewState, EDIT_UNSUPPORTED, NO_ROW_SELECTED};
use events_manager::{App, EntityId, EntityKind, NewEntity, Store};
use ratatui::layout::Rect;

const SCREEN: Rect = Rect {
    x: 0,
    y: 0,
    width: 80,
    height: 24,
};
/// First data row on an 80x24 screen: 3 header lines, the table border and
/// the column header row.
const FIRST_ROW_Y: u16 = 5;

fn press(app: &mut App, codes: &[KeyCode]) {
    for code in codes {
        app.handle_key(*code);
    }
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_key(KeyCode::Char(ch));
    }
}

fn app_with_members(names: &[&str]) -> App {
    let mut store = Store::new();
    for name in names {
        store.add(NewEntity::Member {
            name: (*name).to_string(),
        });
    }
    App::new(store)
}

#[test]
fn starts_idle_and_ignores_add_until_a_kind_is_chosen() {
    let mut app = App::new(Store::new());
    assert_eq!(app.state(), ViewState::Idle);

    press(&mut app, &[KeyCode::Char('+')]);
    assert_eq!(app.state(), ViewState::Idle);
    assert!(app.table().is_none());

    press(&mut app, &[KeyCode::Char('2')]);
    assert_eq!(app.state(), ViewState::Browsing(EntityKind::Event));
    assert!(app.table().unwrap().is_placeholder());
}

#[test]
fn new_event_type_shows_up_as_member_choice_and_member_is_saved() {
    let mut app = App::new(Store::new());

    press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('+')]);
    assert_eq!(app.state(), ViewState::Editing(EntityKind::EventType));
    type_text(&mut app, "School");
    press(&mut app, &[KeyCode::Enter]);
    assert_eq!(app.state(), ViewState::Browsing(EntityKind::EventType));
    assert_eq!(app.store().event_types()[0].description, "School");

    press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('+')]);
    let Some(EntityForm::Member(form)) = app.form() else {
        panic!("member form should be open");
    };
    let labels: Vec<&str> = form.choices.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["School"]);

    type_text(&mut app, "Ana");
    press(&mut app, &[KeyCode::Tab, KeyCode::Char(' '), KeyCode::Enter]);

    assert_eq!(app.state(), ViewState::Browsing(EntityKind::Member));
    let members = app.store().members();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "Ana");
    // the id counter is shared, so "School" already took 1
    assert_eq!(members[0].id, EntityId(2));
    assert_eq!(app.table().unwrap().data_len(), 1);
}

#[test]
fn member_without_preferred_type_is_rejected() {
    let mut app = App::new(Store::with_demo_data());
    press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('+')]);
    type_text(&mut app, "Ana");
    press(&mut app, &[KeyCode::Enter]);

    assert_eq!(app.notice(), Some("Fill in all fields."));
    assert_eq!(app.state(), ViewState::Editing(EntityKind::Member));
    assert_eq!(app.store().members().len(), 4);
}

#[test]
fn event_without_type_fails_validation_and_stays_in_form() {
    let mut store = Store::new();
    store.add(NewEntity::EventType {
        description: "Sport".into(),
    });
    let mut app = App::new(store);

    press(&mut app, &[KeyCode::Char('2'), KeyCode::Char('+')]);
    type_text(&mut app, "Run");
    press(&mut app, &[KeyCode::Tab, KeyCode::Down, KeyCode::Enter]);

    assert_eq!(app.notice(), Some("Fill in all fields."));
    assert_eq!(app.state(), ViewState::Editing(EntityKind::Event));
    assert!(app.store().events().is_empty());

    press(&mut app, &[KeyCode::Enter]);
    assert_eq!(app.notice(), None);
    assert_eq!(app.state(), ViewState::Editing(EntityKind::Event));
    let Some(EntityForm::Event(form)) = app.form() else {
        panic!("event form should still be open");
    };
    assert_eq!(form.name, "Run");
    assert!(form.date.is_some());
}

#[test]
fn complete_event_form_adds_an_event() {
    let mut store = Store::new();
    store.add(NewEntity::EventType {
        description: "Sport".into(),
    });
    let mut app = App::new(store);

    press(&mut app, &[KeyCode::Char('2'), KeyCode::Char('+')]);
    type_text(&mut app, "Run");
    press(
        &mut app,
        &[
            KeyCode::Tab,
            KeyCode::Down,
            KeyCode::Tab,
            KeyCode::Down,
            KeyCode::Enter,
        ],
    );

    assert_eq!(app.state(), ViewState::Browsing(EntityKind::Event));
    let events = app.store().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Run");
    assert_eq!(events[0].event_type, "Sport");
    assert_eq!(events[0].date.len(), "2024-12-15".len());
    assert_eq!(app.status_text(), Some("Added event #2."));
}

#[test]
fn saved_record_gets_the_cursor() {
    let mut app = app_with_members(&["Ana", "Rui"]);
    press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('+')]);
    type_text(&mut app, "Fun");
    press(&mut app, &[KeyCode::Enter, KeyCode::Char('+')]);
    type_text(&mut app, "School");
    press(&mut app, &[KeyCode::Enter]);

    assert_eq!(app.store().event_types().len(), 2);
    assert_eq!(app.cursor_row(), 1);
    assert_eq!(app.highlighted_row(), None);
}

#[test]
fn removing_highlighted_second_member_keeps_order() {
    let mut app = app_with_members(&["Ana", "Rui", "Ines"]);
    press(
        &mut app,
        &[KeyCode::Char('1'), KeyCode::Down, KeyCode::Char(' ')],
    );
    assert_eq!(app.highlighted_row(), Some(1));

    press(&mut app, &[KeyCode::Char('-')]);

    let names: Vec<&str> = app
        .store()
        .members()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, vec!["Ana", "Ines"]);
    assert_eq!(app.table().unwrap().data_len(), 2);
    assert_eq!(app.highlighted_row(), None);
    assert_eq!(app.state(), ViewState::Browsing(EntityKind::Member));
}

#[test]
fn remove_without_highlight_raises_blocking_notice() {
    let mut app = app_with_members(&["Ana", "Rui"]);
    press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('-')]);

    assert_eq!(app.notice(), Some(NO_ROW_SELECTED));
    assert_eq!(app.store().members().len(), 2);

    // other input is swallowed until the notice is dismissed
    press(&mut app, &[KeyCode::Char('+')]);
    assert_eq!(app.state(), ViewState::Browsing(EntityKind::Member));
    assert!(app.notice().is_some());

    press(&mut app, &[KeyCode::Esc]);
    assert_eq!(app.notice(), None);
    assert_eq!(app.state(), ViewState::Browsing(EntityKind::Member));
}

#[test]
fn cancel_returns_to_table_without_changes() {
    let mut app = app_with_members(&["Ana"]);
    press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('+')]);
    type_text(&mut app, "Rui");
    press(&mut app, &[KeyCode::Esc]);

    assert_eq!(app.state(), ViewState::Browsing(EntityKind::Member));
    assert_eq!(app.store().members().len(), 1);
}

#[test]
fn clicking_rows_toggles_an_exclusive_highlight() {
    let mut app = app_with_members(&["Ana", "Rui", "Ines"]);
    press(&mut app, &[KeyCode::Char('1')]);

    assert!(app.handle_click(10, FIRST_ROW_Y + 1, SCREEN));
    assert_eq!(app.highlighted_row(), Some(1));
    assert!(app.handle_click(10, FIRST_ROW_Y + 1, SCREEN));
    assert_eq!(app.highlighted_row(), None);

    app.handle_click(10, FIRST_ROW_Y, SCREEN);
    app.handle_click(10, FIRST_ROW_Y + 2, SCREEN);
    assert_eq!(app.highlighted_row(), Some(2));

    // column header row
    assert!(!app.handle_click(10, FIRST_ROW_Y - 1, SCREEN));
    assert_eq!(app.highlighted_row(), Some(2));
}

#[test]
fn function_key_switches_list_while_a_form_is_open() {
    let mut app = app_with_members(&["Ana"]);
    press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('+')]);
    type_text(&mut app, "Rui2");
    assert_eq!(app.state(), ViewState::Editing(EntityKind::Member));

    press(&mut app, &[KeyCode::F(2)]);

    assert_eq!(app.state(), ViewState::Browsing(EntityKind::Event));
    assert!(app.form().is_none());
    assert!(app.table().unwrap().is_placeholder());
    let names: Vec<&str> = app
        .store()
        .members()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, vec!["Ana"]);
}

#[test]
fn digits_are_text_inside_a_form() {
    let mut app = app_with_members(&[]);
    press(
        &mut app,
        &[KeyCode::Char('3'), KeyCode::Char('+'), KeyCode::Char('2')],
    );

    assert_eq!(app.state(), ViewState::Editing(EntityKind::EventType));
    let Some(EntityForm::EventType(form)) = app.form() else {
        panic!("event type form should be open");
    };
    assert_eq!(form.description, "2");
}

#[test]
fn function_keys_switch_lists_from_idle_and_browsing() {
    let mut app = App::new(Store::with_demo_data());
    press(&mut app, &[KeyCode::F(3)]);
    assert_eq!(app.state(), ViewState::Browsing(EntityKind::EventType));
    press(&mut app, &[KeyCode::Char(' '), KeyCode::F(1)]);
    assert_eq!(app.state(), ViewState::Browsing(EntityKind::Member));
    assert_eq!(app.highlighted_row(), None);
}

#[test]
fn switching_kind_clears_the_highlight() {
    let mut app = app_with_members(&["Ana", "Rui"]);
    press(&mut app, &[KeyCode::Char('1'), KeyCode::Char(' ')]);
    assert_eq!(app.highlighted_row(), Some(0));

    press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('1')]);
    assert_eq!(app.highlighted_row(), None);
}

#[test]
fn edit_control_only_reports_that_it_is_unsupported() {
    let mut app = app_with_members(&["Ana"]);
    press(
        &mut app,
        &[KeyCode::Char('1'), KeyCode::Char(' '), KeyCode::Char('e')],
    );

    assert_eq!(app.status_text(), Some(EDIT_UNSUPPORTED));
    assert_eq!(app.state(), ViewState::Browsing(EntityKind::Member));
    assert_eq!(app.store().members()[0].name, "Ana");
}

#[test]
fn quit_is_only_available_outside_forms() {
    let mut app = app_with_members(&[]);
    assert!(!app.handle_key(KeyCode::Char('1')));
    assert!(!app.handle_key(KeyCode::Char('+')));
    assert!(!app.handle_key(KeyCode::Char('q')));
    assert_eq!(app.state(), ViewState::Editing(EntityKind::Member));

    app.handle_key(KeyCode::Esc);
    assert!(app.handle_key(KeyCode::Char('q')));
}
