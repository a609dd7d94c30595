use crossterm::event::KeyCode;
use dragon_dance::config::WinnerPick;
use dragon_dance::game::Phase;
use dragon_dance::tui::app::{AppState, InputAction, Scene, Zone, HUMAN};
use dragon_dance::tui::controller::handle_key;

fn setup_table_app() -> AppState {
    let mut app = AppState::default();
    app.apply_menu();
    app
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = AppState::default();
    assert!(matches!(app.scene, Scene::Menu));
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuInc);
    assert_eq!(app.cfg_winner_pick, WinnerPick::OwnSlots);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Table));
    assert_eq!(app.game.config().winner_pick, WinnerPick::OwnSlots);
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());
}

#[test]
fn focus_cycles_zones_and_cursor_wraps() {
    let mut app = setup_table_app();
    assert_eq!(app.zone, Zone::Hand);
    let _ = app.handle_input(InputAction::CursorLeft);
    assert_eq!(app.cursor, 8, "wraps to the last hand card");
    let _ = app.handle_input(InputAction::FocusNext);
    assert_eq!(app.zone, Zone::MySlots);
    assert_eq!(app.cursor, 2, "clamped to the slot row");
    let _ = app.handle_input(InputAction::CursorRight);
    assert_eq!(app.cursor, 0);
    let _ = app.handle_input(InputAction::FocusNext);
    let _ = app.handle_input(InputAction::FocusNext);
    assert_eq!(app.zone, Zone::Hand);
}

#[test]
fn activate_places_the_card_under_the_cursor() {
    let mut app = setup_table_app();
    let card = app.game.side(HUMAN).hand()[3];
    app.cursor = 3;
    assert!(app.handle_input(InputAction::Activate));
    assert_eq!(app.game.side(HUMAN).slots()[0], Some(card));
    assert_eq!(app.game.side(HUMAN).hand().len(), 8);
    assert!(app.action_error().is_none());
}

#[test]
fn table_keys_drive_the_human_seat() {
    let mut app = setup_table_app();
    for _ in 0..3 {
        assert!(!handle_key(&mut app, KeyCode::Enter));
    }
    assert!(app.game.side(HUMAN).slots().iter().all(Option::is_some));
    assert_eq!(app.game.phase(), Phase::Placing, "bot waits out its delay");

    assert!(!handle_key(&mut app, KeyCode::Char('n')));
    assert_eq!(app.game.side(HUMAN).hand().len(), 9);
    assert_eq!(app.game.round(), 1);
}

#[test]
fn q_quits_from_menu_and_table() {
    let mut app = AppState::default();
    assert!(handle_key(&mut app, KeyCode::Char('q')));
    let mut app = setup_table_app();
    assert!(handle_key(&mut app, KeyCode::Char('q')));
}
