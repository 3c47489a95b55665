use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use crate::app::{App, View};

/// File written by the in-app export key.
pub const EXPORT_FILE: &str = "nocwatch_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Map),
        KeyCode::Char('3') => app.set_view(View::Charts),
        KeyCode::Char('4') => app.set_view(View::Maintenance),

        // List navigation
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),

        // Filters
        KeyCode::Char('g') => app.cycle_region(),
        KeyCode::Char('t') => app.cycle_node_type(),
        KeyCode::Char('f') => app.cycle_status(),
        KeyCode::Char('x') => app.clear_filters(),

        // Chart selectors
        KeyCode::Char('v') => app.cycle_temperature_view(),
        KeyCode::Char('m') => app.cycle_utilization_metric(),

        // Refresh now
        KeyCode::Char('r') => app.manual_refresh(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    warn!(error = %e, "Export failed");
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataStore, Selector, Thresholds};
    use crate::session::Session;
    use crate::ui::Theme;
    use std::time::Instant;

    fn app() -> App {
        let store = DataStore::from_readers(
            "node_id,node_name,node_type,region,latitude,longitude\na,Alpha,router,West,37,-122\n"
                .as_bytes(),
            "node_id,temperature_celsius,availability_percent\na,30,99.9\n".as_bytes(),
        )
        .unwrap();
        let mut app = App::new(
            Session::with_seed(store, Thresholds::default(), 5),
            Duration::from_secs(180),
            Theme::dark(),
        );
        app.start(Instant::now());
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_view_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_view, View::Charts);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view, View::Maintenance);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.current_view, View::Charts);
    }

    #[test]
    fn test_list_keys_only_move_in_maintenance() {
        let mut app = app();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_critical_index, 0);
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected_critical_index, 0);
        assert_eq!(app.current_view, View::Maintenance);
    }

    #[test]
    fn test_filter_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.filters.region, Selector::Only("West".to_string()));
        press(&mut app, KeyCode::Char('x'));
        assert!(app.filters.is_unfiltered());
    }

    #[test]
    fn test_refresh_key_advances_simulator() {
        let mut app = app();
        assert_eq!(app.session().cursor(), 50);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.session().cursor(), 100);
    }
}
