use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    // Query editor captures all keys while open.
    if guard.state.editor.active {
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (KeyCode::Esc, _) => guard.state.editor.cancel(),
            (KeyCode::Tab, _) => guard.state.editor.cycle_field(),
            (KeyCode::Backspace, _) => guard.state.editor.backspace(),
            (KeyCode::Enter, _) => {
                if let Some(query) = guard.submit_query_editor() {
                    drop(guard);
                    let _ = network_requests.send(NetworkRequest::Refresh { query }).await;
                }
            }
            (Char(c), _) if !c.is_control() => guard.state.editor.push_char(c),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Dashboard),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Rankings),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Rankings scrolling
        (MenuItem::Rankings, Char('j') | KeyCode::Down, _) => guard.rankings_scroll_down(),
        (MenuItem::Rankings, Char('k') | KeyCode::Up, _) => guard.rankings_scroll_up(),

        // Query
        (_, Char('e'), _) => guard.open_query_editor(),
        (_, Char('r'), _) => {
            if let Some(query) = guard.refresh_query() {
                drop(guard);
                let _ = network_requests.send(NetworkRequest::Refresh { query }).await;
            }
        }

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
