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
    let mut request: Option<NetworkRequest> = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching; each data tab loads on entry
        (_, Char('1'), _) => {
            guard.update_tab(MenuItem::Scoreboard);
            request = guard.page_request(MenuItem::Scoreboard);
        }
        (_, Char('2'), _) => {
            guard.update_tab(MenuItem::Schedule);
            request = guard.page_request(MenuItem::Schedule);
        }
        (_, Char('3'), _) => {
            guard.update_tab(MenuItem::Polls);
            request = guard.page_request(MenuItem::Polls);
        }
        (_, Char('4'), _) => {
            guard.update_tab(MenuItem::Standings);
            request = guard.page_request(MenuItem::Standings);
        }
        (_, Char('5'), _) => {
            guard.update_tab(MenuItem::Roster);
            request = guard.page_request(MenuItem::Roster);
        }
        (_, Char('6'), _) => {
            guard.update_tab(MenuItem::Recruits);
            request = guard.page_request(MenuItem::Recruits);
        }
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Session selectors (shift reverses direction)
        (_, Char('t'), _) => request = guard.cycle_team(true),
        (_, Char('T'), _) => request = guard.cycle_team(false),
        (_, Char('y'), _) => request = guard.cycle_year(true),
        (_, Char('Y'), _) => request = guard.cycle_year(false),
        (_, Char('w'), _) => request = guard.cycle_week(true),
        (_, Char('W'), _) => request = guard.cycle_week(false),
        (_, Char('c'), _) => request = guard.cycle_conference(true),
        (_, Char('C'), _) => request = guard.cycle_conference(false),

        // Scrolling
        (_, Char('j') | KeyCode::Down, _) => guard.scroll_down(),
        (_, Char('k') | KeyCode::Up, _) => guard.scroll_up(),

        // Reload the active page
        (_, Char('r'), _) => request = guard.page_request(guard.state.active_tab),
        // Rebuild the local team directory file from the remote feed
        (_, Char('R'), _) => request = Some(NetworkRequest::RefreshTeamDirectory),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}
