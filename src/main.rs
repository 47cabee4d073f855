mod app;
mod components;
mod draw;
mod enrich;
mod keys;
mod state;
mod teams;
mod ui;

use cfbd_api::client::CfbdClient;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{error, warn};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use crate::teams::TeamDirectory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    let Ok(api_key) = std::env::var("CFBD_API_KEY") else {
        eprintln!("CFBD_API_KEY is not set.\n\n{}", usage_text());
        std::process::exit(2);
    };

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Info)?;
    tui_logger::set_default_level(log::LevelFilter::Info);

    let teams_path = TeamDirectory::default_path();
    let directory = match TeamDirectory::load(&teams_path) {
        Ok(directory) => directory,
        Err(err) => {
            // First run or stale path: start empty and fetch on startup.
            warn!("team directory unavailable: {err:#}");
            TeamDirectory::default()
        }
    };
    let directory_missing = directory.is_empty();

    let app = Arc::new(Mutex::new(App::new(directory)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let client = CfbdClient::new(api_key);
    let network_worker = NetworkWorker::new(client, teams_path, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Periodic refresh thread (20s scoreboard, 60s other pages)
    let periodic_updater = PeriodicRefresher::new(ui_event_tx.clone());
    let periodic_task = tokio::spawn(periodic_updater.run());

    if directory_missing {
        let _ = network_req_tx.send(NetworkRequest::RefreshTeamDirectory).await;
    }
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("cftui {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "cftui - college football terminal dashboard

Usage:
  cftui
  cftui --help
  cftui --version

Environment:
  CFBD_API_KEY       CollegeFootballData.com API key (required)
  CFTUI_TEAMS_JSON   Path to the local team directory file (default team_info.json)
  CFTUI_LOG          Log level: error, warn, info, debug, trace"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw =
                    handle_network_response(response, &app, &network_requests, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let year = app.lock().await.state.session.year;
            let _ = network_requests.send(NetworkRequest::LoadCalendar { year }).await;
            let _ = network_requests.send(NetworkRequest::LoadConferences).await;
            let _ = network_requests.send(NetworkRequest::RefreshScoreboard).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::RefreshTick(kind) => {
            let request = app.lock().await.tick_request(kind);
            if let Some(request) = request {
                let _ = network_requests.send(request).await;
            }
            false
        }
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::ScoreboardLoaded { games } => {
            app.lock().await.on_scoreboard_loaded(games);
        }
        NetworkResponse::CalendarLoaded { weeks } => {
            let follow_up = app.lock().await.on_calendar_loaded(weeks);
            if let Some(request) = follow_up {
                let _ = network_requests.send(request).await;
            }
        }
        NetworkResponse::ConferencesLoaded { conferences } => {
            app.lock().await.on_conferences_loaded(conferences);
        }
        NetworkResponse::ScheduleLoaded { games, lines, media } => {
            app.lock().await.on_schedule_loaded(games, lines, media);
        }
        NetworkResponse::PollsLoaded { polls, records } => {
            app.lock().await.on_polls_loaded(polls, records);
        }
        NetworkResponse::StandingsLoaded { records } => {
            app.lock().await.on_standings_loaded(records);
        }
        NetworkResponse::RosterLoaded { players, picks } => {
            app.lock().await.on_roster_loaded(players, picks);
        }
        NetworkResponse::RecruitsLoaded { recruits, class_rank } => {
            app.lock().await.on_recruits_loaded(recruits, class_rank);
        }
        NetworkResponse::DirectoryRefreshed { directory } => {
            app.lock().await.on_directory_refreshed(directory);
        }
        NetworkResponse::Error { page, message } => {
            error!("Network error: {message}");
            app.lock().await.on_page_error(page, message);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::Hide);
    let _ = execute!(stdout, terminal::EnterAlternateScreen);
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = terminal::enable_raw_mode();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
