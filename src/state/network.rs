use cfbd_api::client::CfbdClient;
use log::{debug, error, info};

use crate::state::messages::{NetworkRequest, NetworkResponse};
use crate::teams::TeamDirectory;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Services network requests one at a time. Requests queue up on the channel,
/// so two refresh passes can never run concurrently no matter how the timers
/// and key presses interleave.
pub struct NetworkWorker {
    client: CfbdClient,
    teams_path: PathBuf,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: CfbdClient,
        teams_path: PathBuf,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            teams_path,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let page = request.page();
            let result = match request {
                NetworkRequest::RefreshScoreboard => self.handle_refresh_scoreboard().await,
                NetworkRequest::LoadCalendar { year } => self.handle_load_calendar(year).await,
                NetworkRequest::LoadConferences => self.handle_load_conferences().await,
                NetworkRequest::LoadSchedule { year, week } => {
                    self.handle_load_schedule(year, week).await
                }
                NetworkRequest::LoadPolls { year, week } => {
                    self.handle_load_polls(year, week).await
                }
                NetworkRequest::LoadStandings { year, conference } => {
                    self.handle_load_standings(year, conference).await
                }
                NetworkRequest::LoadRoster { team, year } => {
                    self.handle_load_roster(team, year).await
                }
                NetworkRequest::LoadRecruits { team, year } => {
                    self.handle_load_recruits(team, year).await
                }
                NetworkRequest::RefreshTeamDirectory => self.handle_refresh_directory().await,
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                page,
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_refresh_scoreboard(&self) -> anyhow::Result<NetworkResponse> {
        debug!("refreshing scoreboard");
        let games = self.client.scoreboard("fbs").await?;
        Ok(NetworkResponse::ScoreboardLoaded { games })
    }

    async fn handle_load_calendar(&self, year: u16) -> anyhow::Result<NetworkResponse> {
        debug!("loading {year} calendar");
        let weeks = self.client.calendar(year).await?;
        Ok(NetworkResponse::CalendarLoaded { weeks })
    }

    async fn handle_load_conferences(&self) -> anyhow::Result<NetworkResponse> {
        debug!("loading conferences");
        let conferences = self.client.conferences().await?;
        Ok(NetworkResponse::ConferencesLoaded { conferences })
    }

    /// Three fetches feed one schedule table: games, betting lines, and
    /// broadcast media all keyed by game id.
    async fn handle_load_schedule(&self, year: u16, week: u8) -> anyhow::Result<NetworkResponse> {
        debug!("loading schedule for {year} week {week}");
        let games = self.client.games(year, week).await?;
        let lines = self.client.lines(year, week).await?;
        let media = self.client.media(year, week).await?;
        Ok(NetworkResponse::ScheduleLoaded { games, lines, media })
    }

    async fn handle_load_polls(&self, year: u16, week: u8) -> anyhow::Result<NetworkResponse> {
        debug!("loading polls for {year} week {week}");
        let polls = self.client.rankings(year, week).await?;
        let records = self.client.records(year, None, None).await?;
        Ok(NetworkResponse::PollsLoaded { polls, records })
    }

    async fn handle_load_standings(
        &self,
        year: u16,
        conference: Option<String>,
    ) -> anyhow::Result<NetworkResponse> {
        debug!("loading {year} standings for {conference:?}");
        let records = self.client.records(year, None, conference.as_deref()).await?;
        Ok(NetworkResponse::StandingsLoaded { records })
    }

    async fn handle_load_roster(&self, team: String, year: u16) -> anyhow::Result<NetworkResponse> {
        debug!("loading {year} roster for {team}");
        let players = self.client.roster(&team, year).await?;
        let picks = self.client.draft_picks(year, &team).await?;
        Ok(NetworkResponse::RosterLoaded { players, picks })
    }

    async fn handle_load_recruits(
        &self,
        team: String,
        year: u16,
    ) -> anyhow::Result<NetworkResponse> {
        debug!("loading {year} recruiting class for {team}");
        let recruits = self.client.recruits(year, &team).await?;
        let class_rank = self.client.team_recruiting(year, &team).await?;
        Ok(NetworkResponse::RecruitsLoaded { recruits, class_rank })
    }

    /// Fetch the full team directory, rewrite the local reference file, and
    /// hand the reloaded directory to the app.
    async fn handle_refresh_directory(&self) -> anyhow::Result<NetworkResponse> {
        info!("refreshing team directory");
        let entries = self.client.teams().await?;
        TeamDirectory::save(&self.teams_path, &entries)?;
        info!(
            "wrote {} directory entries to {}",
            entries.len(),
            self.teams_path.display()
        );
        let directory = TeamDirectory::from_entries(entries);
        Ok(NetworkResponse::DirectoryRefreshed { directory })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
