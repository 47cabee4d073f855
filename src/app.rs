use cfbd_api::{
    BettingLine, Conference, DraftPick, LiveGame, MediaEntry, Poll, Recruit, RosterPlayer,
    ScheduledGame, TeamRecord, TeamRecruitingRank, WeekWindow,
};
use chrono::Local;
use log::{info, warn};

use crate::enrich;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::{NetworkRequest, RefreshKind};
use crate::teams::TeamDirectory;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Scoreboard,
    Schedule,
    Polls,
    Standings,
    Roster,
    Recruits,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    /// Set by a year change; the next calendar load answers with a page reload.
    reload_after_calendar: bool,
}

impl App {
    pub fn new(directory: TeamDirectory) -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(directory),
            settings,
            reload_after_calendar: false,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_scoreboard_loaded(&mut self, games: Vec<LiveGame>) {
        self.state.last_error = None;
        self.state.scoreboard.rows = enrich::enrich_scoreboard(games, &self.state.directory);
        self.state.scoreboard.last_updated =
            Some(Local::now().format("%I:%M:%S %p").to_string());
    }

    pub fn on_calendar_loaded(&mut self, weeks: Vec<WeekWindow>) -> Option<NetworkRequest> {
        self.state.session.apply_calendar(&weeks);
        self.state.calendar = weeks;
        if self.reload_after_calendar {
            self.reload_after_calendar = false;
            return self.page_request(self.state.active_tab);
        }
        None
    }

    pub fn on_conferences_loaded(&mut self, conferences: Vec<Conference>) {
        if self.state.session.conference.is_none() {
            self.state.session.conference =
                conferences.first().map(|c| c.short_name.clone());
        }
        self.state.conferences = conferences;
    }

    pub fn on_schedule_loaded(
        &mut self,
        games: Vec<ScheduledGame>,
        lines: Vec<BettingLine>,
        media: Vec<MediaEntry>,
    ) {
        match enrich::enrich_schedule(games, lines, media, &self.state.directory) {
            Ok(rows) => {
                self.state.last_error = None;
                self.state.schedule.rows = rows;
            }
            Err(err) => self.on_page_error(Some(MenuItem::Schedule), err.to_string()),
        }
    }

    pub fn on_polls_loaded(&mut self, polls: Vec<Poll>, records: Vec<TeamRecord>) {
        self.state.last_error = None;
        self.state.polls.polls = enrich::enrich_polls(polls, &records, &self.state.directory);
    }

    pub fn on_standings_loaded(&mut self, records: Vec<TeamRecord>) {
        self.state.last_error = None;
        self.state.standings.rows = enrich::enrich_standings(records, &self.state.directory);
    }

    pub fn on_roster_loaded(&mut self, players: Vec<RosterPlayer>, picks: Vec<DraftPick>) {
        self.state.last_error = None;
        self.state.roster.players = players;
        self.state.roster.picks = picks;
        self.state.roster.scroll_offset = 0;
    }

    pub fn on_recruits_loaded(
        &mut self,
        recruits: Vec<Recruit>,
        class_rank: Option<TeamRecruitingRank>,
    ) {
        self.state.last_error = None;
        self.state.recruits.recruits = recruits;
        self.state.recruits.class_rank = class_rank;
        self.state.recruits.scroll_offset = 0;
    }

    pub fn on_directory_refreshed(&mut self, directory: TeamDirectory) {
        info!("team directory refreshed: {} styled teams", directory.len());
        self.state.directory = directory;
        // Existing rows keep their old colors until the next page load.
    }

    pub fn on_page_error(&mut self, page: Option<MenuItem>, message: String) {
        warn!("load failed: {message}");
        self.state.last_error = Some(message);
        if let Some(page) = page {
            self.state.clear_page(page);
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Session selectors — each returns the reload the change requires
    // -----------------------------------------------------------------------

    pub fn cycle_team(&mut self, forward: bool) -> Option<NetworkRequest> {
        let schools = self.state.directory.fbs_fcs_schools().to_vec();
        self.state.session.cycle_team(&schools, forward);
        self.team_scoped_reload()
    }

    pub fn cycle_year(&mut self, forward: bool) -> Option<NetworkRequest> {
        let before = self.state.session.year;
        self.state.session.cycle_year(forward);
        if self.state.session.year == before {
            return None;
        }
        // A new season needs its own calendar before week-scoped loads; the
        // active page reloads once that calendar arrives.
        self.reload_after_calendar = true;
        Some(NetworkRequest::LoadCalendar { year: self.state.session.year })
    }

    pub fn cycle_week(&mut self, forward: bool) -> Option<NetworkRequest> {
        self.state.session.cycle_week(&self.state.calendar, forward);
        self.page_request(self.state.active_tab)
    }

    pub fn cycle_conference(&mut self, forward: bool) -> Option<NetworkRequest> {
        self.state.session.cycle_conference(&self.state.conferences, forward);
        match self.state.active_tab {
            MenuItem::Standings => self.page_request(MenuItem::Standings),
            _ => None,
        }
    }

    fn team_scoped_reload(&self) -> Option<NetworkRequest> {
        match self.state.active_tab {
            MenuItem::Roster | MenuItem::Recruits => self.page_request(self.state.active_tab),
            _ => None,
        }
    }

    /// Resolve a refresher tick against the tab the user is looking at.
    /// Fast ticks belong to the scoreboard; slow ticks to the week- and
    /// season-scoped tables. Any other tab lets the tick pass unanswered.
    pub fn tick_request(&self, kind: RefreshKind) -> Option<NetworkRequest> {
        match (kind, self.state.active_tab) {
            (RefreshKind::Fast, MenuItem::Scoreboard) => {
                Some(NetworkRequest::RefreshScoreboard)
            }
            (
                RefreshKind::Slow,
                tab @ (MenuItem::Schedule | MenuItem::Polls | MenuItem::Standings),
            ) => self.page_request(tab),
            _ => None,
        }
    }

    /// The request that fills a given page with the current session values.
    pub fn page_request(&self, page: MenuItem) -> Option<NetworkRequest> {
        let session = &self.state.session;
        match page {
            MenuItem::Scoreboard => Some(NetworkRequest::RefreshScoreboard),
            MenuItem::Schedule => Some(NetworkRequest::LoadSchedule {
                year: session.year,
                week: session.week,
            }),
            MenuItem::Polls => Some(NetworkRequest::LoadPolls {
                year: session.year,
                week: session.week,
            }),
            MenuItem::Standings => Some(NetworkRequest::LoadStandings {
                year: session.year,
                conference: session.conference.clone(),
            }),
            MenuItem::Roster => Some(NetworkRequest::LoadRoster {
                team: session.team.clone(),
                year: session.year,
            }),
            MenuItem::Recruits => Some(NetworkRequest::LoadRecruits {
                team: session.team.clone(),
                year: session.year,
            }),
            MenuItem::Help => None,
        }
    }

    pub fn scroll_down(&mut self) {
        if let Some(offset) = self.state.scroll_offset_mut() {
            *offset = offset.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        if let Some(offset) = self.state.scroll_offset_mut() {
            *offset = offset.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfbd_api::{GameStatus, LiveSide, TeamDirectoryEntry};

    fn app() -> App {
        App::new(TeamDirectory::from_entries(vec![TeamDirectoryEntry {
            id: 59,
            school: "Georgia Tech".to_string(),
            mascot: None,
            classification: Some("fbs".to_string()),
            color: Some("#003057".to_string()),
            logos: Some(vec!["https://a.espncdn.com/i/teamlogos/ncaa/500/59.png".to_string()]),
        }]))
    }

    #[test]
    fn scoreboard_load_stamps_last_updated_and_clears_errors() {
        let mut app = app();
        app.state.last_error = Some("earlier failure".to_string());
        app.on_scoreboard_loaded(vec![LiveGame {
            id: 1,
            status: GameStatus::InProgress,
            home: LiveSide { id: Some(59), name: "Georgia Tech".to_string(), points: Some(7) },
            ..Default::default()
        }]);
        assert!(app.state.last_error.is_none());
        assert!(app.state.scoreboard.last_updated.is_some());
        assert_eq!(app.state.scoreboard.live_count(), 1);
    }

    #[test]
    fn scoreboard_render_rows_exclude_scheduled_and_final_games() {
        let mut app = app();
        app.on_scoreboard_loaded(vec![
            LiveGame { id: 1, status: GameStatus::Scheduled, ..Default::default() },
            LiveGame {
                id: 2,
                status: GameStatus::InProgress,
                home: LiveSide { id: Some(59), name: "Georgia Tech".to_string(), points: Some(3) },
                ..Default::default()
            },
            LiveGame { id: 3, status: GameStatus::Final, ..Default::default() },
        ]);
        assert_eq!(app.state.scoreboard.rows.len(), 3);
        let live = app.state.scoreboard.live_rows();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].game.id, 2);
    }

    #[test]
    fn page_error_clears_only_that_page() {
        let mut app = app();
        app.on_scoreboard_loaded(vec![LiveGame::default()]);
        app.on_standings_loaded(vec![TeamRecord {
            team: "Georgia Tech".to_string(),
            ..Default::default()
        }]);
        app.on_page_error(Some(MenuItem::Standings), "server error".to_string());
        assert!(app.state.standings.rows.is_empty());
        assert_eq!(app.state.scoreboard.rows.len(), 1);
        assert_eq!(app.state.last_error.as_deref(), Some("server error"));
    }

    #[test]
    fn bad_schedule_dates_clear_the_schedule_page() {
        let mut app = app();
        app.on_schedule_loaded(
            vec![ScheduledGame {
                id: 7,
                start_date: Some("not a date".to_string()),
                home_team: "Georgia Tech".to_string(),
                away_team: "Georgia".to_string(),
                ..Default::default()
            }],
            vec![],
            vec![],
        );
        assert!(app.state.schedule.rows.is_empty());
        assert!(app.state.last_error.is_some());
    }

    #[test]
    fn conference_defaults_to_the_first_loaded() {
        let mut app = app();
        app.on_conferences_loaded(vec![
            Conference { id: 1, short_name: "ACC".to_string(), abbreviation: "ACC".to_string() },
            Conference { id: 8, short_name: "SEC".to_string(), abbreviation: "SEC".to_string() },
        ]);
        assert_eq!(app.state.session.conference.as_deref(), Some("ACC"));
    }

    #[test]
    fn week_change_reloads_the_active_page() {
        let mut app = app();
        app.state.active_tab = MenuItem::Schedule;
        app.state.session.week = 3;
        let request = app.cycle_week(true);
        assert!(matches!(
            request,
            Some(NetworkRequest::LoadSchedule { week: 4, .. })
        ));
    }

    #[test]
    fn fast_tick_only_refreshes_while_the_scoreboard_is_active() {
        let mut app = app();
        assert!(matches!(
            app.tick_request(RefreshKind::Fast),
            Some(NetworkRequest::RefreshScoreboard)
        ));
        app.update_tab(MenuItem::Polls);
        assert!(app.tick_request(RefreshKind::Fast).is_none());
        assert!(matches!(
            app.tick_request(RefreshKind::Slow),
            Some(NetworkRequest::LoadPolls { .. })
        ));
    }

    #[test]
    fn slow_tick_skips_team_scoped_and_help_tabs() {
        let mut app = app();
        app.update_tab(MenuItem::Roster);
        assert!(app.tick_request(RefreshKind::Slow).is_none());
        app.update_tab(MenuItem::Help);
        assert!(app.tick_request(RefreshKind::Slow).is_none());
    }

    #[test]
    fn year_change_reloads_the_active_page_once_the_calendar_arrives() {
        let mut app = app();
        app.update_tab(MenuItem::Standings);
        let request = app.cycle_year(false);
        assert!(matches!(request, Some(NetworkRequest::LoadCalendar { .. })));
        let follow_up = app.on_calendar_loaded(vec![]);
        assert!(matches!(
            follow_up,
            Some(NetworkRequest::LoadStandings { .. })
        ));
        // The startup calendar load carries no pending reload.
        assert!(app.on_calendar_loaded(vec![]).is_none());
    }

    #[test]
    fn help_tab_remembers_where_it_came_from() {
        let mut app = app();
        app.update_tab(MenuItem::Polls);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Polls);
    }
}
