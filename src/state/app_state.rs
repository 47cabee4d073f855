use cfbd_api::{Conference, DraftPick, Recruit, RosterPlayer, TeamRecruitingRank, WeekWindow};

use crate::app::MenuItem;
use crate::enrich::{EnrichedPoll, LiveGameRow, ScheduleRow, StandingRow};
use crate::state::session::SessionSelection;
use crate::teams::TeamDirectory;

// ---------------------------------------------------------------------------
// Per-page state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ScoreboardState {
    pub rows: Vec<LiveGameRow>,
    pub scroll_offset: u16,
    /// Wall-clock time of the last successful refresh, for the footer.
    pub last_updated: Option<String>,
}

impl ScoreboardState {
    /// The in-progress subset; scheduled and final games never reach the
    /// scoreboard render, they belong to the schedule page.
    pub fn live_rows(&self) -> Vec<&LiveGameRow> {
        self.rows.iter().filter(|r| r.game.is_live()).collect()
    }

    pub fn live_count(&self) -> usize {
        self.live_rows().len()
    }
}

#[derive(Debug, Default)]
pub struct ScheduleState {
    pub rows: Vec<ScheduleRow>,
    pub scroll_offset: u16,
}

#[derive(Debug, Default)]
pub struct PollsState {
    pub polls: Vec<EnrichedPoll>,
    pub scroll_offset: u16,
}

#[derive(Debug, Default)]
pub struct StandingsState {
    pub rows: Vec<StandingRow>,
    pub scroll_offset: u16,
}

#[derive(Debug, Default)]
pub struct RosterState {
    pub players: Vec<RosterPlayer>,
    pub picks: Vec<DraftPick>,
    pub scroll_offset: u16,
}

#[derive(Debug, Default)]
pub struct RecruitsState {
    pub recruits: Vec<Recruit>,
    pub class_rank: Option<TeamRecruitingRank>,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub directory: TeamDirectory,
    pub session: SessionSelection,
    pub calendar: Vec<WeekWindow>,
    pub conferences: Vec<Conference>,
    pub scoreboard: ScoreboardState,
    pub schedule: ScheduleState,
    pub polls: PollsState,
    pub standings: StandingsState,
    pub roster: RosterState,
    pub recruits: RecruitsState,
}

impl AppState {
    pub fn new(directory: TeamDirectory) -> Self {
        Self {
            session: SessionSelection::default(),
            directory,
            ..Self::default()
        }
    }

    /// Drop the rows of one page after a failed load so stale data never
    /// masquerades as current.
    pub fn clear_page(&mut self, page: MenuItem) {
        match page {
            MenuItem::Scoreboard => {
                self.scoreboard.rows.clear();
                self.scoreboard.last_updated = None;
            }
            MenuItem::Schedule => self.schedule.rows.clear(),
            MenuItem::Polls => self.polls.polls.clear(),
            MenuItem::Standings => self.standings.rows.clear(),
            MenuItem::Roster => {
                self.roster.players.clear();
                self.roster.picks.clear();
            }
            MenuItem::Recruits => {
                self.recruits.recruits.clear();
                self.recruits.class_rank = None;
            }
            MenuItem::Help => {}
        }
    }

    pub fn scroll_offset_mut(&mut self) -> Option<&mut u16> {
        match self.active_tab {
            MenuItem::Scoreboard => Some(&mut self.scoreboard.scroll_offset),
            MenuItem::Schedule => Some(&mut self.schedule.scroll_offset),
            MenuItem::Polls => Some(&mut self.polls.scroll_offset),
            MenuItem::Standings => Some(&mut self.standings.scroll_offset),
            MenuItem::Roster => Some(&mut self.roster.scroll_offset),
            MenuItem::Recruits => Some(&mut self.recruits.scroll_offset),
            MenuItem::Help => None,
        }
    }
}
