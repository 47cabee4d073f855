use crate::app::MenuItem;
use crate::state::network::LoadingState;
use crate::teams::TeamDirectory;
use cfbd_api::{
    BettingLine, Conference, DraftPick, LiveGame, MediaEntry, Poll, Recruit, RosterPlayer,
    ScheduledGame, TeamRecord, TeamRecruitingRank, WeekWindow,
};
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    RefreshScoreboard,
    LoadCalendar { year: u16 },
    LoadConferences,
    LoadSchedule { year: u16, week: u8 },
    LoadPolls { year: u16, week: u8 },
    LoadStandings { year: u16, conference: Option<String> },
    LoadRoster { team: String, year: u16 },
    LoadRecruits { team: String, year: u16 },
    RefreshTeamDirectory,
}

impl NetworkRequest {
    /// The page whose rows an error on this request should clear.
    pub fn page(&self) -> Option<MenuItem> {
        match self {
            NetworkRequest::RefreshScoreboard => Some(MenuItem::Scoreboard),
            NetworkRequest::LoadSchedule { .. } => Some(MenuItem::Schedule),
            NetworkRequest::LoadPolls { .. } => Some(MenuItem::Polls),
            NetworkRequest::LoadStandings { .. } => Some(MenuItem::Standings),
            NetworkRequest::LoadRoster { .. } => Some(MenuItem::Roster),
            NetworkRequest::LoadRecruits { .. } => Some(MenuItem::Recruits),
            NetworkRequest::LoadCalendar { .. }
            | NetworkRequest::LoadConferences
            | NetworkRequest::RefreshTeamDirectory => None,
        }
    }
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    ScoreboardLoaded { games: Vec<LiveGame> },
    CalendarLoaded { weeks: Vec<WeekWindow> },
    ConferencesLoaded { conferences: Vec<Conference> },
    ScheduleLoaded {
        games: Vec<ScheduledGame>,
        lines: Vec<BettingLine>,
        media: Vec<MediaEntry>,
    },
    PollsLoaded { polls: Vec<Poll>, records: Vec<TeamRecord> },
    StandingsLoaded { records: Vec<TeamRecord> },
    RosterLoaded { players: Vec<RosterPlayer>, picks: Vec<DraftPick> },
    RecruitsLoaded {
        recruits: Vec<Recruit>,
        class_rank: Option<TeamRecruitingRank>,
    },
    DirectoryRefreshed { directory: TeamDirectory },
    Error { page: Option<MenuItem>, message: String },
}

/// Which refresh cadence fired: the scoreboard polls fast while the week-
/// and season-scoped tables refresh on the slow tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshKind {
    Fast,
    Slow,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    RefreshTick(RefreshKind),
}
