pub mod client;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the CFBD wire format
// ---------------------------------------------------------------------------

/// One entry of the team directory (reference data): colors, logos,
/// classification. Serialized as-is to the local `team_info.json` file by the
/// directory refresh routine, so the field names match the file schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamDirectoryEntry {
    pub id: u64,
    pub school: String,
    pub mascot: Option<String>,
    pub classification: Option<String>,
    pub color: Option<String>,
    pub logos: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Possession {
    Home,
    Away,
}

/// A live scoreboard game. Ephemeral: replaced wholesale on every refresh.
#[derive(Debug, Clone, Default)]
pub struct LiveGame {
    pub id: u64,
    pub status: GameStatus,
    pub period: Option<u8>,
    pub clock: Option<String>,
    pub possession: Option<Possession>,
    pub situation: Option<String>,
    pub tv: Option<String>,
    pub spread: Option<f64>,
    pub home: LiveSide,
    pub away: LiveSide,
}

impl LiveGame {
    pub fn is_live(&self) -> bool {
        self.status == GameStatus::InProgress
    }
}

#[derive(Debug, Clone, Default)]
pub struct LiveSide {
    pub id: Option<u64>,
    pub name: String,
    pub points: Option<i32>,
}

/// One week of the season calendar, used to drive the week selector.
#[derive(Debug, Clone, Default)]
pub struct WeekWindow {
    pub week: u8,
    pub first_game: Option<DateTime<Utc>>,
    pub last_game: Option<DateTime<Utc>>,
}

/// A scheduled or completed game from the `/games` endpoint. `start_date` is
/// kept as the raw RFC 3339 string; schedule cleaning parses it downstream
/// and treats an unparseable value as a hard error.
#[derive(Debug, Clone, Default)]
pub struct ScheduledGame {
    pub id: u64,
    pub week: Option<u8>,
    pub start_date: Option<String>,
    pub home_team: String,
    pub home_points: Option<i32>,
    pub home_line_scores: Vec<i32>,
    pub away_team: String,
    pub away_points: Option<i32>,
}

/// Betting line for one game, already narrowed to a single provider.
#[derive(Debug, Clone, Default)]
pub struct BettingLine {
    pub game_id: u64,
    pub spread: String,
}

/// One broadcast row. A game can have several (ESPN + ABC simulcast);
/// enrichment folds them into one comma-joined value.
#[derive(Debug, Clone, Default)]
pub struct MediaEntry {
    pub game_id: u64,
    pub outlet: String,
}

#[derive(Debug, Clone, Default)]
pub struct Poll {
    pub name: String,
    pub ranks: Vec<PollRank>,
}

#[derive(Debug, Clone, Default)]
pub struct PollRank {
    pub rank: u32,
    pub school: String,
    pub conference: String,
    pub first_place_votes: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TeamRecord {
    pub team: String,
    pub conference: Option<String>,
    pub expected_wins: Option<f64>,
    pub total: RecordSplit,
    pub conference_games: RecordSplit,
    pub home_games: RecordSplit,
    pub away_games: RecordSplit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecordSplit {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Conference {
    pub id: u32,
    pub short_name: String,
    pub abbreviation: String,
}

#[derive(Debug, Clone, Default)]
pub struct RosterPlayer {
    pub jersey: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub height: Option<i32>,
    pub weight: Option<i32>,
    pub year: Option<i32>,
    pub home_city: Option<String>,
    pub home_state: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Recruit {
    pub ranking: Option<u32>,
    pub stars: Option<u8>,
    pub rating: Option<f64>,
    pub name: String,
    pub position: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<i32>,
    pub school: Option<String>, // high school
    pub city: Option<String>,
    pub state_province: Option<String>,
}

/// National recruiting-class rank for one team and year.
#[derive(Debug, Clone, Default)]
pub struct TeamRecruitingRank {
    pub rank: Option<u32>,
    pub points: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct DraftPick {
    pub round: Option<u32>,
    pub pick: Option<u32>,
    pub overall: Option<u32>,
    pub nfl_team: String,
    pub name: String,
    pub position: String,
}
