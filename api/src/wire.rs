/// CFBD API raw wire types — serde shapes for deserializing CFBD responses.
/// These map to the clean domain types via the map_* fns in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (/scoreboard)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardGameWire {
    pub id: Option<u64>,
    pub status: Option<String>, // "scheduled" | "in_progress" | "completed"
    pub period: Option<i64>,
    pub clock: Option<String>, // "HH:MM:SS" or "MM:SS"
    pub situation: Option<String>,
    pub possession: Option<String>, // "home" | "away"
    pub tv: Option<String>,
    #[serde(rename = "homeTeam")]
    pub home_team: Option<ScoreboardSideWire>,
    #[serde(rename = "awayTeam")]
    pub away_team: Option<ScoreboardSideWire>,
    pub betting: Option<ScoreboardBettingWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardSideWire {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub points: Option<i64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardBettingWire {
    pub spread: Option<f64>,
}

// ---------------------------------------------------------------------------
// Calendar  (/calendar)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CalendarWeekWire {
    pub week: Option<u32>,
    #[serde(rename = "seasonType")]
    pub season_type: Option<String>,
    #[serde(rename = "firstGameStart")]
    pub first_game_start: Option<String>,
    #[serde(rename = "lastGameStart")]
    pub last_game_start: Option<String>,
}

// ---------------------------------------------------------------------------
// Games  (/games)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GameWire {
    pub id: Option<u64>,
    pub week: Option<u32>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>, // RFC 3339
    #[serde(rename = "homeTeam")]
    pub home_team: Option<String>,
    #[serde(rename = "homePoints")]
    pub home_points: Option<i64>,
    #[serde(rename = "homeLineScores")]
    pub home_line_scores: Option<Vec<i64>>,
    #[serde(rename = "awayTeam")]
    pub away_team: Option<String>,
    #[serde(rename = "awayPoints")]
    pub away_points: Option<i64>,
}

// ---------------------------------------------------------------------------
// Betting lines  (/lines) — one entry per game, several provider lines each
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GameLinesWire {
    pub id: Option<u64>,
    pub lines: Option<Vec<LineWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LineWire {
    pub provider: Option<String>,
    #[serde(rename = "formattedSpread")]
    pub formatted_spread: Option<String>,
}

// ---------------------------------------------------------------------------
// Broadcast media  (/games/media) — a game can appear on several outlets
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GameMediaWire {
    pub id: Option<u64>,
    pub outlet: Option<String>,
}

// ---------------------------------------------------------------------------
// Rankings  (/rankings)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RankingWeekWire {
    pub week: Option<u32>,
    pub polls: Option<Vec<PollWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PollWire {
    pub poll: Option<String>, // "AP Top 25", "Coaches Poll", ...
    pub ranks: Option<Vec<PollRankWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PollRankWire {
    pub rank: Option<u32>,
    pub school: Option<String>,
    pub conference: Option<String>,
    #[serde(rename = "firstPlaceVotes")]
    pub first_place_votes: Option<u32>,
    pub points: Option<u32>,
}

// ---------------------------------------------------------------------------
// Records  (/records)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamRecordWire {
    pub team: Option<String>,
    pub conference: Option<String>,
    #[serde(rename = "expectedWins")]
    pub expected_wins: Option<f64>,
    pub total: Option<RecordSplitWire>,
    #[serde(rename = "conferenceGames")]
    pub conference_games: Option<RecordSplitWire>,
    #[serde(rename = "homeGames")]
    pub home_games: Option<RecordSplitWire>,
    #[serde(rename = "awayGames")]
    pub away_games: Option<RecordSplitWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RecordSplitWire {
    pub games: Option<u32>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
}

// ---------------------------------------------------------------------------
// Conferences  (/conferences)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConferenceWire {
    pub id: Option<u32>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub abbreviation: Option<String>,
    pub classification: Option<String>,
}

// ---------------------------------------------------------------------------
// Roster  (/roster)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RosterPlayerWire {
    pub jersey: Option<i64>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub year: Option<i64>,
    #[serde(rename = "homeCity")]
    pub home_city: Option<String>,
    #[serde(rename = "homeState")]
    pub home_state: Option<String>,
}

// ---------------------------------------------------------------------------
// Recruiting  (/recruiting/players, /recruiting/teams)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RecruitWire {
    pub ranking: Option<u32>,
    pub stars: Option<u8>,
    pub rating: Option<f64>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<i64>,
    pub school: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "stateProvince")]
    pub state_province: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamRecruitingWire {
    pub rank: Option<u32>,
    pub points: Option<f64>,
}

// ---------------------------------------------------------------------------
// NFL draft picks  (/draft/picks)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct DraftPickWire {
    pub round: Option<u32>,
    pub pick: Option<u32>,
    pub overall: Option<u32>,
    #[serde(rename = "nflTeam")]
    pub nfl_team: Option<String>,
    pub name: Option<String>,
    pub position: Option<String>,
}

// ---------------------------------------------------------------------------
// Team directory  (/teams)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamWire {
    pub id: Option<u64>,
    pub school: Option<String>,
    pub mascot: Option<String>,
    pub classification: Option<String>,
    pub color: Option<String>,
    pub logos: Option<Vec<String>>,
}
