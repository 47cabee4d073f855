use chrono::{DateTime, Utc};

use crate::wire::{
    CalendarWeekWire, ConferenceWire, DraftPickWire, GameLinesWire, GameMediaWire, GameWire,
    PollRankWire, PollWire, RankingWeekWire, RecordSplitWire, RecruitWire, RosterPlayerWire,
    ScoreboardGameWire, TeamRecordWire, TeamRecruitingWire, TeamWire,
};
use crate::{
    BettingLine, Conference, DraftPick, GameStatus, LiveGame, LiveSide, MediaEntry, Poll,
    PollRank, Possession, RecordSplit, Recruit, RosterPlayer, ScheduledGame, TeamDirectoryEntry,
    TeamRecord, TeamRecruitingRank, WeekWindow,
};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const CFBD_BASE: &str = "https://api.collegefootballdata.com";

/// The betting-line provider shown on the schedule page. Other providers'
/// lines are discarded.
const LINE_PROVIDER: &str = "ESPN Bet";

/// CollegeFootballData.com API client. Every request carries the bearer
/// token and asks for JSON; there is no retry or backoff policy.
#[derive(Debug, Clone)]
pub struct CfbdClient {
    client: Client,
    base_url: String,
    token: String,
    timeout: Duration,
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl CfbdClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, CFBD_BASE)
    }

    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("cftui/0.1 (terminal dashboard)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            token: token.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Fetch the live scoreboard for one classification ("fbs" or "fcs").
    pub async fn scoreboard(&self, classification: &str) -> ApiResult<Vec<LiveGame>> {
        let raw: Vec<ScoreboardGameWire> = self
            .get("/scoreboard", &[("classification", classification.to_owned())])
            .await?;
        Ok(raw.iter().map(map_scoreboard_game).collect())
    }

    /// Fetch the season calendar: one window of dates per week.
    pub async fn calendar(&self, year: u16) -> ApiResult<Vec<WeekWindow>> {
        let raw: Vec<CalendarWeekWire> =
            self.get("/calendar", &[("year", year.to_string())]).await?;
        Ok(raw
            .iter()
            .filter(|w| w.season_type.as_deref() != Some("postseason"))
            .map(map_week_window)
            .collect())
    }

    /// Fetch scheduled/completed games for one week.
    pub async fn games(&self, year: u16, week: u8) -> ApiResult<Vec<ScheduledGame>> {
        let raw: Vec<GameWire> = self
            .get(
                "/games",
                &[
                    ("year", year.to_string()),
                    ("week", week.to_string()),
                    ("division", "fbs".to_owned()),
                ],
            )
            .await?;
        Ok(raw.iter().map(map_scheduled_game).collect())
    }

    /// Fetch betting lines for one week, narrowed to a single provider.
    pub async fn lines(&self, year: u16, week: u8) -> ApiResult<Vec<BettingLine>> {
        let raw: Vec<GameLinesWire> = self
            .get(
                "/lines",
                &[("year", year.to_string()), ("week", week.to_string())],
            )
            .await?;
        Ok(raw.iter().filter_map(map_betting_line).collect())
    }

    /// Fetch broadcast outlets for one week. Games simulcast on several
    /// outlets yield several entries with the same game id.
    pub async fn media(&self, year: u16, week: u8) -> ApiResult<Vec<MediaEntry>> {
        let raw: Vec<GameMediaWire> = self
            .get(
                "/games/media",
                &[("year", year.to_string()), ("week", week.to_string())],
            )
            .await?;
        Ok(raw
            .iter()
            .filter_map(|m| {
                Some(MediaEntry {
                    game_id: m.id?,
                    outlet: m.outlet.clone()?,
                })
            })
            .collect())
    }

    /// Fetch poll rankings for one week, ordered AP Top 25 first, then the
    /// Coaches Poll, then any remaining polls.
    pub async fn rankings(&self, year: u16, week: u8) -> ApiResult<Vec<Poll>> {
        let raw: Vec<RankingWeekWire> = self
            .get(
                "/rankings",
                &[("year", year.to_string()), ("week", week.to_string())],
            )
            .await?;
        let polls = raw
            .into_iter()
            .next()
            .and_then(|w| w.polls)
            .unwrap_or_default();
        Ok(order_polls(polls))
    }

    /// Fetch win/loss records, optionally filtered by team or conference.
    pub async fn records(
        &self,
        year: u16,
        team: Option<&str>,
        conference: Option<&str>,
    ) -> ApiResult<Vec<TeamRecord>> {
        let mut query = vec![("year", year.to_string())];
        if let Some(team) = team {
            query.push(("team", team.to_owned()));
        }
        if let Some(conference) = conference {
            query.push(("conference", conference.to_owned()));
        }
        let raw: Vec<TeamRecordWire> = self.get("/records", &query).await?;
        Ok(raw.iter().map(map_team_record).collect())
    }

    /// Fetch FBS conferences for the standings selector, sorted by short name.
    pub async fn conferences(&self) -> ApiResult<Vec<Conference>> {
        let raw: Vec<ConferenceWire> = self.get("/conferences", &[]).await?;
        let mut conferences: Vec<Conference> = raw
            .iter()
            .filter(|c| {
                c.id.map(|id| id <= 50).unwrap_or(false)
                    && c.classification.as_deref() == Some("fbs")
            })
            .map(|c| Conference {
                id: c.id.unwrap_or_default(),
                short_name: c.short_name.clone().unwrap_or_default(),
                abbreviation: c.abbreviation.clone().unwrap_or_default(),
            })
            .collect();
        conferences.sort_by(|a, b| a.short_name.cmp(&b.short_name));
        Ok(conferences)
    }

    /// Fetch one team's roster for a year.
    pub async fn roster(&self, team: &str, year: u16) -> ApiResult<Vec<RosterPlayer>> {
        let raw: Vec<RosterPlayerWire> = self
            .get(
                "/roster",
                &[("team", team.to_owned()), ("year", year.to_string())],
            )
            .await?;
        Ok(raw.iter().map(map_roster_player).collect())
    }

    /// Fetch one team's recruiting class for a year.
    pub async fn recruits(&self, year: u16, team: &str) -> ApiResult<Vec<Recruit>> {
        let raw: Vec<RecruitWire> = self
            .get(
                "/recruiting/players",
                &[("year", year.to_string()), ("team", team.to_owned())],
            )
            .await?;
        Ok(raw.iter().map(map_recruit).collect())
    }

    /// Fetch the national recruiting-class rank for one team and year.
    pub async fn team_recruiting(
        &self,
        year: u16,
        team: &str,
    ) -> ApiResult<Option<TeamRecruitingRank>> {
        let raw: Vec<TeamRecruitingWire> = self
            .get(
                "/recruiting/teams",
                &[("year", year.to_string()), ("team", team.to_owned())],
            )
            .await?;
        Ok(raw.first().map(|r| TeamRecruitingRank {
            rank: r.rank,
            points: r.points,
        }))
    }

    /// Fetch NFL draft picks out of one college program.
    pub async fn draft_picks(&self, year: u16, college: &str) -> ApiResult<Vec<DraftPick>> {
        let raw: Vec<DraftPickWire> = self
            .get(
                "/draft/picks",
                &[("year", year.to_string()), ("college", college.to_owned())],
            )
            .await?;
        Ok(raw
            .iter()
            .map(|p| DraftPick {
                round: p.round,
                pick: p.pick,
                overall: p.overall,
                nfl_team: p.nfl_team.clone().unwrap_or_default(),
                name: p.name.clone().unwrap_or_default(),
                position: p.position.clone().unwrap_or_default(),
            })
            .collect())
    }

    /// Fetch the full team directory. The caller persists this to the local
    /// reference file; pages read the file, not this endpoint.
    pub async fn teams(&self) -> ApiResult<Vec<TeamDirectoryEntry>> {
        let raw: Vec<TeamWire> = self.get("/teams", &[]).await?;
        Ok(raw
            .iter()
            .filter_map(|t| {
                Some(TeamDirectoryEntry {
                    id: t.id?,
                    school: t.school.clone()?,
                    mascot: t.mascot.clone(),
                    classification: t.classification.clone(),
                    color: t.color.clone(),
                    logos: t.logos.clone(),
                })
            })
            .collect())
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.clone())),
            Err(e) => {
                // CFBD answers 400 for filters with no data (week past the end
                // of the season, pre-portal years). Callers treat that as an
                // empty result, not a failure.
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.clone()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: CFBD wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_scoreboard_game(g: &ScoreboardGameWire) -> LiveGame {
    LiveGame {
        id: g.id.unwrap_or_default(),
        status: parse_status(g.status.as_deref().unwrap_or_default()),
        period: g.period.and_then(|p| u8::try_from(p).ok()),
        clock: g.clock.clone(),
        possession: g.possession.as_deref().and_then(parse_possession),
        situation: g.situation.clone(),
        tv: g.tv.clone(),
        spread: g.betting.as_ref().and_then(|b| b.spread),
        home: map_scoreboard_side(g.home_team.as_ref()),
        away: map_scoreboard_side(g.away_team.as_ref()),
    }
}

fn map_scoreboard_side(side: Option<&crate::wire::ScoreboardSideWire>) -> LiveSide {
    let Some(side) = side else {
        return LiveSide::default();
    };
    LiveSide {
        id: side.id,
        name: side.name.clone().unwrap_or_default(),
        points: side.points.and_then(|p| i32::try_from(p).ok()),
    }
}

fn parse_status(s: &str) -> GameStatus {
    match s {
        "in_progress" => GameStatus::InProgress,
        "completed" | "final" => GameStatus::Final,
        _ => GameStatus::Scheduled,
    }
}

fn parse_possession(s: &str) -> Option<Possession> {
    match s {
        "home" => Some(Possession::Home),
        "away" => Some(Possession::Away),
        _ => None,
    }
}

fn map_week_window(w: &CalendarWeekWire) -> WeekWindow {
    WeekWindow {
        week: w.week.and_then(|n| u8::try_from(n).ok()).unwrap_or_default(),
        first_game: parse_utc(w.first_game_start.as_deref()),
        last_game: parse_utc(w.last_game_start.as_deref()),
    }
}

fn parse_utc(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn map_scheduled_game(g: &GameWire) -> ScheduledGame {
    ScheduledGame {
        id: g.id.unwrap_or_default(),
        week: g.week.and_then(|w| u8::try_from(w).ok()),
        start_date: g.start_date.clone(),
        home_team: g.home_team.clone().unwrap_or_default(),
        home_points: g.home_points.and_then(|p| i32::try_from(p).ok()),
        home_line_scores: g
            .home_line_scores
            .clone()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| i32::try_from(s).ok())
            .collect(),
        away_team: g.away_team.clone().unwrap_or_default(),
        away_points: g.away_points.and_then(|p| i32::try_from(p).ok()),
    }
}

/// Narrow one game's provider lines to the configured provider. Games where
/// that provider posted no line are dropped; the schedule left-join renders
/// them with an empty spread cell.
fn map_betting_line(g: &GameLinesWire) -> Option<BettingLine> {
    let game_id = g.id?;
    let lines = g.lines.as_deref().unwrap_or_default();
    let line = lines
        .iter()
        .find(|l| l.provider.as_deref() == Some(LINE_PROVIDER))?;
    Some(BettingLine {
        game_id,
        spread: line.formatted_spread.clone()?,
    })
}

/// AP first, Coaches second, everything else in response order.
fn order_polls(polls: Vec<PollWire>) -> Vec<Poll> {
    let mut ap = None;
    let mut coaches = None;
    let mut others = Vec::new();
    for poll in polls {
        match poll.poll.as_deref() {
            Some("AP Top 25") => ap = Some(poll),
            Some("Coaches Poll") => coaches = Some(poll),
            _ => others.push(poll),
        }
    }
    ap.into_iter()
        .chain(coaches)
        .chain(others)
        .map(|p| map_poll(&p))
        .collect()
}

fn map_poll(p: &PollWire) -> Poll {
    Poll {
        name: p.poll.clone().unwrap_or_default(),
        ranks: p
            .ranks
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(map_poll_rank)
            .collect(),
    }
}

fn map_poll_rank(r: &PollRankWire) -> PollRank {
    PollRank {
        rank: r.rank.unwrap_or_default(),
        school: r.school.clone().unwrap_or_default(),
        conference: r.conference.clone().unwrap_or_default(),
        first_place_votes: r.first_place_votes.unwrap_or_default(),
        points: r.points.unwrap_or_default(),
    }
}

fn map_team_record(r: &TeamRecordWire) -> TeamRecord {
    TeamRecord {
        team: r.team.clone().unwrap_or_default(),
        conference: r.conference.clone(),
        expected_wins: r.expected_wins,
        total: map_record_split(r.total.as_ref()),
        conference_games: map_record_split(r.conference_games.as_ref()),
        home_games: map_record_split(r.home_games.as_ref()),
        away_games: map_record_split(r.away_games.as_ref()),
    }
}

fn map_record_split(s: Option<&RecordSplitWire>) -> RecordSplit {
    let Some(s) = s else {
        return RecordSplit::default();
    };
    RecordSplit {
        games: s.games.unwrap_or_default(),
        wins: s.wins.unwrap_or_default(),
        losses: s.losses.unwrap_or_default(),
    }
}

fn map_roster_player(p: &RosterPlayerWire) -> RosterPlayer {
    RosterPlayer {
        jersey: p.jersey.and_then(|j| i32::try_from(j).ok()),
        first_name: p.first_name.clone().unwrap_or_default(),
        last_name: p.last_name.clone().unwrap_or_default(),
        position: p.position.clone(),
        height: p.height.and_then(|h| i32::try_from(h).ok()),
        weight: p.weight.and_then(|w| i32::try_from(w).ok()),
        year: p.year.and_then(|y| i32::try_from(y).ok()),
        home_city: p.home_city.clone(),
        home_state: p.home_state.clone(),
    }
}

fn map_recruit(r: &RecruitWire) -> Recruit {
    Recruit {
        ranking: r.ranking,
        stars: r.stars,
        rating: r.rating,
        name: r.name.clone().unwrap_or_default(),
        position: r.position.clone(),
        height: r.height,
        weight: r.weight.and_then(|w| i32::try_from(w).ok()),
        school: r.school.clone(),
        city: r.city.clone(),
        state_province: r.state_province.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("scheduled"), GameStatus::Scheduled);
        assert_eq!(parse_status("in_progress"), GameStatus::InProgress);
        assert_eq!(parse_status("completed"), GameStatus::Final);
        assert_eq!(parse_status(""), GameStatus::Scheduled);
    }

    #[test]
    fn scoreboard_game_maps_both_sides_and_betting() {
        let raw: ScoreboardGameWire = serde_json::from_str(
            r#"{
                "id": 401628455,
                "status": "in_progress",
                "period": 2,
                "clock": "00:11:23",
                "possession": "away",
                "situation": "3rd & 7 at GT 42",
                "tv": "ESPN",
                "homeTeam": {"id": 59, "name": "Georgia Tech", "points": 14},
                "awayTeam": {"id": 61, "name": "Georgia", "points": 21},
                "betting": {"spread": -7.5}
            }"#,
        )
        .unwrap();
        let game = map_scoreboard_game(&raw);
        assert!(game.is_live());
        assert_eq!(game.home.name, "Georgia Tech");
        assert_eq!(game.home.points, Some(14));
        assert_eq!(game.away.points, Some(21));
        assert_eq!(game.possession, Some(Possession::Away));
        assert_eq!(game.spread, Some(-7.5));
    }

    #[test]
    fn scoreboard_game_with_missing_fields_defaults() {
        let raw: ScoreboardGameWire = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        let game = map_scoreboard_game(&raw);
        assert_eq!(game.status, GameStatus::Scheduled);
        assert!(game.home.points.is_none());
        assert!(game.clock.is_none());
        assert!(game.possession.is_none());
    }

    #[test]
    fn betting_line_picks_only_the_configured_provider() {
        let raw: GameLinesWire = serde_json::from_str(
            r#"{
                "id": 7,
                "lines": [
                    {"provider": "Bovada", "formattedSpread": "UGA -6"},
                    {"provider": "ESPN Bet", "formattedSpread": "UGA -7.5"}
                ]
            }"#,
        )
        .unwrap();
        let line = map_betting_line(&raw).unwrap();
        assert_eq!(line.game_id, 7);
        assert_eq!(line.spread, "UGA -7.5");
    }

    #[test]
    fn betting_line_without_provider_is_dropped() {
        let raw: GameLinesWire = serde_json::from_str(
            r#"{"id": 8, "lines": [{"provider": "Bovada", "formattedSpread": "X -1"}]}"#,
        )
        .unwrap();
        assert!(map_betting_line(&raw).is_none());
    }

    #[test]
    fn polls_are_ordered_ap_then_coaches() {
        let polls: Vec<PollWire> = serde_json::from_str(
            r#"[
                {"poll": "FCS Coaches Poll", "ranks": []},
                {"poll": "Coaches Poll", "ranks": []},
                {"poll": "AP Top 25", "ranks": [{"rank": 1, "school": "Oregon", "conference": "Big Ten", "points": 1541}]}
            ]"#,
        )
        .unwrap();
        let ordered = order_polls(polls);
        let names: Vec<&str> = ordered.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["AP Top 25", "Coaches Poll", "FCS Coaches Poll"]);
        // firstPlaceVotes is absent for most ranks; it must default to 0.
        assert_eq!(ordered[0].ranks[0].first_place_votes, 0);
    }

    #[test]
    fn record_with_missing_splits_defaults_to_zero() {
        let raw: TeamRecordWire = serde_json::from_str(
            r#"{"team": "Georgia Tech", "total": {"games": 13, "wins": 7, "losses": 6}}"#,
        )
        .unwrap();
        let record = map_team_record(&raw);
        assert_eq!(record.total.wins, 7);
        assert_eq!(record.conference_games.games, 0);
        assert_eq!(record.away_games.losses, 0);
    }

    #[tokio::test]
    async fn get_decodes_2xx_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/conferences")
            .match_header("authorization", "Bearer test-token")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_body(
                r#"[
                    {"id": 1, "shortName": "ACC", "abbreviation": "ACC", "classification": "fbs"},
                    {"id": 151, "shortName": "MEAC", "abbreviation": "MEAC", "classification": "fcs"}
                ]"#,
            )
            .create_async()
            .await;

        let client = CfbdClient::with_base_url("test-token", server.url());
        let conferences = client.conferences().await.unwrap();
        mock.assert_async().await;
        // id > 50 / non-fbs entries are filtered out.
        assert_eq!(conferences.len(), 1);
        assert_eq!(conferences[0].short_name, "ACC");
    }

    #[tokio::test]
    async fn get_treats_4xx_as_empty_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"message": "invalid week"}"#)
            .create_async()
            .await;

        let client = CfbdClient::with_base_url("t", server.url());
        let games = client.games(2024, 99).await.unwrap();
        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn get_surfaces_5xx_as_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = CfbdClient::with_base_url("t", server.url());
        let err = client.scoreboard("fbs").await.unwrap_err();
        assert!(matches!(err, ApiError::Api(_, _)));
    }

    #[tokio::test]
    async fn teams_endpoint_maps_directory_entries() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/teams")
            .with_status(200)
            .with_body(
                r##"[
                    {"id": 59, "school": "Georgia Tech", "mascot": "Yellow Jackets",
                     "classification": "fbs", "color": "#003057",
                     "logos": ["http://a.espncdn.com/i/teamlogos/ncaa/500/59.png"]},
                    {"school": "No Id U"}
                ]"##,
            )
            .create_async()
            .await;

        let client = CfbdClient::with_base_url("t", server.url());
        let teams = client.teams().await.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].school, "Georgia Tech");
        assert_eq!(teams[0].logos.as_ref().unwrap().len(), 1);
    }
}
