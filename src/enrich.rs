//! Join layer: attach team directory attributes and cross-endpoint data
//! (betting lines, broadcast outlets, season records) to fetched rows.
//! Every join is a left join; rows without a match keep going with the
//! unmatched fields empty.

use anyhow::Context;
use cfbd_api::{
    BettingLine, LiveGame, MediaEntry, Poll, ScheduledGame, TeamRecord,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::teams::TeamDirectory;

/// A scoreboard game with directory attributes joined on team id.
#[derive(Debug, Clone, Default)]
pub struct LiveGameRow {
    pub game: LiveGame,
    pub home_color: Option<String>,
    pub home_logo: Option<String>,
    pub away_color: Option<String>,
    pub away_logo: Option<String>,
}

/// A schedule row with kickoff parsed, betting spread and broadcast
/// outlets joined on game id, and directory attributes joined on school.
#[derive(Debug, Clone)]
pub struct ScheduleRow {
    pub game: ScheduledGame,
    pub kickoff: Option<DateTime<Utc>>,
    pub spread: Option<String>,
    pub outlets: Option<String>,
    pub home_color: Option<String>,
    pub away_color: Option<String>,
}

/// A poll rank with the team's season record joined on school.
#[derive(Debug, Clone)]
pub struct PollRow {
    pub rank: u32,
    pub school: String,
    pub conference: String,
    pub first_place_votes: u32,
    pub points: u32,
    /// "W–L" from the records endpoint, "N/A" when the team has none.
    pub record: String,
    pub color: Option<String>,
    pub mascot: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnrichedPoll {
    pub name: String,
    pub rows: Vec<PollRow>,
}

/// A standings row with directory color joined on school.
#[derive(Debug, Clone)]
pub struct StandingRow {
    pub record: TeamRecord,
    pub color: Option<String>,
}

pub fn enrich_scoreboard(games: Vec<LiveGame>, directory: &TeamDirectory) -> Vec<LiveGameRow> {
    games
        .into_iter()
        .map(|game| {
            let home = game.home.id.and_then(|id| directory.by_id(id));
            let away = game.away.id.and_then(|id| directory.by_id(id));
            LiveGameRow {
                home_color: home.map(|s| s.color.clone()),
                home_logo: home.map(|s| s.logo.clone()),
                away_color: away.map(|s| s.color.clone()),
                away_logo: away.map(|s| s.logo.clone()),
                game,
            }
        })
        .collect()
}

/// Parse kickoff dates up front. A schedule row whose start date is present
/// but unparseable aborts the whole pass; a silently wrong date column would
/// corrupt every downstream sort. Missing dates stay None (TBD kickoff).
pub fn clean_schedule(games: &[ScheduledGame]) -> anyhow::Result<Vec<Option<DateTime<Utc>>>> {
    games
        .iter()
        .map(|game| match game.start_date.as_deref() {
            None => Ok(None),
            Some(raw) => {
                let parsed = DateTime::parse_from_rfc3339(raw)
                    .with_context(|| {
                        format!("unparseable start date {raw:?} for game {}", game.id)
                    })?;
                Ok(Some(parsed.with_timezone(&Utc)))
            }
        })
        .collect()
}

/// Several outlets can carry one game; they fold to "ESPN, ABC".
fn fold_outlets(media: Vec<MediaEntry>) -> HashMap<u64, String> {
    let mut folded: HashMap<u64, String> = HashMap::new();
    for entry in media {
        folded
            .entry(entry.game_id)
            .and_modify(|outlets| {
                outlets.push_str(", ");
                outlets.push_str(&entry.outlet);
            })
            .or_insert(entry.outlet);
    }
    folded
}

pub fn enrich_schedule(
    games: Vec<ScheduledGame>,
    lines: Vec<BettingLine>,
    media: Vec<MediaEntry>,
    directory: &TeamDirectory,
) -> anyhow::Result<Vec<ScheduleRow>> {
    let kickoffs = clean_schedule(&games)?;
    let spreads: HashMap<u64, String> = lines
        .into_iter()
        .map(|line| (line.game_id, line.spread))
        .collect();
    let outlets = fold_outlets(media);

    let mut rows: Vec<ScheduleRow> = games
        .into_iter()
        .zip(kickoffs)
        .map(|(game, kickoff)| ScheduleRow {
            spread: spreads.get(&game.id).cloned(),
            outlets: outlets.get(&game.id).cloned(),
            home_color: directory.by_school(&game.home_team).map(|s| s.color.clone()),
            away_color: directory.by_school(&game.away_team).map(|s| s.color.clone()),
            kickoff,
            game,
        })
        .collect();
    rows.sort_by_key(|row| row.kickoff);
    Ok(rows)
}

pub fn enrich_polls(
    polls: Vec<Poll>,
    records: &[TeamRecord],
    directory: &TeamDirectory,
) -> Vec<EnrichedPoll> {
    let by_team: HashMap<&str, &TeamRecord> =
        records.iter().map(|r| (r.team.as_str(), r)).collect();

    polls
        .into_iter()
        .map(|poll| EnrichedPoll {
            name: poll.name,
            rows: poll
                .ranks
                .into_iter()
                .map(|rank| {
                    let record = by_team
                        .get(rank.school.as_str())
                        .map(|r| format!("{}–{}", r.total.wins, r.total.losses))
                        .unwrap_or_else(|| "N/A".to_owned());
                    let style = directory.by_school(&rank.school);
                    PollRow {
                        color: style.map(|s| s.color.clone()),
                        mascot: style.and_then(|s| s.mascot.clone()),
                        rank: rank.rank,
                        school: rank.school,
                        conference: rank.conference,
                        first_place_votes: rank.first_place_votes,
                        points: rank.points,
                        record,
                    }
                })
                .collect(),
        })
        .collect()
}

/// Standings sort: total wins desc, then conference wins desc, then name.
pub fn enrich_standings(
    mut records: Vec<TeamRecord>,
    directory: &TeamDirectory,
) -> Vec<StandingRow> {
    records.sort_by(|a, b| {
        b.total
            .wins
            .cmp(&a.total.wins)
            .then(b.conference_games.wins.cmp(&a.conference_games.wins))
            .then(a.team.cmp(&b.team))
    });
    records
        .into_iter()
        .map(|record| StandingRow {
            color: directory.by_school(&record.team).map(|s| s.color.clone()),
            record,
        })
        .collect()
}

/// Pick the week whose game window contains `now`; past the last window,
/// the final week. Weeks are assumed sorted ascending.
pub fn derive_week(weeks: &[cfbd_api::WeekWindow], now: DateTime<Utc>) -> Option<u8> {
    if weeks.is_empty() {
        return None;
    }
    for window in weeks {
        if let Some(last) = window.last_game {
            if now <= last {
                return Some(window.week);
            }
        }
    }
    weeks.last().map(|w| w.week)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfbd_api::{LiveSide, PollRank, RecordSplit, TeamDirectoryEntry, WeekWindow};
    use chrono::TimeZone;

    fn directory() -> TeamDirectory {
        TeamDirectory::from_entries(vec![
            TeamDirectoryEntry {
                id: 59,
                school: "Georgia Tech".to_owned(),
                mascot: Some("Yellow Jackets".to_owned()),
                classification: Some("fbs".to_owned()),
                color: Some("#003057".to_owned()),
                logos: Some(vec!["https://a.espncdn.com/i/teamlogos/ncaa/500/59.png".to_owned()]),
            },
            TeamDirectoryEntry {
                id: 61,
                school: "Georgia".to_owned(),
                mascot: Some("Bulldogs".to_owned()),
                classification: Some("fbs".to_owned()),
                color: Some("#ba0c2f".to_owned()),
                logos: Some(vec!["https://a.espncdn.com/i/teamlogos/ncaa/500/61.png".to_owned()]),
            },
        ])
    }

    fn scheduled(id: u64, home: &str, away: &str, start: Option<&str>) -> ScheduledGame {
        ScheduledGame {
            id,
            week: Some(1),
            start_date: start.map(str::to_owned),
            home_team: home.to_owned(),
            home_points: None,
            home_line_scores: vec![],
            away_team: away.to_owned(),
            away_points: None,
        }
    }

    #[test]
    fn scoreboard_join_is_left_and_keeps_unmatched_rows() {
        let games = vec![LiveGame {
            id: 1,
            home: LiveSide {
                id: Some(59),
                name: "Georgia Tech".to_owned(),
                points: Some(21),
            },
            away: LiveSide {
                id: Some(999_999),
                name: "Obscure College".to_owned(),
                points: Some(3),
            },
            ..Default::default()
        }];
        let rows = enrich_scoreboard(games, &directory());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].home_color.as_deref(), Some("#003057"));
        assert!(rows[0].away_color.is_none());
        assert!(rows[0].away_logo.is_none());
    }

    #[test]
    fn schedule_enrichment_folds_simulcast_outlets() {
        let games = vec![scheduled(10, "Georgia Tech", "Georgia", Some("2024-11-29T20:30:00Z"))];
        let media = vec![
            MediaEntry { game_id: 10, outlet: "ESPN".to_owned() },
            MediaEntry { game_id: 10, outlet: "ABC".to_owned() },
        ];
        let rows = enrich_schedule(games, vec![], media, &directory()).unwrap();
        assert_eq!(rows[0].outlets.as_deref(), Some("ESPN, ABC"));
    }

    #[test]
    fn schedule_rows_without_lines_or_media_survive() {
        let games = vec![
            scheduled(10, "Georgia Tech", "Nowhere State", Some("2024-09-07T16:00:00Z")),
            scheduled(11, "Georgia", "Georgia Tech", None),
        ];
        let lines = vec![BettingLine { game_id: 10, spread: "Georgia Tech -17.5".to_owned() }];
        let rows = enrich_schedule(games, lines, vec![], &directory()).unwrap();
        assert_eq!(rows.len(), 2);
        let tbd = rows.iter().find(|r| r.game.id == 11).unwrap();
        assert!(tbd.kickoff.is_none());
        assert!(tbd.spread.is_none());
        assert!(tbd.outlets.is_none());
        let dated = rows.iter().find(|r| r.game.id == 10).unwrap();
        assert_eq!(dated.spread.as_deref(), Some("Georgia Tech -17.5"));
        assert!(dated.away_color.is_none());
    }

    #[test]
    fn unparseable_schedule_date_is_a_hard_error() {
        let games = vec![scheduled(12, "Georgia Tech", "Georgia", Some("next saturday"))];
        let err = enrich_schedule(games, vec![], vec![], &directory()).unwrap_err();
        assert!(err.to_string().contains("game 12"));
    }

    #[test]
    fn poll_rows_fall_back_to_na_without_a_record() {
        let polls = vec![Poll {
            name: "AP Top 25".to_owned(),
            ranks: vec![
                PollRank {
                    rank: 1,
                    school: "Georgia".to_owned(),
                    conference: "SEC".to_owned(),
                    first_place_votes: 55,
                    points: 1550,
                },
                PollRank {
                    rank: 2,
                    school: "Mystery Tech".to_owned(),
                    conference: "Sun Belt".to_owned(),
                    first_place_votes: 0,
                    points: 1400,
                },
            ],
        }];
        let records = vec![TeamRecord {
            team: "Georgia".to_owned(),
            total: RecordSplit { games: 12, wins: 11, losses: 1 },
            ..Default::default()
        }];
        let enriched = enrich_polls(polls, &records, &directory());
        assert_eq!(enriched[0].rows[0].record, "11–1");
        assert_eq!(enriched[0].rows[1].record, "N/A");
        assert!(enriched[0].rows[1].color.is_none());
    }

    #[test]
    fn standings_sort_by_total_then_conference_wins() {
        let record = |team: &str, wins: u32, conf_wins: u32| TeamRecord {
            team: team.to_owned(),
            total: RecordSplit { games: 12, wins, losses: 12 - wins },
            conference_games: RecordSplit { games: 8, wins: conf_wins, losses: 8 - conf_wins },
            ..Default::default()
        };
        let rows = enrich_standings(
            vec![record("B", 9, 5), record("A", 9, 7), record("C", 11, 8)],
            &directory(),
        );
        let order: Vec<&str> = rows.iter().map(|r| r.record.team.as_str()).collect();
        assert_eq!(order, ["C", "A", "B"]);
    }

    #[test]
    fn derive_week_picks_the_containing_window() {
        let weeks = vec![
            WeekWindow {
                week: 1,
                first_game: Some(Utc.with_ymd_and_hms(2024, 8, 24, 0, 0, 0).unwrap()),
                last_game: Some(Utc.with_ymd_and_hms(2024, 9, 2, 23, 0, 0).unwrap()),
            },
            WeekWindow {
                week: 2,
                first_game: Some(Utc.with_ymd_and_hms(2024, 9, 5, 0, 0, 0).unwrap()),
                last_game: Some(Utc.with_ymd_and_hms(2024, 9, 7, 23, 0, 0).unwrap()),
            },
        ];
        let mid = Utc.with_ymd_and_hms(2024, 9, 6, 12, 0, 0).unwrap();
        assert_eq!(derive_week(&weeks, mid), Some(2));
        let late = Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap();
        assert_eq!(derive_week(&weeks, late), Some(2));
        assert_eq!(derive_week(&[], mid), None);
    }
}
