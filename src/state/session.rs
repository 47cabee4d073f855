use cfbd_api::{Conference, WeekWindow};
use chrono::{DateTime, Datelike, Utc};

use crate::enrich::derive_week;

pub const DEFAULT_TEAM: &str = "Georgia Tech";
pub const DEFAULT_YEAR: u16 = 2024;

/// Earliest season offered by the year selector.
const FIRST_SELECTABLE_YEAR: u16 = 2000;

/// The user's current selections: which team, season, week, and conference
/// every data page is scoped to. Shared across tabs so switching pages keeps
/// the same context.
#[derive(Debug, Clone)]
pub struct SessionSelection {
    pub team: String,
    pub year: u16,
    pub week: u8,
    pub conference: Option<String>,
    /// Once the user touches the week selector, calendar loads stop
    /// overriding their choice.
    pub week_pinned: bool,
}

impl Default for SessionSelection {
    fn default() -> Self {
        Self {
            team: DEFAULT_TEAM.to_string(),
            year: DEFAULT_YEAR,
            week: 1,
            conference: None,
            week_pinned: false,
        }
    }
}

impl SessionSelection {
    /// Adopt the week derived from a freshly loaded calendar unless the user
    /// has already picked one.
    pub fn apply_calendar(&mut self, weeks: &[WeekWindow]) {
        if self.week_pinned {
            return;
        }
        if let Some(week) = derive_week(weeks, Utc::now()) {
            self.week = week;
        }
    }

    pub fn cycle_team(&mut self, schools: &[String], forward: bool) {
        self.team = cycle(schools, &self.team, forward)
            .cloned()
            .unwrap_or_else(|| self.team.clone());
    }

    pub fn cycle_year(&mut self, forward: bool) {
        let max = season_year(Utc::now());
        self.year = if forward {
            (self.year + 1).min(max)
        } else {
            self.year.saturating_sub(1).max(FIRST_SELECTABLE_YEAR)
        };
        // A different season has a different calendar; re-derive the week.
        self.week_pinned = false;
        self.week = 1;
    }

    pub fn cycle_week(&mut self, weeks: &[WeekWindow], forward: bool) {
        self.week_pinned = true;
        if weeks.is_empty() {
            let next = if forward {
                self.week.saturating_add(1).min(15)
            } else {
                self.week.saturating_sub(1).max(1)
            };
            self.week = next;
            return;
        }
        let numbers: Vec<u8> = weeks.iter().map(|w| w.week).collect();
        if let Some(week) = cycle_by(&numbers, self.week, forward) {
            self.week = week;
        }
    }

    pub fn cycle_conference(&mut self, conferences: &[Conference], forward: bool) {
        let names: Vec<String> = conferences.iter().map(|c| c.short_name.clone()).collect();
        if names.is_empty() {
            return;
        }
        let current = self.conference.clone().unwrap_or_else(|| names[0].clone());
        self.conference = cycle(&names, &current, forward).cloned().or(self.conference.take());
    }
}

/// College football seasons span the new year: a January bowl game still
/// belongs to the previous season. August is the first month of a season.
pub fn season_year(now: DateTime<Utc>) -> u16 {
    let year = now.year() as u16;
    if now.month() >= 8 { year } else { year - 1 }
}

fn cycle<'a, T: PartialEq>(items: &'a [T], current: &T, forward: bool) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let pos = items.iter().position(|i| i == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % items.len()
    } else {
        (pos + items.len() - 1) % items.len()
    };
    items.get(next)
}

fn cycle_by(items: &[u8], current: u8, forward: bool) -> Option<u8> {
    cycle(items, &current, forward).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn season_rolls_over_in_august() {
        let january = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        assert_eq!(season_year(january), 2024);
        let august = Utc.with_ymd_and_hms(2025, 8, 24, 0, 0, 0).unwrap();
        assert_eq!(season_year(august), 2025);
        let november = Utc.with_ymd_and_hms(2024, 11, 30, 0, 0, 0).unwrap();
        assert_eq!(season_year(november), 2024);
    }

    #[test]
    fn team_cycling_wraps_both_directions() {
        let schools = vec!["Alpha".to_string(), "Beta".to_string(), "Gamma".to_string()];
        let mut session = SessionSelection {
            team: "Gamma".to_string(),
            ..Default::default()
        };
        session.cycle_team(&schools, true);
        assert_eq!(session.team, "Alpha");
        session.cycle_team(&schools, false);
        assert_eq!(session.team, "Gamma");
    }

    #[test]
    fn week_cycling_pins_the_selection() {
        let weeks = vec![
            WeekWindow { week: 1, ..Default::default() },
            WeekWindow { week: 2, ..Default::default() },
            WeekWindow { week: 3, ..Default::default() },
        ];
        let mut session = SessionSelection::default();
        session.week = 2;
        session.cycle_week(&weeks, true);
        assert_eq!(session.week, 3);
        assert!(session.week_pinned);
        // Calendar loads no longer override a pinned week.
        session.apply_calendar(&weeks);
        assert_eq!(session.week, 3);
    }

    #[test]
    fn conference_defaults_to_first_then_cycles() {
        let conferences = vec![
            Conference { id: 1, short_name: "ACC".to_string(), abbreviation: "ACC".to_string() },
            Conference { id: 8, short_name: "SEC".to_string(), abbreviation: "SEC".to_string() },
        ];
        let mut session = SessionSelection::default();
        assert!(session.conference.is_none());
        session.cycle_conference(&conferences, true);
        assert_eq!(session.conference.as_deref(), Some("SEC"));
        session.cycle_conference(&conferences, true);
        assert_eq!(session.conference.as_deref(), Some("ACC"));
    }

    #[test]
    fn year_cycling_resets_the_week_pin() {
        let mut session = SessionSelection::default();
        session.week_pinned = true;
        session.week = 9;
        session.cycle_year(false);
        assert!(!session.week_pinned);
        assert_eq!(session.week, 1);
    }
}
