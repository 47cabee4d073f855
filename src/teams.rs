use anyhow::Context;
use cfbd_api::TeamDirectoryEntry;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const TEAMS_FILE: &str = "team_info.json";

/// Logo URLs known to be wrong in the upstream feed. Dropped by exact match;
/// the affected team falls back to the no-logo default like any missing join.
const EXCLUDED_LOGOS: &[&str] = &["http://a.espncdn.com/i/teamlogos/ncaa/500/2127.png"];

/// Display attributes for one team, shaped from the reference file.
#[derive(Debug, Clone)]
pub struct TeamStyle {
    pub id: u64,
    pub school: String,
    pub logo: String,
    pub color: String,
    pub mascot: Option<String>,
}

/// The team reference directory: loaded once from `team_info.json`, shared
/// read-only by every page for the life of the process. The file itself is
/// only rewritten by the explicit refresh routine.
#[derive(Debug, Default)]
pub struct TeamDirectory {
    styles: Vec<TeamStyle>,
    by_id: HashMap<u64, usize>,
    by_school: HashMap<String, usize>,
    /// All fbs/fcs school names (sorted), including teams without usable
    /// logo or color; the team selector offers every school in the file.
    schools: Vec<String>,
}

impl TeamDirectory {
    /// Resolve the reference-file path: `CFTUI_TEAMS_JSON` env override,
    /// else `team_info.json` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var("CFTUI_TEAMS_JSON")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(TEAMS_FILE))
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read team directory {}", path.display()))?;
        let entries: Vec<TeamDirectoryEntry> = serde_json::from_str(&content)
            .with_context(|| format!("invalid team directory json at {}", path.display()))?;
        debug!("loaded {} team directory entries", entries.len());
        Ok(Self::from_entries(entries))
    }

    /// Persist freshly fetched directory entries, then reload from them.
    /// This is the only writer of the reference file.
    pub fn save(path: &Path, entries: &[TeamDirectoryEntry]) -> anyhow::Result<()> {
        let payload = serde_json::to_string(entries).context("serialize team directory")?;
        std::fs::write(path, payload)
            .with_context(|| format!("could not write team directory {}", path.display()))?;
        Ok(())
    }

    /// Shape raw entries into the lookup table:
    /// entries missing logo or color are dropped, the first logo of a
    /// multi-logo list is selected, and `http://` URLs become `https://`.
    pub fn from_entries(entries: Vec<TeamDirectoryEntry>) -> Self {
        let mut schools: Vec<String> = entries
            .iter()
            .filter(|e| {
                matches!(e.classification.as_deref(), Some("fbs") | Some("fcs"))
            })
            .map(|e| e.school.clone())
            .collect();
        schools.sort();

        let mut directory = TeamDirectory {
            schools,
            ..Default::default()
        };

        for entry in entries {
            let Some(color) = entry.color else { continue };
            let Some(logo) = entry.logos.as_deref().and_then(|l| l.first()) else {
                continue;
            };
            if EXCLUDED_LOGOS.contains(&logo.as_str()) {
                warn!("excluding known-bad logo url for {}", entry.school);
                continue;
            }
            let idx = directory.styles.len();
            directory.by_id.insert(entry.id, idx);
            directory.by_school.insert(entry.school.clone(), idx);
            directory.styles.push(TeamStyle {
                id: entry.id,
                school: entry.school,
                logo: logo.replacen("http://", "https://", 1),
                color,
                mascot: entry.mascot,
            });
        }
        directory
    }

    /// Exact-match lookup by team id (scoreboard join key).
    pub fn by_id(&self, id: u64) -> Option<&TeamStyle> {
        self.by_id.get(&id).map(|&idx| &self.styles[idx])
    }

    /// Exact-match lookup by school name (schedule/polls/standings join key).
    pub fn by_school(&self, school: &str) -> Option<&TeamStyle> {
        self.by_school.get(school).map(|&idx| &self.styles[idx])
    }

    pub fn fbs_fcs_schools(&self) -> &[String] {
        &self.schools
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        id: u64,
        school: &str,
        color: Option<&str>,
        logos: Option<Vec<&str>>,
        classification: &str,
    ) -> TeamDirectoryEntry {
        TeamDirectoryEntry {
            id,
            school: school.to_owned(),
            mascot: Some("Testers".to_owned()),
            classification: Some(classification.to_owned()),
            color: color.map(str::to_owned),
            logos: logos.map(|l| l.into_iter().map(str::to_owned).collect()),
        }
    }

    #[test]
    fn first_logo_is_selected_from_a_list() {
        let dir = TeamDirectory::from_entries(vec![entry(
            59,
            "Georgia Tech",
            Some("#003057"),
            Some(vec![
                "https://a.espncdn.com/i/teamlogos/ncaa/500/59.png",
                "https://a.espncdn.com/i/teamlogos/ncaa/500-dark/59.png",
            ]),
            "fbs",
        )]);
        let style = dir.by_id(59).unwrap();
        assert_eq!(style.logo, "https://a.espncdn.com/i/teamlogos/ncaa/500/59.png");
    }

    #[test]
    fn entries_missing_logo_or_color_are_dropped() {
        let dir = TeamDirectory::from_entries(vec![
            entry(1, "No Color U", None, Some(vec!["https://x/1.png"]), "fbs"),
            entry(2, "No Logo U", Some("#123456"), None, "fbs"),
            entry(3, "Empty Logos U", Some("#123456"), Some(vec![]), "fbs"),
            entry(4, "Complete U", Some("#123456"), Some(vec!["https://x/4.png"]), "fbs"),
        ]);
        assert_eq!(dir.len(), 1);
        assert!(dir.by_school("Complete U").is_some());
        // Dropped teams still appear in the selector list.
        assert_eq!(dir.fbs_fcs_schools().len(), 4);
    }

    #[test]
    fn http_logo_urls_are_rewritten_to_https() {
        let dir = TeamDirectory::from_entries(vec![entry(
            5,
            "Plain U",
            Some("#000000"),
            Some(vec!["http://a.espncdn.com/i/teamlogos/ncaa/500/5.png"]),
            "fcs",
        )]);
        assert_eq!(
            dir.by_school("Plain U").unwrap().logo,
            "https://a.espncdn.com/i/teamlogos/ncaa/500/5.png"
        );
    }

    #[test]
    fn known_bad_logo_is_excluded_by_exact_match() {
        let dir = TeamDirectory::from_entries(vec![entry(
            2127,
            "Charleston Southern",
            Some("#2e3192"),
            Some(vec![EXCLUDED_LOGOS[0]]),
            "fcs",
        )]);
        assert!(dir.by_id(2127).is_none());
        assert_eq!(dir.fbs_fcs_schools(), &["Charleston Southern".to_owned()]);
    }

    #[test]
    fn selector_list_is_sorted_and_filtered_to_fbs_fcs() {
        let dir = TeamDirectory::from_entries(vec![
            entry(1, "Zeta", Some("#111111"), Some(vec!["https://x/z.png"]), "fbs"),
            entry(2, "Alpha", Some("#222222"), Some(vec!["https://x/a.png"]), "fcs"),
            entry(3, "Club Team", Some("#333333"), Some(vec!["https://x/c.png"]), "iii"),
        ]);
        assert_eq!(dir.fbs_fcs_schools(), &["Alpha".to_owned(), "Zeta".to_owned()]);
    }
}
