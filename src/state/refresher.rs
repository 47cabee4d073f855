use crate::state::messages::{RefreshKind, UiEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Live scoreboard cadence.
const FAST_SECS: u64 = 20;
/// Everything else (schedule, polls, standings, roster, recruits).
const SLOW_SECS: u64 = 60;

/// Emits refresh ticks on two cadences. Ticks are UI events rather than
/// network requests: the main loop decides what to fetch from the active
/// tab and the current session, and the serial worker queue keeps a slow
/// pass from overlapping the next one.
pub struct PeriodicRefresher {
    ui_events: mpsc::Sender<UiEvent>,
}

impl PeriodicRefresher {
    pub fn new(ui_events: mpsc::Sender<UiEvent>) -> Self {
        Self { ui_events }
    }

    pub async fn run(self) {
        let mut fast = interval(Duration::from_secs(FAST_SECS));
        let mut slow = interval(Duration::from_secs(SLOW_SECS));
        // Skip the immediate first ticks so startup loading isn't double-triggered.
        fast.tick().await;
        slow.tick().await;

        loop {
            let kind = tokio::select! {
                _ = fast.tick() => RefreshKind::Fast,
                _ = slow.tick() => RefreshKind::Slow,
            };
            if self.ui_events.send(UiEvent::RefreshTick(kind)).await.is_err() {
                break;
            }
        }
    }
}
