use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;

/// Timing and shape of one open. Every field has a default, so a partial
/// `[reel]` table is fine.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReelSettings {
    /// Number of synthetic cards around the winner.
    pub filler_count: usize,
    /// Index the winning card is spliced in at.
    pub winner_index: usize,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "duration_ms")]
    pub duration: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "reveal_pause_ms")]
    pub reveal_pause: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "flash_interval_ms")]
    pub flash_interval: Duration,
    pub flash_repetitions: u32,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "spin_cue_interval_ms")]
    pub spin_cue_interval: Duration,
}

impl Default for ReelSettings {
    fn default() -> Self {
        Self {
            filler_count: 100,
            winner_index: 50,
            duration: Duration::from_millis(3500),
            reveal_pause: Duration::from_millis(500),
            flash_interval: Duration::from_millis(80),
            flash_repetitions: 3,
            spin_cue_interval: Duration::from_millis(50),
        }
    }
}

impl ReelSettings {
    /// The winner can sit at most right after the last filler card.
    pub fn winner_index(&self) -> usize {
        self.winner_index.min(self.filler_count)
    }
}
