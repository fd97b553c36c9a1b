use crate::geometry::ReelGeometry;
use crate::item::Item;
use crate::select::{CaseSelector, OpenResult};
use crate::settings::ReelSettings;
use crate::tier::{Tier, TierTable};
use rand::Rng;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReelEntry {
    pub item: Item,
    pub tier: Tier,
}

/// Filler cards with the winner spliced in at a fixed index.
#[derive(Debug, Clone)]
pub struct Reel {
    entries: Vec<ReelEntry>,
    winner_index: usize,
}

impl Reel {
    /// Builds `filler_count` synthetic entries, sampled with the open-time
    /// tier weights, and inserts `result` at `winner_index`.
    pub fn build<R: Rng + ?Sized>(
        selector: &CaseSelector<'_>,
        table: &TierTable,
        result: &OpenResult,
        settings: &ReelSettings,
        rng: &mut R,
    ) -> Self {
        let mut entries: Vec<ReelEntry> = (0..settings.filler_count)
            .map(|i| {
                let tier = table.sample_tier(rng);
                let item = selector
                    .pick(tier, rng)
                    .cloned()
                    .unwrap_or_else(|| Item::new(format!("Problem {}", i + 1)));
                ReelEntry { item, tier }
            })
            .collect();

        let winner_index = settings.winner_index();
        entries.insert(
            winner_index,
            ReelEntry {
                item: result.item.clone(),
                tier: result.tier,
            },
        );

        Self {
            entries,
            winner_index,
        }
    }

    pub fn entries(&self) -> &[ReelEntry] {
        &self.entries
    }

    pub fn winner_index(&self) -> usize {
        self.winner_index
    }

    pub fn winner(&self) -> &ReelEntry {
        &self.entries[self.winner_index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// One sampled point of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub progress: f64,
    pub eased: f64,
    pub offset: f64,
}

impl Frame {
    pub fn is_last(&self) -> bool {
        self.progress >= 1.0
    }

    /// Pitch factor for the spin cue, fast at launch and slow near the end.
    pub fn speed_factor(&self) -> f32 {
        (1.0 - self.progress * 0.9).max(0.1) as f32
    }
}

/// Fixed-duration, eased scroll from an off-screen start to the target.
/// Offsets depend only on elapsed wall-clock time, never on tick cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelAnimation {
    pub start: Instant,
    pub duration: Duration,
    pub start_offset: f64,
    pub target_offset: f64,
}

impl ReelAnimation {
    pub fn new(start: Instant, duration: Duration, geometry: &ReelGeometry, winner: usize) -> Self {
        Self {
            start,
            duration,
            start_offset: geometry.start_offset(),
            target_offset: geometry.target_offset(winner),
        }
    }

    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn offset_for(&self, eased: f64) -> f64 {
        if eased >= 1.0 {
            return self.target_offset;
        }
        self.start_offset + (self.target_offset - self.start_offset) * eased
    }

    pub fn frame(&self, now: Instant) -> Frame {
        let progress = self.progress(now);
        let eased = ease_out_cubic(progress);
        Frame {
            progress,
            eased,
            offset: self.offset_for(eased),
        }
    }
}
