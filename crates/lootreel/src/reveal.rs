use crate::select::OpenResult;
use std::time::{Duration, Instant};

/// What the reveal shows at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealFrame {
    Flash { lit: bool },
    Settled,
}

/// Post-animation presentation of a finished open. For the rarest tier it
/// runs `repetitions` on/off flash pairs of at least `interval` each,
/// strictly before the settled frame.
///
/// Steps advance at most one per [`Reveal::advance`], so a slow tick source
/// stretches the sequence instead of skipping steps.
#[derive(Debug, Clone)]
pub struct Reveal {
    pub result: OpenResult,
    interval: Duration,
    steps: u32,
    step: u32,
    /// When the current step was first shown. `None` until a tick shows it.
    shown_at: Option<Instant>,
}

impl Reveal {
    pub fn new(result: OpenResult, flashes: bool, interval: Duration, repetitions: u32) -> Self {
        Self {
            result,
            interval,
            steps: if flashes { repetitions * 2 } else { 0 },
            step: 0,
            shown_at: None,
        }
    }

    pub fn flashes(&self) -> bool {
        self.steps > 0
    }

    /// Shortest time the flash sequence can take.
    pub fn total(&self) -> Duration {
        self.interval * self.steps
    }

    /// The frame currently on screen.
    pub fn frame(&self) -> RevealFrame {
        if self.step >= self.steps {
            RevealFrame::Settled
        } else {
            RevealFrame::Flash {
                lit: self.step % 2 == 0,
            }
        }
    }

    /// Moves to the next step once the current one has been shown for a
    /// full interval, and returns the frame to show at `now`.
    pub fn advance(&mut self, now: Instant) -> RevealFrame {
        if self.step < self.steps {
            match self.shown_at {
                None => self.shown_at = Some(now),
                Some(at) if now.saturating_duration_since(at) >= self.interval => {
                    self.step += 1;
                    self.shown_at = Some(now);
                }
                Some(_) => {}
            }
        }
        self.frame()
    }

    pub fn is_complete(&self) -> bool {
        self.frame() == RevealFrame::Settled
    }
}
