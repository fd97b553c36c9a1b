use crate::audio::{AudioSink, SoundCue};
use crate::geometry::ReelGeometry;
use crate::reel::{Reel, ReelAnimation};
use crate::render::{self, Canvas, StageMode};
use crate::reveal::{Reveal, RevealFrame};
use crate::select::{CaseSelector, OpenResult};
use crate::settings::ReelSettings;
use crate::source::{ItemSource, Library, SourceError};
use crate::tier::TierTable;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::time::Instant;
use strum::IntoStaticStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpenError {
    #[error("No items to open, add some to the item list first")]
    NoItems,
}

#[derive(Debug, Clone, IntoStaticStr)]
pub enum Phase {
    Idle,
    Animating {
        animation: ReelAnimation,
        last_spin_cue: Option<Instant>,
    },
    Paused {
        until: Instant,
    },
    Revealing(Reveal),
}

/// The reel currently on screen. Outlives its open so the final frame
/// keeps rendering until the next open replaces it.
#[derive(Debug, Clone)]
pub struct Stage {
    pub reel: Reel,
    pub result: OpenResult,
    pub offset: f64,
    pub mode: StageMode,
}

/// What the caller should do after a tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tick {
    pub redraw: bool,
    pub keep_ticking: bool,
    pub finished: Option<OpenResult>,
}

/// Owns everything one case opener needs and advances the
/// select → animate → pause → reveal lifecycle one tick at a time.
/// Single-threaded: the caller drives `tick` from its own timer.
pub struct CaseOpener {
    library: Library,
    table: &'static TierTable,
    settings: ReelSettings,
    geometry: ReelGeometry,
    rng: ChaCha20Rng,
    audio: Box<dyn AudioSink>,
    phase: Phase,
    stage: Option<Stage>,
}

impl CaseOpener {
    pub fn new(
        library: Library,
        table: &'static TierTable,
        settings: ReelSettings,
        rng: ChaCha20Rng,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        Self {
            library,
            table,
            settings,
            geometry: ReelGeometry::default(),
            rng,
            audio,
            phase: Phase::Idle,
            stage: None,
        }
    }

    /// Loads `source` with a generator seeded from `seed`, or from entropy.
    pub fn from_source<S: ItemSource + ?Sized>(
        source: &S,
        table: &'static TierTable,
        settings: ReelSettings,
        seed: Option<u64>,
        audio: Box<dyn AudioSink>,
    ) -> Result<Self, SourceError> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed.unwrap_or_else(rand::random));
        let library = Library::load(source, &mut rng)?;
        Ok(Self::new(library, table, settings, rng, audio))
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn item_count(&self) -> usize {
        self.library.len()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn stage(&self) -> Option<&Stage> {
        self.stage.as_ref()
    }

    pub fn geometry(&self) -> &ReelGeometry {
        &self.geometry
    }

    pub fn table(&self) -> &'static TierTable {
        self.table
    }

    pub fn is_opening(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    pub fn reload<S: ItemSource + ?Sized>(&mut self, source: &S) -> Result<usize, SourceError> {
        self.library.reload(source, &mut self.rng)
    }

    /// Takes effect at the next open.
    pub fn apply_settings(&mut self, settings: ReelSettings) {
        self.settings = settings;
    }

    /// Starts a new open. Returns `Ok(None)` without touching anything when
    /// one is already in flight.
    pub fn open(&mut self, now: Instant) -> Result<Option<OpenResult>, OpenError> {
        if self.is_opening() {
            log::debug!("Open ignored, one is already in flight");
            return Ok(None);
        }
        if self.library.is_empty() {
            log::warn!("Open attempted with an empty item list");
            return Err(OpenError::NoItems);
        }

        let selector = CaseSelector::new(
            self.table,
            self.library.assignment(),
            self.library.items(),
        );
        let result = selector.open(&mut self.rng);
        let reel = Reel::build(
            &selector,
            self.table,
            &result,
            &self.settings,
            &mut self.rng,
        );
        log::info!("Opened {} ({})", result.item, result.tier);

        self.audio.play(SoundCue::CaseOpen);
        let animation = ReelAnimation::new(
            now,
            self.settings.duration,
            &self.geometry,
            reel.winner_index(),
        );
        self.stage = Some(Stage {
            reel,
            result: result.clone(),
            offset: animation.start_offset,
            mode: StageMode::Spinning,
        });
        self.enter(Phase::Animating {
            animation,
            last_spin_cue: None,
        });
        Ok(Some(result))
    }

    /// Advances the lifecycle to `now`. The single transition function of
    /// the opener.
    pub fn tick(&mut self, now: Instant) -> Tick {
        let Some(stage) = self.stage.as_mut() else {
            return Tick::default();
        };

        match &mut self.phase {
            Phase::Idle => Tick::default(),
            Phase::Animating {
                animation,
                last_spin_cue,
            } => {
                let cue_interval = self.settings.spin_cue_interval;
                let frame = animation.frame(now);
                stage.offset = frame.offset;

                if frame.is_last() {
                    self.audio.play(SoundCue::Stop);
                    stage.offset = animation.target_offset;
                    stage.mode = StageMode::Stopped;
                    let until = now + self.settings.reveal_pause;
                    self.enter(Phase::Paused { until });
                } else if last_spin_cue
                    .is_none_or(|t| now.saturating_duration_since(t) > cue_interval)
                {
                    self.audio.play(SoundCue::Spin {
                        speed: frame.speed_factor(),
                    });
                    *last_spin_cue = Some(now);
                }
                Tick {
                    redraw: true,
                    keep_ticking: true,
                    finished: None,
                }
            }
            Phase::Paused { until } => {
                if now < *until {
                    return Tick {
                        redraw: false,
                        keep_ticking: true,
                        finished: None,
                    };
                }
                let rarest = stage.result.tier == self.table.rarest();
                if rarest {
                    self.audio.play(SoundCue::GoldReveal);
                }
                let reveal = Reveal::new(
                    stage.result.clone(),
                    rarest,
                    self.settings.flash_interval,
                    self.settings.flash_repetitions,
                );
                self.enter(Phase::Revealing(reveal));
                self.tick(now)
            }
            Phase::Revealing(reveal) => match reveal.advance(now) {
                RevealFrame::Flash { lit } => {
                    let mode = StageMode::Flash { lit };
                    let redraw = stage.mode != mode;
                    stage.mode = mode;
                    Tick {
                        redraw,
                        keep_ticking: true,
                        finished: None,
                    }
                }
                RevealFrame::Settled => {
                    stage.mode = StageMode::Revealed;
                    let result = reveal.result.clone();
                    log::info!("Revealed {} ({})", result.item, result.tier);
                    self.enter(Phase::Idle);
                    Tick {
                        redraw: true,
                        keep_ticking: false,
                        finished: Some(result),
                    }
                }
            },
        }
    }

    fn enter(&mut self, phase: Phase) {
        let from: &'static str = (&self.phase).into();
        let to: &'static str = (&phase).into();
        log::debug!("{from} -> {to}");
        self.phase = phase;
    }

    /// Paints the current stage, or the closed case before the first open.
    pub fn draw<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        match &self.stage {
            Some(stage) => render::draw_stage(
                canvas,
                &stage.reel,
                stage.offset,
                stage.mode,
                &self.geometry,
                self.table,
            ),
            None => render::draw_case(canvas, &self.geometry),
        }
    }
}
