use strum::IntoStaticStr;

#[derive(Debug, Clone, Copy, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum SoundCue {
    CaseOpen,
    /// `speed` runs from 1.0 at launch down to 0.1 as the reel settles.
    Spin { speed: f32 },
    Stop,
    GoldReveal,
}

/// Fire-and-forget sound output. Implementations must not block and must
/// swallow their own failures.
pub trait AudioSink {
    fn play(&self, cue: SoundCue);
}

/// Used when audio is disabled or the output device could not be opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&self, cue: SoundCue) {
        let name: &'static str = cue.into();
        log::trace!("Muted cue {name}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_names() {
        let names: Vec<&'static str> = [
            SoundCue::CaseOpen,
            SoundCue::Spin { speed: 0.5 },
            SoundCue::Stop,
            SoundCue::GoldReveal,
        ]
        .into_iter()
        .map(Into::into)
        .collect();
        assert_eq!(names, vec!["caseOpen", "spin", "stop", "goldReveal"]);
    }
}
