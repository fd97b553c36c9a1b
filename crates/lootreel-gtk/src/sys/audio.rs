use lootreel::audio::{AudioSink, Silent, SoundCue};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::f32::consts::PI;

const SAMPLE_RATE: u32 = 22050;

/// Synthesizes every cue on the fly and plays it detached.
pub struct RodioAudio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RodioAudio {
    pub fn try_new() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

impl AudioSink for RodioAudio {
    fn play(&self, cue: SoundCue) {
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples(cue)));
        sink.detach();
    }
}

/// Opens the default output device, or falls back to silence for the rest
/// of the process.
pub fn open(enabled: bool) -> Box<dyn AudioSink> {
    if !enabled {
        return Box::new(Silent);
    }
    match RodioAudio::try_new() {
        Ok(audio) => Box::new(audio),
        Err(e) => {
            log::warn!("Sound initialization failed, running without sound: {}", e);
            Box::new(Silent)
        }
    }
}

pub fn samples(cue: SoundCue) -> Vec<f32> {
    match cue {
        SoundCue::CaseOpen => click(900.0, 0.15),
        SoundCue::Spin { speed } => whirr(250.0 * speed, 0.05),
        SoundCue::Stop => click(600.0, 0.08),
        SoundCue::GoldReveal => chime(0.5),
    }
}

fn frames(duration: f32) -> impl Iterator<Item = f32> {
    let count = (duration * SAMPLE_RATE as f32) as usize;
    (0..count).map(|i| i as f32 / SAMPLE_RATE as f32)
}

/// Sine burst with a quick exponential decay.
fn click(freq: f32, duration: f32) -> Vec<f32> {
    frames(duration)
        .map(|t| {
            let envelope = (-t * 15.0).exp() * (1.0 - t / duration);
            0.6 * envelope * (2.0 * PI * freq * t).sin()
        })
        .collect()
}

/// Low hum with a 5 Hz tremolo.
fn whirr(freq: f32, duration: f32) -> Vec<f32> {
    frames(duration)
        .map(|t| 0.3 * (2.0 * PI * freq * t).sin() * (1.0 + 0.1 * (2.0 * PI * 5.0 * t).sin()))
        .collect()
}

/// 400 Hz to 800 Hz sweep with an octave harmonic.
fn chime(duration: f32) -> Vec<f32> {
    frames(duration)
        .map(|t| {
            let freq = 400.0 + (t / duration) * 400.0;
            let envelope = (-t * 2.0).exp();
            let wave = (2.0 * PI * freq * t).sin() + 0.5 * (2.0 * PI * freq * 2.0 * t).sin();
            (0.7 * envelope * wave).clamp(-1.0, 1.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_lengths() {
        let cases = [
            (SoundCue::CaseOpen, 3307),
            (SoundCue::Stop, 1764),
            (SoundCue::Spin { speed: 1.0 }, 1102),
            (SoundCue::GoldReveal, 11025),
        ];
        for (cue, expected) in cases {
            let len = samples(cue).len() as i64;
            assert!((len - expected).abs() <= 1, "{cue:?}: {len} samples");
        }
    }

    #[test]
    fn test_samples_stay_in_range() {
        for cue in [
            SoundCue::CaseOpen,
            SoundCue::Spin { speed: 0.1 },
            SoundCue::Stop,
            SoundCue::GoldReveal,
        ] {
            assert!(samples(cue).iter().all(|s| (-1.0..=1.0).contains(s)));
        }
    }

    #[test]
    fn test_click_decays() {
        let wave = click(900.0, 0.15);
        let peak = |slice: &[f32]| slice.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak(&wave[..500]) > peak(&wave[wave.len() - 500..]));
    }
}
