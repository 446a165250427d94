//! Tone synthesis: oscillator, fade envelope and level, rendered to PCM.

use log::debug;

use crate::buffer::{AudioBuffer, ms_to_frames};
use crate::envelopes::Fade;
use crate::error::Result;
use crate::oscillators::{OscillatorBank, WaveformGenerator};
use crate::tone::ToneSpec;
use crate::{Param, Signal, SignalExt};

/// Converts a decibel offset to a linear amplitude factor.
///
/// # Examples
///
/// ```
/// use metronome_ticks::db_to_linear;
///
/// assert_eq!(db_to_linear(0.0), 1.0);
/// assert!((db_to_linear(-6.0) - 0.501).abs() < 0.001);
/// ```
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Renders [`ToneSpec`]s into [`AudioBuffer`]s.
///
/// Synthesis is pure: the same spec always yields the same samples. The
/// synthesizer holds no per-call state, so one instance can be shared.
///
/// # Examples
///
/// ```
/// use metronome_ticks::{ToneSpec, ToneSynthesizer};
///
/// let synth = ToneSynthesizer::new();
/// let tick = synth.synthesize(&ToneSpec::tick(1000.0, 80, 5, 0.0)).unwrap();
/// assert_eq!(tick.sample_rate(), 44100);
/// assert_eq!(tick.frame_count(), 3528);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ToneSynthesizer<G: WaveformGenerator = OscillatorBank> {
    generator: G,
}

impl ToneSynthesizer<OscillatorBank> {
    /// A synthesizer using the built-in oscillators at 44.1 kHz.
    pub fn new() -> Self {
        Self {
            generator: OscillatorBank,
        }
    }
}

impl<G: WaveformGenerator> ToneSynthesizer<G> {
    /// A synthesizer drawing its raw waveforms from `generator`.
    pub fn with_generator(generator: G) -> Self {
        Self { generator }
    }

    pub fn sample_rate(&self) -> u32 {
        self.generator.sample_rate()
    }

    /// Renders one tone.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) if the
    /// frequency is not positive, the duration is zero, or the gain is not
    /// finite.
    pub fn synthesize(&self, spec: &ToneSpec) -> Result<AudioBuffer> {
        spec.validate()?;

        let sample_rate = self.sample_rate();
        let frames = ms_to_frames(spec.duration_ms, sample_rate);
        let fade = Fade::new(
            frames,
            ms_to_frames(spec.fade_in_ms, sample_rate),
            ms_to_frames(spec.fade_out_ms, sample_rate),
        );
        // Unity is an exact identity for f64 multiplication.
        let level = if spec.gain_db == 0.0 {
            1.0
        } else {
            db_to_linear(spec.gain_db)
        };

        debug!(
            "synthesizing {} {} Hz: {} frames at {} Hz, level {:.4}",
            spec.shape, spec.frequency_hz, frames, sample_rate, level
        );

        let mut tone = self
            .generator
            .oscillator(spec.shape, spec.frequency_hz)
            .gain(Param::modulated(fade))
            .gain(level);

        let mut samples = vec![0.0; frames];
        tone.process(&mut samples);

        Ok(AudioBuffer::from_normalized(&samples, sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::oscillators::WaveformShape;

    fn render(spec: ToneSpec) -> AudioBuffer {
        ToneSynthesizer::new().synthesize(&spec).unwrap()
    }

    fn level(sample: i16) -> f64 {
        sample.unsigned_abs() as f64 / i16::MAX as f64
    }

    #[test]
    fn test_deterministic() {
        let spec = ToneSpec::tick(1600.0, 60, 4, 0.0);
        assert_eq!(render(spec), render(spec));
        let click = ToneSpec::click(800.0, 60);
        assert_eq!(render(click), render(click));
    }

    #[test]
    fn test_duration_within_one_frame() {
        for duration_ms in [1, 3, 50, 60, 80, 85, 90, 100, 1234] {
            let buffer = render(ToneSpec::sine(440.0, duration_ms));
            let frame_ms = 1000.0 / buffer.sample_rate() as f64;
            assert!((buffer.duration_ms() - duration_ms as f64).abs() <= frame_ms);
        }
    }

    #[test]
    fn test_fade_in_midpoint_is_half_level() {
        // Square waves sit at full scale, exposing the envelope directly.
        let buffer = render(ToneSpec::square(1000.0, 80).with_fades(10, 0));
        let window = ms_to_frames(10, 44100);
        assert_eq!(buffer.samples()[0], 0);
        assert!((level(buffer.samples()[window / 2]) - 0.5).abs() < 0.01);
        assert_eq!(level(buffer.samples()[window]), 1.0);
    }

    #[test]
    fn test_fade_out_midpoint_is_half_level() {
        let buffer = render(ToneSpec::square(1000.0, 80).with_fades(0, 10));
        let window = ms_to_frames(10, 44100);
        let start = buffer.frame_count() - window;
        assert_eq!(level(buffer.samples()[start - 1]), 1.0);
        assert!((level(buffer.samples()[start + window / 2]) - 0.5).abs() < 0.01);
        assert_eq!(buffer.samples()[buffer.frame_count() - 1], 0);
    }

    #[test]
    fn test_zero_gain_matches_no_gain() {
        let plain = ToneSpec::sine(1000.0, 80).with_fades(5, 5);
        assert_eq!(render(plain), render(plain.with_gain_db(0.0)));
    }

    #[test]
    fn test_negative_gain_attenuates() {
        let full = render(ToneSpec::square(800.0, 20));
        let quiet = render(ToneSpec::square(800.0, 20).with_gain_db(-6.0));
        assert_eq!(full.peak(), i16::MAX as u16);
        let ratio = quiet.peak() as f64 / full.peak() as f64;
        assert!((ratio - db_to_linear(-6.0)).abs() < 1e-4);
    }

    #[test]
    fn test_positive_gain_saturates() {
        let loud = render(ToneSpec::square(800.0, 20).with_gain_db(6.0));
        assert!(loud.samples().iter().all(|s| s.unsigned_abs() == i16::MAX as u16));
    }

    #[test]
    fn test_square_shape_is_two_level() {
        let buffer = render(ToneSpec::square(800.0, 20));
        assert!(
            buffer
                .samples()
                .iter()
                .all(|&s| s == i16::MAX || s == -i16::MAX)
        );
    }

    #[test]
    fn test_square_above_sample_rate_still_alternates() {
        let buffer = render(ToneSpec::square(66150.0, 1));
        assert_eq!(buffer.frame_count(), 44);
        for pair in buffer.samples().windows(2) {
            assert_eq!(pair[0], -pair[1]);
            assert_eq!(pair[0].unsigned_abs(), i16::MAX as u16);
        }
    }

    #[test]
    fn test_overlapping_fades_do_not_fail() {
        let buffer = render(ToneSpec::sine(1000.0, 10).with_fades(20, 20));
        assert_eq!(buffer.frame_count(), 441);
        assert!(buffer.peak() < i16::MAX as u16);
    }

    #[test]
    fn test_invalid_parameters_fail_fast() {
        let synth = ToneSynthesizer::new();
        for spec in [ToneSpec::sine(0.0, 80), ToneSpec::sine(1000.0, 0)] {
            assert!(matches!(
                synth.synthesize(&spec),
                Err(Error::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_custom_generator() {
        struct Dc;

        impl WaveformGenerator for Dc {
            fn sample_rate(&self) -> u32 {
                1000
            }

            fn oscillator(&self, _: WaveformShape, _: f64) -> Box<dyn Signal + Send> {
                Box::new(OnesSignal)
            }
        }

        struct OnesSignal;

        impl Signal for OnesSignal {
            fn next_sample(&mut self) -> f64 {
                1.0
            }
        }

        let synth = ToneSynthesizer::with_generator(Dc);
        let buffer = synth
            .synthesize(&ToneSpec::sine(1.0, 10).with_fade_in(4))
            .unwrap();
        assert_eq!(buffer.sample_rate(), 1000);
        assert_eq!(buffer.frame_count(), 10);
        assert_eq!(buffer.samples()[0], 0);
        assert_eq!(buffer.samples()[2], 16384);
        assert_eq!(buffer.samples()[9], i16::MAX);
    }
}
