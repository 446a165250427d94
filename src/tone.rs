//! Parameters describing a single synthesized tone.

use crate::error::{Error, Result};
use crate::oscillators::WaveformShape;

/// Immutable description of one tone.
///
/// `fade_in_ms + fade_out_ms <= duration_ms` is left to the caller; see
/// [`Fade`](crate::Fade) for what happens when the windows overlap.
///
/// # Examples
///
/// ```
/// use metronome_ticks::{ToneSpec, WaveformShape};
///
/// let tone = ToneSpec::sine(600.0, 100)
///     .with_fades(8, 8)
///     .with_gain_db(-2.0);
/// assert_eq!(tone.shape, WaveformShape::Sine);
/// assert_eq!(tone, ToneSpec::tick(600.0, 100, 8, -2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub shape: WaveformShape,
    pub frequency_hz: f64,
    pub duration_ms: u32,
    pub fade_in_ms: u32,
    pub fade_out_ms: u32,
    /// Level offset in decibels; positive is louder
    pub gain_db: f64,
}

impl ToneSpec {
    /// Creates a tone with no fades and no gain offset.
    pub fn new(shape: WaveformShape, frequency_hz: f64, duration_ms: u32) -> Self {
        Self {
            shape,
            frequency_hz,
            duration_ms,
            fade_in_ms: 0,
            fade_out_ms: 0,
            gain_db: 0.0,
        }
    }

    pub fn sine(frequency_hz: f64, duration_ms: u32) -> Self {
        Self::new(WaveformShape::Sine, frequency_hz, duration_ms)
    }

    pub fn square(frequency_hz: f64, duration_ms: u32) -> Self {
        Self::new(WaveformShape::Square, frequency_hz, duration_ms)
    }

    /// A sine tick with symmetric fades.
    pub fn tick(frequency_hz: f64, duration_ms: u32, fade_ms: u32, gain_db: f64) -> Self {
        Self::sine(frequency_hz, duration_ms)
            .with_fades(fade_ms, fade_ms)
            .with_gain_db(gain_db)
    }

    /// A percussive square-wave click: 2 ms attack, 25 ms tail, 3 dB down.
    pub fn click(frequency_hz: f64, duration_ms: u32) -> Self {
        Self::square(frequency_hz, duration_ms)
            .with_fades(2, 25)
            .with_gain_db(-3.0)
    }

    pub fn with_fade_in(mut self, fade_in_ms: u32) -> Self {
        self.fade_in_ms = fade_in_ms;
        self
    }

    pub fn with_fade_out(mut self, fade_out_ms: u32) -> Self {
        self.fade_out_ms = fade_out_ms;
        self
    }

    pub fn with_fades(self, fade_in_ms: u32, fade_out_ms: u32) -> Self {
        self.with_fade_in(fade_in_ms).with_fade_out(fade_out_ms)
    }

    pub fn with_gain_db(mut self, gain_db: f64) -> Self {
        self.gain_db = gain_db;
        self
    }

    /// Checks the parameters the synthesizer cannot work without.
    ///
    /// Fade overlap is deliberately not checked.
    pub fn validate(&self) -> Result<()> {
        if !self.frequency_hz.is_finite() || self.frequency_hz <= 0.0 {
            return Err(Error::invalid("frequency_hz", self.frequency_hz));
        }
        if self.duration_ms == 0 {
            return Err(Error::invalid("duration_ms", self.duration_ms));
        }
        if !self.gain_db.is_finite() {
            return Err(Error::invalid("gain_db", self.gain_db));
        }
        Ok(())
    }
}
