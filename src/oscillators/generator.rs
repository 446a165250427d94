//! Waveform generation capability used by the synthesizer.

use super::{SineOscillator, SquareOscillator};
use crate::Signal;
use std::fmt;

/// Shape of the periodic waveform a tone is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveformShape {
    /// Smooth, continuous oscillation
    Sine,
    /// Alternates between `1.0` and `-1.0` every half period
    Square,
}

impl fmt::Display for WaveformShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveformShape::Sine => f.pad("sine"),
            WaveformShape::Square => f.pad("square"),
        }
    }
}

/// Produces raw, un-shaped oscillators for the synthesizer.
///
/// Implement this to swap in a different synthesis backend (band-limited
/// oscillators, lookup tables, ...) without touching the rest of the
/// pipeline.
pub trait WaveformGenerator {
    /// Sample rate in Hz of every oscillator this generator hands out.
    fn sample_rate(&self) -> u32;

    /// Returns a fresh oscillator at phase zero.
    fn oscillator(&self, shape: WaveformShape, frequency_hz: f64) -> Box<dyn Signal + Send>;
}

/// The built-in generator backed by [`SineOscillator`] and [`SquareOscillator`].
///
/// # Examples
///
/// ```
/// use metronome_ticks::{OscillatorBank, Signal, WaveformGenerator, WaveformShape};
///
/// let bank = OscillatorBank::<44100>;
/// let mut square = bank.oscillator(WaveformShape::Square, 800.0);
/// assert_eq!(square.next_sample(), 1.0);
/// assert_eq!(bank.sample_rate(), 44100);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OscillatorBank<const SAMPLE_RATE: u32 = 44100>;

impl<const SAMPLE_RATE: u32> WaveformGenerator for OscillatorBank<SAMPLE_RATE> {
    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn oscillator(&self, shape: WaveformShape, frequency_hz: f64) -> Box<dyn Signal + Send> {
        match shape {
            WaveformShape::Sine => Box::new(SineOscillator::<SAMPLE_RATE>::new(frequency_hz)),
            WaveformShape::Square => Box::new(SquareOscillator::<SAMPLE_RATE>::new(frequency_hz)),
        }
    }
}
