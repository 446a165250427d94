//! Sine wave oscillator implementation.

use crate::Signal;
use std::f64::consts::PI;

/// A sine wave oscillator.
///
/// Produces `sin(2π · f · n / SAMPLE_RATE)` for sample index `n`, starting
/// at phase zero so the first sample is exactly 0.0.
///
/// # Type Parameters
///
/// * `SAMPLE_RATE` - Sample rate in Hz (e.g., 44100 for CD quality)
pub struct SineOscillator<const SAMPLE_RATE: u32> {
    /// Current phase of the oscillator (0.0 to 1.0)
    phase: f64,
    /// Phase increment per sample (frequency / sample_rate)
    phase_increment: f64,
}

impl<const SAMPLE_RATE: u32> SineOscillator<SAMPLE_RATE> {
    /// Creates a new sine oscillator.
    ///
    /// # Examples
    ///
    /// ```
    /// use metronome_ticks::{Signal, SineOscillator};
    ///
    /// let mut osc = SineOscillator::<44100>::new(1000.0);
    /// assert_eq!(osc.next_sample(), 0.0);
    /// ```
    pub fn new(frequency: f64) -> Self {
        let phase_increment = frequency / SAMPLE_RATE as f64;
        Self {
            phase: 0.0,
            phase_increment,
        }
    }
}

impl<const SAMPLE_RATE: u32> Signal for SineOscillator<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        let sample = (self.phase * 2.0 * PI).sin();

        // Wrap to [0.0, 1.0) even when the increment spans whole periods
        self.phase = (self.phase + self.phase_increment).fract();

        sample
    }
}
