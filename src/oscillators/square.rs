//! Square wave oscillator implementation.

use crate::Signal;

/// A 50% duty cycle square wave: `1.0` for the first half of each period,
/// `-1.0` for the second.
pub struct SquareOscillator<const SAMPLE_RATE: u32> {
    phase: f64,
    phase_increment: f64,
}

impl<const SAMPLE_RATE: u32> SquareOscillator<SAMPLE_RATE> {
    pub fn new(frequency: f64) -> Self {
        let phase_increment = frequency / SAMPLE_RATE as f64;
        Self {
            phase: 0.0,
            phase_increment,
        }
    }
}

impl<const SAMPLE_RATE: u32> Signal for SquareOscillator<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        let sample = if self.phase < 0.5 { 1.0 } else { -1.0 };
        self.phase = (self.phase + self.phase_increment).fract();
        sample
    }
}
