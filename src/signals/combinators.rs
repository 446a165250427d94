//! Signal combinators for shaping a tone.
//!
//! A synthesized tick is an oscillator scaled by a fade envelope and then by
//! a fixed level; `Gain` expresses both stages.

use crate::{Param, Signal};

/// Scales a signal by a factor (gain/attenuation).
///
/// The factor can be fixed or modulated. Values greater than 1.0 amplify the
/// signal, values between 0.0 and 1.0 attenuate it.
///
/// # Examples
///
/// ```
/// use metronome_ticks::{SquareOscillator, Signal, combinators::Gain};
///
/// let osc = SquareOscillator::<44100>::new(800.0);
/// let mut quieter = Gain { source: osc, gain: 0.5.into() };
/// assert_eq!(quieter.next_sample(), 0.5);
/// ```
pub struct Gain<S: Signal> {
    pub source: S,
    pub gain: Param,
}

impl<S: Signal> Signal for Gain<S> {
    fn next_sample(&mut self) -> f64 {
        self.source.next_sample() * self.gain.value()
    }
}

/// Extension methods for chaining combinators onto any signal.
pub trait SignalExt: Signal + Sized {
    /// Applies a gain factor to this signal.
    fn gain(self, gain: impl Into<Param>) -> Gain<Self> {
        Gain {
            source: self,
            gain: gain.into(),
        }
    }
}

impl<T: Signal + Sized> SignalExt for T {}
