//! Core signal trait and parameter types.
//!
//! This module provides the fundamental `Signal` trait that represents
//! anything that can produce a stream of samples, as well as the `Param`
//! type for parameters that can be either fixed or driven by another signal.

/// Common interface for all signal sources and processors.
///
/// Oscillators, envelopes and combinators all implement this trait. A tone
/// is rendered by pulling exactly as many samples as the output needs.
///
/// The trait provides two fundamental operations:
/// - Single sample generation via `next_sample()`
/// - Batch processing via `process()`
pub trait Signal {
    /// Generates the next sample from the signal.
    ///
    /// # Returns
    ///
    /// A sample value, typically between -1.0 and 1.0 for audio signals
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

impl<S: Signal + ?Sized> Signal for Box<S> {
    fn next_sample(&mut self) -> f64 {
        (**self).next_sample()
    }

    fn process(&mut self, buffer: &mut [f64]) {
        (**self).process(buffer)
    }
}

/// A parameter that can be either a fixed value or modulated by a signal.
///
/// Gains are the main user: a fixed decibel level is a `Param::Fixed`, a
/// fade envelope is a `Param::Signal`.
///
/// # Examples
///
/// ```
/// use metronome_ticks::{Fade, Param};
///
/// let mut fixed: Param = 0.5.into();
/// assert_eq!(fixed.value(), 0.5);
///
/// let mut modulated = Param::modulated(Fade::new(4, 2, 0));
/// assert_eq!(modulated.value(), 0.0);
/// assert_eq!(modulated.value(), 0.5);
/// ```
pub enum Param {
    /// A fixed, constant value
    Fixed(f64),
    /// A value modulated by a signal source
    Signal(Box<dyn Signal + Send>),
}

impl Param {
    /// Gets the current value of the parameter.
    ///
    /// For modulated parameters this advances the underlying signal.
    pub fn value(&mut self) -> f64 {
        match self {
            Param::Fixed(v) => *v,
            Param::Signal(s) => s.next_sample(),
        }
    }

    /// Creates a parameter controlled by a signal source.
    pub fn modulated(signal: impl Signal + Send + 'static) -> Self {
        Param::Signal(Box::new(signal))
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Fixed(value)
    }
}
