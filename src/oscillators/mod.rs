//! Oscillators and the waveform generation capability.

mod generator;
mod sine;
mod square;

pub use generator::{OscillatorBank, WaveformGenerator, WaveformShape};
pub use sine::SineOscillator;
pub use square::SquareOscillator;
