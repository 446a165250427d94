//! Core signal processing types and traits.
//!
//! This module provides the signal abstractions the synthesizer is built
//! from:
//! - `Signal` trait for all signal sources and processors
//! - `SignalExt` for chaining combinators
//! - `Param` type for fixed or modulated parameters

pub mod combinators;
mod signal;

pub use combinators::{Gain, SignalExt};
pub use signal::{Param, Signal};
