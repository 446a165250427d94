//! Metronome ticks - synthesizes short tick sounds and exports them as
//! sound files.
//!
//! A [`ToneSpec`] describes one tone (waveform, pitch, length, fades, level).
//! [`ToneSynthesizer`] renders it into an [`AudioBuffer`] and
//! [`AssetExporter`] writes that buffer as WAV or, through an external
//! encoder, MP3. [`batch::generate`] runs the whole preset table.
//!
//! ```
//! use metronome_ticks::{ToneSpec, ToneSynthesizer, encode_wav};
//!
//! let synth = ToneSynthesizer::new();
//! let tick = synth.synthesize(&ToneSpec::tick(1000.0, 80, 5, 0.0))?;
//! let wav = encode_wav(&tick)?;
//! assert_eq!(&wav[0..4], b"RIFF");
//! # Ok::<(), metronome_ticks::Error>(())
//! ```

pub mod batch;
pub mod buffer;
pub mod envelopes;
pub mod error;
pub mod export;
pub mod oscillators;
pub mod presets;
pub mod signals;
pub mod synth;
pub mod tone;

// Re-export commonly used types at the crate root
pub use batch::{BatchOptions, BatchReport, generate};
pub use buffer::{AudioBuffer, ms_to_frames};
pub use envelopes::Fade;
pub use error::{Error, Result};
#[cfg(feature = "ffmpeg")]
pub use export::FfmpegEncoder;
pub use export::{
    AssetExporter, Bitrate, ContainerFormat, Encoder, ExportTarget, WavEncoder, decode_wav,
    encode_wav, read_wav,
};
pub use oscillators::{
    OscillatorBank, SineOscillator, SquareOscillator, WaveformGenerator, WaveformShape,
};
pub use presets::Preset;
pub use signals::{Param, Signal, SignalExt, combinators};
pub use synth::{ToneSynthesizer, db_to_linear};
pub use tone::ToneSpec;
