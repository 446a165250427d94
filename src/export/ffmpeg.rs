//! MP3 encoding through an external `ffmpeg` process.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use log::debug;

use super::wav::encode_wav;
use super::{Bitrate, Encoder};
use crate::buffer::AudioBuffer;
use crate::error::{Error, Result};

/// Encodes MP3 by piping a WAV stream through `ffmpeg`.
///
/// Any failure to run the executable, a non-zero exit, or empty output is
/// reported as [`Error::EncoderUnavailable`]: from the caller's point of view
/// the host simply cannot produce MP3.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: PathBuf,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::with_program("ffmpeg")
    }
}

impl FfmpegEncoder {
    /// Uses the `ffmpeg` found on `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a specific executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn unavailable(&self, reason: impl Into<String>) -> Error {
        Error::unavailable(self.name(), reason)
    }
}

impl Encoder for FfmpegEncoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn encode(&self, buffer: &AudioBuffer, bitrate: Option<&Bitrate>) -> Result<Vec<u8>> {
        let wav = encode_wav(buffer)?;
        let bitrate = bitrate.cloned().unwrap_or_default();

        debug!(
            "running {} for {} frames at {}",
            self.program.display(),
            buffer.frame_count(),
            bitrate
        );

        let mut child = Command::new(&self.program)
            .args(["-hide_banner", "-loglevel", "error"])
            .args(["-f", "wav", "-i", "pipe:0"])
            .args(["-f", "mp3", "-b:a", bitrate.as_str(), "pipe:1"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.unavailable(format!("cannot run {}: {e}", self.program.display())))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.unavailable("stdin was not captured"))?;
        // Fed from a separate thread so a full stdout pipe cannot stall us.
        let feeder = thread::spawn(move || stdin.write_all(&wav));

        let output = child
            .wait_with_output()
            .map_err(|e| self.unavailable(format!("failed waiting for encoder: {e}")))?;
        let fed = feeder
            .join()
            .map_err(|_| self.unavailable("input thread panicked"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.unavailable(format!(
                "exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        fed.map_err(|e| self.unavailable(format!("failed writing input: {e}")))?;
        if output.stdout.is_empty() {
            return Err(self.unavailable("produced no output"));
        }

        Ok(output.stdout)
    }
}
