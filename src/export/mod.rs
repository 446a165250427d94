//! Writing synthesized buffers to sound files.
//!
//! WAV is written directly. Compressed formats go through an [`Encoder`],
//! which may depend on tools the host does not have; in that case the export
//! fails with [`Error::EncoderUnavailable`] and nothing is written.

#[cfg(feature = "ffmpeg")]
mod ffmpeg;
mod wav;

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;

use crate::buffer::AudioBuffer;
use crate::error::{Error, Result};

#[cfg(feature = "ffmpeg")]
pub use ffmpeg::FfmpegEncoder;
pub use wav::{WavEncoder, decode_wav, encode_wav, read_wav};

/// File format the samples are serialized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    /// Uncompressed PCM
    Wav,
    /// Lossy, needs an external encoder
    Mp3,
}

impl ContainerFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ContainerFormat::Wav => "wav",
            ContainerFormat::Mp3 => "mp3",
        }
    }

    pub fn is_lossy(&self) -> bool {
        matches!(self, ContainerFormat::Mp3)
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Target bitrate for lossy formats, e.g. `128k`.
///
/// # Examples
///
/// ```
/// use metronome_ticks::Bitrate;
///
/// let rate: Bitrate = "192k".parse().unwrap();
/// assert_eq!(rate.as_str(), "192k");
/// assert_eq!(Bitrate::default().as_str(), "128k");
/// assert!("fast".parse::<Bitrate>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitrate(String);

impl Bitrate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Bitrate {
    fn default() -> Self {
        Bitrate("128k".to_string())
    }
}

impl FromStr for Bitrate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_suffix('k')
            .or_else(|| s.strip_suffix('K'))
            .unwrap_or(s);
        let valid = !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && digits.bytes().any(|b| b != b'0');
        if !valid {
            return Err(Error::invalid("bitrate", s));
        }
        Ok(Bitrate(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where and how to write one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub path: PathBuf,
    pub format: ContainerFormat,
    /// Ignored for uncompressed formats
    pub bitrate: Option<Bitrate>,
}

impl ExportTarget {
    pub fn new(path: impl Into<PathBuf>, format: ContainerFormat) -> Self {
        Self {
            path: path.into(),
            format,
            bitrate: None,
        }
    }

    pub fn wav(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ContainerFormat::Wav)
    }

    pub fn mp3(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ContainerFormat::Mp3)
    }

    pub fn with_bitrate(mut self, bitrate: Bitrate) -> Self {
        self.bitrate = Some(bitrate);
        self
    }
}

/// Turns a buffer into the bytes of a complete sound file.
///
/// Implement this to plug in a codec library or a different command-line
/// tool for compressed output.
pub trait Encoder {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    fn encode(&self, buffer: &AudioBuffer, bitrate: Option<&Bitrate>) -> Result<Vec<u8>>;
}

/// Writes buffers to disk in the requested container format.
///
/// Files are replaced atomically, so a failed export never leaves a partial
/// file behind and never clobbers the previous version. Parent directories
/// must already exist.
pub struct AssetExporter {
    compressed: Option<Box<dyn Encoder + Send + Sync>>,
}

impl Default for AssetExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetExporter {
    /// An exporter using `ffmpeg` for MP3 when the `ffmpeg` feature is on.
    pub fn new() -> Self {
        #[cfg(feature = "ffmpeg")]
        let compressed: Option<Box<dyn Encoder + Send + Sync>> =
            Some(Box::new(FfmpegEncoder::new()));
        #[cfg(not(feature = "ffmpeg"))]
        let compressed = None;
        Self { compressed }
    }

    /// An exporter that can only write WAV.
    pub fn wav_only() -> Self {
        Self { compressed: None }
    }

    /// Replaces the encoder used for compressed formats.
    pub fn with_encoder(mut self, encoder: impl Encoder + Send + Sync + 'static) -> Self {
        self.compressed = Some(Box::new(encoder));
        self
    }

    /// Name of the compressed-format encoder, if one is configured.
    pub fn compressed_encoder(&self) -> Option<&str> {
        self.compressed.as_deref().map(|e| e.name())
    }

    /// Writes `buffer` to `target`, creating or overwriting the file.
    ///
    /// # Errors
    ///
    /// - [`Error::EncoderUnavailable`] if a compressed format was requested
    ///   and no encoder could produce it. Nothing is written.
    /// - [`Error::Io`] for filesystem problems.
    pub fn export(&self, buffer: &AudioBuffer, target: &ExportTarget) -> Result<()> {
        let bytes = match target.format {
            ContainerFormat::Wav => WavEncoder.encode(buffer, None)?,
            ContainerFormat::Mp3 => {
                let encoder = self.compressed.as_deref().ok_or_else(|| {
                    Error::unavailable(
                        target.format.extension(),
                        "no compressed encoder configured",
                    )
                })?;
                encoder.encode(buffer, target.bitrate.as_ref())?
            }
        };

        write_atomic(&target.path, &bytes)?;
        info!(
            "wrote {} ({} frames, {} bytes)",
            target.path.display(),
            buffer.frame_count(),
            bytes.len()
        );
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".metronome-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }

    let mut file = builder.tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct StubEncoder;

    impl Encoder for StubEncoder {
        fn name(&self) -> &str {
            "stub"
        }

        fn encode(&self, buffer: &AudioBuffer, bitrate: Option<&Bitrate>) -> Result<Vec<u8>> {
            let rate = bitrate.map(Bitrate::as_str).unwrap_or("none");
            Ok(format!("{rate}:{}", buffer.frame_count()).into_bytes())
        }
    }

    struct BrokenEncoder;

    impl Encoder for BrokenEncoder {
        fn name(&self) -> &str {
            "broken"
        }

        fn encode(&self, _: &AudioBuffer, _: Option<&Bitrate>) -> Result<Vec<u8>> {
            Err(Error::unavailable(self.name(), "not installed"))
        }
    }

    fn tone() -> AudioBuffer {
        AudioBuffer::new((0..441).map(|i| (i * 37 % 2000) as i16 - 1000).collect(), 44100)
    }

    #[test]
    fn test_wav_export_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metronome-test.wav");
        AssetExporter::wav_only()
            .export(&tone(), &ExportTarget::wav(&path))
            .unwrap();
        assert_eq!(read_wav(&path).unwrap(), tone());
    }

    #[test]
    fn test_wav_export_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("again.wav");
        let exporter = AssetExporter::wav_only();
        exporter.export(&tone(), &ExportTarget::wav(&path)).unwrap();
        let first = fs::read(&path).unwrap();
        exporter.export(&tone(), &ExportTarget::wav(&path)).unwrap();
        assert_eq!(fs::read(&path).unwrap(), first);
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("only.wav");
        AssetExporter::wav_only()
            .export(&tone(), &ExportTarget::wav(&path))
            .unwrap();
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("only.wav")]);
    }

    #[test]
    fn test_mp3_without_encoder_is_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metronome-tick.mp3");
        let err = AssetExporter::wav_only()
            .export(&tone(), &ExportTarget::mp3(&path))
            .unwrap_err();
        assert!(matches!(err, Error::EncoderUnavailable { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_encode_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metronome-tick.mp3");
        fs::write(&path, b"previous").unwrap();
        let err = AssetExporter::wav_only()
            .with_encoder(BrokenEncoder)
            .export(&tone(), &ExportTarget::mp3(&path))
            .unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(fs::read(&path).unwrap(), b"previous");
    }

    #[test]
    fn test_mp3_uses_configured_encoder() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metronome-tick.mp3");
        let exporter = AssetExporter::wav_only().with_encoder(StubEncoder);
        assert_eq!(exporter.compressed_encoder(), Some("stub"));
        let target = ExportTarget::mp3(&path).with_bitrate("96k".parse().unwrap());
        exporter.export(&tone(), &target).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "96k:441");
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("tick.wav");
        let err = AssetExporter::wav_only()
            .export(&tone(), &ExportTarget::wav(&path))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_bitrate_parsing() {
        assert_eq!("128k".parse::<Bitrate>().unwrap().as_str(), "128k");
        assert_eq!("320K".parse::<Bitrate>().unwrap().as_str(), "320k");
        assert_eq!("64000".parse::<Bitrate>().unwrap().as_str(), "64000");
        for bad in ["", "k", "0k", "-128k", "12.8k", "128kb"] {
            assert!(bad.parse::<Bitrate>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_container_format() {
        assert_eq!(ContainerFormat::Wav.extension(), "wav");
        assert_eq!(ContainerFormat::Mp3.to_string(), "mp3");
        assert!(ContainerFormat::Mp3.is_lossy());
        assert!(!ContainerFormat::Wav.is_lossy());
    }
}
