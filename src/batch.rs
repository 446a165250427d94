//! Batch generation of every preset into an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::error::{Error, Result};
use crate::export::{AssetExporter, Bitrate, ContainerFormat, ExportTarget};
use crate::oscillators::WaveformGenerator;
use crate::presets::Preset;
use crate::synth::ToneSynthesizer;

/// Knobs for a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Also publish the canonical tick as MP3
    pub compressed_tick: bool,
    pub bitrate: Bitrate,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            compressed_tick: true,
            bitrate: Bitrate::default(),
        }
    }
}

/// A file the batch wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub id: &'static str,
    pub description: &'static str,
    pub path: PathBuf,
    pub format: ContainerFormat,
}

/// An output the batch skipped, e.g. because no MP3 encoder was available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOutput {
    pub id: &'static str,
    pub path: PathBuf,
    pub reason: String,
}

/// A preset whose parameters could not be synthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPreset {
    pub id: &'static str,
    pub reason: String,
}

/// Outcome of [`generate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: Vec<WrittenFile>,
    pub skipped: Vec<SkippedOutput>,
    pub failed: Vec<FailedPreset>,
}

impl BatchReport {
    /// True when every preset produced at least its WAV.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Synthesizes every preset and writes `metronome-<suffix>.wav` for each into
/// `out_dir`, then the canonical tick as MP3 if requested.
///
/// `out_dir` is created if missing. A preset with bad parameters is recorded
/// in [`BatchReport::failed`] and an MP3 the host cannot encode in
/// [`BatchReport::skipped`]; both let the batch carry on. Filesystem errors
/// abort the run.
pub fn generate<G: WaveformGenerator>(
    synth: &ToneSynthesizer<G>,
    exporter: &AssetExporter,
    presets: &[Preset],
    out_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchReport> {
    fs::create_dir_all(out_dir)?;

    let mut report = BatchReport::default();
    let mut tick = None;
    for preset in presets {
        let buffer = match synth.synthesize(&preset.tone) {
            Ok(buffer) => buffer,
            Err(err @ Error::InvalidParameter { .. }) => {
                error!("preset {}: {err}", preset.id);
                report.failed.push(FailedPreset {
                    id: preset.id,
                    reason: err.to_string(),
                });
                continue;
            }
            Err(err) => return Err(err),
        };

        let path = out_dir.join(preset.file_name(ContainerFormat::Wav));
        exporter.export(&buffer, &ExportTarget::wav(&path))?;
        report.written.push(WrittenFile {
            id: preset.id,
            description: preset.description,
            path,
            format: ContainerFormat::Wav,
        });

        if options.compressed_tick && preset.is_canonical_tick() {
            tick = Some((preset, buffer));
        }
    }

    // Compressed copy goes out after the full WAV set.
    if let Some((preset, buffer)) = tick {
        let path = out_dir.join(preset.file_name(ContainerFormat::Mp3));
        let target = ExportTarget::mp3(&path).with_bitrate(options.bitrate.clone());
        match exporter.export(&buffer, &target) {
            Ok(()) => report.written.push(WrittenFile {
                id: preset.id,
                description: preset.description,
                path,
                format: ContainerFormat::Mp3,
            }),
            Err(err @ Error::EncoderUnavailable { .. }) => {
                warn!("skipping {}: {err}", path.display());
                report.skipped.push(SkippedOutput {
                    id: preset.id,
                    path,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        "generated {} files in {} ({} skipped, {} failed)",
        report.written.len(),
        out_dir.display(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(report)
}
