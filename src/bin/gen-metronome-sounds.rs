//! gen-metronome-sounds - writes the metronome tick assets
//!
//! Produces `metronome-<suffix>.wav` for every preset, plus
//! `metronome-tick.mp3` when an MP3 encoder is available.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use metronome_ticks::batch::{self, BatchOptions, BatchReport};
use metronome_ticks::presets::{self, Preset};
use metronome_ticks::{AssetExporter, Bitrate, ContainerFormat, ToneSynthesizer};

#[derive(Parser)]
#[command(name = "gen-metronome-sounds")]
#[command(about = "Generate metronome tick sounds for the app")]
#[command(version)]
struct Cli {
    /// Directory the sound files are written to
    #[arg(short, long, default_value = "frontend/assets/sounds")]
    out_dir: PathBuf,

    /// Only generate these preset ids (repeatable)
    #[arg(long = "only", value_name = "ID")]
    only: Vec<String>,

    /// Do not produce the MP3 copy of the canonical tick
    #[arg(long)]
    no_mp3: bool,

    /// MP3 bitrate
    #[arg(long, default_value = "128k")]
    bitrate: Bitrate,

    /// ffmpeg executable used for MP3 encoding
    #[cfg(feature = "ffmpeg")]
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// Print the preset table and exit
    #[arg(long)]
    list: bool,
}

fn select(table: Vec<Preset>, only: &[String]) -> Result<Vec<Preset>> {
    if only.is_empty() {
        return Ok(table);
    }
    for id in only {
        if presets::find(&table, id).is_none() {
            bail!("unknown preset id '{id}'");
        }
    }
    Ok(table
        .into_iter()
        .filter(|p| only.iter().any(|id| id == p.id))
        .collect())
}

/// One sound per rendered preset; the MP3 is another container for the tick.
fn sound_count(report: &BatchReport) -> usize {
    report
        .written
        .iter()
        .filter(|file| file.format == ContainerFormat::Wav)
        .count()
}

fn print_table(table: &[Preset]) {
    for preset in table {
        let tone = &preset.tone;
        println!(
            "{:<6} {:<7} {:>6} Hz {:>4} ms  fade {}/{} ms  {:+} dB  {}",
            preset.id,
            tone.shape,
            tone.frequency_hz,
            tone.duration_ms,
            tone.fade_in_ms,
            tone.fade_out_ms,
            tone.gain_db,
            preset.description
        );
    }
}

fn exporter(cli: &Cli) -> AssetExporter {
    #[cfg(feature = "ffmpeg")]
    {
        AssetExporter::new().with_encoder(metronome_ticks::FfmpegEncoder::with_program(&cli.ffmpeg))
    }
    #[cfg(not(feature = "ffmpeg"))]
    {
        let _ = cli;
        AssetExporter::wav_only()
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let table = select(presets::default_presets(), &cli.only)?;
    if cli.list {
        print_table(&table);
        return Ok(());
    }

    let options = BatchOptions {
        compressed_tick: !cli.no_mp3,
        bitrate: cli.bitrate.clone(),
    };
    let report = batch::generate(
        &ToneSynthesizer::new(),
        &exporter(&cli),
        &table,
        &cli.out_dir,
        &options,
    )
    .with_context(|| format!("failed to generate sounds in {}", cli.out_dir.display()))?;

    for file in &report.written {
        let name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("  {name} (id={}) - {}", file.id, file.description);
    }
    for skipped in &report.skipped {
        println!(
            "  (Skip {}: install ffmpeg to regenerate it)",
            skipped.path.display()
        );
    }
    println!(
        "\nGenerated {} metronome sounds in {}",
        sound_count(&report),
        cli.out_dir.display()
    );

    if !report.is_complete() {
        let ids: Vec<_> = report.failed.iter().map(|f| f.id).collect();
        bail!("invalid presets: {}", ids.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use metronome_ticks::batch::WrittenFile;

    fn ids(table: &[Preset]) -> Vec<&'static str> {
        table.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_select_all_when_empty() {
        let table = select(presets::default_presets(), &[]).unwrap();
        assert_eq!(ids(&table), ids(&presets::default_presets()));
    }

    #[test]
    fn test_select_keeps_table_order() {
        let only = vec!["ping".to_string(), "tick".to_string()];
        let table = select(presets::default_presets(), &only).unwrap();
        assert_eq!(ids(&table), vec!["tick", "ping"]);
    }

    #[test]
    fn test_select_rejects_unknown_id() {
        let only = vec!["tick".to_string(), "cowbell".to_string()];
        let err = select(presets::default_presets(), &only).unwrap_err();
        assert!(err.to_string().contains("cowbell"));
    }

    #[test]
    fn test_sound_count_ignores_compressed_copy() {
        let file = |id, format, name: &str| WrittenFile {
            id,
            description: "",
            path: PathBuf::from(name),
            format,
        };
        let report = BatchReport {
            written: vec![
                file("tick", ContainerFormat::Wav, "metronome-tick.wav"),
                file("ping", ContainerFormat::Wav, "metronome-ping.wav"),
                file("tick", ContainerFormat::Mp3, "metronome-tick.mp3"),
            ],
            ..BatchReport::default()
        };
        assert_eq!(sound_count(&report), 2);
    }
}
