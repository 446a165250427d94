//! The table of named tick sounds shipped to the front-end.

use crate::export::ContainerFormat;
use crate::tone::ToneSpec;

/// Id of the default tick, the one also published as MP3.
pub const CANONICAL_TICK_ID: &str = "tick";

/// A named, selectable tick sound.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    /// Identifier the front-end refers to
    pub id: &'static str,
    /// Goes into the file name, `metronome-<suffix>.<ext>`
    pub suffix: &'static str,
    pub description: &'static str,
    pub tone: ToneSpec,
}

impl Preset {
    pub fn new(
        id: &'static str,
        suffix: &'static str,
        description: &'static str,
        tone: ToneSpec,
    ) -> Self {
        Self {
            id,
            suffix,
            description,
            tone,
        }
    }

    /// File name of this preset in the given format.
    ///
    /// # Examples
    ///
    /// ```
    /// use metronome_ticks::{ContainerFormat, presets};
    ///
    /// let table = presets::default_presets();
    /// let tick = presets::find(&table, "tick").unwrap();
    /// assert_eq!(tick.file_name(ContainerFormat::Mp3), "metronome-tick.mp3");
    /// ```
    pub fn file_name(&self, format: ContainerFormat) -> String {
        format!("metronome-{}.{}", self.suffix, format.extension())
    }

    pub fn is_canonical_tick(&self) -> bool {
        self.id == CANONICAL_TICK_ID
    }
}

/// The sounds the metronome screen offers, in display order.
pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new(
            "tick",
            "tick",
            "Classic beep (1kHz)",
            ToneSpec::tick(1000.0, 80, 5, 0.0),
        ),
        Preset::new(
            "soft",
            "soft",
            "Soft low tick",
            ToneSpec::tick(600.0, 100, 8, -2.0),
        ),
        Preset::new(
            "high",
            "high",
            "High pitch",
            ToneSpec::tick(1600.0, 60, 4, 0.0),
        ),
        Preset::new(
            "click",
            "click",
            "Percussive click",
            ToneSpec::click(800.0, 60),
        ),
        Preset::new(
            "deep",
            "deep",
            "Deep tick",
            ToneSpec::tick(400.0, 90, 10, -1.0),
        ),
        Preset::new(
            "wood",
            "wood",
            "Warm / wood-like",
            ToneSpec::tick(350.0, 85, 12, 1.0),
        ),
        Preset::new(
            "ping",
            "ping",
            "Bright ping",
            ToneSpec::tick(2000.0, 50, 3, 0.0),
        ),
    ]
}

/// Looks a preset up by id.
pub fn find<'a>(presets: &'a [Preset], id: &str) -> Option<&'a Preset> {
    presets.iter().find(|p| p.id == id)
}
