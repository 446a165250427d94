//! In-memory PCM audio produced by the synthesizer.

/// Converts a duration in milliseconds to a whole number of frames,
/// rounding to the nearest frame.
///
/// # Examples
///
/// ```
/// use metronome_ticks::ms_to_frames;
///
/// assert_eq!(ms_to_frames(80, 44100), 3528);
/// assert_eq!(ms_to_frames(5, 44100), 221); // 220.5 rounds up
/// ```
pub fn ms_to_frames(ms: u32, sample_rate: u32) -> usize {
    ((ms as u64 * sample_rate as u64 + 500) / 1000) as usize
}

/// Mono, signed 16-bit PCM samples at a fixed sample rate.
///
/// This is exactly what gets written to a WAV file, so a buffer survives a
/// WAV round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Wraps already-quantized samples.
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Quantizes normalized `[-1.0, 1.0]` samples to 16 bits.
    ///
    /// Values outside the range saturate at `±i16::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use metronome_ticks::AudioBuffer;
    ///
    /// let buffer = AudioBuffer::from_normalized(&[0.0, 1.0, -2.0], 44100);
    /// assert_eq!(buffer.samples(), &[0, i16::MAX, -i16::MAX]);
    /// ```
    pub fn from_normalized(samples: &[f64], sample_rate: u32) -> Self {
        let samples = samples
            .iter()
            .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16)
            .collect();
        Self::new(samples, sample_rate)
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frame_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Nominal duration in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.samples.len() as f64 * 1000.0 / self.sample_rate as f64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> u16 {
        self.samples
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Samples scaled back to `[-1.0, 1.0]`.
    pub fn to_normalized(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|&s| s as f64 / i16::MAX as f64)
            .collect()
    }
}
