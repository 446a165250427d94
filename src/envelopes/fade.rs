//! Linear fade-in/fade-out envelope.

use crate::Signal;

/// Gain envelope for a tone of fixed length with linear fades at both ends.
///
/// Emits one gain value per frame:
/// - **Fade-in**: frame `k` of the first `fade_in` frames gets `k / fade_in`,
///   so the tone starts from silence.
/// - **Body**: `1.0`.
/// - **Fade-out**: frame `k` of the last `fade_out` frames gets
///   `1 - (k + 1) / fade_out`, so the final frame is silent.
///
/// The two ramps are computed independently and multiplied. When the fade
/// windows together are longer than the tone they overlap and the combined
/// gain never reaches `1.0`; nothing is rejected or rescaled. Past the end of
/// the tone the envelope stays at `0.0`.
///
/// # Examples
///
/// ```
/// use metronome_ticks::{Fade, Signal};
///
/// let mut fade = Fade::new(8, 4, 4);
/// let gains: Vec<f64> = (0..8).map(|_| fade.next_sample()).collect();
/// assert_eq!(gains, vec![0.0, 0.25, 0.5, 0.75, 0.75, 0.5, 0.25, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    total_frames: usize,
    fade_in_frames: usize,
    fade_out_frames: usize,
    position: usize,
}

impl Fade {
    /// Creates an envelope for a tone of `total_frames` frames.
    pub fn new(total_frames: usize, fade_in_frames: usize, fade_out_frames: usize) -> Self {
        Self {
            total_frames,
            fade_in_frames,
            fade_out_frames,
            position: 0,
        }
    }

    /// Gain at an absolute frame index, without advancing the envelope.
    pub fn gain_at(&self, frame: usize) -> f64 {
        if frame >= self.total_frames {
            return 0.0;
        }
        self.fade_in_gain(frame) * self.fade_out_gain(frame)
    }

    fn fade_in_gain(&self, frame: usize) -> f64 {
        if frame < self.fade_in_frames {
            frame as f64 / self.fade_in_frames as f64
        } else {
            1.0
        }
    }

    fn fade_out_gain(&self, frame: usize) -> f64 {
        // Window is anchored to the end, so it may start before frame 0.
        if frame + self.fade_out_frames >= self.total_frames && self.fade_out_frames > 0 {
            (self.total_frames - 1 - frame) as f64 / self.fade_out_frames as f64
        } else {
            1.0
        }
    }

    /// Total length of the envelope in frames.
    pub fn total_frames(&self) -> usize {
        self.total_frames
    }
}

impl Signal for Fade {
    fn next_sample(&mut self) -> f64 {
        let gain = self.gain_at(self.position);
        if self.position < self.total_frames {
            self.position += 1;
        }
        gain
    }
}
