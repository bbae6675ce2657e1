//! Microphone level extraction.
//!
//! [`AudioLevelExtractor`] reduces the latest frequency snapshot of a capture
//! device to one intensity in `[0, 1]` per frame. It never smooths; that is
//! left to [`crate::shader::ShaderState`].

use crate::constants::{LOW_BAND_BINS, MAX_BIN_MAGNITUDE};
use crate::error::CaptureError;

/// One frame's reading of the capture device.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioSample {
    pub intensity: f32,
    pub active: bool,
}

impl AudioSample {
    /// Reading used whenever no device is bound.
    pub const SILENT: AudioSample = AudioSample {
        intensity: 0.0,
        active: false,
    };

    /// Intensity as consumers must see it: zero unless a device is bound.
    #[inline]
    pub fn level(&self) -> f32 {
        if self.active {
            self.intensity
        } else {
            0.0
        }
    }
}

/// A running analyser that can be polled for byte frequency magnitudes.
///
/// Reads are non-blocking: they return whatever the platform has buffered.
pub trait FrequencySource {
    fn bin_count(&self) -> usize;
    fn read_frequency_snapshot(&mut self, bins: &mut [u8]) -> Result<(), CaptureError>;
}

enum Capture<S> {
    Idle,
    Pending,
    Active(S),
    Unavailable,
}

/// Turns a capture device into a per-frame [`AudioSample`].
///
/// Activation is explicit and one-shot: it starts from [`begin_activation`]
/// (a user gesture on the web) and ends with [`complete_activation`] once the
/// platform grants or refuses the device. A refused device leaves the
/// extractor silent for the rest of the session.
///
/// [`begin_activation`]: AudioLevelExtractor::begin_activation
/// [`complete_activation`]: AudioLevelExtractor::complete_activation
pub struct AudioLevelExtractor<S> {
    capture: Capture<S>,
    bins: Vec<u8>,
}

impl<S> Default for AudioLevelExtractor<S> {
    fn default() -> Self {
        Self {
            capture: Capture::Idle,
            bins: Vec::new(),
        }
    }
}

impl<S: FrequencySource> AudioLevelExtractor<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the single activation attempt. Returns `false` if one is already
    /// in flight or has finished, in which case the caller must do nothing.
    pub fn begin_activation(&mut self) -> bool {
        match self.capture {
            Capture::Idle => {
                self.capture = Capture::Pending;
                true
            }
            _ => false,
        }
    }

    /// Record the outcome of the attempt claimed by `begin_activation`.
    ///
    /// Returns whether capture is now active.
    pub fn complete_activation(&mut self, result: Result<S, CaptureError>) -> bool {
        if !matches!(self.capture, Capture::Pending) {
            log::warn!("[audio] activation result without a pending request ignored");
            return self.is_active();
        }
        match result {
            Ok(source) => {
                self.bins.clear();
                self.bins.resize(source.bin_count(), 0);
                log::info!("[audio] capture active, {} bins", self.bins.len());
                self.capture = Capture::Active(source);
                true
            }
            Err(e) => {
                log::warn!("[audio] capture unavailable, visual only: {e}");
                self.capture = Capture::Unavailable;
                false
            }
        }
    }

    /// Synchronous activation for hosts whose device open does not suspend.
    pub fn activate(&mut self, open: impl FnOnce() -> Result<S, CaptureError>) -> bool {
        if !self.begin_activation() {
            return self.is_active();
        }
        self.complete_activation(open())
    }

    pub fn is_active(&self) -> bool {
        matches!(self.capture, Capture::Active(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.capture, Capture::Unavailable)
    }

    /// Read the latest snapshot and reduce it to an intensity.
    ///
    /// A failed read yields zero intensity for this frame only.
    pub fn sample(&mut self) -> AudioSample {
        let Capture::Active(source) = &mut self.capture else {
            return AudioSample::SILENT;
        };
        match source.read_frequency_snapshot(&mut self.bins) {
            Ok(()) => AudioSample {
                intensity: band_level(&self.bins),
                active: true,
            },
            Err(e) => {
                log::debug!("[audio] snapshot read failed: {e}");
                AudioSample {
                    intensity: 0.0,
                    active: true,
                }
            }
        }
    }
}

/// Mean magnitude of the low-frequency band, normalised to `[0, 1]`.
pub fn band_level(bins: &[u8]) -> f32 {
    let band = &bins[..bins.len().min(LOW_BAND_BINS)];
    if band.is_empty() {
        return 0.0;
    }
    let sum: u32 = band.iter().map(|&b| b as u32).sum();
    (sum as f32 / band.len() as f32) / MAX_BIN_MAGNITUDE
}
