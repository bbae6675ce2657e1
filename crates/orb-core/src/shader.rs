//! Parameters of the procedural orb material.

use crate::audio::AudioSample;
use crate::constants::{ACCENT_COLOR_HEX, AUDIO_SMOOTHING, BASE_COLOR_HEX};
use crate::smoothing::SmoothedValue;

/// Linear RGB color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Decode a `0xRRGGBB` sRGB literal into linear space.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn with_alpha(self, a: f32) -> [f32; 4] {
        [self.r, self.g, self.b, a]
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Uniform values handed to the shading stage each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderParameters {
    elapsed_time: f32,
    audio_intensity: SmoothedValue,
    base_color: Color,
    accent_color: Color,
}

impl ShaderParameters {
    /// Absolute seconds since start; the vertex noise is periodic in it.
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// The smoothed intensity actually sent downstream.
    pub fn audio_level(&self) -> f32 {
        self.audio_intensity.current()
    }

    pub fn audio_intensity(&self) -> SmoothedValue {
        self.audio_intensity
    }

    pub fn base_color(&self) -> Color {
        self.base_color
    }

    pub fn accent_color(&self) -> Color {
        self.accent_color
    }
}

pub struct ShaderState {
    params: ShaderParameters,
}

impl Default for ShaderState {
    fn default() -> Self {
        Self::with_colors(
            Color::from_hex(BASE_COLOR_HEX),
            Color::from_hex(ACCENT_COLOR_HEX),
        )
    }
}

impl ShaderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_colors(base_color: Color, accent_color: Color) -> Self {
        Self {
            params: ShaderParameters {
                elapsed_time: 0.0,
                audio_intensity: SmoothedValue::default(),
                base_color,
                accent_color,
            },
        }
    }

    /// Advance to absolute time `elapsed_time` with this frame's raw audio.
    ///
    /// `_dt` is unused: shading is driven by absolute time, not deltas.
    pub fn advance(&mut self, _dt: f32, elapsed_time: f32, raw_audio: AudioSample) {
        self.params.elapsed_time = elapsed_time.max(0.0);
        self.params.audio_intensity.set_target(raw_audio.level());
        self.params.audio_intensity.advance(AUDIO_SMOOTHING);
    }

    pub fn parameters(&self) -> &ShaderParameters {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loud() -> AudioSample {
        AudioSample {
            intensity: 1.0,
            active: true,
        }
    }

    #[test]
    fn hex_decoding_round_trips_primaries() {
        let white = Color::from_hex(0xffffff);
        assert!((white.r - 1.0).abs() < 1e-6 && (white.b - 1.0).abs() < 1e-6);
        let cyan = Color::from_hex(BASE_COLOR_HEX);
        assert_eq!(cyan.r, 0.0);
        assert!((cyan.b - 1.0).abs() < 1e-6);
        assert!(cyan.g > 0.0 && cyan.g < 1.0);
    }

    #[test]
    fn ten_loud_frames_reach_expected_level() {
        let mut s = ShaderState::new();
        for i in 0..10 {
            s.advance(1.0 / 60.0, i as f32 / 60.0, loud());
        }
        let expected = 1.0 - 0.9_f32.powi(10);
        assert!((s.parameters().audio_level() - expected).abs() < 1e-5);
        assert!((s.parameters().audio_level() - 0.651).abs() < 1e-3);
    }

    #[test]
    fn inactive_audio_decays_toward_zero() {
        let mut s = ShaderState::new();
        for _ in 0..20 {
            s.advance(0.0, 0.0, loud());
        }
        let stale = AudioSample {
            intensity: 0.9,
            active: false,
        };
        let mut prev = s.parameters().audio_level();
        for _ in 0..50 {
            s.advance(0.0, 0.0, stale);
            let level = s.parameters().audio_level();
            assert!(level < prev);
            assert_eq!(s.parameters().audio_intensity().target(), 0.0);
            prev = level;
        }
        assert!(prev < 0.01);
    }

    #[test]
    fn elapsed_time_is_set_not_accumulated() {
        let mut s = ShaderState::new();
        s.advance(5.0, 1.25, AudioSample::SILENT);
        s.advance(5.0, 1.5, AudioSample::SILENT);
        assert_eq!(s.parameters().elapsed_time(), 1.5);
    }

    #[test]
    fn colors_are_fixed_at_construction() {
        let mut s = ShaderState::new();
        let before = (s.parameters().base_color(), s.parameters().accent_color());
        s.advance(0.0, 3.0, loud());
        assert_eq!(
            before,
            (s.parameters().base_color(), s.parameters().accent_color())
        );
    }
}
