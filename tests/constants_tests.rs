// Host-side tests for constants and their relationships.
// The web crate is wasm-only, so its DOM constants are included directly.

#![allow(dead_code)]
mod web_constants {
    include!("../src/constants.rs");
}

use orb_core::constants::*;
use web_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_factors_are_usable() {
    for f in [AUDIO_SMOOTHING, POINTER_SMOOTHING, MAGNET_SMOOTHING] {
        assert!(f > 0.0 && f <= 1.0, "factor {f} out of (0, 1]");
    }
    // The orb drifts after the cursor more lazily than it reacts to sound
    assert!(POINTER_SMOOTHING < AUDIO_SMOOTHING);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn analyser_band_fits_the_fft() {
    assert!(FFT_SIZE.is_power_of_two());
    assert_eq!(FREQUENCY_BIN_COUNT, FFT_SIZE as usize / 2);
    assert!(LOW_BAND_BINS > 0 && LOW_BAND_BINS <= FREQUENCY_BIN_COUNT);
    assert!((0.0..1.0).contains(&ANALYSER_SMOOTHING_TIME_CONSTANT));
    assert_eq!(MAX_BIN_MAGNITUDE, 255.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn magnet_pulls_part_way() {
    assert!(MAGNET_RADIUS_PX > 0.0);
    assert!(MAGNET_PULL > 0.0 && MAGNET_PULL < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_frames_the_orb() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_FOV_DEG > 0.0 && CAMERA_FOV_DEG < 180.0);
    // Orb plane sits inside the clip range
    let depth = CAMERA_Z - ORB_Z;
    assert!(depth > CAMERA_NEAR && depth < CAMERA_FAR);
    // Particles fill a cube that encloses the camera
    assert!(PARTICLE_SPREAD / 2.0 > CAMERA_Z);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn bloom_defaults_are_in_range() {
    assert!(BLOOM_STRENGTH > 0.0);
    assert!((0.0..=1.0).contains(&BLOOM_RADIUS));
    assert!((0.0..=1.0).contains(&BLOOM_THRESHOLD));
}

#[test]
fn colors_are_24_bit() {
    for hex in [BASE_COLOR_HEX, ACCENT_COLOR_HEX, PARTICLE_COLOR_HEX] {
        assert_eq!(hex & !0x00ff_ffff, 0);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn page_hooks() {
    assert_eq!(CANVAS_ID, "webgl");
    assert!(MAGNETIC_SELECTOR.starts_with('.'));
    assert!(OVERLAY_FADE_MS > 0);
    assert!(MAX_PIXEL_RATIO >= 1.0);
}
