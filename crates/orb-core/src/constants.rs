//! Fixed tuning for the orb, its audio response and the magnetic UI.
//!
//! There is no runtime configuration. These constants express the intended
//! look and feel and keep magic numbers out of the code paths that use them.

// Smoothing factors (fraction of the remaining gap closed per frame)
pub const AUDIO_SMOOTHING: f32 = 0.1; // ~10 frame time constant
pub const POINTER_SMOOTHING: f32 = 0.05; // laggier, floaty cursor follow
pub const MAGNET_SMOOTHING: f32 = 0.1;

// Audio analysis
pub const FFT_SIZE: u32 = 256;
pub const FREQUENCY_BIN_COUNT: usize = (FFT_SIZE / 2) as usize;
pub const LOW_BAND_BINS: usize = 20; // bins averaged into the intensity
pub const ANALYSER_SMOOTHING_TIME_CONSTANT: f64 = 0.8;
pub const MAX_BIN_MAGNITUDE: f32 = u8::MAX as f32;

// Shading
pub const DISPLACEMENT_SCALE: f32 = 0.5; // full intensity displaces by half the noise
pub const BASE_COLOR_HEX: u32 = 0x00d2ff; // cyan
pub const ACCENT_COLOR_HEX: u32 = 0x3a7bd5; // deep blue

// Orb geometry and motion
pub const ORB_RADIUS: f32 = 0.8;
pub const ORB_DETAIL: u32 = 64;
pub const ORB_RANGE_X: f32 = 3.0; // widescreen: horizontal travel exceeds vertical
pub const ORB_RANGE_Y: f32 = 2.0;
pub const ORB_Z: f32 = 0.0;
pub const ORB_SPIN_X_PER_SEC: f32 = 0.1;
pub const ORB_SPIN_Y_PER_SEC: f32 = 0.2;

// Background particles
pub const PARTICLE_COUNT: usize = 1000;
pub const PARTICLE_SPREAD: f32 = 15.0; // edge length of the cube they fill
pub const PARTICLE_SIZE: f32 = 0.02;
pub const PARTICLE_OPACITY: f32 = 0.5;
pub const PARTICLE_COLOR_HEX: u32 = 0x88ccff;
pub const PARTICLE_SPIN_Y_PER_SEC: f32 = 0.05;
pub const PARTICLE_SEED: u64 = 0x5eed_0b5e;
pub const FOG_DENSITY: f32 = 0.1;

// Magnetic UI
pub const MAGNET_RADIUS_PX: f32 = 100.0; // hard edge, no falloff
pub const MAGNET_PULL: f32 = 0.4;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_Z: f32 = 4.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

// Bloom post-process
pub const BLOOM_STRENGTH: f32 = 2.0;
pub const BLOOM_RADIUS: f32 = 0.4;
pub const BLOOM_THRESHOLD: f32 = 0.1;
