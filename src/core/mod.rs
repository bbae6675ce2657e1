pub use orb_core::*;

// Shaders bundled as string constants
pub static ORB_WGSL: &str = include_str!("../../shaders/orb.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../../shaders/particles.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
