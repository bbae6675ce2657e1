//! Platform-independent core of the audio-reactive orb.
//!
//! Everything here is plain Rust so it can be exercised on the host. The web
//! front-end supplies the capture device, the DOM elements and the GPU pass
//! executor through the traits defined in [`audio`], [`magnetic`] and
//! [`pipeline`].

pub mod audio;
pub mod camera;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod magnetic;
pub mod pipeline;
pub mod pointer;
pub mod scene;
pub mod scheduler;
pub mod shader;
pub mod smoothing;

pub use audio::*;
pub use camera::*;
pub use constants::*;
pub use error::*;
pub use geometry::*;
pub use magnetic::*;
pub use pipeline::*;
pub use pointer::*;
pub use scene::*;
pub use scheduler::*;
pub use shader::*;
pub use smoothing::*;
