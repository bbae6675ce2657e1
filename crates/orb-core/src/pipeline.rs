//! Ordered render passes: the lit scene, then bloom on top of it.
//!
//! [`RenderPipeline`] owns the camera and the pass list and decides what runs
//! and in which order. Drawing is delegated to a [`PassExecutor`], which on
//! the web is the WebGPU state and in tests is a recorder.

use crate::camera::Camera;
use crate::constants::{BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD};
use crate::scene::SceneFrame;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomParams {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            strength: BLOOM_STRENGTH,
            radius: BLOOM_RADIUS,
            threshold: BLOOM_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PassKind {
    /// Shaded orb and particles into the intermediate HDR buffer.
    Base,
    /// Bright-pass, blur, additive composite to the output surface.
    Bloom(BloomParams),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPass {
    pub kind: PassKind,
    pub width: u32,
    pub height: u32,
}

/// Backend that turns scheduled passes into pixels.
pub trait PassExecutor {
    type Error;

    /// Reallocate size-dependent resources. Called synchronously from
    /// [`RenderPipeline::resize`].
    fn resize(&mut self, width: u32, height: u32);
    fn begin_frame(&mut self) -> Result<(), Self::Error>;
    fn execute(
        &mut self,
        pass: &RenderPass,
        camera: &Camera,
        scene: &SceneFrame,
    ) -> Result<(), Self::Error>;
    fn finish_frame(&mut self) -> Result<(), Self::Error>;
}

pub struct RenderPipeline<E> {
    camera: Camera,
    passes: SmallVec<[RenderPass; 2]>,
    width: u32,
    height: u32,
    executor: E,
}

impl<E: PassExecutor> RenderPipeline<E> {
    /// `executor` must already be sized to `width` x `height`.
    pub fn new(executor: E, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let mut camera = Camera::perspective(1.0);
        camera.set_aspect(width, height);
        let passes = [PassKind::Base, PassKind::Bloom(BloomParams::default())]
            .into_iter()
            .map(|kind| RenderPass {
                kind,
                width,
                height,
            })
            .collect();
        Self {
            camera,
            passes,
            width,
            height,
            executor,
        }
    }

    /// Propagate new output dimensions to the camera, every pass and the
    /// executor. Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.camera.set_aspect(width, height);
        for pass in self.passes.iter_mut() {
            pass.width = width;
            pass.height = height;
        }
        self.executor.resize(width, height);
        log::debug!("[render] resized to {}x{}", width, height);
    }

    /// Run every pass in order for one frame.
    pub fn render(&mut self, scene: &SceneFrame) -> Result<(), E::Error> {
        self.executor.begin_frame()?;
        for pass in &self.passes {
            self.executor.execute(pass, &self.camera, scene)?;
        }
        self.executor.finish_frame()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn passes(&self) -> &[RenderPass] {
        &self.passes
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{orb_transform, particle_transform};
    use crate::shader::ShaderState;
    use glam::Vec3;

    #[derive(Default)]
    struct Recorder {
        size: (u32, u32),
        log: Vec<String>,
        fail_on_base: bool,
    }

    impl PassExecutor for Recorder {
        type Error = &'static str;

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
        fn begin_frame(&mut self) -> Result<(), Self::Error> {
            self.log.push("begin".into());
            Ok(())
        }
        fn execute(
            &mut self,
            pass: &RenderPass,
            _camera: &Camera,
            _scene: &SceneFrame,
        ) -> Result<(), Self::Error> {
            match pass.kind {
                PassKind::Base if self.fail_on_base => Err("lost"),
                PassKind::Base => {
                    self.log.push("base".into());
                    Ok(())
                }
                PassKind::Bloom(_) => {
                    self.log.push("bloom".into());
                    Ok(())
                }
            }
        }
        fn finish_frame(&mut self) -> Result<(), Self::Error> {
            self.log.push("finish".into());
            Ok(())
        }
    }

    fn scene() -> SceneFrame {
        SceneFrame {
            shader: *ShaderState::new().parameters(),
            orb: orb_transform(Vec3::ZERO, 0.0),
            particles: particle_transform(0.0),
        }
    }

    #[test]
    fn passes_run_base_then_bloom() {
        let mut p = RenderPipeline::new(Recorder::default(), 800, 600);
        p.render(&scene()).unwrap();
        assert_eq!(p.executor().log, ["begin", "base", "bloom", "finish"]);
    }

    #[test]
    fn bloom_uses_reference_settings() {
        let p = RenderPipeline::new(Recorder::default(), 800, 600);
        let PassKind::Bloom(params) = p.passes()[1].kind else {
            panic!("second pass is not bloom");
        };
        assert_eq!(params.strength, 2.0);
        assert_eq!(params.radius, 0.4);
        assert_eq!(params.threshold, 0.1);
    }

    #[test]
    fn resize_sets_exact_aspect_and_reaches_every_pass() {
        let mut p = RenderPipeline::new(Recorder::default(), 800, 600);
        p.resize(1920, 1080);
        assert_eq!(p.camera().aspect, 1920.0 / 1080.0);
        assert!(p.passes().iter().all(|r| (r.width, r.height) == (1920, 1080)));
        assert_eq!(p.executor().size, (1920, 1080));
    }

    #[test]
    fn resize_is_idempotent() {
        let mut p = RenderPipeline::new(Recorder::default(), 800, 600);
        p.resize(1024, 768);
        let once = (p.camera().clone(), p.passes().to_vec(), p.size());
        p.resize(1024, 768);
        let twice = (p.camera().clone(), p.passes().to_vec(), p.size());
        assert_eq!(once, twice);
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let mut p = RenderPipeline::new(Recorder::default(), 800, 600);
        p.resize(0, 600);
        assert_eq!(p.size(), (800, 600));
        assert_eq!(p.executor().size, (0, 0));
    }

    #[test]
    fn a_failed_pass_stops_the_frame() {
        let mut p = RenderPipeline::new(
            Recorder {
                fail_on_base: true,
                ..Default::default()
            },
            800,
            600,
        );
        assert_eq!(p.render(&scene()), Err("lost"));
        assert_eq!(p.executor().log, ["begin"]);
    }
}
