//! The per-frame driver tying audio, input smoothing and rendering together.

use crate::audio::{AudioLevelExtractor, AudioSample, FrequencySource};
use crate::magnetic::{ElementHandle, MagneticElement};
use crate::pipeline::{PassExecutor, RenderPipeline};
use crate::pointer::PointerTracker;
use crate::scene::{orb_transform, particle_transform, ObjectTransform, SceneFrame};
use crate::shader::ShaderState;
use instant::Instant;

/// Monotonic seconds since construction.
pub struct FrameClock {
    start: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl FrameClock {
    pub fn elapsed_secs(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Owns every per-frame component. Constructed once at startup; the host
/// calls [`FrameScheduler::frame`] once per display refresh and forwards
/// input events to the `on_*` handlers between frames.
///
/// Handlers only retarget; nothing renders outside `frame`.
pub struct FrameScheduler<S, E, H> {
    clock: FrameClock,
    elapsed: f32,
    frames: u64,
    audio: AudioLevelExtractor<S>,
    last_sample: AudioSample,
    shader: ShaderState,
    pointer: PointerTracker,
    magnets: Vec<MagneticElement<H>>,
    orb: ObjectTransform,
    particles: ObjectTransform,
    pipeline: RenderPipeline<E>,
}

impl<S, E, H> FrameScheduler<S, E, H>
where
    S: FrequencySource,
    E: PassExecutor,
    H: ElementHandle,
{
    pub fn new(pipeline: RenderPipeline<E>, magnets: Vec<MagneticElement<H>>) -> Self {
        Self {
            clock: FrameClock::default(),
            elapsed: 0.0,
            frames: 0,
            audio: AudioLevelExtractor::new(),
            last_sample: AudioSample::SILENT,
            shader: ShaderState::new(),
            pointer: PointerTracker::new(),
            magnets,
            orb: ObjectTransform::default(),
            particles: ObjectTransform::default(),
            pipeline,
        }
    }

    /// One display refresh, timed by the internal clock.
    pub fn frame(&mut self) -> Result<(), E::Error> {
        let now = self.clock.elapsed_secs();
        self.frame_at(now)
    }

    /// One display refresh at `elapsed` seconds. Readings older than the
    /// previous frame are clamped so shader time never runs backwards.
    pub fn frame_at(&mut self, elapsed: f32) -> Result<(), E::Error> {
        let elapsed = elapsed.max(self.elapsed);
        let dt = elapsed - self.elapsed;
        self.elapsed = elapsed;
        self.frames += 1;

        self.last_sample = self.audio.sample();
        self.shader.advance(dt, elapsed, self.last_sample);
        self.pointer.advance();
        self.orb = orb_transform(self.pointer.object_position(), elapsed);
        self.particles = particle_transform(elapsed);
        for magnet in self.magnets.iter_mut() {
            magnet.advance_and_apply();
        }

        let scene = SceneFrame {
            shader: *self.shader.parameters(),
            orb: self.orb,
            particles: self.particles,
        };
        self.pipeline.render(&scene)
    }

    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) {
        self.pointer
            .on_pointer_move(client_x, client_y, viewport_w, viewport_h);
    }

    pub fn on_element_pointer_move(&mut self, index: usize, client_x: f32, client_y: f32) {
        if let Some(m) = self.magnets.get_mut(index) {
            m.on_pointer_move(client_x, client_y);
        }
    }

    pub fn on_element_pointer_leave(&mut self, index: usize) {
        if let Some(m) = self.magnets.get_mut(index) {
            m.on_pointer_leave();
        }
    }

    /// Viewport changed size; applied before the next frame is drawn.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pipeline.resize(width, height);
    }

    pub fn audio(&self) -> &AudioLevelExtractor<S> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioLevelExtractor<S> {
        &mut self.audio
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn last_sample(&self) -> AudioSample {
        self.last_sample
    }

    pub fn shader(&self) -> &ShaderState {
        &self.shader
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn magnets(&self) -> &[MagneticElement<H>] {
        &self.magnets
    }

    pub fn orb(&self) -> ObjectTransform {
        self.orb
    }

    pub fn particles(&self) -> ObjectTransform {
        self.particles
    }

    pub fn pipeline(&self) -> &RenderPipeline<E> {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut RenderPipeline<E> {
        &mut self.pipeline
    }
}
