// Host-side tests for the per-frame driver, with fake capture, GPU and DOM.

use glam::Vec2;
use orb_core::{
    BloomParams, Camera, CaptureError, ElementHandle, ElementRect, FrameScheduler,
    FrequencySource, MagneticElement, PassExecutor, PassKind, RenderPass, RenderPipeline,
    SceneFrame, FREQUENCY_BIN_COUNT,
};
use std::cell::RefCell;
use std::rc::Rc;

struct FakeAnalyser {
    level: u8,
    fail_reads: bool,
}

impl FrequencySource for FakeAnalyser {
    fn bin_count(&self) -> usize {
        FREQUENCY_BIN_COUNT
    }

    fn read_frequency_snapshot(&mut self, bins: &mut [u8]) -> Result<(), CaptureError> {
        if self.fail_reads {
            return Err(CaptureError::Snapshot("device gone".into()));
        }
        bins.fill(self.level);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Begin,
    Pass(PassKind),
    Finish,
    Resize(u32, u32),
}

#[derive(Default)]
struct RecordingGpu {
    calls: Vec<Call>,
    scenes: Vec<SceneFrame>,
    cameras: Vec<Camera>,
    fail_begin: bool,
}

impl PassExecutor for RecordingGpu {
    type Error = &'static str;

    fn resize(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Resize(width, height));
    }

    fn begin_frame(&mut self) -> Result<(), Self::Error> {
        if self.fail_begin {
            return Err("surface lost");
        }
        self.calls.push(Call::Begin);
        Ok(())
    }

    fn execute(
        &mut self,
        pass: &RenderPass,
        camera: &Camera,
        scene: &SceneFrame,
    ) -> Result<(), Self::Error> {
        self.calls.push(Call::Pass(pass.kind));
        self.scenes.push(*scene);
        self.cameras.push(camera.clone());
        Ok(())
    }

    fn finish_frame(&mut self) -> Result<(), Self::Error> {
        self.calls.push(Call::Finish);
        Ok(())
    }
}

struct FakeElement {
    rect: ElementRect,
    offsets: Rc<RefCell<Vec<Vec2>>>,
}

impl ElementHandle for FakeElement {
    fn bounding_rect(&self) -> ElementRect {
        self.rect
    }

    fn apply_offset(&self, offset: Vec2) {
        self.offsets.borrow_mut().push(offset);
    }
}

type Scheduler = FrameScheduler<FakeAnalyser, RecordingGpu, FakeElement>;

fn scheduler() -> Scheduler {
    FrameScheduler::new(RenderPipeline::new(RecordingGpu::default(), 800, 600), Vec::new())
}

fn loud() -> Result<FakeAnalyser, CaptureError> {
    Ok(FakeAnalyser {
        level: 255,
        fail_reads: false,
    })
}

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

#[test]
fn frame_runs_base_then_bloom() {
    let mut s = scheduler();
    s.frame_at(0.016).unwrap();
    let calls = &s.pipeline().executor().calls;
    assert_eq!(
        calls.as_slice(),
        &[
            Call::Begin,
            Call::Pass(PassKind::Base),
            Call::Pass(PassKind::Bloom(BloomParams::default())),
            Call::Finish,
        ]
    );
    let bloom = BloomParams::default();
    assert_eq!((bloom.strength, bloom.radius, bloom.threshold), (2.0, 0.4, 0.1));
}

#[test]
fn silent_until_activated() {
    let mut s = scheduler();
    for i in 0..5 {
        s.frame_at(i as f32 * 0.016).unwrap();
        assert!(!s.last_sample().active);
        assert_eq!(s.shader().parameters().audio_level(), 0.0);
    }
}

#[test]
fn loud_input_reaches_shader_smoothly() {
    let mut s = scheduler();
    assert!(s.audio_mut().activate(loud));
    for i in 1..=10 {
        s.frame_at(i as f32 * 0.016).unwrap();
    }
    assert!(s.last_sample().active);
    assert!(approx(s.last_sample().intensity, 1.0, 1e-6));
    // 1 - 0.9^10
    assert!(approx(s.shader().parameters().audio_level(), 0.6513, 1e-3));

    // the value sent with each pass is the smoothed one
    let scenes = &s.pipeline().executor().scenes;
    let last = scenes.last().unwrap();
    assert!(approx(last.shader.audio_level(), 0.6513, 1e-3));
}

#[test]
fn denied_microphone_keeps_rendering() {
    let mut s = scheduler();
    assert!(s.audio_mut().begin_activation());
    assert!(!s.audio_mut().complete_activation(Err(CaptureError::PermissionDenied)));
    assert!(s.audio().is_unavailable());
    // a second press does nothing
    assert!(!s.audio_mut().begin_activation());

    for i in 0..3 {
        s.frame_at(i as f32).unwrap();
    }
    assert_eq!(s.frame_count(), 3);
    assert_eq!(s.shader().parameters().audio_level(), 0.0);
}

#[test]
fn failed_snapshot_reads_as_zero() {
    let mut s = scheduler();
    s.audio_mut().activate(|| {
        Ok(FakeAnalyser {
            level: 200,
            fail_reads: true,
        })
    });
    s.frame_at(0.1).unwrap();
    assert!(s.last_sample().active);
    assert_eq!(s.last_sample().intensity, 0.0);
}

#[test]
fn elapsed_time_never_goes_backwards() {
    let mut s = scheduler();
    s.frame_at(2.0).unwrap();
    s.frame_at(1.0).unwrap();
    assert_eq!(s.elapsed(), 2.0);
    assert_eq!(s.shader().parameters().elapsed_time(), 2.0);
    s.frame_at(2.5).unwrap();
    assert_eq!(s.shader().parameters().elapsed_time(), 2.5);
}

#[test]
fn pointer_moves_the_orb() {
    let mut s = scheduler();
    s.on_pointer_move(800.0, 300.0, 800.0, 600.0);
    s.frame_at(0.0).unwrap();
    let orb = s.orb();
    // one pointer step of 0.05 toward ndc x = 1, scaled by 3
    assert!(approx(orb.position.x, 0.15, 1e-5));
    assert!(approx(orb.position.y, 0.0, 1e-5));
    assert_eq!(s.pipeline().executor().scenes[0].orb, orb);
}

#[test]
fn orb_and_particles_spin_with_time() {
    let mut s = scheduler();
    s.frame_at(10.0).unwrap();
    assert!(approx(s.orb().rotation.x, 1.0, 1e-5));
    assert!(approx(s.orb().rotation.y, 2.0, 1e-5));
    assert!(approx(s.particles().rotation.y, 0.5, 1e-5));
}

#[test]
fn resize_updates_camera_before_next_frame() {
    let mut s = scheduler();
    s.resize(1024, 512);
    s.frame_at(0.0).unwrap();
    let gpu = s.pipeline().executor();
    assert_eq!(gpu.calls[0], Call::Resize(1024, 512));
    assert_eq!(gpu.cameras[0].aspect, 2.0);
    assert!(s.pipeline().passes().iter().all(|p| (p.width, p.height) == (1024, 512)));
}

#[test]
fn zero_sized_resize_is_ignored() {
    let mut s = scheduler();
    s.resize(0, 600);
    assert_eq!(s.pipeline().size(), (800, 600));
    assert!(s.pipeline().executor().calls.is_empty());
}

#[test]
fn begin_failure_skips_the_frame() {
    let mut s = scheduler();
    s.pipeline_mut().executor_mut().fail_begin = true;
    assert_eq!(s.frame_at(0.1), Err("surface lost"));
    assert!(s.pipeline().executor().scenes.is_empty());

    s.pipeline_mut().executor_mut().fail_begin = false;
    assert!(s.frame_at(0.2).is_ok());
    assert_eq!(s.pipeline().executor().scenes.len(), 2);
}

#[test]
fn magnets_follow_their_own_pointer_events() {
    let near = Rc::new(RefCell::new(Vec::new()));
    let far = Rc::new(RefCell::new(Vec::new()));
    let rect = ElementRect {
        left: 0.0,
        top: 0.0,
        width: 100.0,
        height: 100.0,
    };
    let magnets = vec![
        MagneticElement::new(FakeElement {
            rect,
            offsets: near.clone(),
        }),
        MagneticElement::new(FakeElement {
            rect,
            offsets: far.clone(),
        }),
    ];
    let mut s = FrameScheduler::new(
        RenderPipeline::new(RecordingGpu::default(), 800, 600),
        magnets,
    );
    s.audio_mut().activate(loud);

    s.on_element_pointer_move(0, 90.0, 50.0);
    // unknown index is ignored
    s.on_element_pointer_move(7, 90.0, 50.0);
    s.frame_at(0.0).unwrap();
    s.frame_at(0.016).unwrap();

    let near = near.borrow();
    let far = far.borrow();
    assert_eq!(near.len(), 2);
    assert_eq!(far.len(), 2);
    // 40 px right of centre, pulled 0.4 of the way, smoothed 0.1 per frame
    assert!(approx(near[0].x, 1.6, 1e-4));
    assert!(near[1].x > near[0].x);
    assert!(far.iter().all(|o| *o == Vec2::ZERO));

    s.on_element_pointer_leave(0);
    assert_eq!(s.magnets()[0].attractor().target(), Vec2::ZERO);
}
