//! Exponential interpolation toward a target.
//!
//! Every noisy or discrete signal in the app (audio level, cursor position,
//! magnet offsets) reaches the renderer through [`step`]: once per frame the
//! current value closes a fixed fraction of its distance to the target.

use glam::Vec2;

/// Move `current` the fraction `factor` of the way to `target`.
///
/// `factor` must lie in `(0, 1]` and `target` must be finite; anything else
/// is a caller bug and trips a debug assertion.
#[inline]
pub fn step(current: f32, target: f32, factor: f32) -> f32 {
    debug_assert!(
        factor > 0.0 && factor <= 1.0,
        "smoothing factor {factor} outside (0, 1]"
    );
    debug_assert!(target.is_finite(), "non-finite smoothing target {target}");
    current + (target - current) * factor
}

/// Per-axis [`step`].
#[inline]
pub fn step_vec2(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    Vec2::new(
        step(current.x, target.x, factor),
        step(current.y, target.y, factor),
    )
}

/// Values that can be damped toward a target with [`step`].
pub trait Smoothable: Copy {
    fn step_toward(self, target: Self, factor: f32) -> Self;
}

impl Smoothable for f32 {
    #[inline]
    fn step_toward(self, target: Self, factor: f32) -> Self {
        step(self, target, factor)
    }
}

impl Smoothable for Vec2 {
    #[inline]
    fn step_toward(self, target: Self, factor: f32) -> Self {
        step_vec2(self, target, factor)
    }
}

/// A `current`/`target` pair.
///
/// The producer of a signal only ever calls [`Smoothed::set_target`]; the
/// per-frame consumer only ever calls [`Smoothed::advance`]. Neither field is
/// writable any other way.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Smoothed<T> {
    current: T,
    target: T,
}

pub type SmoothedValue = Smoothed<f32>;
pub type SmoothedVec2 = Smoothed<Vec2>;

impl<T: Smoothable> Smoothed<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            target: initial,
        }
    }

    #[inline]
    pub fn current(&self) -> T {
        self.current
    }

    #[inline]
    pub fn target(&self) -> T {
        self.target
    }

    #[inline]
    pub fn set_target(&mut self, target: T) {
        self.target = target;
    }

    /// Apply one smoothing step and return the new current value.
    #[inline]
    pub fn advance(&mut self, factor: f32) -> T {
        self.current = self.current.step_toward(self.target, factor);
        self.current
    }
}
