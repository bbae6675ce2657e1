//! Buttons that lean toward a nearby cursor and spring back when it leaves.

use crate::constants::{MAGNET_PULL, MAGNET_RADIUS_PX, MAGNET_SMOOTHING};
use crate::smoothing::SmoothedVec2;
use glam::Vec2;

/// Client-space bounding box of a UI element, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementRect {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// The host's view of one interactive element.
pub trait ElementHandle {
    fn bounding_rect(&self) -> ElementRect;
    /// Translate the element by `offset` CSS pixels.
    fn apply_offset(&self, offset: Vec2);
}

#[derive(Clone, Debug)]
pub struct MagneticAttractor {
    offset: SmoothedVec2,
    activation_radius_px: f32,
    pull_factor: f32,
}

impl Default for MagneticAttractor {
    fn default() -> Self {
        Self::new(MAGNET_RADIUS_PX, MAGNET_PULL)
    }
}

impl MagneticAttractor {
    pub fn new(activation_radius_px: f32, pull_factor: f32) -> Self {
        Self {
            offset: SmoothedVec2::default(),
            activation_radius_px,
            pull_factor,
        }
    }

    /// Retarget from a pointer position and the element's current rect.
    ///
    /// Inside the radius the element is pulled a fixed fraction of the way
    /// toward the cursor; outside it the pull is zero. The edge is hard.
    pub fn on_pointer_move(&mut self, pointer: Vec2, rect: ElementRect) {
        let delta = pointer - rect.center();
        let target = if delta.length() < self.activation_radius_px {
            delta * self.pull_factor
        } else {
            Vec2::ZERO
        };
        self.offset.set_target(target);
    }

    pub fn on_pointer_leave(&mut self) {
        self.offset.set_target(Vec2::ZERO);
    }

    pub fn advance(&mut self) -> Vec2 {
        self.offset.advance(MAGNET_SMOOTHING)
    }

    pub fn target(&self) -> Vec2 {
        self.offset.target()
    }

    pub fn offset(&self) -> Vec2 {
        self.offset.current()
    }

    pub fn activation_radius_px(&self) -> f32 {
        self.activation_radius_px
    }

    pub fn pull_factor(&self) -> f32 {
        self.pull_factor
    }
}

/// One interactive element and its attraction state, kept beside the
/// element rather than attached to it.
pub struct MagneticElement<H> {
    handle: H,
    attractor: MagneticAttractor,
}

impl<H: ElementHandle> MagneticElement<H> {
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            attractor: MagneticAttractor::default(),
        }
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn attractor(&self) -> &MagneticAttractor {
        &self.attractor
    }

    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32) {
        let rect = self.handle.bounding_rect();
        self.attractor
            .on_pointer_move(Vec2::new(client_x, client_y), rect);
    }

    pub fn on_pointer_leave(&mut self) {
        self.attractor.on_pointer_leave();
    }

    /// Smooth one frame and push the offset to the element.
    pub fn advance_and_apply(&mut self) -> Vec2 {
        let offset = self.attractor.advance();
        self.handle.apply_offset(offset);
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> ElementRect {
        ElementRect {
            left: 100.0,
            top: 100.0,
            width: 120.0,
            height: 40.0,
        }
    }

    #[test]
    fn pull_inside_radius_is_forty_percent() {
        let mut m = MagneticAttractor::default();
        let c = button().center();
        m.on_pointer_move(c + Vec2::new(30.0, -40.0), button());
        assert!((m.target() - Vec2::new(12.0, -16.0)).length() < 1e-5);
    }

    #[test]
    fn radius_edge_is_hard() {
        let mut m = MagneticAttractor::default();
        let c = button().center();
        m.on_pointer_move(c + Vec2::new(99.9, 0.0), button());
        assert!(m.target().x > 39.0);
        m.on_pointer_move(c + Vec2::new(100.0, 0.0), button());
        assert_eq!(m.target(), Vec2::ZERO);
    }

    #[test]
    fn leave_zeroes_target_and_offset_springs_back() {
        let mut m = MagneticAttractor::default();
        let c = button().center();
        m.on_pointer_move(c + Vec2::new(20.0, 20.0), button());
        for _ in 0..30 {
            m.advance();
        }
        assert!(m.offset().length() > 5.0);
        m.on_pointer_leave();
        assert_eq!(m.target(), Vec2::ZERO);
        let mut prev = m.offset().length();
        for _ in 0..60 {
            let len = m.advance().length();
            assert!(len < prev);
            prev = len;
        }
        assert!(prev < 0.1);
    }
}
