//! Global cursor tracking.

use crate::constants::{ORB_RANGE_X, ORB_RANGE_Y, ORB_Z, POINTER_SMOOTHING};
use crate::smoothing::SmoothedVec2;
use glam::{Vec2, Vec3};

/// Map client pixels to normalized device coordinates with +Y up.
#[inline]
pub fn client_to_ndc(client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) -> Vec2 {
    Vec2::new(
        2.0 * client_x / viewport_w - 1.0,
        -(2.0 * client_y / viewport_h - 1.0),
    )
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub target: Vec2,
    pub smoothed: Vec2,
}

/// Follows the cursor with a deliberately slow smoothing factor so the orb
/// drifts after it rather than snapping.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    ndc: SmoothedVec2,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pointer_move(
        &mut self,
        client_x: f32,
        client_y: f32,
        viewport_w: f32,
        viewport_h: f32,
    ) {
        if viewport_w <= 0.0 || viewport_h <= 0.0 {
            return;
        }
        self.ndc
            .set_target(client_to_ndc(client_x, client_y, viewport_w, viewport_h));
    }

    pub fn advance(&mut self) -> Vec2 {
        self.ndc.advance(POINTER_SMOOTHING)
    }

    pub fn state(&self) -> PointerState {
        PointerState {
            target: self.ndc.target(),
            smoothed: self.ndc.current(),
        }
    }

    /// World position of the driven object for the current smoothed cursor.
    pub fn object_position(&self) -> Vec3 {
        let s = self.ndc.current();
        Vec3::new(s.x * ORB_RANGE_X, s.y * ORB_RANGE_Y, ORB_Z)
    }
}
