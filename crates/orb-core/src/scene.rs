//! Placement of the orb and the particle field for one frame.

use crate::constants::{ORB_SPIN_X_PER_SEC, ORB_SPIN_Y_PER_SEC, PARTICLE_SPIN_Y_PER_SEC};
use crate::shader::ShaderParameters;
use glam::{Mat4, Vec3};

/// Translation plus Euler rotation applied in X, Y, Z order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObjectTransform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl ObjectTransform {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
    }
}

/// The orb follows the cursor and spins slowly on two axes.
pub fn orb_transform(position: Vec3, elapsed: f32) -> ObjectTransform {
    ObjectTransform {
        position,
        rotation: Vec3::new(elapsed * ORB_SPIN_X_PER_SEC, elapsed * ORB_SPIN_Y_PER_SEC, 0.0),
    }
}

/// The particle field only turns about Y; it ignores audio and cursor.
pub fn particle_transform(elapsed: f32) -> ObjectTransform {
    ObjectTransform {
        position: Vec3::ZERO,
        rotation: Vec3::new(0.0, elapsed * PARTICLE_SPIN_Y_PER_SEC, 0.0),
    }
}

/// Everything the render passes read for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFrame {
    pub shader: ShaderParameters,
    pub orb: ObjectTransform,
    pub particles: ObjectTransform,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orb_spins_at_configured_rates() {
        let t = orb_transform(Vec3::new(1.0, 2.0, 0.0), 10.0);
        assert!((t.rotation.x - 1.0).abs() < 1e-6);
        assert!((t.rotation.y - 2.0).abs() < 1e-6);
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn particles_only_turn_about_y() {
        let t = particle_transform(20.0);
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation.x, 0.0);
        assert!((t.rotation.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn model_matrix_translates_origin_to_position() {
        let t = ObjectTransform {
            position: Vec3::new(3.0, -2.0, 0.5),
            rotation: Vec3::new(0.3, 1.2, 0.0),
        };
        let p = t.model_matrix().transform_point3(Vec3::ZERO);
        assert!((p - t.position).length() < 1e-6);
    }
}
