//! Mesh transform for the point field.

use crate::math::{Mat4, Vec3};

/// Transform applied to the whole field; per-point data never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTransform {
    pub position: Vec3,
    pub scale: Vec3,
    /// Rotation about +Y in radians.
    pub rotation_y: f32,
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::splat(1.0),
            rotation_y: 0.0,
        }
    }
}

impl MeshTransform {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_y_translation(self.scale, self.rotation_y, self.position)
    }
}
