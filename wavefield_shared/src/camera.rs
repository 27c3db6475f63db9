//! Perspective camera.
//!
//! The projection matrix is cached and only rebuilt when the aspect ratio
//! changes; the view matrix is rebuilt by every [`PerspectiveCamera::look_at`].

use crate::math::{Mat4, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    view: Mat4,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            fov_y_degrees,
            aspect,
            near,
            far,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    /// Orients the camera at its current position towards `target`.
    pub fn look_at(&mut self, target: Vec3) {
        self.view = Mat4::look_at_rh(self.position, target, Vec3::Y);
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_change_rebuilds_projection() {
        let mut camera = PerspectiveCamera::new(75.0, 800.0 / 600.0, 0.01, 1000.0);
        let before = camera.projection();
        camera.set_aspect(1600.0 / 900.0);
        assert_ne!(camera.projection(), before);
        assert_eq!(camera.projection().m[1][1], before.m[1][1]);
        assert_eq!(camera.projection().m[0][0], before.m[1][1] / (1600.0 / 900.0));
    }

    #[test]
    fn looking_at_origin_centers_it_on_screen() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.01, 1000.0);
        camera.position = Vec3::new(6.0, 1.2, 6.0);
        camera.look_at(Vec3::ZERO);
        let ndc = camera.view_projection().transform_point(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }
}
