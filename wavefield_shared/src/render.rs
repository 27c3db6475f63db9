//! Rendering abstraction.
//!
//! This crate intentionally does not depend on a graphics backend.
//! A renderer receives the point buffers once, then one [`FrameView`] per tick.

use crate::{
    assets::{Texture, TextureHandle},
    camera::PerspectiveCamera,
    color::Rgb,
    field::PointField,
    material::PointsMaterial,
    math::{Mat4, Vec3},
    scene::MeshTransform,
};

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub frame: u64,
    pub elapsed: f64,
    pub camera: &'a PerspectiveCamera,
    pub mesh: &'a MeshTransform,
}

/// Output service the animation loop draws through.
pub trait RenderBackend: Send {
    /// Output size in logical pixels.
    fn set_size(&mut self, width: u32, height: u32);
    /// Already capped device pixel ratio.
    fn set_pixel_ratio(&mut self, ratio: f32);
    fn set_clear_color(&mut self, color: Rgb);
    /// Called once with the generated field.
    fn upload_points(&mut self, field: &PointField, material: &PointsMaterial);
    fn attach_texture(&mut self, handle: TextureHandle, texture: &Texture);
    fn render(&mut self, frame: &FrameView<'_>);
}

/// A no-op renderer useful for headless runs.
#[derive(Default)]
pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn set_size(&mut self, _width: u32, _height: u32) {}
    fn set_pixel_ratio(&mut self, _ratio: f32) {}
    fn set_clear_color(&mut self, _color: Rgb) {}
    fn upload_points(&mut self, _field: &PointField, _material: &PointsMaterial) {}
    fn attach_texture(&mut self, _handle: TextureHandle, _texture: &Texture) {}
    fn render(&mut self, _frame: &FrameView<'_>) {}
}

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    SetSize {
        width: u32,
        height: u32,
    },
    SetPixelRatio(f32),
    SetClearColor(Rgb),
    UploadPoints {
        points: usize,
        material: PointsMaterial,
    },
    AttachTexture(TextureHandle),
    Render {
        frame: u64,
        camera_position: Vec3,
        view: Mat4,
        mesh_rotation_y: f32,
    },
}

/// Renderer that records every call, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> impl Iterator<Item = &RenderCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, RenderCall::Render { .. }))
    }

    pub fn last_frame(&self) -> Option<&RenderCall> {
        self.frames().last()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderBackend for RecordingRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.calls.push(RenderCall::SetSize { width, height });
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.calls.push(RenderCall::SetPixelRatio(ratio));
    }

    fn set_clear_color(&mut self, color: Rgb) {
        self.calls.push(RenderCall::SetClearColor(color));
    }

    fn upload_points(&mut self, field: &PointField, material: &PointsMaterial) {
        self.calls.push(RenderCall::UploadPoints {
            points: field.len(),
            material: material.clone(),
        });
    }

    fn attach_texture(&mut self, handle: TextureHandle, _texture: &Texture) {
        self.calls.push(RenderCall::AttachTexture(handle));
    }

    fn render(&mut self, frame: &FrameView<'_>) {
        self.calls.push(RenderCall::Render {
            frame: frame.frame,
            camera_position: frame.camera.position,
            view: frame.camera.view(),
            mesh_rotation_y: frame.mesh.rotation_y,
        });
    }
}
