//! Renderer that reports through `tracing` instead of drawing.
//!
//! Stands in for a GPU backend on headless machines: it keeps the same
//! state a real backend would (output size, pixel ratio, point count,
//! alpha map) and logs frame rate plus where the field lands on screen.

use std::time::Instant;

use tracing::{debug, info, trace};
use wavefield_shared::{
    assets::{Texture, TextureHandle},
    color::Rgb,
    field::{Aabb, PointField},
    material::PointsMaterial,
    render::{FrameView, RenderBackend},
};

pub struct LogRenderer {
    size: (u32, u32),
    pixel_ratio: f32,
    clear_color: Rgb,
    points: usize,
    bounds: Option<Aabb>,
    alpha_map: Option<TextureHandle>,
    frames_since_report: u64,
    last_report: Instant,
    fps: f64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self {
            size: (0, 0),
            pixel_ratio: 1.0,
            clear_color: Rgb::BLACK,
            points: 0,
            bounds: None,
            alpha_map: None,
            frames_since_report: 0,
            last_report: Instant::now(),
            fps: 0.0,
        }
    }

    /// Frames per second measured over the last reporting window.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Output size in device pixels.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        (
            (self.size.0 as f32 * self.pixel_ratio).round() as u32,
            (self.size.1 as f32 * self.pixel_ratio).round() as u32,
        )
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn alpha_map(&self) -> Option<TextureHandle> {
        self.alpha_map
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for LogRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        debug!(width, height, "Output size");
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
        debug!(ratio, "Pixel ratio");
    }

    fn set_clear_color(&mut self, color: Rgb) {
        self.clear_color = color;
        debug!(color = %color, "Clear color");
    }

    fn upload_points(&mut self, field: &PointField, material: &PointsMaterial) {
        self.points = field.len();
        self.bounds = Some(field.bounds());
        info!(
            points = self.points,
            point_size = material.size,
            blending = ?material.blending,
            "Point buffers uploaded"
        );
    }

    fn attach_texture(&mut self, handle: TextureHandle, texture: &Texture) {
        self.alpha_map = Some(handle);
        debug!(?handle, path = %texture.path, "Alpha map bound");
    }

    fn render(&mut self, frame: &FrameView<'_>) {
        if let Some(bounds) = self.bounds {
            let mvp = frame.camera.view_projection() * frame.mesh.model_matrix();
            let center = mvp.transform_point(bounds.center());
            trace!(
                frame = frame.frame,
                ndc_x = center.x,
                ndc_y = center.y,
                ndc_z = center.z,
                "Field center"
            );
        }

        self.frames_since_report += 1;
        let window = self.last_report.elapsed().as_secs_f64();
        if window >= 1.0 {
            self.fps = self.frames_since_report as f64 / window;
            self.frames_since_report = 0;
            self.last_report = Instant::now();

            let (width, height) = self.drawing_buffer_size();
            info!(
                frame = frame.frame,
                fps = self.fps,
                width,
                height,
                points = self.points,
                rotation = frame.mesh.rotation_y,
                "Frame stats"
            );
        }
    }
}
