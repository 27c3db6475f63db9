//! Per-frame animation loop.
//!
//! One tick, in order:
//! 1. `camera.y = cursor.y + 1.5`
//! 2. `camera.z = cursor.x` (camera.x is left alone)
//! 3. `mesh.rotation_y = elapsed / 10`
//! 4. the camera re-targets the mesh position
//! 5. the renderer draws the frame
//!
//! Scheduling the next tick is the host's job (see the client's frame runner).
//! Input events only write state; they never draw.

use tracing::{debug, info, trace};

use crate::{
    assets::{Texture, TextureHandle},
    camera::PerspectiveCamera,
    config::SceneConfig,
    cursor::{CursorState, TouchAxisMode, TouchPoint},
    field::PointField,
    input::InputEvent,
    material::PointsMaterial,
    math::{Mat4, Vec3},
    render::{FrameView, RenderBackend},
    scene::MeshTransform,
    time::Clock,
    viewport::Viewport,
};

/// Height added to the vertical cursor offset.
pub const CAMERA_HEIGHT_OFFSET: f32 = 1.5;
/// Divisor turning elapsed seconds into mesh rotation (radians).
pub const ROTATION_PERIOD_DIVISOR: f64 = 10.0;

/// Camera and mesh state produced by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub frame: u64,
    pub camera_position: Vec3,
    pub view: Mat4,
    pub mesh_rotation_y: f32,
}

pub struct AnimationLoop<R: RenderBackend, C: Clock> {
    field: PointField,
    material: PointsMaterial,
    camera: PerspectiveCamera,
    mesh: MeshTransform,
    cursor: CursorState,
    viewport: Viewport,
    touch_axis: TouchAxisMode,
    max_pixel_ratio: f32,
    renderer: R,
    clock: C,
    frame: u64,
}

impl<R: RenderBackend, C: Clock> AnimationLoop<R, C> {
    /// Sets up camera and mesh from `cfg` and hands the field to the renderer.
    pub fn new(cfg: &SceneConfig, field: PointField, mut renderer: R, clock: C) -> Self {
        let viewport = cfg.viewport;
        let mut camera = PerspectiveCamera::new(
            cfg.camera.fov_y_degrees,
            viewport.aspect(),
            cfg.camera.near,
            cfg.camera.far,
        );
        camera.position = cfg.camera.position;

        let mesh = MeshTransform {
            position: Vec3::ZERO,
            scale: cfg.mesh.scale,
            rotation_y: cfg.mesh.rotation_y,
        };
        let material = PointsMaterial::particles();
        let max_pixel_ratio = cfg.renderer.max_pixel_ratio;

        renderer.set_size(viewport.width, viewport.height);
        renderer.set_pixel_ratio(viewport.pixel_ratio(max_pixel_ratio));
        renderer.set_clear_color(cfg.renderer.clear_color);
        renderer.upload_points(&field, &material);

        info!(
            points = field.len(),
            width = viewport.width,
            height = viewport.height,
            "Animation loop ready"
        );

        Self {
            field,
            material,
            camera,
            mesh,
            cursor: CursorState::default(),
            viewport,
            touch_axis: cfg.input.touch_axis,
            max_pixel_ratio,
            renderer,
            clock,
            frame: 0,
        }
    }

    /// Runs one tick at the clock's current time.
    pub fn tick(&mut self) -> FrameState {
        let elapsed = self.clock.elapsed_secs();
        self.tick_at(elapsed)
    }

    /// Runs one tick at an explicit elapsed time.
    pub fn tick_at(&mut self, elapsed: f64) -> FrameState {
        self.camera.position.y = self.cursor.y + CAMERA_HEIGHT_OFFSET;
        self.camera.position.z = self.cursor.x;
        self.mesh.rotation_y = (elapsed / ROTATION_PERIOD_DIVISOR) as f32;
        self.camera.look_at(self.mesh.position);

        self.frame += 1;
        self.renderer.render(&FrameView {
            frame: self.frame,
            elapsed,
            camera: &self.camera,
            mesh: &self.mesh,
        });

        trace!(
            frame = self.frame,
            elapsed,
            camera_y = self.camera.position.y,
            camera_z = self.camera.position.z,
            rotation = self.mesh.rotation_y,
            "tick"
        );

        FrameState {
            frame: self.frame,
            camera_position: self.camera.position,
            view: self.camera.view(),
            mesh_rotation_y: self.mesh.rotation_y,
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { client_x, client_y } => {
                self.on_pointer_move(client_x, client_y)
            }
            InputEvent::TouchMove(touches) => self.on_touch_move(&touches),
            InputEvent::Resize(viewport) => self.on_resize(viewport),
        }
    }

    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.cursor.on_pointer_move(client_x, client_y, &self.viewport);
    }

    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) {
        self.cursor
            .on_touch_move(touches, &self.viewport, self.touch_axis);
    }

    /// Stores the new viewport, refreshes the projection and tells the renderer.
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        self.renderer.set_size(viewport.width, viewport.height);
        self.renderer
            .set_pixel_ratio(viewport.pixel_ratio(self.max_pixel_ratio));
        debug!(
            width = viewport.width,
            height = viewport.height,
            aspect = self.camera.aspect(),
            "Viewport resized"
        );
    }

    /// Uses `texture` as the per-point alpha mask.
    pub fn attach_texture(&mut self, handle: TextureHandle, texture: &Texture) {
        self.material.alpha_map = Some(handle);
        self.renderer.attach_texture(handle, texture);
        info!(path = %texture.path, bytes = texture.bytes.len(), "Alpha map attached");
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn material(&self) -> &PointsMaterial {
        &self.material
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn mesh(&self) -> &MeshTransform {
        &self.mesh
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of ticks run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
