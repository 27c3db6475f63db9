//! Normalized cursor state written by pointer and touch handlers.
//!
//! Both handlers map a client-space position to roughly `[-0.5, 0.5]` on
//! each axis, with `(0, 0)` at the viewport center. Writes are
//! last-write-wins; handlers never trigger a render.

use serde::{Deserialize, Serialize};

use crate::viewport::Viewport;

/// How the touch handler normalizes the horizontal coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchAxisMode {
    /// `x / width`, matching the pointer handler.
    #[default]
    Corrected,
    /// `x / height`, bit-compatible with the original viewer.
    Legacy,
}

/// A single touch contact in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub client_x: f32,
    pub client_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    pub x: f32,
    pub y: f32,
}

impl CursorState {
    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32, viewport: &Viewport) {
        self.x = client_x / viewport.width.max(1) as f32 - 0.5;
        self.y = client_y / viewport.height.max(1) as f32 - 0.5;
    }

    /// Uses the first touch only; an empty touch list leaves the state as is.
    pub fn on_touch_move(&mut self, touches: &[TouchPoint], viewport: &Viewport, mode: TouchAxisMode) {
        let Some(touch) = touches.first() else {
            return;
        };
        let x_extent = match mode {
            TouchAxisMode::Corrected => viewport.width,
            TouchAxisMode::Legacy => viewport.height,
        };
        self.x = touch.client_x / x_extent.max(1) as f32 - 0.5;
        self.y = touch.client_y / viewport.height.max(1) as f32 - 0.5;
    }
}
