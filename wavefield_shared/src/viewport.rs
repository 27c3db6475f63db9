//! Output surface dimensions.

use serde::{Deserialize, Serialize};

/// Default cap applied to the device pixel ratio before it reaches the renderer.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Logical viewport size plus the device pixel ratio reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            device_pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Width over height. A zero height (minimized window) counts as 1.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Device pixel ratio capped at `max`.
    pub fn pixel_ratio(&self, max: f32) -> f32 {
        self.device_pixel_ratio.min(max)
    }
}
