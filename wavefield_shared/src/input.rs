//! Input events.
//!
//! Hosts translate their native pointer, touch and resize callbacks into
//! [`InputEvent`]s and hand them to the animation loop between ticks.

use crate::{cursor::TouchPoint, viewport::Viewport};

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMove { client_x: f32, client_y: f32 },
    TouchMove(Vec<TouchPoint>),
    Resize(Viewport),
}

impl InputEvent {
    pub fn pointer(client_x: f32, client_y: f32) -> Self {
        InputEvent::PointerMove { client_x, client_y }
    }

    pub fn touch(client_x: f32, client_y: f32) -> Self {
        InputEvent::TouchMove(vec![TouchPoint { client_x, client_y }])
    }

    pub fn resize(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        InputEvent::Resize(Viewport::new(width, height, device_pixel_ratio))
    }
}
