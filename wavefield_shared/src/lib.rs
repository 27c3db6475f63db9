//! `wavefield_shared`
//!
//! Core libraries for the wavefield viewer.
//!
//! Design goals:
//! - Deterministic point generation; the field is built once and never mutated.
//! - The renderer and clock sit behind traits so the loop runs headless.
//! - Input only writes state; drawing is driven by ticks alone.
//! - No `unsafe`.

pub mod animation;
pub mod assets;
pub mod camera;
pub mod color;
pub mod config;
pub mod cursor;
pub mod field;
pub mod input;
pub mod material;
pub mod math;
pub mod render;
pub mod scene;
pub mod time;
pub mod viewport;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::animation::{AnimationLoop, FrameState};
    pub use crate::color::Rgb;
    pub use crate::config::SceneConfig;
    pub use crate::cursor::{CursorState, TouchAxisMode, TouchPoint};
    pub use crate::field::{generate, FieldError, FieldGenerator, FieldPalette, PointField};
    pub use crate::input::InputEvent;
    pub use crate::math::*;
    pub use crate::render::{NullRenderer, RenderBackend};
    pub use crate::viewport::Viewport;
}
