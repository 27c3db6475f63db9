//! `wavefield_client`
//!
//! Host-side pieces of the viewer:
//! - Frame scheduling at the display refresh rate
//! - Console input translated into pointer/touch/resize events
//! - Filesystem asset loading
//! - A logging renderer for headless runs

pub mod assets;
pub mod console;
pub mod renderer;
pub mod runner;

pub use runner::{FrameRunner, LoopEvent, RunSummary, StopReason};
