//! Shared fixtures for the wavefield integration tests.

use wavefield_shared::{
    animation::AnimationLoop,
    config::SceneConfig,
    field::generate,
    render::RecordingRenderer,
    time::FixedClock,
};

/// Installs a test-friendly subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

/// Default scene on a small grid, drawing into a recorder.
pub fn recording_loop(width: usize, length: usize) -> AnimationLoop<RecordingRenderer, FixedClock> {
    recording_loop_with(&SceneConfig::default(), width, length)
}

pub fn recording_loop_with(
    cfg: &SceneConfig,
    width: usize,
    length: usize,
) -> AnimationLoop<RecordingRenderer, FixedClock> {
    let field = generate(width, length).expect("test grid dimensions are positive");
    AnimationLoop::new(cfg, field, RecordingRenderer::new(), FixedClock(0.0))
}
