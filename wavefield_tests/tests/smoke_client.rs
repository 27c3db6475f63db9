use std::sync::Arc;

use wavefield_client::{assets::FsSource, renderer::LogRenderer, FrameRunner, StopReason};
use wavefield_shared::{
    animation::AnimationLoop, assets::TextureState, config::SceneConfig, field::FieldGenerator,
    time::MonotonicClock,
};
use wavefield_tests::init_tracing;

/// Smoke test: the headless client draws a few frames and picks up a texture from disk.
#[tokio::test]
async fn client_runs_few_frames() -> anyhow::Result<()> {
    init_tracing();
    let root = std::env::temp_dir().join(format!("wavefield-smoke-{}", std::process::id()));
    tokio::fs::create_dir_all(root.join("textures/particles")).await?;
    tokio::fs::write(root.join("textures/particles/1.png"), b"\x89PNG\r\n").await?;

    let mut cfg = SceneConfig::default();
    cfg.grid.width = 32;
    cfg.grid.length = 32;
    cfg.viewport.device_pixel_ratio = 3.0;

    let field = FieldGenerator::new(cfg.palette.into()).generate(cfg.grid.width, cfg.grid.length)?;
    let mut anim = AnimationLoop::new(&cfg, field, LogRenderer::new(), MonotonicClock::start());
    assert_eq!(anim.renderer().points(), 32 * 32);
    assert_eq!(anim.renderer().drawing_buffer_size(), (1600, 1200));

    let mut runner = FrameRunner::new(500);
    let path = cfg.particle_texture.clone().unwrap_or_default();
    let handle = runner.load_texture(Arc::new(FsSource::new(&root)), &path);

    // Keep drawing in batches of 10 frames until the disk read lands.
    let mut limit = 0;
    while limit < 5_000 {
        limit += 10;
        runner = runner.with_max_frames(Some(limit));
        let summary = runner.run(&mut anim).await;
        assert_eq!(summary.reason, StopReason::FrameLimit);
        assert_eq!(summary.frames, limit);
        if !matches!(runner.textures().state(handle), Some(TextureState::Pending)) {
            break;
        }
    }
    assert!(matches!(
        runner.textures().state(handle),
        Some(TextureState::Ready(_))
    ));
    assert_eq!(anim.renderer().alpha_map(), Some(handle));

    tokio::fs::remove_dir_all(&root).await?;
    Ok(())
}
