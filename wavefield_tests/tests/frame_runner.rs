//! Frame runner scheduling, event draining and texture loading.

use std::{sync::Arc, time::Duration};

use tokio::sync::watch;
use wavefield_client::{console::ConsoleCommand, FrameRunner, LoopEvent, StopReason};
use wavefield_shared::{
    assets::{MemorySource, TextureState},
    cursor::CursorState,
    input::InputEvent,
    render::RenderCall,
    viewport::Viewport,
};
use wavefield_tests::{init_tracing, recording_loop};

const TEXTURE: &str = "textures/particles/1.png";

fn input(event: InputEvent) -> LoopEvent {
    LoopEvent::Command(ConsoleCommand::Input(event))
}

#[test]
fn interval_follows_refresh_rate() {
    assert_eq!(FrameRunner::new(50).interval(), Duration::from_millis(20));
    // Zero is clamped to one tick per second.
    assert_eq!(FrameRunner::new(0).interval(), Duration::from_secs(1));
}

#[tokio::test]
async fn stops_at_frame_limit() {
    init_tracing();
    let mut anim = recording_loop(3, 3);
    let mut runner = FrameRunner::new(1000).with_max_frames(Some(5));

    let summary = runner.run(&mut anim).await;
    assert_eq!(summary.frames, 5);
    assert_eq!(summary.reason, StopReason::FrameLimit);
    assert_eq!(anim.renderer().frames().count(), 5);
}

#[tokio::test]
async fn zero_frame_limit_draws_nothing() {
    let mut anim = recording_loop(3, 3);
    let mut runner = FrameRunner::new(1000).with_max_frames(Some(0));

    let summary = runner.run(&mut anim).await;
    assert_eq!(summary.reason, StopReason::FrameLimit);
    assert_eq!(summary.frames, 0);
    assert_eq!(anim.renderer().frames().count(), 0);
}

#[tokio::test]
async fn quit_stops_before_next_tick() {
    let mut anim = recording_loop(3, 3);
    let mut runner = FrameRunner::new(1000).with_max_frames(Some(100));
    let tx = runner.sender();
    tx.send(LoopEvent::Command(ConsoleCommand::Quit)).await.unwrap();

    let summary = runner.run(&mut anim).await;
    assert_eq!(summary.reason, StopReason::Quit);
    assert_eq!(summary.frames, 0);
    assert_eq!(anim.renderer().frames().count(), 0);
}

#[tokio::test]
async fn queued_input_lands_before_first_tick() {
    let mut anim = recording_loop(3, 3);
    let mut runner = FrameRunner::new(1000).with_max_frames(Some(1));
    runner
        .sender()
        .send(input(InputEvent::pointer(800.0, 0.0)))
        .await
        .unwrap();

    runner.run(&mut anim).await;
    assert_eq!(anim.cursor(), CursorState { x: 0.5, y: -0.5 });
    match anim.renderer().last_frame() {
        Some(RenderCall::Render {
            camera_position, ..
        }) => {
            assert_eq!(camera_position.y, 1.0);
            assert_eq!(camera_position.z, 0.5);
        }
        other => panic!("expected a render call, got {other:?}"),
    }
}

#[tokio::test]
async fn resizes_in_one_frame_collapse_to_last() {
    let mut anim = recording_loop(3, 3);
    let mut runner = FrameRunner::new(1000).with_max_frames(Some(1));
    let tx = runner.sender();
    for (w, h) in [(1024, 768), (640, 480), (1600, 900)] {
        tx.send(input(InputEvent::resize(w, h, 1.0))).await.unwrap();
    }

    runner.run(&mut anim).await;
    assert_eq!(anim.viewport(), Viewport::new(1600, 900, 1.0));
    assert_eq!(anim.camera().aspect(), 1600.0 / 900.0);
    assert!(matches!(
        anim.renderer().calls.last(),
        Some(RenderCall::Render { frame: 1, .. })
    ));
}

#[tokio::test]
async fn texture_attaches_once_loaded() {
    init_tracing();
    let mut anim = recording_loop(3, 3);
    let mut runner = FrameRunner::new(1000).with_max_frames(Some(5));
    let source = MemorySource::new().with_file(TEXTURE, &b"\x89PNG\r\n"[..]);
    let handle = runner.load_texture(Arc::new(source), TEXTURE);
    assert_eq!(runner.textures().state(handle), Some(&TextureState::Pending));

    runner.run(&mut anim).await;
    assert_eq!(anim.material().alpha_map, Some(handle));
    assert!(anim
        .renderer()
        .calls
        .contains(&RenderCall::AttachTexture(handle)));
    assert!(matches!(
        runner.textures().state(handle),
        Some(TextureState::Ready(_))
    ));
}

#[tokio::test]
async fn missing_texture_keeps_drawing() {
    init_tracing();
    let mut anim = recording_loop(3, 3);
    let mut runner = FrameRunner::new(1000).with_max_frames(Some(5));
    let handle = runner.load_texture(Arc::new(MemorySource::new()), TEXTURE);

    let summary = runner.run(&mut anim).await;
    assert_eq!(summary.reason, StopReason::FrameLimit);
    assert_eq!(anim.material().alpha_map, None);
    match runner.textures().state(handle) {
        Some(TextureState::Failed(reason)) => assert!(reason.contains(TEXTURE), "{reason}"),
        other => panic!("expected failed texture, got {other:?}"),
    }
}

#[tokio::test]
async fn shutdown_signal_stops_loop() {
    let mut anim = recording_loop(3, 3);
    let (tx, rx) = watch::channel(false);
    let mut runner = FrameRunner::new(1000).with_shutdown(rx);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let _ = tx.send(true);
    });

    let summary = runner.run(&mut anim).await;
    assert_eq!(summary.reason, StopReason::Shutdown);
    assert!(summary.frames >= 1);
    assert_eq!(anim.renderer().frames().count() as u64, summary.frames);
}
