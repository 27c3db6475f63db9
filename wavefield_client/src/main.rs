//! Wavefield viewer binary.
//!
//! Usage:
//!   cargo run -p wavefield_client -- [--config scene.json] [--assets .] [--frames 600]
//!                                    [--width 1280] [--height 720] [--refresh-hz 60]
//!
//! Generates the point field once, then ticks the animation loop at the
//! refresh rate until `quit`, Ctrl-C, or the frame limit.
//!
//! Console commands:
//!   move <x> <y>                - Pointer move (client pixels)
//!   touch <x> <y> [<x> <y> ...] - Touch move
//!   resize <w> <h> [<dpr>]      - Resize the viewport
//!   status                      - Show loop state
//!   quit                        - Exit

use std::env;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;
use tracing::info;
use wavefield_client::{
    assets::FsSource,
    console::{self, ConsoleCommand},
    renderer::LogRenderer,
    FrameRunner, LoopEvent,
};
use wavefield_shared::{
    animation::AnimationLoop, config::SceneConfig, field::FieldGenerator, time::MonotonicClock,
};

#[derive(Debug, Default)]
struct ClientArgs {
    config: Option<PathBuf>,
    assets: Option<PathBuf>,
    frames: Option<u64>,
    width: Option<u32>,
    height: Option<u32>,
    refresh_hz: Option<u32>,
}

fn parse_args() -> ClientArgs {
    let mut out = ClientArgs::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                out.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--assets" if i + 1 < args.len() => {
                out.assets = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--frames" if i + 1 < args.len() => {
                out.frames = args[i + 1].parse().ok();
                i += 2;
            }
            "--width" if i + 1 < args.len() => {
                out.width = args[i + 1].parse().ok();
                i += 2;
            }
            "--height" if i + 1 < args.len() => {
                out.height = args[i + 1].parse().ok();
                i += 2;
            }
            "--refresh-hz" if i + 1 < args.len() => {
                out.refresh_hz = args[i + 1].parse().ok();
                i += 2;
            }
            _ => i += 1,
        }
    }
    out
}

fn load_config(args: &ClientArgs) -> anyhow::Result<SceneConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            SceneConfig::from_json_str(&text)?
        }
        None => SceneConfig::default(),
    };
    if let Some(width) = args.width {
        cfg.viewport.width = width;
    }
    if let Some(height) = args.height {
        cfg.viewport.height = height;
    }
    if let Some(hz) = args.refresh_hz {
        cfg.renderer.refresh_hz = hz;
    }
    cfg.validate()?;
    Ok(cfg)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args();
    let cfg = load_config(&args)?;
    info!(
        width = cfg.grid.width,
        length = cfg.grid.length,
        refresh_hz = cfg.renderer.refresh_hz,
        "Starting wavefield"
    );

    let field = FieldGenerator::new(cfg.palette.into())
        .generate(cfg.grid.width, cfg.grid.length)
        .context("generate point field")?;
    let bounds = field.bounds();
    info!(points = field.len(), min = ?bounds.min, max = ?bounds.max, "Point field generated");

    let mut anim = AnimationLoop::new(&cfg, field, LogRenderer::new(), MonotonicClock::start());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut runner = FrameRunner::new(cfg.renderer.refresh_hz)
        .with_max_frames(args.frames)
        .with_shutdown(shutdown_rx);

    if let Some(path) = &cfg.particle_texture {
        let root = args.assets.clone().unwrap_or_else(|| PathBuf::from("."));
        runner.load_texture(Arc::new(FsSource::new(root)), path);
    }

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    // Spawn stdin reader thread.
    let console_tx = runner.sender();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            print!("> ");
            let _ = stdout.flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match console::parse(line) {
                Ok(cmd) => {
                    let quit = cmd == ConsoleCommand::Quit;
                    if console_tx.blocking_send(LoopEvent::Command(cmd)).is_err() || quit {
                        break;
                    }
                }
                Err(e) => println!("Error: {:#}", e),
            }
        }
    });

    println!("Wavefield running. Type 'status' for info, 'quit' to exit.");
    println!();

    let summary = runner.run(&mut anim).await;
    info!(frames = summary.frames, reason = ?summary.reason, "Exiting");

    Ok(())
}
