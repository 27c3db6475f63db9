//! Frame scheduler.
//!
//! Drives an [`AnimationLoop`] at the display refresh rate on the current
//! task. Ticks never overlap: queued events are drained, one tick runs, and
//! only then does the runner sleep until the next deadline. Input and asset
//! results arrive through one channel and are applied strictly between
//! ticks, so several resizes queued in one frame collapse to the last.

use std::{sync::Arc, time::Duration};

use bytes::Bytes;
use tokio::{
    sync::{mpsc, watch},
    time::{sleep_until, Instant},
};
use tracing::{debug, info, warn};
use wavefield_shared::{
    animation::AnimationLoop,
    assets::{AssetSource, TextureHandle, TextureRegistry, TextureState},
    render::RenderBackend,
    time::Clock,
};

use crate::console::{status_lines, ConsoleCommand};

/// Everything that can reach the loop between ticks.
#[derive(Debug)]
pub enum LoopEvent {
    Command(ConsoleCommand),
    TextureLoaded {
        handle: TextureHandle,
        result: anyhow::Result<Bytes>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    FrameLimit,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub reason: StopReason,
}

pub struct FrameRunner {
    interval: Duration,
    max_frames: Option<u64>,
    events_tx: mpsc::Sender<LoopEvent>,
    events_rx: mpsc::Receiver<LoopEvent>,
    shutdown: Option<watch::Receiver<bool>>,
    textures: TextureRegistry,
}

impl FrameRunner {
    /// Creates a runner ticking `refresh_hz` times per second.
    pub fn new(refresh_hz: u32) -> Self {
        let (events_tx, events_rx) = mpsc::channel(64);
        Self {
            interval: Duration::from_secs_f64(1.0 / refresh_hz.max(1) as f64),
            max_frames: None,
            events_tx,
            events_rx,
            shutdown: None,
            textures: TextureRegistry::new(),
        }
    }

    /// Stops after `frames` ticks in total.
    pub fn with_max_frames(mut self, frames: Option<u64>) -> Self {
        self.max_frames = frames;
        self
    }

    /// Stops when `true` is sent on the watch channel.
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sender for console commands and other producers.
    pub fn sender(&self) -> mpsc::Sender<LoopEvent> {
        self.events_tx.clone()
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    /// Starts fetching `path` in the background and returns its handle at once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn load_texture(&mut self, source: Arc<dyn AssetSource>, path: &str) -> TextureHandle {
        let handle = self.textures.request(path);
        let tx = self.events_tx.clone();
        let path = path.to_string();
        tokio::spawn(async move {
            let result = source.fetch(&path).await;
            if tx
                .send(LoopEvent::TextureLoaded { handle, result })
                .await
                .is_err()
            {
                debug!(path = %path, "Loop gone before texture finished loading");
            }
        });
        handle
    }

    /// Runs ticks until quit, the frame limit, or shutdown.
    pub async fn run<R: RenderBackend, C: Clock>(
        &mut self,
        anim: &mut AnimationLoop<R, C>,
    ) -> RunSummary {
        info!(
            interval_ms = self.interval.as_secs_f64() * 1000.0,
            max_frames = ?self.max_frames,
            "Frame loop started"
        );

        let mut next_tick = Instant::now();
        loop {
            while let Ok(event) = self.events_rx.try_recv() {
                if let Some(reason) = self.handle_event(anim, event) {
                    return Self::stop(anim, reason);
                }
            }

            if self.limit_reached(anim) {
                return Self::stop(anim, StopReason::FrameLimit);
            }
            anim.tick();
            if self.limit_reached(anim) {
                return Self::stop(anim, StopReason::FrameLimit);
            }

            next_tick += self.interval;
            let now = Instant::now();
            if next_tick < now {
                // Fell behind; skip the missed refreshes instead of bursting.
                next_tick = now;
            }

            tokio::select! {
                _ = sleep_until(next_tick) => {}
                _ = wait_for_shutdown(&mut self.shutdown) => {
                    return Self::stop(anim, StopReason::Shutdown);
                }
            }
        }
    }

    fn limit_reached<R: RenderBackend, C: Clock>(&self, anim: &AnimationLoop<R, C>) -> bool {
        self.max_frames
            .is_some_and(|max| anim.frame_count() >= max)
    }

    fn handle_event<R: RenderBackend, C: Clock>(
        &mut self,
        anim: &mut AnimationLoop<R, C>,
        event: LoopEvent,
    ) -> Option<StopReason> {
        match event {
            LoopEvent::Command(ConsoleCommand::Input(input)) => anim.apply(input),
            LoopEvent::Command(ConsoleCommand::Status) => {
                for line in status_lines(anim) {
                    println!("{}", line);
                }
            }
            LoopEvent::Command(ConsoleCommand::Quit) => return Some(StopReason::Quit),
            LoopEvent::TextureLoaded { handle, result } => {
                let ready = self.textures.resolve(handle, result).cloned();
                match ready {
                    Some(texture) => anim.attach_texture(handle, &texture),
                    None => {
                        if let Some(TextureState::Failed(reason)) = self.textures.state(handle) {
                            warn!(
                                path = self.textures.path(handle).unwrap_or("?"),
                                %reason,
                                "Texture failed to load; drawing without alpha map"
                            );
                        }
                    }
                }
            }
        }
        None
    }

    fn stop<R: RenderBackend, C: Clock>(anim: &AnimationLoop<R, C>, reason: StopReason) -> RunSummary {
        info!(frames = anim.frame_count(), ?reason, "Frame loop stopped");
        RunSummary {
            frames: anim.frame_count(),
            reason,
        }
    }
}

/// Resolves once `true` is observed; never resolves without a live channel.
async fn wait_for_shutdown(shutdown: &mut Option<watch::Receiver<bool>>) {
    if let Some(rx) = shutdown {
        if *rx.borrow() {
            return;
        }
        while rx.changed().await.is_ok() {
            if *rx.borrow() {
                return;
            }
        }
    }
    std::future::pending::<()>().await
}
