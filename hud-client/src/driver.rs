//! Single cooperative loop running frame processing and render ticks at
//! independent cadences.
//!
//! Frames are never queued: each detector result is applied as soon as its
//! deadline comes up and overwrites the targets. Render ticks always smooth
//! toward whatever targets exist at that moment.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use hud_core::{GestureEngine, GestureError};
use hud_shared::ControlSignals;
use serde::Serialize;

use crate::detector::LandmarkDetector;
use crate::sink::RendererSink;

#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    /// Overlay width handed to the role classifier
    pub width: f32,
    pub frame_interval: Duration,
    pub render_interval: Duration,
    /// Stop after this much (wall or virtual) time; `None` runs until the
    /// detector is exhausted
    pub duration: Option<Duration>,
    /// Log a status line every this many render ticks, 0 disables
    pub status_every: u64,
}

impl DriverConfig {
    pub fn from_rates(frame_hz: f64, render_hz: f64) -> Self {
        Self {
            width: 1280.0,
            frame_interval: Duration::from_secs_f64(1.0 / frame_hz.max(0.1)),
            render_interval: Duration::from_secs_f64(1.0 / render_hz.max(0.1)),
            duration: None,
            status_every: 60,
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::from_rates(30.0, 60.0)
    }
}

/// Counters reported when a run ends
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub ticks: u64,
    pub rejected_hands: u64,
    pub pause_toggles: u64,
    pub signals_sent: u64,
    pub final_signals: ControlSignals,
}

pub struct Driver {
    detector: Box<dyn LandmarkDetector>,
    engine: GestureEngine,
    sink: Option<RendererSink>,
    config: DriverConfig,
    next_frame_at: Duration,
    next_tick_at: Duration,
    detector_done: bool,
    frames: u64,
    ticks: u64,
    rejected_hands: u64,
    pause_toggles: u64,
    signals_sent: u64,
}

impl Driver {
    pub fn new(
        detector: Box<dyn LandmarkDetector>,
        engine: GestureEngine,
        config: DriverConfig,
    ) -> Self {
        Self {
            detector,
            engine,
            sink: None,
            config,
            next_frame_at: Duration::ZERO,
            next_tick_at: Duration::ZERO,
            detector_done: false,
            frames: 0,
            ticks: 0,
            rejected_hands: 0,
            pause_toggles: 0,
            signals_sent: 0,
        }
    }

    pub fn with_sink(mut self, sink: RendererSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    /// Run in real time, sleeping between deadlines
    pub fn run(&mut self) -> Result<RunSummary> {
        log::info!("Starting control loop...");
        let start = Instant::now();

        loop {
            let elapsed = start.elapsed();
            if self.finished(elapsed) {
                break;
            }
            self.advance(elapsed).context("Detector failed")?;

            let wake = self.next_frame_at.min(self.next_tick_at);
            let now = start.elapsed();
            if wake > now {
                thread::sleep(wake - now);
            }
        }

        Ok(self.summary())
    }

    /// Run on a virtual clock that jumps straight to each deadline
    pub fn run_virtual(&mut self) -> Result<RunSummary> {
        let mut now = Duration::ZERO;
        while !self.finished(now) {
            self.advance(now).context("Detector failed")?;
            now = self.next_frame_at.min(self.next_tick_at);
        }
        Ok(self.summary())
    }

    fn finished(&self, elapsed: Duration) -> bool {
        if self.detector_done {
            return true;
        }
        self.config.duration.is_some_and(|limit| elapsed >= limit)
    }

    /// Execute every deadline that is due at `now`
    fn advance(&mut self, now: Duration) -> Result<(), GestureError> {
        if now >= self.next_frame_at {
            self.step_frame(now)?;
            self.next_frame_at += self.config.frame_interval;
        }
        if now >= self.next_tick_at && !self.detector_done {
            self.step_render();
            self.next_tick_at += self.config.render_interval;
        }
        Ok(())
    }

    fn step_frame(&mut self, now: Duration) -> Result<(), GestureError> {
        let Some(frame) = self.detector.next_frame()? else {
            log::info!("Detector exhausted after {} frames", self.frames);
            self.detector_done = true;
            return Ok(());
        };

        let outcome = self
            .engine
            .process_frame(&frame, self.config.width, now.as_millis() as u64);
        self.frames += 1;
        self.rejected_hands += outcome.rejected.len() as u64;
        if outcome.pause_toggled {
            self.pause_toggles += 1;
            log::info!(
                "Control {}",
                if self.engine.is_paused() { "paused" } else { "resumed" }
            );
        }
        Ok(())
    }

    fn step_render(&mut self) {
        self.engine.tick();
        self.ticks += 1;
        let signals = self.engine.signals();

        if let Some(sink) = self.sink.as_mut() {
            if sink.publish(&signals) {
                self.signals_sent += 1;
            }
        }

        if self.config.status_every > 0 && self.ticks % self.config.status_every == 0 {
            log::info!(
                "{} | {}",
                signals.mode_label(),
                signals.info_lines()[..3].join(" | ")
            );
        }
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.frames,
            ticks: self.ticks,
            rejected_hands: self.rejected_hands,
            pause_toggles: self.pause_toggles,
            signals_sent: self.signals_sent,
            final_signals: self.engine.signals(),
        }
    }
}
