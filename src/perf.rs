//! Frame-rate sampling and adaptive degradation

use crate::consts::{DEGRADED_PARTICLES, FPS_WINDOW_MS, MIN_ACCEPTABLE_FPS};
use crate::sim::ParticleField;

/// Counts frames over fixed one-second windows
#[derive(Debug, Clone, Default)]
pub struct FpsMonitor {
    window_start: Option<f64>,
    frames: u32,
    last_fps: Option<u32>,
}

impl FpsMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a rendered frame. Returns the frame count once a full window has elapsed.
    pub fn record_frame(&mut self, now_ms: f64) -> Option<u32> {
        let start = *self.window_start.get_or_insert(now_ms);
        self.frames += 1;
        if now_ms - start >= FPS_WINDOW_MS {
            let fps = self.frames;
            self.frames = 0;
            self.window_start = Some(now_ms);
            self.last_fps = Some(fps);
            return Some(fps);
        }
        None
    }

    /// Most recent completed sample
    pub fn fps(&self) -> Option<u32> {
        self.last_fps
    }
}

/// One-way capacity reduction when the device cannot keep up
#[derive(Debug, Clone)]
pub struct Degrader {
    enabled: bool,
    fired: bool,
}

impl Degrader {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            fired: false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Apply a sample. Returns the number of particles dropped.
    pub fn apply(&mut self, fps: u32, field: &mut ParticleField) -> usize {
        if !self.enabled || fps >= MIN_ACCEPTABLE_FPS || field.len() <= DEGRADED_PARTICLES {
            return 0;
        }
        let removed = field.truncate(DEGRADED_PARTICLES);
        self.fired = true;
        log::warn!(
            "Low frame rate ({} fps): particle field reduced to {} (-{})",
            fps,
            DEGRADED_PARTICLES,
            removed
        );
        removed
    }
}
