//! Frame loop
//!
//! `FrameLoop` is the whole background's state for one page view. The host
//! forwards input events and calls [`FrameLoop::frame`] once per animation
//! frame; tests and the native driver pull frames from a [`TickSource`].

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::RESIZE_DEBOUNCE_MS;
use crate::device::DeviceClass;
use crate::input::PointerTracker;
use crate::perf::{Degrader, FpsMonitor};
use crate::pixels::{PixelEmitter, PixelUpdate};
use crate::render::{DrawStats, Surface, draw_particles};
use crate::schedule::{Debounce, TickSource};
use crate::settings::Settings;
use crate::sim::{ParticleField, TickInput, UpdateStats, Viewport, tick};

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub update: UpdateStats,
    pub draw: DrawStats,
    /// Completed FPS sample, if this frame closed a window
    pub fps: Option<u32>,
    /// Particles dropped by degradation this frame
    pub degraded: usize,
    /// The field was rebuilt for a new viewport before this frame
    pub resized: bool,
    pub pixels: PixelUpdate,
}

/// Simulator context: field, input, timing and decorations
pub struct FrameLoop {
    settings: Settings,
    field: ParticleField,
    pointer: PointerTracker,
    fps: FpsMonitor,
    degrader: Degrader,
    resize: Debounce,
    pending_viewport: Option<Viewport>,
    pixels: Option<PixelEmitter>,
    rng: Pcg32,
    frames: u64,
}

impl FrameLoop {
    pub fn new(
        settings: Settings,
        class: DeviceClass,
        viewport: Viewport,
        seed: u64,
        start_ms: f64,
    ) -> Self {
        let profile = class.profile();
        let mut field = ParticleField::new(profile, viewport, seed);
        field.repulsion = settings.effective_repulsion();

        let pixels = settings
            .effective_pixels()
            .then(|| PixelEmitter::new(profile.pixel_interval_ms, start_ms));

        log::info!(
            "Particle field initialized: {} particles, {}x{} viewport, {} profile",
            field.len(),
            viewport.width,
            viewport.height,
            class.as_str()
        );

        Self {
            degrader: Degrader::new(profile.adaptive_degradation && settings.adaptive_degradation),
            settings,
            field,
            pointer: PointerTracker::new(class),
            fps: FpsMonitor::new(),
            resize: Debounce::new(RESIZE_DEBOUNCE_MS),
            pending_viewport: None,
            pixels,
            // Decorations draw from their own stream so they never perturb the field
            rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
            frames: 0,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> Option<u32> {
        self.fps.fps()
    }

    pub fn is_degraded(&self) -> bool {
        self.degrader.has_fired()
    }

    // === Input ===

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        self.pointer.mouse_move(x, y);
    }

    pub fn mouse_out(&mut self) {
        self.pointer.mouse_out();
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.pointer.touch_start(x, y);
    }

    pub fn touch_move(&mut self, x: f32, y: f32) {
        self.pointer.touch_move(x, y);
    }

    pub fn touch_end(&mut self, now_ms: f64) {
        self.pointer.touch_end(now_ms);
    }

    /// Record a viewport change; the field is rebuilt once resizing settles
    pub fn request_resize(&mut self, now_ms: f64, width: f32, height: f32) {
        self.pending_viewport = Some(Viewport::new(width, height));
        self.resize.trigger(now_ms);
        log::debug!("Resize to {}x{} queued", width, height);
    }

    // === Frame ===

    /// Update and draw one frame
    pub fn frame<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) -> FrameReport {
        let mut report = FrameReport::default();

        self.field.pointer = self.pointer.poll(now_ms);

        if self.resize.poll(now_ms) {
            if let Some(viewport) = self.pending_viewport.take() {
                surface.resize(viewport.width, viewport.height);
                self.field.reinitialize(viewport);
                report.resized = true;
            }
        }

        let viewport = self.field.viewport;
        surface.clear(viewport.width, viewport.height);

        report.update = tick(&mut self.field, &TickInput { now_ms });
        report.draw = draw_particles(&self.field, surface, self.settings.links);
        self.frames += 1;

        if let Some(fps) = self.fps.record_frame(now_ms) {
            report.fps = Some(fps);
            report.degraded = self.degrader.apply(fps, &mut self.field);
        }

        if let Some(pixels) = self.pixels.as_mut() {
            report.pixels = pixels.poll(now_ms, &mut self.rng);
        }

        report
    }

    /// Run frames until the source is exhausted. Returns the number of frames run.
    pub fn drive<T, S>(&mut self, source: &mut T, surface: &mut S) -> u64
    where
        T: TickSource + ?Sized,
        S: Surface + ?Sized,
    {
        let mut count = 0;
        while let Some(now_ms) = source.next_tick() {
            self.frame(now_ms, surface);
            count += 1;
        }
        count
    }
}
