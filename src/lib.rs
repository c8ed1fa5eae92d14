//! Particle Field - a pointer-reactive particle background
//!
//! Core modules:
//! - `device`: Mobile/desktop classification and the per-class constant record
//! - `sim`: Deterministic particle simulation (update, bounce, repulsion, recycling)
//! - `render`: Surface abstraction, colors, proximity links
//! - `input`: Mouse/touch events folded into an optional pointer position
//! - `perf`: Frame-rate sampling and one-way capacity degradation
//! - `schedule`: Tick sources, debounce and repeating intervals
//! - `pixels`: Floating decorative pixel sprites
//! - `engine`: The frame loop context tying everything together
//! - `settings`: Persisted preferences

pub mod device;
pub mod engine;
pub mod error;
pub mod input;
pub mod perf;
pub mod pixels;
pub mod render;
pub mod schedule;
pub mod settings;
pub mod sim;

pub use device::{DeviceClass, DeviceProfile};
pub use engine::{FrameLoop, FrameReport};
pub use error::HostError;
pub use settings::Settings;

/// Simulation and presentation constants shared by both device classes
pub mod consts {
    /// Hue advance per frame (degrees)
    pub const HUE_STEP: f32 = 0.3;
    /// Hue resets to 0 once it passes this value
    pub const HUE_WRAP: f32 = 360.0;

    /// Particle lifetime range in ticks (inclusive)
    pub const MIN_LIFE: u32 = 1000;
    pub const MAX_LIFE: u32 = 3000;

    /// Brightness (HSL lightness %) of a freshly spawned particle
    pub const SPAWN_BRIGHTNESS: f32 = 70.0;
    /// Brightness oscillation: base + sin(t * TIME_FREQ + x * X_FREQ) * AMPLITUDE
    pub const BRIGHTNESS_BASE: f32 = 50.0;
    pub const BRIGHTNESS_AMPLITUDE: f32 = 20.0;
    pub const BRIGHTNESS_TIME_FREQ: f64 = 0.001;
    pub const BRIGHTNESS_X_FREQ: f64 = 0.01;

    /// Link stroke
    pub const LINK_WIDTH: f32 = 0.5;
    pub const LINK_LIGHTNESS: f32 = 70.0;
    /// Peak alpha of a link between two coincident particles
    pub const LINK_ALPHA: f32 = 0.2;

    /// FPS sample window (ms)
    pub const FPS_WINDOW_MS: f64 = 1000.0;
    /// Degrade when a sample falls below this
    pub const MIN_ACCEPTABLE_FPS: u32 = 30;
    /// Particle count after degradation
    pub const DEGRADED_PARTICLES: usize = 20;

    /// Resize settle time before rebuilding the field (ms)
    pub const RESIZE_DEBOUNCE_MS: f64 = 250.0;
    /// Delay before a lifted finger stops repelling (ms)
    pub const TOUCH_GRACE_MS: f64 = 100.0;
    /// Touch moves at or below this many pixels per axis are ignored
    pub const TOUCH_JITTER_PX: f32 = 2.0;

    /// Viewport width below which any device counts as mobile
    pub const MOBILE_MAX_WIDTH: f32 = 768.0;
}
