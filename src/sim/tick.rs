//! One simulation step
//!
//! Advances the shared hue, then runs bounce, repulsion, integration, color
//! refresh and aging for every particle in collection order.

use super::field::{ParticleField, UpdateStats};

/// Per-frame inputs sampled from the host
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Wall-clock time (ms) driving the brightness shimmer
    pub now_ms: f64,
}

/// Advance the field by one frame
pub fn tick(field: &mut ParticleField, input: &TickInput) -> UpdateStats {
    field.advance_hue();
    field.update_particles(input.now_ms)
}
