//! Deterministic particle simulation
//!
//! Everything here is pure:
//! - Seeded RNG only
//! - Time arrives through `TickInput`
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod field;
pub mod particle;
pub mod tick;

pub use field::{ParticleField, UpdateStats};
pub use particle::{Particle, Viewport};
pub use tick::{TickInput, tick};
