//! The particle field: owned collection plus the state every particle reads

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particle::{Particle, Viewport};
use crate::consts::{HUE_STEP, HUE_WRAP};
use crate::device::DeviceProfile;

/// Simulation state for one page view
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub profile: DeviceProfile,
    pub viewport: Viewport,
    /// Shared hue (degrees) for this frame
    pub hue: f32,
    /// Current pointer position, `None` while idle
    pub pointer: Option<Vec2>,
    /// Pointer repulsion toggle (off under reduced motion)
    pub repulsion: bool,
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl ParticleField {
    /// Create and populate a field for the given viewport
    pub fn new(profile: DeviceProfile, viewport: Viewport, seed: u64) -> Self {
        let mut field = Self {
            profile,
            viewport,
            hue: 0.0,
            pointer: None,
            repulsion: true,
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        field.populate();
        field
    }

    /// Discard every particle and rebuild for a new viewport
    pub fn reinitialize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.populate();
        log::info!(
            "Particle field rebuilt: {} particles for {}x{} ({})",
            self.particles.len(),
            viewport.width,
            viewport.height,
            self.profile.class.as_str()
        );
    }

    fn populate(&mut self) {
        let count = self
            .profile
            .particle_count(self.viewport.width, self.viewport.height);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::spawn(self.viewport, &self.profile, self.hue, &mut self.rng);
            self.particles.push(particle);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drop particles beyond `count`. Returns how many were removed.
    pub fn truncate(&mut self, count: usize) -> usize {
        let removed = self.particles.len().saturating_sub(count);
        self.particles.truncate(count);
        removed
    }

    /// Advance the shared hue by one frame step
    pub fn advance_hue(&mut self) {
        self.hue += HUE_STEP;
        if self.hue > HUE_WRAP {
            self.hue = 0.0;
        }
    }

    /// Run the per-particle rules once for every particle
    pub(super) fn update_particles(&mut self, now_ms: f64) -> UpdateStats {
        let mut stats = UpdateStats::default();
        let pointer = if self.repulsion { self.pointer } else { None };
        let profile = self.profile;

        for particle in &mut self.particles {
            let (fx, fy) = particle.bounce(self.viewport);
            stats.bounces += fx as u32 + fy as u32;

            if let Some(pointer) = pointer {
                let force = particle.repel(
                    pointer,
                    profile.interaction_radius,
                    profile.repulsion_strength,
                );
                if force > 0.0 {
                    stats.repelled += 1;
                }
            }

            particle.integrate();

            if self.rng.random_bool(profile.color_refresh_chance) {
                particle.refresh_color(self.hue, now_ms);
            }

            if particle.age(self.viewport, &mut self.rng) {
                stats.recycled += 1;
            }
        }

        stats
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }
}

/// Counters from one update pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    pub bounces: u32,
    pub repelled: u32,
    pub recycled: u32,
}
