//! A single particle and its per-tick rules

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::device::DeviceProfile;
use crate::render::Hsla;

/// Viewport in CSS pixels, origin at top-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Uniformly random point inside the viewport
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random::<f32>() * self.width,
            rng.random::<f32>() * self.height,
        )
    }
}

/// A point particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Draw radius
    pub size: f32,
    /// HSL lightness (%) from the last color refresh
    pub brightness: f32,
    pub color: Hsla,
    /// Ticks since spawn or last recycle
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Spawn at a random point with randomized size, speed and lifetime
    pub fn spawn<R: Rng>(viewport: Viewport, profile: &DeviceProfile, hue: f32, rng: &mut R) -> Self {
        let pos = viewport.random_point(rng);
        let size = profile.min_size + rng.random::<f32>() * (profile.max_size - profile.min_size);
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * profile.speed_scale,
            (rng.random::<f32>() - 0.5) * profile.speed_scale,
        );
        Self {
            pos,
            vel,
            size,
            brightness: SPAWN_BRIGHTNESS,
            color: Hsla::vivid(hue, SPAWN_BRIGHTNESS),
            life: 0,
            max_life: rng.random_range(MIN_LIFE..=MAX_LIFE),
        }
    }

    /// Reverse any velocity component carrying the particle further past an edge.
    /// Returns which axes flipped.
    pub fn bounce(&mut self, viewport: Viewport) -> (bool, bool) {
        let flip_x = (self.pos.x < 0.0 && self.vel.x < 0.0)
            || (self.pos.x > viewport.width && self.vel.x > 0.0);
        let flip_y = (self.pos.y < 0.0 && self.vel.y < 0.0)
            || (self.pos.y > viewport.height && self.vel.y > 0.0);
        if flip_x {
            self.vel.x = -self.vel.x;
        }
        if flip_y {
            self.vel.y = -self.vel.y;
        }
        (flip_x, flip_y)
    }

    /// Push away from the pointer with linear falloff. Returns the applied force (0 when out of reach).
    pub fn repel(&mut self, pointer: Vec2, radius: f32, strength: f32) -> f32 {
        let offset = self.pos - pointer;
        let distance = offset.length();
        if distance >= radius {
            return 0.0;
        }

        let force = (radius - distance) / radius;
        // Coincident with the pointer: atan2(0, 0) points along +x, so the push is toward -x
        let away = if distance > 0.0 {
            offset / distance
        } else {
            Vec2::NEG_X
        };
        self.pos += away * force * strength;
        force
    }

    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Recompute brightness from wall-clock time and x, then the color from the shared hue
    pub fn refresh_color(&mut self, hue: f32, now_ms: f64) {
        let phase = now_ms * BRIGHTNESS_TIME_FREQ + self.pos.x as f64 * BRIGHTNESS_X_FREQ;
        self.brightness = BRIGHTNESS_BASE + phase.sin() as f32 * BRIGHTNESS_AMPLITUDE;
        self.color = Hsla::vivid(hue, self.brightness);
    }

    /// Advance age; past max_life the particle is moved to a fresh random spot.
    /// Returns true when recycled.
    pub fn age<R: Rng>(&mut self, viewport: Viewport, rng: &mut R) -> bool {
        self.life += 1;
        if self.life > self.max_life {
            self.pos = viewport.random_point(rng);
            self.life = 0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceClass;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn still(x: f32, y: f32) -> Particle {
        Particle {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: 2.0,
            brightness: SPAWN_BRIGHTNESS,
            color: Hsla::vivid(0.0, SPAWN_BRIGHTNESS),
            life: 0,
            max_life: 1000,
        }
    }

    const VIEW: Viewport = Viewport::new(400.0, 300.0);

    #[test]
    fn test_spawn_within_profile_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let profile = DeviceClass::Mobile.profile();
        for _ in 0..200 {
            let p = Particle::spawn(VIEW, &profile, 42.0, &mut rng);
            assert!(p.pos.x >= 0.0 && p.pos.x <= VIEW.width);
            assert!(p.pos.y >= 0.0 && p.pos.y <= VIEW.height);
            assert!(p.size >= profile.min_size && p.size <= profile.max_size);
            assert!(p.vel.x.abs() <= 0.25 && p.vel.y.abs() <= 0.25);
            assert!((MIN_LIFE..=MAX_LIFE).contains(&p.max_life));
            assert_eq!(p.life, 0);
            assert_eq!(p.color, Hsla::vivid(42.0, 70.0));
        }
    }

    #[test]
    fn test_bounce_reflects_not_clamps() {
        let mut p = still(-3.0, 10.0);
        p.vel = Vec2::new(-1.0, 0.5);
        assert_eq!(p.bounce(VIEW), (true, false));
        assert_eq!(p.vel, Vec2::new(1.0, 0.5));
        assert_eq!(p.pos, Vec2::new(-3.0, 10.0));
    }

    #[test]
    fn test_bounce_once_per_crossing() {
        // Still outside on the next tick but already heading back in
        let mut p = still(405.0, 310.0);
        p.vel = Vec2::new(1.0, 1.0);
        assert_eq!(p.bounce(VIEW), (true, true));
        assert_eq!(p.bounce(VIEW), (false, false));
        assert_eq!(p.vel, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_repel_desktop_scenario() {
        let profile = DeviceClass::Desktop.profile();
        let mut p = still(140.0, 100.0);
        let pointer = Vec2::new(100.0, 100.0);
        let force = p.repel(pointer, profile.interaction_radius, profile.repulsion_strength);
        assert!((force - 80.0 / 120.0).abs() < 1e-5);
        let moved = p.pos - Vec2::new(140.0, 100.0);
        assert!((moved.length() - force * 4.0).abs() < 1e-4);
        assert!(moved.x > 0.0 && moved.y.abs() < 1e-6);
    }

    #[test]
    fn test_repel_out_of_reach() {
        let mut p = still(300.0, 100.0);
        assert_eq!(p.repel(Vec2::new(100.0, 100.0), 120.0, 4.0), 0.0);
        assert_eq!(p.pos, Vec2::new(300.0, 100.0));
    }

    #[test]
    fn test_repel_coincident_pushes_negative_x() {
        let mut p = still(50.0, 50.0);
        let force = p.repel(Vec2::new(50.0, 50.0), 80.0, 2.0);
        assert_eq!(force, 1.0);
        assert_eq!(p.pos, Vec2::new(48.0, 50.0));
    }

    #[test]
    fn test_refresh_color_curve() {
        let mut p = still(0.0, 0.0);
        p.refresh_color(200.0, 0.0);
        assert!((p.brightness - 50.0).abs() < 1e-5);
        assert_eq!(p.color.hue, 200.0);

        // sin(pi/2) peak
        let mut p = still(0.0, 0.0);
        p.refresh_color(10.0, std::f64::consts::FRAC_PI_2 * 1000.0);
        assert!((p.brightness - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_age_recycles_after_max_life() {
        let mut rng = Pcg32::seed_from_u64(3);
        // Start off-screen so a redrawn position is distinguishable
        let mut p = still(-50.0, -50.0);
        p.vel = Vec2::new(0.3, -0.2);
        p.max_life = 5;
        for expected in 1..=5 {
            assert!(!p.age(VIEW, &mut rng));
            assert_eq!(p.life, expected);
            assert_eq!(p.pos, Vec2::new(-50.0, -50.0));
        }
        assert!(p.age(VIEW, &mut rng));
        assert_eq!(p.life, 0);
        assert_eq!(p.vel, Vec2::new(0.3, -0.2));
        assert_ne!(p.pos, Vec2::new(-50.0, -50.0));
        assert!((0.0..=VIEW.width).contains(&p.pos.x));
        assert!((0.0..=VIEW.height).contains(&p.pos.y));
    }

    proptest! {
        #[test]
        fn prop_repel_never_pulls_closer(
            px in -50.0f32..450.0, py in -50.0f32..350.0,
            qx in 0.0f32..400.0, qy in 0.0f32..300.0,
            mobile in any::<bool>(),
        ) {
            let class = if mobile { DeviceClass::Mobile } else { DeviceClass::Desktop };
            let profile = class.profile();
            let pointer = Vec2::new(qx, qy);
            let mut p = still(px, py);
            let before = p.pos.distance(pointer);
            let force = p.repel(pointer, profile.interaction_radius, profile.repulsion_strength);
            if force > 0.0 {
                prop_assert!(p.pos.distance(pointer) >= before);
            }
        }

        #[test]
        fn prop_bounce_flips_at_most_once(
            x in -20.0f32..420.0, y in -20.0f32..320.0,
            vx in -1.0f32..1.0, vy in -1.0f32..1.0,
        ) {
            let mut p = still(x, y);
            p.vel = Vec2::new(vx, vy);
            let (fx, fy) = p.bounce(VIEW);
            prop_assert_eq!(fx, (x < 0.0 && vx < 0.0) || (x > 400.0 && vx > 0.0));
            prop_assert_eq!(fy, (y < 0.0 && vy < 0.0) || (y > 300.0 && vy > 0.0));
            // A second pass in the same tick never flips back
            prop_assert_eq!(p.bounce(VIEW), (false, false));
        }

        #[test]
        fn prop_age_bounded_by_max_life(max_life in 1u32..50, ticks in 0usize..200, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut p = still(-50.0, -50.0);
            p.max_life = max_life;
            for _ in 0..ticks {
                let before = p.life;
                let old_pos = p.pos;
                let recycled = p.age(VIEW, &mut rng);
                if recycled {
                    prop_assert_eq!(before, max_life);
                    prop_assert_eq!(p.life, 0);
                    prop_assert!((0.0..=VIEW.width).contains(&p.pos.x));
                    prop_assert!((0.0..=VIEW.height).contains(&p.pos.y));
                } else {
                    prop_assert_eq!(p.life, before + 1);
                    prop_assert_eq!(p.pos, old_pos);
                }
                prop_assert!(p.life <= max_life);
            }
        }
    }
}
