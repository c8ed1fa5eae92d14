//! Floating pixel sprites
//!
//! Small colored squares released at the bottom of the page at a fixed
//! interval. The host turns spawns into DOM nodes (CSS animates them) and
//! removes them again when they expire.

use std::collections::VecDeque;

use rand::Rng;

use crate::schedule::Interval;

/// Sprite palette
pub const PIXEL_COLORS: [&str; 5] = ["#ff006e", "#ffbe0b", "#fb5607", "#8338ec", "#3a86ff"];
/// Time a sprite stays in the document (ms)
pub const PIXEL_LIFETIME_MS: f64 = 15_000.0;
/// Float animation duration range (s)
pub const MIN_FLOAT_SECS: f32 = 8.0;
pub const MAX_FLOAT_SECS: f32 = 18.0;

/// One spawned sprite
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSprite {
    pub id: u32,
    /// Horizontal offset, percent of page width
    pub left_percent: f32,
    pub duration_secs: f32,
    pub color: &'static str,
    pub expires_at: f64,
}

/// Changes for the host to apply this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixelUpdate {
    pub spawned: Option<PixelSprite>,
    pub expired: Vec<u32>,
}

impl PixelUpdate {
    pub fn is_empty(&self) -> bool {
        self.spawned.is_none() && self.expired.is_empty()
    }
}

/// Spawns sprites on an interval and tracks their expiry
#[derive(Debug, Clone)]
pub struct PixelEmitter {
    interval: Interval,
    live: VecDeque<PixelSprite>,
    next_id: u32,
}

impl PixelEmitter {
    pub fn new(interval_ms: f64, start_ms: f64) -> Self {
        Self {
            interval: Interval::new(interval_ms, start_ms),
            live: VecDeque::new(),
            next_id: 1,
        }
    }

    pub fn live(&self) -> impl Iterator<Item = &PixelSprite> {
        self.live.iter()
    }

    pub fn poll<R: Rng>(&mut self, now_ms: f64, rng: &mut R) -> PixelUpdate {
        let mut update = PixelUpdate::default();

        // Sprites share one lifetime, so the queue stays ordered by expiry
        while let Some(front) = self.live.front() {
            if front.expires_at > now_ms {
                break;
            }
            if let Some(sprite) = self.live.pop_front() {
                update.expired.push(sprite.id);
            }
        }

        if self.interval.poll(now_ms) {
            let sprite = self.spawn(now_ms, rng);
            log::debug!("Pixel {} at {:.1}%", sprite.id, sprite.left_percent);
            self.live.push_back(sprite.clone());
            update.spawned = Some(sprite);
        }

        update
    }

    fn spawn<R: Rng>(&mut self, now_ms: f64, rng: &mut R) -> PixelSprite {
        let id = self.next_id;
        self.next_id += 1;
        PixelSprite {
            id,
            left_percent: rng.random::<f32>() * 100.0,
            duration_secs: MIN_FLOAT_SECS + rng.random::<f32>() * (MAX_FLOAT_SECS - MIN_FLOAT_SECS),
            color: PIXEL_COLORS[rng.random_range(0..PIXEL_COLORS.len())],
            expires_at: now_ms + PIXEL_LIFETIME_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_on_interval() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pixels = PixelEmitter::new(2500.0, 0.0);
        assert!(pixels.poll(1000.0, &mut rng).is_empty());
        let update = pixels.poll(2500.0, &mut rng);
        let sprite = update.spawned.expect("sprite due");
        assert_eq!(sprite.id, 1);
        assert!((0.0..100.0).contains(&sprite.left_percent));
        assert!((MIN_FLOAT_SECS..MAX_FLOAT_SECS).contains(&sprite.duration_secs));
        assert!(PIXEL_COLORS.contains(&sprite.color));
        assert_eq!(sprite.expires_at, 17_500.0);
    }

    #[test]
    fn test_sprites_expire_in_order() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut pixels = PixelEmitter::new(4000.0, 0.0);
        for t in [4000.0, 8000.0, 12_000.0, 16_000.0] {
            assert!(pixels.poll(t, &mut rng).spawned.is_some());
        }
        assert_eq!(pixels.live().count(), 4);

        let update = pixels.poll(19_000.0, &mut rng);
        assert_eq!(update.expired, vec![1]);
        let update = pixels.poll(27_000.0, &mut rng);
        assert_eq!(update.expired, vec![2, 3]);
        assert_eq!(update.spawned.map(|s| s.id), Some(5));
    }
}
