//! Proximity links between particles

use glam::Vec2;

use crate::sim::Particle;

/// A line between two particles with its opacity factor in (0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
}

/// Linear falloff: `1 - distance / threshold`, or `None` at or beyond the threshold
#[inline]
pub fn link_opacity(distance: f32, threshold: f32) -> Option<f32> {
    if distance < threshold {
        Some(1.0 - distance / threshold)
    } else {
        None
    }
}

/// Every unordered pair closer than `threshold`.
///
/// Plain all-pairs scan; particle counts are capped well below the point where
/// a spatial grid would pay off.
pub fn find_links(particles: &[Particle], threshold: f32) -> Vec<Link> {
    let mut links = Vec::new();
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            if let Some(opacity) = link_opacity(a.pos.distance(b.pos), threshold) {
                links.push(Link {
                    from: a.pos,
                    to: b.pos,
                    opacity,
                });
            }
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Hsla;
    use proptest::prelude::*;

    fn at(x: f32, y: f32) -> Particle {
        Particle {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: 1.0,
            brightness: 70.0,
            color: Hsla::vivid(0.0, 70.0),
            life: 0,
            max_life: 1000,
        }
    }

    #[test]
    fn test_mobile_threshold_scenario() {
        assert_eq!(link_opacity(50.0, 80.0), Some(0.375));
        assert_eq!(link_opacity(90.0, 80.0), None);
        assert_eq!(link_opacity(80.0, 80.0), None);
    }

    #[test]
    fn test_find_links_unordered_pairs() {
        let particles = [at(0.0, 0.0), at(30.0, 40.0), at(500.0, 500.0)];
        let links = find_links(&particles, 80.0);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].from, Vec2::new(0.0, 0.0));
        assert_eq!(links[0].to, Vec2::new(30.0, 40.0));
        assert!((links[0].opacity - 0.375).abs() < 1e-6);
    }

    #[test]
    fn test_find_links_skips_self_pairs() {
        let particles = [at(10.0, 10.0)];
        assert!(find_links(&particles, 120.0).is_empty());
    }

    #[test]
    fn test_find_links_all_pairs_when_clustered() {
        let particles: Vec<_> = (0..5).map(|i| at(i as f32, 0.0)).collect();
        assert_eq!(find_links(&particles, 120.0).len(), 10);
    }

    proptest! {
        #[test]
        fn prop_opacity_strictly_decreasing(a in 0.0f32..120.0, b in 0.0f32..120.0) {
            prop_assume!(b - a > 1e-3);
            let oa = link_opacity(a, 120.0).unwrap();
            match link_opacity(b, 120.0) {
                Some(ob) => prop_assert!(oa > ob),
                None => prop_assert!(oa > 0.0),
            }
        }

        #[test]
        fn prop_no_link_beyond_threshold(d in 0.0f32..1000.0, t in 1.0f32..200.0) {
            match link_opacity(d, t) {
                Some(o) => {
                    prop_assert!(d < t);
                    prop_assert!((0.0..=1.0).contains(&o));
                }
                None => prop_assert!(d >= t),
            }
        }
    }
}
