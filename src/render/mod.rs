//! Rendering
//!
//! The simulation draws through the [`Surface`] trait so it can run against a
//! browser canvas or a recorder in tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod color;
pub mod links;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use color::Hsla;
pub use links::{Link, find_links, link_opacity};

use glam::Vec2;

use crate::consts::{LINK_ALPHA, LINK_LIGHTNESS, LINK_WIDTH};
use crate::sim::ParticleField;

/// A 2D drawing target
pub trait Surface {
    /// Clear the region `(0, 0) .. (width, height)`
    fn clear(&mut self, width: f32, height: f32);
    /// Filled circle with an optional glow (shadow blur radius, 0 for none)
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla, glow: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Hsla, width: f32);
    /// Viewport changed; backends with their own backing store resize it here
    fn resize(&mut self, _width: f32, _height: f32) {}
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Hsla,
        glow: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Hsla,
        width: f32,
    },
}

/// Surface that stores calls instead of rasterizing them
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla, glow: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            glow,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Hsla, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }
}

/// Draw counts for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub circles: usize,
    pub links: usize,
}

/// Draw every particle, then the proximity links (when enabled)
pub fn draw_particles<S: Surface + ?Sized>(
    field: &ParticleField,
    surface: &mut S,
    show_links: bool,
) -> DrawStats {
    let glow = field.profile.glow_radius;
    for particle in field.particles() {
        surface.fill_circle(particle.pos, particle.size, particle.color, glow);
    }

    let mut links = 0;
    if show_links {
        let base = Hsla::vivid(field.hue, LINK_LIGHTNESS);
        for link in find_links(field.particles(), field.profile.connection_distance) {
            surface.stroke_line(
                link.from,
                link.to,
                base.with_alpha(link.opacity * LINK_ALPHA),
                LINK_WIDTH,
            );
            links += 1;
        }
    }

    DrawStats {
        circles: field.len(),
        links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceClass;
    use crate::sim::Viewport;

    #[test]
    fn test_draw_circles_with_profile_glow() {
        let field = ParticleField::new(
            DeviceClass::Mobile.profile(),
            Viewport::new(400.0, 800.0),
            4,
        );
        let mut surface = RecordingSurface::new();
        let stats = draw_particles(&field, &mut surface, false);
        assert_eq!(stats.circles, 16);
        assert_eq!(surface.circles().count(), 16);
        assert_eq!(surface.lines().count(), 0);
        assert!(surface
            .circles()
            .all(|c| matches!(c, DrawCommand::Circle { glow, .. } if *glow == 5.0)));
    }

    #[test]
    fn test_link_color_uses_shared_hue() {
        let mut field = ParticleField::new(
            DeviceClass::Desktop.profile(),
            Viewport::new(1200.0, 800.0),
            8,
        );
        field.hue = 210.0;
        let mut surface = RecordingSurface::new();
        let stats = draw_particles(&field, &mut surface, true);
        assert_eq!(stats.links, surface.lines().count());
        for line in surface.lines() {
            if let DrawCommand::Line { color, width, .. } = line {
                assert_eq!(color.hue, 210.0);
                assert_eq!(color.lightness, 70.0);
                assert!(color.alpha >= 0.0 && color.alpha <= LINK_ALPHA);
                assert_eq!(*width, 0.5);
            }
        }
    }

    #[test]
    fn test_empty_field_draws_nothing() {
        let field = ParticleField::new(DeviceClass::Desktop.profile(), Viewport::default(), 1);
        let mut surface = RecordingSurface::new();
        assert_eq!(draw_particles(&field, &mut surface, true), DrawStats::default());
        assert!(surface.commands.is_empty());
    }
}
