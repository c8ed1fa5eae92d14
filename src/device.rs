//! Device classification
//!
//! Every mobile/desktop difference lives in one [`DeviceProfile`] record,
//! selected once when the page starts.

use serde::{Deserialize, Serialize};

use crate::consts::MOBILE_MAX_WIDTH;

/// User-agent fragments that mark a mobile browser (matched case-insensitively)
const MOBILE_AGENTS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Binary device classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeviceClass {
    Mobile,
    #[default]
    Desktop,
}

impl DeviceClass {
    /// Classify from the browser user agent and the viewport width
    pub fn detect(user_agent: &str, viewport_width: f32) -> Self {
        let agent = user_agent.to_lowercase();
        if MOBILE_AGENTS.iter().any(|needle| agent.contains(needle))
            || viewport_width < MOBILE_MAX_WIDTH
        {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Mobile => "Mobile",
            DeviceClass::Desktop => "Desktop",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mobile" | "phone" => Some(DeviceClass::Mobile),
            "desktop" | "pc" => Some(DeviceClass::Desktop),
            _ => None,
        }
    }

    pub fn is_mobile(&self) -> bool {
        *self == DeviceClass::Mobile
    }

    /// Constant record for this class
    pub fn profile(&self) -> DeviceProfile {
        match self {
            DeviceClass::Mobile => DeviceProfile {
                class: *self,
                cap: 30,
                density_divisor: 20_000.0,
                interaction_radius: 80.0,
                repulsion_strength: 2.0,
                connection_distance: 80.0,
                glow_radius: 5.0,
                min_size: 0.5,
                max_size: 2.5,
                speed_scale: 0.5,
                color_refresh_chance: 0.3,
                pixel_interval_ms: 4000.0,
                adaptive_degradation: true,
            },
            DeviceClass::Desktop => DeviceProfile {
                class: *self,
                cap: 80,
                density_divisor: 12_000.0,
                interaction_radius: 120.0,
                repulsion_strength: 4.0,
                connection_distance: 120.0,
                glow_radius: 10.0,
                min_size: 1.0,
                max_size: 4.0,
                speed_scale: 1.0,
                color_refresh_chance: 1.0,
                pixel_interval_ms: 2500.0,
                adaptive_degradation: false,
            },
        }
    }
}

/// Capacity and visual-quality constants for one device class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    pub class: DeviceClass,
    /// Hard upper bound on particle count
    pub cap: usize,
    /// Square pixels of viewport per particle
    pub density_divisor: f32,
    /// Pointer repulsion reach (px)
    pub interaction_radius: f32,
    /// Displacement at zero distance (px per tick)
    pub repulsion_strength: f32,
    /// Max distance for a link line (px)
    pub connection_distance: f32,
    /// Shadow blur around each particle
    pub glow_radius: f32,
    /// Particle radius range
    pub min_size: f32,
    pub max_size: f32,
    /// Velocity components are drawn from [-0.5, 0.5) * speed_scale
    pub speed_scale: f32,
    /// Chance per tick that a particle recomputes its brightness
    pub color_refresh_chance: f64,
    /// Time between pixel sprites (ms)
    pub pixel_interval_ms: f64,
    /// Whether low FPS truncates the field
    pub adaptive_degradation: bool,
}

impl DeviceProfile {
    /// Target particle count for a viewport: min(cap, floor(area / divisor))
    pub fn particle_count(&self, width: f32, height: f32) -> usize {
        let area = (width.max(0.0) as f64) * (height.max(0.0) as f64);
        let by_density = (area / self.density_divisor as f64).floor() as usize;
        by_density.min(self.cap)
    }
}
