//! Background preferences
//!
//! Read from LocalStorage so a visitor's stored choices apply on every load.

use serde::{Deserialize, Serialize};

use crate::device::DeviceClass;

/// Field settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Force a device class instead of detecting it
    pub device_override: Option<DeviceClass>,

    // === Visual Effects ===
    /// Proximity lines between particles
    pub links: bool,
    /// Floating pixel sprites
    pub pixels: bool,

    // === Performance ===
    /// Allow low FPS to shrink the field (only where the device profile permits)
    pub adaptive_degradation: bool,

    // === Accessibility ===
    /// Reduced motion (no pointer repulsion, no floating pixels)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device_override: None,
            links: true,
            pixels: true,
            adaptive_degradation: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Device class to run with: the override if set, detection otherwise
    pub fn resolve_class(&self, user_agent: &str, viewport_width: f32) -> DeviceClass {
        self.device_override
            .unwrap_or_else(|| DeviceClass::detect(user_agent, viewport_width))
    }

    /// Effective pixel sprites (respects reduced_motion)
    pub fn effective_pixels(&self) -> bool {
        self.pixels && !self.reduced_motion
    }

    /// Effective pointer repulsion (respects reduced_motion)
    pub fn effective_repulsion(&self) -> bool {
        !self.reduced_motion
    }

    /// Parse settings JSON, falling back to defaults when malformed
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "particle_field_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let settings = Settings {
            device_override: Some(DeviceClass::Mobile),
            ..Default::default()
        };
        assert_eq!(settings.resolve_class("X11; Linux", 1920.0), DeviceClass::Mobile);
        assert_eq!(
            Settings::default().resolve_class("X11; Linux", 1920.0),
            DeviceClass::Desktop
        );
    }

    #[test]
    fn test_reduced_motion() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_pixels());
        assert!(!settings.effective_repulsion());
        assert!(settings.links);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"links": false, "device_override": "Mobile"}"#);
        assert!(!settings.links);
        assert!(settings.pixels);
        assert_eq!(settings.device_override, Some(DeviceClass::Mobile));
    }

    #[test]
    fn test_malformed_json_defaults() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            reduced_motion: true,
            pixels: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }
}
