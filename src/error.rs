//! Error types for the browser host.
//!
//! The simulation itself cannot fail; only wiring it to the page can.

use std::fmt;

/// Errors that can occur while attaching the field to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// Window has no document.
    NoDocument,
    /// A required element id was not found.
    MissingElement(String),
    /// The element exists but is not a `<canvas>`.
    NotACanvas(String),
    /// The canvas did not hand out a 2D context.
    NoContext2d,
    /// A JavaScript call threw.
    Js(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::NoWindow => write!(f, "No window object available"),
            HostError::NoDocument => write!(f, "Window has no document"),
            HostError::MissingElement(id) => write!(f, "Element #{} not found", id),
            HostError::NotACanvas(id) => write!(f, "Element #{} is not a canvas", id),
            HostError::NoContext2d => write!(f, "Canvas 2D context unavailable"),
            HostError::Js(msg) => write!(f, "JavaScript error: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for HostError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        HostError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
