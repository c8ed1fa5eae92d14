//! Pointer tracking
//!
//! Folds mouse and touch events into one optional pointer position. Event
//! handlers write, the frame loop reads; both run on the page's only thread.

use glam::Vec2;

use crate::consts::{TOUCH_GRACE_MS, TOUCH_JITTER_PX};
use crate::device::DeviceClass;

/// Most recent pointer location plus touch bookkeeping
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: Option<Vec2>,
    /// Last accepted touch location (jitter filter reference)
    last_touch: Vec2,
    /// Deadline for clearing the pointer after a touch ends
    clear_at: Option<f64>,
    /// Mouse moves are ignored on mobile-class devices
    accept_mouse: bool,
}

impl PointerTracker {
    pub fn new(class: DeviceClass) -> Self {
        Self {
            accept_mouse: !class.is_mobile(),
            ..Default::default()
        }
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        if self.accept_mouse {
            self.position = Some(Vec2::new(x, y));
        }
    }

    /// Pointer left the window
    pub fn mouse_out(&mut self) {
        self.position = None;
        self.clear_at = None;
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        let point = Vec2::new(x, y);
        self.last_touch = point;
        self.position = Some(point);
        self.clear_at = None;
    }

    /// Apply a touch move unless it is within the jitter threshold on both axes
    pub fn touch_move(&mut self, x: f32, y: f32) -> bool {
        let point = Vec2::new(x, y);
        let delta = (point - self.last_touch).abs();
        if delta.x > TOUCH_JITTER_PX || delta.y > TOUCH_JITTER_PX {
            self.position = Some(point);
            self.last_touch = point;
            true
        } else {
            false
        }
    }

    /// Finger lifted: keep repelling for a short grace period
    pub fn touch_end(&mut self, now_ms: f64) {
        self.clear_at = Some(now_ms + TOUCH_GRACE_MS);
    }

    /// Apply a due touch-end clear. Returns the position to use this frame.
    pub fn poll(&mut self, now_ms: f64) -> Option<Vec2> {
        if let Some(deadline) = self.clear_at {
            if now_ms >= deadline {
                self.position = None;
                self.clear_at = None;
            }
        }
        self.position
    }
}
