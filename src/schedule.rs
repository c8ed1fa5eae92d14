//! Scheduling primitives
//!
//! The browser pushes frames through `requestAnimationFrame` and timers; these
//! types model the same timing as plain values so the loop can be driven
//! synchronously.

/// A pull-based source of frame timestamps (ms)
pub trait TickSource {
    /// Timestamp of the next frame, `None` when the source is exhausted
    fn next_tick(&mut self) -> Option<f64>;
}

/// Fixed-rate ticker yielding `start + i * step_ms` for `count` frames
#[derive(Debug, Clone)]
pub struct FixedTicker {
    start: f64,
    step_ms: f64,
    count: u64,
    emitted: u64,
}

impl FixedTicker {
    pub fn new(start: f64, step_ms: f64, count: u64) -> Self {
        Self {
            start,
            step_ms,
            count,
            emitted: 0,
        }
    }

    /// `frames` ticks at the given rate starting from zero
    pub fn at_fps(fps: f64, frames: u64) -> Self {
        Self::new(0.0, 1000.0 / fps, frames)
    }
}

impl TickSource for FixedTicker {
    fn next_tick(&mut self) -> Option<f64> {
        if self.emitted >= self.count {
            return None;
        }
        let t = self.start + self.emitted as f64 * self.step_ms;
        self.emitted += 1;
        Some(t)
    }
}

/// Trailing-edge debounce: fires once, `delay_ms` after the last trigger
#[derive(Debug, Clone)]
pub struct Debounce {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Restart the countdown
    pub fn trigger(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once when the deadline has passed
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Repeating timer. Missed periods collapse into a single firing.
#[derive(Debug, Clone)]
pub struct Interval {
    period_ms: f64,
    next: f64,
}

impl Interval {
    /// First firing one period after `start_ms`
    pub fn new(period_ms: f64, start_ms: f64) -> Self {
        Self {
            period_ms,
            next: start_ms + period_ms,
        }
    }

    pub fn poll(&mut self, now_ms: f64) -> bool {
        if now_ms < self.next {
            return false;
        }
        self.next += self.period_ms;
        if self.next <= now_ms {
            self.next = now_ms + self.period_ms;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_ticker() {
        let mut ticker = FixedTicker::new(100.0, 10.0, 3);
        assert_eq!(ticker.next_tick(), Some(100.0));
        assert_eq!(ticker.next_tick(), Some(110.0));
        assert_eq!(ticker.next_tick(), Some(120.0));
        assert_eq!(ticker.next_tick(), None);
    }

    #[test]
    fn test_debounce_waits_for_quiet() {
        let mut resize = Debounce::new(250.0);
        resize.trigger(0.0);
        resize.trigger(200.0);
        assert!(!resize.poll(300.0));
        assert!(resize.poll(450.0));
        assert!(!resize.poll(1000.0));
        assert!(!resize.is_pending());
    }

    #[test]
    fn test_interval_fires_each_period() {
        let mut every = Interval::new(2500.0, 0.0);
        assert!(!every.poll(2499.0));
        assert!(every.poll(2500.0));
        assert!(!every.poll(4000.0));
        assert!(every.poll(5000.0));
    }

    #[test]
    fn test_interval_collapses_backlog() {
        let mut every = Interval::new(1000.0, 0.0);
        // Tab was in the background for a while
        assert!(every.poll(10_500.0));
        assert!(!every.poll(10_600.0));
        assert!(every.poll(11_500.0));
    }
}
