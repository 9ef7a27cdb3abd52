//! Timed cone-radius growth toward the maximum radius.

use std::time::Duration;

/// Linear radius animation. Times are milliseconds on the frame clock.
#[derive(Debug, Clone)]
pub struct Growth {
    duration_ms: f64,
    active: bool,
    start_ms: f64,
    start_radius: f32,
}

impl Growth {
    /// Durations under 1 ms are treated as 1 ms so the animation always ends.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration_ms: (duration.as_secs_f64() * 1000.0).max(1.0),
            active: false,
            start_ms: 0.0,
            start_radius: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self, now_ms: f64, radius: f32) {
        self.active = true;
        self.start_ms = now_ms;
        self.start_radius = radius;
        log::debug!("growth started at radius {radius:.3}");
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Starts when idle, stops when running.
    pub fn toggle(&mut self, now_ms: f64, radius: f32) {
        if self.active {
            self.cancel();
            log::debug!("growth stopped at radius {radius:.3}");
        } else {
            self.start(now_ms, radius);
        }
    }

    /// Radius for `now_ms`, or `None` when inactive.
    ///
    /// Reaching the end yields exactly `max_radius` and deactivates.
    pub fn advance(&mut self, now_ms: f64, max_radius: f32) -> Option<f32> {
        if !self.active {
            return None;
        }

        let t = ((now_ms - self.start_ms) / self.duration_ms).max(0.0);
        if t >= 1.0 {
            self.active = false;
            return Some(max_radius);
        }

        let t = t as f32;
        Some(self.start_radius + (max_radius - self.start_radius) * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn growth() -> Growth {
        Growth::new(Duration::from_millis(7000))
    }

    #[test]
    fn inactive_growth_yields_nothing() {
        let mut g = growth();
        assert_eq!(g.advance(100.0, 2.2), None);
    }

    #[test]
    fn halfway_radius_is_midpoint() {
        let mut g = growth();
        g.start(1000.0, 0.03);
        let r = g.advance(4500.0, 2.2).unwrap();
        assert!((r - 1.115).abs() < 1e-5, "radius {r}");
        assert!(g.is_active());
    }

    #[test]
    fn finishes_exactly_at_max() {
        let mut g = growth();
        g.start(0.0, 0.03);
        assert_eq!(g.advance(7000.0, 2.2), Some(2.2));
        assert!(!g.is_active());

        g.start(0.0, 0.03);
        assert_eq!(g.advance(12_345.0, 2.2), Some(2.2));
        assert!(!g.is_active());
    }

    #[test]
    fn start_frame_keeps_start_radius() {
        let mut g = growth();
        g.start(500.0, 0.4);
        assert_eq!(g.advance(500.0, 2.2), Some(0.4));
    }

    #[test]
    fn zero_duration_still_finishes() {
        let mut g = Growth::new(Duration::ZERO);
        g.start(100.0, 0.03);
        assert_eq!(g.advance(101.0, 2.2), Some(2.2));
        assert!(!g.is_active());
    }

    #[test]
    fn toggle_stops_running_animation() {
        let mut g = growth();
        g.toggle(0.0, 0.03);
        assert!(g.is_active());
        g.toggle(10.0, 0.05);
        assert!(!g.is_active());
        assert_eq!(g.advance(20.0, 2.2), None);
    }
}
