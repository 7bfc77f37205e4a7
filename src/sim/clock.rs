//! Frame clock: turns per-frame timestamps into clamped elapsed time

/// Tracks the previous frame timestamp
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    max_elapsed_ms: f32,
}

impl FrameClock {
    pub fn new(max_elapsed_ms: f32) -> Self {
        Self {
            last: None,
            max_elapsed_ms,
        }
    }

    /// Elapsed milliseconds since the previous call.
    ///
    /// The first call after construction or [`reset`](Self::reset) yields 0.
    /// Backwards clock jumps yield 0; long stalls (tab switches, breakpoints)
    /// are clamped to `max_elapsed_ms`.
    pub fn elapsed_ms(&mut self, timestamp_ms: f64) -> f32 {
        if !timestamp_ms.is_finite() {
            return 0.0;
        }
        let elapsed = match self.last {
            Some(prev) => (timestamp_ms - prev).max(0.0) as f32,
            None => 0.0,
        };
        self.last = Some(timestamp_ms);
        elapsed.min(self.max_elapsed_ms)
    }

    /// Forget the previous timestamp so the next frame counts as the first
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new(100.0);
        assert_eq!(clock.elapsed_ms(12_345.0), 0.0);
        assert_eq!(clock.elapsed_ms(12_361.0), 16.0);
    }

    #[test]
    fn test_clamps() {
        let mut clock = FrameClock::new(100.0);
        clock.elapsed_ms(1000.0);
        assert_eq!(clock.elapsed_ms(5000.0), 100.0);
        // Backwards
        assert_eq!(clock.elapsed_ms(4000.0), 0.0);
        assert_eq!(clock.elapsed_ms(f64::NAN), 0.0);
        // A bad timestamp does not poison the clock
        assert_eq!(clock.elapsed_ms(4016.0), 16.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new(100.0);
        clock.elapsed_ms(0.0);
        clock.elapsed_ms(16.0);
        clock.reset();
        assert_eq!(clock.elapsed_ms(50.0), 0.0);
    }
}
