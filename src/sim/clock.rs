//! Frame pacing for whatever drives the step
//!
//! Turns monotonic clock samples into `(dt, elapsed)` pairs. Samples that
//! arrive too early are skipped and long gaps (a suspended tab or process)
//! are capped so the simulation never takes one huge step.

use crate::consts::{MAX_FRAME_DELTA_FACTOR, TARGET_FRAME_MS};

#[derive(Debug, Clone)]
pub struct FrameClock {
    target_ms: f64,
    last_ms: Option<f64>,
    elapsed_ms: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TARGET_FRAME_MS)
    }
}

impl FrameClock {
    pub fn new(target_ms: f64) -> Self {
        Self {
            target_ms,
            last_ms: None,
            elapsed_ms: 0.0,
        }
    }

    /// Feed a monotonic timestamp (ms)
    ///
    /// Returns `Some((dt_secs, elapsed_ms))` when a step is due. The first
    /// sample only primes the clock.
    pub fn sample(&mut self, now_ms: f64) -> Option<(f32, f64)> {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return None;
        };

        let delta = now_ms - last;
        if delta < self.target_ms * 0.9 {
            return None;
        }

        let capped = delta.min(self.target_ms * MAX_FRAME_DELTA_FACTOR);
        self.last_ms = Some(now_ms);
        self.elapsed_ms += capped;
        Some(((capped / 1000.0) as f32, self.elapsed_ms))
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Forget all timing (on restart)
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.elapsed_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_primes() {
        let mut clock = FrameClock::new(16.0);
        assert_eq!(clock.sample(1000.0), None);
        let (dt, elapsed) = clock.sample(1016.0).unwrap();
        assert!((dt - 0.016).abs() < 1e-6);
        assert_eq!(elapsed, 16.0);
    }

    #[test]
    fn test_early_sample_skipped() {
        let mut clock = FrameClock::new(16.0);
        clock.sample(0.0);
        assert_eq!(clock.sample(10.0), None);
        assert!(clock.sample(16.0).is_some());
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut clock = FrameClock::new(16.0);
        clock.sample(0.0);
        let (dt, elapsed) = clock.sample(5000.0).unwrap();
        assert!((dt - 0.048).abs() < 1e-6);
        assert_eq!(elapsed, 48.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new(16.0);
        clock.sample(0.0);
        clock.sample(20.0);
        clock.reset();
        assert_eq!(clock.elapsed_ms(), 0.0);
        assert_eq!(clock.sample(100.0), None);
    }
}
