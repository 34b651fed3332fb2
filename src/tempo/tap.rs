// Tap tempo - estimates BPM from the timing between user taps
// Keeps a sliding window of recent tap timestamps so an arbitrarily long tap
// history cannot skew the average.

use crate::tempo::math::bpm_from_interval_ms;

/// Number of inter-tap gaps averaged for an estimate. The window retains
/// `WINDOW_SIZE + 1` timestamps, since N gaps need N+1 samples.
pub const WINDOW_SIZE: usize = 4;

/// Smooths a live sequence of tap timestamps into a BPM estimate.
///
/// Timestamps are wall-clock milliseconds from any fixed origin; only the
/// differences between consecutive taps matter.
#[derive(Debug, Default)]
pub struct TapTempoEstimator {
    taps_ms: Vec<f64>,
}

impl TapTempoEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tap and return the updated estimate, if one exists.
    ///
    /// A single tap produces no usable gap, so the first call returns `None`
    /// and the estimator waits for a second tap. Two taps with identical
    /// timestamps average to a zero gap, which the conversion absorbs into
    /// its fallback rather than emitting a non-number.
    pub fn tap(&mut self, at_ms: f64) -> Option<i32> {
        self.taps_ms.push(at_ms);

        // Evict the oldest timestamp before averaging.
        if self.taps_ms.len() > WINDOW_SIZE + 1 {
            self.taps_ms.remove(0);
        }

        if self.taps_ms.len() < 2 {
            return None;
        }

        let gaps: Vec<f64> = self.taps_ms.windows(2).map(|w| w[1] - w[0]).collect();
        let avg_ms = gaps.iter().sum::<f64>() / gaps.len() as f64;

        Some(bpm_from_interval_ms(avg_ms).round() as i32)
    }

    /// Forget all recorded taps.
    pub fn reset(&mut self) {
        self.taps_ms.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_tap_produces_no_estimate() {
        let mut estimator = TapTempoEstimator::new();
        assert_eq!(estimator.tap(0.0), None);
    }

    #[test]
    fn test_steady_taps_at_500ms() {
        let mut estimator = TapTempoEstimator::new();
        let mut last = None;
        for at in [0.0, 500.0, 1000.0, 1500.0] {
            last = estimator.tap(at).or(last);
        }
        // 500ms gaps => 60000 / 500 = 120 BPM
        assert_eq!(last, Some(120));
    }

    #[test]
    fn test_window_evicts_old_taps() {
        let mut estimator = TapTempoEstimator::new();
        // A slow stretch at 1000ms gaps...
        for at in [0.0, 1000.0, 2000.0, 3000.0, 4000.0] {
            estimator.tap(at);
        }
        // ...followed by enough fast taps to push the slow ones out.
        let mut bpm = 0;
        for i in 0..=WINDOW_SIZE {
            bpm = estimator.tap(4000.0 + 250.0 * (i + 1) as f64).unwrap();
        }
        // Window now holds only 250ms gaps => 240 BPM
        assert_eq!(bpm, 240);
    }

    #[test]
    fn test_identical_timestamps_fall_back() {
        let mut estimator = TapTempoEstimator::new();
        estimator.tap(100.0);
        // Zero average gap is absorbed by the conversion fallback.
        assert_eq!(estimator.tap(100.0), Some(42));
    }

    #[test]
    fn test_reset_requires_two_fresh_taps() {
        let mut estimator = TapTempoEstimator::new();
        estimator.tap(0.0);
        estimator.tap(500.0);
        estimator.reset();
        assert_eq!(estimator.tap(10_000.0), None);
        assert_eq!(estimator.tap(10_500.0), Some(120));
    }
}
