// Tempo math - conversion between BPM and inter-beat interval
// Both directions are total functions: degenerate inputs collapse to a safe
// default instead of signalling, so the metronome is always schedulable.

use std::time::Duration;

/// Fallback value used by both conversion directions for non-positive input,
/// and by the reducer when a requested tempo exceeds the runaway guard.
pub const TEMPO_FALLBACK: f64 = 42.0;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Interval in milliseconds between beats at the given tempo.
///
/// Non-positive BPM would mean a division by zero or a negative interval, so
/// it returns [`TEMPO_FALLBACK`] milliseconds instead.
pub fn interval_ms_from_bpm(bpm: f64) -> f64 {
    if bpm <= 0.0 {
        TEMPO_FALLBACK
    } else {
        MS_PER_MINUTE / bpm
    }
}

/// Tempo in BPM for the given inter-beat interval.
///
/// Symmetric rule: non-positive intervals return [`TEMPO_FALLBACK`] BPM.
pub fn bpm_from_interval_ms(interval_ms: f64) -> f64 {
    if interval_ms <= 0.0 {
        TEMPO_FALLBACK
    } else {
        MS_PER_MINUTE / interval_ms
    }
}

/// Beat interval as a [`Duration`], for arming the ticker.
///
/// Routed through [`interval_ms_from_bpm`], so a tempo of 0 or below never
/// produces a zero-delay timer.
pub fn tick_interval(bpm: i32) -> Duration {
    Duration::from_secs_f64(interval_ms_from_bpm(bpm as f64) / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_bpm() {
        assert_eq!(interval_ms_from_bpm(120.0), 500.0);
        assert_eq!(interval_ms_from_bpm(60.0), 1000.0);
        assert_eq!(interval_ms_from_bpm(90.0), MS_PER_MINUTE / 90.0);
    }

    #[test]
    fn test_bpm_from_interval() {
        assert_eq!(bpm_from_interval_ms(500.0), 120.0);
        assert_eq!(bpm_from_interval_ms(1000.0), 60.0);
    }

    #[test]
    fn test_non_positive_inputs_use_fallback() {
        assert_eq!(interval_ms_from_bpm(0.0), TEMPO_FALLBACK);
        assert_eq!(interval_ms_from_bpm(-10.0), TEMPO_FALLBACK);
        assert_eq!(bpm_from_interval_ms(0.0), TEMPO_FALLBACK);
        assert_eq!(bpm_from_interval_ms(-500.0), TEMPO_FALLBACK);
    }

    #[test]
    fn test_round_trip() {
        for bpm in [1.0, 42.0, 60.0, 120.0, 200.0, 300.0] {
            let back = bpm_from_interval_ms(interval_ms_from_bpm(bpm));
            assert!((back - bpm).abs() < 1e-9, "round trip failed for {}", bpm);
        }
    }

    #[test]
    fn test_tick_interval_never_zero() {
        assert_eq!(tick_interval(120), Duration::from_millis(500));
        assert_eq!(tick_interval(0), Duration::from_millis(42));
        assert_eq!(tick_interval(-5), Duration::from_millis(42));
    }
}
