// Tempo - BPM/interval conversion and tap-tempo estimation

pub mod math;
pub mod tap;

pub use math::{TEMPO_FALLBACK, bpm_from_interval_ms, interval_ms_from_bpm, tick_interval};
pub use tap::TapTempoEstimator;
