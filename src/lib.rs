// Setlist Metronome - library exports for the binary and the tests

pub mod library;
pub mod messaging;
pub mod metronome;
pub mod storage;
pub mod tempo;
pub mod ui;

// Re-export commonly used types for convenience
pub use library::{Intent, LibraryState, LibraryStore, MainPanelView, Performance, apply};
pub use messaging::{Tick, TickConsumer, TickProducer, create_tick_channel};
pub use metronome::{MetronomeScheduler, Ticker};
pub use storage::{
    ExchangeError, JsonFileGateway, MemoryGateway, PersistenceGateway, StorageError,
    export_performances, import_performances,
};
pub use tempo::{TEMPO_FALLBACK, TapTempoEstimator, bpm_from_interval_ms, interval_ms_from_bpm};
