// Metronome - periodic tick signal for the active performance
//
// Split between the session owner (`scheduler`), which guarantees at most
// one live timer and restarts it cleanly on any tempo change, and the thread
// plumbing (`ticker`) that actually emits ticks into the tick channel.

pub mod scheduler;
pub mod ticker;

pub use scheduler::MetronomeScheduler;
pub use ticker::Ticker;
