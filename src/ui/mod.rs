// UI - egui rendering and intent dispatch
//
// Everything here is plumbing around the library store: widgets issue
// intents and render a read-only projection of the snapshot. No state
// transition logic lives in this module.

pub mod app;

pub use app::SetlistApp;
