// Intent - the closed set of state-changing requests the reducer accepts

use crate::library::state::{MainPanelView, Performance};

/// A named, structured request to change library state.
///
/// Intents are the store's entire API surface: the UI constructs one per user
/// interaction and hands it to [`crate::library::LibraryStore::dispatch`].
/// Malformed intents (unknown ids, out-of-range moves) are not errors; the
/// reducer degrades them to identity.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Append a performance to the end of the list. The caller supplies a
    /// freshly generated unique id.
    Add { performance: Performance },
    /// Remove the matching entry; clears selection and stops the metronome
    /// if it was selected.
    Delete { performance_id: String },
    /// Empty the list, clear selection, stop the metronome.
    DeleteAll,
    SetPerformanceName { performance_id: String, name: String },
    /// Relocate an entry by `increment` positions in the ordered list.
    /// Rejected (state unchanged) when the target falls outside the list.
    Move { performance_id: String, increment: i64 },
    /// Select a performance and switch the main panel to the detail view.
    Open { performance_id: String },
    /// Clear selection and stop the metronome.
    Close,
    /// Move the selection to the previous entry, wrapping circularly.
    Previous { performance_id: String },
    /// Move the selection to the next entry, wrapping circularly.
    Next { performance_id: String },
    Start,
    Stop,
    /// Unclamped tempo adjustment.
    IncrementTempo { performance_id: String, increment: i32 },
    /// Set the tempo, rounding to the nearest integer. Values above the
    /// runaway guard reset to the fallback tempo instead.
    SetTempo { performance_id: String, tempo: f64 },
    SetNotes { performance_id: String, notes: String },
    /// Replace the entire performance list wholesale. Payload validation is
    /// the caller's responsibility, done before dispatch.
    Import { performances: Vec<Performance> },
    ToggleImportView { visible: bool },
    ToggleExportView { visible: bool },
    ToggleMainPanelView { view: MainPanelView },
    ToggleEditingPerformance { editing: bool },
}

impl Intent {
    /// Whether applying this intent changes durable data and must be bundled
    /// with a gateway save. Selection, view toggles, and the active flag are
    /// ephemeral and never persist.
    pub fn is_durable(&self) -> bool {
        matches!(
            self,
            Intent::Add { .. }
                | Intent::Delete { .. }
                | Intent::DeleteAll
                | Intent::SetPerformanceName { .. }
                | Intent::Move { .. }
                | Intent::IncrementTempo { .. }
                | Intent::SetTempo { .. }
                | Intent::SetNotes { .. }
                | Intent::Import { .. }
        )
    }

    /// Short tag for trace output.
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::Add { .. } => "add",
            Intent::Delete { .. } => "delete",
            Intent::DeleteAll => "deleteAll",
            Intent::SetPerformanceName { .. } => "setPerformanceName",
            Intent::Move { .. } => "move",
            Intent::Open { .. } => "open",
            Intent::Close => "close",
            Intent::Previous { .. } => "previous",
            Intent::Next { .. } => "next",
            Intent::Start => "start",
            Intent::Stop => "stop",
            Intent::IncrementTempo { .. } => "incrementTempo",
            Intent::SetTempo { .. } => "setTempo",
            Intent::SetNotes { .. } => "setNotes",
            Intent::Import { .. } => "import",
            Intent::ToggleImportView { .. } => "toggleImportView",
            Intent::ToggleExportView { .. } => "toggleExportView",
            Intent::ToggleMainPanelView { .. } => "toggleMainPanelView",
            Intent::ToggleEditingPerformance { .. } => "toggleEditingPerformance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durable_intents() {
        assert!(Intent::DeleteAll.is_durable());
        assert!(
            Intent::SetTempo {
                performance_id: "a".into(),
                tempo: 90.0
            }
            .is_durable()
        );
        assert!(!Intent::Start.is_durable());
        assert!(!Intent::Close.is_durable());
        assert!(
            !Intent::Open {
                performance_id: "a".into()
            }
            .is_durable()
        );
        assert!(!Intent::ToggleExportView { visible: true }.is_durable());
    }
}
