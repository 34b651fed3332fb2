// Library state - the immutable snapshot the reducer transitions between

use serde::{Deserialize, Serialize};

/// A named, user-authored item combining a tempo and free-text notes.
///
/// Identity is by `id`, an opaque caller-supplied string that never changes
/// after creation; the other fields are mutable through intents.
///
/// Field order matters: the export payload must reproduce the stored JSON
/// shape `{"name":..,"id":..,"tempo":..,"notes":..}` byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    pub name: String,
    pub id: String,
    pub tempo: i32,
    pub notes: String,
}

impl Performance {
    /// Tempo assigned to freshly added performances.
    pub const DEFAULT_TEMPO: i32 = 42;

    /// Create a performance with the default tempo and empty notes.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            tempo: Self::DEFAULT_TEMPO,
            notes: String::new(),
        }
    }
}

/// Which top-level view the main panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainPanelView {
    #[default]
    List,
    Detail,
}

/// The full session snapshot: the ordered performance list plus transient
/// UI-selection and view state. Replaced wholesale by every applied intent,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryState {
    /// Display/navigation order; user-controlled via move intents.
    pub performances: Vec<Performance>,
    /// Must reference an existing entry whenever set.
    pub selected_performance_id: Option<String>,
    /// Whether the metronome is running for the selected performance.
    /// Only meaningful while a selection exists.
    pub performance_active: bool,
    pub main_panel_view: MainPanelView,
    pub editing_performance: bool,
    /// Never true at the same time as `import_view_visible`.
    pub export_view_visible: bool,
    pub import_view_visible: bool,
}

impl LibraryState {
    /// State with the given performance list and all ephemeral fields at
    /// their defaults. Used when rebuilding from a persisted snapshot.
    pub fn with_performances(performances: Vec<Performance>) -> Self {
        Self {
            performances,
            selected_performance_id: None,
            performance_active: false,
            main_panel_view: MainPanelView::default(),
            editing_performance: false,
            export_view_visible: false,
            import_view_visible: false,
        }
    }

    /// Built-in default used when no persisted snapshot exists yet.
    pub fn seed() -> Self {
        let performances = (1..=3usize)
            .map(|n| Performance {
                name: format!("performance {}", n),
                id: ["a", "b", "c"][n - 1].to_string(),
                tempo: 72,
                notes: format!("notes {}", n),
            })
            .collect();

        Self {
            selected_performance_id: Some("c".to_string()),
            ..Self::with_performances(performances)
        }
    }

    /// Position of the performance with the given id, if present.
    pub fn position(&self, performance_id: &str) -> Option<usize> {
        self.performances.iter().position(|p| p.id == performance_id)
    }

    /// Look up a performance by id.
    pub fn performance(&self, performance_id: &str) -> Option<&Performance> {
        self.performances.iter().find(|p| p.id == performance_id)
    }

    /// The currently selected performance, if the selection is set and the
    /// referenced entry still exists.
    pub fn selected_performance(&self) -> Option<&Performance> {
        self.selected_performance_id
            .as_deref()
            .and_then(|id| self.performance(id))
    }
}

impl Default for LibraryState {
    fn default() -> Self {
        Self::with_performances(Vec::new())
    }
}
