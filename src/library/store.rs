// Library store - owns the current snapshot and the persistence side effect

use crate::library::intent::Intent;
use crate::library::reducer;
use crate::library::state::LibraryState;
use crate::storage::PersistenceGateway;

/// Single owner of the live [`LibraryState`] snapshot.
///
/// Intents arrive serially from the UI and are applied atomically; durable
/// intents are bundled with a save through the gateway. Persistence is
/// best-effort: a failed write is logged and the session keeps going.
pub struct LibraryStore {
    state: LibraryState,
    gateway: Box<dyn PersistenceGateway>,
}

impl LibraryStore {
    pub fn new(state: LibraryState, gateway: Box<dyn PersistenceGateway>) -> Self {
        Self { state, gateway }
    }

    /// The current snapshot, for rendering a read-only projection.
    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    /// Apply one intent, replacing the snapshot wholesale.
    pub fn dispatch(&mut self, intent: Intent) {
        tracing::trace!(intent = intent.kind(), "dispatch");

        self.state = reducer::apply(&self.state, &intent);

        if intent.is_durable() {
            if let Err(err) = self.gateway.save(&self.state) {
                tracing::warn!(intent = intent.kind(), error = %err, "failed to persist library");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::state::Performance;
    use crate::storage::MemoryGateway;

    #[test]
    fn test_durable_intent_saves_snapshot() {
        let gateway = MemoryGateway::new();
        let mut store = LibraryStore::new(LibraryState::seed(), Box::new(gateway.clone()));

        store.dispatch(Intent::Add {
            performance: Performance::new("d", "performance 4"),
        });

        let persisted = gateway.load().unwrap().expect("snapshot saved");
        assert_eq!(persisted.performances.len(), 4);
        assert_eq!(persisted.performances[3].id, "d");
    }

    #[test]
    fn test_ephemeral_intent_does_not_save() {
        let gateway = MemoryGateway::new();
        let mut store = LibraryStore::new(LibraryState::seed(), Box::new(gateway.clone()));

        store.dispatch(Intent::Open {
            performance_id: "a".into(),
        });
        store.dispatch(Intent::Start);
        store.dispatch(Intent::ToggleExportView { visible: true });

        assert!(gateway.load().unwrap().is_none());
    }

    #[test]
    fn test_dispatch_replaces_snapshot() {
        let gateway = MemoryGateway::new();
        let mut store = LibraryStore::new(LibraryState::seed(), Box::new(gateway));

        store.dispatch(Intent::DeleteAll);
        assert!(store.state().performances.is_empty());

        store.dispatch(Intent::Start);
        assert!(store.state().performance_active);
    }
}
