// Library - the performance collection and its state transition engine
//
// All mutation of the performance list and of the transient UI-selection
// state goes through the reducer: UI code builds an `Intent`, the store
// applies it against the current snapshot and, for durable intents, saves
// the result through the persistence gateway. No other mutation path exists.

pub mod intent;
pub mod reducer;
pub mod state;
pub mod store;

pub use intent::Intent;
pub use reducer::apply;
pub use state::{LibraryState, MainPanelView, Performance};
pub use store::LibraryStore;
