// Reducer - pure transition function over library snapshots
//
// `apply` never mutates its input and never fails: logically inconsistent
// intents (missing ids, out-of-range moves) return the unchanged state with
// a debug trace, so a misbehaving caller can be diagnosed without surfacing
// anything to the user.

use crate::library::intent::Intent;
use crate::library::state::{LibraryState, Performance};
use crate::tempo::math::TEMPO_FALLBACK;

/// Requested tempos above this are treated as runaway tap-tempo outliers and
/// reset to the fallback. Asymmetric on purpose: there is no low-side clamp
/// here because the estimator never emits non-positive values.
const MAX_SET_TEMPO: f64 = 300.0;

/// Apply one intent to a snapshot, producing the next snapshot.
pub fn apply(state: &LibraryState, intent: &Intent) -> LibraryState {
    let mut next = state.clone();

    match intent {
        Intent::Add { performance } => {
            next.performances.push(performance.clone());
        }
        Intent::Delete { performance_id } => {
            next.performances.retain(|p| p.id != *performance_id);
            if next.selected_performance_id.as_deref() == Some(performance_id.as_str()) {
                next.selected_performance_id = None;
                next.performance_active = false;
            }
        }
        Intent::DeleteAll => {
            next.performances.clear();
            next.selected_performance_id = None;
            next.performance_active = false;
        }
        Intent::SetPerformanceName {
            performance_id,
            name,
        } => {
            update_performance(&mut next, performance_id, "setPerformanceName", |p| {
                p.name = name.clone();
            });
        }
        Intent::Move {
            performance_id,
            increment,
        } => match next.position(performance_id) {
            Some(from) => {
                let target = from as i64 + increment;
                if target < 0 || target >= next.performances.len() as i64 {
                    tracing::debug!(
                        %performance_id,
                        increment = *increment,
                        "move target out of range, leaving order unchanged"
                    );
                } else {
                    let entry = next.performances.remove(from);
                    next.performances.insert(target as usize, entry);
                }
            }
            None => {
                tracing::debug!(%performance_id, "move target not found, ignoring");
            }
        },
        Intent::Open { performance_id } => {
            if next.position(performance_id).is_some() {
                next.selected_performance_id = Some(performance_id.clone());
                next.performance_active = false;
                next.main_panel_view = crate::library::state::MainPanelView::Detail;
            } else {
                tracing::debug!(%performance_id, "open target not found, ignoring");
            }
        }
        Intent::Close => {
            next.selected_performance_id = None;
            next.performance_active = false;
        }
        Intent::Previous { performance_id } => {
            let len = next.performances.len();
            let target = match next.position(performance_id) {
                // At the beginning (or unmatched id): wrap to the end.
                Some(0) | None => len.checked_sub(1),
                Some(i) => Some(i - 1),
            };
            next.selected_performance_id = target.map(|i| next.performances[i].id.clone());
            next.performance_active = false;
            next.editing_performance = false;
        }
        Intent::Next { performance_id } => {
            let len = next.performances.len();
            let target = match next.position(performance_id) {
                Some(i) if i + 1 < len => Some(i + 1),
                // At the end (or unmatched id): wrap to the beginning.
                _ => {
                    if len == 0 {
                        None
                    } else {
                        Some(0)
                    }
                }
            };
            next.selected_performance_id = target.map(|i| next.performances[i].id.clone());
            next.performance_active = false;
            next.editing_performance = false;
        }
        Intent::Start => {
            next.performance_active = true;
        }
        Intent::Stop => {
            next.performance_active = false;
        }
        Intent::IncrementTempo {
            performance_id,
            increment,
        } => {
            update_performance(&mut next, performance_id, "incrementTempo", |p| {
                p.tempo += increment;
            });
        }
        Intent::SetTempo {
            performance_id,
            tempo,
        } => {
            update_performance(&mut next, performance_id, "setTempo", |p| {
                p.tempo = if *tempo > MAX_SET_TEMPO {
                    TEMPO_FALLBACK as i32
                } else {
                    tempo.round() as i32
                };
            });
        }
        Intent::SetNotes {
            performance_id,
            notes,
        } => {
            update_performance(&mut next, performance_id, "setNotes", |p| {
                p.notes = notes.clone();
            });
        }
        Intent::Import { performances } => {
            next.performances = performances.clone();
            // The wholesale replacement may leave the selection dangling;
            // the reference invariant wins over keeping it.
            let dangling = next
                .selected_performance_id
                .as_deref()
                .is_some_and(|id| next.position(id).is_none());
            if dangling {
                next.selected_performance_id = None;
                next.performance_active = false;
            }
        }
        Intent::ToggleImportView { visible } => {
            next.import_view_visible = *visible;
            next.export_view_visible = false;
        }
        Intent::ToggleExportView { visible } => {
            next.export_view_visible = *visible;
            next.import_view_visible = false;
        }
        Intent::ToggleMainPanelView { view } => {
            next.main_panel_view = *view;
            next.editing_performance = false;
            next.performance_active = false;
        }
        Intent::ToggleEditingPerformance { editing } => {
            next.editing_performance = *editing;
        }
    }

    next
}

/// Mutate one performance in place, or trace and leave the state unchanged
/// when the id does not resolve. Missing ids are caller errors, not faults.
fn update_performance(
    state: &mut LibraryState,
    performance_id: &str,
    intent_kind: &str,
    mutate: impl FnOnce(&mut Performance),
) {
    match state
        .performances
        .iter_mut()
        .find(|p| p.id == performance_id)
    {
        Some(performance) => mutate(performance),
        None => {
            tracing::debug!(%performance_id, intent = intent_kind, "target performance not found, ignoring");
        }
    }
}
