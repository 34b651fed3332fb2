// Main application UI

use std::time::{Duration, Instant};

use eframe::egui;

use crate::library::{Intent, LibraryStore, MainPanelView, Performance};
use crate::metronome::MetronomeScheduler;
use crate::storage::exchange;
use crate::tempo::TapTempoEstimator;

/// How long the beat dot stays lit after a tick.
const FLASH_DURATION: Duration = Duration::from_millis(75);

/// How long the "Copied!" confirmation stays on the export button.
const COPIED_BADGE_DURATION: Duration = Duration::from_secs(3);

struct ListEdit {
    performance_id: String,
    name: String,
}

struct DetailDraft {
    name: String,
    notes: String,
}

enum Confirm {
    DeletePerformance(String),
    DeleteAll,
}

pub struct SetlistApp {
    store: LibraryStore,
    tap: TapTempoEstimator,
    scheduler: MetronomeScheduler,
    /// Origin for tap timestamps.
    started_at: Instant,
    flash_until: Option<Instant>,
    // Widget drafts, local until dispatched
    add_name: String,
    list_edit: Option<ListEdit>,
    detail_draft: Option<DetailDraft>,
    import_text: String,
    import_error: Option<String>,
    copied_at: Option<Instant>,
    pending_confirm: Option<Confirm>,
}

impl SetlistApp {
    pub fn new(store: LibraryStore) -> Self {
        Self {
            store,
            tap: TapTempoEstimator::new(),
            scheduler: MetronomeScheduler::new(),
            started_at: Instant::now(),
            flash_until: None,
            add_name: String::new(),
            list_edit: None,
            detail_draft: None,
            import_text: String::new(),
            import_error: None,
            copied_at: None,
            pending_confirm: None,
        }
    }

    fn tap_timestamp_ms(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64() * 1000.0
    }

    /// Reconcile the tick thread with the snapshot and light the dot for
    /// every beat that fired since the last frame.
    fn drive_metronome(&mut self) {
        let state = self.store.state();
        let selected = state.selected_performance();
        let active = state.performance_active && selected.is_some();
        let bpm = selected.map(|p| p.tempo).unwrap_or(0);

        self.scheduler.sync(active, bpm);

        if self.scheduler.drain_ticks() > 0 {
            self.flash_until = Some(Instant::now() + FLASH_DURATION);
        }
    }

    fn draw_toolbar(&self, ui: &mut egui::Ui, pending: &mut Vec<Intent>) {
        let current = self.store.state().main_panel_view;
        ui.horizontal(|ui| {
            if ui
                .selectable_label(current == MainPanelView::List, "Performance List")
                .clicked()
            {
                pending.push(Intent::ToggleMainPanelView {
                    view: MainPanelView::List,
                });
            }
            if ui
                .selectable_label(current == MainPanelView::Detail, "Performance")
                .clicked()
            {
                pending.push(Intent::ToggleMainPanelView {
                    view: MainPanelView::Detail,
                });
            }
        });
    }

    fn draw_list_toolbar(&mut self, ui: &mut egui::Ui, pending: &mut Vec<Intent>) {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Delete All").clicked() {
                self.pending_confirm = Some(Confirm::DeleteAll);
            }
            if ui.button("Import").clicked() {
                pending.push(Intent::ToggleImportView { visible: true });
            }
            if ui.button("Export").clicked() {
                pending.push(Intent::ToggleExportView { visible: true });
            }
        });
    }

    fn draw_export_view(&mut self, ui: &mut egui::Ui, pending: &mut Vec<Intent>) {
        let json = exchange::export_performances(&self.store.state().performances)
            .unwrap_or_else(|_| "[]".to_string());

        let mut readonly = json.clone();
        ui.add(
            egui::TextEdit::multiline(&mut readonly)
                .interactive(false)
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            if ui.button("Close").clicked() {
                pending.push(Intent::ToggleExportView { visible: false });
            }
            let copied = self
                .copied_at
                .is_some_and(|at| at.elapsed() < COPIED_BADGE_DURATION);
            let label = if copied { "Copied!" } else { "Copy" };
            if ui.button(label).clicked() {
                ui.ctx().copy_text(json);
                self.copied_at = Some(Instant::now());
            }
        });
    }

    fn draw_import_view(&mut self, ui: &mut egui::Ui, pending: &mut Vec<Intent>) {
        ui.add(
            egui::TextEdit::multiline(&mut self.import_text)
                .hint_text(r#"[{"name":"performance 1","id":"a","tempo":72,"notes":"notes 1"}]"#)
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            if ui.button("Close").clicked() {
                pending.push(Intent::ToggleImportView { visible: false });
            }
            if ui.button("Import").clicked() {
                // Validate before dispatch; a parse failure must leave the
                // library untouched and block with a notice.
                match exchange::import_performances(&self.import_text) {
                    Ok(performances) => {
                        pending.push(Intent::Import { performances });
                        pending.push(Intent::ToggleImportView { visible: false });
                        self.import_error = None;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "import payload rejected");
                        self.import_error = Some(err.to_string());
                    }
                }
            }
        });
    }

    fn draw_add_row(&mut self, ui: &mut egui::Ui, pending: &mut Vec<Intent>) {
        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.add_name).hint_text("performance name"),
            );
            let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let add_enabled = !self.add_name.trim().is_empty();

            if ui.add_enabled(add_enabled, egui::Button::new("Add")).clicked()
                || (submitted && add_enabled)
            {
                pending.push(Intent::Add {
                    performance: Performance::new(
                        uuid::Uuid::new_v4().to_string(),
                        self.add_name.trim(),
                    ),
                });
                self.add_name.clear();
            }
        });
    }

    fn draw_list_item(
        &mut self,
        ui: &mut egui::Ui,
        performance: &Performance,
        pending: &mut Vec<Intent>,
    ) {
        let editing = self
            .list_edit
            .as_ref()
            .is_some_and(|e| e.performance_id == performance.id);

        if !editing {
            ui.horizontal(|ui| {
                if ui
                    .add(
                        egui::Label::new(&performance.name)
                            .sense(egui::Sense::click())
                            .truncate(),
                    )
                    .clicked()
                {
                    pending.push(Intent::Open {
                        performance_id: performance.id.clone(),
                    });
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Edit").clicked() {
                        self.list_edit = Some(ListEdit {
                            performance_id: performance.id.clone(),
                            name: performance.name.clone(),
                        });
                    }
                });
            });
            return;
        }

        let mut close_edit = false;
        if let Some(edit) = self.list_edit.as_mut() {
            ui.text_edit_singleline(&mut edit.name);
            ui.horizontal(|ui| {
                if ui.button("Move Up").clicked() {
                    pending.push(Intent::Move {
                        performance_id: performance.id.clone(),
                        increment: -1,
                    });
                }
                if ui.button("Move Down").clicked() {
                    pending.push(Intent::Move {
                        performance_id: performance.id.clone(),
                        increment: 1,
                    });
                }
                if ui.button("Delete").clicked() {
                    self.pending_confirm =
                        Some(Confirm::DeletePerformance(performance.id.clone()));
                }
                if ui.button("Cancel").clicked() {
                    close_edit = true;
                }
                if ui.button("Save").clicked() {
                    pending.push(Intent::SetPerformanceName {
                        performance_id: performance.id.clone(),
                        name: edit.name.clone(),
                    });
                    close_edit = true;
                }
            });
        }
        if close_edit {
            self.list_edit = None;
        }
    }

    fn draw_list_view(&mut self, ui: &mut egui::Ui, pending: &mut Vec<Intent>) {
        self.draw_list_toolbar(ui, pending);
        ui.add_space(8.0);

        if self.store.state().export_view_visible {
            self.draw_export_view(ui, pending);
            ui.add_space(8.0);
        }
        if self.store.state().import_view_visible {
            self.draw_import_view(ui, pending);
            ui.add_space(8.0);
        }

        self.draw_add_row(ui, pending);
        ui.add_space(8.0);

        let performances = self.store.state().performances.clone();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for performance in &performances {
                ui.separator();
                self.draw_list_item(ui, performance, pending);
            }
        });
    }

    fn draw_detail_header(
        &self,
        ui: &mut egui::Ui,
        performance: &Performance,
        pending: &mut Vec<Intent>,
    ) {
        let state = self.store.state();
        let total = state.performances.len();
        let number = state.position(&performance.id).map(|i| i + 1).unwrap_or(0);
        let navigation_enabled = total > 1;

        ui.horizontal(|ui| {
            if ui
                .add_enabled(navigation_enabled, egui::Button::new("Previous"))
                .clicked()
            {
                pending.push(Intent::Previous {
                    performance_id: performance.id.clone(),
                });
            }

            ui.vertical_centered(|ui| {
                ui.heading(&performance.name);
                ui.weak(format!("{}/{}", number, total));
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(navigation_enabled, egui::Button::new("Next"))
                    .clicked()
                {
                    pending.push(Intent::Next {
                        performance_id: performance.id.clone(),
                    });
                }
            });
        });
    }

    fn draw_detail_body(
        &mut self,
        ui: &mut egui::Ui,
        performance: &Performance,
        pending: &mut Vec<Intent>,
    ) {
        if self.store.state().editing_performance {
            let draft = self.detail_draft.get_or_insert_with(|| DetailDraft {
                name: performance.name.clone(),
                notes: performance.notes.clone(),
            });

            ui.text_edit_singleline(&mut draft.name);
            ui.add(
                egui::TextEdit::multiline(&mut draft.notes)
                    .hint_text("notes")
                    .desired_width(f32::INFINITY),
            );

            let mut done = false;
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    pending.push(Intent::ToggleEditingPerformance { editing: false });
                    done = true;
                }
                if ui.button("Save").clicked() {
                    pending.push(Intent::SetNotes {
                        performance_id: performance.id.clone(),
                        notes: draft.notes.clone(),
                    });
                    pending.push(Intent::SetPerformanceName {
                        performance_id: performance.id.clone(),
                        name: draft.name.clone(),
                    });
                    pending.push(Intent::ToggleEditingPerformance { editing: false });
                    done = true;
                }
            });
            if done {
                self.detail_draft = None;
            }
        } else {
            if performance.notes.is_empty() {
                ui.weak("(no notes)");
            } else {
                ui.label(&performance.notes);
            }
            if ui.button("Edit").clicked() {
                pending.push(Intent::ToggleEditingPerformance { editing: true });
                self.detail_draft = None;
            }
        }
    }

    /// The beat dot. Lit while a tick flash is pending; clicking toggles the
    /// metronome.
    fn draw_beat_dot(&self, ui: &mut egui::Ui, pending: &mut Vec<Intent>) {
        let active = self.store.state().performance_active;
        let lit = self.flash_until.is_some_and(|until| Instant::now() < until);

        ui.vertical_centered(|ui| {
            let size = egui::vec2(120.0, 120.0);
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

            let fill = if lit {
                ui.visuals().selection.bg_fill
            } else {
                ui.visuals().faint_bg_color
            };
            ui.painter().circle(
                rect.center(),
                rect.width() / 2.0,
                fill,
                egui::Stroke::new(1.0, ui.visuals().weak_text_color()),
            );
            if !active {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Start",
                    egui::FontId::proportional(16.0),
                    ui.visuals().text_color(),
                );
            }

            if response.clicked() {
                pending.push(if active { Intent::Stop } else { Intent::Start });
            }
        });
    }

    fn draw_tempo_controls(
        &mut self,
        ui: &mut egui::Ui,
        performance: &Performance,
        pending: &mut Vec<Intent>,
    ) {
        ui.horizontal(|ui| {
            if ui.button("Tap").clicked() {
                let at_ms = self.tap_timestamp_ms();
                if let Some(bpm) = self.tap.tap(at_ms) {
                    pending.push(Intent::SetTempo {
                        performance_id: performance.id.clone(),
                        tempo: bpm as f64,
                    });
                }
            }

            let mut tempo = performance.tempo;
            if ui.add(egui::DragValue::new(&mut tempo).speed(1)).changed() {
                pending.push(Intent::SetTempo {
                    performance_id: performance.id.clone(),
                    tempo: tempo as f64,
                });
            }

            if ui.button("Down").clicked() {
                pending.push(Intent::IncrementTempo {
                    performance_id: performance.id.clone(),
                    increment: -1,
                });
            }
            if ui.button("Up").clicked() {
                pending.push(Intent::IncrementTempo {
                    performance_id: performance.id.clone(),
                    increment: 1,
                });
            }
        });
    }

    fn draw_detail_view(&mut self, ui: &mut egui::Ui, pending: &mut Vec<Intent>) {
        let Some(performance) = self.store.state().selected_performance().cloned() else {
            ui.label("No performance selected");
            return;
        };

        self.draw_detail_header(ui, &performance, pending);
        ui.add_space(8.0);
        self.draw_detail_body(ui, &performance, pending);
        ui.add_space(12.0);

        ui.vertical_centered(|ui| {
            ui.heading(format!("Tempo {}", performance.tempo));
        });
        self.draw_beat_dot(ui, pending);
        ui.add_space(12.0);
        self.draw_tempo_controls(ui, &performance, pending);
    }

    fn draw_import_error(&mut self, ctx: &egui::Context) {
        let Some(message) = self.import_error.clone() else {
            return;
        };
        egui::Window::new("Import failed")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.import_error = None;
                }
            });
    }

    fn draw_confirm(&mut self, ctx: &egui::Context, pending: &mut Vec<Intent>) {
        let Some(confirm) = &self.pending_confirm else {
            return;
        };
        let question = match confirm {
            Confirm::DeletePerformance(_) => "Are you sure you want to delete this performance?",
            Confirm::DeleteAll => "Are you sure you want to delete all performances?",
        };

        let mut decided = false;
        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(question);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        decided = true;
                    }
                    if ui.button("Delete").clicked() {
                        match &self.pending_confirm {
                            Some(Confirm::DeletePerformance(id)) => {
                                pending.push(Intent::Delete {
                                    performance_id: id.clone(),
                                });
                                self.list_edit = None;
                            }
                            Some(Confirm::DeleteAll) => pending.push(Intent::DeleteAll),
                            None => {}
                        }
                        decided = true;
                    }
                });
            });
        if decided {
            self.pending_confirm = None;
        }
    }
}

impl eframe::App for SetlistApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive_metronome();

        // Keep frames coming while there is a beat (or a fading flash) to draw.
        if self.scheduler.is_running() || self.flash_until.is_some() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
        if self.flash_until.is_some_and(|until| Instant::now() >= until) {
            self.flash_until = None;
        }

        let mut pending: Vec<Intent> = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, &mut pending);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let view = self.store.state().main_panel_view;
            match view {
                MainPanelView::List => self.draw_list_view(ui, &mut pending),
                MainPanelView::Detail => self.draw_detail_view(ui, &mut pending),
            }
        });

        self.draw_import_error(ctx);
        self.draw_confirm(ctx, &mut pending);

        // Intents apply serially, in the order the widgets issued them.
        for intent in pending {
            self.store.dispatch(intent);
        }
    }
}
