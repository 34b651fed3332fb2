use setlist_metronome::library::{LibraryState, LibraryStore};
use setlist_metronome::storage::{JsonFileGateway, PersistenceGateway};
use setlist_metronome::ui::SetlistApp;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let gateway = JsonFileGateway::at_default_path();
    tracing::info!(path = %gateway.path().display(), "using library file");

    // A missing snapshot means first launch; a corrupt one is logged and the
    // session starts from the seed rather than refusing to run.
    let state = match gateway.load() {
        Ok(Some(state)) => state,
        Ok(None) => LibraryState::seed(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to load library, starting from seed");
            LibraryState::seed()
        }
    };

    let store = LibraryStore::new(state, Box::new(gateway));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 640.0])
            .with_title("Setlist Metronome"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Setlist Metronome",
        native_options,
        Box::new(|_cc| Ok(Box::new(SetlistApp::new(store)))),
    );

    if let Err(err) = result {
        tracing::error!(error = %err, "UI exited with error");
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
