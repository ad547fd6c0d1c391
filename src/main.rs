//! Render the stored seat plan to a PNG (native builds).
//!
//! Usage: `seatplan-snapshot [OUTPUT.png] [BACKGROUND]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run() {
        eprintln!("seatplan-snapshot: {}", e);
        std::process::exit(1);
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::path::PathBuf;

    use seatplan::constants::INITIAL_VIEWPORT;
    use seatplan::persistence::FileStore;
    use seatplan::platform::ScriptedDialogs;
    use seatplan::{AppConfig, MemoryStore, Message, SeatEditor, init_logging};
    use seatplan_ui::Size;

    const DEFAULT_OUTPUT: &str = "seatplan.png";

    pub fn run() -> Result<(), Box<dyn Error>> {
        let config = AppConfig::load_from_default_path();
        init_logging(config.preferences.log_level);

        let mut args = std::env::args().skip(1);
        let output = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string()));
        let background = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&config.preferences.background_path));

        let files = FileStore::in_data_dir()?;
        log::info!("Reading seats from {}", files.dir().display());
        // Read-only: the editor saves on load, and those writes stay in memory
        let storage = MemoryStore::copy_of(&files, &config.preferences.storage_key)?;

        let (width, height) = INITIAL_VIEWPORT;
        // No one to answer dialogs here; nothing below raises one
        let mut editor = SeatEditor::new(
            &config,
            storage,
            ScriptedDialogs::new(),
            Size::new(width, height),
        );

        let image = match editor.load_background_file(&background) {
            Ok(image) => {
                // Match the surface to the floor plan
                let _ = editor.update(Message::Resized(image.size()));
                Some(image)
            }
            Err(e) => {
                log::warn!("Rendering without background: {}", e);
                None
            }
        };

        let png = editor.snapshot_png(image.as_ref())?;
        std::fs::write(&output, png)?;
        log::info!(
            "Wrote {} seats to {}",
            editor.seats().len(),
            output.display()
        );
        Ok(())
    }
}
