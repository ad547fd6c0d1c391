//! seatplan - floor-plan seat editor
//!
//! Place, move, rename, recolor, resize and hide labeled seats over a
//! floor-plan image. State lives in a [`SeatEditor`], which applies
//! [`Message`]s and persists the seat list to a [`KeyValueStore`] after every
//! change. The browser front end (WASM builds) wires DOM events to messages
//! and draws the editor's frames to a canvas.

pub mod color_utils;
pub mod config;
pub mod constants;
pub mod editing;
pub mod editor;
pub mod gesture;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod panel;
pub mod persistence;
pub mod platform;
pub mod scene;
pub mod store;
pub mod viewport;

#[cfg(test)]
mod tests;

pub use config::{AppConfig, ConfigError, LogLevel};
pub use editor::{Redraw, RenameOverlay, SeatEditor};
pub use message::Message;
pub use model::{Seat, SeatDefaults, SeatId, SeatPatch, ShapeKind};
pub use persistence::{KeyValueStore, MemoryStore, StorageError};
pub use platform::{Dialogs, Subscription};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

/// Install the logger for this platform at `level`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: LogLevel) {
    let filter = level.to_level_filter();

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::new()
            .filter_level(filter)
            .format_timestamp_millis()
            .try_init();
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Some(level) = filter.to_level() {
            let _ = console_log::init_with_level(level);
        }
    }
}
