//! Scenario tests that drive the editor through whole user flows.
//!
//! Unit tests live next to the code they cover; these exercise several
//! modules together through [`SeatEditor::update`](crate::SeatEditor::update).

mod editor_flow_tests;

use seatplan_ui::Size;

use crate::config::AppConfig;
use crate::constants::DEFAULT_STORAGE_KEY;
use crate::editor::SeatEditor;
use crate::message::Message;
use crate::model::SeatId;
use crate::persistence::{KeyValueStore, MemoryStore};
use crate::platform::ScriptedDialogs;

pub(crate) type TestEditor = SeatEditor<MemoryStore, ScriptedDialogs>;

/// Editor over `store` with an 800x600 surface.
pub(crate) fn editor_with<S: KeyValueStore>(store: S) -> SeatEditor<S, ScriptedDialogs> {
    SeatEditor::new(
        &AppConfig::default(),
        store,
        ScriptedDialogs::new(),
        Size::new(800.0, 600.0),
    )
}

/// Editor starting from an empty, already-persisted seat list.
pub(crate) fn empty_editor() -> TestEditor {
    editor_with(MemoryStore::new().with_entry(DEFAULT_STORAGE_KEY, "[]"))
}

/// Add a seat, let the deferred rename open, and commit `name`.
pub(crate) fn add_named<S: KeyValueStore>(
    editor: &mut SeatEditor<S, ScriptedDialogs>,
    name: &str,
) -> SeatId {
    let _ = editor.update(Message::add_seat());
    let _ = editor.update(Message::RenderCompleted);
    let _ = editor.update(Message::draft_changed(name));
    let _ = editor.update(Message::commit_edit());
    editor
        .seats()
        .last()
        .map(|s| s.id.clone())
        .expect("seat was added")
}
