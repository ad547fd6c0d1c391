//! The seat editor: owns all state and applies messages to it.

use seatplan_ui::{Color, Frame, Rectangle, Size};

use crate::config::AppConfig;
use crate::constants::{MAX_RADIUS, MIN_RADIUS};
use crate::editing::{Editing, EditingState};
use crate::gesture::{Gesture, PointerTracker};
use crate::keybindings::{KeyAction, KeyBindings};
use crate::message::{
    BackgroundMessage, EditMessage, Message, PanelMessage, PointerMessage, SeatMessage,
};
use crate::model::{Seat, SeatDefaults, SeatId, SeatPatch, ShapeKind};
use crate::panel::{self, PanelRow, PanelState};
use crate::persistence::{KeyValueStore, SeatRepository};
use crate::platform::Dialogs;
use crate::scene::{self, Background};
use crate::store::SeatStore;
use crate::viewport::Viewport;

/// Alert shown when a selected-seat action runs with nothing selected.
pub const SELECT_FIRST: &str = "Select a seat first.";

/// Prompt text of the recolor dialog.
pub const FILL_PROMPT: &str = "Fill color (hex, e.g. #ffcc00)";

/// Which parts of the view are stale after an update.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Redraw {
    pub scene: bool,
    pub panel: bool,
}

impl Redraw {
    pub const NONE: Redraw = Redraw {
        scene: false,
        panel: false,
    };
    pub const SCENE: Redraw = Redraw {
        scene: true,
        panel: false,
    };
    pub const PANEL: Redraw = Redraw {
        scene: false,
        panel: true,
    };
    pub const ALL: Redraw = Redraw {
        scene: true,
        panel: true,
    };

    pub fn merge(self, other: Redraw) -> Redraw {
        Redraw {
            scene: self.scene || other.scene,
            panel: self.panel || other.panel,
        }
    }
}

/// Placement of the rename input while a rename is in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameOverlay {
    pub seat: SeatId,
    /// Surface coordinates of the input box.
    pub rect: Rectangle,
    pub draft: String,
    /// Changes on every entry into editing; focus and select the input
    /// whenever it differs from the last one applied.
    pub focus_generation: u64,
}

/// Editor state and update loop.
///
/// `S` is where seats are persisted and `D` shows blocking dialogs.
pub struct SeatEditor<S, D> {
    // === Domain state ===
    store: SeatStore<S>,
    editing: EditingState,

    // === View state ===
    viewport: Viewport,
    panel: PanelState,
    background: Background,

    // === Transient input state ===
    pointer: PointerTracker,

    // === Settings and host ===
    keybindings: KeyBindings,
    default_shape: ShapeKind,
    dialogs: D,
}

impl<S: KeyValueStore, D: Dialogs> SeatEditor<S, D> {
    /// Load seats from `storage` (or lay out the defaults) and set up the
    /// editor for a surface of `viewport` pixels.
    pub fn new(config: &AppConfig, storage: S, dialogs: D, viewport: Size) -> Self {
        let viewport = Viewport::new(viewport);
        let default_shape = config.preferences.default_shape;
        let defaults = SeatDefaults::new(viewport.center()).with_shape(default_shape);

        let repository = SeatRepository::new(storage, config.preferences.storage_key.clone());
        let store = SeatStore::open(repository, &defaults, viewport.size());
        log::info!("Seat editor ready with {} seats", store.len());

        Self {
            store,
            editing: EditingState::new(),
            viewport,
            panel: PanelState::new(config.preferences.panel_open),
            background: Background::default(),
            pointer: PointerTracker::new(),
            keybindings: config.keybindings.to_keybindings(),
            default_shape,
            dialogs,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn seats(&self) -> &[Seat] {
        self.store.seats()
    }

    pub fn seat(&self, id: &SeatId) -> Option<&Seat> {
        self.store.get(id)
    }

    pub fn store(&self) -> &SeatStore<S> {
        &self.store
    }

    pub fn editing(&self) -> &EditingState {
        &self.editing
    }

    pub fn selected(&self) -> Option<&Seat> {
        self.editing.selected().and_then(|id| self.store.get(id))
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }

    /// Defaults for a seat created right now.
    pub fn seat_defaults(&self) -> SeatDefaults {
        SeatDefaults::new(self.viewport.center()).with_shape(self.default_shape)
    }

    // ========================================================================
    // View
    // ========================================================================

    /// Record the current scene.
    pub fn frame(&self) -> Frame {
        scene::render(
            self.viewport.size(),
            self.store.seats(),
            &self.editing,
            self.background,
        )
    }

    pub fn panel_rows(&self) -> Vec<PanelRow> {
        panel::rows(self.store.seats(), &self.editing)
    }

    pub fn rename_overlay(&self) -> Option<RenameOverlay> {
        let editing = self.editing.editing()?;
        let seat = self.store.get(&editing.id)?;
        let focus = self.editing.focus_request()?;
        Some(RenameOverlay {
            seat: seat.id.clone(),
            rect: scene::rename_input_rect(seat),
            draft: editing.draft.clone(),
            focus_generation: focus.generation,
        })
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// Apply one message and report what needs redrawing.
    pub fn update(&mut self, message: Message) -> Redraw {
        match message {
            Message::Pointer(msg) => self.handle_pointer(msg),
            Message::Seat(msg) => self.handle_seat(msg),
            Message::Edit(msg) => self.handle_edit(msg),
            Message::Panel(msg) => self.handle_panel(msg),
            Message::Background(msg) => self.handle_background(msg),
            Message::Key {
                key,
                modifiers,
                input_focused,
            } => match self.keybindings.action_for_key(key, modifiers, input_focused) {
                Some(action) => self.handle_key_action(action),
                None => Redraw::NONE,
            },
            Message::Resized(size) => {
                if self.viewport.resize(size) {
                    Redraw::SCENE
                } else {
                    Redraw::NONE
                }
            }
            Message::RenderCompleted => self.run_deferred_edit(),
        }
    }

    fn handle_pointer(&mut self, msg: PointerMessage) -> Redraw {
        match msg {
            PointerMessage::Pressed { position, .. } => {
                match scene::hit_test(self.store.seats(), position) {
                    Some(seat) => {
                        let (id, center) = (seat.id.clone(), seat.center());
                        self.pointer.press(id, center, position);
                    }
                    None => self.pointer.press_empty(),
                }
                Redraw::NONE
            }
            PointerMessage::Moved { position } => match self.pointer.move_to(position) {
                Some(gesture) => self.apply_gesture(gesture),
                None => Redraw::NONE,
            },
            PointerMessage::Released { position, at } => {
                match self.pointer.release(position, at) {
                    Some(gesture) => self.apply_gesture(gesture),
                    None => Redraw::NONE,
                }
            }
            PointerMessage::DoubleClicked { position, at } => {
                let Some(id) = scene::hit_test(self.store.seats(), position).map(|s| s.id.clone())
                else {
                    return Redraw::NONE;
                };
                match self.pointer.host_double_click(id, at) {
                    Some(gesture) => self.apply_gesture(gesture),
                    None => Redraw::NONE,
                }
            }
            PointerMessage::Left => {
                self.pointer.cancel();
                Redraw::NONE
            }
        }
    }

    fn apply_gesture(&mut self, gesture: Gesture) -> Redraw {
        match gesture {
            Gesture::Click(id) => self.select(id),
            Gesture::DoubleClick(id) => self.begin_edit(&id, None),
            // Drop writes the final position again; the second write is a no-op
            // when the pointer has not moved since the last drag event.
            Gesture::Drag { id, center } | Gesture::Drop { id, center } => {
                if self.store.patch(&id, SeatPatch::position(center.x, center.y)) {
                    Redraw::SCENE
                } else {
                    Redraw::NONE
                }
            }
        }
    }

    fn handle_seat(&mut self, msg: SeatMessage) -> Redraw {
        match msg {
            SeatMessage::Add => {
                // An open rename keeps its draft before the new seat takes over
                let _ = self.handle_edit(EditMessage::Commit);
                let seat = self.store.add(&self.seat_defaults());
                log::info!("Added seat {} at ({:.0}, {:.0})", seat.label, seat.x, seat.y);
                self.editing.select(seat.id.clone());
                self.editing.defer_edit(seat.id);
                Redraw::ALL
            }
            SeatMessage::Select(id) => self.select(id),
            SeatMessage::Rename(id) => self.begin_edit(&id, None),
            SeatMessage::Delete(id) => self.confirm_delete(&id),
            SeatMessage::PromptFill(id) => self.prompt_fill(&id),
            SeatMessage::SetFill(id, fill) => self.patch(&id, SeatPatch::fill(fill)),
            SeatMessage::SetRadius(id, radius) => {
                if !radius.is_finite() {
                    log::warn!("Ignoring non-finite radius for seat {}", id);
                    return Redraw::NONE;
                }
                self.patch(&id, SeatPatch::radius(radius.clamp(MIN_RADIUS, MAX_RADIUS)))
            }
            SeatMessage::SetShape(id, shape) => self.patch(&id, SeatPatch::shape(shape)),
            SeatMessage::ToggleVisible(id) => {
                let Some(visible) = self.store.get(&id).map(|s| s.visible) else {
                    return Redraw::NONE;
                };
                self.patch(&id, SeatPatch::visible(!visible))
            }
            SeatMessage::DeleteSelected => match self.selected_id() {
                Some(id) => self.confirm_delete(&id),
                None => self.alert_no_selection(),
            },
            SeatMessage::RenameSelected => match self.selected_id() {
                Some(id) => self.begin_edit(&id, None),
                None => self.alert_no_selection(),
            },
            SeatMessage::RecolorSelected => match self.selected_id() {
                Some(id) => self.prompt_fill(&id),
                None => self.alert_no_selection(),
            },
        }
    }

    fn handle_edit(&mut self, msg: EditMessage) -> Redraw {
        match msg {
            // The input shows its own text; nothing else depends on the draft.
            EditMessage::DraftChanged(text) => {
                self.editing.set_draft(text);
                Redraw::NONE
            }
            EditMessage::Commit => match self.editing.commit() {
                Some(Editing { id, draft }) => {
                    log::debug!("Renaming seat {} to {:?}", id, draft);
                    self.store.patch(&id, SeatPatch::name(draft));
                    Redraw::ALL
                }
                None => Redraw::NONE,
            },
            EditMessage::Cancel => match self.editing.cancel() {
                Some(_) => Redraw::ALL,
                None => Redraw::NONE,
            },
        }
    }

    fn handle_panel(&mut self, msg: PanelMessage) -> Redraw {
        match msg {
            PanelMessage::Toggle => {
                self.panel.toggle();
                Redraw::PANEL
            }
            PanelMessage::Close => {
                if self.panel.close() {
                    Redraw::PANEL
                } else {
                    Redraw::NONE
                }
            }
        }
    }

    fn handle_background(&mut self, msg: BackgroundMessage) -> Redraw {
        match msg {
            BackgroundMessage::Loaded { size } => {
                log::info!("Background loaded ({}x{})", size.width, size.height);
                self.background = Background::Loaded { size };
                Redraw::SCENE
            }
            BackgroundMessage::Failed(reason) => {
                log::warn!("Background unavailable: {}", reason);
                self.background = Background::Failed;
                Redraw::NONE
            }
        }
    }

    fn handle_key_action(&mut self, action: KeyAction) -> Redraw {
        match action {
            KeyAction::TogglePanel => self.handle_panel(PanelMessage::Toggle),
            KeyAction::ClosePanel => self.handle_panel(PanelMessage::Close),
            KeyAction::CommitEdit => self.handle_edit(EditMessage::Commit),
            KeyAction::CancelEdit => self.handle_edit(EditMessage::Cancel),
            KeyAction::DeleteSelected => self.handle_seat(SeatMessage::DeleteSelected),
        }
    }

    // ========================================================================
    // Operations shared by several messages
    // ========================================================================

    fn selected_id(&self) -> Option<SeatId> {
        self.selected().map(|s| s.id.clone())
    }

    fn select(&mut self, id: SeatId) -> Redraw {
        if !self.store.contains(&id) || self.editing.is_selected(&id) {
            return Redraw::NONE;
        }
        self.editing.select(id);
        Redraw::ALL
    }

    /// Open the rename input. `draft` defaults to the seat's current name.
    fn begin_edit(&mut self, id: &SeatId, draft: Option<String>) -> Redraw {
        let Some(seat) = self.store.get(id) else {
            return Redraw::NONE;
        };
        let draft = draft.unwrap_or_else(|| seat.name.clone());
        self.editing.start_editing(id.clone(), draft);
        Redraw::ALL
    }

    fn run_deferred_edit(&mut self) -> Redraw {
        match self.editing.take_pending_edit() {
            Some(id) => self.begin_edit(&id, Some(String::new())),
            None => Redraw::NONE,
        }
    }

    fn patch(&mut self, id: &SeatId, patch: SeatPatch) -> Redraw {
        if self.store.patch(id, patch) {
            Redraw::ALL
        } else {
            Redraw::NONE
        }
    }

    fn confirm_delete(&mut self, id: &SeatId) -> Redraw {
        let Some(seat) = self.store.get(id) else {
            return Redraw::NONE;
        };
        let question = delete_question(seat);
        if !self.dialogs.confirm(&question) {
            log::debug!("Delete of seat {} declined", id);
            return Redraw::NONE;
        }

        self.store.remove(id);
        self.editing.forget(id);
        self.pointer.forget(id);
        Redraw::ALL
    }

    fn prompt_fill(&mut self, id: &SeatId) -> Redraw {
        let Some(current) = self.store.get(id).map(|s| s.fill.clone()) else {
            return Redraw::NONE;
        };
        let Some(answer) = self.dialogs.prompt(FILL_PROMPT, &current) else {
            return Redraw::NONE;
        };

        let answer = answer.trim();
        if answer.is_empty() {
            return Redraw::NONE;
        }
        match normalize_hex(answer) {
            Some(fill) => self.patch(id, SeatPatch::fill(fill)),
            None => {
                log::warn!("Ignoring invalid color {:?} for seat {}", answer, id);
                Redraw::NONE
            }
        }
    }

    fn alert_no_selection(&mut self) -> Redraw {
        self.dialogs.alert(SELECT_FIRST);
        Redraw::NONE
    }
}

/// Confirmation text for deleting `seat`.
pub fn delete_question(seat: &Seat) -> String {
    format!(
        "Delete {} \"{}\" ({})?",
        seat.shape.name(),
        seat.display_name(),
        seat.id
    )
}

/// Accept `#rgb`/`#rrggbb` with or without the `#`; returns it with one.
fn normalize_hex(input: &str) -> Option<String> {
    Color::from_hex(input)?;
    let digits = input.trim_start_matches('#');
    Some(format!("#{}", digits.to_ascii_lowercase()))
}

// ============================================================================
// Native-only helpers
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl<S: KeyValueStore, D: Dialogs> SeatEditor<S, D> {
    /// Decode a floor-plan image from disk and mark the background loaded.
    ///
    /// On failure the background is marked failed and the error returned.
    pub fn load_background_file(
        &mut self,
        path: &std::path::Path,
    ) -> seatplan_ui::Result<seatplan_ui::ImageHandle> {
        let result = std::fs::read(path)
            .map_err(|e| seatplan_ui::RenderError::Backend(format!("{}: {}", path.display(), e)))
            .and_then(|bytes| seatplan_ui::ImageHandle::decode(&bytes));

        let message = match &result {
            Ok(image) => BackgroundMessage::Loaded { size: image.size() },
            Err(e) => BackgroundMessage::Failed(e.to_string()),
        };
        let _ = self.handle_background(message);
        result
    }

    /// Rasterize the current scene to PNG bytes.
    ///
    /// `background` is drawn when the background is marked loaded. Labels
    /// need a system font; without one they are left out.
    pub fn snapshot_png(
        &self,
        background: Option<&seatplan_ui::ImageHandle>,
    ) -> seatplan_ui::Result<Vec<u8>> {
        use seatplan_ui::{Canvas, RasterCanvas};

        let mut canvas = RasterCanvas::new(self.viewport.size())?.with_system_fonts();
        if let Some(image) = background {
            canvas.register_image(scene::BACKGROUND_TEXTURE, image)?;
        }

        canvas.present(&self.frame())?;
        canvas.encode_png()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::platform::{DialogRecord, ScriptedDialogs};
    use seatplan_ui::{KeyCode, Modifiers, Point};
    use web_time::{Duration, Instant};

    type TestEditor = SeatEditor<MemoryStore, ScriptedDialogs>;

    /// Editor with an empty seat list.
    fn editor() -> TestEditor {
        let store = MemoryStore::new().with_entry(crate::constants::DEFAULT_STORAGE_KEY, "[]");
        SeatEditor::new(
            &AppConfig::default(),
            store,
            ScriptedDialogs::new(),
            Size::new(800.0, 600.0),
        )
    }

    fn add(editor: &mut TestEditor) -> SeatId {
        let _ = editor.update(Message::add_seat());
        let _ = editor.update(Message::RenderCompleted);
        let _ = editor.update(Message::commit_edit());
        editor.seats().last().unwrap().id.clone()
    }

    fn key(key: KeyCode, input_focused: bool) -> Message {
        Message::Key {
            key,
            modifiers: Modifiers::default(),
            input_focused,
        }
    }

    #[test]
    fn test_new_without_storage_uses_default_layout() {
        let editor = SeatEditor::new(
            &AppConfig::default(),
            MemoryStore::new(),
            ScriptedDialogs::new(),
            Size::new(800.0, 600.0),
        );
        assert_eq!(editor.seats().len(), 3);
        assert!(editor.editing().selected().is_none());
    }

    #[test]
    fn test_add_selects_and_defers_edit() {
        let mut editor = editor();
        let redraw = editor.update(Message::add_seat());
        assert_eq!(redraw, Redraw::ALL);

        let seat = editor.seats()[0].clone();
        assert_eq!(seat.center(), Point::new(400.0, 300.0));
        assert!(editor.editing().is_selected(&seat.id));
        assert!(editor.editing().editing().is_none());
        assert!(editor.rename_overlay().is_none());

        let _ = editor.update(Message::RenderCompleted);
        let overlay = editor.rename_overlay().unwrap();
        assert_eq!(overlay.seat, seat.id);
        assert_eq!(overlay.draft, "");

        assert_eq!(editor.update(Message::RenderCompleted), Redraw::NONE);
    }

    #[test]
    fn test_add_uses_current_viewport_center() {
        let mut editor = editor();
        let _ = editor.update(Message::Resized(Size::new(1000.0, 200.0)));
        let id = add(&mut editor);
        assert_eq!(editor.seat(&id).unwrap().center(), Point::new(500.0, 100.0));
    }

    #[test]
    fn test_click_selects_and_drag_moves() {
        let mut editor = editor();
        let id = add(&mut editor);
        assert_eq!(editor.update(Message::select(SeatId::from("nobody"))), Redraw::NONE);
        let t0 = Instant::now();

        // Grab 5px right of center and drag
        let _ = editor.update(Message::pressed(Point::new(405.0, 300.0), t0));
        let redraw = editor.update(Message::moved(Point::new(455.0, 320.0)));
        assert_eq!(redraw, Redraw::SCENE);
        assert_eq!(editor.seat(&id).unwrap().center(), Point::new(450.0, 320.0));

        let _ = editor.update(Message::released(Point::new(465.0, 330.0), t0));
        assert_eq!(editor.seat(&id).unwrap().center(), Point::new(460.0, 330.0));

        let stored = editor.store().repository().load(&editor.seat_defaults()).unwrap();
        assert_eq!(stored[0].center(), Point::new(460.0, 330.0));
    }

    #[test]
    fn test_double_click_starts_editing_with_current_name() {
        let mut editor = editor();
        let id = add(&mut editor);
        let _ = editor.update(Message::Seat(SeatMessage::Rename(id.clone())));
        let _ = editor.update(Message::draft_changed("Ann"));
        let _ = editor.update(Message::commit_edit());

        let t0 = Instant::now();
        let p = Point::new(400.0, 300.0);
        let _ = editor.update(Message::pressed(p, t0));
        let _ = editor.update(Message::released(p, t0));
        let _ = editor.update(Message::pressed(p, t0 + Duration::from_millis(150)));
        let _ = editor.update(Message::released(p, t0 + Duration::from_millis(150)));

        let editing = editor.editing().editing().unwrap();
        assert_eq!(editing.id, id);
        assert_eq!(editing.draft, "Ann");
    }

    #[test]
    fn test_reentering_edit_refocuses() {
        let mut editor = editor();
        let id = add(&mut editor);

        let _ = editor.update(Message::rename(id.clone()));
        let first = editor.rename_overlay().unwrap().focus_generation;
        let _ = editor.update(Message::rename(id));
        let second = editor.rename_overlay().unwrap().focus_generation;
        assert_ne!(first, second);
    }

    #[test]
    fn test_cancel_keeps_name() {
        let mut editor = editor();
        let id = add(&mut editor);
        let _ = editor.update(Message::rename(id.clone()));
        let _ = editor.update(Message::draft_changed("Zed"));
        let _ = editor.update(key(KeyCode::Escape, true));

        assert_eq!(editor.seat(&id).unwrap().name, "");
        assert!(editor.editing().editing().is_none());
        assert!(editor.panel().is_open());
    }

    #[test]
    fn test_enter_commits() {
        let mut editor = editor();
        let id = add(&mut editor);
        let _ = editor.update(Message::rename(id.clone()));
        let _ = editor.update(Message::draft_changed("Zed"));
        let _ = editor.update(key(KeyCode::Enter, true));
        assert_eq!(editor.seat(&id).unwrap().name, "Zed");
    }

    #[test]
    fn test_delete_asks_and_clears_state() {
        let mut editor = editor();
        let id = add(&mut editor);
        let _ = editor.update(Message::rename(id.clone()));

        // Declined
        let _ = editor.update(Message::delete(id.clone()));
        assert_eq!(editor.seats().len(), 1);

        editor.dialogs_mut().answer_confirm(true);
        let _ = editor.update(Message::delete(id.clone()));
        assert!(editor.seats().is_empty());
        assert!(editor.editing().selected().is_none());
        assert!(editor.editing().editing().is_none());

        let expected = format!("Delete circle \"1\" ({})?", id);
        assert_eq!(editor.dialogs().shown()[0], DialogRecord::Confirm(expected));
    }

    #[test]
    fn test_selected_actions_alert_without_selection() {
        let mut editor = editor();
        for msg in [
            SeatMessage::DeleteSelected,
            SeatMessage::RenameSelected,
            SeatMessage::RecolorSelected,
        ] {
            assert_eq!(editor.update(Message::Seat(msg)), Redraw::NONE);
        }
        assert_eq!(editor.dialogs().alerts().count(), 3);
        assert!(editor.dialogs().alerts().all(|a| a == SELECT_FIRST));
    }

    #[test]
    fn test_delete_key_targets_selection() {
        let mut editor = editor();
        let id = add(&mut editor);
        editor.dialogs_mut().answer_confirm(true);

        let _ = editor.update(key(KeyCode::Delete, false));
        assert!(editor.seat(&id).is_none());
    }

    #[test]
    fn test_prompt_fill() {
        let mut editor = editor();
        let id = add(&mut editor);

        editor
            .dialogs_mut()
            .answer_prompt(None)
            .answer_prompt(Some("   "))
            .answer_prompt(Some("not a color"))
            .answer_prompt(Some("ABC"));

        for _ in 0..3 {
            let _ = editor.update(Message::Seat(SeatMessage::RecolorSelected));
            assert_eq!(editor.seat(&id).unwrap().fill, "#ffffff");
        }
        let _ = editor.update(Message::Seat(SeatMessage::PromptFill(id.clone())));
        assert_eq!(editor.seat(&id).unwrap().fill, "#abc");

        assert_eq!(
            editor.dialogs().shown()[0],
            DialogRecord::Prompt {
                message: FILL_PROMPT.to_string(),
                default: "#ffffff".to_string(),
            }
        );
    }

    #[test]
    fn test_set_radius_is_clamped() {
        let mut editor = editor();
        let id = add(&mut editor);

        let _ = editor.update(Message::Seat(SeatMessage::SetRadius(id.clone(), 500.0)));
        assert_eq!(editor.seat(&id).unwrap().radius, MAX_RADIUS);
        let _ = editor.update(Message::Seat(SeatMessage::SetRadius(id.clone(), 1.0)));
        assert_eq!(editor.seat(&id).unwrap().radius, MIN_RADIUS);
        let _ = editor.update(Message::Seat(SeatMessage::SetRadius(id.clone(), f32::NAN)));
        assert_eq!(editor.seat(&id).unwrap().radius, MIN_RADIUS);
    }

    #[test]
    fn test_toggle_visible_hides_from_scene_and_hit_test() {
        let mut editor = editor();
        let id = add(&mut editor);
        let _ = editor.update(Message::Seat(SeatMessage::ToggleVisible(id.clone())));

        assert!(!editor.seat(&id).unwrap().visible);
        assert_eq!(editor.frame().texts().count(), 0);
        assert_eq!(editor.panel_rows().len(), 1);

        // Pressing where the seat is no longer grabs anything
        let t0 = Instant::now();
        let _ = editor.update(Message::pressed(Point::new(400.0, 300.0), t0));
        let _ = editor.update(Message::moved(Point::new(450.0, 300.0)));
        assert_eq!(editor.seat(&id).unwrap().x, 400.0);
    }

    #[test]
    fn test_panel_keys() {
        let mut editor = editor();
        assert!(editor.panel().is_open());

        assert_eq!(editor.update(key(KeyCode::P, false)), Redraw::PANEL);
        assert!(!editor.panel().is_open());
        assert_eq!(editor.update(key(KeyCode::P, true)), Redraw::NONE);
        assert!(!editor.panel().is_open());

        let _ = editor.update(key(KeyCode::P, false));
        let _ = editor.update(key(KeyCode::Escape, false));
        assert!(!editor.panel().is_open());
        assert_eq!(editor.update(key(KeyCode::Escape, false)), Redraw::NONE);
    }

    #[test]
    fn test_background_messages() {
        let mut editor = editor();
        assert_eq!(editor.background(), Background::Pending);

        let _ = editor.update(Message::Background(BackgroundMessage::Failed("404".into())));
        assert_eq!(editor.background(), Background::Failed);

        let size = Size::new(10.0, 10.0);
        let redraw = editor.update(Message::Background(BackgroundMessage::Loaded { size }));
        assert_eq!(redraw, Redraw::SCENE);
        assert!(editor.background().is_loaded());
    }

    #[test]
    fn test_delete_question_uses_display_name_and_shape() {
        let mut seat = Seat::new("4", &SeatDefaults::new(Point::zero()));
        seat.shape = ShapeKind::Square;
        seat.name = "Window".to_string();
        assert_eq!(
            delete_question(&seat),
            format!("Delete square \"Window\" ({})?", seat.id)
        );
    }

    #[test]
    fn test_add_keeps_an_open_rename() {
        let mut editor = editor();
        let first = add(&mut editor);
        let _ = editor.update(Message::rename(first.clone()));
        let _ = editor.update(Message::draft_changed("Anna"));

        let _ = editor.update(Message::add_seat());
        let _ = editor.update(Message::RenderCompleted);

        assert_eq!(editor.seat(&first).unwrap().display_name(), "Anna");
        let second = editor.seats()[1].id.clone();
        assert!(editor.editing().is_selected(&second));
        assert_eq!(editor.editing().editing().map(|e| &e.id), Some(&second));
    }

    #[test]
    fn test_redraw_merge() {
        assert_eq!(Redraw::NONE.merge(Redraw::NONE), Redraw::NONE);
        assert_eq!(Redraw::SCENE.merge(Redraw::PANEL), Redraw::ALL);
        assert_eq!(Redraw::PANEL.merge(Redraw::NONE), Redraw::PANEL);
    }

    #[test]
    fn test_normalize_hex() {
        assert_eq!(normalize_hex("#FFAA00").as_deref(), Some("#ffaa00"));
        assert_eq!(normalize_hex("fa0").as_deref(), Some("#fa0"));
        assert_eq!(normalize_hex("#12"), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_snapshot_png_has_signature() {
        let mut editor = editor();
        add(&mut editor);
        let png = editor.snapshot_png(None).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_background_file_failure_marks_failed() {
        let mut editor = editor();
        let dir = tempfile::tempdir().unwrap();
        assert!(editor.load_background_file(&dir.path().join("missing.png")).is_err());
        assert_eq!(editor.background(), Background::Failed);
    }
}
