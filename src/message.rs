//! Application message types for the seat plan editor.
//!
//! Every user gesture and host notification is turned into a [`Message`] and
//! fed to [`SeatEditor::update`](crate::SeatEditor::update), which is the only
//! place state changes.

use seatplan_ui::{Event, KeyCode, Modifiers, MouseButton, Point, Size};
use web_time::Instant;

use crate::model::{SeatId, ShapeKind};

// ============================================================================
// Hierarchical Message System
// ============================================================================

/// Pointer activity on the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerMessage {
    Pressed { position: Point, at: Instant },
    Moved { position: Point },
    Released { position: Point, at: Instant },
    /// Double-click reported by the host.
    DoubleClicked { position: Point, at: Instant },
    /// Pointer left the surface.
    Left,
}

/// Seat actions from the side panel and toolbar.
#[derive(Debug, Clone, PartialEq)]
pub enum SeatMessage {
    /// Create a seat at the viewport center and prompt for its name
    Add,
    /// Row clicked
    Select(SeatId),
    /// Open the rename input for a seat
    Rename(SeatId),
    /// Ask for confirmation, then delete
    Delete(SeatId),
    /// Ask for a hex color through a prompt
    PromptFill(SeatId),
    /// Color picker changed
    SetFill(SeatId, String),
    /// Size slider changed; clamped to the allowed range
    SetRadius(SeatId, f32),
    SetShape(SeatId, ShapeKind),
    ToggleVisible(SeatId),
    DeleteSelected,
    RenameSelected,
    RecolorSelected,
}

/// Rename input events.
#[derive(Debug, Clone, PartialEq)]
pub enum EditMessage {
    DraftChanged(String),
    /// Blur or Enter
    Commit,
    /// Escape
    Cancel,
}

/// Side panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMessage {
    Toggle,
    Close,
}

/// Floor-plan image loading outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundMessage {
    Loaded { size: Size },
    Failed(String),
}

/// Top-level message enum that delegates to sub-message types.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Pointer(PointerMessage),
    Seat(SeatMessage),
    Edit(EditMessage),
    Panel(PanelMessage),
    Background(BackgroundMessage),
    /// Key pressed. `input_focused` is true while a text input has focus.
    Key {
        key: KeyCode,
        modifiers: Modifiers,
        input_focused: bool,
    },
    /// Host container resized
    Resized(Size),
    /// A frame has been presented; deferred work may run now
    RenderCompleted,
}

// ============================================================================
// Convenience constructors for common messages
// ============================================================================

impl Message {
    pub fn add_seat() -> Self {
        Message::Seat(SeatMessage::Add)
    }

    pub fn select(id: SeatId) -> Self {
        Message::Seat(SeatMessage::Select(id))
    }

    pub fn rename(id: SeatId) -> Self {
        Message::Seat(SeatMessage::Rename(id))
    }

    pub fn delete(id: SeatId) -> Self {
        Message::Seat(SeatMessage::Delete(id))
    }

    pub fn draft_changed(text: impl Into<String>) -> Self {
        Message::Edit(EditMessage::DraftChanged(text.into()))
    }

    pub fn commit_edit() -> Self {
        Message::Edit(EditMessage::Commit)
    }

    pub fn cancel_edit() -> Self {
        Message::Edit(EditMessage::Cancel)
    }

    pub fn toggle_panel() -> Self {
        Message::Panel(PanelMessage::Toggle)
    }

    pub fn pressed(position: Point, at: Instant) -> Self {
        Message::Pointer(PointerMessage::Pressed { position, at })
    }

    pub fn moved(position: Point) -> Self {
        Message::Pointer(PointerMessage::Moved { position })
    }

    pub fn released(position: Point, at: Instant) -> Self {
        Message::Pointer(PointerMessage::Released { position, at })
    }

    /// Translate a surface input event.
    ///
    /// Only the primary mouse button is used. `input_focused` tells whether a
    /// text input currently has keyboard focus.
    pub fn from_event(event: Event, at: Instant, input_focused: bool) -> Option<Self> {
        let message = match event {
            Event::MousePressed {
                button: MouseButton::Left,
                position,
            } => Message::pressed(position, at),
            Event::MouseReleased {
                button: MouseButton::Left,
                position,
            } => Message::released(position, at),
            Event::MousePressed { .. } | Event::MouseReleased { .. } => return None,
            Event::MouseMoved { position } => Message::moved(position),
            Event::DoubleClicked { position } => {
                Message::Pointer(PointerMessage::DoubleClicked { position, at })
            }
            Event::KeyPressed { key, modifiers } => Message::Key {
                key,
                modifiers,
                input_focused,
            },
            Event::Resized { size } => Message::Resized(size),
        };
        Some(message)
    }
}
