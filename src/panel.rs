//! Side panel view model.
//!
//! The panel lists every seat (hidden ones included) with its controls.
//! This module only derives what the panel shows; the browser front end
//! turns the rows into markup.

use crate::editing::EditingState;
use crate::message::Message;
use crate::model::{Seat, SeatId, ShapeKind};

/// Collapsible panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    open: bool,
}

impl PanelState {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        log::debug!("Side panel {}", if self.open { "opened" } else { "closed" });
    }

    /// Close the panel. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(true)
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub id: SeatId,
    pub label: String,
    /// Name, or label when the name is blank.
    pub display_name: String,
    pub fill: String,
    pub radius: f32,
    pub visible: bool,
    pub shape: ShapeKind,
    pub selected: bool,
    /// Rename in progress for this seat.
    pub editing: bool,
}

/// Rows in seat list order.
pub fn rows(seats: &[Seat], state: &EditingState) -> Vec<PanelRow> {
    seats
        .iter()
        .map(|seat| PanelRow {
            id: seat.id.clone(),
            label: seat.label.clone(),
            display_name: seat.display_name().to_string(),
            fill: seat.fill.clone(),
            radius: seat.radius,
            visible: seat.visible,
            shape: seat.shape,
            selected: state.is_selected(&seat.id),
            editing: state.is_editing(&seat.id),
        })
        .collect()
}

/// How the host saw a panel control being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTrigger {
    /// Mouse button pressed on the control (DOM button index).
    Press { button: i16 },
    /// `click` event; `detail` is the click count, 0 for keyboard activation.
    Click { detail: i32 },
}

impl PanelTrigger {
    /// Messages to run for a control's `action`.
    ///
    /// A primary press commits any open rename, then acts. Mouse clicks were
    /// already handled on press and do nothing; keyboard clicks act.
    pub fn messages(self, action: Message) -> Vec<Message> {
        match self {
            PanelTrigger::Press { button: 0 } => vec![Message::commit_edit(), action],
            PanelTrigger::Click { detail: 0 } => vec![action],
            PanelTrigger::Press { .. } | PanelTrigger::Click { .. } => Vec::new(),
        }
    }
}
