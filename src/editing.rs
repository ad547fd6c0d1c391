//! Selection and rename-editing state.
//!
//! At most one seat is selected and at most one seat is being renamed. The
//! seat being renamed is always the selected one. Committing hands the draft
//! back to the caller, which patches the seat; the state machine itself never
//! touches the seat list.

use crate::model::SeatId;

/// A rename in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editing {
    pub id: SeatId,
    pub draft: String,
}

/// Ask the view to focus the rename input and select its text.
///
/// A new generation is issued on every entry into editing, including
/// re-entry on the same seat, so the view can tell requests apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRequest {
    pub seat: SeatId,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct EditingState {
    selected: Option<SeatId>,
    editing: Option<Editing>,
    /// Seat to start editing once the next frame has been presented.
    pending_edit: Option<SeatId>,
    focus: Option<FocusRequest>,
    generation: u64,
}

impl EditingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SeatId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &SeatId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn editing(&self) -> Option<&Editing> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: &SeatId) -> bool {
        self.editing.as_ref().is_some_and(|e| &e.id == id)
    }

    pub fn pending_edit(&self) -> Option<&SeatId> {
        self.pending_edit.as_ref()
    }

    /// Latest focus request, if editing is active.
    pub fn focus_request(&self) -> Option<&FocusRequest> {
        self.focus.as_ref()
    }

    /// Select a seat. Editing is left alone.
    pub fn select(&mut self, id: SeatId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Select `id` and open its rename input with `draft`.
    pub fn start_editing(&mut self, id: SeatId, draft: impl Into<String>) -> FocusRequest {
        self.generation += 1;
        let request = FocusRequest {
            seat: id.clone(),
            generation: self.generation,
        };

        log::debug!("Editing seat {} (focus generation {})", id, self.generation);
        self.selected = Some(id.clone());
        self.editing = Some(Editing {
            id,
            draft: draft.into(),
        });
        self.focus = Some(request.clone());
        request
    }

    /// Replace the draft text. Ignored when not editing.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        match &mut self.editing {
            Some(editing) => {
                editing.draft = text.into();
                true
            }
            None => false,
        }
    }

    /// Leave editing, returning the seat and the draft to store as its name.
    pub fn commit(&mut self) -> Option<Editing> {
        self.focus = None;
        self.editing.take()
    }

    /// Leave editing and drop the draft.
    pub fn cancel(&mut self) -> Option<SeatId> {
        self.focus = None;
        self.editing.take().map(|e| e.id)
    }

    /// Request an edit once the next frame is on screen.
    pub fn defer_edit(&mut self, id: SeatId) {
        self.pending_edit = Some(id);
    }

    pub fn take_pending_edit(&mut self) -> Option<SeatId> {
        self.pending_edit.take()
    }

    /// Drop every reference to a deleted seat.
    pub fn forget(&mut self, id: &SeatId) {
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        if self.is_editing(id) {
            log::debug!("Discarding draft for deleted seat {}", id);
            self.editing = None;
            self.focus = None;
        }
        if self.pending_edit.as_ref() == Some(id) {
            self.pending_edit = None;
        }
    }
}
