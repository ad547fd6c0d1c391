//! Drawing surface size tracking.

use seatplan_ui::{Point, Size};

use crate::constants::INITIAL_VIEWPORT;

/// Pixel size of the host container. The drawing surface always matches it
/// exactly; there is no scaling transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::new(INITIAL_VIEWPORT.0, INITIAL_VIEWPORT.1))
    }
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self {
            size: sanitize(size),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Placement point for new seats.
    pub fn center(&self) -> Point {
        self.size.center()
    }

    /// Track a new host size. Returns `true` when the size changed.
    pub fn resize(&mut self, size: Size) -> bool {
        let size = sanitize(size);
        if size == self.size {
            return false;
        }
        log::debug!(
            "Viewport resized {}x{} -> {}x{}",
            self.size.width,
            self.size.height,
            size.width,
            size.height
        );
        self.size = size;
        true
    }
}

/// Round to whole pixels, at least 1x1.
fn sanitize(size: Size) -> Size {
    let clamp = |v: f32| if v.is_finite() { v.round().max(1.0) } else { 1.0 };
    Size::new(clamp(size.width), clamp(size.height))
}
