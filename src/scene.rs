//! Canvas scene: background, seats, labels, and hit-testing.

use seatplan_ui::{Color, Frame, Point, Rectangle, Size, TextureId};

use crate::color_utils::{contrast_text_color, fill_color};
use crate::editing::EditingState;
use crate::model::{Seat, ShapeKind};

/// Texture slot of the floor-plan image.
pub const BACKGROUND_TEXTURE: TextureId = TextureId(0);

/// Surface color behind the floor plan.
pub const CLEAR_COLOR: Color = Color::rgb(0.96, 0.96, 0.96);

/// Outline of the selected seat.
pub const ACCENT_STROKE: Color = Color::rgb(0.15, 0.45, 0.95);
pub const ACCENT_STROKE_WIDTH: f32 = 3.0;

/// Outline of every other seat.
pub const NEUTRAL_STROKE: Color = Color::rgb(0.2, 0.2, 0.2);
pub const NEUTRAL_STROKE_WIDTH: f32 = 1.0;

/// Label font size in pixels.
pub const LABEL_SIZE: f32 = 14.0;

pub const RENAME_INPUT_HEIGHT: f32 = 24.0;
pub const RENAME_INPUT_MIN_WIDTH: f32 = 120.0;

/// Loading state of the floor-plan image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Background {
    /// Load requested, not finished yet.
    #[default]
    Pending,
    /// Image registered with the canvas under [`BACKGROUND_TEXTURE`].
    Loaded { size: Size },
    /// Load failed. Nothing is drawn.
    Failed,
}

impl Background {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Background::Loaded { .. })
    }
}

/// Record one frame of the editor surface.
///
/// Draw order: clear, background stretched over the whole surface when
/// loaded, then every visible seat in list order (shape, outline, label).
pub fn render(size: Size, seats: &[Seat], state: &EditingState, background: Background) -> Frame {
    let mut frame = Frame::new(size);
    frame.clear(CLEAR_COLOR);

    if background.is_loaded() {
        frame.draw_image(BACKGROUND_TEXTURE, Rectangle::from_size(size));
    }

    for seat in seats.iter().filter(|s| s.visible) {
        draw_seat(&mut frame, seat, state.is_selected(&seat.id));
    }

    frame
}

fn draw_seat(frame: &mut Frame, seat: &Seat, selected: bool) {
    let fill = fill_color(&seat.fill);
    let (stroke, stroke_width) = if selected {
        (ACCENT_STROKE, ACCENT_STROKE_WIDTH)
    } else {
        (NEUTRAL_STROKE, NEUTRAL_STROKE_WIDTH)
    };

    match seat.shape {
        ShapeKind::Circle => {
            frame.fill_circle(seat.center(), seat.radius, fill);
            frame.stroke_circle(seat.center(), seat.radius, stroke, stroke_width);
        }
        ShapeKind::Square => {
            let bounds = seat.bounds();
            frame.fill_rect(bounds, fill);
            frame.stroke_rect(bounds, stroke, stroke_width);
        }
    }

    frame.draw_text(
        seat.display_name(),
        seat.center(),
        contrast_text_color(&seat.fill),
        LABEL_SIZE,
    );
}

/// Rename input box: centered on the seat, at least [`RENAME_INPUT_MIN_WIDTH`] wide.
pub fn rename_input_rect(seat: &Seat) -> Rectangle {
    let width = seat.bounds().width.max(RENAME_INPUT_MIN_WIDTH);
    let center = seat.center();
    Rectangle::new(
        center.x - width / 2.0,
        center.y - RENAME_INPUT_HEIGHT / 2.0,
        width,
        RENAME_INPUT_HEIGHT,
    )
}

/// Topmost visible seat under `point`.
///
/// Seats later in the list are drawn on top, so the search runs backwards.
pub fn hit_test(seats: &[Seat], point: Point) -> Option<&Seat> {
    seats
        .iter()
        .rev()
        .filter(|s| s.visible)
        .find(|s| s.contains(point))
}
