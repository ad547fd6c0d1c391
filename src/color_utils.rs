//! Color helpers for seat fills and label contrast.

use seatplan_ui::Color;

use crate::constants::CONTRAST_THRESHOLD;

/// Fill used when a seat's stored color cannot be parsed.
pub const FALLBACK_FILL: Color = Color::WHITE;

/// Perceived luminance of a hex color on the 0-255 scale.
///
/// Uses `0.299*R + 0.587*G + 0.114*B`. Returns `None` for malformed input.
pub fn luminance(hex: &str) -> Option<f32> {
    let [r, g, b] = Color::from_hex(hex)?.to_rgb8();
    Some(0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32)
}

/// Label color that stays readable on top of `fill`.
///
/// Light fills get black text, dark fills white text. Malformed fills
/// fall back to black.
pub fn contrast_text_color(fill: &str) -> Color {
    match luminance(fill) {
        Some(l) if l <= CONTRAST_THRESHOLD => Color::WHITE,
        _ => Color::BLACK,
    }
}

/// Parse a seat fill, degrading to white.
pub fn fill_color(fill: &str) -> Color {
    Color::from_hex(fill).unwrap_or(FALLBACK_FILL)
}
