//! RGBA colors with CSS hex conversion.

/// RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse a CSS hex color in `#rrggbb` or `#rgb` form.
    ///
    /// The leading `#` is optional and surrounding whitespace is ignored.
    /// Shorthand digits are doubled (`#fa0` is `#ffaa00`). Anything else
    /// returns `None`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let [r, g, b] = parse_hex_rgb8(hex)?;
        Some(Self::from_rgb8(r, g, b))
    }

    /// Channels as 8-bit values, alpha dropped.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let [r, g, b, _] = self.to_rgba8();
        [r, g, b]
    }

    /// Channels as 8-bit values.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    /// Lowercase `#rrggbb` representation (alpha dropped).
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// CSS `rgba()` representation, used by the browser canvas.
    pub fn to_css(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgba({}, {}, {}, {})", r, g, b, self.a.clamp(0.0, 1.0))
    }
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Decode a hex color string into 8-bit RGB channels.
pub(crate) fn parse_hex_rgb8(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_long_form() {
        assert_eq!(Color::from_hex("#ff8000").map(|c| c.to_rgb8()), Some([255, 128, 0]));
    }

    #[test]
    fn test_from_hex_shorthand_doubles_digits() {
        assert_eq!(Color::from_hex("#fa0").map(|c| c.to_rgb8()), Some([255, 170, 0]));
        assert_eq!(Color::from_hex("#fff"), Color::from_hex("#ffffff"));
    }

    #[test]
    fn test_from_hex_without_hash() {
        assert_eq!(Color::from_hex("000000"), Some(Color::BLACK));
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(Color::from_hex("").is_none());
        assert!(Color::from_hex("#12").is_none());
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#gggggg").is_none());
        assert!(Color::from_hex("red").is_none());
        assert!(Color::from_hex("#ffé").is_none());
    }

    #[test]
    fn test_to_hex_round_trips() {
        let color = Color::from_rgb8(18, 52, 86);
        assert_eq!(color.to_hex(), "#123456");
        assert_eq!(Color::from_hex(&color.to_hex()), Some(color));
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Color::WHITE.to_css(), "rgba(255, 255, 255, 1)");
    }
}
