//! Global constants for the seat plan editor

/// Storage key holding the persisted seat list.
pub const DEFAULT_STORAGE_KEY: &str = "seatplan-seats";

/// Background image path, relative to the static assets root.
pub const DEFAULT_BACKGROUND_PATH: &str = "assets/floorplan.png";

/// Default seat radius when none is given or stored.
pub const DEFAULT_RADIUS: f32 = 24.0;

/// Smallest radius the size control accepts.
pub const MIN_RADIUS: f32 = 8.0;

/// Largest radius the size control accepts.
pub const MAX_RADIUS: f32 = 96.0;

/// Default seat fill.
pub const DEFAULT_FILL: &str = "#ffffff";

/// Label given to stored records that lack one.
pub const FALLBACK_LABEL: &str = "0";

/// Squares are drawn with side `radius * SQUARE_SIDE_FACTOR`.
pub const SQUARE_SIDE_FACTOR: f32 = 2.5;

/// Perceived luminance above which labels are drawn black.
pub const CONTRAST_THRESHOLD: f32 = 186.0;

/// Spacing between the seats of the initial layout.
pub const DEFAULT_LAYOUT_SPACING: f32 = 80.0;

/// Viewport size used before the host container has been measured.
pub const INITIAL_VIEWPORT: (f32, f32) = (800.0, 600.0);
