//! Seat data model.

use std::fmt;

use seatplan_ui::{Point, Rectangle};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_FILL, DEFAULT_RADIUS, SQUARE_SIDE_FACTOR};

/// Opaque, unique seat identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeatId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SeatId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a seat is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Circle of `radius`.
    #[default]
    Circle,
    /// Square of side `radius * 2.5`.
    Square,
}

impl ShapeKind {
    /// Get the display name for this shape.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
        }
    }

    /// Parse a name produced by [`ShapeKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|shape| shape.name() == name)
    }

    /// Get all available shapes.
    pub fn all() -> &'static [ShapeKind] {
        &[ShapeKind::Circle, ShapeKind::Square]
    }
}

/// A placeable, nameable, colorable shape on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    /// Fallback display text, fixed at creation.
    pub label: String,
    /// User-chosen name. Blank means unset.
    pub name: String,
    /// Center X in surface coordinates.
    pub x: f32,
    /// Center Y in surface coordinates.
    pub y: f32,
    pub radius: f32,
    /// Hex color, `#rrggbb` or `#rgb`.
    pub fill: String,
    /// Hidden seats stay in the list and in storage but are not drawn.
    pub visible: bool,
    pub shape: ShapeKind,
}

impl Seat {
    /// Create a seat at the defaults' center with a fresh id.
    pub fn new(label: impl Into<String>, defaults: &SeatDefaults) -> Self {
        Self {
            id: SeatId::generate(),
            label: label.into(),
            name: String::new(),
            x: defaults.center.x,
            y: defaults.center.y,
            radius: defaults.radius,
            fill: defaults.fill.clone(),
            visible: true,
            shape: defaults.shape,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Text shown on the canvas and in the panel: the name, or the label
    /// when the name is blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.label
        } else {
            &self.name
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Side length when drawn as a square.
    pub fn square_side(&self) -> f32 {
        self.radius * SQUARE_SIDE_FACTOR
    }

    /// Axis-aligned box enclosing the drawn shape.
    pub fn bounds(&self) -> Rectangle {
        let side = match self.shape {
            ShapeKind::Circle => self.radius * 2.0,
            ShapeKind::Square => self.square_side(),
        };
        Rectangle::centered_square(self.center(), side)
    }

    /// Check if a point is on the drawn shape.
    pub fn contains(&self, point: Point) -> bool {
        match self.shape {
            ShapeKind::Circle => self.center().distance_to(point) <= self.radius,
            ShapeKind::Square => self.bounds().contains(point),
        }
    }

    /// Merge the fields set in `patch`.
    pub fn apply(&mut self, patch: SeatPatch) {
        let SeatPatch {
            name,
            x,
            y,
            radius,
            fill,
            visible,
            shape,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(x) = x {
            self.x = x;
        }
        if let Some(y) = y {
            self.y = y;
        }
        if let Some(radius) = radius {
            self.radius = radius;
        }
        if let Some(fill) = fill {
            self.fill = fill;
        }
        if let Some(visible) = visible {
            self.visible = visible;
        }
        if let Some(shape) = shape {
            self.shape = shape;
        }
    }
}

/// A partial update for a seat. `None` fields are left untouched.
///
/// `id` and `label` are deliberately absent: both are fixed at creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatPatch {
    pub name: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub radius: Option<f32>,
    pub fill: Option<String>,
    pub visible: Option<bool>,
    pub shape: Option<ShapeKind>,
}

impl SeatPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn radius(radius: f32) -> Self {
        Self {
            radius: Some(radius),
            ..Self::default()
        }
    }

    pub fn fill(fill: impl Into<String>) -> Self {
        Self {
            fill: Some(fill.into()),
            ..Self::default()
        }
    }

    pub fn visible(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Self::default()
        }
    }

    pub fn shape(shape: ShapeKind) -> Self {
        Self {
            shape: Some(shape),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Values given to new seats and to fields missing from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatDefaults {
    /// Placement, normally the current viewport center.
    pub center: Point,
    pub radius: f32,
    pub fill: String,
    pub shape: ShapeKind,
}

impl SeatDefaults {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            radius: DEFAULT_RADIUS,
            fill: DEFAULT_FILL.to_string(),
            shape: ShapeKind::default(),
        }
    }

    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self
    }
}
