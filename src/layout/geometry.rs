//! Planar geometry for sheet layout.
//!
//! Coordinates follow the drawing convention of the KOMPAS automation
//! layer: origin at the top-left corner of the sheet, x growing to the
//! right, y growing downwards. All values in millimetres.

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge X (mm).
    pub x: f64,
    /// Top edge Y (mm).
    pub y: f64,
    /// Width (mm).
    pub width: f64,
    /// Height (mm).
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the right edge X coordinate.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottom edge Y coordinate.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the centre point.
    #[must_use]
    pub fn centre(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns the midpoint of the top edge.
    #[must_use]
    pub fn top_centre(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y)
    }

    /// Returns the midpoint of the bottom edge.
    #[must_use]
    pub fn bottom_centre(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.bottom())
    }

    /// Returns `true` when `other` lies entirely inside this rectangle,
    /// edges included.
    #[must_use]
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// A straight line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start X (mm).
    pub x1: f64,
    /// Start Y (mm).
    pub y1: f64,
    /// End X (mm).
    pub x2: f64,
    /// End Y (mm).
    pub y2: f64,
}

impl Segment {
    /// Creates a new segment.
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Checks whether a box may be drawn at the given position inside `area`.
///
/// This is the freeform placement predicate used for ad-hoc shape checks
/// outside the scheme pipeline: it rejects negative coordinates,
/// non-positive extents, and any box reaching past the far edges of the
/// drawable area. It deliberately does not require `x`/`y` to start inside
/// `area` — a caller may draw into the margin region of a sheet, but never
/// off its usable end.
#[must_use]
pub fn placement_is_valid(x: f64, y: f64, width: f64, height: f64, area: &Rect) -> bool {
    x >= 0.0
        && y >= 0.0
        && width > 0.0
        && height > 0.0
        && x + width <= area.right()
        && y + height <= area.bottom()
}
