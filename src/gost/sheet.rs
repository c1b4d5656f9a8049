//! GOST 2.301 drawing sheet formats and usable drawing area.
//!
//! A division scheme is laid out on one standard sheet. The sheet's
//! usable area is the full format rectangle inset by the drawing margins;
//! all layout coordinates are relative to the sheet's top-left corner,
//! y growing downwards, in millimetres.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::geometry::Rect;

/// Standard sheet format per GOST 2.301.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SheetFormat {
    /// A0 — 841 × 1189 mm.
    A0,
    /// A1 — 594 × 841 mm.
    A1,
    /// A2 — 420 × 594 mm.
    A2,
    /// A3 — 297 × 420 mm. The usual choice for division schemes.
    #[default]
    A3,
    /// A4 — 210 × 297 mm.
    A4,
}

impl SheetFormat {
    /// Returns the portrait (width, height) dimensions in millimetres.
    ///
    /// Per GOST 2.301 Table 1.
    #[must_use]
    pub const fn portrait_dimensions(self) -> (f64, f64) {
        match self {
            Self::A0 => (841.0, 1189.0),
            Self::A1 => (594.0, 841.0),
            Self::A2 => (420.0, 594.0),
            Self::A3 => (297.0, 420.0),
            Self::A4 => (210.0, 297.0),
        }
    }

    /// Parses a format from a string.
    ///
    /// Accepts "A0" through "A4" (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "A0" => Some(Self::A0),
            "A1" => Some(Self::A1),
            "A2" => Some(Self::A2),
            "A3" => Some(Self::A3),
            "A4" => Some(Self::A4),
            _ => None,
        }
    }
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A0 => write!(f, "A0"),
            Self::A1 => write!(f, "A1"),
            Self::A2 => write!(f, "A2"),
            Self::A3 => write!(f, "A3"),
            Self::A4 => write!(f, "A4"),
        }
    }
}

/// Sheet orientation.
///
/// Landscape swaps the portrait width/height pair. Division schemes are
/// normally drawn in landscape so the hierarchy has horizontal room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Long side vertical.
    Portrait,
    /// Long side horizontal.
    #[default]
    Landscape,
}

impl Orientation {
    /// Parses an orientation from a string (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "portrait" => Some(Self::Portrait),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

/// Drawing margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Top margin (mm).
    pub top: f64,
    /// Right margin (mm).
    pub right: f64,
    /// Bottom margin (mm).
    pub bottom: f64,
    /// Left margin (mm).
    pub left: f64,
}

impl Margins {
    /// Creates margins with individual sides.
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates equal margins on all sides.
    #[must_use]
    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }
}

impl Default for Margins {
    fn default() -> Self {
        // The automation layer reserves 40 mm on every side for the frame
        // and the title block stamp.
        Self::uniform(40.0)
    }
}

/// A resolved drawing sheet: format, orientation and the usable area
/// left after margins.
///
/// `width`/`height` and `usable` are derived from the format, orientation
/// and margins at construction time and carried along so a renderer never
/// has to repeat the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet format.
    pub format: SheetFormat,
    /// Sheet orientation.
    pub orientation: Orientation,
    /// Overall sheet width (mm) for the chosen orientation.
    pub width: f64,
    /// Overall sheet height (mm) for the chosen orientation.
    pub height: f64,
    /// Usable drawing area after margins.
    pub usable: Rect,
}

impl Sheet {
    /// Creates a sheet with the default 40 mm margins.
    #[must_use]
    pub fn new(format: SheetFormat, orientation: Orientation) -> Self {
        Self::with_margins(format, orientation, Margins::default())
    }

    /// Creates a sheet with explicit margins.
    #[must_use]
    pub fn with_margins(format: SheetFormat, orientation: Orientation, margins: Margins) -> Self {
        let (portrait_width, portrait_height) = format.portrait_dimensions();
        let (width, height) = match orientation {
            Orientation::Portrait => (portrait_width, portrait_height),
            Orientation::Landscape => (portrait_height, portrait_width),
        };
        let usable = Rect::new(
            margins.left,
            margins.top,
            width - margins.left - margins.right,
            height - margins.top - margins.bottom,
        );
        Self {
            format,
            orientation,
            width,
            height,
            usable,
        }
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format, self.orientation)
    }
}
