//! Structured validation errors for the scheme pipeline.
//!
//! Validation failures are data, not control flow: every check in the
//! pipeline appends to an error list and the caller receives the complete
//! set of problems in one pass. Each error carries the offending component
//! position (or none for request-level problems), a stable machine-readable
//! code, its category, and a self-contained human-readable message.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gost::designation::DesignationError;
use crate::gost::sheet::Sheet;
use crate::layout::geometry::Rect;

/// Broad classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Hierarchy and request shape problems: duplicates, dangling or
    /// cyclic parent references, level mismatches, missing fields.
    Structural,
    /// A designation string not matching the required pattern.
    Format,
    /// A computed or supplied box outside the sheet's usable area, or
    /// with non-positive extent.
    Geometric,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural => write!(f, "structural"),
            Self::Format => write!(f, "format"),
            Self::Geometric => write!(f, "geometric"),
        }
    }
}

/// Machine-readable validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The component list is empty.
    EmptyComponents,
    /// One or more position numbers occur more than once.
    DuplicatePositions,
    /// A position number is zero.
    InvalidPosition,
    /// A quantity is zero.
    InvalidQuantity,
    /// A parent reference points to a position absent from the request.
    DanglingParent,
    /// A supplied level disagrees with the level derived from the parent
    /// chain.
    LevelMismatch,
    /// A component is its own ancestor.
    CycleDetected,
    /// A required title block field is missing.
    TitleBlockField,
    /// A designation does not match the `XXXX.XX.XX.XXX` pattern.
    DesignationFormat,
    /// A box lies outside the sheet's usable area.
    BoxOutOfBounds,
    /// A box has zero or negative width or height.
    NonPositiveExtent,
    /// The tree layout does not fit the chosen sheet format.
    SheetTooSmall,
}

impl ErrorCode {
    /// Returns the category this code belongs to.
    #[must_use]
    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::EmptyComponents
            | Self::DuplicatePositions
            | Self::InvalidPosition
            | Self::InvalidQuantity
            | Self::DanglingParent
            | Self::LevelMismatch
            | Self::CycleDetected
            | Self::TitleBlockField => ErrorCategory::Structural,
            Self::DesignationFormat => ErrorCategory::Format,
            Self::BoxOutOfBounds | Self::NonPositiveExtent | Self::SheetTooSmall => {
                ErrorCategory::Geometric
            }
        }
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Offending component position, or `None` for request-level problems.
    pub position: Option<u32>,
    /// Stable machine-readable code.
    pub code: ErrorCode,
    /// Category derived from the code.
    pub category: ErrorCategory,
    /// Self-contained human-readable description.
    pub message: String,
}

impl ValidationError {
    fn new(position: Option<u32>, code: ErrorCode, message: String) -> Self {
        Self {
            position,
            code,
            category: code.category(),
            message,
        }
    }

    /// The component list is empty.
    #[must_use]
    pub fn empty_components() -> Self {
        Self::new(
            None,
            ErrorCode::EmptyComponents,
            "component list must not be empty".to_string(),
        )
    }

    /// Duplicate position numbers, listed ascending.
    #[must_use]
    pub fn duplicate_positions(positions: &[u32]) -> Self {
        Self::new(
            None,
            ErrorCode::DuplicatePositions,
            format!("duplicate position numbers: {}", join_positions(positions)),
        )
    }

    /// Position number out of range.
    #[must_use]
    pub fn invalid_position(position: u32) -> Self {
        Self::new(
            Some(position),
            ErrorCode::InvalidPosition,
            format!("component {position}: position numbers start at 1"),
        )
    }

    /// Quantity out of range.
    #[must_use]
    pub fn invalid_quantity(position: u32, quantity: u32) -> Self {
        Self::new(
            Some(position),
            ErrorCode::InvalidQuantity,
            format!("component {position}: quantity must be at least 1, got {quantity}"),
        )
    }

    /// Parent reference to a position absent from the request.
    #[must_use]
    pub fn dangling_parent(position: u32, parent: u32) -> Self {
        Self::new(
            Some(position),
            ErrorCode::DanglingParent,
            format!("component {position}: parent position {parent} does not exist"),
        )
    }

    /// Supplied level disagrees with the derived level.
    #[must_use]
    pub fn level_mismatch(position: u32, supplied: u32, derived: u32) -> Self {
        Self::new(
            Some(position),
            ErrorCode::LevelMismatch,
            format!(
                "component {position}: level {supplied} does not match level {derived} derived from the parent chain"
            ),
        )
    }

    /// Cyclic parent references; `positions` lists the cycle in chain
    /// order. Attributed to the first participant.
    #[must_use]
    pub fn cycle(positions: &[u32]) -> Self {
        Self::new(
            positions.first().copied(),
            ErrorCode::CycleDetected,
            format!(
                "cyclic parent references: positions {}",
                join_positions(positions)
            ),
        )
    }

    /// A required title block field is missing.
    #[must_use]
    pub fn title_block_missing(field: &str) -> Self {
        Self::new(
            None,
            ErrorCode::TitleBlockField,
            format!("title block {field} is required"),
        )
    }

    /// A component designation fails the format check.
    #[must_use]
    pub fn designation_format(
        position: u32,
        designation: &str,
        reason: &DesignationError,
    ) -> Self {
        Self::new(
            Some(position),
            ErrorCode::DesignationFormat,
            format!(
                "component {position}: designation '{designation}' does not match XXXX.XX.XX.XXX: {reason}"
            ),
        )
    }

    /// The request's product code fails the format check.
    #[must_use]
    pub fn product_code_format(code: &str, reason: &DesignationError) -> Self {
        Self::new(
            None,
            ErrorCode::DesignationFormat,
            format!("product code '{code}' does not match XXXX.XX.XX.XXX: {reason}"),
        )
    }

    /// The title block designation fails the format check.
    #[must_use]
    pub fn title_block_designation_format(code: &str, reason: &DesignationError) -> Self {
        Self::new(
            None,
            ErrorCode::DesignationFormat,
            format!(
                "title block designation '{code}' does not match XXXX.XX.XX.XXX: {reason}"
            ),
        )
    }

    /// A box lies outside the usable area (linear strategies).
    #[must_use]
    pub fn box_out_of_bounds(position: u32, bounds: &Rect, area: &Rect) -> Self {
        Self::new(
            Some(position),
            ErrorCode::BoxOutOfBounds,
            format!(
                "component {position}: box at ({:.1}, {:.1}) size {:.1} x {:.1} lies outside the usable area ({:.1}, {:.1}) to ({:.1}, {:.1})",
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                area.x,
                area.y,
                area.right(),
                area.bottom()
            ),
        )
    }

    /// A box has non-positive extent.
    #[must_use]
    pub fn non_positive_extent(position: u32, width: f64, height: f64) -> Self {
        Self::new(
            Some(position),
            ErrorCode::NonPositiveExtent,
            format!(
                "component {position}: box extent {width:.1} x {height:.1} must be strictly positive"
            ),
        )
    }

    /// The hierarchy does not fit the sheet under the tree strategy.
    #[must_use]
    pub fn sheet_too_small(position: u32, sheet: &Sheet) -> Self {
        Self::new(
            Some(position),
            ErrorCode::SheetTooSmall,
            format!(
                "component {position}: box does not fit the usable area of {sheet}; a larger sheet format may hold the hierarchy"
            ),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

fn join_positions(positions: &[u32]) -> String {
    positions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
