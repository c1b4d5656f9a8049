//! Division scheme layout engine.
//!
//! Turns a validated hierarchy into positioned boxes and parent-child
//! connectors on a drawing sheet, under one of three strategies:
//!
//! - **Tree**: recursive placement; each parent is centred over the span
//!   of its children, rows descend by a fixed pitch per hierarchy level
//! - **Vertical**: one column in depth-first order, centred horizontally
//! - **Horizontal**: one row in depth-first order, centred vertically
//!
//! After placement every box is checked against the sheet's usable area;
//! violations are returned as accumulated geometric errors, with the tree
//! strategy reporting them as the distinct sheet-too-small kind so a
//! caller can suggest a larger format.

pub mod geometry;

mod linear;
mod tree;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gost::sheet::Sheet;
use crate::scheme::hierarchy::Hierarchy;
use crate::scheme::validation::ValidationError;

pub use geometry::{placement_is_valid, Point, Rect, Segment};

/// Placement strategy for the scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStrategy {
    /// Hierarchical box layout with parents centred over children.
    #[default]
    Tree,
    /// Single column, depth-first order.
    Vertical,
    /// Single row, depth-first order.
    Horizontal,
}

impl LayoutStrategy {
    /// Parses a strategy from a string (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tree" => Some(Self::Tree),
            "vertical" => Some(Self::Vertical),
            "horizontal" => Some(Self::Horizontal),
            _ => None,
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree => write!(f, "tree"),
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// Fixed drawing metrics for component boxes, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Width of every component box.
    pub box_width: f64,
    /// Height of every component box.
    pub box_height: f64,
    /// Gap between sibling boxes and subtrees.
    pub horizontal_spacing: f64,
    /// Gap between stacked boxes in the vertical strategy.
    pub vertical_spacing: f64,
    /// Row pitch per hierarchy level in the tree strategy.
    pub level_spacing: f64,
}

impl LayoutMetrics {
    /// Metrics used by the KOMPAS automation layer.
    pub const DEFAULT: Self = Self {
        box_width: 60.0,
        box_height: 20.0,
        horizontal_spacing: 20.0,
        vertical_spacing: 40.0,
        level_spacing: 80.0,
    };
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A positioned component box with its outgoing connectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    /// Component position number.
    pub position: u32,
    /// Component name, carried for the renderer.
    pub name: String,
    /// ESKD designation, carried for the renderer.
    pub designation: String,
    /// Hierarchy depth.
    pub level: u32,
    /// Bounding box on the sheet.
    pub bounds: Rect,
    /// Connectors to this node's children.
    pub connectors: Vec<Connector>,
}

/// Connector from a parent box to one child box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    /// Position of the child this connector leads to.
    pub child_position: u32,
    /// Line segments, in drawing order.
    pub segments: Vec<Segment>,
}

/// A complete computed layout.
///
/// Nodes are in depth-first order, matching the BOM, so the layout is
/// identical for identical input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeLayout {
    /// The strategy that produced this layout.
    pub strategy: LayoutStrategy,
    /// Positioned boxes in depth-first order.
    pub nodes: Vec<LayoutNode>,
}

/// Computes box and connector placement for a validated hierarchy.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    metrics: LayoutMetrics,
}

impl LayoutEngine {
    /// Creates an engine with the given metrics.
    #[must_use]
    pub const fn new(metrics: LayoutMetrics) -> Self {
        Self { metrics }
    }

    /// Lays out the hierarchy on the sheet under the chosen strategy.
    ///
    /// # Errors
    ///
    /// Returns the accumulated geometric errors when any box falls
    /// outside the sheet's usable area or has non-positive extent.
    pub fn compute(
        &self,
        tree: &Hierarchy,
        sheet: &Sheet,
        strategy: LayoutStrategy,
    ) -> Result<SchemeLayout, Vec<ValidationError>> {
        let nodes = match strategy {
            LayoutStrategy::Tree => tree::layout(tree, sheet, &self.metrics),
            LayoutStrategy::Vertical => linear::vertical(tree, sheet, &self.metrics),
            LayoutStrategy::Horizontal => linear::horizontal(tree, sheet, &self.metrics),
        };
        let errors = validate_bounds(&nodes, sheet, strategy);
        if errors.is_empty() {
            Ok(SchemeLayout { strategy, nodes })
        } else {
            Err(errors)
        }
    }
}

/// Builds the final node list in depth-first order from placed boxes,
/// wiring each parent to its children with the strategy's link shape.
fn assemble(
    tree: &Hierarchy,
    rects: &HashMap<u32, Rect>,
    link: fn(&Rect, &Rect) -> Vec<Segment>,
) -> Vec<LayoutNode> {
    let mut nodes = Vec::with_capacity(tree.len());
    for position in tree.depth_first() {
        let Some(node) = tree.node(position) else {
            continue;
        };
        let Some(&bounds) = rects.get(&position) else {
            continue;
        };
        let connectors = node
            .children
            .iter()
            .filter_map(|&child| {
                rects.get(&child).map(|child_bounds| Connector {
                    child_position: child,
                    segments: link(&bounds, child_bounds),
                })
            })
            .collect();
        nodes.push(LayoutNode {
            position,
            name: node.component.name.clone(),
            designation: node.component.designation.clone(),
            level: node.level,
            bounds,
            connectors,
        });
    }
    nodes
}

fn validate_bounds(
    nodes: &[LayoutNode],
    sheet: &Sheet,
    strategy: LayoutStrategy,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for node in nodes {
        let bounds = &node.bounds;
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            errors.push(ValidationError::non_positive_extent(
                node.position,
                bounds.width,
                bounds.height,
            ));
        } else if !sheet.usable.contains_rect(bounds) {
            let error = if strategy == LayoutStrategy::Tree {
                ValidationError::sheet_too_small(node.position, sheet)
            } else {
                ValidationError::box_out_of_bounds(node.position, bounds, &sheet.usable)
            };
            errors.push(error);
        }
    }
    errors
}
