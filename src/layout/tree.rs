//! Recursive tree placement.
//!
//! Two passes over the hierarchy: a measure pass computes each subtree's
//! width as the greater of one box and the sum of its children's subtree
//! widths plus spacing, then a placement pass assigns each subtree a left
//! edge and centres every parent over the span of its children's boxes.
//! Rows descend by the level pitch; the whole forest is centred in the
//! sheet's usable width.

use std::collections::HashMap;

use crate::gost::sheet::Sheet;
use crate::scheme::hierarchy::Hierarchy;

use super::geometry::{Rect, Segment};
use super::{LayoutMetrics, LayoutNode};

pub(super) fn layout(
    tree: &Hierarchy,
    sheet: &Sheet,
    metrics: &LayoutMetrics,
) -> Vec<LayoutNode> {
    let area = &sheet.usable;

    let mut widths = HashMap::with_capacity(tree.len());
    let mut total = 0.0;
    for (index, &root) in tree.roots().iter().enumerate() {
        if index > 0 {
            total += metrics.horizontal_spacing;
        }
        total += measure(tree, root, metrics, &mut widths);
    }

    let mut rects = HashMap::with_capacity(tree.len());
    let mut left = area.x + (area.width - total) / 2.0;
    for &root in tree.roots() {
        place(tree, root, left, area.y, metrics, &widths, &mut rects);
        left += subtree_width(&widths, root, metrics) + metrics.horizontal_spacing;
    }

    super::assemble(tree, &rects, elbow)
}

/// Computes and caches the width each subtree occupies.
fn measure(
    tree: &Hierarchy,
    position: u32,
    metrics: &LayoutMetrics,
    widths: &mut HashMap<u32, f64>,
) -> f64 {
    let Some(node) = tree.node(position) else {
        return metrics.box_width;
    };
    let mut width = 0.0;
    for (index, &child) in node.children.iter().enumerate() {
        if index > 0 {
            width += metrics.horizontal_spacing;
        }
        width += measure(tree, child, metrics, widths);
    }
    let width = width.max(metrics.box_width);
    widths.insert(position, width);
    width
}

/// Places a subtree whose reserved span starts at `left`, children first
/// so the parent can be centred over their boxes.
fn place(
    tree: &Hierarchy,
    position: u32,
    left: f64,
    top: f64,
    metrics: &LayoutMetrics,
    widths: &HashMap<u32, f64>,
    rects: &mut HashMap<u32, Rect>,
) {
    let Some(node) = tree.node(position) else {
        return;
    };
    let span = subtree_width(widths, position, metrics);
    let y = top + f64::from(node.level) * metrics.level_spacing;

    if node.children.is_empty() {
        let x = left + (span - metrics.box_width) / 2.0;
        rects.insert(position, Rect::new(x, y, metrics.box_width, metrics.box_height));
        return;
    }

    let mut children_span = 0.0;
    for (index, &child) in node.children.iter().enumerate() {
        if index > 0 {
            children_span += metrics.horizontal_spacing;
        }
        children_span += subtree_width(widths, child, metrics);
    }

    let mut child_left = left + (span - children_span) / 2.0;
    for &child in &node.children {
        place(tree, child, child_left, top, metrics, widths, rects);
        child_left += subtree_width(widths, child, metrics) + metrics.horizontal_spacing;
    }

    let first = node.children.first().and_then(|p| rects.get(p));
    let last = node.children.last().and_then(|p| rects.get(p));
    let centre = match (first, last) {
        (Some(first), Some(last)) => (first.centre().x + last.centre().x) / 2.0,
        _ => left + span / 2.0,
    };
    rects.insert(
        position,
        Rect::new(centre - metrics.box_width / 2.0, y, metrics.box_width, metrics.box_height),
    );
}

fn subtree_width(widths: &HashMap<u32, f64>, position: u32, metrics: &LayoutMetrics) -> f64 {
    widths.get(&position).copied().unwrap_or(metrics.box_width)
}

/// Orthogonal connector from the parent's bottom centre to the child's
/// top centre: a single drop when they are aligned, otherwise a
/// three-segment elbow bending at the midpoint between the rows.
fn elbow(parent: &Rect, child: &Rect) -> Vec<Segment> {
    let start = parent.bottom_centre();
    let end = child.top_centre();
    if (start.x - end.x).abs() < f64::EPSILON {
        return vec![Segment::new(start.x, start.y, end.x, end.y)];
    }
    let bend = (start.y + end.y) / 2.0;
    vec![
        Segment::new(start.x, start.y, start.x, bend),
        Segment::new(start.x, bend, end.x, bend),
        Segment::new(end.x, bend, end.x, end.y),
    ]
}
