//! Linear placement: one centred column or row in depth-first order.

use std::collections::HashMap;

use crate::gost::sheet::Sheet;
use crate::scheme::hierarchy::Hierarchy;

use super::geometry::{Rect, Segment};
use super::{LayoutMetrics, LayoutNode};

pub(super) fn vertical(
    tree: &Hierarchy,
    sheet: &Sheet,
    metrics: &LayoutMetrics,
) -> Vec<LayoutNode> {
    let area = &sheet.usable;
    let x = area.x + (area.width - metrics.box_width) / 2.0;

    let mut rects = HashMap::with_capacity(tree.len());
    let mut y = area.y;
    for position in tree.depth_first() {
        rects.insert(position, Rect::new(x, y, metrics.box_width, metrics.box_height));
        y += metrics.box_height + metrics.vertical_spacing;
    }

    super::assemble(tree, &rects, straight)
}

pub(super) fn horizontal(
    tree: &Hierarchy,
    sheet: &Sheet,
    metrics: &LayoutMetrics,
) -> Vec<LayoutNode> {
    let area = &sheet.usable;
    let y = area.y + (area.height - metrics.box_height) / 2.0;

    let mut rects = HashMap::with_capacity(tree.len());
    let mut x = area.x;
    for position in tree.depth_first() {
        rects.insert(position, Rect::new(x, y, metrics.box_width, metrics.box_height));
        x += metrics.box_width + metrics.horizontal_spacing;
    }

    super::assemble(tree, &rects, straight)
}

/// Straight centre-to-centre connector; the renderer draws it under the
/// boxes so the covered middle portion does not matter.
fn straight(parent: &Rect, child: &Rect) -> Vec<Segment> {
    let from = parent.centre();
    let to = child.centre();
    vec![Segment::new(from.x, from.y, to.x, to.y)]
}
