//! Bill of materials generation.
//!
//! The BOM is a flattened, ordered view of the validated hierarchy:
//! depth-first, each root first, child subtrees in ascending position
//! order. The order is deterministic for a given tree, matching the
//! layout's node order so a renderer can draw the table and the scheme
//! from one traversal.

use serde::{Deserialize, Serialize};

use crate::scheme::hierarchy::Hierarchy;

/// One row of the bill of materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomEntry {
    /// Component position number.
    pub position: u32,
    /// ESKD designation.
    pub designation: String,
    /// Component name.
    pub name: String,
    /// Quantity; per-node as declared, or multiplied down the ancestor
    /// chain under [`QuantityRollup::Multiplied`].
    pub quantity: u32,
    /// Hierarchy depth.
    pub level: u32,
    /// Free-text notes carried over from the component.
    pub notes: Option<String>,
}

/// How quantities are reported in the BOM.
///
/// A child declared with quantity 2 under an assembly of quantity 3 is
/// listed as 2 under [`Declared`](Self::Declared) and as 6 under
/// [`Multiplied`](Self::Multiplied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantityRollup {
    /// Per-node quantities exactly as declared in the request.
    #[default]
    Declared,
    /// Effective quantities: declared quantity times the product of all
    /// ancestor quantities. Saturates instead of overflowing.
    Multiplied,
}

/// Generates the ordered parts listing from a validated hierarchy.
#[derive(Debug, Default)]
pub struct BomGenerator {
    rollup: QuantityRollup,
}

impl BomGenerator {
    /// Creates a generator with the given quantity mode.
    #[must_use]
    pub const fn new(rollup: QuantityRollup) -> Self {
        Self { rollup }
    }

    /// Produces one entry per node, depth-first, parents before children.
    #[must_use]
    pub fn generate(&self, tree: &Hierarchy) -> Vec<BomEntry> {
        let mut entries = Vec::with_capacity(tree.len());
        for &root in tree.roots() {
            self.emit(tree, root, 1, &mut entries);
        }
        entries
    }

    fn emit(&self, tree: &Hierarchy, position: u32, ancestor_factor: u32, out: &mut Vec<BomEntry>) {
        let Some(node) = tree.node(position) else {
            return;
        };
        let quantity = match self.rollup {
            QuantityRollup::Declared => node.component.quantity,
            QuantityRollup::Multiplied => node.component.quantity.saturating_mul(ancestor_factor),
        };
        out.push(BomEntry {
            position: node.component.position,
            designation: node.component.designation.clone(),
            name: node.component.name.clone(),
            quantity,
            level: node.level,
            notes: node.component.notes.clone(),
        });
        for &child in &node.children {
            self.emit(tree, child, quantity, out);
        }
    }
}
