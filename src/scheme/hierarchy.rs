//! Hierarchy construction and structural validation.
//!
//! A request carries the product decomposition flattened: every component
//! names its parent by position. [`HierarchyBuilder`] rebuilds the tree as
//! an arena keyed by position, running every structural check in one pass
//! and accumulating the failures instead of stopping at the first:
//!
//! 1. position and quantity range checks
//! 2. duplicate position numbers (one error listing every duplicate)
//! 3. dangling parent references
//! 4. cyclic parent references (each distinct cycle reported once,
//!    naming all participants)
//! 5. supplied levels against levels derived from the parent chain
//!
//! Only a fully sound list yields a [`Hierarchy`]; on any error the whole
//! accumulated list is returned and no partial tree escapes.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::scheme::component::Component;
use crate::scheme::validation::ValidationError;

/// A node of the validated hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    /// The component this node was built from.
    pub component: Component,
    /// Depth derived from the parent chain (roots are 0).
    pub level: u32,
    /// Child positions in ascending order.
    pub children: Vec<u32>,
}

/// A validated, cycle-free component hierarchy.
///
/// Nodes live in an insertion-ordered arena keyed by position; child
/// links are positions, not references, so traversal never chases
/// pointers. The hierarchy is a forest: normally single-rooted, but
/// multiple roots are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    nodes: IndexMap<u32, HierarchyNode>,
    roots: Vec<u32>,
}

impl Hierarchy {
    /// Returns the node at `position`, if present.
    #[must_use]
    pub fn node(&self, position: u32) -> Option<&HierarchyNode> {
        self.nodes.get(&position)
    }

    /// Returns the root positions in ascending order.
    #[must_use]
    pub fn roots(&self) -> &[u32] {
        &self.roots
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the hierarchy holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns every position in depth-first order: each root first,
    /// then its child subtrees in ascending position order.
    #[must_use]
    pub fn depth_first(&self) -> Vec<u32> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<u32> = self.roots.iter().rev().copied().collect();
        while let Some(position) = stack.pop() {
            order.push(position);
            if let Some(node) = self.nodes.get(&position) {
                stack.extend(node.children.iter().rev());
            }
        }
        order
    }
}

/// What a level-derivation walk ran into at its far end.
enum ChainEnd {
    /// The chain reached a root.
    Root,
    /// The chain reached a node whose level is already known
    /// (`None` = known to be underivable).
    Known(Option<u32>),
    /// The chain hit a cycle or a dangling reference.
    Broken,
}

/// Builds a validated [`Hierarchy`] from a flat component list.
#[derive(Debug, Default)]
pub struct HierarchyBuilder;

impl HierarchyBuilder {
    /// Creates a new builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates the component list and assembles the hierarchy.
    ///
    /// All checks run; errors accumulate rather than short-circuiting.
    /// An empty list yields an empty hierarchy.
    ///
    /// # Errors
    ///
    /// Returns every structural problem found. No tree is returned if
    /// any check failed.
    pub fn build(&self, components: &[Component]) -> Result<Hierarchy, Vec<ValidationError>> {
        let mut errors = Vec::new();

        for component in components {
            if component.position == 0 {
                errors.push(ValidationError::invalid_position(component.position));
            }
            if component.quantity == 0 {
                errors.push(ValidationError::invalid_quantity(
                    component.position,
                    component.quantity,
                ));
            }
        }

        let mut counts: IndexMap<u32, u32> = IndexMap::new();
        for component in components {
            *counts.entry(component.position).or_insert(0) += 1;
        }
        let mut duplicates: Vec<u32> = counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(position, _)| *position)
            .collect();
        if !duplicates.is_empty() {
            duplicates.sort_unstable();
            errors.push(ValidationError::duplicate_positions(&duplicates));
        }

        // Remaining checks run against the first occurrence of each
        // position so the caller still sees reference and cycle problems
        // alongside a duplicate report.
        let mut index: IndexMap<u32, &Component> = IndexMap::with_capacity(components.len());
        for component in components {
            index.entry(component.position).or_insert(component);
        }

        for component in index.values() {
            if let Some(parent) = component.parent_position {
                if !index.contains_key(&parent) {
                    errors.push(ValidationError::dangling_parent(component.position, parent));
                }
            }
        }

        Self::detect_cycles(&index, &mut errors);

        let levels = Self::derive_levels(&index);
        for component in index.values() {
            if let Some(supplied) = component.level {
                // Underivable levels (behind a cycle or dangling parent)
                // skip the check; the structural error already covers them.
                if let Some(derived) = levels.get(&component.position).copied().flatten() {
                    if supplied != derived {
                        errors.push(ValidationError::level_mismatch(
                            component.position,
                            supplied,
                            derived,
                        ));
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let mut nodes: IndexMap<u32, HierarchyNode> = IndexMap::with_capacity(index.len());
        for component in index.values() {
            let level = levels
                .get(&component.position)
                .copied()
                .flatten()
                .unwrap_or(0);
            nodes.insert(
                component.position,
                HierarchyNode {
                    component: (*component).clone(),
                    level,
                    children: Vec::new(),
                },
            );
        }
        for component in index.values() {
            if let Some(parent) = component.parent_position {
                if let Some(node) = nodes.get_mut(&parent) {
                    node.children.push(component.position);
                }
            }
        }
        for node in nodes.values_mut() {
            node.children.sort_unstable();
        }
        let mut roots: Vec<u32> = nodes
            .values()
            .filter(|node| node.component.is_root())
            .map(|node| node.component.position)
            .collect();
        roots.sort_unstable();

        Ok(Hierarchy { nodes, roots })
    }

    /// Walks every component's ancestor chain with a per-walk visited
    /// sequence. A revisited position closes a cycle; the participants
    /// are the chain slice from its first occurrence, so nodes that only
    /// lead into the cycle are excluded. Cycles found again from another
    /// starting node are deduplicated by participant set.
    fn detect_cycles(index: &IndexMap<u32, &Component>, errors: &mut Vec<ValidationError>) {
        let mut reported: Vec<Vec<u32>> = Vec::new();

        for &start in index.keys() {
            let mut visited: Vec<u32> = Vec::new();
            let mut current = start;
            loop {
                if let Some(entry) = visited.iter().position(|&p| p == current) {
                    let cycle: Vec<u32> = visited[entry..].to_vec();
                    let mut key = cycle.clone();
                    key.sort_unstable();
                    if !reported.contains(&key) {
                        reported.push(key);
                        errors.push(ValidationError::cycle(&cycle));
                    }
                    break;
                }
                visited.push(current);
                match index.get(&current).and_then(|c| c.parent_position) {
                    Some(parent) if index.contains_key(&parent) => current = parent,
                    // Root reached, or a dangling reference already
                    // reported by the reference check.
                    _ => break,
                }
            }
        }
    }

    /// Derives the level of every position from its parent chain.
    ///
    /// `Some(level)` when the chain reaches a root; `None` when the
    /// position sits on or behind a cycle or a dangling reference.
    fn derive_levels(index: &IndexMap<u32, &Component>) -> HashMap<u32, Option<u32>> {
        let mut levels: HashMap<u32, Option<u32>> = HashMap::with_capacity(index.len());

        for &start in index.keys() {
            if levels.contains_key(&start) {
                continue;
            }

            let mut path: Vec<u32> = Vec::new();
            let mut current = start;
            let end = loop {
                if let Some(known) = levels.get(&current) {
                    break ChainEnd::Known(*known);
                }
                if path.contains(&current) {
                    break ChainEnd::Broken;
                }
                path.push(current);
                match index.get(&current).and_then(|c| c.parent_position) {
                    None => break ChainEnd::Root,
                    Some(parent) if index.contains_key(&parent) => current = parent,
                    Some(_) => break ChainEnd::Broken,
                }
            };

            match end {
                ChainEnd::Root => {
                    let mut level = 0u32;
                    for &position in path.iter().rev() {
                        levels.insert(position, Some(level));
                        level += 1;
                    }
                }
                ChainEnd::Known(Some(base)) => {
                    let mut level = base + 1;
                    for &position in path.iter().rev() {
                        levels.insert(position, Some(level));
                        level += 1;
                    }
                }
                ChainEnd::Known(None) | ChainEnd::Broken => {
                    for &position in &path {
                        levels.insert(position, None);
                    }
                }
            }
        }

        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::validation::ErrorCode;

    fn chain_of_three() -> Vec<Component> {
        vec![
            Component::root(1, "Редуктор", "1234.00.00.000"),
            Component::child(2, "Корпус", "1234.01.00.000", 1),
            Component::child(3, "Крышка", "1234.01.01.000", 2),
        ]
    }

    #[test]
    fn builds_chain_with_derived_levels() {
        let tree = HierarchyBuilder::new().build(&chain_of_three()).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.roots(), &[1]);
        assert_eq!(tree.node(1).unwrap().level, 0);
        assert_eq!(tree.node(2).unwrap().level, 1);
        assert_eq!(tree.node(3).unwrap().level, 2);
    }

    #[test]
    fn accepts_matching_supplied_levels() {
        let mut components = chain_of_three();
        components[0].level = Some(0);
        components[1].level = Some(1);
        components[2].level = Some(2);
        assert!(HierarchyBuilder::new().build(&components).is_ok());
    }

    #[test]
    fn rejects_mismatched_supplied_level() {
        let mut components = chain_of_three();
        components[2].level = Some(1);
        let errors = HierarchyBuilder::new().build(&components).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::LevelMismatch);
        assert_eq!(errors[0].position, Some(3));
        assert!(errors[0].message.contains("level 1"));
        assert!(errors[0].message.contains("level 2"));
    }

    #[test]
    fn duplicate_positions_reported_once_listing_all() {
        let mut components = chain_of_three();
        components.push(Component::child(2, "Вал", "1234.02.00.000", 1));
        components.push(Component::child(3, "Втулка", "1234.02.01.000", 1));
        let errors = HierarchyBuilder::new().build(&components).unwrap_err();
        let duplicates: Vec<_> = errors
            .iter()
            .filter(|e| e.code == ErrorCode::DuplicatePositions)
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert!(duplicates[0].message.contains("2, 3"));
    }

    #[test]
    fn dangling_parent_reported_per_component() {
        let components = vec![
            Component::root(1, "Редуктор", "1234.00.00.000"),
            Component::child(2, "Корпус", "1234.01.00.000", 9),
        ];
        let errors = HierarchyBuilder::new().build(&components).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::DanglingParent);
        assert_eq!(errors[0].position, Some(2));
    }

    #[test]
    fn cycle_of_two_named_once() {
        let mut a = Component::root(1, "А", "1234.01.00.000");
        a.parent_position = Some(2);
        let mut b = Component::root(2, "Б", "1234.02.00.000");
        b.parent_position = Some(1);
        let errors = HierarchyBuilder::new().build(&[a, b]).unwrap_err();
        let cycles: Vec<_> = errors
            .iter()
            .filter(|e| e.code == ErrorCode::CycleDetected)
            .collect();
        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].message.contains('1'));
        assert!(cycles[0].message.contains('2'));
    }

    #[test]
    fn cycle_of_three_names_all_participants() {
        let mut a = Component::root(1, "А", "1234.01.00.000");
        a.parent_position = Some(3);
        let mut b = Component::root(2, "Б", "1234.02.00.000");
        b.parent_position = Some(1);
        let mut c = Component::root(3, "В", "1234.03.00.000");
        c.parent_position = Some(2);

        // Whichever declaration order, exactly one cycle error naming all
        // three participants.
        for order in [[0usize, 1, 2], [2, 0, 1], [1, 2, 0]] {
            let all = [a.clone(), b.clone(), c.clone()];
            let components: Vec<Component> = order.iter().map(|&i| all[i].clone()).collect();
            let errors = HierarchyBuilder::new().build(&components).unwrap_err();
            let cycles: Vec<_> = errors
                .iter()
                .filter(|e| e.code == ErrorCode::CycleDetected)
                .collect();
            assert_eq!(cycles.len(), 1);
            for position in ["1", "2", "3"] {
                assert!(cycles[0].message.contains(position));
            }
        }
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let mut component = Component::root(5, "Вал", "1234.05.00.000");
        component.parent_position = Some(5);
        let errors = HierarchyBuilder::new().build(&[component]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::CycleDetected);
        assert_eq!(errors[0].position, Some(5));
    }

    #[test]
    fn tail_into_cycle_is_not_a_participant() {
        let mut a = Component::root(1, "А", "1234.01.00.000");
        a.parent_position = Some(2);
        let mut b = Component::root(2, "Б", "1234.02.00.000");
        b.parent_position = Some(3);
        let mut c = Component::root(3, "В", "1234.03.00.000");
        c.parent_position = Some(2);
        // 1 leads into the 2<->3 cycle but is not part of it.
        let errors = HierarchyBuilder::new().build(&[a, b, c]).unwrap_err();
        let cycles: Vec<_> = errors
            .iter()
            .filter(|e| e.code == ErrorCode::CycleDetected)
            .collect();
        assert_eq!(cycles.len(), 1);
        assert!(!cycles[0].message.contains('1'));
    }

    #[test]
    fn level_check_skipped_behind_cycle() {
        let mut a = Component::root(1, "А", "1234.01.00.000");
        a.parent_position = Some(2);
        a.level = Some(7); // Underivable, must not produce a mismatch.
        let mut b = Component::root(2, "Б", "1234.02.00.000");
        b.parent_position = Some(1);
        let errors = HierarchyBuilder::new().build(&[a, b]).unwrap_err();
        assert!(errors.iter().all(|e| e.code != ErrorCode::LevelMismatch));
    }

    #[test]
    fn children_ordered_by_position() {
        let components = vec![
            Component::root(1, "Редуктор", "1234.00.00.000"),
            Component::child(5, "Вал", "1234.02.00.000", 1),
            Component::child(3, "Корпус", "1234.01.00.000", 1),
            Component::child(4, "Крышка", "1234.03.00.000", 1),
        ];
        let tree = HierarchyBuilder::new().build(&components).unwrap();
        assert_eq!(tree.node(1).unwrap().children, vec![3, 4, 5]);
    }

    #[test]
    fn depth_first_order_is_root_first() {
        let components = vec![
            Component::root(1, "Редуктор", "1234.00.00.000"),
            Component::child(2, "Корпус", "1234.01.00.000", 1),
            Component::child(3, "Крышка", "1234.01.01.000", 2),
            Component::child(4, "Вал", "1234.02.00.000", 1),
        ];
        let tree = HierarchyBuilder::new().build(&components).unwrap();
        assert_eq!(tree.depth_first(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn forest_with_two_roots_builds() {
        let components = vec![
            Component::root(1, "Редуктор", "1234.00.00.000"),
            Component::root(2, "Привод", "5678.00.00.000"),
            Component::child(3, "Корпус", "1234.01.00.000", 1),
        ];
        let tree = HierarchyBuilder::new().build(&components).unwrap();
        assert_eq!(tree.roots(), &[1, 2]);
        assert_eq!(tree.depth_first(), vec![1, 3, 2]);
    }

    #[test]
    fn empty_input_builds_empty_hierarchy() {
        let tree = HierarchyBuilder::new().build(&[]).unwrap();
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
    }

    #[test]
    fn position_zero_and_quantity_zero_are_errors() {
        let mut component = Component::root(0, "Вал", "1234.05.00.000");
        component.quantity = 0;
        let errors = HierarchyBuilder::new().build(&[component]).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, ErrorCode::InvalidPosition);
        assert_eq!(errors[1].code, ErrorCode::InvalidQuantity);
    }

    #[test]
    fn errors_accumulate_across_checks() {
        let mut a = Component::root(1, "А", "1234.01.00.000");
        a.quantity = 0;
        let b = Component::child(2, "Б", "1234.02.00.000", 9);
        let mut c = Component::root(3, "В", "1234.03.00.000");
        c.parent_position = Some(3);
        let errors = HierarchyBuilder::new().build(&[a, b, c]).unwrap_err();
        let codes: Vec<ErrorCode> = errors.iter().map(|e| e.code).collect();
        assert!(codes.contains(&ErrorCode::InvalidQuantity));
        assert!(codes.contains(&ErrorCode::DanglingParent));
        assert!(codes.contains(&ErrorCode::CycleDetected));
    }
}
