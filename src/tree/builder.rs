//! Level-order array → tree
//!
//! A pending queue hands out parents in breadth-first order; each parent
//! consumes the next two slots (left, right). Absent slots attach nothing
//! and enqueue nothing, so nulls deep in the array never shift later
//! children onto the wrong parent.

use std::collections::VecDeque;

use tracing::{debug, warn};

use super::{NodeId, Tree, TreeNode};
use crate::parse::FlatSlot;

/// Geometry used while building
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Width of the host viewport; the root starts at its center
    pub viewport_width: f64,

    /// Root y coordinate
    pub base_y: f64,

    /// Vertical distance from a level-1 parent to its children
    pub level_gap: f64,

    /// Amount the gap shrinks per parent level
    pub level_shrink: f64,
}

impl BuildOptions {
    /// Defaults for a given viewport width
    pub fn for_viewport(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            ..Self::default()
        }
    }

    /// Provisional y for children of `parent`
    #[inline]
    pub fn child_y(&self, parent: &TreeNode) -> f64 {
        parent.y + self.level_gap - f64::from(parent.level) * self.level_shrink
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            base_y: 100.0,
            level_gap: 100.0,
            level_shrink: 5.0,
        }
    }
}

/// Build a tree from flat slots.
///
/// Returns `None` for an empty array or a missing root. Slots that can no
/// longer be reached (every pending parent already consumed) are dropped.
pub fn build_tree(slots: &[FlatSlot], options: &BuildOptions) -> Option<Tree> {
    let root_value = match slots.first() {
        None => return None,
        Some(None) => {
            warn!(slots = slots.len(), "root slot is null, no tree built");
            return None;
        }
        Some(Some(value)) => *value,
    };

    let mut root = Box::new(TreeNode::new(
        NodeId(0),
        root_value,
        options.viewport_width / 2.0,
        options.base_y,
        1,
    ));
    let mut total_levels = 1;
    let mut cursor = 1usize;

    {
        let mut pending: VecDeque<&mut TreeNode> = VecDeque::new();
        let mut current: &mut TreeNode = root.as_mut();

        while cursor < slots.len() {
            let child_level = current.level + 1;
            let child_y = options.child_y(current);

            if let Some(Some(value)) = slots.get(cursor) {
                current.left = Some(Box::new(TreeNode::new(
                    NodeId(cursor as u32),
                    *value,
                    0.0,
                    child_y,
                    child_level,
                )));
                total_levels = child_level;
            }
            if let Some(Some(value)) = slots.get(cursor + 1) {
                current.right = Some(Box::new(TreeNode::new(
                    NodeId(cursor as u32 + 1),
                    *value,
                    0.0,
                    child_y,
                    child_level,
                )));
                total_levels = child_level;
            }
            cursor += 2;

            let (left, right) = current.children_mut();
            pending.extend(left);
            pending.extend(right);

            match pending.pop_front() {
                Some(next) => current = next,
                None => break,
            }
        }
    }

    let dropped = slots.iter().skip(cursor).filter(|slot| slot.is_some()).count();
    if dropped > 0 {
        warn!(dropped, "values unreachable from the root were ignored");
    }

    debug!(slots = slots.len(), total_levels, "tree built");
    Some(Tree::from_parts(root, total_levels, slots.len() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tree: &Tree) -> Vec<(u32, Option<i64>)> {
        tree.iter().map(|node| (node.level, node.value)).collect()
    }

    #[test]
    fn test_root_geometry() {
        let tree = build_tree(&[Some(1)], &BuildOptions::for_viewport(600.0)).unwrap();
        assert_eq!(tree.root().x, 300.0);
        assert_eq!(tree.root().y, 100.0);
        assert_eq!(tree.root().level, 1);
        assert_eq!(tree.total_levels(), 1);
    }

    #[test]
    fn test_child_heights_shrink_per_level() {
        let slots: Vec<FlatSlot> = (1..=4).map(Some).collect();
        let tree = build_tree(&slots, &BuildOptions::default()).unwrap();
        let left = tree.root().left.as_deref().unwrap();
        let grandchild = left.left.as_deref().unwrap();
        assert_eq!(left.y, 195.0);
        assert_eq!(grandchild.y, 285.0);
    }

    #[test]
    fn test_empty_and_null_root() {
        assert!(build_tree(&[], &BuildOptions::default()).is_none());
        assert!(build_tree(&[None, Some(2)], &BuildOptions::default()).is_none());
    }

    #[test]
    fn test_nulls_do_not_shift_children() {
        // 1 -> (_, 2); 2 -> (_, 4); 4 -> (5, 6); 5 -> (7, _)
        let slots = [Some(1), None, Some(2), None, Some(4), Some(5), Some(6), Some(7)];
        let tree = build_tree(&slots, &BuildOptions::default()).unwrap();

        let root = tree.root();
        assert!(root.left.is_none());
        let two = root.right.as_deref().unwrap();
        assert_eq!(two.value, Some(2));
        assert!(two.left.is_none());
        let four = two.right.as_deref().unwrap();
        assert_eq!(four.left.as_deref().unwrap().value, Some(5));
        assert_eq!(four.right.as_deref().unwrap().value, Some(6));
        let five = four.left.as_deref().unwrap();
        assert_eq!(five.left.as_deref().unwrap().value, Some(7));
        assert_eq!(tree.total_levels(), 5);
    }

    #[test]
    fn test_unreachable_slots_dropped() {
        let slots = [Some(1), None, None, Some(4)];
        let tree = build_tree(&slots, &BuildOptions::default()).unwrap();
        assert_eq!(values(&tree), vec![(1, Some(1))]);
        assert_eq!(tree.id_bound(), 4);
    }

    #[test]
    fn test_ids_follow_slot_index() {
        let slots = [Some(10), Some(20), None, Some(40)];
        let tree = build_tree(&slots, &BuildOptions::default()).unwrap();
        let ids: Vec<u32> = tree.iter().map(|node| node.id.0).collect();
        assert_eq!(ids, vec![0, 1, 3]);
    }
}
