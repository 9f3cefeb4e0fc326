//! Placeholder padding and pruning
//!
//! `pad` fills every missing child so the tree becomes a complete grid one
//! level below `total_levels`; `prune` detaches those placeholders again.
//!
//! The grid holds `2^(total_levels + 1) - 1` nodes. [`crate::layout::layout`]
//! computes the same positions from grid indices without materializing it,
//! so these passes are only needed when a caller wants the placeholders.

use std::collections::VecDeque;

use tracing::debug;

use super::{NodeId, Tree, TreeNode};

/// Fill missing children with placeholders, returning how many were added.
///
/// Recursion stops at nodes whose level exceeds `total_levels`, so nodes on
/// the deepest real level still get a placeholder pair one level below.
pub fn pad(tree: &mut Tree) -> usize {
    let total_levels = tree.total_levels;
    let mut next_id = tree.next_id;
    let mut added = 0;

    let mut stack: Vec<&mut TreeNode> = vec![tree.root.as_mut()];
    while let Some(node) = stack.pop() {
        if node.level > total_levels {
            continue;
        }

        let child_level = node.level + 1;
        for slot in [&mut node.left, &mut node.right] {
            if slot.is_none() {
                *slot = Some(Box::new(TreeNode::placeholder(NodeId(next_id), child_level)));
                next_id += 1;
                added += 1;
            }
        }

        let (left, right) = node.children_mut();
        stack.extend(right);
        stack.extend(left);
    }

    tree.next_id = next_id;
    debug!(added, total_levels, "padded tree");
    added
}

/// Detach every placeholder child, returning how many nodes were removed.
pub fn prune(tree: &mut Tree) -> usize {
    let mut removed = 0;

    let mut queue: VecDeque<&mut TreeNode> = VecDeque::from([tree.root.as_mut()]);
    while let Some(node) = queue.pop_front() {
        for slot in [&mut node.left, &mut node.right] {
            if slot.as_deref().is_some_and(TreeNode::is_placeholder) {
                if let Some(child) = slot.take() {
                    removed += child.subtree_len();
                }
            }
        }

        let (left, right) = node.children_mut();
        queue.extend(left);
        queue.extend(right);
    }

    debug!(removed, "pruned placeholders");
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{build_tree, BuildOptions};

    fn tree_from(slots: &[Option<i64>]) -> Tree {
        build_tree(slots, &BuildOptions::default()).unwrap()
    }

    #[test]
    fn test_pad_fills_to_total_levels() {
        let mut tree = tree_from(&[Some(1), Some(2), Some(3), Some(4), Some(5), Some(6)]);
        let added = pad(&mut tree);

        // 3's right child, its pair below, and a pair under each of 4, 5, 6.
        assert_eq!(added, 9);
        let levels = tree.levels();
        assert_eq!(levels.len(), 4);
        assert_eq!(levels[2].len(), 4);
        assert!(levels[2][3].is_placeholder());
        assert_eq!(levels[3].len(), 8);
        assert!(levels[3].iter().all(|node| node.is_placeholder()));
        assert_eq!(tree.depth(), tree.total_levels() + 1);
    }

    #[test]
    fn test_pad_sparse_chain() {
        let mut tree = tree_from(&[Some(1), None, Some(2)]);
        pad(&mut tree);

        let levels = tree.levels();
        assert_eq!(levels[1].len(), 2);
        assert!(levels[1][0].is_placeholder());
        assert_eq!(levels[1][1].value, Some(2));
        assert_eq!(levels[2].len(), 4);
        assert!(levels[2].iter().all(|node| node.is_placeholder()));
    }

    #[test]
    fn test_placeholder_ids_are_fresh() {
        let mut tree = tree_from(&[Some(1), None, Some(2), None, Some(3)]);
        let bound_before = tree.id_bound();
        pad(&mut tree);

        let placeholder_ids: Vec<usize> = tree
            .iter()
            .filter(|node| node.is_placeholder())
            .map(|node| node.id.index())
            .collect();
        assert!(!placeholder_ids.is_empty());
        assert!(placeholder_ids.iter().all(|&id| id >= bound_before && id < tree.id_bound()));
    }

    #[test]
    fn test_prune_restores_original() {
        let original = tree_from(&[Some(1), None, Some(2), None, Some(4), Some(5), Some(6), Some(7)]);
        let mut tree = original.clone();
        let added = pad(&mut tree);
        let removed = prune(&mut tree);

        assert_eq!(added, removed);
        let before: Vec<_> = original.iter().map(|n| (n.id, n.value, n.level)).collect();
        let after: Vec<_> = tree.iter().map(|n| (n.id, n.value, n.level)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_single_root_gets_one_pair() {
        let mut tree = tree_from(&[Some(0)]);
        assert_eq!(pad(&mut tree), 2);
        assert_eq!(tree.depth(), 2);
        assert_eq!(prune(&mut tree), 2);
        assert_eq!(tree.len(), 1);
    }
}
