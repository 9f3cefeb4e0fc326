//! Positioned binary tree
//!
//! Built from a level-order array and laid out over a complete grid. The
//! grid can be materialized with placeholders ([`pad`]) and removed again
//! ([`prune`]).
//!
//! Ownership is strictly top-down: every node owns its two children.
//! All passes here walk the tree with explicit queues/stacks.

mod builder;
mod node;
mod padding;
mod traversal;

pub use builder::{build_tree, BuildOptions};
pub use node::{NodeId, TreeNode};
pub use padding::{pad, prune};
pub use traversal::{events, DepthFirstEvents, Phase, TraversalEvent, TraversalOrder, UnknownOrder};

use std::collections::VecDeque;

/// Binary tree plus the bookkeeping the layout passes need
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    /// Root node (always a real value)
    root: Box<TreeNode>,

    /// Deepest level holding a real value
    total_levels: u32,

    /// Next free id for placeholders
    next_id: u32,
}

impl Tree {
    /// Wrap an existing node hierarchy.
    ///
    /// `total_levels` is the deepest level holding a real value and the id
    /// allocator starts past the largest id present.
    pub fn from_root(root: TreeNode) -> Self {
        let mut total_levels = root.level;
        let mut max_id = root.id.0;
        let mut stack = vec![&root];
        while let Some(node) = stack.pop() {
            if !node.is_placeholder() {
                total_levels = total_levels.max(node.level);
            }
            max_id = max_id.max(node.id.0);
            let (left, right) = node.children();
            stack.extend(left);
            stack.extend(right);
        }

        Self {
            root: Box::new(root),
            total_levels,
            next_id: max_id + 1,
        }
    }

    pub(crate) fn from_parts(root: Box<TreeNode>, total_levels: u32, next_id: u32) -> Self {
        Self {
            root,
            total_levels,
            next_id,
        }
    }

    /// Get root node
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Get root node mutably
    pub fn root_mut(&mut self) -> &mut TreeNode {
        &mut self.root
    }

    /// Deepest level reached by a real value
    pub fn total_levels(&self) -> u32 {
        self.total_levels
    }

    /// Exclusive upper bound of every id in the tree
    pub fn id_bound(&self) -> usize {
        self.next_id as usize
    }

    /// Number of nodes, placeholders included
    pub fn len(&self) -> usize {
        self.root.subtree_len()
    }

    /// Always `false`; pairs with [`Tree::len`], and a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of nodes carrying a value
    pub fn real_len(&self) -> usize {
        self.iter().filter(|node| !node.is_placeholder()).count()
    }

    /// Deepest level currently present, placeholders included
    pub fn depth(&self) -> u32 {
        self.iter().map(|node| node.level).max().unwrap_or(self.root.level)
    }

    /// Level-order iterator over every node
    pub fn iter(&self) -> LevelOrder<'_> {
        LevelOrder {
            queue: VecDeque::from([self.root()]),
        }
    }

    /// Group nodes by level, in level order (index 0 = root level)
    pub fn levels(&self) -> Vec<Vec<&TreeNode>> {
        let mut levels: Vec<Vec<&TreeNode>> = Vec::new();
        for node in self.iter() {
            let idx = (node.level - self.root.level) as usize;
            if levels.len() <= idx {
                levels.resize_with(idx + 1, Vec::new);
            }
            levels[idx].push(node);
        }
        levels
    }

    /// Look up a node by id
    pub fn find(&self, id: NodeId) -> Option<&TreeNode> {
        self.iter().find(|node| node.id == id)
    }

    /// Apply `f` to every node in level order
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut TreeNode)) {
        let mut queue: VecDeque<&mut TreeNode> = VecDeque::from([self.root.as_mut()]);
        while let Some(node) = queue.pop_front() {
            f(node);
            let (left, right) = node.children_mut();
            queue.extend(left);
            queue.extend(right);
        }
    }
}

/// Breadth-first iterator over a [`Tree`]
#[derive(Debug)]
pub struct LevelOrder<'a> {
    queue: VecDeque<&'a TreeNode>,
}

impl<'a> Iterator for LevelOrder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        let (left, right) = node.children();
        self.queue.extend(left);
        self.queue.extend(right);
        Some(node)
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a TreeNode;
    type IntoIter = LevelOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
