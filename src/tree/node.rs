//! Positioned binary tree node
//!
//! Node = value + two owned children + screen position + depth level.
//! Placeholder nodes carry no value and exist only while the layout runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable node identifier
///
/// Real nodes use the index of the array slot they were built from;
/// placeholders get ids past the end of the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Index form, for side tables sized by `Tree::id_bound`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tree node with exclusive ownership of its children
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Stable identifier
    pub id: NodeId,

    /// Stored value (`None` for placeholders)
    pub value: Option<i64>,

    /// Left subtree
    pub left: Option<Box<TreeNode>>,

    /// Right subtree
    pub right: Option<Box<TreeNode>>,

    /// Horizontal position in viewport pixels
    pub x: f64,

    /// Vertical position in viewport pixels
    pub y: f64,

    /// Depth from root (root = 1)
    pub level: u32,
}

impl TreeNode {
    /// Create a real node
    pub fn new(id: NodeId, value: i64, x: f64, y: f64, level: u32) -> Self {
        Self {
            id,
            value: Some(value),
            left: None,
            right: None,
            x,
            y,
            level,
        }
    }

    /// Create a placeholder at the origin
    pub fn placeholder(id: NodeId, level: u32) -> Self {
        Self {
            id,
            value: None,
            left: None,
            right: None,
            x: 0.0,
            y: 0.0,
            level,
        }
    }

    /// Check if this node was synthesized by padding
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.value.is_none()
    }

    /// Check if leaf (no children)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Borrow both children at once
    #[inline]
    pub fn children(&self) -> (Option<&TreeNode>, Option<&TreeNode>) {
        (self.left.as_deref(), self.right.as_deref())
    }

    /// Mutably borrow both children at once
    #[inline]
    pub fn children_mut(&mut self) -> (Option<&mut TreeNode>, Option<&mut TreeNode>) {
        (self.left.as_deref_mut(), self.right.as_deref_mut())
    }

    /// Number of nodes in this subtree, placeholders included
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            let (left, right) = node.children();
            stack.extend(left);
            stack.extend(right);
        }
        count
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}({}) @ L{}", self.id, value, self.level),
            None => write!(f, "{}(_) @ L{}", self.id, self.level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_flags() {
        let node = TreeNode::placeholder(NodeId(9), 3);
        assert!(node.is_placeholder());
        assert!(node.is_leaf());
        assert_eq!((node.x, node.y), (0.0, 0.0));
        assert_eq!(node.to_string(), "#9(_) @ L3");
    }

    #[test]
    fn test_subtree_len() {
        let mut root = TreeNode::new(NodeId(0), 1, 0.0, 0.0, 1);
        let mut left = TreeNode::new(NodeId(1), 2, 0.0, 0.0, 2);
        left.right = Some(Box::new(TreeNode::new(NodeId(4), 5, 0.0, 0.0, 3)));
        root.left = Some(Box::new(left));
        root.right = Some(Box::new(TreeNode::placeholder(NodeId(7), 2)));

        assert_eq!(root.subtree_len(), 4);
        assert_eq!(root.to_string(), "#0(1) @ L1");
    }
}
