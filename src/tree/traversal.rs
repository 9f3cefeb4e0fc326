//! Depth-first traversal events
//!
//! Every real node produces two events: `Exploring` when the walk reaches
//! it and `Visited` when its value is processed. The order mode only
//! decides where `Visited` falls relative to the two subtrees.
//!
//! The walk keeps an explicit frame stack, one frame per active level, so
//! deep trees never grow the call stack.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{NodeId, Tree, TreeNode};

/// Depth-first order mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree
    InOrder,

    /// Node, left subtree, right subtree
    PreOrder,

    /// Left subtree, right subtree, node
    PostOrder,
}

/// Selector text did not name a traversal order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown traversal order '{0}' (expected in-order, pre-order or post-order)")]
pub struct UnknownOrder(pub String);

impl TraversalOrder {
    /// All modes, in selector order
    pub const ALL: [TraversalOrder; 3] = [Self::InOrder, Self::PreOrder, Self::PostOrder];

    /// Selector label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InOrder => "in-order",
            Self::PreOrder => "pre-order",
            Self::PostOrder => "post-order",
        }
    }

    fn steps(self) -> &'static [Step; 4] {
        match self {
            Self::InOrder => &[Step::Explore, Step::Left, Step::Visit, Step::Right],
            Self::PreOrder => &[Step::Explore, Step::Visit, Step::Left, Step::Right],
            Self::PostOrder => &[Step::Explore, Step::Left, Step::Right, Step::Visit],
        }
    }
}

impl FromStr for TraversalOrder {
    type Err = UnknownOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s.trim())
            .ok_or_else(|| UnknownOrder(s.to_string()))
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Animation phase of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Traversal reached the node
    Exploring,

    /// Traversal processed the node's value
    Visited,
}

/// One status change produced by a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalEvent {
    /// Node whose status changes
    pub node: NodeId,

    /// Value carried by the node
    pub value: i64,

    /// New phase
    pub phase: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Explore,
    Left,
    Visit,
    Right,
}

#[derive(Debug)]
struct Frame<'a> {
    node: &'a TreeNode,
    value: i64,
    step: usize,
}

impl<'a> Frame<'a> {
    /// Frames exist only for real nodes
    fn enter(node: Option<&'a TreeNode>) -> Option<Self> {
        let node = node?;
        let value = node.value?;
        Some(Self {
            node,
            value,
            step: 0,
        })
    }
}

/// Lazy depth-first event stream
#[derive(Debug)]
pub struct DepthFirstEvents<'a> {
    order: TraversalOrder,
    stack: Vec<Frame<'a>>,
}

impl<'a> DepthFirstEvents<'a> {
    /// Start a walk at `root`
    pub fn new(root: &'a TreeNode, order: TraversalOrder) -> Self {
        Self {
            order,
            stack: Frame::enter(Some(root)).into_iter().collect(),
        }
    }

    /// Active frame count (current depth of the walk)
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Iterator for DepthFirstEvents<'_> {
    type Item = TraversalEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let steps = self.order.steps();
        loop {
            let frame = self.stack.last_mut()?;
            let Some(&step) = steps.get(frame.step) else {
                self.stack.pop();
                continue;
            };
            frame.step += 1;

            let (node, value) = (frame.node, frame.value);
            let event = |phase| TraversalEvent {
                node: node.id,
                value,
                phase,
            };
            match step {
                Step::Explore => return Some(event(Phase::Exploring)),
                Step::Visit => return Some(event(Phase::Visited)),
                Step::Left => self.stack.extend(Frame::enter(node.left.as_deref())),
                Step::Right => self.stack.extend(Frame::enter(node.right.as_deref())),
            }
        }
    }
}

/// Full event sequence for `tree` in the given order.
///
/// Placeholders never produce events, so this is safe on a padded tree.
pub fn events(tree: &Tree, order: TraversalOrder) -> Vec<TraversalEvent> {
    DepthFirstEvents::new(tree.root(), order).collect()
}
